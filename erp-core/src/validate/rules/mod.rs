pub(crate) mod common;
pub(crate) mod job;
pub(crate) mod operation;
