#![forbid(unsafe_code)]

//! State model, late-bound parameters and pure request building for the ERP adaptor.
//!
//! Everything here is free of I/O; the runtime that sends requests lives in `erp-exec`.

pub mod error;
pub mod expr;
pub mod expressions;
pub mod odata;
pub mod parser;
pub mod state;
pub mod types;
pub mod validate;

pub use crate::error::{ErpError, ExprError, ParseError, StateError, ValidationError, Violation};
pub use crate::expr::{data_path, data_value, field, fields, last_reference_value, source_value, Expr};
pub use crate::parser::{parse_job_str, parse_value_str, DocumentFormat, ParsedJob};
pub use crate::state::{ResponseBody, State};
pub use crate::types::JobDocument;
pub use crate::validate::{validate_job, Validate};
