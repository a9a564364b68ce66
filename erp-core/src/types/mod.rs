mod job;
mod operation;
mod rpc;

pub use job::JobDocument;
pub use operation::{
    CreateParams, DeleteParams, EachParams, OperationSpec, QueryParams, UpdateParams,
};
pub use rpc::RpcCall;
