pub mod events;
pub mod http;
pub mod operation;
mod pipeline;
pub mod response;
mod transport;
mod types;

pub use events::{
    CompositeEventSink, Event, EventSink, NoOpEventSink, StdoutEventSink, TracingEventSink,
};
pub use http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient};
pub use operation::{alter_state, each, AlterState, BoxedOperation, Each, Operation};
pub use pipeline::{execute, Executor};
pub use response::{classify, classify_outcome, parse_body, ACCEPTED_STATUSES};
pub use transport::Transport;
pub use types::ClientConfig;
