//! Deterministic construction of OData entity requests.
//!
//! Nothing in here performs I/O: given a service endpoint and an entity or query descriptor
//! the functions return the exact URL and headers to send.

mod query;
mod request;

pub use query::{OrderBy, Query, SortDirection};
pub use request::{
    entity_url, odata_headers, query_headers, query_url, EntityId, EntityRef, EntityRequest,
    Method, ServiceEndpoint,
};
