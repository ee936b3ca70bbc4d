pub mod decode;
pub mod pipeline;
pub mod request;
pub mod transport;

#[cfg(test)]
pub(crate) mod stub;

pub use pipeline::Fetcher;
pub use request::{build_url, Resource, ResourceKind};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
