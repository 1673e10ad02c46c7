//! HTTP plumbing for the inventory console: endpoint map, transport seam,
//! single-flight guard and the operation executor.

pub mod endpoints;
pub mod error;
pub mod executor;
pub mod guard;
pub mod transport;

pub use endpoints::{with_source, Endpoints};
pub use error::ExecutorError;
pub use executor::{
    summarize, OperationExecutor, OperationOutcome, OperationRequest, OperationResult,
    OperationStatus, PendingOperation, ResponseBody, StatusKind,
};
pub use guard::{InFlightGuard, InFlightToken};
pub use transport::{HttpMethod, RawResponse, ReqwestTransport, Transport, TransportError};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
