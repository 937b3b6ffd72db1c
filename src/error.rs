//! Unified error type.

use thiserror::Error;

/// The error type returned by the server's fallible operations.
///
/// Request-level failures of the vendor routes (unknown vendor, malformed
/// body, store errors) are [`ApiError`](crate::ApiError)s and become HTTP
/// responses. This type surfaces infrastructure failures: parsing the bind
/// address, binding to a port.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{addr}`: {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
