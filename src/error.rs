//! Poll error taxonomy.
//!
//! Every stage of a device exchange maps to its own variant so a failed
//! poll can be logged precisely. All variants are terminal for that
//! device's poll: the collector converts any of them into an unreachable
//! sample and the scrape as a whole carries on.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::protocol::ReplyParseError;

/// Errors that can occur while polling a single device.
#[derive(Debug, Error)]
pub enum PollError {
    /// Host name did not resolve to a usable UDP endpoint.
    #[error("address resolution failed for {host}: {source}")]
    Resolve {
        /// The host that failed to resolve.
        host: String,
        /// The underlying resolver error.
        #[source]
        source: io::Error,
    },

    /// Socket setup or connect to the device endpoint failed.
    #[error("connect to {addr} failed: {source}")]
    Connect {
        /// The resolved device endpoint.
        addr: SocketAddr,
        /// The underlying socket error.
        #[source]
        source: io::Error,
    },

    /// Sending the status request failed.
    #[error("status request send failed: {0}")]
    Send(#[source] io::Error),

    /// Receiving the status reply failed.
    #[error("status reply receive failed: {0}")]
    Receive(#[source] io::Error),

    /// The exchange did not complete within the per-poll deadline.
    #[error("no status reply within {timeout:?}")]
    Timeout {
        /// The deadline that elapsed.
        timeout: Duration,
    },

    /// The reply arrived but could not be decoded.
    #[error("malformed status reply: {0}")]
    Parse(#[from] ReplyParseError),
}

impl PollError {
    /// Check whether this error is the per-poll deadline elapsing.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
