//! Single-device status poller.
//!
//! One poll is a strictly sequential resolve → connect → send → recv →
//! decode exchange over UDP. The whole exchange runs under an explicit
//! per-call deadline so an unresponsive device costs at most the deadline,
//! never an unbounded wait. The socket is scoped to the exchange and is
//! released on every exit path.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::{UdpSocket, lookup_host};

use crate::error::PollError;
use crate::protocol::{NTP_PORT, STATUS_REQUEST, StatusReply};

/// Receive buffer size; replies are 48 bytes but devices may send more.
const RECV_BUF_SIZE: usize = 1024;

/// Polls one `LeoNTP` device for its status block.
#[derive(Debug, Clone, Copy)]
pub struct StatusPoller {
    port: u16,
    timeout: Duration,
}

impl StatusPoller {
    /// Create a poller targeting the standard NTP port.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self::with_port(NTP_PORT, timeout)
    }

    /// Create a poller targeting a non-standard port.
    #[must_use]
    pub fn with_port(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }

    /// Per-call deadline applied to the whole exchange.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform one status exchange with `host`.
    ///
    /// A host may carry an explicit `host:port` suffix; otherwise the
    /// poller's configured port is used.
    ///
    /// # Errors
    /// Returns a [`PollError`] naming the stage that failed. The deadline
    /// elapsing at any stage yields [`PollError::Timeout`].
    pub async fn poll(&self, host: &str) -> Result<StatusReply, PollError> {
        match tokio::time::timeout(self.timeout, self.exchange(host)).await {
            Ok(result) => result,
            Err(_) => Err(PollError::Timeout {
                timeout: self.timeout,
            }),
        }
    }

    async fn exchange(&self, host: &str) -> Result<StatusReply, PollError> {
        let addr = self.resolve(host).await?;

        // A fresh unconnected socket per poll; dropped on every exit path.
        let bind_addr = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|source| PollError::Connect { addr, source })?;
        socket
            .connect(addr)
            .await
            .map_err(|source| PollError::Connect { addr, source })?;

        socket.send(&STATUS_REQUEST).await.map_err(PollError::Send)?;

        let mut buf = [0u8; RECV_BUF_SIZE];
        let len = socket.recv(&mut buf).await.map_err(PollError::Receive)?;
        tracing::debug!(host, len, "status reply received");

        Ok(StatusReply::decode(&buf[..len])?)
    }

    async fn resolve(&self, host: &str) -> Result<SocketAddr, PollError> {
        let mut addrs = if host.contains(':') {
            lookup_host(host).await.map(|a| a.collect::<Vec<_>>())
        } else {
            lookup_host((host, self.port))
                .await
                .map(|a| a.collect::<Vec<_>>())
        }
        .map_err(|source| PollError::Resolve {
            host: host.to_string(),
            source,
        })?
        .into_iter();

        addrs.next().ok_or_else(|| PollError::Resolve {
            host: host.to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no addresses returned for host",
            ),
        })
    }
}
