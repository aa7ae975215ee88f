//! # leontp-exporter
//!
//! A Prometheus exporter for `LeoNTP` GPS-disciplined NTP servers.
//!
//! The exporter polls every configured device over the `LeoNTP` binary
//! status protocol (UDP port 123) once per inbound scrape, decodes the
//! fixed-layout status reply, and renders the result as Prometheus text
//! exposition. Each scrape reflects live device state; nothing is cached
//! between scrapes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use leontp_exporter::collector::FleetCollector;
//! use leontp_exporter::poller::StatusPoller;
//! use leontp_exporter::metrics;
//!
//! # async fn example() {
//! let poller = StatusPoller::new(Duration::from_secs(3));
//! let collector = FleetCollector::new(
//!     vec!["10.0.0.5".to_string()],
//!     poller,
//!     Duration::from_secs(5),
//! );
//!
//! let samples = collector.collect_samples().await;
//! let body = metrics::render(&samples).unwrap();
//! # let _ = body;
//! # }
//! ```
//!
//! # Architecture
//!
//! - **`protocol`** — wire format: the status request and the fixed-offset
//!   reply layout
//! - **`poller`** — one request/reply exchange with a single device
//! - **`collector`** — spawn-all/join-all fan-out across the roster
//! - **`metrics`** / **`server`** — Prometheus rendering and the HTTP face

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Roster and timeout configuration
pub mod config;
/// Error types
pub mod error;
/// Core data model
pub mod types;

pub mod collector;
pub mod metrics;
pub mod poller;
pub mod protocol;
pub mod server;

// Re-exports
pub use collector::FleetCollector;
pub use config::Config;
pub use error::PollError;
pub use poller::StatusPoller;
pub use protocol::{NtpTimestamp, StatusReply};
pub use types::TelemetrySample;

/// Exporter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
