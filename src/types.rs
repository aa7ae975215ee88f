//! Core data model.

use crate::protocol::StatusReply;

/// Result of one poll attempt for one device in one scrape cycle.
///
/// A sample is created fresh for every poll of every cycle, handed to the
/// renderer once, and discarded. The invariant that an unreachable device
/// reports nothing but its `up` indicator is carried by the type: a sample
/// without telemetry simply has no fields to render.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySample {
    /// Device host identifier, used for addressing and as the metric label.
    pub host: String,
    /// Decoded telemetry, present iff the poll succeeded.
    pub telemetry: Option<StatusReply>,
}

impl TelemetrySample {
    /// Sample for a device that answered with a well-formed reply.
    #[must_use]
    pub fn reachable(host: impl Into<String>, reply: StatusReply) -> Self {
        Self {
            host: host.into(),
            telemetry: Some(reply),
        }
    }

    /// Sample for a device whose poll failed at any stage.
    #[must_use]
    pub fn unreachable(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            telemetry: None,
        }
    }

    /// Whether the device answered this cycle.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.telemetry.is_some()
    }
}
