//! `LeoNTP` binary status protocol.
//!
//! The protocol is a single request/reply exchange over UDP port 123: the
//! client sends a fixed 8-byte status command and the device answers with a
//! fixed-layout little-endian status block. There is no handshake, no
//! framing, and no confirmed integrity or version tag in the reply.

pub mod reply;
pub mod timestamp;

pub use reply::{ReplyParseError, StatusReply};
pub use timestamp::NtpTimestamp;

/// UDP port the status protocol shares with NTP itself.
pub const NTP_PORT: u16 = 123;

/// Fixed 8-byte status-request command.
pub const STATUS_REQUEST: [u8; 8] = [0x27, 0x00, 0x10, 0x01, 0x00, 0x00, 0x00, 0x00];
