//! Status reply parsing and encoding.
//!
//! The reply is a fixed-layout little-endian block. The first 16 bytes are
//! not used by the exporter; the fields of interest sit at offsets 16..44,
//! with an optional firmware-version word at 44..48. Decoding is
//! all-or-nothing: a buffer shorter than 44 bytes is rejected outright
//! rather than yielding a partial reply.

use super::timestamp::NtpTimestamp;

/// Decoded `LeoNTP` status reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReply {
    /// Reference timestamp (offsets 16..24).
    pub reference_time: NtpTimestamp,
    /// Device uptime in seconds (offsets 24..28).
    pub uptime_seconds: u32,
    /// NTP requests served since boot (offsets 28..32).
    pub ntp_requests_served: u32,
    /// Command requests served since boot (offsets 32..36). Decoded but not
    /// exported.
    pub command_requests_served: u32,
    /// GPS lock duration in seconds (offsets 36..40).
    pub lock_time_seconds: u32,
    /// Status flag bitfield (offset 40). Decoded but not exported.
    pub flags: u8,
    /// Active satellite count (offset 41).
    pub satellites: u8,
    /// Device serial number (offsets 42..44).
    pub serial: u16,
    /// Firmware version (offsets 44..48), present only when the reply
    /// carries the optional trailing word.
    pub firmware_version: Option<u32>,
}

impl StatusReply {
    /// Minimum reply size accepted by the decoder.
    pub const MIN_SIZE: usize = 44;

    /// Reply size including the optional firmware-version word.
    pub const FULL_SIZE: usize = 48;

    /// Decode a status reply from raw bytes.
    ///
    /// The decoder performs no structural validation beyond the length
    /// bound: the wire protocol is not known to carry a magic or version
    /// tag, so the fixed offsets are trusted as-is.
    ///
    /// # Errors
    /// Returns [`ReplyParseError::TooShort`] if fewer than
    /// [`Self::MIN_SIZE`] bytes are available.
    pub fn decode(data: &[u8]) -> Result<Self, ReplyParseError> {
        if data.len() < Self::MIN_SIZE {
            return Err(ReplyParseError::TooShort {
                needed: Self::MIN_SIZE,
                have: data.len(),
            });
        }

        // Length was checked above, so decode cannot fail here.
        let reference_time = NtpTimestamp::decode(&data[16..24]).ok_or(
            ReplyParseError::TooShort {
                needed: Self::MIN_SIZE,
                have: data.len(),
            },
        )?;
        let uptime_seconds = u32::from_le_bytes([data[24], data[25], data[26], data[27]]);
        let ntp_requests_served = u32::from_le_bytes([data[28], data[29], data[30], data[31]]);
        let command_requests_served = u32::from_le_bytes([data[32], data[33], data[34], data[35]]);
        let lock_time_seconds = u32::from_le_bytes([data[36], data[37], data[38], data[39]]);
        let flags = data[40];
        let satellites = data[41];
        let serial = u16::from_le_bytes([data[42], data[43]]);
        let firmware_version = if data.len() >= Self::FULL_SIZE {
            Some(u32::from_le_bytes([data[44], data[45], data[46], data[47]]))
        } else {
            None
        };

        Ok(Self {
            reference_time,
            uptime_seconds,
            ntp_requests_served,
            command_requests_served,
            lock_time_seconds,
            flags,
            satellites,
            serial,
            firmware_version,
        })
    }

    /// Encode to wire format (48 bytes, offsets 0..16 zeroed).
    ///
    /// Used by tests and fake devices; real devices produce these blocks.
    #[must_use]
    pub fn encode(&self) -> [u8; Self::FULL_SIZE] {
        let mut buf = [0u8; Self::FULL_SIZE];
        buf[16..24].copy_from_slice(&self.reference_time.encode());
        buf[24..28].copy_from_slice(&self.uptime_seconds.to_le_bytes());
        buf[28..32].copy_from_slice(&self.ntp_requests_served.to_le_bytes());
        buf[32..36].copy_from_slice(&self.command_requests_served.to_le_bytes());
        buf[36..40].copy_from_slice(&self.lock_time_seconds.to_le_bytes());
        buf[40] = self.flags;
        buf[41] = self.satellites;
        buf[42..44].copy_from_slice(&self.serial.to_le_bytes());
        buf[44..48].copy_from_slice(&self.firmware_version.unwrap_or(0).to_le_bytes());
        buf
    }

    /// Derived NTP time: fractional seconds + integer seconds.
    ///
    /// No NTP-era rollover correction is applied.
    #[must_use]
    pub fn ntp_time(&self) -> f64 {
        self.reference_time.as_seconds_f64()
    }
}

/// Errors from status reply parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplyParseError {
    /// Reply too short to contain the fixed field layout.
    #[error("status reply too short: need {needed} bytes, have {have}")]
    TooShort {
        /// Minimum bytes needed.
        needed: usize,
        /// Bytes actually available.
        have: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> StatusReply {
        StatusReply {
            reference_time: NtpTimestamp::new(4_000_000_000, 0),
            uptime_seconds: 86_400,
            ntp_requests_served: 500,
            command_requests_served: 7,
            lock_time_seconds: 3_600,
            flags: 0x01,
            satellites: 9,
            serial: 100,
            firmware_version: Some(0x0001_0203),
        }
    }

    #[test]
    fn test_decode_fixture() {
        let decoded = StatusReply::decode(&fixture().encode()).unwrap();
        assert_eq!(decoded, fixture());
        assert_eq!(decoded.serial, 100);
        assert_eq!(decoded.satellites, 9);
        assert_eq!(decoded.uptime_seconds, 86_400);
        assert_eq!(decoded.lock_time_seconds, 3_600);
        assert_eq!(decoded.ntp_requests_served, 500);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let bytes = fixture().encode();
        assert_eq!(
            StatusReply::decode(&bytes).unwrap(),
            StatusReply::decode(&bytes).unwrap()
        );
    }

    #[test]
    fn test_decode_without_firmware_word() {
        let bytes = fixture().encode();
        let decoded = StatusReply::decode(&bytes[..StatusReply::MIN_SIZE]).unwrap();
        assert_eq!(decoded.firmware_version, None);
        assert_eq!(decoded.serial, 100);
    }

    #[test]
    fn test_decode_too_short_is_all_or_nothing() {
        for len in [0usize, 1, 16, 43] {
            let buf = vec![0u8; len];
            let err = StatusReply::decode(&buf).unwrap_err();
            assert_eq!(
                err,
                ReplyParseError::TooShort {
                    needed: StatusReply::MIN_SIZE,
                    have: len,
                }
            );
        }
    }

    #[test]
    fn test_ntp_time_combines_fraction_and_seconds() {
        let reply = StatusReply {
            reference_time: NtpTimestamp::new(4_000_000_000, 0x8000_0000),
            ..fixture()
        };
        assert!((reply.ntp_time() - 4_000_000_000.5).abs() < 1e-6);
        assert!(reply.ntp_time() >= f64::from(reply.reference_time.seconds));
    }

    #[test]
    fn test_little_endian_field_layout() {
        let mut bytes = [0u8; StatusReply::FULL_SIZE];
        bytes[24] = 0x01; // uptime = 1
        bytes[42] = 0x34;
        bytes[43] = 0x12; // serial = 0x1234
        let decoded = StatusReply::decode(&bytes).unwrap();
        assert_eq!(decoded.uptime_seconds, 1);
        assert_eq!(decoded.serial, 0x1234);
    }
}
