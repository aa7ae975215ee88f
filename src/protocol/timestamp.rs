//! NTP timestamp representation.
//!
//! `LeoNTP` status replies carry the device's reference timestamp in the
//! classic NTP 32.32 fixed-point form: 32-bit integer seconds plus a 32-bit
//! fraction in units of 1/2^32 seconds. On the wire the fraction word comes
//! first; both words are little-endian.

/// NTP reference timestamp: 32-bit seconds + 32-bit fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NtpTimestamp {
    /// Integer seconds of the NTP timestamp.
    pub seconds: u32,
    /// Fractional part in units of 1/2^32 seconds.
    pub fraction: u32,
}

impl NtpTimestamp {
    /// Wire size in bytes (fraction word + seconds word).
    pub const SIZE: usize = 8;

    /// Create a new timestamp.
    #[must_use]
    pub fn new(seconds: u32, fraction: u32) -> Self {
        Self { seconds, fraction }
    }

    /// Zero timestamp.
    pub const ZERO: Self = Self {
        seconds: 0,
        fraction: 0,
    };

    /// Fractional seconds in `[0, 1)`.
    #[must_use]
    pub fn fraction_seconds(&self) -> f64 {
        f64::from(self.fraction) / 4_294_967_296.0
    }

    /// Total seconds as a float: `fraction + seconds`.
    ///
    /// No NTP-era (2036 boundary) rollover correction is applied; the value
    /// is exactly what the device reports.
    #[must_use]
    pub fn as_seconds_f64(&self) -> f64 {
        self.fraction_seconds() + f64::from(self.seconds)
    }

    /// Fractional part expressed as nanoseconds (for display).
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "fraction_seconds() is in [0, 1), so nanos fit in u32"
    )]
    pub fn subsec_nanos(&self) -> u32 {
        (self.fraction_seconds() * 1_000_000_000.0) as u32
    }

    /// Decode from wire format: 4-byte fraction (LE) + 4-byte seconds (LE).
    ///
    /// Returns `None` if the slice is too short.
    #[must_use]
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE {
            return None;
        }
        let fraction = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let seconds = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        Some(Self { seconds, fraction })
    }

    /// Encode to wire format: 4-byte fraction (LE) + 4-byte seconds (LE).
    #[must_use]
    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&self.fraction.to_le_bytes());
        buf[4..8].copy_from_slice(&self.seconds.to_le_bytes());
        buf
    }
}

impl std::fmt::Display for NtpTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.subsec_nanos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_derivation() {
        let half = NtpTimestamp::new(0, 0x8000_0000);
        assert!((half.fraction_seconds() - 0.5).abs() < 1e-12);

        let quarter = NtpTimestamp::new(0, 0x4000_0000);
        assert!((quarter.fraction_seconds() - 0.25).abs() < 1e-12);

        assert_eq!(NtpTimestamp::ZERO.fraction_seconds(), 0.0);
    }

    #[test]
    fn test_fraction_stays_below_one() {
        let max = NtpTimestamp::new(0, u32::MAX);
        assert!(max.fraction_seconds() < 1.0);
    }

    #[test]
    fn test_total_seconds_never_below_integer_part() {
        let ts = NtpTimestamp::new(4_000_000_000, 0x8000_0000);
        assert!(ts.as_seconds_f64() >= f64::from(ts.seconds));
    }

    #[test]
    fn test_decode_wire_order() {
        // Fraction word first, then seconds, both little-endian.
        let data = [0x00, 0x00, 0x00, 0x80, 0x10, 0x00, 0x00, 0x00];
        let ts = NtpTimestamp::decode(&data).unwrap();
        assert_eq!(ts.fraction, 0x8000_0000);
        assert_eq!(ts.seconds, 16);
    }

    #[test]
    fn test_decode_too_short() {
        assert!(NtpTimestamp::decode(&[0u8; 7]).is_none());
    }

    #[test]
    fn test_encode_decode_fixture() {
        let ts = NtpTimestamp::new(3_900_000_123, 0xC000_0000);
        let decoded = NtpTimestamp::decode(&ts.encode()).unwrap();
        assert_eq!(decoded, ts);
    }

    #[test]
    fn test_display() {
        let ts = NtpTimestamp::new(42, 0x8000_0000);
        assert_eq!(ts.to_string(), "42.500000000");
    }
}
