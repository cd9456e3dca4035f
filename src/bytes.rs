//! Low-level byte plumbing shared by the decode layers.
//!
//! Everything here is pure and allocation free. Readers return `None` when
//! the buffer runs out; the owning layer maps that to the appropriate
//! truncation error.

/// Number of bytes in a callsign group.
pub(crate) const CALLSIGN_LEN: usize = 6;

const GROUP_BITS: u32 = 48;
const GROUP_MASK: u64 = (1u64 << GROUP_BITS) - 1;

/// Rotate a 6-byte group left by `amount` bits, treating the group as one
/// 48-bit string (most-significant byte first) and wrapping around the end.
///
/// This is the inverse of the transmitter-side callsign obfuscation; the
/// result of a 1-bit rotation of an on-air callsign group is plain ASCII.
#[must_use]
pub(crate) fn rotate_left(bytes: [u8; CALLSIGN_LEN], amount: u32) -> [u8; CALLSIGN_LEN] {
    let n = amount % GROUP_BITS;
    let mut v: u64 = 0;
    for b in bytes {
        v = (v << 8) | u64::from(b);
    }
    if n != 0 {
        v = ((v << n) | (v >> (GROUP_BITS - n))) & GROUP_MASK;
    }
    let mut out = [0u8; CALLSIGN_LEN];
    for (i, b) in out.iter_mut().enumerate() {
        *b = ((v >> (8 * (CALLSIGN_LEN - 1 - i))) & 0xff) as u8;
    }
    out
}

/// Sequential little-endian field reader over a borrowed buffer.
///
/// Field extraction within a frame is strictly sequential since later
/// fields' positions depend on earlier fields' declared lengths.
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    /// Consume the next `n` bytes, or `None` if fewer remain.
    pub fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.buf.len() - self.pos < n {
            return None;
        }
        let dat = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Some(dat)
    }

    pub fn u8(&mut self) -> Option<u8> {
        let dat = self.take(1)?;
        Some(dat[0])
    }

    pub fn i8(&mut self) -> Option<i8> {
        Some(self.u8()? as i8)
    }

    pub fn u16le(&mut self) -> Option<u16> {
        let dat = self.take(2)?;
        Some(u16::from_le_bytes([dat[0], dat[1]]))
    }

    pub fn i16le(&mut self) -> Option<i16> {
        let dat = self.take(2)?;
        Some(i16::from_le_bytes([dat[0], dat[1]]))
    }

    pub fn u32le(&mut self) -> Option<u32> {
        let dat = self.take(4)?;
        Some(u32::from_le_bytes([dat[0], dat[1], dat[2], dat[3]]))
    }

    /// Read a 48-bit little-endian unsigned integer; byte `i` contributes
    /// `dat[i] << (8 * i)`. Stored in a `u64` to hold the full width.
    pub fn u48le(&mut self) -> Option<u64> {
        let dat = self.take(6)?;
        let mut v: u64 = 0;
        for (i, b) in dat.iter().enumerate() {
            v |= u64::from(*b) << (8 * i);
        }
        Some(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse of `rotate_left`, for round-trip checks.
    fn rotate_right(bytes: [u8; CALLSIGN_LEN], amount: u32) -> [u8; CALLSIGN_LEN] {
        rotate_left(bytes, GROUP_BITS - (amount % GROUP_BITS))
    }

    #[test]
    fn rotation_round_trips_for_every_amount() {
        let groups: [[u8; 6]; 4] = [
            [0x48, 0x65, 0x4c, 0x4c, 0x4f, 0x20],
            [0xff, 0x00, 0xa5, 0x5a, 0x01, 0x80],
            [0x00, 0x00, 0x00, 0x00, 0x00, 0x01],
            [0xde, 0xad, 0xbe, 0xef, 0xca, 0xfe],
        ];
        for group in groups {
            for n in 0..48 {
                assert_eq!(
                    rotate_left(rotate_right(group, n), n),
                    group,
                    "round trip failed for n={n}"
                );
                assert_eq!(rotate_right(rotate_left(group, n), n), group);
            }
        }
    }

    #[test]
    fn rotate_by_one_recovers_ascii() {
        // "HELLO " rotated right by 1 bit, as it would appear on the air
        let raw = [0x24, 0x22, 0xa6, 0x26, 0x27, 0x90];
        assert_eq!(rotate_left(raw, 1), *b"HELLO ");

        // One flipped bit on the air corrupts exactly one character
        let mut noisy = raw;
        noisy[1] ^= 0x10;
        assert_eq!(rotate_left(noisy, 1), *b"HeLLO ");
    }

    #[test]
    fn rotate_wraps_the_high_bit() {
        let mut group = [0u8; 6];
        group[0] = 0x80;
        let mut want = [0u8; 6];
        want[5] = 0x01;
        assert_eq!(rotate_left(group, 1), want);
    }

    #[test]
    fn cursor_reads_little_endian() {
        let dat = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0xff, 0xfe, 0xff];
        let mut c = Cursor::new(&dat);
        assert_eq!(c.u16le(), Some(0x0201));
        assert_eq!(c.u32le(), Some(0x06050403));
        assert_eq!(c.i8(), Some(-1));
        assert_eq!(c.i16le(), Some(-2));
        assert_eq!(c.u8(), None, "cursor should be exhausted");
    }

    #[test]
    fn cursor_assembles_48_bit_timestamps() {
        let dat = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let mut c = Cursor::new(&dat);
        assert_eq!(c.u48le(), Some(0x0605_0403_0201));

        let dat = [0xff; 6];
        let mut c = Cursor::new(&dat);
        assert_eq!(c.u48le(), Some(0xffff_ffff_ffff));
    }

    #[test]
    fn cursor_take_does_not_read_past_the_end() {
        let dat = [1, 2, 3];
        let mut c = Cursor::new(&dat);
        assert!(c.take(4).is_none());
        assert_eq!(c.take(3), Some(&dat[..]));
        assert!(c.u8().is_none());
    }
}
