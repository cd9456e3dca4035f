//! AX.25 address and control prefix decoding.
//!
//! Reference: AX.25 Link Access Protocol for Amateur Packet Radio v2.2
use serde::{Deserialize, Serialize};

use crate::bytes::{rotate_left, CALLSIGN_LEN};
use crate::{Error, Result};

/// The fixed AX.25 prefix of every frame: two callsign+SSID address blocks
/// followed by the control byte.
///
/// Callsigns arrive bit-rotated on the air; `decode` applies the inverse
/// 1-bit rotation so the stored strings are plain space-padded ASCII,
/// always exactly 6 characters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Ax25Header {
    pub dest_callsign: String,
    pub dest_ssid: u8,
    pub src_callsign: String,
    pub src_ssid: u8,
    pub control: u8,
}

impl Ax25Header {
    /// Header length in bytes: dest block (7) + src block (7) + control (1).
    pub const LEN: usize = 15;

    /// Decode from bytes.
    ///
    /// # Errors
    /// [`Error::TruncatedHeader`] if fewer than [`Self::LEN`] bytes are
    /// available. A truncated header is fatal for the whole frame.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < Self::LEN {
            return Err(Error::TruncatedHeader {
                actual: buf.len(),
                minimum: Self::LEN,
            });
        }
        Ok(Ax25Header {
            dest_callsign: decode_callsign(&buf[0..6]),
            dest_ssid: ssid(buf[6]),
            src_callsign: decode_callsign(&buf[7..13]),
            src_ssid: ssid(buf[13]),
            control: buf[14],
        })
    }
}

/// Recover the ASCII callsign from a 6-byte on-air group.
fn decode_callsign(raw: &[u8]) -> String {
    let mut group = [0u8; CALLSIGN_LEN];
    group.copy_from_slice(raw);
    rotate_left(group, 1).iter().map(|&b| char::from(b)).collect()
}

/// The SSID is bits 1-3 of the address block's trailing byte.
fn ssid(byte: u8) -> u8 {
    (byte & 0x0f) >> 1
}
