//! Frame classification and top-level decoding.
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ax25::Ax25Header;
use crate::beacon::Beacon;
use crate::{Error, Result};

/// Control-byte bits that select the frame kind.
const KIND_MASK: u8 = 0b0001_0011;

/// Frame kinds, keyed on `control & KIND_MASK`. Exact value match only;
/// every selector not in the table is `Unhandled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    I,
    Ui,
    Unhandled,
}

fn classify(control: u8) -> Kind {
    match control & KIND_MASK {
        0x00 | 0x02 | 0x10 | 0x12 => Kind::I,
        0x03 | 0x13 => Kind::Ui,
        _ => Kind::Unhandled,
    }
}

/// One decoded AX.25 frame.
///
/// `IFrame` carries its information field verbatim; this decoder does not
/// interpret I-frame payloads. `UiFrame` carries a decoded telemetry
/// [Beacon]. `Unhandled` preserves the raw post-header bytes of frame
/// kinds this decoder does not recognize so callers can inspect or
/// discard them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Frame {
    IFrame {
        header: Ax25Header,
        pid: u8,
        info: Vec<u8>,
    },
    UiFrame {
        header: Ax25Header,
        pid: u8,
        beacon: Beacon,
    },
    Unhandled {
        header: Ax25Header,
        info: Vec<u8>,
    },
}

impl Frame {
    #[must_use]
    pub fn header(&self) -> &Ax25Header {
        match self {
            Frame::IFrame { header, .. }
            | Frame::UiFrame { header, .. }
            | Frame::Unhandled { header, .. } => header,
        }
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let h = self.header();
        match self {
            Frame::IFrame { pid, info, .. } => write!(
                f,
                "IFrame{{src: {}-{}, pid: {pid:#04x}, info:[len={}]}}",
                h.src_callsign.trim_end(),
                h.src_ssid,
                info.len()
            ),
            Frame::UiFrame { pid, beacon, .. } => write!(
                f,
                "UiFrame{{src: {}-{}, pid: {pid:#04x}, {beacon}}}",
                h.src_callsign.trim_end(),
                h.src_ssid
            ),
            Frame::Unhandled { info, .. } => write!(
                f,
                "Unhandled{{src: {}-{}, control: {:#04x}, info:[len={}]}}",
                h.src_callsign.trim_end(),
                h.src_ssid,
                h.control,
                info.len()
            ),
        }
    }
}

/// Decode one complete captured frame buffer into a [Frame].
///
/// Decoding is pure and re-entrant; nothing is retained across calls.
///
/// # Example
/// ```
/// // An I-frame: 15-byte address/control prefix, pid, empty info field
/// let mut dat = vec![0u8; 16];
/// dat[14] = 0x00; // control
/// dat[15] = 0xf0; // pid
///
/// let frame = ax25_tlm::decode(&dat).unwrap();
/// assert!(matches!(frame, ax25_tlm::Frame::IFrame { pid: 0xf0, .. }));
/// ```
///
/// # Errors
/// [`Error::TruncatedHeader`] if the buffer cannot hold the fixed prefix
/// (or the pid byte of an I/UI frame); beacon errors per [`Beacon::decode`].
pub fn decode(buf: &[u8]) -> Result<Frame> {
    let header = Ax25Header::decode(buf)?;
    let rest = &buf[Ax25Header::LEN..];

    match classify(header.control) {
        Kind::I => {
            let (pid, info) = split_pid(buf.len(), rest)?;
            trace!(pid, len = info.len(), "i-frame");
            Ok(Frame::IFrame {
                header,
                pid,
                info: info.to_vec(),
            })
        }
        Kind::Ui => {
            let (pid, info) = split_pid(buf.len(), rest)?;
            trace!(pid, len = info.len(), "ui-frame");
            let beacon = Beacon::decode(info)?;
            Ok(Frame::UiFrame {
                header,
                pid,
                beacon,
            })
        }
        Kind::Unhandled => {
            debug!(control = header.control, "unhandled frame kind");
            Ok(Frame::Unhandled {
                header,
                info: rest.to_vec(),
            })
        }
    }
}

/// I and UI frames carry a pid byte immediately after the control byte.
fn split_pid(frame_len: usize, rest: &[u8]) -> Result<(u8, &[u8])> {
    match rest.split_first() {
        Some((&pid, info)) => Ok((pid, info)),
        None => Err(Error::TruncatedHeader {
            actual: frame_len,
            minimum: Ax25Header::LEN + 1,
        }),
    }
}
