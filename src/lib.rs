//! Decoding of AX.25-framed satellite telemetry.
//!
//! Turns one raw byte buffer captured from the radio link into a typed,
//! validated record tree. Data flows strictly downward:
//!
//! ```text
//! raw bytes -> Ax25Header -> (control kind) -> Beacon -> BeaconHeader
//!           -> (api code) -> BeaconPayload
//! ```
//!
//! Decoding is synchronous and side-effect free; every call reads only its
//! own input slice, so frames may be decoded from any number of threads
//! with no coordination.
//!
//! This is decode-only and deliberately not a general AX.25 stack: there is
//! no framing, retransmission, or encoding, and no streaming demultiplexer.
//! Acquisition of raw bytes and interpretation of decoded fields
//! (engineering-unit conversion, CRC verification) are caller concerns.

mod bytes;
mod error;

pub mod ax25;
pub mod beacon;
mod frame;

pub use error::{Error, Result};
pub use frame::{decode, Frame};
