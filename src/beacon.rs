//! Telemetry beacon decoding.
//!
//! A beacon is the application envelope carried in the information field of
//! an AX.25 UI frame: a fixed routing header followed by a payload whose
//! structure is selected by the header's API code.
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bytes::Cursor;
use crate::{Error, Result};

/// API code for the fixed-width housekeeping payload.
pub const API_HOUSEKEEPING: u8 = 0x0e;
/// API code for the variable-length RF text-message payload.
pub const API_RF_MESSAGE: u8 = 0x67;

/// A decoded beacon.
///
/// `header` is absent only when the source-validity check rejects it;
/// `payload` is absent whenever the header's routing/API combination does
/// not select a known payload structure. Neither absence is an error:
/// the downlink intentionally carries beacon types this decoder does not
/// yet recognize.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Beacon {
    pub header: Option<BeaconHeader>,
    pub payload: Option<BeaconPayload>,
}

impl Beacon {
    /// Decode the information field of a UI frame (everything after pid).
    ///
    /// # Errors
    /// [`Error::TruncatedBeaconHeader`] if fewer than [`BeaconHeader::LEN`]
    /// bytes are available; payload errors per [`BeaconPayload::decode`].
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let header = BeaconHeader::decode(buf)?;
        if !header.is_valid_source() {
            return Ok(Beacon {
                header: None,
                payload: None,
            });
        }
        let payload = BeaconPayload::decode(&header, &buf[BeaconHeader::LEN..])?;
        Ok(Beacon {
            header: Some(header),
            payload,
        })
    }
}

impl Display for Beacon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.header {
            Some(h) => write!(
                f,
                "Beacon{{from: {}/{}, to: {}/{}, api: {:#04x}, payload: {}}}",
                h.from_system_id,
                h.from_subsystem_id,
                h.to_system_id,
                h.to_subsystem_id,
                h.api_code,
                self.payload.is_some(),
            ),
            None => write!(f, "Beacon{{header: none}}"),
        }
    }
}

/// Fixed routing/addressing header preceding every beacon payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BeaconHeader {
    pub flags1: u8,
    pub flags2: u8,
    pub packet_id: u16,
    pub from_system_id: u8,
    pub from_subsystem_id: u8,
    pub to_system_id: u8,
    pub to_subsystem_id: u8,
    pub api_code: u8,
    pub payload_size: u8,
}

impl BeaconHeader {
    /// Header length in bytes.
    pub const LEN: usize = 10;

    /// Decode from bytes.
    ///
    /// # Errors
    /// [`Error::TruncatedBeaconHeader`] if fewer than [`Self::LEN`] bytes
    /// are available.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < Self::LEN {
            return Err(Error::TruncatedBeaconHeader {
                actual: buf.len(),
                minimum: Self::LEN,
            });
        }
        Ok(BeaconHeader {
            flags1: buf[0],
            flags2: buf[1],
            packet_id: u16::from_le_bytes([buf[2], buf[3]]),
            from_system_id: buf[4],
            from_subsystem_id: buf[5],
            to_system_id: buf[6],
            to_subsystem_id: buf[7],
            api_code: buf[8],
            payload_size: buf[9],
        })
    }

    /// Whether the beacon originates from a trusted source.
    ///
    /// TODO: check the source callsign against the spacecraft's. Until
    /// that lands this accepts every header, and downlink consumers rely
    /// on headers always being exposed, so keep it permissive.
    #[allow(clippy::unused_self)]
    fn is_valid_source(&self) -> bool {
        true
    }

    /// The bus-to-ground route every recognized payload is sent on.
    fn routes_bus_to_ground(&self) -> bool {
        self.from_system_id == 2
            && self.from_subsystem_id == 1
            && self.to_system_id == 1
            && self.to_subsystem_id == 0
    }

    /// True when this header declares a decodable housekeeping payload.
    #[must_use]
    pub fn expects_housekeeping(&self) -> bool {
        self.routes_bus_to_ground()
            && self.api_code == API_HOUSEKEEPING
            && usize::from(self.payload_size) == Housekeeping::LEN
    }

    /// True when this header declares a decodable RF message payload.
    /// The message is variable length, so `payload_size` is not constrained
    /// here; [`RfMessage::decode`] validates it.
    #[must_use]
    pub fn expects_rf_message(&self) -> bool {
        self.routes_bus_to_ground() && self.api_code == API_RF_MESSAGE
    }
}

/// Beacon payload variants, selected by [`BeaconHeader::api_code`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BeaconPayload {
    Housekeeping(Housekeeping),
    RfMessage(RfMessage),
}

impl BeaconPayload {
    /// Decode the bytes following the beacon header, or `None` when the
    /// header's routing/API combination selects no known payload.
    ///
    /// # Errors
    /// [`Error::TruncatedPayload`] if the selected variant needs more bytes
    /// than remain, or [`Error::InvalidPayloadSize`] for an RF message
    /// whose declared size cannot hold its leading bytes.
    pub fn decode(header: &BeaconHeader, buf: &[u8]) -> Result<Option<Self>> {
        if header.expects_housekeeping() {
            return Ok(Some(BeaconPayload::Housekeeping(Housekeeping::decode(
                buf,
            )?)));
        }
        if header.expects_rf_message() {
            return Ok(Some(BeaconPayload::RfMessage(RfMessage::decode(
                header.payload_size,
                buf,
            )?)));
        }
        trace!(
            api_code = header.api_code,
            payload_size = header.payload_size,
            "no payload decoder for this route"
        );
        Ok(None)
    }
}

/// Fixed-width spacecraft-bus housekeeping telemetry.
///
/// All multi-byte fields are little-endian. Scalar fields are raw counts;
/// converting them to engineering units is a caller concern.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Housekeeping {
    pub command: u8,
    pub variable_id: u16,
    pub type_and_length: u16,
    /// 48-bit onboard timestamp; byte `i` contributes `raw[i] << (8 * i)`.
    pub timestamp: u64,
    pub beacon_rate: u32,
    pub values_out_of_range: u16,
    pub uptime_seconds: u32,
    pub subsystem_status_bitmap: u16,
    pub battery_temp_a: i16,
    pub battery_temp_b: i16,
    pub state_of_charge: u8,
    pub battery_voltage: u8,
    pub battery_current: i8,
    pub charge_current: i8,
    pub bus_voltage_3v3: u8,
    pub bus_voltage_5v: u8,
    pub bus_current_3v3: u8,
    pub bus_current_5v: u8,
    pub panel_voltage_x: u8,
    pub panel_voltage_y: u8,
    pub panel_voltage_z: u8,
    pub panel_temp_x: i8,
    pub panel_temp_y: i8,
    pub panel_temp_z: i8,
    pub pa_temp: i8,
    pub frequency: u16,
    /// Captured, not verified; verification is a caller concern.
    pub crc16: u16,
}

impl Housekeeping {
    /// Payload length in bytes.
    pub const LEN: usize = 46;

    /// Decode from bytes.
    ///
    /// # Errors
    /// [`Error::TruncatedPayload`] if fewer than [`Self::LEN`] bytes are
    /// available.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        Self::read(&mut Cursor::new(buf)).ok_or(Error::TruncatedPayload {
            actual: buf.len(),
            minimum: Self::LEN,
        })
    }

    fn read(c: &mut Cursor) -> Option<Self> {
        Some(Housekeeping {
            command: c.u8()?,
            variable_id: c.u16le()?,
            type_and_length: c.u16le()?,
            timestamp: c.u48le()?,
            beacon_rate: c.u32le()?,
            values_out_of_range: c.u16le()?,
            uptime_seconds: c.u32le()?,
            subsystem_status_bitmap: c.u16le()?,
            battery_temp_a: c.i16le()?,
            battery_temp_b: c.i16le()?,
            state_of_charge: c.u8()?,
            battery_voltage: c.u8()?,
            battery_current: c.i8()?,
            charge_current: c.i8()?,
            bus_voltage_3v3: c.u8()?,
            bus_voltage_5v: c.u8()?,
            bus_current_3v3: c.u8()?,
            bus_current_5v: c.u8()?,
            panel_voltage_x: c.u8()?,
            panel_voltage_y: c.u8()?,
            panel_voltage_z: c.u8()?,
            panel_temp_x: c.i8()?,
            panel_temp_y: c.i8()?,
            panel_temp_z: c.i8()?,
            pa_temp: c.i8()?,
            frequency: c.u16le()?,
            crc16: c.u16le()?,
        })
    }
}

/// Variable-length free-text telemetry message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RfMessage {
    /// Reserved; meaning unspecified by the downlink format.
    pub leading: [u8; 6],
    pub message: String,
    /// Captured, not verified; verification is a caller concern.
    pub crc16: u16,
}

impl RfMessage {
    /// Number of reserved bytes preceding the message text.
    pub const LEADING_LEN: usize = 6;

    /// Decode from bytes. `payload_size` is the size declared by the
    /// beacon header and covers the leading bytes plus the message text;
    /// a 2-byte CRC trails the text.
    ///
    /// # Errors
    /// [`Error::InvalidPayloadSize`] if `payload_size` cannot hold the
    /// leading bytes, [`Error::TruncatedPayload`] if fewer than
    /// `payload_size + 2` bytes are available.
    pub fn decode(payload_size: u8, buf: &[u8]) -> Result<Self> {
        let size = usize::from(payload_size);
        if size < Self::LEADING_LEN {
            return Err(Error::InvalidPayloadSize { size: payload_size });
        }
        let minimum = size + 2;
        if buf.len() < minimum {
            return Err(Error::TruncatedPayload {
                actual: buf.len(),
                minimum,
            });
        }

        let mut leading = [0u8; Self::LEADING_LEN];
        leading.copy_from_slice(&buf[..Self::LEADING_LEN]);

        let text = &buf[Self::LEADING_LEN..size];
        let message = match std::str::from_utf8(text) {
            Ok(s) => s.to_string(),
            // Transmission noise happens; keep what we can read
            Err(err) => {
                debug!(%err, "rf message is not valid utf-8, decoding lossy");
                String::from_utf8_lossy(text).into_owned()
            }
        };

        Ok(RfMessage {
            leading,
            message,
            crc16: u16::from_le_bytes([buf[size], buf[size + 1]]),
        })
    }
}
