//! Device-side (accessory) ranging configuration.
//!
//! The blob is a fixed 15-byte header, a length byte and a vendor-specific
//! payload, so the payload always starts at offset 16:
//!
//! | Offset | Size | Field |
//! |-------:|-----:|-------|
//! | 0  | 2  | spec version major |
//! | 2  | 2  | spec version minor |
//! | 4  | 1  | preferred update rate |
//! | 5  | 10 | RFU |
//! | 15 | 1  | payload length |
//! | 16 | n  | payload |
//!
//! Only 19- and 21-byte payloads are understood. Their layout is:
//!
//! | Offset | Size | Field |
//! |-------:|-----:|-------|
//! | 0  | 2  | payload version major (1) |
//! | 2  | 2  | payload version minor (1) |
//! | 4  | 12 | vendor parameters |
//! | 16 | 1  | ranging role |
//! | 17 | 2  | device MAC address |
//! | 19 | 2  | trailer `19 00` (21-byte payloads only) |

use bytes::{BufMut, Bytes, BytesMut};
use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt;
use strum_macros::Display;
use tracing::{debug, trace};
use zerocopy::byteorder::little_endian::U16;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::constants::*;
use crate::error::UwbConfigError;
use crate::pack::{concat, extract, extract_array, read_u8, read_u16_le};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How often the accessory would like to be ranged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum UpdateRate {
    #[strum(to_string = "automatic")]
    Automatic = 0,
    #[strum(to_string = "infrequent")]
    Infrequent = 10,
    #[strum(to_string = "user interactive")]
    UserInteractive = 20,

    #[num_enum(catch_all)]
    #[strum(to_string = "other")]
    Other(u8),
}

impl Default for UpdateRate {
    fn default() -> Self {
        UpdateRate::UserInteractive
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum RangingRole {
    #[strum(to_string = "controlee")]
    Controlee = 0,
    #[strum(to_string = "controller")]
    Controller = 1,

    #[num_enum(catch_all)]
    #[strum(to_string = "unknown")]
    Unknown(u8),
}

impl Default for RangingRole {
    fn default() -> Self {
        RangingRole::Controlee
    }
}

/// Payload shape, selected by the declared payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PayloadVariant {
    /// 19 bytes: role and MAC without the trailer
    Legacy,
    /// 21 bytes: role, MAC and the `19 00` trailer
    #[default]
    Standard,
    /// Any other length. Role and MAC are not decoded.
    Unrecognized(u8),
}

impl PayloadVariant {
    pub fn from_len(len: u8) -> Self {
        match len as usize {
            LEGACY_PAYLOAD_SIZE => PayloadVariant::Legacy,
            STANDARD_PAYLOAD_SIZE => PayloadVariant::Standard,
            _ => PayloadVariant::Unrecognized(len),
        }
    }

    pub fn payload_len(&self) -> u8 {
        match self {
            PayloadVariant::Legacy => LEGACY_PAYLOAD_SIZE as u8,
            PayloadVariant::Standard => STANDARD_PAYLOAD_SIZE as u8,
            PayloadVariant::Unrecognized(len) => *len,
        }
    }

    /// Whether role and MAC address are carried at their known offsets.
    pub fn has_role_and_mac(&self) -> bool {
        !matches!(self, PayloadVariant::Unrecognized(_))
    }
}

#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct DeviceConfigHeaderRaw {
    pub spec_ver_major: U16,
    pub spec_ver_minor: U16,
    pub preferred_update_rate: u8,
    pub reserved: [u8; DEVICE_RFU_SIZE],
}

#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct StandardPayloadRaw {
    pub version_major: U16,
    pub version_minor: U16,
    pub vendor_params: [u8; 12],
    pub ranging_role: u8,
    pub device_mac_address: [u8; 2],
    pub trailer: [u8; 2],
}

impl StandardPayloadRaw {
    pub fn new(role: RangingRole, mac: [u8; 2]) -> Self {
        Self {
            version_major: U16::new(PAYLOAD_VERSION_MAJOR),
            version_minor: U16::new(PAYLOAD_VERSION_MINOR),
            vendor_params: VENDOR_PARAMS,
            ranging_role: role.into(),
            device_mac_address: mac,
            trailer: PAYLOAD_TRAILER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    pub spec_ver_major: u16,
    pub spec_ver_minor: u16,
    pub preferred_update_rate: UpdateRate,
    pub reserved: [u8; DEVICE_RFU_SIZE],
    /// Shape of the payload this record was decoded from. Encoding always
    /// produces [`PayloadVariant::Standard`].
    pub payload_variant: PayloadVariant,
    pub ranging_role: RangingRole,
    /// `None` until set by the caller or decoded from a recognized payload
    pub device_mac_address: Option<[u8; 2]>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            spec_ver_major: 1,
            spec_ver_minor: 0,
            preferred_update_rate: UpdateRate::UserInteractive,
            reserved: [0; DEVICE_RFU_SIZE],
            payload_variant: PayloadVariant::Standard,
            ranging_role: RangingRole::Controlee,
            device_mac_address: None,
        }
    }
}

impl DeviceConfig {
    /// Build a config for the given role and MAC with every other field at its default.
    pub fn new(ranging_role: RangingRole, device_mac_address: [u8; 2]) -> Self {
        Self {
            ranging_role,
            device_mac_address: Some(device_mac_address),
            ..Default::default()
        }
    }

    /// Length of the blob produced by [`DeviceConfig::to_bytes`].
    pub const fn encoded_len() -> usize {
        DEVICE_PAYLOAD_OFFSET + STANDARD_PAYLOAD_SIZE
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, UwbConfigError> {
        let header = extract(data, 0, DEVICE_HEADER_SIZE)?;
        let header = DeviceConfigHeaderRaw::read_from_bytes(header)
            .map_err(|_| UwbConfigError::Malformed("Failed to parse device config header: incorrect size".to_string()))?;

        let payload_len = read_u8(data, DEVICE_PAYLOAD_LEN_OFFSET)?;
        let payload = extract(data, DEVICE_PAYLOAD_OFFSET, payload_len as usize)?;

        let trailing = data.len() - DEVICE_PAYLOAD_OFFSET - payload.len();
        if trailing > 0 {
            debug!(trailing, "ignoring bytes after device config payload");
        }

        let mut config = Self {
            spec_ver_major: header.spec_ver_major.get(),
            spec_ver_minor: header.spec_ver_minor.get(),
            preferred_update_rate: UpdateRate::from_primitive(header.preferred_update_rate),
            reserved: header.reserved,
            payload_variant: PayloadVariant::from_len(payload_len),
            ..Default::default()
        };

        if !config.payload_variant.has_role_and_mac() {
            debug!(payload_len, "unrecognized device config payload length, role and MAC not decoded");
            return Ok(config);
        }

        let major = read_u16_le(payload, 0)?;
        let minor = read_u16_le(payload, 2)?;
        if (major, minor) != (PAYLOAD_VERSION_MAJOR, PAYLOAD_VERSION_MINOR) {
            debug!(major, minor, "unexpected device config payload version");
        }

        config.ranging_role = RangingRole::from_primitive(read_u8(payload, RANGING_ROLE_OFFSET)?);
        config.device_mac_address = Some(extract_array(payload, DEVICE_MAC_OFFSET)?);
        Ok(config)
    }

    /// Encode the header, length byte and a standard 21-byte payload.
    pub fn to_bytes(&self) -> Result<Bytes, UwbConfigError> {
        let mac = self.device_mac_address.ok_or(UwbConfigError::MissingMacAddress)?;

        let header = DeviceConfigHeaderRaw {
            spec_ver_major: U16::new(self.spec_ver_major),
            spec_ver_minor: U16::new(self.spec_ver_minor),
            preferred_update_rate: self.preferred_update_rate.into(),
            reserved: self.reserved,
        };
        let payload = StandardPayloadRaw::new(self.ranging_role, mac);

        let mut head = BytesMut::with_capacity(DEVICE_PAYLOAD_OFFSET);
        head.put_slice(header.as_bytes());
        head.put_u8(STANDARD_PAYLOAD_SIZE as u8);

        let bytes = concat(&head, payload.as_bytes());
        trace!(len = bytes.len(), "encoded device config");
        Ok(bytes)
    }
}

impl TryFrom<&[u8]> for DeviceConfig {
    type Error = UwbConfigError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(data)
    }
}

impl TryFrom<Bytes> for DeviceConfig {
    type Error = UwbConfigError;

    fn try_from(bytes: Bytes) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes.as_ref())
    }
}

impl TryFrom<&DeviceConfig> for Bytes {
    type Error = UwbConfigError;

    fn try_from(config: &DeviceConfig) -> Result<Self, Self::Error> {
        config.to_bytes()
    }
}

impl fmt::Display for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mac = match self.device_mac_address {
            Some(mac) => hex::encode_upper(mac),
            None => "unset".to_string(),
        };
        write!(
            f,
            "v{}.{}, update rate: {} ({}), role: {} ({}), MAC: {}, payload: {:?}",
            self.spec_ver_major,
            self.spec_ver_minor,
            self.preferred_update_rate,
            u8::from(self.preferred_update_rate),
            self.ranging_role,
            u8::from(self.ranging_role),
            mac,
            self.payload_variant
        )
    }
}
