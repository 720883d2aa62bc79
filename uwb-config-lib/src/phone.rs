//! Phone-side ranging configuration (30 bytes, little-endian).
//!
//! Layout, as shared with accessories expecting the phone's session parameters:
//!
//! | Offset | Size | Field |
//! |-------:|-----:|-------|
//! | 0  | 2 | spec version major |
//! | 2  | 2 | spec version minor |
//! | 4  | 3 | reserved marker `19 45 55` |
//! | 7  | 4 | session ID |
//! | 11 | 1 | preamble code |
//! | 12 | 1 | channel |
//! | 13 | 2 | slots per ranging round |
//! | 15 | 2 | slot duration (RSTU) |
//! | 17 | 2 | block duration (ms) |
//! | 19 | 1 | unknown flag (3 enables ToF reports) |
//! | 20 | 6 | static STS IV (reversed, copied verbatim) |
//! | 26 | 2 | phone MAC address |
//! | 28 | 2 | block timing stability |

use bytes::Bytes;
use std::fmt;
use tracing::trace;
use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::constants::*;
use crate::error::UwbConfigError;
use crate::pack::extract;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct PhoneConfigRaw {
    pub spec_ver_major: U16,
    pub spec_ver_minor: U16,
    pub reserved: [u8; 3],
    pub session_id: U32,
    pub preamble_id: u8,
    pub channel: u8,
    pub number_of_slots: U16,
    pub slot_duration_rstu: U16,
    pub block_duration_ms: U16,
    pub unknown_flag: u8,
    pub static_sts_iv: [u8; 6],
    pub phone_mac_address: [u8; 2],
    pub block_timing_stability: U16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhoneConfig {
    pub spec_ver_major: u16,
    pub spec_ver_minor: u16,
    pub reserved: [u8; 3],
    pub session_id: u32,
    pub preamble_id: u8,
    pub channel: u8,
    pub number_of_slots: u16,
    pub slot_duration_rstu: u16,
    pub block_duration_ms: u16,
    pub unknown_flag: u8,
    /// Static STS IV in wire order. Peers expect it reversed, so callers pass
    /// the IV already reversed; the codec copies it as-is.
    pub static_sts_iv: [u8; 6],
    pub phone_mac_address: [u8; 2],
    pub block_timing_stability: u16,
}

impl Default for PhoneConfig {
    /// One-to-many static STS DS-TWR in deferred mode: 200 ms ranging
    /// interval, 20 slots of 2400 RSTU per round. Peers expecting this
    /// profile rely on every value here.
    fn default() -> Self {
        Self {
            spec_ver_major: PHONE_SPEC_VER_MAJOR,
            spec_ver_minor: PHONE_SPEC_VER_MINOR,
            reserved: PHONE_RESERVED,
            session_id: 0,
            preamble_id: PHONE_PREAMBLE_ID,
            channel: PHONE_CHANNEL,
            number_of_slots: PHONE_NUMBER_OF_SLOTS,
            slot_duration_rstu: PHONE_SLOT_DURATION_RSTU,
            block_duration_ms: PHONE_BLOCK_DURATION_MS,
            unknown_flag: PHONE_UNKNOWN_FLAG,
            static_sts_iv: [0; 6],
            phone_mac_address: PHONE_MAC_ADDRESS,
            block_timing_stability: PHONE_BLOCK_TIMING_STABILITY,
        }
    }
}

impl From<PhoneConfigRaw> for PhoneConfig {
    fn from(raw: PhoneConfigRaw) -> Self {
        Self {
            spec_ver_major: raw.spec_ver_major.get(),
            spec_ver_minor: raw.spec_ver_minor.get(),
            reserved: raw.reserved,
            session_id: raw.session_id.get(),
            preamble_id: raw.preamble_id,
            channel: raw.channel,
            number_of_slots: raw.number_of_slots.get(),
            slot_duration_rstu: raw.slot_duration_rstu.get(),
            block_duration_ms: raw.block_duration_ms.get(),
            unknown_flag: raw.unknown_flag,
            static_sts_iv: raw.static_sts_iv,
            phone_mac_address: raw.phone_mac_address,
            block_timing_stability: raw.block_timing_stability.get(),
        }
    }
}

impl From<PhoneConfig> for PhoneConfigRaw {
    fn from(config: PhoneConfig) -> Self {
        Self {
            spec_ver_major: U16::new(config.spec_ver_major),
            spec_ver_minor: U16::new(config.spec_ver_minor),
            reserved: config.reserved,
            session_id: U32::new(config.session_id),
            preamble_id: config.preamble_id,
            channel: config.channel,
            number_of_slots: U16::new(config.number_of_slots),
            slot_duration_rstu: U16::new(config.slot_duration_rstu),
            block_duration_ms: U16::new(config.block_duration_ms),
            unknown_flag: config.unknown_flag,
            static_sts_iv: config.static_sts_iv,
            phone_mac_address: config.phone_mac_address,
            block_timing_stability: U16::new(config.block_timing_stability),
        }
    }
}

impl PhoneConfig {
    /// Decode the first 30 bytes of `data`. Anything after them is ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self, UwbConfigError> {
        let fixed = extract(data, 0, PHONE_CONFIG_SIZE)?;
        let raw = PhoneConfigRaw::read_from_bytes(fixed)
            .map_err(|_| UwbConfigError::Malformed("Failed to parse phone config: incorrect size".to_string()))?;
        Ok(Self::from(raw))
    }

    /// Encode into the 30-byte wire form.
    pub fn to_bytes(&self) -> Bytes {
        let raw = PhoneConfigRaw::from(*self);
        let bytes = Bytes::copy_from_slice(raw.as_bytes());
        trace!(len = bytes.len(), "encoded phone config");
        bytes
    }

    /// Round duration in RSTU (slots × slot duration).
    ///
    /// Not checked against anything when encoding or decoding.
    pub fn round_duration_rstu(&self) -> u32 {
        u32::from(self.number_of_slots) * u32::from(self.slot_duration_rstu)
    }

    pub fn with_session_id(mut self, session_id: u32) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn with_phone_mac_address(mut self, mac: [u8; 2]) -> Self {
        self.phone_mac_address = mac;
        self
    }

    pub fn with_static_sts_iv(mut self, iv: [u8; 6]) -> Self {
        self.static_sts_iv = iv;
        self
    }
}

impl TryFrom<&[u8]> for PhoneConfig {
    type Error = UwbConfigError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(data)
    }
}

impl TryFrom<Bytes> for PhoneConfig {
    type Error = UwbConfigError;

    fn try_from(bytes: Bytes) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes.as_ref())
    }
}

impl From<&PhoneConfig> for Bytes {
    fn from(config: &PhoneConfig) -> Self {
        config.to_bytes()
    }
}

impl From<PhoneConfig> for Bytes {
    fn from(config: PhoneConfig) -> Self {
        config.to_bytes()
    }
}

impl fmt::Display for PhoneConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v{}.{}, session: {:#010x}, channel: {}, preamble: {}, slots: {} x {} RSTU, block: {} ms, MAC: {}",
            self.spec_ver_major,
            self.spec_ver_minor,
            self.session_id,
            self.channel,
            self.preamble_id,
            self.number_of_slots,
            self.slot_duration_rstu,
            self.block_duration_ms,
            hex::encode_upper(self.phone_mac_address)
        )
    }
}
