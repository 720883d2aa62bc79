// Wire constants for the UWB ranging configuration blobs

/// Size of the fixed device config header (versions, update rate, RFU)
pub const DEVICE_HEADER_SIZE: usize = 15;

/// Offset of the payload length byte in a device config blob
pub const DEVICE_PAYLOAD_LEN_OFFSET: usize = DEVICE_HEADER_SIZE;

/// Offset of the first payload byte in a device config blob
pub const DEVICE_PAYLOAD_OFFSET: usize = DEVICE_HEADER_SIZE + 1;

/// Number of reserved (RFU) bytes in the device config header
pub const DEVICE_RFU_SIZE: usize = 10;

/// Length of the payload without the trailer (older accessory firmware)
pub const LEGACY_PAYLOAD_SIZE: usize = 19;

/// Length of the payload with the trailer
pub const STANDARD_PAYLOAD_SIZE: usize = 21;

/// Version words at the start of the payload
pub const PAYLOAD_VERSION_MAJOR: u16 = 1;
pub const PAYLOAD_VERSION_MINOR: u16 = 1;

/// Payload offset of the vendor parameters
pub const VENDOR_PARAMS_OFFSET: usize = 4;

/// Fixed vendor parameters at payload offset 4
pub const VENDOR_PARAMS: [u8; 12] = [0x3F, 0xF5, 0x03, 0x00, 0xB8, 0x0B, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01];

/// Vendor parameters followed by the role slot as populated for a controller
pub const VENDOR_TEMPLATE: [u8; 13] = [
    0x3F, 0xF5, 0x03, 0x00, 0xB8, 0x0B, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01,
];

/// Payload offset of the ranging role byte
pub const RANGING_ROLE_OFFSET: usize = 16;

/// Payload offset of the 2-byte device MAC address
pub const DEVICE_MAC_OFFSET: usize = 17;

/// Trailer closing a standard payload
pub const PAYLOAD_TRAILER: [u8; 2] = [0x19, 0x00];

/// Size of the phone config blob
pub const PHONE_CONFIG_SIZE: usize = 30;

// Default phone profile: one-to-many static STS DS-TWR, deferred mode

pub const PHONE_SPEC_VER_MAJOR: u16 = 1;
pub const PHONE_SPEC_VER_MINOR: u16 = 1;
pub const PHONE_RESERVED: [u8; 3] = [0x19, 0x45, 0x55];
pub const PHONE_PREAMBLE_ID: u8 = 11;
pub const PHONE_CHANNEL: u8 = 9;
pub const PHONE_NUMBER_OF_SLOTS: u16 = 20;
pub const PHONE_SLOT_DURATION_RSTU: u16 = 2400;
pub const PHONE_BLOCK_DURATION_MS: u16 = 200;

/// Must be 3 so that the peer reports ToF
pub const PHONE_UNKNOWN_FLAG: u8 = 3;

pub const PHONE_MAC_ADDRESS: [u8; 2] = [0x4C, 0x00];
pub const PHONE_BLOCK_TIMING_STABILITY: u16 = 0x0064;
