//! Common test utilities and shared imports

// Allow unused imports and dead code since this is a shared module
// used across multiple test files - not all items are used in every test file
#[allow(unused_imports)]
pub use bytes::Bytes;
#[allow(unused_imports)]
pub use hex;
#[allow(unused_imports)]
pub use uwb_config_lib::constants::*;
#[allow(unused_imports)]
pub use uwb_config_lib::error::UwbConfigError;
#[allow(unused_imports)]
pub use uwb_config_lib::{DeviceConfig, PayloadVariant, PhoneConfig, RangingRole, UpdateRate};

/// Decode hex string to bytes for testing
#[allow(dead_code)]
pub fn hex_to_bytes(hex_data: &str) -> Bytes {
    let cleaned: String = hex_data.split_whitespace().collect();
    Bytes::from(hex::decode(cleaned).expect("Failed to decode hex"))
}

/// Route library logs to the test output. Safe to call from every test.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Default phone profile as sent to accessories (session ID 0)
#[allow(dead_code)]
pub const DEFAULT_PHONE_CONFIG: &str = "0100 0100 194555 00000000 0b 09 1400 6009 c800 03 000000000000 4c00 6400";

/// Device config with role controller and MAC ABCD, 21-byte payload
#[allow(dead_code)]
pub const STANDARD_DEVICE_CONFIG: &str = "0100 0000 14 00000000000000000000 15 \
     0100 0100 3ff50300b80b000000000101 01 abcd 1900";

/// Device config carrying the full 13-byte vendor template, whose last byte
/// lands in the role slot (controller), followed by the MAC and trailer
#[allow(dead_code)]
pub const TEMPLATE_DEVICE_CONFIG: &str = "0100 0000 14 00000000000000000000 15 \
     0100 0100 3ff50300b80b00000000010101 abcd 1900";

/// Device config from older accessory firmware, 19-byte payload without trailer
#[allow(dead_code)]
pub const LEGACY_DEVICE_CONFIG: &str = "0100 0000 0a 00000000000000000000 13 \
     0100 0000 3ff50300b80b000002090900 01 1234";

/// Device config whose 20-byte payload is not understood
#[allow(dead_code)]
pub const UNRECOGNIZED_DEVICE_CONFIG: &str = "0100 0000 14 00000000000000000000 14 \
     0100 0100 3ff50300b80b000000000101 01 abcd 19";
