//! Tests for the device (accessory) ranging configuration codec

mod common;

use common::*;

#[test]
fn test_default_values() {
    let config = DeviceConfig::default();

    assert_eq!(config.spec_ver_major, 1);
    assert_eq!(config.spec_ver_minor, 0);
    assert_eq!(config.preferred_update_rate, UpdateRate::UserInteractive);
    assert_eq!(u8::from(config.preferred_update_rate), 20);
    assert_eq!(config.reserved, [0; 10]);
    assert_eq!(config.ranging_role, RangingRole::Controlee);
    assert_eq!(config.device_mac_address, None);
    assert_eq!(config.payload_variant, PayloadVariant::Standard);
}

#[test]
fn test_encode_standard_layout() {
    let encoded = DeviceConfig::new(RangingRole::Controller, [0xAB, 0xCD])
        .to_bytes()
        .expect("Failed to encode device config");

    assert_eq!(
        encoded.as_ref(),
        hex_to_bytes(STANDARD_DEVICE_CONFIG).as_ref(),
        "Encoded device config mismatch. Got: {:02x?}",
        encoded.as_ref()
    );
    assert_eq!(encoded.len(), DeviceConfig::encoded_len());
    assert_eq!(encoded.len(), DEVICE_HEADER_SIZE + 1 + encoded[DEVICE_PAYLOAD_LEN_OFFSET] as usize);
}

#[test]
fn test_decode_standard() {
    common::init_tracing();
    let config = DeviceConfig::try_from(hex_to_bytes(STANDARD_DEVICE_CONFIG)).expect("Failed to decode device config");

    assert_eq!(config.payload_variant, PayloadVariant::Standard);
    assert_eq!(config.ranging_role, RangingRole::Controller);
    assert_eq!(config.device_mac_address, Some([0xAB, 0xCD]));
    assert_eq!(config.preferred_update_rate, UpdateRate::UserInteractive);
}

#[test]
fn test_decode_full_template_layout() {
    // Length byte at 15, payload from 16
    let bytes = hex_to_bytes(TEMPLATE_DEVICE_CONFIG);
    assert_eq!(bytes[15], 21);

    let config = DeviceConfig::from_bytes(&bytes).expect("Failed to decode device config");
    assert_eq!(config.payload_variant, PayloadVariant::Standard);
    assert_eq!(config.ranging_role, RangingRole::Controller);
    assert_eq!(config.device_mac_address, Some([0xAB, 0xCD]));
    assert_eq!(config.reserved, [0; 10]);
    assert_eq!(config.preferred_update_rate, UpdateRate::UserInteractive);

    // Re-encoding produces the same blob
    assert_eq!(config.to_bytes().unwrap().as_ref(), bytes.as_ref());
}

#[test]
fn test_decode_legacy_payload() {
    common::init_tracing();
    let config = DeviceConfig::from_bytes(&hex_to_bytes(LEGACY_DEVICE_CONFIG)).expect("Failed to decode device config");

    assert_eq!(config.payload_variant, PayloadVariant::Legacy);
    assert_eq!(config.ranging_role, RangingRole::Controller);
    assert_eq!(config.device_mac_address, Some([0x12, 0x34]));
    assert_eq!(config.preferred_update_rate, UpdateRate::Infrequent);
}

#[test]
fn test_decode_unrecognized_payload_leaves_defaults() {
    common::init_tracing();
    let config =
        DeviceConfig::from_bytes(&hex_to_bytes(UNRECOGNIZED_DEVICE_CONFIG)).expect("Unrecognized payload must not fail");

    assert_eq!(config.payload_variant, PayloadVariant::Unrecognized(20));
    assert_eq!(config.ranging_role, RangingRole::Controlee);
    assert_eq!(config.device_mac_address, None);
    // The header is still decoded
    assert_eq!(config.spec_ver_major, 1);
    assert_eq!(config.preferred_update_rate, UpdateRate::UserInteractive);
}

#[test]
fn test_decode_gate_reads_payload_offsets() {
    // 21-byte payload of arbitrary content: only offsets 16..19 matter
    let mut bytes = vec![0u8; DEVICE_PAYLOAD_OFFSET];
    bytes[DEVICE_PAYLOAD_LEN_OFFSET] = 21;
    let mut payload = vec![0x77u8; 21];
    payload[16] = 0x01;
    payload[17] = 0xC0;
    payload[18] = 0xDE;
    bytes.extend_from_slice(&payload);

    let config = DeviceConfig::from_bytes(&bytes).unwrap();
    assert_eq!(config.ranging_role, RangingRole::Controller);
    assert_eq!(config.device_mac_address, Some([0xC0, 0xDE]));

    // Same bytes declared as a 20-byte payload are skipped
    bytes[DEVICE_PAYLOAD_LEN_OFFSET] = 20;
    let config = DeviceConfig::from_bytes(&bytes).unwrap();
    assert_eq!(config.ranging_role, RangingRole::Controlee);
    assert_eq!(config.device_mac_address, None);
}

#[test]
fn test_vendor_params_invariant() {
    let roles = [RangingRole::Controlee, RangingRole::Controller, RangingRole::Unknown(0x5A)];
    let macs = [[0x00, 0x00], [0xFF, 0xFF], [0x12, 0x34]];

    for role in roles {
        for mac in macs {
            let encoded = DeviceConfig::new(role, mac).to_bytes().unwrap();
            let payload = &encoded[DEVICE_PAYLOAD_OFFSET..];

            assert_eq!(payload.len(), STANDARD_PAYLOAD_SIZE);
            assert_eq!(&payload[0..4], &[0x01, 0x00, 0x01, 0x00]);
            assert_eq!(&payload[VENDOR_PARAMS_OFFSET..VENDOR_PARAMS_OFFSET + 12], &VENDOR_PARAMS);
            assert_eq!(&payload[19..21], &PAYLOAD_TRAILER);
        }
    }
}

#[test]
fn test_controller_payload_carries_full_template() {
    let encoded = DeviceConfig::new(RangingRole::Controller, [0x01, 0x02]).to_bytes().unwrap();
    let payload = &encoded[DEVICE_PAYLOAD_OFFSET..];

    assert_eq!(&payload[VENDOR_PARAMS_OFFSET..VENDOR_PARAMS_OFFSET + 13], &VENDOR_TEMPLATE);
}

#[test]
fn test_decode_ignores_bytes_after_payload() {
    common::init_tracing();
    let mut bytes = hex_to_bytes(STANDARD_DEVICE_CONFIG).to_vec();
    bytes.extend_from_slice(&[0xDE, 0xAD]);

    let config = DeviceConfig::from_bytes(&bytes).unwrap();
    assert_eq!(config, DeviceConfig::new(RangingRole::Controller, [0xAB, 0xCD]));
}

#[test]
fn test_display() {
    let text = DeviceConfig::new(RangingRole::Controller, [0xAB, 0xCD]).to_string();
    assert!(text.contains("role: controller (1)"), "Got: {}", text);
    assert!(text.contains("MAC: ABCD"), "Got: {}", text);

    let text = DeviceConfig::default().to_string();
    assert!(text.contains("MAC: unset"), "Got: {}", text);
}
