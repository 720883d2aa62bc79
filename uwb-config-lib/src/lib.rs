pub mod constants;
pub mod device;
pub mod error;
pub mod pack;
pub mod phone;


// Re-export the two records for easy access
pub use device::{DeviceConfig, PayloadVariant, RangingRole, UpdateRate};
pub use error::UwbConfigError;
pub use phone::PhoneConfig;
