//! Fixed capacities of repeated and string fields.
//!
//! These bound every container in the schema and therefore every
//! `MAX_SIZE`.

/// Bytes in a table or axis name.
pub const TABLE_NAME_LEN: usize = 24;

/// Values in a table row or axis.
pub const TABLE_VALUES: usize = 24;

/// Rows in a two-dimensional table.
pub const TABLE_ROWS: usize = 24;

/// Output channels in a configuration.
pub const OUTPUTS: usize = 16;

/// Trigger inputs in a configuration.
pub const TRIGGERS: usize = 4;

/// Bytes in the firmware version string.
pub const FIRMWARE_VERSION_LEN: usize = 64;

/// Bytes in the platform name string.
pub const PLATFORM_LEN: usize = 32;

/// Bytes in the embedded protocol description.
pub const PROTO_LEN: usize = 16_384;
