//! Process exit codes. Part of the CLI contract.

pub const SUCCESS: i32 = 0;
pub const TOOL_FAILED: i32 = 1; // A mandate or payment was rejected
pub const CONFIG_ERROR: i32 = 2; // Bad config, script or arguments
