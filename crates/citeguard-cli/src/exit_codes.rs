//! Exit codes for the citeguard binary.
//! These codes are part of the public contract: callers branch on them.

pub const SUCCESS: i32 = 0; // ALLOW or WARN: answer may be surfaced
pub const USAGE_ERROR: i32 = 1; // Bad arguments; clap's own code 2 would read as BLOCK
pub const BLOCKED: i32 = 2; // Verdict BLOCK: answer must not be surfaced
pub const INPUT_ERROR: i32 = 3; // Unreadable input, malformed chunks or config
