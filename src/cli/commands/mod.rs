//! CLI command implementations
//!
//! Every command returns the process exit code:
//! 0 success or cancellation, 2 configuration error, 3 no TMA data,
//! 5 fatal error.

pub mod export;
pub mod history;
pub mod init;
pub mod replay;
pub mod validate;

/// Exit code for success, including a cancelled export
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for configuration errors
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Exit code when the image has no TMA data
pub const EXIT_NO_TMA_DATA: i32 = 3;

/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;
