//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error (unknown mode, bad argument)
pub const USAGE: i32 = 64;

/// Data format error (malformed payload, invalid presence field)
pub const DATAERR: i32 = 65;

/// Service unavailable (chat application not running)
pub const UNAVAILABLE: i32 = 69;

/// Input/output error (presence call failed mid-session)
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
