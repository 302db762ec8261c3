//! Exit code constants for the taskprompt CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable parameters, invalid config)
//! - 2: Template failure (template missing or unreadable, strict-mode leftovers)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, malformed parameter input, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Template failure: no candidate file existed, a file could not be read,
/// or strict mode found an unresolved placeholder.
pub const TEMPLATE_FAILURE: i32 = 2;
