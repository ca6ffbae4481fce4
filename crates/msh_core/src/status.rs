//! Exit status codes shared by the executor and built-in commands.

/// Exit code indicating success.
pub const SUCCESS: i32 = 0;

/// Exit code for general errors.
pub const GENERAL_ERROR: i32 = 1;

/// Exit code for misuse of shell built-ins.
pub const BUILTIN_ERROR: i32 = 2;

/// Exit code for programs that cannot be found or executed.
pub const COMMAND_NOT_FOUND: i32 = 127;

/// Offset added to a signal number for processes terminated by a signal.
pub const SIGNAL_OFFSET: i32 = 128;
