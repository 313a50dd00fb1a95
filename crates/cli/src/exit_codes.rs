//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | Usage error (bad args, unknown column)         |
//! | 3    | File could not be read or written              |
//! | 4    | File contents could not be parsed              |
//! | 5    | Unsupported file format                        |

use dashgen_config::ConfigError;
use dashgen_io::IoError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, empty problem statement, unknown column.
pub const EXIT_USAGE: u8 = 2;

/// Input file or settings file missing/unreadable, or output not writable.
pub const EXIT_IO: u8 = 3;

/// Malformed CSV/JSON input or settings file, or an input with no header.
pub const EXIT_PARSE: u8 = 4;

/// Input extension other than .csv or .json.
pub const EXIT_FORMAT: u8 = 5;

/// Map an ingestion/export error to its exit code.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::Io(_) => EXIT_IO,
        IoError::Parse(_) | IoError::Empty => EXIT_PARSE,
        IoError::UnsupportedFormat(_) => EXIT_FORMAT,
    }
}

/// Map a settings error to its exit code.
pub fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::Io(_) => EXIT_IO,
        ConfigError::Parse(_) => EXIT_PARSE,
    }
}
