//! Classification of driver errors

use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Server error code for unique index violations
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// True when `err` is a unique index violation (E11000), whether it came
/// back from a plain write or from a findAndModify command.
pub fn is_duplicate_key(err: &Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
