//! Record codec error types.

use thiserror::Error;

/// Errors raised while decoding a vendor record.
///
/// Short mandatory prefixes and unterminated strings are the only ways a
/// decode can fail; unknown enum codes and unknown directory tags are
/// preserved or skipped instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{record}: buffer too short ({got} bytes, need at least {need})")]
    ShortBuffer {
        record: &'static str,
        need: usize,
        got: usize,
    },

    #[error("{record}: string not NUL-terminated before end of buffer")]
    UnterminatedString { record: &'static str },
}

/// Errors raised while encoding a vendor record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The interval-timer seconds/frames pair shares one presence bit and
    /// must be set or cleared together.
    #[error("interval timer seconds and frames must both be set or both be empty")]
    IntervalTimerHalfSet,
}
