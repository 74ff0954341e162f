//! Error types for frame serialisation and parsing.
//!
//! Encode-time and decode-time failures are separate enums because they
//! surface to different callers: [`EncodeError`] reaches the code composing
//! an outbound frame, [`ParseError`] reaches the code draining a receive
//! buffer. Neither leaves a partially built frame behind.

use thiserror::Error;

use crate::frame::InvalidHeaderValue;

/// Failures while turning a frame into bytes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A mandatory header slot has no value, or only a blank one.
    #[error("mandatory header {keyword} has no value")]
    MissingRequiredHeader {
        /// Wire keyword of the empty slot.
        keyword: &'static str,
    },
}

/// Failures while turning bytes back into a frame.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The command keyword matched no registered frame variant.
    #[error("unrecognised frame command {command:?}")]
    UnknownFrameType {
        /// Upper-cased command as read from the wire.
        command: String,
    },

    /// A header line could not be split into key and value, or the input
    /// ended before a complete header block.
    #[error("malformed header line {line:?}")]
    MalformedHeader {
        /// Offending line, lossily decoded for display.
        line: String,
    },

    /// A declared slot rejected its wire value.
    #[error(transparent)]
    Header(#[from] InvalidHeaderValue),
}
