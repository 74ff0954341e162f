//! Wire codec for protocol frames.
//!
//! [`encode`] turns a typed [`Frame`] into bytes; [`parse`] turns the bytes
//! of exactly one frame back into a typed [`Frame`] using a
//! [`FrameRegistry`] lookup. Both walk the variant's declared slot table, so
//! the per-variant code stays declarative.
//!
//! # Wire format
//!
//! The command keyword on its own line, then one `key:value` line per
//! populated header (declared slots first, in declaration order, then any
//! additional headers in insertion order), then a blank line and the raw
//! payload when a body is present. Encoding always terminates lines with
//! `\n`; decoding also accepts `\r\n`. Commands match case-insensitively on
//! decode and are emitted upper case. Header values travel verbatim; no
//! escaping is applied at this layer.

use bytes::{BufMut, Bytes, BytesMut};
use log::trace;

mod cursor;
pub mod error;

pub use error::{EncodeError, ParseError};

use crate::frame::{
    BodySection,
    Frame,
    FrameRegistry,
    FrameShape,
    with_shape,
};
use cursor::ByteCursor;

/// Serialises `frame` for transmission.
///
/// Declared slots are emitted in declaration order; a slot whose value is
/// unset or blank is skipped when optional. Additional headers follow in
/// insertion order, then a blank line and the payload when a body is
/// attached. The output is deterministic: the same frame always yields the
/// same bytes.
///
/// # Errors
/// Returns [`EncodeError::MissingRequiredHeader`] when a mandatory slot has
/// no value.
pub fn encode(frame: &Frame) -> Result<Bytes, EncodeError> {
    with_shape!(frame, shape => encode_shape(shape))
}

/// Parses the bytes of exactly one complete frame.
///
/// The command keyword selects the variant through `registry`; header lines
/// are assigned to declared slots by exact keyword match, with everything
/// else preserved on the additional-headers list. For body-carrying
/// variants, every byte after the blank-line separator becomes the payload
/// verbatim. An advertised content-length is recorded but never trims or
/// validates the payload; reconciling the two is the caller's concern.
///
/// # Errors
/// Returns [`ParseError::UnknownFrameType`] for an unregistered command,
/// [`ParseError::MalformedHeader`] for a header line without a colon (or
/// one that is not valid UTF-8), and [`ParseError::Header`] when a declared
/// slot rejects its value. No partially decoded frame is ever returned.
pub fn parse(packet: &[u8], registry: &FrameRegistry) -> Result<Frame, ParseError> {
    let mut cursor = ByteCursor::new(packet);
    let command_line = cursor.read_line().ok_or_else(|| ParseError::MalformedHeader {
        line: String::new(),
    })?;
    let command = header_text(command_line)?.to_ascii_uppercase();

    let constructor = registry
        .get(&command)
        .ok_or(ParseError::UnknownFrameType { command })?;
    let mut frame = constructor();

    let mut saw_separator = false;
    while let Some(line) = cursor.read_line() {
        if line.is_empty() {
            saw_separator = true;
            break;
        }
        let text = header_text(line)?;
        let Some((key, value)) = text.split_once(':') else {
            return Err(ParseError::MalformedHeader {
                line: text.to_owned(),
            });
        };
        if !frame.apply_header(key, value)? {
            frame.push_additional_header(key, value);
        }
    }

    if saw_separator {
        if let Some(body) = frame.body_mut() {
            body.attach_decoded(Bytes::copy_from_slice(cursor.remaining()));
        }
    }

    trace!("parsed {} frame ({} bytes)", frame.command(), packet.len());
    Ok(frame)
}

fn encode_shape<T: FrameShape + 'static>(shape: &T) -> Result<Bytes, EncodeError> {
    let mut packet = BytesMut::new();
    packet.put_slice(T::COMMAND.as_bytes());
    packet.put_u8(b'\n');

    for slot in T::slots() {
        match (slot.get)(shape) {
            Some(value) if !value.trim().is_empty() => {
                put_header(&mut packet, slot.keyword, &value);
            }
            _ if slot.required => {
                return Err(EncodeError::MissingRequiredHeader {
                    keyword: slot.keyword,
                });
            }
            _ => {}
        }
    }

    for (key, value) in &shape.common().additional {
        put_header(&mut packet, key, value);
    }

    if let Some(payload) = shape.body().and_then(BodySection::payload) {
        packet.put_u8(b'\n');
        packet.put_slice(payload);
    }

    Ok(packet.freeze())
}

fn put_header(packet: &mut BytesMut, key: &str, value: &str) {
    packet.put_slice(key.as_bytes());
    packet.put_u8(b':');
    packet.put_slice(value.as_bytes());
    packet.put_u8(b'\n');
}

fn header_text(line: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(line).map_err(|_| ParseError::MalformedHeader {
        line: String::from_utf8_lossy(line).into_owned(),
    })
}
