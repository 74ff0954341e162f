//! Staging layer joining the ring buffer to the frame codec.
//!
//! A transport pushes received bytes in as they arrive; [`FrameAccumulator`]
//! scans the buffered region for the frame terminator, carves out the
//! frame's bytes, and parses them against the global registry. This is the
//! collaboration a connection's receive path drives; the connection itself
//! (sockets, heartbeats, reconnection) lives elsewhere.

use log::debug;
use thiserror::Error;

use crate::{
    buffer::{BufferError, RingBuffer},
    codec::{self, ParseError},
    frame::{Frame, FrameRegistry},
};

/// Byte marking the end of a frame on the wire.
pub const FRAME_TERMINATOR: u8 = 0x00;

/// Failures while extracting frames from the staged stream.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AccumulateError {
    /// The staging buffer rejected an operation.
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// A carved-out frame failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Accumulates inbound stream bytes and carves out complete frames.
///
/// Frame boundaries are found by a linear scan for [`FRAME_TERMINATOR`], so
/// a binary payload containing that byte needs a length-aware transport
/// instead. Stray end-of-line bytes between frames (heartbeats) are
/// discarded silently.
#[derive(Debug)]
pub struct FrameAccumulator {
    buffer: RingBuffer<u8>,
}

impl FrameAccumulator {
    /// Accumulator staging up to `capacity` bytes.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: RingBuffer::new(capacity),
        }
    }

    /// Stages received bytes for frame extraction.
    ///
    /// # Errors
    /// Returns [`BufferError::Full`] if the bytes do not fit; the caller
    /// must drain complete frames before pushing more.
    pub fn push(&mut self, data: &[u8]) -> Result<(), BufferError> { self.buffer.write(data) }

    /// Bytes currently staged and not yet carved into frames.
    #[must_use]
    pub fn buffered(&self) -> usize { self.buffer.available_read() }

    /// Extracts and parses the next complete frame, if one is staged.
    ///
    /// Returns `Ok(None)` when no terminator has arrived yet.
    ///
    /// # Errors
    /// Propagates [`ParseError`] when the carved bytes are not a valid
    /// frame; the malformed frame is consumed from the buffer either way.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, AccumulateError> {
        while let Some(distance) = self.buffer.distance_to(&FRAME_TERMINATOR) {
            let raw = self.buffer.read(distance)?;
            self.buffer.seek(1); // discard the terminator itself

            // Heartbeat newlines may precede the next command.
            let start = raw
                .iter()
                .position(|&byte| byte != b'\n' && byte != b'\r')
                .unwrap_or(raw.len());
            if start == raw.len() {
                continue;
            }

            let frame = codec::parse(&raw[start..], FrameRegistry::global())?;
            debug!(
                "extracted {} frame ({} bytes staged)",
                frame.command(),
                self.buffer.available_read()
            );
            return Ok(Some(frame));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{ConnectFrame, SendFrame};

    #[test]
    fn next_frame_returns_none_until_terminator_arrives() {
        let mut accumulator = FrameAccumulator::new(256);
        accumulator.push(b"ACK\nid:7\n").expect("push should fit");
        assert_eq!(accumulator.next_frame(), Ok(None));

        accumulator.push(&[FRAME_TERMINATOR]).expect("push should fit");
        let frame = accumulator
            .next_frame()
            .expect("frame should parse")
            .expect("frame should be complete");
        assert_eq!(frame.command(), "ACK");
    }

    #[test]
    fn heartbeat_newlines_between_frames_are_discarded() {
        let mut accumulator = FrameAccumulator::new(256);
        let packet = codec::encode(&ConnectFrame::new("broker").into())
            .expect("encode should succeed");
        accumulator.push(b"\n\r\n").expect("push should fit");
        accumulator.push(&packet).expect("push should fit");
        accumulator.push(&[FRAME_TERMINATOR]).expect("push should fit");

        let frame = accumulator
            .next_frame()
            .expect("frame should parse")
            .expect("frame should be complete");
        assert_eq!(frame.command(), "CONNECT");
        assert_eq!(accumulator.next_frame(), Ok(None));
    }

    #[test]
    fn frames_split_across_pushes_are_reassembled() {
        let mut accumulator = FrameAccumulator::new(256);
        let mut packet = codec::encode(&SendFrame::with_text("/queue/a", "hi").into())
            .expect("encode should succeed")
            .to_vec();
        packet.push(FRAME_TERMINATOR);

        let (head, tail) = packet.split_at(packet.len() / 2);
        accumulator.push(head).expect("push should fit");
        assert_eq!(accumulator.next_frame(), Ok(None));
        accumulator.push(tail).expect("push should fit");

        let frame = accumulator
            .next_frame()
            .expect("frame should parse")
            .expect("frame should be complete");
        let body = frame.body().expect("SEND carries a body");
        assert_eq!(body.text(), Some("hi"));
    }

    #[test]
    fn malformed_frame_is_consumed_and_reported() {
        let mut accumulator = FrameAccumulator::new(64);
        accumulator.push(b"FOO\n\n\0").expect("push should fit");
        assert!(matches!(
            accumulator.next_frame(),
            Err(AccumulateError::Parse(ParseError::UnknownFrameType { .. }))
        ));
        // The bad frame no longer occupies the buffer.
        assert_eq!(accumulator.buffered(), 0);
    }
}
