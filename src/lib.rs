#![doc(html_root_url = "https://docs.rs/stompwire/latest")]
//! Public API for the `stompwire` library.
//!
//! This crate provides the wire-level machinery for a line-oriented,
//! STOMP-style messaging protocol: typed frame variants with declarative
//! header metadata, a codec that serialises and parses them, and a bounded
//! ring buffer for staging partially received streams until a complete
//! frame is available.
//!
//! Connection management, heartbeats, subscriptions, and transaction
//! bookkeeping belong to a transport layer built on top of these pieces.

pub mod accumulator;
pub mod buffer;
pub mod codec;
pub mod frame;

pub use accumulator::{AccumulateError, FRAME_TERMINATOR, FrameAccumulator};
pub use buffer::{BufferError, RingBuffer};
pub use codec::{EncodeError, ParseError, encode, parse};
pub use frame::{
    AckFrame,
    AcknowledgeHeaders,
    BodySection,
    CommonHeaders,
    ConnectFrame,
    ConnectedFrame,
    Frame,
    FrameConstructor,
    FrameRegistry,
    FrameShape,
    HeaderSlot,
    InvalidHeaderValue,
    MessageFrame,
    NackFrame,
    SendFrame,
    SubscribeFrame,
};
