//! Typed protocol frames and their wire-header metadata.
//!
//! A [`Frame`] is one of a closed set of shapes, each declaring a static
//! table binding its fields to wire header keywords. The codec drives those
//! tables generically; nothing here knows how bytes look on the wire.

pub mod registry;
pub mod shape;
mod variants;

pub use registry::{FrameConstructor, FrameRegistry};
pub use shape::{
    AcknowledgeHeaders,
    BodySection,
    CommonHeaders,
    FrameShape,
    HeaderSlot,
    InvalidHeaderValue,
};
pub use variants::{
    AckFrame,
    ConnectFrame,
    ConnectedFrame,
    MessageFrame,
    NackFrame,
    SendFrame,
    SubscribeFrame,
};

/// One complete protocol message unit: a command keyword, its headers, and
/// an optional body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    /// Client connection request.
    Connect(ConnectFrame),
    /// Server connection acknowledgement.
    Connected(ConnectedFrame),
    /// Client message to a destination.
    Send(SendFrame),
    /// Server message delivery.
    Message(MessageFrame),
    /// Client subscription request.
    Subscribe(SubscribeFrame),
    /// Positive acknowledgement.
    Ack(AckFrame),
    /// Negative acknowledgement.
    Nack(NackFrame),
}

/// Dispatches over the closed variant set, binding the inner shape so the
/// body expression can use it generically.
macro_rules! with_shape {
    ($frame:expr, $shape:ident => $body:expr) => {
        match $frame {
            $crate::frame::Frame::Connect($shape) => $body,
            $crate::frame::Frame::Connected($shape) => $body,
            $crate::frame::Frame::Send($shape) => $body,
            $crate::frame::Frame::Message($shape) => $body,
            $crate::frame::Frame::Subscribe($shape) => $body,
            $crate::frame::Frame::Ack($shape) => $body,
            $crate::frame::Frame::Nack($shape) => $body,
        }
    };
}
pub(crate) use with_shape;

impl Frame {
    /// Wire command of this frame, upper case.
    #[must_use]
    pub fn command(&self) -> &'static str { with_shape!(self, shape => command_of(shape)) }

    /// Headers shared by every variant.
    #[must_use]
    pub fn common(&self) -> &CommonHeaders { with_shape!(self, shape => shape.common()) }

    /// Mutable access to the shared headers.
    pub fn common_mut(&mut self) -> &mut CommonHeaders {
        with_shape!(self, shape => shape.common_mut())
    }

    /// Headers that matched no declared slot, in encounter order.
    #[must_use]
    pub fn additional_headers(&self) -> &[(String, String)] { &self.common().additional }

    /// Appends an undeclared header pair, preserving insertion order.
    pub fn push_additional_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.common_mut().additional.push((key.into(), value.into()));
    }

    /// Body section, for the variants that carry one.
    #[must_use]
    pub fn body(&self) -> Option<&BodySection> { with_shape!(self, shape => shape.body()) }

    /// Mutable body section, for the variants that carry one.
    pub fn body_mut(&mut self) -> Option<&mut BodySection> {
        with_shape!(self, shape => shape.body_mut())
    }

    /// Assigns a decoded header to its declared slot, if this variant has
    /// one for `key`. Returns `false` when the key matches no slot.
    pub(crate) fn apply_header(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<bool, InvalidHeaderValue> {
        with_shape!(self, shape => assign_slot(shape, key, value))
    }
}

fn command_of<T: FrameShape>(_: &T) -> &'static str { T::COMMAND }

fn assign_slot<T: FrameShape + 'static>(
    shape: &mut T,
    key: &str,
    value: &str,
) -> Result<bool, InvalidHeaderValue> {
    for slot in T::slots() {
        if slot.keyword == key {
            (slot.set)(shape, value)?;
            return Ok(true);
        }
    }
    Ok(false)
}

macro_rules! impl_from_shape {
    ($($variant:ident => $shape:ident),+ $(,)?) => {
        $(impl From<$shape> for Frame {
            fn from(frame: $shape) -> Self { Self::$variant(frame) }
        })+
    };
}

impl_from_shape! {
    Connect => ConnectFrame,
    Connected => ConnectedFrame,
    Send => SendFrame,
    Message => MessageFrame,
    Subscribe => SubscribeFrame,
    Ack => AckFrame,
    Nack => NackFrame,
}
