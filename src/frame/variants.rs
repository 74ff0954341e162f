//! The closed set of concrete frame shapes.
//!
//! Everything here is declarative: each struct is a bag of optional header
//! fields plus the shared sections, and its `FrameShape` impl is the static
//! slot table the codec walks. Defaults favour a working handshake out of
//! the box (for example CONNECT advertises protocol version 1.2).

use super::shape::{
    AcknowledgeHeaders,
    BodySection,
    CommonHeaders,
    FrameShape,
    HeaderSlot,
    slot_table,
    string_slot,
};

/// Client connection request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectFrame {
    /// Protocol versions the client accepts.
    pub accept_version: Option<String>,
    /// Virtual host to connect to.
    pub host: Option<String>,
    /// Login name, where the server requires authentication.
    pub login: Option<String>,
    /// Password paired with the login.
    pub password: Option<String>,
    /// Heartbeat settings offered by the client.
    pub heartbeat: Option<String>,
    /// Shared headers.
    pub common: CommonHeaders,
}

impl Default for ConnectFrame {
    fn default() -> Self {
        Self {
            accept_version: Some("1.2".to_owned()),
            host: None,
            login: None,
            password: None,
            heartbeat: None,
            common: CommonHeaders::default(),
        }
    }
}

impl ConnectFrame {
    /// Connection request for the given virtual host.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Self::default()
        }
    }
}

impl FrameShape for ConnectFrame {
    const COMMAND: &'static str = "CONNECT";

    fn slots() -> &'static [HeaderSlot<Self>] {
        static SLOTS: [HeaderSlot<ConnectFrame>; 7] = slot_table![ConnectFrame;
            string_slot!(ConnectFrame, "accept-version", required, accept_version),
            string_slot!(ConnectFrame, "host", required, host),
            string_slot!(ConnectFrame, "login", optional, login),
            string_slot!(ConnectFrame, "password", optional, password),
            string_slot!(ConnectFrame, "heart-beat", optional, heartbeat),
        ];
        &SLOTS
    }

    fn common(&self) -> &CommonHeaders { &self.common }

    fn common_mut(&mut self) -> &mut CommonHeaders { &mut self.common }
}

/// Server acknowledgement of a successful connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectedFrame {
    /// Heartbeat settings granted by the server.
    pub heartbeat: Option<String>,
    /// Session identifier assigned by the server.
    pub session: Option<String>,
    /// Server implementation banner.
    pub server: Option<String>,
    /// Protocol version the session will speak.
    pub version: Option<String>,
    /// Shared headers.
    pub common: CommonHeaders,
}

impl Default for ConnectedFrame {
    fn default() -> Self {
        Self {
            heartbeat: Some("0,0".to_owned()),
            session: None,
            server: Some("Unknown/1.0".to_owned()),
            version: Some("1.2".to_owned()),
            common: CommonHeaders::default(),
        }
    }
}

impl FrameShape for ConnectedFrame {
    const COMMAND: &'static str = "CONNECTED";

    fn slots() -> &'static [HeaderSlot<Self>] {
        static SLOTS: [HeaderSlot<ConnectedFrame>; 6] = slot_table![ConnectedFrame;
            string_slot!(ConnectedFrame, "heartbeat", optional, heartbeat),
            string_slot!(ConnectedFrame, "session", optional, session),
            string_slot!(ConnectedFrame, "server", optional, server),
            string_slot!(ConnectedFrame, "version", required, version),
        ];
        &SLOTS
    }

    fn common(&self) -> &CommonHeaders { &self.common }

    fn common_mut(&mut self) -> &mut CommonHeaders { &mut self.common }
}

/// Client message addressed to a destination on the server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SendFrame {
    /// Destination address to deliver to.
    pub destination: Option<String>,
    /// Payload and content headers.
    pub body: BodySection,
    /// Shared headers.
    pub common: CommonHeaders,
}

impl SendFrame {
    /// Send frame for `destination` with an empty text body.
    #[must_use]
    pub fn new(destination: impl Into<String>) -> Self { Self::with_text(destination, "") }

    /// Send frame for `destination` carrying the given text body.
    #[must_use]
    pub fn with_text(destination: impl Into<String>, text: &str) -> Self {
        let mut frame = Self {
            destination: Some(destination.into()),
            ..Self::default()
        };
        frame.body.set_text(text);
        frame
    }
}

impl FrameShape for SendFrame {
    const COMMAND: &'static str = "SEND";

    fn slots() -> &'static [HeaderSlot<Self>] {
        static SLOTS: [HeaderSlot<SendFrame>; 5] = slot_table![SendFrame; body;
            string_slot!(SendFrame, "destination", required, destination),
        ];
        &SLOTS
    }

    fn common(&self) -> &CommonHeaders { &self.common }

    fn common_mut(&mut self) -> &mut CommonHeaders { &mut self.common }

    fn body(&self) -> Option<&BodySection> { Some(&self.body) }

    fn body_mut(&mut self) -> Option<&mut BodySection> { Some(&mut self.body) }
}

/// Server delivery of a message to a subscribed client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageFrame {
    /// Subscription the message was delivered under.
    pub subscription: Option<String>,
    /// Destination the sending client addressed.
    pub destination: Option<String>,
    /// Unique message identifier.
    pub message_id: Option<String>,
    /// Token to echo back when acknowledging the message.
    pub ack: Option<String>,
    /// Payload and content headers.
    pub body: BodySection,
    /// Shared headers.
    pub common: CommonHeaders,
}

impl MessageFrame {
    /// Message delivery with the mandatory routing headers populated.
    #[must_use]
    pub fn new(
        subscription: impl Into<String>,
        destination: impl Into<String>,
        message_id: impl Into<String>,
    ) -> Self {
        Self {
            subscription: Some(subscription.into()),
            destination: Some(destination.into()),
            message_id: Some(message_id.into()),
            ..Self::default()
        }
    }
}

impl FrameShape for MessageFrame {
    const COMMAND: &'static str = "MESSAGE";

    fn slots() -> &'static [HeaderSlot<Self>] {
        static SLOTS: [HeaderSlot<MessageFrame>; 8] = slot_table![MessageFrame; body;
            string_slot!(MessageFrame, "subscription", required, subscription),
            string_slot!(MessageFrame, "destination", required, destination),
            string_slot!(MessageFrame, "message-id", required, message_id),
            string_slot!(MessageFrame, "ack", required, ack),
        ];
        &SLOTS
    }

    fn common(&self) -> &CommonHeaders { &self.common }

    fn common_mut(&mut self) -> &mut CommonHeaders { &mut self.common }

    fn body(&self) -> Option<&BodySection> { Some(&self.body) }

    fn body_mut(&mut self) -> Option<&mut BodySection> { Some(&mut self.body) }
}

/// Client subscription to a feed on the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscribeFrame {
    /// Feed to subscribe to.
    pub destination: Option<String>,
    /// Client-generated identifier for this subscription.
    pub id: Option<String>,
    /// Acknowledgement mode requested for the subscription.
    pub ack: Option<String>,
    /// Shared headers.
    pub common: CommonHeaders,
}

impl Default for SubscribeFrame {
    fn default() -> Self {
        Self {
            destination: None,
            id: None,
            ack: Some("client-individual".to_owned()),
            common: CommonHeaders::default(),
        }
    }
}

impl SubscribeFrame {
    /// Subscription to `destination` under the client-chosen `id`.
    #[must_use]
    pub fn new(destination: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            destination: Some(destination.into()),
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

impl FrameShape for SubscribeFrame {
    const COMMAND: &'static str = "SUBSCRIBE";

    fn slots() -> &'static [HeaderSlot<Self>] {
        static SLOTS: [HeaderSlot<SubscribeFrame>; 5] = slot_table![SubscribeFrame;
            string_slot!(SubscribeFrame, "destination", required, destination),
            string_slot!(SubscribeFrame, "id", required, id),
            string_slot!(SubscribeFrame, "ack", optional, ack),
        ];
        &SLOTS
    }

    fn common(&self) -> &CommonHeaders { &self.common }

    fn common_mut(&mut self) -> &mut CommonHeaders { &mut self.common }
}

/// Positive acknowledgement of a received message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AckFrame {
    /// Acknowledge headers shared with [`NackFrame`].
    pub ack: AcknowledgeHeaders,
    /// Shared headers.
    pub common: CommonHeaders,
}

impl AckFrame {
    /// Acknowledgement carrying the ack token of `message`.
    #[must_use]
    pub fn for_message(message: &MessageFrame) -> Self {
        Self {
            ack: AcknowledgeHeaders {
                id: message.ack.clone(),
            },
            common: CommonHeaders::default(),
        }
    }
}

impl FrameShape for AckFrame {
    const COMMAND: &'static str = "ACK";

    fn slots() -> &'static [HeaderSlot<Self>] {
        static SLOTS: [HeaderSlot<AckFrame>; 3] = slot_table![AckFrame;
            string_slot!(AckFrame, "id", required, ack.id),
        ];
        &SLOTS
    }

    fn common(&self) -> &CommonHeaders { &self.common }

    fn common_mut(&mut self) -> &mut CommonHeaders { &mut self.common }
}

/// Negative acknowledgement of a received message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NackFrame {
    /// Acknowledge headers shared with [`AckFrame`].
    pub ack: AcknowledgeHeaders,
    /// Shared headers.
    pub common: CommonHeaders,
}

impl NackFrame {
    /// Rejection carrying the ack token of `message`.
    #[must_use]
    pub fn for_message(message: &MessageFrame) -> Self {
        Self {
            ack: AcknowledgeHeaders {
                id: message.ack.clone(),
            },
            common: CommonHeaders::default(),
        }
    }
}

impl FrameShape for NackFrame {
    const COMMAND: &'static str = "NACK";

    fn slots() -> &'static [HeaderSlot<Self>] {
        static SLOTS: [HeaderSlot<NackFrame>; 3] = slot_table![NackFrame;
            string_slot!(NackFrame, "id", required, ack.id),
        ];
        &SLOTS
    }

    fn common(&self) -> &CommonHeaders { &self.common }

    fn common_mut(&mut self) -> &mut CommonHeaders { &mut self.common }
}
