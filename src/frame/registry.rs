//! Lookup table from wire command to frame constructor.
//!
//! The registry is populated once from the closed set of known variants and
//! never mutated afterwards; [`FrameRegistry::global`] exposes the
//! process-wide instance decoding normally goes through. Configuration
//! mistakes in the variant declarations (two variants claiming the same
//! command, or one variant declaring a wire keyword twice) are caught while
//! the table is built, not at decode time.

use std::{collections::HashMap, sync::OnceLock};

use log::debug;

use super::{
    Frame,
    shape::FrameShape,
    variants::{
        AckFrame,
        ConnectFrame,
        ConnectedFrame,
        MessageFrame,
        NackFrame,
        SendFrame,
        SubscribeFrame,
    },
};

/// Builds an empty instance of the variant a command decodes into.
pub type FrameConstructor = fn() -> Frame;

const BUILTIN: &[(&str, FrameConstructor)] = &[
    (ConnectFrame::COMMAND, || {
        Frame::Connect(ConnectFrame::default())
    }),
    (ConnectedFrame::COMMAND, || {
        Frame::Connected(ConnectedFrame::default())
    }),
    (SendFrame::COMMAND, || Frame::Send(SendFrame::default())),
    (MessageFrame::COMMAND, || {
        Frame::Message(MessageFrame::default())
    }),
    (SubscribeFrame::COMMAND, || {
        Frame::Subscribe(SubscribeFrame::default())
    }),
    (AckFrame::COMMAND, || Frame::Ack(AckFrame::default())),
    (NackFrame::COMMAND, || Frame::Nack(NackFrame::default())),
];

/// Immutable mapping from wire command to the variant it decodes into.
#[derive(Debug)]
pub struct FrameRegistry {
    entries: HashMap<&'static str, FrameConstructor>,
}

impl FrameRegistry {
    /// Builds the registry over the closed set of known variants and
    /// validates their header declarations.
    ///
    /// # Panics
    /// Panics if two variants claim the same wire command or a variant's
    /// slot table declares the same keyword twice. Both are configuration
    /// errors in the variant declarations and surface the first time a
    /// registry is built.
    #[must_use]
    pub fn new() -> Self {
        validate_slots::<ConnectFrame>();
        validate_slots::<ConnectedFrame>();
        validate_slots::<SendFrame>();
        validate_slots::<MessageFrame>();
        validate_slots::<SubscribeFrame>();
        validate_slots::<AckFrame>();
        validate_slots::<NackFrame>();

        let mut entries = HashMap::with_capacity(BUILTIN.len());
        for (command, constructor) in BUILTIN {
            let previous = entries.insert(*command, *constructor);
            assert!(
                previous.is_none(),
                "frame command {command} registered twice"
            );
        }
        debug!("frame registry built with {} commands", entries.len());
        Self { entries }
    }

    /// The process-wide registry, built on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<FrameRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::new)
    }

    /// Looks up the constructor for `command`, matching case-insensitively.
    #[must_use]
    pub fn get(&self, command: &str) -> Option<FrameConstructor> {
        self.entries
            .get(command.to_ascii_uppercase().as_str())
            .copied()
    }

    /// Whether `command` decodes into a known variant.
    #[must_use]
    pub fn contains(&self, command: &str) -> bool { self.get(command).is_some() }

    /// Registered wire commands, in no particular order.
    pub fn commands(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

impl Default for FrameRegistry {
    fn default() -> Self { Self::new() }
}

fn validate_slots<T: FrameShape + 'static>() {
    let slots = T::slots();
    for (index, slot) in slots.iter().enumerate() {
        let duplicate = slots[..index]
            .iter()
            .any(|earlier| earlier.keyword == slot.keyword);
        assert!(
            !duplicate,
            "frame {} declares header {} twice",
            T::COMMAND,
            slot.keyword
        );
    }
}
