//! Header metadata model shared by all frame variants.
//!
//! Each variant declares a static table of [`HeaderSlot`] entries binding its
//! fields to wire header keywords, in the order they are emitted. The codec
//! walks these tables generically through the [`FrameShape`] trait, so the
//! per-variant declarations stay purely descriptive.
//!
//! Fields shared between variants are modelled as embedded groups rather
//! than an inheritance chain: [`CommonHeaders`] appears on every variant,
//! [`AcknowledgeHeaders`] on the acknowledge-style pair, and [`BodySection`]
//! on the variants that carry a payload.

use bytes::Bytes;
use thiserror::Error;

/// A declared header slot could not absorb the supplied wire value.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid value {value:?} for header {keyword}")]
pub struct InvalidHeaderValue {
    /// Wire keyword of the rejected slot.
    pub keyword: &'static str,
    /// Value as it appeared on the wire.
    pub value: String,
}

/// Binding between one field of a frame variant and its wire keyword.
///
/// The accessors are plain function pointers so a slot table can live in a
/// `static`, built once and never mutated.
pub struct HeaderSlot<T> {
    /// Keyword emitted before the colon on the wire.
    pub keyword: &'static str,
    /// Whether serialisation fails when the slot has no value.
    pub required: bool,
    /// Reads the slot's current textual value, if set.
    pub get: fn(&T) -> Option<String>,
    /// Assigns the slot from a decoded wire value.
    pub set: fn(&mut T, &str) -> Result<(), InvalidHeaderValue>,
}

impl<T> HeaderSlot<T> {
    /// Slot whose absence fails serialisation.
    #[must_use]
    pub const fn required(
        keyword: &'static str,
        get: fn(&T) -> Option<String>,
        set: fn(&mut T, &str) -> Result<(), InvalidHeaderValue>,
    ) -> Self {
        Self {
            keyword,
            required: true,
            get,
            set,
        }
    }

    /// Slot skipped silently when it has no value.
    #[must_use]
    pub const fn optional(
        keyword: &'static str,
        get: fn(&T) -> Option<String>,
        set: fn(&mut T, &str) -> Result<(), InvalidHeaderValue>,
    ) -> Self {
        Self {
            keyword,
            required: false,
            get,
            set,
        }
    }
}

impl<T> std::fmt::Debug for HeaderSlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderSlot")
            .field("keyword", &self.keyword)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// Access to a variant's wire keyword, slot table, and shared sections.
///
/// Implementations keep their slot tables in declaration order: the
/// variant's own keywords first, body keywords next where present, and the
/// [`CommonHeaders`] keywords last.
pub trait FrameShape: Default {
    /// Wire keyword for this variant, always upper case.
    const COMMAND: &'static str;

    /// Declared header slots in emission order.
    fn slots() -> &'static [HeaderSlot<Self>];

    /// Headers every variant carries.
    fn common(&self) -> &CommonHeaders;

    /// Mutable access to the shared headers.
    fn common_mut(&mut self) -> &mut CommonHeaders;

    /// Body section for variants that carry one.
    fn body(&self) -> Option<&BodySection> { None }

    /// Mutable body section for variants that carry one.
    fn body_mut(&mut self) -> Option<&mut BodySection> { None }
}

/// Headers present on every frame variant, plus the overflow list of
/// headers that matched no declared slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommonHeaders {
    /// Receipt identifier the peer should echo on successful processing.
    pub receipt: Option<String>,
    /// Transaction this frame belongs to, if any.
    pub transaction: Option<String>,
    /// Undeclared header pairs in the order they were encountered,
    /// re-emitted after the declared slots.
    pub additional: Vec<(String, String)>,
}

/// Headers shared by the acknowledge-style variants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AcknowledgeHeaders {
    /// Identifier of the message being acknowledged.
    pub id: Option<String>,
}

/// Payload plus content headers for body-carrying variants.
///
/// The content length is either explicit (recorded from a decoded header)
/// or derived from the payload's byte length. An explicit value survives
/// decoding untouched; setting a payload through the public API clears it so
/// the derived length is emitted.
#[derive(Clone, Debug, Default)]
pub struct BodySection {
    payload: Option<Bytes>,
    content_type: Option<String>,
    wire_length: Option<usize>,
}

impl BodySection {
    /// Raw payload bytes, if a body is attached.
    #[must_use]
    pub fn payload(&self) -> Option<&[u8]> { self.payload.as_deref() }

    /// Attaches a binary payload. The emitted content length follows the
    /// payload's byte count from here on.
    pub fn set_payload(&mut self, payload: impl Into<Bytes>) {
        self.payload = Some(payload.into());
        self.wire_length = None;
    }

    /// Attaches a text payload, defaulting the content type to
    /// `text/plain` unless the current one already names a text type.
    pub fn set_text(&mut self, text: &str) {
        self.set_payload(Bytes::copy_from_slice(text.as_bytes()));
        let is_text = self
            .content_type
            .as_deref()
            .is_some_and(|content_type| content_type.starts_with("text"));
        if !is_text {
            self.content_type = Some("text/plain".to_owned());
        }
    }

    /// Payload interpreted as UTF-8 text, if it is valid.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.payload
            .as_deref()
            .and_then(|payload| std::str::from_utf8(payload).ok())
    }

    /// Removes the payload along with its content type and length.
    pub fn clear(&mut self) { *self = Self::default(); }

    /// MIME type of the payload.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> { self.content_type.as_deref() }

    /// Sets the MIME type of the payload.
    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = Some(content_type.into());
    }

    /// Length in bytes: the explicit wire value when one was decoded,
    /// otherwise the payload's own length.
    #[must_use]
    pub fn content_length(&self) -> Option<usize> {
        self.wire_length.or_else(|| self.payload.as_ref().map(Bytes::len))
    }

    /// Records an explicit content length from a decoded header.
    pub(crate) fn set_wire_length(&mut self, raw: &str) -> Result<(), InvalidHeaderValue> {
        let length = raw.trim().parse().map_err(|_| InvalidHeaderValue {
            keyword: "content-length",
            value: raw.to_owned(),
        })?;
        self.wire_length = Some(length);
        Ok(())
    }

    /// Attaches the decoded payload without disturbing an explicit length.
    pub(crate) fn attach_decoded(&mut self, payload: Bytes) { self.payload = Some(payload); }
}

/// Equality compares the effective content length, so a decoded frame whose
/// explicit length matches the payload compares equal to the frame it was
/// encoded from.
impl PartialEq for BodySection {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
            && self.content_type == other.content_type
            && self.content_length() == other.content_length()
    }
}

impl Eq for BodySection {}

/// Expands to one [`HeaderSlot`] for a plain string field, mirroring the
/// per-field keyword declarations of the variant structs.
macro_rules! string_slot {
    ($shape:ty, $keyword:literal, required, $($field:ident).+) => {
        $crate::frame::shape::HeaderSlot::required(
            $keyword,
            |frame: &$shape| frame.$($field).+.clone(),
            |frame: &mut $shape, value: &str| {
                frame.$($field).+ = Some(value.to_owned());
                Ok(())
            },
        )
    };
    ($shape:ty, $keyword:literal, optional, $($field:ident).+) => {
        $crate::frame::shape::HeaderSlot::optional(
            $keyword,
            |frame: &$shape| frame.$($field).+.clone(),
            |frame: &mut $shape, value: &str| {
                frame.$($field).+ = Some(value.to_owned());
                Ok(())
            },
        )
    };
}
pub(crate) use string_slot;

/// Expands to a variant's full slot table: the declared entries, the body
/// entries when the `body` marker is given, and the common entries last.
macro_rules! slot_table {
    ($shape:ty; body; $($slot:expr),* $(,)?) => {
        [
            $($slot,)*
            $crate::frame::shape::HeaderSlot::required(
                "content-type",
                |frame: &$shape| frame.body.content_type().map(str::to_owned),
                |frame: &mut $shape, value: &str| {
                    frame.body.set_content_type(value);
                    Ok(())
                },
            ),
            $crate::frame::shape::HeaderSlot::optional(
                "content-length",
                |frame: &$shape| frame.body.content_length().map(|length| length.to_string()),
                |frame: &mut $shape, value: &str| frame.body.set_wire_length(value),
            ),
            $crate::frame::shape::string_slot!($shape, "receipt", optional, common.receipt),
            $crate::frame::shape::string_slot!($shape, "transaction", optional, common.transaction),
        ]
    };
    ($shape:ty; $($slot:expr),* $(,)?) => {
        [
            $($slot,)*
            $crate::frame::shape::string_slot!($shape, "receipt", optional, common.receipt),
            $crate::frame::shape::string_slot!($shape, "transaction", optional, common.transaction),
        ]
    };
}
pub(crate) use slot_table;
