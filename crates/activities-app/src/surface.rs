//! The DOM seam.
//!
//! [`ViewSurface`] is the set of patches the renderer and participant manager
//! issue; [`NoticeSurface`] is the notice area. Cards and entries are addressed
//! by ids handed out by [`crate::Board`], never by DOM queries on text.

use crate::node::Element;
use crate::notifier::Severity;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Class names shared by the renderer and every surface.
pub mod classes {
    /// Card root.
    pub const CARD: &str = "activity-card";
    /// Span holding the spots-left figure.
    pub const SPOTS_LEFT: &str = "spots-left";
    /// Participants section wrapper.
    pub const PARTICIPANTS_SECTION: &str = "participants-section";
    /// Count heading inside the participants section.
    pub const PARTICIPANTS_HEADING: &str = "participants-heading";
    /// The participant `<ul>`.
    pub const PARTICIPANTS_LIST: &str = "participants-list";
    /// Real participant `<li>`.
    pub const PARTICIPANT_ITEM: &str = "participant-item";
    /// Email text inside an entry.
    pub const PARTICIPANT_EMAIL: &str = "participant-email";
    /// Remove control inside an entry.
    pub const PARTICIPANT_REMOVE: &str = "participant-remove";
    /// Placeholder `<li>` of an empty roster.
    pub const NO_PARTICIPANTS: &str = "no-participants";
}

/// Attribute names shared by the renderer and every surface.
pub mod attrs {
    /// Card id on the card root.
    pub const CARD_ID: &str = "data-card-id";
    /// Stored capacity on the card root.
    pub const MAX_PARTICIPANTS: &str = "data-max-participants";
    /// Entry id on participant items and their remove control.
    pub const ENTRY_ID: &str = "data-entry-id";
}

/// Rendered card handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(u32);

impl CardId {
    /// Wrap a raw id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rendered participant entry handle. Unique across all cards of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A patch could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// No mounted card with this id.
    #[error("unknown card {0}")]
    UnknownCard(CardId),
    /// No mounted entry with this id.
    #[error("unknown participant entry {0}")]
    UnknownEntry(EntryId),
    /// A required element is missing from the page or card.
    #[error("missing element: {0}")]
    MissingElement(String),
    /// The DOM rejected the operation.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// Activity list, selector and form patches.
pub trait ViewSurface {
    /// Remove every card and any static message from the activity container.
    fn clear_activities(&mut self) -> Result<(), SurfaceError>;

    /// Replace the activity container's content with a static message.
    fn show_activities_message(&mut self, message: &Element) -> Result<(), SurfaceError>;

    /// Drop every selector option and insert `placeholder` as the only one.
    fn reset_activity_options(&mut self, placeholder: &Element) -> Result<(), SurfaceError>;

    /// Append one selector option.
    fn append_activity_option(&mut self, option: &Element) -> Result<(), SurfaceError>;

    /// Append a card to the activity container.
    fn mount_card(&mut self, card: CardId, node: &Element) -> Result<(), SurfaceError>;

    /// Append an entry to a card's participant list.
    fn append_participant(
        &mut self,
        card: CardId,
        entry: EntryId,
        node: &Element,
    ) -> Result<(), SurfaceError>;

    /// Remove an entry from a card's participant list.
    fn remove_participant(&mut self, card: CardId, entry: EntryId) -> Result<(), SurfaceError>;

    /// Append the placeholder entry to a card's participant list.
    fn insert_placeholder(&mut self, card: CardId, node: &Element) -> Result<(), SurfaceError>;

    /// Remove the placeholder entry if present. Absent placeholder is not an error.
    fn remove_placeholder(&mut self, card: CardId) -> Result<(), SurfaceError>;

    /// Replace the participant count heading text.
    fn set_participant_heading(&mut self, card: CardId, text: &str) -> Result<(), SurfaceError>;

    /// Replace the spots-left figure.
    fn set_spots_left(&mut self, card: CardId, text: &str) -> Result<(), SurfaceError>;

    /// Enable or disable the signup submit control.
    fn set_submit_enabled(&mut self, enabled: bool) -> Result<(), SurfaceError>;
}

/// The single notice area.
pub trait NoticeSurface {
    /// Replace the current notice and make it visible.
    fn show_notice(&mut self, text: &str, severity: Severity);

    /// Hide whatever notice is current.
    fn hide_notice(&mut self);
}
