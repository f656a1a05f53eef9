//! # Participant List Manager
//!
//! Incremental patches of one card's roster.
//!
//! The entry list on the board and the entry list on the page always agree,
//! even when the surface rejects a patch:
//!
//! - add: the board entry is pushed, then appended to the page. If the append
//!   fails the board entry is taken back.
//! - remove: the page entry goes first and the board follows only once it is
//!   gone.
//!
//! Either way the heading, spots-left and placeholder are then rewritten from
//! the board, so a failed step leaves the card showing the board's count.
//! The surface error is still returned to the caller.

use crate::board::{Board, CardModel, ParticipantEntry};
use crate::render::{heading_text, ActivityRenderer};
use crate::surface::{CardId, EntryId, SurfaceError, ViewSurface};

/// Adds and removes single participant entries.
#[derive(Debug, Clone)]
pub struct ParticipantListManager {
    renderer: ActivityRenderer,
}

impl ParticipantListManager {
    /// Create a manager building entries with `renderer`.
    pub fn new(renderer: ActivityRenderer) -> Self {
        Self { renderer }
    }

    /// Append `email` to `card`, dropping the placeholder if present.
    pub fn add_participant<V: ViewSurface>(
        &self,
        surface: &mut V,
        board: &mut Board,
        card: CardId,
        email: &str,
    ) -> Result<EntryId, SurfaceError> {
        let activity = board
            .card(card)
            .ok_or(SurfaceError::UnknownCard(card))?
            .activity()
            .to_string();
        let entry = board.push_entry(card, email)?;

        let appended = surface.remove_placeholder(card).and_then(|()| {
            surface.append_participant(
                card,
                entry,
                &self.renderer.participant_node(entry, email, &activity),
            )
        });
        if let Err(error) = appended {
            board.take_entry(entry)?;
            tracing::warn!(%error, %activity, "participant entry rejected, board rolled back");
            self.resync(surface, board, card);
            return Err(error);
        }

        let model = board.card(card).ok_or(SurfaceError::UnknownCard(card))?;
        if let Err(error) = self.write_summary(surface, model) {
            self.resync(surface, board, card);
            return Err(error);
        }

        tracing::debug!(
            activity = model.activity(),
            count = model.count(),
            spots_left = model.spots_left(),
            "participant added"
        );
        Ok(entry)
    }

    /// Remove one entry, restoring the placeholder when the roster empties.
    pub fn remove_participant<V: ViewSurface>(
        &self,
        surface: &mut V,
        board: &mut Board,
        entry: EntryId,
    ) -> Result<(CardId, ParticipantEntry), SurfaceError> {
        let card = board
            .locate_entry(entry)
            .map(|(model, _)| model.id())
            .ok_or(SurfaceError::UnknownEntry(entry))?;

        if let Err(error) = surface.remove_participant(card, entry) {
            tracing::warn!(%error, %entry, "participant entry could not be removed, board kept");
            self.resync(surface, board, card);
            return Err(error);
        }
        let (card, removed) = board.take_entry(entry)?;

        let model: &CardModel = board.card(card).ok_or(SurfaceError::UnknownCard(card))?;
        let patched = self.write_summary(surface, model).and_then(|()| {
            if model.count() == 0 {
                surface.insert_placeholder(card, &self.renderer.placeholder_node())
            } else {
                Ok(())
            }
        });
        if let Err(error) = patched {
            self.resync(surface, board, card);
            return Err(error);
        }

        tracing::debug!(
            activity = model.activity(),
            count = model.count(),
            spots_left = model.spots_left(),
            "participant removed"
        );
        Ok((card, removed))
    }

    fn write_summary<V: ViewSurface>(
        &self,
        surface: &mut V,
        model: &CardModel,
    ) -> Result<(), SurfaceError> {
        surface.set_participant_heading(model.id(), &heading_text(model.count()))?;
        surface.set_spots_left(model.id(), &model.spots_left().to_string())
    }

    /// Rewrite heading, spots-left and placeholder from the board.
    fn resync<V: ViewSurface>(&self, surface: &mut V, board: &Board, card: CardId) {
        let Some(model) = board.card(card) else {
            return;
        };
        let result = self.write_summary(surface, model).and_then(|()| {
            surface.remove_placeholder(card)?;
            if model.count() == 0 {
                surface.insert_placeholder(card, &self.renderer.placeholder_node())?;
            }
            Ok(())
        });
        if let Err(error) = result {
            tracing::error!(%error, activity = model.activity(), "card resync failed");
        }
    }
}
