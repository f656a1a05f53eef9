//! Per-card view-models.
//!
//! The board is the in-memory record of what each rendered card shows. Counts
//! and spots-left are always derived from it, never read back from the DOM.
//! Ids are never reused, so events from a discarded render cannot address a
//! card or entry of the current one.

use crate::surface::{CardId, EntryId, SurfaceError};
use indexmap::IndexMap;
use std::collections::HashMap;

/// One rendered participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEntry {
    /// Entry handle.
    pub id: EntryId,
    /// Participant email as sent by the server or submitted by the user.
    pub email: String,
}

/// What one rendered card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardModel {
    id: CardId,
    activity: String,
    max_participants: u32,
    entries: Vec<ParticipantEntry>,
}

impl CardModel {
    /// Card handle.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Activity name.
    pub fn activity(&self) -> &str {
        &self.activity
    }

    /// Stored capacity.
    pub fn max_participants(&self) -> u32 {
        self.max_participants
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[ParticipantEntry] {
        &self.entries
    }

    /// Real participant count.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// `max_participants - count`.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.entries.len() as i64
    }

    /// Whether any entry shows `email`.
    pub fn contains_email(&self, email: &str) -> bool {
        self.entries.iter().any(|e| e.email == email)
    }
}

/// All card view-models of the current render.
#[derive(Debug, Default)]
pub struct Board {
    cards: IndexMap<CardId, CardModel>,
    by_activity: HashMap<String, CardId>,
    entry_cards: HashMap<EntryId, CardId>,
    next_card: u32,
    next_entry: u64,
}

impl Board {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every card. Id counters keep running.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.by_activity.clear();
        self.entry_cards.clear();
    }

    /// Register a card with no entries.
    pub fn add_card(&mut self, activity: &str, max_participants: u32) -> CardId {
        let id = CardId::new(self.next_card);
        self.next_card += 1;
        self.cards.insert(
            id,
            CardModel {
                id,
                activity: activity.to_string(),
                max_participants,
                entries: Vec::new(),
            },
        );
        self.by_activity.insert(activity.to_string(), id);
        id
    }

    /// Append an entry to a card.
    pub fn push_entry(&mut self, card: CardId, email: &str) -> Result<EntryId, SurfaceError> {
        let id = EntryId::new(self.next_entry);
        let model = self
            .cards
            .get_mut(&card)
            .ok_or(SurfaceError::UnknownCard(card))?;
        self.next_entry += 1;
        model.entries.push(ParticipantEntry {
            id,
            email: email.to_string(),
        });
        self.entry_cards.insert(id, card);
        Ok(id)
    }

    /// Remove an entry, returning its card and contents.
    pub fn take_entry(&mut self, entry: EntryId) -> Result<(CardId, ParticipantEntry), SurfaceError> {
        let card = self
            .entry_cards
            .remove(&entry)
            .ok_or(SurfaceError::UnknownEntry(entry))?;
        let model = self
            .cards
            .get_mut(&card)
            .ok_or(SurfaceError::UnknownCard(card))?;
        let index = model
            .entries
            .iter()
            .position(|e| e.id == entry)
            .ok_or(SurfaceError::UnknownEntry(entry))?;
        Ok((card, model.entries.remove(index)))
    }

    /// Forget one card and its entries.
    pub fn remove_card(&mut self, id: CardId) -> Option<CardModel> {
        let model = self.cards.shift_remove(&id)?;
        if self.by_activity.get(&model.activity) == Some(&id) {
            self.by_activity.remove(&model.activity);
        }
        for entry in &model.entries {
            self.entry_cards.remove(&entry.id);
        }
        Some(model)
    }

    /// Card by handle.
    pub fn card(&self, id: CardId) -> Option<&CardModel> {
        self.cards.get(&id)
    }

    /// Card rendered for `activity`.
    pub fn card_for_activity(&self, activity: &str) -> Option<&CardModel> {
        self.by_activity.get(activity).and_then(|id| self.cards.get(id))
    }

    /// Card and entry for an entry handle.
    pub fn locate_entry(&self, entry: EntryId) -> Option<(&CardModel, &ParticipantEntry)> {
        let card = self.cards.get(self.entry_cards.get(&entry)?)?;
        let item = card.entries.iter().find(|e| e.id == entry)?;
        Some((card, item))
    }

    /// Cards in render order.
    pub fn cards(&self) -> impl Iterator<Item = &CardModel> {
        self.cards.values()
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether no card is registered.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_survive_clear() {
        let mut board = Board::new();
        let first = board.add_card("Chess Club", 10);
        let entry = board.push_entry(first, "a@x.com").unwrap();
        board.clear();

        let second = board.add_card("Chess Club", 10);
        assert_ne!(first, second);
        assert!(board.locate_entry(entry).is_none());
        assert_eq!(
            board.take_entry(entry),
            Err(SurfaceError::UnknownEntry(entry))
        );
    }

    #[test]
    fn test_take_entry_keeps_order_of_rest() {
        let mut board = Board::new();
        let card = board.add_card("Art", 3);
        let a = board.push_entry(card, "a@x.com").unwrap();
        let b = board.push_entry(card, "b@x.com").unwrap();
        let c = board.push_entry(card, "c@x.com").unwrap();

        let (from, removed) = board.take_entry(b).unwrap();
        assert_eq!(from, card);
        assert_eq!(removed.email, "b@x.com");

        let model = board.card(card).unwrap();
        let ids: Vec<_> = model.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert_eq!(model.spots_left(), 1);
    }

    #[test]
    fn test_remove_card_forgets_its_entries() {
        let mut board = Board::new();
        let gym = board.add_card("Gym", 2);
        let art = board.add_card("Art", 2);
        let entry = board.push_entry(gym, "a@x.com").unwrap();

        let removed = board.remove_card(gym).unwrap();
        assert_eq!(removed.activity(), "Gym");
        assert!(board.card_for_activity("Gym").is_none());
        assert!(board.locate_entry(entry).is_none());
        assert_eq!(board.cards().map(CardModel::id).collect::<Vec<_>>(), vec![art]);
        assert!(board.remove_card(gym).is_none());
    }

    #[test]
    fn test_push_to_unknown_card_fails() {
        let mut board = Board::new();
        let ghost = CardId::new(99);
        assert_eq!(
            board.push_entry(ghost, "a@x.com"),
            Err(SurfaceError::UnknownCard(ghost))
        );
    }
}
