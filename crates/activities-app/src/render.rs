//! # Activity Renderer
//!
//! Projects an [`ActivityDirectory`] into cards and selector options, and
//! registers one [`CardModel`] per card on the [`Board`].
//!
//! Server text only ever lands in [`Element`] text children and attribute
//! values, so no field is interpolated into markup.

use crate::board::{Board, CardModel};
use crate::config::Messages;
use crate::model::{ActivityDetails, ActivityDirectory};
use crate::node::Element;
use crate::surface::{attrs, classes, EntryId, SurfaceError, ViewSurface};

/// Builds card, entry and option nodes and drives full renders.
#[derive(Debug, Clone)]
pub struct ActivityRenderer {
    messages: Messages,
}

impl ActivityRenderer {
    /// Create a renderer using `messages` for fixed strings.
    pub fn new(messages: Messages) -> Self {
        Self { messages }
    }

    /// Clear prior state and render every activity in directory order.
    ///
    /// A card the surface refuses to mount is dropped from the board again,
    /// so on error the board holds exactly the cards that made it onto the
    /// page.
    pub fn render<V: ViewSurface>(
        &self,
        surface: &mut V,
        board: &mut Board,
        directory: &ActivityDirectory,
    ) -> Result<(), SurfaceError> {
        surface.clear_activities()?;
        board.clear();
        self.reset_options(surface)?;

        for (name, details) in directory.iter() {
            let card = board.add_card(name, details.max_participants);
            for email in &details.participants {
                board.push_entry(card, email)?;
            }
            let model = board
                .card(card)
                .ok_or(SurfaceError::UnknownCard(card))?;
            if let Err(error) = surface.mount_card(card, &self.card_node(model, details)) {
                board.remove_card(card);
                return Err(error);
            }
            surface.append_activity_option(&Self::option_node(name))?;
        }

        tracing::debug!(cards = board.len(), "rendered activity directory");
        Ok(())
    }

    /// Replace the list with the static failure message. Options keep only
    /// the placeholder.
    pub fn render_failure<V: ViewSurface>(
        &self,
        surface: &mut V,
        board: &mut Board,
    ) -> Result<(), SurfaceError> {
        board.clear();
        surface.show_activities_message(
            &Element::new("p")
                .class("load-error")
                .text(self.messages.load_failed.as_str()),
        )?;
        self.reset_options(surface)
    }

    /// Reset the selector to its neutral placeholder option.
    pub fn reset_options<V: ViewSurface>(&self, surface: &mut V) -> Result<(), SurfaceError> {
        surface.reset_activity_options(
            &Element::new("option")
                .attr("value", "")
                .text(self.messages.select_placeholder.as_str()),
        )
    }

    /// Full card for `model`, including its current entries.
    pub fn card_node(&self, model: &CardModel, details: &ActivityDetails) -> Element {
        let mut list = Element::new("ul").class(classes::PARTICIPANTS_LIST);
        if model.entries().is_empty() {
            list = list.child(self.placeholder_node());
        }
        for entry in model.entries() {
            list = list.child(self.participant_node(entry.id, &entry.email, model.activity()));
        }

        Element::new("div")
            .class(classes::CARD)
            .attr(attrs::CARD_ID, model.id().to_string())
            .attr(attrs::MAX_PARTICIPANTS, model.max_participants().to_string())
            .child(Element::new("h4").text(model.activity()))
            .child(Element::new("p").text(details.description.as_str()))
            .child(
                Element::new("p")
                    .child(Element::new("strong").text("Schedule:"))
                    .text(format!(" {}", details.schedule)),
            )
            .child(
                Element::new("p")
                    .class("availability")
                    .child(Element::new("strong").text("Availability:"))
                    .text(" ")
                    .child(
                        Element::new("span")
                            .class(classes::SPOTS_LEFT)
                            .text(model.spots_left().to_string()),
                    )
                    .text(" spots left"),
            )
            .child(
                Element::new("div")
                    .class(classes::PARTICIPANTS_SECTION)
                    .child(
                        Element::new("h5")
                            .class(classes::PARTICIPANTS_HEADING)
                            .text(heading_text(model.count())),
                    )
                    .child(list),
            )
    }

    /// One participant entry with its remove control.
    pub fn participant_node(&self, entry: EntryId, email: &str, activity: &str) -> Element {
        Element::new("li")
            .class(classes::PARTICIPANT_ITEM)
            .attr(attrs::ENTRY_ID, entry.to_string())
            .child(
                Element::new("span")
                    .class(classes::PARTICIPANT_EMAIL)
                    .text(email),
            )
            .child(
                Element::new("button")
                    .class(classes::PARTICIPANT_REMOVE)
                    .attr("type", "button")
                    .attr(attrs::ENTRY_ID, entry.to_string())
                    .attr("aria-label", format!("Remove {email} from {activity}"))
                    .attr("title", self.messages.remove_title.as_str())
                    .text("\u{00d7}"),
            )
    }

    /// Placeholder entry of an empty roster.
    pub fn placeholder_node(&self) -> Element {
        Element::new("li")
            .class(classes::NO_PARTICIPANTS)
            .text(self.messages.no_participants.as_str())
    }

    /// Selector option for one activity.
    pub fn option_node(name: &str) -> Element {
        Element::new("option").attr("value", name).text(name)
    }
}

/// Count heading text.
pub fn heading_text(count: usize) -> String {
    format!("Participants ({count})")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(max: u32, participants: &[&str]) -> ActivityDetails {
        ActivityDetails {
            description: "Learn strategies".into(),
            schedule: "Fridays, 3:30 PM".into(),
            max_participants: max,
            participants: participants.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_card_node_shape() {
        let renderer = ActivityRenderer::new(Messages::default());
        let mut board = Board::new();
        let d = details(12, &["a@x.com", "b@x.com"]);
        let card = board.add_card("Chess Club", d.max_participants);
        for p in &d.participants {
            board.push_entry(card, p).unwrap();
        }
        let node = renderer.card_node(board.card(card).unwrap(), &d);

        assert_eq!(node.attribute(attrs::MAX_PARTICIPANTS), Some("12"));
        assert_eq!(
            node.find_by_class(classes::SPOTS_LEFT).map(Element::text_content),
            Some("10".to_string())
        );
        assert_eq!(
            node.find_by_class(classes::PARTICIPANTS_HEADING)
                .map(Element::text_content),
            Some("Participants (2)".to_string())
        );
        let list = node.find_by_class(classes::PARTICIPANTS_LIST).unwrap();
        assert_eq!(list.child_elements().count(), 2);
        assert!(node.find_by_class(classes::NO_PARTICIPANTS).is_none());
    }

    #[test]
    fn test_empty_roster_gets_placeholder_only() {
        let renderer = ActivityRenderer::new(Messages::default());
        let mut board = Board::new();
        let d = details(5, &[]);
        let card = board.add_card("Art", 5);
        let node = renderer.card_node(board.card(card).unwrap(), &d);

        let list = node.find_by_class(classes::PARTICIPANTS_LIST).unwrap();
        let items: Vec<_> = list.child_elements().collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].has_class(classes::NO_PARTICIPANTS));
        assert_eq!(items[0].text_content(), "No participants yet");
    }

    #[test]
    fn test_participant_node_labels_remove_control() {
        let renderer = ActivityRenderer::new(Messages::default());
        let li = renderer.participant_node(EntryId::new(7), "a@x.com", "Chess Club");
        let button = li.find_by_class(classes::PARTICIPANT_REMOVE).unwrap();

        assert_eq!(button.attribute(attrs::ENTRY_ID), Some("7"));
        assert_eq!(
            button.attribute("aria-label"),
            Some("Remove a@x.com from Chess Club")
        );
        assert_eq!(button.attribute("title"), Some("Unregister"));
        assert_eq!(button.text_content(), "\u{00d7}");
    }

    #[test]
    fn test_hostile_email_never_becomes_markup() {
        let renderer = ActivityRenderer::new(Messages::default());
        let email = r#"<img src=x onerror="alert('&')">@x.com"#;
        let li = renderer.participant_node(EntryId::new(1), email, "Chess Club");

        let markup = li.to_markup();
        assert!(!markup.contains("<img"));
        assert_eq!(
            li.find_by_class(classes::PARTICIPANT_EMAIL)
                .map(Element::text_content),
            Some(email.to_string())
        );
    }
}
