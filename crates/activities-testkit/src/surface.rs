//! In-memory DOM surface.
//!
//! Keeps mounted cards as [`Element`] trees and patches them the way the
//! browser surface patches real nodes, so assertions read the same structure
//! a user would see.
//!
//! [`MemorySurface::inject_fault`] arms a one-shot [`SurfaceError::Dom`] for
//! the next call of a given [`SurfaceOp`], standing in for a DOM that rejects
//! a node.

use activities_app::surface::{attrs, classes};
use activities_app::{
    CardId, Element, EntryId, Node, NoticeSurface, Severity, SurfaceError, ViewSurface,
};

/// The notice area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeState {
    /// Current text.
    pub text: String,
    /// Current severity class.
    pub severity: Severity,
    /// Whether the area is shown.
    pub visible: bool,
}

/// [`ViewSurface`] operations a fault can be injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceOp {
    /// [`ViewSurface::clear_activities`]
    ClearActivities,
    /// [`ViewSurface::mount_card`]
    MountCard,
    /// [`ViewSurface::append_activity_option`]
    AppendOption,
    /// [`ViewSurface::append_participant`]
    AppendParticipant,
    /// [`ViewSurface::remove_participant`]
    RemoveParticipant,
    /// [`ViewSurface::insert_placeholder`]
    InsertPlaceholder,
    /// [`ViewSurface::remove_placeholder`]
    RemovePlaceholder,
    /// [`ViewSurface::set_participant_heading`]
    SetHeading,
    /// [`ViewSurface::set_spots_left`]
    SetSpotsLeft,
    /// [`ViewSurface::set_submit_enabled`]
    SetSubmitEnabled,
}

/// In-memory [`ViewSurface`] + [`NoticeSurface`].
#[derive(Debug, Clone)]
pub struct MemorySurface {
    cards: Vec<(CardId, Element)>,
    activities_message: Option<Element>,
    options: Vec<Element>,
    submit_enabled: bool,
    notice: NoticeState,
    notice_log: Vec<(String, Severity)>,
    faults: Vec<SurfaceOp>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            activities_message: None,
            options: Vec::new(),
            submit_enabled: true,
            notice: NoticeState::default(),
            notice_log: Vec::new(),
            faults: Vec::new(),
        }
    }
}

impl MemorySurface {
    /// Empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call of `op` fail. Faults are consumed in arming order,
    /// one per call.
    pub fn inject_fault(&mut self, op: SurfaceOp) {
        self.faults.push(op);
    }

    /// Armed faults not yet triggered.
    pub fn active_faults(&self) -> &[SurfaceOp] {
        &self.faults
    }

    fn trip(&mut self, op: SurfaceOp) -> Result<(), SurfaceError> {
        match self.faults.iter().position(|armed| *armed == op) {
            Some(index) => {
                self.faults.remove(index);
                Err(SurfaceError::Dom(format!("{op:?} rejected")))
            }
            None => Ok(()),
        }
    }

    fn card_mut(&mut self, card: CardId) -> Result<&mut Element, SurfaceError> {
        self.cards
            .iter_mut()
            .find(|(id, _)| *id == card)
            .map(|(_, node)| node)
            .ok_or(SurfaceError::UnknownCard(card))
    }

    fn part_mut(&mut self, card: CardId, class: &str) -> Result<&mut Element, SurfaceError> {
        self.card_mut(card)?
            .find_by_class_mut(class)
            .ok_or_else(|| SurfaceError::MissingElement(class.to_string()))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Mounted cards in container order.
    pub fn cards(&self) -> impl Iterator<Item = &Element> {
        self.cards.iter().map(|(_, node)| node)
    }

    /// Card whose `<h4>` reads `activity`.
    pub fn card_by_name(&self, activity: &str) -> Option<&Element> {
        self.cards().find(|card| {
            card.child_elements()
                .find(|e| e.tag() == "h4")
                .is_some_and(|h| h.text_content() == activity)
        })
    }

    /// Items of a card's participant list, placeholder included.
    pub fn list_items(&self, activity: &str) -> Vec<&Element> {
        self.card_by_name(activity)
            .and_then(|c| c.find_by_class(classes::PARTICIPANTS_LIST))
            .map(|list| list.child_elements().collect())
            .unwrap_or_default()
    }

    /// Emails of real entries, as text content.
    pub fn participant_emails(&self, activity: &str) -> Vec<String> {
        self.list_items(activity)
            .into_iter()
            .filter(|li| li.has_class(classes::PARTICIPANT_ITEM))
            .filter_map(|li| li.find_by_class(classes::PARTICIPANT_EMAIL))
            .map(Element::text_content)
            .collect()
    }

    /// Entry ids of real entries.
    pub fn entry_ids(&self, activity: &str) -> Vec<EntryId> {
        self.list_items(activity)
            .into_iter()
            .filter_map(|li| li.attribute(attrs::ENTRY_ID))
            .filter_map(|raw| raw.parse().ok())
            .collect()
    }

    /// Whether the card shows its placeholder entry.
    pub fn has_placeholder(&self, activity: &str) -> bool {
        self.list_items(activity)
            .iter()
            .any(|li| li.has_class(classes::NO_PARTICIPANTS))
    }

    /// Count heading text.
    pub fn heading(&self, activity: &str) -> Option<String> {
        self.card_by_name(activity)
            .and_then(|c| c.find_by_class(classes::PARTICIPANTS_HEADING))
            .map(Element::text_content)
    }

    /// Number inside "Participants (N)".
    pub fn heading_count(&self, activity: &str) -> Option<usize> {
        let heading = self.heading(activity)?;
        heading
            .strip_prefix("Participants (")?
            .strip_suffix(')')?
            .parse()
            .ok()
    }

    /// Displayed spots-left figure.
    pub fn spots_left(&self, activity: &str) -> Option<i64> {
        self.card_by_name(activity)
            .and_then(|c| c.find_by_class(classes::SPOTS_LEFT))
            .and_then(|s| s.text_content().parse().ok())
    }

    /// Stored capacity attribute.
    pub fn stored_max(&self, activity: &str) -> Option<i64> {
        self.card_by_name(activity)
            .and_then(|c| c.attribute(attrs::MAX_PARTICIPANTS))
            .and_then(|v| v.parse().ok())
    }

    /// Selector option values, placeholder included.
    pub fn option_values(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|o| o.attribute("value").unwrap_or_default().to_string())
            .collect()
    }

    /// Selector options that name an activity.
    pub fn activity_options(&self) -> Vec<String> {
        self.option_values()
            .into_iter()
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Static message shown in place of the list.
    pub fn activities_message(&self) -> Option<String> {
        self.activities_message.as_ref().map(Element::text_content)
    }

    /// Whether the submit control is enabled.
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Current notice area state.
    pub fn notice(&self) -> &NoticeState {
        &self.notice
    }

    /// Every notice shown, in order.
    pub fn notice_log(&self) -> &[(String, Severity)] {
        &self.notice_log
    }

    /// Escaped markup of the whole activity container.
    pub fn container_markup(&self) -> String {
        match &self.activities_message {
            Some(message) => message.to_markup(),
            None => self.cards().map(Element::to_markup).collect(),
        }
    }
}

impl ViewSurface for MemorySurface {
    fn clear_activities(&mut self) -> Result<(), SurfaceError> {
        self.trip(SurfaceOp::ClearActivities)?;
        self.cards.clear();
        self.activities_message = None;
        Ok(())
    }

    fn show_activities_message(&mut self, message: &Element) -> Result<(), SurfaceError> {
        self.cards.clear();
        self.activities_message = Some(message.clone());
        Ok(())
    }

    fn reset_activity_options(&mut self, placeholder: &Element) -> Result<(), SurfaceError> {
        self.options = vec![placeholder.clone()];
        Ok(())
    }

    fn append_activity_option(&mut self, option: &Element) -> Result<(), SurfaceError> {
        self.trip(SurfaceOp::AppendOption)?;
        self.options.push(option.clone());
        Ok(())
    }

    fn mount_card(&mut self, card: CardId, node: &Element) -> Result<(), SurfaceError> {
        self.trip(SurfaceOp::MountCard)?;
        self.activities_message = None;
        self.cards.push((card, node.clone()));
        Ok(())
    }

    fn append_participant(
        &mut self,
        card: CardId,
        _entry: EntryId,
        node: &Element,
    ) -> Result<(), SurfaceError> {
        self.trip(SurfaceOp::AppendParticipant)?;
        self.part_mut(card, classes::PARTICIPANTS_LIST)?
            .children_mut()
            .push(Node::Element(node.clone()));
        Ok(())
    }

    fn remove_participant(&mut self, card: CardId, entry: EntryId) -> Result<(), SurfaceError> {
        self.trip(SurfaceOp::RemoveParticipant)?;
        let id = entry.to_string();
        let items = self.part_mut(card, classes::PARTICIPANTS_LIST)?.children_mut();
        let before = items.len();
        items.retain(|n| match n {
            Node::Element(li) => li.attribute(attrs::ENTRY_ID) != Some(id.as_str()),
            Node::Text(_) => true,
        });
        if items.len() == before {
            return Err(SurfaceError::UnknownEntry(entry));
        }
        Ok(())
    }

    fn insert_placeholder(&mut self, card: CardId, node: &Element) -> Result<(), SurfaceError> {
        self.trip(SurfaceOp::InsertPlaceholder)?;
        self.part_mut(card, classes::PARTICIPANTS_LIST)?
            .children_mut()
            .push(Node::Element(node.clone()));
        Ok(())
    }

    fn remove_placeholder(&mut self, card: CardId) -> Result<(), SurfaceError> {
        self.trip(SurfaceOp::RemovePlaceholder)?;
        self.part_mut(card, classes::PARTICIPANTS_LIST)?
            .children_mut()
            .retain(|n| !matches!(n, Node::Element(li) if li.has_class(classes::NO_PARTICIPANTS)));
        Ok(())
    }

    fn set_participant_heading(&mut self, card: CardId, text: &str) -> Result<(), SurfaceError> {
        self.trip(SurfaceOp::SetHeading)?;
        self.part_mut(card, classes::PARTICIPANTS_HEADING)?.set_text(text);
        Ok(())
    }

    fn set_spots_left(&mut self, card: CardId, text: &str) -> Result<(), SurfaceError> {
        self.trip(SurfaceOp::SetSpotsLeft)?;
        self.part_mut(card, classes::SPOTS_LEFT)?.set_text(text);
        Ok(())
    }

    fn set_submit_enabled(&mut self, enabled: bool) -> Result<(), SurfaceError> {
        self.trip(SurfaceOp::SetSubmitEnabled)?;
        self.submit_enabled = enabled;
        Ok(())
    }
}

impl NoticeSurface for MemorySurface {
    fn show_notice(&mut self, text: &str, severity: Severity) {
        self.notice = NoticeState {
            text: text.to_string(),
            severity,
            visible: true,
        };
        self.notice_log.push((text.to_string(), severity));
    }

    fn hide_notice(&mut self) {
        self.notice.visible = false;
    }
}
