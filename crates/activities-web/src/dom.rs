//! DOM surface.
//!
//! Materializes [`activities_app::Element`] trees with `createElement`,
//! `setAttribute` and `createTextNode`. Markup strings are never parsed, so
//! server-sourced text can only ever become text nodes or attribute values.

use activities_app::surface::{attrs, classes};
use activities_app::{
    CardId, Element as Template, EntryId, Node, NoticeSurface, Severity, SurfaceError, ViewSurface,
};
use std::collections::HashMap;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::config::DomConfig;
use crate::error::{WebError, WebResult};

const HIDDEN: &str = "hidden";

/// Look up `#id`.
pub fn element_by_id(document: &Document, id: &str) -> WebResult<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| WebError::MissingElement(id.to_string()))
}

/// Build a live element for `template`.
pub fn materialize(document: &Document, template: &Template) -> WebResult<Element> {
    let element = document.create_element(template.tag())?;
    if !template.classes().is_empty() {
        element.set_class_name(&template.classes().join(" "));
    }
    for (name, value) in template.attributes() {
        element.set_attribute(name, value)?;
    }
    for child in template.children() {
        match child {
            Node::Element(e) => {
                let child = materialize(document, e)?;
                element.append_child(&child)?;
            }
            Node::Text(text) => {
                element.append_child(&document.create_text_node(text))?;
            }
        }
    }
    Ok(element)
}

fn dom(err: JsValue) -> SurfaceError {
    WebError::from(err).into()
}

/// [`ViewSurface`] and [`NoticeSurface`] over the page.
pub struct DomSurface {
    document: Document,
    activities_list: Element,
    activity_select: Element,
    submit_control: Option<Element>,
    notice: Element,
    cards: HashMap<CardId, Element>,
}

impl DomSurface {
    /// Bind to the elements named in `config`.
    pub fn attach(document: Document, config: &DomConfig) -> WebResult<Self> {
        let form = element_by_id(&document, &config.signup_form)?;
        let submit_control = form.query_selector("[type=submit]")?;
        if submit_control.is_none() {
            tracing::warn!(form = %config.signup_form, "signup form has no submit control");
        }
        Ok(Self {
            activities_list: element_by_id(&document, &config.activities_list)?,
            activity_select: element_by_id(&document, &config.activity_select)?,
            notice: element_by_id(&document, &config.message)?,
            submit_control,
            document,
            cards: HashMap::new(),
        })
    }

    fn card(&self, card: CardId) -> Result<&Element, SurfaceError> {
        self.cards.get(&card).ok_or(SurfaceError::UnknownCard(card))
    }

    fn part(&self, card: CardId, class: &str) -> Result<Element, SurfaceError> {
        self.card(card)?
            .query_selector(&format!(".{class}"))
            .map_err(dom)?
            .ok_or_else(|| SurfaceError::MissingElement(class.to_string()))
    }

    fn build(&self, template: &Template) -> Result<Element, SurfaceError> {
        materialize(&self.document, template).map_err(SurfaceError::from)
    }
}

impl ViewSurface for DomSurface {
    fn clear_activities(&mut self) -> Result<(), SurfaceError> {
        self.activities_list.set_inner_html("");
        self.cards.clear();
        Ok(())
    }

    fn show_activities_message(&mut self, message: &Template) -> Result<(), SurfaceError> {
        self.clear_activities()?;
        let node = self.build(message)?;
        self.activities_list.append_child(&node).map_err(dom)?;
        Ok(())
    }

    fn reset_activity_options(&mut self, placeholder: &Template) -> Result<(), SurfaceError> {
        self.activity_select.set_inner_html("");
        self.append_activity_option(placeholder)
    }

    fn append_activity_option(&mut self, option: &Template) -> Result<(), SurfaceError> {
        let node = self.build(option)?;
        self.activity_select.append_child(&node).map_err(dom)?;
        Ok(())
    }

    fn mount_card(&mut self, card: CardId, node: &Template) -> Result<(), SurfaceError> {
        let element = self.build(node)?;
        self.activities_list.append_child(&element).map_err(dom)?;
        self.cards.insert(card, element);
        Ok(())
    }

    fn append_participant(
        &mut self,
        card: CardId,
        _entry: EntryId,
        node: &Template,
    ) -> Result<(), SurfaceError> {
        let list = self.part(card, classes::PARTICIPANTS_LIST)?;
        let child = self.build(node)?;
        list.append_child(&child).map_err(dom)?;
        Ok(())
    }

    fn remove_participant(&mut self, card: CardId, entry: EntryId) -> Result<(), SurfaceError> {
        let selector = format!(
            ".{}[{}=\"{}\"]",
            classes::PARTICIPANT_ITEM,
            attrs::ENTRY_ID,
            entry
        );
        self.card(card)?
            .query_selector(&selector)
            .map_err(dom)?
            .ok_or(SurfaceError::UnknownEntry(entry))?
            .remove();
        Ok(())
    }

    fn insert_placeholder(&mut self, card: CardId, node: &Template) -> Result<(), SurfaceError> {
        let list = self.part(card, classes::PARTICIPANTS_LIST)?;
        let child = self.build(node)?;
        list.append_child(&child).map_err(dom)?;
        Ok(())
    }

    fn remove_placeholder(&mut self, card: CardId) -> Result<(), SurfaceError> {
        if let Some(placeholder) = self
            .card(card)?
            .query_selector(&format!(".{}", classes::NO_PARTICIPANTS))
            .map_err(dom)?
        {
            placeholder.remove();
        }
        Ok(())
    }

    fn set_participant_heading(&mut self, card: CardId, text: &str) -> Result<(), SurfaceError> {
        self.part(card, classes::PARTICIPANTS_HEADING)?
            .set_text_content(Some(text));
        Ok(())
    }

    fn set_spots_left(&mut self, card: CardId, text: &str) -> Result<(), SurfaceError> {
        self.part(card, classes::SPOTS_LEFT)?
            .set_text_content(Some(text));
        Ok(())
    }

    fn set_submit_enabled(&mut self, enabled: bool) -> Result<(), SurfaceError> {
        let Some(control) = &self.submit_control else {
            return Ok(());
        };
        if enabled {
            control.remove_attribute("disabled").map_err(dom)
        } else {
            control.set_attribute("disabled", "").map_err(dom)
        }
    }
}

impl NoticeSurface for DomSurface {
    fn show_notice(&mut self, text: &str, severity: Severity) {
        self.notice
            .set_class_name(&format!("message {}", severity.class_name()));
        self.notice.set_text_content(Some(text));
        if let Err(err) = self.notice.class_list().remove_1(HIDDEN) {
            tracing::error!(error = %WebError::from(err), "failed to show notice");
        }
    }

    fn hide_notice(&mut self) {
        if let Err(err) = self.notice.class_list().add_1(HIDDEN) {
            tracing::error!(error = %WebError::from(err), "failed to hide notice");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activities_app::{ActivityDirectory, ActivityRenderer, Board, Messages};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const PAGE: &str = r#"
        <div id="activities-list"><p>Loading activities...</p></div>
        <form id="signup-form">
          <input type="email" id="email" />
          <select id="activity"></select>
          <button type="submit">Sign Up</button>
        </form>
        <div id="message" class="hidden"></div>
    "#;

    fn page() -> Document {
        let document = web_sys::window().unwrap().document().unwrap();
        document.body().unwrap().set_inner_html(PAGE);
        document
    }

    fn rendered(body: &str) -> (Document, DomSurface, Board) {
        let document = page();
        let mut surface = DomSurface::attach(document.clone(), &DomConfig::default()).unwrap();
        let mut board = Board::new();
        let directory = ActivityDirectory::from_json(body).unwrap();
        ActivityRenderer::new(Messages::default())
            .render(&mut surface, &mut board, &directory)
            .unwrap();
        (document, surface, board)
    }

    #[wasm_bindgen_test]
    fn test_hostile_email_becomes_text() {
        let (document, _surface, _board) = rendered(
            r#"{"Chess Club": {"description": "d", "schedule": "s", "max_participants": 10,
                "participants": ["<img src=x onerror=alert(1)>@x.com"]}}"#,
        );

        let list = document.get_element_by_id("activities-list").unwrap();
        assert!(list.query_selector("img").unwrap().is_none());
        let email = list.query_selector(".participant-email").unwrap().unwrap();
        assert_eq!(
            email.text_content().unwrap(),
            "<img src=x onerror=alert(1)>@x.com"
        );
        assert_eq!(list.query_selector(".spots-left").unwrap().unwrap().text_content().unwrap(), "9");
    }

    #[wasm_bindgen_test]
    fn test_remove_restores_placeholder() {
        let (document, mut surface, mut board) = rendered(
            r#"{"Chess Club": {"description": "d", "schedule": "s", "max_participants": 10,
                "participants": ["a@x.com"]}}"#,
        );
        let entry = board.cards().next().unwrap().entries()[0].id;

        activities_app::ParticipantListManager::new(ActivityRenderer::new(Messages::default()))
            .remove_participant(&mut surface, &mut board, entry)
            .unwrap();

        let list = document.get_element_by_id("activities-list").unwrap();
        assert!(list.query_selector(".participant-item").unwrap().is_none());
        assert!(list.query_selector(".no-participants").unwrap().is_some());
        assert_eq!(
            list.query_selector(".participants-heading").unwrap().unwrap().text_content().unwrap(),
            "Participants (0)"
        );
    }

    #[wasm_bindgen_test]
    fn test_notice_classes() {
        let document = page();
        let mut surface = DomSurface::attach(document.clone(), &DomConfig::default()).unwrap();
        let notice = document.get_element_by_id("message").unwrap();

        surface.show_notice("Signed up!", Severity::Success);
        assert_eq!(notice.class_name(), "message success");
        assert_eq!(notice.text_content().unwrap(), "Signed up!");

        surface.hide_notice();
        assert!(notice.class_list().contains("hidden"));
    }

    #[wasm_bindgen_test]
    fn test_submit_control_toggles() {
        let document = page();
        let mut surface = DomSurface::attach(document.clone(), &DomConfig::default()).unwrap();
        let button = document.query_selector("button").unwrap().unwrap();

        surface.set_submit_enabled(false).unwrap();
        assert!(button.has_attribute("disabled"));
        surface.set_submit_enabled(true).unwrap();
        assert!(!button.has_attribute("disabled"));
    }

    #[wasm_bindgen_test]
    fn test_missing_element_is_reported() {
        let document = page();
        let config = DomConfig {
            message: "nope".into(),
            ..DomConfig::default()
        };
        assert!(matches!(
            DomSurface::attach(document, &config),
            Err(WebError::MissingElement(id)) if id == "nope"
        ));
    }
}
