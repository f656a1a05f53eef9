//! # App Controller
//!
//! Owns the board, the notifier and the backend client, and turns UI events
//! into mutations and patches.
//!
//! ```text
//! Submit → validate → [in-flight guard] → signup → patch card → notice
//! Remove → locate entry → [in-flight guard] → unregister → patch card → notice
//! ```
//!
//! A mutation the server accepted but the page could not show ends as
//! [`Outcome::Failed`] with [`AppError::Presentation`] and an error notice
//! asking for a reload, never as a success.
//!
//! The controller is driven through [`UiEvent`]s so it runs without a browser.
//! The browser shell owns the actual listeners and forwards events here.
//! After [`AppController::teardown`] every event is ignored, and responses that
//! arrive for requests started before teardown are dropped without patching.
//!
//! Surface and board borrows never span an `.await`.

use crate::board::Board;
use crate::client::MutationClient;
use crate::config::AppConfig;
use crate::effects::{HttpEffects, TimerEffects};
use crate::errors::{AppError, MutationError};
use crate::notifier::Notifier;
use crate::participants::ParticipantListManager;
use crate::render::ActivityRenderer;
use crate::surface::{EntryId, NoticeSurface, SurfaceError, ViewSurface};
use std::cell::{Cell, Ref, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

/// Values read from the signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    /// Email input value.
    pub email: String,
    /// Selected activity (option value).
    pub activity: String,
}

impl SignupForm {
    /// Create a form snapshot.
    pub fn new(email: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            activity: activity.into(),
        }
    }
}

/// Events the browser shell forwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The signup form was submitted.
    Submit(SignupForm),
    /// A participant's remove control was clicked.
    RemoveParticipant(EntryId),
}

/// Signup form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// No signup pending.
    Idle,
    /// At least one signup request is pending.
    Submitting,
}

/// Why an event did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The controller was torn down.
    TornDown,
    /// The same signup (activity and email) or entry removal is already pending.
    AlreadyInFlight,
    /// The entry is no longer on the board.
    UnknownEntry,
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation succeeded and the card was patched.
    Applied,
    /// The mutation, validation or card patch failed; an error notice is
    /// showing.
    Failed(AppError),
    /// Nothing happened.
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum InFlightKey {
    Signup { activity: String, email: String },
    Unregister(EntryId),
}

/// The board's single controller.
pub struct AppController<S, H, T> {
    config: AppConfig,
    surface: Rc<RefCell<S>>,
    client: MutationClient<H>,
    notifier: Notifier<S, T>,
    renderer: ActivityRenderer,
    participants: ParticipantListManager,
    board: RefCell<Board>,
    in_flight: RefCell<HashSet<InFlightKey>>,
    pending_signups: Cell<usize>,
    active: Cell<bool>,
}

impl<S, H, T> AppController<S, H, T>
where
    S: ViewSurface + NoticeSurface + 'static,
    H: HttpEffects,
    T: TimerEffects,
{
    /// Build the controller. Nothing is rendered until [`Self::init`].
    pub fn new(config: AppConfig, surface: Rc<RefCell<S>>, http: H, timer: T) -> Self {
        let renderer = ActivityRenderer::new(config.messages.clone());
        Self {
            client: MutationClient::new(http, &config),
            notifier: Notifier::new(surface.clone(), timer, config.notice_hide_delay()),
            participants: ParticipantListManager::new(renderer.clone()),
            renderer,
            surface,
            config,
            board: RefCell::new(Board::new()),
            in_flight: RefCell::new(HashSet::new()),
            pending_signups: Cell::new(0),
            active: Cell::new(true),
        }
    }

    /// Reset the selector, fetch the directory and render it.
    ///
    /// On failure the static load-failure message is rendered and the error
    /// is returned for logging; the board stays interactive. The submit
    /// control starts out enabled whatever an earlier controller left behind.
    pub async fn init(&self) -> Result<(), AppError> {
        if !self.active.get() {
            return Ok(());
        }
        self.enable_submit_control();
        // Logged by `patch`; a successful render resets the options again.
        let _ = self.patch("reset activity options", |surface, _| {
            self.renderer.reset_options(surface)
        });

        let fetched = self.client.fetch_directory().await;
        if !self.active.get() {
            return Ok(());
        }

        match fetched {
            Ok(directory) => {
                self.patch("render directory", |surface, board| {
                    self.renderer.render(surface, board, &directory)
                })?;
                tracing::info!(activities = directory.len(), "activities loaded");
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, "error fetching activities");
                let _ = self.patch("render load failure", |surface, board| {
                    self.renderer.render_failure(surface, board)
                });
                Err(error)
            }
        }
    }

    /// Handle one UI event.
    pub async fn dispatch(&self, event: UiEvent) -> Outcome {
        match event {
            UiEvent::Submit(form) => self.submit(form).await,
            UiEvent::RemoveParticipant(entry) => self.remove(entry).await,
        }
    }

    /// Validate and submit a signup, then patch the matching card.
    pub async fn submit(&self, form: SignupForm) -> Outcome {
        if !self.active.get() {
            return Outcome::Ignored(IgnoreReason::TornDown);
        }

        let email = form.email.trim();
        let activity = form.activity.as_str();
        if email.is_empty() || activity.is_empty() {
            let error = AppError::validation(self.config.messages.missing_input.as_str());
            tracing::warn!(%error, "signup rejected before sending");
            self.notify_error(&error, "");
            return Outcome::Failed(error);
        }

        let key = InFlightKey::Signup {
            activity: activity.to_string(),
            email: email.to_string(),
        };
        if !self.begin(&key) {
            tracing::warn!(activity, email, "signup already in flight, ignoring");
            return Outcome::Ignored(IgnoreReason::AlreadyInFlight);
        }
        self.pending_signups.set(self.pending_signups.get() + 1);
        self.sync_submit_control();
        self.notifier.info(&self.config.messages.signing_up);

        let result = self.client.signup(activity, email).await;

        self.finish(&key);
        self.pending_signups
            .set(self.pending_signups.get().saturating_sub(1));
        if !self.active.get() {
            return Outcome::Ignored(IgnoreReason::TornDown);
        }
        self.sync_submit_control();

        match result {
            Ok(message) => {
                let card = self
                    .board
                    .borrow()
                    .card_for_activity(activity)
                    .map(|c| c.id());
                match card {
                    Some(card) => {
                        let patched = self.patch("add participant", |surface, board| {
                            self.participants
                                .add_participant(surface, board, card, email)
                        });
                        if let Err(error) = patched {
                            return self.page_out_of_date(error);
                        }
                    }
                    None => tracing::warn!(activity, "signed up for an activity with no card"),
                }
                self.notifier.success(&message);
                tracing::info!(activity, email, "signed up");
                Outcome::Applied
            }
            Err(error) => self.fail(error, &self.config.messages.signup_failed),
        }
    }

    /// Unregister the participant behind `entry`, then patch its card.
    pub async fn remove(&self, entry: EntryId) -> Outcome {
        if !self.active.get() {
            return Outcome::Ignored(IgnoreReason::TornDown);
        }

        let located = self
            .board
            .borrow()
            .locate_entry(entry)
            .map(|(card, item)| (card.activity().to_string(), item.email.clone()));
        let Some((activity, email)) = located else {
            tracing::warn!(%entry, "remove clicked for unknown entry");
            return Outcome::Ignored(IgnoreReason::UnknownEntry);
        };

        let key = InFlightKey::Unregister(entry);
        if !self.begin(&key) {
            tracing::warn!(%entry, "unregister already in flight, ignoring");
            return Outcome::Ignored(IgnoreReason::AlreadyInFlight);
        }

        let result = self.client.unregister(&activity, &email).await;

        self.finish(&key);
        if !self.active.get() {
            return Outcome::Ignored(IgnoreReason::TornDown);
        }

        match result {
            Ok(message) => {
                let patched = self.patch("remove participant", |surface, board| {
                    self.participants.remove_participant(surface, board, entry)
                });
                if let Err(error) = patched {
                    return self.page_out_of_date(error);
                }
                self.notifier.success(&message);
                tracing::info!(%activity, %email, "unregistered");
                Outcome::Applied
            }
            Err(error) => self.fail(error, &self.config.messages.unregister_failed),
        }
    }

    /// Stop handling events. Idempotent.
    ///
    /// Pending requests are abandoned, so the submit control is handed back
    /// enabled.
    pub fn teardown(&self) {
        if self.active.replace(false) {
            self.in_flight.borrow_mut().clear();
            self.pending_signups.set(0);
            self.enable_submit_control();
            tracing::debug!("controller torn down");
        }
    }

    /// Whether events are still handled.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Current form state.
    pub fn form_state(&self) -> FormState {
        if self.pending_signups.get() > 0 {
            FormState::Submitting
        } else {
            FormState::Idle
        }
    }

    /// Card view-models of the current render.
    pub fn board(&self) -> Ref<'_, Board> {
        self.board.borrow()
    }

    /// Active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared surface.
    pub fn surface(&self) -> &Rc<RefCell<S>> {
        &self.surface
    }

    /// Backend client.
    pub fn client(&self) -> &MutationClient<H> {
        &self.client
    }

    fn begin(&self, key: &InFlightKey) -> bool {
        if !self.config.guard_in_flight {
            return true;
        }
        self.in_flight.borrow_mut().insert(key.clone())
    }

    fn finish(&self, key: &InFlightKey) {
        self.in_flight.borrow_mut().remove(key);
    }

    fn sync_submit_control(&self) {
        if !self.config.guard_in_flight {
            return;
        }
        let enabled = self.pending_signups.get() == 0;
        if let Err(error) = self.surface.borrow_mut().set_submit_enabled(enabled) {
            tracing::error!(%error, "failed to toggle submit control");
        }
    }

    fn enable_submit_control(&self) {
        if let Err(error) = self.surface.borrow_mut().set_submit_enabled(true) {
            tracing::error!(%error, "failed to enable submit control");
        }
    }

    fn fail(&self, error: MutationError, fallback: &str) -> Outcome {
        tracing::error!(%error, category = %error.category(), "mutation failed");
        self.notify_error(error.cause(), fallback);
        Outcome::Failed(error.cause().clone())
    }

    fn page_out_of_date(&self, error: AppError) -> Outcome {
        self.notify_error(&error, &self.config.messages.page_out_of_date);
        Outcome::Failed(error)
    }

    fn notify_error(&self, error: &AppError, fallback: &str) {
        self.notifier
            .show(&error.user_message(fallback), error.category().severity());
    }

    /// Apply a card patch. Surface failures are logged and returned as
    /// [`AppError::Presentation`].
    fn patch<R>(
        &self,
        what: &'static str,
        apply: impl FnOnce(&mut S, &mut Board) -> Result<R, SurfaceError>,
    ) -> Result<R, AppError> {
        let mut surface = self.surface.borrow_mut();
        let mut board = self.board.borrow_mut();
        apply(&mut *surface, &mut *board).map_err(|error| {
            tracing::error!(%error, what, "surface patch failed");
            AppError::from(error)
        })
    }
}
