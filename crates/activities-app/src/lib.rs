//! # Activities App
//!
//! Portable headless core of the activities signup board.
//!
//! The board lists activities fetched from the backend, lets a user sign up
//! for or unregister from one, and patches the affected card in place after
//! each mutation instead of re-fetching.
//!
//! ```text
//! AppController::init → MutationClient::fetch_directory → ActivityRenderer::render
//! UiEvent → AppController → MutationClient → ParticipantListManager | Notifier
//! ```
//!
//! The DOM, HTTP and timers are reached through [`ViewSurface`],
//! [`NoticeSurface`], [`HttpEffects`] and [`TimerEffects`]. The browser crate
//! implements them over `web-sys`; the testkit implements them in memory.

pub mod board;
pub mod client;
pub mod config;
pub mod controller;
pub mod effects;
pub mod errors;
pub mod escape;
pub mod model;
pub mod node;
pub mod notifier;
pub mod participants;
pub mod render;
pub mod surface;

pub use board::{Board, CardModel, ParticipantEntry};
pub use client::{extract_message, mutation_path, Mutation, MutationClient};
pub use config::{AppConfig, Messages};
pub use controller::{AppController, FormState, IgnoreReason, Outcome, SignupForm, UiEvent};
pub use effects::{HttpEffects, HttpError, HttpResponse, TimerEffects, TimerTask};
pub use errors::{AppError, ErrorCategory, MutationError};
pub use escape::escape_html;
pub use model::{ActivityDetails, ActivityDirectory};
pub use node::{Element, Node};
pub use notifier::{Notifier, Severity};
pub use participants::ParticipantListManager;
pub use render::{heading_text, ActivityRenderer};
pub use surface::{CardId, EntryId, NoticeSurface, SurfaceError, ViewSurface};
