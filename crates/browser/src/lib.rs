//! Browser crate for the Holocron character browser.
//!
//! This crate contains the orchestrator behind the character list view,
//! along with the session gate in front of it, runtime configuration, and
//! the presentation helpers the list and detail views render with.

pub mod browser;
pub mod config;
pub mod session;
pub mod view;

pub use browser::{CharacterBrowser, LOAD_FAILED_MESSAGE, LoadState};
pub use config::BrowserConfig;
pub use session::{Session, SessionError, SessionGate, SessionHandle, SessionStore};
pub use view::{CharacterCard, CharacterDetail, PaletteColor, film_count_label, portrait_url, species_color};
