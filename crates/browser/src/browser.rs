//! # Character Browser
//!
//! This module coordinates everything behind the character list view:
//! 1. Check the injected session
//! 2. Load the roster and the filter index in parallel, under the view's
//!    cancellation token
//! 3. Commit both, or record the fixed failure message
//! 4. Recompute the filtered list whenever the search text or a filter
//!    changes, resetting to page 1
//! 5. Serve the current page and the detail view
//!
//! A cancelled load returns `SourceError::Cancelled` and leaves every field
//! exactly as it was.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use catalog::{Character, FilterChoice, FilterSelection, ReferenceIndex};
use pipeline::{PageSlice, PageWindow, Pager, apply_filters, paginate, total_pages};
use sources::{RosterSource, SharedSource, SourceError, load_filter_index};

use crate::config::BrowserConfig;
use crate::session::SessionHandle;
use crate::view::{CharacterCard, CharacterDetail};

/// Shown when the character listing can't be fetched
pub const LOAD_FAILED_MESSAGE: &str = "Failed to fetch characters. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
    Failed,
}

/// State behind the character list view.
pub struct CharacterBrowser {
    roster: RosterSource,
    session: SessionHandle,
    page_size: usize,
    cancel: CancellationToken,

    state: LoadState,
    error: Option<&'static str>,
    characters: Vec<Character>,
    index: ReferenceIndex,

    search_text: String,
    selection: FilterSelection,
    filtered: Vec<Character>,
    pager: Pager,
    selected: Option<usize>,
}

impl CharacterBrowser {
    pub fn new(source: SharedSource, config: &BrowserConfig, session: SessionHandle) -> Self {
        Self {
            roster: RosterSource::new(source).with_max_concurrency(config.max_concurrency),
            session,
            page_size: config.page_size.max(1),
            cancel: CancellationToken::new(),
            state: LoadState::NotLoaded,
            error: None,
            characters: Vec::new(),
            index: ReferenceIndex::new(),
            search_text: String::new(),
            selection: FilterSelection::new(),
            filtered: Vec::new(),
            pager: Pager::default(),
            selected: None,
        }
    }

    /// Token bound to this view. Cancelling it aborts any load in flight
    /// and every later one.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Load every character and the filter options.
    ///
    /// A listing failure is not an error here: the browser ends up in
    /// `LoadState::Failed` with `LOAD_FAILED_MESSAGE` and an empty list.
    /// Errors are reserved for a missing session and cancellation.
    #[instrument(skip_all)]
    pub async fn load(&mut self) -> Result<LoadState> {
        if !self.session.is_authenticated() {
            bail!("Sign in before browsing characters");
        }

        let start = Instant::now();
        let fan_out = self.roster.fan_out(self.cancel.child_token());
        let (roster, index) = tokio::join!(
            self.roster.load(&fan_out),
            load_filter_index(Arc::clone(self.roster.source()), &fan_out),
        );

        if fan_out.is_cancelled() {
            warn!("Character load cancelled");
            return Err(SourceError::Cancelled.into());
        }

        match roster {
            Ok(characters) => {
                info!(
                    "Loaded {} characters in {:.2?}",
                    characters.len(),
                    start.elapsed()
                );
                self.characters = characters;
                self.index = index;
                self.state = LoadState::Loaded;
                self.error = None;
            }
            Err(err) if err.is_cancelled() => return Err(err.into()),
            Err(err) => {
                error!("Error fetching characters: {}", err);
                self.characters.clear();
                self.index = index;
                self.state = LoadState::Failed;
                self.error = Some(LOAD_FAILED_MESSAGE);
            }
        }

        self.recompute()?;
        Ok(self.state)
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// User-facing failure message, if the last load failed
    pub fn error(&self) -> Option<&str> {
        self.error
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Characters matching the current search text and filters
    pub fn filtered(&self) -> &[Character] {
        &self.filtered
    }

    pub fn set_search(&mut self, text: impl Into<String>) -> Result<()> {
        self.search_text = text.into();
        self.recompute()
    }

    pub fn set_selection(&mut self, selection: FilterSelection) -> Result<()> {
        self.selection = selection;
        self.recompute()
    }

    pub fn set_homeworld(&mut self, choice: FilterChoice) -> Result<()> {
        self.selection.homeworld = choice;
        self.recompute()
    }

    pub fn set_film(&mut self, choice: FilterChoice) -> Result<()> {
        self.selection.film = choice;
        self.recompute()
    }

    pub fn set_species(&mut self, choice: FilterChoice) -> Result<()> {
        self.selection.species = choice;
        self.recompute()
    }

    /// Reset all three filters, keeping the search text
    pub fn clear_filters(&mut self) -> Result<()> {
        self.set_selection(FilterSelection::new())
    }

    fn recompute(&mut self) -> Result<()> {
        self.filtered = apply_filters(
            &self.characters,
            &self.search_text,
            &self.selection,
            &self.index,
        )
        .context("Failed to apply filters")?;
        self.pager
            .reset(total_pages(self.filtered.len(), self.page_size));
        Ok(())
    }

    pub fn current_page(&self) -> usize {
        self.pager.page()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next()
    }

    pub fn previous_page(&mut self) -> bool {
        self.pager.previous()
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.pager.go_to(page)
    }

    /// The slice of filtered characters on the current page
    pub fn page(&self) -> PageSlice<'_, Character> {
        paginate(&self.filtered, self.pager.page(), self.page_size)
    }

    pub fn page_cards(&self) -> Vec<CharacterCard> {
        self.page().visible.iter().map(CharacterCard::from).collect()
    }

    pub fn page_window(&self) -> PageWindow {
        self.pager.window()
    }

    /// Open the detail view for a character, matched by URL or by name
    /// (case-insensitive).
    pub fn select(&mut self, key: &str) -> Option<CharacterDetail> {
        let wanted = key.trim();
        let lowered = wanted.to_lowercase();
        self.selected = self
            .characters
            .iter()
            .position(|c| c.url == wanted || c.name.to_lowercase() == lowered);
        self.detail()
    }

    pub fn detail(&self) -> Option<CharacterDetail> {
        self.selected
            .and_then(|slot| self.characters.get(slot))
            .map(CharacterDetail::from)
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }
}

impl Drop for CharacterBrowser {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
