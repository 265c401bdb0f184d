// gfm-core/src/controller/search.rs
// Incremental search-by-typing cursor mover

use compact_str::CompactString;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use crate::model::browser_state::BrowserState;

/// Outcome of feeding one key to an active search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    /// Key was appended to the query; search stays active.
    Continue,

    /// Non-printable key: search is over and the key is consumed.
    Finished,
}

/// Query typed so far. A new session always starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncrementalSearch {
    query: String,
}

impl IncrementalSearch {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: String::with_capacity(32),
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Visible ASCII, space through tilde.
    #[must_use]
    pub const fn is_printable(c: char) -> bool {
        matches!(c, ' '..='~')
    }

    /// Printable character carried by `key`, if any. Shift is allowed since
    /// terminals report it for uppercase letters and symbols.
    #[must_use]
    pub fn printable_char(key: &KeyEvent) -> Option<char> {
        match key.code {
            KeyCode::Char(c)
                if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() && Self::is_printable(c) =>
            {
                Some(c)
            }
            _ => None,
        }
    }

    /// Feeds one key: printable keys extend the query and move the cursor
    /// to the first match, anything else ends the search.
    pub fn handle_key(&mut self, key: &KeyEvent, state: &mut BrowserState) -> SearchStep {
        match Self::printable_char(key) {
            Some(c) => {
                self.push(c, state);
                SearchStep::Continue
            }
            None => {
                debug!(query = self.query.as_str(), "Search finished");
                SearchStep::Finished
            }
        }
    }

    /// Appends `c` and relocates the cursor; returns the matched index.
    /// Without a match the cursor stays where it was.
    pub fn push(&mut self, c: char, state: &mut BrowserState) -> Option<usize> {
        self.query.push(c);

        let found = first_match(state.entries(), &self.query);
        trace!(query = self.query.as_str(), ?found, "Search keystroke");

        if let Some(index) = found {
            state.set_cursor(index);
        }
        found
    }
}

/// Index of the first entry containing `query`, ignoring ASCII case.
/// Always scans from the top so the result depends only on the query.
#[must_use]
pub fn first_match(entries: &[CompactString], query: &str) -> Option<usize> {
    let needle = query.to_ascii_lowercase();
    entries
        .iter()
        .position(|entry| entry.to_ascii_lowercase().contains(&needle))
}
