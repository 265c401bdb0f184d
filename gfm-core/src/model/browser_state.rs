//! ``src/model/browser_state.rs``
//! ============================================================================
//! # `BrowserState`: Directory Model plus Cursor/Page Controller
//!
//! The single mutable aggregate owned by the main loop. It holds the listed
//! path and its entries, the cursor and the page derived from it, and the
//! viewport the page arithmetic depends on.
//!
//! Invariants after every public method:
//! - `entries` is never empty (an unreadable directory shows `NO FILES`);
//! - `entries` is ordinal-sorted after every load;
//! - `cursor < entries.len()`;
//! - `page == layout().page_of(cursor)`, written only by
//!   [`BrowserState::clamp_and_repaginate`].

use compact_str::CompactString;
use std::{
    ffi::OsString,
    fs,
    path::{MAIN_SEPARATOR_STR, Path, PathBuf},
};
use tracing::{debug, info, trace};

use crate::{
    error::AppError,
    fs::dir_reader::{self, DirRead},
    model::layout::{GridLayout, Viewport},
};

/// Where the current entries came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Listing {
    #[default]
    Directory,

    /// Lines captured from `command`, run inside `path`.
    Virtual { command: String },
}

#[derive(Debug, Clone)]
pub struct BrowserState {
    /// Absolute directory being shown. Virtual listings keep the directory
    /// their command ran in so relative output lines still resolve.
    path: PathBuf,

    entries: Vec<CompactString>,

    cursor: usize,

    page: usize,

    viewport: Viewport,

    listing: Listing,

    terminated: bool,
}

impl BrowserState {
    /// Reads `path` and starts with the cursor on the first entry.
    #[must_use]
    pub fn open(path: PathBuf, viewport: Viewport) -> Self {
        let DirRead { entries, .. } = dir_reader::load_real(&path);
        Self::with_entries(path, entries, viewport)
    }

    /// Builds a state from already-known entries (sorted here).
    #[must_use]
    pub fn with_entries(path: PathBuf, entries: Vec<CompactString>, viewport: Viewport) -> Self {
        let mut state = Self {
            path,
            entries: Vec::new(),
            cursor: 0,
            page: 0,
            viewport,
            listing: Listing::Directory,
            terminated: false,
        };
        state.replace_entries(entries);
        state
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn entries(&self) -> &[CompactString] {
        &self.entries
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub const fn layout(&self) -> GridLayout {
        GridLayout::new(self.viewport)
    }

    #[must_use]
    pub const fn listing(&self) -> &Listing {
        &self.listing
    }

    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Ends the main loop after the current keystroke.
    pub const fn terminate(&mut self) {
        self.terminated = true;
    }

    /// Name under the cursor.
    #[must_use]
    pub fn current_entry(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(CompactString::as_str)
    }

    /// `path`, a separator, and the entry name, concatenated as-is.
    #[must_use]
    pub fn entry_path(&self, index: usize) -> Option<PathBuf> {
        let name = self.entries.get(index)?;
        let mut full: OsString = self.path.clone().into_os_string();
        full.push(MAIN_SEPARATOR_STR);
        full.push(name.as_str());
        Some(PathBuf::from(full))
    }

    /// Follows symlinks; anything that cannot be stat'ed is not a directory.
    #[must_use]
    pub fn is_directory(&self, index: usize) -> bool {
        self.entry_path(index)
            .and_then(|path| fs::metadata(path).ok())
            .is_some_and(|meta| meta.is_dir())
    }

    /// First index whose name equals `name` exactly.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.as_str() == name)
    }

    // ------------------------------------------------------------------
    // Cursor/Page controller
    // ------------------------------------------------------------------

    /// Clamps the cursor into `entries` and recomputes the page.
    pub fn clamp_and_repaginate(&mut self) {
        if self.cursor >= self.entries.len() {
            self.cursor = self.entries.len().saturating_sub(1);
        }
        self.page = self.layout().page_of(self.cursor);
        trace!(cursor = self.cursor, page = self.page, "repaginated");
    }

    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index;
        self.clamp_and_repaginate();
    }

    /// Adopts a new terminal size; the page is recomputed for it.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.clamp_and_repaginate();
    }

    /// Adopts the size the terminal reports right now. Returns true when it
    /// differed from the one the page was computed for.
    pub fn sync_viewport(&mut self, viewport: Viewport) -> bool {
        let changed = viewport != self.viewport;
        if changed {
            debug!(
                width = viewport.width(),
                height = viewport.height(),
                "Viewport changed"
            );
        }
        self.set_viewport(viewport);
        changed
    }

    pub fn move_down(&mut self) {
        self.set_cursor(self.cursor + 1);
    }

    pub fn move_up(&mut self) {
        self.set_cursor(self.cursor.saturating_sub(1));
    }

    /// Jumps one column right unless that would pass the last entry.
    pub fn move_right(&mut self) {
        let rows = self.layout().rows();
        if self.cursor + rows < self.entries.len() {
            self.cursor += rows;
        }
        self.clamp_and_repaginate();
    }

    /// Jumps one column left unless already in the first column.
    pub fn move_left(&mut self) {
        let rows = self.layout().rows();
        if self.cursor >= rows {
            self.cursor -= rows;
        }
        self.clamp_and_repaginate();
    }

    /// Puts the cursor on `name` if present, otherwise on the first entry.
    pub fn restore_cursor(&mut self, name: Option<&str>) {
        self.cursor = name.and_then(|name| self.position_of(name)).unwrap_or(0);
        self.clamp_and_repaginate();
    }

    // ------------------------------------------------------------------
    // Directory model
    // ------------------------------------------------------------------

    /// Re-reads `path` as a real directory, leaving any virtual listing.
    ///
    /// Returns false when the directory could not be opened; the entries are
    /// then the `NO FILES` sentinel and the cursor is back at 0.
    pub fn reload(&mut self) -> bool {
        let DirRead { entries, readable } = dir_reader::load_real(&self.path);
        self.listing = Listing::Directory;
        self.entries = entries;
        if !readable {
            self.cursor = 0;
        }
        self.clamp_and_repaginate();
        readable
    }

    /// Resolves `target`, lists it, and places the cursor on `restore` (or
    /// the first entry). A target that cannot be resolved leaves the state
    /// untouched.
    pub fn change_directory(
        &mut self,
        target: &Path,
        restore: Option<&str>,
    ) -> Result<(), AppError> {
        let resolved: PathBuf = fs::canonicalize(target)
            .map_err(|e| AppError::navigation_failed(target, e.to_string()))?;

        info!("Changing directory to {}", resolved.display());
        self.path = resolved;
        self.reload();
        self.restore_cursor(restore);
        Ok(())
    }

    /// Replaces the entries with the output of a virtual-directory command.
    pub fn apply_virtual(&mut self, command: String, lines: Vec<String>) {
        debug!(
            command = command.as_str(),
            lines = lines.len(),
            "Applying virtual listing"
        );
        self.entries = dir_reader::virtual_entries(lines);
        self.listing = Listing::Virtual { command };
        self.clamp_and_repaginate();
    }

    fn replace_entries(&mut self, mut entries: Vec<CompactString>) {
        if entries.is_empty() {
            entries.push(CompactString::const_new(dir_reader::NO_FILES));
        }
        dir_reader::sort_ordinal(&mut entries);
        self.entries = entries;
        self.clamp_and_repaginate();
    }
}
