//! src/controller/dispatcher.rs
//! ============================================================================
//! # `ActionDispatcher`: keystroke state machine
//!
//! Browse mode resolves each key through the [`KeyMap`] and applies exactly
//! one [`Action`]. Search mode feeds keys to the active
//! [`IncrementalSearch`]; the manual overlay is closed by any key.
//!
//! Failures of a single keystroke are logged here and go no further. After
//! every key the cursor is clamped and the page recomputed.

use crossterm::event::KeyEvent;
use std::path::Path;
use tracing::{debug, trace, warn};

use crate::{
    config::{CommandConfig, Config},
    controller::{
        actions::Action,
        handlers::KeyMap,
        search::{IncrementalSearch, SearchStep},
    },
    error::AppError,
    fs::dir_reader::PARENT_DIR,
    host::Host,
    model::browser_state::BrowserState,
    operators::templates::ExternalAction,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Browse,

    Search(IncrementalSearch),

    /// Help overlay shown until the next key.
    Manual,
}

impl InputMode {
    /// Active search query, for the status line.
    pub fn search_query(&self) -> Option<&str> {
        match self {
            InputMode::Search(search) => Some(search.query()),
            _ => None,
        }
    }
}

pub struct ActionDispatcher {
    keymap: KeyMap,
    mode: InputMode,
    commands: CommandConfig,
    pause_after_command: bool,
}

impl ActionDispatcher {
    pub fn new(config: &Config) -> Self {
        Self {
            keymap: KeyMap::new(),
            mode: InputMode::Browse,
            commands: config.commands.clone(),
            pause_after_command: config.pause_after_command,
        }
    }

    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &mut BrowserState, host: &mut dyn Host) {
        match self.mode {
            InputMode::Manual => {
                debug!("Manual dismissed by {:?}", key.code);
                self.mode = InputMode::Browse;
            }
            InputMode::Search(ref mut search) => {
                if search.handle_key(&key, state) == SearchStep::Finished {
                    self.mode = InputMode::Browse;
                }
            }
            InputMode::Browse => match self.keymap.resolve(key) {
                Some(action) => self.dispatch(action, state, host),
                None => debug!("Unbound key {:?}", key),
            },
        }

        state.clamp_and_repaginate();
    }

    /// Applies `action`, logging instead of returning any failure.
    pub fn dispatch(&mut self, action: Action, state: &mut BrowserState, host: &mut dyn Host) {
        if action.is_navigation() {
            trace!(?action, cursor = state.cursor(), "Dispatching action");
        } else {
            debug!(?action, cursor = state.cursor(), "Dispatching action");
        }

        match self.apply(action, state, host) {
            Ok(()) => {}
            Err(e) if e.is_spawn_failure() => warn!("{:?}: nothing was run: {}", action, e),
            Err(e) => warn!("{:?} failed: {}", action, e),
        }
    }

    fn apply(
        &mut self,
        action: Action,
        state: &mut BrowserState,
        host: &mut dyn Host,
    ) -> Result<(), AppError> {
        match action {
            Action::Quit => state.terminate(),

            Action::MoveSelectionDown => state.move_down(),
            Action::MoveSelectionUp => state.move_up(),
            Action::MoveColumnLeft => state.move_left(),
            Action::MoveColumnRight => state.move_right(),

            Action::ReloadDirectory => {
                state.reload();
            }
            Action::StartSearch => self.mode = InputMode::Search(IncrementalSearch::new()),
            Action::ShowManual => self.mode = InputMode::Manual,

            Action::ActivateEntry => self.activate(state, host)?,

            Action::GoHome => {
                let home = host
                    .home_dir()
                    .ok_or_else(|| AppError::Other("home directory is unknown".into()))?;
                change_directory(state, host, &home, None)?;
            }

            Action::GoToParent => {
                let restore = state
                    .path()
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned());
                let target = state.path().join(PARENT_DIR);
                change_directory(state, host, &target, restore.as_deref())?;
            }

            Action::VirtualDirectory => {
                let prompt = format!("{} > ", state.path().display());
                if let Some(output) = host.read_virtual(&prompt)? {
                    state.apply_virtual(output.command, output.lines);
                }
            }

            Action::Delete => self.run_external(ExternalAction::Delete, state, host)?,
            Action::Copy => self.run_external(ExternalAction::Copy, state, host)?,
            Action::Move => self.run_external(ExternalAction::Move, state, host)?,
            Action::CreateFile => self.run_external(ExternalAction::Create, state, host)?,
            Action::Execute => self.run_external(ExternalAction::Execute, state, host)?,
            Action::Edit => self.run_external(ExternalAction::Edit, state, host)?,
            Action::RunShell => self.run_external(ExternalAction::Shell, state, host)?,
        }
        Ok(())
    }

    /// Enters the directory under the cursor, or opens the file.
    fn activate(&self, state: &mut BrowserState, host: &mut dyn Host) -> Result<(), AppError> {
        let cursor = state.cursor();
        if state.is_directory(cursor) {
            let Some(target) = state.entry_path(cursor) else {
                return Ok(());
            };
            change_directory(state, host, &target, None)
        } else {
            self.run_external(ExternalAction::Open, state, host)
        }
    }

    /// Runs the template for `action` on the current entry, then reloads
    /// whatever the command did to the directory.
    fn run_external(
        &self,
        action: ExternalAction,
        state: &mut BrowserState,
        host: &mut dyn Host,
    ) -> Result<(), AppError> {
        let entry = state.current_entry().unwrap_or_default();
        let command_line = action.command_line(&self.commands, entry);
        let pause = self.pause_after_command && action.pauses();

        debug!(action = action.name(), pause, "External command");
        let result = host.run_interactive(&command_line, pause);
        state.reload();
        result
    }
}

fn change_directory(
    state: &mut BrowserState,
    host: &mut dyn Host,
    target: &Path,
    restore: Option<&str>,
) -> Result<(), AppError> {
    state.change_directory(target, restore)?;
    host.enter_directory(state.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        controller::handlers::{backspace_key, ctrl, enter_key, key},
        fs::dir_reader::NO_FILES,
        host::VirtualOutput,
        model::{browser_state::Listing, layout::Viewport},
    };
    use compact_str::CompactString;
    use std::{
        fs, io,
        path::PathBuf,
    };
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingHost {
        entered: Vec<PathBuf>,
        commands: Vec<(String, bool)>,
        prompts: Vec<String>,
        home: Option<PathBuf>,
        virtual_output: Option<VirtualOutput>,
        spawn_fails: bool,
    }

    impl Host for RecordingHost {
        fn enter_directory(&mut self, path: &Path) -> Result<(), AppError> {
            self.entered.push(path.to_path_buf());
            Ok(())
        }

        fn home_dir(&self) -> Option<PathBuf> {
            self.home.clone()
        }

        fn read_virtual(&mut self, prompt: &str) -> Result<Option<VirtualOutput>, AppError> {
            self.prompts.push(prompt.to_string());
            if self.spawn_fails {
                return Err(AppError::spawn_failed(
                    "missing-tool",
                    io::Error::from(io::ErrorKind::NotFound),
                ));
            }
            Ok(self.virtual_output.take())
        }

        fn run_interactive(&mut self, command_line: &str, pause: bool) -> Result<(), AppError> {
            self.commands.push((command_line.to_string(), pause));
            Ok(())
        }
    }

    struct Fixture {
        _dir: TempDir,
        root: PathBuf,
        state: BrowserState,
        dispatcher: ActionDispatcher,
        host: RecordingHost,
    }

    impl Fixture {
        /// `root` holds `alpha/`, `beta/`, and `notes.txt`.
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let root = fs::canonicalize(dir.path()).unwrap();
            fs::create_dir(root.join("alpha")).unwrap();
            fs::create_dir(root.join("beta")).unwrap();
            fs::write(root.join("notes.txt"), "hi").unwrap();

            Self {
                state: BrowserState::open(root.clone(), Viewport::new(90, 20)),
                dispatcher: ActionDispatcher::new(&Config::default()),
                host: RecordingHost::default(),
                _dir: dir,
                root,
            }
        }

        fn press(&mut self, event: KeyEvent) {
            self.dispatcher
                .handle_key(event, &mut self.state, &mut self.host);
        }

        fn select(&mut self, name: &str) {
            let index = self.state.position_of(name).unwrap();
            self.state.set_cursor(index);
        }
    }

    fn names(state: &BrowserState) -> Vec<&str> {
        state.entries().iter().map(CompactString::as_str).collect()
    }

    #[test]
    fn test_quit_terminates() {
        let mut fx = Fixture::new();
        fx.press(key('q'));
        assert!(fx.state.is_terminated());
    }

    #[test]
    fn test_enter_descends_into_directory() {
        let mut fx = Fixture::new();
        fs::write(fx.root.join("alpha/inner.txt"), "").unwrap();
        fx.select("alpha");

        fx.press(enter_key());

        assert_eq!(fx.state.path(), fx.root.join("alpha"));
        assert_eq!(fx.state.cursor(), 0);
        assert_eq!(names(&fx.state), [".", "..", "inner.txt"]);
        assert_eq!(fx.host.entered, [fx.root.join("alpha")]);
    }

    #[test]
    fn test_line_feed_activates_like_enter() {
        let mut fx = Fixture::new();
        fx.select("alpha");

        fx.press(ctrl('j'));

        assert_eq!(fx.state.path(), fx.root.join("alpha"));
        assert_eq!(fx.host.entered, [fx.root.join("alpha")]);
    }

    #[test]
    fn test_parent_restores_cursor_on_left_directory() {
        let mut fx = Fixture::new();
        fx.select("beta");
        fx.press(enter_key());

        fx.press(backspace_key());

        assert_eq!(fx.state.path(), fx.root);
        assert_eq!(fx.state.current_entry(), Some("beta"));
    }

    #[test]
    fn test_home_changes_to_host_home() {
        let mut fx = Fixture::new();
        fx.host.home = Some(fx.root.join("beta"));

        fx.press(key('~'));

        assert_eq!(fx.state.path(), fx.root.join("beta"));
    }

    #[test]
    fn test_missing_target_leaves_state_untouched() {
        let mut fx = Fixture::new();
        fx.host.home = Some(fx.root.join("missing"));
        fx.select("beta");
        let before = names(&fx.state).join(",");

        fx.press(key('~'));

        assert_eq!(fx.state.path(), fx.root);
        assert_eq!(names(&fx.state).join(","), before);
        assert_eq!(fx.state.current_entry(), Some("beta"));
        assert!(fx.host.entered.is_empty());
    }

    #[test]
    fn test_enter_on_file_opens_it_and_pauses() {
        let mut fx = Fixture::new();
        fx.select("notes.txt");

        fx.press(enter_key());

        let (command, pause) = &fx.host.commands[0];
        assert!(command.contains("notes.txt"));
        assert!(command.starts_with("printf 'open"));
        assert!(*pause);
        assert_eq!(fx.state.path(), fx.root);
    }

    #[test]
    fn test_delete_runs_template_and_reloads() {
        let mut fx = Fixture::new();
        fx.select("notes.txt");
        // Stands in for what the command would have done.
        fs::remove_file(fx.root.join("notes.txt")).unwrap();

        fx.press(key('d'));

        assert_eq!(fx.host.commands, [("rm -ri -- notes.txt".to_string(), true)]);
        assert_eq!(names(&fx.state), [".", "..", "alpha", "beta"]);
        assert!(fx.state.cursor() < fx.state.entries().len());
    }

    #[test]
    fn test_create_and_edit_do_not_pause() {
        let mut fx = Fixture::new();
        fx.select("notes.txt");

        fx.press(key('n'));
        fx.press(key('e'));

        assert!(fx.host.commands.iter().all(|(_, pause)| !pause));
        assert_eq!(fx.host.commands[1].0, "${EDITOR:-vi} notes.txt");
    }

    #[test]
    fn test_pause_can_be_disabled() {
        let mut fx = Fixture::new();
        let config = Config {
            pause_after_command: false,
            ..Config::default()
        };
        fx.dispatcher = ActionDispatcher::new(&config);

        fx.press(key(':'));

        assert_eq!(fx.host.commands, [("${SHELL:-sh}".to_string(), false)]);
    }

    #[test]
    fn test_virtual_directory_lists_command_output() {
        let mut fx = Fixture::new();
        fx.host.virtual_output = Some(VirtualOutput {
            command: "find . -name '*.txt'".into(),
            lines: vec!["y.txt".into(), "x.txt".into()],
        });

        fx.press(key('*'));

        assert_eq!(fx.host.prompts, [format!("{} > ", fx.root.display())]);
        assert_eq!(names(&fx.state), [".", "..", "x.txt", "y.txt"]);
        assert_eq!(
            fx.state.listing(),
            &Listing::Virtual {
                command: "find . -name '*.txt'".into()
            }
        );
        assert_eq!(fx.state.path(), fx.root);
    }

    #[test]
    fn test_virtual_spawn_failure_keeps_entries() {
        let mut fx = Fixture::new();
        fx.host.spawn_fails = true;
        let before = names(&fx.state).join(",");

        fx.press(key('*'));

        assert_eq!(names(&fx.state).join(","), before);
        assert_eq!(fx.state.listing(), &Listing::Directory);
    }

    #[test]
    fn test_cancelled_prompt_is_a_no_op() {
        let mut fx = Fixture::new();
        let before = names(&fx.state).join(",");

        fx.press(key('*'));

        assert_eq!(names(&fx.state).join(","), before);
    }

    #[test]
    fn test_reload_leaves_virtual_mode() {
        let mut fx = Fixture::new();
        fx.host.virtual_output = Some(VirtualOutput {
            command: "true".into(),
            lines: Vec::new(),
        });
        fx.press(key('*'));

        fx.press(ctrl('l'));

        assert_eq!(fx.state.listing(), &Listing::Directory);
        assert!(names(&fx.state).contains(&"notes.txt"));
    }

    #[test]
    fn test_search_moves_cursor_and_consumes_terminator() {
        let mut fx = Fixture::new();

        fx.press(key('/'));
        fx.press(key('B'));
        assert_eq!(fx.dispatcher.mode().search_query(), Some("B"));
        assert_eq!(fx.state.current_entry(), Some("beta"));

        fx.press(enter_key());

        assert_eq!(fx.dispatcher.mode(), &InputMode::Browse);
        assert_eq!(fx.dispatcher.mode().search_query(), None);
        assert_eq!(fx.state.path(), fx.root);
        assert!(fx.host.entered.is_empty());
    }

    #[test]
    fn test_manual_is_dismissed_by_any_key() {
        let mut fx = Fixture::new();

        fx.press(key('?'));
        assert_eq!(fx.dispatcher.mode(), &InputMode::Manual);

        fx.press(key('q'));

        assert_eq!(fx.dispatcher.mode(), &InputMode::Browse);
        assert!(!fx.state.is_terminated());
    }

    #[test]
    fn test_unreadable_directory_shows_sentinel() {
        let mut fx = Fixture::new();
        fx.select("alpha");
        fx.press(enter_key());
        fs::remove_dir(fx.root.join("alpha")).unwrap();

        fx.press(ctrl('l'));

        assert_eq!(names(&fx.state), [NO_FILES]);
        assert_eq!(fx.state.cursor(), 0);
    }
}
