//! src/main.rs
//! Grid file browser: render, read one key, dispatch, repeat.

use std::env;

use anyhow::{Context, Result};
use crossterm::event::{self, Event as TerminalEvent, KeyEventKind};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use gfm_core::{
    Logger,
    config::Config,
    controller::ActionDispatcher,
    host::{Host, SystemHost, start_directory},
    model::{BrowserState, Viewport},
    terminal::{TerminalSession, install_panic_hook},
    view::ui::UIRenderer,
};

fn main() -> Result<()> {
    install_panic_hook();

    let app = App::new().context("Failed to initialize application")?;
    app.run().context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    session: TerminalSession,
    state: BrowserState,
    dispatcher: ActionDispatcher,
    ui_renderer: UIRenderer,
    // Declared last: dropped after the session so its cleanup is still logged.
    _log_guard: Option<WorkerGuard>,
}

impl App {
    fn new() -> Result<Self> {
        let (config, config_error) = match Config::load() {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        };

        let log_guard = match Logger::init_tracing(&config.logging) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("gfm: logging disabled: {e:#}");
                None
            }
        };
        info!("Starting grid file browser");
        if let Some(e) = config_error {
            warn!("Failed to load config, using defaults: {:#}", e);
        }

        let cwd = env::current_dir().context("Failed to get current directory")?;
        let start_dir = start_directory(env::var_os("PWD").as_deref(), &cwd)?;
        info!("Initial directory: {}", start_dir.display());

        let mut session = TerminalSession::enter().context("Failed to initialize terminal")?;
        // Commands and relative paths resolve against the directory on screen.
        SystemHost::new(&mut session)
            .enter_directory(&start_dir)
            .context("Failed to enter start directory")?;
        let viewport = TerminalSession::viewport().context("Failed to query terminal size")?;

        let state = BrowserState::open(start_dir, viewport);
        let dispatcher = ActionDispatcher::new(&config);

        Ok(Self {
            session,
            state,
            dispatcher,
            ui_renderer: UIRenderer::new(),
            _log_guard: log_guard,
        })
    }

    fn run(mut self) -> Result<()> {
        info!("Starting event loop");

        while !self.state.is_terminated() {
            let Self {
                session,
                state,
                dispatcher,
                ui_renderer,
                ..
            } = &mut self;
            // A suspended program may have left the terminal at another size.
            state.sync_viewport(
                TerminalSession::viewport().context("Failed to query terminal size")?,
            );
            session
                .draw(|frame| ui_renderer.render(frame, state, dispatcher.mode()))
                .context("Failed to draw terminal")?;

            match event::read().context("Failed to read terminal event")? {
                TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    let mut host = SystemHost::new(session);
                    dispatcher.handle_key(key, state, &mut host);
                }
                TerminalEvent::Resize(columns, rows) => {
                    debug!("Terminal resized to {}x{}", columns, rows);
                    state.sync_viewport(Viewport::from_terminal(columns, rows));
                }
                _ => {}
            }
        }

        let stats = self.ui_renderer.stats();
        info!(
            "Event loop terminated: {} frames, {} slow, {:?} average",
            stats.frames,
            stats.slow,
            stats.average()
        );
        Ok(())
    }
}
