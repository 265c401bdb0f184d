//! src/view/ui.rs
//! ============================================================
//! Frame renderer. Each frame takes a [`PageView`] snapshot
//! of the browser state and paints it: the grid above, the
//! status line on the last row, and the manual on top when
//! it is open.

use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use tracing::{trace, warn};

use crate::{
    controller::dispatcher::InputMode,
    model::browser_state::BrowserState,
    view::{
        components::{GridTable, HelpOverlay, StatusBar},
        page_view::PageView,
    },
};

#[derive(Debug, Default)]
pub struct RenderStats {
    pub frames: u64,
    pub slow: u64,
    pub total: Duration,
}

impl RenderStats {
    /// Mean time per frame; zero before the first frame.
    pub fn average(&self) -> Duration {
        match u32::try_from(self.frames) {
            Ok(0) => Duration::ZERO,
            Ok(frames) => self.total / frames,
            Err(_) => self.total.div_f64(self.frames as f64),
        }
    }
}

#[derive(Debug, Default)]
pub struct UIRenderer {
    stats: RenderStats,
}

impl UIRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    pub fn render(&mut self, frame: &mut Frame<'_>, state: &BrowserState, mode: &InputMode) {
        let start = Instant::now();

        let view = PageView::build(state);
        let search_query = mode.search_query();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        frame.render_widget(GridTable::new(&view, state.layout().cell_width()), chunks[0]);
        frame.render_widget(StatusBar::new(&view.status, search_query), chunks[1]);

        if matches!(mode, InputMode::Manual) {
            frame.render_widget(HelpOverlay, frame.area());
        }

        let elapsed = start.elapsed();
        self.stats.frames += 1;
        self.stats.total += elapsed;
        if elapsed.as_millis() > 16 {
            self.stats.slow += 1;
            warn!("Slow render: {}ms (target: <16ms)", elapsed.as_millis());
        }
        trace!(cells = view.cells.len(), ?elapsed, "frame rendered");
    }
}
