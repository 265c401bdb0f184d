pub mod error;

pub mod config;

pub mod logging;
pub use logging::Logger;

pub mod host;

pub mod terminal;

pub mod controller {

    pub mod actions;
    pub use actions::Action;

    pub mod dispatcher;
    pub use dispatcher::{ActionDispatcher, InputMode};

    pub mod search;
    pub use search::IncrementalSearch;

    pub mod handlers;
}

pub mod fs {
    pub mod dir_reader;
}

pub mod model {
    pub mod browser_state;
    pub use browser_state::{BrowserState, Listing};

    pub mod layout;
    pub use layout::{Cell, GridLayout, Viewport};
}

pub mod operators {
    pub mod process;

    pub mod templates;
    pub use templates::ExternalAction;
}

pub mod view {
    pub mod theme;

    pub mod ui;

    pub mod page_view;
    pub use page_view::*;

    pub mod components {
        pub mod grid_table;
        pub use grid_table::GridTable;
        pub mod help_overlay;
        pub use help_overlay::HelpOverlay;
        pub mod status_bar;
        pub use status_bar::StatusBar;
    }

    pub use components::*;
}

pub use view::*;
