pub mod keymap;
pub use keymap::KeyMap;

pub mod utils;
pub use utils::*;
