pub mod commands;
pub mod compose;
pub mod config;
pub mod core;
pub mod error;
pub mod frontend;
pub mod keybinding;
pub mod sinks;
pub mod state;

pub use config::Config;
pub use error::{PlaygroundError, Result};
pub use state::PlaygroundState;
