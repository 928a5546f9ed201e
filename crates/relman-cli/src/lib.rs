// Rust guideline compliant 2026-02-06

//! relman CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod commands;
pub mod logging;
pub mod outline;
pub mod progress;
pub mod render;
pub mod select;
pub mod terminal;

pub use commands::CommandContext;
pub use outline::{natural_key_cmp, OutlineTotals, ReleaseOutline};
pub use render::{create_renderer, render_tree, Changelog, ChangelogRenderer, TreeOptions};
pub use select::{select_version, VersionSelector};
pub use terminal::{get_terminal_width, should_use_color, wrap_text};
