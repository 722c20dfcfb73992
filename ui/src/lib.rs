//! Shared UI crate for Classlog. The journal logic, persistence and views live here; the
//! platform crates only pick a launcher and provide the [`AppConfig`](core::config::AppConfig).

pub mod core;
pub mod journal;
pub mod sheets;
pub mod views;

pub use crate::core::config::AppConfig;
pub use crate::journal::{Journal, JournalView, RenderSink};

/// Shared stylesheet, embedded so both launchers ship without a separate asset directory.
pub const MAIN_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/theme/main.css"
));
