//! Platform-agnostic building blocks: the record model, persistence, configuration and
//! presentation helpers shared by the journal controller and the sheet renderer.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod platform;
pub mod storage;
pub mod timing;
