//! Streams auto-dismissing quotation popups across the terminal.
//!
//! [`factory::PopupFactory`] turns route content into popup descriptors,
//! [`lifecycle::PopupLifecycle`] keeps them on screen until they expire and
//! [`driver::AutoSpawnDriver`] keeps new ones coming at a fixed cadence.

pub mod app;
pub mod config;
pub mod content;
pub mod driver;
pub mod factory;
pub mod input;
pub mod lifecycle;
pub mod models;
pub mod route;
pub mod scheduler;
pub mod terminal;
pub mod theme;
pub mod ui;
