//! Daily-cycle distribution dashboard for futures instruments.
//!
//! The data layer ([`data`]) and chart catalogue ([`charts`]) are plain Rust
//! and usable without a window; [`app`] and [`ui`] render them with egui.

pub mod app;
pub mod auth;
pub mod charts;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
