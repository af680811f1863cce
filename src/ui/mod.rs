//! User Interface layer
//!
//! This module contains all UI-related code:
//! - Theme resolution and colors
//! - Reusable widgets
//! - Dashboard and destination rendering

pub mod theme;
pub mod render;
pub mod widgets;

pub use theme::Theme;
pub use render::render;
