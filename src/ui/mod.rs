//! Terminal user interface: compositor, theme, panels, and input.

pub mod input;
pub mod panels;
pub mod screen;
mod theme;

pub use theme::Theme;
