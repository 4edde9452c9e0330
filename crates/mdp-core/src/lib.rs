// ABOUTME: Shared types and configuration for md2pdf.
// ABOUTME: Defines colors, layout settings, and config file handling.

pub mod color;
pub mod config;

pub use color::Color;
pub use config::{Breakpoints, Config, ConfigError, LayoutSettings, PaneColors, WindowSettings};
