pub mod api;
pub mod commands;
pub mod completions;
pub mod config;
pub mod controller;
pub mod models;
pub mod snapshot;
pub mod ui;
pub mod utils;
pub mod validation;

/// ASCII art logo for the board header
pub const LOGO: &str = "\
   \u{250C}\u{2500}\u{2510}
   \u{2502} \u{2502}  funnel
   \u{2514}\u{252C}\u{2518}";
