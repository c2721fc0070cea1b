//! Configuration for filesum.
//!
//! - [load]: reading `filesum.toml`, path resolution and default file generation.
//! - [general]: enumeration, fetch and logging behavior.
//! - [display]: what the list pane shows and how sizes are formatted.
//! - [theme]: colors.
//! - [input]: key bindings.
//!
//! Every section deserializes with defaults, so a partial file is always valid.

pub mod display;
pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use display::Display;
pub use general::{General, InternalGeneral};
pub use input::Keys;
pub use load::Config;
pub use theme::Theme;
