//! UI module for filesum.
//!
//! - list: the [FileList](list::FileList) view model
//! - render: the top level [render] entry point and layout
//! - widgets: header, status line, filter prompt and help overlay

pub mod list;
pub mod render;
pub mod widgets;

pub use render::render;
