//! Widget-tree UI
//!
//! Retained widget trees built once from declarative RON documents and
//! mutated afterwards only through identifier paths. A widget owns its
//! geometry, its children, and one behavior (the drawable/parameterized
//! part); a canvas owns one tree plus the event-bus bindings that drive
//! it. Rendering goes through the `DrawTarget` seam so the tree logic
//! stays independent of the backend.

mod behavior;
mod canvas;
mod drawer;
mod factory;
mod rect;
mod round_rect;
mod text;
mod widget;

pub use behavior::{Behavior, Blank};
pub use canvas::{Canvas, CanvasHandle};
pub use drawer::{DrawTarget, Drawer};
pub use factory::{build, construct, parse, WidgetConfig};
pub use rect::Rect;
pub use round_rect::RoundRect;
pub use text::Text;
pub use widget::Widget;

/// Runtime widget-tree failures.
///
/// Both cases point at authoring bugs (a bad path or a parameter a
/// behavior does not have); callers treat them as fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum UiError {
    WidgetNotFound(String),
    UnknownParameter(String),
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiError::WidgetNotFound(path) => write!(f, "widget not found: {}", path),
            UiError::UnknownParameter(name) => write!(f, "unknown parameter: {}", name),
        }
    }
}

impl std::error::Error for UiError {}
