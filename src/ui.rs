// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! # UI module
//!
//! Retained-mode dialog and widget toolkit.
//!
//! ## Core Concepts
//!
//! - **Control**: one widget, a trait object with shared `ControlBase` state
//! - **Dialog**: owns its controls, routes input, manages focus, persists
//!   the whole tree to a line-oriented text format
//! - **ControlEvent**: notifications controls emit (clicked, check changed,
//!   selection changed...), queued by the dialog and drained by game code
//! - **UiContext**: what a control handler may ask of its dialog (focus,
//!   radio group clearing) plus the events it emitted
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_gamekit::event::{ModifierKeys, MouseEvent};
//! use rust_gamekit::ui::*;
//! use rust_gamekit::util::Point;
//!
//! let mut dlg = Dialog::new(200, 120);
//! dlg.add_button(1, "OK", 10, 10, 60, 20, 0).unwrap();
//! // caption bar is 18 pixels high by default
//! let pt = Point::new(20, 38);
//! dlg.handle_mouse_event(MouseEvent::left_down(pt, 0.0), ModifierKeys::empty());
//! dlg.handle_mouse_event(MouseEvent::left_up(pt, 0.1), ModifierKeys::empty());
//! assert!(dlg.drain_events().contains(&ControlEvent::Clicked { id: 1 }));
//! ```

pub mod components;
pub mod dialog;
pub mod event;
pub mod persist;
pub mod widget;

pub use components::*;
pub use dialog::*;
pub use event::*;
pub use persist::*;
pub use widget::*;

use thiserror::Error;

/// UI result type
pub type UIResult<T> = Result<T, UIError>;

/// UI error types
#[derive(Debug, Error)]
pub enum UIError {
    #[error("line {line}: missing field `{label}`")]
    MissingField { line: usize, label: String },
    #[error("line {line}: invalid value {value:?} for field `{label}`")]
    InvalidField {
        line: usize,
        label: String,
        value: String,
    },
    #[error("unknown control kind {0}")]
    UnknownControlKind(i64),
    #[error("control kind {0:?} is not supported")]
    UnsupportedControlKind(ControlKind),
    #[error("control id {0} already used in this dialog")]
    DuplicateControlId(i32),
    #[error("no control with id {0}")]
    ControlNotFound(i32),
    #[error("control {0} has another type")]
    WrongControlType(i32),
    #[error("item payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
