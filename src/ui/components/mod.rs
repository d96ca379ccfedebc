// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Concrete controls.

pub mod button;
pub mod checkbox;
pub mod combobox;
pub mod listbox;
pub mod radio;
pub mod scrollbar;
pub mod slider;
pub mod static_text;

// Re-exports
pub use button::*;
pub use checkbox::*;
pub use combobox::*;
pub use listbox::*;
pub use radio::*;
pub use scrollbar::*;
pub use slider::*;
pub use static_text::*;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// Payload carried by list box and combo box items
pub trait ItemData: Clone + PartialEq + Debug + Serialize + DeserializeOwned + 'static {}

impl<T> ItemData for T where T: Clone + PartialEq + Debug + Serialize + DeserializeOwned + 'static {}
