// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Input events as produced by the windowing layer.
//!
//! X11, Wayland and Win32 event pumps all translate their native messages
//! into these types, so dialogs and controls never see platform codes.

use crate::util::Point;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseEventType {
    #[default]
    Unknown,
    LeftButton,
    DoubleLeftButton,
    MiddleButton,
    DoubleMiddleButton,
    RightButton,
    DoubleRightButton,
    ScrollHoriz,
    ScrollVert,
    MouseMoved,
}

/// One mouse event in screen coordinates.
///
/// `down` is meaningful for button events only, `lines_to_scroll` for the
/// two scroll kinds only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MouseEvent {
    pub kind: MouseEventType,
    pub cursor_pos: Point,
    pub down: bool,
    pub timestamp: f64,
    pub lines_to_scroll: i32,
}

impl MouseEvent {
    pub fn new(
        kind: MouseEventType,
        cursor_pos: Point,
        down: bool,
        timestamp: f64,
        lines_to_scroll: i32,
    ) -> Self {
        Self {
            kind,
            cursor_pos,
            down,
            timestamp,
            lines_to_scroll,
        }
    }

    pub fn left_down(pt: Point, timestamp: f64) -> Self {
        Self::new(MouseEventType::LeftButton, pt, true, timestamp, 0)
    }

    pub fn left_up(pt: Point, timestamp: f64) -> Self {
        Self::new(MouseEventType::LeftButton, pt, false, timestamp, 0)
    }

    pub fn moved(pt: Point, timestamp: f64) -> Self {
        Self::new(MouseEventType::MouseMoved, pt, false, timestamp, 0)
    }

    pub fn scroll(pt: Point, lines: i32, timestamp: f64) -> Self {
        Self::new(MouseEventType::ScrollVert, pt, false, timestamp, lines)
    }

    /// Same event with the cursor moved into another coordinate space
    pub fn translated(&self, by: Point) -> Self {
        let mut e = *self;
        e.cursor_pos = self.cursor_pos.offset(by);
        e
    }

    pub fn is_left_button(&self) -> bool {
        matches!(
            self.kind,
            MouseEventType::LeftButton | MouseEventType::DoubleLeftButton
        )
    }
}

bitflags! {
    /// Modifier keys held while an event happened
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ModifierKeys: u8 {
        const SHIFT = 0b0000_0001;
        const CTRL  = 0b0000_0010;
        const ALT   = 0b0000_0100;
    }
}

impl ModifierKeys {
    pub fn from_states(shift: bool, ctrl: bool, alt: bool) -> Self {
        let mut m = ModifierKeys::empty();
        m.set(ModifierKeys::SHIFT, shift);
        m.set(ModifierKeys::CTRL, ctrl);
        m.set(ModifierKeys::ALT, alt);
        m
    }
}

/// Symbolic (non character) keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VirtualKey {
    Unknown,
    Escape,
    SysReq,
    Pause,
    Space,
    BackSpace,
    Delete,
    Tab,
    Linefeed,
    Return,
    Home,
    End,
    Begin,
    Left,
    Up,
    Right,
    Down,
    PageUp,
    PageDown,
    Select,
    Insert,
    Undo,
    Redo,
    Menu,
    Find,
    Cancel,
    Break,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    ShiftL,
    ShiftR,
    ControlL,
    ControlR,
    MetaL,
    MetaR,
    AltL,
    AltR,
    SuperL,
    SuperR,
    CapsLock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_states() {
        let m = ModifierKeys::from_states(true, false, true);
        assert!(m.contains(ModifierKeys::SHIFT));
        assert!(!m.contains(ModifierKeys::CTRL));
        assert!(m.contains(ModifierKeys::ALT));
    }

    #[test]
    fn test_translated_keeps_other_fields() {
        let e = MouseEvent::left_down(Point::new(10, 20), 1.5);
        let t = e.translated(Point::new(-4, -8));
        assert_eq!(t.cursor_pos, Point::new(6, 12));
        assert!(t.down);
        assert_eq!(t.timestamp, 1.5);
        assert!(t.is_left_button());
    }
}
