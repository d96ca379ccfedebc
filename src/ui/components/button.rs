// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Push button, and the press/release core the other button-like controls
//! (checkbox, radio button, combo box) are built on.
//!
//! A button fires once per press/release pair that both happen inside its
//! bounding box. The space key acts as a press on key-down and as a release
//! inside on key-up.

use crate::event::{ModifierKeys, MouseEvent};
use crate::impl_control_base;
use crate::render::{style::Color, SpriteSet, TextFormat};
use crate::ui::widget::dispatch_left_button;
use crate::ui::{
    render_rect, Control, ControlBase, ControlEvent, ControlKind,
    FieldReader, FieldWriter, Label, RenderContext, UIResult, UiContext,
};
use crate::util::Point;

/// Result of feeding an input to a `ButtonCore`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    Ignored,
    Consumed,
    /// a press/release pair completed inside, the control acts now
    Activated,
}

/// Caption, hotkey and pressed state
#[derive(Debug, Clone)]
pub struct ButtonCore {
    pub label: Label,
    /// character code, 0 for none
    pub hotkey: u32,
    pub pressed: bool,
}

impl ButtonCore {
    pub fn new(text: &str, hotkey: u32) -> Self {
        Self {
            label: Label::new(text),
            hotkey,
            pressed: false,
        }
    }

    pub fn save(&self, w: &mut FieldWriter) {
        self.label.save(w);
        w.write(self.hotkey, "Button HotKey");
    }

    pub fn load(r: &mut FieldReader) -> UIResult<Self> {
        let label = Label::load(r)?;
        let hotkey = r.read("Button HotKey")?;
        Ok(Self {
            label,
            hotkey,
            pressed: false,
        })
    }

    pub fn hotkey(&self) -> Option<u32> {
        (self.hotkey != 0).then_some(self.hotkey)
    }

    /// Press at `pt`, grabbing focus when the control lacks it
    pub fn press(&mut self, base: &ControlBase, pt: Point, ctx: &mut UiContext) -> bool {
        if !base.bounding_box.contains(pt) {
            return false;
        }
        self.pressed = true;
        if !base.has_focus {
            ctx.request_focus();
        }
        true
    }

    pub fn release(&mut self, inside: bool) -> PressOutcome {
        if !self.pressed {
            return PressOutcome::Ignored;
        }
        self.pressed = false;
        if inside {
            PressOutcome::Activated
        } else {
            PressOutcome::Consumed
        }
    }

    pub fn key(&mut self, key: char, down: bool) -> PressOutcome {
        if key != ' ' {
            return PressOutcome::Ignored;
        }
        if down {
            self.pressed = true;
            PressOutcome::Consumed
        } else {
            self.release(true)
        }
    }

    /// Pressed look only while the cursor is still over the control
    pub fn tint(&self, base: &ControlBase) -> Color {
        if !base.enabled {
            Color::gray(0.4)
        } else if self.pressed && base.mouse_over {
            Color::gray(0.6)
        } else if base.mouse_over {
            Color::WHITE
        } else {
            Color::gray(0.8)
        }
    }
}

pub struct Button {
    base: ControlBase,
    core: ButtonCore,
}

impl Button {
    /// gfx element indices
    pub const ELEMENT_BUTTON: usize = 0;
    pub const ELEMENT_MOUSEOVER: usize = 1;

    pub fn new(id: i32, text: &str, x: i32, y: i32, width: i32, height: i32, hotkey: u32) -> Self {
        Self {
            base: ControlBase::new(ControlKind::Button, id, x, y, width, height),
            core: ButtonCore::new(text, hotkey),
        }
    }

    pub fn load(r: &mut FieldReader) -> UIResult<Self> {
        let base = ControlBase::load(ControlKind::Button, r)?;
        let core = ButtonCore::load(r)?;
        Ok(Self { base, core })
    }

    pub fn text(&self) -> &str {
        &self.core.label.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.core.label.text = text.to_string();
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.core.label.color = color;
    }

    pub fn set_hotkey(&mut self, hotkey: u32) {
        self.core.hotkey = hotkey;
    }

    pub fn is_pressed(&self) -> bool {
        self.core.pressed
    }

    fn click(&self, ctx: &mut UiContext) {
        ctx.emit(ControlEvent::Clicked { id: self.base.id });
    }
}

impl Control for Button {
    impl_control_base!(base);

    fn render(&self, front: &mut SpriteSet, _top: &mut SpriteSet, ctx: &RenderContext) {
        if !self.base.visible || self.base.elements_gfx.len() < 2 {
            return;
        }
        let element = if self.base.mouse_over {
            Self::ELEMENT_MOUSEOVER
        } else {
            Self::ELEMENT_BUTTON
        };
        render_rect(
            &mut front.normal,
            self.base.bounding_box,
            &self.base.elements_gfx[element],
            self.core.tint(&self.base),
            ctx.offset,
        );
        self.core
            .label
            .render(front, &self.base, self.base.bounding_box, TextFormat::Center, ctx);
    }

    fn save(&self, w: &mut FieldWriter) -> UIResult<()> {
        self.base.save(w);
        self.core.save(w);
        Ok(())
    }

    fn handle_key_event(&mut self, key: char, down: bool, ctx: &mut UiContext) -> bool {
        if !self.base.is_interactive() {
            return false;
        }
        match self.core.key(key, down) {
            PressOutcome::Ignored => false,
            PressOutcome::Consumed => true,
            PressOutcome::Activated => {
                self.click(ctx);
                true
            }
        }
    }

    fn handle_mouse_event(
        &mut self,
        event: &MouseEvent,
        modifiers: ModifierKeys,
        ctx: &mut UiContext,
    ) -> bool {
        dispatch_left_button(self, event, modifiers, ctx)
    }

    fn pressed(&mut self, pt: Point, _m: ModifierKeys, _ts: f64, ctx: &mut UiContext) -> bool {
        self.core.press(&self.base, pt, ctx)
    }

    fn released(&mut self, pt: Point, ctx: &mut UiContext) -> bool {
        let inside = self.contains_point(pt);
        match self.core.release(inside) {
            PressOutcome::Ignored => false,
            PressOutcome::Consumed => true,
            PressOutcome::Activated => {
                self.click(ctx);
                true
            }
        }
    }

    fn can_have_focus(&self) -> bool {
        self.base.is_interactive()
    }

    fn hotkey(&self) -> Option<u32> {
        self.core.hotkey()
    }

    fn on_hotkey(&mut self, ctx: &mut UiContext) {
        self.click(ctx);
    }

    fn is_capturing(&self) -> bool {
        self.core.pressed
    }
}
