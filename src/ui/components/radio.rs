// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Radio button. Checking one asks the dialog to uncheck every other radio
//! button of the same group, so at most one per group stays checked.

use crate::event::{ModifierKeys, MouseEvent};
use crate::impl_control_base;
use crate::render::SpriteSet;
use crate::ui::components::checkbox::render_check;
use crate::ui::widget::dispatch_left_button;
use crate::ui::{
    ButtonCore, Control, ControlBase, ControlEvent, ControlKind, FieldReader, FieldWriter,
    PressOutcome, RenderContext, UIResult, UiContext,
};
use crate::util::Point;

pub struct RadioButton {
    base: ControlBase,
    core: ButtonCore,
    checked: bool,
    group: u32,
}

impl RadioButton {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
        text: &str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        hotkey: u32,
        checked: bool,
        group: u32,
    ) -> Self {
        Self {
            base: ControlBase::new(ControlKind::RadioButton, id, x, y, width, height),
            core: ButtonCore::new(text, hotkey),
            checked,
            group,
        }
    }

    pub fn load(r: &mut FieldReader) -> UIResult<Self> {
        let base = ControlBase::load(ControlKind::RadioButton, r)?;
        let core = ButtonCore::load(r)?;
        let checked = r.read_bool("is CheckBox Checked")?;
        let group = r.read("RadioButton Button Group")?;
        Ok(Self {
            base,
            core,
            checked,
            group,
        })
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Programmatic change, neither the group nor listeners are told
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn group(&self) -> u32 {
        self.group
    }

    pub fn set_group(&mut self, group: u32) {
        self.group = group;
    }

    pub fn text(&self) -> &str {
        &self.core.label.text
    }

    fn check(&mut self, ctx: &mut UiContext) {
        ctx.clear_radio_group(self.group);
        self.checked = true;
        ctx.emit(ControlEvent::CheckChanged {
            id: self.base.id,
            checked: true,
        });
    }

    fn outcome(&mut self, outcome: PressOutcome, ctx: &mut UiContext) -> bool {
        match outcome {
            PressOutcome::Ignored => false,
            PressOutcome::Consumed => true,
            PressOutcome::Activated => {
                self.check(ctx);
                true
            }
        }
    }
}

impl Control for RadioButton {
    impl_control_base!(base);

    fn render(&self, front: &mut SpriteSet, _top: &mut SpriteSet, ctx: &RenderContext) {
        render_check(&self.base, &self.core, self.checked, front, ctx);
    }

    fn save(&self, w: &mut FieldWriter) -> UIResult<()> {
        self.base.save(w);
        self.core.save(w);
        w.write_bool(self.checked, "is CheckBox Checked");
        w.write(self.group, "RadioButton Button Group");
        Ok(())
    }

    fn handle_key_event(&mut self, key: char, down: bool, ctx: &mut UiContext) -> bool {
        if !self.base.is_interactive() {
            return false;
        }
        let outcome = self.core.key(key, down);
        self.outcome(outcome, ctx)
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
        let outcome = self.core.release(self.contains_point(pt));
        self.outcome(outcome, ctx)
    }

    fn can_have_focus(&self) -> bool {
        self.base.is_interactive()
    }

    fn hotkey(&self) -> Option<u32> {
        self.core.hotkey()
    }

    fn on_hotkey(&mut self, ctx: &mut UiContext) {
        self.check(ctx);
    }

    fn is_capturing(&self) -> bool {
        self.core.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::event::UiRequest;

    #[test]
    fn test_release_inside_checks_and_requests_group_clear() {
        let mut rb = RadioButton::new(4, "Easy", 0, 0, 60, 16, 0, false, 9);
        let mut ctx = UiContext::new();
        let pt = Point::new(3, 3);
        rb.pressed(pt, ModifierKeys::empty(), 0.0, &mut ctx);
        rb.released(pt, &mut ctx);
        assert!(rb.is_checked());
        assert!(ctx.take_requests().contains(&UiRequest::ClearRadioGroup(9)));
        // clicking a checked radio keeps it checked
        rb.pressed(pt, ModifierKeys::empty(), 0.1, &mut ctx);
        rb.released(pt, &mut ctx);
        assert!(rb.is_checked());
    }
}
