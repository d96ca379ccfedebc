// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Checkbox, a button that toggles a checked flag on every click.

use crate::event::{ModifierKeys, MouseEvent};
use crate::impl_control_base;
use crate::render::{style::Color, SpriteSet, TextFormat};
use crate::ui::widget::dispatch_left_button;
use crate::ui::{
    render_rect, ButtonCore, Control, ControlBase, ControlEvent, ControlKind, FieldReader,
    FieldWriter, PressOutcome, RenderContext, UIResult, UiContext,
};
use crate::util::{Point, Rect};

/// Box with its check mark on the left, the caption right of it
pub(crate) fn render_check(
    base: &ControlBase,
    core: &ButtonCore,
    checked: bool,
    front: &mut SpriteSet,
    ctx: &RenderContext,
) {
    if !base.visible || base.elements_gfx.len() < 2 {
        return;
    }
    let bb = base.bounding_box;
    let rc_box = Rect::new(bb.left, bb.top, bb.left + bb.height(), bb.bottom);
    let tint = core.tint(base);
    render_rect(&mut front.normal, rc_box, &base.elements_gfx[0], tint, ctx.offset);
    if checked {
        render_rect(&mut front.normal, rc_box, &base.elements_gfx[1], tint, ctx.offset);
    }
    let rc_text = Rect::new(rc_box.right + 4, bb.top, bb.right, bb.bottom);
    core.label.render(front, base, rc_text, TextFormat::Left, ctx);
}

pub struct Checkbox {
    base: ControlBase,
    core: ButtonCore,
    checked: bool,
}

impl Checkbox {
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
    ) -> Self {
        Self {
            base: ControlBase::new(ControlKind::Checkbox, id, x, y, width, height),
            core: ButtonCore::new(text, hotkey),
            checked,
        }
    }

    pub fn load(r: &mut FieldReader) -> UIResult<Self> {
        let base = ControlBase::load(ControlKind::Checkbox, r)?;
        let core = ButtonCore::load(r)?;
        let checked = r.read_bool("is CheckBox Checked")?;
        Ok(Self {
            base,
            core,
            checked,
        })
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Programmatic change, no event is emitted
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn text(&self) -> &str {
        &self.core.label.text
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.core.label.color = color;
    }

    fn toggle(&mut self, ctx: &mut UiContext) {
        self.checked = !self.checked;
        ctx.emit(ControlEvent::CheckChanged {
            id: self.base.id,
            checked: self.checked,
        });
    }

    fn outcome(&mut self, outcome: PressOutcome, ctx: &mut UiContext) -> bool {
        match outcome {
            PressOutcome::Ignored => false,
            PressOutcome::Consumed => true,
            PressOutcome::Activated => {
                self.toggle(ctx);
                true
            }
        }
    }
}

impl Control for Checkbox {
    impl_control_base!(base);

    fn render(&self, front: &mut SpriteSet, _top: &mut SpriteSet, ctx: &RenderContext) {
        render_check(&self.base, &self.core, self.checked, front, ctx);
    }

    fn save(&self, w: &mut FieldWriter) -> UIResult<()> {
        self.base.save(w);
        self.core.save(w);
        w.write_bool(self.checked, "is CheckBox Checked");
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
        self.toggle(ctx);
    }

    fn is_capturing(&self) -> bool {
        self.core.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_toggles_and_notifies() {
        let mut cb = Checkbox::new(2, "Sound", 0, 0, 80, 16, 0, false);
        let mut ctx = UiContext::new();
        let pt = Point::new(5, 5);
        cb.handle_mouse_event(&MouseEvent::left_down(pt, 0.0), ModifierKeys::empty(), &mut ctx);
        cb.handle_mouse_event(&MouseEvent::left_up(pt, 0.1), ModifierKeys::empty(), &mut ctx);
        assert!(cb.is_checked());
        cb.handle_mouse_event(&MouseEvent::left_down(pt, 0.2), ModifierKeys::empty(), &mut ctx);
        cb.handle_mouse_event(&MouseEvent::left_up(pt, 0.3), ModifierKeys::empty(), &mut ctx);
        assert!(!cb.is_checked());
        assert_eq!(
            ctx.events(),
            &[
                ControlEvent::CheckChanged { id: 2, checked: true },
                ControlEvent::CheckChanged { id: 2, checked: false },
            ]
        );
    }

    #[test]
    fn test_release_outside_keeps_state() {
        let mut cb = Checkbox::new(2, "Sound", 0, 0, 80, 16, 0, true);
        let mut ctx = UiContext::new();
        cb.pressed(Point::new(5, 5), ModifierKeys::empty(), 0.0, &mut ctx);
        assert!(cb.released(Point::new(500, 5), &mut ctx));
        assert!(cb.is_checked());
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn test_checked_box_renders_mark() {
        let am = crate::asset::AssetManager::default();
        let ctx = RenderContext {
            offset: Point::new(0, 0),
            assets: &am,
            timestamp: 0.0,
        };
        let mut cb = Checkbox::new(2, "", 0, 0, 80, 16, 0, false);
        cb.set_elements(vec![Default::default(); 2], vec![]);
        let (mut front, mut top) = (SpriteSet::new(), SpriteSet::new());
        cb.render(&mut front, &mut top, &ctx);
        assert_eq!(front.normal.quad_count(), 1);
        cb.set_checked(true);
        front.clear();
        cb.render(&mut front, &mut top, &ctx);
        assert_eq!(front.normal.quad_count(), 2);
        assert_eq!(front.normal.quads().next().unwrap().rect, Rect::new(0, 0, 16, 16));
    }
}
