// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Horizontal slider over the integer range [min, max].

use crate::event::{ModifierKeys, MouseEvent, MouseEventType, VirtualKey};
use crate::impl_control_base;
use crate::render::{style::Color, SpriteSet};
use crate::ui::{
    render_rect, Control, ControlBase, ControlEvent, ControlKind, FieldReader, FieldWriter,
    RenderContext, UIResult, UiContext,
};
use crate::util::{Point, Rect};

pub struct Slider {
    base: ControlBase,
    value: i32,
    min: i32,
    max: i32,
    /// thumb center relative to the left edge
    button_x: i32,
    drag_offset: i32,
    pressed: bool,
    rc_button: Rect,
}

impl Slider {
    /// gfx element indices
    pub const ELEMENT_TRACK: usize = 0;
    pub const ELEMENT_BUTTON: usize = 1;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        min: i32,
        max: i32,
        value: i32,
    ) -> Self {
        let mut s = Self {
            base: ControlBase::new(ControlKind::Slider, id, x, y, width, height),
            value: 0,
            min,
            max: max.max(min),
            button_x: 0,
            drag_offset: 0,
            pressed: false,
            rc_button: Rect::default(),
        };
        s.value = value.clamp(s.min, s.max);
        s.update_rects();
        s
    }

    pub fn load(r: &mut FieldReader) -> UIResult<Self> {
        let base = ControlBase::load(ControlKind::Slider, r)?;
        let min: i32 = r.read("Slider Min Value")?;
        let max: i32 = r.read("Slider Max Value")?;
        if max < min {
            return Err(r.invalid("Slider Max Value", &max.to_string()));
        }
        let value = r.read("Slider Current Value")?;
        let mut s = Self::new(base.id, base.x, base.y, base.width, base.height, min, max, value);
        s.base = base;
        s.update_rects();
        Ok(s)
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Programmatic change, clamped, no event is emitted
    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
        self.update_rects();
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    pub fn set_range(&mut self, min: i32, max: i32) {
        self.min = min;
        self.max = max.max(min);
        self.set_value(self.value);
    }

    pub fn thumb_rect(&self) -> Rect {
        self.rc_button
    }

    /// Value under x, rounded to the nearest step
    pub fn value_from_pos(&self, x: i32) -> i32 {
        let width = self.base.bounding_box.width();
        if width <= 0 {
            return self.min;
        }
        let per_pixel = self.span() as f64 / width as f64;
        let dx = x as f64 - self.base.bounding_box.left as f64;
        let v = (self.min as f64 + per_pixel * dx).round();
        v.clamp(self.min as f64, self.max as f64) as i32
    }

    fn span(&self) -> i64 {
        self.max as i64 - self.min as i64
    }

    fn set_value_from_input(&mut self, value: i32, ctx: &mut UiContext) {
        let value = value.clamp(self.min, self.max);
        if value == self.value {
            return;
        }
        self.value = value;
        self.update_rects();
        ctx.emit(ControlEvent::SliderChanged {
            id: self.base.id,
            value,
        });
    }
}

impl Control for Slider {
    impl_control_base!(base);

    fn render(&self, front: &mut SpriteSet, _top: &mut SpriteSet, ctx: &RenderContext) {
        let gfx = &self.base.elements_gfx;
        if !self.base.visible || gfx.len() < 2 {
            return;
        }
        let tint = if !self.base.enabled {
            Color::gray(0.4)
        } else if self.pressed {
            Color::gray(0.7)
        } else {
            Color::WHITE
        };
        render_rect(
            &mut front.normal,
            self.base.bounding_box,
            &gfx[Self::ELEMENT_TRACK],
            tint,
            ctx.offset,
        );
        render_rect(&mut front.normal, self.rc_button, &gfx[Self::ELEMENT_BUTTON], tint, ctx.offset);
    }

    fn save(&self, w: &mut FieldWriter) -> UIResult<()> {
        self.base.save(w);
        w.write(self.min, "Slider Min Value");
        w.write(self.max, "Slider Max Value");
        w.write(self.value, "Slider Current Value");
        Ok(())
    }

    fn update_rects(&mut self) {
        self.base.update_rect();
        let bb = self.base.bounding_box;
        let side = bb.height();
        let range = self.span();
        self.button_x = if range > 0 {
            ((self.value as i64 - self.min as i64) * bb.width() as i64 / range) as i32
        } else {
            0
        };
        let left = bb.left - side / 2 + self.button_x;
        self.rc_button = Rect::new(left, bb.top, left + side, bb.bottom);
    }

    fn contains_point(&self, pt: Point) -> bool {
        self.base.bounding_box.contains(pt) || self.rc_button.contains(pt)
    }

    fn handle_mouse_event(
        &mut self,
        event: &MouseEvent,
        modifiers: ModifierKeys,
        ctx: &mut UiContext,
    ) -> bool {
        if !self.base.is_interactive() {
            return false;
        }
        let pt = event.cursor_pos;
        match event.kind {
            MouseEventType::LeftButton | MouseEventType::DoubleLeftButton => {
                if event.down {
                    self.pressed(pt, modifiers, event.timestamp, ctx)
                } else {
                    self.released(pt, ctx)
                }
            }
            MouseEventType::MouseMoved => self.dragged(pt, ctx),
            MouseEventType::ScrollVert if self.contains_point(pt) => {
                self.scrolled(event.lines_to_scroll, ctx)
            }
            _ => false,
        }
    }

    fn handle_virtual_key(
        &mut self,
        key: VirtualKey,
        down: bool,
        _modifiers: ModifierKeys,
        ctx: &mut UiContext,
    ) -> bool {
        if !self.base.is_interactive() || !down {
            return false;
        }
        let page = (self.span() / 10).clamp(1, i32::MAX as i64) as i32;
        let value = match key {
            VirtualKey::Home => self.min,
            VirtualKey::End => self.max,
            VirtualKey::Left | VirtualKey::Down => self.value.saturating_sub(1),
            VirtualKey::Right | VirtualKey::Up => self.value.saturating_add(1),
            VirtualKey::PageDown => self.value.saturating_sub(page),
            VirtualKey::PageUp => self.value.saturating_add(page),
            _ => return false,
        };
        self.set_value_from_input(value, ctx);
        true
    }

    fn pressed(&mut self, pt: Point, _m: ModifierKeys, _ts: f64, ctx: &mut UiContext) -> bool {
        let thumb_x = self.base.bounding_box.left + self.button_x;
        if self.rc_button.contains(pt) {
            self.pressed = true;
            self.drag_offset = thumb_x - pt.x;
        } else if self.base.bounding_box.contains(pt) {
            self.pressed = true;
            self.drag_offset = 0;
            if pt.x > thumb_x {
                self.set_value_from_input(self.value.saturating_add(1), ctx);
            } else if pt.x < thumb_x {
                self.set_value_from_input(self.value.saturating_sub(1), ctx);
            }
        } else {
            return false;
        }
        if !self.base.has_focus {
            ctx.request_focus();
        }
        true
    }

    fn released(&mut self, _pt: Point, _ctx: &mut UiContext) -> bool {
        if !self.pressed {
            return false;
        }
        self.pressed = false;
        true
    }

    fn dragged(&mut self, pt: Point, ctx: &mut UiContext) -> bool {
        if !self.pressed {
            return false;
        }
        let value = self.value_from_pos(pt.x.saturating_add(self.drag_offset));
        self.set_value_from_input(value, ctx);
        true
    }

    fn scrolled(&mut self, amount: i32, ctx: &mut UiContext) -> bool {
        self.set_value_from_input(self.value.saturating_sub(amount), ctx);
        true
    }

    fn can_have_focus(&self) -> bool {
        self.base.is_interactive()
    }

    fn is_capturing(&self) -> bool {
        self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::UIError;

    fn slider() -> Slider {
        Slider::new(5, 0, 0, 100, 10, 0, 50, 10)
    }

    #[test]
    fn test_value_from_pos_rounds_to_nearest() {
        let s = slider();
        assert_eq!(s.value_from_pos(0), 0);
        assert_eq!(s.value_from_pos(3), 2);
        assert_eq!(s.value_from_pos(100), 50);
        assert_eq!(s.value_from_pos(-40), 0);
        assert_eq!(s.value_from_pos(400), 50);

        let s = Slider::new(6, 0, 0, 100, 10, -50, 50, 0);
        assert_eq!(s.value_from_pos(0), -50);
        assert_eq!(s.value_from_pos(10), -40);
        assert_eq!(s.value_from_pos(49), -2);
        assert_eq!(s.value_from_pos(-5), -50);
    }

    #[test]
    fn test_extreme_range_does_not_overflow() {
        let mut s = Slider::new(7, 0, 0, 100, 10, i32::MIN, i32::MAX, 0);
        assert_eq!(s.value_from_pos(0), i32::MIN);
        assert_eq!(s.value_from_pos(100), i32::MAX);
        assert_eq!(s.thumb_rect().left, 45);
        s.set_value(i32::MAX);
        let mut ctx = UiContext::new();
        assert!(s.handle_virtual_key(VirtualKey::PageUp, true, ModifierKeys::empty(), &mut ctx));
        assert_eq!(s.value(), i32::MAX);
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn test_load_rejects_inverted_range() {
        let mut w = FieldWriter::new();
        Slider::new(8, 0, 0, 100, 10, 0, 10, 5).save(&mut w).unwrap();
        let text = w
            .finish()
            .replace("10| Slider Max Value", "-10| Slider Max Value");
        assert!(matches!(
            Slider::load(&mut FieldReader::new(&text)),
            Err(UIError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_thumb_follows_value() {
        let mut s = slider();
        // value 10 of 0..50 over 100px puts the thumb center at x=20
        assert_eq!(s.thumb_rect(), Rect::new(15, 0, 25, 10));
        s.set_value(99);
        assert_eq!(s.value(), 50);
        assert_eq!(s.thumb_rect(), Rect::new(95, 0, 105, 10));
        assert!(s.contains_point(Point::new(104, 5)));
    }

    #[test]
    fn test_drag_thumb_sets_value() {
        let mut s = slider();
        let mut ctx = UiContext::new();
        assert!(s.pressed(Point::new(22, 5), ModifierKeys::empty(), 0.0, &mut ctx));
        assert!(s.is_capturing());
        s.dragged(Point::new(62, 5), &mut ctx);
        assert_eq!(s.value(), 30);
        s.released(Point::new(62, 5), &mut ctx);
        assert!(!s.dragged(Point::new(90, 5), &mut ctx));
        assert_eq!(ctx.events(), &[ControlEvent::SliderChanged { id: 5, value: 30 }]);
    }

    #[test]
    fn test_track_click_steps_toward_cursor() {
        let mut s = slider();
        let mut ctx = UiContext::new();
        s.pressed(Point::new(80, 5), ModifierKeys::empty(), 0.0, &mut ctx);
        assert_eq!(s.value(), 11);
        s.released(Point::new(80, 5), &mut ctx);
        s.pressed(Point::new(1, 5), ModifierKeys::empty(), 0.0, &mut ctx);
        assert_eq!(s.value(), 10);
    }

    #[test]
    fn test_keys_and_wheel() {
        let mut s = slider();
        let mut ctx = UiContext::new();
        let none = ModifierKeys::empty();
        s.handle_virtual_key(VirtualKey::End, true, none, &mut ctx);
        assert_eq!(s.value(), 50);
        s.handle_virtual_key(VirtualKey::PageDown, true, none, &mut ctx);
        assert_eq!(s.value(), 45);
        s.handle_virtual_key(VirtualKey::Left, true, none, &mut ctx);
        assert_eq!(s.value(), 44);
        assert!(!s.handle_virtual_key(VirtualKey::Left, false, none, &mut ctx));
        s.handle_mouse_event(&MouseEvent::scroll(Point::new(10, 5), 4, 0.0), none, &mut ctx);
        assert_eq!(s.value(), 40);
        s.handle_virtual_key(VirtualKey::Home, true, none, &mut ctx);
        assert_eq!(s.value(), 0);
    }
}
