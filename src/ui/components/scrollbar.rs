// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Vertical scroll bar.
//!
//! Tracks a window of `page_size` items over the item range [start, end).
//! The position is the first visible item and always stays within
//! [start, max(start, end - page_size)]. Holding an arrow scrolls one item,
//! then auto-repeats after a delay, driven by the frame timestamps.

use crate::config::engine_config;
use crate::event::{ModifierKeys, MouseEvent, MouseEventType};
use crate::impl_control_base;
use crate::render::{style::Color, SpriteSet};
use crate::ui::{
    render_rect, Control, ControlBase, ControlEvent, ControlKind, FieldReader, FieldWriter,
    RenderContext, UIResult, UiContext,
};
use crate::util::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowState {
    #[default]
    Clear,
    ClickedUp,
    ClickedDown,
    HeldUp,
    HeldDown,
}

pub struct ScrollBar {
    base: ControlBase,
    show_thumb: bool,
    drag: bool,
    rc_up: Rect,
    rc_down: Rect,
    rc_track: Rect,
    rc_thumb: Rect,
    position: i32,
    page_size: i32,
    start: i32,
    end: i32,
    thumb_offset_y: i32,
    last_mouse: Point,
    arrow: ArrowState,
    arrow_ts: f64,
    min_thumb: i32,
    arrow_delay: f64,
    arrow_repeat: f64,
}

impl ScrollBar {
    /// gfx element indices
    pub const ELEMENT_TRACK: usize = 0;
    pub const ELEMENT_UP: usize = 1;
    pub const ELEMENT_DOWN: usize = 2;
    pub const ELEMENT_THUMB: usize = 3;

    pub fn new(id: i32, x: i32, y: i32, width: i32, height: i32) -> Self {
        let cfg = &engine_config().ui;
        let mut sb = Self {
            base: ControlBase::new(ControlKind::ScrollBar, id, x, y, width, height),
            show_thumb: false,
            drag: false,
            rc_up: Rect::default(),
            rc_down: Rect::default(),
            rc_track: Rect::default(),
            rc_thumb: Rect::default(),
            position: 0,
            page_size: 1,
            start: 0,
            end: 1,
            thumb_offset_y: 0,
            last_mouse: Point::default(),
            arrow: ArrowState::Clear,
            arrow_ts: 0.0,
            min_thumb: cfg.scrollbar_min_thumb,
            arrow_delay: cfg.scrollbar_arrow_delay,
            arrow_repeat: cfg.scrollbar_arrow_repeat,
        };
        sb.update_rects();
        sb
    }

    pub fn load(r: &mut FieldReader) -> UIResult<Self> {
        let base = ControlBase::load(ControlKind::ScrollBar, r)?;
        let mut sb = Self::new(base.id, base.x, base.y, base.width, base.height);
        sb.base = base;
        sb.start = r.read("ScrollBar Track Start")?;
        let end: i32 = r.read("ScrollBar Track End")?;
        if end.checked_sub(sb.start).map_or(true, |range| range < 0) {
            return Err(r.invalid("ScrollBar Track End", &end.to_string()));
        }
        sb.end = end;
        sb.position = r.read("ScrollBar Track Position")?;
        let page_size: i32 = r.read("ScrollBar Page Size")?;
        if page_size < 0 {
            return Err(r.invalid("ScrollBar Page Size", &page_size.to_string()));
        }
        sb.page_size = page_size;
        sb.cap();
        sb.update_rects();
        Ok(sb)
    }

    pub fn track_pos(&self) -> i32 {
        self.position
    }

    pub fn set_track_pos(&mut self, position: i32) {
        self.position = position;
        self.cap();
        self.update_thumb_rect();
    }

    pub fn track_range(&self) -> (i32, i32) {
        (self.start, self.end)
    }

    pub fn set_track_range(&mut self, start: i32, end: i32) {
        self.start = start;
        // range must fit an i32
        self.end = end.max(start).min(start.saturating_add(i32::MAX));
        self.cap();
        self.update_thumb_rect();
    }

    pub fn page_size(&self) -> i32 {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: i32) {
        self.page_size = page_size.max(0);
        self.cap();
        self.update_thumb_rect();
    }

    pub fn arrow_state(&self) -> ArrowState {
        self.arrow
    }

    pub fn thumb_rect(&self) -> Rect {
        self.rc_thumb
    }

    pub fn is_thumb_shown(&self) -> bool {
        self.show_thumb
    }

    /// Scroll by `delta` items, negative is up
    pub fn scroll(&mut self, delta: i32) {
        self.position = self.position.saturating_add(delta);
        self.cap();
        self.update_thumb_rect();
    }

    /// Scroll just enough for item `index` to be visible
    pub fn show_item(&mut self, index: i32) {
        let index = index.min(self.end - 1).max(0);
        if self.position > index {
            self.position = index;
        } else if self.position as i64 + self.page_size as i64 <= index as i64 {
            self.position = index - self.page_size + 1;
        }
        self.cap();
        self.update_thumb_rect();
    }

    /// Auto-repeat of a held arrow, returns true when the position moved
    pub fn repeat_arrows(&mut self, timestamp: f64) -> bool {
        let elapsed = timestamp - self.arrow_ts;
        let delta = if self.rc_up.contains(self.last_mouse) {
            match self.arrow {
                ArrowState::ClickedUp if elapsed > self.arrow_delay => {
                    self.arrow = ArrowState::HeldUp;
                    -1
                }
                ArrowState::HeldUp if elapsed > self.arrow_repeat => -1,
                _ => 0,
            }
        } else if self.rc_down.contains(self.last_mouse) {
            match self.arrow {
                ArrowState::ClickedDown if elapsed > self.arrow_delay => {
                    self.arrow = ArrowState::HeldDown;
                    1
                }
                ArrowState::HeldDown if elapsed > self.arrow_repeat => 1,
                _ => 0,
            }
        } else {
            0
        };
        if delta == 0 {
            return false;
        }
        self.arrow_ts = timestamp;
        let old = self.position;
        self.scroll(delta);
        old != self.position
    }

    fn cap(&mut self) {
        if self.position < self.start || self.end - self.start <= self.page_size {
            self.position = self.start;
        } else if self.position as i64 + self.page_size as i64 > self.end as i64 {
            self.position = self.end - self.page_size;
        }
    }

    fn update_thumb_rect(&mut self) {
        let range = self.end as i64 - self.start as i64;
        let page = self.page_size as i64;
        let track = self.rc_track;
        if range > page && page > 0 {
            let height = track.height() as i64;
            let thumb_h = (height * page / range).max(self.min_thumb as i64);
            let offset = (self.position as i64 - self.start as i64) * (height - thumb_h) / (range - page);
            let top = track.top + offset as i32;
            self.rc_thumb = Rect::new(track.left, top, track.right, top + thumb_h as i32);
            self.show_thumb = true;
        } else {
            self.rc_thumb = Rect::new(track.left, track.top, track.right, track.top);
            self.show_thumb = false;
        }
    }

    fn notify(&self, old: i32, ctx: &mut UiContext) {
        if old != self.position {
            ctx.emit(ControlEvent::ScrollChanged {
                id: self.base.id,
                position: self.position,
            });
        }
    }
}

impl Control for ScrollBar {
    impl_control_base!(base);

    fn render(&self, front: &mut SpriteSet, _top: &mut SpriteSet, ctx: &RenderContext) {
        let gfx = &self.base.elements_gfx;
        if !self.base.visible || gfx.len() < 4 {
            return;
        }
        let tint = if self.base.enabled && self.show_thumb {
            Color::WHITE
        } else {
            Color::gray(0.5)
        };
        let sp = &mut front.normal;
        render_rect(sp, self.rc_track, &gfx[Self::ELEMENT_TRACK], tint, ctx.offset);
        render_rect(sp, self.rc_up, &gfx[Self::ELEMENT_UP], tint, ctx.offset);
        render_rect(sp, self.rc_down, &gfx[Self::ELEMENT_DOWN], tint, ctx.offset);
        if self.show_thumb {
            render_rect(sp, self.rc_thumb, &gfx[Self::ELEMENT_THUMB], tint, ctx.offset);
        }
    }

    fn save(&self, w: &mut FieldWriter) -> UIResult<()> {
        self.base.save(w);
        w.write(self.start, "ScrollBar Track Start");
        w.write(self.end, "ScrollBar Track End");
        w.write(self.position, "ScrollBar Track Position");
        w.write(self.page_size, "ScrollBar Page Size");
        Ok(())
    }

    fn update_rects(&mut self) {
        self.base.update_rect();
        let bb = self.base.bounding_box;
        let w = bb.width();
        self.rc_up = Rect::new(bb.left, bb.top, bb.right, bb.top + w);
        self.rc_down = Rect::new(bb.left, bb.bottom - w, bb.right, bb.bottom);
        self.rc_track = Rect::new(bb.left, self.rc_up.bottom, bb.right, self.rc_down.top);
        self.update_thumb_rect();
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

    fn pressed(&mut self, pt: Point, _m: ModifierKeys, timestamp: f64, ctx: &mut UiContext) -> bool {
        self.last_mouse = pt;
        let old = self.position;
        let handled = if self.rc_up.contains(pt) {
            if self.position > self.start {
                self.scroll(-1);
            }
            self.arrow = ArrowState::ClickedUp;
            self.arrow_ts = timestamp;
            true
        } else if self.rc_down.contains(pt) {
            if self.position + self.page_size < self.end {
                self.scroll(1);
            }
            self.arrow = ArrowState::ClickedDown;
            self.arrow_ts = timestamp;
            true
        } else if self.show_thumb && self.rc_thumb.contains(pt) {
            self.drag = true;
            self.thumb_offset_y = pt.y - self.rc_thumb.top;
            true
        } else if self.rc_track.contains(pt) {
            let page = (self.page_size - 1).max(1);
            if pt.y < self.rc_thumb.top {
                self.scroll(-page);
            } else if pt.y >= self.rc_thumb.bottom {
                self.scroll(page);
            }
            true
        } else {
            false
        };
        self.notify(old, ctx);
        handled
    }

    fn released(&mut self, _pt: Point, _ctx: &mut UiContext) -> bool {
        let was_active = self.drag || self.arrow != ArrowState::Clear;
        self.drag = false;
        self.arrow = ArrowState::Clear;
        self.update_thumb_rect();
        was_active
    }

    fn dragged(&mut self, pt: Point, ctx: &mut UiContext) -> bool {
        self.last_mouse = pt;
        if !self.drag {
            return false;
        }
        let old = self.position;
        let track = self.rc_track;
        let thumb_h = self.rc_thumb.height();
        let top = (pt.y - self.thumb_offset_y)
            .min(track.bottom - thumb_h)
            .max(track.top);
        let max_first = self.end as i64 - self.start as i64 - self.page_size as i64 + 1;
        let max_thumb = (track.height() - thumb_h) as i64;
        if max_first > 0 && max_thumb > 0 {
            let rel = (top - track.top) as i64 + max_thumb / (max_first * 2);
            let position = self.start as i64 + rel * max_first / max_thumb;
            self.position = position.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
            self.cap();
        }
        self.update_thumb_rect();
        self.notify(old, ctx);
        true
    }

    fn scrolled(&mut self, amount: i32, ctx: &mut UiContext) -> bool {
        let old = self.position;
        self.scroll(-amount);
        self.notify(old, ctx);
        true
    }

    fn tick(&mut self, timestamp: f64, ctx: &mut UiContext) {
        if self.arrow == ArrowState::Clear {
            return;
        }
        let old = self.position;
        if self.repeat_arrows(timestamp) {
            self.notify(old, ctx);
        }
    }

    fn is_capturing(&self) -> bool {
        self.drag || self.arrow != ArrowState::Clear
    }
}
