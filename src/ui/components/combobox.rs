// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Combo box: a button showing the selected item that opens a drop-down
//! list box below itself.
//!
//! The drop-down renders into the top layer so it stays above every other
//! control. Picking an item closes it and emits `SelectionChanged`; losing
//! focus closes it without a selection.

use crate::config::engine_config;
use crate::event::{ModifierKeys, MouseEvent, MouseEventType, VirtualKey};
use crate::impl_control_base;
use crate::render::{style::Color, SpriteSet, TextFormat};
use crate::ui::{
    render_rect, render_text, ButtonCore, Control, ControlBase, ControlEvent, ControlKind,
    ElementFont, ElementGfx, FieldReader, FieldWriter, Item, ItemData, ListBox, RenderContext,
    UIResult, UiContext,
};
use crate::util::{Point, Rect};

pub struct ComboBox<T: ItemData> {
    base: ControlBase,
    core: ButtonCore,
    dropdown: ListBox<T>,
    opened: bool,
    selected: Option<usize>,
    /// highlighted item while open
    focused: Option<usize>,
    drop_height: i32,
    rc_text: Rect,
    rc_button: Rect,
}

impl<T: ItemData> ComboBox<T> {
    /// gfx element indices, the drop-down list takes the ones following
    pub const ELEMENT_MAIN: usize = 0;
    pub const ELEMENT_BUTTON: usize = 1;
    pub const ELEMENT_DROPDOWN: usize = 2;

    pub fn new(id: i32, x: i32, y: i32, width: i32, height: i32, hotkey: u32) -> Self {
        let drop_height = engine_config().ui.combo_drop_height;
        let mut cb = Self {
            base: ControlBase::new(ControlKind::ComboBox, id, x, y, width, height),
            core: ButtonCore::new("", hotkey),
            dropdown: ListBox::new(-1, x, y + height, width, drop_height, false),
            opened: false,
            selected: None,
            focused: None,
            drop_height,
            rc_text: Rect::default(),
            rc_button: Rect::default(),
        };
        cb.update_rects();
        cb
    }

    pub fn load(r: &mut FieldReader) -> UIResult<Self> {
        let base = ControlBase::load(ControlKind::ComboBox, r)?;
        let core = ButtonCore::load(r)?;
        let mut cb = Self::new(base.id, base.x, base.y, base.width, base.height, core.hotkey);
        cb.base = base;
        cb.core = core;
        cb.drop_height = r.read("ComboBox Drop Height")?;
        let sb_width = r.read("ComboBox ScrollBar Width")?;
        cb.dropdown.set_scrollbar_width(sb_width);
        let count: usize = r.read("ComboBox Item Count")?;
        for _ in 0..count {
            let text = r.read_string("ComboBox Item Text")?;
            let data = r.read_json("ComboBox Item Data")?;
            cb.dropdown.add_item(&text, data);
        }
        let selected: i64 = r.read("ComboBox Selected Item")?;
        cb.selected = usize::try_from(selected).ok().filter(|&s| s < count);
        cb.focused = cb.selected;
        cb.update_rects();
        Ok(cb)
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    pub fn dropdown(&self) -> &ListBox<T> {
        &self.dropdown
    }

    pub fn drop_height(&self) -> i32 {
        self.drop_height
    }

    pub fn set_drop_height(&mut self, height: i32) {
        self.drop_height = height;
        self.update_rects();
    }

    pub fn scrollbar_width(&self) -> i32 {
        self.dropdown.scrollbar_width()
    }

    pub fn set_scrollbar_width(&mut self, width: i32) {
        self.dropdown.set_scrollbar_width(width);
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.core.label.color = color;
    }

    /// Append an item, the first item of an empty box becomes selected
    pub fn add_item(&mut self, text: &str, data: T) {
        self.dropdown.add_item(text, data);
        if self.selected.is_none() {
            self.selected = Some(0);
            self.focused = Some(0);
        }
    }

    pub fn remove_item(&mut self, index: usize) -> Option<Item<T>> {
        let item = self.dropdown.remove_item(index)?;
        let len = self.dropdown.num_items();
        let fix = |s: Option<usize>| match s {
            Some(s) if index < s => Some(s - 1),
            Some(s) if s >= len => len.checked_sub(1),
            other => other,
        };
        self.selected = fix(self.selected);
        self.focused = fix(self.focused);
        Some(item)
    }

    pub fn remove_all_items(&mut self) {
        self.dropdown.remove_all_items();
        self.selected = None;
        self.focused = None;
    }

    pub fn find_item(&self, text: &str, start: usize) -> Option<usize> {
        self.dropdown.find_item(text, start)
    }

    pub fn contains_item(&self, text: &str, start: usize) -> bool {
        self.dropdown.contains_item(text, start)
    }

    pub fn item(&self, index: usize) -> Option<&Item<T>> {
        self.dropdown.item(index)
    }

    pub fn item_data(&self, index: usize) -> Option<&T> {
        self.dropdown.item_data(index)
    }

    pub fn item_data_by_text(&self, text: &str) -> Option<&T> {
        self.dropdown.item_data_by_text(text)
    }

    pub fn num_items(&self) -> usize {
        self.dropdown.num_items()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&Item<T>> {
        self.selected.and_then(|i| self.dropdown.item(i))
    }

    /// Payload of the selected item
    pub fn get_selected_data(&self) -> Option<&T> {
        self.selected.and_then(|i| self.dropdown.item_data(i))
    }

    /// Programmatic selection, no event is emitted. False when out of range.
    pub fn set_selected_by_index(&mut self, index: usize) -> bool {
        if index >= self.dropdown.num_items() {
            return false;
        }
        self.selected = Some(index);
        self.focused = Some(index);
        true
    }

    pub fn set_selected_by_text(&mut self, text: &str) -> bool {
        match self.find_item(text, 0) {
            Some(i) => self.set_selected_by_index(i),
            None => false,
        }
    }

    pub fn set_selected_by_data(&mut self, data: &T) -> bool {
        match self.dropdown.items().iter().position(|it| &it.data == data) {
            Some(i) => self.set_selected_by_index(i),
            None => false,
        }
    }

    /// Replace the items with copies of `other`'s, its selection included
    pub fn copy_items_from(&mut self, other: &ComboBox<T>) {
        self.dropdown.copy_items_from(&other.dropdown);
        self.selected = other.selected;
        self.focused = other.selected;
    }

    pub fn open(&mut self) {
        self.opened = true;
        self.focused = self.selected;
        match self.selected {
            Some(s) => self.dropdown.select_item(s),
            None => self.dropdown.clear_selection(),
        }
    }

    pub fn close(&mut self) {
        self.opened = false;
    }

    /// Selection change from user input
    fn select(&mut self, index: usize, ctx: &mut UiContext) {
        self.selected = Some(index);
        self.focused = Some(index);
        ctx.emit(ControlEvent::SelectionChanged {
            id: self.base.id,
            index: Some(index),
        });
    }

    /// Move the highlight by `delta`; a closed box selects right away
    fn step(&mut self, delta: i32, ctx: &mut UiContext) {
        let n = self.dropdown.num_items() as i32;
        if n == 0 {
            return;
        }
        let current = self.focused.map(|f| f as i32).unwrap_or(-1);
        let target = (current + delta).clamp(0, n - 1) as usize;
        if Some(target) == self.focused {
            return;
        }
        if self.opened {
            self.focused = Some(target);
            self.dropdown.select_item(target);
        } else {
            self.select(target, ctx);
        }
    }

    fn toggle_open(&mut self, ctx: &mut UiContext) {
        if self.opened {
            if let Some(f) = self.focused {
                if self.selected != Some(f) {
                    self.select(f, ctx);
                }
            }
            self.close();
        } else {
            self.open();
        }
    }

    fn in_dropdown(&self, pt: Point) -> bool {
        self.opened && self.dropdown.contains_point(pt)
    }

    /// Hands the event to the drop-down, whose own events stay internal
    fn forward(&mut self, event: &MouseEvent, modifiers: ModifierKeys) -> bool {
        let mut scratch = UiContext::new();
        self.dropdown.handle_mouse_event(event, modifiers, &mut scratch)
    }
}

impl<T: ItemData> Control for ComboBox<T> {
    impl_control_base!(base);

    fn render(&self, front: &mut SpriteSet, top: &mut SpriteSet, ctx: &RenderContext) {
        let gfx = &self.base.elements_gfx;
        if !self.base.visible || gfx.len() < 2 {
            return;
        }
        let tint = self.core.tint(&self.base);
        render_rect(&mut front.normal, self.rc_text, &gfx[Self::ELEMENT_MAIN], tint, ctx.offset);
        render_rect(&mut front.normal, self.rc_button, &gfx[Self::ELEMENT_BUTTON], tint, ctx.offset);
        if let (Some(item), Some(font)) = (self.selected_item(), ctx.font(self.base.elements_font.first())) {
            let mut rc = self.rc_text;
            rc.inflate(-engine_config().ui.list_margin, 0);
            render_text(
                &mut front.text,
                font,
                &item.text,
                self.core.label.color,
                rc,
                ctx.offset,
                TextFormat::Left,
            );
        }
        if self.opened {
            // the list only ever draws into its first set
            let mut unused = SpriteSet::new();
            self.dropdown.render(top, &mut unused, ctx);
        }
    }

    fn save(&self, w: &mut FieldWriter) -> UIResult<()> {
        self.base.save(w);
        self.core.save(w);
        w.write(self.drop_height, "ComboBox Drop Height");
        w.write(self.dropdown.scrollbar_width(), "ComboBox ScrollBar Width");
        w.write(self.dropdown.num_items(), "ComboBox Item Count");
        for it in self.dropdown.items() {
            w.write(&it.text, "ComboBox Item Text");
            w.write_json(&it.data, "ComboBox Item Data")?;
        }
        let selected = self.selected.map(|s| s as i64).unwrap_or(-1);
        w.write(selected, "ComboBox Selected Item");
        Ok(())
    }

    fn update_rects(&mut self) {
        self.base.update_rect();
        let bb = self.base.bounding_box;
        self.rc_button = Rect::new(bb.right - bb.height(), bb.top, bb.right, bb.bottom);
        self.rc_text = Rect::new(bb.left, bb.top, self.rc_button.left, bb.bottom);
        self.dropdown
            .set_location(self.base.x, self.base.y + self.base.height);
        self.dropdown.set_size(self.base.width, self.drop_height);
    }

    fn set_elements(&mut self, gfx: Vec<ElementGfx>, fonts: Vec<ElementFont>) {
        let list_gfx = gfx.get(Self::ELEMENT_DROPDOWN..).map(|g| g.to_vec()).unwrap_or_default();
        self.dropdown.set_elements(list_gfx, fonts.clone());
        self.base.elements_gfx = gfx;
        self.base.elements_font = fonts;
    }

    fn contains_point(&self, pt: Point) -> bool {
        self.base.bounding_box.contains(pt) || self.in_dropdown(pt)
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
            MouseEventType::MouseMoved => {
                if self.in_dropdown(pt) {
                    if let Some(i) = self.dropdown.item_at(pt) {
                        if self.focused != Some(i) {
                            self.focused = Some(i);
                            self.dropdown.select_item(i);
                        }
                    }
                }
                self.opened && self.forward(event, modifiers)
            }
            MouseEventType::LeftButton | MouseEventType::DoubleLeftButton if event.down => {
                self.pressed(pt, modifiers, event.timestamp, ctx)
                    || (self.opened && self.forward(event, modifiers))
            }
            MouseEventType::LeftButton | MouseEventType::DoubleLeftButton => {
                let list = self.opened && self.forward(event, modifiers);
                self.released(pt, ctx) || list
            }
            MouseEventType::ScrollVert => {
                if self.in_dropdown(pt) {
                    self.forward(event, modifiers)
                } else if !self.opened && self.base.bounding_box.contains(pt) {
                    self.step(-event.lines_to_scroll.signum(), ctx);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn pressed(&mut self, pt: Point, _m: ModifierKeys, _ts: f64, ctx: &mut UiContext) -> bool {
        if self.in_dropdown(pt) {
            return match self.dropdown.item_at(pt) {
                Some(i) => {
                    self.select(i, ctx);
                    self.close();
                    true
                }
                // scroll bar or padding, left to the list
                None => false,
            };
        }
        if !self.core.press(&self.base, pt, ctx) {
            return false;
        }
        if self.opened {
            self.close();
        } else {
            self.open();
        }
        true
    }

    fn released(&mut self, pt: Point, _ctx: &mut UiContext) -> bool {
        let was_pressed = self.core.pressed;
        self.core.pressed = false;
        was_pressed && self.base.bounding_box.contains(pt)
    }

    fn handle_key_event(&mut self, key: char, down: bool, ctx: &mut UiContext) -> bool {
        if !self.base.is_interactive() || key != ' ' {
            return false;
        }
        if down {
            self.toggle_open(ctx);
        }
        true
    }

    fn handle_virtual_key(
        &mut self,
        key: VirtualKey,
        down: bool,
        _modifiers: ModifierKeys,
        ctx: &mut UiContext,
    ) -> bool {
        if !self.base.is_interactive() {
            return false;
        }
        match key {
            VirtualKey::Return => {
                if down {
                    self.toggle_open(ctx);
                }
                true
            }
            VirtualKey::Up | VirtualKey::Left => {
                if down {
                    self.step(-1, ctx);
                }
                true
            }
            VirtualKey::Down | VirtualKey::Right => {
                if down {
                    self.step(1, ctx);
                }
                true
            }
            VirtualKey::Escape if self.opened => {
                if down {
                    self.close();
                }
                true
            }
            _ => false,
        }
    }

    fn tick(&mut self, timestamp: f64, ctx: &mut UiContext) {
        if self.opened {
            self.dropdown.tick(timestamp, ctx);
        }
    }

    fn can_have_focus(&self) -> bool {
        self.base.is_interactive()
    }

    fn on_focus_out(&mut self) {
        self.base.has_focus = false;
        self.core.pressed = false;
        self.close();
    }

    fn hotkey(&self) -> Option<u32> {
        self.core.hotkey()
    }

    /// Advance the selection, wrapping to the first item
    fn on_hotkey(&mut self, ctx: &mut UiContext) {
        if self.opened {
            return;
        }
        if let Some(s) = self.selected {
            let next = (s + 1) % self.dropdown.num_items().max(1);
            self.select(next, ctx);
        }
    }

    fn is_capturing(&self) -> bool {
        self.core.pressed || (self.opened && self.dropdown.is_capturing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // drop-down at y=20, rows of 16px start at y=26
    fn combo() -> ComboBox<u8> {
        let mut cb = ComboBox::new(9, 0, 0, 100, 20, u32::from('c'));
        cb.add_item("Red", 1);
        cb.add_item("Green", 2);
        cb.add_item("Blue", 3);
        cb
    }

    fn click(cb: &mut ComboBox<u8>, pt: Point, ctx: &mut UiContext) {
        cb.handle_mouse_event(&MouseEvent::left_down(pt, 0.0), ModifierKeys::empty(), ctx);
        cb.handle_mouse_event(&MouseEvent::left_up(pt, 0.0), ModifierKeys::empty(), ctx);
    }

    #[test]
    fn test_first_item_is_selected() {
        let cb = combo();
        assert_eq!(cb.selected_index(), Some(0));
        assert_eq!(cb.get_selected_data(), Some(&1));
        assert_eq!(cb.dropdown().base().bounding_box, Rect::new(0, 20, 100, 120));
    }

    #[test]
    fn test_pick_item_closes_and_notifies() {
        let mut cb = combo();
        let mut ctx = UiContext::new();
        click(&mut cb, Point::new(10, 10), &mut ctx);
        assert!(cb.is_opened());
        assert!(ctx.focus_requested());
        assert!(cb.contains_point(Point::new(10, 60)));
        click(&mut cb, Point::new(20, 60), &mut ctx);
        assert!(!cb.is_opened());
        assert_eq!(cb.get_selected_data(), Some(&3));
        assert_eq!(
            ctx.events(),
            &[ControlEvent::SelectionChanged { id: 9, index: Some(2) }]
        );
        assert!(!cb.contains_point(Point::new(10, 60)));
    }

    #[test]
    fn test_hover_highlights_without_selecting() {
        let mut cb = combo();
        let mut ctx = UiContext::new();
        click(&mut cb, Point::new(10, 10), &mut ctx);
        cb.handle_mouse_event(&MouseEvent::moved(Point::new(20, 44), 0.1), ModifierKeys::empty(), &mut ctx);
        assert_eq!(cb.dropdown().selected_index(), Some(1));
        assert_eq!(cb.selected_index(), Some(0));
        // Return commits the highlighted item
        cb.handle_virtual_key(VirtualKey::Return, true, ModifierKeys::empty(), &mut ctx);
        assert!(!cb.is_opened());
        assert_eq!(cb.selected_index(), Some(1));
    }

    #[test]
    fn test_focus_loss_closes() {
        let mut cb = combo();
        let mut ctx = UiContext::new();
        cb.handle_key_event(' ', true, &mut ctx);
        assert!(cb.is_opened());
        cb.on_focus_out();
        assert!(!cb.is_opened());
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn test_wheel_keys_and_hotkey_change_closed_selection() {
        let mut cb = combo();
        let mut ctx = UiContext::new();
        let none = ModifierKeys::empty();
        cb.handle_mouse_event(&MouseEvent::scroll(Point::new(10, 10), -1, 0.0), none, &mut ctx);
        assert_eq!(cb.selected_index(), Some(1));
        cb.handle_virtual_key(VirtualKey::Down, true, none, &mut ctx);
        assert_eq!(cb.selected_index(), Some(2));
        cb.handle_virtual_key(VirtualKey::Down, true, none, &mut ctx);
        assert_eq!(ctx.events().len(), 2);
        assert_eq!(cb.hotkey(), Some(u32::from('c')));
        cb.on_hotkey(&mut ctx);
        assert_eq!(cb.selected_index(), Some(0));
    }

    #[test]
    fn test_remove_and_select_by_value() {
        let mut cb = combo();
        assert!(cb.set_selected_by_text("Blue"));
        assert!(!cb.set_selected_by_text("Cyan"));
        assert!(cb.remove_item(2).is_some());
        assert_eq!(cb.selected_index(), Some(1));
        assert!(cb.set_selected_by_data(&1));
        assert_eq!(cb.selected_item().map(|i| i.text.as_str()), Some("Red"));
        let mut other = ComboBox::new(10, 0, 0, 100, 20, 0);
        other.copy_items_from(&cb);
        assert_eq!(other.num_items(), 2);
        assert_eq!(other.item_data_by_text("Green"), Some(&2));
        cb.remove_all_items();
        assert_eq!(cb.get_selected_data(), None);
    }

    #[test]
    fn test_round_trip() {
        let mut cb = combo();
        cb.set_selected_by_index(2);
        cb.set_drop_height(64);
        let mut w = FieldWriter::new();
        cb.save(&mut w).unwrap();
        let text = w.finish();
        let back = ComboBox::<u8>::load(&mut FieldReader::new(&text)).unwrap();
        assert_eq!(back.num_items(), 3);
        assert_eq!(back.get_selected_data(), Some(&3));
        assert_eq!(back.drop_height(), 64);
        assert_eq!(back.hotkey(), Some(u32::from('c')));
    }
}
