// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! List box over items carrying a typed payload.
//!
//! Items are drawn in rows of `list_item_height` pixels inside the selection
//! area, an embedded scroll bar on the right picks the first visible row.
//! Single selection tracks one selected index; multi selection additionally
//! keeps a selected flag per item, Ctrl toggles one item and Shift extends
//! the selection from the last plain click.

use crate::config::engine_config;
use crate::event::{ModifierKeys, MouseEvent, MouseEventType, VirtualKey};
use crate::impl_control_base;
use crate::render::{style::Color, SpriteSet, TextFormat};
use crate::ui::{
    render_rect, render_text, Control, ControlBase, ControlEvent, ControlKind, ElementFont,
    ElementGfx, FieldReader, FieldWriter, ItemData, RenderContext, ScrollBar, UIResult, UiContext,
};
use crate::util::{Point, Rect};

/// One list entry
#[derive(Debug, Clone, PartialEq)]
pub struct Item<T> {
    pub text: String,
    pub data: T,
    /// row rect in dialog coordinates, valid while `visible`
    pub rc_active: Rect,
    pub visible: bool,
    pub selected: bool,
}

impl<T> Item<T> {
    pub fn new(text: &str, data: T) -> Self {
        Self {
            text: text.to_string(),
            data,
            rc_active: Rect::default(),
            visible: false,
            selected: false,
        }
    }
}

pub struct ListBox<T: ItemData> {
    base: ControlBase,
    scrollbar: ScrollBar,
    sb_width: i32,
    multi_selection: bool,
    selected: Option<usize>,
    /// anchor of a Shift extended selection
    sel_start: usize,
    drag: bool,
    items: Vec<Item<T>>,
    rc_selection: Rect,
    rc_text: Rect,
    item_height: i32,
    border: i32,
    margin: i32,
}

impl<T: ItemData> ListBox<T> {
    /// gfx element indices, the scroll bar takes the four following ones
    pub const ELEMENT_MAIN: usize = 0;
    pub const ELEMENT_SELECTION: usize = 1;
    pub const ELEMENT_SCROLLBAR: usize = 2;

    pub fn new(id: i32, x: i32, y: i32, width: i32, height: i32, multi_selection: bool) -> Self {
        let cfg = &engine_config().ui;
        let mut lb = Self {
            base: ControlBase::new(ControlKind::ListBox, id, x, y, width, height),
            scrollbar: ScrollBar::new(-1, x + width - cfg.scrollbar_width, y, cfg.scrollbar_width, height),
            sb_width: cfg.scrollbar_width,
            multi_selection,
            selected: None,
            sel_start: 0,
            drag: false,
            items: vec![],
            rc_selection: Rect::default(),
            rc_text: Rect::default(),
            item_height: cfg.list_item_height,
            border: cfg.list_border,
            margin: cfg.list_margin,
        };
        lb.scrollbar.set_track_range(0, 0);
        lb.update_rects();
        lb
    }

    pub fn load(r: &mut FieldReader) -> UIResult<Self> {
        let base = ControlBase::load(ControlKind::ListBox, r)?;
        let multi = r.read_bool("is ListBox MultiSelection")?;
        let mut lb = Self::new(base.id, base.x, base.y, base.width, base.height, multi);
        lb.base = base;
        lb.sb_width = r.read("ListBox ScrollBar Width")?;
        lb.border = r.read("ListBox Border")?;
        lb.margin = r.read("ListBox Margin")?;
        let count: usize = r.read("ListBox Item Count")?;
        for _ in 0..count {
            let text = r.read_string("ListBox Item Text")?;
            let data = r.read_json("ListBox Item Data")?;
            let mut item = Item::new(&text, data);
            item.selected = r.read_bool("is ListBox Item Selected")?;
            lb.items.push(item);
        }
        let selected: i64 = r.read("ListBox Selected Item")?;
        lb.selected = usize::try_from(selected).ok().filter(|&s| s < lb.items.len());
        lb.sel_start = lb.selected.unwrap_or(0);
        lb.scrollbar.set_track_range(0, lb.items.len() as i32);
        lb.update_rects();
        if let Some(s) = lb.selected {
            lb.show_item(s);
        }
        Ok(lb)
    }

    pub fn is_multi_selection(&self) -> bool {
        self.multi_selection
    }

    pub fn scrollbar(&self) -> &ScrollBar {
        &self.scrollbar
    }

    pub fn scrollbar_width(&self) -> i32 {
        self.sb_width
    }

    pub fn set_scrollbar_width(&mut self, width: i32) {
        self.sb_width = width;
        self.update_rects();
    }

    /// Padding around the selection area and around the text of a row
    pub fn set_border(&mut self, border: i32, margin: i32) {
        self.border = border;
        self.margin = margin;
        self.update_rects();
    }

    pub fn item_height(&self) -> i32 {
        self.item_height
    }

    pub fn set_item_height(&mut self, height: i32) {
        self.item_height = height;
        self.update_rects();
    }

    pub fn selection_rect(&self) -> Rect {
        self.rc_selection
    }

    pub fn add_item(&mut self, text: &str, data: T) {
        self.items.push(Item::new(text, data));
        self.items_changed();
    }

    /// Insert before `index`, appends when `index` is past the end
    pub fn insert_item(&mut self, index: usize, text: &str, data: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, Item::new(text, data));
        if let Some(s) = self.selected {
            if s >= index {
                self.selected = Some(s + 1);
            }
        }
        if self.items.len() > 1 && self.sel_start >= index {
            self.sel_start += 1;
        }
        self.items_changed();
    }

    pub fn remove_item(&mut self, index: usize) -> Option<Item<T>> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        if let Some(s) = self.selected {
            self.selected = if index < s {
                Some(s - 1)
            } else if s >= self.items.len() {
                self.items.len().checked_sub(1)
            } else {
                Some(s)
            };
        }
        if index < self.sel_start {
            self.sel_start -= 1;
        }
        self.sel_start = self.sel_start.min(self.items.len().saturating_sub(1));
        self.items_changed();
        Some(item)
    }

    /// Remove the first item with this text
    pub fn remove_item_by_text(&mut self, text: &str) -> Option<Item<T>> {
        let index = self.find_item(text, 0)?;
        self.remove_item(index)
    }

    /// Remove the first item with this payload
    pub fn remove_item_by_data(&mut self, data: &T) -> Option<Item<T>> {
        let index = self.items.iter().position(|i| &i.data == data)?;
        self.remove_item(index)
    }

    pub fn remove_all_items(&mut self) {
        self.items.clear();
        self.selected = None;
        self.sel_start = 0;
        self.items_changed();
    }

    /// First item at or after `start` with this text
    pub fn find_item(&self, text: &str, start: usize) -> Option<usize> {
        self.items
            .iter()
            .skip(start)
            .position(|i| i.text == text)
            .map(|p| p + start)
    }

    pub fn contains_item(&self, text: &str, start: usize) -> bool {
        self.find_item(text, start).is_some()
    }

    pub fn item(&self, index: usize) -> Option<&Item<T>> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    pub fn item_data(&self, index: usize) -> Option<&T> {
        self.items.get(index).map(|i| &i.data)
    }

    pub fn item_data_by_text(&self, text: &str) -> Option<&T> {
        self.find_item(text, 0).and_then(|i| self.item_data(i))
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Selected items in index order; the selected item in single mode
    pub fn selected_indices(&self) -> Vec<usize> {
        if self.multi_selection {
            self.items
                .iter()
                .enumerate()
                .filter(|(_, it)| it.selected)
                .map(|(i, _)| i)
                .collect()
        } else {
            self.selected.into_iter().collect()
        }
    }

    pub fn selected_data(&self) -> Option<&T> {
        self.selected.and_then(|i| self.item_data(i))
    }

    /// Programmatic selection, the item is scrolled into view, no event is
    /// emitted
    pub fn select_item(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.selected = Some(index);
        self.sel_start = index;
        for (i, it) in self.items.iter_mut().enumerate() {
            it.selected = i == index;
        }
        self.show_item(index);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        for it in self.items.iter_mut() {
            it.selected = false;
        }
    }

    pub fn show_item(&mut self, index: usize) {
        self.scrollbar.show_item(index as i32);
        self.layout_items();
    }

    /// Replace the items with copies of `other`'s
    pub fn copy_items_from(&mut self, other: &ListBox<T>) {
        self.items = other
            .items
            .iter()
            .map(|it| Item::new(&it.text, it.data.clone()))
            .collect();
        self.selected = None;
        self.sel_start = 0;
        self.items_changed();
    }

    /// Item under `pt`, only rows currently shown count
    pub fn item_at(&self, pt: Point) -> Option<usize> {
        if self.item_height <= 0
            || !self.rc_selection.contains(pt)
            || pt.y < self.rc_text.top
        {
            return None;
        }
        let row = (pt.y - self.rc_text.top) / self.item_height;
        if row >= self.scrollbar.page_size() {
            return None;
        }
        let index = (self.scrollbar.track_pos() + row) as usize;
        (index < self.items.len()).then_some(index)
    }

    fn items_changed(&mut self) {
        self.scrollbar.set_track_range(0, self.items.len() as i32);
        self.layout_items();
    }

    fn layout_items(&mut self) {
        let first = self.scrollbar.track_pos().max(0) as usize;
        let page = self.scrollbar.page_size().max(0) as usize;
        let (left, right, top, h) = (
            self.rc_selection.left,
            self.rc_selection.right,
            self.rc_text.top,
            self.item_height,
        );
        for (i, it) in self.items.iter_mut().enumerate() {
            it.visible = i >= first && i < first + page;
            if it.visible {
                let y = top + (i - first) as i32 * h;
                it.rc_active = Rect::new(left, y, right, y + h);
            }
        }
    }

    /// Selection change from user input
    fn select_from_input(&mut self, index: usize, modifiers: ModifierKeys, ctx: &mut UiContext) {
        self.selected = Some(index);
        let shift = modifiers.contains(ModifierKeys::SHIFT);
        let ctrl = modifiers.contains(ModifierKeys::CTRL);
        if !shift {
            self.sel_start = index;
        }
        if self.multi_selection && (shift || ctrl) {
            if ctrl && !shift {
                self.items[index].selected = !self.items[index].selected;
            } else {
                let (lo, hi) = if self.sel_start <= index {
                    (self.sel_start, index)
                } else {
                    (index, self.sel_start)
                };
                for (i, it) in self.items.iter_mut().enumerate() {
                    if (lo..=hi).contains(&i) {
                        it.selected = true;
                    } else if !ctrl {
                        it.selected = false;
                    }
                }
            }
        } else {
            for (i, it) in self.items.iter_mut().enumerate() {
                it.selected = i == index;
            }
        }
        ctx.emit(ControlEvent::ListBoxChanged { id: self.base.id });
    }

    /// Drag selection, scrolling when the cursor leaves the rows
    fn drag_to(&mut self, pt: Point, ctx: &mut UiContext) {
        if self.items.is_empty() {
            return;
        }
        let target = if pt.y < self.rc_text.top {
            self.scrollbar.scroll(-1);
            self.scrollbar.track_pos() as usize
        } else if pt.y >= self.rc_text.bottom {
            self.scrollbar.scroll(1);
            let last = self.scrollbar.track_pos() + self.scrollbar.page_size() - 1;
            (last.max(0) as usize).min(self.items.len() - 1)
        } else {
            let row = (pt.y - self.rc_text.top) / self.item_height.max(1);
            let index = (self.scrollbar.track_pos() + row).max(0) as usize;
            index.min(self.items.len() - 1)
        };
        self.layout_items();
        if self.selected != Some(target) {
            self.select_from_input(target, ModifierKeys::empty(), ctx);
        }
    }

    fn handle_mouse(&mut self, event: &MouseEvent, modifiers: ModifierKeys, ctx: &mut UiContext) -> bool {
        let pt = event.cursor_pos;
        if event.is_left_button() && event.down && self.contains_point(pt) && !self.base.has_focus {
            ctx.request_focus();
        }

        // the scroll bar gets the first chance, its own events stay internal
        let mut sb_ctx = UiContext::new();
        if self.scrollbar.handle_mouse_event(event, modifiers, &mut sb_ctx) {
            return true;
        }

        match event.kind {
            MouseEventType::LeftButton | MouseEventType::DoubleLeftButton if event.down => {
                if !self.contains_point(pt) {
                    return false;
                }
                if let Some(index) = self.item_at(pt) {
                    self.drag = true;
                    if event.kind == MouseEventType::DoubleLeftButton {
                        ctx.emit(ControlEvent::ItemDoubleClicked {
                            id: self.base.id,
                            index,
                        });
                        return true;
                    }
                    self.select_from_input(index, modifiers, ctx);
                }
                true
            }
            MouseEventType::LeftButton | MouseEventType::DoubleLeftButton => {
                let was_dragging = self.drag;
                self.drag = false;
                was_dragging
            }
            MouseEventType::MouseMoved if self.drag => {
                if !self.multi_selection {
                    self.drag_to(pt, ctx);
                }
                true
            }
            MouseEventType::ScrollVert if self.contains_point(pt) => {
                self.scrollbar.scroll(-event.lines_to_scroll);
                true
            }
            _ => false,
        }
    }
}

impl<T: ItemData> Control for ListBox<T> {
    impl_control_base!(base);

    fn render(&self, front: &mut SpriteSet, top: &mut SpriteSet, ctx: &RenderContext) {
        let gfx = &self.base.elements_gfx;
        if !self.base.visible || gfx.len() < 2 {
            return;
        }
        let tint = if self.base.enabled {
            Color::WHITE
        } else {
            Color::gray(0.5)
        };
        render_rect(
            &mut front.normal,
            self.base.bounding_box,
            &gfx[Self::ELEMENT_MAIN],
            tint,
            ctx.offset,
        );
        let font = ctx.font(self.base.elements_font.first());
        for (i, it) in self.items.iter().enumerate().filter(|(_, it)| it.visible) {
            let selected = if self.multi_selection {
                it.selected
            } else {
                self.selected == Some(i)
            };
            let color = if selected {
                render_rect(
                    &mut front.normal,
                    it.rc_active,
                    &gfx[Self::ELEMENT_SELECTION],
                    tint,
                    ctx.offset,
                );
                Color::BLACK
            } else {
                Color::WHITE
            };
            if let Some(font) = font {
                let mut rc = it.rc_active;
                rc.inflate(-self.margin, 0);
                render_text(&mut front.text, font, &it.text, color, rc, ctx.offset, TextFormat::Left);
            }
        }
        self.scrollbar.render(front, top, ctx);
    }

    fn save(&self, w: &mut FieldWriter) -> UIResult<()> {
        self.base.save(w);
        w.write_bool(self.multi_selection, "is ListBox MultiSelection");
        w.write(self.sb_width, "ListBox ScrollBar Width");
        w.write(self.border, "ListBox Border");
        w.write(self.margin, "ListBox Margin");
        w.write(self.items.len(), "ListBox Item Count");
        for it in &self.items {
            w.write(&it.text, "ListBox Item Text");
            w.write_json(&it.data, "ListBox Item Data")?;
            w.write_bool(it.selected, "is ListBox Item Selected");
        }
        let selected = self.selected.map(|s| s as i64).unwrap_or(-1);
        w.write(selected, "ListBox Selected Item");
        Ok(())
    }

    fn update_rects(&mut self) {
        self.base.update_rect();
        let bb = self.base.bounding_box;
        self.rc_selection = bb;
        self.rc_selection.right -= self.sb_width;
        self.rc_selection.inflate(-self.border, -self.border);
        self.rc_text = self.rc_selection;
        self.rc_text.inflate(-self.margin, 0);

        self.scrollbar.set_location(bb.right - self.sb_width, bb.top);
        self.scrollbar.set_size(self.sb_width, self.base.height);
        let page = if self.item_height > 0 {
            self.rc_text.height() / self.item_height
        } else {
            0
        };
        self.scrollbar.set_page_size(page);
        if let Some(s) = self.selected {
            self.scrollbar.show_item(s as i32);
        }
        self.layout_items();
    }

    fn set_elements(&mut self, gfx: Vec<ElementGfx>, fonts: Vec<ElementFont>) {
        let sb_gfx = gfx.get(Self::ELEMENT_SCROLLBAR..).map(|g| g.to_vec()).unwrap_or_default();
        self.scrollbar.set_elements(sb_gfx, vec![]);
        self.base.elements_gfx = gfx;
        self.base.elements_font = fonts;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.base.enabled = enabled;
        self.scrollbar.set_enabled(enabled);
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
        let handled = self.handle_mouse(event, modifiers, ctx);
        self.layout_items();
        handled
    }

    fn handle_virtual_key(
        &mut self,
        key: VirtualKey,
        down: bool,
        modifiers: ModifierKeys,
        ctx: &mut UiContext,
    ) -> bool {
        if !self.base.is_interactive() || !down || self.items.is_empty() {
            return false;
        }
        let current = self.selected.map(|s| s as i32).unwrap_or(-1);
        let page = self.scrollbar.page_size() - 1;
        let target = match key {
            VirtualKey::Up | VirtualKey::Left => current - 1,
            VirtualKey::Down | VirtualKey::Right => current + 1,
            VirtualKey::PageUp => current - page,
            VirtualKey::PageDown => current + page,
            VirtualKey::Home => 0,
            VirtualKey::End => self.items.len() as i32 - 1,
            _ => return false,
        };
        let target = target.clamp(0, self.items.len() as i32 - 1) as usize;
        if self.selected != Some(target) {
            let modifiers = if self.multi_selection {
                modifiers & ModifierKeys::SHIFT
            } else {
                ModifierKeys::empty()
            };
            self.select_from_input(target, modifiers, ctx);
        }
        self.show_item(target);
        true
    }

    fn tick(&mut self, timestamp: f64, _ctx: &mut UiContext) {
        let before = self.scrollbar.track_pos();
        let mut sb_ctx = UiContext::new();
        self.scrollbar.tick(timestamp, &mut sb_ctx);
        if self.scrollbar.track_pos() != before {
            self.layout_items();
        }
    }

    fn can_have_focus(&self) -> bool {
        self.base.is_interactive()
    }

    fn on_focus_out(&mut self) {
        self.base.has_focus = false;
        self.drag = false;
    }

    fn is_capturing(&self) -> bool {
        self.drag || self.scrollbar.is_capturing()
    }
}

impl<T: ItemData> std::fmt::Debug for ListBox<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListBox")
            .field("id", &self.base.id)
            .field("items", &self.items.len())
            .field("selected", &self.selected)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // selection area 6..78 x 6..64, rows of 16px starting at y=6, 3 rows a page
    fn list(multi: bool) -> ListBox<i32> {
        let mut lb = ListBox::new(3, 0, 0, 100, 70, multi);
        for i in 0..10 {
            lb.add_item(&format!("item{}", i), i * 10);
        }
        lb
    }

    fn row(r: i32) -> Point {
        Point::new(20, 6 + r * 16 + 2)
    }

    fn click(lb: &mut ListBox<i32>, pt: Point, m: ModifierKeys, ctx: &mut UiContext) {
        lb.handle_mouse_event(&MouseEvent::left_down(pt, 0.0), m, ctx);
        lb.handle_mouse_event(&MouseEvent::left_up(pt, 0.0), m, ctx);
    }

    #[test]
    fn test_geometry() {
        let lb = list(false);
        assert_eq!(lb.selection_rect(), Rect::new(6, 6, 78, 64));
        assert_eq!(lb.scrollbar().page_size(), 3);
        assert_eq!(lb.scrollbar().track_range(), (0, 10));
        assert!(lb.item(2).unwrap().visible);
        assert!(!lb.item(3).unwrap().visible);
        assert_eq!(lb.item(1).unwrap().rc_active, Rect::new(6, 22, 78, 38));
    }

    #[test]
    fn test_click_selects_and_double_click_notifies() {
        let mut lb = list(false);
        let mut ctx = UiContext::new();
        click(&mut lb, row(1), ModifierKeys::empty(), &mut ctx);
        assert_eq!(lb.selected_index(), Some(1));
        assert_eq!(lb.selected_data(), Some(&10));
        assert!(ctx.focus_requested());
        let dbl = MouseEvent::new(MouseEventType::DoubleLeftButton, row(1), true, 0.2, 0);
        lb.handle_mouse_event(&dbl, ModifierKeys::empty(), &mut ctx);
        assert_eq!(
            ctx.events(),
            &[
                ControlEvent::ListBoxChanged { id: 3 },
                ControlEvent::ItemDoubleClicked { id: 3, index: 1 },
            ]
        );
        // below the last row of a short list hits nothing
        let mut short = ListBox::new(4, 0, 0, 100, 70, false);
        short.add_item("only", 1);
        let mut ctx = UiContext::new();
        click(&mut short, row(2), ModifierKeys::empty(), &mut ctx);
        assert_eq!(short.selected_index(), None);
    }

    #[test]
    fn test_keys_scroll_selection_into_view() {
        let mut lb = list(false);
        let mut ctx = UiContext::new();
        let none = ModifierKeys::empty();
        lb.handle_virtual_key(VirtualKey::End, true, none, &mut ctx);
        assert_eq!(lb.selected_index(), Some(9));
        assert_eq!(lb.scrollbar().track_pos(), 7);
        assert!(lb.item(9).unwrap().visible);
        assert!(!lb.item(0).unwrap().visible);
        lb.handle_virtual_key(VirtualKey::PageUp, true, none, &mut ctx);
        assert_eq!(lb.selected_index(), Some(7));
        lb.handle_virtual_key(VirtualKey::Home, true, none, &mut ctx);
        assert_eq!(lb.selected_index(), Some(0));
        assert_eq!(lb.scrollbar().track_pos(), 0);
        // already at the top, nothing changes
        lb.handle_virtual_key(VirtualKey::Up, true, none, &mut ctx);
        assert_eq!(ctx.events().len(), 3);
    }

    #[test]
    fn test_wheel_scrolls() {
        let mut lb = list(false);
        let mut ctx = UiContext::new();
        lb.handle_mouse_event(&MouseEvent::scroll(row(0), -4, 0.0), ModifierKeys::empty(), &mut ctx);
        assert_eq!(lb.scrollbar().track_pos(), 4);
        assert_eq!(lb.item_at(row(0)), Some(4));
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn test_drag_moves_single_selection() {
        let mut lb = list(false);
        let mut ctx = UiContext::new();
        lb.handle_mouse_event(&MouseEvent::left_down(row(0), 0.0), ModifierKeys::empty(), &mut ctx);
        assert!(lb.is_capturing());
        lb.handle_mouse_event(&MouseEvent::moved(row(2), 0.1), ModifierKeys::empty(), &mut ctx);
        assert_eq!(lb.selected_index(), Some(2));
        // below the rows scrolls one down
        lb.handle_mouse_event(&MouseEvent::moved(Point::new(20, 69), 0.2), ModifierKeys::empty(), &mut ctx);
        assert_eq!(lb.scrollbar().track_pos(), 1);
        assert_eq!(lb.selected_index(), Some(3));
        lb.handle_mouse_event(&MouseEvent::left_up(Point::new(20, 69), 0.3), ModifierKeys::empty(), &mut ctx);
        assert!(!lb.is_capturing());
    }

    #[test]
    fn test_multi_selection_modifiers() {
        let mut lb = list(true);
        let mut ctx = UiContext::new();
        click(&mut lb, row(0), ModifierKeys::empty(), &mut ctx);
        click(&mut lb, row(2), ModifierKeys::CTRL, &mut ctx);
        assert_eq!(lb.selected_indices(), vec![0, 2]);
        click(&mut lb, row(1), ModifierKeys::SHIFT, &mut ctx);
        assert_eq!(lb.selected_indices(), vec![1, 2]);
        click(&mut lb, row(2), ModifierKeys::CTRL, &mut ctx);
        assert_eq!(lb.selected_indices(), vec![1]);
        click(&mut lb, row(0), ModifierKeys::empty(), &mut ctx);
        assert_eq!(lb.selected_indices(), vec![0]);
    }

    #[test]
    fn test_shift_anchor_follows_removed_rows() {
        let mut lb = list(true);
        let mut ctx = UiContext::new();
        click(&mut lb, row(2), ModifierKeys::empty(), &mut ctx);
        lb.remove_item(0);
        assert_eq!(lb.selected_data(), Some(&20));
        click(&mut lb, row(2), ModifierKeys::SHIFT, &mut ctx);
        assert_eq!(lb.selected_indices(), vec![1, 2]);
    }

    #[test]
    fn test_insert_and_remove_keep_selection_on_item() {
        let mut lb = list(false);
        lb.select_item(5);
        lb.insert_item(0, "head", -1);
        assert_eq!(lb.selected_data(), Some(&50));
        assert_eq!(lb.remove_item(0).map(|i| i.text), Some("head".to_string()));
        assert_eq!(lb.selected_index(), Some(5));
        assert!(lb.remove_item_by_data(&50).is_some());
        assert_eq!(lb.selected_index(), Some(5));
        assert_eq!(lb.selected_data(), Some(&60));
        assert!(lb.remove_item_by_text("item9").is_some());
        assert!(lb.remove_item_by_text("item9").is_none());
        assert_eq!(lb.find_item("item8", 0), Some(7));
        assert_eq!(lb.find_item("item1", 2), None);
        assert_eq!(lb.item_data_by_text("item2"), Some(&20));
        assert_eq!(lb.scrollbar().track_range(), (0, 8));
        lb.remove_all_items();
        assert_eq!(lb.selected_index(), None);
        assert_eq!(lb.num_items(), 0);
    }

    #[test]
    fn test_round_trip() {
        let mut lb = list(true);
        let mut ctx = UiContext::new();
        click(&mut lb, row(0), ModifierKeys::empty(), &mut ctx);
        click(&mut lb, row(2), ModifierKeys::CTRL, &mut ctx);
        let mut w = FieldWriter::new();
        lb.save(&mut w).unwrap();
        let text = w.finish();
        let back = ListBox::<i32>::load(&mut FieldReader::new(&text)).unwrap();
        assert!(back.is_multi_selection());
        assert_eq!(back.num_items(), 10);
        assert_eq!(back.item_data(7), Some(&70));
        assert_eq!(back.selected_indices(), vec![0, 2]);
        assert_eq!(back.selected_index(), Some(2));
    }
}
