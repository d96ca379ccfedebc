// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Dialog owns a set of controls and coordinates them.
//!
//! Control order is paint order: later controls are drawn above earlier ones
//! and are hit-tested first. Control coordinates are relative to the dialog
//! client area, which starts below the caption bar. The dialog applies what
//! a handler asked for through its `UiContext` (focus, radio group
//! clearing) and queues the emitted events until `drain_events`.

use crate::asset::AssetManager;
use crate::config::engine_config;
use crate::event::{ModifierKeys, MouseEvent, MouseEventType, VirtualKey};
use crate::render::SpriteSet;
use crate::ui::event::UiRequest;
use crate::ui::{
    Button, Checkbox, ComboBox, Control, ControlEvent, ControlKind, ElementFont, ElementGfx,
    FieldReader, FieldWriter, ItemData, ListBox, RadioButton, RenderContext, ScrollBar, Slider,
    StaticText, UIError, UIResult, UiContext,
};
use crate::util::Point;
use log::{debug, info, warn};
use num_traits::{FromPrimitive, ToPrimitive};
use std::collections::{HashMap, VecDeque};
use std::path::Path;

pub struct Dialog {
    controls: Vec<Box<dyn Control>>,
    focused: Option<usize>,
    mouse_over: Option<usize>,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    caption: String,
    caption_height: i32,
    visible: bool,
    default_elements: HashMap<ControlKind, (Vec<ElementGfx>, Vec<ElementFont>)>,
    events: VecDeque<ControlEvent>,
}

impl Dialog {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            controls: vec![],
            focused: None,
            mouse_over: None,
            x: 0,
            y: 0,
            width,
            height,
            caption: String::new(),
            caption_height: engine_config().ui.caption_height,
            visible: true,
            default_elements: HashMap::new(),
            events: VecDeque::new(),
        }
    }

    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_location(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: &str) {
        self.caption = caption.to_string();
    }

    pub fn caption_height(&self) -> i32 {
        self.caption_height
    }

    pub fn set_caption_height(&mut self, height: i32) {
        self.caption_height = height;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Screen position of the client area
    pub fn client_offset(&self) -> Point {
        Point::new(self.x, self.y + self.caption_height)
    }

    /// Elements given to controls of `kind` added from now on that bring
    /// none of their own
    pub fn set_default_elements(
        &mut self,
        kind: ControlKind,
        gfx: Vec<ElementGfx>,
        fonts: Vec<ElementFont>,
    ) {
        self.default_elements.insert(kind, (gfx, fonts));
    }

    fn apply_defaults(&self, control: &mut dyn Control) {
        if !control.base().elements_gfx.is_empty() || !control.base().elements_font.is_empty() {
            return;
        }
        if let Some((gfx, fonts)) = self.default_elements.get(&control.kind()) {
            control.set_elements(gfx.clone(), fonts.clone());
        }
    }

    /// Take ownership of `control`; ids must be unique except -1
    pub fn add<C: Control>(&mut self, mut control: C) -> UIResult<&mut C> {
        let id = control.id();
        if id != -1 && self.controls.iter().any(|c| c.id() == id) {
            warn!("dialog: control id {} already in use", id);
            return Err(UIError::DuplicateControlId(id));
        }
        self.apply_defaults(&mut control);
        self.controls.push(Box::new(control));
        self.controls
            .last_mut()
            .and_then(|c| c.as_any_mut().downcast_mut::<C>())
            .ok_or(UIError::WrongControlType(id))
    }

    pub fn add_static(
        &mut self,
        id: i32,
        text: &str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> UIResult<&mut StaticText> {
        self.add(StaticText::new(id, text, x, y, width, height))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_button(
        &mut self,
        id: i32,
        text: &str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        hotkey: u32,
    ) -> UIResult<&mut Button> {
        self.add(Button::new(id, text, x, y, width, height, hotkey))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_checkbox(
        &mut self,
        id: i32,
        text: &str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        hotkey: u32,
        checked: bool,
    ) -> UIResult<&mut Checkbox> {
        self.add(Checkbox::new(id, text, x, y, width, height, hotkey, checked))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_radio_button(
        &mut self,
        id: i32,
        group: u32,
        text: &str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        hotkey: u32,
        checked: bool,
    ) -> UIResult<&mut RadioButton> {
        self.add(RadioButton::new(id, text, x, y, width, height, hotkey, checked, group))
    }

    pub fn add_combo_box<T: ItemData>(
        &mut self,
        id: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        hotkey: u32,
    ) -> UIResult<&mut ComboBox<T>> {
        self.add(ComboBox::new(id, x, y, width, height, hotkey))
    }

    pub fn add_list_box<T: ItemData>(
        &mut self,
        id: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        multi_selection: bool,
    ) -> UIResult<&mut ListBox<T>> {
        self.add(ListBox::new(id, x, y, width, height, multi_selection))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_slider(
        &mut self,
        id: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        min: i32,
        max: i32,
        value: i32,
    ) -> UIResult<&mut Slider> {
        self.add(Slider::new(id, x, y, width, height, min, max, value))
    }

    pub fn add_scroll_bar(
        &mut self,
        id: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> UIResult<&mut ScrollBar> {
        self.add(ScrollBar::new(id, x, y, width, height))
    }

    fn index_of(&self, id: i32) -> Option<usize> {
        self.controls.iter().position(|c| c.id() == id)
    }

    pub fn control(&self, id: i32) -> Option<&dyn Control> {
        self.index_of(id).map(|i| self.controls[i].as_ref())
    }

    pub fn control_mut(&mut self, id: i32) -> Option<&mut dyn Control> {
        let i = self.index_of(id)?;
        Some(self.controls[i].as_mut())
    }

    /// Typed access to a control
    pub fn control_as<C: Control>(&self, id: i32) -> UIResult<&C> {
        self.control(id)
            .ok_or(UIError::ControlNotFound(id))?
            .as_any()
            .downcast_ref::<C>()
            .ok_or(UIError::WrongControlType(id))
    }

    pub fn control_as_mut<C: Control>(&mut self, id: i32) -> UIResult<&mut C> {
        self.control_mut(id)
            .ok_or(UIError::ControlNotFound(id))?
            .as_any_mut()
            .downcast_mut::<C>()
            .ok_or(UIError::WrongControlType(id))
    }

    pub fn controls(&self) -> impl Iterator<Item = &dyn Control> {
        self.controls.iter().map(|c| c.as_ref())
    }

    pub fn num_controls(&self) -> usize {
        self.controls.len()
    }

    pub fn remove_control(&mut self, id: i32) -> Option<Box<dyn Control>> {
        let index = self.index_of(id)?;
        if self.focused == Some(index) {
            self.clear_focus();
        }
        let shift = |slot: Option<usize>| match slot {
            Some(i) if i == index => None,
            Some(i) if i > index => Some(i - 1),
            other => other,
        };
        self.focused = shift(self.focused);
        self.mouse_over = shift(self.mouse_over);
        Some(self.controls.remove(index))
    }

    pub fn remove_all_controls(&mut self) {
        self.clear_focus();
        self.mouse_over = None;
        self.controls.clear();
    }

    pub fn focused_id(&self) -> Option<i32> {
        self.focused.map(|i| self.controls[i].id())
    }

    /// Move focus to control `id`; false when it cannot take focus
    pub fn focus_control(&mut self, id: i32) -> bool {
        match self.index_of(id) {
            Some(i) if self.controls[i].can_have_focus() => {
                self.request_focus(i);
                true
            }
            _ => false,
        }
    }

    pub fn clear_focus(&mut self) {
        if let Some(i) = self.focused.take() {
            let from = self.controls[i].id();
            self.controls[i].on_focus_out();
            self.events.push_back(ControlEvent::FocusChanged {
                from: Some(from),
                to: None,
            });
        }
    }

    fn request_focus(&mut self, index: usize) {
        if self.focused == Some(index) || !self.controls[index].can_have_focus() {
            return;
        }
        let from = self.focused.map(|f| self.controls[f].id());
        if let Some(f) = self.focused {
            self.controls[f].on_focus_out();
        }
        self.controls[index].on_focus_in();
        self.focused = Some(index);
        let to = self.controls[index].id();
        debug!("dialog: focus {:?} -> {}", from, to);
        self.events.push_back(ControlEvent::FocusChanged { from, to: Some(to) });
    }

    /// Uncheck every radio button of `group` without notifying
    pub fn clear_radio_button_group(&mut self, group: u32) {
        self.clear_radio_group_except(group, None);
    }

    fn clear_radio_group_except(&mut self, group: u32, keep: Option<usize>) {
        for (i, c) in self.controls.iter_mut().enumerate() {
            if Some(i) == keep {
                continue;
            }
            if let Some(rb) = c.as_any_mut().downcast_mut::<RadioButton>() {
                if rb.group() == group {
                    rb.set_checked(false);
                }
            }
        }
    }

    /// Carry out what control `index` asked for, queue its events
    fn apply_context(&mut self, index: usize, mut ctx: UiContext) {
        for req in ctx.take_requests() {
            match req {
                UiRequest::Focus => self.request_focus(index),
                UiRequest::ClearRadioGroup(group) => {
                    self.clear_radio_group_except(group, Some(index))
                }
            }
        }
        self.events.extend(ctx.take_events());
    }

    fn dispatch_mouse(&mut self, index: usize, event: &MouseEvent, modifiers: ModifierKeys) -> bool {
        let mut ctx = UiContext::new();
        let handled = self.controls[index].handle_mouse_event(event, modifiers, &mut ctx);
        self.apply_context(index, ctx);
        handled
    }

    /// Topmost interactive control under `pt`
    fn control_at(&self, pt: Point) -> Option<usize> {
        self.controls
            .iter()
            .rposition(|c| c.is_visible() && c.is_enabled() && c.contains_point(pt))
    }

    fn update_mouse_over(&mut self, pt: Point) {
        let over = self.control_at(pt);
        if over == self.mouse_over {
            return;
        }
        if let Some(old) = self.mouse_over {
            self.controls[old].on_mouse_leave();
        }
        if let Some(new) = over {
            self.controls[new].on_mouse_enter();
        }
        self.mouse_over = over;
    }

    /// Route a mouse event in screen coordinates, true when a control used it.
    ///
    /// A control in the middle of a press or drag sees the event first, then
    /// the focused control when the cursor is over it, then the topmost
    /// control under the cursor. A left press nobody handles clears focus.
    pub fn handle_mouse_event(&mut self, event: MouseEvent, modifiers: ModifierKeys) -> bool {
        if !self.visible {
            return false;
        }
        let offset = self.client_offset();
        let event = event.translated(Point::new(-offset.x, -offset.y));
        let pt = event.cursor_pos;
        if event.kind == MouseEventType::MouseMoved {
            self.update_mouse_over(pt);
        }

        let captured = self.controls.iter().position(|c| c.is_capturing());
        if let Some(i) = captured {
            if self.dispatch_mouse(i, &event, modifiers) {
                return true;
            }
        }

        let focused = self.focused.filter(|&f| Some(f) != captured);
        if let Some(f) = focused {
            if self.controls[f].contains_point(pt) && self.dispatch_mouse(f, &event, modifiers) {
                return true;
            }
        }

        if let Some(i) = self.control_at(pt) {
            if Some(i) != captured && Some(i) != focused && self.dispatch_mouse(i, &event, modifiers) {
                return true;
            }
        }

        if event.is_left_button() && event.down {
            self.clear_focus();
        }
        false
    }

    /// Character key: the focused control first, then hotkeys on key-down
    pub fn handle_key_event(&mut self, key: char, down: bool) -> bool {
        if !self.visible {
            return false;
        }
        if let Some(f) = self.focused {
            let mut ctx = UiContext::new();
            let handled = self.controls[f].handle_key_event(key, down, &mut ctx);
            self.apply_context(f, ctx);
            if handled {
                return true;
            }
        }
        if !down {
            return false;
        }
        let wanted = key.to_ascii_uppercase();
        let hit = self.controls.iter().position(|c| {
            c.is_visible()
                && c.is_enabled()
                && c.hotkey()
                    .and_then(char::from_u32)
                    .map(|h| h.to_ascii_uppercase() == wanted)
                    .unwrap_or(false)
        });
        match hit {
            Some(i) => {
                let mut ctx = UiContext::new();
                self.controls[i].on_hotkey(&mut ctx);
                self.apply_context(i, ctx);
                true
            }
            None => false,
        }
    }

    /// Symbolic key: the focused control first, then Tab / Shift+Tab move
    /// focus
    pub fn handle_virtual_key(
        &mut self,
        key: VirtualKey,
        down: bool,
        modifiers: ModifierKeys,
    ) -> bool {
        if !self.visible {
            return false;
        }
        if let Some(f) = self.focused {
            let mut ctx = UiContext::new();
            let handled = self.controls[f].handle_virtual_key(key, down, modifiers, &mut ctx);
            self.apply_context(f, ctx);
            if handled {
                return true;
            }
        }
        if key == VirtualKey::Tab && down {
            return self.cycle_focus(!modifiers.contains(ModifierKeys::SHIFT));
        }
        false
    }

    fn cycle_focus(&mut self, forward: bool) -> bool {
        let n = self.controls.len();
        if n == 0 {
            return false;
        }
        let start = self.focused.unwrap_or(if forward { n - 1 } else { 0 });
        for k in 1..=n {
            let i = if forward { (start + k) % n } else { (start + n - k) % n };
            if self.controls[i].can_have_focus() {
                self.request_focus(i);
                return true;
            }
        }
        false
    }

    /// Tick every visible control, then render them in paint order
    pub fn render(
        &mut self,
        front: &mut SpriteSet,
        top: &mut SpriteSet,
        assets: &AssetManager,
        timestamp: f64,
    ) {
        if !self.visible {
            return;
        }
        for i in 0..self.controls.len() {
            if self.controls[i].is_visible() {
                let mut ctx = UiContext::new();
                self.controls[i].tick(timestamp, &mut ctx);
                self.apply_context(i, ctx);
            }
        }
        let ctx = RenderContext {
            offset: self.client_offset(),
            assets,
            timestamp,
        };
        for c in self.controls.iter().filter(|c| c.is_visible()) {
            c.render(front, top, &ctx);
        }
    }

    /// Events emitted since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<ControlEvent> {
        self.events.drain(..).collect()
    }

    pub fn save(&self) -> UIResult<String> {
        let mut w = FieldWriter::new();
        w.write(&self.caption, "Dialog Caption");
        w.write(self.caption_height, "Dialog Caption Height");
        w.write(self.x, "Dialog X");
        w.write(self.y, "Dialog Y");
        w.write(self.width, "Dialog Width");
        w.write(self.height, "Dialog Height");
        w.write_bool(self.visible, "is Dialog Visible");
        w.write(self.controls.len(), "Dialog Control Count");
        for c in &self.controls {
            let kind = c.kind().to_i64().unwrap_or(-1);
            w.write(kind, "Control Type");
            c.save(&mut w)?;
        }
        debug!("dialog: saved {} controls", self.controls.len());
        Ok(w.finish())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> UIResult<()> {
        let text = self.save()?;
        std::fs::write(path.as_ref(), text)?;
        info!("dialog saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Replace this dialog's properties and controls with the ones in
    /// `text`. `T` is the item payload of list and combo boxes. Nothing
    /// changes when the text is malformed.
    pub fn load<T: ItemData>(&mut self, text: &str) -> UIResult<()> {
        let mut r = FieldReader::new(text);
        let caption = r.read_string("Dialog Caption")?;
        let caption_height = r.read("Dialog Caption Height")?;
        let x = r.read("Dialog X")?;
        let y = r.read("Dialog Y")?;
        let width = r.read("Dialog Width")?;
        let height = r.read("Dialog Height")?;
        let visible = r.read_bool("is Dialog Visible")?;
        let count: usize = r.read("Dialog Control Count")?;

        let mut controls: Vec<Box<dyn Control>> = Vec::new();
        for _ in 0..count {
            let raw: i64 = r.read("Control Type")?;
            let kind = ControlKind::from_i64(raw).ok_or(UIError::UnknownControlKind(raw))?;
            let mut control: Box<dyn Control> = match kind {
                ControlKind::Static => Box::new(StaticText::load(&mut r)?),
                ControlKind::Button => Box::new(Button::load(&mut r)?),
                ControlKind::Checkbox => Box::new(Checkbox::load(&mut r)?),
                ControlKind::RadioButton => Box::new(RadioButton::load(&mut r)?),
                ControlKind::ComboBox => Box::new(ComboBox::<T>::load(&mut r)?),
                ControlKind::ListBox => Box::new(ListBox::<T>::load(&mut r)?),
                ControlKind::Slider => Box::new(Slider::load(&mut r)?),
                ControlKind::ScrollBar => Box::new(ScrollBar::load(&mut r)?),
                ControlKind::EditBox => return Err(UIError::UnsupportedControlKind(kind)),
            };
            let id = control.id();
            if id != -1 && controls.iter().any(|c| c.id() == id) {
                return Err(UIError::DuplicateControlId(id));
            }
            self.apply_defaults(control.as_mut());
            controls.push(control);
        }

        self.caption = caption;
        self.caption_height = caption_height;
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self.visible = visible;
        self.controls = controls;
        self.focused = None;
        self.mouse_over = None;
        info!("dialog: loaded {} controls", count);
        Ok(())
    }

    pub fn load_from_file<T: ItemData, P: AsRef<Path>>(&mut self, path: P) -> UIResult<()> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.load::<T>(&text)
    }
}
