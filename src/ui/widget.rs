// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Core control system: the `Control` trait every widget implements and the
//! state all of them share.

use crate::asset::{AssetManager, FontId, Texture};
use crate::event::{ModifierKeys, MouseEvent, VirtualKey};
use crate::render::{style::Color, Font, Sprite, SpriteSet, TextFormat};
use crate::ui::{FieldReader, FieldWriter, UIResult, UiContext};
use crate::util::{Point, Rect};
use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Concrete control type, the value is the persisted discriminant
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize,
)]
pub enum ControlKind {
    Static = 0,
    Button = 1,
    Checkbox = 2,
    RadioButton = 3,
    ComboBox = 4,
    ListBox = 5,
    /// reserved, no editbox control exists
    EditBox = 6,
    Slider = 7,
    ScrollBar = 8,
}

/// Texture and sub-rect for one visual part of a control
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementGfx {
    pub texture: Texture,
    pub rc_texture: Rect,
}

impl ElementGfx {
    pub fn new(texture: Texture, rc_texture: Rect) -> Self {
        Self {
            texture,
            rc_texture,
        }
    }
}

/// Font binding, `font` is `None` when the font failed to load
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFont {
    pub name: String,
    pub size: u32,
    pub font: Option<FontId>,
}

impl ElementFont {
    /// Resolve the font through the asset manager
    pub fn load(assets: &mut AssetManager, name: &str, size: u32) -> Self {
        Self {
            name: name.to_string(),
            size,
            font: assets.get_font(name, size),
        }
    }
}

/// State shared by all controls
#[derive(Debug, Clone)]
pub struct ControlBase {
    /// unique within a dialog, -1 when the owner does not care
    pub id: i32,
    pub kind: ControlKind,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// active region in dialog coordinates
    pub bounding_box: Rect,
    pub visible: bool,
    pub enabled: bool,
    pub mouse_over: bool,
    pub has_focus: bool,
    pub elements_gfx: Vec<ElementGfx>,
    pub elements_font: Vec<ElementFont>,
}

impl ControlBase {
    pub fn new(kind: ControlKind, id: i32, x: i32, y: i32, width: i32, height: i32) -> Self {
        let mut base = Self {
            id,
            kind,
            x,
            y,
            width,
            height,
            bounding_box: Rect::default(),
            visible: true,
            enabled: true,
            mouse_over: false,
            has_focus: false,
            elements_gfx: vec![],
            elements_font: vec![],
        };
        base.update_rect();
        base
    }

    pub fn update_rect(&mut self) {
        self.bounding_box = Rect::from_size(self.x, self.y, self.width, self.height);
    }

    /// Visible and enabled, the only state in which a control takes input
    pub fn is_interactive(&self) -> bool {
        self.visible && self.enabled
    }

    pub fn save(&self, w: &mut FieldWriter) {
        w.write(self.id, "Control ID");
        w.write(self.x, "Control X");
        w.write(self.y, "Control Y");
        w.write(self.width, "Control Width");
        w.write(self.height, "Control Height");
        w.write_bool(self.visible, "is Control Visible");
        w.write_bool(self.enabled, "is Control Enabled");
    }

    pub fn load(kind: ControlKind, r: &mut FieldReader) -> UIResult<Self> {
        let id = r.read("Control ID")?;
        let x = r.read("Control X")?;
        let y = r.read("Control Y")?;
        let width = r.read("Control Width")?;
        let height = r.read("Control Height")?;
        let mut base = Self::new(kind, id, x, y, width, height);
        base.visible = r.read_bool("is Control Visible")?;
        base.enabled = r.read_bool("is Control Enabled")?;
        Ok(base)
    }
}

/// What a control needs to emit geometry
pub struct RenderContext<'a> {
    /// screen position of the dialog client area
    pub offset: Point,
    pub assets: &'a AssetManager,
    pub timestamp: f64,
}

impl<'a> RenderContext<'a> {
    pub fn font(&self, element: Option<&ElementFont>) -> Option<&'a dyn Font> {
        element
            .and_then(|e| e.font)
            .and_then(|id| self.assets.font(id))
    }
}

/// Core trait all UI controls implement.
///
/// Points handed to the handlers are in dialog coordinates, the dialog has
/// already removed its own screen position and caption height.
pub trait Control: Any {
    fn base(&self) -> &ControlBase;
    fn base_mut(&mut self) -> &mut ControlBase;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Emit quads into `front`, or into `top` for content that must stay
    /// above every other control (an open drop-down). A control missing
    /// the elements it needs renders nothing.
    fn render(&self, front: &mut SpriteSet, top: &mut SpriteSet, ctx: &RenderContext);

    /// Append this control's fields, base fields first
    fn save(&self, w: &mut FieldWriter) -> UIResult<()>;

    fn id(&self) -> i32 {
        self.base().id
    }

    fn kind(&self) -> ControlKind {
        self.base().kind
    }

    fn is_visible(&self) -> bool {
        self.base().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.base_mut().visible = visible;
    }

    fn is_enabled(&self) -> bool {
        self.base().enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().enabled = enabled;
    }

    fn has_focus(&self) -> bool {
        self.base().has_focus
    }

    fn set_location(&mut self, x: i32, y: i32) {
        let b = self.base_mut();
        b.x = x;
        b.y = y;
        self.update_rects();
    }

    fn set_size(&mut self, width: i32, height: i32) {
        let b = self.base_mut();
        b.width = width;
        b.height = height;
        self.update_rects();
    }

    fn update_rects(&mut self) {
        self.base_mut().update_rect();
    }

    /// Replace the graphic and font elements
    fn set_elements(&mut self, gfx: Vec<ElementGfx>, fonts: Vec<ElementFont>) {
        let b = self.base_mut();
        b.elements_gfx = gfx;
        b.elements_font = fonts;
    }

    fn handle_key_event(&mut self, _key: char, _down: bool, _ctx: &mut UiContext) -> bool {
        false
    }

    fn handle_virtual_key(
        &mut self,
        _key: VirtualKey,
        _down: bool,
        _modifiers: ModifierKeys,
        _ctx: &mut UiContext,
    ) -> bool {
        false
    }

    fn handle_mouse_event(
        &mut self,
        _event: &MouseEvent,
        _modifiers: ModifierKeys,
        _ctx: &mut UiContext,
    ) -> bool {
        false
    }

    fn pressed(
        &mut self,
        _pt: Point,
        _modifiers: ModifierKeys,
        _timestamp: f64,
        _ctx: &mut UiContext,
    ) -> bool {
        false
    }

    fn released(&mut self, _pt: Point, _ctx: &mut UiContext) -> bool {
        false
    }

    fn dragged(&mut self, _pt: Point, _ctx: &mut UiContext) -> bool {
        false
    }

    fn scrolled(&mut self, _amount: i32, _ctx: &mut UiContext) -> bool {
        false
    }

    /// Time driven behaviour, called once per frame before rendering
    fn tick(&mut self, _timestamp: f64, _ctx: &mut UiContext) {}

    fn contains_point(&self, pt: Point) -> bool {
        self.base().bounding_box.contains(pt)
    }

    fn on_mouse_enter(&mut self) {
        self.base_mut().mouse_over = true;
    }

    fn on_mouse_leave(&mut self) {
        self.base_mut().mouse_over = false;
    }

    fn can_have_focus(&self) -> bool {
        false
    }

    fn on_focus_in(&mut self) {
        self.base_mut().has_focus = true;
    }

    fn on_focus_out(&mut self) {
        self.base_mut().has_focus = false;
    }

    /// Character code that activates the control from anywhere in the dialog
    fn hotkey(&self) -> Option<u32> {
        None
    }

    fn on_hotkey(&mut self, _ctx: &mut UiContext) {}

    /// True while a press or drag started on this control is in progress,
    /// the dialog then routes mouse events here first
    fn is_capturing(&self) -> bool {
        false
    }
}

/// Helper macro for control boilerplate
#[macro_export]
macro_rules! impl_control_base {
    ($base_field:ident) => {
        fn base(&self) -> &$crate::ui::ControlBase {
            &self.$base_field
        }

        fn base_mut(&mut self) -> &mut $crate::ui::ControlBase {
            &mut self.$base_field
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}

/// Quad for `rc` moved into screen space; untextured when the element has
/// no texture.
pub fn render_rect(sprite: &mut Sprite, rc: Rect, gfx: &ElementGfx, color: Color, offset: Point) {
    let rc = rc.offsetted(offset);
    if gfx.texture.is_none() {
        sprite.add_tinted_quad(rc, color);
    } else {
        sprite.add_tinted_textured_quad(rc, color, gfx.texture, gfx.rc_texture);
    }
}

pub fn render_text(
    sprite: &mut Sprite,
    font: &dyn Font,
    text: &str,
    color: Color,
    rc: Rect,
    offset: Point,
    format: TextFormat,
) {
    font.render_to_rect(sprite, text, rc.offsetted(offset), color, format);
}

/// Routes left button events to `pressed`/`released`, the mouse handling
/// of every button-like control.
pub(crate) fn dispatch_left_button<C: Control + ?Sized>(
    control: &mut C,
    event: &MouseEvent,
    modifiers: ModifierKeys,
    ctx: &mut UiContext,
) -> bool {
    if !control.base().is_interactive() || !event.is_left_button() {
        return false;
    }
    if event.down {
        control.pressed(event.cursor_pos, modifiers, event.timestamp, ctx)
    } else {
        control.released(event.cursor_pos, ctx)
    }
}
