// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Fake collaborators shared by the unit tests.

use crate::asset::{
    AssetLoader, Material, MeshHandle, MeshInfo, ShaderId, Texture, WrapMode,
};
use crate::render::{style::Color, Font, SceneObject, RenderBackend, Sprite, TextFormat};
use crate::util::{Rect, EMPTY_RECT};
use std::cell::RefCell;
use std::rc::Rc;

/// Load requests seen by a `RecordingLoader`, shared with the test
#[derive(Debug, Clone, Default)]
pub struct LoadLog(Rc<RefCell<Vec<String>>>);

impl LoadLog {
    /// Entries starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.0.borrow().iter().filter(|e| e.starts_with(prefix)).count()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    fn push(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }
}

/// Loader that succeeds for every path not starting with "missing".
///
/// Meshes: "crate*" has two subsets with textures and materials, anything
/// else loads with no materials at all.
#[derive(Debug, Default)]
pub struct RecordingLoader {
    log: LoadLog,
    next_handle: u32,
}

impl RecordingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> LoadLog {
        self.log.clone()
    }

    fn handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl AssetLoader for RecordingLoader {
    fn load_texture(&mut self, path: &str) -> Option<Texture> {
        self.log.push(format!("texture:{}", path));
        if path.starts_with("missing") {
            return None;
        }
        Some(Texture::new(self.handle(), 32, 32))
    }

    fn load_shader(&mut self, path: &str) -> Option<ShaderId> {
        self.log.push(format!("shader:{}", path));
        if path.starts_with("missing") {
            return None;
        }
        Some(ShaderId(self.handle()))
    }

    fn load_font(&mut self, name: &str, size: u32) -> Option<Box<dyn Font>> {
        self.log.push(format!("font:{}:{}", name, size));
        if name.starts_with("missing") {
            return None;
        }
        Some(Box::new(FixedFont(size as i32)))
    }

    fn load_mesh(&mut self, path: &str) -> Option<MeshInfo> {
        self.log.push(format!("mesh:{}", path));
        if path.starts_with("missing") {
            return None;
        }
        let handle = MeshHandle(self.handle());
        if path.starts_with("crate") {
            Some(MeshInfo {
                handle,
                default_textures: vec!["crate_0.png".into(), "crate_1.png".into()],
                default_materials: vec![Material::WHITE, Material::DEFAULT_GRAY],
            })
        } else {
            Some(MeshInfo {
                handle,
                default_textures: vec![],
                default_materials: vec![],
            })
        }
    }
}

/// Backend that only records what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub shaders: Vec<Option<ShaderId>>,
    pub textures: Vec<(Texture, WrapMode)>,
    pub materials: Vec<Material>,
    /// (mesh handle, subset)
    pub draws: Vec<(u32, usize)>,
}

impl RenderBackend for RecordingBackend {
    fn use_shader(&mut self, shader: Option<ShaderId>) {
        self.shaders.push(shader);
    }

    fn bind_texture(&mut self, texture: Texture, wrap_mode: WrapMode) {
        self.textures.push((texture, wrap_mode));
    }

    fn upload_material(&mut self, material: &Material) {
        self.materials.push(*material);
    }

    fn draw_subset(&mut self, object: &SceneObject, subset: usize) {
        self.draws.push((object.mesh().0, subset));
    }
}

/// Monospace font: one untextured quad per non-space character, glyphs are
/// half the size wide
#[derive(Debug, Clone, Copy)]
pub struct FixedFont(pub i32);

impl Font for FixedFont {
    fn render_to_rect(
        &self,
        sprite: &mut Sprite,
        text: &str,
        rect: Rect,
        color: Color,
        format: TextFormat,
    ) {
        let advance = (self.0 / 2).max(1);
        let width = text.chars().count() as i32 * advance;
        let mut x = match format {
            TextFormat::Left => rect.left,
            TextFormat::Center => rect.left + (rect.width() - width) / 2,
            TextFormat::Right => rect.right - width,
        };
        let y = rect.top + (rect.height() - self.0) / 2;
        for c in text.chars() {
            if c != ' ' {
                let glyph = Rect::new(x, y, x + advance, y + self.0);
                sprite.add_quad(glyph, color, Texture::NONE, EMPTY_RECT);
            }
            x += advance;
        }
    }
}
