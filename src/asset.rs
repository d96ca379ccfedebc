// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Asset module provides the resource manager.
//!
//! Decoding is done by the platform through an `AssetLoader` (libpng,
//! libjpeg, FreeType, the OBJ/FBX readers...). The manager only caches what
//! the loader hands back, keyed by path, and owns the two registries the
//! scene batches on:
//!
//! - materials, deduplicated by full structural equality
//! - attributes, the {texture, wrap mode, material, shader} draw-state key
//!
//! Both registries are append-only. An index, once handed out, names the
//! same entry for the lifetime of the manager; objects keep these indices as
//! back references. Lookups are linear scans, the number of distinct draw
//! states in a scene is small and only grows at load time.

use crate::config::engine_config;
use crate::render::{style::Color, Font};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// GPU texture name plus its cached size.
///
/// Identity is the handle alone, width/height only save a query round trip.
/// Handle 0 means "no texture": rendering skips it instead of failing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Texture {
    pub handle: u32,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub const NONE: Texture = Texture {
        handle: 0,
        width: 0,
        height: 0,
    };

    pub const fn new(handle: u32, width: u32, height: u32) -> Self {
        Self {
            handle,
            width,
            height,
        }
    }

    pub fn is_none(&self) -> bool {
        self.handle == 0
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Texture {}

impl std::hash::Hash for Texture {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

/// Linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// Index into the manager's font table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontId(pub usize);

/// Uploaded mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// What a mesh loader reports back: the uploaded mesh and, per subset, the
/// texture path and material the file asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInfo {
    pub handle: MeshHandle,
    pub default_textures: Vec<String>,
    pub default_materials: Vec<Material>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WrapMode {
    #[default]
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

/// Lighting properties, compared field by field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub diffuse: Color,
    pub ambient: Color,
    pub specular: Color,
    pub emissive: Color,
    /// sharpness of the specular highlight
    pub power: f32,
}

impl Material {
    pub const WHITE: Material = Material::new(
        Color::WHITE,
        Color::WHITE,
        Color::WHITE,
        Color::WHITE,
        1.0,
    );

    /// used for meshes that carry no material of their own
    pub const DEFAULT_GRAY: Material = Material::new(
        Color::gray(0.3),
        Color::gray(0.3),
        Color::gray(0.3),
        Color::gray(0.3),
        1.0,
    );

    pub const fn new(
        diffuse: Color,
        ambient: Color,
        specular: Color,
        emissive: Color,
        power: f32,
    ) -> Self {
        Self {
            diffuse,
            ambient,
            specular,
            emissive,
            power,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::WHITE
    }
}

/// Draw-state key. An empty path means "none".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub texture_path: String,
    pub wrap_mode: WrapMode,
    pub material_index: usize,
    pub shader_path: String,
}

/// Platform side resource decoding.
///
/// Every method returns `None` on failure; the manager turns that into the
/// matching sentinel and logs it.
pub trait AssetLoader {
    fn load_texture(&mut self, path: &str) -> Option<Texture>;
    fn load_shader(&mut self, path: &str) -> Option<ShaderId>;
    fn load_font(&mut self, name: &str, size: u32) -> Option<Box<dyn Font>>;
    fn load_mesh(&mut self, path: &str) -> Option<MeshInfo>;
}

/// Loader for headless use, every load fails
#[derive(Debug, Default)]
pub struct NullLoader;

impl AssetLoader for NullLoader {
    fn load_texture(&mut self, _path: &str) -> Option<Texture> {
        None
    }

    fn load_shader(&mut self, _path: &str) -> Option<ShaderId> {
        None
    }

    fn load_font(&mut self, _name: &str, _size: u32) -> Option<Box<dyn Font>> {
        None
    }

    fn load_mesh(&mut self, _path: &str) -> Option<MeshInfo> {
        None
    }
}

pub struct AssetManager {
    loader: Box<dyn AssetLoader>,
    /// prefix for relative paths handed to the loader
    root: String,
    texture_cache: HashMap<String, Texture>,
    shader_cache: HashMap<String, ShaderId>,
    mesh_cache: HashMap<String, MeshInfo>,
    font_index: HashMap<(String, u32), FontId>,
    fonts: Vec<Box<dyn Font>>,
    materials: Vec<Material>,
    attributes: Vec<Attribute>,
}

impl Default for AssetManager {
    fn default() -> Self {
        Self::new(Box::new(NullLoader))
    }
}

impl AssetManager {
    /// Manager rooted at the configured `[assets] root`
    pub fn new(loader: Box<dyn AssetLoader>) -> Self {
        Self::with_root(loader, &engine_config().assets.root)
    }

    pub fn with_root(loader: Box<dyn AssetLoader>, root: &str) -> Self {
        Self {
            loader,
            root: root.to_string(),
            texture_cache: HashMap::new(),
            shader_cache: HashMap::new(),
            mesh_cache: HashMap::new(),
            font_index: HashMap::new(),
            fonts: vec![],
            materials: vec![],
            attributes: vec![],
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Path as the loader sees it. Caches stay keyed by the caller's path.
    fn resolve(&self, path: &str) -> String {
        if self.root.is_empty() || Path::new(path).is_absolute() {
            path.to_string()
        } else {
            Path::new(&self.root).join(path).to_string_lossy().into_owned()
        }
    }

    /// Load (once) and return the texture at `path`.
    ///
    /// A failed load is not cached, so a later call retries it.
    pub fn get_texture(&mut self, path: &str) -> Texture {
        if let Some(t) = self.texture_cache.get(path) {
            return *t;
        }
        let full = self.resolve(path);
        match self.loader.load_texture(&full) {
            Some(t) if !t.is_none() => {
                info!("texture load:{:?} handle={} {}x{}", path, t.handle, t.width, t.height);
                self.texture_cache.insert(path.to_string(), t);
                t
            }
            _ => {
                warn!("texture load failed:{:?}", path);
                Texture::NONE
            }
        }
    }

    /// Already loaded texture, `Texture::NONE` if `path` was never loaded
    pub fn cached_texture(&self, path: &str) -> Texture {
        self.texture_cache.get(path).copied().unwrap_or(Texture::NONE)
    }

    pub fn get_shader(&mut self, path: &str) -> Option<ShaderId> {
        if let Some(s) = self.shader_cache.get(path) {
            return Some(*s);
        }
        let full = self.resolve(path);
        let shader = self.loader.load_shader(&full);
        match shader {
            Some(s) => {
                info!("shader load:{:?} id={}", path, s.0);
                self.shader_cache.insert(path.to_string(), s);
            }
            None => warn!("shader load failed:{:?}", path),
        }
        shader
    }

    pub fn cached_shader(&self, path: &str) -> Option<ShaderId> {
        self.shader_cache.get(path).copied()
    }

    /// Fonts are cached per (name, size) pair
    pub fn get_font(&mut self, name: &str, size: u32) -> Option<FontId> {
        let key = (name.to_string(), size);
        if let Some(id) = self.font_index.get(&key) {
            return Some(*id);
        }
        let font = self.loader.load_font(name, size);
        match font {
            Some(f) => {
                let id = FontId(self.fonts.len());
                self.fonts.push(f);
                self.font_index.insert(key, id);
                info!("font load:{:?} size={} -> {:?}", name, size, id);
                Some(id)
            }
            None => {
                warn!("font load failed:{:?} size={}", name, size);
                None
            }
        }
    }

    pub fn font(&self, id: FontId) -> Option<&dyn Font> {
        self.fonts.get(id.0).map(|f| f.as_ref())
    }

    pub fn get_mesh(&mut self, path: &str) -> Option<MeshInfo> {
        if let Some(m) = self.mesh_cache.get(path) {
            return Some(m.clone());
        }
        let full = self.resolve(path);
        let mesh = self.loader.load_mesh(&full);
        match &mesh {
            Some(m) => {
                info!("mesh load:{:?} subsets={}", path, m.default_textures.len());
                self.mesh_cache.insert(path.to_string(), m.clone());
            }
            None => warn!("mesh load failed:{:?}", path),
        }
        mesh
    }

    /// Index of an equal material, registering `mat` on first sight
    pub fn get_material_index(&mut self, mat: &Material) -> usize {
        if let Some(i) = self.materials.iter().position(|m| m == mat) {
            return i;
        }
        self.materials.push(*mat);
        debug!("material registered:{}", self.materials.len() - 1);
        self.materials.len() - 1
    }

    /// # Panics
    /// On an index this manager never handed out.
    pub fn material(&self, index: usize) -> &Material {
        &self.materials[index]
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Attribute index for the given draw state.
    ///
    /// The material is normalized to its registry index first. A new
    /// attribute eagerly loads its texture and shader, so every index handed
    /// out refers to resident resources.
    pub fn get_attribute(
        &mut self,
        texture_path: &str,
        wrap_mode: WrapMode,
        material: &Material,
        shader_path: &str,
    ) -> usize {
        let material_index = self.get_material_index(material);
        self.get_attribute_by_material_index(texture_path, wrap_mode, material_index, shader_path)
    }

    /// # Panics
    /// If `material_index` was not produced by `get_material_index`.
    pub fn get_attribute_by_material_index(
        &mut self,
        texture_path: &str,
        wrap_mode: WrapMode,
        material_index: usize,
        shader_path: &str,
    ) -> usize {
        assert!(
            material_index < self.materials.len(),
            "unknown material index {}",
            material_index
        );
        let attrib = Attribute {
            texture_path: texture_path.to_string(),
            wrap_mode,
            material_index,
            shader_path: shader_path.to_string(),
        };
        if let Some(i) = self.attributes.iter().position(|a| *a == attrib) {
            return i;
        }
        if !texture_path.is_empty() {
            self.get_texture(texture_path);
        }
        if !shader_path.is_empty() {
            self.get_shader(shader_path);
        }
        self.attributes.push(attrib);
        debug!(
            "attribute registered:{} tex={:?} mat={} shader={:?}",
            self.attributes.len() - 1,
            texture_path,
            material_index,
            shader_path
        );
        self.attributes.len() - 1
    }

    /// # Panics
    /// On an index this manager never handed out.
    pub fn attribute(&self, index: usize) -> &Attribute {
        &self.attributes[index]
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{LoadLog, RecordingLoader};

    fn manager() -> (AssetManager, LoadLog) {
        let loader = RecordingLoader::new();
        let log = loader.log();
        (AssetManager::new(Box::new(loader)), log)
    }

    fn red() -> Material {
        let c = Color::new(1.0, 0.0, 0.0, 1.0);
        Material::new(c, c, c, c, 4.0)
    }

    #[test]
    fn test_equal_materials_share_index() {
        let (mut am, _) = manager();
        let a = am.get_material_index(&red());
        let b = am.get_material_index(&Material::WHITE);
        let c = am.get_material_index(&red());
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(am.materials().len(), 2);
        assert_eq!(*am.material(a), red());
    }

    #[test]
    fn test_materials_differing_in_power_are_distinct() {
        let (mut am, _) = manager();
        let mut shiny = red();
        shiny.power = 32.0;
        assert_ne!(am.get_material_index(&red()), am.get_material_index(&shiny));
    }

    #[test]
    fn test_attribute_dedup_and_stability() {
        let (mut am, _) = manager();
        let a0 = am.get_attribute("brick.png", WrapMode::Repeat, &red(), "mesh.glsl");
        let a1 = am.get_attribute("brick.png", WrapMode::ClampToEdge, &red(), "mesh.glsl");
        let a2 = am.get_attribute("", WrapMode::Repeat, &Material::WHITE, "mesh.glsl");
        assert_eq!((a0, a1, a2), (0, 1, 2));
        // repeat queries return the old indices and never renumber
        assert_eq!(am.get_attribute("brick.png", WrapMode::Repeat, &red(), "mesh.glsl"), a0);
        let a3 = am.get_attribute("grass.png", WrapMode::Repeat, &red(), "mesh.glsl");
        assert_eq!(a3, 3);
        assert_eq!(am.get_attribute("brick.png", WrapMode::ClampToEdge, &red(), "mesh.glsl"), a1);
        assert_eq!(am.attributes().len(), 4);
        assert_eq!(am.attribute(a2).texture_path, "");
    }

    #[test]
    fn test_new_attribute_loads_resources_once() {
        let (mut am, log) = manager();
        am.get_attribute("brick.png", WrapMode::Repeat, &red(), "mesh.glsl");
        am.get_attribute("brick.png", WrapMode::Repeat, &red(), "mesh.glsl");
        am.get_attribute("", WrapMode::Repeat, &red(), "");
        assert_eq!(log.count("texture:brick.png"), 1);
        assert_eq!(log.count("shader:mesh.glsl"), 1);
        assert_eq!(log.len(), 2);
        assert!(!am.cached_texture("brick.png").is_none());
        assert!(am.cached_shader("mesh.glsl").is_some());
    }

    #[test]
    fn test_missing_texture_is_sentinel_and_retried() {
        let (mut am, log) = manager();
        assert!(am.get_texture("missing.png").is_none());
        assert!(am.get_texture("missing.png").is_none());
        assert_eq!(log.count("texture:missing.png"), 2);
        assert!(am.cached_texture("missing.png").is_none());
    }

    #[test]
    fn test_texture_identity_is_handle() {
        assert_eq!(Texture::new(3, 16, 16), Texture::new(3, 64, 64));
        assert_ne!(Texture::new(3, 16, 16), Texture::new(4, 16, 16));
    }

    #[test]
    fn test_fonts_cached_by_name_and_size() {
        let (mut am, log) = manager();
        let a = am.get_font("DejaVu", 12).unwrap();
        let b = am.get_font("DejaVu", 12).unwrap();
        let c = am.get_font("DejaVu", 14).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(log.count("font:DejaVu"), 2);
        assert!(am.font(a).is_some());
        assert!(am.font(FontId(99)).is_none());

        // name and size never run together
        let d = am.get_font("Sans1", 23).unwrap();
        let e = am.get_font("Sans12", 3).unwrap();
        assert_ne!(d, e);
        assert_eq!(log.count("font:Sans1"), 2);
    }

    #[test]
    fn test_root_prefixes_relative_paths() {
        let loader = RecordingLoader::new();
        let log = loader.log();
        let mut am = AssetManager::with_root(Box::new(loader), "data");
        assert_eq!(am.root(), "data");
        let t = am.get_texture("ui/skin.png");
        am.get_texture("/abs/skin.png");
        am.get_shader("basic.vs");
        assert_eq!(log.count("texture:data/ui/skin.png"), 1);
        assert_eq!(log.count("texture:/abs/skin.png"), 1);
        assert_eq!(log.count("shader:data/basic.vs"), 1);
        assert_eq!(am.cached_texture("ui/skin.png"), t);
    }

    #[test]
    #[should_panic]
    fn test_unknown_material_index_is_fatal() {
        let (mut am, _) = manager();
        am.get_attribute_by_material_index("", WrapMode::Repeat, 7, "");
    }
}
