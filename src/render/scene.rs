// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Scene keeps the drawable objects and submits them grouped by attribute.
//!
//! Every mesh subset of an object refers to one attribute index of the
//! asset manager. Drawing walks the attributes in registry order and, for
//! each, draws every subset using it, so a {shader, texture, material}
//! combination is bound at most once per frame however many objects share
//! it. Objects are bucketed by attribute once and the buckets are reused
//! until the object list changes.

use crate::asset::{AssetManager, Material, MeshHandle, ShaderId, Texture, WrapMode};
use log::{debug, warn};

/// GPU side of scene drawing, implemented by the OpenGL layer
pub trait RenderBackend {
    /// `None` when the attribute names no shader, or it failed to load
    fn use_shader(&mut self, shader: Option<ShaderId>);
    /// `Texture::NONE` unbinds
    fn bind_texture(&mut self, texture: Texture, wrap_mode: WrapMode);
    fn upload_material(&mut self, material: &Material);
    fn draw_subset(&mut self, object: &SceneObject, subset: usize);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: [f32; 3],
    /// euler angles in radians
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl Transform {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub transform: Transform,
    pub hidden: bool,
    mesh: MeshHandle,
    /// attribute index per mesh subset
    attributes: Vec<usize>,
}

impl SceneObject {
    /// Load `mesh_path` and register one attribute per subset from the
    /// mesh's own textures and materials. A mesh without materials gets a
    /// single untextured subset with the default grey material.
    ///
    /// Returns `None` when the mesh cannot be loaded.
    pub fn new(
        assets: &mut AssetManager,
        mesh_path: &str,
        shader_path: &str,
        transform: Transform,
    ) -> Option<Self> {
        let info = assets.get_mesh(mesh_path)?;
        let attributes = if info.default_materials.is_empty() {
            vec![assets.get_attribute("", WrapMode::Repeat, &Material::DEFAULT_GRAY, shader_path)]
        } else {
            info.default_materials
                .iter()
                .enumerate()
                .map(|(i, mat)| {
                    let tex = info.default_textures.get(i).map(String::as_str).unwrap_or("");
                    assets.get_attribute(tex, WrapMode::Repeat, mat, shader_path)
                })
                .collect()
        };
        debug!("scene object {:?} subsets={:?}", mesh_path, attributes);
        Some(Self::from_parts(info.handle, attributes, transform))
    }

    /// Object from an already uploaded mesh and registered attributes
    pub fn from_parts(mesh: MeshHandle, attributes: Vec<usize>, transform: Transform) -> Self {
        Self {
            transform,
            hidden: false,
            mesh,
            attributes,
        }
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    pub fn attributes(&self) -> &[usize] {
        &self.attributes
    }

    pub fn subset_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn uses_attribute(&self, attribute: usize) -> bool {
        self.attributes.contains(&attribute)
    }
}

/// Bind and draw counts of one `Scene::draw`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub shader_binds: usize,
    pub texture_binds: usize,
    pub material_binds: usize,
    pub draw_calls: usize,
}

#[derive(Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    /// (object, subset) pairs per attribute index
    buckets: Vec<Vec<(usize, usize)>>,
    dirty: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.dirty = true;
        self.objects.len() - 1
    }

    pub fn remove_object(&mut self, index: usize) -> Option<SceneObject> {
        if index >= self.objects.len() {
            return None;
        }
        self.dirty = true;
        Some(self.objects.remove(index))
    }

    pub fn object(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    pub fn object_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.objects.get_mut(index)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.dirty = true;
    }

    fn rebuild_buckets(&mut self) {
        self.buckets.clear();
        for (oi, obj) in self.objects.iter().enumerate() {
            for (si, &attr) in obj.attributes.iter().enumerate() {
                if attr >= self.buckets.len() {
                    self.buckets.resize_with(attr + 1, Vec::new);
                }
                self.buckets[attr].push((oi, si));
            }
        }
        self.dirty = false;
        debug!(
            "scene buckets rebuilt: objects={} attributes={}",
            self.objects.len(),
            self.buckets.len()
        );
    }

    /// Draw all visible objects, attribute-major.
    ///
    /// Shader, texture and material are each compared against the last
    /// bound value of this frame and only rebound when they differ.
    ///
    /// # Panics
    /// If an object holds an attribute index `assets` never handed out.
    pub fn draw(&mut self, assets: &AssetManager, backend: &mut dyn RenderBackend) -> DrawStats {
        if self.dirty {
            self.rebuild_buckets();
        }
        let mut stats = DrawStats::default();
        let mut last_shader: Option<&str> = None;
        let mut last_texture: Option<(&str, WrapMode)> = None;
        let mut last_material: Option<usize> = None;

        for (ai, bucket) in self.buckets.iter().enumerate() {
            if !bucket.iter().any(|&(oi, _)| !self.objects[oi].hidden) {
                continue;
            }
            let attr = assets.attribute(ai);
            if last_shader != Some(attr.shader_path.as_str()) {
                let shader = if attr.shader_path.is_empty() {
                    None
                } else {
                    assets.cached_shader(&attr.shader_path)
                };
                backend.use_shader(shader);
                last_shader = Some(attr.shader_path.as_str());
                stats.shader_binds += 1;
            }
            if last_texture != Some((attr.texture_path.as_str(), attr.wrap_mode)) {
                let texture = if attr.texture_path.is_empty() {
                    Texture::NONE
                } else {
                    let t = assets.cached_texture(&attr.texture_path);
                    if t.is_none() {
                        warn!("texture not resident:{:?}", attr.texture_path);
                    }
                    t
                };
                backend.bind_texture(texture, attr.wrap_mode);
                last_texture = Some((attr.texture_path.as_str(), attr.wrap_mode));
                stats.texture_binds += 1;
            }
            if last_material != Some(attr.material_index) {
                backend.upload_material(assets.material(attr.material_index));
                last_material = Some(attr.material_index);
                stats.material_binds += 1;
            }
            for &(oi, si) in bucket {
                let obj = &self.objects[oi];
                if obj.hidden {
                    continue;
                }
                backend.draw_subset(obj, si);
                stats.draw_calls += 1;
            }
        }
        stats
    }
}
