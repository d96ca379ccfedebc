// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! RustGamekit is the platform independent core of a small OpenGL game
//! engine: a retained-mode dialog and widget toolkit, and the asset registry
//! and scene loop that keep GPU state changes to a minimum.
//!
//! Windowing, GL calls, image and mesh decoding and glyph rasterization stay
//! with the platform layer. It plugs in through `asset::AssetLoader`,
//! `render::scene::RenderBackend` and `render::Font`, and uploads the quad
//! batches the UI fills every frame.
//!
//! A frame typically looks like this:
//!
//! - feed platform input to `ui::Dialog::handle_mouse_event` and friends
//! - drain `ui::ControlEvent`s and react in game logic
//! - `Dialog::render` into a pair of `render::SpriteSet`s
//! - `render::Scene::draw` the 3D objects through the backend

/// input event types shared by the platform layer and the UI
pub mod event;

/// points and integer rects
pub mod util;

/// engine configuration loaded from a toml file
pub mod config;

/// log
pub mod log;

/// texture, shader, font and mesh caches plus the material and attribute
/// registries
pub mod asset;

/// Render module.
/// sprite: per-frame quad batches the widgets draw into.
/// style: colors and text alignment.
/// scene: scene objects drawn grouped by attribute.
pub mod render;

/// dialog, controls and their persistence
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
