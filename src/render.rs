// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! # Render module
//!
//! CPU side batching only, the GPU submission lives behind collaborator
//! traits so the widget and scene logic stay testable headless.
//!
//! ## Submodules
//! - `style`: colors and text alignment
//! - `sprite`: quad batch that widgets emit into, grouped by texture
//! - `scene`: scene objects and attribute-major draw batching

pub mod scene;
pub mod sprite;
pub mod style;

pub use scene::{DrawStats, RenderBackend, Scene, SceneObject, Transform};
pub use sprite::{Quad, QuadStream, Sprite, SpriteSet};
pub use style::{Color, TextFormat};

use crate::util::Rect;

/// Text renderer handed out by the asset manager.
///
/// Glyph rasterization is done by the platform (FreeType), a font only has to
/// lay out `text` inside `rect` and push glyph quads into the sprite.
pub trait Font {
    fn render_to_rect(
        &self,
        sprite: &mut Sprite,
        text: &str,
        rect: Rect,
        color: Color,
        format: TextFormat,
    );
}
