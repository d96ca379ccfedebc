// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Sprite is the 2D quad batch every widget renders into.
//!
//! Quads are appended in paint order and grouped into streams: consecutive
//! quads sharing a texture land in the same stream, so the backend can draw
//! each stream with a single texture bind while paint order is preserved.
//! Nothing here talks to the GPU, the platform layer uploads `streams()` and
//! calls `clear()` once per frame.

use crate::asset::Texture;
use crate::render::style::Color;
use crate::util::{Rect, EMPTY_RECT};

/// One screen rect, optionally textured with a sub-rect of the texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub rect: Rect,
    pub tex_rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuadStream {
    pub texture: Texture,
    pub quads: Vec<Quad>,
}

#[derive(Debug, Clone, Default)]
pub struct Sprite {
    streams: Vec<QuadStream>,
    quad_count: usize,
}

impl Sprite {
    pub const MAX_QUADS: usize = 20000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Untextured quad filled with `color`
    pub fn add_tinted_quad(&mut self, rect: Rect, color: Color) -> bool {
        self.add_quad(rect, color, Texture::NONE, EMPTY_RECT)
    }

    pub fn add_textured_quad(&mut self, rect: Rect, texture: Texture, tex_rect: Rect) -> bool {
        self.add_quad(rect, Color::WHITE, texture, tex_rect)
    }

    pub fn add_tinted_textured_quad(
        &mut self,
        rect: Rect,
        color: Color,
        texture: Texture,
        tex_rect: Rect,
    ) -> bool {
        self.add_quad(rect, color, texture, tex_rect)
    }

    /// Returns false when the batch is full, the quad is dropped.
    pub fn add_quad(&mut self, rect: Rect, color: Color, texture: Texture, tex_rect: Rect) -> bool {
        if self.quad_count >= Self::MAX_QUADS {
            return false;
        }
        let quad = Quad {
            rect,
            tex_rect,
            color,
        };
        match self.streams.last_mut() {
            Some(last) if last.texture == texture => last.quads.push(quad),
            _ => self.streams.push(QuadStream {
                texture,
                quads: vec![quad],
            }),
        }
        self.quad_count += 1;
        true
    }

    pub fn streams(&self) -> &[QuadStream] {
        &self.streams
    }

    pub fn quad_count(&self) -> usize {
        self.quad_count
    }

    pub fn is_empty(&self) -> bool {
        self.quad_count == 0
    }

    /// Iterate every quad in paint order
    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        self.streams.iter().flat_map(|s| s.quads.iter())
    }

    pub fn clear(&mut self) {
        self.streams.clear();
        self.quad_count = 0;
    }
}

/// The pair of batches a control renders into: shapes first, text above.
#[derive(Debug, Clone, Default)]
pub struct SpriteSet {
    pub normal: Sprite,
    pub text: Sprite,
}

impl SpriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.normal.clear();
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.normal.is_empty() && self.text.is_empty()
    }
}
