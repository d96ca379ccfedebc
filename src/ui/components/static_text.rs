// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Static text control.

use crate::impl_control_base;
use crate::render::{style::Color, SpriteSet, TextFormat};
use crate::ui::{
    render_text, Control, ControlBase, ControlKind, FieldReader, FieldWriter, RenderContext,
    UIResult,
};
use crate::util::{Point, Rect};

/// Text and color shared by every control that shows a caption
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub color: Color,
}

impl Label {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            color: Color::WHITE,
        }
    }

    pub fn save(&self, w: &mut FieldWriter) {
        w.write(&self.text, "Control Text");
        w.write_color(self.color, "Control Text Color");
    }

    pub fn load(r: &mut FieldReader) -> UIResult<Self> {
        let text = r.read_string("Control Text")?;
        let color = r.read_color("Control Text Color")?;
        Ok(Self { text, color })
    }

    /// Render with the control's first font, nothing when it has none
    pub fn render(
        &self,
        sprites: &mut SpriteSet,
        base: &ControlBase,
        rc: Rect,
        format: TextFormat,
        ctx: &RenderContext,
    ) {
        if self.text.is_empty() {
            return;
        }
        if let Some(font) = ctx.font(base.elements_font.first()) {
            render_text(&mut sprites.text, font, &self.text, self.color, rc, ctx.offset, format);
        }
    }
}

pub struct StaticText {
    base: ControlBase,
    label: Label,
}

impl StaticText {
    pub fn new(id: i32, text: &str, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            base: ControlBase::new(ControlKind::Static, id, x, y, width, height),
            label: Label::new(text),
        }
    }

    pub fn load(r: &mut FieldReader) -> UIResult<Self> {
        let base = ControlBase::load(ControlKind::Static, r)?;
        let label = Label::load(r)?;
        Ok(Self { base, label })
    }

    pub fn text(&self) -> &str {
        &self.label.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.label.text = text.to_string();
    }

    pub fn text_color(&self) -> Color {
        self.label.color
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.label.color = color;
    }
}

impl Control for StaticText {
    impl_control_base!(base);

    fn render(&self, front: &mut SpriteSet, _top: &mut SpriteSet, ctx: &RenderContext) {
        if !self.base.visible {
            return;
        }
        self.label
            .render(front, &self.base, self.base.bounding_box, TextFormat::Center, ctx);
    }

    fn save(&self, w: &mut FieldWriter) -> UIResult<()> {
        self.base.save(w);
        self.label.save(w);
        Ok(())
    }

    fn contains_point(&self, _pt: Point) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetManager;
    use crate::testing::RecordingLoader;
    use crate::ui::ElementFont;

    #[test]
    fn test_static_renders_text_only_with_font() {
        let mut am = AssetManager::new(Box::new(RecordingLoader::new()));
        let mut st = StaticText::new(3, "Score", 0, 0, 100, 20);
        let (mut front, mut top) = (SpriteSet::new(), SpriteSet::new());
        {
            let ctx = RenderContext {
                offset: Point::new(0, 0),
                assets: &am,
                timestamp: 0.0,
            };
            st.render(&mut front, &mut top, &ctx);
        }
        assert!(front.is_empty());

        let font = ElementFont::load(&mut am, "DejaVu", 10);
        st.set_elements(vec![], vec![font]);
        let ctx = RenderContext {
            offset: Point::new(5, 5),
            assets: &am,
            timestamp: 0.0,
        };
        st.render(&mut front, &mut top, &ctx);
        assert_eq!(front.text.quad_count(), 5);
        assert!(front.normal.is_empty());
        assert!(top.is_empty());
    }

    #[test]
    fn test_static_never_takes_input() {
        let st = StaticText::new(3, "Score", 0, 0, 100, 20);
        assert!(!st.can_have_focus());
        assert!(!st.contains_point(Point::new(10, 10)));
    }
}
