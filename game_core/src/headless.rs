//! In-memory host: records draw calls instead of showing them.
//!
//! Used for simulation runs without a display and throughout the tests.

use std::collections::HashSet;

use glam::IVec2;

use crate::{Color, FontSpec, InputProvider, Key, Rect, Surface, TextExtent, TextProvider};

/// Set of keys currently held down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys(HashSet<Key>);

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.0.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.0.remove(&key);
    }
}

impl<const N: usize> From<[Key; N]> for HeldKeys {
    fn from(keys: [Key; N]) -> Self {
        Self(keys.into_iter().collect())
    }
}

impl InputProvider for HeldKeys {
    fn is_held(&self, key: Key) -> bool {
        self.0.contains(&key)
    }
}

/// Rendered text with a fixed-pitch size estimate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBox {
    pub text: String,
    pub width: u32,
    pub height: u32,
}

impl TextBox {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            text: String::new(),
            width,
            height,
        }
    }
}

impl TextExtent for TextBox {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Monospace metrics: each glyph is `size / 2` wide and `size` tall
#[derive(Debug, Clone, Copy, Default)]
pub struct MonoText;

impl TextProvider for MonoText {
    type Text = TextBox;

    fn render(&mut self, text: &str, font: &FontSpec) -> TextBox {
        let size = u32::from(font.size);
        TextBox {
            text: text.to_string(),
            width: text.chars().count() as u32 * size.div_ceil(2),
            height: size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear(Color),
    Rect(Rect, Color),
    Circle(IVec2, u32, Color),
    Text(String, IVec2),
}

/// Surface that keeps the current frame's draw calls and every present
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    /// Draw calls since the last clear
    pub ops: Vec<DrawOp>,
    /// Regions passed to each present, oldest first
    pub presented: Vec<Vec<Rect>>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(text, _) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_present(&self) -> Option<&[Rect]> {
        self.presented.last().map(Vec::as_slice)
    }
}

impl Surface for RecordingSurface {
    type Text = TextBox;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Rect(rect, color));
    }

    fn fill_circle(&mut self, center: IVec2, radius: u32, color: Color) {
        self.ops.push(DrawOp::Circle(center, radius, color));
    }

    fn blit(&mut self, text: &TextBox, at: IVec2) {
        self.ops.push(DrawOp::Text(text.text.clone(), at));
    }

    fn present(&mut self, regions: &[Rect]) {
        self.presented.push(regions.to_vec());
    }
}
