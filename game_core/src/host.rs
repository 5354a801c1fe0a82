//! Collaborators the frame loop drives: a drawing surface, a text
//! rasterizer, a key-state snapshot and an event queue.
//!
//! The core never creates windows or polls devices itself; a frontend
//! implements these traits and hands them to [`crate::Match::run_frame`].

use std::collections::VecDeque;

use glam::IVec2;

use crate::config::{Color, FontSpec, Key};

/// Integer pixel rectangle, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest pixel rect covering the float span `[x0, x1] x [y0, y1]`.
    ///
    /// Spans beyond the `i32` range saturate at its bounds.
    pub fn covering(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        let left = x0.floor() as i64;
        let top = y0.floor() as i64;
        let right = x1.ceil() as i64;
        let bottom = y1.ceil() as i64;
        Self::new(
            saturate(left),
            saturate(top),
            saturate(right.saturating_sub(left)),
            saturate(bottom.saturating_sub(top)),
        )
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Whether the float span `[x0, x1] x [y0, y1]` lies inside this rect
    pub fn contains_span(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> bool {
        x0 >= self.x as f32
            && y0 >= self.y as f32
            && x1 <= self.right() as f32
            && y1 <= self.bottom() as f32
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Size of a rendered piece of text, in surface pixels
pub trait TextExtent {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Turns strings into blittable text
pub trait TextProvider {
    type Text: TextExtent;

    fn render(&mut self, text: &str, font: &FontSpec) -> Self::Text;
}

/// Drawing target with a fixed logical size
pub trait Surface {
    type Text: TextExtent;

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: IVec2, radius: u32, color: Color);
    fn blit(&mut self, text: &Self::Text, at: IVec2);
    /// Push only the given regions to the display
    fn present(&mut self, regions: &[Rect]);
}

/// Level state of the keyboard at the moment of the call
pub trait InputProvider {
    fn is_held(&self, key: Key) -> bool;
}

/// Discrete signals delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Window closed or process asked to stop
    Quit,
    KeyDown(Key),
}

pub trait EventSource {
    fn poll_event(&mut self) -> Option<HostEvent>;
}

impl EventSource for VecDeque<HostEvent> {
    fn poll_event(&mut self) -> Option<HostEvent> {
        self.pop_front()
    }
}
