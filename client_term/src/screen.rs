//! Half-block terminal surface.
//!
//! Each character cell shows two stacked pixels using `▀` with the upper
//! pixel as foreground and the lower as background. Logical arena
//! coordinates are scaled onto that pixel grid.

use std::io::{self, Write};

use crossterm::{cursor, queue, style};
use game_core::{Color, FontSpec, Rect, Surface, TextExtent, TextProvider};
use glam::IVec2;

const UPPER_HALF: char = '\u{2580}';

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Text laid out one character per cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermLabel {
    text: String,
    color: Color,
    width: u32,
    height: u32,
}

impl TextExtent for TermLabel {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Measures text in logical units of whole terminal cells
#[derive(Debug, Clone, Copy)]
pub struct TermText {
    cell_width: f32,
    cell_height: f32,
}

impl TermText {
    pub fn new(cell_width: f32, cell_height: f32) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }
}

impl TextProvider for TermText {
    type Text = TermLabel;

    // Terminals have one font size; only the color is honoured
    fn render(&mut self, text: &str, font: &FontSpec) -> TermLabel {
        TermLabel {
            text: text.to_string(),
            color: font.color,
            width: (text.chars().count() as f32 * self.cell_width).ceil() as u32,
            height: self.cell_height.ceil() as u32,
        }
    }
}

pub struct TermSurface<W: Write> {
    out: W,
    width: u32,
    height: u32,
    cols: u16,
    rows: u16,
    /// `cols` x `rows * 2`, row-major
    pixels: Vec<Color>,
    /// Text overlay, one slot per cell
    glyphs: Vec<Option<(char, Color)>>,
    background: Color,
    error: Option<io::Error>,
}

impl<W: Write> TermSurface<W> {
    /// Surface of logical size `width` x `height` drawn into `cols` x `rows` cells
    pub fn new(out: W, width: u32, height: u32, cols: u16, rows: u16) -> Self {
        let cells = usize::from(cols) * usize::from(rows);
        Self {
            out,
            width,
            height,
            cols,
            rows,
            pixels: vec![Color::BLACK; cells * 2],
            glyphs: vec![None; cells],
            background: Color::BLACK,
            error: None,
        }
    }

    /// Text metrics matching this surface's cell size
    pub fn text_provider(&self) -> TermText {
        TermText::new(
            self.width as f32 / f32::from(self.cols),
            self.height as f32 / f32::from(self.rows),
        )
    }

    /// First write error since the last call
    pub fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn pixel_cols(&self) -> i32 {
        i32::from(self.cols)
    }

    fn pixel_rows(&self) -> i32 {
        i32::from(self.rows) * 2
    }

    fn scale(&self) -> (f32, f32) {
        (
            self.pixel_cols() as f32 / self.width as f32,
            self.pixel_rows() as f32 / self.height as f32,
        )
    }

    /// Pixel span covering the logical rect, clipped to the grid
    fn pixel_span(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let (sx, sy) = self.scale();
        let x0 = ((rect.x as f32 * sx).floor() as i32).max(0);
        let y0 = ((rect.y as f32 * sy).floor() as i32).max(0);
        let x1 = ((rect.right() as f32 * sx).ceil() as i32).min(self.pixel_cols());
        let y1 = ((rect.bottom() as f32 * sy).ceil() as i32).min(self.pixel_rows());
        (x0, y0, x1, y1)
    }

    fn set_pixel(&mut self, px: i32, py: i32, color: Color) {
        if px < 0 || py < 0 || px >= self.pixel_cols() || py >= self.pixel_rows() {
            return;
        }
        let idx = py as usize * usize::from(self.cols) + px as usize;
        self.pixels[idx] = color;
    }

    fn pixel(&self, px: u16, py: u16) -> Color {
        self.pixels[usize::from(py) * usize::from(self.cols) + usize::from(px)]
    }

    fn draw_cell(&mut self, col: u16, row: u16) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(col, row))?;
        let idx = usize::from(row) * usize::from(self.cols) + usize::from(col);
        match self.glyphs[idx] {
            Some((ch, color)) => queue!(
                self.out,
                style::SetForegroundColor(term_color(color)),
                style::SetBackgroundColor(term_color(self.background)),
                style::Print(ch)
            ),
            None => {
                let top = self.pixel(col, row * 2);
                let bottom = self.pixel(col, row * 2 + 1);
                queue!(
                    self.out,
                    style::SetForegroundColor(term_color(top)),
                    style::SetBackgroundColor(term_color(bottom)),
                    style::Print(UPPER_HALF)
                )
            }
        }
    }

    fn flush_regions(&mut self, regions: &[Rect]) -> io::Result<()> {
        for region in regions {
            let (x0, y0, x1, y1) = self.pixel_span(*region);
            if x0 >= x1 || y0 >= y1 {
                continue;
            }
            for row in (y0 / 2)..((y1 + 1) / 2) {
                for col in x0..x1 {
                    self.draw_cell(col as u16, row as u16)?;
                }
            }
        }
        queue!(self.out, style::ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Surface for TermSurface<W> {
    type Text = TermLabel;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.background = color;
        self.pixels.fill(color);
        self.glyphs.fill(None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (x0, y0, x1, y1) = self.pixel_span(rect);
        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel(px, py, color);
            }
        }
    }

    fn fill_circle(&mut self, center: IVec2, radius: u32, color: Color) {
        let (sx, sy) = self.scale();
        let r = radius as f32;
        let bounds = Rect::new(
            center.x - radius as i32,
            center.y - radius as i32,
            2 * radius as i32,
            2 * radius as i32,
        );
        let (x0, y0, x1, y1) = self.pixel_span(bounds);
        for py in y0..y1 {
            for px in x0..x1 {
                // Sample the pixel centre in logical space
                let lx = (px as f32 + 0.5) / sx - center.x as f32;
                let ly = (py as f32 + 0.5) / sy - center.y as f32;
                if lx * lx + ly * ly <= r * r {
                    self.set_pixel(px, py, color);
                }
            }
        }
        // A ball smaller than a pixel still shows up
        self.set_pixel(
            (center.x as f32 * sx) as i32,
            (center.y as f32 * sy) as i32,
            color,
        );
    }

    fn blit(&mut self, text: &TermLabel, at: IVec2) {
        let (sx, sy) = self.scale();
        let row = (at.y as f32 * sy / 2.0).floor() as i32;
        let first_col = (at.x as f32 * sx).round() as i32;
        if row < 0 || row >= i32::from(self.rows) {
            return;
        }
        for (i, ch) in text.text.chars().enumerate() {
            let col = first_col + i as i32;
            if col < 0 || col >= i32::from(self.cols) {
                continue;
            }
            let idx = row as usize * usize::from(self.cols) + col as usize;
            self.glyphs[idx] = Some((ch, text.color));
        }
    }

    fn present(&mut self, regions: &[Rect]) {
        if let Err(err) = self.flush_regions(regions) {
            self.error.get_or_insert(err);
        }
    }
}
