//! Canvas sinks
//!
//! The render loop issues canvas-style draw calls (paths, fill and stroke
//! styles). `Framebuffer` turns them into pixels in software; `CommandRecorder`
//! keeps the call stream for inspection.

use super::types::{Color, Point2, Rgba};

/// Consumer of per-frame draw calls
pub trait Canvas {
    /// Fill the whole viewport with an opaque color
    fn clear(&mut self, color: Color);
    fn begin_path(&mut self);
    /// Extend the current path; the first point of a path starts it
    fn line_to(&mut self, p: Point2);
    fn close_path(&mut self);
    fn set_fill_style(&mut self, style: Rgba);
    fn set_stroke_style(&mut self, style: Rgba);
    fn fill(&mut self);
    fn stroke(&mut self);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    BeginPath,
    LineTo(Point2),
    ClosePath,
    SetFillStyle(Rgba),
    SetStrokeStyle(Rgba),
    Fill,
    Stroke,
}

/// Canvas that only records what it is asked to draw
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `fill()` calls recorded
    pub fn fill_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Fill)).count()
    }

    /// Number of paths begun
    pub fn path_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::BeginPath)).count()
    }
}

impl Canvas for CommandRecorder {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }
    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }
    fn line_to(&mut self, p: Point2) {
        self.commands.push(DrawCommand::LineTo(p));
    }
    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }
    fn set_fill_style(&mut self, style: Rgba) {
        self.commands.push(DrawCommand::SetFillStyle(style));
    }
    fn set_stroke_style(&mut self, style: Rgba) {
        self.commands.push(DrawCommand::SetStrokeStyle(style));
    }
    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }
    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
}

/// Framebuffer for software rendering
///
/// Path coordinates are relative to the middle of the buffer, so the camera's
/// screen center lands on the center pixel.
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
    path: Vec<Point2>,
    closed: bool,
    fill_style: Rgba,
    stroke_style: Rgba,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
            path: Vec::with_capacity(4),
            closed: false,
            fill_style: Color::BLACK.with_alpha(1.0),
            stroke_style: Color::BLACK.with_alpha(1.0),
        }
    }

    /// Read back a pixel as RGBA
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let mut out = [0u8; 4];
            out.copy_from_slice(&self.pixels[idx..idx + 4]);
            Some(out)
        } else {
            None
        }
    }

    /// Path point to buffer coordinates
    fn to_buffer(&self, p: Point2) -> (f64, f64) {
        (p.x + self.width as f64 / 2.0, p.y + self.height as f64 / 2.0)
    }

    /// Set a pixel with alpha blending (0 = transparent, 255 = opaque)
    #[inline]
    pub fn set_pixel_alpha(&mut self, x: usize, y: usize, color: Color, alpha: u8) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;

            let back_r = self.pixels[idx];
            let back_g = self.pixels[idx + 1];
            let back_b = self.pixels[idx + 2];

            // result = front * alpha + back * (1 - alpha)
            let a = alpha as u16;
            let inv_a = 255 - a;
            self.pixels[idx] = ((color.r as u16 * a + back_r as u16 * inv_a) / 255) as u8;
            self.pixels[idx + 1] = ((color.g as u16 * a + back_g as u16 * inv_a) / 255) as u8;
            self.pixels[idx + 2] = ((color.b as u16 * a + back_b as u16 * inv_a) / 255) as u8;
            self.pixels[idx + 3] = 255;
        }
    }

    /// Draw a line with alpha blending (Bresenham)
    pub fn draw_line_alpha(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, alpha: u8) {
        self.draw_segment_alpha((x0 as f64, y0 as f64), (x1 as f64, y1 as f64), color, alpha);
    }

    /// Draw a line between buffer coordinates, clipped to the buffer first so
    /// far off-screen endpoints cost no more than the visible part
    fn draw_segment_alpha(&mut self, p0: (f64, f64), p1: (f64, f64), color: Color, alpha: u8) {
        // One pixel of margin so the clipped ends still floor to off-screen cells
        let bounds = (-1.0, -1.0, self.width as f64, self.height as f64);
        let Some((p0, p1)) = clip_segment(p0, p1, bounds) else {
            return;
        };
        let (x0, y0) = (p0.0.floor() as i32, p0.1.floor() as i32);
        let (x1, y1) = (p1.0.floor() as i32, p1.1.floor() as i32);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
                self.set_pixel_alpha(x as usize, y as usize, color, alpha);
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Scanline fill of a polygon (even-odd rule) sampled at pixel centers
    pub fn fill_polygon_alpha(&mut self, points: &[(f64, f64)], color: Color, alpha: u8) {
        if points.len() < 3 || alpha == 0 {
            return;
        }
        if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return;
        }

        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let y_start = (min_y - 0.5).ceil().max(0.0) as usize;
        let y_end = (max_y - 0.5).floor().min(self.height as f64 - 1.0);
        if y_end < 0.0 {
            return;
        }

        let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
        for y in y_start..=(y_end as usize) {
            let sy = y as f64 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let (x0, y0) = points[i];
                let (x1, y1) = points[(i + 1) % points.len()];
                // Half-open edge test so shared vertices count once
                if (y0 <= sy && sy < y1) || (y1 <= sy && sy < y0) {
                    let t = (sy - y0) / (y1 - y0);
                    crossings.push(x0 + t * (x1 - x0));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            for span in crossings.chunks_exact(2) {
                let x_start = (span[0] - 0.5).ceil().max(0.0) as usize;
                let x_end = (span[1] - 0.5).floor().min(self.width as f64 - 1.0);
                if x_end < 0.0 {
                    continue;
                }
                for x in x_start..=(x_end as usize) {
                    self.set_pixel_alpha(x, y, color, alpha);
                }
            }
        }
    }
}

/// Liang-Barsky clip of the segment `p0 -> p1` to `(min_x, min_y, max_x, max_y)`.
///
/// Returns `None` when the segment misses the rectangle or has a non-finite end.
fn clip_segment(p0: (f64, f64), p1: (f64, f64), bounds: (f64, f64, f64, f64)) -> Option<((f64, f64), (f64, f64))> {
    if ![p0.0, p0.1, p1.0, p1.1].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (min_x, min_y, max_x, max_y) = bounds;
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    for (p, q) in [(-dx, p0.0 - min_x), (dx, max_x - p0.0), (-dy, p0.1 - min_y), (dy, max_y - p0.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    // Untouched ends are returned as given so in-bounds lines stay exact
    let start = if t0 > 0.0 { (p0.0 + t0 * dx, p0.1 + t0 * dy) } else { p0 };
    let end = if t1 < 1.0 { (p0.0 + t1 * dx, p0.1 + t1 * dy) } else { p1 };
    Some((start, end))
}

impl Canvas for Framebuffer {
    fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.closed = false;
    }

    fn line_to(&mut self, p: Point2) {
        self.path.push(p);
    }

    fn close_path(&mut self) {
        self.closed = true;
    }

    fn set_fill_style(&mut self, style: Rgba) {
        self.fill_style = style;
    }

    fn set_stroke_style(&mut self, style: Rgba) {
        self.stroke_style = style;
    }

    fn fill(&mut self) {
        let points: Vec<(f64, f64)> = self.path.iter().map(|p| self.to_buffer(*p)).collect();
        let style = self.fill_style;
        self.fill_polygon_alpha(&points, style.color, style.alpha_u8());
    }

    fn stroke(&mut self) {
        let style = self.stroke_style;
        let alpha = style.alpha_u8();
        if self.path.len() < 2 || alpha == 0 {
            return;
        }
        let points: Vec<(f64, f64)> = self.path.iter().map(|p| self.to_buffer(*p)).collect();
        let segments = if self.closed { points.len() } else { points.len() - 1 };
        for i in 0..segments {
            let (p0, p1) = (points[i], points[(i + 1) % points.len()]);
            self.draw_segment_alpha(p0, p1, style.color, alpha);
        }
    }
}
