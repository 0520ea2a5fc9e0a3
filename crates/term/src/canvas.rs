//! Pixel raster addressed in world units.
//!
//! Shapes are given in logical world coordinates and sampled at pixel
//! centers, so the same drawing code works at any terminal size. A pixel is
//! covered when its center falls inside the shape.

use crate::fb::Rgb;

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    width: u16,
    height: u16,
    scale: f32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(width: u16, height: u16, scale: f32) -> Self {
        let mut canvas = Self::default();
        canvas.resize(width, height, scale);
        canvas
    }

    /// Resize to `width` x `height` pixels at `scale` pixels per world unit.
    ///
    /// Keeps the allocation when the pixel count does not grow.
    pub fn resize(&mut self, width: u16, height: u16, scale: f32) {
        self.width = width;
        self.height = height;
        self.scale = scale;
        self.pixels
            .resize((width as usize) * (height as usize), Rgb::default());
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
    }

    #[inline(always)]
    fn put(&mut self, x: u16, y: u16, color: Rgb) {
        let i = (y as usize) * (self.width as usize) + (x as usize);
        self.pixels[i] = color;
    }

    /// World coordinate of a pixel center.
    #[inline(always)]
    fn center(&self, p: u16) -> f32 {
        (p as f32 + 0.5) / self.scale
    }

    /// Pixels whose centers lie in the world interval `[lo, hi)`.
    fn span(&self, lo: f32, hi: f32, limit: u16) -> (u16, u16) {
        if hi <= lo || self.scale <= 0.0 {
            return (0, 0);
        }
        let start = (lo * self.scale - 0.5).ceil().clamp(0.0, limit as f32) as u16;
        let end = (hi * self.scale - 0.5).ceil().clamp(0.0, limit as f32) as u16;
        (start, end.max(start))
    }

    /// Fill every row with a blend from `top` (world y 0) to `bottom`
    /// (world y `world_height`).
    pub fn vertical_gradient(&mut self, top: Rgb, bottom: Rgb, world_height: f32) {
        for py in 0..self.height {
            let t = self.center(py) / world_height;
            let color = top.lerp(bottom, t);
            for px in 0..self.width {
                self.put(px, py, color);
            }
        }
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let (x0, x1) = self.span(x, x + w, self.width);
        let (y0, y1) = self.span(y, y + h, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, color);
            }
        }
    }

    pub fn fill_triangle(&mut self, a: (f32, f32), b: (f32, f32), c: (f32, f32), color: Rgb) {
        let min_x = a.0.min(b.0).min(c.0);
        let max_x = a.0.max(b.0).max(c.0);
        let min_y = a.1.min(b.1).min(c.1);
        let max_y = a.1.max(b.1).max(c.1);
        let (x0, x1) = self.span(min_x, max_x, self.width);
        let (y0, y1) = self.span(min_y, max_y, self.height);

        let edge = |p: (f32, f32), q: (f32, f32), x: f32, y: f32| {
            (q.0 - p.0) * (y - p.1) - (q.1 - p.1) * (x - p.0)
        };

        for py in y0..y1 {
            let wy = self.center(py);
            for px in x0..x1 {
                let wx = self.center(px);
                let e0 = edge(a, b, wx, wy);
                let e1 = edge(b, c, wx, wy);
                let e2 = edge(c, a, wx, wy);
                let inside = (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0)
                    || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0);
                if inside {
                    self.put(px, py, color);
                }
            }
        }
    }

    /// Ellipse centered at `(cx, cy)` with radii `rx`, `ry`, rotated by
    /// `rotation` radians (positive turns +x toward +y).
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, rotation: f32, color: Rgb) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let reach = rx.max(ry);
        let (x0, x1) = self.span(cx - reach, cx + reach, self.width);
        let (y0, y1) = self.span(cy - reach, cy + reach, self.height);
        let (sin, cos) = rotation.sin_cos();

        for py in y0..y1 {
            let dy = self.center(py) - cy;
            for px in x0..x1 {
                let dx = self.center(px) - cx;
                // Undo the rotation to land in the ellipse's own frame.
                let u = dx * cos + dy * sin;
                let v = -dx * sin + dy * cos;
                if (u / rx) * (u / rx) + (v / ry) * (v / ry) <= 1.0 {
                    self.put(px, py, color);
                }
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgb) {
        self.fill_ellipse(cx, cy, r, r, 0.0, color);
    }
}
