//! Half-block terminal canvas and the drawing pass for a firework.
//!
//! Each terminal row holds two pixels: the cell background is the upper
//! pixel and a `▄` glyph in the foreground colour is the lower one. Drawing
//! accumulates into a glow buffer where the brighter write wins; `present`
//! blends that against the sky colour and writes 24-bit escapes.

use crate::color::Rgb;
use crate::firework::{Firework, FireworkState};
use crate::sprite::SpriteAtlas;
use glam::DVec2;
use std::io::Write;

const ROCKET_COLOR: Rgb = Rgb(255, 230, 180);
// Sprites are drawn at twice the particle's nominal size
const SPRITE_EXTENT: f64 = 2.0;
const TRAIL_GLOW: f32 = 1.6;

pub struct Canvas {
    width: usize,
    height: usize,
    background: Rgb,
    glow: Vec<(f32, Rgb)>,
    output_buf: Vec<u8>,
}

impl Canvas {
    /// `width` × `height` in pixels; `height` is twice the terminal rows.
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self {
            width,
            height,
            background,
            glow: vec![(0.0, background); width * height],
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn clear(&mut self) {
        self.glow.fill((0.0, self.background));
    }

    pub fn glow_at(&self, x: usize, y: usize) -> Option<(f32, Rgb)> {
        (x < self.width && y < self.height).then(|| self.glow[y * self.width + x])
    }

    pub fn plot(&mut self, x: i32, y: i32, intensity: f32, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if intensity > self.glow[idx].0 {
            self.glow[idx] = (intensity, color);
        }
    }

    /// Soft disc: full intensity at the centre, falling off to the rim.
    pub fn splat(&mut self, center: (f64, f64), radius: f64, intensity: f32, color: Rgb) {
        let (cx, cy) = center;
        let reach = radius.max(0.5);
        // clipped to the canvas; casts saturate for far-off points
        let x0 = ((cx - reach).floor() as i32).max(0);
        let x1 = ((cx + reach).ceil() as i32).min(self.width as i32 - 1);
        let y0 = ((cy - reach).floor() as i32).max(0);
        let y1 = ((cy + reach).ceil() as i32).min(self.height as i32 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist > reach {
                    continue;
                }
                let falloff = 1.0 - (dist / reach) as f32 * 0.6;
                self.plot(x, y, intensity * falloff, color);
            }
        }
    }

    pub fn present<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut prev_top: Option<Rgb> = None;
        let mut prev_bot: Option<Rgb> = None;

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top = self.shade(x, y);
                let bot = if y + 1 < self.height {
                    self.shade(x, y + 1)
                } else {
                    top
                };

                if prev_top != Some(top) {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = Some(top);
                }
                if prev_bot != Some(bot) {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = Some(bot);
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top = None;
            prev_bot = None;
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()
    }

    fn shade(&self, x: usize, y: usize) -> Rgb {
        let (intensity, color) = self.glow[y * self.width + x];
        if intensity > 0.05 {
            self.background.lerp(color, intensity / 3.0)
        } else {
            self.background
        }
    }
}

/// Maps sky coordinates onto canvas pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    scale: DVec2,
}

impl Viewport {
    pub fn new(sky_width: f64, sky_height: f64, canvas: &Canvas) -> Self {
        Self {
            scale: DVec2::new(
                canvas.width() as f64 / sky_width,
                canvas.height() as f64 / sky_height,
            ),
        }
    }

    pub fn project(&self, point: DVec2) -> (f64, f64) {
        let p = point * self.scale;
        (p.x, p.y)
    }

    /// Sky length to pixels, averaged over both axes.
    pub fn length(&self, length: f64) -> f64 {
        length * (self.scale.x + self.scale.y) * 0.5
    }
}

/// Read-only drawing pass over a firework's live state.
pub fn draw_firework(
    canvas: &mut Canvas,
    view: &Viewport,
    atlas: &mut SpriteAtlas,
    firework: &Firework,
    rng: &mut fastrand::Rng,
) {
    // trails first so the particle heads sit on top
    for particle in firework.particles() {
        for point in particle.trail() {
            if !point.is_visible() {
                continue;
            }
            let frames = atlas.frames(point.color());
            let frame = frames[point.frame_index(rng)];
            let radius = view.length(point.draw_size()) * 0.5;
            let intensity = TRAIL_GLOW * point.alpha() as f32 / 255.0;
            canvas.splat(view.project(point.position()), radius, intensity, frame.color);
        }
    }

    for particle in firework.particles() {
        let frames = atlas.frames(particle.color());
        let frame = frames[particle.frame_index(rng)];
        let radius = view.length(particle.size() * SPRITE_EXTENT * frame.scale) * 0.5;
        let intensity = frame.glow * particle.alpha() as f32 / 255.0;
        canvas.splat(view.project(particle.position()), radius, intensity, frame.color);
    }

    if firework.state() == FireworkState::Ascending {
        let (x, y) = view.project(firework.position());
        let (x, y) = (x as i32, y as i32);
        canvas.plot(x, y, 3.0, ROCKET_COLOR);
        canvas.plot(x, y.saturating_add(1), 2.0, ROCKET_COLOR);
    }
}
