use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use crate::color::Rgb;
use crate::config::CONTAINER_DIMENSION;
use crate::container::{CellRect, Container};
use crate::font;
use crate::paint::PaintState;

pub const GRID_PADDING: u32 = 20;
pub const CONSOLE_LINES: usize = 5;

const BACKGROUND: [u8; 4] = [32, 32, 32, 255];
const CONSOLE_BACKGROUND: [u8; 4] = [16, 16, 16, 255];
const UNPAINTED: Rgb = Rgb::new(245, 245, 245);
const HOVER_TINT: Rgb = Rgb::new(150, 150, 150);
const GRID_LINE: [u8; 4] = [220, 220, 220, 255];
const TEXT_COLOR: [u8; 3] = [200, 200, 200];
const SWATCH_SIZE: u32 = 24;
// Below this cell side grid lines would swallow the cells.
const MIN_SIDE_FOR_LINES: f64 = 6.0;

const RANDOM_STRIPES: [Rgb; 6] = [
    Rgb::new(255, 0, 0),
    Rgb::new(255, 165, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 200, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(128, 0, 128),
];

fn get_console_height() -> u32 {
    let line_height = font::get_line_height();
    let padding = 8;
    (CONSOLE_LINES * line_height + padding * 2) as u32
}

/// Pixel buffer size: the padded container plus the console strip.
pub fn buffer_size() -> (u32, u32) {
    let side = CONTAINER_DIMENSION as u32 + GRID_PADDING * 2;
    (side, side + get_console_height())
}

pub struct GraphicsRenderer {
    pixels: Pixels,
    width: u32,
    height: u32,
}

impl GraphicsRenderer {
    pub fn new(window: &Window, width: u32, height: u32) -> Result<Self, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window);
        let pixels = Pixels::new(width, height, surface_texture)?;

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// The buffer keeps its size; pixels scales it into the new surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
    }

    /// Converts a physical window position to container-local coordinates.
    /// Positions outside the pixel buffer map to `None`.
    pub fn window_to_container(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (px, py) = self.pixels.window_pos_to_pixel((x as f32, y as f32)).ok()?;
        let origin = GRID_PADDING as f64;
        // Sample the centre of the pixel
        Some((px as f64 + 0.5 - origin, py as f64 + 0.5 - origin))
    }

    pub fn render(&mut self, container: &Container, paint: &PaintState, console_lines: &[String]) {
        let (width, height) = (self.width, self.height);
        let frame = self.pixels.frame_mut();

        for pixel in frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&BACKGROUND);
        }

        render_container(frame, width, height, container);
        render_console(frame, width, height, console_lines, paint);
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}

/// Pixel span `[x0, x1) x [y0, y1)` covered by a cell whose container
/// sits at `origin`. Rounding both edges keeps neighbours gap-free when
/// the cell side is fractional.
pub fn cell_pixel_bounds(rect: &CellRect, origin: u32) -> (u32, u32, u32, u32) {
    let o = origin as f64;
    (
        (o + rect.x).round() as u32,
        (o + rect.y).round() as u32,
        (o + rect.x + rect.width).round() as u32,
        (o + rect.y + rect.height).round() as u32,
    )
}

pub fn fill_rect(frame: &mut [u8], width: u32, height: u32, (x0, y0, x1, y1): (u32, u32, u32, u32), color: [u8; 4]) {
    for py in y0..y1.min(height) {
        for px in x0..x1.min(width) {
            let index = ((py * width + px) * 4) as usize;
            if index + 3 < frame.len() {
                frame[index..index + 4].copy_from_slice(&color);
            }
        }
    }
}

fn render_container(frame: &mut [u8], width: u32, height: u32, container: &Container) {
    let origin = GRID_PADDING;
    let side_w = container.width().round() as u32;
    let side_h = container.height().round() as u32;
    fill_rect(frame, width, height, (origin, origin, origin + side_w, origin + side_h), UNPAINTED.to_rgba());

    let Some(first) = container.cells().first() else {
        return;
    };
    let draw_lines = first.rect.width >= MIN_SIDE_FOR_LINES;

    for cell in container.cells() {
        let base = cell.painted.unwrap_or(UNPAINTED);
        let color = if cell.hovered {
            base.blend(HOVER_TINT, 0.4)
        } else {
            base
        };
        let bounds = cell_pixel_bounds(&cell.rect, origin);
        fill_rect(frame, width, height, bounds, color.to_rgba());

        if draw_lines {
            let (x0, y0, x1, y1) = bounds;
            // Right and bottom edges; the first row/column gets the
            // container border below.
            fill_rect(frame, width, height, (x1.saturating_sub(1), y0, x1, y1), GRID_LINE);
            fill_rect(frame, width, height, (x0, y1.saturating_sub(1), x1, y1), GRID_LINE);
        }
    }

    if draw_lines {
        fill_rect(frame, width, height, (origin, origin, origin + side_w, origin + 1), GRID_LINE);
        fill_rect(frame, width, height, (origin, origin, origin + 1, origin + side_h), GRID_LINE);
    }
}

fn render_console(frame: &mut [u8], width: u32, height: u32, lines: &[String], paint: &PaintState) {
    let console_height = get_console_height();
    let console_start_y = height.saturating_sub(console_height);
    fill_rect(frame, width, height, (0, console_start_y, width, height), CONSOLE_BACKGROUND);

    let padding = 8;
    let line_height = font::get_line_height() as u32;
    let swatch_x = width.saturating_sub(padding + SWATCH_SIZE);
    let swatch_y = console_start_y + padding;
    render_swatch(frame, width, height, swatch_x, swatch_y, paint);

    // Newest line sits at the bottom
    let visible = lines.len().min(CONSOLE_LINES);
    for (i, line) in lines[lines.len() - visible..].iter().enumerate() {
        let y = console_start_y + padding + i as u32 * line_height;
        font::draw_text(frame, line, padding as usize, y as usize, TEXT_COLOR, width as usize);
    }
}

fn render_swatch(frame: &mut [u8], width: u32, height: u32, x: u32, y: u32, paint: &PaintState) {
    fill_rect(frame, width, height, (x - 1, y - 1, x + SWATCH_SIZE + 1, y + SWATCH_SIZE + 1), GRID_LINE);
    if paint.random_mode {
        let stripe = SWATCH_SIZE / RANDOM_STRIPES.len() as u32;
        for (i, color) in RANDOM_STRIPES.iter().enumerate() {
            let top = y + i as u32 * stripe;
            let bottom = if i + 1 == RANDOM_STRIPES.len() { y + SWATCH_SIZE } else { top + stripe };
            fill_rect(frame, width, height, (x, top, x + SWATCH_SIZE, bottom), color.to_rgba());
        }
    } else {
        fill_rect(frame, width, height, (x, y, x + SWATCH_SIZE, y + SWATCH_SIZE), paint.current_color.to_rgba());
    }
}
