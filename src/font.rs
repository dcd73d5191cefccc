//! Text overlay using ab_glyph.
//!
//! The font is read from the first readable monospace font among common
//! system locations. Without one, text drawing is a no-op and the grid keeps
//! working.

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use std::sync::OnceLock;

pub const FONT_SIZE_PX: f32 = 14.0;
const FALLBACK_LINE_HEIGHT: usize = 17;

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Courier New.ttf",
    "/Library/Fonts/Courier New.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

pub struct FontRenderer {
    font: FontVec,
    scale: PxScale,
}

static FONT_RENDERER: OnceLock<Option<FontRenderer>> = OnceLock::new();

impl FontRenderer {
    pub fn from_bytes(bytes: Vec<u8>, size_px: f32) -> Result<Self, ab_glyph::InvalidFont> {
        Ok(Self {
            font: FontVec::try_from_vec(bytes)?,
            scale: PxScale::from(size_px),
        })
    }

    fn load_system() -> Option<Self> {
        for path in FONT_CANDIDATES {
            let Ok(bytes) = std::fs::read(path) else {
                continue;
            };
            match Self::from_bytes(bytes, FONT_SIZE_PX) {
                Ok(renderer) => {
                    log::info!("using font {}", path);
                    return Some(renderer);
                }
                Err(err) => log::warn!("skipping font {}: {}", path, err),
            }
        }
        log::warn!("no usable font found, text overlay disabled");
        None
    }

    pub fn line_height(&self) -> usize {
        // 20% extra leading
        (self.font.as_scaled(self.scale).height() * 1.2).ceil() as usize
    }

    /// Alpha-blends `text` into an RGBA frame with its top-left at (x, y).
    pub fn draw_text(&self, frame: &mut [u8], text: &str, x: usize, y: usize, color: [u8; 3], frame_width: usize) {
        if frame_width == 0 {
            return;
        }
        let frame_height = frame.len() / (frame_width * 4);
        let scaled = self.font.as_scaled(self.scale);
        let baseline = y as f32 + scaled.ascent();
        let mut caret = x as f32;

        for ch in text.chars() {
            let glyph_id = scaled.glyph_id(ch);
            let glyph = glyph_id.with_scale_and_position(self.scale, point(caret, baseline));
            caret += scaled.h_advance(glyph_id);
            if caret as usize > frame_width {
                break;
            }

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px < 0 || py < 0 || px as usize >= frame_width || py as usize >= frame_height {
                    return;
                }
                let alpha = (coverage.clamp(0.0, 1.0) * 255.0) as u16;
                if alpha == 0 {
                    return;
                }
                let idx = (py as usize * frame_width + px as usize) * 4;
                let inv_alpha = 255 - alpha;
                for channel in 0..3 {
                    let under = frame[idx + channel] as u16;
                    frame[idx + channel] = ((under * inv_alpha + color[channel] as u16 * alpha) / 255) as u8;
                }
                frame[idx + 3] = 255;
            });
        }
    }
}

pub fn get_font() -> Option<&'static FontRenderer> {
    FONT_RENDERER.get_or_init(FontRenderer::load_system).as_ref()
}

pub fn draw_text(frame: &mut [u8], text: &str, x: usize, y: usize, color: [u8; 3], frame_width: usize) {
    if let Some(font) = get_font() {
        font.draw_text(frame, text, x, y, color, frame_width);
    }
}

pub fn get_line_height() -> usize {
    get_font().map_or(FALLBACK_LINE_HEIGHT, FontRenderer::line_height)
}
