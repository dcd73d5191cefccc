use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::color::Rgb;
use crate::config::GridConfig;
use crate::container::{CellRect, Container, PointerEvent, PointerEventKind, PointerListener};
use crate::paint::{PaintController, SharedPaintState};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridSizeError {
    #[error("no size entered")]
    Missing,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("{0} is out of range")]
    OutOfRange(i64),
}

/// One square of the grid. Its position is assigned by the container's
/// layout when it is appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub rect: CellRect,
    pub painted: Option<Rgb>,
    pub hovered: bool,
}

impl Cell {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            rect: CellRect {
                x: 0.0,
                y: 0.0,
                width,
                height,
            },
            painted: None,
            hovered: false,
        }
    }

    pub fn paint(&mut self, color: Rgb) {
        self.painted = Some(color);
    }

    pub fn is_painted(&self) -> bool {
        self.painted.is_some()
    }
}

/// Marks cells while the pointer is over them.
pub struct HoverEffect;

impl PointerListener for HoverEffect {
    fn handle(&mut self, event: &PointerEvent, cells: &mut [Cell]) {
        let Some(index) = event.target else {
            return;
        };
        let Some(cell) = cells.get_mut(index) else {
            return;
        };
        match event.kind {
            PointerEventKind::Over => cell.hovered = true,
            PointerEventKind::Out => cell.hovered = false,
            PointerEventKind::Down | PointerEventKind::Up => {}
        }
    }
}

/// Builds the cell grid inside a container and arms its pointer behavior.
pub struct GridRenderer {
    dimension: f64,
    paint_state: SharedPaintState,
    rng: StdRng,
}

impl GridRenderer {
    pub fn new(dimension: f64, paint_state: SharedPaintState, rng: StdRng) -> Self {
        Self {
            dimension,
            paint_state,
            rng,
        }
    }

    /// Replaces the container's content with `size * size` cells.
    ///
    /// `size` is trusted; callers validate it first. Every call subscribes a
    /// fresh paint controller, so a stroke never carries over a rebuild.
    pub fn build_grid(&mut self, container: &mut Container, size: u32) {
        container.clear();
        container.set_dimensions(self.dimension, self.dimension);

        let side = self.dimension / size as f64;
        for _ in 0..size.pow(2) {
            container.append_cell(Cell::new(side, side));
        }

        container.subscribe(Box::new(HoverEffect));
        let stroke_rng = StdRng::seed_from_u64(self.rng.gen());
        container.subscribe(Box::new(PaintController::new(
            self.paint_state.clone(),
            stroke_rng,
        )));

        log::debug!(
            "built {}x{} grid ({} cells, {:.3}px each)",
            size,
            size,
            container.cell_count(),
            side
        );
    }
}

/// Reads a grid size from prompt text.
///
/// Mirrors a lenient integer parse: leading whitespace and a sign are
/// allowed, digits are read until the first non-digit and the rest is
/// ignored. `None` means the prompt was cancelled.
pub fn parse_grid_size(input: Option<&str>, config: &GridConfig) -> Result<u32, GridSizeError> {
    let text = input.map(str::trim_start).unwrap_or_default();
    if text.trim_end().is_empty() {
        return Err(GridSizeError::Missing);
    }

    let (negative, unsigned) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let digits: &str = {
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        &unsigned[..end]
    };
    if digits.is_empty() {
        return Err(GridSizeError::NotANumber(text.trim_end().to_string()));
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    let value = if negative { -magnitude } else { magnitude };
    if !config.size_in_range(value) {
        return Err(GridSizeError::OutOfRange(value));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::PaintState;

    fn renderer() -> GridRenderer {
        GridRenderer::new(300.0, PaintState::shared(), StdRng::seed_from_u64(1))
    }

    #[test]
    fn builds_size_squared_cells() {
        let mut renderer = renderer();
        let mut container = Container::new();
        for size in [2, 16, 7, 128] {
            renderer.build_grid(&mut container, size);
            assert_eq!(container.cell_count(), (size * size) as usize);
            assert_eq!(container.width(), 300.0);
            assert_eq!(container.height(), 300.0);
            let side = 300.0 / size as f64;
            assert!(container
                .cells()
                .iter()
                .all(|cell| cell.rect.width == side && cell.rect.height == side));
        }
    }

    #[test]
    fn rebuild_replaces_cells_and_listeners() {
        let mut renderer = renderer();
        let mut container = Container::new();
        renderer.build_grid(&mut container, 4);
        container.pointer_down(1.0, 1.0);
        container.pointer_up(1.0, 1.0);
        assert!(container.cells()[0].is_painted());

        renderer.build_grid(&mut container, 4);
        assert_eq!(container.cell_count(), 16);
        assert_eq!(container.listener_count(), 2);
        assert!(container.cells().iter().all(|cell| !cell.is_painted()));
    }

    #[test]
    fn hover_follows_pointer() {
        let mut renderer = renderer();
        let mut container = Container::new();
        renderer.build_grid(&mut container, 2);

        container.pointer_move(10.0, 10.0);
        assert!(container.cells()[0].hovered);

        container.pointer_move(200.0, 10.0);
        assert!(!container.cells()[0].hovered);
        assert!(container.cells()[1].hovered);
        assert!(!container.cells()[1].is_painted());

        container.pointer_leave();
        assert!(container.cells().iter().all(|cell| !cell.hovered));
    }

    #[test]
    fn parses_sizes_leniently() {
        let config = GridConfig::default();
        assert_eq!(parse_grid_size(Some("16"), &config), Ok(16));
        assert_eq!(parse_grid_size(Some("  42  "), &config), Ok(42));
        assert_eq!(parse_grid_size(Some("+8"), &config), Ok(8));
        assert_eq!(parse_grid_size(Some("12px"), &config), Ok(12));
        assert_eq!(parse_grid_size(Some("12.9"), &config), Ok(12));
    }

    #[test]
    fn rejects_invalid_sizes() {
        let config = GridConfig::default();
        assert_eq!(parse_grid_size(None, &config), Err(GridSizeError::Missing));
        assert_eq!(parse_grid_size(Some(""), &config), Err(GridSizeError::Missing));
        assert_eq!(parse_grid_size(Some("   "), &config), Err(GridSizeError::Missing));
        assert_eq!(
            parse_grid_size(Some("abc"), &config),
            Err(GridSizeError::NotANumber("abc".to_string()))
        );
        assert_eq!(parse_grid_size(Some("1"), &config), Err(GridSizeError::OutOfRange(1)));
        assert_eq!(parse_grid_size(Some("129"), &config), Err(GridSizeError::OutOfRange(129)));
        assert_eq!(parse_grid_size(Some("-4"), &config), Err(GridSizeError::OutOfRange(-4)));
        assert!(matches!(
            parse_grid_size(Some("99999999999999999999999"), &config),
            Err(GridSizeError::OutOfRange(_))
        ));
    }
}
