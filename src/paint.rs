use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;

use crate::color::Rgb;
use crate::container::{PointerEvent, PointerEventKind, PointerListener};
use crate::grid::Cell;

pub type SharedPaintState = Rc<RefCell<PaintState>>;

/// Color settings shared by the UI and every paint controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintState {
    pub current_color: Rgb,
    pub random_mode: bool,
}

impl PaintState {
    pub fn new() -> Self {
        Self {
            current_color: Rgb::BLACK,
            random_mode: false,
        }
    }

    pub fn shared() -> SharedPaintState {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Picks the fill for one paint: the current color, or a fresh random
    /// color in random mode.
    pub fn next_fill(&self, rng: &mut StdRng) -> Rgb {
        if self.random_mode {
            Rgb::random(rng)
        } else {
            self.current_color
        }
    }
}

impl Default for PaintState {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the paint button is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokePhase {
    Idle,
    Painting,
}

/// Turns pointer gestures over the container into cell fills.
pub struct PaintController {
    state: SharedPaintState,
    rng: StdRng,
    phase: StrokePhase,
}

impl PaintController {
    pub fn new(state: SharedPaintState, rng: StdRng) -> Self {
        Self {
            state,
            rng,
            phase: StrokePhase::Idle,
        }
    }

    pub fn phase(&self) -> StrokePhase {
        self.phase
    }

    pub fn apply_color(&mut self, cell: &mut Cell) {
        let fill = self.state.borrow().next_fill(&mut self.rng);
        cell.paint(fill);
    }

    fn paint_target(&mut self, target: Option<usize>, cells: &mut [Cell]) {
        let Some(index) = target else {
            return;
        };
        if let Some(cell) = cells.get_mut(index) {
            self.apply_color(cell);
        }
    }
}

impl PointerListener for PaintController {
    fn handle(&mut self, event: &PointerEvent, cells: &mut [Cell]) {
        match (self.phase, event.kind) {
            (StrokePhase::Idle, PointerEventKind::Down) if event.target.is_some() => {
                self.phase = StrokePhase::Painting;
                self.paint_target(event.target, cells);
            }
            // Repeated entry into a cell paints it again.
            (StrokePhase::Painting, PointerEventKind::Over)
            | (StrokePhase::Painting, PointerEventKind::Down) => {
                self.paint_target(event.target, cells);
            }
            (_, PointerEventKind::Up) => self.phase = StrokePhase::Idle,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn cells(count: usize) -> Vec<Cell> {
        (0..count).map(|_| Cell::new(10.0, 10.0)).collect()
    }

    fn event(kind: PointerEventKind, target: Option<usize>) -> PointerEvent {
        PointerEvent::new(kind, target)
    }

    fn controller(state: &SharedPaintState) -> PaintController {
        PaintController::new(state.clone(), StdRng::seed_from_u64(99))
    }

    #[test]
    fn fixed_color_paints_only_the_target() {
        let state = PaintState::shared();
        state.borrow_mut().current_color = Rgb::new(200, 10, 30);
        let mut controller = controller(&state);
        let mut grid = cells(4);

        controller.handle(&event(PointerEventKind::Down, Some(2)), &mut grid);

        assert_eq!(grid[2].painted, Some(Rgb::new(200, 10, 30)));
        assert!(grid.iter().enumerate().all(|(i, c)| i == 2 || c.painted.is_none()));
    }

    #[test]
    fn stroke_paints_until_release() {
        let state = PaintState::shared();
        let mut controller = controller(&state);
        let mut grid = cells(5);

        controller.handle(&event(PointerEventKind::Down, Some(0)), &mut grid);
        for target in 1..4 {
            controller.handle(&event(PointerEventKind::Over, Some(target)), &mut grid);
        }
        controller.handle(&event(PointerEventKind::Up, None), &mut grid);
        controller.handle(&event(PointerEventKind::Over, Some(4)), &mut grid);

        assert!(grid[..4].iter().all(|c| c.painted == Some(Rgb::BLACK)));
        assert_eq!(grid[4].painted, None);
        assert_eq!(controller.phase(), StrokePhase::Idle);
    }

    #[test]
    fn hovering_without_press_paints_nothing() {
        let state = PaintState::shared();
        let mut controller = controller(&state);
        let mut grid = cells(3);

        controller.handle(&event(PointerEventKind::Over, Some(1)), &mut grid);
        controller.handle(&event(PointerEventKind::Down, None), &mut grid);
        controller.handle(&event(PointerEventKind::Over, Some(2)), &mut grid);

        assert!(grid.iter().all(|c| !c.is_painted()));
        assert_eq!(controller.phase(), StrokePhase::Idle);
    }

    #[test]
    fn random_mode_repaints_on_every_entry() {
        let state = PaintState::shared();
        state.borrow_mut().random_mode = true;
        let mut controller = controller(&state);
        let mut grid = cells(2);

        controller.handle(&event(PointerEventKind::Down, Some(0)), &mut grid);
        let mut seen = vec![grid[0].painted];
        for _ in 0..16 {
            controller.handle(&event(PointerEventKind::Out, Some(0)), &mut grid);
            controller.handle(&event(PointerEventKind::Over, Some(0)), &mut grid);
            seen.push(grid[0].painted);
        }

        assert!(seen.iter().all(Option::is_some));
        assert!(seen.windows(2).any(|w| w[0] != w[1]));
        assert_eq!(grid[1].painted, None);
    }

    #[test]
    fn mode_changes_apply_to_later_paints() {
        let state = PaintState::shared();
        let mut controller = controller(&state);
        let mut grid = cells(2);

        controller.handle(&event(PointerEventKind::Down, Some(0)), &mut grid);
        state.borrow_mut().current_color = Rgb::new(1, 2, 3);
        controller.handle(&event(PointerEventKind::Over, Some(1)), &mut grid);

        assert_eq!(grid[0].painted, Some(Rgb::BLACK));
        assert_eq!(grid[1].painted, Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = PaintState {
            current_color: Rgb::WHITE,
            random_mode: true,
        };
        state.reset();
        assert_eq!(state, PaintState::default());
        assert_eq!(state.current_color, Rgb::BLACK);
        assert!(!state.random_mode);
    }
}
