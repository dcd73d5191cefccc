//! The surface that holds grid cells.
//!
//! A `Container` owns its child cells, lays them out as a wrapping row-major
//! flow, and routes pointer input to container-level subscribers. Listeners
//! are attached to the container rather than to cells, so a rebuilt set of
//! cells is covered without extra registration. `clear` drops cells and
//! subscribers together.

use crate::grid::Cell;

// Absorbs float accumulation when checking whether a cell still fits a row.
const LAYOUT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Over,
    Out,
    Up,
}

/// A pointer event after hit-testing. `target` is the index of the cell
/// under the pointer, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub target: Option<usize>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, target: Option<usize>) -> Self {
        Self { kind, target }
    }
}

/// Container-level pointer subscriber.
pub trait PointerListener {
    fn handle(&mut self, event: &PointerEvent, cells: &mut [Cell]);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CellRect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Default)]
pub struct Container {
    width: f64,
    height: f64,
    cells: Vec<Cell>,
    listeners: Vec<Box<dyn PointerListener>>,
    columns: usize,
    next_x: f64,
    next_y: f64,
    row_height: f64,
    hovered: Option<usize>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every cell and subscriber. Safe on an empty container.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.listeners.clear();
        self.columns = 0;
        self.next_x = 0.0;
        self.next_y = 0.0;
        self.row_height = 0.0;
        self.hovered = None;
    }

    pub fn set_dimensions(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Places `cell` after the previous one, wrapping to a new row when it
    /// would overflow the container width.
    pub fn append_cell(&mut self, mut cell: Cell) {
        let (width, height) = (cell.rect.width, cell.rect.height);
        if self.next_x > 0.0 && self.next_x + width > self.width + LAYOUT_EPSILON {
            self.next_x = 0.0;
            self.next_y += self.row_height;
            self.row_height = 0.0;
        }

        cell.rect.x = self.next_x;
        cell.rect.y = self.next_y;
        if self.next_y == 0.0 {
            self.columns += 1;
        }

        self.next_x += width;
        self.row_height = self.row_height.max(height);
        self.cells.push(cell);
    }

    pub fn subscribe(&mut self, listener: Box<dyn PointerListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width && y < self.height
    }

    /// Maps container-local coordinates to the index of the cell there.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<usize> {
        let first = self.cells.first()?;
        if !self.contains_point(x, y) || self.columns == 0 {
            return None;
        }

        let col = (x / first.rect.width).floor() as usize;
        let row = (y / first.rect.height).floor() as usize;
        if col >= self.columns {
            return None;
        }

        let index = row * self.columns + col;
        // Rows are uniform, so the arithmetic guess is right except for
        // points sitting exactly on a rounded boundary.
        match self.cells.get(index) {
            Some(cell) if cell.rect.contains(x, y) => Some(index),
            _ => self.cells.iter().position(|cell| cell.rect.contains(x, y)),
        }
    }

    /// Pointer pressed at container-local coordinates. Presses outside the
    /// container are ignored.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if !self.contains_point(x, y) {
            return;
        }
        let target = self.cell_at(x, y);
        self.update_hover(target);
        self.dispatch(PointerEvent::new(PointerEventKind::Down, target));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let target = self.cell_at(x, y);
        self.update_hover(target);
    }

    /// Pointer released. Delivered wherever the release happens so a stroke
    /// always ends.
    pub fn pointer_up(&mut self, x: f64, y: f64) {
        let target = self.cell_at(x, y);
        self.dispatch(PointerEvent::new(PointerEventKind::Up, target));
    }

    /// The pointer left the window entirely.
    pub fn pointer_leave(&mut self) {
        self.update_hover(None);
    }

    fn update_hover(&mut self, target: Option<usize>) {
        if target == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            self.dispatch(PointerEvent::new(PointerEventKind::Out, Some(previous)));
        }
        if target.is_some() {
            self.hovered = target;
            self.dispatch(PointerEvent::new(PointerEventKind::Over, target));
        }
    }

    pub fn dispatch(&mut self, event: PointerEvent) {
        for listener in self.listeners.iter_mut() {
            listener.handle(&event, &mut self.cells);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<PointerEvent>>>);

    impl PointerListener for Recorder {
        fn handle(&mut self, event: &PointerEvent, _cells: &mut [Cell]) {
            self.0.borrow_mut().push(*event);
        }
    }

    fn filled(size: u32) -> Container {
        let mut container = Container::new();
        container.set_dimensions(300.0, 300.0);
        let side = 300.0 / size as f64;
        for _ in 0..size * size {
            container.append_cell(Cell::new(side, side));
        }
        container
    }

    fn recorded(container: &mut Container) -> Rc<RefCell<Vec<PointerEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        container.subscribe(Box::new(Recorder(events.clone())));
        events
    }

    #[test]
    fn flow_layout_keeps_size_cells_per_row() {
        for size in [2, 3, 7, 16, 33, 97, 128] {
            let container = filled(size);
            assert_eq!(container.columns(), size as usize, "size {}", size);
            let last = container.cells().last().unwrap();
            let side = 300.0 / size as f64;
            assert!((last.rect.y - side * (size - 1) as f64).abs() < 1e-6);
        }
    }

    #[test]
    fn hit_test_maps_coordinates_to_cells() {
        let container = filled(3);
        assert_eq!(container.cell_at(0.0, 0.0), Some(0));
        assert_eq!(container.cell_at(150.0, 10.0), Some(1));
        assert_eq!(container.cell_at(299.0, 299.0), Some(8));
        assert_eq!(container.cell_at(300.0, 10.0), None);
        assert_eq!(container.cell_at(-1.0, 10.0), None);
    }

    #[test]
    fn moving_across_cells_emits_out_then_over() {
        let mut container = filled(2);
        let events = recorded(&mut container);

        container.pointer_move(10.0, 10.0);
        container.pointer_move(20.0, 20.0);
        container.pointer_move(160.0, 10.0);
        container.pointer_leave();

        let kinds: Vec<_> = events.borrow().iter().map(|e| (e.kind, e.target)).collect();
        assert_eq!(
            kinds,
            vec![
                (PointerEventKind::Over, Some(0)),
                (PointerEventKind::Out, Some(0)),
                (PointerEventKind::Over, Some(1)),
                (PointerEventKind::Out, Some(1)),
            ]
        );
        assert_eq!(container.hovered(), None);
    }

    #[test]
    fn release_outside_is_still_delivered() {
        let mut container = filled(2);
        let events = recorded(&mut container);

        container.pointer_down(500.0, 500.0);
        container.pointer_up(500.0, 500.0);

        assert_eq!(
            *events.borrow(),
            vec![PointerEvent::new(PointerEventKind::Up, None)]
        );
    }

    #[test]
    fn clear_drops_cells_and_listeners() {
        let mut container = filled(4);
        let _events = recorded(&mut container);
        container.clear();
        container.clear();
        assert_eq!(container.cell_count(), 0);
        assert_eq!(container.listener_count(), 0);
        assert_eq!(container.cell_at(10.0, 10.0), None);
    }
}
