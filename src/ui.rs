use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::{ColorParseError, Rgb};
use crate::config::GridConfig;
use crate::container::Container;
use crate::grid::{parse_grid_size, GridRenderer, GridSizeError};
use crate::paint::{PaintState, SharedPaintState};

/// Shows a message the user has to acknowledge.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Native message box. Blocks the event loop until dismissed.
pub struct DialogNotifier {
    title: String,
}

impl DialogNotifier {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}

impl Notifier for DialogNotifier {
    fn alert(&mut self, message: &str) {
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(&self.title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

/// The color picker control. Holds a value until it is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPicker {
    value: Rgb,
}

impl ColorPicker {
    pub fn new(value: Rgb) -> Self {
        Self { value }
    }

    pub fn value(&self) -> Rgb {
        self.value
    }

    pub fn set_value(&mut self, value: Rgb) {
        self.value = value;
    }

    pub fn set_text(&mut self, text: &str) -> Result<Rgb, ColorParseError> {
        let value = text.parse::<Rgb>()?;
        self.value = value;
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    GridSize,
    PickColor,
}

/// A pending text request. Pointer input is suspended while one is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub kind: ModalKind,
    pub input: String,
}

impl Modal {
    pub fn prompt(&self, config: &GridConfig) -> String {
        match self.kind {
            ModalKind::GridSize => format!(
                "Enter grid size between {} and {}: {}",
                config.min_size, config.max_size, self.input
            ),
            ModalKind::PickColor => format!("Color (#rrggbb, rgb(), name): {}", self.input),
        }
    }
}

/// What a submitted or cancelled modal produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalOutcome {
    Resized(Result<u32, GridSizeError>),
    Picked(Result<Rgb, ColorParseError>),
    Dismissed,
}

pub struct UiController {
    config: GridConfig,
    paint_state: SharedPaintState,
    renderer: GridRenderer,
    container: Container,
    picker: ColorPicker,
    size: u32,
    modal: Option<Modal>,
    notifier: Box<dyn Notifier>,
}

impl UiController {
    /// Creates the controller and builds the default grid.
    pub fn new(config: GridConfig, notifier: Box<dyn Notifier>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let paint_state = PaintState::shared();
        paint_state.borrow_mut().current_color = config.default_color;
        let mut renderer = GridRenderer::new(config.container_dimension, paint_state.clone(), rng);
        let mut container = Container::new();
        renderer.build_grid(&mut container, config.default_size);

        Self {
            picker: ColorPicker::new(config.default_color),
            size: config.default_size,
            config,
            paint_state,
            renderer,
            container,
            modal: None,
            notifier,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn grid_size(&self) -> u32 {
        self.size
    }

    pub fn paint_state(&self) -> PaintState {
        self.paint_state.borrow().clone()
    }

    pub fn picker(&self) -> &ColorPicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut ColorPicker {
        &mut self.picker
    }

    /// Makes the picker's value the paint color. Paints nothing by itself.
    pub fn apply_color(&mut self) -> Rgb {
        let color = self.picker.value();
        self.paint_state.borrow_mut().current_color = color;
        log::debug!("paint color set to {}", color);
        color
    }

    pub fn toggle_random_mode(&mut self) -> bool {
        let mut state = self.paint_state.borrow_mut();
        state.random_mode = !state.random_mode;
        log::debug!("random color mode {}", if state.random_mode { "on" } else { "off" });
        state.random_mode
    }

    /// Validates `input` and rebuilds the grid at that size.
    ///
    /// `None` is a cancelled prompt. On any error the user is alerted and
    /// nothing changes.
    pub fn change_grid_size(&mut self, input: Option<&str>) -> Result<u32, GridSizeError> {
        match parse_grid_size(input, &self.config) {
            Ok(size) => {
                self.renderer.build_grid(&mut self.container, size);
                self.size = size;
                log::info!("grid resized to {}x{}", size, size);
                Ok(size)
            }
            Err(err) => {
                log::warn!("rejected grid size: {}", err);
                let message = format!(
                    "Invalid size ({}). Enter number between {} and {}!",
                    err, self.config.min_size, self.config.max_size
                );
                self.notifier.alert(&message);
                Err(err)
            }
        }
    }

    /// Restores default colors and rebuilds the default grid.
    pub fn reset(&mut self) {
        self.paint_state.borrow_mut().reset();
        self.paint_state.borrow_mut().current_color = self.config.default_color;
        self.picker.set_value(self.config.default_color);
        self.renderer.build_grid(&mut self.container, self.config.default_size);
        self.size = self.config.default_size;
        log::info!("grid reset to {}x{}", self.size, self.size);
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn open_size_prompt(&mut self) {
        self.open_modal(ModalKind::GridSize);
    }

    pub fn open_color_prompt(&mut self) {
        self.open_modal(ModalKind::PickColor);
    }

    fn open_modal(&mut self, kind: ModalKind) {
        // Any stroke in progress ends when input moves to the prompt.
        self.container.pointer_up(-1.0, -1.0);
        self.container.pointer_leave();
        self.modal = Some(Modal {
            kind,
            input: String::new(),
        });
    }

    pub fn modal_insert(&mut self, ch: char) {
        if let Some(modal) = self.modal.as_mut() {
            modal.input.push(ch);
        }
    }

    pub fn modal_backspace(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            modal.input.pop();
        }
    }

    /// Closes the modal and acts on its text.
    pub fn submit_modal(&mut self) -> ModalOutcome {
        match self.modal.take() {
            Some(Modal {
                kind: ModalKind::GridSize,
                input,
            }) => ModalOutcome::Resized(self.change_grid_size(Some(input.as_str()))),
            Some(Modal {
                kind: ModalKind::PickColor,
                input,
            }) => ModalOutcome::Picked(self.picker.set_text(&input)),
            None => ModalOutcome::Dismissed,
        }
    }

    /// Closes the modal without a value. A cancelled size prompt counts as
    /// invalid input, the color picker just keeps its value.
    pub fn cancel_modal(&mut self) -> ModalOutcome {
        match self.modal.take() {
            Some(Modal {
                kind: ModalKind::GridSize,
                ..
            }) => ModalOutcome::Resized(self.change_grid_size(None)),
            Some(Modal {
                kind: ModalKind::PickColor,
                ..
            })
            | None => ModalOutcome::Dismissed,
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if self.modal.is_none() {
            self.container.pointer_down(x, y);
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if self.modal.is_none() {
            self.container.pointer_move(x, y);
        }
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.container.pointer_up(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.container.pointer_leave();
    }
}
