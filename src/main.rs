mod color;
mod config;
mod console;
mod container;
mod font;
mod graphics;
mod grid;
mod input;
mod paint;
mod ui;

use winit::{
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::config::GridConfig;
use crate::console::{Console, KEY_HINT};
use crate::graphics::GraphicsRenderer;
use crate::input::{InputAction, InputHandler};
use crate::ui::{DialogNotifier, ModalOutcome, UiController};

const TITLE: &str = "Etch Grid";
// Buffer pixels per window pixel at start-up
const INITIAL_SCALE: u32 = 2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let (width, height) = graphics::buffer_size();
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(TITLE)
        .with_inner_size(winit::dpi::LogicalSize::new(width * INITIAL_SCALE, height * INITIAL_SCALE))
        .with_min_inner_size(winit::dpi::LogicalSize::new(width, height))
        .with_resizable(true)
        .build(&event_loop)?;

    let mut graphics = GraphicsRenderer::new(&window, width, height)?;
    let config = GridConfig::default();
    let mut ui = UiController::new(config, Box::new(DialogNotifier::new(TITLE)), None);
    let mut input_handler = InputHandler::new();
    let mut console = Console::new(50);
    log::info!("started with a {}x{} grid", ui.grid_size(), ui.grid_size());

    let mut cursor: Option<(f64, f64)> = None;
    let mut redraw_requested = true;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    graphics.resize(size.width, size.height);
                    redraw_requested = true;
                }
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = graphics.window_to_container(position.x, position.y);
                    match cursor {
                        Some((x, y)) => ui.pointer_move(x, y),
                        None => ui.pointer_leave(),
                    }
                    redraw_requested = true;
                }
                WindowEvent::CursorLeft { .. } => {
                    cursor = None;
                    ui.pointer_leave();
                    redraw_requested = true;
                }
                WindowEvent::MouseInput {
                    state,
                    button: MouseButton::Left,
                    ..
                } => {
                    // A release with no known position still ends the stroke
                    let (x, y) = cursor.unwrap_or((-1.0, -1.0));
                    match state {
                        ElementState::Pressed => ui.pointer_down(x, y),
                        ElementState::Released => ui.pointer_up(x, y),
                    }
                    redraw_requested = true;
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    let action = input_handler.handle_keyboard_input(&input, ui.modal().is_some());
                    if action != InputAction::None {
                        handle_action(action, &mut ui, &mut console);
                        redraw_requested = true;
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                if redraw_requested {
                    let footer = match ui.modal() {
                        Some(modal) => format!("{}_", modal.prompt(ui.config())),
                        None => KEY_HINT.to_string(),
                    };
                    let display_lines = console.get_display_lines(graphics::CONSOLE_LINES, &footer);
                    graphics.render(ui.container(), &ui.paint_state(), &display_lines);

                    if let Err(err) = graphics.present() {
                        log::error!("Render error: {}", err);
                        *control_flow = ControlFlow::Exit;
                    }
                    redraw_requested = false;
                }
            }
            _ => {}
        }
    });
}

fn handle_action(action: InputAction, ui: &mut UiController, console: &mut Console) {
    match action {
        InputAction::EditColor => ui.open_color_prompt(),
        InputAction::ChangeGridSize => ui.open_size_prompt(),
        InputAction::ApplyColor => {
            let color = ui.apply_color();
            console.add_output(&format!("Paint color: {}", color));
        }
        InputAction::ToggleRandomMode => {
            let on = ui.toggle_random_mode();
            console.add_output(if on { "Random colors on" } else { "Random colors off" });
        }
        InputAction::Reset => {
            ui.reset();
            console.add_output(&format!("Reset to {}x{}", ui.grid_size(), ui.grid_size()));
        }
        InputAction::PromptInsert(ch) => ui.modal_insert(ch),
        InputAction::PromptBackspace => ui.modal_backspace(),
        InputAction::SubmitPrompt => report_outcome(ui.submit_modal(), console),
        InputAction::CancelPrompt => report_outcome(ui.cancel_modal(), console),
        InputAction::None => {}
    }
}

fn report_outcome(outcome: ModalOutcome, console: &mut Console) {
    match outcome {
        ModalOutcome::Resized(Ok(size)) => console.add_output(&format!("Grid size: {}x{}", size, size)),
        ModalOutcome::Resized(Err(err)) => console.add_error(&format!("invalid size: {}", err)),
        ModalOutcome::Picked(Ok(color)) => {
            console.add_output(&format!("Picker: {} (press C to apply)", color))
        }
        ModalOutcome::Picked(Err(err)) => console.add_error(&err.to_string()),
        ModalOutcome::Dismissed => {}
    }
}
