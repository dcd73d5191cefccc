use winit::event::{ElementState, KeyboardInput, VirtualKeyCode};
use std::collections::HashSet;

pub struct InputHandler {
    pressed_keys: HashSet<VirtualKeyCode>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
        }
    }

    pub fn handle_keyboard_input(&mut self, input: &KeyboardInput, modal_open: bool) -> InputAction {
        let Some(key_code) = input.virtual_keycode else {
            return InputAction::None;
        };
        match input.state {
            ElementState::Pressed => {
                self.pressed_keys.insert(key_code);
                if modal_open {
                    self.handle_modal_key(key_code)
                } else {
                    Self::handle_shortcut(key_code)
                }
            }
            ElementState::Released => {
                self.pressed_keys.remove(&key_code);
                InputAction::None
            }
        }
    }

    fn handle_shortcut(key_code: VirtualKeyCode) -> InputAction {
        match key_code {
            VirtualKeyCode::P => InputAction::EditColor,
            VirtualKeyCode::C => InputAction::ApplyColor,
            VirtualKeyCode::R => InputAction::ToggleRandomMode,
            VirtualKeyCode::G => InputAction::ChangeGridSize,
            VirtualKeyCode::X => InputAction::Reset,
            _ => InputAction::None,
        }
    }

    fn handle_modal_key(&mut self, key_code: VirtualKeyCode) -> InputAction {
        match key_code {
            VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => InputAction::SubmitPrompt,
            VirtualKeyCode::Escape => InputAction::CancelPrompt,
            VirtualKeyCode::Back => InputAction::PromptBackspace,
            _ => self
                .key_code_to_char(key_code)
                .map_or(InputAction::None, InputAction::PromptInsert),
        }
    }

    fn shift_pressed(&self) -> bool {
        self.pressed_keys.contains(&VirtualKeyCode::LShift)
            || self.pressed_keys.contains(&VirtualKeyCode::RShift)
    }

    // Covers what size and color prompts accept: digits, letters, '#',
    // parentheses, commas, periods and spaces.
    fn key_code_to_char(&self, key_code: VirtualKeyCode) -> Option<char> {
        let shift_pressed = self.shift_pressed();

        let letter = |c: char| Some(if shift_pressed { c.to_ascii_uppercase() } else { c });
        match key_code {
            VirtualKeyCode::A => letter('a'),
            VirtualKeyCode::B => letter('b'),
            VirtualKeyCode::C => letter('c'),
            VirtualKeyCode::D => letter('d'),
            VirtualKeyCode::E => letter('e'),
            VirtualKeyCode::F => letter('f'),
            VirtualKeyCode::G => letter('g'),
            VirtualKeyCode::H => letter('h'),
            VirtualKeyCode::I => letter('i'),
            VirtualKeyCode::J => letter('j'),
            VirtualKeyCode::K => letter('k'),
            VirtualKeyCode::L => letter('l'),
            VirtualKeyCode::M => letter('m'),
            VirtualKeyCode::N => letter('n'),
            VirtualKeyCode::O => letter('o'),
            VirtualKeyCode::P => letter('p'),
            VirtualKeyCode::Q => letter('q'),
            VirtualKeyCode::R => letter('r'),
            VirtualKeyCode::S => letter('s'),
            VirtualKeyCode::T => letter('t'),
            VirtualKeyCode::U => letter('u'),
            VirtualKeyCode::V => letter('v'),
            VirtualKeyCode::W => letter('w'),
            VirtualKeyCode::X => letter('x'),
            VirtualKeyCode::Y => letter('y'),
            VirtualKeyCode::Z => letter('z'),

            VirtualKeyCode::Key0 => Some(if shift_pressed { ')' } else { '0' }),
            VirtualKeyCode::Key1 => Some('1'),
            VirtualKeyCode::Key2 => Some('2'),
            VirtualKeyCode::Key3 => Some(if shift_pressed { '#' } else { '3' }),
            VirtualKeyCode::Key4 => Some('4'),
            VirtualKeyCode::Key5 => Some('5'),
            VirtualKeyCode::Key6 => Some('6'),
            VirtualKeyCode::Key7 => Some('7'),
            VirtualKeyCode::Key8 => Some('8'),
            VirtualKeyCode::Key9 => Some(if shift_pressed { '(' } else { '9' }),

            VirtualKeyCode::Numpad0 => Some('0'),
            VirtualKeyCode::Numpad1 => Some('1'),
            VirtualKeyCode::Numpad2 => Some('2'),
            VirtualKeyCode::Numpad3 => Some('3'),
            VirtualKeyCode::Numpad4 => Some('4'),
            VirtualKeyCode::Numpad5 => Some('5'),
            VirtualKeyCode::Numpad6 => Some('6'),
            VirtualKeyCode::Numpad7 => Some('7'),
            VirtualKeyCode::Numpad8 => Some('8'),
            VirtualKeyCode::Numpad9 => Some('9'),

            VirtualKeyCode::Comma => Some(','),
            VirtualKeyCode::Period | VirtualKeyCode::NumpadDecimal => Some('.'),
            VirtualKeyCode::Minus | VirtualKeyCode::NumpadSubtract => Some('-'),
            VirtualKeyCode::Space => Some(' '),

            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    None,
    EditColor,
    ApplyColor,
    ToggleRandomMode,
    ChangeGridSize,
    Reset,
    PromptInsert(char),
    PromptBackspace,
    SubmitPrompt,
    CancelPrompt,
}
