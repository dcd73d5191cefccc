use std::collections::VecDeque;

pub const KEY_HINT: &str = "P pick  C apply  R random  G size  X reset";

/// Scrolling status log shown under the grid.
pub struct Console {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl Console {
    pub fn new(max_lines: usize) -> Self {
        let mut console = Self {
            lines: VecDeque::new(),
            max_lines,
        };

        console.add_line("Etch Grid".to_string());
        console.add_line("Hold the left mouse button to paint".to_string());

        console
    }

    pub fn add_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }

    pub fn add_output(&mut self, output: &str) {
        for line in output.lines() {
            self.add_line(line.to_string());
        }
    }

    pub fn add_error(&mut self, error: &str) {
        self.add_line(format!("Error: {}", error));
    }

    /// The newest `max_display_lines - 1` log lines followed by `footer`,
    /// which is the open prompt or the key hint.
    pub fn get_display_lines(&self, max_display_lines: usize, footer: &str) -> Vec<String> {
        let history = max_display_lines.saturating_sub(1);
        let start_index = self.lines.len().saturating_sub(history);

        let mut display: Vec<String> = self.lines.iter().skip(start_index).cloned().collect();
        display.push(footer.to_string());
        display
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(100)
    }
}
