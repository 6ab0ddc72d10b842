//! Platform abstraction layer
//!
//! Host-side adapters for the simulation's seams:
//! - Line-based yes/no prompt (stdin/stdout natively)
//! - Autopilot that drives the paddle keys

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::sim::{GameState, Key, Prompt, TickInput};

/// Yes/no prompt over a line reader and a writer
#[derive(Debug)]
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

/// The prompt the native runner uses
pub type StdinPrompt = LinePrompt<StdinLock<'static>, Stdout>;

impl StdinPrompt {
    pub fn stdio() -> Self {
        LinePrompt::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask until the answer parses. End of input counts as "no".
    fn read_answer(&mut self, message: &str) -> io::Result<bool> {
        loop {
            write!(self.output, "{message} [y/n] ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            if let Some(answer) = parse_answer(&line) {
                return Ok(answer);
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask_yes_no(&mut self, message: &str) -> bool {
        match self.read_answer(message) {
            Ok(answer) => answer,
            Err(e) => {
                log::error!("Prompt failed, treating as no: {e}");
                false
            }
        }
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Demo mode: keep the paddle under the main ball
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Horizontal slack before the paddle starts moving
    pub dead_zone: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { dead_zone: 10.0 }
    }
}

impl Autopilot {
    /// Set Left/Right for the coming tick
    pub fn steer(&self, state: &GameState, input: &mut TickInput) {
        let ball = state.main_ball().map(|b| b.center().x);
        let paddle = state
            .paddle_id()
            .and_then(|id| state.world.get(id))
            .map(|p| p.center().x);

        let (left, right) = match (ball, paddle) {
            (Some(target), Some(x)) => (target < x - self.dead_zone, target > x + self.dead_zone),
            _ => (false, false),
        };
        input.set(Key::Left, left);
        input.set(Key::Right, right);
    }
}
