use std::{
    fmt,
    io::{self, BufRead, StdinLock, Stdout, Write},
};

use itertools::Itertools;
use uttt_types::Action;

use crate::{board::Board, Player};

/// Reads moves typed as `row col`. Bad input is answered with a new prompt.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl HumanPlayer<StdinLock<'static>, Stdout> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Output failures are logged, never fatal: the answer can still be read.
    fn say(&mut self, text: fmt::Arguments<'_>) {
        let written = self
            .output
            .write_fmt(text)
            .and_then(|()| self.output.flush());
        if let Err(err) = written {
            log::warn!("failed to write to player: {err}");
        }
    }

    fn ask(&mut self, question: &str) -> String {
        self.say(format_args!("{question}"));
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .expect("failed to read from input");
        assert!(read > 0, "input closed while waiting for an answer");
        line.trim().to_owned()
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn choose_action(&mut self, board: &Board) -> Action {
        let actions = board.valid_actions();
        self.say(format_args!("Valid moves: {}\n", actions.iter().join(", ")));
        loop {
            let answer = self.ask("Your move (row col): ");
            match answer.parse::<Action>() {
                Ok(action) if actions.contains(&action) => return action,
                Ok(action) => self.say(format_args!("{action} is not a legal move\n")),
                Err(err) => self.say(format_args!("{err}\n")),
            }
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn asks_to_move_first(&mut self) -> bool {
        let mut hint = "";
        loop {
            let answer = self.ask(&format!("Would you like to go first?{hint}\n"));
            match answer.to_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => hint = " (y/n)",
            }
        }
    }
}
