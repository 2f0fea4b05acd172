use std::io::{self, Write};

use cube_core::{CubeState, Face, Move};
use interpreter::{CommandOutcome, Presenter};
use owo_colors::OwoColorize;

/// Prints turns as they finish, in the color of the face being turned
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    /// Quarter turns of the view about the vertical axis
    view_turns: u8,
    line_open: bool,
}

impl TerminalPresenter {
    pub fn new() -> TerminalPresenter {
        TerminalPresenter::default()
    }

    fn end_line(&mut self) {
        if self.line_open {
            println!();
            self.line_open = false;
        }
    }

    pub fn welcome(&self, label: &str, serial: &str) {
        println!("{} {}", label.bold(), format!("serial number {serial}").dimmed());
        println!(
            "{}",
            "Type moves like `R U' F2`, `rotate` to turn the view, or `reset` to undo everything".dimmed()
        );
    }

    pub fn accepted(&mut self, outcome: &CommandOutcome) {
        self.end_line();

        match outcome {
            CommandOutcome::Queued {
                stopped_early: true,
                moves,
            } => println!(
                "{}",
                format!("Stopped after {} move(s), the rest would overshoot", moves.len()).yellow()
            ),
            CommandOutcome::Reset { undone } => {
                println!("{}", format!("Undoing {undone} move(s)").yellow());
            }
            CommandOutcome::Queued { .. } | CommandOutcome::RotatedView => {}
        }
    }

    /// Summarize how far the cube is from `reference`
    pub fn status(&mut self, state: &CubeState, reference: &CubeState) {
        self.end_line();

        let out_of_place = state
            .iter()
            .zip(reference.iter())
            .filter(|((slot, _), _)| !slot.is_face_center())
            .filter(|((_, cubelet), (_, expected))| {
                cubelet.id != expected.id || !cubelet.orientation.is_identity()
            })
            .count();

        println!("{}", format!("{out_of_place} cubelet(s) out of place").dimmed());
    }

    pub fn input_closed(&mut self) {
        self.end_line();
        println!("{}", "Input closed before the cube was solved".red());
    }
}

fn paint(mv: Move) -> String {
    let name = mv.to_string();

    match mv.face() {
        Face::Front => name.green().to_string(),
        Face::Back => name.blue().to_string(),
        Face::Left => name.truecolor(255, 140, 0).to_string(),
        Face::Right => name.red().to_string(),
        Face::Up => name.white().to_string(),
        Face::Down => name.yellow().to_string(),
    }
}

impl Presenter for TerminalPresenter {
    fn turn_finished(&mut self, mv: Move) {
        print!("{} ", paint(mv).bold());
        // A failed flush only delays the output
        let _ = io::stdout().flush();
        self.line_open = true;
    }

    fn rotate_view(&mut self) {
        self.end_line();
        self.view_turns = (self.view_turns + 1) % 4;
        println!(
            "{}",
            format!("View turned to {}°", u16::from(self.view_turns) * 90).dimmed()
        );
    }

    fn solved(&mut self) {
        self.end_line();
        println!("{}", "Module solved!".green().bold());
    }
}
