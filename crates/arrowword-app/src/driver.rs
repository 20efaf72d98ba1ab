//! Line-oriented terminal session over a [`Game`].

use std::{
    io::{self, BufRead, Write},
    thread,
};

use arrowword_game::{
    Clock, ClueDraft, CountdownDisplay, Game, GameError, GameEvent, format_elapsed,
};
use arrowword_share::{Autosave, DraftStore};

use crate::{
    command::{self, Command, HELP},
    render,
};

/// What the caller should do after a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Flow {
    Continue,
    /// The countdown is running; keep ticking until the timer starts.
    Countdown,
    Quit,
}

#[derive(Debug)]
pub struct Driver<C: Clock, S: DraftStore, W: Write> {
    game: Game<C>,
    autosave: Autosave<S>,
    out: W,
}

impl<C: Clock, S: DraftStore, W: Write> Driver<C, S, W> {
    pub fn new(game: Game<C>, autosave: Autosave<S>, out: W) -> Self {
        Self {
            game,
            autosave,
            out,
        }
    }

    pub fn game(&self) -> &Game<C> {
        &self.game
    }

    pub fn autosave(&self) -> &Autosave<S> {
        &self.autosave
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Reads commands until `quit` or end of input, then flushes the draft.
    pub fn run(&mut self, input: impl BufRead) -> io::Result<()> {
        self.show()?;
        self.prompt()?;
        for line in input.lines() {
            match self.handle_line(&line?)? {
                Flow::Continue => {}
                Flow::Countdown => self.wait_for_start()?,
                Flow::Quit => break,
            }
            self.prompt()?;
        }
        self.finish()
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()
    }

    fn wait_for_start(&mut self) -> io::Result<()> {
        let interval = self.game.session().settings().refresh_interval;
        let mut shown = None;
        while self.game.session().phase().is_countdown() {
            let display = self.game.countdown();
            if display != shown {
                match display {
                    Some(CountdownDisplay::Number(n)) => writeln!(self.out, "{n}...")?,
                    Some(CountdownDisplay::Go) => writeln!(self.out, "get ready...")?,
                    None => {}
                }
                self.out.flush()?;
                shown = display;
            }
            thread::sleep(interval);
            self.tick()?;
        }
        self.show()
    }

    /// Advances time-driven state and reports what changed.
    pub fn tick(&mut self) -> io::Result<()> {
        self.game.tick();
        self.after_change()
    }

    /// Handles one input line.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let command = match command::parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                writeln!(self.out, "{e}")?;
                return Ok(Flow::Continue);
            }
        };

        let flow = match command {
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Show => Flow::Continue,
            Command::ClearAll => {
                self.game.clear_all();
                // Drop GridChanged so the removed draft is not written back.
                self.game.take_events();
                self.autosave.discard();
                Flow::Continue
            }
            Command::Start => match self.game.begin_countdown() {
                Ok(()) => Flow::Countdown,
                Err(e) => {
                    log::debug!("start ignored: {e}");
                    Flow::Continue
                }
            },
            command => {
                if let Err(e) = self.apply(command) {
                    log::debug!("input ignored: {e}");
                }
                Flow::Continue
            }
        };

        self.after_change()?;
        if flow.is_continue() {
            self.show()?;
        }
        Ok(flow)
    }

    fn apply(&mut self, command: Command) -> Result<(), GameError> {
        let game = &mut self.game;
        match command {
            Command::SetMode(mode) => game.set_mode(mode)?,
            Command::Click(pos) => {
                game.click(pos)?;
            }
            Command::Type(word) => {
                for ch in word.chars() {
                    game.enter_letter(ch)?;
                }
            }
            Command::Delete { count } => {
                for _ in 0..count {
                    game.delete_letter()?;
                }
            }
            Command::SetClue {
                pos,
                variant,
                answer,
                text,
            } => game.apply_clue(&ClueDraft {
                pos,
                text,
                variant,
                answer,
            })?,
            Command::RemoveClue(pos) => {
                game.remove_clue(pos)?;
            }
            Command::Numbering(enabled) => game.set_solution_mode(enabled),
            Command::ResetNumbers => game.reset_solution_numbers()?,
            Command::ClearAnswers => game.clear_answers()?,
            Command::ResetTimer => game.reset_timer()?,
            Command::Help | Command::Show | Command::Quit | Command::Start | Command::ClearAll => {}
        }
        Ok(())
    }

    fn after_change(&mut self) -> io::Result<()> {
        let now = self.game.clock().now();
        for event in self.game.take_events() {
            match event {
                GameEvent::GridChanged => {
                    self.autosave
                        .schedule(self.game.grid(), self.game.is_locked(), now);
                }
                GameEvent::SegmentSolved(id) => {
                    let origin = id.origin();
                    writeln!(self.out, "solved {},{}", origin.row(), origin.col())?;
                }
                GameEvent::TimerStarted => writeln!(self.out, "go!")?,
                GameEvent::Won { elapsed } => {
                    writeln!(self.out, "puzzle solved in {}!", format_elapsed(elapsed))?;
                }
            }
        }
        self.autosave.poll(now);
        if let Some(warning) = self.autosave.take_warning() {
            writeln!(self.out, "warning: {warning}")?;
        }
        Ok(())
    }

    fn show(&mut self) -> io::Result<()> {
        write!(self.out, "{}", render::render(&self.game))
    }

    /// Writes any pending draft.
    pub fn finish(&mut self) -> io::Result<()> {
        self.autosave.flush();
        if let Some(warning) = self.autosave.take_warning() {
            writeln!(self.out, "warning: {warning}")?;
        }
        self.out.flush()
    }
}
