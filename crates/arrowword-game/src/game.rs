use std::{num::NonZero, time::Duration};

use arrowword_core::{AnswerCell, Cell, Direction, Grid, Letter, Position};
use arrowword_layout::{Progress, Segments, build_segments, map_expectations, solution_word};

use crate::{
    Clock, ClueDraft, CountdownDisplay, Cursor, GameError, GameEvent, InputOperation, Session,
    SessionSettings, SystemClock, event::EventQueue,
};

/// Whether the grid is being authored or solved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Mode {
    /// Clues and structure can be changed.
    #[default]
    Edit,
    /// Only letters can be entered.
    Play,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SolutionTool {
    enabled: bool,
    next: NonZero<u32>,
}

impl Default for SolutionTool {
    fn default() -> Self {
        Self {
            enabled: false,
            next: NonZero::<u32>::MIN,
        }
    }
}

/// A puzzle being authored or solved.
///
/// The grid is replaced wholesale on every change; segments, expectations and
/// progress are recomputed from each new snapshot. The win is edge-triggered:
/// [`GameEvent::Won`] is emitted only when the grid goes from not correct to
/// correct.
#[derive(Debug)]
pub struct Game<C: Clock = SystemClock> {
    clock: C,
    grid: Grid,
    segments: Segments,
    progress: Progress,
    mode: Mode,
    locked: bool,
    cursor: Option<Cursor>,
    solution_tool: SolutionTool,
    session: Session,
    events: EventQueue,
}

impl<C: Clock> Game<C> {
    /// Creates an empty, unlocked puzzle in edit mode.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self::with_settings(clock, SessionSettings::default())
    }

    /// Creates an empty puzzle with custom session timing.
    #[must_use]
    pub fn with_settings(clock: C, settings: SessionSettings) -> Self {
        let grid = Grid::new();
        let segments = build_segments(&grid);
        let progress = Progress::derive(&grid, &segments);
        Self {
            clock,
            grid,
            segments,
            progress,
            mode: Mode::Edit,
            locked: false,
            cursor: None,
            solution_tool: SolutionTool::default(),
            session: Session::new(settings),
            events: EventQueue::default(),
        }
    }

    /// Replaces the grid with a stored one and opens it for editing.
    ///
    /// Used for drafts and imported files. The timer is reset and the editor
    /// is unlocked. A loaded grid that is already correct does not count as a
    /// win.
    pub fn load_grid(&mut self, grid: Grid) {
        log::info!("loading grid for editing");
        self.replace_grid(grid);
        self.mode = Mode::Edit;
        self.locked = false;
        self.session.reset();
    }

    /// Replaces the grid with one opened from a share link.
    ///
    /// A locked link forces play mode with editing disabled and shows the
    /// start prompt; an unlocked one opens in edit mode.
    pub fn load_shared(&mut self, grid: Grid, locked: bool) {
        log::info!("loading shared grid (locked: {locked})");
        self.replace_grid(grid);
        self.locked = locked;
        self.session.reset();
        if locked {
            self.mode = Mode::Play;
            self.session.await_start();
        } else {
            self.mode = Mode::Edit;
        }
    }

    /// Empties the grid and returns to an unlocked editor with an idle session.
    pub fn clear_all(&mut self) {
        log::info!("clearing puzzle");
        self.replace_grid(Grid::new());
        self.mode = Mode::Edit;
        self.locked = false;
        self.solution_tool = SolutionTool::default();
        self.session.reset();
    }

    fn replace_grid(&mut self, grid: Grid) {
        let segments = build_segments(&grid);
        let grid = map_expectations(&grid, &segments);
        self.progress = Progress::derive(&grid, &segments);
        self.segments = segments;
        self.grid = grid;
        self.cursor = None;
        self.events.push(GameEvent::GridChanged);
    }

    /// Switches between edit and play mode.
    ///
    /// Entering play mode shows the start prompt if no timer was started
    /// yet. Leaving it drops the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Locked`] when asking a locked puzzle for edit mode.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), GameError> {
        if self.locked && mode.is_edit() {
            return Err(GameError::Locked);
        }
        if self.mode != mode {
            log::debug!("mode {:?} -> {mode:?}", self.mode);
        }
        self.mode = mode;
        match mode {
            Mode::Play => self.session.await_start(),
            Mode::Edit => self.cursor = None,
        }
        Ok(())
    }

    /// Handles a click on a cell.
    ///
    /// In play mode this places the cursor. In edit mode with solution-word
    /// numbering enabled it toggles the cell's index; otherwise edit-mode
    /// clicks belong to the clue editor and nothing happens here.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Locked`] for edit clicks on a locked puzzle and
    /// [`GameError::NotStarted`] while the start prompt or countdown is shown.
    pub fn click(&mut self, pos: Position) -> Result<InputOperation, GameError> {
        match self.mode {
            Mode::Edit => {
                if self.locked {
                    return Err(GameError::Locked);
                }
                if self.solution_tool.enabled {
                    self.toggle_solution_index(pos)
                } else {
                    Ok(InputOperation::NoOp)
                }
            }
            Mode::Play => self.place_cursor(pos),
        }
    }

    /// Places the cursor on the segment through `pos`.
    ///
    /// A clue cell selects its own segment at the first cell. An answer cell
    /// selects the segment containing it; at an intersection the segment
    /// running in the active cursor's direction wins, otherwise the
    /// horizontal one.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotPlaying`] outside play mode and
    /// [`GameError::NotStarted`] while the start prompt or countdown is shown.
    pub fn place_cursor(&mut self, pos: Position) -> Result<InputOperation, GameError> {
        self.ensure_playing()?;

        let next = if self.grid.is_clue(pos) {
            self.segments
                .at_origin(pos)
                .filter(|segment| !segment.is_empty())
                .map(|segment| Cursor {
                    segment: segment.id(),
                    index: 0,
                })
        } else {
            let preferred = self
                .cursor
                .and_then(|cursor| self.segments.get(cursor.segment))
                .map_or(Direction::Right, |segment| segment.direction());
            let candidates: Vec<_> = self.segments.containing(pos).collect();
            let chosen = candidates
                .iter()
                .find(|segment| segment.direction() == preferred)
                .or_else(|| candidates.iter().find(|segment| segment.direction().is_right()))
                .or(candidates.first())
                .copied();
            chosen.and_then(|segment| {
                segment.index_of(pos).map(|index| Cursor {
                    segment: segment.id(),
                    index,
                })
            })
        };

        match next {
            Some(cursor) => {
                self.cursor = Some(cursor);
                Ok(InputOperation::Set)
            }
            None => Ok(InputOperation::NoOp),
        }
    }

    /// Enters a letter at the cursor and advances within the segment.
    ///
    /// The cursor stays on the last cell of the segment; it never moves on to
    /// another segment. Returns [`InputOperation::NoOp`] without a cursor.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotPlaying`] outside play mode,
    /// [`GameError::NotStarted`] while the start prompt or countdown is shown,
    /// and [`GameError::InvalidLetter`] for characters outside the alphabet.
    pub fn enter_letter(&mut self, ch: char) -> Result<InputOperation, GameError> {
        self.ensure_playing()?;
        let letter = Letter::new(ch).ok_or(GameError::InvalidLetter { ch })?;
        let Some((cursor, pos, len)) = self.cursor_target() else {
            return Ok(InputOperation::NoOp);
        };

        let mut next = self.grid.clone();
        next.set_letter(pos, Some(letter));
        if cursor.index + 1 < len {
            self.cursor = Some(Cursor {
                index: cursor.index + 1,
                ..cursor
            });
        }
        self.commit(next);
        Ok(InputOperation::Set)
    }

    /// Deletes backwards.
    ///
    /// Clears the cursor cell if it holds a letter; otherwise moves back one
    /// cell (never past the segment start) and clears that one.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotPlaying`] outside play mode and
    /// [`GameError::NotStarted`] while the start prompt or countdown is shown.
    pub fn delete_letter(&mut self) -> Result<InputOperation, GameError> {
        self.ensure_playing()?;
        let Some((cursor, pos, _)) = self.cursor_target() else {
            return Ok(InputOperation::NoOp);
        };

        let target = if self.grid.letter(pos).is_some() {
            pos
        } else if cursor.index > 0 {
            let moved = Cursor {
                index: cursor.index - 1,
                ..cursor
            };
            self.cursor = Some(moved);
            match moved.position(&self.segments) {
                Some(pos) => pos,
                None => return Ok(InputOperation::NoOp),
            }
        } else {
            return Ok(InputOperation::NoOp);
        };

        if self.grid.letter(target).is_none() {
            return Ok(InputOperation::NoOp);
        }
        let mut next = self.grid.clone();
        next.set_letter(target, None);
        self.commit(next);
        Ok(InputOperation::Removed)
    }

    fn cursor_target(&self) -> Option<(Cursor, Position, usize)> {
        let cursor = self.cursor?;
        let segment = self.segments.get(cursor.segment)?;
        let pos = segment.cell(cursor.index)?;
        Some((cursor, pos, segment.len()))
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        if !self.mode.is_play() {
            return Err(GameError::NotPlaying);
        }
        if self.session.is_pre_start() {
            return Err(GameError::NotStarted);
        }
        Ok(())
    }

    fn ensure_editing(&self) -> Result<(), GameError> {
        if self.locked {
            return Err(GameError::Locked);
        }
        if !self.mode.is_edit() {
            return Err(GameError::NotEditing);
        }
        Ok(())
    }

    /// Opens the clue editor on a cell.
    ///
    /// Returns the cell's current clue, or defaults for an answer cell.
    /// Returns `None` when the puzzle cannot be edited.
    #[must_use]
    pub fn open_clue_editor(&self, pos: Position) -> Option<ClueDraft> {
        self.ensure_editing().ok()?;
        Some(ClueDraft::for_cell(pos, self.grid.clue(pos)))
    }

    /// Stores the edited clue, turning the cell into a clue cell.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Locked`] or [`GameError::NotEditing`] when the
    /// puzzle cannot be edited.
    pub fn apply_clue(&mut self, draft: &ClueDraft) -> Result<(), GameError> {
        self.ensure_editing()?;
        log::debug!("clue set at {}", draft.pos);
        let next = self.grid.with_cell(draft.pos, Cell::Clue(draft.to_clue()));
        self.commit(next);
        Ok(())
    }

    /// Turns a clue cell back into an empty answer cell.
    ///
    /// The solution-word indices of the removed segment's cells are cleared.
    /// Returns [`InputOperation::NoOp`] if `pos` holds no clue.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Locked`] or [`GameError::NotEditing`] when the
    /// puzzle cannot be edited.
    pub fn remove_clue(&mut self, pos: Position) -> Result<InputOperation, GameError> {
        self.ensure_editing()?;
        if !self.grid.is_clue(pos) {
            return Ok(InputOperation::NoOp);
        }
        log::debug!("clue removed at {pos}");
        let mut next = self.grid.with_cell(pos, Cell::Answer(AnswerCell::default()));
        if let Some(segment) = self.segments.at_origin(pos) {
            for &cell in segment.cells() {
                next.set_solution_index(cell, None);
            }
        }
        self.commit(next);
        Ok(InputOperation::Removed)
    }

    /// Enables or disables solution-word numbering for edit-mode clicks.
    pub fn set_solution_mode(&mut self, enabled: bool) {
        self.solution_tool.enabled = enabled;
    }

    /// Returns `true` if edit-mode clicks number the solution word.
    #[must_use]
    pub fn solution_mode(&self) -> bool {
        self.solution_tool.enabled
    }

    /// Returns the number the next numbered cell receives.
    #[must_use]
    pub fn next_solution_index(&self) -> NonZero<u32> {
        self.solution_tool.next
    }

    /// Toggles the solution-word index of an answer cell.
    ///
    /// An unnumbered cell gets the next number, which then increments; a
    /// numbered cell loses its index. Clue cells are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Locked`] or [`GameError::NotEditing`] when the
    /// puzzle cannot be edited.
    pub fn toggle_solution_index(&mut self, pos: Position) -> Result<InputOperation, GameError> {
        self.ensure_editing()?;
        let Some(answer) = self.grid.cell(pos).as_answer() else {
            return Ok(InputOperation::NoOp);
        };

        let mut next = self.grid.clone();
        let operation = if answer.solution_index.is_some() {
            next.set_solution_index(pos, None);
            InputOperation::Removed
        } else {
            let index = self.solution_tool.next;
            next.set_solution_index(pos, Some(index));
            self.solution_tool.next = index.saturating_add(1);
            InputOperation::Set
        };
        self.commit(next);
        Ok(operation)
    }

    /// Clears every solution-word index and restarts numbering at 1.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Locked`] or [`GameError::NotEditing`] when the
    /// puzzle cannot be edited.
    pub fn reset_solution_numbers(&mut self) -> Result<(), GameError> {
        self.ensure_editing()?;
        let mut next = self.grid.clone();
        for answer in next.answers_mut() {
            answer.solution_index = None;
        }
        self.solution_tool.next = NonZero::<u32>::MIN;
        self.commit(next);
        Ok(())
    }

    /// Wipes every entered letter, keeping clues and numbering.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Locked`] or [`GameError::NotEditing`] when the
    /// puzzle cannot be edited.
    pub fn clear_answers(&mut self) -> Result<(), GameError> {
        self.ensure_editing()?;
        self.commit(self.grid.without_letters());
        Ok(())
    }

    /// Returns the session to idle, clearing the elapsed and winning time.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Locked`] or [`GameError::NotEditing`] when the
    /// puzzle cannot be edited.
    pub fn reset_timer(&mut self) -> Result<(), GameError> {
        self.ensure_editing()?;
        log::debug!("timer reset");
        self.session.reset();
        Ok(())
    }

    /// Starts the countdown from the start prompt.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotAwaitingStart`] unless the start prompt is shown.
    pub fn begin_countdown(&mut self) -> Result<(), GameError> {
        let now = self.clock.now();
        self.session.begin_countdown(now)
    }

    /// Advances time-driven state; call it on every display refresh.
    ///
    /// Starts the timer once the countdown has run out.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        if self.session.tick(now) {
            self.events.push(GameEvent::TimerStarted);
        }
    }

    /// Drains the pending events in the order they happened.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.take_all()
    }

    fn commit(&mut self, next: Grid) {
        let segments = build_segments(&next);
        let next = map_expectations(&next, &segments);
        let progress = Progress::derive(&next, &segments);

        if next != self.grid {
            self.events.push(GameEvent::GridChanged);
        }
        for id in progress.newly_solved(&self.progress) {
            log::debug!("segment {id} solved");
            self.events.push(GameEvent::SegmentSolved(id));
        }
        let won = progress.all_correct() && !self.progress.all_correct();

        self.grid = next;
        self.segments = segments;
        self.progress = progress;
        self.cursor = self
            .cursor
            .filter(|cursor| cursor.position(&self.segments).is_some());

        if won {
            let elapsed = self.session.win(self.clock.now());
            log::info!("puzzle solved in {elapsed:?}");
            self.cursor = None;
            self.events.push(GameEvent::Won { elapsed });
        }
    }

    /// Returns the clock the session is measured against.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the current grid snapshot, expectations included.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the segments of the current grid.
    #[must_use]
    pub fn segments(&self) -> &Segments {
        &self.segments
    }

    /// Returns the progress of the current grid.
    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns `true` for puzzles opened from a solve-only link.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns `true` if edit tools are available.
    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.ensure_editing().is_ok()
    }

    /// Returns the input cursor.
    #[must_use]
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// Returns the cell under the input cursor.
    #[must_use]
    pub fn cursor_position(&self) -> Option<Position> {
        self.cursor?.position(&self.segments)
    }

    /// Returns the play session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the elapsed play time now.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.session.elapsed(self.clock.now())
    }

    /// Returns what the countdown overlay shows now, if it is running.
    #[must_use]
    pub fn countdown(&self) -> Option<CountdownDisplay> {
        self.session.countdown(self.clock.now())
    }

    /// Returns `true` if clue text must be hidden.
    #[must_use]
    pub fn clues_hidden(&self) -> bool {
        self.mode.is_play() && self.session.is_pre_start()
    }

    /// Returns the solution word, with `None` for missing letters.
    #[must_use]
    pub fn solution_word(&self) -> Vec<Option<Letter>> {
        solution_word(&self.grid)
    }

    /// Returns `true` if the cell should be highlighted as wrong.
    #[must_use]
    pub fn is_wrong(&self, pos: Position) -> bool {
        self.progress.is_wrong(pos)
    }
}
