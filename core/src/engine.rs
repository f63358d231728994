use alloc::boxed::Box;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - Ready -> Computing, when a move starts
/// - Computing -> Ready, when the move settled
/// - Computing -> Finished, when there was no room for the next batch
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for the player
    Ready,
    /// A move is being shown and resolved
    Computing,
    /// Board is full, no more moves
    Finished,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Result of asking to move a ball.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    /// No path, nothing changed
    Blocked,
    /// Ball moved, game goes on
    Moved,
    /// Ball moved and the following spawn found the board full
    Finished,
}

impl MoveOutcome {
    pub const fn is_success(self) -> bool {
        match self {
            Self::Blocked => false,
            Self::Moved => true,
            Self::Finished => true,
        }
    }
}

/// A single game session: board, score, upcoming balls and the move state machine.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    upcoming: UpcomingBalls,
    rng: SmallRng,
    state: GameState,
    score: Points,
    moves: u32,
    started: bool,
    started_at: Instant,
    notifier: Notifier,
}

impl Game {
    /// Empty board, call [`start`](Self::start) to drop the opening batch.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let board = Board::new(config.size);
        Self::with_board(config, board, seed)
    }

    /// Resumes from an existing board, the opening batch is considered already placed.
    pub fn with_board(config: GameConfig, board: Board, seed: u64) -> Result<Self> {
        config.validate()?;
        if board.size() != config.size {
            return Err(GameError::InvalidBoardShape);
        }
        if board.iter().any(|(_, color)| color.is_overlay()) {
            return Err(GameError::UnsettledBoard);
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        let upcoming = UpcomingBalls::new(config.batch_size, &mut rng);
        let started = board.iter().any(|(_, color)| !color.is_empty());
        Ok(Self {
            config,
            board,
            upcoming,
            rng,
            state: GameState::Ready,
            score: 0,
            moves: 0,
            started,
            started_at: Instant::now(),
            notifier: Notifier::default(),
        })
    }

    pub fn on_render(&mut self, render: impl FnMut(&Frame<'_>) + 'static) {
        self.notifier.set_render(Box::new(render));
    }

    pub fn on_finish(&mut self, finish: impl FnMut(Points, u64) + 'static) {
        self.notifier.set_finish(Box::new(finish));
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn score(&self) -> Points {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn upcoming(&self) -> &[Color] {
        self.upcoming.peek_next()
    }

    /// Color at `coords`, `None` outside of the board.
    pub fn cell_at(&self, coords: Coords) -> Option<Color> {
        self.board.get(coords)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started_at
            .elapsed()
            .as_millis()
            .try_into()
            .unwrap_or(u64::MAX)
    }

    /// Drops the opening batch and renders the first frame.
    pub fn start(&mut self) -> Result<SpawnOutcome> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        self.check_ready()?;
        self.started = true;
        self.started_at = Instant::now();
        let outcome = self.spawn();
        self.clear_lines();
        self.render();
        Ok(outcome)
    }

    /// Board with the path from `from` to `to` highlighted, the real board is left untouched.
    ///
    /// The preview is rendered as well. An unreachable target yields a plain copy of the board.
    pub fn preview_move(&mut self, from: Coords, to: Coords) -> Board {
        let mut preview = self.board.clone();
        for step in find_path(&self.board, from, to) {
            preview[step] = Color::Move;
        }
        let frame = Frame {
            board: &preview,
            score: self.score,
            upcoming: self.upcoming.peek_next(),
        };
        self.notifier.render(&frame);
        preview
    }

    /// Runs the whole move, pausing through `pacer` while the trace is shown.
    pub fn move_ball(&mut self, from: Coords, to: Coords, mut pacer: impl Pacer) -> Result<MoveOutcome> {
        let outcome = self.begin_move(from, to)?;
        if !outcome.is_success() {
            return Ok(outcome);
        }
        pacer.pause(MOVE_DELAY);
        self.complete_move()
    }

    /// First half of a move: validates the path, moves the ball and leaves its trace on the board.
    ///
    /// On success the game stays in [`GameState::Computing`] until [`complete_move`](Self::complete_move) is called,
    /// which lets frontends drive the delay from their own timers.
    pub fn begin_move(&mut self, from: Coords, to: Coords) -> Result<MoveOutcome> {
        self.check_ready()?;
        self.state = GameState::Computing;

        let color = self.board.get(from).filter(|color| color.is_ball());
        let path = match color {
            Some(_) => find_path(&self.board, from, to),
            None => Default::default(),
        };
        let (Some(color), Some((&goal, steps))) = (color, path.split_last()) else {
            log::debug!("move {from} -> {to} blocked");
            self.state = GameState::Ready;
            return Ok(MoveOutcome::Blocked);
        };

        self.board[goal] = color;
        self.board[from] = Color::Trace;
        for &step in steps {
            self.board[step] = Color::Trace;
        }
        self.moves += 1;
        log::debug!("move {from} -> {goal} over {} cells", path.len());

        self.render();
        Ok(MoveOutcome::Moved)
    }

    /// Second half of a move: clears the trace, resolves lines and spawns the next batch when nothing was cleared.
    pub fn complete_move(&mut self) -> Result<MoveOutcome> {
        match self.state {
            GameState::Computing => {}
            GameState::Ready => return Err(GameError::NotComputing),
            GameState::Finished => return Err(GameError::AlreadyEnded),
        }

        self.board.replace_all(Color::Trace, Color::Empty);
        if self.clear_lines() == 0 {
            self.spawn();
            // freshly spawned balls can complete a line too
            self.clear_lines();
        }
        self.render();

        if self.state.is_finished() {
            Ok(MoveOutcome::Finished)
        } else {
            self.state = GameState::Ready;
            Ok(MoveOutcome::Moved)
        }
    }

    /// Clears every qualifying run and adds one point per cleared cell.
    pub fn clear_lines(&mut self) -> CellCount {
        let cleared = clear_runs(&mut self.board, self.config.min_run);
        self.score = self.score.saturating_add(cleared.into());
        cleared
    }

    /// Places the upcoming batch, or ends the game when it no longer fits.
    pub fn spawn(&mut self) -> SpawnOutcome {
        if self.state.is_finished() {
            return SpawnOutcome::BoardFull;
        }
        let outcome = spawn_batch(&mut self.board, &mut self.upcoming, &mut self.rng);
        if outcome.is_board_full() {
            self.finish();
        }
        outcome
    }

    fn finish(&mut self) {
        if self.state.is_finished() {
            return;
        }
        self.state = GameState::Finished;
        let elapsed_ms = self.elapsed_ms();
        log::debug!("game finished with {} points after {elapsed_ms}ms", self.score);
        self.notifier.finish(self.score, elapsed_ms);
    }

    fn render(&mut self) {
        let frame = Frame {
            board: &self.board,
            score: self.score,
            upcoming: self.upcoming.peek_next(),
        };
        self.notifier.render(&frame);
    }

    fn check_ready(&self) -> Result<()> {
        match self.state {
            GameState::Ready => Ok(()),
            GameState::Computing => {
                log::warn!("rejected, a move is still in progress");
                Err(GameError::Busy)
            }
            GameState::Finished => Err(GameError::AlreadyEnded),
        }
    }
}
