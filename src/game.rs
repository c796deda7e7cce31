//! Game sessions: the move/pass state machine.
//!
//! A [`Session`] owns the current [`BoardState`] and everything that lives
//! between moves (ko point, consecutive passes, move counter). Every call to
//! [`Session::play`] either commits a full transition and returns a fresh
//! state, or fails without touching the session.

use crate::board::{BoardState, Color, Mask, Point, parse_vertex};
use crate::capture::place_stone;
use crate::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_KOMI, MAX_BOARD_SIZE, MIN_BOARD_SIZE, PASSES_TO_END,
};
use crate::error::{GoError, IllegalReason, Result};
use crate::group::{GroupMap, analyze};
use crate::legality::invalid_moves;
use crate::scoring::{RewardPolicy, areas};

/// A move: a point on the board or a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Point),
    Pass,
}

impl Action {
    /// Decode a flat index: `row * size + col`, with `size * size` meaning pass.
    pub fn from_index(index: usize, size: usize) -> Result<Self> {
        let area = size * size;
        if index == area {
            Ok(Action::Pass)
        } else if index < area {
            Ok(Action::Move((index / size, index % size)))
        } else {
            Err(GoError::illegal(
                (index / size, index % size),
                IllegalReason::OutOfBounds,
            ))
        }
    }

    /// Inverse of [`Action::from_index`].
    pub fn to_index(self, size: usize) -> usize {
        match self {
            Action::Move((row, col)) => row * size + col,
            Action::Pass => size * size,
        }
    }

    /// Parse `pass`, a GTP vertex (`D4`), `row,col`, or a flat index.
    pub fn parse(s: &str, size: usize) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Action::Pass);
        }
        if let Ok(index) = s.parse::<usize>() {
            return Action::from_index(index, size);
        }
        if let Some((row, col)) = s.split_once(',') {
            let row = row.trim().parse::<usize>();
            let col = col.trim().parse::<usize>();
            if let (Ok(row), Ok(col)) = (row, col) {
                return Ok(Action::Move((row, col)));
            }
        }
        parse_vertex(s, size)
            .map(Action::Move)
            .ok_or_else(|| GoError::Configuration(format!("cannot parse action '{s}'")))
    }
}

impl From<Point> for Action {
    fn from(pt: Point) -> Self {
        Action::Move(pt)
    }
}

/// `None` is a pass.
impl From<Option<Point>> for Action {
    fn from(pt: Option<Point>) -> Self {
        pt.map_or(Action::Pass, Action::Move)
    }
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub board_size: usize,
    pub komi: f32,
    pub reward_policy: RewardPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            komi: DEFAULT_KOMI,
            reward_policy: RewardPolicy::Real,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(GoError::Configuration(format!(
                "board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {}",
                self.board_size
            )));
        }
        if !self.komi.is_finite() {
            return Err(GoError::Configuration(format!(
                "komi must be finite, got {}",
                self.komi
            )));
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Terminal,
}

/// Extra information about a step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepInfo {
    /// The player to move after this step.
    pub turn: Color,
    /// Moves and passes played so far.
    pub move_number: usize,
    /// Stones removed by this step.
    pub captured: usize,
    /// Point the next player may not retake.
    pub ko: Option<Point>,
}

/// Result of one accepted action.
#[derive(Clone, Debug)]
pub struct Step {
    pub state: BoardState,
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

/// One game of Go.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    state: BoardState,
    groups: GroupMap,
    ko: Option<Point>,
    passes: u32,
    move_number: usize,
    phase: Phase,
}

/// Start a session with the given settings.
pub fn new_session(board_size: usize, komi: f32, reward_policy: RewardPolicy) -> Result<Session> {
    Session::new(GameConfig {
        board_size,
        komi,
        reward_policy,
    })
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let (state, groups) = initial_state(config.board_size);
        Ok(Self {
            config,
            state,
            groups,
            ko: None,
            passes: 0,
            move_number: 0,
            phase: Phase::InProgress,
        })
    }

    /// Back to an empty board with the same configuration.
    pub fn reset(&mut self) -> BoardState {
        let (state, groups) = initial_state(self.config.board_size);
        self.state = state;
        self.groups = groups;
        self.ko = None;
        self.passes = 0;
        self.move_number = 0;
        self.phase = Phase::InProgress;
        self.state.clone()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn groups(&self) -> &GroupMap {
        &self.groups
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Terminal
    }

    pub fn turn(&self) -> Color {
        self.state.turn()
    }

    pub fn ko_point(&self) -> Option<Point> {
        self.ko
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.passes
    }

    pub fn move_number(&self) -> usize {
        self.move_number
    }

    /// Area per color on the current board.
    pub fn areas(&self) -> (usize, usize) {
        areas(&self.state)
    }

    /// Reward of the current position under the session's policy.
    pub fn reward(&self) -> f32 {
        self.config
            .reward_policy
            .reward(&self.state, self.config.komi, self.is_done())
    }

    /// Play a flat action index (`size * size` is pass).
    pub fn play_index(&mut self, index: usize) -> Result<Step> {
        if self.phase == Phase::Terminal {
            return Err(GoError::GameOver);
        }
        let action = Action::from_index(index, self.config.board_size)?;
        self.play(action)
    }

    /// Apply a move or pass for the player to move.
    ///
    /// # Errors
    /// - `GameOver` once two consecutive passes have ended the game
    /// - `IllegalMove` for off-board, occupied, ko and suicide points
    pub fn play(&mut self, action: impl Into<Action>) -> Result<Step> {
        if self.phase == Phase::Terminal {
            return Err(GoError::GameOver);
        }
        match action.into() {
            Action::Pass => Ok(self.pass()),
            Action::Move(pt) => self.place(pt),
        }
    }

    fn pass(&mut self) -> Step {
        let mover = self.state.turn();
        self.passes += 1;
        self.ko = None;

        let mut next = self.state.clone();
        next.turn = mover.opponent();
        next.passed = true;
        self.commit(next);

        tracing::debug!(move_number = self.move_number, "{mover} passes");
        if self.passes >= PASSES_TO_END {
            self.phase = Phase::Terminal;
            let (black, white) = self.areas();
            tracing::info!(
                black,
                white,
                komi = self.config.komi,
                "game over after {} moves",
                self.move_number
            );
        }
        self.step(0)
    }

    fn place(&mut self, pt: Point) -> Result<Step> {
        let mover = self.state.turn();
        if !self.state.in_bounds(pt) {
            return Err(GoError::illegal(pt, IllegalReason::OutOfBounds));
        }
        if self.state.invalid_moves().contains(pt) {
            let reason = if self.state.stone_at(pt).is_some() {
                IllegalReason::Occupied
            } else if self.ko == Some(pt) {
                IllegalReason::Ko
            } else {
                IllegalReason::Suicide
            };
            return Err(GoError::illegal(pt, reason));
        }

        let outcome = place_stone(&self.state, &self.groups, pt, mover)?;
        let captured = outcome.captured.count();

        // Ko: a lone stone took a lone stone and now sits in atari on that point.
        self.ko = outcome
            .single_capture()
            .filter(|_| outcome.group_size == 1 && outcome.group_liberties == 1);
        if let Some(ko) = self.ko {
            tracing::trace!(row = ko.0, col = ko.1, "ko");
        }
        self.passes = 0;

        let next = BoardState {
            size: self.state.size(),
            black: outcome.black,
            white: outcome.white,
            turn: mover.opponent(),
            invalid: Mask::new(self.state.size()),
            passed: false,
        };
        self.commit(next);
        tracing::debug!(
            row = pt.0,
            col = pt.1,
            captured,
            move_number = self.move_number,
            "{mover} plays"
        );
        Ok(self.step(captured))
    }

    /// Install `next` as the current state with a fresh group map and
    /// invalid mask for its side to move.
    fn commit(&mut self, mut next: BoardState) {
        let groups = analyze(&next);
        next.invalid = invalid_moves(&next, &groups, next.turn);
        if let Some(ko) = self.ko {
            next.invalid.insert(ko);
        }
        self.state = next;
        self.groups = groups;
        self.move_number += 1;
    }

    fn step(&self, captured: usize) -> Step {
        Step {
            state: self.state.clone(),
            reward: self.reward(),
            done: self.is_done(),
            info: StepInfo {
                turn: self.state.turn(),
                move_number: self.move_number,
                captured,
                ko: self.ko,
            },
        }
    }
}

fn initial_state(size: usize) -> (BoardState, GroupMap) {
    let mut state = BoardState::new(size);
    let groups = analyze(&state);
    state.invalid = invalid_moves(&state, &groups, state.turn);
    (state, groups)
}

/// A uniformly random legal action for the side to move; pass is always
/// one of the candidates.
pub fn uniform_random_legal_move(state: &BoardState) -> Action {
    random_legal_move_with(state, &mut fastrand::Rng::new())
}

/// [`uniform_random_legal_move`] with a caller-supplied generator.
pub fn random_legal_move_with(state: &BoardState, rng: &mut fastrand::Rng) -> Action {
    let candidates: Vec<Point> = state.valid_moves().points().collect();
    // One extra slot for the pass.
    let pick = rng.usize(0..=candidates.len());
    candidates.get(pick).copied().into()
}
