//! Board snapshot: stones, side to move, invalid-move mask, pass marker.
//!
//! A [`BoardState`] is produced by the game controller after every accepted
//! move and never changes afterwards. Stones and the invalid mask are flat
//! boolean grids ([`Mask`]); the turn and pass markers are scalars that are
//! only broadcast into full planes by [`BoardState::planes`].

use std::fmt;

use crate::constants::{
    BLACK_PLANE, COLUMN_LETTERS, INVALID_PLANE, MAX_BOARD_SIZE, NUM_PLANES, PASS_PLANE, TURN_PLANE,
    WHITE_PLANE,
};
use crate::error::{GoError, Result};
use crate::group;
use crate::legality;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Short tag used in step info: "b" or "w".
    pub fn tag(self) -> &'static str {
        match self {
            Color::Black => "b",
            Color::White => "w",
        }
    }

    /// Value of the turn plane for this color.
    pub fn turn_value(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A board point as `(row, col)`, row 0 at the top.
pub type Point = (usize, usize);

/// Orthogonal neighbors of an on-board point. Off-board neighbors are skipped.
pub fn neighbors(size: usize, (row, col): Point) -> impl Iterator<Item = Point> {
    let up = (row > 0).then(|| (row - 1, col));
    let down = (row + 1 < size).then(|| (row + 1, col));
    let left = (col > 0).then(|| (row, col - 1));
    let right = (col + 1 < size).then(|| (row, col + 1));
    [up, down, left, right].into_iter().flatten()
}

/// A flat boolean grid over an N×N board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mask {
    size: usize,
    cells: Vec<bool>,
}

impl Mask {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, (row, col): Point) -> usize {
        row * self.size + col
    }

    pub fn in_bounds(&self, (row, col): Point) -> bool {
        row < self.size && col < self.size
    }

    /// Off-board points are never contained.
    pub fn contains(&self, pt: Point) -> bool {
        self.in_bounds(pt) && self.cells[self.idx(pt)]
    }

    pub fn insert(&mut self, pt: Point) {
        let i = self.idx(pt);
        self.cells[i] = true;
    }

    pub fn remove(&mut self, pt: Point) {
        let i = self.idx(pt);
        self.cells[i] = false;
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Set points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(move |(i, _)| (i / size, i % size))
    }

    pub fn union_with(&mut self, other: &Mask) {
        for (c, o) in self.cells.iter_mut().zip(&other.cells) {
            *c |= *o;
        }
    }

    pub fn subtract(&mut self, other: &Mask) {
        for (c, o) in self.cells.iter_mut().zip(&other.cells) {
            *c &= !*o;
        }
    }

    pub fn intersects(&self, other: &Mask) -> bool {
        self.cells.iter().zip(&other.cells).any(|(a, b)| *a && *b)
    }

    /// Every set point plus its orthogonal neighbors.
    pub fn dilate(&self) -> Mask {
        let mut out = self.clone();
        for pt in self.points() {
            for n in neighbors(self.size, pt) {
                out.insert(n);
            }
        }
        out
    }

    /// The complement over the board.
    pub fn inverted(&self) -> Mask {
        Mask {
            size: self.size,
            cells: self.cells.iter().map(|c| !c).collect(),
        }
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }
}

/// An immutable board snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardState {
    pub(crate) size: usize,
    pub(crate) black: Mask,
    pub(crate) white: Mask,
    pub(crate) turn: Color,
    pub(crate) invalid: Mask,
    pub(crate) passed: bool,
}

impl BoardState {
    /// Empty board, black to move, nothing marked invalid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            black: Mask::new(size),
            white: Mask::new(size),
            turn: Color::Black,
            invalid: Mask::new(size),
            passed: false,
        }
    }

    /// Build a position directly from stone lists.
    ///
    /// The invalid mask is derived for `turn` (without any ko restriction).
    /// Fails if a point is off the board, listed for both colors, or the
    /// size is unsupported.
    pub fn from_stones(size: usize, black: &[Point], white: &[Point], turn: Color) -> Result<Self> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(GoError::Configuration(format!(
                "board size must be between 1 and {MAX_BOARD_SIZE}, got {size}"
            )));
        }
        let mut state = Self::new(size);
        for (stones, color) in [(black, Color::Black), (white, Color::White)] {
            for &pt in stones {
                if !state.in_bounds(pt) {
                    return Err(GoError::Configuration(format!(
                        "stone at ({}, {}) is off a {size}x{size} board",
                        pt.0, pt.1
                    )));
                }
                if state.stone_at(pt).is_some() {
                    return Err(GoError::Configuration(format!(
                        "point ({}, {}) listed twice",
                        pt.0, pt.1
                    )));
                }
                state.stones_mut(color).insert(pt);
            }
        }
        state.turn = turn;
        let groups = group::analyze(&state);
        state.invalid = legality::invalid_moves(&state, &groups, turn);
        Ok(state)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, (row, col): Point) -> bool {
        row < self.size && col < self.size
    }

    pub fn stones(&self, color: Color) -> &Mask {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    fn stones_mut(&mut self, color: Color) -> &mut Mask {
        match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        }
    }

    pub fn stone_at(&self, pt: Point) -> Option<Color> {
        if self.black.contains(pt) {
            Some(Color::Black)
        } else if self.white.contains(pt) {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Stones of either color.
    pub fn occupied(&self) -> Mask {
        let mut all = self.black.clone();
        all.union_with(&self.white);
        all
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Points where the side to move may not play (ko included).
    pub fn invalid_moves(&self) -> &Mask {
        &self.invalid
    }

    /// Whether the side to move may play at `pt`.
    pub fn is_valid_move(&self, pt: Point) -> bool {
        self.in_bounds(pt) && !self.invalid.contains(pt)
    }

    /// Points where the side to move may play.
    pub fn valid_moves(&self) -> Mask {
        self.invalid.inverted()
    }

    /// Whether the move that produced this state was a pass.
    pub fn previous_was_pass(&self) -> bool {
        self.passed
    }

    /// Materialize the plane-stack representation.
    pub fn planes(&self) -> Planes {
        let area = self.size * self.size;
        let mut data = vec![0u8; NUM_PLANES * area];
        for (plane, mask) in [
            (BLACK_PLANE, &self.black),
            (WHITE_PLANE, &self.white),
            (INVALID_PLANE, &self.invalid),
        ] {
            for (cell, &set) in data[plane * area..(plane + 1) * area]
                .iter_mut()
                .zip(mask.as_slice())
            {
                *cell = set as u8;
            }
        }
        data[TURN_PLANE * area..(TURN_PLANE + 1) * area].fill(self.turn.turn_value());
        data[PASS_PLANE * area..(PASS_PLANE + 1) * area].fill(self.passed as u8);
        Planes {
            size: self.size,
            data,
        }
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.size {
            write!(f, " {}", COLUMN_LETTERS[col] as char)?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>2}", self.size - row)?;
            for col in 0..self.size {
                let ch = match self.stone_at((row, col)) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Plane-major `u8` stack of shape `(NUM_PLANES, size, size)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Planes {
    size: usize,
    data: Vec<u8>,
}

impl Planes {
    pub fn shape(&self) -> (usize, usize, usize) {
        (NUM_PLANES, self.size, self.size)
    }

    pub fn get(&self, plane: usize, row: usize, col: usize) -> u8 {
        self.data[(plane * self.size + row) * self.size + col]
    }

    pub fn plane(&self, plane: usize) -> &[u8] {
        let area = self.size * self.size;
        &self.data[plane * area..(plane + 1) * area]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

/// Parse a GTP vertex such as `D4` ('I' skipped, row 1 at the bottom).
pub fn parse_vertex(s: &str, size: usize) -> Option<Point> {
    let s = s.trim();
    let mut chars = s.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let col = COLUMN_LETTERS.iter().position(|&c| c as char == letter)?;
    let number: usize = chars.as_str().parse().ok()?;
    if col >= size || number == 0 || number > size {
        return None;
    }
    Some((size - number, col))
}

/// Format a point as a GTP vertex.
pub fn vertex_name((row, col): Point, size: usize) -> String {
    format!("{}{}", COLUMN_LETTERS[col] as char, size - row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_corner_and_center() {
        let corner: Vec<Point> = neighbors(7, (0, 0)).collect();
        assert_eq!(corner, vec![(1, 0), (0, 1)]);
        assert_eq!(neighbors(7, (3, 3)).count(), 4);
        assert_eq!(neighbors(7, (6, 3)).count(), 3);
        assert_eq!(neighbors(1, (0, 0)).count(), 0);
    }

    #[test]
    fn test_mask_dilate() {
        let mut m = Mask::new(5);
        m.insert((0, 0));
        let d = m.dilate();
        assert_eq!(d.count(), 3);
        assert!(d.contains((0, 1)));
        assert!(d.contains((1, 0)));
        assert!(!d.contains((1, 1)));
    }

    #[test]
    fn test_mask_contains_off_board() {
        let m = Mask::new(3).inverted();
        assert!(m.contains((2, 2)));
        assert!(!m.contains((3, 0)));
        assert!(!m.contains((0, 3)));
    }

    #[test]
    fn test_empty_state_planes_are_zero() {
        let state = BoardState::new(7);
        let planes = state.planes();
        assert_eq!(planes.shape(), (NUM_PLANES, 7, 7));
        assert_eq!(planes.count_nonzero(), 0);
    }

    #[test]
    fn test_planes_broadcast_turn_and_pass() {
        let mut state = BoardState::new(5);
        state.turn = Color::White;
        state.passed = true;
        let planes = state.planes();
        assert_eq!(planes.count_nonzero(), 50);
        assert!(planes.plane(TURN_PLANE).iter().all(|&v| v == 1));
        assert!(planes.plane(PASS_PLANE).iter().all(|&v| v == 1));
    }

    #[test]
    fn test_from_stones_rejects_overlap() {
        let err = BoardState::from_stones(5, &[(1, 1)], &[(1, 1)], Color::Black);
        assert!(matches!(err, Err(GoError::Configuration(_))));
        let err = BoardState::from_stones(5, &[(5, 0)], &[], Color::Black);
        assert!(matches!(err, Err(GoError::Configuration(_))));
    }

    #[test]
    fn test_from_stones_marks_occupied_invalid() {
        let state = BoardState::from_stones(5, &[(0, 0)], &[(4, 4)], Color::White).unwrap();
        assert_eq!(state.turn(), Color::White);
        assert_eq!(state.stone_at((0, 0)), Some(Color::Black));
        assert_eq!(state.stone_at((4, 4)), Some(Color::White));
        assert_eq!(state.invalid_moves().count(), 2);
        assert!(!state.is_valid_move((0, 0)));
        assert!(state.is_valid_move((2, 2)));
        assert!(!state.is_valid_move((9, 9)));
    }

    #[test]
    fn test_vertex_roundtrip() {
        for size in [7, 13, 19] {
            for row in 0..size {
                for col in 0..size {
                    let name = vertex_name((row, col), size);
                    assert_eq!(parse_vertex(&name, size), Some((row, col)), "{name}");
                }
            }
        }
    }

    #[test]
    fn test_parse_vertex_skips_i() {
        assert_eq!(parse_vertex("A1", 9), Some((8, 0)));
        assert_eq!(parse_vertex("J9", 9), Some((0, 8)));
        assert_eq!(parse_vertex("I5", 9), None);
        assert_eq!(parse_vertex("A10", 9), None);
        assert_eq!(parse_vertex("A0", 9), None);
        assert_eq!(parse_vertex("", 9), None);
    }

    #[test]
    fn test_display() {
        let state = BoardState::from_stones(3, &[(0, 0)], &[(2, 2)], Color::Black).unwrap();
        let text = state.to_string();
        assert!(text.contains(" 3 X . ."));
        assert!(text.contains(" 1 . . O"));
    }
}
