//! Area scoring and reward policies.
//!
//! Uses area scoring (Chinese rules):
//! - Stones on the board count for their owner
//! - An empty region counts for a color if every stone bordering it is that color
//! - Regions bordering both colors, or no stone at all, count for neither
//!
//! Komi is subtracted from black's margin. Rewards are always from black's
//! point of view.

use std::fmt;
use std::str::FromStr;

use crate::board::{BoardState, Color, Mask, neighbors};
use crate::error::GoError;

/// Empty points owned by exactly one color, as `(black, white)` masks.
pub fn territory(state: &BoardState) -> (Mask, Mask) {
    let size = state.size();
    let mut black = Mask::new(size);
    let mut white = Mask::new(size);
    let mut seen = state.occupied();

    for start in state.occupied().inverted().points() {
        if seen.contains(start) {
            continue;
        }
        let mut region = Mask::new(size);
        let mut owners = (false, false);
        let mut stack = vec![start];
        seen.insert(start);

        while let Some(pt) = stack.pop() {
            region.insert(pt);
            for n in neighbors(size, pt) {
                match state.stone_at(n) {
                    Some(Color::Black) => owners.0 = true,
                    Some(Color::White) => owners.1 = true,
                    None if !seen.contains(n) => {
                        seen.insert(n);
                        stack.push(n);
                    }
                    None => {}
                }
            }
        }

        match owners {
            (true, false) => black.union_with(&region),
            (false, true) => white.union_with(&region),
            _ => {}
        }
    }

    (black, white)
}

/// Area per color as `(black, white)`: stones plus owned territory.
pub fn areas(state: &BoardState) -> (usize, usize) {
    let (black, white) = territory(state);
    (
        state.stones(Color::Black).count() + black.count(),
        state.stones(Color::White).count() + white.count(),
    )
}

/// Black's area minus white's area minus komi.
pub fn margin(state: &BoardState, komi: f32) -> f32 {
    let (black, white) = areas(state);
    black as f32 - white as f32 - komi
}

/// How a session turns positions into rewards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum RewardPolicy {
    /// Zero until the end, then +1 / -1 / 0 for a black win / loss / tie.
    #[default]
    Real,
    /// The area margin every step; at the end, the winner's sign scaled by
    /// the board area.
    Heuristic,
}

impl RewardPolicy {
    pub fn reward(self, state: &BoardState, komi: f32, done: bool) -> f32 {
        let m = margin(state, komi);
        match self {
            RewardPolicy::Real if done => sign(m),
            RewardPolicy::Real => 0.0,
            RewardPolicy::Heuristic if done => sign(m) * (state.size() * state.size()) as f32,
            RewardPolicy::Heuristic => m,
        }
    }
}

fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl FromStr for RewardPolicy {
    type Err = GoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "real" => Ok(RewardPolicy::Real),
            "heuristic" => Ok(RewardPolicy::Heuristic),
            other => Err(GoError::Configuration(format!(
                "unknown reward policy '{other}' (expected 'real' or 'heuristic')"
            ))),
        }
    }
}

impl fmt::Display for RewardPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewardPolicy::Real => write!(f, "real"),
            RewardPolicy::Heuristic => write!(f, "heuristic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Point;

    fn position(size: usize, black: &[Point], white: &[Point]) -> BoardState {
        BoardState::from_stones(size, black, white, Color::Black).unwrap()
    }

    #[test]
    fn test_empty_board_scores_nothing() {
        let state = BoardState::new(7);
        assert_eq!(areas(&state), (0, 0));
        assert_eq!(margin(&state, 0.0), 0.0);
        assert_eq!(RewardPolicy::Real.reward(&state, 0.0, true), 0.0);
        assert_eq!(margin(&state, 2.5), -2.5);
        assert_eq!(RewardPolicy::Real.reward(&state, 2.5, true), -1.0);
    }

    #[test]
    fn test_lone_stone_owns_the_board() {
        let state = position(7, &[(0, 0)], &[]);
        assert_eq!(areas(&state), (49, 0));
        let (black, white) = territory(&state);
        assert_eq!(black.count(), 48);
        assert!(white.is_empty());
    }

    #[test]
    fn test_shared_region_is_neutral() {
        let state = position(7, &[(0, 0)], &[(0, 1)]);
        assert_eq!(areas(&state), (1, 1));
    }

    #[test]
    fn test_walls_split_territory() {
        // Black wall on column 1, white wall on column 3 of a 5x5 board.
        let black: Vec<Point> = (0..5).map(|r| (r, 1)).collect();
        let white: Vec<Point> = (0..5).map(|r| (r, 3)).collect();
        let state = position(5, &black, &white);
        // Column 0 is black's, column 4 white's, column 2 is shared.
        assert_eq!(areas(&state), (10, 10));
        let (bt, wt) = territory(&state);
        assert!(bt.contains((2, 0)));
        assert!(wt.contains((2, 4)));
        assert!(!bt.contains((2, 2)) && !wt.contains((2, 2)));
    }

    #[test]
    fn test_symmetric_filled_board_is_tie() {
        // Checkerboard with equal counts: no empty points, margin 0.
        let mut black = Vec::new();
        let mut white = Vec::new();
        for row in 0..4 {
            for col in 0..4 {
                if (row + col) % 2 == 0 {
                    black.push((row, col));
                } else {
                    white.push((row, col));
                }
            }
        }
        let state = position(4, &black, &white);
        assert_eq!(margin(&state, 0.0), 0.0);
        assert_eq!(RewardPolicy::Real.reward(&state, 0.0, true), 0.0);
        assert_eq!(RewardPolicy::Heuristic.reward(&state, 0.0, true), 0.0);
    }

    #[test]
    fn test_reward_policies() {
        let state = position(7, &[(0, 0)], &[]);
        assert_eq!(RewardPolicy::Real.reward(&state, 0.0, false), 0.0);
        assert_eq!(RewardPolicy::Real.reward(&state, 0.0, true), 1.0);
        assert_eq!(RewardPolicy::Heuristic.reward(&state, 0.0, false), 49.0);
        assert_eq!(RewardPolicy::Heuristic.reward(&state, 0.0, true), 49.0);
        assert_eq!(RewardPolicy::Heuristic.reward(&state, 0.5, false), 48.5);

        let state = position(7, &[], &[(0, 1), (1, 0)]);
        assert_eq!(RewardPolicy::Heuristic.reward(&state, 0.0, false), -49.0);
        assert_eq!(RewardPolicy::Heuristic.reward(&state, 0.0, true), -49.0);
        assert_eq!(RewardPolicy::Real.reward(&state, 0.0, true), -1.0);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("real".parse::<RewardPolicy>().unwrap(), RewardPolicy::Real);
        assert_eq!(
            "Heuristic".parse::<RewardPolicy>().unwrap(),
            RewardPolicy::Heuristic
        );
        assert!(matches!(
            "greedy".parse::<RewardPolicy>(),
            Err(GoError::Configuration(_))
        ));
        assert_eq!(RewardPolicy::Heuristic.to_string(), "heuristic");
    }
}
