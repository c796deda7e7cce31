//! Connected stone groups and their liberties.
//!
//! Groups are derived from a [`BoardState`] on demand and never cached
//! across moves. Each call labels the 4-connected components of both
//! colors with fresh [`GroupId`]s.

use rayon::prelude::*;

use crate::board::{BoardState, Color, Mask, Point, neighbors};

/// Opaque label of a group within one [`GroupMap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u32);

/// A maximal 4-connected set of same-colored stones.
#[derive(Clone, Debug)]
pub struct Group {
    pub id: GroupId,
    pub color: Color,
    pub stones: Mask,
    pub liberties: Mask,
}

impl Group {
    pub fn len(&self) -> usize {
        self.stones.count()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    pub fn num_liberties(&self) -> usize {
        self.liberties.count()
    }

    /// In atari with `pt` as the only liberty.
    pub fn has_sole_liberty(&self, pt: Point) -> bool {
        self.num_liberties() == 1 && self.liberties.contains(pt)
    }
}

/// All groups of one board.
#[derive(Clone, Debug)]
pub struct GroupMap {
    size: usize,
    groups: Vec<Group>,
    labels: Vec<Option<GroupId>>,
}

impl GroupMap {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn all(&self) -> &[Group] {
        &self.groups
    }

    pub fn of_color(&self, color: Color) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(move |g| g.color == color)
    }

    pub fn get(&self, id: GroupId) -> &Group {
        &self.groups[id.0 as usize]
    }

    /// The group holding the stone at `pt`, if any.
    pub fn group_at(&self, (row, col): Point) -> Option<&Group> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.labels[row * self.size + col].map(|id| self.get(id))
    }

    /// Distinct groups of `color` touching `pt`.
    pub fn adjacent_groups(&self, pt: Point, color: Color) -> Vec<&Group> {
        let mut found: Vec<&Group> = Vec::with_capacity(4);
        for n in neighbors(self.size, pt) {
            if let Some(g) = self.group_at(n) {
                if g.color == color && !found.iter().any(|f| f.id == g.id) {
                    found.push(g);
                }
            }
        }
        found
    }
}

/// Label every group on the board and compute its liberties.
pub fn analyze(state: &BoardState) -> GroupMap {
    let size = state.size();
    let empty = state.occupied().inverted();
    let mut groups = Vec::new();
    let mut labels: Vec<Option<GroupId>> = vec![None; size * size];

    for color in [Color::Black, Color::White] {
        let own = state.stones(color);
        for start in own.points() {
            if labels[start.0 * size + start.1].is_some() {
                continue;
            }
            let id = GroupId(groups.len() as u32);
            let mut stones = Mask::new(size);
            let mut liberties = Mask::new(size);
            let mut stack = vec![start];
            labels[start.0 * size + start.1] = Some(id);

            while let Some(pt) = stack.pop() {
                stones.insert(pt);
                for n in neighbors(size, pt) {
                    let ni = n.0 * size + n.1;
                    if own.contains(n) {
                        if labels[ni].is_none() {
                            labels[ni] = Some(id);
                            stack.push(n);
                        }
                    } else if empty.contains(n) {
                        liberties.insert(n);
                    }
                }
            }

            groups.push(Group {
                id,
                color,
                stones,
                liberties,
            });
        }
    }

    GroupMap {
        size,
        groups,
        labels,
    }
}

/// Analyze many independent boards in parallel.
///
/// The result at index `i` is exactly `analyze(&states[i])`.
pub fn analyze_batch(states: &[BoardState]) -> Vec<GroupMap> {
    states.par_iter().map(analyze).collect()
}

/// Every empty point adjacent to a stone of `color`.
pub fn liberties(state: &BoardState, color: Color) -> Mask {
    let mut libs = state.stones(color).dilate();
    libs.subtract(&state.occupied());
    libs
}

/// Total distinct liberty points per color, as `(black, white)`.
pub fn liberty_counts(state: &BoardState) -> (usize, usize) {
    (
        liberties(state, Color::Black).count(),
        liberties(state, Color::White).count(),
    )
}
