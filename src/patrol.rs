use std::collections::HashSet;

use tracing::{debug, trace};

use crate::{Guard, Laboratory, Position, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exited,
    Loop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatrolReport {
    visited: HashSet<Position>,
    outcome: Outcome,
    step_n: usize,
}

impl PatrolReport {
    pub fn visited(&self) -> &HashSet<Position> {
        &self.visited
    }

    pub fn into_visited(self) -> HashSet<Position> {
        self.visited
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_loop(&self) -> bool {
        self.outcome == Outcome::Loop
    }

    // Number of guard states examined, including the repeated one of a loop.
    pub fn step_n(&self) -> usize {
        self.step_n
    }
}

// Seen (position, direction) pairs, one flag per direction of each tile.
struct StateHistory {
    seen: Vec<bool>,
    col_n: usize,
}

impl StateHistory {
    fn new(lab: &Laboratory) -> Self {
        Self {
            seen: vec![false; lab.row_n() * lab.col_n() * 4],
            col_n: lab.col_n(),
        }
    }

    /// Returns false if `guard` has been recorded before.
    fn record(&mut self, guard: &Guard) -> bool {
        let pos = guard.pos();
        let ind = (pos.row() * self.col_n + pos.col()) * 4 + guard.dir().index();
        !std::mem::replace(&mut self.seen[ind], true)
    }
}

impl Laboratory {
    pub fn patrol(&self) -> PatrolReport {
        self.patrol_from(self.guard())
    }

    /// Walks `guard` until it leaves the laboratory or repeats a state.
    /// Only the tiles are consulted, the guard stored in the laboratory is ignored.
    pub fn patrol_from(&self, guard: &Guard) -> PatrolReport {
        let mut cur_guard = guard.clone();
        let mut visited = HashSet::new();
        let mut history = StateHistory::new(self);
        let mut step_n = 0;
        if !self.is_inside(cur_guard.pos()) {
            return PatrolReport {
                visited,
                outcome: Outcome::Exited,
                step_n,
            };
        }

        let outcome = loop {
            step_n += 1;
            if !history.record(&cur_guard) {
                break Outcome::Loop;
            }
            visited.insert(cur_guard.pos().clone());

            match cur_guard.ahead_pos() {
                Some(next_pos) if self.is_inside(&next_pos) => {
                    if self.is_wall(&next_pos) {
                        cur_guard.turn_right();
                    } else {
                        cur_guard.go_to(next_pos);
                    }
                }
                _ => break Outcome::Exited,
            }
        };
        trace!(?outcome, step_n, visited = visited.len(), "patrol finished");

        PatrolReport {
            visited,
            outcome,
            step_n,
        }
    }

    /// Counts the tiles which trap the guard in a loop when a single wall is put there.
    /// Every empty tile is tried, and restored before the next trial.
    pub fn count_trapping_obstructions(&mut self) -> usize {
        let guard = self.guard().clone();
        let candidates = self
            .positions()
            .filter(|pos| self.tile(pos).is_some_and(|tile| *tile == Tile::Empty))
            .collect::<Vec<_>>();

        let mut trap_count = 0;
        let mut last_row = None;
        for pos in candidates {
            if last_row != Some(pos.row()) {
                trace!(row = pos.row(), trap_count, "searching obstructions");
                last_row = Some(pos.row());
            }

            if let Some(tile) = self.tile_mut(&pos) {
                *tile = Tile::Wall;
            }

            if self.patrol_from(&guard).is_loop() {
                trap_count += 1;
            }

            if let Some(tile) = self.tile_mut(&pos) {
                *tile = Tile::Empty;
            }
        }
        debug!(trap_count, "obstruction search finished");

        trap_count
    }
}
