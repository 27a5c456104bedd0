use std::collections::{HashSet, VecDeque};

use super::types::Position;

/// Snake body, head first. Never empty.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
    body_set: HashSet<Position>,
}

impl Snake {
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
            body_set: HashSet::from([head]),
        }
    }

    /// Builds a snake from head-first segments; `None` for an empty body.
    pub fn from_segments(segments: impl IntoIterator<Item = Position>) -> Option<Self> {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        let body_set = body.iter().copied().collect();
        Some(Self { body, body_set })
    }

    pub fn head(&self) -> Position {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Position {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body_set.contains(&pos)
    }

    /// Self-collision test for a head about to enter `pos`. The tail cell is
    /// not counted since it is vacated by the same move, even on a tick where
    /// food is eaten and the tail stays.
    pub fn blocks(&self, pos: Position) -> bool {
        self.body_set.contains(&pos) && pos != self.tail()
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Pushes `new_head` and drops the tail unless the snake grows.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        self.body_set.insert(new_head);

        if grow {
            return;
        }

        if let Some(tail) = self.body.pop_back()
            && tail != new_head
        {
            self.body_set.remove(&tail);
        }
    }
}
