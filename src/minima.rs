// Copyright 2025 Lars Brubaker
// License: MIT
//
// Local minima queue.
//
// Minima are kept sorted by descending y. A minimum inserted with the same y
// as existing ones goes ahead of them, so among equal-y minima the most
// recently ingested ring is inserted into the AEL first.

use crate::edge::EdgeIdx;
use crate::error::{ClipError, ClipResult};
use crate::point::CInt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LocalMinimum {
    pub y: CInt,
    pub left_bound: EdgeIdx,
    pub right_bound: EdgeIdx,
}

pub struct LocalMinimaQueue {
    minima: Vec<LocalMinimum>,
    /// Index of the next minimum to pop.
    current: usize,
}

impl Default for LocalMinimaQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalMinimaQueue {
    pub fn new() -> Self {
        LocalMinimaQueue {
            minima: Vec::new(),
            current: 0,
        }
    }

    pub fn push(&mut self, lm: LocalMinimum) {
        let pos = self.minima.partition_point(|m| m.y > lm.y);
        self.minima.insert(pos.max(self.current), lm);
    }

    pub fn is_empty(&self) -> bool {
        self.current >= self.minima.len()
    }

    /// Minima not yet popped, in pop order.
    pub fn pending(&self) -> &[LocalMinimum] {
        &self.minima[self.current..]
    }

    pub fn peek_y(&self) -> Option<CInt> {
        self.minima.get(self.current).map(|m| m.y)
    }

    pub fn pop(&mut self) -> ClipResult<LocalMinimum> {
        let lm = *self
            .minima
            .get(self.current)
            .ok_or(ClipError::EmptyQueue("local minima"))?;
        self.current += 1;
        Ok(lm)
    }

    /// Pop the next minimum only if it sits exactly at `y`.
    pub fn pop_at(&mut self, y: CInt) -> Option<LocalMinimum> {
        if self.peek_y() == Some(y) {
            self.pop().ok()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.minima.clear();
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lm(y: CInt, tag: EdgeIdx) -> LocalMinimum {
        LocalMinimum {
            y,
            left_bound: tag,
            right_bound: tag,
        }
    }

    #[test]
    fn pops_in_descending_y() {
        let mut q = LocalMinimaQueue::new();
        q.push(lm(20, 0));
        q.push(lm(10, 1));
        q.push(lm(30, 2));
        assert_eq!(q.pop().unwrap().y, 30);
        assert_eq!(q.pop().unwrap().y, 20);
        assert_eq!(q.pop().unwrap().y, 10);
        assert_eq!(q.pop(), Err(ClipError::EmptyQueue("local minima")));
    }

    #[test]
    fn equal_y_goes_ahead_of_existing() {
        let mut q = LocalMinimaQueue::new();
        q.push(lm(10, 0));
        q.push(lm(10, 1));
        q.push(lm(20, 2));
        q.push(lm(10, 3));
        assert_eq!(q.pop().unwrap().left_bound, 2);
        assert_eq!(q.pop().unwrap().left_bound, 3);
        assert_eq!(q.pop().unwrap().left_bound, 1);
        assert_eq!(q.pop().unwrap().left_bound, 0);
    }

    #[test]
    fn pop_at_only_matches_exact_y() {
        let mut q = LocalMinimaQueue::new();
        q.push(lm(5, 0));
        assert!(q.pop_at(6).is_none());
        assert_eq!(q.pop_at(5).map(|m| m.y), Some(5));
        assert!(q.is_empty());
        assert!(q.pop_at(5).is_none());
    }
}
