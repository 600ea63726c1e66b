// Copyright 2025 Lars Brubaker
// License: MIT
//
// Scanbeam queue: the y values at which the sweep must stop.
//
// A binary max-heap stored 1-based (nodes[0] is unused). Duplicate inserts
// are kept in the heap and collapsed on pop, so successive pops return a
// strictly decreasing sequence.

use crate::error::{ClipError, ClipResult};
use crate::point::CInt;

pub struct ScanbeamQueue {
    nodes: Vec<CInt>,
}

impl Default for ScanbeamQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanbeamQueue {
    pub fn new() -> Self {
        ScanbeamQueue { nodes: vec![0] }
    }

    #[inline]
    fn size(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn clear(&mut self) {
        self.nodes.truncate(1);
    }

    fn float_up(&mut self, mut curr: usize) {
        let y = self.nodes[curr];
        loop {
            let parent = curr >> 1;
            if parent == 0 || self.nodes[parent] >= y {
                self.nodes[curr] = y;
                break;
            }
            self.nodes[curr] = self.nodes[parent];
            curr = parent;
        }
    }

    fn float_down(&mut self, mut curr: usize) {
        let size = self.size();
        let y = self.nodes[curr];
        loop {
            let mut child = curr << 1;
            if child > size {
                self.nodes[curr] = y;
                break;
            }
            if child < size && self.nodes[child + 1] > self.nodes[child] {
                child += 1;
            }
            if y >= self.nodes[child] {
                self.nodes[curr] = y;
                break;
            }
            self.nodes[curr] = self.nodes[child];
            curr = child;
        }
    }

    pub fn insert(&mut self, y: CInt) {
        self.nodes.push(y);
        let last = self.size();
        self.float_up(last);
    }

    pub fn peek(&self) -> Option<CInt> {
        if self.is_empty() {
            None
        } else {
            Some(self.nodes[1])
        }
    }

    fn extract_max(&mut self) -> CInt {
        let top = self.nodes[1];
        let last = self.nodes.pop().unwrap_or(top);
        if !self.is_empty() {
            self.nodes[1] = last;
            self.float_down(1);
        }
        top
    }

    /// Remove and return the largest y, discarding any duplicates of it.
    pub fn pop(&mut self) -> ClipResult<CInt> {
        if self.is_empty() {
            return Err(ClipError::EmptyQueue("scanbeam"));
        }
        let y = self.extract_max();
        while self.peek() == Some(y) {
            self.extract_max();
        }
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_strictly_decreasing_without_duplicates() {
        let mut sb = ScanbeamQueue::new();
        for y in [5, 3, 9, 3, 7, 9, 1, 5, 5, 0, -4] {
            sb.insert(y);
        }
        let mut out = Vec::new();
        while !sb.is_empty() {
            out.push(sb.pop().unwrap());
        }
        assert_eq!(out, vec![9, 7, 5, 3, 1, 0, -4]);
        assert_eq!(sb.pop(), Err(ClipError::EmptyQueue("scanbeam")));
    }

    #[test]
    fn interleaved_inserts_keep_order() {
        let mut sb = ScanbeamQueue::new();
        sb.insert(10);
        sb.insert(4);
        assert_eq!(sb.pop(), Ok(10));
        sb.insert(8);
        sb.insert(4);
        sb.insert(2);
        assert_eq!(sb.pop(), Ok(8));
        assert_eq!(sb.pop(), Ok(4));
        assert_eq!(sb.pop(), Ok(2));
        assert!(sb.is_empty());
    }

    #[test]
    fn many_random_values_come_out_sorted() {
        let mut sb = ScanbeamQueue::new();
        let mut v: i64 = 12345;
        let mut inserted = Vec::new();
        for _ in 0..500 {
            v = (v * 1103515245 + 12345) % 2147483648;
            let y = v % 997 - 400;
            sb.insert(y);
            inserted.push(y);
        }
        inserted.sort_unstable_by(|a, b| b.cmp(a));
        inserted.dedup();
        let mut out = Vec::new();
        while let Ok(y) = sb.pop() {
            out.push(y);
        }
        assert_eq!(out, inserted);
    }
}
