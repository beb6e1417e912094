// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed-capacity FIFO window over token indices.

use std::collections::VecDeque;

/// A bounded lookback window of token indices.
///
/// Pushing at capacity evicts the oldest entry, so the window always holds
/// the most recent `capacity` indices in arrival order. The scan engine
/// pushes sequential indices, which makes a full window a contiguous span of
/// the owning sequence (see [`TokenWindow::bounds`]).
#[derive(Debug, Clone)]
pub struct TokenWindow {
    entries: VecDeque<usize>,
    capacity: usize,
}

impl TokenWindow {
    /// Create a window holding at most `capacity` indices.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once the window has seen at least `capacity` pushes.
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Append an index, evicting the oldest entry when at capacity.
    pub fn push(&mut self, index: usize) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(index);
    }

    /// The current entries, oldest to newest.
    pub fn snapshot(&self) -> Vec<usize> {
        self.entries.iter().copied().collect()
    }

    /// Oldest and newest entry, when the window is non-empty.
    ///
    /// With sequential pushes this is the inclusive index range of the
    /// window's span in the owning sequence.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        Some((*self.entries.front()?, *self.entries.back()?))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_up_to_capacity() {
        let mut window = TokenWindow::new(3);
        assert!(window.is_empty());
        assert!(!window.is_full());

        window.push(10);
        window.push(11);
        assert_eq!(window.len(), 2);
        assert!(!window.is_full());

        window.push(12);
        assert!(window.is_full());
        assert_eq!(window.snapshot(), vec![10, 11, 12]);
    }

    #[test]
    fn push_at_capacity_evicts_oldest() {
        let mut window = TokenWindow::new(3);
        for index in 0..5 {
            window.push(index);
        }

        assert_eq!(window.len(), 3);
        assert_eq!(window.snapshot(), vec![2, 3, 4]);
    }

    #[test]
    fn bounds_track_span() {
        let mut window = TokenWindow::new(2);
        assert_eq!(window.bounds(), None);

        window.push(7);
        assert_eq!(window.bounds(), Some((7, 7)));

        window.push(8);
        window.push(9);
        assert_eq!(window.bounds(), Some((8, 9)));
    }

    #[test]
    fn clear_resets_fill_state() {
        let mut window = TokenWindow::new(2);
        window.push(1);
        window.push(2);
        window.clear();

        assert!(window.is_empty());
        assert!(!window.is_full());
        assert_eq!(window.bounds(), None);
    }
}
