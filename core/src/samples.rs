//! Sampled Color List
//!
//! Colors the user picks off the gradient accumulate here, newest at
//! the end. The list is bounded: past capacity the oldest entry is
//! evicted, strictly FIFO. Entries can also be removed explicitly by
//! index or by value.

use crate::color::Color;

/// Maximum number of sampled colors retained
pub const SAMPLE_CAPACITY: usize = 15;

/// A bounded, ordered list of sampled colors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleList {
    colors: Vec<Color>,
    capacity: usize,
}

impl SampleList {
    /// Create an empty list with the default capacity of 15.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(SAMPLE_CAPACITY)
    }

    /// Create an empty list with an explicit capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            colors: Vec::new(),
            capacity,
        }
    }

    /// Append a color, evicting the oldest entry when over capacity.
    ///
    /// Returns the evicted color, if any.
    pub fn push(&mut self, color: Color) -> Option<Color> {
        self.colors.push(color);
        if self.colors.len() > self.capacity {
            Some(self.colors.remove(0))
        } else {
            None
        }
    }

    /// Remove the entry at `index`, if in range.
    pub fn remove(&mut self, index: usize) -> Option<Color> {
        if index < self.colors.len() {
            Some(self.colors.remove(index))
        } else {
            None
        }
    }

    /// Remove the first entry equal to `color`.
    ///
    /// Returns whether an entry was removed.
    pub fn remove_color(&mut self, color: &Color) -> bool {
        if let Some(pos) = self.colors.iter().position(|c| c == color) {
            self.colors.remove(pos);
            true
        } else {
            false
        }
    }

    /// The sampled colors, oldest first.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of colors currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The entry at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Color> {
        self.colors.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut list = SampleList::new();
        for i in 0..5 {
            assert_eq!(list.push(Color::rgb(i, i, i)), None);
        }
        let expected: Vec<Color> = (0..5).map(|i| Color::rgb(i, i, i)).collect();
        assert_eq!(list.colors(), expected.as_slice());
    }

    #[test]
    fn test_fifo_eviction_past_capacity() {
        let mut list = SampleList::new();
        for i in 0u8..20 {
            let evicted = list.push(Color::rgb(i, 0, 0));
            if i < 15 {
                assert_eq!(evicted, None);
            } else {
                // pushing item i evicts item i-15
                assert_eq!(evicted, Some(Color::rgb(i - 15, 0, 0)));
            }
        }
        assert_eq!(list.len(), 15);
        let expected: Vec<Color> = (5u8..20).map(|i| Color::rgb(i, 0, 0)).collect();
        assert_eq!(list.colors(), expected.as_slice());
    }

    #[test]
    fn test_remove_by_index() {
        let mut list = SampleList::new();
        list.push(Color::rgb(1, 0, 0));
        list.push(Color::rgb(2, 0, 0));
        list.push(Color::rgb(3, 0, 0));

        assert_eq!(list.remove(1), Some(Color::rgb(2, 0, 0)));
        assert_eq!(list.colors(), &[Color::rgb(1, 0, 0), Color::rgb(3, 0, 0)]);
        assert_eq!(list.remove(5), None);
    }

    #[test]
    fn test_remove_by_value_removes_first_match_only() {
        let mut list = SampleList::new();
        list.push(Color::rgb(9, 9, 9));
        list.push(Color::rgb(1, 1, 1));
        list.push(Color::rgb(9, 9, 9));

        assert!(list.remove_color(&Color::rgb(9, 9, 9)));
        assert_eq!(list.colors(), &[Color::rgb(1, 1, 1), Color::rgb(9, 9, 9)]);
        assert!(!list.remove_color(&Color::rgb(0, 0, 0)));
    }

    #[test]
    fn test_removal_frees_capacity() {
        let mut list = SampleList::with_capacity(2);
        list.push(Color::rgb(1, 0, 0));
        list.push(Color::rgb(2, 0, 0));
        list.remove(0);
        assert_eq!(list.push(Color::rgb(3, 0, 0)), None);
        assert_eq!(list.len(), 2);
    }
}
