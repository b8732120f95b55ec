// Rolling history - bounded FIFO of the most recent sample values
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RollingHistory {
    values: VecDeque<f64>,
    capacity: usize,
}

impl RollingHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a value, evicting the oldest one once the history is full.
    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Largest value currently held, `None` when empty.
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Values oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_has_no_max() {
        let history = RollingHistory::new(3);
        assert!(history.is_empty());
        assert_eq!(history.max(), None);
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut history = RollingHistory::new(3);
        for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
            history.push(value);
            assert!(history.len() <= history.capacity());
        }
        assert_eq!(history.iter().collect::<Vec<_>>(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_max_tracks_only_retained_values() {
        let mut history = RollingHistory::new(100);
        let pushed: Vec<f64> = (0..250).map(|i| ((i * 37) % 101) as f64 - 20.0).collect();

        for (i, value) in pushed.iter().enumerate() {
            history.push(*value);
            let start = (i + 1).saturating_sub(100);
            let expected = pushed[start..=i].iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(history.max(), Some(expected));
        }
        assert_eq!(history.len(), 100);
    }

    #[test]
    fn test_negative_values_max() {
        let mut history = RollingHistory::new(4);
        history.push(-5.0);
        history.push(-2.5);
        assert_eq!(history.max(), Some(-2.5));
    }

    #[test]
    fn test_clear() {
        let mut history = RollingHistory::new(2);
        history.push(1.0);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 2);
    }
}
