//! Rolling distance history

use std::collections::VecDeque;

/// Bounded FIFO of recent minimum distances
#[derive(Debug, Clone)]
pub struct DistanceHistory {
    data: VecDeque<f32>,
    capacity: usize,
}

impl DistanceHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, distance: f32) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(distance);
    }

    pub fn mean(&self) -> Option<f32> {
        if self.data.is_empty() {
            return None;
        }
        let sum: f64 = self.data.iter().map(|&d| f64::from(d)).sum();
        Some((sum / self.data.len() as f64) as f32)
    }

    /// Record `distance` and return the updated mean
    pub fn smooth(&mut self, distance: f32) -> f32 {
        self.push(distance);
        self.mean().unwrap_or(distance)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_last_n() {
        let mut history = DistanceHistory::new(3);
        assert_eq!(history.mean(), None);
        assert_eq!(history.smooth(3.0), 3.0);
        assert_eq!(history.smooth(1.0), 2.0);
        history.push(2.0);
        assert_eq!(history.smooth(0.0), 1.0);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut history = DistanceHistory::new(3);
        history.push(1.0);
        history.clear();
        assert!(history.is_empty());
    }
}
