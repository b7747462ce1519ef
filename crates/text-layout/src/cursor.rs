//! Navigation over ordered text blocks

use tracing::debug;

/// Current position while reading a block list aloud
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingCursor {
    len: usize,
    current: Option<usize>,
    stopped_at: Option<usize>,
}

impl ReadingCursor {
    /// Cursor over `len` blocks, not yet reading
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current: None,
            stopped_at: None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Begin reading at `index`; false if out of range
    pub fn start(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.current = Some(index);
        true
    }

    pub fn next(&mut self) -> bool {
        match self.current {
            Some(index) if index + 1 < self.len => {
                self.current = Some(index + 1);
                true
            }
            _ => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.current {
            Some(index) if index > 0 => {
                self.current = Some(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Stop reading and remember where
    pub fn stop(&mut self) -> Option<usize> {
        if let Some(index) = self.current.take() {
            self.stopped_at = Some(index);
            debug!("Reading stopped at block {}", index);
        }
        self.stopped_at
    }

    /// Continue from the stopped block, if any
    pub fn resume(&mut self) -> Option<usize> {
        let index = self.stopped_at.filter(|&i| i < self.len)?;
        self.current = Some(index);
        Some(index)
    }

    /// New block list; forgets all positions
    pub fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }
}
