use std::collections::VecDeque;

/// Default number of lines kept for display.
pub const DEFAULT_LOG_CAPACITY: usize = 5000;

/// Display lines in arrival order, bounded to `capacity` (oldest dropped first).
#[derive(Debug, Clone)]
pub struct VisibleLog {
    lines: VecDeque<String>,
    capacity: usize,
    evicted: u64,
}

impl VisibleLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            evicted: 0,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
            self.evicted += 1;
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lines dropped to stay within capacity.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Up to `height` lines ending `offset_from_bottom` lines above the newest.
    pub fn window(&self, offset_from_bottom: usize, height: usize) -> Vec<&str> {
        let end = self.lines.len().saturating_sub(offset_from_bottom);
        let start = end.saturating_sub(height);
        self.lines
            .range(start..end)
            .map(String::as_str)
            .collect()
    }
}

impl Default for VisibleLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, count: usize) -> VisibleLog {
        let mut log = VisibleLog::new(capacity);
        for i in 0..count {
            log.push(format!("line {}", i));
        }
        log
    }

    #[test]
    fn test_keeps_newest_within_capacity() {
        let log = filled(3, 5);
        assert_eq!(log.len(), 3);
        assert_eq!(log.evicted(), 2);
        assert_eq!(log.window(0, 10), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_window_from_bottom() {
        let log = filled(100, 10);
        assert_eq!(log.window(0, 2), vec!["line 8", "line 9"]);
        assert_eq!(log.window(3, 2), vec!["line 5", "line 6"]);
        assert_eq!(log.window(9, 5), vec!["line 0"]);
        assert!(log.window(10, 5).is_empty());
        assert!(log.window(50, 5).is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_one_line() {
        let log = filled(0, 4);
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.window(0, 5), vec!["line 3"]);
    }

    #[test]
    fn test_empty() {
        let log = VisibleLog::default();
        assert!(log.is_empty());
        assert_eq!(log.capacity(), DEFAULT_LOG_CAPACITY);
        assert!(log.window(0, 10).is_empty());
    }
}
