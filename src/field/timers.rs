//! Cancellable delayed tasks
//!
//! One-shot tasks keyed by a due timestamp (ms, same clock as the frame
//! timestamps). The owner drains due tasks once per frame; there is no
//! background thread.

#[derive(Debug, Clone)]
struct Pending<T> {
    /// Scheduling order, breaks ties between equal due times
    seq: u64,
    due_ms: f64,
    task: T,
}

/// Pending one-shot tasks
#[derive(Debug, Clone)]
pub struct TaskQueue<T> {
    pending: Vec<Pending<T>>,
    next_seq: u64,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    /// Queue `task` to fire once `now >= due_ms`
    pub fn schedule(&mut self, due_ms: f64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending { seq, due_ms, task });
    }

    /// Drop every pending task
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Remove and return every task due at `now`, earliest first
    /// (ties keep scheduling order)
    pub fn take_due(&mut self, now_ms: f64) -> Vec<T> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now_ms);
        self.pending = rest;
        due.sort_by(|a, b| {
            a.due_ms
                .total_cmp(&b.due_ms)
                .then_with(|| a.seq.cmp(&b.seq))
        });
        due.into_iter().map(|p| p.task).collect()
    }

    /// Earliest due time, if anything is pending
    pub fn next_due(&self) -> Option<f64> {
        self.pending.iter().map(|p| p.due_ms).min_by(f64::total_cmp)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterate pending tasks (unordered)
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.pending.iter().map(|p| &p.task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_only_when_due() {
        let mut q = TaskQueue::new();
        q.schedule(100.0, "a");
        assert!(q.take_due(99.9).is_empty());
        assert_eq!(q.take_due(100.0), vec!["a"]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_due_order_and_ties() {
        let mut q = TaskQueue::new();
        q.schedule(300.0, 3);
        q.schedule(100.0, 1);
        q.schedule(200.0, 2);
        q.schedule(100.0, 11);
        assert_eq!(q.take_due(1000.0), vec![1, 11, 2, 3]);
    }

    #[test]
    fn test_cancel_all() {
        let mut q = TaskQueue::new();
        q.schedule(10.0, ());
        q.schedule(20.0, ());
        assert_eq!(q.cancel_all(), 2);
        assert!(q.take_due(f64::MAX).is_empty());
        assert_eq!(q.next_due(), None);
    }

    #[test]
    fn test_next_due() {
        let mut q = TaskQueue::new();
        q.schedule(50.0, ());
        q.schedule(25.0, ());
        assert_eq!(q.next_due(), Some(25.0));
    }
}
