use heapless::Deque;

/// Deferred work for the underglow's single work path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Work {
    /// Render the ambient effect and write a frame
    Tick,
    /// Write a frame for the status overlay fade
    StatusFrame,
}

/// Queue of pending work items
///
/// Each kind of work is queued at most once: submitting an item that is
/// already pending is dropped.
#[derive(Debug, Default)]
pub struct WorkQueue<const N: usize> {
    inner: Deque<Work, N>,
}

impl<const N: usize> WorkQueue<N> {
    pub const fn new() -> Self {
        Self {
            inner: Deque::new(),
        }
    }

    /// Submit a work item
    ///
    /// Returns `false` if the item was already pending or the queue is full
    pub fn submit(&mut self, work: Work) -> bool {
        if self.is_pending(work) {
            return false;
        }
        self.inner.push_back(work).is_ok()
    }

    pub fn is_pending(&self, work: Work) -> bool {
        self.inner.iter().any(|pending| *pending == work)
    }

    /// Take the oldest pending item
    pub fn pop(&mut self) -> Option<Work> {
        self.inner.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
