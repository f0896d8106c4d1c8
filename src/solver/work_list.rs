use std::collections::{HashSet, VecDeque};

use crate::solver::engine::ConstraintId;

/// FIFO queue of constraints awaiting re-examination, with membership
/// tracking so a constraint is never queued twice at once.
pub struct WorkList {
    queue: VecDeque<ConstraintId>,
    queue_members: HashSet<ConstraintId>,
}

impl WorkList {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            queue_members: HashSet::new(),
        }
    }

    pub fn push_back(&mut self, constraint_id: ConstraintId) {
        if self.queue_members.insert(constraint_id) {
            self.queue.push_back(constraint_id);
        }
    }

    pub fn pop_front(&mut self) -> Option<ConstraintId> {
        let constraint_id = self.queue.pop_front()?;
        self.queue_members.remove(&constraint_id);
        Some(constraint_id)
    }

    pub fn contains(&self, constraint_id: ConstraintId) -> bool {
        self.queue_members.contains(&constraint_id)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for WorkList {
    fn default() -> Self {
        Self::new()
    }
}
