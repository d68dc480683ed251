use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::error::{Result, SimError};

use super::state::ProcessKey;

/// Processes admitted and waiting for the CPU, kept in insertion order.
///
/// Order is informational only; the scheduler decides who runs next.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    queue: VecDeque<ProcessKey>,
    members: FxHashSet<ProcessKey>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: ProcessKey) -> Result<()> {
        if !self.members.insert(key) {
            return Err(SimError::AlreadyQueued(key));
        }
        self.queue.push_back(key);
        Ok(())
    }

    pub fn remove(&mut self, key: ProcessKey) -> Result<()> {
        if !self.members.remove(&key) {
            return Err(SimError::NotFound(key));
        }
        let index = self
            .queue
            .iter()
            .position(|&queued| queued == key)
            .ok_or(SimError::NotFound(key))?;
        self.queue.remove(index);
        Ok(())
    }

    pub fn contains(&self, key: ProcessKey) -> bool {
        self.members.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProcessKey> + '_ {
        self.queue.iter().copied()
    }
}
