use super::{ProcessInfo, ProcessKey, Scheduler, Ticks};
use crate::error::{Result, SimError};

/// First-come-first-served: earliest arrival wins, ties go to the lower pid.
#[derive(Debug, Default, Clone, Copy)]
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn select(&mut self, ready: &[ProcessInfo], _now: Ticks) -> Result<ProcessKey> {
        ready
            .iter()
            .min_by_key(|p| (p.arrival_time, p.pid))
            .map(|p| p.key)
            .ok_or(SimError::EmptySelection)
    }
}
