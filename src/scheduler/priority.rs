use super::{ProcessInfo, ProcessKey, Scheduler, Ticks};
use crate::error::{Result, SimError};

/// Lowest `priority` value first, falling back to FCFS order.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriorityScheduler;

impl Scheduler for PriorityScheduler {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn select(&mut self, ready: &[ProcessInfo], _now: Ticks) -> Result<ProcessKey> {
        ready
            .iter()
            .min_by_key(|p| (p.priority, p.arrival_time, p.pid))
            .map(|p| p.key)
            .ok_or(SimError::EmptySelection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::infos;

    #[test]
    fn lower_priority_value_wins() {
        let ready = infos(&[(1, 0, 2), (2, 3, 0), (3, 1, 1)]);
        assert_eq!(PriorityScheduler.select(&ready, 3), Ok(ready[1].key));
    }

    #[test]
    fn equal_priority_falls_back_to_fcfs() {
        let ready = infos(&[(5, 2, 1), (3, 2, 1), (1, 4, 1)]);
        assert_eq!(PriorityScheduler.select(&ready, 4), Ok(ready[1].key));
    }

    #[test]
    fn boxed_policy_dispatches_dynamically() {
        let mut policy: Box<dyn Scheduler> = Box::new(PriorityScheduler);
        let ready = infos(&[(1, 0, 1), (2, 0, 0)]);
        assert_eq!(policy.name(), "priority");
        assert_eq!(policy.select(&ready, 0), Ok(ready[1].key));
        assert_eq!(policy.select(&[], 0), Err(SimError::EmptySelection));
    }
}
