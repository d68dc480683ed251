pub mod fcfs;
pub mod priority;

use crate::{
    core::{ProcessInfo, ProcessKey, Ticks},
    error::Result,
};
pub use fcfs::FcfsScheduler;
pub use priority::PriorityScheduler;

/// A selection policy over the ready set.
///
/// Policies only ever see [`ProcessInfo`] snapshots, so the remaining burst
/// lengths stay invisible to them. The returned key must belong to one of the
/// entries of `ready`; an empty `ready` is a dispatcher bug and yields
/// [`SimError::EmptySelection`](crate::SimError::EmptySelection).
pub trait Scheduler {
    fn name(&self) -> &'static str;

    fn select(&mut self, ready: &[ProcessInfo], now: Ticks) -> Result<ProcessKey>;
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn select(&mut self, ready: &[ProcessInfo], now: Ticks) -> Result<ProcessKey> {
        (**self).select(ready, now)
    }
}
