use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use super::{
    clock::Clock,
    process::{Process, ProcessInfo},
    ready_queue::ReadyQueue,
};
use crate::error::{Result, SimError};

pub type Ticks = u64;
pub type Pid = u64;
new_key_type! {
    pub struct ProcessKey;
}

/// Shared simulation state: the clock, every process ever admitted, and the
/// ready queue referencing the ones waiting for the CPU.
#[derive(Debug, Default)]
pub struct KernelCtx {
    pub clock: Clock,
    pub ready: ReadyQueue,
    processes: SlotMap<ProcessKey, Process>,

    // Registry in admission order, for reporting
    admitted: Vec<ProcessKey>,
    pid_index: FxHashMap<Pid, ProcessKey>,
}

impl KernelCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Ticks {
        self.clock.now()
    }

    /// Register a newly arrived process and place it on the ready queue.
    pub fn admit(&mut self, mut process: Process) -> Result<ProcessKey> {
        let pid = process.pid();
        let now = self.now();
        if process.arrival_time() != now {
            return Err(SimError::InvalidArrival {
                pid,
                arrival_time: process.arrival_time(),
                now,
            });
        }
        if self.pid_index.contains_key(&pid) {
            return Err(SimError::DuplicatePid(pid));
        }

        process.mark_ready()?;
        let key = self.processes.insert(process);
        self.pid_index.insert(pid, key);
        self.admitted.push(key);
        self.ready.add(key)?;
        Ok(key)
    }

    pub fn process(&self, key: ProcessKey) -> &Process {
        &self.processes[key]
    }

    pub(crate) fn process_mut(&mut self, key: ProcessKey) -> &mut Process {
        &mut self.processes[key]
    }

    pub fn get(&self, key: ProcessKey) -> Option<&Process> {
        self.processes.get(key)
    }

    pub fn key_of(&self, pid: Pid) -> Option<ProcessKey> {
        self.pid_index.get(&pid).copied()
    }

    pub fn by_pid(&self, pid: Pid) -> Option<&Process> {
        self.key_of(pid).map(|key| self.process(key))
    }

    /// All admitted processes, in admission order.
    pub fn processes(&self) -> impl Iterator<Item = &Process> + '_ {
        self.admitted.iter().map(|&key| &self.processes[key])
    }

    pub fn process_count(&self) -> usize {
        self.admitted.len()
    }

    /// Policy-visible snapshot of the ready queue.
    pub fn ready_infos(&self) -> Vec<ProcessInfo> {
        self.ready
            .iter()
            .map(|key| self.processes[key].info(key))
            .collect()
    }

    pub(crate) fn requeue(&mut self, key: ProcessKey) -> Result<()> {
        self.processes[key].mark_ready()?;
        self.ready.add(key)
    }

    /// Charge one waiting tick to every queued process except `ran`, which
    /// held the CPU for this tick.
    pub(crate) fn charge_waiting(&mut self, ran: Option<ProcessKey>) {
        for key in self.ready.iter() {
            if Some(key) != ran {
                self.processes[key].increment_waiting_time();
            }
        }
    }
}
