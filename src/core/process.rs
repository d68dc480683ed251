use std::collections::VecDeque;

use crate::error::{Result, SimError};

use super::state::{Pid, ProcessKey, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    // Reserved for I/O blocking; no transition reaches it.
    Waiting,
    Terminated,
}

/// A simulated process.
///
/// The remaining burst lengths are hidden: they are private to this module
/// and only mutated through the crate-internal methods the CPU calls. Policies
/// never see a `Process`, only a [`ProcessInfo`] snapshot.
#[derive(Debug, Clone)]
pub struct Process {
    pid: Pid,
    arrival_time: Ticks,
    priority: u32,

    // Hidden ground truth
    bursts: VecDeque<Ticks>,
    remaining_burst: Option<Ticks>,

    // Ticks executed per dispatch segment; a preempted burst spans several entries
    history: Vec<Ticks>,

    state: ProcessState,
    waiting_time: Ticks,
    total_cpu_time: Ticks,
    last_scheduled_time: Option<Ticks>,
    completion_time: Option<Ticks>,
}

/// What a scheduling policy is allowed to know about a ready process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessInfo {
    pub key: ProcessKey,
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub priority: u32,
    pub state: ProcessState,
}

impl Process {
    pub fn new(pid: Pid, arrival_time: Ticks, bursts: Vec<Ticks>, priority: u32) -> Result<Self> {
        if bursts.is_empty() {
            return Err(SimError::InvalidConfig(format!(
                "process {pid} declares no CPU bursts"
            )));
        }
        if bursts.contains(&0) {
            return Err(SimError::InvalidConfig(format!(
                "process {pid} declares a zero-length burst"
            )));
        }

        Ok(Self {
            pid,
            arrival_time,
            priority,
            bursts: bursts.into(),
            remaining_burst: None,
            history: Vec::new(),
            state: ProcessState::New,
            waiting_time: 0,
            total_cpu_time: 0,
            last_scheduled_time: None,
            completion_time: None,
        })
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn history(&self) -> &[Ticks] {
        &self.history
    }

    pub fn waiting_time(&self) -> Ticks {
        self.waiting_time
    }

    pub fn total_cpu_time(&self) -> Ticks {
        self.total_cpu_time
    }

    pub fn last_scheduled_time(&self) -> Option<Ticks> {
        self.last_scheduled_time
    }

    pub fn completion_time(&self) -> Option<Ticks> {
        self.completion_time
    }

    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.completion_time.map(|done| done - self.arrival_time)
    }

    pub fn info(&self, key: ProcessKey) -> ProcessInfo {
        ProcessInfo {
            key,
            pid: self.pid,
            arrival_time: self.arrival_time,
            priority: self.priority,
            state: self.state,
        }
    }

    fn invalid(&self, reason: &'static str) -> SimError {
        SimError::InvalidState {
            pid: self.pid,
            state: self.state,
            reason,
        }
    }

    /// New -> Ready on admission, Running -> Ready on requeue.
    pub(crate) fn mark_ready(&mut self) -> Result<()> {
        match self.state {
            ProcessState::New | ProcessState::Running => {
                self.state = ProcessState::Ready;
                Ok(())
            }
            _ => Err(self.invalid("only new or running processes can become ready")),
        }
    }

    /// Dispatch onto the CPU. A burst left in flight by an earlier preemption
    /// is resumed as-is; otherwise the next hidden burst is loaded.
    pub(crate) fn start_execution(&mut self, now: Ticks) -> Result<()> {
        if self.state != ProcessState::Ready {
            return Err(self.invalid("only ready processes can be dispatched"));
        }
        if self.remaining_burst.is_none() {
            let next = self
                .bursts
                .pop_front()
                .ok_or_else(|| self.invalid("dispatched with no remaining bursts"))?;
            self.remaining_burst = Some(next);
        }

        self.state = ProcessState::Running;
        self.last_scheduled_time = Some(now);
        Ok(())
    }

    pub(crate) fn execute_one_tick(&mut self) -> Result<()> {
        if self.state != ProcessState::Running {
            return Err(self.invalid("process is not running"));
        }
        match self.remaining_burst {
            Some(remaining) if remaining > 0 => {
                self.remaining_burst = Some(remaining - 1);
                self.total_cpu_time += 1;
                Ok(())
            }
            _ => Err(self.invalid("no burst ticks left to execute")),
        }
    }

    pub(crate) fn is_burst_complete(&self) -> bool {
        self.remaining_burst == Some(0)
    }

    /// Natural end of a burst: record the segment and drop the in-flight burst.
    pub(crate) fn complete_burst(&mut self, ticks_executed: Ticks) {
        debug_assert!(self.is_burst_complete(), "pid {} burst not exhausted", self.pid);
        self.history.push(ticks_executed);
        self.remaining_burst = None;
    }

    /// Quantum expiry: record the segment but keep the unfinished burst for
    /// the next dispatch.
    pub(crate) fn record_preemption(&mut self, ticks_executed: Ticks) {
        debug_assert!(
            self.remaining_burst.is_some_and(|r| r > 0),
            "pid {} preempted without unfinished work",
            self.pid
        );
        self.history.push(ticks_executed);
    }

    pub fn has_more_work(&self) -> bool {
        !self.bursts.is_empty() || self.remaining_burst.is_some_and(|r| r > 0)
    }

    pub(crate) fn terminate(&mut self, now: Ticks) -> Result<()> {
        if self.has_more_work() {
            return Err(self.invalid("cannot terminate with work remaining"));
        }
        self.state = ProcessState::Terminated;
        self.completion_time = Some(now);
        Ok(())
    }

    pub(crate) fn increment_waiting_time(&mut self) {
        if self.state == ProcessState::Ready {
            self.waiting_time += 1;
        }
    }

    #[cfg(test)]
    pub(crate) fn remaining_burst(&self) -> Option<Ticks> {
        self.remaining_burst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatched(bursts: Vec<Ticks>) -> Process {
        let mut p = Process::new(1, 0, bursts, 0).unwrap();
        p.mark_ready().unwrap();
        p.start_execution(0).unwrap();
        p
    }

    #[test]
    fn rejects_empty_or_zero_bursts() {
        assert!(matches!(
            Process::new(1, 0, vec![], 0),
            Err(SimError::InvalidConfig(_))
        ));
        assert!(matches!(
            Process::new(1, 0, vec![3, 0], 0),
            Err(SimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn execute_requires_running() {
        let mut p = Process::new(7, 0, vec![2], 0).unwrap();
        let err = p.execute_one_tick().unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidState {
                pid: 7,
                state: ProcessState::New,
                ..
            }
        ));
    }

    #[test]
    fn preemption_keeps_in_flight_burst() {
        let mut p = dispatched(vec![5]);
        p.execute_one_tick().unwrap();
        p.execute_one_tick().unwrap();
        p.record_preemption(2);
        assert_eq!(p.remaining_burst(), Some(3));
        assert!(p.has_more_work());

        p.mark_ready().unwrap();
        p.start_execution(4).unwrap();
        assert_eq!(p.remaining_burst(), Some(3));
        assert_eq!(p.last_scheduled_time(), Some(4));
    }

    #[test]
    fn completion_loads_next_burst_on_dispatch() {
        let mut p = dispatched(vec![1, 2]);
        p.execute_one_tick().unwrap();
        assert!(p.is_burst_complete());
        p.complete_burst(1);
        assert_eq!(p.remaining_burst(), None);
        assert!(p.has_more_work());

        p.mark_ready().unwrap();
        p.start_execution(1).unwrap();
        assert_eq!(p.remaining_burst(), Some(2));
    }

    #[test]
    fn terminate_only_without_work() {
        let mut p = dispatched(vec![1]);
        assert!(p.terminate(0).is_err());
        p.execute_one_tick().unwrap();
        p.complete_burst(1);
        assert!(!p.has_more_work());
        p.terminate(1).unwrap();
        assert_eq!(p.state(), ProcessState::Terminated);
        assert_eq!(p.history(), &[1]);
        assert_eq!(p.total_cpu_time(), 1);
        assert_eq!(p.turnaround_time(), Some(1));
    }

    #[test]
    fn waiting_time_only_grows_while_ready() {
        let mut p = Process::new(1, 0, vec![1], 0).unwrap();
        p.increment_waiting_time();
        assert_eq!(p.waiting_time(), 0);
        p.mark_ready().unwrap();
        p.increment_waiting_time();
        p.increment_waiting_time();
        assert_eq!(p.waiting_time(), 2);
        p.start_execution(2).unwrap();
        p.increment_waiting_time();
        assert_eq!(p.waiting_time(), 2);
    }

    #[test]
    fn overrunning_a_burst_is_rejected() {
        let mut p = dispatched(vec![1]);
        p.execute_one_tick().unwrap();
        assert!(p.execute_one_tick().is_err());
        assert_eq!(p.total_cpu_time(), 1);
    }
}
