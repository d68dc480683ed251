use crate::core::{Pid, Ticks};

/// What happened on the CPU during one tick. `at` is the clock value when the
/// tick started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CpuEvent {
    Dispatched { pid: Pid, at: Ticks },
    // Quantum expired mid-burst
    Preempted { pid: Pid, ran: Ticks, at: Ticks },
    BurstCompleted { pid: Pid, ran: Ticks, at: Ticks },
    Requeued { pid: Pid, at: Ticks },
    Terminated { pid: Pid, at: Ticks },
    // Nothing ready, tick consumed anyway
    Idle { at: Ticks },
}
