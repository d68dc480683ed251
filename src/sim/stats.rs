use std::fmt;

use average::{Estimate, Mean};

use crate::{
    core::{Cpu, KernelCtx, Process, ProcessState, Ticks},
    scheduler::Scheduler,
};

/// Aggregate figures over a finished (or interrupted) run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimSummary {
    pub policy: &'static str,
    pub time_quantum: Ticks,
    pub end_time: Ticks,
    pub processes: usize,
    pub terminated: usize,
    pub context_switches: u64,
    pub idle_ticks: Ticks,
    pub busy_ticks: Ticks,
    pub mean_waiting_time: Option<f64>,
    pub max_waiting_time: Option<Ticks>,
    /// Over terminated processes only
    pub mean_turnaround_time: Option<f64>,
    /// Total history entries; exceeds the burst count when bursts were preempted
    pub history_segments: usize,
}

impl SimSummary {
    pub fn collect<S: Scheduler>(ctx: &KernelCtx, cpu: &Cpu<S>) -> Self {
        let waiting: Mean = ctx
            .processes()
            .map(|p| p.waiting_time() as f64)
            .collect();
        let turnaround: Mean = ctx
            .processes()
            .filter_map(Process::turnaround_time)
            .map(|t| t as f64)
            .collect();

        Self {
            policy: cpu.scheduler.name(),
            time_quantum: cpu.time_quantum(),
            end_time: ctx.now(),
            processes: ctx.process_count(),
            terminated: ctx
                .processes()
                .filter(|p| p.state() == ProcessState::Terminated)
                .count(),
            context_switches: cpu.context_switches(),
            idle_ticks: cpu.idle_ticks(),
            busy_ticks: cpu.busy_ticks(),
            mean_waiting_time: estimate(&waiting),
            max_waiting_time: ctx.processes().map(Process::waiting_time).max(),
            mean_turnaround_time: estimate(&turnaround),
            history_segments: ctx.processes().map(|p| p.history().len()).sum(),
        }
    }

    pub fn utilisation(&self) -> f64 {
        let total = self.idle_ticks + self.busy_ticks;
        if total == 0 {
            0.0
        } else {
            self.busy_ticks as f64 / total as f64
        }
    }
}

fn estimate(mean: &Mean) -> Option<f64> {
    (!mean.is_empty()).then(|| mean.estimate())
}

impl fmt::Display for SimSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_na = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));

        writeln!(f, "Policy: {} (quantum={})", self.policy, self.time_quantum)?;
        writeln!(f, "End time: {} ticks", self.end_time)?;
        writeln!(
            f,
            "Processes: {} admitted, {} terminated",
            self.processes, self.terminated
        )?;
        writeln!(f, "Context switches: {}", self.context_switches)?;
        writeln!(f, "CPU utilisation: {:.1}%", self.utilisation() * 100.0)?;
        writeln!(f, "Average waiting time: {} ticks", or_na(self.mean_waiting_time))?;
        writeln!(
            f,
            "Longest wait: {} ticks",
            self.max_waiting_time
                .map_or_else(|| "n/a".to_string(), |v| v.to_string())
        )?;
        writeln!(f, "Average turnaround time: {} ticks", or_na(self.mean_turnaround_time))?;
        write!(f, "Burst segments executed: {}", self.history_segments)
    }
}
