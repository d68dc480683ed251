use log::{info, trace};

use super::{stats::SimSummary, workload::WorkloadSource};
use crate::{
    core::{Cpu, CpuEvent, KernelCtx, Process, Ticks},
    error::{Result, SimError},
    scheduler::Scheduler,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub time_quantum: Ticks,
    /// The run stops once the clock reaches this tick
    pub max_time: Ticks,
}

impl SimConfig {
    pub fn new(time_quantum: Ticks, max_time: Ticks) -> Result<Self> {
        if time_quantum == 0 {
            return Err(SimError::InvalidConfig(
                "time quantum must be positive".to_string(),
            ));
        }
        Ok(Self {
            time_quantum,
            max_time,
        })
    }
}

pub struct Simulator<S: Scheduler, W: WorkloadSource> {
    pub ctx: KernelCtx,
    pub cpu: Cpu<S>,
    source: W,
    max_time: Ticks,
}

impl<S: Scheduler, W: WorkloadSource> Simulator<S, W> {
    pub fn new(scheduler: S, source: W, config: SimConfig) -> Result<Self> {
        Ok(Self {
            ctx: KernelCtx::new(),
            cpu: Cpu::new(scheduler, config.time_quantum)?,
            source,
            max_time: config.max_time,
        })
    }

    /// Run until `max_time`, or earlier once the workload can certify that
    /// nothing else will arrive and the machine has gone idle.
    pub fn run(&mut self) -> Result<SimSummary> {
        info!(
            "Starting {} simulation: quantum={} max_time={}",
            self.cpu.scheduler.name(),
            self.cpu.time_quantum(),
            self.max_time
        );

        while self.now() < self.max_time {
            self.step()?;
            if self.source.exhausted() && self.is_idle() {
                info!("Workload drained at t={}", self.now());
                break;
            }
        }

        let summary = self.summary();
        info!(
            "Simulation finished at t={}: {} processes, {} context switches",
            summary.end_time, summary.processes, summary.context_switches
        );
        Ok(summary)
    }

    /// Admit this tick's arrivals, then let the CPU run one tick.
    pub fn step(&mut self) -> Result<Vec<CpuEvent>> {
        self.handle_arrivals()?;
        self.cpu.run_one_tick(&mut self.ctx)
    }

    fn handle_arrivals(&mut self) -> Result<usize> {
        let now = self.now();
        let arrivals = self.source.arrivals(now)?;
        let count = arrivals.len();
        for process in arrivals {
            trace!("t={now} admitting pid {}", process.pid());
            self.ctx.admit(process)?;
        }
        Ok(count)
    }

    pub fn is_idle(&self) -> bool {
        self.ctx.ready.is_empty() && self.cpu.is_idle()
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now()
    }

    pub fn source(&self) -> &W {
        &self.source
    }

    /// Every process admitted so far, in admission order.
    pub fn processes(&self) -> impl Iterator<Item = &Process> + '_ {
        self.ctx.processes()
    }

    pub fn summary(&self) -> SimSummary {
        SimSummary::collect(&self.ctx, &self.cpu)
    }
}
