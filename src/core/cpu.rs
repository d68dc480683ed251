use log::{debug, trace};

use super::{
    event::CpuEvent,
    observer::Observer,
    state::{KernelCtx, ProcessKey, Ticks},
};
use crate::{
    error::{Result, SimError},
    scheduler::Scheduler,
};

/// Single-core dispatcher. Runs at most one process at a time and preempts it
/// once it has used `time_quantum` ticks of its current dispatch.
pub struct Cpu<S: Scheduler> {
    pub scheduler: S,
    current: Option<ProcessKey>,
    time_quantum: Ticks,
    context_switches: u64,
    ticks_in_current_quantum: Ticks,
    idle_ticks: Ticks,
    busy_ticks: Ticks,
    observer: Observer,
}

impl<S: Scheduler> Cpu<S> {
    pub fn new(scheduler: S, time_quantum: Ticks) -> Result<Self> {
        if time_quantum == 0 {
            return Err(SimError::InvalidConfig(
                "time quantum must be positive".to_string(),
            ));
        }
        Ok(Self {
            scheduler,
            current: None,
            time_quantum,
            context_switches: 0,
            ticks_in_current_quantum: 0,
            idle_ticks: 0,
            busy_ticks: 0,
            observer: Observer::new(),
        })
    }

    /// Advance the machine by exactly one tick: dispatch if idle, execute or
    /// idle, retire or preempt the running process, then charge waiting time
    /// to everything still queued.
    pub fn run_one_tick(&mut self, ctx: &mut KernelCtx) -> Result<Vec<CpuEvent>> {
        let at = ctx.now();
        let mut events = Vec::new();

        if self.current.is_none() && !ctx.ready.is_empty() {
            self.dispatch(ctx, at, &mut events)?;
        }

        let ran = self.current;
        match ran {
            Some(key) => {
                ctx.process_mut(key).execute_one_tick()?;
                self.ticks_in_current_quantum += 1;
                self.busy_ticks += 1;
                ctx.clock.tick(1)?;
                self.retire_or_preempt(ctx, key, at, &mut events)?;
            }
            None => {
                ctx.clock.tick(1)?;
                self.idle_ticks += 1;
                events.push(CpuEvent::Idle { at });
            }
        }

        // A process re-queued in this tick still held the CPU for it.
        ctx.charge_waiting(ran);

        self.observer.observe(ctx, self.current);
        for event in &events {
            trace!("t={at} {event:?}");
        }
        Ok(events)
    }

    fn dispatch(
        &mut self,
        ctx: &mut KernelCtx,
        at: Ticks,
        events: &mut Vec<CpuEvent>,
    ) -> Result<()> {
        let ready = ctx.ready_infos();
        let key = self.scheduler.select(&ready, at)?;
        // Fails with NotFound if the policy returned something it was not offered.
        ctx.ready.remove(key)?;

        self.context_switches += 1;
        self.ticks_in_current_quantum = 0;

        let process = ctx.process_mut(key);
        process.start_execution(at)?;
        self.current = Some(key);

        debug!(
            "t={at} {} dispatched pid {} ({} left in queue)",
            self.scheduler.name(),
            process.pid(),
            ready.len() - 1
        );
        events.push(CpuEvent::Dispatched {
            pid: process.pid(),
            at,
        });
        Ok(())
    }

    fn retire_or_preempt(
        &mut self,
        ctx: &mut KernelCtx,
        key: ProcessKey,
        at: Ticks,
        events: &mut Vec<CpuEvent>,
    ) -> Result<()> {
        let ran = self.ticks_in_current_quantum;
        let now = ctx.now();
        let process = ctx.process_mut(key);
        let pid = process.pid();

        let burst_done = process.is_burst_complete();
        let quantum_expired = ran >= self.time_quantum;
        if !burst_done && !quantum_expired {
            return Ok(());
        }

        if burst_done {
            process.complete_burst(ran);
            events.push(CpuEvent::BurstCompleted { pid, ran, at });
        } else {
            process.record_preemption(ran);
            debug!("t={at} pid {pid} preempted after {ran} ticks");
            events.push(CpuEvent::Preempted { pid, ran, at });
        }

        if process.has_more_work() {
            ctx.requeue(key)?;
            events.push(CpuEvent::Requeued { pid, at });
        } else {
            process.terminate(now)?;
            debug!("t={at} pid {pid} terminated at {now}");
            events.push(CpuEvent::Terminated { pid, at });
        }

        self.current = None;
        self.ticks_in_current_quantum = 0;
        Ok(())
    }

    pub fn current(&self) -> Option<ProcessKey> {
        self.current
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn time_quantum(&self) -> Ticks {
        self.time_quantum
    }

    pub fn context_switches(&self) -> u64 {
        self.context_switches
    }

    pub fn ticks_in_current_quantum(&self) -> Ticks {
        self.ticks_in_current_quantum
    }

    pub fn idle_ticks(&self) -> Ticks {
        self.idle_ticks
    }

    pub fn busy_ticks(&self) -> Ticks {
        self.busy_ticks
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
