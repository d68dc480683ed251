use std::collections::BTreeMap;

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Exp};

use crate::{
    core::{Pid, Process, Ticks},
    error::{Result, SimError},
};

/// Supplies the processes that arrive at a given tick.
///
/// Every process is announced exactly once, with `arrival_time == now` and a
/// pid never used before.
pub trait WorkloadSource {
    fn arrivals(&mut self, now: Ticks) -> Result<Vec<Process>>;

    /// True once no further arrivals can ever happen. Sources with an
    /// unbounded future keep the default.
    fn exhausted(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomWorkloadConfig {
    /// Chance of one arrival per tick
    pub arrival_probability: f64,
    pub max_bursts: u32,
    /// Mean of the exponential burst-length distribution
    pub avg_burst_time: f64,
    pub seed: u64,
}

impl Default for RandomWorkloadConfig {
    fn default() -> Self {
        Self {
            arrival_probability: 0.3,
            max_bursts: 5,
            avg_burst_time: 5.0,
            seed: 42,
        }
    }
}

impl RandomWorkloadConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.arrival_probability) {
            return Err(SimError::InvalidConfig(format!(
                "arrival probability {} outside [0, 1]",
                self.arrival_probability
            )));
        }
        if self.max_bursts == 0 {
            return Err(SimError::InvalidConfig(
                "max bursts must be at least 1".to_string(),
            ));
        }
        if !self.avg_burst_time.is_finite() || self.avg_burst_time <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "average burst time {} must be positive",
                self.avg_burst_time
            )));
        }
        Ok(())
    }
}

/// Bernoulli arrivals with exponentially distributed burst lengths, driven by
/// a privately owned seeded RNG.
#[derive(Debug)]
pub struct RandomWorkload {
    config: RandomWorkloadConfig,
    rng: StdRng,
    burst_len: Exp<f64>,
    last_pid: Pid,
}

impl RandomWorkload {
    pub fn new(config: RandomWorkloadConfig) -> Result<Self> {
        config.validate()?;
        let burst_len = Exp::new(1.0 / config.avg_burst_time)
            .map_err(|e| SimError::InvalidConfig(format!("burst distribution: {e}")))?;
        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            burst_len,
            last_pid: 0,
        })
    }

    pub fn config(&self) -> &RandomWorkloadConfig {
        &self.config
    }

    fn create_process(&mut self, arrival_time: Ticks) -> Result<Process> {
        self.last_pid += 1;

        let num_bursts = self.rng.random_range(1..=self.config.max_bursts);
        let bursts = (0..num_bursts)
            .map(|_| (self.burst_len.sample(&mut self.rng) as Ticks).max(1))
            .collect();
        let priority = self.rng.random_range(0..=3);

        Process::new(self.last_pid, arrival_time, bursts, priority)
    }
}

impl WorkloadSource for RandomWorkload {
    fn arrivals(&mut self, now: Ticks) -> Result<Vec<Process>> {
        if self.rng.random::<f64>() < self.config.arrival_probability {
            Ok(vec![self.create_process(now)?])
        } else {
            Ok(Vec::new())
        }
    }
}

/// One fully specified process for a [`FixedSchedule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub arrival_time: Ticks,
    pub bursts: Vec<Ticks>,
    pub priority: u32,
}

/// A predetermined workload. Pids are handed out in insertion order, starting
/// at 1; each arrival is removed once announced.
#[derive(Debug, Default)]
pub struct FixedSchedule {
    by_time: BTreeMap<Ticks, Vec<Process>>,
    last_pid: Pid,
}

impl FixedSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs(specs: impl IntoIterator<Item = ProcessSpec>) -> Result<Self> {
        let mut schedule = Self::new();
        for spec in specs {
            schedule.push(spec.arrival_time, spec.bursts, spec.priority)?;
        }
        Ok(schedule)
    }

    pub fn push(&mut self, arrival_time: Ticks, bursts: Vec<Ticks>, priority: u32) -> Result<Pid> {
        let pid = self.last_pid + 1;
        let process = Process::new(pid, arrival_time, bursts, priority)?;
        self.last_pid = pid;
        self.by_time.entry(arrival_time).or_default().push(process);
        Ok(pid)
    }

    pub fn pending(&self) -> usize {
        self.by_time.values().map(Vec::len).sum()
    }
}

impl WorkloadSource for FixedSchedule {
    fn arrivals(&mut self, now: Ticks) -> Result<Vec<Process>> {
        Ok(self.by_time.remove(&now).unwrap_or_default())
    }

    fn exhausted(&self) -> bool {
        self.by_time.is_empty()
    }
}
