pub mod driver;
pub mod stats;
pub mod workload;

pub use driver::{SimConfig, Simulator};
pub use stats::SimSummary;
pub use workload::{
    FixedSchedule, ProcessSpec, RandomWorkload, RandomWorkloadConfig, WorkloadSource,
};
