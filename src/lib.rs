pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use error::{Result, SimError};
pub use scheduler::Scheduler;
pub use sim::{SimConfig, Simulator};
