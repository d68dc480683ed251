pub mod clock;
pub mod cpu;
pub mod event;
pub mod observer;
pub mod process;
pub mod ready_queue;
pub mod state;

pub use clock::Clock;
pub use cpu::Cpu;
pub use event::CpuEvent;
pub use process::{Process, ProcessInfo, ProcessState};
pub use ready_queue::ReadyQueue;
pub use state::{KernelCtx, Pid, ProcessKey, Ticks};
