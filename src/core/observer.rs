use super::{
    process::ProcessState,
    state::{KernelCtx, ProcessKey},
};

/// Re-checks structural invariants after each tick (debug builds only).
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &KernelCtx, current: Option<ProcessKey>) {
        self.step += 1;

        if let Some(key) = current {
            let process = ctx.process(key);
            debug_assert_eq!(
                process.state(),
                ProcessState::Running,
                "CPU current process {} must be Running",
                process.pid()
            );
            debug_assert!(
                !ctx.ready.contains(key),
                "Running process {} must not be in the ready queue",
                process.pid()
            );
        }

        for key in ctx.ready.iter() {
            let process = ctx.process(key);
            debug_assert_eq!(
                process.state(),
                ProcessState::Ready,
                "Queued process {} must be Ready",
                process.pid()
            );
            debug_assert!(
                ctx.ready.contains(key),
                "Ready queue membership index lost process {}",
                process.pid()
            );
        }

        for process in ctx.processes() {
            debug_assert!(
                process.total_cpu_time() >= process.history().iter().sum::<u64>(),
                "Process {} history exceeds executed ticks",
                process.pid()
            );
        }
    }
}
