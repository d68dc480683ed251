//! Error types for the simulator

use thiserror::Error;

use crate::core::{Pid, ProcessKey, ProcessState, Ticks};

/// Contract violations raised by the simulation core.
///
/// None of these are retried. A run that hits one aborts and hands the error
/// back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("invalid argument: clock cannot advance by {0} ticks")]
    InvalidArgument(i64),

    #[error("process {pid} is {state:?}: {reason}")]
    InvalidState {
        pid: Pid,
        state: ProcessState,
        reason: &'static str,
    },

    #[error("process {0:?} is not in the ready queue")]
    NotFound(ProcessKey),

    #[error("scheduler invoked on an empty ready set")]
    EmptySelection,

    #[error("process {0:?} is already in the ready queue")]
    AlreadyQueued(ProcessKey),

    #[error("pid {0} was already admitted")]
    DuplicatePid(Pid),

    #[error("process {pid} announced at t={now} but declares arrival_time={arrival_time}")]
    InvalidArrival {
        pid: Pid,
        arrival_time: Ticks,
        now: Ticks,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;
