use crate::error::{Result, SimError};

use super::state::Ticks;

/// Logical tick counter. Only ever moves forward, except through `reset`.
#[derive(Debug, Default, Clone)]
pub struct Clock {
    time: Ticks,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` ticks and return the new time.
    pub fn tick(&mut self, delta: i64) -> Result<Ticks> {
        let delta = Ticks::try_from(delta).map_err(|_| SimError::InvalidArgument(delta))?;
        self.time = self.time.saturating_add(delta);
        Ok(self.time)
    }

    pub fn now(&self) -> Ticks {
        self.time
    }

    pub fn reset(&mut self) {
        self.time = 0;
    }
}
