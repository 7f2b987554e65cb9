//! Scoped wall-clock timing.
//!
//! Device work is usually asynchronous: a launch returns as soon as it is
//! queued. [`time_synchronized`] synchronizes the backend before taking the
//! second snapshot, so the measured span covers completion and not just
//! dispatch.

use std::time::{Duration, Instant};

use crate::backend::DeviceBackend;
use crate::error::Result;

/// A value together with the time it took to produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timed<T> {
    /// Produced value.
    pub value: T,
    /// Wall-clock span.
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Split into value and elapsed time.
    pub fn into_parts(self) -> (T, Duration) {
        (self.value, self.elapsed)
    }
}

/// Time `work` on `backend`, synchronizing before the clock stops.
pub fn time_synchronized<B, T, F>(backend: &B, work: F) -> Result<Timed<T>>
where
    B: DeviceBackend + ?Sized,
    F: FnOnce() -> Result<T>,
{
    let start = Instant::now();
    let value = work()?;
    backend.synchronize()?;
    Ok(Timed {
        value,
        elapsed: start.elapsed(),
    })
}

/// Time synchronous host work.
pub fn time_host<T, F>(work: F) -> Timed<T>
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = work();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}
