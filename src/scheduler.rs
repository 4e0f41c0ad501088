use crate::error::{SidleError, SidleResult};
use crate::sequence::{Sequence, Step};

/// Outcome of one scheduler tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerStatus {
    /// A pending wait deadline has not been reached; the sequence was not
    /// resumed this tick.
    Waiting,
    /// The sequence was resumed once.
    Resumed,
    /// The sequence has ended, or the scheduler halted on a fault; it will
    /// never be resumed again.
    Finished,
}

/// Drives a [`Sequence`] from an external per-frame tick, tracking elapsed
/// wall-clock time since start and honoring yielded wait requests.
pub struct Scheduler<S> {
    sequence: S,
    started_at: f64,
    /// Elapsed-seconds deadline of the pending wait, if any.
    wait_until: Option<f64>,
    finished: bool,
}

impl<S: Sequence> Scheduler<S> {
    /// `now` becomes the zero point for elapsed-time bookkeeping.
    pub fn new(sequence: S, now: f64) -> Self {
        Self {
            sequence,
            started_at: now,
            wait_until: None,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn sequence_mut(&mut self) -> &mut S {
        &mut self.sequence
    }

    /// Advance by one tick at wall-clock time `now`.
    ///
    /// Resumes the sequence at most once. A yielded wait the scheduler
    /// cannot honor is an author error in the sequence body; it halts the
    /// scheduler permanently and surfaces the fault.
    pub fn tick(&mut self, now: f64) -> SidleResult<SchedulerStatus> {
        if self.finished {
            return Ok(SchedulerStatus::Finished);
        }

        let elapsed = now - self.started_at;
        if let Some(deadline) = self.wait_until
            && elapsed < deadline
        {
            return Ok(SchedulerStatus::Waiting);
        }

        match self.sequence.resume() {
            Some(Step::Wait(secs)) => {
                if !secs.is_finite() || secs < 0.0 {
                    self.finished = true;
                    return Err(SidleError::scheduler(format!(
                        "sequence yielded a wait of {secs} seconds, which cannot be honored"
                    )));
                }
                self.wait_until = Some(elapsed + secs);
                Ok(SchedulerStatus::Resumed)
            }
            Some(Step::NextTick) => {
                self.wait_until = None;
                Ok(SchedulerStatus::Resumed)
            }
            None => {
                self.finished = true;
                Ok(SchedulerStatus::Finished)
            }
        }
    }
}
