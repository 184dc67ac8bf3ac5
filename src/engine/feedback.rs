//! Short-lived rejection feedback ("shake") owned by the caller.
//!
//! Each `raise` hands out a new generation and replaces any pending deadline,
//! so an older deadline can never end a newer signal.

use super::types::EngineEvent;
use std::time::{Duration, Instant};

pub const DEFAULT_FEEDBACK: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    generation: u64,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct FeedbackTimer {
    duration: Duration,
    pending: Option<Pending>,
    next_generation: u64,
}

impl Default for FeedbackTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK)
    }
}

impl FeedbackTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            pending: None,
            next_generation: 1,
        }
    }

    /// Show the signal until `now + duration`. Returns its generation.
    pub fn raise(&mut self, now: Instant) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.pending = Some(Pending {
            generation,
            deadline: now + self.duration,
        });
        generation
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Clear the signal once its deadline has passed. Returns the cleared generation.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        match self.pending {
            Some(p) if now >= p.deadline => {
                self.pending = None;
                Some(p.generation)
            }
            _ => None,
        }
    }

    /// Drop any pending signal. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Raise on wrong/illegal moves, cancel on restart.
    pub fn observe(&mut self, event: &EngineEvent, now: Instant) {
        if event.raises_feedback() {
            self.raise(now);
        } else if matches!(event, EngineEvent::Restarted) {
            self.cancel();
        }
    }
}
