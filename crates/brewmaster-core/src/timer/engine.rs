//! Timer engine implementation.
//!
//! A single-slot countdown state machine. It does not use internal threads -
//! the caller is responsible for calling `tick()` once per second of
//! wall-clock time while a timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle
//! ```
//!
//! Expiry is transient: when the countdown reaches zero, `tick()` emits the
//! expiry event and the slot returns to Idle in the same call. Starting a
//! timer while one is running cancels the prior one without side effects
//! (no partial credit, no carry-over).

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// The single system-wide countdown slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTimer {
    pub step_id: u32,
    pub substep_id: u32,
    pub time_left_secs: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountdownTimer {
    active: Option<ActiveTimer>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self { active: None }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.active.is_some() {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    pub fn active(&self) -> Option<&ActiveTimer> {
        self.active.as_ref()
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.active.as_ref().map(|t| t.time_left_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a countdown, replacing any running one. Last start wins; the
    /// superseded timer is reported as cancelled and awards nothing.
    pub fn start(&mut self, step_id: u32, substep_id: u32, duration_secs: u32) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(prev) = self.active.take() {
            events.push(Event::TimerCancelled {
                step_id: prev.step_id,
                substep_id: prev.substep_id,
                remaining_secs: prev.time_left_secs,
                at: Utc::now(),
            });
        }
        self.active = Some(ActiveTimer {
            step_id,
            substep_id,
            time_left_secs: duration_secs,
        });
        events.push(Event::TimerStarted {
            step_id,
            substep_id,
            duration_secs,
            at: Utc::now(),
        });
        events
    }

    /// Advance the countdown by one second. Returns the expiry event when
    /// the timer reaches zero, clearing the slot in the same call.
    pub fn tick(&mut self) -> Option<Event> {
        let timer = self.active.as_mut()?;
        timer.time_left_secs = timer.time_left_secs.saturating_sub(1);
        if timer.time_left_secs > 0 {
            return None;
        }
        self.active.take().map(|t| Event::TimerExpired {
            step_id: t.step_id,
            substep_id: t.substep_id,
            at: Utc::now(),
        })
    }

    /// Stop a running countdown without expiry side effects. Used when the
    /// surrounding view is torn down.
    pub fn cancel(&mut self) -> Option<Event> {
        self.active.take().map(|t| Event::TimerCancelled {
            step_id: t.step_id,
            substep_id: t.substep_id,
            remaining_secs: t.time_left_secs,
            at: Utc::now(),
        })
    }
}
