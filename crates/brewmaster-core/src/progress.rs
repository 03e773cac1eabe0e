//! Progress and gamification tracking.
//!
//! The tracker owns the experience/level/achievement state and applies
//! completion marks to a step list. Experience awards are fire-and-forget
//! side effects with no failure path; every change is reported as events.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::steps::{self, BrewStep};

/// Awarded when a step transitions from incomplete to complete.
pub const STEP_COMPLETION_XP: u32 = 25;
/// Awarded when a countdown reaches zero naturally.
pub const TIMER_EXPIRY_XP: u32 = 10;
/// Awarded when the brewing flow is started.
pub const BREW_START_XP: u32 = 5;
/// Awarded once, on the first recipe save.
pub const FIRST_SAVE_XP: u32 = 10;
/// Awarded on every successful recipe import.
pub const IMPORT_XP: u32 = 15;

const FIRST_BREW_ACHIEVEMENT: &str = "First Brew Started!";
const FIRST_SAVE_ACHIEVEMENT: &str = "First Recipe Saved!";
const IMPORT_ACHIEVEMENT: &str = "Recipe Imported!";

/// Experience, level and achievements.
///
/// `level` increases by exactly one whenever `experience >= level * 100`,
/// checked after every experience change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressTracker {
    experience: u32,
    level: u32,
    achievements: Vec<String>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            experience: 0,
            level: 1,
            achievements: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// XP needed to reach the next level.
    pub fn next_level_at(&self) -> u32 {
        self.level * 100
    }

    /// Achievements in insertion order.
    pub fn achievements(&self) -> &[String] {
        &self.achievements
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Mark a substep complete, recompute the owning step, and award
    /// experience on a step's incomplete -> complete transition.
    ///
    /// Unknown ids and already-completed substeps are no-ops: completion is
    /// one-way and must never double-award.
    pub fn mark_substep_complete(
        &mut self,
        steps: &mut [BrewStep],
        step_id: u32,
        substep_id: u32,
    ) -> Vec<Event> {
        let Some(step) = steps.iter_mut().find(|s| s.id == step_id) else {
            return Vec::new();
        };
        let Some(substep) = step.substeps.iter_mut().find(|s| s.id == substep_id) else {
            return Vec::new();
        };
        if substep.completed {
            return Vec::new();
        }
        substep.completed = true;

        let mut events = vec![Event::SubstepCompleted {
            step_id,
            substep_id,
            at: Utc::now(),
        }];

        let was_complete = step.completed;
        step.recompute_completed();
        if step.completed && !was_complete {
            events.push(Event::StepCompleted {
                step_id,
                title: step.title.clone(),
                at: Utc::now(),
            });
            let title = step.title.clone();
            events.extend(self.award(STEP_COMPLETION_XP));
            if steps::is_mastery_step(step_id) {
                events.extend(self.unlock_unique(format!("Master of {title}")));
            }
        }
        events
    }

    /// Entering the brewing flow: +5 XP, achievement on the first time.
    pub fn record_brew_started(&mut self) -> Vec<Event> {
        let mut events = self.award(BREW_START_XP);
        events.extend(self.unlock_unique(FIRST_BREW_ACHIEVEMENT.to_string()));
        events
    }

    /// A countdown reached zero naturally: +10 XP.
    pub fn record_timer_expired(&mut self) -> Vec<Event> {
        self.award(TIMER_EXPIRY_XP)
    }

    /// Recipe saved: +10 XP and an achievement, first save only.
    pub fn record_recipe_saved(&mut self) -> Vec<Event> {
        if self.achievements.iter().any(|a| a == FIRST_SAVE_ACHIEVEMENT) {
            return Vec::new();
        }
        let mut events = self.award(FIRST_SAVE_XP);
        events.extend(self.unlock_unique(FIRST_SAVE_ACHIEVEMENT.to_string()));
        events
    }

    /// Recipe imported successfully: +15 XP every time, achievement once.
    pub fn record_recipe_imported(&mut self) -> Vec<Event> {
        let mut events = self.award(IMPORT_XP);
        events.extend(self.unlock_unique(IMPORT_ACHIEVEMENT.to_string()));
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn award(&mut self, points: u32) -> Vec<Event> {
        self.experience += points;
        let mut events = vec![Event::ExperienceAwarded {
            points,
            total: self.experience,
            at: Utc::now(),
        }];
        // Single increment per check; a large grant crossing two thresholds
        // still levels up only once.
        if self.experience >= self.level * 100 {
            self.level += 1;
            self.achievements
                .push(format!("Reached Brewer Level {}!", self.level));
            events.push(Event::LevelUp {
                level: self.level,
                at: Utc::now(),
            });
        }
        events
    }

    fn unlock_unique(&mut self, name: String) -> Option<Event> {
        if self.achievements.iter().any(|a| *a == name) {
            return None;
        }
        self.achievements.push(name.clone());
        Some(Event::AchievementUnlocked {
            name,
            at: Utc::now(),
        })
    }
}
