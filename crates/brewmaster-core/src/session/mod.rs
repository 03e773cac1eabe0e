//! The brew session: single owner of all mutable brewing state.
//!
//! Holds the working recipe, the generated step list, the progress tracker
//! and the countdown timer slot. Components stay near-pure; the session is
//! the only place that wires their side effects together.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::events::Event;
use crate::progress::ProgressTracker;
use crate::recipe::Recipe;
use crate::steps::{self, generate_steps, BrewStep, CategoryFilter};
use crate::timer::CountdownTimer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrewSession {
    pub recipe: Recipe,
    pub steps: Vec<BrewStep>,
    pub tracker: ProgressTracker,
    /// In-flight timers do not survive a reload: the slot is skipped on
    /// serialization and comes back empty.
    #[serde(skip)]
    pub timer: CountdownTimer,
}

impl BrewSession {
    /// Create a session for a recipe, generating the step list up front.
    pub fn new(recipe: Recipe) -> Self {
        let steps = generate_steps(&recipe);
        Self {
            recipe,
            steps,
            tracker: ProgressTracker::new(),
            timer: CountdownTimer::new(),
        }
    }

    // ── Recipe edits ─────────────────────────────────────────────────

    /// Replace the working recipe and regenerate the step list.
    ///
    /// Regeneration is a full replace: all completion state is discarded.
    /// Recipe edits invalidate progress by design. Experience, level and
    /// achievements are untouched.
    pub fn set_recipe(&mut self, recipe: Recipe) {
        self.recipe = recipe;
        self.steps = generate_steps(&self.recipe);
    }

    /// Apply an in-place edit to the working recipe, then regenerate.
    pub fn edit_recipe(&mut self, edit: impl FnOnce(&mut Recipe)) {
        edit(&mut self.recipe);
        self.steps = generate_steps(&self.recipe);
    }

    // ── Brewing flow ─────────────────────────────────────────────────

    /// Enter the brewing flow: regenerate steps from the current recipe and
    /// award the start bonus.
    pub fn start_brewing(&mut self) -> Vec<Event> {
        self.steps = generate_steps(&self.recipe);
        let mut events = vec![Event::BrewingStarted {
            recipe_name: self.recipe.name.clone(),
            at: chrono::Utc::now(),
        }];
        events.extend(self.tracker.record_brew_started());
        events
    }

    pub fn complete_substep(&mut self, step_id: u32, substep_id: u32) -> Vec<Event> {
        self.tracker
            .mark_substep_complete(&mut self.steps, step_id, substep_id)
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// Start the countdown for a timer-eligible substep, replacing any
    /// running timer.
    pub fn start_timer(&mut self, step_id: u32, substep_id: u32) -> Result<Vec<Event>, CoreError> {
        let step = self
            .steps
            .iter()
            .find(|s| s.id == step_id)
            .ok_or(CoreError::StepNotFound(step_id))?;
        let substep = step
            .substep(substep_id)
            .ok_or(CoreError::SubstepNotFound { step_id, substep_id })?;
        let duration = substep
            .timer_duration
            .ok_or(CoreError::NoTimer { step_id, substep_id })?;
        Ok(self.timer.start(step_id, substep_id, duration))
    }

    /// Advance the countdown by one second. A natural expiry awards the
    /// timer bonus; the engine itself never touches experience.
    pub fn tick_timer(&mut self) -> Vec<Event> {
        match self.timer.tick() {
            Some(expired) => {
                let mut events = vec![expired];
                events.extend(self.tracker.record_timer_expired());
                events
            }
            None => Vec::new(),
        }
    }

    /// Tear down a running countdown without expiry side effects.
    pub fn cancel_timer(&mut self) -> Option<Event> {
        self.timer.cancel()
    }

    // ── Persistence side effects ─────────────────────────────────────

    /// The working recipe was written to the saved list. Reported on every
    /// save; the XP/achievement award behind it fires on the first only.
    pub fn record_recipe_saved(&mut self) -> Vec<Event> {
        let mut events = vec![Event::RecipeSaved {
            name: self.recipe.name.clone(),
            at: chrono::Utc::now(),
        }];
        events.extend(self.tracker.record_recipe_saved());
        events
    }

    /// A share code was decoded into the working recipe.
    pub fn record_recipe_imported(&mut self) -> Vec<Event> {
        let mut events = vec![Event::RecipeImported {
            name: self.recipe.name.clone(),
            at: chrono::Utc::now(),
        }];
        events.extend(self.tracker.record_recipe_imported());
        events
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Overall completion percentage over the full, unfiltered step list.
    pub fn brewing_progress(&self) -> u32 {
        steps::brewing_progress(&self.steps)
    }

    pub fn completed_step_count(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Steps visible under a category filter. Filtering is a view concern
    /// and never affects [`Self::brewing_progress`].
    pub fn steps_in(&self, filter: CategoryFilter) -> Vec<&BrewStep> {
        self.steps
            .iter()
            .filter(|s| filter.matches(s.category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::StepCategory;

    #[test]
    fn recipe_edit_regenerates_and_resets_progress() {
        let mut session = BrewSession::new(Recipe::default());
        session.complete_substep(1, 1);
        session.complete_substep(1, 2);
        assert!(session.steps[0].completed);
        let xp = session.tracker.experience();

        session.edit_recipe(|r| r.mash_temp = 65.0);
        assert!(session.steps.iter().all(|s| !s.completed));
        assert!(session
            .steps
            .iter()
            .flat_map(|s| &s.substeps)
            .all(|s| !s.completed));
        // Gamification state survives regeneration.
        assert_eq!(session.tracker.experience(), xp);
        assert!(session.steps[4].substeps[0].text.contains("65"));
    }

    #[test]
    fn category_filter_does_not_change_global_progress() {
        let mut session = BrewSession::new(Recipe::default());
        session.complete_substep(1, 1);
        session.complete_substep(1, 2);

        let visible = session.steps_in(CategoryFilter::Category(StepCategory::Fermentation));
        assert_eq!(visible.len(), 1);
        // 1 completed of 17 total -> 6%.
        assert_eq!(session.brewing_progress(), 6);
    }

    #[test]
    fn start_timer_rejects_untimed_substeps() {
        let mut session = BrewSession::new(Recipe::default());
        assert!(matches!(
            session.start_timer(1, 1),
            Err(CoreError::NoTimer { .. })
        ));
        assert!(matches!(
            session.start_timer(99, 1),
            Err(CoreError::StepNotFound(99))
        ));
        assert!(session.start_timer(5, 2).is_ok());
    }

    #[test]
    fn timer_expiry_awards_through_session() {
        let mut session = BrewSession::new(Recipe {
            boil_time: 1,
            ..Recipe::default()
        });
        session.start_timer(13, 1).unwrap();
        let mut expired = Vec::new();
        for _ in 0..60 {
            expired = session.tick_timer();
            if !expired.is_empty() {
                break;
            }
        }
        assert!(expired
            .iter()
            .any(|e| matches!(e, Event::TimerExpired { .. })));
        assert_eq!(
            session.tracker.experience(),
            crate::progress::TIMER_EXPIRY_XP
        );
    }

    #[test]
    fn save_and_import_always_report_the_recipe_event() {
        let mut session = BrewSession::new(Recipe {
            name: "Pils".into(),
            ..Recipe::default()
        });

        let first = session.record_recipe_saved();
        assert!(first
            .iter()
            .any(|e| matches!(e, Event::RecipeSaved { name, .. } if name == "Pils")));
        // A repeat save carries no award but still reports the save itself.
        let second = session.record_recipe_saved();
        assert_eq!(second.len(), 1);
        assert!(matches!(&second[0], Event::RecipeSaved { .. }));

        let imported = session.record_recipe_imported();
        assert!(imported
            .iter()
            .any(|e| matches!(e, Event::RecipeImported { name, .. } if name == "Pils")));
    }

    #[test]
    fn serialization_drops_in_flight_timer() {
        let mut session = BrewSession::new(Recipe::default());
        session.start_timer(5, 2).unwrap();
        let json = serde_json::to_string(&session).unwrap();
        let restored: BrewSession = serde_json::from_str(&json).unwrap();
        assert!(restored.timer.active().is_none());
    }
}
