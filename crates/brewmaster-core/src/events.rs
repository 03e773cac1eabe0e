use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the system produces an Event.
/// The CLI prints them; a GUI front end would subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The brewing flow was entered with the current recipe.
    BrewingStarted {
        recipe_name: String,
        at: DateTime<Utc>,
    },
    SubstepCompleted {
        step_id: u32,
        substep_id: u32,
        at: DateTime<Utc>,
    },
    /// All substeps of a step are now complete.
    StepCompleted {
        step_id: u32,
        title: String,
        at: DateTime<Utc>,
    },
    ExperienceAwarded {
        points: u32,
        total: u32,
        at: DateTime<Utc>,
    },
    LevelUp {
        level: u32,
        at: DateTime<Utc>,
    },
    AchievementUnlocked {
        name: String,
        at: DateTime<Utc>,
    },
    TimerStarted {
        step_id: u32,
        substep_id: u32,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// A running timer was superseded or torn down. Carries no award.
    TimerCancelled {
        step_id: u32,
        substep_id: u32,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// A running timer counted down to zero naturally.
    TimerExpired {
        step_id: u32,
        substep_id: u32,
        at: DateTime<Utc>,
    },
    RecipeSaved {
        name: String,
        at: DateTime<Utc>,
    },
    RecipeImported {
        name: String,
        at: DateTime<Utc>,
    },
}
