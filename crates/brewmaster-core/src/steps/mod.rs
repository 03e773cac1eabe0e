//! Brew step model and generation.
//!
//! A brew step is an ordered stage of the brewing day with checkable
//! substeps. The whole list is regenerated from the current recipe whenever
//! the recipe changes; regeneration always resets completion state.

mod generate;

pub use generate::generate_steps;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Step ids designated as mastery milestones. Completing every substep of
/// one of these grants a named achievement on top of the usual award.
pub const MASTERY_STEP_IDS: [u32; 4] = [
    generate::STEP_TEMPERATURE_SETTING,
    generate::STEP_MASHING,
    generate::STEP_BOILING,
    generate::STEP_FERMENTATION_MONITORING,
];

pub fn is_mastery_step(step_id: u32) -> bool {
    MASTERY_STEP_IDS.contains(&step_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepCategory {
    Cleaning,
    Brewing,
    Fermentation,
}

impl fmt::Display for StepCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepCategory::Cleaning => write!(f, "cleaning"),
            StepCategory::Brewing => write!(f, "brewing"),
            StepCategory::Fermentation => write!(f, "fermentation"),
        }
    }
}

/// View-side category filter. Filtering never affects the global progress
/// percentage, which is always computed over the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(StepCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: StepCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(c) => *c == category,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CategoryFilter::All),
            "cleaning" => Ok(CategoryFilter::Category(StepCategory::Cleaning)),
            "brewing" => Ok(CategoryFilter::Category(StepCategory::Brewing)),
            "fermentation" => Ok(CategoryFilter::Category(StepCategory::Fermentation)),
            other => Err(format!(
                "unknown category '{other}' (expected all, cleaning, brewing or fermentation)"
            )),
        }
    }
}

/// Smallest checkable unit of brewing instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substep {
    pub id: u32,
    pub text: String,
    pub completed: bool,
    /// Countdown duration in seconds; `Some` iff this substep carries a timer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_duration: Option<u32>,
}

impl Substep {
    pub fn has_timer(&self) -> bool {
        self.timer_duration.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrewStep {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: StepCategory,
    pub completed: bool,
    pub substeps: Vec<Substep>,
}

impl BrewStep {
    /// Re-derive `completed` from the substeps. Step completion is never
    /// stored independently of its substeps.
    pub fn recompute_completed(&mut self) {
        self.completed = self.substeps.iter().all(|s| s.completed);
    }

    pub fn substep(&self, substep_id: u32) -> Option<&Substep> {
        self.substeps.iter().find(|s| s.id == substep_id)
    }
}

/// Overall completion percentage over the full, unfiltered step list,
/// rounded to the nearest integer.
pub fn brewing_progress(steps: &[BrewStep]) -> u32 {
    if steps.is_empty() {
        return 0;
    }
    let completed = steps.iter().filter(|s| s.completed).count();
    ((completed as f64 / steps.len() as f64) * 100.0).round() as u32
}

/// Static pro-tips shown alongside the guide.
pub fn brewing_tips() -> [(&'static str, &'static str); 4] {
    [
        ("Temperature Control", "Hold MANU + adjust temp (H=heat, P=pump)"),
        ("Pump Operation", "Multiple activations needed for optimal function"),
        ("Cornelius Keg", "Gas: TOP, Liquid: BOTTOM"),
        ("Gas Regulation", "Clockwise = more, Counter-clockwise = less"),
    ]
}
