//! Recipe model: user-entered brewing parameters.
//!
//! The recipe is leaf data. It is mutated field-by-field through edits,
//! persisted on explicit save, and replaced wholesale on load/import.
//! Serde uses camelCase field names so share codes stay compatible with
//! recipes exported from the original web app.

pub mod share;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum malt the mash bucket can hold, in kilograms. Exceeding it is
/// advisory only and never blocks progression.
pub const MAX_MALT_CAPACITY_KG: f64 = 8.0;

/// Litres held back from the recipe's water amount (our machines boil off
/// less than recipes assume).
pub const WATER_REDUCTION_LITERS: f64 = 3.0;

/// Heating rods must stay submerged; never fill below this.
pub const MIN_WATER_LITERS: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaltUnit {
    Kg,
    G,
}

impl fmt::Display for MaltUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaltUnit::Kg => write!(f, "kg"),
            MaltUnit::G => write!(f, "g"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HopUnit {
    G,
    Kg,
    Oz,
}

impl fmt::Display for HopUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HopUnit::G => write!(f, "g"),
            HopUnit::Kg => write!(f, "kg"),
            HopUnit::Oz => write!(f, "oz"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaltItem {
    pub name: String,
    pub amount: f64,
    pub unit: MaltUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
}

impl Default for MaltItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount: 0.0,
            unit: MaltUnit::Kg,
            timing: None,
        }
    }
}

impl MaltItem {
    /// Weight in kilograms regardless of unit.
    pub fn weight_kg(&self) -> f64 {
        match self.unit {
            MaltUnit::Kg => self.amount,
            MaltUnit::G => self.amount / 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HopItem {
    pub name: String,
    pub amount: f64,
    pub unit: HopUnit,
    pub timing: String,
}

impl Default for HopItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount: 0.0,
            unit: HopUnit::G,
            timing: String::new(),
        }
    }
}

/// User-entered brewing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub malts: Vec<MaltItem>,
    pub hops: Vec<HopItem>,
    pub yeast: String,
    pub mash_temp: f64,
    pub boil_temp: f64,
    /// Boil duration in minutes.
    pub boil_time: u32,
    pub target_original_gravity: f64,
    pub target_final_gravity: f64,
    pub initial_water_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            name: String::new(),
            malts: vec![MaltItem::default()],
            hops: vec![HopItem::default()],
            yeast: String::new(),
            mash_temp: 67.0,
            boil_temp: 102.0,
            boil_time: 60,
            target_original_gravity: 1.050,
            target_final_gravity: 1.010,
            initial_water_amount: 25.0,
            notes: None,
        }
    }
}

impl Recipe {
    /// Actual litres to fill, after holding back [`WATER_REDUCTION_LITERS`]
    /// but never going below [`MIN_WATER_LITERS`].
    pub fn mash_water_liters(&self) -> f64 {
        (self.initial_water_amount - WATER_REDUCTION_LITERS).max(MIN_WATER_LITERS)
    }

    /// Total malt weight in kilograms across all entries.
    pub fn total_malt_weight_kg(&self) -> f64 {
        self.malts.iter().map(MaltItem::weight_kg).sum()
    }

    /// Whether the malt bill exceeds the mash bucket capacity.
    pub fn exceeds_malt_capacity(&self) -> bool {
        self.total_malt_weight_kg() > MAX_MALT_CAPACITY_KG
    }

    /// Estimated alcohol by volume from the target gravities, in percent.
    pub fn estimated_abv(&self) -> f64 {
        (self.target_original_gravity - self.target_final_gravity) * 131.25
    }

    /// Malt entries with a non-blank name.
    pub fn named_malts(&self) -> impl Iterator<Item = &MaltItem> {
        self.malts.iter().filter(|m| !m.name.trim().is_empty())
    }

    /// Hop entries with a non-blank name.
    pub fn named_hops(&self) -> impl Iterator<Item = &HopItem> {
        self.hops.iter().filter(|h| !h.name.trim().is_empty())
    }

    /// `"<amount><unit> of <name>[ at <timing>]"` for each named malt,
    /// joined by `", "`. Empty string when no malts are named.
    pub fn malt_summary(&self) -> String {
        self.named_malts()
            .map(|m| match &m.timing {
                Some(t) if !t.trim().is_empty() => {
                    format!("{}{} of {} at {}", m.amount, m.unit, m.name, t)
                }
                _ => format!("{}{} of {}", m.amount, m.unit, m.name),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `"<amount><unit> of <name> at <timing>"` for each named hop,
    /// joined by `", "`. Empty string when no hops are named.
    pub fn hop_schedule_summary(&self) -> String {
        self.named_hops()
            .map(|h| format!("{}{} of {} at {}", h.amount, h.unit, h.name, h.timing))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
