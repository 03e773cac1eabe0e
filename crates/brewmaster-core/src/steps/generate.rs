//! The step generator: Recipe -> ordered list of brew steps.
//!
//! Pure, deterministic and total. Missing optional recipe fields fall back
//! to placeholder text, never to an error.

use crate::recipe::Recipe;

use super::{BrewStep, StepCategory, Substep};

pub(super) const STEP_TEMPERATURE_SETTING: u32 = 5;
pub(super) const STEP_MASHING: u32 = 9;
pub(super) const STEP_BOILING: u32 = 13;
pub(super) const STEP_FERMENTATION_MONITORING: u32 = 17;

/// Fixed wait while the kettle reaches mash temperature.
pub const MASH_TEMP_WAIT_SECS: u32 = 600;
/// Fixed pump off/on cycle interval during mashing.
pub const MASH_PUMP_CYCLE_SECS: u32 = 1200;

fn sub(id: u32, text: impl Into<String>) -> Substep {
    Substep {
        id,
        text: text.into(),
        completed: false,
        timer_duration: None,
    }
}

fn timed(id: u32, text: impl Into<String>, duration_secs: u32) -> Substep {
    Substep {
        id,
        text: text.into(),
        completed: false,
        timer_duration: Some(duration_secs),
    }
}

fn step(
    id: u32,
    title: &str,
    description: &str,
    category: StepCategory,
    substeps: Vec<Substep>,
) -> BrewStep {
    BrewStep {
        id,
        title: title.into(),
        description: description.into(),
        category,
        completed: false,
        substeps,
    }
}

/// Generate the full ordered step list for a recipe.
///
/// Always returns the same 17 stages; recipe values are interpolated into
/// the substep texts. Every substep starts incomplete, so re-invoking this
/// after a recipe edit deliberately discards prior progress.
pub fn generate_steps(recipe: &Recipe) -> Vec<BrewStep> {
    let malt_list = recipe.malt_summary();
    let hop_schedule = recipe.hop_schedule_summary();
    let water_liters = recipe.mash_water_liters();

    vec![
        step(
            1,
            "Preparation",
            "Book a room and prepare your equipment",
            StepCategory::Cleaning,
            vec![
                sub(1, "Book a room at kristianiabrygg.no"),
                sub(
                    2,
                    format!(
                        "Prepare your recipe for {} and gather ingredients",
                        recipe.name
                    ),
                ),
            ],
        ),
        step(
            2,
            "Cleaning",
            "Ensure all equipment is clean before brewing",
            StepCategory::Cleaning,
            vec![
                sub(1, "Check the pump for malt residue underneath"),
                sub(2, "Flush the pump hole for malt residue"),
                sub(3, "Brush the heating rods (can be done with fingers)"),
                sub(
                    4,
                    "Run Star-San solution (mixed with water) through the outlet",
                ),
            ],
        ),
        step(
            3,
            "Water Preparation",
            "Fill the brewing vessel with the right amount of water",
            StepCategory::Brewing,
            vec![
                sub(
                    1,
                    format!(
                        "Fill with {water_liters}L of water. The marks on the rod show 15L, 20L, \
                         25L. Always ensure heating rods are submerged."
                    ),
                ),
                sub(
                    2,
                    "Remove about 5L for mashing, to be added back during sparging.",
                ),
            ],
        ),
        step(
            4,
            "Malt Preparation",
            "Prepare the malts for brewing",
            StepCategory::Brewing,
            vec![sub(
                1,
                if malt_list.is_empty() {
                    "Grind the malt (note: 7-8kg is maximum malt capacity)".to_string()
                } else {
                    format!("Grind the malts: {malt_list} (note: 7-8kg is maximum malt capacity)")
                },
            )],
        ),
        step(
            STEP_TEMPERATURE_SETTING,
            "Temperature Setting",
            "Set and wait for the correct mashing temperature",
            StepCategory::Brewing,
            vec![
                sub(
                    1,
                    format!(
                        "Set temperature to {}\u{b0}C. Hold MANU (manual) and set temperature. \
                         H(eat), P(ump).",
                        recipe.mash_temp
                    ),
                ),
                timed(
                    2,
                    "Wait until temperature gauge shows set temperature. Temperature is accurate \
                     when pump is on. There's also a temperature gauge by the door.",
                    MASH_TEMP_WAIT_SECS,
                ),
                sub(
                    3,
                    "Note: P(ump) must be turned off and on a couple of times before you hear \
                     it's working properly.",
                ),
            ],
        ),
        step(
            6,
            "Mash Bucket Assembly - Part 1",
            "Prepare the mash bucket for mashing",
            StepCategory::Brewing,
            vec![
                sub(1, "Put red rubber gasket in the kettle"),
                sub(2, "Insert filter bottom with filter on top"),
                sub(3, "Push down the bottom with a metal spoon"),
            ],
        ),
        step(
            7,
            "Add Malt",
            "Add your malts to the mash bucket",
            StepCategory::Brewing,
            vec![
                sub(
                    1,
                    if malt_list.is_empty() {
                        "Add malt to the mash bucket".to_string()
                    } else {
                        format!("Add the malts to the mash bucket: {malt_list}")
                    },
                ),
                sub(
                    2,
                    "Note: Some malts (darker/more burnt) are added later in the process to \
                     avoid burning",
                ),
            ],
        ),
        step(
            8,
            "Mash Bucket Assembly - Part 2",
            "Complete the mash bucket assembly",
            StepCategory::Brewing,
            vec![
                sub(1, "Put on the (slightly larger) filter and the 'wheel'"),
                sub(2, "Screw on the side length pin"),
            ],
        ),
        step(
            STEP_MASHING,
            "Mashing Process",
            "Monitor and manage the mashing process",
            StepCategory::Brewing,
            vec![
                timed(
                    1,
                    "Every 20 minutes, turn off the pump (for 1 minute) and then turn it back \
                     on, so that the malt settles differently",
                    MASH_PUMP_CYCLE_SECS,
                ),
                sub(
                    2,
                    format!(
                        "When mashing is finished, check if gravity has reached target boil \
                         gravity of {}",
                        recipe.target_original_gravity
                    ),
                ),
                sub(
                    3,
                    format!(
                        "Set temperature to {}\u{b0}C for the boiling process",
                        recipe.boil_temp
                    ),
                ),
            ],
        ),
        step(
            10,
            "Prepare for Sparging",
            "Prepare the mash bucket for the sparging process",
            StepCategory::Brewing,
            vec![
                sub(1, "Remove top parts and rinse them as soon as possible"),
                sub(
                    2,
                    "Lift the bucket with metal rod (hook-like) onto metal rod 2 (square-like)",
                ),
            ],
        ),
        step(
            11,
            "Sparging",
            "Rinse the grains to extract remaining sugars",
            StepCategory::Brewing,
            vec![sub(
                1,
                "Sparge (rinse) over the malt until the bucket is approximately full",
            )],
        ),
        step(
            12,
            "Cleaning During Boil Preparation",
            "Clean equipment while water is heating up",
            StepCategory::Cleaning,
            vec![
                sub(1, "Clean the fermentation bucket and Cornelius keg"),
                sub(
                    2,
                    "Take malt bucket over another white bucket to drain it, then use white \
                     spade to throw all malt into food waste bags",
                ),
            ],
        ),
        step(
            STEP_BOILING,
            "Boiling",
            "Boil the wort and add hops according to schedule",
            StepCategory::Brewing,
            vec![
                timed(
                    1,
                    if hop_schedule.is_empty() {
                        format!(
                            "Boil for {} minutes (ADD HOPS according to schedule)",
                            recipe.boil_time
                        )
                    } else {
                        format!(
                            "Boil for {} minutes and add hops according to this schedule: \
                             {hop_schedule}",
                            recipe.boil_time
                        )
                    },
                    recipe.boil_time * 60,
                ),
                sub(
                    2,
                    "Note: The longer you boil hops, the more bitterness you get. The shorter, \
                     more aroma.",
                ),
                sub(
                    3,
                    "Note: Our machines are not as efficient as recipes assume. The water boils \
                     off less, so add about 3L less water in total.",
                ),
            ],
        ),
        step(
            14,
            "Cooling",
            "Cool the wort to pitching temperature",
            StepCategory::Brewing,
            vec![sub(
                1,
                "Cool to 20\u{b0}C (use temperature gauge, not the Speidel's)",
            )],
        ),
        step(
            15,
            "Transfer to Fermentation Vessel",
            "Transfer the cooled wort to the fermentation vessel",
            StepCategory::Brewing,
            vec![
                sub(1, "Transfer to Star-San sanitized fermentation bucket"),
                sub(
                    2,
                    format!("Add {} yeast and beer to the bucket", recipe.yeast),
                ),
                sub(3, "Attach lid, airlock (with Star-San) and red airlock lid"),
                sub(
                    4,
                    "Note: You should not ferment directly in Cornelius kegs because of sediment",
                ),
            ],
        ),
        step(
            16,
            "Cleaning Equipment",
            "Clean all equipment after brewing",
            StepCategory::Cleaning,
            vec![
                sub(
                    1,
                    "Clean equipment: Scrub gunk off all equipment with hot water",
                ),
                sub(
                    2,
                    "Before draining sediment from the Speidel into the drain, dilute it so it \
                     doesn't clog the drain",
                ),
                sub(
                    3,
                    "Clean Speidel: Brush off gunk, spray steel through the pump, turn upside down",
                ),
                sub(
                    4,
                    "Note on cleaning products: Powder (PBW) = strong, liquid = Star-San. \
                     Craftsan is the brand. Star-San needs to be diluted.",
                ),
            ],
        ),
        step(
            STEP_FERMENTATION_MONITORING,
            "Fermentation Monitoring",
            "Monitor the fermentation process",
            StepCategory::Fermentation,
            vec![
                sub(
                    1,
                    "After one week, check that it's fermenting (bubbles in airlock)",
                ),
                sub(
                    2,
                    "Check that there's still Star-San in the airlock (not evaporated), if so \
                     add more",
                ),
                sub(
                    3,
                    "Note: Cornelius keg connections: IN=TOP(gas), OUT=BOTTOM(liquid)",
                ),
                sub(
                    4,
                    "Note: Gas regulator valve: CLOCKWISE = more gas, COUNTER-CLOCKWISE = less gas",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{HopItem, HopUnit, MaltItem, MaltUnit};
    use crate::steps::{is_mastery_step, StepCategory};

    #[test]
    fn produces_seventeen_ordered_steps() {
        let steps = generate_steps(&Recipe::default());
        assert_eq!(steps.len(), 17);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.id, i as u32 + 1);
            assert!(!step.completed);
            assert!(step.substeps.iter().all(|s| !s.completed));
        }
    }

    #[test]
    fn only_the_designated_substeps_carry_timers() {
        let steps = generate_steps(&Recipe::default());
        let timers: Vec<_> = steps
            .iter()
            .flat_map(|s| s.substeps.iter().filter(|sub| sub.has_timer()))
            .collect();
        assert_eq!(timers.len(), 3);
        let boil = &generate_steps(&Recipe {
            boil_time: 60,
            ..Recipe::default()
        })[12];
        assert_eq!(boil.substeps[0].timer_duration, Some(3600));
    }

    #[test]
    fn fixed_timer_durations() {
        let steps = generate_steps(&Recipe::default());
        assert_eq!(steps[4].substeps[1].timer_duration, Some(MASH_TEMP_WAIT_SECS));
        assert_eq!(steps[8].substeps[0].timer_duration, Some(MASH_PUMP_CYCLE_SECS));
    }

    #[test]
    fn water_text_embeds_reduced_amount() {
        let recipe = Recipe {
            initial_water_amount: 25.0,
            ..Recipe::default()
        };
        let steps = generate_steps(&recipe);
        assert!(steps[2].substeps[0].text.contains("Fill with 22L of water"));
    }

    #[test]
    fn malt_and_hop_texts_interpolate() {
        let recipe = Recipe {
            malts: vec![MaltItem {
                name: "Pale".into(),
                amount: 4.5,
                unit: MaltUnit::Kg,
                timing: None,
            }],
            hops: vec![HopItem {
                name: "Saaz".into(),
                amount: 50.0,
                unit: HopUnit::G,
                timing: "60 min".into(),
            }],
            boil_time: 90,
            ..Recipe::default()
        };
        let steps = generate_steps(&recipe);
        assert!(steps[3].substeps[0]
            .text
            .contains("Grind the malts: 4.5kg of Pale"));
        let boil = &steps[12].substeps[0];
        assert!(boil.text.contains("Boil for 90 minutes"));
        assert!(boil.text.contains("50g of Saaz at 60 min"));
        assert_eq!(boil.timer_duration, Some(90 * 60));
    }

    #[test]
    fn blank_ingredients_fall_back_to_placeholders() {
        let recipe = Recipe::default(); // one blank malt and hop row
        let steps = generate_steps(&recipe);
        assert!(steps[3].substeps[0].text.starts_with("Grind the malt "));
        assert!(steps[12].substeps[0].text.contains("ADD HOPS"));
    }

    #[test]
    fn mastery_steps_are_the_designated_stages() {
        let steps = generate_steps(&Recipe::default());
        let mastery: Vec<&str> = steps
            .iter()
            .filter(|s| is_mastery_step(s.id))
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(
            mastery,
            vec![
                "Temperature Setting",
                "Mashing Process",
                "Boiling",
                "Fermentation Monitoring"
            ]
        );
    }

    #[test]
    fn categories_match_the_original_layout() {
        let steps = generate_steps(&Recipe::default());
        assert_eq!(steps[0].category, StepCategory::Cleaning);
        assert_eq!(steps[1].category, StepCategory::Cleaning);
        assert_eq!(steps[11].category, StepCategory::Cleaning);
        assert_eq!(steps[15].category, StepCategory::Cleaning);
        assert_eq!(steps[16].category, StepCategory::Fermentation);
        assert!(steps
            .iter()
            .filter(|s| ![1, 2, 12, 16, 17].contains(&s.id))
            .all(|s| s.category == StepCategory::Brewing));
    }
}
