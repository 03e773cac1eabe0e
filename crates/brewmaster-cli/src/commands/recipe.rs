//! Recipe management CLI commands.
//!
//! Edits apply to the working recipe inside the persisted session; every
//! edit regenerates the step list (and so resets step completion). Saved
//! recipes live in their own store, keyed by exact name.

use clap::Subcommand;

use brewmaster_core::{
    generate_share_code, import_recipe, Config, HopItem, HopUnit, MaltItem, MaltUnit, Recipe,
    RecipeStore,
};

use super::{load_session, print_events};

#[derive(Subcommand)]
pub enum RecipeAction {
    /// Show the working recipe summary
    Show,
    /// Replace the working recipe with a fresh one from configured defaults
    Init {
        /// Recipe name
        name: Option<String>,
    },
    /// Set a scalar recipe field
    ///
    /// Fields: name, yeast, mash-temp, boil-temp, boil-time, og, fg,
    /// water, notes
    Set {
        /// Field to set
        field: String,
        /// New value
        value: String,
    },
    /// Add a malt entry
    AddMalt {
        /// Malt name
        name: String,
        /// Amount in the given unit
        amount: f64,
        /// Unit: kg or g
        #[arg(long, default_value = "kg")]
        unit: String,
        /// Optional timing note (e.g. "last 15 min")
        #[arg(long)]
        timing: Option<String>,
    },
    /// Remove a malt entry by position (1-based)
    RemoveMalt {
        index: usize,
    },
    /// Add a hop entry
    AddHop {
        /// Hop name
        name: String,
        /// Amount in the given unit
        amount: f64,
        /// Unit: g, kg or oz
        #[arg(long, default_value = "g")]
        unit: String,
        /// When to add during the boil (e.g. "60 min")
        #[arg(long)]
        timing: String,
    },
    /// Remove a hop entry by position (1-based)
    RemoveHop {
        index: usize,
    },
    /// Save the working recipe to the saved list (upsert by name)
    Save,
    /// List saved recipes
    List,
    /// Load a saved recipe into the session
    Load {
        /// Recipe name (exact match)
        name: String,
    },
    /// Delete a saved recipe
    Delete {
        /// Recipe name (exact match)
        name: String,
    },
    /// Print a share code for the working recipe
    Share,
    /// Import a recipe from a share code
    Import {
        /// The share code
        code: String,
    },
}

pub fn run(action: RecipeAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RecipeAction::Show => show(),
        RecipeAction::Init { name } => init(name),
        RecipeAction::Set { field, value } => set_field(field, value),
        RecipeAction::AddMalt {
            name,
            amount,
            unit,
            timing,
        } => add_malt(name, amount, unit, timing),
        RecipeAction::RemoveMalt { index } => remove_malt(index),
        RecipeAction::AddHop {
            name,
            amount,
            unit,
            timing,
        } => add_hop(name, amount, unit, timing),
        RecipeAction::RemoveHop { index } => remove_hop(index),
        RecipeAction::Save => save(),
        RecipeAction::List => list(),
        RecipeAction::Load { name } => load(name),
        RecipeAction::Delete { name } => delete(name),
        RecipeAction::Share => share(),
        RecipeAction::Import { code } => import(code),
    }
}

fn show() -> Result<(), Box<dyn std::error::Error>> {
    let (_, session) = load_session()?;
    print_recipe(&session.recipe);
    Ok(())
}

fn print_recipe(recipe: &Recipe) {
    let name = if recipe.name.is_empty() {
        "(unnamed)"
    } else {
        &recipe.name
    };
    println!("Recipe: {name}");
    println!();

    println!("  Malts:");
    let mut any = false;
    for malt in recipe.named_malts() {
        println!("    {}: {} {}", malt.name, malt.amount, malt.unit);
        any = true;
    }
    if !any {
        println!("    (none specified)");
    }

    println!("  Hops:");
    any = false;
    for hop in recipe.named_hops() {
        println!("    {}: {} {} at {}", hop.name, hop.amount, hop.unit, hop.timing);
        any = true;
    }
    if !any {
        println!("    (none specified)");
    }

    let yeast = if recipe.yeast.is_empty() {
        "not specified"
    } else {
        &recipe.yeast
    };
    println!("  Yeast: {yeast}");
    println!("  Water: {}L (actual fill: {}L)", recipe.initial_water_amount, recipe.mash_water_liters());
    println!("  Mash: {}\u{b0}C  Boil: {}\u{b0}C for {} min", recipe.mash_temp, recipe.boil_temp, recipe.boil_time);
    println!(
        "  OG: {}  FG: {}  Est. ABV: {:.1}%",
        recipe.target_original_gravity,
        recipe.target_final_gravity,
        recipe.estimated_abv()
    );
    if recipe.exceeds_malt_capacity() {
        println!(
            "  Warning: total malt weight ({:.2} kg) exceeds maximum capacity (8kg)",
            recipe.total_malt_weight_kg()
        );
    }
    if let Some(notes) = &recipe.notes {
        println!("  Notes: {notes}");
    }
}

fn init(name: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut session) = load_session()?;
    let config = Config::load_or_default();
    session.set_recipe(config.new_recipe(name.as_deref().unwrap_or("")));
    store.save(&session)?;
    println!("working recipe reset to defaults");
    Ok(())
}

fn set_field(field: String, value: String) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut session) = load_session()?;
    let mut recipe = session.recipe.clone();
    match field.as_str() {
        "name" => recipe.name = value,
        "yeast" => recipe.yeast = value,
        "notes" => recipe.notes = if value.is_empty() { None } else { Some(value) },
        "mash-temp" => recipe.mash_temp = value.parse()?,
        "boil-temp" => recipe.boil_temp = value.parse()?,
        "boil-time" => recipe.boil_time = value.parse()?,
        "og" => recipe.target_original_gravity = value.parse()?,
        "fg" => recipe.target_final_gravity = value.parse()?,
        "water" => recipe.initial_water_amount = value.parse()?,
        other => return Err(format!("unknown recipe field: {other}").into()),
    }
    session.set_recipe(recipe);
    store.save(&session)?;
    println!("ok (steps regenerated, completion reset)");
    Ok(())
}

fn parse_malt_unit(unit: &str) -> Result<MaltUnit, Box<dyn std::error::Error>> {
    match unit {
        "kg" => Ok(MaltUnit::Kg),
        "g" => Ok(MaltUnit::G),
        other => Err(format!("unknown malt unit: {other} (expected kg or g)").into()),
    }
}

fn parse_hop_unit(unit: &str) -> Result<HopUnit, Box<dyn std::error::Error>> {
    match unit {
        "g" => Ok(HopUnit::G),
        "kg" => Ok(HopUnit::Kg),
        "oz" => Ok(HopUnit::Oz),
        other => Err(format!("unknown hop unit: {other} (expected g, kg or oz)").into()),
    }
}

fn add_malt(
    name: String,
    amount: f64,
    unit: String,
    timing: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut session) = load_session()?;
    let unit = parse_malt_unit(&unit)?;
    session.edit_recipe(|r| {
        // Replace the blank placeholder row if it's still there.
        r.malts.retain(|m| !m.name.trim().is_empty());
        r.malts.push(MaltItem {
            name,
            amount,
            unit,
            timing,
        });
    });
    if session.recipe.exceeds_malt_capacity() {
        eprintln!(
            "warning: total malt weight ({:.2} kg) exceeds maximum capacity (8kg)",
            session.recipe.total_malt_weight_kg()
        );
    }
    store.save(&session)?;
    println!("ok");
    Ok(())
}

fn remove_malt(index: usize) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut session) = load_session()?;
    if index == 0 || index > session.recipe.malts.len() {
        return Err(format!("no malt at position {index}").into());
    }
    session.edit_recipe(|r| {
        r.malts.remove(index - 1);
    });
    store.save(&session)?;
    println!("ok");
    Ok(())
}

fn add_hop(
    name: String,
    amount: f64,
    unit: String,
    timing: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut session) = load_session()?;
    let unit = parse_hop_unit(&unit)?;
    session.edit_recipe(|r| {
        r.hops.retain(|h| !h.name.trim().is_empty());
        r.hops.push(HopItem {
            name,
            amount,
            unit,
            timing,
        });
    });
    store.save(&session)?;
    println!("ok");
    Ok(())
}

fn remove_hop(index: usize) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut session) = load_session()?;
    if index == 0 || index > session.recipe.hops.len() {
        return Err(format!("no hop at position {index}").into());
    }
    session.edit_recipe(|r| {
        r.hops.remove(index - 1);
    });
    store.save(&session)?;
    println!("ok");
    Ok(())
}

fn save() -> Result<(), Box<dyn std::error::Error>> {
    let (session_store, mut session) = load_session()?;
    if session.recipe.name.trim().is_empty() {
        return Err("working recipe has no name; set one with `recipe set name <name>`".into());
    }
    let store = RecipeStore::open()?;
    store.upsert(session.recipe.clone())?;
    let events = session.record_recipe_saved();
    session_store.save(&session)?;
    println!("saved '{}'", session.recipe.name);
    print_events(&events)
}

fn list() -> Result<(), Box<dyn std::error::Error>> {
    let store = RecipeStore::open()?;
    let recipes = store.load_all()?;
    if recipes.is_empty() {
        println!("No saved recipes found.");
        return Ok(());
    }
    println!("Saved recipes ({}):", recipes.len());
    println!();
    for recipe in recipes {
        println!(
            "  {} ({} malts, {} hops, est. ABV {:.1}%)",
            recipe.name,
            recipe.named_malts().count(),
            recipe.named_hops().count(),
            recipe.estimated_abv()
        );
    }
    Ok(())
}

fn load(name: String) -> Result<(), Box<dyn std::error::Error>> {
    let (session_store, mut session) = load_session()?;
    let store = RecipeStore::open()?;
    let recipe = store.find(&name)?;
    session.set_recipe(recipe);
    session_store.save(&session)?;
    println!("loaded '{name}' (steps regenerated, completion reset)");
    Ok(())
}

fn delete(name: String) -> Result<(), Box<dyn std::error::Error>> {
    let store = RecipeStore::open()?;
    store.delete(&name)?;
    println!("deleted '{name}'");
    Ok(())
}

fn share() -> Result<(), Box<dyn std::error::Error>> {
    let (_, session) = load_session()?;
    let code = generate_share_code(&session.recipe)?;
    println!("{code}");
    Ok(())
}

fn import(code: String) -> Result<(), Box<dyn std::error::Error>> {
    let (session_store, mut session) = load_session()?;
    // A failed decode must leave prior state untouched.
    let recipe = import_recipe(&code)?;
    let name = recipe.name.clone();
    session.set_recipe(recipe);
    let events = session.record_recipe_imported();
    session_store.save(&session)?;
    println!("imported '{name}'");
    print_events(&events)
}
