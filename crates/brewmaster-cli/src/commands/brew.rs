//! Brewing session CLI commands.

use clap::Subcommand;

use brewmaster_core::steps::brewing_tips;
use brewmaster_core::timer::format_time;
use brewmaster_core::{CategoryFilter, SessionStore};

use super::{load_session, print_events};

#[derive(Subcommand)]
pub enum BrewAction {
    /// Start the brewing flow: regenerate steps from the working recipe
    Start,
    /// Show overall progress, level, experience and achievements
    Status,
    /// List brew steps, optionally filtered by category
    Steps {
        /// Category filter: all, cleaning, brewing or fermentation
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
    },
    /// Mark a substep complete
    Complete {
        /// Step id (1-17)
        step: u32,
        /// Substep id within the step
        substep: u32,
    },
    /// List unlocked achievements
    Achievements,
    /// Show brewing pro-tips
    Tips,
    /// Clear the persisted session; the next command starts fresh
    Reset,
}

pub fn run(action: BrewAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        BrewAction::Start => start(),
        BrewAction::Status => status(),
        BrewAction::Steps { category } => steps(category),
        BrewAction::Complete { step, substep } => complete(step, substep),
        BrewAction::Achievements => achievements(),
        BrewAction::Tips => tips(),
        BrewAction::Reset => reset(),
    }
}

fn start() -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut session) = load_session()?;
    let events = session.start_brewing();
    store.save(&session)?;
    print_events(&events)
}

fn status() -> Result<(), Box<dyn std::error::Error>> {
    let (_, session) = load_session()?;
    println!("Brewing Progress: {}%", session.brewing_progress());
    println!(
        "Steps Completed: {}/{}",
        session.completed_step_count(),
        session.step_count()
    );
    println!("Level: {}", session.tracker.level());
    println!(
        "Experience: {}/{} XP",
        session.tracker.experience(),
        session.tracker.next_level_at()
    );
    Ok(())
}

fn steps(filter: CategoryFilter) -> Result<(), Box<dyn std::error::Error>> {
    let (_, session) = load_session()?;
    for step in session.steps_in(filter) {
        let mark = if step.completed { "x" } else { " " };
        println!("[{mark}] {:2}. {} ({})", step.id, step.title, step.category);
        println!("       {}", step.description);
        for substep in &step.substeps {
            let mark = if substep.completed { "x" } else { " " };
            match substep.timer_duration {
                Some(secs) => println!(
                    "   [{mark}] {}.{} {} [timer {}]",
                    step.id,
                    substep.id,
                    substep.text,
                    format_time(secs)
                ),
                None => println!("   [{mark}] {}.{} {}", step.id, substep.id, substep.text),
            }
        }
    }
    Ok(())
}

fn complete(step: u32, substep: u32) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut session) = load_session()?;
    let events = session.complete_substep(step, substep);
    store.save(&session)?;
    if events.is_empty() {
        println!("nothing to do (already complete or unknown id)");
    } else {
        print_events(&events)?;
    }
    Ok(())
}

fn achievements() -> Result<(), Box<dyn std::error::Error>> {
    let (_, session) = load_session()?;
    let achievements = session.tracker.achievements();
    if achievements.is_empty() {
        println!("No achievements yet. Keep brewing!");
        return Ok(());
    }
    for achievement in achievements {
        println!("  {achievement}");
    }
    Ok(())
}

fn tips() -> Result<(), Box<dyn std::error::Error>> {
    for (title, tip) in brewing_tips() {
        println!("{title}: {tip}");
    }
    Ok(())
}

fn reset() -> Result<(), Box<dyn std::error::Error>> {
    let store = SessionStore::open()?;
    store.clear()?;
    println!("session cleared");
    Ok(())
}
