//! Countdown timer CLI commands.
//!
//! The countdown runs in-process at a 1-second cadence. Killing the process
//! mid-count cancels it: the timer slot is never persisted, so no expiry
//! side effects can leak from an abandoned countdown.

use std::io::Write;
use std::time::Duration;

use clap::Subcommand;

use brewmaster_core::timer::format_time;
use brewmaster_core::TimerState;

use super::{load_session, print_events};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the countdown for a timer-eligible substep to completion
    Start {
        /// Step id (1-17)
        step: u32,
        /// Substep id within the step
        substep: u32,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Start { step, substep } => start(step, substep),
    }
}

fn start(step: u32, substep: u32) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut session) = load_session()?;
    let events = session.start_timer(step, substep)?;
    print_events(&events)?;

    while session.timer.state() == TimerState::Running {
        if let Some(remaining) = session.timer.remaining_secs() {
            print!("\r{} remaining ", format_time(remaining));
            std::io::stdout().flush()?;
        }
        std::thread::sleep(Duration::from_secs(1));
        let events = session.tick_timer();
        if !events.is_empty() {
            println!();
            // Audible cue on natural expiry.
            print!("\x07");
            print_events(&events)?;
            store.save(&session)?;
        }
    }
    Ok(())
}
