pub mod brew;
pub mod config;
pub mod recipe;
pub mod timer;

use brewmaster_core::{BrewSession, Config, Event, SessionStore};

/// Load the persisted session, or start a fresh one from the configured
/// recipe defaults.
pub(crate) fn load_session() -> Result<(SessionStore, BrewSession), Box<dyn std::error::Error>> {
    let store = SessionStore::open()?;
    let session = store
        .load()
        .unwrap_or_else(|| BrewSession::new(Config::load_or_default().new_recipe("")));
    Ok((store, session))
}

/// Print each event as pretty JSON, the way state changes surface everywhere.
pub(crate) fn print_events(events: &[Event]) -> Result<(), Box<dyn std::error::Error>> {
    for event in events {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    Ok(())
}
