//! # BrewMaster Core Library
//!
//! This library provides the core business logic for the BrewMaster brewing
//! guide. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary; any GUI front end is a thin layer
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Step Generator**: A pure function mapping a recipe to an ordered list
//!   of brewing steps with checkable substeps, some carrying countdown timers
//! - **Progress Tracker**: Substep/step completion plus the experience/level
//!   gamification state
//! - **Timer Engine**: A single-slot countdown state machine that requires
//!   the caller to invoke `tick()` once per second
//! - **Storage**: JSON-based recipe and session storage, TOML configuration
//!
//! ## Key Components
//!
//! - [`BrewSession`]: The single owner of all mutable brewing state
//! - [`generate_steps`]: Recipe -> ordered brew steps
//! - [`CountdownTimer`]: Core timer state machine
//! - [`RecipeStore`]: Saved-recipe persistence
//! - [`Config`]: Application configuration management

pub mod recipe;
pub mod steps;
pub mod progress;
pub mod timer;
pub mod session;
pub mod storage;
pub mod events;
pub mod error;

pub use recipe::{HopItem, HopUnit, MaltItem, MaltUnit, Recipe};
pub use recipe::share::{generate_share_code, import_recipe};
pub use steps::{generate_steps, BrewStep, CategoryFilter, StepCategory, Substep};
pub use progress::ProgressTracker;
pub use timer::{ActiveTimer, CountdownTimer, TimerState};
pub use session::BrewSession;
pub use storage::{Config, RecipeStore, SessionStore};
pub use events::Event;
pub use error::{CoreError, ShareError, StoreError};
