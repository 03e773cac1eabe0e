use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "brewmaster-cli", version, about = "BrewMaster CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Working recipe and saved-recipe management
    Recipe {
        #[command(subcommand)]
        action: commands::recipe::RecipeAction,
    },
    /// Brewing session: steps, completion, progress
    Brew {
        #[command(subcommand)]
        action: commands::brew::BrewAction,
    },
    /// Countdown timers for timer-eligible substeps
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Recipe { action } => commands::recipe::run(action),
        Commands::Brew { action } => commands::brew::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
