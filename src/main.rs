use anyhow::Result;
use clap::{Parser, Subcommand};
use gakko::catalog::Catalog;
use gakko::catalog::authoring::catalog_stats;
use gakko::progress::LearnerProfile;
use gakko::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gakko")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reset learner progress (keeps the learner's name)
    Reset,
    /// Print aggregate catalog and progress statistics
    Stats,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gakko=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Reset) => {
            let path = Config::profile_path()?;
            let mut profile = LearnerProfile::load_or_default(&path);
            profile.reset();
            profile.save(&path)?;
            println!("Progress reset");
        }
        Some(Commands::Stats) => {
            let catalog = Catalog::load_or_default(&Config::catalog_path()?);
            let profile = LearnerProfile::load_or_default(&Config::profile_path()?);
            let stats = catalog_stats(&catalog, &profile.completed_lesson_ids);

            println!("Courses:     {}", stats.courses);
            println!("Lessons:     {}", stats.lessons);
            println!("Completed:   {}", stats.completed_lessons);
            println!("Points:      {}", profile.points);
            println!("Streak:      {}", profile.current_streak);
            println!("Game:        {}", if profile.game_unlocked { "unlocked" } else { "locked" });
        }
        None => {
            // Launch TUI
            let config = Config::load()?;
            let mut app = App::new(config)?;
            app.run()?;
        }
    }

    Ok(())
}
