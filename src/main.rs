use std::path::PathBuf;
use clap::{Parser, Subcommand};
use serde::Serialize;
use algocoach_lib::config::{self, CoachConfig};
use algocoach_lib::error::CoachError;
use algocoach_lib::problems::record::{Difficulty, GradedAttempt};
use algocoach_lib::{bootstrap, logging, routes};

#[derive(Parser, Debug)]
#[command(name = "algocoach", version, about = "Spaced-repetition study coach")]
struct Cli {
    /// Config file (defaults to the app data directory or $ALGOCOACH_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the state file location
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a graded attempt with a numeric score (0-10)
    Grade {
        #[arg(long)]
        id: String,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        difficulty: Difficulty,
        #[arg(long)]
        score: f64,
    },
    /// Record a graded attempt from free-text feedback containing "Score: X/10"
    GradeText {
        #[arg(long)]
        id: String,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        difficulty: Difficulty,
        #[arg(long)]
        feedback: String,
    },
    /// Count a concept explanation as a study day
    Explain {
        #[arg(long)]
        topic: String,
    },
    /// List problems due for review
    Due {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Context for the next-problem recommendation
    Recommend,
    /// Per-topic weakness analysis
    Analyze,
    /// Records on one topic
    Topic {
        topic: String,
    },
    /// Full stored state
    Status,
}

fn load(cli: &Cli) -> Result<CoachConfig, CoachError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::get_config().clone(),
    };
    if let Some(state) = &cli.state {
        config.store.path = state.clone();
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CoachError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn dispatch(cli: Cli) -> Result<(), CoachError> {
    let config = load(&cli)?;
    logging::init_logging(&config.logging)?;
    let app_state = bootstrap(config).await?;

    match cli.command {
        Command::Grade { id, topic, difficulty, score } => {
            let attempt = GradedAttempt::new(id, topic, difficulty, score);
            print_json(&routes::submit_attempt(&app_state, attempt).await?)
        }
        Command::GradeText { id, topic, difficulty, feedback } => {
            print_json(&routes::submit_feedback(&app_state, id, topic, difficulty, &feedback).await?)
        }
        Command::Explain { topic } => print_json(&routes::explain_concept(&app_state, &topic).await?),
        Command::Due { limit } => print_json(&routes::get_due_problems(&app_state, limit).await?),
        Command::Recommend => print_json(&routes::get_recommendation(&app_state).await?),
        Command::Analyze => print_json(&routes::analyze_weaknesses(&app_state).await?),
        Command::Topic { topic } => print_json(&routes::get_problems_by_topic(&app_state, &topic).await?),
        Command::Status => print_json(&routes::get_status(&app_state).await?),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
