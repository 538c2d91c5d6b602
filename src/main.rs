use std::path::PathBuf;

use clap::Parser;
use ocean_quiz::{telemetry, Quiz, QuizError, Settings};
use tracing::error;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file to load the questions from (overrides the config)
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// JSON file to load the water-saving tips from (overrides the config)
    #[arg(short, long)]
    tips: Option<PathBuf>,

    /// Number of questions per quiz (overrides the config)
    #[arg(short = 'n', long)]
    total: Option<usize>,

    /// File receiving the application log
    #[arg(long, default_value = "ocean-quiz.log")]
    log_file: PathBuf,
}

impl Args {
    fn settings(&self) -> Result<Settings, QuizError> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(path) = &self.questions {
            settings.content.questions = Some(path.clone());
        }
        if let Some(path) = &self.tips {
            settings.content.tips = Some(path.clone());
        }
        if let Some(total) = self.total {
            settings.quiz.total_questions = total;
        }
        Ok(settings)
    }
}

async fn run(args: Args) -> Result<(), QuizError> {
    let settings = args.settings()?;
    let quiz = Quiz::from_settings(&settings)?;
    quiz.run().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = telemetry::init_tracing(&args.log_file) {
        eprintln!("Cannot open log file {}: {}", args.log_file.display(), e);
        std::process::exit(1);
    }

    if let Err(e) = run(args).await {
        error!(error = %e, "quiz aborted");
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
