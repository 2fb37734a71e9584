use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use quiz_model::logging::{self, LogTarget};
use quiz_model::{Quiz, QuizError};
use tracing::error;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long)]
    questions: PathBuf,

    /// Validate the question bank and print it as JSON instead of starting the quiz
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let target = match (&args.log_file, args.check) {
        (Some(path), _) => LogTarget::File(path.as_path()),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Disabled,
    };
    if let Err(e) = logging::init(args.verbose, target) {
        eprintln!("Error opening log file: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), QuizError> {
    let quiz = Quiz::from_json(&args.questions)?;

    if args.check {
        let json = serde_json::to_string_pretty(quiz.questions())
            .map_err(|e| QuizError::Io(e.into()))?;
        println!("{}", json);
        return Ok(());
    }

    quiz.run()
}
