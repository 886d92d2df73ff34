use clap::{Parser, Subcommand, ValueEnum};
use fitfreak::prelude::*;
use fitfreak_helpers::basic_fitfreak_setup;
use log::info;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Text,
    Ron,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Ron => write!(f, "ron"),
        }
    }
}

/// Replay recorded pose frames through a fitfreak session.
#[derive(Parser)]
#[command(author, version, about)]
pub struct ReplayCli {
    /// Session configuration (RON).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// No console log.
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Feed a pose log to an exercise
    Replay {
        /// Exercise name, for example "Squats" or "Tree Pose".
        /// Defaults to the one from the configuration.
        #[arg(short, long)]
        exercise: Option<String>,
        #[arg(short, long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// RON list of pose frames.
        frames: PathBuf,
    },
    /// List the known exercises
    Exercises,
}

fn print_feedback(index: usize, feedback: &Feedback, format: OutputFormat) -> FfResult<()> {
    let line = match (format, feedback) {
        (OutputFormat::Text, _) => feedback.to_string(),
        (OutputFormat::Ron, Feedback::Reps(reps)) => ron::to_string(reps)
            .map_err(|e| FfError::new_with_cause("Failed to serialize feedback", e))?,
        (OutputFormat::Ron, Feedback::Verdict(verdict)) => ron::to_string(verdict)
            .map_err(|e| FfError::new_with_cause("Failed to serialize feedback", e))?,
    };
    println!("{index:>5} {line}");
    Ok(())
}

fn replay(
    mut session: Session,
    exercise: Option<String>,
    format: OutputFormat,
    frames: PathBuf,
) -> FfResult<()> {
    let kind = match exercise {
        Some(name) => session.select_by_name(&name)?,
        None => session
            .active()
            .ok_or_else(|| FfError::from("No exercise given on the command line or in the configuration"))?,
    };
    let mut source = PoseLog::from_file(&frames)?;
    info!("Replaying {} frames of {}", source.len(), kind);

    let mut index = 0;
    let mut printed = Ok(());
    let total = session.run(&mut source, |feedback| {
        index += 1;
        if printed.is_ok() {
            printed = print_feedback(index, feedback, format);
        }
    })?;
    printed?;

    println!("--");
    println!("{total} frames replayed");
    if kind.is_pose_hold() {
        println!("Last verdict: {}", session.status());
    } else {
        println!("{}: {} reps", kind, session.count(kind));
    }
    Ok(())
}

fn run(args: ReplayCli) -> FfResult<()> {
    let ctx = basic_fitfreak_setup(args.config.as_deref(), !args.quiet)?;
    match args.command {
        Command::Replay {
            exercise,
            format,
            frames,
        } => replay(ctx.new_session(), exercise, format, frames)?,
        Command::Exercises => {
            for kind in ExerciseKind::ALL {
                let mode = if kind.is_pose_hold() { "hold" } else { "reps" };
                println!("{:<14} {:<5} {}", kind.label(), mode, kind.description());
            }
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(ReplayCli::parse()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
