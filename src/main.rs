use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use dotenv::dotenv;
use fitlog_app::{
    Action, AppConfig, FsPhotoReader, Journal, JournalOptions, Outcome, WorkoutForm, render,
};
use fitlog_core::{dates::YearMonth, errors::JournalError};
use fitlog_db::{FileStore, open_store};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// fitlog - a local fitness journal
#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Log workout photos per member and browse them on a month calendar", long_about = None)]
struct Cli {
    /// Data directory (overrides FITLOG_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage members
    Member {
        #[command(subcommand)]
        command: MemberCommands,
    },
    /// Log workouts
    Workout {
        #[command(subcommand)]
        command: WorkoutCommands,
    },
    /// Show a month calendar
    Calendar {
        /// Year to show (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Month to show, 1-12 (defaults to the current month)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Step this many months back from the selected month
        #[arg(long, default_value_t = 0)]
        back: u32,

        /// Step this many months forward from the selected month
        #[arg(long, default_value_t = 0)]
        forward: u32,
    },
    /// Show the first workout logged on a day
    Day {
        /// Date as YYYY-MM-DD
        date: NaiveDate,
    },
    /// Read a photo and print its data URI without logging anything
    Preview {
        photo: PathBuf,
    },
}

#[derive(Subcommand)]
enum MemberCommands {
    /// Register a new member
    Add { nickname: String },
    /// List registered members
    List,
}

#[derive(Subcommand)]
enum WorkoutCommands {
    /// Log a workout photo for a member
    Add {
        /// Member id (see `fitlog member list`)
        #[arg(long)]
        member: String,

        /// Workout date as YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Photo file
        #[arg(long)]
        photo: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = open_store(&config.data_dir)?;
    let options = JournalOptions {
        week_start: config.week_start,
        on_corrupt: config.on_corrupt,
    };
    let mut journal = Journal::open(store, Arc::new(FsPhotoReader), options)?;

    match run(&mut journal, cli.command).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_user_facing() => {
            eprintln!("{}", e);
            process::exit(1);
        }
        Err(e) => Err(eyre!(e)),
    }
}

async fn run(journal: &mut Journal<FileStore>, command: Commands) -> Result<(), JournalError> {
    match command {
        Commands::Member { command: MemberCommands::Add { nickname } } => {
            if let Outcome::MemberAdded(member) = journal.dispatch(Action::AddMember { nickname })? {
                println!("Registered {} (id {}, colour {})", member.nickname, member.id, member.color);
            }
        }
        Commands::Member { command: MemberCommands::List } => {
            print!("{}", render::members_text(&journal.member_summaries()));
        }
        Commands::Workout { command: WorkoutCommands::Add { member, date, photo } } => {
            let form = WorkoutForm {
                member_id: member,
                date,
                photo: Some(photo),
            };
            journal.dispatch(Action::AddWorkout(form))?;

            for completed in journal.drain().await {
                let workout = completed.result?;
                println!("Logged workout {} on {}", workout.id, workout.date);
                journal.dispatch(Action::ShowMonth(YearMonth::containing(workout.date)))?;
            }
            print_month(journal);
        }
        Commands::Calendar { year, month, back, forward } => {
            let current = YearMonth::current();
            let start = YearMonth::new(
                year.unwrap_or(current.year()),
                month.map(|m| m as i32 - 1).unwrap_or(current.month0() as i32),
            );
            journal.dispatch(Action::ShowMonth(start))?;
            for _ in 0..back {
                journal.dispatch(Action::PrevMonth)?;
            }
            for _ in 0..forward {
                journal.dispatch(Action::NextMonth)?;
            }
            print_month(journal);
        }
        Commands::Day { date } => match journal.dispatch(Action::SelectDay(date))? {
            Outcome::DayDetail(Some(detail)) => print!("{}", render::detail_text(&detail)),
            _ => info!("No workouts on {}", date),
        },
        Commands::Preview { photo } => {
            println!("{}", journal.preview_photo(&photo).await?);
        }
    }

    Ok(())
}

fn print_month(journal: &Journal<FileStore>) {
    let view = journal.render();
    print!(
        "{}",
        render::month_text(&view, journal.week_start(), journal.members())
    );
}
