mod report;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::debug;
use planner_core::{
    parse_human_day, parse_time_range, resolve_data_dir, Fortune, FileJournalRepository,
    FileScheduleRepository, JournalService, Mood, PlannerError, ScheduleRepository,
    ScheduleService, Settings,
};

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "A daily planner with a 24-hour clock view", long_about = None)]
struct Cli {
    /// Where schedule.json, mood.json, diary.json and media/ live (default: ~/.planner)
    #[arg(long, global = true, env = "PLANNER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Day to work on: today, tom, yest, +2d, -1w or YYYY-MM-DD
    #[arg(short, long, global = true, default_value = "today")]
    date: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add an activity (usage: add 09:00-10:30 Study for the exam)
    Add {
        /// Time range as HH:MM-HH:MM
        range: String,
        /// Activity name
        #[arg(trailing_var_arg = true, required = true)]
        activity: Vec<String>,
    },
    /// List the day's activities in start order
    List {
        /// List every day that has activities
        #[arg(long)]
        all: bool,
    },
    /// Remove an activity by its number in `list`
    Remove { number: usize },
    /// Show the clock-face geometry of the day
    Chart,
    /// Show or set the mood stamp (great, good, okay, bad, awful)
    Mood { mood: Option<String> },
    /// Show or replace the diary entry
    Diary {
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Manage media attached to the day
    Media {
        #[command(subcommand)]
        action: Option<MediaAction>,
    },
    /// Draw today's fortune
    Fortune,
    /// Open the Terminal User Interface
    Tui,
}

#[derive(clap::Subcommand)]
enum MediaAction {
    /// List attached media
    List,
    /// Copy a png/jpg/jpeg/mp4/mov file into the planner and attach it
    Attach { path: PathBuf },
    /// Delete an attachment by its number in `media list`
    Remove { number: usize },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir)?;
    let settings = Settings::load(&data_dir)?;
    let date = parse_human_day(&cli.date, Local::now().date_naive())?;
    debug!("data directory {}, working on {}", data_dir.display(), date);

    let mut schedule =
        ScheduleService::new(FileScheduleRepository::new(Some(data_dir.clone()))?)?;
    let mut journal = JournalService::new(
        FileJournalRepository::new(Some(data_dir.clone()))?,
        data_dir.join("media"),
        settings.clone(),
    )?;

    match cli.command {
        Some(Commands::Add { range, activity }) => {
            let result = parse_time_range(&range)
                .and_then(|(start, end)| {
                    settings.check_minute(start)?;
                    settings.check_minute(end)?;
                    Ok((start, end))
                })
                .map_err(anyhow::Error::from)
                .and_then(|(start, end)| {
                    schedule.add_entry(date, &activity.join(" "), start, end)
                });
            match result {
                Ok(entry) => println!("Added: {}", entry.display_line()),
                Err(e) => report_planner_error(e)?,
            }
        }
        Some(Commands::List { all: false }) => print_list(&schedule, date),
        Some(Commands::List { all: true }) => {
            let dates = schedule.dates();
            if dates.is_empty() {
                println!("No schedule yet.");
            }
            for (i, day) in dates.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{} ({})", day, day.format("%a"));
                print_list(&schedule, day);
            }
        }
        Some(Commands::Remove { number }) => match number.checked_sub(1) {
            Some(index) => match schedule.remove_at(date, index) {
                Ok(removed) => println!(
                    "Removed: {} ({}〜{})",
                    removed.activity, removed.start, removed.end
                ),
                Err(e) => report_planner_error(e)?,
            },
            None => println!("Error: entries are numbered from 1"),
        },
        Some(Commands::Chart) => {
            let segments = schedule.chart(date);
            if segments.is_empty() {
                println!("No schedule for {} yet.", date);
            } else {
                println!("{}", report::chart_table(&segments));
            }
        }
        Some(Commands::Mood { mood: Some(input) }) => match Mood::parse(&input) {
            Ok(mood) => {
                journal.set_mood(date, mood)?;
                println!("Saved mood {} for {}", mood, date);
            }
            Err(e) => report_planner_error(e.into())?,
        },
        Some(Commands::Mood { mood: None }) => {
            let mood = journal.mood(date).unwrap_or_default();
            println!("{}: {}", date, mood);
        }
        Some(Commands::Diary { text }) => {
            if text.is_empty() {
                let diary = journal.diary(date);
                if diary.is_empty() {
                    println!("No diary entry for {}.", date);
                } else {
                    println!("{}", diary);
                }
            } else {
                journal.write_diary(date, &text.join(" "))?;
                println!("Diary saved for {}.", date);
            }
        }
        Some(Commands::Media { action }) => match action.unwrap_or(MediaAction::List) {
            MediaAction::List => {
                let media = journal.media(date);
                if media.is_empty() {
                    println!("No media for {} yet.", date);
                } else {
                    println!("{}", report::media_table(&media));
                }
            }
            MediaAction::Attach { path } => match journal.attach_media(date, &path) {
                Ok(stored) => println!("Saved {}", stored),
                Err(e) => report_planner_error(e)?,
            },
            MediaAction::Remove { number } => {
                let media = journal.media(date);
                match number.checked_sub(1).and_then(|i| media.get(i)) {
                    Some(path) => match journal.remove_media(date, path) {
                        Ok(()) => println!("Removed {}", path),
                        Err(e) => report_planner_error(e)?,
                    },
                    None => println!("Error: no media #{} for {}", number, date),
                }
            }
        },
        Some(Commands::Fortune) => {
            println!("Your fortune today is... {}!", Fortune::draw_random());
        }
        Some(Commands::Tui) | None => {
            tui::run(schedule, journal, settings, date)?;
        }
    }
    Ok(())
}

fn print_list<R: ScheduleRepository>(schedule: &ScheduleService<R>, date: NaiveDate) {
    let entries = schedule.list_entries(date);
    if entries.is_empty() {
        println!("No schedule for {} yet.", date);
        return;
    }
    for entry in entries {
        println!("{}", entry.display_line());
    }
}

/// User-correctable failures are printed, duplicates as warnings. Anything
/// else is passed up.
fn report_planner_error(err: anyhow::Error) -> Result<()> {
    match err.downcast_ref::<PlannerError>() {
        Some(e) if e.is_warning() => println!("Warning: {}", e),
        Some(e) => println!("Error: {}", e),
        None => return Err(err),
    }
    Ok(())
}
