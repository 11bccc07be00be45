extern crate dtecal as lib;

use chrono::{Datelike, Local};
use flexi_logger::{Duplicate, FileSpec, Logger};
use lib::agenda::Agenda;
use lib::app::App;
use lib::{Error, MonthIndex, WeekStart};
use std::io::{stdin, stdout};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "dtecal",
    about = "Month-view calendar for the terminal."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(short = "m", long = "month", help = "month to show (1-12)")]
    pub month: Option<u32>,

    #[structopt(short = "y", long = "year", help = "year to show")]
    pub year: Option<i32>,

    #[structopt(
        short = "w",
        long = "week-start",
        help = "first column of the week: monday (eu) or sunday (en)"
    )]
    pub week_start: Option<WeekStart>,

    #[structopt(
        short = "t",
        long = "tasks",
        help = "path to tasks file",
        parse(from_os_str)
    )]
    pub tasks: Option<PathBuf>,

    #[structopt(
        short = "i",
        long = "interactive",
        help = "read commands from stdin after showing the calendar"
    )]
    pub interactive: bool,
}

fn requested_month(args: &Args) -> Result<MonthIndex, Error> {
    let today = Local::now().date_naive();
    let year = args.year.unwrap_or_else(|| today.year());

    match args.month {
        Some(month) => {
            let month0 = month.checked_sub(1).unwrap_or(u32::MAX);
            MonthIndex::from_month0(month0, year)
                .map_err(|_| Error::invalid_argument(&format!("month {} is not in 1..=12", month)))
        }
        None => MonthIndex::from_month0(today.month0(), year),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .duplicate_to_stderr(Duplicate::Warn)
            .print_message();
    }

    logger.start()?;

    std::panic::set_hook(Box::new(|info| {
        println!("{}", termion::style::Reset);
        println!("dtecal ran into a fatal error!");
        println!("Consider filing an issue with a log file and the backtrace below.");

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let agenda = match (&args.tasks, &config.tasks) {
        (Some(path), _) => Some(Agenda::from_file(path)?),
        (None, Some(path)) => match Agenda::from_file(path) {
            Ok(agenda) => Some(agenda),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        },
        (None, None) => None,
    };

    let month = requested_month(&args)?;
    let week_start = args.week_start.unwrap_or(config.week_start);

    let mut app = App::new(&config, agenda, month, week_start)?.colored(termion::is_tty(&stdout()));

    let stdout = stdout();
    let mut out = stdout.lock();

    if args.interactive {
        let stdin = stdin();
        app.run(stdin.lock(), &mut out)?;
    } else {
        app.draw(&mut out)?;
    }

    Ok(())
}
