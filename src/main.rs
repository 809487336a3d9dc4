mod app;
mod calendar;
mod help;
mod holiday;
mod jumpto;
mod planner;
mod sidebar;
mod store;
mod team;
mod theme;
use crate::app::App;
use crate::calendar::YearMonth;
use crate::planner::Planner;
use crate::team::Team;
use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        team: Option<Team>,
        period: Option<YearMonth>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut team = None;
        let mut period = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('t') | Arg::Long("team") => {
                    team = Some(parser.value()?.parse::<Team>()?);
                }
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if period.is_none() => {
                    period = Some(value.parse::<YearMonth>()?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            team,
            period,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                team,
                period,
                log_file,
            } => {
                // Determine the local offset before any logger thread exists
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let _logger = log_file.as_deref().map(start_logger).transpose()?;
                let mut planner = Planner::new(today).with_team(team.unwrap_or_default());
                if let Some(period) = period {
                    planner
                        .select(period)
                        .with_context(|| format!("cannot open planner at {period}"))?;
                }
                log::info!(
                    "Starting planner for team {} at {}",
                    planner.team(),
                    planner.period()
                );
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(planner)
                        .run(&mut terminal)
                        .context("failed to run planner")
                })
            }
            Command::Help => {
                println!("Usage: teamplanner [-t|--team tarde|manha] [--log-file PATH] [YYYY-MM]");
                println!();
                println!("Terminal monthly planner with per-team notes, goals, and daily entries");
                println!();
                println!("Options:");
                println!("  -t, --team TEAM   Start with the given team (default: tarde)");
                println!("  --log-file PATH   Write log messages to PATH; level set via RUST_LOG");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

// The terminal belongs to the UI, so log messages only ever go to a file
fn start_logger(path: &Path) -> anyhow::Result<LoggerHandle> {
    let spec = FileSpec::try_from(path).context("invalid log file path")?;
    Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("invalid log specification")?
        .log_to_file(spec)
        .append()
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
