mod app;
mod help;
use crate::app::App;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use monthpick::{
    page::Page, surface::build_scaffold, CalendarWidget, Locale, Mount, Options, Overrides,
    PageSurface,
};
use ratatui::DefaultTerminal;
use std::io::stdout;
use std::path::{Path, PathBuf};
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunArgs {
    config: Option<PathBuf>,
    locale: Option<Locale>,
    no_effect: bool,
    existing: bool,
    log_file: Option<PathBuf>,
    month: Option<Date>,
}

impl RunArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            controls: None,
            input_effect: self.no_effect.then_some(false),
            locale: self.locale,
            year: self.month.map(Date::year),
            month: self.month.map(|d| u8::from(d.month()) - 1),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunArgs),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = RunArgs::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("locale") => {
                    args.locale = Some(parser.value()?.parse()?);
                }
                Arg::Long("no-effect") => args.no_effect = true,
                Arg::Long("existing") => args.existing = true,
                Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if args.month.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&format!("{value}-01"), &YMD_FMT) {
                        Ok(d) => args.month = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(args) => {
                // Must be determined before any other threads exist
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let _logger = init_logging(args.log_file.as_deref())?;
                let mut overrides = Overrides::default();
                if let Some(path) = args.config.as_deref() {
                    overrides = Overrides::load(path)
                        .with_context(|| format!("failed to load {}", path.display()))?;
                }
                let options = Options::new(today)
                    .merge(overrides.then(args.overrides()))
                    .context("invalid options")?;
                let (surface, mount) = if args.existing {
                    // Stand-in for a host that ships the markup itself
                    let mut page = Page::new();
                    build_scaffold(
                        &mut page,
                        None,
                        &options.controls,
                        options.locale.day_abbrevs(),
                        options.input_effect,
                    );
                    (PageSurface::with_page(page), Mount::Existing)
                } else {
                    (PageSurface::new(), Mount::Create)
                };
                let widget = CalendarWidget::init(options, today, surface, mount)
                    .context("failed to mount calendar")?;
                let date = with_terminal(|terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let date = App::new(widget).run(terminal)?;
                    Ok(date)
                })?;
                println!("{date}");
                Ok(())
            }
            Command::Help => {
                println!("Usage: monthpick [options] [YYYY-MM]");
                println!();
                println!("Pick a date from a month calendar and print it as D/M/Y");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>   Read option overrides from a TOML file");
                println!("  -l, --locale <ID>     Month and day names to use (cs-CZ, en-US)");
                println!("      --no-effect       Do not flash the date field on selection");
                println!("      --existing        Bind to pre-built markup instead of creating it");
                println!("      --log-file <PATH> Write log messages to the given file");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
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

// Logging is only enabled with a log file, as anything written to the
// terminal would end up on top of the UI.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<Option<LoggerHandle>> {
    let Some(path) = log_file else {
        return Ok(None);
    };
    let handle = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
        .log_to_file(FileSpec::try_from(path)?)
        .start()
        .context("failed to start logger")?;
    Ok(Some(handle))
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(&mut DefaultTerminal) -> anyhow::Result<T>,
{
    let mut terminal = ratatui::init();
    let r = execute!(stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(&mut terminal));
    if let Err(e) = execute!(stdout(), DisableMouseCapture) {
        log::warn!("Failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("monthpick").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(RunArgs::default()));
    }

    #[test]
    fn test_all_args() {
        let cmd = parse(&[
            "--locale",
            "en-US",
            "--no-effect",
            "--existing",
            "-c",
            "cal.toml",
            "--log-file",
            "cal.log",
            "2017-07",
        ])
        .unwrap();
        let Command::Run(args) = cmd else {
            panic!("expected Run, got {cmd:?}");
        };
        assert_eq!(args.locale, Some(Locale::EnUs));
        assert!(args.no_effect);
        assert!(args.existing);
        assert_eq!(args.config, Some(PathBuf::from("cal.toml")));
        assert_eq!(args.log_file, Some(PathBuf::from("cal.log")));
        assert_eq!(args.month, Some(date!(2017 - 07 - 01)));
        assert_eq!(
            args.overrides(),
            Overrides {
                controls: None,
                input_effect: Some(false),
                locale: Some(Locale::EnUs),
                year: Some(2017),
                month: Some(6),
            }
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_locale() {
        assert!(parse(&["--locale", "xx-XX"]).is_err());
    }

    #[test]
    fn test_bad_month() {
        assert!(parse(&["2017-13"]).is_err());
        assert!(parse(&["July"]).is_err());
    }

    #[test]
    fn test_two_months() {
        assert!(parse(&["2017-07", "2017-08"]).is_err());
    }

    #[test]
    fn test_no_overrides_by_default() {
        assert_eq!(RunArgs::default().overrides(), Overrides::default());
    }
}
