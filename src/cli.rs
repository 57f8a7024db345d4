use std::path::PathBuf;

use chrono::NaiveDate;
use deployment_calendar::models::settings::GroupBy;
use getopts::{Matches, Options};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub group_by: Option<GroupBy>,
    pub no_holidays: bool,
    pub json: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(Args),
    Help(String),
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "c",
        "config",
        "Agenda file to read [Default: agenda.toml in the user config directory]",
        "PATH",
    );
    opts.optopt("f", "from", "First day of the window [Default: today]", "YYYY-MM-DD");
    opts.optopt(
        "t",
        "to",
        "Last day of the window [Default: from + window_days - 1]",
        "YYYY-MM-DD",
    );
    opts.optopt(
        "g",
        "group-by",
        "Group occurrences by day, week or month [Default: from settings]",
        "GROUPING",
    );
    opts.optflag("", "no-holidays", "Leave federal holidays out of the agenda");
    opts.optflag("j", "json", "Print the agenda as JSON");
    opts
}

pub fn parse(args: Vec<String>) -> Result<Command, String> {
    let opts = opts();
    let matches = opts.parse(args).map_err(|fail| fail.to_string())?;

    if matches.opt_present("help") {
        let usage = opts.usage(&opts.short_usage(env!("CARGO_BIN_NAME")));
        return Ok(Command::Help(usage));
    }

    let group_by = matches
        .opt_str("group-by")
        .map(|value| value.parse::<GroupBy>())
        .transpose()?;

    let from = date_opt(&matches, "from")?;
    let to = date_opt(&matches, "to")?;
    if let (Some(from), Some(to)) = (from, to) {
        if to < from {
            return Err(format!("--to {to} is before --from {from}"));
        }
    }

    Ok(Command::Run(Args {
        config: matches.opt_str("config").map(PathBuf::from),
        from,
        to,
        group_by,
        no_holidays: matches.opt_present("no-holidays"),
        json: matches.opt_present("json"),
    }))
}

fn date_opt(matches: &Matches, name: &str) -> Result<Option<NaiveDate>, String> {
    matches
        .opt_str(name)
        .map(|value| {
            NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .map_err(|err| format!("Provided value for option '{name}' is invalid: {err}"))
        })
        .transpose()
}
