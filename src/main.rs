// Deployment calendar agenda
// Prints the occurrences of saved events for a date window

mod cli;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use deployment_calendar::models::event::{CalendarEvent, Occurrence};
use deployment_calendar::models::settings::GroupBy;
use deployment_calendar::services::event::agenda::group;
use deployment_calendar::services::event::{aggregate_for_window, describe_recurrence_from};
use deployment_calendar::services::holidays::federal_holidays_between;
use deployment_calendar::services::settings::SettingsService;
use deployment_calendar::utils::date::add_days;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

fn main() -> Result<()> {
    env_logger::init();

    let args = match cli::parse(std::env::args().skip(1).collect()) {
        Ok(cli::Command::Run(args)) => args,
        Ok(cli::Command::Help(usage)) => {
            println!("{usage}");
            return Ok(());
        }
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let today = Local::now().date_naive();
    log::info!("Starting calendar agenda for {}", today);
    run(args, today)
}

fn run(args: cli::Args, today: NaiveDate) -> Result<()> {
    let path = args
        .config
        .or_else(SettingsService::default_path)
        .context("No configuration directory available; pass --config")?;
    let agenda = SettingsService::new(path).load()?;
    let settings = agenda.settings;

    let from = args.from.unwrap_or(today);
    let to = match args.to {
        Some(to) => to,
        None => add_days(from, i64::from(settings.window_days) - 1)
            .ok_or_else(|| anyhow!("Window starting {} runs past the last supported date", from))?,
    };
    let group_by = args.group_by.unwrap_or(settings.group_by);

    let mut events = agenda.events;
    if settings.include_federal_holidays && !args.no_holidays {
        events.extend(federal_holidays_between(from, to));
    }

    let groups = aggregate_for_window(&events, from, to, group_key(group_by))?;
    let by_id: HashMap<&str, &CalendarEvent> =
        events.iter().map(|event| (event.id.as_str(), event)).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&json_agenda(&groups, &by_id))?);
    } else {
        print!("{}", text_agenda(&groups, &by_id, group_by, from, to));
    }

    Ok(())
}

fn group_key(group_by: GroupBy) -> fn(NaiveDate) -> NaiveDate {
    match group_by {
        GroupBy::Day => group::by_day,
        GroupBy::Week => group::by_week,
        GroupBy::Month => group::by_month,
    }
}

fn group_heading(group_by: GroupBy, key: NaiveDate) -> String {
    match group_by {
        GroupBy::Day => key.format("%A, %b %-d %Y").to_string(),
        GroupBy::Week => format!("Week of {}", key.format("%b %-d, %Y")),
        GroupBy::Month => key.format("%B %Y").to_string(),
    }
}

fn text_agenda(
    groups: &BTreeMap<NaiveDate, Vec<Occurrence>>,
    events: &HashMap<&str, &CalendarEvent>,
    group_by: GroupBy,
    from: NaiveDate,
    to: NaiveDate,
) -> String {
    if groups.is_empty() {
        return format!("No events between {} and {}\n", from, to);
    }

    let mut out = String::new();
    for (key, occurrences) in groups {
        out.push_str(&format!("== {}\n", group_heading(group_by, *key)));

        for occurrence in occurrences {
            let Some(event) = events.get(occurrence.event_id.as_str()) else {
                continue;
            };

            let days = if occurrence.end_date > occurrence.start_date {
                format!(
                    "{} - {}",
                    occurrence.start_date.format("%a %b %d"),
                    occurrence.end_date.format("%a %b %d")
                )
            } else {
                occurrence.start_date.format("%a %b %d").to_string()
            };

            let time = match (event.is_all_day, event.start_time) {
                (false, Some(start)) => start.format("%H:%M").to_string(),
                _ => "all day".to_string(),
            };

            out.push_str(&format!("  {days}  {time:>7}  {} [{}]", event.title, event.category));

            let description = describe_recurrence_from(&event.effective_rule(), event.start_date);
            if !description.is_empty() {
                out.push_str(&format!("  ({description})"));
            }
            out.push('\n');
        }
    }
    out
}

#[derive(Serialize)]
struct AgendaEntry<'a> {
    instance_id: String,
    event_id: &'a str,
    title: &'a str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_all_day: bool,
    start_time: Option<chrono::NaiveTime>,
    category: String,
    recurrence: String,
}

fn json_agenda<'a>(
    groups: &'a BTreeMap<NaiveDate, Vec<Occurrence>>,
    events: &HashMap<&str, &'a CalendarEvent>,
) -> BTreeMap<String, Vec<AgendaEntry<'a>>> {
    groups
        .iter()
        .map(|(key, occurrences)| {
            let entries = occurrences
                .iter()
                .filter_map(|occurrence| {
                    let event: &'a CalendarEvent = *events.get(occurrence.event_id.as_str())?;
                    Some(AgendaEntry {
                        instance_id: occurrence.instance_id(),
                        event_id: &occurrence.event_id,
                        title: &event.title,
                        start_date: occurrence.start_date,
                        end_date: occurrence.end_date,
                        is_all_day: event.is_all_day,
                        start_time: event.start_time,
                        category: event.category.to_string(),
                        recurrence: describe_recurrence_from(&event.effective_rule(), event.start_date),
                    })
                })
                .collect();
            (key.format("%Y-%m-%d").to_string(), entries)
        })
        .collect()
}
