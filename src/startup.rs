use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::{Datelike, Local};

use crate::api_football::ApiFootball;
use crate::app::DataSource;
use crate::config::AppConfig;
use crate::offline::{OfflineSample, load_offline_data};
use crate::prompt::{ask, ask_choice, ask_with_default};
use crate::viz::Entry;

pub const NO_DATA: &str = "No data to visualize.";

const DISCLAIMER: &str = "DISCLAIMER:\n\
-Use Full Team Names (E.g. 'Manchester United')\n\
-Use Recent Seasons, Older Seasons Limited by API (E.g. '2024')\n\
-Major Teams/Leagues Contain Data More Often";

/// Runs the console prompts and loads the first dataset. `None` means there
/// is nothing to show and the terminal should not be opened.
pub fn choose_dataset<R: BufRead, W: Write>(
    cfg: &AppConfig,
    input: &mut R,
    output: &mut W,
) -> Result<Option<(DataSource, Vec<Entry>)>> {
    let mode = ask_choice(
        input,
        output,
        "Do you have a valid API-Football Key? Type '1' for Yes and '2' for No: ",
        &["1", "2"],
    )?;

    let (source, entries) = if mode == "1" {
        let Some(source) = choose_online(cfg, input, output)? else {
            return Ok(None);
        };
        let fetched = source.load()?;
        print_notes(&fetched.notes);
        (source, fetched.value)
    } else {
        let sample = choose_sample(input, output)?;
        let path = sample.path_in(&cfg.sample_dir);
        let entries = load_offline_data(&path)?;
        (DataSource::Offline { path }, entries)
    };

    if entries.is_empty() {
        writeln!(output, "{NO_DATA}")?;
        return Ok(None);
    }
    Ok(Some((source, entries)))
}

pub fn choose_online<R: BufRead, W: Write>(
    cfg: &AppConfig,
    input: &mut R,
    output: &mut W,
) -> Result<Option<DataSource>> {
    let key_question = if cfg.api_key.is_some() {
        "Enter API-Football Key here (blank uses API_FOOTBALL_KEY): "
    } else {
        "Enter API-Football Key here: "
    };
    let api_key = ask_with_default(input, output, key_question, cfg.api_key.as_deref())?;
    if api_key.is_empty() {
        writeln!(output, "No API key given.")?;
        return Ok(None);
    }

    writeln!(output, "{DISCLAIMER}")?;
    let team_name = ask(input, output, "Enter team name to search: ")?;
    let this_year = Local::now().year().to_string();
    let season = ask_with_default(
        input,
        output,
        &format!("Enter what year's stats you'd like to view [{this_year}]: "),
        Some(this_year.as_str()),
    )?;

    let api = ApiFootball::new(cfg.base_url.clone(), api_key, cfg.http_timeout_secs);
    let teams = api.search_team(&team_name)?;
    print_notes(&teams.notes);
    let Some(team) = teams.value.into_iter().next() else {
        writeln!(output, "No matching team found.")?;
        return Ok(None);
    };
    match &team.country {
        Some(country) => writeln!(output, "Using {} ({country}), id {}", team.name, team.id)?,
        None => writeln!(output, "Using {}, id {}", team.name, team.id)?,
    }

    Ok(Some(DataSource::Online {
        api,
        team_id: team.id,
        team_name: team.name,
        season,
        limit: cfg.player_limit,
    }))
}

pub fn choose_sample<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<OfflineSample> {
    let mut question = String::from("Choose the Offline Data You'd Like to View.\n");
    for sample in OfflineSample::ALL {
        question.push_str(&format!(
            "Type '{}' for {}.\n",
            sample.menu_key(),
            sample.label()
        ));
    }
    question.push_str("Enter Your Choice Here: ");

    let keys: Vec<&str> = OfflineSample::ALL.iter().map(|s| s.menu_key()).collect();
    let answer = ask_choice(input, output, &question, &keys)?;
    OfflineSample::from_menu_key(&answer).context("unknown sample choice")
}

fn print_notes(notes: &[String]) {
    for note in notes {
        eprintln!("{note}");
    }
}
