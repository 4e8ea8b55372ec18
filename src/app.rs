use std::collections::VecDeque;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api_football::{ApiFootball, Fetched};
use crate::offline::load_offline_data;
use crate::sort::{Highlight, SortAlgorithm, SortDirection, SortRun};
use crate::viz::{Entry, VizState};

const MAX_LOGS: usize = 200;

/// Where the dataset came from, kept so `r` can load it again.
#[derive(Debug, Clone)]
pub enum DataSource {
    Online {
        api: ApiFootball,
        team_id: u32,
        team_name: String,
        season: String,
        limit: usize,
    },
    Offline {
        path: PathBuf,
    },
}

impl DataSource {
    pub fn load(&self) -> Result<Fetched<Vec<Entry>>> {
        match self {
            DataSource::Online {
                api,
                team_id,
                season,
                limit,
                ..
            } => api.fetch_players_by_goals(*team_id, season, *limit),
            DataSource::Offline { path } => Ok(Fetched {
                value: load_offline_data(path)?,
                notes: Vec::new(),
            }),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Online {
                team_name, season, ..
            } => format!("{team_name} {season}"),
            DataSource::Offline { path } => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Phase {
    Idle,
    Sorting(SortRun),
}

pub struct App {
    pub viz: VizState,
    pub algorithm: SortAlgorithm,
    pub direction: SortDirection,
    pub logs: VecDeque<String>,
    pub should_quit: bool,
    phase: Phase,
    highlight: Option<Highlight>,
    source: DataSource,
}

impl App {
    pub fn new(source: DataSource, entries: Vec<Entry>, width: u16, height: u16) -> Self {
        let mut app = Self {
            viz: VizState::initialize(width, height, entries),
            algorithm: SortAlgorithm::default(),
            direction: SortDirection::default(),
            logs: VecDeque::new(),
            should_quit: false,
            phase: Phase::Idle,
            highlight: None,
            source,
        };
        app.push_log(format!(
            "[INFO] Loaded {} players from {}",
            app.viz.entries().len(),
            app.source.describe()
        ));
        app
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_sorting(&self) -> bool {
        matches!(self.phase, Phase::Sorting(_))
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    pub fn title(&self) -> String {
        format!("{} - {}", self.algorithm.label(), self.direction.label())
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.reload(),
            _ if self.is_sorting() => {}
            KeyCode::Char(' ') => self.start_sort(),
            KeyCode::Char('a') => self.direction = SortDirection::Ascending,
            KeyCode::Char('d') => self.direction = SortDirection::Descending,
            KeyCode::Char('b') => self.algorithm = SortAlgorithm::Bubble,
            KeyCode::Char('i') => self.algorithm = SortAlgorithm::Insertion,
            _ => {}
        }
    }

    pub fn on_tick(&mut self) {
        let Phase::Sorting(run) = &mut self.phase else {
            self.highlight = None;
            return;
        };
        match run.advance(self.viz.entries_mut()) {
            Some(step) => self.highlight = Some(step),
            None => {
                let msg = format!(
                    "[INFO] {} finished in {} steps ({} comparisons)",
                    run.algorithm().label(),
                    run.steps(),
                    run.comparisons()
                );
                self.phase = Phase::Idle;
                self.highlight = None;
                self.push_log(msg);
            }
        }
    }

    pub fn start_sort(&mut self) {
        if self.is_sorting() {
            return;
        }
        let run = SortRun::new(self.algorithm, self.direction, self.viz.entries().len());
        self.push_log(format!("[INFO] Started {}", self.title()));
        self.phase = Phase::Sorting(run);
    }

    /// Loads the data source again. Any running sort is dropped first; a
    /// failed or empty load keeps the current dataset.
    pub fn reload(&mut self) {
        self.phase = Phase::Idle;
        self.highlight = None;

        match self.source.load() {
            Ok(fetched) => {
                for note in fetched.notes {
                    self.push_log(format!("[WARN] {note}"));
                }
                if fetched.value.is_empty() {
                    self.push_log("[WARN] Reload returned no data, keeping current list");
                    return;
                }
                let count = fetched.value.len();
                self.viz.update_dataset(fetched.value);
                self.push_log(format!("[INFO] Reloaded {count} players"));
            }
            Err(err) => self.push_log(format!("[WARN] Reload failed: {err:#}")),
        }
    }
}
