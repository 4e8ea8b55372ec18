use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use goal_sort_terminal::app::{App, DataSource};
use goal_sort_terminal::config::AppConfig;
use goal_sort_terminal::render::{chart_area, render_frame};
use goal_sort_terminal::startup::choose_dataset;
use goal_sort_terminal::viz::Entry;

fn main() -> Result<()> {
    let cfg = AppConfig::from_env();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let Some((source, entries)) = choose_dataset(&cfg, &mut input, &mut output)? else {
        return Ok(());
    };
    drop(input);

    run_terminal(&cfg, source, entries)
}

fn run_terminal(cfg: &AppConfig, source: DataSource, entries: Vec<Entry>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = terminal
        .size()
        .map(chart_area)
        .and_then(|chart| {
            let mut app = App::new(source, entries, chart.width, chart.height);
            run_app(&mut terminal, &mut app, cfg.tick_rate())
        });

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let chart = chart_area(terminal.size()?);
        app.viz.resize(chart.width, chart.height);

        terminal.draw(|f| render_frame(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}
