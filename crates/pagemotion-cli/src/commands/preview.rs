use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use pagemotion_core::AppConfig;
use pagemotion_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{
        CarouselWidget, CountersWidget, ParallaxWidget, ProgressWidget, RevealsWidget,
        StatusBarWidget,
    },
    App, Theme,
};

pub async fn run(config: AppConfig, page: Option<PathBuf>, reduced_motion: bool) -> Result<()> {
    let sim = super::load_simulation(&config, page.as_deref(), reduced_motion)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange, SetTitle("pagemotion"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(sim, &config, Theme::default());
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);

    let result = main_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)?;
    terminal.show_cursor()?;

    result
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let snapshot = app.sim.snapshot();

        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: progress + content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(2, 5), Constraint::Ratio(3, 5)])
                .split(main_layout[1]);

            let left = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(columns[0]);

            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1)])
                .split(columns[1]);

            ProgressWidget::render(frame, main_layout[0], &snapshot, &app.theme);
            RevealsWidget::render(frame, left[0], &snapshot, &app.theme);
            CountersWidget::render(frame, left[1], &snapshot, &app.theme);
            CarouselWidget::render(frame, right[0], &snapshot, &app.theme);
            ParallaxWidget::render(frame, right[1], &snapshot, &app.theme);
            StatusBarWidget::render(frame, main_layout[2], app, &snapshot);
        })?;

        if let Some(event) = events.next()? {
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key)),
                AppEvent::FocusLost => app.set_window_focus(false),
                AppEvent::FocusGained => app.set_window_focus(true),
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        let now = Instant::now();
        app.tick(now - last_tick);
        last_tick = now;

        if app.should_quit {
            return Ok(());
        }
    }
}
