//! Terminal setup and the main event loop

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::time::{Duration, Instant};

use crate::api::{HttpScheduleApi, ScheduleApi};
use crate::config::Config;
use crate::logger::Logger;
use crate::ui::app_component::AppComponent;
use crate::ui::core::{actions::Action, Component, EventHandler, EventType};

/// Run the dashboard until the user quits
pub async fn run_app(config: Config, logger: Logger) -> Result<()> {
    let api: Arc<dyn ScheduleApi> = Arc::new(HttpScheduleApi::from_config(&config.api)?);
    log::info!("using schedule API at {}", api.base_url());

    let refresh_interval = match config.ui.refresh_interval_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppComponent::new(api, config, logger);
    let mut event_handler = EventHandler::new();

    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler, refresh_interval).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
    refresh_interval: Option<Duration>,
) -> Result<()> {
    app.handle_app_action(Action::RefreshSchedules);
    let mut last_refresh = Instant::now();
    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| app.render(f, f.area()))?;
            needs_render = false;
        }

        let event = event_handler.next_event().await?;
        match event {
            EventType::Key(_) | EventType::Resize(_, _) => {
                app.handle_event(event);
                needs_render = true;
            }
            EventType::Tick => {
                if refresh_interval.is_some_and(|every| last_refresh.elapsed() >= every) {
                    app.handle_app_action(Action::RefreshSchedules);
                    last_refresh = Instant::now();
                }
            }
            EventType::Other => {}
        }

        // Flows, loads and the dialog timers all change what is on screen
        if app.process_background_actions() {
            needs_render = true;
        }
        if app.dialog_host().is_visible() || app.logs_visible() {
            needs_render = true;
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
