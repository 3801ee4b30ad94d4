use crate::config::Config;
use crate::gemini::{GeminiClient, Generator, MockGenerator};
use crate::media::DesktopMedia;
use crate::ui::app::{App, AppSettings};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::request::RequestHolder;
use crate::ui::terminal_guard::setup_terminal;
use anyhow::Context;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

/// Where answers come from.
pub enum GeneratorKind {
    Gemini { api_key: String },
    /// Canned replies, no network.
    Offline,
}

pub fn run(config: Config, generator: GeneratorKind, prompt: Option<String>) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let generator: Arc<dyn Generator> = match generator {
        GeneratorKind::Gemini { api_key } => Arc::new(
            GeminiClient::new(api_key, &config.gemini).context("Failed to build HTTP client")?,
        ),
        GeneratorKind::Offline => {
            tracing::info!("Offline mode, using canned responses");
            Arc::new(MockGenerator::new())
        }
    };

    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);
    let (mut terminal, guard) = setup_terminal().context("Failed to set up terminal")?;
    let events = EventHandler::new(tick_rate);

    let mut requests = RequestHolder::new(
        generator,
        runtime.handle().clone(),
        Duration::from_secs(config.gemini.timeout_seconds),
    );
    let settled_tx = events.sender();
    requests.set_on_settled(move || {
        let _ = settled_tx.send(AppEvent::RequestSettled);
    });

    let mut app = App::new(
        AppSettings {
            model: config.gemini.model.clone(),
            notice_ticks: config.ui.notice_ticks,
            max_dimension: config.media.max_dimension,
            initial_prompt: prompt,
        },
        requests,
        Box::new(DesktopMedia::new(&config.media)),
    );
    tracing::info!(model = %config.gemini.model, "Screen started");

    terminal.draw(|frame| app.render(frame))?;
    app.activate();

    loop {
        terminal.draw(|frame| app.render(frame))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Paste(text)) => app.insert_text(text),
            Ok(AppEvent::Tick) => app.on_tick(),
            // Layout is recomputed from the frame size on every draw.
            Ok(AppEvent::Resize(_, _)) | Ok(AppEvent::RequestSettled) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    // Abort any in-flight request before the runtime goes away.
    drop(app);
    drop(guard);
    runtime.shutdown_timeout(Duration::from_secs(1));
    tracing::info!("Screen closed");
    Ok(())
}
