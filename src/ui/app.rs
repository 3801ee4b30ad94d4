use crate::media::{decode_selection, MediaAccess, PickedImage, IMAGE_MIME_FILTER};
use crate::ui::mvi::Reducer;
use crate::ui::render::draw;
use crate::ui::request::{RequestHolder, RequestOutcome, SubmitError};
use crate::ui::screen::{CursorMove, ScreenIntent, ScreenReducer, ScreenState};
use ratatui::Frame;
use tokio::sync::watch;

pub const PERMISSION_DENIED: &str = "Permission denied";

/// Screen settings taken from the config at startup.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Model name shown in the header.
    pub model: String,
    /// Lifetime of a notice, in ticks.
    pub notice_ticks: u16,
    pub max_dimension: u32,
    pub initial_prompt: Option<String>,
}

/// Screen controller.
///
/// Owns the screen state and the platform capabilities, and hands
/// submissions to the [`RequestHolder`]. The request outcome is never written
/// here, only read.
pub struct App {
    should_quit: bool,
    screen: ScreenState,
    requests: RequestHolder,
    media: Box<dyn MediaAccess>,
    model: String,
    notice_ticks: u16,
    max_dimension: u32,
}

impl App {
    pub fn new(settings: AppSettings, requests: RequestHolder, media: Box<dyn MediaAccess>) -> Self {
        let screen = match settings.initial_prompt {
            Some(prompt) => ScreenState::with_prompt(prompt),
            None => ScreenState::default(),
        };
        Self {
            should_quit: false,
            screen,
            requests,
            media,
            model: settings.model,
            notice_ticks: settings.notice_ticks,
            max_dimension: settings.max_dimension,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn screen(&self) -> &ScreenState {
        &self.screen
    }

    pub fn outcome(&self) -> RequestOutcome {
        self.requests.outcome()
    }

    pub fn subscribe_outcome(&self) -> watch::Receiver<RequestOutcome> {
        self.requests.subscribe()
    }

    pub fn can_submit(&self) -> bool {
        self.screen.can_submit()
    }

    /// Screen became visible: check permission and offer an image right away.
    pub fn activate(&mut self) {
        self.select_image();
    }

    /// "Select an Image" action.
    pub fn select_image(&mut self) {
        if !self.ensure_permission() {
            return;
        }
        match self.media.pick_image(IMAGE_MIME_FILTER) {
            Some(picked) => self.load_picked(picked),
            None => tracing::debug!("Image selection cancelled"),
        }
    }

    /// Take an image from the clipboard, behind the same permission gate.
    pub fn paste_image(&mut self) {
        if !self.ensure_permission() {
            return;
        }
        match self.media.paste_image() {
            Some(picked) => self.load_picked(picked),
            None => self.notify("No image on the clipboard"),
        }
    }

    /// Resolve permission, prompting if needed. Shows a notice on denial.
    fn ensure_permission(&mut self) -> bool {
        let granted = if self.media.permission_status().allows_access() {
            true
        } else {
            self.media.request_permission()
        };

        self.dispatch_screen(ScreenIntent::PermissionResolved { granted });
        if !granted {
            tracing::info!("Image access denied");
            self.notify(PERMISSION_DENIED);
        }
        granted
    }

    fn load_picked(&mut self, picked: PickedImage) {
        match decode_selection(picked, self.max_dimension) {
            Ok(image) => {
                tracing::info!(
                    width = image.width,
                    height = image.height,
                    mime = image.upload.mime_type,
                    "Image selected"
                );
                self.dispatch_screen(ScreenIntent::ImageSelected(Box::new(image)));
            }
            Err(err) => {
                tracing::warn!("Could not decode image: {}", err);
                self.dispatch_screen(ScreenIntent::ImageCleared);
                self.notify(format!("Could not decode image: {}", err));
            }
        }
    }

    pub fn insert_text(&mut self, text: impl Into<String>) {
        self.dispatch_screen(ScreenIntent::InsertText(text.into()));
    }

    pub fn backspace(&mut self) {
        self.dispatch_screen(ScreenIntent::Backspace);
    }

    pub fn delete(&mut self) {
        self.dispatch_screen(ScreenIntent::Delete);
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        self.dispatch_screen(ScreenIntent::MoveCursor(movement));
    }

    pub fn scroll_result(&mut self, delta: i32) {
        self.dispatch_screen(ScreenIntent::ScrollResult { delta });
    }

    /// "Go" action. Does nothing while the button is disabled.
    pub fn submit(&mut self) {
        if !self.screen.can_submit() {
            return;
        }
        let Some(image) = self.screen.image.as_ref() else {
            return;
        };

        match self
            .requests
            .submit(image.upload.clone(), self.screen.prompt.clone())
        {
            Ok(_) => self.dispatch_screen(ScreenIntent::ResetScroll),
            Err(err @ SubmitError::Busy) => self.notify(err.to_string()),
        }
    }

    pub fn on_tick(&mut self) {
        self.dispatch_screen(ScreenIntent::Tick);
    }

    pub fn render(&self, frame: &mut Frame<'_>) {
        draw(frame, &self.screen, &self.requests.outcome(), &self.model);
    }

    fn notify(&mut self, text: impl Into<String>) {
        let ticks = self.notice_ticks;
        self.dispatch_screen(ScreenIntent::ShowNotice {
            text: text.into(),
            ticks,
        });
    }

    fn dispatch_screen(&mut self, intent: ScreenIntent) {
        ScreenReducer::reduce_in_place(&mut self.screen, intent);
    }
}
