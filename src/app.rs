use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::activities::{ActivitiesClient, Activity};
use crate::config::Config;
use crate::constants;
use crate::error::Result;
use crate::services::roster;
use crate::services::signup::SignupForm;
use crate::types::{ActivityName, Email};

// Define messages for async communication
#[derive(Debug)]
pub enum AppUpdate {
    ActivitiesLoaded(Result<Vec<Activity>>),
    SignupFinished(Result<String>),
    RemovalFinished(Result<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Splash, // Initial splash screen
    Browse, // Activities and participants view
    Signup, // Signup form
}

/// Which flavor of transient notice is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message shown in the command bar until it expires.
///
/// Mirrors the throwaway confirmation text a web page would flash under a
/// form: it never blocks input, and Esc dismisses it early.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    expires_at: Instant,
}

impl Notice {
    pub fn success(text: impl Into<String>, ttl_ms: u64) -> Self {
        Self::new(text, NoticeKind::Success, ttl_ms)
    }

    pub fn error(text: impl Into<String>, ttl_ms: u64) -> Self {
        Self::new(text, NoticeKind::Error, ttl_ms)
    }

    fn new(text: impl Into<String>, kind: NoticeKind, ttl_ms: u64) -> Self {
        Self {
            text: text.into(),
            kind,
            expires_at: Instant::now() + Duration::from_millis(ttl_ms),
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// A participant removal waiting on y/n confirmation.
#[derive(Debug, Clone)]
pub struct PendingRemoval {
    pub activity: ActivityName,
    pub email: Email,
}

pub struct App {
    pub mode: AppMode,
    pub activities: Vec<Activity>,
    pub activity_list_state: ListState,
    pub participant_list_state: ListState,
    pub filter_active: bool,  // Whether the roster filter is being typed
    pub filter_query: String, // Filter query in command bar
    pub form: SignupForm,
    pub pending_removal: Option<PendingRemoval>,
    pub global_command_buffer: String,
    pub is_global_command_mode: bool,
    pub should_quit: bool,
    pub config: Config,
    pub client: Option<ActivitiesClient>,
    pub startup_error: Option<String>,
    pub async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
    pub is_loading: bool,
    pub notice: Option<Notice>,
    pub show_help: bool,
    pub load_failed: bool,
    pub last_refreshed: Option<DateTime<Local>>,
    pub initialized: bool,
}

impl App {
    pub fn new() -> Self {
        // Load configuration (fallback to default on error)
        let config = Config::load().unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Self {
        // Build the service client; a bad base URL leaves us with no client
        // and the reason stashed for the first refresh to report
        let (client, startup_error) = match ActivitiesClient::new(&config) {
            Ok(client) => (Some(client), None),
            Err(e) => (None, Some(e.to_string())),
        };

        let form = SignupForm::with_default_email(config.default_email.as_deref());

        // Create the async channel
        let (async_task_tx, async_task_rx) =
            mpsc::channel(constants::async_tasks::CHANNEL_BUFFER_SIZE);

        Self {
            mode: AppMode::Splash,
            activities: Vec::new(),
            activity_list_state: ListState::default(),
            participant_list_state: ListState::default(),
            filter_active: false,
            filter_query: String::new(),
            form,
            pending_removal: None,
            global_command_buffer: String::new(),
            is_global_command_mode: false,
            should_quit: false,
            config,
            client,
            startup_error,
            async_task_tx,
            async_task_rx,
            is_loading: false,
            notice: None,
            show_help: false,
            load_failed: false,
            last_refreshed: None,
            initialized: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // First, check if help modal is shown
        if self.show_help {
            if key.code == KeyCode::Esc || key.code == KeyCode::F(1) || key.code == KeyCode::Char('?')
            {
                self.show_help = false;
            }
            return; // Don't process other keys while help is displayed
        }

        // A pending removal gets first crack at y/n
        if let Some(pending) = self.pending_removal.clone() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.pending_removal = None;
                    self.remove_participant(pending.activity, pending.email);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.pending_removal = None;
                }
                _ => {}
            }
            return;
        }

        // Esc clears a notice early; everything else passes through so the
        // notice never blocks typing
        if self.notice.is_some() && key.code == KeyCode::Esc {
            self.notice = None;
            return;
        }

        // Global help shortcut (? or F1)
        if key.code == KeyCode::F(1)
            || (key.code == KeyCode::Char('?') && self.mode != AppMode::Signup && !self.filter_active)
        {
            self.show_help = true;
            return;
        }

        // Then, handle global commands
        if self.is_global_command_mode {
            self.handle_global_command_input(key);
            return;
        }

        // Check for global shortcuts (not while typing in the form or filter)
        if key.code == KeyCode::Char(':') && self.mode != AppMode::Signup && !self.filter_active {
            self.is_global_command_mode = true;
            self.global_command_buffer.clear();
            return;
        }

        // Then handle mode-specific commands
        match self.mode {
            AppMode::Splash => self.handle_splash_input(key),
            AppMode::Browse => self.handle_browse_input(key),
            AppMode::Signup => self.handle_signup_input(key),
        }
    }

    fn handle_splash_input(&mut self, _key: KeyEvent) {
        // Kick off the initial roster fetch when leaving the splash screen
        if !self.initialized {
            self.refresh();
            self.initialized = true;
        }

        self.mode = AppMode::Browse;
    }

    fn handle_global_command_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.is_global_command_mode = false;
                self.global_command_buffer.clear();
            }
            KeyCode::Enter => {
                self.execute_global_command();
                self.is_global_command_mode = false;
                self.global_command_buffer.clear();
            }
            KeyCode::Backspace => {
                self.global_command_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.global_command_buffer.push(c);
            }
            _ => {}
        }
    }

    pub fn execute_global_command(&mut self) {
        match self.global_command_buffer.as_str() {
            "q" | "quit" => {
                // Signal that we want to exit cleanly
                self.quit();
            }
            "h" | "help" => {
                self.show_help = true;
            }
            "reload" | "refresh" => {
                // Reload the roster from the service
                self.refresh();
            }
            "signup" => {
                self.open_signup();
            }
            _ => {}
        }
    }

    fn handle_browse_input(&mut self, key: KeyEvent) {
        // Handle roster filter mode (uses command bar)
        if self.filter_active {
            self.handle_filter_input(key);
            return;
        }

        let participants_focused = self.participant_list_state.selected().is_some();

        match key.code {
            KeyCode::Esc => {
                if participants_focused {
                    self.participant_list_state.select(None);
                } else if !self.filter_query.is_empty() {
                    self.filter_query.clear();
                    self.reset_activity_selection();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if participants_focused {
                    self.previous_participant();
                } else {
                    self.previous_activity();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if participants_focused {
                    self.next_participant();
                } else {
                    self.next_activity();
                }
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                if participants_focused {
                    self.participant_list_state.select(None);
                } else {
                    let has_participants = self
                        .selected_activity()
                        .map_or(false, |a| !a.participants.is_empty());
                    if has_participants {
                        self.participant_list_state.select(Some(0));
                    }
                }
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                self.participant_list_state.select(None);
            }
            KeyCode::Char('/') => {
                // Activate roster filter (like k9s)
                self.filter_active = true;
                self.filter_query.clear();
            }
            KeyCode::Char('r') => {
                self.refresh();
            }
            KeyCode::Char('s') => {
                self.open_signup();
            }
            KeyCode::Enter => {
                if participants_focused {
                    self.request_removal();
                } else {
                    self.open_signup();
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if participants_focused {
                    self.request_removal();
                }
            }
            _ => {}
        }
    }

    /// Handle input while the roster filter is active
    fn handle_filter_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // Cancel filter, restore the full roster
                self.filter_active = false;
                self.filter_query.clear();
                self.reset_activity_selection();
            }
            KeyCode::Enter => {
                // Confirm filter, keep results, exit filter mode
                self.filter_active = false;
            }
            KeyCode::Backspace => {
                self.filter_query.pop();
                self.reset_activity_selection();
            }
            KeyCode::Up => {
                self.previous_activity();
            }
            KeyCode::Down => {
                self.next_activity();
            }
            KeyCode::Char(c) => {
                self.filter_query.push(c);
                self.reset_activity_selection();
            }
            _ => {}
        }
    }

    fn handle_signup_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // Back to the roster; the draft survives for another try
                self.mode = AppMode::Browse;
            }
            KeyCode::Enter => {
                self.submit_signup();
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form.next_activity(&self.activities);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.previous_activity(&self.activities);
            }
            KeyCode::Backspace => {
                self.form.backspace();
            }
            KeyCode::Char(c) => {
                self.form.type_char(c);
            }
            _ => {}
        }
    }

    /// Route pasted text into whichever input is active.
    pub fn handle_paste(&mut self, text: &str) {
        if self.is_global_command_mode {
            self.global_command_buffer.push_str(text.trim());
        } else if self.filter_active {
            self.filter_query.push_str(text.trim());
            self.reset_activity_selection();
        } else if self.mode == AppMode::Signup {
            self.form.paste(text);
        }
    }

    /// Indices into `activities` that survive the current filter.
    pub fn visible_indices(&self) -> Vec<usize> {
        roster::filter_indices(&self.activities, &self.filter_query)
    }

    /// The activity under the cursor, honoring the filter.
    pub fn selected_activity(&self) -> Option<&Activity> {
        let visible = self.visible_indices();
        self.activity_list_state
            .selected()
            .and_then(|idx| visible.get(idx).copied())
            .and_then(|idx| self.activities.get(idx))
    }

    fn next_activity(&mut self) {
        let count = self.visible_indices().len();
        match self.activity_list_state.selected() {
            Some(selected) if selected < count.saturating_sub(1) => {
                self.activity_list_state.select(Some(selected + 1));
                self.participant_list_state.select(None);
            }
            Some(_) => {}
            None => {
                if count > 0 {
                    self.activity_list_state.select(Some(0));
                }
            }
        }
    }

    fn previous_activity(&mut self) {
        match self.activity_list_state.selected() {
            Some(selected) if selected > 0 => {
                self.activity_list_state.select(Some(selected - 1));
                self.participant_list_state.select(None);
            }
            Some(_) => {}
            None => {
                let count = self.visible_indices().len();
                if count > 0 {
                    self.activity_list_state.select(Some(count - 1));
                }
            }
        }
    }

    fn next_participant(&mut self) {
        let count = self.selected_activity().map_or(0, |a| a.participants.len());
        if let Some(selected) = self.participant_list_state.selected() {
            if selected < count.saturating_sub(1) {
                self.participant_list_state.select(Some(selected + 1));
            }
        }
    }

    fn previous_participant(&mut self) {
        if let Some(selected) = self.participant_list_state.selected() {
            if selected > 0 {
                self.participant_list_state.select(Some(selected - 1));
            }
        }
    }

    /// Point the cursor at the first visible activity, or nothing
    fn reset_activity_selection(&mut self) {
        let count = self.visible_indices().len();
        self.activity_list_state
            .select(if count == 0 { None } else { Some(0) });
        self.participant_list_state.select(None);
    }

    /// Switch to the signup form, prefilling the highlighted activity.
    fn open_signup(&mut self) {
        let highlighted = self.selected_activity().map(|a| a.name.clone());
        if let Some(name) = highlighted {
            self.form.activity = Some(name);
        } else if self.form.activity.is_none() {
            if let Some(first) = self.activities.first() {
                self.form.activity = Some(first.name.clone());
            }
        }
        self.mode = AppMode::Signup;
    }

    /// Reload the roster from the service.
    pub fn refresh(&mut self) {
        if let Some(client) = &self.client {
            self.is_loading = true;
            let client_clone = client.clone();
            let tx_clone = self.async_task_tx.clone();

            // Spawn the async task using tokio::spawn
            tokio::spawn(async move {
                let result = client_clone.fetch_activities().await;
                if let Err(e) = tx_clone.send(AppUpdate::ActivitiesLoaded(result)).await {
                    tracing::debug!("Dropping activities result, app is gone: {}", e);
                }
            });
        } else {
            self.load_failed = true;
            let text = self
                .startup_error
                .clone()
                .unwrap_or_else(|| "Activities service is not configured".to_string());
            self.notice = Some(Notice::error(text, constants::notice::SIGNUP_TTL_MS));
        }
    }

    fn submit_signup(&mut self) {
        if self.is_loading {
            return;
        }

        let (activity, email) = match self.form.validate() {
            Ok(parts) => parts,
            Err(e) => {
                self.notice = Some(Notice::error(
                    e.to_string(),
                    constants::notice::SIGNUP_TTL_MS,
                ));
                return;
            }
        };

        if let Some(client) = &self.client {
            self.is_loading = true;
            let client_clone = client.clone();
            let tx_clone = self.async_task_tx.clone();

            tokio::spawn(async move {
                let result = client_clone.sign_up(&activity, &email).await;
                if let Err(e) = tx_clone.send(AppUpdate::SignupFinished(result)).await {
                    tracing::debug!("Dropping signup result, app is gone: {}", e);
                }
            });
        } else {
            self.notice = Some(Notice::error(
                "Activities service is not configured".to_string(),
                constants::notice::SIGNUP_TTL_MS,
            ));
        }
    }

    /// Ask for confirmation before removing the highlighted participant.
    fn request_removal(&mut self) {
        let pending = self.selected_activity().and_then(|activity| {
            let idx = self.participant_list_state.selected()?;
            let email = activity.participants.get(idx)?;
            Some(PendingRemoval {
                activity: activity.name.clone(),
                email: Email::new(email.clone()),
            })
        });

        self.pending_removal = pending;
    }

    fn remove_participant(&mut self, activity: ActivityName, email: Email) {
        if let Some(client) = &self.client {
            self.is_loading = true;
            let client_clone = client.clone();
            let tx_clone = self.async_task_tx.clone();

            tokio::spawn(async move {
                let result = client_clone.unregister(&activity, &email).await;
                if let Err(e) = tx_clone.send(AppUpdate::RemovalFinished(result)).await {
                    tracing::debug!("Dropping removal result, app is gone: {}", e);
                }
            });
        } else {
            self.notice = Some(Notice::error(
                "Activities service is not configured".to_string(),
                constants::notice::REMOVAL_TTL_MS,
            ));
        }
    }

    // Handle updates from async tasks, one message per frame
    pub fn handle_updates(&mut self) {
        self.expire_notice();

        match self.async_task_rx.try_recv() {
            Ok(update) => match update {
                AppUpdate::ActivitiesLoaded(result) => {
                    self.is_loading = false;
                    match result {
                        Ok(activities) => {
                            self.load_failed = false;
                            self.last_refreshed = Some(Local::now());
                            self.replace_activities(activities);
                        }
                        Err(e) => {
                            // Stale data would be worse than no data here
                            self.load_failed = true;
                            self.activities.clear();
                            self.activity_list_state.select(None);
                            self.participant_list_state.select(None);
                            tracing::warn!("Failed to load activities: {}", e);
                            self.notice = Some(Notice::error(
                                format!("Failed to load activities: {}", e),
                                constants::notice::SIGNUP_TTL_MS,
                            ));
                        }
                    }
                }
                AppUpdate::SignupFinished(result) => {
                    self.is_loading = false;
                    match result {
                        Ok(message) => {
                            self.notice =
                                Some(Notice::success(message, constants::notice::SIGNUP_TTL_MS));
                            self.form =
                                SignupForm::with_default_email(self.config.default_email.as_deref());
                            self.mode = AppMode::Browse;
                            self.refresh();
                        }
                        Err(e) => {
                            // Keep the draft so the student can correct and resubmit
                            let text = e.service_detail().map_or_else(
                                || "Failed to sign up. Please try again.".to_string(),
                                ToString::to_string,
                            );
                            tracing::warn!("Signup failed: {}", e);
                            self.notice =
                                Some(Notice::error(text, constants::notice::SIGNUP_TTL_MS));
                        }
                    }
                }
                AppUpdate::RemovalFinished(result) => {
                    self.is_loading = false;
                    match result {
                        Ok(message) => {
                            self.notice =
                                Some(Notice::success(message, constants::notice::REMOVAL_TTL_MS));
                            self.refresh();
                        }
                        Err(e) => {
                            let text = e.service_detail().map_or_else(
                                || "Failed to remove participant".to_string(),
                                ToString::to_string,
                            );
                            tracing::warn!("Removal failed: {}", e);
                            self.notice =
                                Some(Notice::error(text, constants::notice::REMOVAL_TTL_MS));
                        }
                    }
                }
            },
            Err(mpsc::error::TryRecvError::Empty) => {}
            Err(mpsc::error::TryRecvError::Disconnected) => {
                // Channel disconnected - could log this if needed
            }
        }
    }

    /// Drop the notice once its display window has passed.
    fn expire_notice(&mut self) {
        if self.notice.as_ref().map_or(false, Notice::is_expired) {
            self.notice = None;
        }
    }

    /// Swap in a fresh roster, keeping the cursor on the same activity when
    /// it is still present.
    fn replace_activities(&mut self, activities: Vec<Activity>) {
        let previous = self.selected_activity().map(|a| a.name.clone());
        self.activities = activities;

        let visible = self.visible_indices();
        let restored = previous
            .and_then(|name| visible.iter().position(|&idx| self.activities[idx].name == name));

        self.activity_list_state.select(match restored {
            Some(idx) => Some(idx),
            None if visible.is_empty() => None,
            None => Some(0),
        });
        self.participant_list_state.select(None);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
