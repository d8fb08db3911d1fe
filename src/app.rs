//! Application state and navigation logic.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde_json::{Map, Value};

use crate::data::{render_json, PolledValue};
use crate::settings::ResolvedSettings;
use crate::source::{ApiBase, Endpoint, Fetcher, PollSubscription};
use crate::ui::Theme;

/// Label of the panel showing `/status`.
pub const AGENTS_LABEL: &str = "Agents";
/// Label of the panel showing `/messages`.
pub const MESSAGES_LABEL: &str = "Messages";

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// One labeled section of the dashboard, bound to its own subscription.
#[derive(Debug)]
pub struct Panel {
    pub label: &'static str,
    subscription: PollSubscription,
    /// The value currently on screen.
    pub value: Option<PolledValue>,
    /// First visible line of the rendered JSON.
    pub scroll: u16,
}

impl Panel {
    pub fn new(label: &'static str, subscription: PollSubscription) -> Self {
        Self {
            label,
            subscription,
            value: None,
            scroll: 0,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        self.subscription.endpoint()
    }

    /// Pull the latest value from the subscription. Returns true if it changed.
    pub fn sync(&mut self) -> bool {
        match self.subscription.poll() {
            Some(value) => {
                self.value = Some(value);
                self.clamp_scroll();
                true
            }
            None => false,
        }
    }

    /// The panel body: pretty-printed JSON, or `null` while absent.
    pub fn text(&self) -> String {
        render_json(self.value.as_ref())
    }

    pub fn line_count(&self) -> usize {
        self.text().lines().count()
    }

    pub fn scroll_down(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_add(n);
        self.clamp_scroll();
    }

    pub fn scroll_up(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn max_scroll(&self) -> u16 {
        let lines = self.line_count().saturating_sub(1);
        u16::try_from(lines).unwrap_or(u16::MAX)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Fetch now, outside the regular cadence.
    pub fn refresh(&self) {
        self.subscription.refresh();
    }

    pub fn is_running(&self) -> bool {
        self.subscription.is_running()
    }

    /// Stop polling this panel's endpoint.
    pub fn stop(&mut self) {
        self.subscription.stop();
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub panels: Vec<Panel>,
    pub focused: usize,
    pub theme: Theme,

    base: ApiBase,
    interval: Duration,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create an App over already running panels.
    pub fn new(panels: Vec<Panel>, base: ApiBase, interval: Duration, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            panels,
            focused: 0,
            theme,
            base,
            interval,
            status_message: None,
        }
    }

    /// Start polling both endpoints and build the App around them.
    ///
    /// Must be called within a Tokio runtime.
    pub fn start(settings: &ResolvedSettings, fetcher: Arc<dyn Fetcher>, theme: Theme) -> Self {
        let agents =
            PollSubscription::start(settings.status.clone(), fetcher.clone(), settings.interval);
        let messages =
            PollSubscription::start(settings.messages.clone(), fetcher, settings.interval);

        let panels = vec![
            Panel::new(AGENTS_LABEL, agents),
            Panel::new(MESSAGES_LABEL, messages),
        ];

        Self::new(panels, settings.base.clone(), settings.interval, theme)
    }

    /// Returns a description of where the endpoints are polled from.
    pub fn source_description(&self) -> String {
        self.base.to_string()
    }

    /// The polling period shared by all panels.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Pull new values into every panel. Returns true if any panel changed.
    pub fn sync(&mut self) -> bool {
        let mut changed = false;
        for panel in &mut self.panels {
            changed |= panel.sync();
        }
        changed
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    pub fn focused_panel(&self) -> Option<&Panel> {
        self.panels.get(self.focused)
    }

    pub fn focused_panel_mut(&mut self) -> Option<&mut Panel> {
        self.panels.get_mut(self.focused)
    }

    /// Move focus to the next panel (wraps around).
    pub fn focus_next(&mut self) {
        if !self.panels.is_empty() {
            self.focused = (self.focused + 1) % self.panels.len();
        }
    }

    /// Move focus to the previous panel (wraps around).
    pub fn focus_prev(&mut self) {
        if !self.panels.is_empty() {
            self.focused = (self.focused + self.panels.len() - 1) % self.panels.len();
        }
    }

    /// Focus a panel by index, ignoring out-of-range indices.
    pub fn focus(&mut self, index: usize) {
        if index < self.panels.len() {
            self.focused = index;
        }
    }

    pub fn scroll_down(&mut self, n: u16) {
        if let Some(panel) = self.focused_panel_mut() {
            panel.scroll_down(n);
        }
    }

    pub fn scroll_up(&mut self, n: u16) {
        if let Some(panel) = self.focused_panel_mut() {
            panel.scroll_up(n);
        }
    }

    pub fn scroll_to_top(&mut self) {
        if let Some(panel) = self.focused_panel_mut() {
            panel.scroll_to_top();
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        if let Some(panel) = self.focused_panel_mut() {
            panel.scroll_to_bottom();
        }
    }

    /// Fetch every endpoint now, outside the regular cadence.
    pub fn refresh_all(&mut self) {
        for panel in &self.panels {
            panel.refresh();
        }
        self.set_status_message("Refreshing...".to_string());
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Stop polling every endpoint. Called on teardown.
    pub fn shutdown(&mut self) {
        for panel in &mut self.panels {
            panel.stop();
        }
    }

    /// Current values keyed by endpoint path.
    pub fn snapshot(&self) -> Value {
        snapshot_json(self.panels.iter().map(|p| (p.endpoint().path(), p.value.as_ref())))
    }

    /// Export current values to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        write_export(path, &self.snapshot())
    }
}

/// Build an export document mapping endpoint paths to their values (`null` when absent).
pub fn snapshot_json<'a>(
    entries: impl IntoIterator<Item = (&'a str, Option<&'a PolledValue>)>,
) -> Value {
    let mut export = Map::new();
    for (path, value) in entries {
        export.insert(
            path.to_string(),
            value.map(|v| v.value.clone()).unwrap_or(Value::Null),
        );
    }
    Value::Object(export)
}

/// Write an export document as pretty-printed JSON.
pub fn write_export(path: &Path, export: &Value) -> Result<()> {
    use std::io::Write;

    let json = serde_json::to_string_pretty(export)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::source::testing::ScriptedFetcher;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn start_app(fetcher: Arc<ScriptedFetcher>) -> App {
        let settings = Settings::default().resolve().unwrap();
        App::start(&settings, fetcher, Theme::dark())
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_builds_labeled_panels() {
        let app = start_app(Arc::new(ScriptedFetcher::default()));

        let labels: Vec<&str> = app.panels.iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["Agents", "Messages"]);
        assert_eq!(app.panels[0].endpoint().path(), "/status");
        assert_eq!(app.panels[1].endpoint().path(), "/messages");
        assert_eq!(app.source_description(), "http://127.0.0.1:8000 (fallback)");
        assert_eq!(app.interval(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_updates_panels_independently() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        fetcher.push("/status", Ok(json!({"agents": []})));
        let mut app = start_app(fetcher.clone());

        assert_eq!(app.panels[0].text(), "null");

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(app.sync());
        assert_eq!(app.panels[0].text(), "{\n  \"agents\": []\n}");
        // /messages has nothing scripted, so it stays absent
        assert_eq!(app.panels[1].text(), "null");

        // Nothing new since the last sync
        assert!(!app.sync());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_every_panel() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        let mut app = start_app(fetcher.clone());

        tokio::time::sleep(Duration::from_millis(10)).await;
        app.shutdown();
        assert!(app.panels.iter().all(|p| !p.is_running()));

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(fetcher.call_times("http://127.0.0.1:8000/status").len(), 1);
        assert_eq!(fetcher.call_times("http://127.0.0.1:8000/messages").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_wraps() {
        let mut app = start_app(Arc::new(ScriptedFetcher::default()));

        assert_eq!(app.focused, 0);
        app.focus_next();
        assert_eq!(app.focused, 1);
        app.focus_next();
        assert_eq!(app.focused, 0);
        app.focus_prev();
        assert_eq!(app.focused, 1);
        app.focus(7);
        assert_eq!(app.focused, 1);
        app.focus(0);
        assert_eq!(app.focused, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_is_clamped_to_content() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        fetcher.push("/status", Ok(json!({"agents": ["a1", "a2", "a3"]})));
        let mut app = start_app(fetcher);

        tokio::time::sleep(Duration::from_millis(10)).await;
        app.sync();

        // 7 lines of JSON: "{", "\"agents\": [", three items, "]", "}"
        assert_eq!(app.panels[0].line_count(), 7);

        app.scroll_down(3);
        assert_eq!(app.panels[0].scroll, 3);
        app.scroll_down(100);
        assert_eq!(app.panels[0].scroll, 6);
        app.scroll_up(2);
        assert_eq!(app.panels[0].scroll, 4);
        app.scroll_to_top();
        assert_eq!(app.panels[0].scroll, 0);
        app.scroll_to_bottom();
        assert_eq!(app.panels[0].scroll, 6);

        // The unfocused panel is untouched
        assert_eq!(app.panels[1].scroll, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_all_fetches_every_endpoint() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        let mut app = start_app(fetcher.clone());

        tokio::time::sleep(Duration::from_millis(100)).await;
        app.refresh_all();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(fetcher.call_times("http://127.0.0.1:8000/status").len(), 2);
        assert_eq!(fetcher.call_times("http://127.0.0.1:8000/messages").len(), 2);
        assert_eq!(app.get_status_message(), Some("Refreshing..."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_state() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        fetcher.push("/messages", Ok(json!({"messages": [{"topic": "weather"}]})));
        let mut app = start_app(fetcher);

        tokio::time::sleep(Duration::from_millis(10)).await;
        app.sync();

        let file = NamedTempFile::new().unwrap();
        app.export_state(file.path()).unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({
                "/status": null,
                "/messages": {"messages": [{"topic": "weather"}]}
            })
        );
    }

    #[test]
    fn test_snapshot_json_marks_absent_as_null() {
        let value = PolledValue::new(json!({"a": 1}));
        let export = snapshot_json(vec![("/status", Some(&value)), ("/messages", None)]);
        assert_eq!(export, json!({"/status": {"a": 1}, "/messages": null}));
    }

    #[test]
    fn test_status_message_expires() {
        let mut app = App::new(Vec::new(), ApiBase::Fallback, Duration::from_secs(2), Theme::dark());
        assert!(app.get_status_message().is_none());

        app.set_status_message("Exported".to_string());
        assert_eq!(app.get_status_message(), Some("Exported"));

        app.status_message = Some(("old".to_string(), Instant::now() - Duration::from_secs(10)));
        assert!(app.get_status_message().is_none());
    }
}
