//! Application state and update logic for the placedeck TUI.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use placedeck_core::{
    Config, ImageSlot, NavIntent, Navigator, PanelContent, PanelView, ResultSet, Router,
};

use crate::event::Action;
use crate::feed::FeedEvent;
use crate::hit::HitMap;
use crate::panel::{gallery_boxes, panel_inner};
use crate::surface::TuiSurface;
use crate::theme::{Icons, Theme};
use crate::transcript::Message;
use ratatui::layout::Rect;

/// Ticks a notification stays on screen (at 4 Hz).
const NOTIFICATION_TTL: usize = 12;

/// Collects dispatched navigation intents.
///
/// Performing the navigation is outside this app; the newest intent is
/// surfaced in the status line and kept for inspection.
#[derive(Debug, Default)]
pub struct IntentLog {
    intents: Vec<NavIntent>,
}

impl IntentLog {
    pub fn last(&self) -> Option<&NavIntent> {
        self.intents.last()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

impl Navigator for IntentLog {
    fn navigate(&mut self, intent: NavIntent) {
        tracing::info!(path = intent.path(), "navigation intent");
        self.intents.push(intent);
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    pub config: Config,

    pub theme: Theme,

    pub icons: Icons,

    /// The panel view driving the TUI surface.
    pub panel: PanelView<TuiSurface>,

    /// The current result set. Owned here as the receiver of agent output;
    /// superseded wholesale by every new arrival.
    pub results: ResultSet,

    /// Selected card index (gallery mode).
    pub selected: usize,

    /// Leading cards scrolled out of view.
    pub panel_scroll: usize,

    /// Conversation history.
    pub transcript: Vec<Message>,

    /// Lines scrolled back from the transcript tail.
    pub transcript_scroll: usize,

    /// Hit regions of the last rendered frame.
    pub hit_map: HitMap,

    /// The document-level router slot. Holds at most one router.
    pub router: Option<Router<IntentLog>>,

    /// Local directory backing the static-image root, when present.
    pub assets_dir: Option<PathBuf>,

    /// When the last result set arrived.
    pub updated_at: Option<DateTime<Local>>,

    /// Notification message (displayed temporarily, cleared after some ticks).
    pub notification: Option<String>,

    /// Ticks remaining until notification is cleared.
    notification_ttl: usize,
}

impl App {
    /// Create a new app instance.
    pub fn new(config: Config, assets_dir: Option<PathBuf>) -> Self {
        let mut panel = PanelView::new(config.assets.clone());
        panel.bind(TuiSurface::default());

        let mut app = Self {
            should_quit: false,
            show_help: false,
            theme: Theme::default(),
            icons: Icons::new(std::env::var_os("NO_COLOR").is_some()),
            panel,
            results: ResultSet::Empty,
            selected: 0,
            panel_scroll: 0,
            transcript: Vec::new(),
            transcript_scroll: 0,
            hit_map: HitMap::default(),
            router: None,
            assets_dir,
            updated_at: None,
            notification: None,
            notification_ttl: 0,
            config,
        };
        app.install_router();
        if app.config.panel.start_open {
            app.panel.toggle();
        }
        app
    }

    /// Install the delegated click router.
    ///
    /// The slot holds at most one router for the app's lifetime; calling
    /// this again keeps the existing one, so a click can never dispatch
    /// duplicate intents.
    pub fn install_router(&mut self) {
        let router = Router::new(
            IntentLog::default(),
            self.config.panel.detail_route.clone(),
        );
        if router.install(&mut self.router).is_err() {
            tracing::debug!("router already installed, keeping the existing one");
        }
    }

    /// Handle a feed event.
    pub fn on_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Message { role, text } => {
                self.transcript.push(Message::new(role, text));
                self.transcript_scroll = 0;
            }
            FeedEvent::Results(results) => self.apply_results(results),
        }
    }

    /// Apply a new result set to the panel. The latest set fully
    /// supersedes prior content.
    pub fn apply_results(&mut self, results: ResultSet) {
        self.selected = 0;
        self.panel_scroll = 0;
        self.panel.apply(&results);
        self.probe_images();
        self.results = results;
        self.updated_at = Some(Local::now());
    }

    /// Check local image sources against the assets directory and run the
    /// one-shot fallback for missing files. Remote sources are not probed.
    fn probe_images(&mut self) {
        let Some(dir) = self.assets_dir.clone() else {
            return;
        };
        let static_root = self.config.assets.static_root.clone();
        let Some(surface) = self.panel.surface_mut() else {
            return;
        };
        match surface.content_mut() {
            PanelContent::Empty => {}
            PanelContent::Detail(detail) => probe_slot(&mut detail.image, &static_root, &dir),
            PanelContent::Gallery(gallery) => {
                for card in &mut gallery.cards {
                    probe_slot(&mut card.image, &static_root, &dir);
                }
            }
        }
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
            }
            Action::Help => self.show_help = !self.show_help,
            Action::Back => self.show_help = false,
            Action::TogglePanel => self.panel.toggle(),
            Action::Up => self.move_up(),
            Action::Down => self.move_down(),
            Action::Open => self.open_selected(),
            Action::CopyLink => self.copy_selected_link(),
            Action::None => {}
        }
    }

    /// Whether up/down drive card selection rather than transcript scroll.
    fn selecting_cards(&self) -> bool {
        self.panel.is_shown() && matches!(self.results, ResultSet::Many(_))
    }

    fn move_up(&mut self) {
        if self.selecting_cards() {
            self.selected = self.selected.saturating_sub(1);
        } else {
            self.transcript_scroll = self.transcript_scroll.saturating_add(1);
        }
    }

    fn move_down(&mut self) {
        if self.selecting_cards() {
            let last = self.results.len().saturating_sub(1);
            self.selected = (self.selected + 1).min(last);
        } else {
            self.transcript_scroll = self.transcript_scroll.saturating_sub(1);
        }
    }

    /// Open the selected place: the keyboard equivalent of clicking its
    /// card, dispatching the same navigation intent.
    pub fn open_selected(&mut self) {
        let Some(place) = self.results.places().get(self.selected) else {
            return;
        };
        let place_id = place.id.clone();
        if let Some(router) = self.router.as_mut() {
            router.dispatch(&place_id);
        }
        self.notify_last_intent();
    }

    /// Handle a mouse click at the given cell.
    pub fn click_at(&mut self, x: u16, y: u16) {
        let Some(node) = self.hit_map.node_at(x, y) else {
            return;
        };
        let Some(router) = self.router.as_mut() else {
            return;
        };
        if router.handle_click(node) {
            self.notify_last_intent();
        }
    }

    fn notify_last_intent(&mut self) {
        if let Some(path) = self
            .router
            .as_ref()
            .and_then(|router| router.navigator().last())
            .map(|intent| intent.path().to_string())
        {
            self.notify(format!("open {path}"));
        }
    }

    /// Copy the selected place's detail path to the clipboard.
    pub fn copy_selected_link(&mut self) {
        let Some(place) = self.results.places().get(self.selected) else {
            self.notify("Nothing to copy");
            return;
        };
        let path = NavIntent::new(&self.config.panel.detail_route, &place.id)
            .path()
            .to_string();
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(path.clone())) {
            Ok(()) => self.notify(format!("copied {path}")),
            Err(error) => {
                tracing::warn!(%error, "clipboard unavailable");
                self.notify("Clipboard unavailable");
            }
        }
    }

    /// Rebuild the hit map from the panel's geometry for this frame, and
    /// keep the selected card scrolled into view.
    pub fn rebuild_hit_map(&mut self, panel_area: Rect) {
        self.hit_map.clear();
        let Some(surface) = self.panel.surface() else {
            return;
        };

        let root = self.hit_map.push(panel_area, None);
        let inner = panel_inner(panel_area);
        match surface.content() {
            PanelContent::Empty => {}
            PanelContent::Detail(detail) => {
                self.hit_map
                    .push_card(inner, Some(&detail.place_id), Some(root));
            }
            PanelContent::Gallery(gallery) => {
                if self.panel_scroll > self.selected {
                    self.panel_scroll = self.selected;
                }
                let mut boxes = gallery_boxes(gallery, inner, self.panel_scroll);
                while self.panel_scroll < self.selected
                    && self.selected >= self.panel_scroll + boxes.len()
                {
                    self.panel_scroll += 1;
                    boxes = gallery_boxes(gallery, inner, self.panel_scroll);
                    if boxes.is_empty() {
                        break;
                    }
                }

                for cbox in &boxes {
                    let card =
                        self.hit_map
                            .push_card(cbox.card, Some(&cbox.place_id), Some(root));
                    self.hit_map.push(cbox.image, Some(card));
                    let body = self.hit_map.push(cbox.body, Some(card));
                    if let Some(line) = cbox.tags_line {
                        self.hit_map.push(line, Some(body));
                    }
                    if let Some(line) = cbox.rating_line {
                        self.hit_map.push(line, Some(body));
                    }
                }
            }
        }
    }

    /// Display a temporary notification.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
        self.notification_ttl = NOTIFICATION_TTL;
    }

    /// Advance animations and expire notifications.
    pub fn tick(&mut self) {
        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }
}

/// Probe one image slot against the local assets directory.
fn probe_slot(slot: &mut ImageSlot, static_root: &str, dir: &Path) {
    if slot.src().contains("://") {
        return;
    }
    let present = slot
        .src()
        .strip_prefix(static_root.trim_end_matches('/'))
        .map(|rel| dir.join(rel.trim_start_matches('/')))
        .is_some_and(|path| path.exists());
    if !present && slot.on_load_failure() {
        tracing::debug!(src = slot.src(), "image missing, swapped to default asset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placedeck_core::{PanelMode, Place};

    fn test_app() -> App {
        App::new(Config::default(), None)
    }

    fn places(n: usize) -> ResultSet {
        ResultSet::from_places(
            (1..=n)
                .map(|i| {
                    let mut place = Place::with_id(format!("p{i}"));
                    place.name = Some(format!("Place {i}"));
                    place
                })
                .collect(),
        )
    }

    fn gallery_area() -> Rect {
        Rect::new(40, 0, 40, 40)
    }

    #[test]
    fn test_results_drive_panel_mode() {
        let mut app = test_app();
        assert_eq!(app.panel.mode(), PanelMode::Empty);
        assert!(!app.panel.is_shown());

        app.apply_results(places(1));
        assert_eq!(app.panel.mode(), PanelMode::Detail);
        assert!(app.panel.is_shown());

        app.apply_results(places(3));
        assert_eq!(app.panel.mode(), PanelMode::Gallery);

        app.apply_results(ResultSet::Empty);
        assert_eq!(app.panel.mode(), PanelMode::Empty);
        assert!(!app.panel.is_shown());
    }

    #[test]
    fn test_toggle_is_independent_of_content() {
        let mut app = test_app();
        app.handle_action(Action::TogglePanel);
        assert!(app.panel.is_shown());
        assert_eq!(app.panel.mode(), PanelMode::Empty);

        // New content takes visibility back over.
        app.apply_results(ResultSet::Empty);
        assert!(!app.panel.is_shown());
    }

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut app = test_app();
        app.apply_results(places(3));

        app.handle_action(Action::Down);
        app.handle_action(Action::Down);
        assert_eq!(app.selected, 2);
        app.handle_action(Action::Down);
        assert_eq!(app.selected, 2);

        app.handle_action(Action::Up);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_open_selected_dispatches_intent() {
        let mut app = test_app();
        app.apply_results(places(2));
        app.handle_action(Action::Down);
        app.open_selected();

        let log = app.router.as_ref().unwrap().navigator();
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().unwrap().path(), "/image/p2");
        assert_eq!(app.notification.as_deref(), Some("open /image/p2"));
    }

    #[test]
    fn test_open_with_no_results_is_ignored() {
        let mut app = test_app();
        app.open_selected();
        assert!(app.router.as_ref().unwrap().navigator().is_empty());
    }

    #[test]
    fn test_click_through_hit_map() {
        let mut app = test_app();
        app.apply_results(places(2));
        app.rebuild_hit_map(gallery_area());

        assert!(app.hit_map.card_node("p2").is_some());

        // (42, 11) lands in the second card's image strip.
        app.click_at(42, 11);

        let log = app.router.as_ref().unwrap().navigator();
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().unwrap().place_id(), "p2");
    }

    #[test]
    fn test_click_outside_cards_is_ignored() {
        let mut app = test_app();
        app.apply_results(places(2));
        app.rebuild_hit_map(gallery_area());

        // Inside the panel, below the cards.
        app.click_at(42, 35);
        assert!(app.router.as_ref().unwrap().navigator().is_empty());

        // Outside the panel entirely.
        app.click_at(5, 5);
        assert!(app.router.as_ref().unwrap().navigator().is_empty());
    }

    #[test]
    fn test_router_installs_only_once() {
        let mut app = test_app();
        app.apply_results(places(1));
        app.open_selected();
        assert_eq!(app.router.as_ref().unwrap().navigator().len(), 1);

        // A second install keeps the existing router and its log.
        app.install_router();
        assert_eq!(app.router.as_ref().unwrap().navigator().len(), 1);
    }

    #[test]
    fn test_notification_expires() {
        let mut app = test_app();
        app.notify("hello");
        assert!(app.notification.is_some());
        for _ in 0..NOTIFICATION_TTL {
            app.tick();
        }
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_feed_messages_land_in_transcript() {
        let mut app = test_app();
        app.on_feed_event(FeedEvent::Message {
            role: crate::transcript::Role::Agent,
            text: "hello".into(),
        });
        assert_eq!(app.transcript.len(), 1);

        app.on_feed_event(FeedEvent::Results(places(2)));
        assert_eq!(app.panel.mode(), PanelMode::Gallery);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut app = test_app();
        app.apply_results(places(8));
        // Small panel: room for the header and one card.
        let area = Rect::new(0, 0, 30, 10);

        app.rebuild_hit_map(area);
        assert_eq!(app.panel_scroll, 0);

        app.selected = 4;
        app.rebuild_hit_map(area);
        assert_eq!(app.panel_scroll, 4);

        app.selected = 1;
        app.rebuild_hit_map(area);
        assert_eq!(app.panel_scroll, 1);
    }

    #[test]
    fn test_missing_local_image_falls_back_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("present.jpg"), b"jpg").unwrap();

        let mut app = App::new(Config::default(), Some(dir.path().to_path_buf()));
        let mut present = Place::with_id("p1");
        present.filename = Some("present.jpg".into());
        let mut missing = Place::with_id("p2");
        missing.filename = Some("missing.jpg".into());
        app.apply_results(ResultSet::from_places(vec![present, missing]));

        let PanelContent::Gallery(gallery) = app.panel.surface().unwrap().content() else {
            panic!("expected gallery");
        };
        assert_eq!(gallery.cards[0].image.src(), "/static/images/present.jpg");
        assert!(gallery.cards[0].image.fallback_armed());
        // Missing file swapped to the default asset, fallback disarmed.
        assert_eq!(gallery.cards[1].image.src(), "/static/images/default.jpg");
        assert!(!gallery.cards[1].image.fallback_armed());
    }

    #[test]
    fn test_remote_images_are_not_probed() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(Config::default(), Some(dir.path().to_path_buf()));
        let mut place = Place::with_id("p1");
        place.filename = Some("https://x/paris.jpg".into());
        app.apply_results(ResultSet::Single(place));

        let PanelContent::Detail(detail) = app.panel.surface().unwrap().content() else {
            panic!("expected detail");
        };
        assert_eq!(detail.image.src(), "https://x/paris.jpg");
        assert!(detail.image.fallback_armed());
    }
}
