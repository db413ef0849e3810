use std::time::Instant;

use chrono::Utc;

use crate::config::Config;
use crate::generator::RandomWords;
use crate::generator::dictionary::Corpus;
use crate::session::input::Keystroke;
use crate::session::result::{HistoryEntry, SessionResult};
use crate::session::{Phase, Session};
use crate::store::json_store::JsonStore;
use crate::store::schema::Settings;
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Game,
    Results,
}

pub struct App {
    pub screen: AppScreen,
    pub session: Option<Session>,
    pub last_result: Option<SessionResult>,
    /// Personal best for the last result's duration, read after saving it.
    pub last_best: Option<u32>,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub settings: Settings,
    pub should_quit: bool,
    store: Option<JsonStore>,
    words: RandomWords,
}

impl App {
    pub fn new(config: Config, corpus: Corpus, store: Option<JsonStore>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "unknown theme, using default");
            Theme::default()
        });
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let settings = store
            .as_ref()
            .map(JsonStore::load_settings)
            .unwrap_or_default();
        let menu = Menu::new(theme, settings.last_duration);

        let mut app = Self {
            screen: AppScreen::Menu,
            session: None,
            last_result: None,
            last_best: None,
            menu,
            theme,
            config,
            settings,
            should_quit: false,
            store,
            words: RandomWords::new(corpus),
        };
        app.refresh_menu_best();
        app
    }

    pub fn personal_best(&self, duration: u32) -> Option<u32> {
        self.store.as_ref().and_then(|s| s.personal_best(duration))
    }

    pub fn refresh_menu_best(&mut self) {
        self.menu.personal_best = self.personal_best(self.menu.duration());
    }

    /// Always builds a brand new session; any previous one is abandoned and
    /// dropped first.
    pub fn start_session(&mut self, duration: u32) {
        self.discard_session();

        if self.settings.last_duration != duration {
            self.settings.last_duration = duration;
            if let Some(ref store) = self.store
                && let Err(err) = store.save_settings(&self.settings)
            {
                tracing::warn!(%err, "failed to save settings");
            }
        }

        self.session = Some(Session::new(&mut self.words, duration));
        self.last_result = None;
        self.last_best = None;
        self.screen = AppScreen::Game;
    }

    pub fn start_selected(&mut self) {
        let duration = self.menu.duration();
        self.start_session(duration);
    }

    /// Fresh session of the same length as the current or last one.
    pub fn restart(&mut self) {
        let duration = self
            .session
            .as_ref()
            .map(Session::duration_secs)
            .or(self.last_result.map(|r| r.duration_secs))
            .unwrap_or(self.settings.last_duration);
        self.start_session(duration);
    }

    pub fn go_to_menu(&mut self) {
        self.discard_session();
        self.menu = Menu::new(self.theme, self.settings.last_duration);
        self.refresh_menu_best();
        self.screen = AppScreen::Menu;
    }

    pub fn quit(&mut self) {
        self.discard_session();
        self.should_quit = true;
    }

    fn discard_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.abandon();
        }
    }

    pub fn on_tick_at(&mut self, now: Instant) {
        let finished = self.session.as_mut().and_then(|s| s.tick_at(now));
        if let Some(result) = finished {
            self.finish(result);
        }
    }

    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now());
    }

    /// The clock is brought up to date first so a key landing after expiry
    /// is never applied.
    pub fn type_key_at(&mut self, key: Keystroke, now: Instant) {
        self.on_tick_at(now);
        if let Some(ref mut session) = self.session
            && session.phase() != Phase::Finished
        {
            session.apply_key_at(key, now);
        }
    }

    pub fn type_key(&mut self, key: Keystroke) {
        self.type_key_at(key, Instant::now());
    }

    fn finish(&mut self, result: SessionResult) {
        self.session = None;

        if let Some(ref store) = self.store
            && let Err(err) = store.append_result(HistoryEntry::from_result(&result, Utc::now()))
        {
            tracing::warn!(%err, "failed to save session result");
        }

        self.last_best = self.personal_best(result.duration_secs);
        self.last_result = Some(result);
        self.screen = AppScreen::Results;
    }
}
