use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::input::Keystroke;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Merges terminal input and a fixed-rate tick into one ordered stream.
///
/// Ticks come from their own thread so a burst of typing can't starve the
/// clock. Both threads exit once the handler is dropped.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    shutdown: Arc<AtomicBool>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let shutdown = Arc::new(AtomicBool::new(false));

        let input_tx = tx.clone();
        let input_shutdown = Arc::clone(&shutdown);
        thread::spawn(move || {
            while !input_shutdown.load(Ordering::Relaxed) {
                if !event::poll(tick_rate).unwrap_or(false) {
                    continue;
                }
                let forwarded = match event::read() {
                    Ok(Event::Key(key)) => input_tx.send(AppEvent::Key(key)),
                    Ok(Event::Resize(_, _)) => input_tx.send(AppEvent::Resize),
                    Ok(_) => Ok(()),
                    Err(err) => {
                        tracing::error!(%err, "terminal read failed");
                        return;
                    }
                };
                if forwarded.is_err() {
                    return;
                }
            }
        });

        let tick_shutdown = Arc::clone(&shutdown);
        thread::spawn(move || {
            while !tick_shutdown.load(Ordering::Relaxed) {
                thread::sleep(tick_rate);
                if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, shutdown }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

/// Gameplay translation of a raw key. Releases, repeats and Ctrl/Alt
/// chords never reach the engine.
pub fn keystroke(key: &KeyEvent) -> Option<Keystroke> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(ch) => Keystroke::from_char(ch),
        KeyCode::Backspace | KeyCode::Delete => Some(Keystroke::Backspace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn printable_chars_map_to_char() {
        assert_eq!(
            keystroke(&press(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(Keystroke::Char('a'))
        );
        assert_eq!(
            keystroke(&press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Keystroke::Char('A'))
        );
    }

    #[test]
    fn space_is_separator() {
        assert_eq!(
            keystroke(&press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Keystroke::Space)
        );
    }

    #[test]
    fn backspace_and_delete_both_erase() {
        assert_eq!(
            keystroke(&press(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Keystroke::Backspace)
        );
        assert_eq!(
            keystroke(&press(KeyCode::Delete, KeyModifiers::NONE)),
            Some(Keystroke::Backspace)
        );
    }

    #[test]
    fn chords_and_non_text_keys_are_filtered() {
        assert_eq!(keystroke(&press(KeyCode::Char('w'), KeyModifiers::CONTROL)), None);
        assert_eq!(keystroke(&press(KeyCode::Char('b'), KeyModifiers::ALT)), None);
        assert_eq!(keystroke(&press(KeyCode::Enter, KeyModifiers::NONE)), None);
        assert_eq!(keystroke(&press(KeyCode::Tab, KeyModifiers::NONE)), None);
        assert_eq!(keystroke(&press(KeyCode::Char('\u{e9}'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(keystroke(&release), None);
    }
}
