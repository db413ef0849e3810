use std::time::Instant;

use crate::engine::scoring::{self, ScoreAccumulator, ScoreSnapshot};
use crate::engine::timer::{SessionTimer, Tick};
use crate::error::SessionError;
use crate::generator::{WordSource, word_count_for};
use crate::session::input::{self, Keystroke, TypingState, WordOutcome};
use crate::session::result::SessionResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveMetrics {
    pub wpm: u32,
    pub accuracy: f64,
}

/// Read-only view handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct SessionSnapshot<'a> {
    pub words: &'a [String],
    pub current_word_index: usize,
    pub current_input: &'a str,
    pub word_inputs: &'a [String],
    pub outcomes: &'a [WordOutcome],
    pub time_left: u32,
    pub phase: Phase,
}

/// One timed typing test. Owns its word list, score and timer; a restart
/// builds a fresh `Session` rather than resetting this one.
pub struct Session {
    typing: TypingState,
    score: ScoreAccumulator,
    timer: SessionTimer,
    phase: Phase,
}

impl Session {
    pub fn new<S: WordSource + ?Sized>(source: &mut S, duration_secs: u32) -> Self {
        let words = source.generate_words(word_count_for(duration_secs));
        Self::with_words(words, duration_secs)
    }

    pub fn with_words(words: Vec<String>, duration_secs: u32) -> Self {
        Self {
            typing: TypingState::new(words),
            score: ScoreAccumulator::new(),
            timer: SessionTimer::new(duration_secs),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn duration_secs(&self) -> u32 {
        self.timer.duration_secs()
    }

    pub fn time_left(&self) -> u32 {
        self.timer.time_left()
    }

    pub fn words(&self) -> &[String] {
        &self.typing.words
    }

    pub fn current_word_index(&self) -> usize {
        self.typing.current_word_index
    }

    pub fn current_input(&self) -> &str {
        self.typing.current_input()
    }

    pub fn word_inputs(&self) -> &[String] {
        &self.typing.word_inputs
    }

    pub fn outcomes(&self) -> &[WordOutcome] {
        &self.typing.outcomes
    }

    pub fn score(&self) -> ScoreSnapshot {
        self.score.snapshot()
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            words: &self.typing.words,
            current_word_index: self.typing.current_word_index,
            current_input: self.typing.current_input(),
            word_inputs: &self.typing.word_inputs,
            outcomes: &self.typing.outcomes,
            time_left: self.timer.time_left(),
            phase: self.phase,
        }
    }

    /// Explicit start; typing the first character does the same thing.
    pub fn start_at(&mut self, now: Instant) {
        if self.phase != Phase::Idle {
            return;
        }
        if self.timer.start_at(now) {
            self.phase = Phase::Running;
            tracing::debug!(duration = self.duration_secs(), "session started");
        }
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn apply_key_at(&mut self, key: Keystroke, now: Instant) {
        if self.phase == Phase::Finished {
            return;
        }
        match key {
            Keystroke::Char(ch) => {
                self.start_at(now);
                input::process_char(&mut self.typing, ch);
            }
            Keystroke::Backspace => {
                input::process_backspace(&mut self.typing, &mut self.score);
            }
            Keystroke::Space => {
                if self.phase == Phase::Running {
                    input::process_space(&mut self.typing, &mut self.score);
                }
            }
        }
    }

    pub fn apply_key(&mut self, key: Keystroke) {
        self.apply_key_at(key, Instant::now());
    }

    /// Advances the clock. Returns the final result on the one tick that
    /// finishes the session.
    pub fn tick_at(&mut self, now: Instant) -> Option<SessionResult> {
        match self.timer.tick_at(now) {
            Tick::Expired => {
                self.phase = Phase::Finished;
                let result = self.finalize().ok();
                if let Some(ref r) = result {
                    tracing::info!(
                        wpm = r.wpm,
                        accuracy = r.accuracy,
                        duration = r.duration_secs,
                        "session finished"
                    );
                }
                result
            }
            Tick::Running { .. } | Tick::Inactive => None,
        }
    }

    pub fn tick(&mut self) -> Option<SessionResult> {
        self.tick_at(Instant::now())
    }

    /// Pure function of the current score and elapsed time.
    pub fn live_metrics(&self) -> LiveMetrics {
        let ScoreSnapshot {
            correct_chars,
            total_chars,
        } = self.score.snapshot();
        let elapsed = self
            .duration_secs()
            .saturating_sub(self.time_left())
            .max(1);
        LiveMetrics {
            wpm: scoring::wpm(correct_chars, elapsed as f64),
            accuracy: scoring::accuracy(correct_chars, total_chars),
        }
    }

    /// Uses the full duration as the time base.
    pub fn finalize(&self) -> Result<SessionResult, SessionError> {
        if self.phase != Phase::Finished {
            return Err(SessionError::NotFinished);
        }
        let ScoreSnapshot {
            correct_chars,
            total_chars,
        } = self.score.snapshot();
        let duration_secs = self.duration_secs();
        Ok(SessionResult {
            wpm: scoring::wpm(correct_chars, duration_secs as f64),
            accuracy: scoring::accuracy(correct_chars, total_chars),
            duration_secs,
        })
    }

    /// Stops the clock without producing a result. The caller drops the
    /// session afterwards.
    pub fn abandon(&mut self) {
        if self.timer.stop() {
            tracing::debug!(
                phase = ?self.phase,
                word_index = self.typing.current_word_index,
                "session abandoned"
            );
        }
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.timer.stop();
    }
}
