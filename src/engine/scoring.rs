use crate::error::SessionError;

/// Characters per "word" when converting to WPM.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Score contribution of one committed word. Both counts include the
/// separator that follows the word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordScore {
    pub correct: usize,
    pub total: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreSnapshot {
    pub correct_chars: usize,
    pub total_chars: usize,
}

/// An exact match earns every character plus the separator. Anything else
/// earns one point per position that matches within the target's length;
/// overtyped extras are never credited but still count toward the total.
pub fn score_word(target: &str, typed: &str) -> WordScore {
    let target_len = target.chars().count();
    let typed_len = typed.chars().count();

    let correct = if typed == target {
        target_len + 1
    } else {
        target
            .chars()
            .zip(typed.chars())
            .filter(|(t, c)| t == c)
            .count()
    };

    WordScore {
        correct,
        total: target_len.max(typed_len) + 1,
    }
}

/// Running totals plus a stack of per-word contributions so a retreat can
/// undo exactly what the matching commit added.
#[derive(Clone, Debug, Default)]
pub struct ScoreAccumulator {
    correct_chars: usize,
    total_chars: usize,
    committed: Vec<WordScore>,
}

impl ScoreAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit_word(&mut self, target: &str, typed: &str) -> WordScore {
        let score = score_word(target, typed);
        self.committed.push(score);
        self.correct_chars += score.correct;
        self.total_chars += score.total;
        score
    }

    pub fn retreat_last_word(&mut self) -> Result<WordScore, SessionError> {
        let score = self
            .committed
            .pop()
            .ok_or(SessionError::EmptyCommitStack)?;
        self.correct_chars -= score.correct;
        self.total_chars -= score.total;
        Ok(score)
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            correct_chars: self.correct_chars,
            total_chars: self.total_chars,
        }
    }

    pub fn committed(&self) -> &[WordScore] {
        &self.committed
    }
}

pub fn wpm(correct_chars: usize, elapsed_secs: f64) -> u32 {
    if elapsed_secs <= 0.0 {
        return 0;
    }
    ((correct_chars as f64 / CHARS_PER_WORD) / (elapsed_secs / 60.0)).round() as u32
}

/// Percentage with one decimal place; zero when nothing has been scored.
pub fn accuracy(correct_chars: usize, total_chars: usize) -> f64 {
    if total_chars == 0 {
        return 0.0;
    }
    (correct_chars as f64 / total_chars as f64 * 1000.0).round() / 10.0
}
