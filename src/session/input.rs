use crate::engine::scoring::{ScoreAccumulator, WordScore};

/// Logical keystroke after control chords have been filtered out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Backspace,
    Space,
}

impl Keystroke {
    /// Space is the word separator; anything else printable is a character.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            ' ' => Some(Keystroke::Space),
            c if c.is_ascii_graphic() => Some(Keystroke::Char(c)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WordOutcome {
    #[default]
    Pending,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackspaceEffect {
    DeletedChar,
    /// Moved back into the previous word; carries the score that was undone.
    Retreated(WordScore),
    Nothing,
}

/// Word list plus everything typed against it.
///
/// The typed text of the current word is the tail of `word_inputs`, so the
/// in-progress input and the per-word history can never disagree.
#[derive(Clone, Debug)]
pub struct TypingState {
    pub words: Vec<String>,
    pub current_word_index: usize,
    pub word_inputs: Vec<String>,
    pub outcomes: Vec<WordOutcome>,
}

impl TypingState {
    pub fn new(words: Vec<String>) -> Self {
        let count = words.len();
        Self {
            words,
            current_word_index: 0,
            word_inputs: vec![String::new(); count],
            outcomes: vec![WordOutcome::Pending; count],
        }
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.current_word_index).map(String::as_str)
    }

    pub fn current_input(&self) -> &str {
        self.word_inputs
            .get(self.current_word_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// True once every word has been committed.
    pub fn is_exhausted(&self) -> bool {
        self.current_word_index >= self.words.len()
    }
}

/// Characters past the target length are kept as overtyped extras.
pub fn process_char(state: &mut TypingState, ch: char) -> bool {
    let idx = state.current_word_index;
    match state.word_inputs.get_mut(idx) {
        Some(input) => {
            input.push(ch);
            true
        }
        None => false,
    }
}

pub fn process_backspace(state: &mut TypingState, score: &mut ScoreAccumulator) -> BackspaceEffect {
    let idx = state.current_word_index;

    if let Some(input) = state.word_inputs.get_mut(idx)
        && input.pop().is_some()
    {
        return BackspaceEffect::DeletedChar;
    }

    if idx == 0 {
        return BackspaceEffect::Nothing;
    }

    match score.retreat_last_word() {
        Ok(undone) => {
            let prev = idx - 1;
            state.current_word_index = prev;
            state.outcomes[prev] = WordOutcome::Pending;
            BackspaceEffect::Retreated(undone)
        }
        Err(err) => {
            tracing::error!(word_index = idx, %err, "refusing to retreat");
            BackspaceEffect::Nothing
        }
    }
}

/// Commits the current word and advances. Returns `None` when the word
/// list is already exhausted.
pub fn process_space(state: &mut TypingState, score: &mut ScoreAccumulator) -> Option<WordScore> {
    let idx = state.current_word_index;
    let target = state.words.get(idx)?;
    let typed = &state.word_inputs[idx];

    state.outcomes[idx] = if typed == target {
        WordOutcome::Correct
    } else {
        WordOutcome::Incorrect
    };
    let committed = score.commit_word(target, typed);
    state.current_word_index += 1;
    Some(committed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(words: &[&str]) -> TypingState {
        TypingState::new(words.iter().map(|w| w.to_string()).collect())
    }

    fn type_str(state: &mut TypingState, text: &str) {
        for ch in text.chars() {
            process_char(state, ch);
        }
    }

    #[test]
    fn keystroke_from_char_routes_space() {
        assert_eq!(Keystroke::from_char(' '), Some(Keystroke::Space));
        assert_eq!(Keystroke::from_char('x'), Some(Keystroke::Char('x')));
        assert_eq!(Keystroke::from_char('~'), Some(Keystroke::Char('~')));
        assert_eq!(Keystroke::from_char('\t'), None);
        assert_eq!(Keystroke::from_char('\u{e9}'), None);
    }

    #[test]
    fn chars_accumulate_on_current_word() {
        let mut s = state(&["the", "cat"]);
        type_str(&mut s, "th");
        assert_eq!(s.current_input(), "th");
        assert_eq!(s.word_inputs[0], "th");
        assert_eq!(s.current_word(), Some("the"));
    }

    #[test]
    fn overtyping_is_recorded() {
        let mut s = state(&["a"]);
        type_str(&mut s, "abcd");
        assert_eq!(s.current_input(), "abcd");
    }

    #[test]
    fn space_commits_and_advances() {
        let mut s = state(&["the", "cat"]);
        let mut score = ScoreAccumulator::new();
        type_str(&mut s, "the");
        let committed = process_space(&mut s, &mut score).unwrap();

        assert_eq!(committed, WordScore { correct: 4, total: 4 });
        assert_eq!(s.outcomes[0], WordOutcome::Correct);
        assert_eq!(s.current_word_index, 1);
        assert_eq!(s.current_input(), "");
        assert_eq!(s.outcomes[1], WordOutcome::Pending);
    }

    #[test]
    fn wrong_word_is_marked_incorrect() {
        let mut s = state(&["the", "cat"]);
        let mut score = ScoreAccumulator::new();
        type_str(&mut s, "teh");
        process_space(&mut s, &mut score);
        assert_eq!(s.outcomes[0], WordOutcome::Incorrect);
        assert_eq!(score.snapshot().correct_chars, 1);
    }

    #[test]
    fn backspace_deletes_within_word() {
        let mut s = state(&["the"]);
        let mut score = ScoreAccumulator::new();
        type_str(&mut s, "thx");
        assert_eq!(process_backspace(&mut s, &mut score), BackspaceEffect::DeletedChar);
        assert_eq!(s.current_input(), "th");
        assert_eq!(s.word_inputs[0], "th");
    }

    #[test]
    fn backspace_at_origin_is_noop() {
        let mut s = state(&["the"]);
        let mut score = ScoreAccumulator::new();
        assert_eq!(process_backspace(&mut s, &mut score), BackspaceEffect::Nothing);
        assert_eq!(s.current_word_index, 0);
        assert_eq!(s.current_input(), "");
    }

    #[test]
    fn backspace_on_empty_input_reopens_previous_word() {
        let mut s = state(&["the", "cat"]);
        let mut score = ScoreAccumulator::new();
        type_str(&mut s, "teh");
        process_space(&mut s, &mut score);

        let effect = process_backspace(&mut s, &mut score);
        assert_eq!(effect, BackspaceEffect::Retreated(WordScore { correct: 1, total: 4 }));
        assert_eq!(s.current_word_index, 0);
        assert_eq!(s.current_input(), "teh");
        assert_eq!(s.outcomes[0], WordOutcome::Pending);
        assert_eq!(score.snapshot().total_chars, 0);

        // Next backspace edits the reopened word.
        process_backspace(&mut s, &mut score);
        assert_eq!(s.current_input(), "te");
    }

    #[test]
    fn retreat_refused_when_accumulator_disagrees() {
        let mut s = state(&["the", "cat"]);
        s.current_word_index = 1;
        let mut score = ScoreAccumulator::new();
        assert_eq!(process_backspace(&mut s, &mut score), BackspaceEffect::Nothing);
        assert_eq!(s.current_word_index, 1);
    }

    #[test]
    fn exhausted_list_ignores_chars_and_space() {
        let mut s = state(&["a"]);
        let mut score = ScoreAccumulator::new();
        type_str(&mut s, "a");
        process_space(&mut s, &mut score);
        assert!(s.is_exhausted());

        assert!(!process_char(&mut s, 'x'));
        assert_eq!(process_space(&mut s, &mut score), None);
        assert_eq!(s.current_word_index, 1);
        assert_eq!(s.current_input(), "");
        assert_eq!(s.current_word(), None);

        // Backspace still walks back into the last word.
        assert!(matches!(
            process_backspace(&mut s, &mut score),
            BackspaceEffect::Retreated(_)
        ));
        assert_eq!(s.current_word_index, 0);
        assert_eq!(s.current_input(), "a");
    }
}
