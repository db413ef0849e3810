pub mod dictionary;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::generator::dictionary::Corpus;

/// Fewest words a session is ever given, regardless of duration.
pub const MIN_WORD_COUNT: usize = 50;

/// Words generated per second of session time.
pub const WORDS_PER_SECOND: usize = 3;

pub fn word_count_for(duration_secs: u32) -> usize {
    (duration_secs as usize * WORDS_PER_SECOND).max(MIN_WORD_COUNT)
}

pub trait WordSource {
    fn pick_random_word(&mut self) -> String;

    /// Independent draws, so repeats are allowed.
    fn generate_words(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.pick_random_word()).collect()
    }
}

/// Uniform draws from a corpus.
pub struct RandomWords {
    corpus: Corpus,
    rng: SmallRng,
}

impl RandomWords {
    pub fn new(corpus: Corpus) -> Self {
        Self::with_rng(corpus, SmallRng::from_entropy())
    }

    pub fn with_rng(corpus: Corpus, rng: SmallRng) -> Self {
        Self { corpus, rng }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }
}

impl WordSource for RandomWords {
    fn pick_random_word(&mut self) -> String {
        let idx = self.rng.gen_range(0..self.corpus.len());
        // Corpus construction guarantees a non-empty list.
        self.corpus.get(idx).unwrap_or_default().to_string()
    }
}
