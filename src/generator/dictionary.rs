use std::fs;
use std::path::Path;

use crate::error::CorpusError;

const WORDS_EN: &str = include_str!("../../assets/words-en.json");

/// Read-only pool of candidate words. Never empty once constructed.
#[derive(Clone, Debug)]
pub struct Corpus {
    words: Vec<String>,
}

impl Corpus {
    /// Keeps only non-empty words made of printable, non-space ASCII.
    pub fn new<I, S>(words: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_graphic()))
            .collect();

        if words.is_empty() {
            return Err(CorpusError::Empty);
        }
        Ok(Self { words })
    }

    pub fn embedded() -> Result<Self, CorpusError> {
        let words: Vec<String> = serde_json::from_str(WORDS_EN)?;
        Self::new(words)
    }

    /// Newline separated word list; blank lines are skipped.
    pub fn from_file(path: &Path) -> Result<Self, CorpusError> {
        let content = fs::read_to_string(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(content.lines())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.words.get(idx).map(String::as_str)
    }
}
