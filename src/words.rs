use include_dir::{include_dir, Dir};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub(crate) static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/data");

pub const DEFAULT_MIN_WORDS: usize = 20;
pub const DEFAULT_MAX_WORDS: usize = 40;

/// Candidate words for randomly assembled prompts
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct WordList {
    pub name: String,
    pub words: Vec<String>,
}

impl WordList {
    /// The list shipped inside the binary
    pub fn builtin() -> Result<Self> {
        let file = DATA_DIR
            .get_file("words.json")
            .ok_or_else(|| Error::MissingData(PathBuf::from("words.json")))?;
        Self::from_slice(file.contents())
    }

    /// A user supplied JSON list: `{ "name": "...", "words": [...] }`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_slice(&bytes)
    }

    fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut list: WordList = serde_json::from_slice(bytes)?;
        list.words.retain(|w| !w.trim().is_empty());
        if list.words.is_empty() {
            return Err(Error::EmptyWordList(list.name));
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Inclusive bounds for how many words a random prompt holds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordCountRange {
    min: usize,
    max: usize,
}

impl WordCountRange {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min == 0 || min > max {
            return Err(Error::InvalidWordRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl Default for WordCountRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_WORDS,
            max: DEFAULT_MAX_WORDS,
        }
    }
}

/// Shuffle a copy of `words` and keep the first `count`.
///
/// Yields fewer than `count` words when the list is shorter.
pub fn sample_words<R: Rng + ?Sized>(words: &[String], count: usize, rng: &mut R) -> Vec<String> {
    let mut shuffled = words.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

/// Uniform draw from the inclusive range
pub fn random_word_count<R: Rng + ?Sized>(range: WordCountRange, rng: &mut R) -> usize {
    rng.gen_range(range.min..=range.max)
}

/// Assemble a prompt: sample a count, sample that many words, join with single spaces
pub fn build_target<R: Rng + ?Sized>(list: &WordList, range: WordCountRange, rng: &mut R) -> String {
    let count = random_word_count(range, rng);
    sample_words(&list.words, count, rng).join(" ")
}
