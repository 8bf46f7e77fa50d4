use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;

static WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w").expect("word-class pattern is valid"));

/// The two languages the bot translates between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Chinese,
    English,
}

impl Language {
    /// The language a message in `self` gets translated into
    pub fn opposite(self) -> Self {
        match self {
            Language::Chinese => Language::English,
            Language::English => Language::Chinese,
        }
    }
}

/// Inclusive range of Unicode scalar values, written as `"4E00-9FFF"` in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodepointRange {
    pub start: u32,
    pub end: u32,
}

impl CodepointRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&(c as u32))
    }
}

impl TryFrom<String> for CodepointRange {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (start, end) = value
            .split_once('-')
            .ok_or_else(|| format!("expected START-END hex range, got {:?}", value))?;
        let parse = |s: &str| {
            u32::from_str_radix(s.trim().trim_start_matches("U+"), 16)
                .map_err(|e| format!("invalid code point {:?}: {}", s, e))
        };
        let (start, end) = (parse(start)?, parse(end)?);
        if start > end {
            return Err(format!("range start {:X} is after end {:X}", start, end));
        }
        Ok(Self { start, end })
    }
}

impl From<CodepointRange> for String {
    fn from(range: CodepointRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}-{:04X}", self.start, self.end)
    }
}

/// CJK Unified Ideographs, the block counted for the ratio
pub fn default_script_ranges() -> Vec<CodepointRange> {
    vec![CodepointRange::new(0x4E00, 0x9FFF)]
}

/// Every CJK ideograph block, used when a text has no word characters at all
pub fn default_presence_ranges() -> Vec<CodepointRange> {
    vec![
        CodepointRange::new(0x4E00, 0x9FFF),
        CodepointRange::new(0x3400, 0x4DBF),
        CodepointRange::new(0x20000, 0x2A6DF),
        CodepointRange::new(0x2A700, 0x2B73F),
        CodepointRange::new(0x2B740, 0x2B81F),
        CodepointRange::new(0x2B820, 0x2CEAF),
        CodepointRange::new(0xF900, 0xFAFF),
        CodepointRange::new(0x2F800, 0x2FA1F),
    ]
}

/// Character-ratio heuristic deciding whether a text is mostly Chinese.
///
/// This is not a language identifier: it counts ideographs against all
/// Unicode word characters and compares the ratio with a threshold.
#[derive(Debug, Clone)]
pub struct LanguageClassifier {
    threshold: f64,
    script_ranges: Vec<CodepointRange>,
    presence_ranges: Vec<CodepointRange>,
}

impl LanguageClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            threshold: config.threshold,
            script_ranges: config.script_ranges.clone(),
            presence_ranges: config.presence_ranges.clone(),
        }
    }

    pub fn classify(&self, text: &str) -> Language {
        let script_chars = text
            .chars()
            .filter(|c| self.script_ranges.iter().any(|r| r.contains(*c)))
            .count();
        let word_chars = WORD_CHAR.find_iter(text).count();

        let mostly_chinese = if word_chars == 0 {
            self.contains_script(text)
        } else {
            script_chars as f64 / word_chars.max(1) as f64 > self.threshold
        };

        if mostly_chinese {
            Language::Chinese
        } else {
            Language::English
        }
    }

    fn contains_script(&self, text: &str) -> bool {
        text.chars()
            .any(|c| self.presence_ranges.iter().any(|r| r.contains(c)))
    }
}

impl Default for LanguageClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}
