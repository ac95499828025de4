use collector_core::{SentimentScore, SentimentScorer};
use std::collections::{HashMap, HashSet};

pub mod lexicon;
pub mod weighting;

pub use weighting::compute_weighting;

const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "aren't",
    "wasn't", "weren't", "won't", "wouldn't", "couldn't", "shouldn't", "can't",
    "cant", "dont", "doesnt", "isnt", "wont", "hardly", "barely", "without",
];

/// Punctuation dropped before tokenizing. Apostrophes and hyphens are kept so
/// "don't" and "sell-off" stay single tokens.
const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '?', '$', '%', '^', '&', '*', ';', ':', '{', '}',
    '=', '_', '`', '"', '~', '(', ')', '[', ']', '<', '>', '|', '\\', '+',
];

/// Lexicon-based sentiment scorer.
///
/// Each token found in the lexicon contributes its weight; a token directly
/// preceded by a negation word contributes the opposite weight.
pub struct LexiconScorer {
    weights: HashMap<&'static str, i32>,
    negations: HashSet<&'static str>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self::with_lexicon(lexicon::LEXICON)
    }

    pub fn with_lexicon(entries: &[(&'static str, i32)]) -> Self {
        Self {
            weights: entries.iter().copied().collect(),
            negations: NEGATION_WORDS.iter().copied().collect(),
        }
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .replace(STRIPPED_PUNCTUATION, "")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    pub fn analyze(&self, text: &str) -> SentimentScore {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return SentimentScore::default();
        }

        let mut score: i32 = 0;
        for (i, token) in tokens.iter().enumerate() {
            let Some(&weight) = self.weights.get(token.as_str()) else {
                continue;
            };

            let negated = i > 0 && self.negations.contains(tokens[i - 1].as_str());
            score += if negated { -weight } else { weight };
        }

        let score = score as f64;
        SentimentScore {
            score,
            comparative: score / tokens.len() as f64,
        }
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScore {
        self.analyze(text)
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}
