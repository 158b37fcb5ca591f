//! Rule-based intent extraction.
//!
//! Handles "from X to Y" and "X to Y" phrasing and picks the priority from
//! keywords. Used when no model endpoint is configured.

use crate::domain::{Priority, TravelQuery};

use super::error::IntentError;

/// Words that precede an origin without being part of it.
const FILLER: &[&str] = &[
    "i", "im", "i'm", "want", "need", "would", "like", "to", "go", "get", "going", "travel",
    "head", "heading", "how", "do", "can", "could", "should", "please", "take", "me", "what",
    "what's", "whats", "is", "the", "best", "way", "it", "we", "from", "a", "trip", "ride",
    "route", "option", "path", "journey",
];

/// Words that end a destination.
const STOP: &[&str] = &[
    "by", "with", "and", "for", "using", "via", "while", "please", "but", "as", "in", "on",
    "at", "so", "that", "i", "im", "i'm", "asap", "now", "today", "tonight",
];

/// Priority keywords. A trailing `*` matches any word with that prefix;
/// other entries match whole words. Earlier entries take precedence.
/// Capitalized words are taken as place names and never match.
const PRIORITY_KEYWORDS: &[(Priority, &[&str])] = &[
    (Priority::MinimalWalking, &["walk*"]),
    (
        Priority::LeastEnvironmentalCost,
        &[
            "green*", "eco", "eco-*", "ecolog*", "emission*", "environment*", "co2", "carbon",
            "sustainab*",
        ],
    ),
    (
        Priority::LowestCost,
        &[
            "cheap*", "cost*", "fare*", "price*", "budget*", "money", "afford*", "inexpensive*",
        ],
    ),
    (
        Priority::ShortestTime,
        &["fast*", "quick*", "shortest*", "soon*", "hurry*", "rush*", "rapid*", "time"],
    ),
];

/// Extracts travel queries from plain text without a model.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordExtractor;

/// A word of the message: the punctuation-trimmed original, its lowercase
/// form, and whether punctuation ended a clause after it.
struct Word<'a> {
    text: &'a str,
    lower: String,
    ends_clause: bool,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Pull the origin, destination and priority out of `message`.
    pub fn extract(&self, message: &str) -> Result<TravelQuery, IntentError> {
        let words = split_words(message);
        let (origin, destination) = endpoints(&words);
        let priority = detect_priority(message, &words);

        match (origin, destination, priority) {
            (Some(origin), Some(destination), Some(priority)) => {
                Ok(TravelQuery::new(origin, destination, priority.as_str()))
            }
            (origin, destination, priority) => {
                let mut missing = Vec::new();
                if origin.is_none() {
                    missing.push("origin");
                }
                if destination.is_none() {
                    missing.push("destination");
                }
                if priority.is_none() {
                    missing.push("priority");
                }
                Err(IntentError::Incomplete { missing })
            }
        }
    }
}

fn split_words(message: &str) -> Vec<Word<'_>> {
    message
        .split_whitespace()
        .filter_map(|raw| {
            let ends_clause = raw.ends_with([',', '.', '?', '!', ';', ':']);
            let text = raw.trim_matches(|c: char| !(c.is_alphanumeric() || c == '_' || c == '\''));
            (!text.is_empty()).then(|| Word {
                text,
                lower: text.to_lowercase(),
                ends_clause,
            })
        })
        .collect()
}

fn is_capitalized(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

fn matches_keyword(word: &str, keyword: &str) -> bool {
    match keyword.strip_suffix('*') {
        Some(prefix) => word.starts_with(prefix),
        None => word == keyword,
    }
}

fn is_priority_word(word: &Word<'_>) -> bool {
    !is_capitalized(word.text)
        && (PRIORITY_KEYWORDS
            .iter()
            .any(|(_, keys)| keys.iter().any(|k| matches_keyword(&word.lower, k)))
            || Priority::parse(&word.lower).is_ok())
}

fn join(words: &[Word<'_>]) -> Option<String> {
    (!words.is_empty()).then(|| {
        words
            .iter()
            .map(|w| w.text)
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Words after `start` up to a stop word, priority keyword or clause end.
fn destination_from(words: &[Word<'_>], start: usize) -> Option<String> {
    let mut end = start;
    for word in &words[start..] {
        if STOP.contains(&word.lower.as_str()) || is_priority_word(word) {
            break;
        }
        end += 1;
        if word.ends_clause {
            break;
        }
    }
    join(&words[start..end])
}

fn endpoints(words: &[Word<'_>]) -> (Option<String>, Option<String>) {
    // "from X to Y"
    if let Some(from) = words.iter().position(|w| w.lower == "from") {
        let rest = &words[from + 1..];
        return match rest.iter().position(|w| w.lower == "to") {
            Some(to) => (
                join(&rest[..to]),
                destination_from(words, from + 1 + to + 1),
            ),
            None => (destination_from(words, from + 1), None),
        };
    }

    // "X to Y": the origin is the run of non-filler words before "to"
    let mut destination = None;
    for (i, word) in words.iter().enumerate() {
        if word.lower != "to" {
            continue;
        }
        let start = words[..i]
            .iter()
            .rposition(|w| {
                w.ends_clause || FILLER.contains(&w.lower.as_str()) || is_priority_word(w)
            })
            .map_or(0, |p| p + 1);
        let dest = destination_from(words, i + 1);
        if let Some(origin) = join(&words[start..i]) {
            return (Some(origin), dest);
        }
        destination = dest.or(destination);
    }

    (None, destination)
}

fn detect_priority(message: &str, words: &[Word<'_>]) -> Option<Priority> {
    let lower = message.to_lowercase();
    if let Some(p) = Priority::ALL.into_iter().find(|p| lower.contains(p.as_str())) {
        return Some(p);
    }

    // The first word may be capitalized as the start of a sentence
    let candidates: Vec<&str> = words
        .iter()
        .enumerate()
        .filter(|(i, w)| *i == 0 || !is_capitalized(w.text))
        .map(|(_, w)| w.lower.as_str())
        .collect();

    PRIORITY_KEYWORDS.iter().find_map(|(priority, keys)| {
        candidates
            .iter()
            .any(|w| keys.iter().any(|k| matches_keyword(w, k)))
            .then_some(*priority)
    })
}
