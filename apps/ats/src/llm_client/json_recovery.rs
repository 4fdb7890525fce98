//! Recovery of structured values from free-form model output.
//!
//! A `ParserChain` is an ordered list of named strategies. Each strategy gets the
//! raw response and returns `Some(value)` or `None`; the first `Some` wins. The
//! standard JSON strategies are `strict`, `fenced-block` and `brace-scan`; stages
//! append their own (e.g. field-level regex) after them.
//!
//! Every strategy works on an already-received string, so a chain always
//! terminates in time proportional to the response length.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;

/// A single recovery strategy.
pub type Strategy<T> = fn(&str) -> Option<T>;

/// Upper bound on `{` positions `brace_scan` starts from. Each start scans at
/// most to the end of the response, so the tier stays linear in its length.
const MAX_BRACE_STARTS: usize = 64;

static FENCED_BLOCK: OnceLock<Regex> = OnceLock::new();

fn fenced_block_regex() -> &'static Regex {
    FENCED_BLOCK.get_or_init(|| Regex::new(r"```(?:[A-Za-z]+)?\s*([\s\S]*?)\s*```").unwrap())
}

/// A value together with the name of the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered<T> {
    pub value: T,
    pub strategy: &'static str,
}

pub struct ParserChain<T> {
    strategies: Vec<(&'static str, Strategy<T>)>,
}

impl<T> ParserChain<T> {
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Appends a strategy; strategies run in insertion order.
    pub fn then(mut self, name: &'static str, strategy: Strategy<T>) -> Self {
        self.strategies.push((name, strategy));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|(name, _)| *name).collect()
    }

    /// Runs the strategies in order and stops at the first success.
    pub fn parse(&self, raw: &str) -> Option<Recovered<T>> {
        self.strategies.iter().find_map(|(name, strategy)| {
            strategy(raw).map(|value| Recovered {
                value,
                strategy: *name,
            })
        })
    }
}

impl<T> Default for ParserChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> ParserChain<T> {
    /// `strict` → `fenced-block` → `brace-scan`.
    pub fn json_object() -> Self {
        Self::new()
            .then("strict", strict::<T>)
            .then("fenced-block", fenced_block::<T>)
            .then("brace-scan", brace_scan::<T>)
    }
}

/// The whole response is the JSON document.
pub fn strict<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str(raw.trim()).ok()
}

/// The JSON document sits inside a markdown code fence (```json ... ``` or ``` ... ```).
pub fn fenced_block<T: DeserializeOwned>(raw: &str) -> Option<T> {
    fenced_block_regex()
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .find_map(|body| serde_json::from_str(body.as_str()).ok())
}

/// The JSON document is the first balanced `{...}` block that parses, wherever it sits.
pub fn brace_scan<T: DeserializeOwned>(raw: &str) -> Option<T> {
    balanced_objects(raw).find_map(|candidate| serde_json::from_str(candidate).ok())
}

/// Balanced `{...}` slices of `raw` starting at its first `MAX_BRACE_STARTS`
/// opening braces, ordered by the position of the opening brace.
///
/// Braces inside JSON string literals do not count toward balance.
pub fn balanced_objects(raw: &str) -> impl Iterator<Item = &str> {
    raw.char_indices()
        .filter(|&(_, c)| c == '{')
        .take(MAX_BRACE_STARTS)
        .filter_map(move |(start, _)| balanced_end(raw, start).map(|end| &raw[start..end]))
}

fn balanced_end(raw: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// First `max_chars` characters of a response, for error payloads and logs.
pub fn excerpt(raw: &str, max_chars: usize) -> String {
    raw.chars().take(max_chars).collect()
}
