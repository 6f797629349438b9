use serde_json::Value;

use crate::models::{EventRecord, Intent, ParsedIntent};

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("catalog entry {index} is not an object: {entry}")]
    MalformedEntry { index: usize, entry: Value },
}

/// Lower-case and keep only alphanumerics, `_` and whitespace.
pub fn normalize_name(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// One way of deciding whether a normalized event name satisfies a
/// normalized query.
pub trait MatchStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn matches(&self, query: &str, candidate: &str) -> bool;
}

/// The candidate contains the whole query phrase.
pub struct PhraseContainment;

impl MatchStrategy for PhraseContainment {
    fn name(&self) -> &'static str {
        "phrase"
    }

    fn matches(&self, query: &str, candidate: &str) -> bool {
        candidate.contains(query)
    }
}

/// Every query token appears somewhere in the candidate, in any order.
pub struct AllTokensContainment;

impl MatchStrategy for AllTokensContainment {
    fn name(&self) -> &'static str {
        "all_tokens"
    }

    fn matches(&self, query: &str, candidate: &str) -> bool {
        let mut tokens = query.split_whitespace().peekable();
        tokens.peek().is_some() && tokens.all(|tok| candidate.contains(tok))
    }
}

/// Like [`AllTokensContainment`], but a token may also be a near miss of one
/// of the candidate's words. Tolerates misspellings from voice input.
pub struct ApproximateTokens {
    /// Tokens shorter than this must be contained exactly.
    pub min_len: usize,
    /// Allowed edits are `token length / divisor`.
    pub divisor: usize,
}

impl Default for ApproximateTokens {
    fn default() -> Self {
        Self {
            min_len: 3,
            divisor: 3,
        }
    }
}

impl MatchStrategy for ApproximateTokens {
    fn name(&self) -> &'static str {
        "approximate_tokens"
    }

    fn matches(&self, query: &str, candidate: &str) -> bool {
        let words: Vec<&str> = candidate.split_whitespace().collect();
        let mut tokens = query.split_whitespace().peekable();

        tokens.peek().is_some()
            && tokens.all(|tok| {
                if candidate.contains(tok) {
                    return true;
                }
                let len = tok.chars().count();
                if len < self.min_len || self.divisor == 0 {
                    return false;
                }
                let budget = len / self.divisor;
                words.iter().any(|w| edit_distance(tok, w) <= budget)
            })
    }
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != *cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Resolves a parsed intent against the catalog with an ordered chain of
/// [`MatchStrategy`]s. A candidate matches as soon as any strategy accepts it.
pub struct EventMatcher {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl Default for EventMatcher {
    fn default() -> Self {
        Self::new(vec![
            Box::new(PhraseContainment),
            Box::new(AllTokensContainment),
            Box::new(ApproximateTokens::default()),
        ])
    }
}

impl EventMatcher {
    pub fn new(strategies: Vec<Box<dyn MatchStrategy>>) -> Self {
        Self { strategies }
    }

    /// Name of the first strategy that accepts `candidate`, if any.
    pub fn accepts(&self, query: &str, candidate: &str) -> Option<&'static str> {
        self.strategies
            .iter()
            .find(|s| s.matches(query, candidate))
            .map(|s| s.name())
    }

    /// Catalog events satisfying `parsed`, in catalog order.
    ///
    /// - with an event name: events whose name (or date) passes the chain
    /// - with no name and a `view` intent: the whole catalog
    /// - otherwise: nothing
    pub fn try_match(
        &self,
        parsed: &ParsedIntent,
        catalog: &[Value],
    ) -> Result<Vec<EventRecord>, MatchError> {
        let query = parsed
            .event
            .as_deref()
            .map(normalize_name)
            .filter(|q| !q.is_empty());

        match query {
            Some(query) => {
                let events = decode_catalog(catalog)?;
                Ok(events
                    .into_iter()
                    .filter(|ev| {
                        let candidate = normalize_name(&ev.label());
                        match self.accepts(&query, &candidate) {
                            Some(strategy) => {
                                tracing::debug!(event_id = %ev.id(), strategy, "catalog event matched");
                                true
                            }
                            None => false,
                        }
                    })
                    .collect())
            }
            None if parsed.intent == Some(Intent::View) => decode_catalog(catalog),
            None => Ok(Vec::new()),
        }
    }

    /// [`try_match`](Self::try_match), with any failure logged and treated as
    /// zero matches.
    pub fn match_events(&self, parsed: &ParsedIntent, catalog: &[Value]) -> Vec<EventRecord> {
        self.try_match(parsed, catalog).unwrap_or_else(|e| {
            tracing::error!(error = %e, "error filtering events");
            Vec::new()
        })
    }
}

fn decode_catalog(catalog: &[Value]) -> Result<Vec<EventRecord>, MatchError> {
    catalog
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(fields) => Ok(EventRecord::new(fields.clone())),
            other => Err(MatchError::MalformedEntry {
                index,
                entry: other.clone(),
            }),
        })
        .collect()
}
