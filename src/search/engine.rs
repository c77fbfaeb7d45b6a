//! Search orchestration
//!
//! Glues filter compilation, trie traversal and result ordering, timed
//! end to end. The engine owns the built trie; queries never mutate it,
//! and a rejected filter leaves the engine ready for the next query.

use std::time::Instant;

use tracing::{debug, info};

use crate::filter::{compile, FilterResult};
use crate::trie::NameTrie;

use super::outcome::{MatchRow, SearchOutcome};

/// Query front end over a built name trie.
#[derive(Debug)]
pub struct SearchEngine {
    trie: NameTrie,
}

impl SearchEngine {
    /// Wrap a fully built trie
    pub fn new(trie: NameTrie) -> Self {
        Self { trie }
    }

    /// Number of indexed tuples
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// True if the engine indexes nothing
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Run one query.
    ///
    /// `filter_text` is compiled once per call; empty text means no
    /// filter. The elapsed time in the outcome covers compilation, the
    /// walk, filtering and the final sort. Rows come back ascending by
    /// original name (stable, lexicographic by literal text).
    pub fn find(&self, prefix: &str, filter_text: &str) -> FilterResult<SearchOutcome> {
        let start = Instant::now();

        let filter = if filter_text.is_empty() {
            None
        } else {
            Some(compile(filter_text).inspect_err(|e| {
                debug!(code = e.code().code(), "filter rejected");
            })?)
        };

        let prefix_matched = self.trie.contains_prefix(prefix);
        let matches = self.trie.collect(prefix, filter.as_ref())?;
        let mut rows: Vec<MatchRow> = matches
            .into_iter()
            .map(|(name, tuple)| MatchRow::new(name, tuple))
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));

        let elapsed = start.elapsed();
        info!(
            prefix,
            filtered = !filter_text.is_empty(),
            matches = rows.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "search complete"
        );

        Ok(SearchOutcome {
            rows,
            prefix_matched,
            elapsed,
        })
    }
}
