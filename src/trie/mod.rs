//! Name trie for aerofind
//!
//! Maps lowercased names to the record groups sharing them and enumerates
//! every stored name under a prefix. Built once at startup, read-only
//! afterwards; insertion is the only mutation and nothing is ever deleted.

mod node;

pub use node::TrieNode;

use crate::filter::{evaluate, Expr, FilterResult};
use crate::record::FieldTuple;

/// Prefix trie over record names.
#[derive(Debug, Default)]
pub struct NameTrie {
    root: TrieNode,
    len: usize,
}

impl NameTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tuples inserted
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been inserted
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert one record under `name`.
    ///
    /// The name is lowercased for keying; the original casing is retained
    /// for display (first-seen spelling wins for a given lowercase name).
    /// Repeated names accumulate tuples, they never overwrite.
    pub fn insert(&mut self, name: &str, tuple: FieldTuple) {
        let lowercase = name.to_lowercase();
        let mut current = &mut self.root;
        for c in lowercase.chars() {
            current = current.child_or_insert(c);
        }
        current.store(&lowercase, name, tuple);
        self.len += 1;
    }

    /// True if some stored name starts with `prefix` (case-insensitive).
    ///
    /// Distinguishes "the prefix leaves the trie" from "the prefix exists
    /// but a filter excluded every tuple".
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        let mut current = &self.root;
        for c in prefix.to_lowercase().chars() {
            match current.child(c) {
                Some(node) => current = node,
                None => return false,
            }
        }
        true
    }

    /// Collect `(original_name, tuple)` pairs for every name under
    /// `prefix` whose tuple passes `filter`.
    ///
    /// A prefix that leaves the trie yields an empty list, a valid
    /// "no matches" outcome rather than an error. A filter evaluation error
    /// aborts the whole collection. The returned order is the walk order;
    /// callers wanting a contractual order re-sort.
    pub fn collect(
        &self,
        prefix: &str,
        filter: Option<&Expr>,
    ) -> FilterResult<Vec<(String, FieldTuple)>> {
        let prefix_lowercase = prefix.to_lowercase();
        let mut current = &self.root;
        for c in prefix_lowercase.chars() {
            match current.child(c) {
                Some(node) => current = node,
                None => return Ok(Vec::new()),
            }
        }

        let mut results = Vec::new();
        let mut name = prefix_lowercase;
        Self::walk(current, &mut name, filter, &mut results)?;
        Ok(results)
    }

    /// Depth-first walk from `node`, reconstructing lowercase names in the
    /// backtracked `name` accumulator.
    fn walk(
        node: &TrieNode,
        name: &mut String,
        filter: Option<&Expr>,
        results: &mut Vec<(String, FieldTuple)>,
    ) -> FilterResult<()> {
        if node.is_terminus() {
            // every terminus records the spelling for its own lowercase name
            let original = node.original_name(name).unwrap_or(name.as_str());
            for tuple in node.records().iter() {
                let keep = match filter {
                    Some(expr) => evaluate(expr, tuple)?,
                    None => true,
                };
                if keep {
                    results.push((original.to_string(), tuple.clone()));
                }
            }
        }
        for (c, child) in node.children() {
            name.push(*c);
            Self::walk(child, name, filter, results)?;
            name.pop();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::compile;
    use crate::record::FieldValue;

    fn tuple(n: i64) -> FieldTuple {
        FieldTuple::new(vec![FieldValue::Int(n)])
    }

    fn names(results: &[(String, FieldTuple)]) -> Vec<&str> {
        results.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn test_insert_and_exact_prefix() {
        let mut trie = NameTrie::new();
        trie.insert("Sheremetyevo", tuple(1));

        let results = trie.collect("Sheremetyevo", None).unwrap();
        assert_eq!(names(&results), ["Sheremetyevo"]);
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        let mut trie = NameTrie::new();
        trie.insert("Sheremetyevo", tuple(1));

        assert_eq!(trie.collect("sher", None).unwrap().len(), 1);
        assert_eq!(trie.collect("SHER", None).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_prefix_is_empty_not_error() {
        let mut trie = NameTrie::new();
        trie.insert("Sheremetyevo", tuple(1));

        assert!(trie.collect("xyz", None).unwrap().is_empty());
        assert!(!trie.contains_prefix("xyz"));
        assert!(trie.contains_prefix("sHeR"));
        assert!(trie.contains_prefix(""));
    }

    #[test]
    fn test_empty_prefix_enumerates_everything() {
        let mut trie = NameTrie::new();
        trie.insert("Abakan", tuple(1));
        trie.insert("Anapa", tuple(2));
        trie.insert("Barnaul", tuple(3));

        assert_eq!(trie.collect("", None).unwrap().len(), 3);
    }

    #[test]
    fn test_prefix_node_itself_can_be_terminus() {
        let mut trie = NameTrie::new();
        trie.insert("Orsk", tuple(1));
        trie.insert("Orsk South", tuple(2));

        let results = trie.collect("Orsk", None).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_same_name_groups_tuples() {
        let mut trie = NameTrie::new();
        trie.insert("Kazan", tuple(1));
        trie.insert("Kazan", tuple(2));

        let results = trie.collect("Kazan", None).unwrap();
        assert_eq!(results.len(), 2);
        assert!(names(&results).iter().all(|n| *n == "Kazan"));
    }

    #[test]
    fn test_first_seen_casing_reported() {
        let mut trie = NameTrie::new();
        trie.insert("KAZAN", tuple(1));
        trie.insert("Kazan", tuple(2));

        let results = trie.collect("kaz", None).unwrap();
        assert_eq!(names(&results), ["KAZAN", "KAZAN"]);
    }

    #[test]
    fn test_filter_applies_per_tuple() {
        let mut trie = NameTrie::new();
        trie.insert("Kazan", tuple(5));
        trie.insert("Kazan", tuple(50));

        let expr = compile("[1]>10").unwrap();
        let results = trie.collect("Kazan", Some(&expr)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].1.get(0), Some(&FieldValue::Int(50)));
    }

    #[test]
    fn test_filter_error_aborts_collection() {
        let mut trie = NameTrie::new();
        trie.insert("Kazan", tuple(1));

        // ordering on a string literal against an integer slot
        let expr = compile("[1]>\"abc\"").unwrap();
        assert!(trie.collect("Kazan", Some(&expr)).is_err());
    }

    #[test]
    fn test_unicode_names() {
        let mut trie = NameTrie::new();
        trie.insert("Шереметьево", tuple(1));

        let results = trie.collect("Шере", None).unwrap();
        assert_eq!(names(&results), ["Шереметьево"]);
    }
}
