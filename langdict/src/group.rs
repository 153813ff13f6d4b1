//! Per-language buckets of terms and their duplicate detection.

use std::collections::{BTreeMap, HashSet};

use crate::term::{IdentityMode, Term};

/// All terms read for one language code, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageGroup {
    language_code: String,
    identity_mode: IdentityMode,
    terms: Vec<Term>,
}

impl LanguageGroup {
    pub fn new(language_code: impl Into<String>) -> Self {
        LanguageGroup {
            language_code: language_code.into(),
            identity_mode: IdentityMode::default(),
            terms: Vec::new(),
        }
    }

    /// Creates a group pre-populated with `terms`, all switched to the default mode.
    pub fn with_terms(language_code: impl Into<String>, terms: Vec<Term>) -> Self {
        let mut group = LanguageGroup::new(language_code);
        for term in terms {
            group.add_term(term);
        }
        group
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn identity_mode(&self) -> IdentityMode {
        self.identity_mode
    }

    /// Appends a term. Uniqueness is not enforced; the term adopts the group's mode.
    pub fn add_term(&mut self, mut term: Term) {
        term.set_identity_mode(self.identity_mode);
        self.terms.push(term);
    }

    /// Applies `mode` to the group and to every term it holds.
    pub fn set_identity_mode(&mut self, mode: IdentityMode) {
        self.identity_mode = mode;
        for term in &mut self.terms {
            term.set_identity_mode(mode);
        }
    }

    /// Every term whose key is shared with at least one other term in the group.
    ///
    /// Clusters are ordered by key (byte order); members of a cluster keep
    /// their input order. Matching is on the raw key whatever the identity mode.
    pub fn find_duplicates(&self) -> Vec<&Term> {
        let mut clusters: BTreeMap<&str, Vec<&Term>> = BTreeMap::new();
        for term in &self.terms {
            clusters.entry(term.key()).or_default().push(term);
        }
        clusters
            .into_values()
            .filter(|cluster| cluster.len() > 1)
            .flatten()
            .collect()
    }

    /// Set view of the group: one term per identity key under the current mode.
    ///
    /// The first term seen for each identity key is kept, in input order. This
    /// is an alternate view and not what duplicate reporting uses.
    pub fn distinct_terms(&self) -> Vec<&Term> {
        let mut seen = HashSet::new();
        self.terms
            .iter()
            .filter(|term| seen.insert(term.identity_key()))
            .collect()
    }

    /// Key/value pairs in input order, duplicates included.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms.iter().map(|term| (term.key(), term.value()))
    }

    /// Renders each term as `<language>: <row>, <key> : <value><separator>`.
    ///
    /// Unless `silent`, every line is also emitted as an `info` event.
    pub fn dump(&self, separator: &str, silent: bool) -> String {
        let mut builder = String::new();
        for term in &self.terms {
            let line = format!(
                "{}: {}, {} : {}{}",
                self.language_code,
                term.source_row(),
                term.key(),
                term.value(),
                separator
            );
            if !silent {
                tracing::info!(target: "langdict::dump", "{}", line.trim_end());
            }
            builder.push_str(&line);
        }
        builder
    }
}
