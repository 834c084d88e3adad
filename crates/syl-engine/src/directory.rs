//! Staff directory index.
//!
//! Owns every [`StaffIdentity`] for one run and answers two queries:
//! - exact lookup: the raw string is byte-for-byte one of an identity's aliases
//! - fuzzy lookup: term relevance of the query against an identity's alias text
//!
//! Fuzzy scoring is a term-frequency measure, not an edit distance. Each
//! identity's aliases form one document; every distinct query term found in
//! it contributes `0.5 + 0.5 * occurrences / document_tokens`, and the sum
//! is divided by the identity's alias count. Identities padded with many
//! loosely related aliases score lower than a tight match. A score of `1.0`
//! or more takes at least two matching terms.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use syl_core::{CourseId, StaffSeed};
use tracing::Span;

use crate::error::DirectoryError;
use crate::normalize::{NormalizedName, comparison_tokens, normalize};
use crate::staff::StaffIdentity;

/// Handle to an identity inside the [`StaffDirectory`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StaffId(usize);

/// One fuzzy lookup candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuzzyMatch {
    pub staff: StaffId,
    pub score: f64,
}

/// Searchable text of one identity's aliases.
#[derive(Debug, Clone, Default)]
struct AliasDocument {
    term_counts: HashMap<String, usize>,
    token_total: usize,
    alias_count: usize,
    /// Aliases that parse as full names, for short-form comparison.
    names: Vec<NormalizedName>,
}

impl AliasDocument {
    fn add(&mut self, alias: &str) {
        let tokens = comparison_tokens(alias);
        self.token_total += tokens.len();
        for token in tokens {
            *self.term_counts.entry(token).or_default() += 1;
        }
        self.alias_count += 1;
        if let Ok(name) = normalize(alias) {
            self.names.push(name);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn score(&self, terms: &[String]) -> f64 {
        if self.token_total == 0 || self.alias_count == 0 {
            return 0.0;
        }
        let relevance: f64 = terms
            .iter()
            .filter_map(|term| self.term_counts.get(term))
            .map(|&count| 0.5f64.mul_add(count as f64 / self.token_total as f64, 0.5))
            .sum();
        relevance / self.alias_count as f64
    }
}

/// In-memory index over the staff identities of one aggregation run.
#[derive(Debug)]
pub struct StaffDirectory {
    identities: Vec<StaffIdentity>,
    documents: Vec<AliasDocument>,
    aliases: HashMap<String, StaffId>,
    span: Span,
}

impl StaffDirectory {
    /// Build the index from the raw directory.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::AmbiguousAlias`] if two entries share an
    /// alias and [`DirectoryError::EmptyIdentity`] for an entry without names.
    pub fn build<I>(seeds: I) -> Result<Self, DirectoryError>
    where
        I: IntoIterator<Item = StaffSeed>,
    {
        Self::build_with_aliases(seeds, &BTreeMap::new())
    }

    /// Build the index, adding `extra_aliases[name]` to every entry that
    /// lists `name`. Extra aliases are held to the same uniqueness rule.
    ///
    /// # Errors
    ///
    /// Same as [`StaffDirectory::build`].
    pub fn build_with_aliases<I>(
        seeds: I,
        extra_aliases: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, DirectoryError>
    where
        I: IntoIterator<Item = StaffSeed>,
    {
        let mut directory = Self {
            identities: Vec::new(),
            documents: Vec::new(),
            aliases: HashMap::new(),
            span: Span::none(),
        };

        for (position, seed) in seeds.into_iter().enumerate() {
            if seed.names.is_empty() {
                return Err(DirectoryError::EmptyIdentity { position });
            }

            let extra: Vec<String> = seed
                .names
                .iter()
                .filter_map(|name| extra_aliases.get(name))
                .flatten()
                .cloned()
                .collect();
            let identity = StaffIdentity::from_seed(seed, extra);
            let id = StaffId(directory.identities.len());

            let mut document = AliasDocument::default();
            for name in identity.names() {
                if let Some(owner) = directory.aliases.get(name) {
                    return Err(DirectoryError::AmbiguousAlias {
                        alias: name.clone(),
                        first: directory.identities[owner.0].display_name().to_string(),
                        second: identity.display_name().to_string(),
                    });
                }
                directory.aliases.insert(name.clone(), id);
                document.add(name);
            }

            directory.identities.push(identity);
            directory.documents.push(document);
        }

        Ok(directory)
    }

    /// Parent every directory event to `span`.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The identity owning exactly this alias string, if any.
    #[must_use]
    pub fn lookup_exact(&self, name: &str) -> Option<StaffId> {
        self.aliases.get(name).copied()
    }

    /// Candidates with a positive relevance score, best first.
    ///
    /// Equal scores keep directory order, so results are deterministic.
    #[must_use]
    pub fn lookup_fuzzy(&self, name: &str) -> Vec<FuzzyMatch> {
        let mut terms = comparison_tokens(name);
        terms.sort_unstable();
        terms.dedup();
        if terms.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<FuzzyMatch> = self
            .documents
            .iter()
            .enumerate()
            .filter_map(|(index, document)| {
                let score = document.score(&terms);
                (score > 0.0).then_some(FuzzyMatch {
                    staff: StaffId(index),
                    score,
                })
            })
            .collect();
        matches.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.staff.cmp(&b.staff)));
        matches
    }

    /// Whether any alias of `staff` is a short form of `query` (or the reverse).
    #[must_use]
    pub fn has_short_form_alias(&self, staff: StaffId, query: &NormalizedName) -> bool {
        self.documents
            .get(staff.0)
            .is_some_and(|document| document.names.iter().any(|name| name.is_short_form_of(query)))
    }

    /// Register `alias` on `staff`. Returns whether the alias set grew.
    ///
    /// An alias already owned by another identity is left alone: identities
    /// are never merged behind the caller's back.
    pub(crate) fn register_alias(&mut self, staff: StaffId, alias: &str) -> bool {
        match self.aliases.get(alias).copied() {
            Some(owner) if owner == staff => false,
            Some(owner) => {
                tracing::warn!(
                    parent: &self.span,
                    alias,
                    owner = self.identities[owner.0].display_name(),
                    requested = self.identities[staff.0].display_name(),
                    "alias already belongs to another identity; not reassigning"
                );
                false
            }
            None => {
                self.aliases.insert(alias.to_string(), staff);
                self.identities[staff.0].add_name(alias);
                self.documents[staff.0].add(alias);
                tracing::debug!(
                    parent: &self.span,
                    alias,
                    staff = self.identities[staff.0].display_name(),
                    "registered alias"
                );
                true
            }
        }
    }

    /// Attach `course` to `staff`. Returns whether the course set grew.
    pub(crate) fn attach_course(&mut self, staff: StaffId, course: &CourseId) -> bool {
        self.identities[staff.0].attach_course(course)
    }

    #[must_use]
    pub fn get(&self, staff: StaffId) -> Option<&StaffIdentity> {
        self.identities.get(staff.0)
    }

    /// Display name of `staff`, or an empty string for a foreign handle.
    #[must_use]
    pub fn display_name(&self, staff: StaffId) -> &str {
        self.get(staff).map_or("", StaffIdentity::display_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StaffId, &StaffIdentity)> {
        self.identities
            .iter()
            .enumerate()
            .map(|(index, identity)| (StaffId(index), identity))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    #[must_use]
    pub fn into_identities(self) -> Vec<StaffIdentity> {
        self.identities
    }
}
