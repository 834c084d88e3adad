//! Staff resolver.
//!
//! Maps one raw instructor name seen on a course to a staff identity, then
//! records the sighting on that identity. Rules run in order and stop at the
//! first hit:
//!
//! 1. exact alias
//! 2. strong fuzzy match (top score at or above the threshold)
//! 3. short form: the best-scored candidate owning an alias that
//!    abbreviates the query, or that the query abbreviates
//!
//! A match found by rule 2 or 3 also registers the raw name as a new alias,
//! so the next sighting of the same spelling is an exact hit.

use serde::Serialize;
use syl_core::CourseId;
use tracing::Span;

use crate::directory::{FuzzyMatch, StaffDirectory, StaffId};
use crate::error::MalformedName;
use crate::normalize::normalize;

/// Default score at or above which a fuzzy candidate is accepted outright.
pub const DEFAULT_STRONG_MATCH_THRESHOLD: f64 = 1.0;

/// A raw instructor name and the course it was listed on.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionQuery<'a> {
    pub name: &'a str,
    pub course: &'a CourseId,
}

impl<'a> ResolutionQuery<'a> {
    #[must_use]
    pub const fn new(name: &'a str, course: &'a CourseId) -> Self {
        Self { name, course }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Exact,
    Fuzzy,
    ShortForm,
}

/// Which identity a name refers to, and how that was decided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NameMatch {
    pub staff: StaffId,
    pub method: MatchMethod,
    /// Fuzzy score of the chosen candidate; absent for exact hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// A different identity that matched just as plausibly. The choice
    /// above stands; the pair is worth a manual look.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contender: Option<StaffId>,
}

/// A successful resolution and what it changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Attachment {
    #[serde(flatten)]
    pub matched: NameMatch,
    pub alias_added: bool,
    pub course_added: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    Attached(Attachment),
    Unresolved,
}

impl ResolutionOutcome {
    #[must_use]
    pub const fn attachment(&self) -> Option<&Attachment> {
        match self {
            Self::Attached(attachment) => Some(attachment),
            Self::Unresolved => None,
        }
    }
}

/// Stateless between calls; all state lives in the directory it mutates.
#[derive(Debug, Clone)]
pub struct StaffResolver {
    strong_threshold: f64,
    span: Span,
}

impl Default for StaffResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl StaffResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_STRONG_MATCH_THRESHOLD)
    }

    #[must_use]
    pub fn with_threshold(strong_threshold: f64) -> Self {
        Self {
            strong_threshold,
            span: Span::none(),
        }
    }

    /// Parent every resolver event to `span`.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Decide which identity `name` refers to without touching the directory.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedName`] when `name` is not a directory alias and
    /// has fewer than two tokens.
    pub fn match_name(
        &self,
        name: &str,
        directory: &StaffDirectory,
    ) -> Result<Option<NameMatch>, MalformedName> {
        if let Some(staff) = directory.lookup_exact(name) {
            return Ok(Some(NameMatch {
                staff,
                method: MatchMethod::Exact,
                score: None,
                contender: None,
            }));
        }

        let query = normalize(name)?;

        let candidates = directory.lookup_fuzzy(name);
        let short_forms: Vec<&FuzzyMatch> = candidates
            .iter()
            .filter(|candidate| directory.has_short_form_alias(candidate.staff, &query))
            .collect();

        if let Some(top) = candidates.first().filter(|top| top.score >= self.strong_threshold) {
            let tied = candidates
                .iter()
                .skip(1)
                .find(|other| (other.score - top.score).abs() <= f64::EPSILON);
            let contender = short_forms
                .iter()
                .copied()
                .find(|short| short.staff != top.staff)
                .or(tied)
                .map(|other| other.staff);
            return Ok(Some(NameMatch {
                staff: top.staff,
                method: MatchMethod::Fuzzy,
                score: Some(top.score),
                contender,
            }));
        }

        Ok(short_forms.first().map(|chosen| NameMatch {
            staff: chosen.staff,
            method: MatchMethod::ShortForm,
            score: Some(chosen.score),
            contender: short_forms.get(1).map(|other| other.staff),
        }))
    }

    /// Resolve `query` and record the result on the matched identity.
    ///
    /// Idempotent: resolving the same name and course again leaves the
    /// directory unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedName`] when the name is not a directory alias and
    /// has fewer than two tokens. The directory is left untouched in that case.
    pub fn resolve(
        &self,
        query: &ResolutionQuery<'_>,
        directory: &mut StaffDirectory,
    ) -> Result<ResolutionOutcome, MalformedName> {
        let Some(matched) = self.match_name(query.name, directory)? else {
            tracing::debug!(
                parent: &self.span,
                name = query.name,
                course = %query.course,
                "no matching staff identity"
            );
            return Ok(ResolutionOutcome::Unresolved);
        };

        let alias_added = matched.method != MatchMethod::Exact
            && directory.register_alias(matched.staff, query.name);
        let course_added = directory.attach_course(matched.staff, query.course);

        tracing::debug!(
            parent: &self.span,
            name = query.name,
            course = %query.course,
            staff = directory.display_name(matched.staff),
            method = ?matched.method,
            score = matched.score,
            alias_added,
            course_added,
            "resolved instructor"
        );
        if let Some(contender) = matched.contender {
            tracing::warn!(
                parent: &self.span,
                name = query.name,
                chosen = directory.display_name(matched.staff),
                contender = directory.display_name(contender),
                "name matches more than one identity"
            );
        }

        Ok(ResolutionOutcome::Attached(Attachment {
            matched,
            alias_added,
            course_added,
        }))
    }
}
