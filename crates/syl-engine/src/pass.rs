//! The batch aggregation pass.
//!
//! One coordinator, single-threaded: merge every observation into the
//! course catalog, then walk the canonical courses and resolve each
//! attributed instructor name against the staff directory. Per-name
//! failures land in the [`AggregationReport`]; nothing here aborts a run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use syl_core::text::clean_text;
use syl_core::{CourseId, CourseObservation, Semester, SourceSystem};
use tracing::Span;

use crate::catalog::{CourseCatalog, order_observations};
use crate::course::{CanonicalCourse, MergeEffect};
use crate::directory::StaffDirectory;
use crate::resolver::{
    DEFAULT_STRONG_MATCH_THRESHOLD, MatchMethod, ResolutionOutcome, ResolutionQuery, StaffResolver,
};
use crate::staff::StaffIdentity;

/// Version of the serialized [`AggregationOutput`] layout.
pub const FORMAT_VERSION: u32 = 1;

/// Knobs for one aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PassOptions {
    /// Sort observations by semester, then source rank, before merging.
    pub sort_observations: bool,
    pub source_order: Vec<SourceSystem>,
    pub strong_match_threshold: f64,
    /// Instructor strings that are not people. Compared case-insensitively.
    pub placeholder_names: Vec<String>,
    /// Resolve every attributed semester, not just the most recent one.
    pub resolve_all_semesters: bool,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self {
            sort_observations: true,
            source_order: SourceSystem::ALL.to_vec(),
            strong_match_threshold: DEFAULT_STRONG_MATCH_THRESHOLD,
            placeholder_names: ["Staff", "TBA", "TBD"].map(String::from).to_vec(),
            resolve_all_semesters: false,
        }
    }
}

impl PassOptions {
    /// Whether `name` is a configured placeholder such as `TBA`, compared
    /// after whitespace cleanup and ignoring ASCII case.
    #[must_use]
    pub fn is_placeholder(&self, name: &str) -> bool {
        let name = clean_text(name);
        self.placeholder_names
            .iter()
            .any(|placeholder| placeholder.eq_ignore_ascii_case(&name))
    }
}

/// One instructor name on one course offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameSighting {
    pub name: String,
    pub course: CourseId,
    pub semester: Semester,
}

/// A name that matched one identity while another was just as plausible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchConflict {
    #[serde(flatten)]
    pub sighting: NameSighting,
    pub method: MatchMethod,
    pub chosen: String,
    pub contender: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub observations: usize,
    pub courses_created: usize,
    pub new_offerings: usize,
    pub refreshed: usize,
    pub cross_source_ties: usize,
}

impl MergeStats {
    fn record(&mut self, effect: MergeEffect) {
        self.observations += 1;
        match effect {
            MergeEffect::Created => self.courses_created += 1,
            MergeEffect::NewOffering => self.new_offerings += 1,
            MergeEffect::Refreshed => self.refreshed += 1,
            MergeEffect::CrossSourceTie { .. } => self.cross_source_ties += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionStats {
    pub names_seen: usize,
    pub exact: usize,
    pub fuzzy: usize,
    pub short_form: usize,
    pub aliases_added: usize,
    pub courses_attached: usize,
}

/// Summary of a pass plus everything that needs a human look.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationReport {
    pub merge: MergeStats,
    pub resolution: ResolutionStats,
    pub unresolved: Vec<NameSighting>,
    pub malformed: Vec<NameSighting>,
    pub skipped_placeholders: Vec<NameSighting>,
    pub conflicts: Vec<MatchConflict>,
}

impl AggregationReport {
    #[must_use]
    pub fn needs_review(&self) -> bool {
        !(self.unresolved.is_empty() && self.malformed.is_empty() && self.conflicts.is_empty())
    }
}

/// Everything a pass produces, ready for a persistence layer.
#[derive(Debug, Clone, Serialize)]
pub struct AggregationOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub courses: Vec<CanonicalCourse>,
    pub staff: Vec<StaffIdentity>,
    pub report: AggregationReport,
}

/// Runs aggregation passes with fixed options.
#[derive(Debug, Clone)]
pub struct Aggregator {
    options: PassOptions,
    span: Span,
}

impl Aggregator {
    #[must_use]
    pub fn new(options: PassOptions) -> Self {
        Self {
            options,
            span: Span::none(),
        }
    }

    /// Parent the pass, and the spans handed to each component, to `span`.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Merge `observations`, then resolve instructors against `directory`.
    pub fn run(
        &self,
        mut observations: Vec<CourseObservation>,
        directory: StaffDirectory,
    ) -> AggregationOutput {
        let mut report = AggregationReport::default();

        if self.options.sort_observations {
            order_observations(&mut observations, &self.options.source_order);
        }

        let mut catalog = CourseCatalog::new()
            .with_span(tracing::debug_span!(parent: &self.span, "merge"));
        for observation in &observations {
            report.merge.record(catalog.merge(observation));
        }
        tracing::info!(
            parent: &self.span,
            observations = report.merge.observations,
            courses = catalog.len(),
            "merged course observations"
        );

        let mut directory =
            directory.with_span(tracing::debug_span!(parent: &self.span, "directory"));
        let resolver = StaffResolver::with_threshold(self.options.strong_match_threshold)
            .with_span(tracing::debug_span!(parent: &self.span, "resolve"));

        for course in catalog.iter() {
            for (semester, names) in self.semesters_to_resolve(course) {
                for name in names {
                    self.resolve_one(&resolver, &mut directory, course.id(), semester, name, &mut report);
                }
            }
        }

        tracing::info!(
            parent: &self.span,
            staff = directory.len(),
            unresolved = report.unresolved.len(),
            malformed = report.malformed.len(),
            conflicts = report.conflicts.len(),
            "resolved instructors"
        );

        AggregationOutput {
            version: FORMAT_VERSION,
            generated_at: Utc::now(),
            courses: catalog.into_courses(),
            staff: directory.into_identities(),
            report,
        }
    }

    fn semesters_to_resolve<'c>(
        &self,
        course: &'c CanonicalCourse,
    ) -> Vec<(Semester, &'c [String])> {
        if self.options.resolve_all_semesters {
            course
                .semester_staff()
                .iter()
                .map(|(semester, names)| (*semester, names.as_slice()))
                .collect()
        } else {
            let latest = course.most_recent_offering();
            course
                .staff_for(latest)
                .map(|names| vec![(latest, names)])
                .unwrap_or_default()
        }
    }

    fn resolve_one(
        &self,
        resolver: &StaffResolver,
        directory: &mut StaffDirectory,
        course: &CourseId,
        semester: Semester,
        name: &str,
        report: &mut AggregationReport,
    ) {
        let sighting = || NameSighting {
            name: name.to_string(),
            course: course.clone(),
            semester,
        };

        if self.options.is_placeholder(name) {
            report.skipped_placeholders.push(sighting());
            return;
        }

        report.resolution.names_seen += 1;
        match resolver.resolve(&ResolutionQuery::new(name, course), directory) {
            Ok(ResolutionOutcome::Attached(attachment)) => {
                let stats = &mut report.resolution;
                match attachment.matched.method {
                    MatchMethod::Exact => stats.exact += 1,
                    MatchMethod::Fuzzy => stats.fuzzy += 1,
                    MatchMethod::ShortForm => stats.short_form += 1,
                }
                stats.aliases_added += usize::from(attachment.alias_added);
                stats.courses_attached += usize::from(attachment.course_added);

                if let Some(contender) = attachment.matched.contender {
                    report.conflicts.push(MatchConflict {
                        sighting: sighting(),
                        method: attachment.matched.method,
                        chosen: directory.display_name(attachment.matched.staff).to_string(),
                        contender: directory.display_name(contender).to_string(),
                    });
                }
            }
            Ok(ResolutionOutcome::Unresolved) => report.unresolved.push(sighting()),
            Err(error) => {
                tracing::warn!(parent: &self.span, course = %course, %error, "skipping instructor name");
                report.malformed.push(sighting());
            }
        }
    }
}

/// Run one pass with `options` and no tracing span.
pub fn aggregate(
    observations: Vec<CourseObservation>,
    directory: StaffDirectory,
    options: PassOptions,
) -> AggregationOutput {
    Aggregator::new(options).run(observations, directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use syl_core::StaffSeed;

    fn obs(course: &str, semester: &str, source: SourceSystem, names: &[&str]) -> CourseObservation {
        CourseObservation::new(course.parse().unwrap(), "Title", semester.parse().unwrap(), source)
            .with_instructors(names.iter().copied())
    }

    fn directory(entries: &[&str]) -> StaffDirectory {
        StaffDirectory::build(entries.iter().map(|name| StaffSeed::named([*name]))).unwrap()
    }

    #[test]
    fn placeholders_are_skipped_not_unresolved() {
        let output = aggregate(
            vec![obs("MATH 131", "Fall 2021", SourceSystem::Math, &["staff", "Jane Smith"])],
            directory(&["Jane Smith"]),
            PassOptions::default(),
        );

        assert_eq!(output.report.skipped_placeholders.len(), 1);
        assert_eq!(output.report.skipped_placeholders[0].name, "staff");
        assert!(output.report.unresolved.is_empty());
        assert_eq!(output.report.resolution.exact, 1);
    }

    #[test]
    fn placeholder_match_ignores_surrounding_whitespace_and_case() {
        let mut options = PassOptions::default();
        options.placeholder_names.push("To Be Announced".into());
        assert!(options.is_placeholder("Staff\u{a0}"));
        assert!(options.is_placeholder("  tbd "));
        assert!(options.is_placeholder("to  be\tannounced"));
        assert!(!options.is_placeholder("Staff Member"));
    }

    #[test]
    fn malformed_name_is_reported_and_others_continue() {
        let output = aggregate(
            vec![obs("MATH 131", "Fall 2021", SourceSystem::Math, &["Smith", "Jane Smith"])],
            directory(&["Jane Smith"]),
            PassOptions::default(),
        );

        assert_eq!(output.report.malformed.len(), 1);
        assert_eq!(output.staff[0].courses().len(), 1);
        assert!(output.report.needs_review());
    }

    #[test]
    fn only_most_recent_semester_by_default() {
        let observations = vec![
            obs("COMPSCI 311", "Fall 2021", SourceSystem::Cics, &["Old Teacher"]),
            obs("COMPSCI 311", "Spring 2022", SourceSystem::Cics, &["Jane Smith"]),
        ];

        let latest = aggregate(observations.clone(), directory(&["Jane Smith"]), PassOptions::default());
        assert!(latest.report.unresolved.is_empty());

        let all = aggregate(
            observations,
            directory(&["Jane Smith"]),
            PassOptions {
                resolve_all_semesters: true,
                ..PassOptions::default()
            },
        );
        assert_eq!(all.report.unresolved.len(), 1);
        assert_eq!(all.report.unresolved[0].name, "Old Teacher");
    }

    #[test]
    fn merge_stats_count_effects() {
        let output = aggregate(
            vec![
                obs("CICS 110", "Fall 2021", SourceSystem::Math, &[]),
                obs("CICS 110", "Fall 2021", SourceSystem::Cics, &[]),
                obs("CICS 110", "Spring 2022", SourceSystem::Cics, &[]),
            ],
            directory(&[]),
            PassOptions::default(),
        );

        assert_eq!(
            output.report.merge,
            MergeStats {
                observations: 3,
                courses_created: 1,
                new_offerings: 1,
                refreshed: 0,
                cross_source_ties: 1,
            }
        );
        // Sorted: CICS reports Fall 2021 first.
        assert_eq!(
            output.courses[0].source_of("Fall 2021".parse().unwrap()),
            Some(SourceSystem::Cics)
        );
        assert_eq!(output.version, FORMAT_VERSION);
    }
}
