//! Course merge engine.
//!
//! Folds per-semester course observations into one [`CanonicalCourse`] per
//! `(subject, number)` key. Merge order matters: title and description are
//! last-write-wins, so callers feed observations oldest-first and
//! interleave sources in a fixed order (see [`order_observations`]).

use indexmap::IndexMap;
use syl_core::{CourseId, CourseObservation, SourceSystem};
use tracing::Span;

use crate::course::{CanonicalCourse, MergeEffect};

/// Owns every canonical course record for one aggregation run.
#[derive(Debug)]
pub struct CourseCatalog {
    courses: IndexMap<CourseId, CanonicalCourse>,
    span: Span,
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            courses: IndexMap::new(),
            span: Span::none(),
        }
    }

    /// Parent every merge event to `span`.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Merge one observation into the catalog.
    ///
    /// The observation's key is assumed well-formed; `CourseId` construction
    /// already rejected anything else.
    pub fn merge(&mut self, observation: &CourseObservation) -> MergeEffect {
        let Some(course) = self.courses.get_mut(&observation.id) else {
            tracing::debug!(
                parent: &self.span,
                course = %observation.id,
                semester = %observation.semester,
                source = %observation.source,
                "new canonical course"
            );
            self.courses.insert(
                observation.id.clone(),
                CanonicalCourse::from_observation(observation),
            );
            return MergeEffect::Created;
        };

        let effect = course.absorb(observation);
        match effect {
            MergeEffect::CrossSourceTie { first } => tracing::debug!(
                parent: &self.span,
                course = %observation.id,
                semester = %observation.semester,
                kept = %first,
                ignored = %observation.source,
                "semester already reported by another source; keeping first values"
            ),
            _ => tracing::trace!(
                parent: &self.span,
                course = %observation.id,
                semester = %observation.semester,
                ?effect,
                "merged observation"
            ),
        }
        effect
    }

    #[must_use]
    pub fn get(&self, id: &CourseId) -> Option<&CanonicalCourse> {
        self.courses.get(id)
    }

    /// Courses in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &CanonicalCourse> {
        self.courses.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    #[must_use]
    pub fn into_courses(self) -> Vec<CanonicalCourse> {
        self.courses.into_values().collect()
    }
}

/// Stable-sort observations oldest semester first, then by the position of
/// their source in `source_order`. Sources missing from the list sort last.
pub fn order_observations(observations: &mut [CourseObservation], source_order: &[SourceSystem]) {
    let rank = |source: SourceSystem| {
        source_order
            .iter()
            .position(|s| *s == source)
            .unwrap_or(source_order.len())
    };
    observations.sort_by_key(|obs| (obs.semester, rank(obs.source)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use syl_core::Semester;

    fn id(text: &str) -> CourseId {
        text.parse().unwrap()
    }

    fn sem(text: &str) -> Semester {
        text.parse().unwrap()
    }

    fn obs(course: &str, semester: &str, source: SourceSystem, title: &str) -> CourseObservation {
        CourseObservation::new(id(course), title, sem(semester), source)
    }

    #[test]
    fn first_observation_seeds_record() {
        let mut catalog = CourseCatalog::new();
        let effect = catalog.merge(
            &obs("COMPSCI 220", "Fall 2021", SourceSystem::Cics, "Programming Methodology")
                .with_description("Design and implementation of programs.")
                .with_instructors(["Marius Minea"])
                .with_website("https://example.edu/220"),
        );

        assert_eq!(effect, MergeEffect::Created);
        let course = catalog.get(&id("COMPSCI 220")).unwrap();
        assert_eq!(course.title(), "Programming Methodology");
        assert_eq!(course.most_recent_offering(), sem("Fall 2021"));
        assert_eq!(course.offerings().iter().copied().collect::<Vec<_>>(), vec![sem("Fall 2021")]);
        assert_eq!(course.staff_for(sem("Fall 2021")), Some(&["Marius Minea".to_string()][..]));
        assert_eq!(course.website_for(sem("Fall 2021")), Some("https://example.edu/220"));
        assert_eq!(course.source_of(sem("Fall 2021")), Some(SourceSystem::Cics));
    }

    #[test]
    fn later_observation_wins_title_and_extends_history() {
        let mut catalog = CourseCatalog::new();
        catalog.merge(&obs("COMPSCI 220", "Fall 2021", SourceSystem::Cics, "Old Title"));
        let effect = catalog.merge(&obs("COMPSCI 220", "Spring 2022", SourceSystem::Cics, "New Title"));

        assert_eq!(effect, MergeEffect::NewOffering);
        let course = catalog.get(&id("COMPSCI 220")).unwrap();
        assert_eq!(course.title(), "New Title");
        assert_eq!(course.most_recent_offering(), sem("Spring 2022"));
        assert_eq!(course.offerings().len(), 2);
    }

    #[test]
    fn reobserving_semester_updates_in_place() {
        let mut catalog = CourseCatalog::new();
        catalog.merge(
            &obs("MATH 131", "Fall 2021", SourceSystem::Math, "Calculus")
                .with_instructors(["A One", "B Two"]),
        );
        let effect = catalog.merge(
            &obs("MATH 131", "Fall 2021", SourceSystem::Math, "Calculus I")
                .with_instructors(["C Three"]),
        );

        assert_eq!(effect, MergeEffect::Refreshed);
        let course = catalog.get(&id("MATH 131")).unwrap();
        assert_eq!(course.offerings().len(), 1);
        assert_eq!(course.title(), "Calculus I");
        assert_eq!(course.staff_for(sem("Fall 2021")), Some(&["C Three".to_string()][..]));
    }

    #[test]
    fn empty_instructor_list_replaces_entry() {
        let mut catalog = CourseCatalog::new();
        catalog.merge(
            &obs("MATH 131", "Fall 2021", SourceSystem::Math, "Calculus").with_instructors(["A One"]),
        );
        catalog.merge(&obs("MATH 131", "Fall 2021", SourceSystem::Math, "Calculus"));

        let course = catalog.get(&id("MATH 131")).unwrap();
        assert_eq!(course.staff_for(sem("Fall 2021")), Some(&[][..]));
    }

    #[test]
    fn first_observation_without_instructors_records_empty_list() {
        let mut catalog = CourseCatalog::new();
        catalog.merge(&obs("MATH 131", "Fall 2021", SourceSystem::Math, "Calculus"));

        let course = catalog.get(&id("MATH 131")).unwrap();
        assert_eq!(course.staff_for(sem("Fall 2021")), Some(&[][..]));
    }

    #[test]
    fn later_empty_description_overwrites() {
        let mut catalog = CourseCatalog::new();
        catalog.merge(
            &obs("COMPSCI 220", "Fall 2021", SourceSystem::Cics, "Programming").with_description("old"),
        );
        catalog.merge(&obs("COMPSCI 220", "Spring 2022", SourceSystem::Cics, "Programming"));

        let course = catalog.get(&id("COMPSCI 220")).unwrap();
        assert_eq!(course.description(), "");
    }

    #[test]
    fn cross_source_tie_fills_empty_staff_entry() {
        let mut catalog = CourseCatalog::new();
        catalog.merge(&obs("CICS 110", "Fall 2021", SourceSystem::Cics, "Foundations"));
        catalog.merge(
            &obs("CICS 110", "Fall 2021", SourceSystem::Math, "Foundations").with_instructors(["B Two"]),
        );

        let course = catalog.get(&id("CICS 110")).unwrap();
        assert_eq!(course.staff_for(sem("Fall 2021")), Some(&["B Two".to_string()][..]));
    }

    #[test]
    fn cross_source_tie_keeps_first_writer() {
        let mut catalog = CourseCatalog::new();
        catalog.merge(
            &obs("CICS 110", "Fall 2021", SourceSystem::Cics, "Foundations")
                .with_description("first")
                .with_instructors(["A One"]),
        );
        let effect = catalog.merge(
            &obs("CICS 110", "Fall 2021", SourceSystem::Math, "Other Title")
                .with_description("second")
                .with_instructors(["B Two"])
                .with_website("https://example.edu/110"),
        );

        assert_eq!(effect, MergeEffect::CrossSourceTie { first: SourceSystem::Cics });
        let course = catalog.get(&id("CICS 110")).unwrap();
        assert_eq!(course.title(), "Foundations");
        assert_eq!(course.description(), "first");
        assert_eq!(course.staff_for(sem("Fall 2021")), Some(&["A One".to_string()][..]));
        assert_eq!(course.website_for(sem("Fall 2021")), Some("https://example.edu/110"));
    }

    #[test]
    fn rare_fields_first_known_value_wins() {
        let mut catalog = CourseCatalog::new();
        catalog.merge(&obs("MATH 235", "Fall 2020", SourceSystem::Math, "Linear Algebra"));
        catalog.merge(
            &obs("MATH 235", "Spring 2021", SourceSystem::Math, "Linear Algebra")
                .with_frequency("Fall/Spring/Summer")
                .with_prerequisites("MATH 132"),
        );
        catalog.merge(
            &obs("MATH 235", "Fall 2021", SourceSystem::Math, "Linear Algebra")
                .with_frequency("Fall")
                .with_prerequisites("MATH 131"),
        );

        let course = catalog.get(&id("MATH 235")).unwrap();
        assert_eq!(course.frequency(), Some("Fall, Spring, and Summer"));
        assert_eq!(course.prerequisites(), Some("MATH 132"));
    }

    #[test]
    fn out_of_order_semester_keeps_most_recent_pointer() {
        let mut catalog = CourseCatalog::new();
        catalog.merge(&obs("COMPSCI 311", "Spring 2022", SourceSystem::Cics, "Algorithms"));
        catalog.merge(&obs("COMPSCI 311", "Fall 2020", SourceSystem::Cics, "Algorithms"));

        let course = catalog.get(&id("COMPSCI 311")).unwrap();
        assert_eq!(course.most_recent_offering(), sem("Spring 2022"));
        assert_eq!(
            course.offerings().iter().copied().collect::<Vec<_>>(),
            vec![sem("Spring 2022"), sem("Fall 2020")]
        );
    }

    #[test]
    fn orders_by_semester_then_source_rank() {
        let mut observations = vec![
            obs("MATH 131", "Spring 2022", SourceSystem::Math, "a"),
            obs("COMPSCI 220", "Spring 2022", SourceSystem::Cics, "b"),
            obs("MATH 132", "Fall 2021", SourceSystem::Math, "c"),
            obs("COMPSCI 230", "Fall 2021", SourceSystem::Cics, "d"),
        ];
        order_observations(&mut observations, &[SourceSystem::Cics, SourceSystem::Math]);

        let titles: Vec<&str> = observations.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["d", "c", "b", "a"]);
    }
}
