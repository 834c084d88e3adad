//! Property tests for merge and resolution invariants.

use std::collections::BTreeSet;

use proptest::prelude::*;
use syl_core::{CourseId, CourseObservation, Season, Semester, SourceSystem, StaffSeed};
use syl_engine::{
    CourseCatalog, ResolutionQuery, StaffDirectory, StaffId, StaffResolver, is_short_form_of,
};

fn word() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,7}"
}

fn person_name() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 2..4).prop_map(|words| words.join(" "))
}

fn semester() -> impl Strategy<Value = Semester> {
    (2000u16..2030, 0usize..Season::ALL.len())
        .prop_map(|(year, season)| Semester::new(Season::ALL[season], year).unwrap())
}

fn directory(names: &BTreeSet<String>) -> StaffDirectory {
    StaffDirectory::build(names.iter().map(|name| StaffSeed::named([name.as_str()]))).unwrap()
}

fn score_of(directory: &StaffDirectory, staff: StaffId, query: &str) -> f64 {
    directory
        .lookup_fuzzy(query)
        .iter()
        .find(|candidate| candidate.staff == staff)
        .map_or(0.0, |candidate| candidate.score)
}

proptest! {
    /// Resolving the same name on the same course twice changes nothing the
    /// second time.
    #[test]
    fn resolution_is_idempotent(
        seeds in prop::collection::btree_set(person_name(), 1..6),
        query in person_name(),
    ) {
        let mut dir = directory(&seeds);
        let course: CourseId = "COMPSCI 101".parse().unwrap();
        let resolver = StaffResolver::new();
        let query = ResolutionQuery::new(&query, &course);

        resolver.resolve(&query, &mut dir).unwrap();
        let after_first: Vec<_> = dir.iter().map(|(_, staff)| staff.clone()).collect();
        resolver.resolve(&query, &mut dir).unwrap();
        let after_second: Vec<_> = dir.iter().map(|(_, staff)| staff.clone()).collect();

        prop_assert_eq!(after_first, after_second);
    }

    /// The offering history is the same set whatever order observations
    /// arrive in, and the most recent pointer is always the latest semester.
    #[test]
    fn offering_set_ignores_merge_order(
        (first_order, second_order) in prop::collection::vec(semester(), 1..8)
            .prop_flat_map(|semesters| (Just(semesters.clone()), Just(semesters).prop_shuffle())),
    ) {
        let course: CourseId = "MATH 235".parse().unwrap();
        let merge = |order: &[Semester]| {
            let mut catalog = CourseCatalog::new();
            for semester in order {
                catalog.merge(&CourseObservation::new(course.clone(), "Linear Algebra", *semester, SourceSystem::Math));
            }
            let merged = catalog.get(&course).unwrap().clone();
            (merged.offerings().iter().copied().collect::<BTreeSet<_>>(), merged.most_recent_offering())
        };

        let (first_set, first_latest) = merge(&first_order);
        let (second_set, second_latest) = merge(&second_order);
        prop_assert_eq!(&first_set, &second_set);
        prop_assert_eq!(first_latest, second_latest);
        prop_assert_eq!(Some(&first_latest), first_set.iter().next_back());
    }

    /// Padding an identity with aliases unrelated to the query never raises
    /// its score for that query.
    #[test]
    fn unrelated_aliases_never_raise_score(
        name in person_name(),
        query in person_name(),
        padding in prop::collection::btree_set("[0-9]{2,4} [0-9]{2,4}", 1..5),
    ) {
        let plain = directory(&BTreeSet::from([name.clone()]));
        let mut padded_seed = StaffSeed::named([name]);
        padded_seed.names.extend(padding);
        let padded = StaffDirectory::build([padded_seed]).unwrap();

        let staff = plain.iter().next().unwrap().0;
        prop_assert!(score_of(&padded, staff, &query) <= score_of(&plain, staff, &query));
    }

    #[test]
    fn short_form_is_symmetric(a in person_name(), b in person_name()) {
        prop_assert_eq!(is_short_form_of(&a, &b), is_short_form_of(&b, &a));
    }

    /// Every name is a short form of itself.
    #[test]
    fn short_form_is_reflexive(a in person_name()) {
        prop_assert!(is_short_form_of(&a, &a));
    }
}
