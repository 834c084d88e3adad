use std::collections::BTreeSet;

use indexmap::IndexSet;
use serde::Serialize;
use syl_core::{CourseId, StaffSeed};

/// Lifecycle of a staff identity within one run.
///
/// ```text
/// seed → enriched
/// ```
///
/// There is no way back and no terminal state; a run simply ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityState {
    /// Only directory aliases, no attached courses.
    Seed,
    /// At least one attached course or resolver-discovered alias.
    Enriched,
}

/// One physical person, known by a growing set of raw name aliases.
///
/// Aliases and courses only ever grow. Mutation goes through the staff
/// directory that owns the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffIdentity {
    names: IndexSet<String>,
    #[serde(skip)]
    seed_name_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
    courses: BTreeSet<CourseId>,
}

impl StaffIdentity {
    /// `extra_names` are directory-level aliases (e.g. a maintained alias
    /// table); they count as seed names, not discoveries.
    pub(crate) fn from_seed(seed: StaffSeed, extra_names: impl IntoIterator<Item = String>) -> Self {
        let mut names: IndexSet<String> = seed.names.into_iter().collect();
        names.extend(extra_names);
        Self {
            seed_name_count: names.len(),
            names,
            department: seed.department,
            title: seed.title,
            email: seed.email,
            phone: seed.phone,
            office: seed.office,
            website: seed.website,
            photo: seed.photo,
            courses: BTreeSet::new(),
        }
    }

    pub(crate) fn add_name(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    pub(crate) fn attach_course(&mut self, course: &CourseId) -> bool {
        self.courses.insert(course.clone())
    }

    /// The first directory name, normally the `"First Last"` form.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    #[must_use]
    pub const fn names(&self) -> &IndexSet<String> {
        &self.names
    }

    /// Aliases registered by the resolver, in discovery order.
    pub fn discovered_names(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .skip(self.seed_name_count)
            .map(String::as_str)
    }

    #[must_use]
    pub const fn courses(&self) -> &BTreeSet<CourseId> {
        &self.courses
    }

    #[must_use]
    pub fn state(&self) -> IdentityState {
        if self.courses.is_empty() && self.names.len() == self.seed_name_count {
            IdentityState::Seed
        } else {
            IdentityState::Enriched
        }
    }

    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    #[must_use]
    pub fn office(&self) -> Option<&str> {
        self.office.as_deref()
    }

    #[must_use]
    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    #[must_use]
    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }
}
