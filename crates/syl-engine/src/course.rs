use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use syl_core::text::{clean_text, normalize_frequency};
use syl_core::{CourseId, CourseObservation, Semester, SourceSystem};

/// What a single observation did to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeEffect {
    /// First sighting of the course key.
    Created,
    /// A semester not yet in the offering history.
    NewOffering,
    /// The source that first reported this semester reported it again.
    Refreshed,
    /// Another source already reported this semester; its values were kept.
    CrossSourceTie { first: SourceSystem },
}

/// The merged record for one `(subject, number)` key.
///
/// Only the course merge engine mutates it; everything outside the crate
/// sees it read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalCourse {
    #[serde(flatten)]
    id: CourseId,
    title: String,
    description: String,
    most_recent_offering: Semester,
    /// Every semester the course was seen in, in processing order.
    offerings: IndexSet<Semester>,
    /// Source that first reported each semester.
    semester_sources: IndexMap<Semester, SourceSystem>,
    semester_staff: IndexMap<Semester, Vec<String>>,
    semester_websites: IndexMap<Semester, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prerequisites: Option<String>,
}

impl CanonicalCourse {
    pub(crate) fn from_observation(observation: &CourseObservation) -> Self {
        let semester = observation.semester;
        let mut course = Self {
            id: observation.id.clone(),
            title: observation.title.clone(),
            description: observation.description.clone(),
            most_recent_offering: semester,
            offerings: IndexSet::from([semester]),
            semester_sources: IndexMap::from([(semester, observation.source)]),
            semester_staff: IndexMap::new(),
            semester_websites: IndexMap::new(),
            frequency: None,
            prerequisites: None,
        };
        course.record_semester_details(observation, true);
        course.fill_rare_fields(observation);
        course
    }

    /// Fold one more observation of the same key into the record.
    pub(crate) fn absorb(&mut self, observation: &CourseObservation) -> MergeEffect {
        let semester = observation.semester;

        let effect = match self.semester_sources.get(&semester).copied() {
            Some(first) if first != observation.source => {
                self.record_semester_details(observation, false);
                MergeEffect::CrossSourceTie { first }
            }
            Some(_) => {
                self.overwrite_text(observation);
                self.record_semester_details(observation, true);
                MergeEffect::Refreshed
            }
            None => {
                self.offerings.insert(semester);
                self.semester_sources.insert(semester, observation.source);
                if semester > self.most_recent_offering {
                    self.most_recent_offering = semester;
                }
                self.overwrite_text(observation);
                self.record_semester_details(observation, true);
                MergeEffect::NewOffering
            }
        };

        self.fill_rare_fields(observation);
        effect
    }

    /// Later scrapes are assumed more complete, so their text replaces ours
    /// even when empty.
    fn overwrite_text(&mut self, observation: &CourseObservation) {
        self.title.clone_from(&observation.title);
        self.description.clone_from(&observation.description);
    }

    /// Per-semester instructors and website. With `overwrite` set the staff
    /// list is replaced wholesale, empty or not. Without it only missing or
    /// empty entries are filled.
    fn record_semester_details(&mut self, observation: &CourseObservation, overwrite: bool) {
        let semester = observation.semester;

        let staff_missing = self
            .semester_staff
            .get(&semester)
            .is_none_or(Vec::is_empty);
        if overwrite || staff_missing {
            self.semester_staff
                .insert(semester, observation.instructors.clone());
        }

        if let Some(url) = &observation.website {
            if overwrite || !self.semester_websites.contains_key(&semester) {
                self.semester_websites.insert(semester, url.clone());
            }
        }
    }

    /// Frequency and prerequisites rarely change: the first known value wins.
    fn fill_rare_fields(&mut self, observation: &CourseObservation) {
        if self.frequency.is_none() {
            self.frequency = observation.frequency.as_deref().map(normalize_frequency);
        }
        if self.prerequisites.is_none() {
            self.prerequisites = observation.prerequisites.as_deref().map(clean_text);
        }
    }

    #[must_use]
    pub const fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn most_recent_offering(&self) -> Semester {
        self.most_recent_offering
    }

    #[must_use]
    pub const fn offerings(&self) -> &IndexSet<Semester> {
        &self.offerings
    }

    #[must_use]
    pub fn source_of(&self, semester: Semester) -> Option<SourceSystem> {
        self.semester_sources.get(&semester).copied()
    }

    /// Raw instructor names of record for `semester`.
    #[must_use]
    pub fn staff_for(&self, semester: Semester) -> Option<&[String]> {
        self.semester_staff.get(&semester).map(Vec::as_slice)
    }

    #[must_use]
    pub const fn semester_staff(&self) -> &IndexMap<Semester, Vec<String>> {
        &self.semester_staff
    }

    #[must_use]
    pub fn website_for(&self, semester: Semester) -> Option<&str> {
        self.semester_websites.get(&semester).map(String::as_str)
    }

    #[must_use]
    pub fn frequency(&self) -> Option<&str> {
        self.frequency.as_deref()
    }

    #[must_use]
    pub fn prerequisites(&self) -> Option<&str> {
        self.prerequisites.as_deref()
    }
}
