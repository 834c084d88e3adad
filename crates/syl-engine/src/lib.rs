//! # syl-engine
//!
//! Course merge and staff identity resolution for syllabus.
//!
//! Coordinates between:
//! - Name normalization (comparison-only token forms of raw person names)
//! - The course catalog, folding per-semester observations into canonical courses
//! - The staff directory index (exact alias lookup, term-relevance fuzzy lookup)
//! - The staff resolver, attaching courses and discovered aliases to identities
//! - The aggregation pass and its review report

pub mod catalog;
pub mod course;
pub mod directory;
pub mod error;
pub mod normalize;
pub mod pass;
pub mod resolver;
pub mod staff;

pub use catalog::{CourseCatalog, order_observations};
pub use course::{CanonicalCourse, MergeEffect};
pub use directory::{FuzzyMatch, StaffDirectory, StaffId};
pub use error::{DirectoryError, MalformedName};
pub use normalize::{NormalizedName, is_short_form_of, normalize};
pub use pass::{
    AggregationOutput, AggregationReport, Aggregator, MatchConflict, NameSighting, PassOptions,
    aggregate,
};
pub use resolver::{
    Attachment, MatchMethod, NameMatch, ResolutionOutcome, ResolutionQuery, StaffResolver,
};
pub use staff::{IdentityState, StaffIdentity};
