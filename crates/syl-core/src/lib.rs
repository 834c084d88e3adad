//! # syl-core
//!
//! Input value types shared by every syllabus crate.
//!
//! This crate holds the shapes that scrapers hand to the aggregation engine:
//! - Course identifiers and academic semesters
//! - Source system tags for the scraped sites
//! - One-semester course observations and seed staff directory entries
//! - Text cleanup helpers used at the scraper boundary
//! - Cross-cutting error types

pub mod course_id;
pub mod errors;
pub mod observation;
pub mod seed;
pub mod semester;
pub mod source;
pub mod text;

pub use course_id::CourseId;
pub use errors::CoreError;
pub use observation::CourseObservation;
pub use seed::StaffSeed;
pub use semester::{Season, Semester};
pub use source::SourceSystem;
