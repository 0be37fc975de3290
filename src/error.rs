use crate::model::{EntityId, Namespace};
use std::path::PathBuf;
use thiserror::Error;

/// Fatal build errors. Every check raises at the point of detection and
/// the pipeline never continues past the first error, so no output
/// document is written for a failed build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Malformed or invalid calendar date in a date field
    #[error("{}: invalid YYYY/MM/DD date in {field}: {value}", .path.display())]
    DateFormat {
        path: PathBuf,
        field: String,
        value: String,
    },

    /// Gender token outside the recognized set
    #[error("{}: unsupported gender: {value}", .path.display())]
    GenderFormat { path: PathBuf, value: String },

    /// Name-like field exceeds the length limit
    #[error("{}: {field} name too long: {value}", .path.display())]
    NameFormat {
        path: PathBuf,
        field: String,
        value: String,
    },

    /// An id field that does not parse as a numeric reference
    #[error("{}: invalid id in {field}: {value}", .path.display())]
    IdFormat {
        path: PathBuf,
        field: String,
        value: String,
    },

    /// A site reference to a zoo or wild range that was never imported
    #[error("{}: site id doesn't exist: {id}", .path.display())]
    MissingSite { path: PathBuf, id: EntityId },

    /// A record filed under a directory that doesn't match its site id
    #[error("{}: file path and site id don't match: {id}", .path.display())]
    SitePathMismatch { path: PathBuf, id: EntityId },

    /// The same id declared by more than one record in a namespace
    #[error("duplicate {ns} ids for names: {names:?}")]
    DuplicateIds { ns: Namespace, names: Vec<String> },

    /// A litter edge whose counterpart panda is not in the dataset
    #[error("litter values inconsistent, or sibling not in dataset: {from} -> {to}")]
    Link { from: EntityId, to: EntityId },

    /// Litter siblings whose birthdays disagree beyond tolerance
    #[error("pandas in litter don't share a birthday: {a}, {b}")]
    DateConsistency { a: String, b: String },

    /// Unreadable or syntactically malformed record file
    #[error("{}: {reason}", .path.display())]
    Record { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, BuildError>;
