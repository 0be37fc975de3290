use crate::config::DATE_FORMAT;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

/// Entity-kind id namespaces. Ids are unique within a namespace only,
/// so an id is always carried together with its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Panda,
    Zoo,
    Wild,
    Media,
}

impl Namespace {
    /// Section header expected in record files of this kind
    pub fn section(self) -> &'static str {
        match self {
            Namespace::Panda => "panda",
            Namespace::Zoo => "zoo",
            Namespace::Wild => "wild",
            Namespace::Media => "media",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// A namespaced entity identifier.
///
/// The interchange document distinguishes zoo ids from panda ids by
/// negating the zoo's declared value; internally the namespace tag does
/// that job and [`EntityId::export_value`] reproduces the wire convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    pub ns: Namespace,
    pub num: u32,
}

impl EntityId {
    pub fn new(ns: Namespace, num: u32) -> Self {
        Self { ns, num }
    }

    pub fn panda(num: u32) -> Self {
        Self::new(Namespace::Panda, num)
    }

    pub fn zoo(num: u32) -> Self {
        Self::new(Namespace::Zoo, num)
    }

    pub fn wild(num: u32) -> Self {
        Self::new(Namespace::Wild, num)
    }

    pub fn media(num: u32) -> Self {
        Self::new(Namespace::Media, num)
    }

    /// Signed id as written to the interchange document. Zoos negate their
    /// declared value; every other kind keeps it as-is.
    pub fn export_value(self) -> i64 {
        match self.ns {
            Namespace::Zoo => -i64::from(self.num),
            _ => i64::from(self.num),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.ns, self.num)
    }
}

/// Canonical gender values the presentation layer localizes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Normalize a source token to a canonical gender. Total over the
    /// recognized set (short codes, full words, katakana) and idempotent
    /// over its own output; anything else is None.
    pub fn normalize(token: &str) -> Option<Gender> {
        match token {
            "m" | "M" | "male" | "Male" | "オス" => Some(Gender::Male),
            "f" | "F" | "female" | "Female" | "メス" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A birth or death date. Unlike other fields, these always export even
/// when unset ("unknown"), because downstream consumers rely on their
/// presence to distinguish "not recorded" from "does not apply".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedDate {
    Unknown,
    On(NaiveDate),
}

impl RecordedDate {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            RecordedDate::On(d) => Some(d),
            RecordedDate::Unknown => None,
        }
    }
}

impl fmt::Display for RecordedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordedDate::Unknown => f.write_str("unknown"),
            RecordedDate::On(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

/// One panda entity: typed fields that carry format rules, plus a
/// passthrough map for everything else in the record (localized names,
/// photo urls, free-form notes).
#[derive(Debug, Clone)]
pub struct PandaVertex {
    pub id: EntityId,
    pub birthday: RecordedDate,
    pub death: RecordedDate,
    pub gender: Option<Gender>,
    pub fields: BTreeMap<String, String>,
}

/// One zoo or wild-range entity. The two site kinds share a shape and
/// differ only in namespace.
#[derive(Debug, Clone)]
pub struct SiteVertex {
    pub id: EntityId,
    pub fields: BTreeMap<String, String>,
}

/// One group media entity (photos featuring two or more pandas)
#[derive(Debug, Clone)]
pub struct MediaVertex {
    pub id: EntityId,
    pub fields: BTreeMap<String, String>,
}

/// One entity in the lineage graph
#[derive(Debug, Clone)]
pub enum Vertex {
    Panda(PandaVertex),
    Zoo(SiteVertex),
    Wild(SiteVertex),
    Media(MediaVertex),
}

impl Vertex {
    pub fn id(&self) -> EntityId {
        match self {
            Vertex::Panda(v) => v.id,
            Vertex::Zoo(v) => v.id,
            Vertex::Wild(v) => v.id,
            Vertex::Media(v) => v.id,
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.id().ns
    }

    /// English name for error messages, falling back to the id
    pub fn display_name(&self) -> String {
        let fields = match self {
            Vertex::Panda(v) => &v.fields,
            Vertex::Zoo(v) => &v.fields,
            Vertex::Wild(v) => &v.fields,
            Vertex::Media(v) => &v.fields,
        };
        fields
            .get("en.name")
            .cloned()
            .unwrap_or_else(|| self.id().to_string())
    }

    pub fn as_panda(&self) -> Option<&PandaVertex> {
        match self {
            Vertex::Panda(v) => Some(v),
            _ => None,
        }
    }
}

/// Edge labels for parentage and sibling relationships. Location edges
/// are labeled after the record field that produced them.
pub const FAMILY_LABEL: &str = "family";
pub const LITTER_LABEL: &str = "litter";

/// A directed, labeled relationship between two vertices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: EntityId,
    pub to: EntityId,
    pub label: String,
}

impl Edge {
    pub fn new(from: EntityId, to: EntityId, label: impl Into<String>) -> Self {
        Self {
            from,
            to,
            label: label.into(),
        }
    }
}
