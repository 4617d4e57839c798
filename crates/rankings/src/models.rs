use std::{fmt, str::FromStr};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Which population a ranking orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingKind {
    Novel,
    Author,
    Reader,
}

/// Where the fallback metric lives when the primary metric field is absent.
#[derive(Debug, Clone, Copy)]
pub enum MetricFallback {
    /// A numeric field on the nested subject object.
    SubjectField(&'static str),
    /// A sibling field on the record itself.
    RecordField(&'static str),
}

/// Backend field names for one ranking kind.
///
/// The first entry of `display_keys` is the one written on output; the rest
/// are accepted aliases seen in older backend payloads.
#[derive(Debug)]
pub struct FieldSchema {
    pub subject_key: &'static str,
    pub display_keys: &'static [&'static str],
    pub image_key: &'static str,
    pub metric_key: &'static str,
    pub metric_fallback: MetricFallback,
    pub placeholder_name: &'static str,
}

impl FieldSchema {
    pub fn display_key(&self) -> &'static str {
        self.display_keys[0]
    }
}

pub const SUBJECT_VIEW_KEY: &str = "view";

static NOVEL_SCHEMA: FieldSchema = FieldSchema {
    subject_key: "idNovel",
    display_keys: &["title", "name"],
    image_key: "image",
    metric_key: "viewTotal",
    metric_fallback: MetricFallback::SubjectField(SUBJECT_VIEW_KEY),
    placeholder_name: "Unknown Novel",
};

static AUTHOR_SCHEMA: FieldSchema = FieldSchema {
    subject_key: "idUser",
    display_keys: &["username", "fullname", "name"],
    image_key: "avatar",
    metric_key: "viewTotal",
    metric_fallback: MetricFallback::SubjectField(SUBJECT_VIEW_KEY),
    placeholder_name: "Unknown Author",
};

static READER_SCHEMA: FieldSchema = FieldSchema {
    subject_key: "idUser",
    display_keys: &["username", "fullname", "name"],
    image_key: "avatar",
    metric_key: "totalExp",
    metric_fallback: MetricFallback::RecordField("exp"),
    placeholder_name: "Unknown Reader",
};

impl RankingKind {
    pub const ALL: [RankingKind; 3] = [RankingKind::Novel, RankingKind::Author, RankingKind::Reader];

    pub fn as_str(&self) -> &'static str {
        match self {
            RankingKind::Novel => "novel",
            RankingKind::Author => "author",
            RankingKind::Reader => "reader",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RankingKind::Novel => "Novel",
            RankingKind::Author => "Author",
            RankingKind::Reader => "Reader",
        }
    }

    /// Path of this ranking on the backend, relative to its base URL.
    pub fn upstream_path(&self) -> String {
        format!("rankings/{}", self.as_str())
    }

    pub fn schema(&self) -> &'static FieldSchema {
        match self {
            RankingKind::Novel => &NOVEL_SCHEMA,
            RankingKind::Author => &AUTHOR_SCHEMA,
            RankingKind::Reader => &READER_SCHEMA,
        }
    }
}

impl fmt::Display for RankingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown ranking kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for RankingKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "novel" | "novels" => Ok(RankingKind::Novel),
            "author" | "authors" => Ok(RankingKind::Author),
            "reader" | "readers" => Ok(RankingKind::Reader),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// The entity a ranking row is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: String,
    pub display_name: String,
    pub image: String,
    pub views: u64,
}

impl Subject {
    pub fn placeholder(id: impl Into<String>, kind: RankingKind) -> Self {
        Self {
            id: id.into(),
            display_name: kind.schema().placeholder_name.to_string(),
            image: String::new(),
            views: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRecord {
    pub kind: RankingKind,
    pub id: String,
    pub subject: Subject,
    pub metric: u64,
    pub rank: usize,
    pub created_at: String,
    pub updated_at: String,
}

/// Serializes with the backend's own field names so a ranked record reads
/// back through the formatter unchanged.
impl Serialize for RankingRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let schema = self.kind.schema();
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("_id", &self.id)?;
        map.serialize_entry(schema.subject_key, &SubjectFields { subject: &self.subject, schema })?;
        map.serialize_entry(schema.metric_key, &self.metric)?;
        map.serialize_entry("rank", &self.rank)?;
        map.serialize_entry("createdAt", &self.created_at)?;
        map.serialize_entry("updatedAt", &self.updated_at)?;
        map.end()
    }
}

struct SubjectFields<'a> {
    subject: &'a Subject,
    schema: &'static FieldSchema,
}

impl Serialize for SubjectFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("_id", &self.subject.id)?;
        map.serialize_entry(self.schema.display_key(), &self.subject.display_name)?;
        map.serialize_entry(self.schema.image_key, &self.subject.image)?;
        map.serialize_entry(SUBJECT_VIEW_KEY, &self.subject.views)?;
        map.end()
    }
}
