use serde_json::{Map, Value};

use crate::models::{MetricFallback, RankingKind, RankingRecord, Subject, SUBJECT_VIEW_KEY};

pub const UNKNOWN_ID: &str = "unknown";

/// Builds a canonical record from one raw backend row. Missing fields are
/// defaulted; this never fails.
///
/// `position` is the row's index in the backend payload and only names rows
/// that arrive without an id.
pub fn format_record(kind: RankingKind, raw: &Value, position: usize, now: &str) -> RankingRecord {
    let empty = Map::new();
    let (obj, bare_id) = match raw {
        Value::Object(obj) => (obj, None),
        Value::String(id) => (&empty, Some(id.clone())),
        _ => (&empty, None),
    };
    let schema = kind.schema();

    let id = bare_id
        .or_else(|| id_of(obj))
        .unwrap_or_else(|| format!("{}-{}", kind, position + 1));

    let subject_raw = present(obj, schema.subject_key);
    let subject = format_subject(kind, subject_raw);

    let metric = present(obj, schema.metric_key)
        .or_else(|| match schema.metric_fallback {
            MetricFallback::SubjectField(key) => subject_raw
                .and_then(Value::as_object)
                .and_then(|subject| present(subject, key)),
            MetricFallback::RecordField(key) => present(obj, key),
        })
        .map(coerce_metric)
        .unwrap_or(0);

    RankingRecord {
        kind,
        id,
        subject,
        metric,
        rank: 0,
        created_at: timestamp(obj, "createdAt", now),
        updated_at: timestamp(obj, "updatedAt", now),
    }
}

fn format_subject(kind: RankingKind, raw: Option<&Value>) -> Subject {
    let schema = kind.schema();
    match raw {
        Some(Value::Object(obj)) => Subject {
            id: id_of(obj).unwrap_or_else(|| UNKNOWN_ID.to_string()),
            display_name: schema
                .display_keys
                .iter()
                .find_map(|key| string_field(obj, key))
                .unwrap_or_else(|| schema.placeholder_name.to_string()),
            image: string_field(obj, schema.image_key).unwrap_or_default(),
            views: present(obj, SUBJECT_VIEW_KEY).map(coerce_metric).unwrap_or(0),
        },
        // Unpopulated reference: the backend sent the bare id.
        Some(Value::String(id)) => Subject::placeholder(id.clone(), kind),
        Some(Value::Number(id)) => Subject::placeholder(id.to_string(), kind),
        _ => Subject::placeholder(UNKNOWN_ID, kind),
    }
}

/// Reads a count from arbitrary JSON. Absent, negative, non-finite and
/// non-numeric values are 0; fractions are truncated.
pub fn coerce_metric(value: &Value) -> u64 {
    let as_float = match value {
        Value::Number(n) => {
            if let Some(whole) = n.as_u64() {
                return whole;
            }
            n.as_f64()
        }
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    as_float
        .filter(|f| f.is_finite() && *f > 0.0)
        .map(|f| f as u64)
        .unwrap_or(0)
}

fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|value| !value.is_null())
}

fn id_of(obj: &Map<String, Value>) -> Option<String> {
    ["_id", "id"].iter().find_map(|key| match present(obj, key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    present(obj, key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn timestamp(obj: &Map<String, Value>, key: &str, now: &str) -> String {
    string_field(obj, key)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| now.to_string())
}
