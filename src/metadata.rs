use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::error::BuildError;

const DELIMITER: &str = "---";

// YAML timestamp: date, `T`/`t` or blanks, time, optional fraction, optional `Z` or offset
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[Tt]|[ \t]+)",
        r"(\d{1,2}):(\d{2}):(\d{2})(?:\.(\d*))?",
        r"(?:[ \t]*(?:Z|[-+]\d{1,2}(?::\d{2})?))?$",
    ))
    .expect("timestamp pattern")
});

/// Metadata block of a source document: string keys mapped to YAML scalars or sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FrontMatter {
    pub fields: Mapping,
}

/// A listing tag. Plain labels render as placeholder anchors, linked tags as real links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Tag {
    Plain(String),
    Linked { text: String, href: String },
}

/// The shapes a front matter date may arrive in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DateValue {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Text(String),
}

/// Split a document into its front matter and Markdown body.
///
/// The document must start with `---`; the text up to the next `---` is the
/// YAML block, everything after it (trimmed) is the body.
pub(crate) fn parse_front_matter(file: &str, text: &str) -> Result<(FrontMatter, String), BuildError> {
    let missing = || BuildError::MissingFrontMatter {
        file: file.to_string(),
    };
    let rest = text.strip_prefix(DELIMITER).ok_or_else(missing)?;
    let (header, body) = rest.split_once(DELIMITER).ok_or_else(missing)?;

    let header = header.trim();
    let fields = if header.is_empty() {
        Mapping::new()
    } else {
        let value: Value =
            serde_yaml::from_str(header).map_err(|source| BuildError::InvalidFrontMatter {
                file: file.to_string(),
                source,
            })?;
        match value {
            Value::Null => Mapping::new(),
            Value::Mapping(m) => m,
            _ => {
                return Err(BuildError::FrontMatterNotMapping {
                    file: file.to_string(),
                })
            }
        }
    };

    Ok((FrontMatter { fields }, body.trim().to_string()))
}

/// Scalars rendered as text. Null and collections have no text form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_text)
    }

    pub fn tags(&self) -> Vec<Tag> {
        match self.get("tags") {
            None | Some(Value::Null) => vec![],
            Some(Value::Sequence(items)) => items.iter().filter_map(Tag::from_yaml).collect(),
            Some(other) => Tag::from_yaml(other).into_iter().collect(),
        }
    }

    pub fn date(&self, key: &str) -> Result<Option<NaiveDateTime>, BuildError> {
        let value = match self.get(key) {
            Some(v) => DateValue::from_yaml(v)?,
            None => None,
        };
        coerce_date(value)
    }
}

impl Tag {
    fn from_yaml(value: &Value) -> Option<Self> {
        let tag = match value {
            Value::Mapping(m) => Some(Tag::Linked {
                text: m.get("text").and_then(scalar_text).unwrap_or_default(),
                href: m
                    .get("href")
                    .and_then(scalar_text)
                    .unwrap_or_else(|| "#".to_string()),
            }),
            other => scalar_text(other).map(Tag::Plain),
        };
        if tag.is_none() {
            warn!("ignoring tag that is neither a label nor a text/href mapping: {value:?}");
        }
        tag
    }
}

impl DateValue {
    fn from_yaml(value: &Value) -> Result<Option<Self>, BuildError> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => {
                let s = s.trim();
                if let Some(dt) = parse_timestamp(s) {
                    return Ok(Some(DateValue::DateTime(dt)));
                }
                if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    return Ok(Some(DateValue::Date(d)));
                }
                Ok(Some(DateValue::Text(s.to_string())))
            }
            other => Err(BuildError::MalformedDate {
                value: serde_yaml::to_string(other)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_else(|_| format!("{other:?}")),
            }),
        }
    }
}

/// Wall-clock date-time of a YAML timestamp. Any UTC offset is dropped, not applied.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let caps = TIMESTAMP.captures(s)?;
    let num = |i: usize| caps[i].parse::<u32>().ok();
    let date = NaiveDate::from_ymd_opt(caps[1].parse().ok()?, num(2)?, num(3)?)?;
    let nanos = match caps.get(7).map(|m| m.as_str()) {
        Some(frac) if !frac.is_empty() => {
            let digits = &frac[..frac.len().min(9)];
            format!("{digits:0<9}").parse().ok()?
        }
        _ => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(num(4)?, num(5)?, num(6)?, nanos)?;
    Some(date.and_time(time))
}

/// Normalize a date into a comparable date-time. Date-only values land on midnight.
pub(crate) fn coerce_date(value: Option<DateValue>) -> Result<Option<NaiveDateTime>, BuildError> {
    let dt = match value {
        None => return Ok(None),
        Some(DateValue::DateTime(dt)) => dt,
        Some(DateValue::Date(d)) => d.and_time(NaiveTime::MIN),
        Some(DateValue::Text(s)) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| BuildError::MalformedDate { value: s.clone() })?
            .and_time(NaiveTime::MIN),
    };
    Ok(Some(dt))
}

/// "13 Nov. 2025"
pub(crate) fn format_date(dt: &NaiveDateTime) -> String {
    dt.format("%d %b. %Y").to_string()
}
