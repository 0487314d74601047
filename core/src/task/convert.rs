use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::models::{RawTask, Task};
use crate::error::ConvertError;

/// Parses the timestamp forms the backend is known to emit.
///
/// Offset-carrying RFC 3339 text is normalised to UTC. Naive date-times and
/// bare dates carry no zone and are read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn convert_timestamp(
    field: &'static str,
    title: &str,
    value: Option<String>,
) -> Result<Option<DateTime<Utc>>, ConvertError> {
    // empty text counts as "not set", same as null
    let Some(text) = value.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };
    parse_timestamp(&text)
        .map(Some)
        .ok_or_else(|| ConvertError::InvalidTimestamp {
            field,
            title: title.to_string(),
            value: text,
        })
}

/// Converts one raw record and its whole subtree.
pub fn convert_task(raw: RawTask) -> Result<Task, ConvertError> {
    let due = convert_timestamp("due", &raw.title, raw.due)?;
    let done_at = convert_timestamp("done_at", &raw.title, raw.done_at)?;
    let sub = convert_tasks(raw.sub)?;
    Ok(Task {
        title: raw.title,
        priority: raw.priority,
        due,
        sub,
        done: raw.done,
        done_at,
    })
}

pub fn convert_tasks(raw: Vec<RawTask>) -> Result<Vec<Task>, ConvertError> {
    raw.into_iter().map(convert_task).collect()
}

impl TryFrom<RawTask> for Task {
    type Error = ConvertError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        convert_task(raw)
    }
}
