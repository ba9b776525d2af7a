//! Field transformers turning a [`BeadRecord`] into a [`Task`].
//!
//! Every function here is pure apart from the injected [`Clock`]: the id
//! mapping must be complete before [`to_task`] is called for any record.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::bead::BeadRecord;
use crate::clock::Clock;
use crate::error::{ImportError, Result};
use crate::id_map::IdMap;
use crate::model::{Priority, Status, Task};
use crate::task_id::TaskId;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const FRACTION_DIGITS: usize = 6;
const DATE_LEN: usize = "YYYY-MM-DD".len();
const WITH_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";
const WITHOUT_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Convert one record, resolving its own id and its blockers through `ids`.
pub fn to_task(record: &BeadRecord, ids: &IdMap, clock: &dyn Clock) -> Result<Task> {
    let id = ids
        .get(&record.id)
        .cloned()
        .ok_or_else(|| ImportError::Unmapped(record.id.clone()))?;

    Ok(Task {
        id,
        title: record.title.clone().unwrap_or_default(),
        created: resolve_timestamp(record, "created_at", record.created_at.as_deref(), clock)?,
        updated: resolve_timestamp(record, "updated_at", record.updated_at.as_deref(), clock)?,
        priority: Priority::from_source(record.priority_level()),
        tags: non_empty(&record.issue_type)
            .map(|kind| vec![kind.to_string()])
            .unwrap_or_default(),
        blocked_by: resolve_blocked_by(record, ids),
        status: Status::from_source(record.status.as_deref()),
        body: build_body(record),
    })
}

/// Description, then design and notes sections, separated by blank lines.
pub fn build_body(record: &BeadRecord) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(description) = non_empty(&record.description) {
        parts.push(description.to_string());
    }
    if let Some(design) = non_empty(&record.design) {
        parts.push(format!("## Design\n\n{design}"));
    }
    if let Some(notes) = non_empty(&record.notes) {
        parts.push(format!("## Notes\n\n{notes}"));
    }
    parts.join("\n\n")
}

/// Output ids of the record's `blocks` dependencies, in source order.
///
/// A target missing from `ids` is dropped; it is not an error.
pub fn resolve_blocked_by(record: &BeadRecord, ids: &IdMap) -> Vec<TaskId> {
    let mut blocked_by = Vec::new();
    for dep in record.dependencies().iter().filter(|dep| dep.is_blocker()) {
        match dep.depends_on_id.as_deref().and_then(|target| ids.get(target)) {
            Some(id) => blocked_by.push(id.clone()),
            None => tracing::debug!(
                record = %record.id,
                blocker = dep.depends_on_id.as_deref().unwrap_or(""),
                "dropping unresolved blocker"
            ),
        }
    }
    blocked_by
}

/// Parse an ISO-8601 timestamp into UTC.
///
/// A trailing `Z` means `+00:00`, a missing offset means UTC, date and time
/// may be separated by a space instead of `T`, and the fractional part may
/// have any number of digits.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    let with_offset = match trimmed.strip_suffix(['Z', 'z']) {
        Some(stripped) => Cow::Owned(format!("{stripped}+00:00")),
        None => Cow::Borrowed(trimmed),
    };
    let separated = with_time_separator(&with_offset);
    let value = normalize_fraction(&separated);

    DateTime::parse_from_str(&value, WITH_OFFSET)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(&value, WITHOUT_OFFSET)
                .ok()
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// `YYYY-MM-DD HH:MM:SS` becomes `YYYY-MM-DDTHH:MM:SS`.
fn with_time_separator(value: &str) -> Cow<'_, str> {
    if value.as_bytes().get(DATE_LEN) == Some(&b' ') {
        Cow::Owned(format!("{}T{}", &value[..DATE_LEN], &value[DATE_LEN + 1..]))
    } else {
        Cow::Borrowed(value)
    }
}

/// Truncate or zero-pad the fractional seconds to exactly six digits.
fn normalize_fraction(value: &str) -> Cow<'_, str> {
    let Some(time_start) = value.find('T') else {
        return Cow::Borrowed(value);
    };
    let Some(dot) = value[time_start..].find('.').map(|at| time_start + at) else {
        return Cow::Borrowed(value);
    };

    let digits_start = dot + 1;
    let digits_end = value[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value.len(), |at| digits_start + at);
    let digits = &value[digits_start..digits_end];
    if digits.is_empty() || digits.len() == FRACTION_DIGITS {
        return Cow::Borrowed(value);
    }

    let fraction: String = digits
        .chars()
        .chain(std::iter::repeat('0'))
        .take(FRACTION_DIGITS)
        .collect();
    Cow::Owned(format!(
        "{}.{}{}",
        &value[..dot],
        fraction,
        &value[digits_end..]
    ))
}

fn resolve_timestamp(
    record: &BeadRecord,
    field: &'static str,
    raw: Option<&str>,
    clock: &dyn Clock,
) -> Result<DateTime<Utc>> {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Ok(clock.now());
    };
    parse_timestamp(raw).ok_or_else(|| ImportError::InvalidTimestamp {
        id: record.id.clone(),
        field,
        value: raw.to_string(),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}
