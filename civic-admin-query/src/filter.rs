//! Composable record filters.
//!
//! Each criterion is optional and narrows the result independently (AND
//! semantics). `"all"` and the empty string mean "no constraint", matching
//! the values listing pages put in their query strings.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::errors::QueryError;
use crate::resolver::normalize_category_id;
use civic_admin_shared::EntityRecord;

/// Sentinel meaning "any value".
pub const ALL: &str = "all";

/// Filter criteria for a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact status value.
    pub status: Option<String>,
    /// Bare category id; records are compared after normalization.
    pub category_id: Option<String>,
    /// Inclusive lower bound on creation date, from local midnight.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on creation date, through 23:59:59.999 local.
    pub date_to: Option<NaiveDate>,
}

fn constraint(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|value| !value.is_empty() && *value != ALL)
}

fn parse_date(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, QueryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| QueryError::invalid_criteria(format!("{} {:?}: {}", name, raw, e))),
    }
}

impl FilterCriteria {
    /// Build criteria from raw listing parameters (`YYYY-MM-DD` dates).
    ///
    /// # Returns
    ///
    /// * `Ok(FilterCriteria)` - The parsed criteria
    /// * `Err(QueryError::InvalidCriteria)` - If a date cannot be parsed
    pub fn from_params(
        status: Option<&str>,
        category_id: Option<&str>,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> Result<Self, QueryError> {
        Ok(Self {
            status: status.map(str::to_string),
            category_id: category_id.map(str::to_string),
            date_from: parse_date("dateFrom", date_from)?,
            date_to: parse_date("dateTo", date_to)?,
        })
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn with_date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    /// Whether no criterion constrains anything.
    pub fn is_empty(&self) -> bool {
        constraint(&self.status).is_none()
            && constraint(&self.category_id).is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }
}

fn local_to_utc<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime, earliest: bool) -> DateTime<Utc> {
    let resolved = tz.from_local_datetime(&naive);
    let local = if earliest {
        resolved.earliest()
    } else {
        resolved.latest()
    };
    // A bound that falls in a DST gap is read as UTC.
    local.map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc))
}

/// Filter records with dates interpreted in the local time zone.
pub fn filter_records(records: &[EntityRecord], criteria: &FilterCriteria) -> Vec<EntityRecord> {
    filter_records_in(records, criteria, &Local)
}

/// Filter records with dates interpreted in `tz`.
///
/// Input order is preserved. Records without `created_at` count as created
/// at the epoch, so any realistic `date_from` excludes them.
pub fn filter_records_in<Tz: TimeZone>(
    records: &[EntityRecord],
    criteria: &FilterCriteria,
    tz: &Tz,
) -> Vec<EntityRecord> {
    let status = constraint(&criteria.status);
    let category_id = constraint(&criteria.category_id);
    let from = criteria
        .date_from
        .map(|date| local_to_utc(tz, date.and_time(chrono::NaiveTime::MIN), true));
    let to = criteria.date_to.and_then(|date| {
        date.and_hms_milli_opt(23, 59, 59, 999)
            .map(|end| local_to_utc(tz, end, false))
    });

    records
        .iter()
        .filter(|record| status.map_or(true, |status| record.status.as_deref() == Some(status)))
        .filter(|record| {
            category_id.map_or(true, |id| normalize_category_id(record.category_id.as_ref()) == Some(id))
        })
        .filter(|record| from.map_or(true, |from| record.created_or_epoch() >= from))
        .filter(|record| to.map_or(true, |to| record.created_or_epoch() <= to))
        .cloned()
        .collect()
}
