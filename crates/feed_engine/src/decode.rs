use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use feed_logging::{feed_debug, feed_warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use swipe_core::{FullDescription, JobDetails, JobId, JobListing, MatchScore};

use crate::record::{ApiFullDescription, ApiJob, ApiSalary};
use crate::{DecodeReport, FetchedJobs, FieldFallback};

/// Outcome of a total field decode: either the parsed value or a typed default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    Parsed(T),
    Fallback { value: T, reason: FallbackReason },
}

impl<T> Decoded<T> {
    pub fn into_value(self) -> T {
        match self {
            Decoded::Parsed(value) | Decoded::Fallback { value, .. } => value,
        }
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Decoded::Parsed(_) => None,
            Decoded::Fallback { reason, .. } => Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Absent, null, empty, or the literal string "null".
    Missing,
    /// A string that is not valid JSON for the expected type.
    Malformed(String),
    /// A structured value of the wrong shape.
    WrongShape(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Missing => write!(f, "missing"),
            FallbackReason::Malformed(err) => write!(f, "malformed: {err}"),
            FallbackReason::WrongShape(err) => write!(f, "wrong shape: {err}"),
        }
    }
}

/// Decode a field that may arrive either as structured JSON or as a
/// JSON-encoded string. Never fails; falls back to `T::default()`.
pub fn decode_field<T>(path: &str, raw: &Value) -> Decoded<T>
where
    T: DeserializeOwned + Default,
{
    let parsed = match raw {
        Value::Null => return missing(path),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() || text == "null" {
                return missing(path);
            }
            serde_json::from_str::<T>(text)
                .map_err(|err| FallbackReason::Malformed(err.to_string()))
        }
        other => serde_json::from_value::<T>(other.clone())
            .map_err(|err| FallbackReason::WrongShape(err.to_string())),
    };

    match parsed {
        Ok(value) => Decoded::Parsed(value),
        Err(reason) => {
            feed_warn!("Field {} fell back to default ({})", path, reason);
            Decoded::Fallback {
                value: T::default(),
                reason,
            }
        }
    }
}

fn missing<T: Default>(path: &str) -> Decoded<T> {
    feed_debug!("Field {} missing; using default", path);
    Decoded::Fallback {
        value: T::default(),
        reason: FallbackReason::Missing,
    }
}

/// Decode a whole `/api/jobs` response. Records that are not objects are
/// skipped; a bad field falls back on its own. The batch never fails.
pub fn decode_records(records: Vec<Value>) -> FetchedJobs {
    let mut report = DecodeReport {
        records: records.len(),
        ..DecodeReport::default()
    };
    let mut listings = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        if !record.is_object() {
            feed_warn!("job[{}] is not an object; skipping", index);
            report.skipped += 1;
            continue;
        }
        match serde_json::from_value::<ApiJob>(record) {
            Ok(job) => listings.push(decode_listing(index, job, &mut report.fallbacks)),
            Err(err) => {
                feed_warn!("job[{}] could not be read ({}); skipping", index, err);
                report.skipped += 1;
            }
        }
    }

    FetchedJobs { listings, report }
}

/// Decodes the fields of one record, collecting fallbacks under
/// `job[index].field`.
struct RecordDecoder<'a> {
    index: usize,
    fallbacks: &'a mut Vec<FieldFallback>,
}

impl RecordDecoder<'_> {
    fn path(&self, field: &str) -> String {
        format!("job[{}].{field}", self.index)
    }

    fn note(&mut self, field: String, reason: FallbackReason) {
        self.fallbacks.push(FieldFallback { field, reason });
    }

    /// A field the listing always carries; a missing value is reported too.
    fn required<T>(&mut self, field: &str, raw: &Value) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(field);
        match decode_field(&path, raw) {
            Decoded::Parsed(value) => value,
            Decoded::Fallback { value, reason } => {
                self.note(path, reason);
                value
            }
        }
    }

    /// An optional field; absence is normal and goes unreported.
    fn optional<T>(&mut self, field: &str, raw: &Value) -> Option<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(field);
        match decode_field(&path, raw) {
            Decoded::Parsed(value) => Some(value),
            Decoded::Fallback {
                reason: FallbackReason::Missing,
                ..
            } => None,
            Decoded::Fallback { reason, .. } => {
                self.note(path, reason);
                None
            }
        }
    }

    /// Plain text. Numbers and booleans are taken as their literal text.
    fn text(&mut self, field: &str, raw: &Value) -> Option<String> {
        match raw {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Array(_) | Value::Object(_) => {
                let path = self.path(field);
                let found = if raw.is_array() { "an array" } else { "an object" };
                let reason = FallbackReason::WrongShape(format!("expected text, got {found}"));
                feed_warn!("Field {} fell back to default ({})", path, reason);
                self.note(path, reason);
                None
            }
        }
    }

    /// Salary from the nested `salary` object, else from the flat
    /// `salaryAmount`/`salaryCurrency`/`salaryUnit` columns.
    fn salary(&mut self, job: &ApiJob) -> Option<ApiSalary> {
        let nested = self
            .optional::<ApiSalary>("salary", &job.salary)
            .filter(|salary| salary.amount.is_some());
        if nested.is_some() {
            return nested;
        }
        let amount = self.optional::<f64>("salaryAmount", &job.salary_amount)?;
        Some(ApiSalary {
            amount: Some(amount.round() as i64),
            currency: self
                .text("salaryCurrency", &job.salary_currency)
                .unwrap_or_default(),
            unit: self.text("salaryUnit", &job.salary_unit).unwrap_or_default(),
        })
    }
}

fn decode_listing(index: usize, job: ApiJob, fallbacks: &mut Vec<FieldFallback>) -> JobListing {
    let mut fields = RecordDecoder { index, fallbacks };

    let skills: Vec<String> = fields.required("skills", &job.skills);
    let benefits: Vec<String> = fields.required("benefits", &job.benefits);
    let qualifications: Vec<String> = fields.required("qualifications", &job.qualifications);
    let full_description: FullDescription = fields
        .required::<ApiFullDescription>("fullDescription", &job.full_description)
        .into();

    let salary_range = match fields.text("salaryRange", &job.salary_range) {
        Some(range) if !range.trim().is_empty() => range,
        _ => format_salary(fields.salary(&job).as_ref()),
    };
    let match_score = fields
        .optional::<f64>("matchScore", &job.match_score)
        .unwrap_or(0.0);
    let posted_date = fields.text("postedDate", &job.posted_date);

    JobListing {
        id: decode_id(index, &job.id),
        title: fields.text("title", &job.title).unwrap_or_default(),
        company: fields.text("company", &job.company).unwrap_or_default(),
        company_logo: fields
            .text("companyLogo", &job.company_logo)
            .filter(|logo| !logo.trim().is_empty()),
        location: fields.text("location", &job.location).unwrap_or_default(),
        salary_range,
        job_type: fields.text("jobType", &job.job_type).unwrap_or_default(),
        skills,
        match_score: MatchScore::new(match_score.round() as i64),
        posted_date: parse_posted_date(index, posted_date.as_deref()),
        posted_ago: fields
            .text("postedAgo", &job.posted_ago)
            .filter(|ago| !ago.trim().is_empty()),
        description: fields.text("description", &job.description).unwrap_or_default(),
        details: JobDetails {
            benefits,
            qualifications,
            full_description,
            apply_url: fields
                .text("applyUrl", &job.apply_url)
                .filter(|u| url::Url::parse(u).is_ok()),
        },
    }
}

fn decode_id(index: usize, raw: &Value) -> JobId {
    match raw {
        Value::String(id) if !id.trim().is_empty() => JobId::new(id.trim()),
        Value::Number(id) => JobId::new(id.to_string()),
        _ => JobId::new(format!("job-{index}")),
    }
}

fn parse_posted_date(index: usize, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Some(midnight.and_utc());
    }
    feed_warn!("job[{}].postedDate is not a date: {:?}", index, raw);
    None
}

/// "INR 1,200,000/year", or "Not specified" when there is no amount. A blank
/// currency or unit is left out.
pub fn format_salary(salary: Option<&ApiSalary>) -> String {
    let Some(ApiSalary {
        amount: Some(amount),
        currency,
        unit,
    }) = salary
    else {
        return "Not specified".to_string();
    };
    if *amount == 0 {
        return "Not specified".to_string();
    }

    let mut text = group_thousands(*amount);
    if !currency.trim().is_empty() {
        text = format!("{} {text}", currency.trim());
    }
    if !unit.trim().is_empty() {
        text.push('/');
        text.push_str(unit.trim());
    }
    text
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{group_thousands, parse_posted_date};

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_200_000), "1,200,000");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }

    #[test]
    fn posted_date_accepts_rfc3339_and_plain_dates() {
        let full = parse_posted_date(0, Some("2025-10-26T00:00:00Z")).unwrap();
        let plain = parse_posted_date(0, Some("2025-10-26")).unwrap();
        assert_eq!(full, plain);
        assert!(parse_posted_date(0, Some("2 days ago")).is_none());
        assert!(parse_posted_date(0, None).is_none());
    }
}
