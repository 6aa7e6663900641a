//! Wire shapes of the backend's `/api/jobs` records.
//!
//! Every field is kept as a raw `Value`: the backend stores several fields as
//! JSON-encoded strings, and rows written by older syncs may lack fields or
//! carry them with another type. Typed decoding, one field at a time, happens
//! in `decode`.

use serde::Deserialize;
use serde_json::Value;
use swipe_core::FullDescription;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiJob {
    pub id: Value,
    pub title: Value,
    pub company: Value,
    pub company_logo: Value,
    pub location: Value,
    pub job_type: Value,
    pub salary_range: Value,
    pub salary: Value,
    /// Flat salary columns as serialized by the jobs backend.
    pub salary_amount: Value,
    pub salary_currency: Value,
    pub salary_unit: Value,
    pub skills: Value,
    pub match_score: Value,
    pub posted_date: Value,
    pub posted_ago: Value,
    pub description: Value,
    pub benefits: Value,
    pub qualifications: Value,
    pub full_description: Value,
    pub apply_url: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiSalary {
    pub amount: Option<i64>,
    pub currency: String,
    pub unit: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiFullDescription {
    pub category: String,
    pub stipend: String,
    pub duration: String,
    pub work_mode: String,
    pub description: Vec<String>,
    pub requirements: Vec<String>,
}

impl From<ApiFullDescription> for FullDescription {
    fn from(raw: ApiFullDescription) -> Self {
        Self {
            category: raw.category,
            stipend: raw.stipend,
            duration: raw.duration,
            work_mode: raw.work_mode,
            description: raw.description,
            requirements: raw.requirements,
        }
    }
}
