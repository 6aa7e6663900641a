use std::fmt;

use chrono::{DateTime, Utc};

/// Stable identifier of a job listing as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Percentage match between the listing and the user's profile, clamped to 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MatchScore(u8);

impl MatchScore {
    pub const MAX: u8 = 100;

    pub fn new(raw: i64) -> Self {
        Self(raw.clamp(0, i64::from(Self::MAX)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn tier(self) -> MatchTier {
        match self.0 {
            80.. => MatchTier::High,
            50..=79 => MatchTier::Medium,
            _ => MatchTier::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FullDescription {
    pub category: String,
    pub stipend: String,
    pub duration: String,
    pub work_mode: String,
    pub description: Vec<String>,
    pub requirements: Vec<String>,
}

/// Long-form fields shown in the details view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobDetails {
    pub benefits: Vec<String>,
    pub qualifications: Vec<String>,
    pub full_description: FullDescription,
    pub apply_url: Option<String>,
}

/// A single job card. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListing {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub salary_range: String,
    pub job_type: String,
    pub skills: Vec<String>,
    pub match_score: MatchScore,
    pub posted_date: Option<DateTime<Utc>>,
    pub posted_ago: Option<String>,
    pub description: String,
    pub details: JobDetails,
}

impl JobListing {
    /// Minimal listing with empty optional fields; handy for fixtures and demo data.
    pub fn new(id: impl Into<String>, title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: JobId::new(id),
            title: title.into(),
            company: company.into(),
            company_logo: None,
            location: String::new(),
            salary_range: String::new(),
            job_type: String::new(),
            skills: Vec::new(),
            match_score: MatchScore::default(),
            posted_date: None,
            posted_ago: None,
            description: String::new(),
            details: JobDetails::default(),
        }
    }
}

/// Up to two uppercase initials: "TechCorp Pvt Ltd" -> "TP", "DesignHub" -> "D".
pub fn company_initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return "?".to_string();
    };
    first
        .chars()
        .take(1)
        .chain(words.next().into_iter().flat_map(|w| w.chars().take(1)))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Short US-style date ("Oct 26, 2025"), or "N/A" when the backend sent none.
pub fn format_posted_date(posted: Option<DateTime<Utc>>) -> String {
    match posted {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn initials_use_first_two_words() {
        assert_eq!(company_initials("TechCorp Pvt Ltd"), "TP");
        assert_eq!(company_initials("designHub"), "D");
        assert_eq!(company_initials("  cloud   scale "), "CS");
        assert_eq!(company_initials("   "), "?");
    }

    #[test]
    fn match_score_clamps_and_tiers() {
        assert_eq!(MatchScore::new(140).value(), 100);
        assert_eq!(MatchScore::new(-3).value(), 0);
        assert_eq!(MatchScore::new(80).tier(), MatchTier::High);
        assert_eq!(MatchScore::new(79).tier(), MatchTier::Medium);
        assert_eq!(MatchScore::new(50).tier(), MatchTier::Medium);
        assert_eq!(MatchScore::new(49).tier(), MatchTier::Low);
    }

    #[test]
    fn posted_date_formats_short_month() {
        let date = Utc.with_ymd_and_hms(2025, 10, 26, 0, 0, 0).unwrap();
        assert_eq!(format_posted_date(Some(date)), "Oct 26, 2025");
        assert_eq!(format_posted_date(None), "N/A");
    }
}
