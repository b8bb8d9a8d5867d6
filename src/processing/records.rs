//! Experience and job posting records consumed by the relevance engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ExperienceRecord")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(serialize_with = "flexible_date::serialize")]
    pub start_date: Option<NaiveDate>,
    /// `None` marks the current role.
    #[serde(serialize_with = "flexible_date::serialize")]
    pub end_date: Option<NaiveDate>,
    pub industry: Option<String>,
    pub achievements: Vec<String>,
}

/// Wire shape of an experience. Document stores emit `_id`, often next to a
/// virtual `id`; both are read and `id` wins when non-empty.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExperienceRecord {
    #[serde(deserialize_with = "lenient_string")]
    id: String,
    #[serde(rename = "_id", deserialize_with = "lenient_string")]
    document_id: String,
    #[serde(deserialize_with = "lenient_string")]
    title: String,
    #[serde(deserialize_with = "lenient_string")]
    company: String,
    #[serde(deserialize_with = "lenient_string")]
    description: String,
    #[serde(deserialize_with = "flexible_date::deserialize")]
    start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "flexible_date::deserialize")]
    end_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_optional_string")]
    industry: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    achievements: Vec<String>,
}

impl From<ExperienceRecord> for Experience {
    fn from(record: ExperienceRecord) -> Self {
        let id = if record.id.trim().is_empty() {
            record.document_id
        } else {
            record.id
        };

        Self {
            id,
            title: record.title,
            company: record.company,
            description: record.description,
            start_date: record.start_date,
            end_date: record.end_date,
            industry: record.industry,
            achievements: record.achievements,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPosting {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_list")]
    pub requirements: Vec<String>,
    #[serde(deserialize_with = "lenient_optional_string")]
    pub industry: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub company: String,
}

impl Experience {
    pub fn new(id: impl Into<String>, title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_achievements<I, S>(mut self, achievements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.achievements = achievements.into_iter().map(Into::into).collect();
        self
    }

    /// Title, company, description and achievements joined by spaces.
    pub fn combined_text(&self) -> String {
        let mut parts: Vec<&str> = vec![&self.title, &self.company, &self.description];
        parts.extend(self.achievements.iter().map(String::as_str));
        parts.join(" ")
    }

    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}

impl JobPosting {
    pub fn new(title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_requirements<I, S>(mut self, requirements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requirements = requirements.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Title, description and requirements joined by spaces.
    pub fn combined_text(&self) -> String {
        let mut text = format!("{} {}", self.title, self.description);
        if !self.requirements.is_empty() {
            text.push(' ');
            text.push_str(&self.requirements.join(" "));
        }
        text
    }
}

/// Nulls become empty strings; numeric ids are stringified and extended-JSON
/// `{"$oid": ...}` ids are unwrapped.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Object(map)) => map
            .get("$oid")
            .and_then(|oid| oid.as_str())
            .map(str::to_string)
            .unwrap_or_default(),
        _ => String::new(),
    })
}

/// Anything but a non-blank string becomes `None`.
fn lenient_optional_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Accepts `null`, a single string, or a list with non-string entries; keeps only strings.
fn lenient_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(serde_json::Value::String(s)) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Dates arrive as `YYYY-MM-DD`, `YYYY-MM`, RFC 3339 timestamps, or null.
mod flexible_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::String(raw)) => parse(&raw),
            // TOML date literals arrive wrapped in a single-entry table
            Some(serde_json::Value::Object(map)) if map.len() == 1 => map
                .values()
                .next()
                .and_then(|v| v.as_str())
                .and_then(parse),
            _ => None,
        })
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
            .or_else(|| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").ok())
    }
}
