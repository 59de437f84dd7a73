use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A LogEntry is one persisted travel-log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Unique identifier, assigned by the store on creation
    pub id: String,

    /// Title of the visited place
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Visitor comments
    #[serde(default)]
    pub comments: Option<String>,

    /// Image URL or path
    #[serde(default)]
    pub image: Option<String>,

    /// Rating in [0, 10]
    #[serde(default)]
    pub rating: i64,

    /// Latitude in [-90, 90]
    pub latitude: f64,

    /// Longitude in [-180, 180]
    pub longitude: f64,

    /// When the place was visited
    pub visit_date: DateTime<Utc>,

    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// A candidate record as submitted by a client. Every field is optional
/// at this stage; `validate` decides what is acceptable. Unknown extra
/// fields in the incoming JSON are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub comments: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub rating: Option<i64>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// RFC 3339 datetime or `YYYY-MM-DD`
    #[serde(default)]
    pub visit_date: Option<String>,
}

/// A draft that passed validation: defaults applied, date parsed.
/// Carries no id or timestamps — the store assigns those.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEntry {
    pub title: String,
    pub description: Option<String>,
    pub comments: Option<String>,
    pub image: Option<String>,
    pub rating: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub visit_date: DateTime<Utc>,
}

/// One violated field constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    fn new(field: &str, reason: &str) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl EntryDraft {
    /// Validate the draft against the LogEntry schema.
    ///
    /// Pure function: on success returns the normalized entry, on failure
    /// returns every violated field constraint, not just the first.
    pub fn validate(&self) -> Result<ValidEntry, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = match &self.title {
            Some(t) if !t.trim().is_empty() => Some(t.clone()),
            Some(_) => {
                errors.push(FieldError::new("title", "must not be empty"));
                None
            }
            None => {
                errors.push(FieldError::new("title", "is required"));
                None
            }
        };

        let rating = self.rating.unwrap_or(0);
        if !(0..=10).contains(&rating) {
            errors.push(FieldError::new("rating", "must be between 0 and 10"));
        }

        let latitude = match self.latitude {
            Some(lat) if (-90.0..=90.0).contains(&lat) => Some(lat),
            Some(_) => {
                errors.push(FieldError::new("latitude", "must be between -90 and 90"));
                None
            }
            None => {
                errors.push(FieldError::new("latitude", "is required"));
                None
            }
        };

        let longitude = match self.longitude {
            Some(lon) if (-180.0..=180.0).contains(&lon) => Some(lon),
            Some(_) => {
                errors.push(FieldError::new("longitude", "must be between -180 and 180"));
                None
            }
            None => {
                errors.push(FieldError::new("longitude", "is required"));
                None
            }
        };

        let visit_date = match &self.visit_date {
            Some(raw) => match parse_visit_date(raw) {
                Some(date) => Some(date),
                None => {
                    errors.push(FieldError::new("visitDate", "is not a valid date"));
                    None
                }
            },
            None => {
                errors.push(FieldError::new("visitDate", "is required"));
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidEntry {
            title: title.unwrap_or_default(),
            description: self.description.clone(),
            comments: self.comments.clone(),
            image: self.image.clone(),
            rating,
            latitude: latitude.unwrap_or_default(),
            longitude: longitude.unwrap_or_default(),
            visit_date: visit_date.unwrap_or_default(),
        })
    }
}

/// Accept an RFC 3339 datetime, or a bare `YYYY-MM-DD` taken as midnight UTC.
fn parse_visit_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
