//! Typed form inputs, one struct per POST endpoint. Every field arrives as
//! text; `validate` checks required-field presence (and parses ids and
//! timestamps for shows) before any write begins.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct VenueForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub facebook_link: String,
}

impl VenueForm {
    pub fn validate(&self) -> Result<()> {
        required("name", &self.name)?;
        required("city", &self.city)?;
        required("state", &self.state)?;
        required("address", &self.address)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub facebook_link: String,
}

impl ArtistForm {
    pub fn validate(&self) -> Result<()> {
        required("name", &self.name)?;
        required("city", &self.city)?;
        required("state", &self.state)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShowForm {
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub venue_id: String,
    #[serde(default)]
    pub start_time: String,
}

/// A show form that passed validation, ids and timestamp parsed.
#[derive(Debug, Clone)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: NaiveDateTime,
}

impl ShowForm {
    pub fn validate(&self) -> Result<NewShow> {
        required("artist_id", &self.artist_id)?;
        required("venue_id", &self.venue_id)?;
        required("start_time", &self.start_time)?;

        let artist_id = self
            .artist_id
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidField("artist_id"))?;
        let venue_id = self
            .venue_id
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidField("venue_id"))?;
        let start_time = parse_start_time(self.start_time.trim())?;

        Ok(NewShow {
            artist_id,
            venue_id,
            start_time,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

fn required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(())
}

// Browsers send `datetime-local` values without seconds, so accept both that
// and the storage format.
const ACCEPTED_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

fn parse_start_time(value: &str) -> Result<NaiveDateTime> {
    for format in ACCEPTED_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    Err(AppError::InvalidField("start_time"))
}
