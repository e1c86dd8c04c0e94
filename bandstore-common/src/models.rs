//! Band aggregate models
//!
//! A [`Band`] owns its [`Album`]s exclusively; albums have no lifecycle of
//! their own and are stored embedded in the band document. The JSON shape of
//! these types is both the HTTP representation and the stored album layout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids;

/// Canonical textual form of an album release date
pub const RELEASE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Mutable, user-supplied band fields (already trimmed and validated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandFields {
    pub name: String,
    pub genre: Vec<String>,
    pub website: String,
    pub record_company: String,
    pub group_members: Vec<String>,
    #[serde(rename = "yearBandWasFormed")]
    pub year_formed: i32,
}

/// Stored band document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: BandFields,
    pub albums: Vec<Album>,
    /// Mean album rating rounded to one decimal, 0 without rated albums
    pub overall_rating: f64,
}

/// Lightweight projection returned by the band listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
}

/// User-supplied album fields (already trimmed and validated)
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumFields {
    pub title: String,
    pub release_date: NaiveDate,
    pub tracks: Vec<String>,
    pub rating: Option<f64>,
}

/// Album embedded in a band document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    #[serde(with = "release_date")]
    pub release_date: NaiveDate,
    pub tracks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Album {
    /// Create a new album with a fresh identity
    pub fn new(fields: AlbumFields) -> Self {
        Self {
            id: ids::generate(),
            title: fields.title,
            release_date: fields.release_date,
            tracks: fields.tracks,
            rating: fields.rating,
        }
    }
}

/// `MM/DD/YYYY` (de)serialization for release dates
mod release_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::RELEASE_DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(RELEASE_DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, RELEASE_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_fields() -> BandFields {
        BandFields {
            name: "Pink Floyd".to_string(),
            genre: vec!["Progressive Rock".to_string()],
            website: "http://www.pinkfloyd.com".to_string(),
            record_company: "EMI".to_string(),
            group_members: vec!["Roger Waters".to_string(), "David Gilmour".to_string()],
            year_formed: 1965,
        }
    }

    #[test]
    fn test_band_serializes_with_wire_names() {
        let band = Band {
            id: Uuid::nil(),
            fields: sample_fields(),
            albums: vec![],
            overall_rating: 0.0,
        };

        let value = serde_json::to_value(&band).unwrap();
        assert_eq!(value["_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(value["recordCompany"], "EMI");
        assert_eq!(value["groupMembers"][1], "David Gilmour");
        assert_eq!(value["yearBandWasFormed"], 1965);
        assert_eq!(value["albums"], json!([]));
        assert_eq!(value["overallRating"], 0.0);
    }

    #[test]
    fn test_album_release_date_round_trip() {
        let album = Album::new(AlbumFields {
            title: "Wish You Were Here".to_string(),
            release_date: NaiveDate::from_ymd_opt(1975, 9, 12).unwrap(),
            tracks: vec!["a".into(), "b".into(), "c".into()],
            rating: Some(4.5),
        });

        let value = serde_json::to_value(&album).unwrap();
        assert_eq!(value["releaseDate"], "09/12/1975");
        assert_eq!(value["rating"], 4.5);

        let back: Album = serde_json::from_value(value).unwrap();
        assert_eq!(back, album);
    }

    #[test]
    fn test_unrated_album_omits_rating() {
        let album = Album::new(AlbumFields {
            title: "Demo".to_string(),
            release_date: NaiveDate::from_ymd_opt(2001, 1, 2).unwrap(),
            tracks: vec!["a".into(), "b".into(), "c".into()],
            rating: None,
        });

        let value = serde_json::to_value(&album).unwrap();
        assert!(value.get("rating").is_none());
    }
}
