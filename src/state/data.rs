//! Shared data structures for the gallery
//!
//! These structs represent the data model that flows between
//! the store, the gallery controller and the render target.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{PortfolioError, PortfolioResult};

/// A photographer as listed on the home page
#[derive(Debug, Clone, PartialEq)]
pub struct Photographer {
    /// Unique identifier from the document
    pub id: u32,
    pub name: String,
    pub city: String,
    pub country: String,
    pub tagline: String,
    /// Daily rate
    pub price: u32,
    /// Portrait file name, relative to the portrait asset directory
    pub portrait: String,
    /// Sum of likes across the loaded media.
    /// Zero until a photographer page is applied, then kept in step by the like toggler.
    pub total_likes: u32,
}

impl Photographer {
    /// "City, Country" as shown under the name
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// The asset a media item points at. Exactly one per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Image(String),
    Video(String),
}

/// A single piece of work in a photographer's gallery
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    pub id: u32,
    /// Owning photographer
    pub photographer_id: u32,
    pub title: String,
    pub date: NaiveDate,
    pub price: u32,
    pub likes: u32,
    pub kind: MediaKind,
    /// Session-local like state, never read from the document
    pub is_liked: bool,
}

impl Media {
    pub fn is_video(&self) -> bool {
        matches!(self.kind, MediaKind::Video(_))
    }

    /// File name of the image or video
    pub fn asset(&self) -> &str {
        match &self.kind {
            MediaKind::Image(file) | MediaKind::Video(file) => file,
        }
    }
}

/// Photographer record exactly as it appears in the document
#[derive(Debug, Clone, Deserialize)]
pub struct PhotographerRecord {
    pub id: u32,
    pub name: String,
    pub city: String,
    pub country: String,
    pub tagline: String,
    pub price: u32,
    pub portrait: String,
}

impl From<PhotographerRecord> for Photographer {
    fn from(record: PhotographerRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            city: record.city,
            country: record.country,
            tagline: record.tagline,
            price: record.price,
            portrait: record.portrait,
            total_likes: 0,
        }
    }
}

/// Media record exactly as it appears in the document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    pub id: u32,
    pub photographer_id: u32,
    pub title: String,
    pub date: NaiveDate,
    pub price: u32,
    pub likes: u32,
    pub image: Option<String>,
    pub video: Option<String>,
}

impl TryFrom<MediaRecord> for Media {
    type Error = PortfolioError;

    fn try_from(record: MediaRecord) -> PortfolioResult<Self> {
        // Image and video are mutually exclusive and one of them is required
        let kind = match (record.image, record.video) {
            (Some(image), None) => MediaKind::Image(image),
            (None, Some(video)) => MediaKind::Video(video),
            (Some(_), Some(_)) => {
                return Err(PortfolioError::DataShape(format!(
                    "media {} has both an image and a video",
                    record.id
                )))
            }
            (None, None) => {
                return Err(PortfolioError::DataShape(format!(
                    "media {} has neither an image nor a video",
                    record.id
                )))
            }
        };

        Ok(Self {
            id: record.id,
            photographer_id: record.photographer_id,
            title: record.title,
            date: record.date,
            price: record.price,
            likes: record.likes,
            kind,
            is_liked: false,
        })
    }
}

/// Top-level shape of the portfolio document.
/// Both collections are optional here so a missing one can be reported as a shape error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentRecord {
    pub photographers: Option<Vec<PhotographerRecord>>,
    pub media: Option<Vec<MediaRecord>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(image: Option<&str>, video: Option<&str>) -> MediaRecord {
        MediaRecord {
            id: 7,
            photographer_id: 1,
            title: "Arctic Fox".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 5, 12).unwrap(),
            price: 55,
            likes: 12,
            image: image.map(str::to_string),
            video: video.map(str::to_string),
        }
    }

    #[test]
    fn test_media_record_is_image_xor_video() {
        let image = Media::try_from(record(Some("fox.jpg"), None)).unwrap();
        assert!(!image.is_video());
        assert_eq!(image.asset(), "fox.jpg");
        assert!(!image.is_liked);

        let video = Media::try_from(record(None, Some("fox.mp4"))).unwrap();
        assert!(video.is_video());
    }

    #[test]
    fn test_media_record_rejects_both_or_neither() {
        assert!(matches!(
            Media::try_from(record(Some("a.jpg"), Some("a.mp4"))),
            Err(PortfolioError::DataShape(_))
        ));
        assert!(matches!(
            Media::try_from(record(None, None)),
            Err(PortfolioError::DataShape(_))
        ));
    }

    #[test]
    fn test_media_record_reads_camel_case() {
        let json = r#"{"id":3,"photographerId":82,"title":"Sunset","date":"2019-04-03","price":60,"likes":21,"image":"sunset.jpg"}"#;
        let record: MediaRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.photographer_id, 82);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2019, 4, 3).unwrap());
    }

    #[test]
    fn test_photographer_location() {
        let photographer: Photographer = PhotographerRecord {
            id: 243,
            name: "Mimi Keel".to_string(),
            city: "London".to_string(),
            country: "UK".to_string(),
            tagline: "Voir le beau dans le quotidien".to_string(),
            price: 400,
            portrait: "MimiKeel.jpg".to_string(),
        }
        .into();
        assert_eq!(photographer.location(), "London, UK");
        assert_eq!(photographer.total_likes, 0);
    }
}
