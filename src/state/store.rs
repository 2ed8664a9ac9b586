use std::path::PathBuf;
#[cfg(test)]
use std::sync::Arc;

use super::data::{DocumentRecord, Media, Photographer};
use crate::error::{PortfolioError, PortfolioResult};

/// Where the portfolio document is read from
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    /// A JSON file on disk
    File(PathBuf),
    /// An in-memory document
    #[cfg(test)]
    Memory(Arc<str>),
}

impl DocumentSource {
    /// Short label for logs and the window status line
    pub fn describe(&self) -> String {
        match self {
            DocumentSource::File(path) => path.display().to_string(),
            #[cfg(test)]
            DocumentSource::Memory(_) => "<in-memory document>".to_string(),
        }
    }
}

/// A parsed portfolio document
#[derive(Debug, Clone)]
pub struct Catalog {
    pub photographers: Vec<Photographer>,
    pub media: Vec<Media>,
}

/// Everything the photographer page needs, fetched before anything is shown
#[derive(Debug, Clone)]
pub struct PageData {
    pub photographer: Photographer,
    pub media: Vec<Media>,
}

/// The Store reads the portfolio document.
///
/// Every query re-fetches the whole document. Nothing is cached between calls,
/// so switching the source or editing the file is picked up on the next render.
#[derive(Debug, Clone)]
pub struct Store {
    source: DocumentSource,
}

impl Store {
    pub fn new(source: DocumentSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    /// Fetch and parse the document.
    ///
    /// Fails with `Network` when the source cannot be read and with
    /// `DataShape` when either top-level collection is missing or a record is malformed.
    pub async fn load(&self) -> PortfolioResult<Catalog> {
        let text = self.fetch().await?;
        parse_document(&text)
    }

    /// All photographers, in document order
    pub async fn get_photographers(&self) -> PortfolioResult<Vec<Photographer>> {
        Ok(self.load().await?.photographers)
    }

    /// The photographer with the given identifier
    pub async fn get_photographer_by_id(&self, id: u32) -> PortfolioResult<Photographer> {
        self.load()
            .await?
            .photographers
            .into_iter()
            .find(|photographer| photographer.id == id)
            .ok_or_else(|| PortfolioError::NotFound(format!("photographer {}", id)))
    }

    /// All media owned by the given photographer.
    /// An empty result is reported as `NotFound`.
    pub async fn get_media_for_photographer(&self, id: u32) -> PortfolioResult<Vec<Media>> {
        let media: Vec<Media> = self
            .load()
            .await?
            .media
            .into_iter()
            .filter(|media| media.photographer_id == id)
            .collect();

        if media.is_empty() {
            return Err(PortfolioError::NotFound(format!(
                "no media for photographer {}",
                id
            )));
        }

        Ok(media)
    }

    /// Fetch the photographer and their media, in that order.
    /// Either both come back or the first failure does.
    pub async fn load_photographer_page(&self, id: u32) -> PortfolioResult<PageData> {
        let photographer = self.get_photographer_by_id(id).await?;
        let media = self.get_media_for_photographer(id).await?;
        Ok(PageData {
            photographer,
            media,
        })
    }

    async fn fetch(&self) -> PortfolioResult<String> {
        match &self.source {
            DocumentSource::File(path) => {
                tracing::debug!(path = %path.display(), "Fetching portfolio document");
                tokio::fs::read_to_string(path).await.map_err(|e| {
                    tracing::error!(path = %path.display(), error = %e, "Failed to fetch portfolio document");
                    PortfolioError::Network(format!("{}: {}", path.display(), e))
                })
            }
            #[cfg(test)]
            DocumentSource::Memory(text) => Ok(text.to_string()),
        }
    }
}

/// Turn document text into entities
fn parse_document(text: &str) -> PortfolioResult<Catalog> {
    let document: DocumentRecord = serde_json::from_str(text)
        .map_err(|e| PortfolioError::DataShape(format!("invalid document: {}", e)))?;

    let photographers = document
        .photographers
        .ok_or_else(|| PortfolioError::DataShape("missing `photographers` collection".to_string()))?
        .into_iter()
        .map(Photographer::from)
        .collect();

    let media = document
        .media
        .ok_or_else(|| PortfolioError::DataShape("missing `media` collection".to_string()))?
        .into_iter()
        .map(Media::try_from)
        .collect::<PortfolioResult<Vec<_>>>()?;

    Ok(Catalog {
        photographers,
        media,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Two photographers, the first with three media, the second with none
    pub const SAMPLE: &str = r#"{
        "photographers": [
            {"name": "Mimi Keel", "id": 243, "city": "London", "country": "UK",
             "tagline": "Voir le beau dans le quotidien", "price": 400, "portrait": "MimiKeel.jpg"},
            {"name": "Ellie-Rose Wilkens", "id": 930, "city": "Paris", "country": "France",
             "tagline": "Capturer des compositions complexes", "price": 250, "portrait": "EllieRoseWilkens.jpg"}
        ],
        "media": [
            {"id": 342550, "photographerId": 243, "title": "Travel Adventures in Mountains",
             "image": "Travel_Adventures_in_Mountains.jpg", "likes": 36, "date": "2019-07-02", "price": 55},
            {"id": 8520927, "photographerId": 243, "title": "Fashion Urban Jungle",
             "image": "Fashion_Urban_Jungle.jpg", "likes": 11, "date": "2011-11-06", "price": 55},
            {"id": 9025895, "photographerId": 243, "title": "Étude de lumière",
             "video": "Light_Study.mp4", "likes": 36, "date": "2021-03-12", "price": 70}
        ]
    }"#;

    pub fn sample_store() -> Store {
        Store::new(DocumentSource::Memory(Arc::from(SAMPLE)))
    }

    pub fn store_from(text: &str) -> Store {
        Store::new(DocumentSource::Memory(Arc::from(text)))
    }
}
