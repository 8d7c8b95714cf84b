use crate::error::CatalogError;
use crate::models::{Catalog, VideoRecord, Year};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

const PLAYLIST_EXPORT_KIND: &str = "youtube#playlistItemListResponse";

/// Source of the bundled playlist documents.
pub trait ResourceStore: Send + Sync {
    fn read(&self, name: &str) -> Result<Vec<u8>, CatalogError>;
}

/// Reads playlists from a directory on disk.
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceStore for DirectoryStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, CatalogError> {
        let path = self.root.join(name);
        debug!("Reading {}", path.display());
        std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CatalogError::ResourceNotFound {
                resource: name.to_string(),
            },
            _ => CatalogError::Read {
                resource: name.to_string(),
                source: e,
            },
        })
    }
}

/// Playlists held in memory, keyed by resource name.
#[derive(Default)]
pub struct MemoryStore {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.resources.insert(name.to_string(), contents.into());
        self
    }
}

impl ResourceStore for MemoryStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, CatalogError> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::ResourceNotFound {
                resource: name.to_string(),
            })
    }
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ResourceStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(DirectoryStore::new(root)))
    }

    /// Reads and decodes the playlist for `year` on the calling thread.
    pub fn load_blocking(&self, year: Year) -> Result<Catalog, CatalogError> {
        let resource = year.resource_name();
        let bytes = self.store.read(&resource)?;
        let catalog = decode(year, &bytes).map_err(|source| CatalogError::Decode {
            resource: resource.clone(),
            source,
        })?;

        if catalog.year != year.number() {
            warn!(
                "{} declares year {} but was requested as {}",
                resource, catalog.year, year
            );
        }

        info!("Loaded {} talks from {}", catalog.items.len(), resource);
        Ok(catalog)
    }

    /// Loads the playlist for `year` off the async executor.
    pub async fn load(&self, year: Year) -> Result<Arc<Catalog>, CatalogError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.load_blocking(year))
            .await
            .map_err(|e| CatalogError::Read {
                resource: year.resource_name(),
                source: std::io::Error::other(e),
            })?
            .map(Arc::new)
    }
}

/// Decodes either the canonical playlist shape or a video platform export.
fn decode(year: Year, bytes: &[u8]) -> Result<Catalog, serde_json::Error> {
    let document: Value = serde_json::from_slice(bytes)?;

    let is_export = document
        .get("kind")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind == PLAYLIST_EXPORT_KIND);

    if is_export {
        debug!("Translating playlist export for {}", year);
        let export: PlaylistExport = serde_json::from_value(document)?;
        export.into_catalog(year)
    } else {
        serde_json::from_value(document)
    }
}

#[derive(Debug, Deserialize)]
struct PlaylistExport {
    items: Vec<ExportItem>,
}

#[derive(Debug, Deserialize)]
struct ExportItem {
    snippet: ExportSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportSnippet {
    title: String,
    description: String,
    thumbnails: Thumbnails,
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
    standard: Option<Thumbnail>,
    maxres: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ResourceId {
    #[serde(rename = "videoId")]
    video_id: String,
}

impl Thumbnails {
    fn best(self) -> Option<String> {
        self.maxres
            .or(self.standard)
            .or(self.high)
            .or(self.medium)
            .or(self.default)
            .map(|thumbnail| thumbnail.url)
    }
}

impl PlaylistExport {
    fn into_catalog(self, year: Year) -> Result<Catalog, serde_json::Error> {
        let items = self
            .items
            .into_iter()
            .map(|item| -> Result<VideoRecord, serde_json::Error> {
                let snippet = item.snippet;
                let thumbnail = snippet.thumbnails.best().ok_or_else(|| {
                    <serde_json::Error as serde::de::Error>::custom(format!(
                        "no thumbnail for video {}",
                        snippet.resource_id.video_id
                    ))
                })?;
                Ok(VideoRecord {
                    id: Uuid::new_v4(),
                    title: snippet.title,
                    speaker: snippet.description,
                    time_line: String::new(),
                    reference_link: String::new(),
                    thumbnail,
                    video_id: snippet.resource_id.video_id,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Catalog {
            year: year.number(),
            items,
        })
    }
}
