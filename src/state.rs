use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::CatalogError;
use crate::models::{Catalog, Playback, VideoRecord, Year};
use crate::services::{search, CatalogService};
use crate::utils::{embed_url, watch_url};

/// Issued for every year selection. Only the most recent ticket may apply a
/// load result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub year: Year,
    generation: u64,
}

#[derive(Debug)]
enum CatalogSlot {
    NotLoaded,
    Loading(Year),
    Loaded(Arc<Catalog>),
    Failed { year: Year, error: CatalogError },
}

#[derive(Debug)]
pub struct GalleryState {
    selected: Year,
    query: String,
    catalog: CatalogSlot,
    generation: u64,
}

#[derive(Debug, Serialize)]
pub struct YearChip {
    pub label: Year,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CatalogView<'a> {
    NotLoaded,
    Loading {
        year: Year,
    },
    Loaded {
        year: i32,
        total: usize,
        items: Vec<&'a VideoRecord>,
    },
    Failed {
        year: Year,
        message: String,
    },
}

/// Snapshot of everything the gallery page shows.
#[derive(Debug, Serialize)]
pub struct GalleryView<'a> {
    pub selected_year: Year,
    pub years: Vec<YearChip>,
    pub query: &'a str,
    pub catalog: CatalogView<'a>,
}

impl GalleryState {
    pub fn new(year: Year) -> Self {
        Self {
            selected: year,
            query: String::new(),
            catalog: CatalogSlot::NotLoaded,
            generation: 0,
        }
    }

    pub fn selected_year(&self) -> Year {
        self.selected
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Switches to `year` and returns the ticket its load result must carry.
    pub fn select_year(&mut self, year: Year) -> LoadTicket {
        self.generation += 1;
        self.selected = year;
        self.catalog = CatalogSlot::Loading(year);
        debug!("Selected {} (generation {})", year, self.generation);
        LoadTicket {
            year,
            generation: self.generation,
        }
    }

    /// Applies a finished load. Returns false and leaves the state untouched
    /// when a newer selection has been made since `ticket` was issued.
    pub fn apply(
        &mut self,
        ticket: LoadTicket,
        result: Result<Arc<Catalog>, CatalogError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Dropping stale load for {} (generation {}, current {})",
                ticket.year, ticket.generation, self.generation
            );
            return false;
        }

        self.catalog = match result {
            Ok(catalog) => CatalogSlot::Loaded(catalog),
            Err(e) => {
                error!("Failed to load catalog for {}: {}", ticket.year, e);
                CatalogSlot::Failed {
                    year: ticket.year,
                    error: e,
                }
            }
        };
        true
    }

    /// Selects `year` and loads it before returning.
    pub async fn load_year(&mut self, service: &CatalogService, year: Year) {
        let ticket = self.select_year(year);
        let result = service.load(year).await;
        self.apply(ticket, result);
    }

    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        match &self.catalog {
            CatalogSlot::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// The error of the last applied load, if it failed.
    pub fn failure(&self) -> Option<&CatalogError> {
        match &self.catalog {
            CatalogSlot::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Records currently visible under the query.
    pub fn visible(&self) -> Vec<&VideoRecord> {
        self.catalog()
            .map(|catalog| search::filter(&catalog.items, &self.query))
            .unwrap_or_default()
    }

    /// Looks up a talk in the loaded catalog and builds its playback handoff.
    pub fn select(&self, video_id: &str) -> Option<Playback> {
        let record = self
            .catalog()?
            .items
            .iter()
            .find(|record| record.video_id == video_id)?;

        Some(Playback {
            year: self.selected,
            title: record.title.clone(),
            watch_url: watch_url(&record.video_id),
            embed_url: embed_url(&record.video_id),
        })
    }

    pub fn view(&self) -> GalleryView<'_> {
        let years = Year::ALL
            .into_iter()
            .map(|label| YearChip {
                label,
                selected: label == self.selected,
            })
            .collect();

        let catalog = match &self.catalog {
            CatalogSlot::NotLoaded => CatalogView::NotLoaded,
            CatalogSlot::Loading(year) => CatalogView::Loading { year: *year },
            CatalogSlot::Loaded(catalog) => CatalogView::Loaded {
                year: catalog.year,
                total: catalog.items.len(),
                items: search::filter(&catalog.items, &self.query),
            },
            CatalogSlot::Failed { year, error } => CatalogView::Failed {
                year: *year,
                message: error.to_string(),
            },
        };

        GalleryView {
            selected_year: self.selected,
            years,
            query: &self.query,
            catalog,
        }
    }
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new(Year::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn catalog(year: i32, titles: &[&str]) -> Arc<Catalog> {
        Arc::new(Catalog {
            year,
            items: titles
                .iter()
                .enumerate()
                .map(|(i, title)| VideoRecord {
                    id: Uuid::new_v4(),
                    title: title.to_string(),
                    speaker: format!("Speaker {}", i),
                    time_line: String::new(),
                    reference_link: String::new(),
                    thumbnail: String::new(),
                    video_id: format!("{}-{}", year, i),
                })
                .collect(),
        })
    }

    fn loaded_titles(state: &GalleryState) -> Vec<String> {
        state.visible().iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn starts_unloaded_on_default_year() {
        let state = GalleryState::default();
        assert_eq!(state.selected_year(), Year::Y2023);
        assert!(matches!(state.view().catalog, CatalogView::NotLoaded));
        assert!(state.visible().is_empty());
    }

    #[test]
    fn applies_current_ticket() {
        let mut state = GalleryState::new(Year::Y2023);
        let ticket = state.select_year(Year::Y2022);
        assert!(matches!(
            state.view().catalog,
            CatalogView::Loading { year: Year::Y2022 }
        ));
        assert!(state.apply(ticket, Ok(catalog(2022, &["A", "B"]))));
        assert_eq!(loaded_titles(&state), vec!["A", "B"]);
    }

    #[test]
    fn stale_load_never_overwrites_later_selection() {
        let mut state = GalleryState::new(Year::Y2023);
        let slow = state.select_year(Year::Y2022);
        let fast = state.select_year(Year::Y2019);

        assert!(state.apply(fast, Ok(catalog(2019, &["New"]))));
        assert!(!state.apply(slow, Ok(catalog(2022, &["Old"]))));

        assert_eq!(state.selected_year(), Year::Y2019);
        assert_eq!(loaded_titles(&state), vec!["New"]);
    }

    #[test]
    fn stale_load_arriving_first_is_dropped() {
        let mut state = GalleryState::new(Year::Y2023);
        let slow = state.select_year(Year::Y2022);
        let fast = state.select_year(Year::Y2019);

        assert!(!state.apply(slow, Ok(catalog(2022, &["Old"]))));
        assert!(matches!(
            state.view().catalog,
            CatalogView::Loading { year: Year::Y2019 }
        ));
        assert!(state.apply(fast, Ok(catalog(2019, &["New"]))));
        assert_eq!(loaded_titles(&state), vec!["New"]);
    }

    #[test]
    fn failed_load_is_distinct_from_no_matches() {
        let mut state = GalleryState::new(Year::Y2023);
        let ticket = state.select_year(Year::Y2018);
        state.apply(
            ticket,
            Err(CatalogError::ResourceNotFound {
                resource: "playlist-2018.json".to_string(),
            }),
        );
        match state.view().catalog {
            CatalogView::Failed { year, message } => {
                assert_eq!(year, Year::Y2018);
                assert!(message.contains("playlist-2018.json"));
            }
            other => panic!("expected failure view, got {:?}", other),
        }
        assert!(matches!(
            state.failure(),
            Some(CatalogError::ResourceNotFound { .. })
        ));

        let ticket = state.select_year(Year::Y2017);
        state.apply(ticket, Ok(catalog(2017, &["Talk"])));
        assert!(state.failure().is_none());
        state.set_query("zzz");
        match state.view().catalog {
            CatalogView::Loaded { total, items, .. } => {
                assert_eq!(total, 1);
                assert!(items.is_empty());
            }
            other => panic!("expected loaded view, got {:?}", other),
        }
    }

    #[test]
    fn year_change_replaces_catalog_and_keeps_query() {
        let mut state = GalleryState::new(Year::Y2023);
        let ticket = state.select_year(Year::Y2023);
        state.apply(ticket, Ok(catalog(2023, &["Async One", "Other"])));
        state.set_query("Async");
        assert_eq!(loaded_titles(&state), vec!["Async One"]);

        let ticket = state.select_year(Year::Y2016);
        state.apply(ticket, Ok(catalog(2016, &["Async Two", "Async Three"])));
        assert_eq!(state.query(), "Async");
        assert_eq!(loaded_titles(&state), vec!["Async Two", "Async Three"]);
    }

    #[test]
    fn view_marks_selected_year_chip() {
        let mut state = GalleryState::new(Year::Y2023);
        state.select_year(Year::Y2019);
        let view = state.view();
        let selected: Vec<Year> = view
            .years
            .iter()
            .filter(|chip| chip.selected)
            .map(|chip| chip.label)
            .collect();
        assert_eq!(selected, vec![Year::Y2019]);
        assert_eq!(view.years.len(), Year::ALL.len());
    }

    #[test]
    fn select_builds_playback_handoff() {
        let mut state = GalleryState::new(Year::Y2023);
        let ticket = state.select_year(Year::Y2022);
        state.apply(ticket, Ok(catalog(2022, &["First", "Second"])));

        let playback = state.select("2022-1").unwrap();
        assert_eq!(playback.title, "Second");
        assert_eq!(playback.year, Year::Y2022);
        assert_eq!(playback.watch_url, "https://www.youtube.com/watch?v=2022-1");
        assert_eq!(playback.embed_url, "https://www.youtube.com/embed/2022-1");

        assert!(state.select("missing").is_none());
    }
}
