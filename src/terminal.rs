use anyhow::{bail, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::CatalogError;
use crate::models::{Catalog, Year};
use crate::services::CatalogService;
use crate::state::{CatalogView, GalleryState, GalleryView, LoadTicket};

const HELP: &str = "\
Type to search talks by title or speaker.
  :year <label>   switch year (2023, 2022, 2019, 2018, 2017, 2016)
  :watch <n>      print the playback URL of the n-th visible talk
  :clear          clear the search
  :help           show this help
  :quit           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Year(Year),
    Watch(usize),
    Clear,
    Help,
    Quit,
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let Some(rest) = line.strip_prefix(':') else {
            return Command::Query(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match (name, arg) {
            ("year", Some(label)) => match label.parse::<Year>() {
                Ok(year) => Command::Year(year),
                Err(e) => Command::Invalid(e.to_string()),
            },
            ("watch", Some(index)) => match index.parse::<usize>() {
                Ok(n) if n > 0 => Command::Watch(n),
                _ => Command::Invalid(format!("Not a talk number: {}", index)),
            },
            ("clear", None) => Command::Clear,
            ("help", None) => Command::Help,
            ("quit" | "q", None) => Command::Quit,
            _ => Command::Invalid(format!("Unknown command: {}", line)),
        }
    }
}

/// Renders a gallery snapshot as plain text.
pub fn render_view(view: &GalleryView<'_>) -> String {
    let years: Vec<String> = view
        .years
        .iter()
        .map(|chip| {
            if chip.selected {
                format!("[{}]", chip.label)
            } else {
                chip.label.to_string()
            }
        })
        .collect();
    let mut lines = vec![format!(
        "LetSwift {}  {}",
        view.selected_year,
        years.join(" ")
    )];

    if !view.query.is_empty() {
        lines.push(format!("Search: {:?}", view.query));
    }

    match &view.catalog {
        CatalogView::NotLoaded => lines.push("Nothing loaded yet".to_string()),
        CatalogView::Loading { year } => lines.push(format!("Loading {}...", year)),
        CatalogView::Failed { year, message } => {
            lines.push(format!("Failed to load catalog for {}: {}", year, message));
        }
        CatalogView::Loaded { total, items, .. } if items.is_empty() => {
            lines.push(format!("No talks match {:?} ({} in total)", view.query, total));
        }
        CatalogView::Loaded { total, items, .. } => {
            lines.extend(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| format!("{:>3}. {} ({})", i + 1, item.title, item.speaker)),
            );
            lines.push(format!("{} of {} talks", items.len(), total));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Loads one year, applies the query and prints the visible talks.
pub async fn list(service: &CatalogService, year: Year, query: &str) -> Result<()> {
    let mut gallery = GalleryState::new(year);
    gallery.load_year(service, year).await;
    gallery.set_query(query);

    print!("{}", render_view(&gallery.view()));

    if gallery.catalog().is_none() {
        bail!("Failed to load catalog for {}", year);
    }
    Ok(())
}

type LoadResult = (LoadTicket, Result<Arc<Catalog>, CatalogError>);

fn spawn_load(service: &CatalogService, tx: &mpsc::UnboundedSender<LoadResult>, ticket: LoadTicket) {
    let service = service.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = service.load(ticket.year).await;
        let _ = tx.send((ticket, result));
    });
}

/// Interactive loop over stdin. Year loads run in the background; only the
/// most recent selection is ever shown.
pub async fn browse(service: CatalogService, default_year: Year) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<LoadResult>();
    let mut state = GalleryState::new(default_year);
    spawn_load(&service, &tx, state.select_year(default_year));

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(line.trim_end()) {
                    Command::Quit => break,
                    Command::Help => {
                        println!("{}", HELP);
                        continue;
                    }
                    Command::Invalid(message) => {
                        println!("{}", message);
                        continue;
                    }
                    Command::Watch(n) => {
                        let video_id = state
                            .visible()
                            .get(n - 1)
                            .map(|record| record.video_id.clone());
                        match video_id.and_then(|id| state.select(&id)) {
                            Some(playback) => println!("{}\n{}", playback.title, playback.watch_url),
                            None => println!("No talk number {}", n),
                        }
                        continue;
                    }
                    Command::Query(query) => state.set_query(query),
                    Command::Clear => state.set_query(""),
                    Command::Year(year) => spawn_load(&service, &tx, state.select_year(year)),
                }
                print!("{}", render_view(&state.view()));
            }
            Some((ticket, result)) = rx.recv() => {
                if state.apply(ticket, result) {
                    print!("{}", render_view(&state.view()));
                } else {
                    debug!("Ignored load for {}", ticket.year);
                }
            }
        }
    }

    Ok(())
}
