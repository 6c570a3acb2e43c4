//! The collection passes: dump raw team documents, analyze them for one
//! tournament, fetch the careers of every player encountered and join those
//! careers back into the analyzed documents.
//!
//! Failures for a single team or file are logged and skipped, the pass
//! carries on with the rest.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use serde_json::Value;

use crate::sink::{self, DocumentSink, FileSink};
use crate::stratz::Upstream;
use crate::{career, Error, Result};

pub const CAREER_FILE: &str = "players_pro_career.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub tournament_id: i64,
    pub team_ids: Vec<i64>,
    pub take: u32,
    pub skip: u32,
    pub take_heroes: u32,
    pub workers: usize,
    pub out_dir: PathBuf,
}

impl Settings {
    pub fn raw_dir(&self) -> PathBuf {
        self.out_dir.join("raw")
    }

    pub fn analyzed_dir(&self) -> PathBuf {
        self.out_dir.join("analyzed")
    }

    pub fn career_dir(&self) -> PathBuf {
        self.out_dir.join("pro_career")
    }

    fn workers(&self) -> usize {
        self.workers.max(1)
    }
}

/// Fetches one team and stores the response untouched.
#[tracing::instrument(skip(upstream, raw))]
pub async fn dump_team(
    upstream: &dyn Upstream,
    raw: &dyn DocumentSink,
    team_id: i64,
    take: u32,
    skip: u32,
) -> Result<(PathBuf, Value)> {
    let doc = upstream.team_with_matches(team_id, take, skip).await?;

    if let Some(errors) = doc.get("errors").filter(|e| !e.is_null()) {
        tracing::warn!("GraphQL errors: {}", errors);
    }

    let path = raw.write(sink::team_file_name(&doc, team_id), &doc).await?;
    Ok((path, doc))
}

/// Runs the analyzer off the async workers.
pub async fn analyze_blocking(doc: Value, tournament_id: i64) -> Result<Value> {
    let analyzed =
        tokio::task::spawn_blocking(move || analysis::team::analyze(doc, tournament_id)).await?;
    Ok(analyzed)
}

/// Dumps every configured team into the raw folder, returning the written files.
pub async fn fetch_teams(upstream: &dyn Upstream, settings: &Settings) -> Vec<PathBuf> {
    let raw = FileSink::new(settings.raw_dir());

    futures::stream::iter(settings.team_ids.iter().copied())
        .map(|team_id| {
            let raw = &raw;
            async move {
                match dump_team(upstream, raw, team_id, settings.take, settings.skip).await {
                    Ok((path, _)) => Some(path),
                    Err(e) => {
                        tracing::error!(team_id, "Failed to dump raw team: {}", e);
                        None
                    }
                }
            }
        })
        .buffer_unordered(settings.workers())
        .filter_map(|path| async move { path })
        .collect()
        .await
}

/// Loads every `*.json` in `dir`, sorted by file name.
///
/// Files that can't be read or parsed are logged and skipped.
#[tracing::instrument]
pub async fn read_documents(dir: &Path) -> Result<Vec<(PathBuf, Value)>> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(Error::io(dir))?;

    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(Error::io(dir))? {
        let path = entry.path();
        if path.extension().map(|ext| ext == "json").unwrap_or(false) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut docs = Vec::with_capacity(paths.len());
    for path in paths {
        let content = match tokio::fs::read(&path).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                continue;
            }
        };

        match serde_json::from_slice::<Value>(&content) {
            Ok(doc) => docs.push((path, doc)),
            Err(e) => tracing::error!("Failed to parse {}: {}", path.display(), e),
        }
    }

    Ok(docs)
}

/// Analyzes every raw document and writes `<name>-analyzed.json` next to the others in `analyzed`.
pub async fn analyze_documents(
    docs: Vec<(PathBuf, Value)>,
    analyzed: &dyn DocumentSink,
    tournament_id: i64,
) -> Vec<PathBuf> {
    let mut written = Vec::with_capacity(docs.len());

    for (path, doc) in docs {
        let result = async {
            let doc = analyze_blocking(doc, tournament_id).await?;
            analyzed.write(sink::analyzed_file_name(&path), &doc).await
        }
        .await;

        match result {
            Ok(out) => written.push(out),
            Err(e) => tracing::error!("Failed to analyze {}: {}", path.display(), e),
        }
    }

    written
}

/// Analysis pass over the raw folder.
pub async fn analyze_dir(settings: &Settings) -> Result<Vec<PathBuf>> {
    let docs = read_documents(&settings.raw_dir()).await?;
    tracing::info!("Analyzing {} raw team files", docs.len());

    let analyzed = FileSink::new(settings.analyzed_dir());
    Ok(analyze_documents(docs, &analyzed, settings.tournament_id).await)
}

/// Fetches the careers of every player in `raw_docs` into a single file.
pub async fn dump_careers<'d, I>(
    upstream: &dyn Upstream,
    raw_docs: I,
    settings: &Settings,
) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'d Value>,
{
    let steam_ids = career::collect_steam_ids(raw_docs);
    tracing::info!("Collected {} steam ids", steam_ids.len());

    let careers = career::fetch_careers(upstream, steam_ids, settings.take_heroes).await?;

    FileSink::new(settings.career_dir())
        .write(CAREER_FILE.to_owned(), &careers)
        .await
}

/// Career pass over the raw folder.
pub async fn careers_from_dir(upstream: &dyn Upstream, settings: &Settings) -> Result<PathBuf> {
    let docs = read_documents(&settings.raw_dir()).await?;
    dump_careers(upstream, docs.iter().map(|(_, doc)| doc), settings).await
}

/// Attaches the fetched careers to every analyzed team document, rewriting the files in place.
#[tracing::instrument(skip(settings))]
pub async fn join_careers(settings: &Settings) -> Result<Vec<PathBuf>> {
    let career_file = settings.career_dir().join(CAREER_FILE);
    let content = tokio::fs::read(&career_file)
        .await
        .map_err(Error::io(&career_file))?;
    let careers: Value = serde_json::from_slice(&content)?;
    let by_account = career::careers_by_account(&careers);
    tracing::info!("Loaded {} careers", by_account.len());

    let analyzed = FileSink::new(settings.analyzed_dir());
    let mut written = Vec::new();
    for (path, mut doc) in read_documents(&settings.analyzed_dir()).await? {
        let attached = career::attach_careers(&mut doc, &by_account);
        tracing::debug!("Attached {} careers to {}", attached, path.display());

        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().into_owned(),
            None => continue,
        };
        match analyzed.write(name, &doc).await {
            Ok(out) => written.push(out),
            Err(e) => tracing::error!("Failed to join careers into {}: {}", path.display(), e),
        }
    }

    Ok(written)
}

/// Fetch, analyze and store every team with a bounded number of workers,
/// then fetch the careers of all players seen.
pub async fn run(upstream: &dyn Upstream, settings: &Settings) -> Result<PathBuf> {
    let raw = FileSink::new(settings.raw_dir());
    let analyzed = FileSink::new(settings.analyzed_dir());

    let raw_docs: Vec<Value> = futures::stream::iter(settings.team_ids.iter().copied())
        .map(|team_id| {
            let raw = &raw;
            let analyzed = &analyzed;
            async move {
                let result = async {
                    let (path, doc) =
                        dump_team(upstream, raw, team_id, settings.take, settings.skip).await?;
                    let augmented = analyze_blocking(doc.clone(), settings.tournament_id).await?;
                    analyzed
                        .write(sink::analyzed_file_name(&path), &augmented)
                        .await?;
                    Ok::<_, Error>(doc)
                }
                .await;

                match result {
                    Ok(doc) => Some(doc),
                    Err(e) => {
                        tracing::error!(team_id, "Failed to process team: {}", e);
                        None
                    }
                }
            }
        })
        .buffer_unordered(settings.workers())
        .filter_map(|doc| async move { doc })
        .collect()
        .await;

    tracing::info!(
        "Processed {} of {} teams",
        raw_docs.len(),
        settings.team_ids.len()
    );

    dump_careers(upstream, raw_docs.iter(), settings).await
}
