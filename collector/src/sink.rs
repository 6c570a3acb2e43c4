use std::path::{Path, PathBuf};

use futures::FutureExt;
use serde_json::Value;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::{Error, Result};

pub trait DocumentSink: Send + Sync {
    /// Stores `doc` as pretty printed JSON under `name`, returning where it ended up.
    fn write(&self, name: String, doc: &Value) -> futures::future::BoxFuture<'static, Result<PathBuf>>;
}

pub struct FileSink {
    folder: std::sync::Arc<PathBuf>,
}

impl FileSink {
    pub fn new<P>(folder: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            folder: std::sync::Arc::new(folder.into()),
        }
    }
}

impl DocumentSink for FileSink {
    fn write(&self, name: String, doc: &Value) -> futures::future::BoxFuture<'static, Result<PathBuf>> {
        let folder = self.folder.clone();
        let content = serde_json::to_vec_pretty(doc);

        async move {
            let content = content?;

            if !tokio::fs::try_exists(folder.as_path()).await.unwrap_or(false) {
                tokio::fs::create_dir_all(folder.as_path())
                    .await
                    .map_err(Error::io(folder.as_path()))?;
            }

            let path = folder.join(name);
            tokio::fs::write(&path, content)
                .await
                .map_err(Error::io(&path))?;

            tracing::info!("Wrote {}", path.display());
            Ok(path)
        }
        .boxed()
    }
}

/// Reduces a display name to `[A-Za-z0-9._-]`, accents are stripped and
/// everything else collapses into single underscores.
pub fn sanitize(display: &str) -> String {
    let mut out = String::with_capacity(display.len());

    for c in display.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }

    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "team".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// `<teamId>_<name>.json` for a raw team document.
///
/// The id comes from the document if it carries a numeric one, otherwise the
/// requested id is used. The name falls back from team name to tag to `team`.
pub fn team_file_name(doc: &Value, requested_id: i64) -> String {
    let team = doc.pointer("/data/team");

    let id = team
        .and_then(|t| t.get("id"))
        .filter(|id| id.is_number())
        .and_then(analysis::coerce::to_long)
        .unwrap_or(requested_id);

    let field = |key: &str| {
        team.and_then(|t| t.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    };
    let display = field("name").or_else(|| field("tag")).unwrap_or("team");

    format!("{}_{}.json", id, sanitize(display))
}

/// `36_Navi.json` becomes `36_Navi-analyzed.json`.
pub fn analyzed_file_name(raw: &Path) -> String {
    let name = raw
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(".json").unwrap_or(&name);

    format!("{}-analyzed.json", stem)
}
