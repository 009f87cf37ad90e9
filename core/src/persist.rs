use crate::article::Article;
use anyhow::{Context, Result};
use std::fs::{self, create_dir_all, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

fn tmp_path(path: &Path) -> PathBuf { sibling(path, ".tmp") }

/// Read the persisted article array. A missing file is an empty collection.
pub fn load_articles(path: &Path) -> Result<Vec<Article>> {
    let mut f = match File::open(path) {
        Ok(f) => f,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err).with_context(|| format!("opening {}", path.display())),
    };
    let mut buf = String::new();
    f.read_to_string(&mut buf).with_context(|| format!("reading {}", path.display()))?;
    let articles = serde_json::from_str(&buf).with_context(|| format!("parsing {}", path.display()))?;
    Ok(articles)
}

/// Write `articles` as a pretty JSON array, via a temp file renamed over `path`.
pub fn save_articles(path: &Path, articles: &[Article]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let tmp = tmp_path(path);
    let json = serde_json::to_string_pretty(articles)?;
    let mut f = File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
    f.write_all(json.as_bytes())?;
    f.sync_all()?;
    fs::rename(&tmp, path).with_context(|| format!("renaming {} to {}", tmp.display(), path.display()))?;
    Ok(())
}

/// Rename `path` to `<file>.corrupt`, replacing any earlier one, and return the new path.
pub fn set_aside(path: &Path) -> Result<PathBuf> {
    let aside = sibling(path, ".corrupt");
    fs::rename(path, &aside).with_context(|| format!("renaming {} to {}", path.display(), aside.display()))?;
    Ok(aside)
}
