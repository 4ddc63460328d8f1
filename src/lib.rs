use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use serde_json::Value;

// Conventional locations used by the consolidate_info binary
pub const DEFAULT_SOURCE_DIR: &str = "public/data/anime-info";
pub const OUTPUT_FILE_NAME: &str = "consolidated.json";

/// Result of one directory scan: the merged mapping plus the raw count of
/// files read. `files_read` can exceed `entries.len()` only when two listed
/// names alias to the same id (case-insensitive filesystems); the later one
/// in listing order silently wins.
#[derive(Debug)]
pub struct Consolidated {
    pub entries: BTreeMap<String, Value>,
    pub files_read: usize,
}

// Id for a qualifying directory entry, None when the entry is skipped.
// Qualifying means: extension is exactly ".json" (case-sensitive) and the
// stem is not the reserved output stem.
fn qualifying_id<'a>(path: &'a Path, exclude_stem: &str) -> Option<&'a str> {
    if path.extension().and_then(OsStr::to_str) != Some("json") {
        return None;
    }
    let id = path.file_stem().and_then(OsStr::to_str)?;
    (id != exclude_stem).then_some(id)
}

/// Scan `source_dir` and parse every `<id>.json` file into one mapping
/// keyed by id. `exclude_stem` is the id that is never ingested (the output
/// file's own stem), so re-running cannot feed a previous output back in.
///
/// All-or-nothing: the first unreadable or unparsable qualifying file
/// aborts the whole scan.
pub fn scan_entries(source_dir: &Path, exclude_stem: &str) -> Result<Consolidated> {
    let listing = fs::read_dir(source_dir)
        .with_context(|| format!("listing {}", source_dir.display()))?;

    let mut entries = BTreeMap::new();
    let mut files_read = 0usize;

    for entry in listing {
        let entry = entry.with_context(|| format!("listing {}", source_dir.display()))?;
        let path = entry.path();

        let Some(id) = qualifying_id(&path, exclude_stem) else {
            continue;
        };
        let id = id.to_owned();

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let contents: Value = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;

        info!(" -> added id={id} from {}", path.display());
        entries.insert(id, contents);
        files_read += 1;
    }

    Ok(Consolidated {
        entries,
        files_read,
    })
}

/// Write the mapping as a single JSON object with keys in sorted order and
/// 4-space indentation.
pub fn write_consolidated(entries: &BTreeMap<String, Value>, output_path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries
        .serialize(&mut ser)
        .context("encoding consolidated mapping")?;

    fs::write(output_path, buf).with_context(|| format!("writing {}", output_path.display()))?;
    Ok(())
}
