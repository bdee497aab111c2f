use crate::cache::{CacheError, CacheResult, CachedArticle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// First line of every cache file; bump the version when the line layout changes
pub const CACHE_HEADER: &str = "# automobile article cache v1";

/// One cache entry as it appears on disk
#[derive(Serialize)]
struct EntryRef<'a> {
    url: &'a str,
    title: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Entry {
    url: String,
    title: String,
    html: String,
}

/// Serializes the cache mapping into its on-disk text form
///
/// The header comes first, followed by one JSON object per line in ascending
/// URL order. Every entry stays on a single line because JSON escapes newlines.
pub fn encode_cache(entries: &BTreeMap<String, CachedArticle>) -> CacheResult<String> {
    let mut out = String::with_capacity(CACHE_HEADER.len() + 1);
    out.push_str(CACHE_HEADER);
    out.push('\n');

    for (url, article) in entries {
        let line = serde_json::to_string(&EntryRef {
            url,
            title: &article.title,
            html: &article.html,
        })?;
        out.push_str(&line);
        out.push('\n');
    }

    Ok(out)
}

/// Parses the on-disk text form back into the cache mapping
///
/// Fails on a missing header, any line that is not exactly one entry object,
/// and duplicate URLs. Blank lines are skipped.
pub fn decode_cache(text: &str) -> CacheResult<BTreeMap<String, CachedArticle>> {
    let mut lines = text.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim_end() == CACHE_HEADER => {}
        Some((_, header)) => {
            return Err(CacheError::Corrupt {
                line: 1,
                message: format!("expected header {:?}, found {:?}", CACHE_HEADER, header),
            })
        }
        None => {
            return Err(CacheError::Corrupt {
                line: 1,
                message: "file is empty".to_string(),
            })
        }
    }

    let mut entries = BTreeMap::new();
    for (index, line) in lines {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let entry: Entry = serde_json::from_str(line).map_err(|e| CacheError::Corrupt {
            line: line_no,
            message: e.to_string(),
        })?;

        if entries.contains_key(&entry.url) {
            return Err(CacheError::Corrupt {
                line: line_no,
                message: format!("duplicate entry for {}", entry.url),
            });
        }
        entries.insert(entry.url, CachedArticle::new(entry.title, entry.html));
    }

    Ok(entries)
}
