// Dialogue Script Loader
// Builds line sets from `speaker = text` scripts

use std::fs;
use std::path::Path;

use super::propfile::{parse_entries, PropertyError};
use crate::dialogue::{DialogueError, DialogueLine, DialogueResult, LineSet};

/// Parse a dialogue script.
///
/// Each record is `speaker = text`; `#` starts a comment line only at the
/// beginning of a line, so dialogue text may contain `#`. An empty speaker
/// is narration. A script with no records yields an empty line set.
pub fn parse_line_set(data: &str) -> DialogueResult<LineSet> {
    let entries = parse_entries(data, false).map_err(|e| match e {
        PropertyError::MissingValue { line } => DialogueError::Content {
            line,
            reason: "expected 'speaker = text'".to_string(),
        },
    })?;

    Ok(entries
        .into_iter()
        .map(|entry| DialogueLine::new(entry.key, entry.value))
        .collect())
}

/// Read and parse a dialogue script file
pub fn load_line_set<P: AsRef<Path>>(path: P) -> DialogueResult<LineSet> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let lines = parse_line_set(&data)?;
    log::debug!("Loaded {} dialogue lines from {}", lines.len(), path.display());
    Ok(lines)
}
