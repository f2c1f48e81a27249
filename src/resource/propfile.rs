// Property File Parser
// Parses ordered `key = value` text files (dialogue scripts, config)

/// One `key = value` entry, borrowed from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropEntry<'a> {
    /// 1-based source line
    pub line: usize,
    pub key: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyError {
    /// A non-comment line has no `=`
    MissingValue { line: usize },
}

impl std::fmt::Display for PropertyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyError::MissingValue { line } => {
                write!(f, "line {}: expected 'key = value'", line)
            }
        }
    }
}

impl std::error::Error for PropertyError {}

/// Parse property text into entries, in file order.
///
/// Blank lines and lines starting with `#` are skipped. Key and value are
/// split at the first `=` and trimmed, so values may contain `=`. With
/// `inline_comments`, anything after a `#` inside a value is dropped too.
/// Duplicate keys are kept; callers decide what they mean.
pub fn parse_entries(data: &str, inline_comments: bool) -> Result<Vec<PropEntry<'_>>, PropertyError> {
    let data = data.strip_prefix('\u{feff}').unwrap_or(data);
    let mut entries = Vec::new();

    for (index, raw) in data.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, mut value)) = line.split_once('=') else {
            return Err(PropertyError::MissingValue { line: index + 1 });
        };
        if inline_comments {
            if let Some((before, _)) = value.split_once('#') {
                value = before;
            }
        }

        entries.push(PropEntry {
            line: index + 1,
            key: key.trim(),
            value: value.trim(),
        });
    }

    Ok(entries)
}
