//! Dialogue lines and line sets

use std::ops::Index;
use std::sync::Arc;

/// A single spoken line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    speaker_name: String,
    text: String,
}

impl DialogueLine {
    /// Create a new dialogue line
    pub fn new(speaker_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker_name: speaker_name.into(),
            text: text.into(),
        }
    }

    /// Name shown in the speaker field
    pub fn speaker_name(&self) -> &str {
        &self.speaker_name
    }

    /// Full text of the line
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, immutable sequence of dialogue lines.
///
/// Cloning a `LineSet` shares the underlying lines; they are never copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSet {
    lines: Arc<[DialogueLine]>,
}

impl LineSet {
    /// Create a line set. An empty set is allowed here but rejected by
    /// `DialogueSession::start`.
    pub fn new(lines: Vec<DialogueLine>) -> Self {
        Self {
            lines: lines.into(),
        }
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if there are no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a line by index
    pub fn get(&self, index: usize) -> Option<&DialogueLine> {
        self.lines.get(index)
    }

    /// Iterate over the lines in order
    pub fn iter(&self) -> std::slice::Iter<'_, DialogueLine> {
        self.lines.iter()
    }

    /// Check whether two sets share the same storage
    pub fn ptr_eq(&self, other: &LineSet) -> bool {
        Arc::ptr_eq(&self.lines, &other.lines)
    }
}

impl Index<usize> for LineSet {
    type Output = DialogueLine;

    fn index(&self, index: usize) -> &DialogueLine {
        &self.lines[index]
    }
}

impl From<Vec<DialogueLine>> for LineSet {
    fn from(lines: Vec<DialogueLine>) -> Self {
        Self::new(lines)
    }
}

impl FromIterator<DialogueLine> for LineSet {
    fn from_iter<I: IntoIterator<Item = DialogueLine>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LineSet {
    type Item = &'a DialogueLine;
    type IntoIter = std::slice::Iter<'a, DialogueLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
