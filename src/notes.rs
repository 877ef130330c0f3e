//! Helm release notes
//!
//! The post-install NOTES text of a chart, held as an ordered sequence of lines.
//! Individual lines may be missing (`None`), mirroring status payloads where
//! the host could not render a line.

/// Ordered lines of post-install notes for a single release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusNotes {
    lines: Vec<Option<String>>,
}

impl StatusNotes {
    /// Create notes from possibly-missing lines
    pub fn new(lines: Vec<Option<String>>) -> Self {
        Self { lines }
    }

    /// Split a rendered NOTES.txt block into lines
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(|line| Some(line.to_string())).collect(),
        }
    }

    /// Number of lines, including missing ones
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate lines in order; missing lines are yielded as `None`
    pub fn lines(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.lines.iter().map(|line| line.as_deref())
    }

    /// Line at `index`, flattening out-of-range and missing lines to `None`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).and_then(|line| line.as_deref())
    }
}

impl From<Vec<String>> for StatusNotes {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines.into_iter().map(Some).collect())
    }
}

impl From<Vec<&str>> for StatusNotes {
    fn from(lines: Vec<&str>) -> Self {
        Self::new(lines.into_iter().map(|line| Some(line.to_string())).collect())
    }
}

impl From<Vec<Option<String>>> for StatusNotes {
    fn from(lines: Vec<Option<String>>) -> Self {
        Self::new(lines)
    }
}
