use std::collections::BTreeMap;

pub const UNCLASSIFIED: &str = "Unclassified error";

const XMLLINT_CODES: &[(i32, &str)] = &[
    (0, "Successfully performed xmllint on file"),
    (1, UNCLASSIFIED),
    (2, "Error in DTD"),
    (3, "Validation error"),
    (4, "Validation error"),
    (5, "Error in schema compilation"),
    (6, "Error writing output"),
    (7, "Error in pattern"),
    (9, "Out of memory error"),
];

/// Maps a formatter exit status to a human readable description.
#[derive(Debug, Clone)]
pub struct ExitCodeTable {
    entries: BTreeMap<i32, String>,
    fallback: String,
}

impl ExitCodeTable {
    pub fn xmllint() -> Self {
        Self {
            entries: XMLLINT_CODES
                .iter()
                .map(|(code, text)| (*code, text.to_string()))
                .collect(),
            fallback: UNCLASSIFIED.to_string(),
        }
    }

    pub fn with_entry<S: Into<String>>(mut self, code: i32, description: S) -> Self {
        self.entries.insert(code, description.into());
        self
    }

    /// `None` means the process was terminated by a signal.
    pub fn describe(&self, code: Option<i32>) -> &str {
        code.and_then(|c| self.entries.get(&c))
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }
}

impl Default for ExitCodeTable {
    fn default() -> Self {
        Self::xmllint()
    }
}
