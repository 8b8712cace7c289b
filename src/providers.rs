/// External option list for `select_from` fields (style lists and the like).
/// Consumed read-only; the editor never caches across sessions.
pub trait OptionSource: Send + Sync {
    fn options(&self, key: &str) -> Vec<String>;
}

/// Default source with no option lists.
pub struct NoOptions;

impl OptionSource for NoOptions {
    fn options(&self, _key: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Encoded image bytes plus the chosen filename, produced by the host in
/// response to a file request from an image cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub data: String,
    pub filename: String,
}

impl FilePayload {
    pub fn new(data: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            filename: filename.into(),
        }
    }
}
