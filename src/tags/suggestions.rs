//! Autocomplete candidates derived from a caller-supplied list.

/// Number of suggestions shown when no limit is configured.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionEngine {
    source: Vec<String>,
    limit: usize,
    allow_duplicates: bool,
}

impl SuggestionEngine {
    pub fn new(source: Vec<String>, limit: usize, allow_duplicates: bool) -> Self {
        Self {
            source,
            limit,
            allow_duplicates,
        }
    }

    pub fn source(&self) -> &[String] {
        &self.source
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Candidates matching `buffer`, in source order.
    ///
    /// Matching is a case-insensitive substring test on the trimmed buffer. Candidates already in
    /// `tags` are skipped unless duplicates are allowed. A blank buffer yields nothing.
    pub fn recompute(&self, buffer: &str, tags: &[String]) -> Vec<String> {
        let needle = buffer.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.source
            .iter()
            .filter(|candidate| candidate.to_lowercase().contains(&needle))
            .filter(|candidate| self.allow_duplicates || !tags.contains(*candidate))
            .take(self.limit)
            .cloned()
            .collect()
    }
}
