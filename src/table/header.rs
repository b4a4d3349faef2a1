use std::collections::HashMap;

/// Canonical form of a header cell: lowercase ASCII alphanumerics only.
///
/// `"Total ESG Score"`, `"total_esg_score"` and `"totalEsgScore"` all become
/// `"totalesgscore"`.
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Maps normalized header names to column indices.
///
/// When two columns normalize to the same name the first one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl HeaderMap {
    /// Builds the mapping from the raw header cells, in column order.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names = Vec::new();
        let mut index = HashMap::new();
        for (i, h) in headers.into_iter().enumerate() {
            let raw = h.as_ref().trim().trim_start_matches('\u{feff}').to_string();
            let key = normalize_header(&raw);
            if !key.is_empty() {
                index.entry(key).or_insert(i);
            }
            names.push(raw);
        }
        Self { names, index }
    }

    /// Column index of the first alias present. Aliases are matched after normalization.
    pub fn find(&self, aliases: &[&str]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|a| self.index.get(&normalize_header(a)).copied())
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.index.contains_key(&normalize_header(alias))
    }

    /// The header cells as they appeared (trimmed), in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
