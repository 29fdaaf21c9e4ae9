use regex::Regex;
use url::Url;

/// Filter applied to collected listing URLs before they enter the crawl result.
///
/// Include patterns, when present, must match at least once; exclude patterns
/// take precedence. URLs are normalized (fragment stripped) so that the same
/// listing reached from two pages deduplicates to one entry.
#[derive(Debug)]
pub struct ListingFilter {
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self::new(&[], &[]).expect("empty pattern lists are valid")
    }
}

impl ListingFilter {
    /// Compile a filter from include and exclude pattern lists
    pub fn new(
        include_patterns: &[String],
        exclude_patterns: &[String],
    ) -> Result<Self, regex::Error> {
        let mut include_regexes = Vec::with_capacity(include_patterns.len());
        for pattern in include_patterns {
            include_regexes.push(Regex::new(pattern)?);
        }

        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            include_regexes,
            exclude_regexes,
        })
    }

    /// Whether a collected listing URL should be kept
    pub fn keep(&self, url: &str) -> bool {
        for regex in &self.exclude_regexes {
            if regex.is_match(url) {
                return false;
            }
        }

        if !self.include_regexes.is_empty() {
            return self.include_regexes.iter().any(|r| r.is_match(url));
        }

        true
    }

    /// Normalized form of a listing URL, used as the dedup key.
    ///
    /// Strips the fragment; URLs that do not parse are kept verbatim rather
    /// than dropped, since phase 2 derives an id from the raw string anyway.
    pub fn normalize(&self, url: &str) -> String {
        match Url::parse(url) {
            Ok(mut parsed) => {
                parsed.set_fragment(None);
                parsed.to_string()
            }
            Err(_) => url.to_string(),
        }
    }
}
