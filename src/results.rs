use serde::{Deserialize, Serialize};

/// One harvested listing, produced exactly once per collected listing URL.
///
/// Serialized untagged: a success is recognizable by its field set, a failure
/// carries only the derived id and a reason. Records are immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingRecord {
    Success {
        /// Identifier derived from the listing URL.
        listing_id: String,

        /// Price text, the segment after the currency symbol, verbatim.
        price: String,

        /// Area text from the overview block, verbatim.
        area: String,

        /// Amenities included in the rent.
        included: String,

        /// City part of the address (after the first comma).
        city: String,

        /// Street part of the address (before the first comma).
        street: String,

        /// Free-form per-listing details, in document order. No fixed schema.
        details: Vec<String>,

        /// Unix timestamp of the extraction.
        extracted_at: i64,
    },
    Failure {
        listing_id: String,
        error: String,
    },
}

impl ListingRecord {
    pub fn failure(listing_id: String, error: impl Into<String>) -> Self {
        Self::Failure {
            listing_id,
            error: error.into(),
        }
    }

    pub fn listing_id(&self) -> &str {
        match self {
            Self::Success { listing_id, .. } | Self::Failure { listing_id, .. } => listing_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Derives the listing identifier from a listing URL: the trailing path
/// segment's trailing hyphen-separated token.
pub fn derive_listing_id(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
    segment.rsplit('-').next().unwrap_or(segment).to_string()
}
