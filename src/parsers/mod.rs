pub mod listing;

#[cfg(test)]
mod tests;

use thiserror::Error;

/// A required structural anchor was absent from a listing document.
///
/// Carries the anchor name for logging; the recorded failure reason stays the
/// generic "Missing data" regardless of which anchor was missing.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing {0} anchor")]
pub struct MissingField(pub &'static str);

/// Field groups extracted from one listing document.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFields {
    pub price: String,
    pub area: String,
    pub included: String,
    pub street: String,
    pub city: String,
    pub details: Vec<String>,
}
