use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{Coordinate, FilterSpec};

/// Request to search listings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_price_range"))]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub filters: FilterSpec,
    /// Reference point for distance sorting and the radius cut
    #[serde(default)]
    pub origin: Option<Coordinate>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u16,
    #[serde(default)]
    pub page: u32,
}

fn default_limit() -> u16 {
    20
}

fn validate_price_range(req: &SearchRequest) -> Result<(), ValidationError> {
    if req.filters.price_range.is_inverted() {
        let mut err = ValidationError::new("price_range");
        err.message = Some("priceRange.min must not exceed priceRange.max".into());
        return Err(err);
    }
    Ok(())
}

/// Query string for the suggestion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
    /// `colleges` adds "Near {college}" suggestions
    pub mode: Option<String>,
}

impl SuggestionQuery {
    pub fn include_colleges(&self) -> bool {
        self.mode
            .as_deref()
            .is_some_and(|mode| mode.eq_ignore_ascii_case("colleges"))
    }
}

/// Query string for reading a user's recent searches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSearchesQuery {
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Request recording that a user picked a suggestion
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SelectSuggestionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}
