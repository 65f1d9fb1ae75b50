use serde::Deserialize;

/// A brand as the catalog addresses it: display name plus listing URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    pub name: String,
    pub url: String,
}

/// Product identity as returned by a brand listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductRef {
    pub code: String,
}

/// Full product record fetched by code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub code: String,
    pub product_name: String,
    /// Comma-separated brand names.
    pub brands: String,
    pub weburl: String,
    /// API endpoint the record was read from.
    pub url: String,
}

impl Product {
    /// Append `brand` to the brand list. No trimming and no deduplication.
    pub fn append_brand(&mut self, brand: &str) {
        self.brands = format!("{},{}", self.brands, brand);
    }
}

/// Authenticated catalog identity, required by every update call.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub password: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("password", &"***")
            .finish()
    }
}
