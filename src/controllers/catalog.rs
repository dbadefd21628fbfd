use axum::Json;

use crate::domain::language::{catalog, LanguageProfile};
use crate::domain::recipients::{CountryCode, CountryCodeResponse};

/// GET /api/country-codes
pub async fn country_codes() -> Json<Vec<CountryCodeResponse>> {
    Json(CountryCode::ALL.into_iter().map(Into::into).collect())
}

/// GET /api/languages
pub async fn languages() -> Json<&'static [LanguageProfile]> {
    Json(catalog())
}
