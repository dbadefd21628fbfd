pub mod error;
pub mod model;

pub use error::RecipientError;
pub use model::{CountryCode, PhoneNumber, RecipientList};

use serde::{Deserialize, Serialize};

/// Request for POST /api/campaign/recipients
#[derive(Debug, Serialize, Deserialize)]
pub struct AddRecipientRequest {
    pub country_code: String,
    pub number: String,
}

/// Entry of GET /api/country-codes
#[derive(Debug, Serialize, Deserialize)]
pub struct CountryCodeResponse {
    pub code: String,
    pub country: String,
    pub flag: String,
}

impl From<CountryCode> for CountryCodeResponse {
    fn from(code: CountryCode) -> Self {
        Self {
            code: code.as_str().to_string(),
            country: code.country().to_string(),
            flag: code.flag().to_string(),
        }
    }
}
