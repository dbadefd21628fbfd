use super::error::RecipientError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const NATIONAL_NUMBER_LENGTH: usize = 10;

/// Dialing prefixes accepted for recipients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountryCode {
    #[serde(rename = "+91")]
    India,
    #[serde(rename = "+1")]
    UsaCanada,
    #[serde(rename = "+44")]
    UnitedKingdom,
    #[serde(rename = "+61")]
    Australia,
    #[serde(rename = "+49")]
    Germany,
    #[serde(rename = "+33")]
    France,
    #[serde(rename = "+81")]
    Japan,
    #[serde(rename = "+86")]
    China,
    #[serde(rename = "+7")]
    Russia,
    #[serde(rename = "+55")]
    Brazil,
    #[serde(rename = "+971")]
    Uae,
    #[serde(rename = "+65")]
    Singapore,
}

impl CountryCode {
    /// Catalog order, India first
    pub const ALL: [CountryCode; 12] = [
        CountryCode::India,
        CountryCode::UsaCanada,
        CountryCode::UnitedKingdom,
        CountryCode::Australia,
        CountryCode::Germany,
        CountryCode::France,
        CountryCode::Japan,
        CountryCode::China,
        CountryCode::Russia,
        CountryCode::Brazil,
        CountryCode::Uae,
        CountryCode::Singapore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CountryCode::India => "+91",
            CountryCode::UsaCanada => "+1",
            CountryCode::UnitedKingdom => "+44",
            CountryCode::Australia => "+61",
            CountryCode::Germany => "+49",
            CountryCode::France => "+33",
            CountryCode::Japan => "+81",
            CountryCode::China => "+86",
            CountryCode::Russia => "+7",
            CountryCode::Brazil => "+55",
            CountryCode::Uae => "+971",
            CountryCode::Singapore => "+65",
        }
    }

    pub fn country(&self) -> &'static str {
        match self {
            CountryCode::India => "India",
            CountryCode::UsaCanada => "USA/Canada",
            CountryCode::UnitedKingdom => "UK",
            CountryCode::Australia => "Australia",
            CountryCode::Germany => "Germany",
            CountryCode::France => "France",
            CountryCode::Japan => "Japan",
            CountryCode::China => "China",
            CountryCode::Russia => "Russia",
            CountryCode::Brazil => "Brazil",
            CountryCode::Uae => "UAE",
            CountryCode::Singapore => "Singapore",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            CountryCode::India => "🇮🇳",
            CountryCode::UsaCanada => "🇺🇸",
            CountryCode::UnitedKingdom => "🇬🇧",
            CountryCode::Australia => "🇦🇺",
            CountryCode::Germany => "🇩🇪",
            CountryCode::France => "🇫🇷",
            CountryCode::Japan => "🇯🇵",
            CountryCode::China => "🇨🇳",
            CountryCode::Russia => "🇷🇺",
            CountryCode::Brazil => "🇧🇷",
            CountryCode::Uae => "🇦🇪",
            CountryCode::Singapore => "🇸🇬",
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CountryCode {
    type Err = RecipientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CountryCode::ALL
            .into_iter()
            .find(|code| code.as_str() == trimmed)
            .ok_or_else(|| RecipientError::Validation(format!("Unsupported country code: {}", s)))
    }
}

/// A recipient number: catalog country code followed by a 10 digit national number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    country_code: CountryCode,
    national_number: String,
}

impl PhoneNumber {
    pub fn parse(country_code: &str, national_number: &str) -> Result<Self, RecipientError> {
        let country_code = country_code.parse::<CountryCode>()?;

        if national_number.len() != NATIONAL_NUMBER_LENGTH
            || !national_number.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(RecipientError::Validation(
                "Please enter a valid 10-digit phone number".to_string(),
            ));
        }

        Ok(Self {
            country_code,
            national_number: national_number.to_string(),
        })
    }

    pub fn country_code(&self) -> CountryCode {
        self.country_code
    }

    pub fn national_number(&self) -> &str {
        &self.national_number
    }

    /// Number to dial: the stored country code is dropped and the national
    /// number is prefixed with `outbound` instead.
    pub fn dial_target(&self, outbound: CountryCode) -> String {
        format!("{}{}", outbound.as_str(), self.national_number)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.country_code.as_str(), self.national_number)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered recipient set. Insertion order is kept for display and dispatch.
#[derive(Debug, Clone, Default)]
pub struct RecipientList {
    numbers: Vec<PhoneNumber>,
}

impl RecipientList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        country_code: &str,
        national_number: &str,
    ) -> Result<PhoneNumber, RecipientError> {
        let number = PhoneNumber::parse(country_code, national_number)?;

        if self.numbers.contains(&number) {
            return Err(RecipientError::Duplicate(number.to_string()));
        }

        self.numbers.push(number.clone());
        Ok(number)
    }

    pub fn remove(&mut self, full_number: &str) -> Result<PhoneNumber, RecipientError> {
        let target = full_number.trim();
        let index = self
            .numbers
            .iter()
            .position(|n| n.to_string() == target)
            .ok_or_else(|| RecipientError::NotFound(target.to_string()))?;

        Ok(self.numbers.remove(index))
    }

    /// Drop every number contained in `consumed`, keeping the order of the rest
    pub fn remove_all(&mut self, consumed: &[PhoneNumber]) {
        self.numbers.retain(|n| !consumed.contains(n));
    }

    pub fn clear(&mut self) {
        self.numbers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn snapshot(&self) -> Vec<PhoneNumber> {
        self.numbers.clone()
    }
}
