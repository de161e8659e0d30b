//! Address components and the normalization used to compare them.
//!
//! OCR output and CRM records spell the same street differently
//! (`"12 Moonbeam Place"` vs `"12, MOONBEAM-PLACE"`), so every field is
//! reduced to lowercase alphanumerics before comparison. Matching on the
//! normalized key is exact: there is no scoring or partial tolerance.

use serde::{Deserialize, Serialize};

/// Free-text address fields as extracted from a document or typed by staff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponents {
    #[serde(default)]
    pub unit_number: Option<String>,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
}

/// Normalized comparison key for a street address within one suburb.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressKey {
    pub unit: String,
    pub number: String,
    pub street: String,
}

/// Lowercase `value` and strip everything that is not alphanumeric.
///
/// ```
/// use listdesk_core::address::normalize;
///
/// assert_eq!(normalize("12 Moonbeam Place"), "12moonbeamplace");
/// assert_eq!(normalize("12, MOONBEAM-PLACE"), "12moonbeamplace");
/// ```
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalize an optional field, treating `None` the same as `""`.
pub fn normalize_opt(value: Option<&str>) -> String {
    value.map(normalize).unwrap_or_default()
}

impl AddressKey {
    pub fn new(unit: Option<&str>, number: Option<&str>, street: Option<&str>) -> Self {
        Self {
            unit: normalize_opt(unit),
            number: normalize_opt(number),
            street: normalize_opt(street),
        }
    }
}

impl AddressComponents {
    /// The normalized unit/number/street key used for CRM matching.
    pub fn key(&self) -> AddressKey {
        AddressKey::new(
            self.unit_number.as_deref(),
            self.street_number.as_deref(),
            self.street_name.as_deref(),
        )
    }

    /// Trimmed suburb name, `None` when absent or blank.
    pub fn suburb_name(&self) -> Option<&str> {
        non_blank(self.suburb.as_deref())
    }

    /// Trimmed postcode, `None` when absent or blank.
    pub fn postcode(&self) -> Option<&str> {
        non_blank(self.postcode.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_and_case_are_ignored() {
        assert_eq!(normalize("12 Moonbeam Place"), normalize("12, MOONBEAM-PLACE"));
    }

    #[test]
    fn non_ascii_letters_survive() {
        assert_eq!(normalize("Café St."), "cafést");
    }

    #[test]
    fn empty_unit_matches_missing_unit() {
        let typed = AddressKey::new(Some(""), Some("2"), Some("Moonbeam Place"));
        let crm = AddressKey::new(None, Some("2"), Some("MOONBEAM PLACE"));
        assert_eq!(typed, crm);
    }

    #[test]
    fn different_street_number_does_not_match() {
        let a = AddressKey::new(None, Some("2"), Some("Moonbeam Place"));
        let b = AddressKey::new(None, Some("12"), Some("Moonbeam Place"));
        assert_ne!(a, b);
    }

    #[test]
    fn unit_number_is_part_of_the_key() {
        let a = AddressKey::new(Some("3"), Some("12"), Some("Moonbeam Place"));
        let b = AddressKey::new(None, Some("12"), Some("Moonbeam Place"));
        assert_ne!(a, b);
    }

    #[test]
    fn blank_suburb_is_none() {
        let address = AddressComponents {
            suburb: Some("   ".into()),
            ..Default::default()
        };
        assert!(address.suburb_name().is_none());
    }
}
