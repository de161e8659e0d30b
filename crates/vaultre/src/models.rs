//! VaultRE wire types.
//!
//! Only the fields listdesk reads are modelled; everything else in the
//! responses is ignored on deserialization. Property detail and lookup
//! endpoints are passed through as raw JSON.

use listdesk_core::address::AddressKey;
use listdesk_core::types::CrmId;
use serde::{Deserialize, Serialize};

/// Paged list envelope returned by collection endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub urls: Option<PageUrls>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageUrls {
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// `Some(false)` when the API explicitly reports there is no next page,
    /// `None` when it says nothing about it.
    pub fn has_next(&self) -> Option<bool> {
        self.urls.as_ref().map(|u| u.next.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuburbState {
    #[serde(default)]
    pub abbreviation: Option<String>,
}

/// An entry from the suburb directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suburb {
    pub id: CrmId,
    pub name: String,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub state: Option<SuburbState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAddress {
    #[serde(default)]
    pub unit_number: Option<String>,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub suburb: Option<Suburb>,
}

/// A residential sale property as returned by the listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: CrmId,
    #[serde(default)]
    pub address: PropertyAddress,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub display_price: Option<String>,
    #[serde(default)]
    pub heading: Option<String>,
}

impl Property {
    /// Normalized unit/number/street key for exact matching.
    pub fn address_key(&self) -> AddressKey {
        AddressKey::new(
            self.address.unit_number.as_deref(),
            self.address.street_number.as_deref(),
            self.address.street.as_deref(),
        )
    }

    /// `"3/12 Moonbeam Place, Ulverstone"` style label for pickers.
    pub fn display_address(&self) -> String {
        let a = &self.address;
        let mut line = String::new();
        if let Some(unit) = a.unit_number.as_deref().filter(|u| !u.trim().is_empty()) {
            line.push_str(unit.trim());
            line.push('/');
        }
        if let Some(number) = a.street_number.as_deref() {
            line.push_str(number.trim());
            line.push(' ');
        }
        if let Some(street) = a.street.as_deref() {
            line.push_str(street.trim());
        }
        if let Some(suburb) = &a.suburb {
            line.push_str(", ");
            line.push_str(&suburb.name);
        }
        line.trim().to_string()
    }
}

/// Body returned by create endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRecord {
    pub id: CrmId,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_without_urls_is_silent_about_next() {
        let page: Page<Suburb> = serde_json::from_value(json!({
            "items": [{ "id": 1, "name": "Ulverstone", "postcode": "7315" }],
            "totalItems": 1,
        }))
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.has_next(), None);
        assert_eq!(page.total_pages, None);
    }

    #[test]
    fn page_with_null_next_reports_last() {
        let page: Page<Suburb> = serde_json::from_value(json!({
            "items": [],
            "totalPages": 3,
            "urls": { "next": null },
        }))
        .unwrap();
        assert_eq!(page.has_next(), Some(false));
        assert_eq!(page.total_pages, Some(3));
    }

    #[test]
    fn property_address_key_normalizes() {
        let property: Property = serde_json::from_value(json!({
            "id": 9,
            "address": {
                "unitNumber": null,
                "streetNumber": "12",
                "street": "MOONBEAM-PLACE",
                "suburb": { "id": 1, "name": "Ulverstone" }
            }
        }))
        .unwrap();
        assert_eq!(
            property.address_key(),
            AddressKey::new(Some(""), Some("12"), Some("Moonbeam Place"))
        );
        assert_eq!(property.display_address(), "12 MOONBEAM-PLACE, Ulverstone");
    }
}
