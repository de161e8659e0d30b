//! Listing drafts: the structured record extracted from a listing authority.

use serde::{Deserialize, Serialize};

use crate::address::AddressComponents;
use crate::error::CoreError;
use crate::types::CrmId;

/// A listing as extracted by the vision model and reviewed by staff.
///
/// Every field is optional at extraction time; [`validate_listing`] enforces
/// what a save requires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    #[serde(default)]
    pub listing_agent: Option<String>,
    #[serde(default)]
    pub listing_agent_id: Option<CrmId>,
    #[serde(flatten)]
    pub address: AddressComponents,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub vendor_names: Option<String>,
    /// Display price as written on the authority (e.g. `"Offers over $450,000"`).
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<i32>,
    #[serde(default)]
    pub bathrooms: Option<i32>,
    #[serde(default)]
    pub garages: Option<i32>,
    /// Square metres.
    #[serde(default)]
    pub land_area: Option<f64>,
    /// Square metres.
    #[serde(default)]
    pub floor_area: Option<f64>,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Check the fields a listing must carry before it is saved or pushed to the CRM.
pub fn validate_listing(draft: &ListingDraft) -> Result<(), CoreError> {
    require("listing_agent", draft.listing_agent.as_deref())?;
    require("street_number", draft.address.street_number.as_deref())?;
    require("street_name", draft.address.street_name.as_deref())?;
    require("suburb", draft.address.suburb.as_deref())?;

    for (field, value) in [
        ("bedrooms", draft.bedrooms),
        ("bathrooms", draft.bathrooms),
        ("garages", draft.garages),
    ] {
        if matches!(value, Some(n) if n < 0) {
            return Err(CoreError::Validation(format!("{field} must not be negative")));
        }
    }
    for (field, value) in [("land_area", draft.land_area), ("floor_area", draft.floor_area)] {
        if matches!(value, Some(a) if !a.is_finite() || a < 0.0) {
            return Err(CoreError::Validation(format!(
                "{field} must be a non-negative number"
            )));
        }
    }
    Ok(())
}

/// Fail with a field-specific message when `value` is missing or blank.
pub fn require(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}
