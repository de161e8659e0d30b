//! Purchase offer intake: submission shape, validation and history limits.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::listing::require;
use crate::types::CrmId;

/// Saved offer-form snapshots kept per client; older ones are evicted.
pub const OFFER_HISTORY_CAP: i64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Purchaser {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub postal_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solicitor {
    pub firm: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A purchase offer as submitted from the intake form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferSubmission {
    /// VaultRE property id, when the offer was made against a CRM listing.
    #[serde(default)]
    pub property_id: Option<CrmId>,
    pub property_address: String,
    #[serde(default)]
    pub agent_name: Option<String>,
    pub purchasers: Vec<Purchaser>,
    pub solicitor: Solicitor,
    /// Whole dollars.
    pub offer_price: i64,
    /// Whole dollars.
    #[serde(default)]
    pub deposit: Option<i64>,
    #[serde(default)]
    pub finance_required: bool,
    #[serde(default)]
    pub finance_days: Option<i32>,
    #[serde(default)]
    pub building_inspection: bool,
    #[serde(default)]
    pub inspection_days: Option<i32>,
    #[serde(default)]
    pub settlement_days: Option<i32>,
    #[serde(default)]
    pub special_conditions: Option<String>,
}

/// Validate an offer, reporting the first offending field.
pub fn validate_offer(offer: &OfferSubmission) -> Result<(), CoreError> {
    require("property_address", Some(&offer.property_address))?;

    if offer.purchasers.is_empty() {
        return Err(CoreError::Validation(
            "at least one purchaser is required".to_string(),
        ));
    }
    for (i, p) in offer.purchasers.iter().enumerate() {
        require(&format!("purchasers[{i}].full_name"), Some(&p.full_name))?;
        let has_email = p.email.as_deref().is_some_and(|e| !e.trim().is_empty());
        let has_phone = p.phone.as_deref().is_some_and(|e| !e.trim().is_empty());
        if !has_email && !has_phone {
            return Err(CoreError::Validation(format!(
                "purchasers[{i}] needs an email or phone"
            )));
        }
        if let Some(email) = p.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !email.contains('@') {
                return Err(CoreError::Validation(format!(
                    "purchasers[{i}].email is not a valid email address"
                )));
            }
        }
    }

    require("solicitor.firm", Some(&offer.solicitor.firm))?;

    if offer.offer_price <= 0 {
        return Err(CoreError::Validation(
            "offer_price must be greater than zero".to_string(),
        ));
    }
    if let Some(deposit) = offer.deposit {
        if deposit < 0 || deposit > offer.offer_price {
            return Err(CoreError::Validation(
                "deposit must be between zero and the offer price".to_string(),
            ));
        }
    }

    check_condition_days("finance_days", offer.finance_required, offer.finance_days)?;
    check_condition_days(
        "inspection_days",
        offer.building_inspection,
        offer.inspection_days,
    )?;

    if matches!(offer.settlement_days, Some(d) if d <= 0) {
        return Err(CoreError::Validation(
            "settlement_days must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn check_condition_days(field: &str, enabled: bool, days: Option<i32>) -> Result<(), CoreError> {
    if !enabled {
        return Ok(());
    }
    match days {
        Some(d) if d > 0 => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "{field} is required when the condition applies"
        ))),
    }
}
