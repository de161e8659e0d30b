//! Reconcile a listing draft against VaultRE records.
//!
//! The decision is: find the draft's suburb in the directory, page through
//! that suburb's sale properties looking for an exact normalized
//! unit/number/street match, then update the match or create a new
//! appraisal.

use listdesk_core::address::{AddressComponents, AddressKey};
use listdesk_core::agents::{self, Agent};
use listdesk_core::listing::ListingDraft;
use listdesk_core::types::CrmId;
use serde::Serialize;

use crate::appraisal::build_payload;
use crate::directory::CrmClient;
use crate::error::VaultReError;
use crate::models::{Property, Suburb};

/// Items requested per property page.
pub const PROPERTY_PAGE_SIZE: u32 = 100;

/// Hard ceiling on property pages fetched for one lookup.
pub const MAX_PROPERTY_PAGES: u32 = 50;

/// Pick the target suburb from directory results.
///
/// Entries whose name equals `name` (ignoring case and surrounding
/// whitespace) are preferred; when none are equal every result is
/// considered. Within that set the postcode match wins, else the first.
pub fn select_suburb(candidates: &[Suburb], name: &str, postcode: Option<&str>) -> Option<Suburb> {
    let wanted = name.trim();
    let named: Vec<&Suburb> = candidates
        .iter()
        .filter(|s| s.name.trim().eq_ignore_ascii_case(wanted))
        .collect();
    let pool: Vec<&Suburb> = if named.is_empty() {
        candidates.iter().collect()
    } else {
        named
    };

    let postcode = postcode.map(str::trim).filter(|p| !p.is_empty());
    postcode
        .and_then(|pc| {
            pool.iter()
                .find(|s| s.postcode.as_deref().map(str::trim) == Some(pc))
                .copied()
        })
        .or_else(|| pool.first().copied())
        .cloned()
}

/// Look the suburb up in the directory and select the target entry.
pub async fn resolve_suburb<C: CrmClient + ?Sized>(
    crm: &C,
    name: &str,
    postcode: Option<&str>,
) -> Result<Suburb, VaultReError> {
    let candidates = crm.search_suburbs(name.trim()).await?;
    let suburb = select_suburb(&candidates, name, postcode)
        .ok_or_else(|| VaultReError::SuburbNotFound(name.trim().to_string()))?;

    tracing::debug!(
        suburb_id = suburb.id,
        suburb = %suburb.name,
        candidates = candidates.len(),
        "Resolved suburb"
    );
    Ok(suburb)
}

/// Whether paging should stop after `page` returned `fetched` items.
pub fn is_last_page(
    page: u32,
    page_size: u32,
    fetched: usize,
    total_pages: Option<u32>,
    has_next: Option<bool>,
) -> bool {
    fetched == 0
        || fetched < page_size as usize
        || total_pages.is_some_and(|total| page >= total)
        || has_next == Some(false)
        || page >= MAX_PROPERTY_PAGES
}

/// Page through a suburb's sale properties for an exact address match.
pub async fn find_property<C: CrmClient + ?Sized>(
    crm: &C,
    suburb_id: CrmId,
    target: &AddressKey,
) -> Result<Option<Property>, VaultReError> {
    let mut page = 1;
    loop {
        let result = crm
            .sale_properties_page(suburb_id, page, PROPERTY_PAGE_SIZE)
            .await?;
        let fetched = result.items.len();
        let last = is_last_page(
            page,
            PROPERTY_PAGE_SIZE,
            fetched,
            result.total_pages,
            result.has_next(),
        );

        if let Some(found) = result.items.into_iter().find(|p| &p.address_key() == target) {
            tracing::debug!(suburb_id, property_id = found.id, page, "Matched existing property");
            return Ok(Some(found));
        }
        if last {
            tracing::debug!(suburb_id, pages = page, "No property matched");
            return Ok(None);
        }
        page += 1;
    }
}

/// Resolve the suburb and search it for the address in one step.
pub async fn lookup_address<C: CrmClient + ?Sized>(
    crm: &C,
    address: &AddressComponents,
) -> Result<(Suburb, Option<Property>), VaultReError> {
    let suburb_name = address
        .suburb_name()
        .ok_or_else(|| VaultReError::InvalidDraft("suburb is required".into()))?;
    let suburb = resolve_suburb(crm, suburb_name, address.postcode()).await?;
    let property = find_property(crm, suburb.id, &address.key()).await?;
    Ok((suburb, property))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppraisalAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileOutcome {
    pub action: AppraisalAction,
    pub property_id: CrmId,
    pub suburb_id: CrmId,
    pub agent_name: &'static str,
    pub agent_id: CrmId,
}

/// Resolve the CRM staff member for a draft.
///
/// A `listing_agent_id` that is in the agent table wins; otherwise the
/// name is fuzzy-matched.
pub fn resolve_agent(draft: &ListingDraft) -> Result<&'static Agent, VaultReError> {
    if let Some(agent) = draft.listing_agent_id.and_then(agents::find_by_vaultre_id) {
        return Ok(agent);
    }
    let raw = draft.listing_agent.as_deref().unwrap_or_default();
    let matched = agents::match_agent(raw)
        .ok_or_else(|| VaultReError::AgentNotMatched(raw.trim().to_string()))?;
    if matched.is_ambiguous() {
        tracing::warn!(
            input = raw,
            chosen = matched.agent.name,
            "Agent name matched several agents equally; picked first in table order"
        );
    }
    Ok(matched.agent)
}

/// Create or update the CRM record for a reviewed listing.
pub async fn reconcile_appraisal<C: CrmClient + ?Sized>(
    crm: &C,
    draft: &ListingDraft,
) -> Result<ReconcileOutcome, VaultReError> {
    let agent = resolve_agent(draft)?;
    if draft.address.street_name.as_deref().map_or(true, |s| s.trim().is_empty()) {
        return Err(VaultReError::InvalidDraft("street_name is required".into()));
    }

    let (suburb, existing) = lookup_address(crm, &draft.address).await?;

    let (action, property_id) = match existing {
        Some(property) => {
            let payload = build_payload(draft, agent.vaultre_id, suburb.id, true);
            crm.update_property(property.id, &payload).await?;
            (AppraisalAction::Updated, property.id)
        }
        None => {
            let payload = build_payload(draft, agent.vaultre_id, suburb.id, false);
            let id = crm.create_appraisal(&payload).await?;
            (AppraisalAction::Created, id)
        }
    };

    tracing::info!(
        ?action,
        property_id,
        suburb_id = suburb.id,
        agent_id = agent.vaultre_id,
        "Appraisal reconciled"
    );

    Ok(ReconcileOutcome {
        action,
        property_id,
        suburb_id: suburb.id,
        agent_name: agent.name,
        agent_id: agent.vaultre_id,
    })
}
