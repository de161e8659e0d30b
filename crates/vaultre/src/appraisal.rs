//! Appraisal payloads for the residential sale endpoints.

use listdesk_core::listing::ListingDraft;
use listdesk_core::types::CrmId;
use serde_json::{json, Map, Value};

/// Status given to newly created records.
pub const APPRAISAL_STATUS: &str = "appraisal";

/// Area unit VaultRE expects for land and floor sizes.
const AREA_UNITS: &str = "squareMetres";

/// Build the JSON body for creating or updating a property from a draft.
///
/// `status` is only sent on create so an update never moves a listed
/// property back to appraisal. Absent draft fields are omitted rather
/// than sent as null, leaving existing CRM values untouched on update.
pub fn build_payload(
    draft: &ListingDraft,
    agent_id: CrmId,
    suburb_id: CrmId,
    for_update: bool,
) -> Value {
    let address = &draft.address;
    let mut body = Map::new();

    body.insert(
        "address".into(),
        json!({
            "unitNumber": trimmed(address.unit_number.as_deref()).unwrap_or(""),
            "streetNumber": trimmed(address.street_number.as_deref()).unwrap_or(""),
            "street": trimmed(address.street_name.as_deref()).unwrap_or(""),
            "suburb": { "id": suburb_id },
        }),
    );
    body.insert("contactStaff".into(), json!([{ "id": agent_id }]));

    if !for_update {
        body.insert("status".into(), json!(APPRAISAL_STATUS));
    }

    insert_opt(&mut body, "bed", draft.bedrooms.map(Value::from));
    insert_opt(&mut body, "bath", draft.bathrooms.map(Value::from));
    insert_opt(&mut body, "garages", draft.garages.map(Value::from));
    insert_opt(&mut body, "landArea", draft.land_area.map(area));
    insert_opt(&mut body, "floorArea", draft.floor_area.map(area));
    insert_opt(&mut body, "displayPrice", text(draft.price.as_deref()));
    insert_opt(&mut body, "heading", text(draft.heading.as_deref()));
    insert_opt(&mut body, "description", text(draft.description.as_deref()));

    Value::Object(body)
}

fn area(value: f64) -> Value {
    json!({ "value": value, "units": AREA_UNITS })
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn text(value: Option<&str>) -> Option<Value> {
    trimmed(value).map(Value::from)
}

fn insert_opt(body: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value {
        body.insert(key.to_string(), v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ListingDraft {
        serde_json::from_value(json!({
            "listing_agent": "WENDY SQUIBB",
            "unit_number": " ",
            "street_number": "12",
            "street_name": " Moonbeam Place ",
            "suburb": "Ulverstone",
            "bedrooms": 3,
            "land_area": 612.5,
            "price": "Offers over $450,000",
        }))
        .unwrap()
    }

    #[test]
    fn create_payload_carries_status_and_staff() {
        let body = build_payload(&draft(), 30112, 77, false);
        assert_eq!(body["status"], "appraisal");
        assert_eq!(body["contactStaff"][0]["id"], 30112);
        assert_eq!(body["address"]["suburb"]["id"], 77);
        assert_eq!(body["address"]["street"], "Moonbeam Place");
        assert_eq!(body["address"]["unitNumber"], "");
        assert_eq!(body["bed"], 3);
        assert_eq!(body["landArea"]["value"], 612.5);
        assert_eq!(body["landArea"]["units"], "squareMetres");
        assert_eq!(body["displayPrice"], "Offers over $450,000");
    }

    #[test]
    fn update_payload_omits_status_and_absent_fields() {
        let body = build_payload(&draft(), 30112, 77, true);
        assert!(body.get("status").is_none());
        assert!(body.get("bath").is_none());
        assert!(body.get("floorArea").is_none());
        assert!(body.get("description").is_none());
    }
}
