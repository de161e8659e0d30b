//! Extraction instructions.

/// Instructions sent ahead of the document images.
///
/// Field names mirror `ListingDraft` so the parsed object can be handed to
/// the review form unchanged.
pub const EXTRACTION_PROMPT: &str = r#"You are reading scanned pages of a real estate listing authority (an agency agreement to sell a residential property).

Extract the following fields and reply with a single JSON object and nothing else:

{
  "listing_agent": string | null,      // the agent named on the authority
  "vendor_names": string | null,       // all vendors, comma separated
  "unit_number": string | null,
  "street_number": string | null,
  "street_name": string | null,        // including the street type, e.g. "Moonbeam Place"
  "suburb": string | null,
  "state": string | null,              // abbreviation, e.g. "TAS"
  "postcode": string | null,
  "price": string | null,              // the advertised price exactly as written
  "bedrooms": integer | null,
  "bathrooms": integer | null,
  "garages": integer | null,
  "land_area": number | null,          // square metres
  "floor_area": number | null,         // square metres
  "heading": string | null,            // a short advertising headline
  "description": string | null         // a short advertising description of the property
}

Rules:
- Use null when a field is not present on the document. Do not guess.
- Convert hectares to square metres (1 ha = 10000 m2).
- Do not include comments, markdown fences or any text outside the JSON object."#;
