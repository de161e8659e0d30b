use listdesk_core::listing::ListingDraft;
use listdesk_core::offer::{OfferSubmission, Purchaser, Solicitor, OFFER_HISTORY_CAP};
use listdesk_db::repositories::{ListingRepo, OfferDraftRepo, OfferRepo};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn draft() -> ListingDraft {
    serde_json::from_value(json!({
        "listing_agent": "WENDY SQUIBB",
        "listing_agent_id": 30112,
        "street_number": "12",
        "street_name": "Moonbeam Place",
        "suburb": "Ulverstone",
        "postcode": "7315",
        "bedrooms": 3,
        "description": "Sunny family home close to the river.",
    }))
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_round_trips_with_payload(pool: PgPool) {
    listdesk_db::health_check(&pool).await.unwrap();

    let saved = ListingRepo::create(&pool, &draft()).await.unwrap();
    assert_eq!(saved.street_name, "Moonbeam Place");
    assert_eq!(saved.listing_agent_id, Some(30112));
    assert_eq!(saved.payload["description"], "Sunny family home close to the river.");

    let found = ListingRepo::find_by_id(&pool, saved.id).await.unwrap().unwrap();
    assert_eq!(found.id, saved.id);
    assert!(ListingRepo::find_by_id(&pool, saved.id + 1000).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn re_saving_inserts_a_new_row(pool: PgPool) {
    let first = ListingRepo::create(&pool, &draft()).await.unwrap();
    let mut edited = draft();
    edited.bedrooms = Some(4);
    let second = ListingRepo::create(&pool, &edited).await.unwrap();

    assert_ne!(first.id, second.id);
    let recent = ListingRepo::list_recent(&pool, 10, 0).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, second.id);
    assert_eq!(recent[1].bedrooms, Some(3));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn offer_is_persisted(pool: PgPool) {
    let offer = OfferSubmission {
        property_id: Some(88123),
        property_address: "12 Moonbeam Place, Ulverstone".into(),
        purchasers: vec![Purchaser {
            full_name: "Alex Taylor".into(),
            phone: Some("0400 000 000".into()),
            ..Default::default()
        }],
        solicitor: Solicitor {
            firm: "Coastal Conveyancing".into(),
            ..Default::default()
        },
        offer_price: 450_000,
        ..Default::default()
    };

    let saved = OfferRepo::create(&pool, &offer).await.unwrap();
    assert_eq!(saved.offer_price, 450_000);
    assert_eq!(saved.payload["purchasers"][0]["full_name"], "Alex Taylor");

    let found = OfferRepo::find_by_id(&pool, saved.id).await.unwrap().unwrap();
    assert_eq!(found.property_id, Some(88123));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_history_is_capped_newest_first(pool: PgPool) {
    let client = Uuid::new_v4();
    let other = Uuid::new_v4();

    for i in 0..(OFFER_HISTORY_CAP + 3) {
        OfferDraftRepo::save(&pool, client, &json!({ "step": i }))
            .await
            .unwrap();
    }
    OfferDraftRepo::save(&pool, other, &json!({ "step": 0 }))
        .await
        .unwrap();

    let history = OfferDraftRepo::list(&pool, client).await.unwrap();
    assert_eq!(history.len() as i64, OFFER_HISTORY_CAP);
    assert_eq!(history[0].snapshot["step"], OFFER_HISTORY_CAP + 2);
    assert_eq!(history.last().unwrap().snapshot["step"], 3);

    let latest = OfferDraftRepo::latest(&pool, client).await.unwrap().unwrap();
    assert_eq!(latest.id, history[0].id);

    assert_eq!(OfferDraftRepo::list(&pool, other).await.unwrap().len(), 1);
}
