// src/tests/router_tests/api_tests.rs

use crate::domain::listing::Projection;
use crate::domain::repository::ListingRepository;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_json, get, listing, seed, send_json, test_app};
use http::Method;
use serde_json::json;

#[test]
fn api_lists_every_listing_with_all_fields() {
    let app = test_app();
    seed(&app.listings, 3);

    let resp = handle(get("/api/airbnb"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/json"
    );

    let json = body_json(resp);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["host_identity_verified"], "verified");
    assert_eq!(rows[2]["price"], "$120");
    assert_eq!(rows[2]["price_amount"], 120.0);
}

#[test]
fn api_get_by_id_or_404() {
    let app = test_app();
    app.listings.insert(&listing("1001", "Castle", "$966")).unwrap();

    let resp = handle(get("/api/airbnb/1001"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["NAME"], "Castle");

    let resp = handle(get("/api/airbnb/2002"), &app).unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp), json!({ "message": "Not found" }));
}

#[test]
fn api_create_returns_201_and_accepts_numeric_ids() {
    let app = test_app();

    let resp = handle(
        send_json(
            Method::POST,
            "/api/airbnb",
            r#"{"id": 3003, "NAME": "Numbered", "price": "$1,500", "country": "Canada"}"#,
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 201);

    let created = body_json(resp);
    assert_eq!(created["id"], "3003");
    assert_eq!(created["price_amount"], 1500.0);

    // The id is text everywhere, so the path lookup finds it.
    let resp = handle(get("/api/airbnb/3003"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["country"], "Canada");
}

#[test]
fn api_create_validates_input() {
    let app = test_app();

    let resp = handle(send_json(Method::POST, "/api/airbnb", r#"{"NAME": "No id"}"#), &app).unwrap();
    assert_eq!(resp.status(), 400);
    let json = body_json(resp);
    assert_eq!(json["error"], "Validation failed");
    assert_eq!(json["errors"][0]["field"], "id");

    let resp = handle(send_json(Method::POST, "/api/airbnb", "not json"), &app).unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp), json!({ "error": "Invalid JSON body" }));

    assert_eq!(app.listings.count().unwrap(), 0);
}

#[test]
fn api_update_changes_arbitrary_fields() {
    let app = test_app();
    app.listings.insert(&listing("1", "Before", "$100")).unwrap();

    let resp = handle(
        send_json(
            Method::PUT,
            "/api/airbnb/1",
            r#"{"country": "Portugal", "instant_bookable": "FALSE"}"#,
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let updated = body_json(resp);
    assert_eq!(updated["country"], "Portugal");
    assert_eq!(updated["instant_bookable"], "FALSE");
    assert_eq!(updated["NAME"], "Before");

    let stored = app.listings.find_by_id("1", Projection::Full).unwrap().unwrap();
    assert_eq!(stored.country.as_deref(), Some("Portugal"));
}

#[test]
fn api_update_missing_listing_is_404() {
    let app = test_app();
    seed(&app.listings, 1);

    let resp = handle(send_json(Method::PUT, "/api/airbnb/99", r#"{"NAME": "X"}"#), &app).unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp), json!({ "message": "Not found" }));
}

#[test]
fn api_update_with_empty_body_is_rejected() {
    let app = test_app();
    seed(&app.listings, 1);

    let resp = handle(send_json(Method::PUT, "/api/airbnb/1", "{}"), &app).unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["errors"][0]["message"], "Nothing to update");
}

#[test]
fn api_delete_then_404() {
    let app = test_app();
    seed(&app.listings, 2);

    let resp = handle(send_json(Method::DELETE, "/api/airbnb/2", ""), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!({ "message": "Deleted successfully" }));
    assert_eq!(app.listings.count().unwrap(), 1);

    let resp = handle(send_json(Method::DELETE, "/api/airbnb/2", ""), &app).unwrap();
    assert_eq!(resp.status(), 404);
}

#[test]
fn api_unknown_shapes_are_404() {
    let app = test_app();

    let resp = handle(send_json(Method::PUT, "/api/airbnb", "{}"), &app).unwrap();
    assert_eq!(resp.status(), 404);

    let resp = handle(get("/api/airbnb/1/extra"), &app).unwrap();
    assert_eq!(resp.status(), 404);
}

#[test]
fn api_path_ids_match_exactly() {
    let app = test_app();
    app.listings.insert(&listing("1", "One", "$100")).unwrap();
    app.listings.insert(&listing("a+b", "Plus", "$200")).unwrap();
    app.listings.insert(&listing("c d", "Space", "$300")).unwrap();

    // `&` and `=` are part of the id, not separators.
    let resp = handle(send_json(Method::DELETE, "/api/airbnb/1&x", ""), &app).unwrap();
    assert_eq!(resp.status(), 404);
    let resp = handle(send_json(Method::DELETE, "/api/airbnb/1=", ""), &app).unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(app.listings.count().unwrap(), 3);

    let resp = handle(get("/api/airbnb/a+b"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["NAME"], "Plus");

    let resp = handle(get("/api/airbnb/a%2Bb"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["NAME"], "Plus");

    let resp = handle(get("/api/airbnb/c%20d"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["NAME"], "Space");

    // `+` is not a space in a path.
    let resp = handle(get("/api/airbnb/c+d"), &app).unwrap();
    assert_eq!(resp.status(), 404);

    let resp = handle(send_json(Method::DELETE, "/api/airbnb/a%2Bb", ""), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(app.listings.find_by_id("a+b", Projection::Full).unwrap().is_none());
    assert_eq!(app.listings.count().unwrap(), 2);
}

#[test]
fn api_rejects_ids_that_are_not_utf8() {
    let app = test_app();
    let resp = handle(get("/api/airbnb/%FF"), &app).unwrap();
    assert_eq!(resp.status(), 400);
}

#[test]
fn api_storage_failure_is_a_generic_500() {
    let app = test_app();
    seed(&app.listings, 2);
    app.listings
        .with_conn(|conn| Ok::<_, ServerError>(conn.execute_batch("DROP TABLE airbnb_list")?))
        .unwrap();

    let resp = handle(get("/api/airbnb"), &app).unwrap();
    assert_eq!(resp.status(), 500);
    assert_eq!(body_json(resp), json!({ "error": "DB Error" }));

    let resp = handle(get("/api/airbnb/1"), &app).unwrap();
    assert_eq!(resp.status(), 500);
    assert_eq!(body_json(resp), json!({ "error": "DB Error" }));
}
