// src/tests/router_tests/form_tests.rs

use crate::domain::listing::Projection;
use crate::domain::repository::ListingRepository;
use crate::router::handle;
use crate::tests::utils::{body_string, listing, post_form, seed, test_app};

#[test]
fn price_search_lists_matches() {
    let app = test_app();
    app.listings.insert(&listing("1", "Budget room", "$50")).unwrap();
    app.listings.insert(&listing("2", "Penthouse", "$1,200")).unwrap();
    app.listings.insert(&listing("3", "Mystery", "N/A")).unwrap();

    let resp = handle(
        post_form("/viewData/price", &[("minPrice", "0"), ("maxPrice", "100")]),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Budget room"));
    assert!(!body.contains("Penthouse"));
    assert!(!body.contains("Mystery"));
}

#[test]
fn price_search_rerenders_form_on_bad_input() {
    let app = test_app();
    seed(&app.listings, 2);

    let resp = handle(
        post_form("/viewData/price", &[("minPrice", "500"), ("maxPrice", "100")]),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Maximum price must be &gt;= minimum price"));
    assert!(body.contains(r#"value="500""#));
    assert!(!body.contains("Listing 1"));

    let body = body_string(handle(post_form("/viewData/price", &[("maxPrice", "x")]), &app).unwrap());
    assert!(body.contains("Minimum price is required"));
    assert!(body.contains("Maximum price must be a number"));
}

#[test]
fn name_search_matches_case_insensitively() {
    let app = test_app();
    app.listings.insert(&listing("1", "Cozy LOFT downtown", "$100")).unwrap();
    app.listings.insert(&listing("2", "Beach hut", "$80")).unwrap();

    let body = body_string(handle(post_form("/searchName", &[("name", "  loft ")]), &app).unwrap());
    assert!(body.contains("Cozy LOFT downtown"));
    assert!(!body.contains("Beach hut"));
}

#[test]
fn name_search_requires_a_name() {
    let app = test_app();
    let body = body_string(handle(post_form("/searchName", &[("name", "   ")]), &app).unwrap());
    assert!(body.contains("Property name is required"));
}

#[test]
fn id_search_finds_or_reports_missing() {
    let app = test_app();
    app.listings.insert(&listing("1001", "Skylit Castle", "$966")).unwrap();

    let body = body_string(handle(post_form("/searchID", &[("id", " 1001 ")]), &app).unwrap());
    assert!(body.contains("Skylit Castle"));

    let body = body_string(handle(post_form("/searchID", &[("id", "77")]), &app).unwrap());
    assert!(body.contains("No property found with ID &quot;77&quot;."));

    let body = body_string(handle(post_form("/searchID", &[]), &app).unwrap());
    assert!(body.contains("Property ID is required"));
}

#[test]
fn add_form_inserts_listing() {
    let app = test_app();

    let resp = handle(
        post_form(
            "/addAirbnb",
            &[
                ("id", "5000"),
                ("NAME", "Harbour view"),
                ("neighbourhood", "Docklands"),
                ("country", "Australia"),
                ("instant_bookable", "TRUE"),
                ("property_type", "Apartment"),
                ("price", "$240"),
                ("thumbnail", "https://example.com/t.jpg"),
            ],
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("New Airbnb property added!"));

    let stored = app.listings.find_by_id("5000", Projection::Full).unwrap().unwrap();
    assert_eq!(stored.name.as_deref(), Some("Harbour view"));
    assert_eq!(stored.price_amount, Some(240.0));
    assert_eq!(stored.host_identity_verified, None);
}

#[test]
fn add_form_without_id_keeps_values_and_stores_nothing() {
    let app = test_app();

    let body = body_string(
        handle(post_form("/addAirbnb", &[("NAME", "Nameless")]), &app).unwrap(),
    );
    assert!(body.contains("Property ID is required"));
    assert!(body.contains(r#"value="Nameless""#));
    assert_eq!(app.listings.count().unwrap(), 0);
}

#[test]
fn update_form_changes_name_and_price_only() {
    let app = test_app();
    app.listings.insert(&listing("9", "Old name", "$100")).unwrap();

    let body = body_string(
        handle(
            post_form(
                "/updateAirbnb",
                &[("id", "9"), ("NAME", "X"), ("price", "9"), ("country", "Nowhere")],
            ),
            &app,
        )
        .unwrap(),
    );
    assert!(body.contains("Property updated successfully!"));

    let stored = app.listings.find_by_id("9", Projection::Full).unwrap().unwrap();
    assert_eq!(stored.name.as_deref(), Some("X"));
    assert_eq!(stored.price.as_deref(), Some("9"));
    assert_eq!(stored.country.as_deref(), Some("United States"));
}

#[test]
fn update_form_reports_no_match() {
    let app = test_app();
    seed(&app.listings, 1);

    let body = body_string(
        handle(post_form("/updateAirbnb", &[("id", "404"), ("NAME", "X")]), &app).unwrap(),
    );
    assert!(body.contains("No property found to update."));
    assert_eq!(
        app.listings.find_by_id("1", Projection::Full).unwrap().unwrap().name.as_deref(),
        Some("Listing 1")
    );
}

#[test]
fn update_form_needs_something_to_change() {
    let app = test_app();
    seed(&app.listings, 1);

    let body = body_string(handle(post_form("/updateAirbnb", &[("id", "1")]), &app).unwrap());
    assert!(body.contains("Nothing to update"));
}

#[test]
fn delete_form_removes_listing() {
    let app = test_app();
    seed(&app.listings, 2);

    let body = body_string(handle(post_form("/deleteAirbnb", &[("id", "1")]), &app).unwrap());
    assert!(body.contains("Property deleted successfully!"));
    assert_eq!(app.listings.count().unwrap(), 1);

    let body = body_string(handle(post_form("/deleteAirbnb", &[("id", "1")]), &app).unwrap());
    assert!(body.contains("No property found with that ID."));
    assert_eq!(app.listings.count().unwrap(), 1);
}
