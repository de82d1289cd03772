use crate::db::connection::{init_db, Database};
use crate::domain::listing::Listing;
use crate::domain::repository::ListingRepository;
use crate::router::App;
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// Returns a fresh test database using the production schema
pub fn init_test_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "airbnb_test_{}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        NEXT_DB.fetch_add(1, Ordering::Relaxed)
    ));
    let db = Database::new(path);
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn test_app() -> App<Database> {
    App {
        listings: init_test_db(),
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"),
    }
}

pub fn listing(id: &str, name: &str, price: &str) -> Listing {
    Listing {
        id: id.to_string(),
        name: Some(name.to_string()),
        host_identity_verified: Some("verified".to_string()),
        neighbourhood: Some("Kensington".to_string()),
        country: Some("United States".to_string()),
        instant_bookable: Some("TRUE".to_string()),
        property_type: Some("Entire home/apt".to_string()),
        thumbnail: None,
        price: Some(price.to_string()),
        price_amount: None,
    }
    .with_derived_amount()
}

/// Insert `n` listings with ids 1..=n and prices $100, $110, ...
pub fn seed<R: ListingRepository>(repo: &R, n: usize) {
    for i in 1..=n {
        let price = format!("${}", 100 + (i - 1) * 10);
        repo.insert(&listing(&i.to_string(), &format!("Listing {i}"), &price))
            .expect("seed insert failed");
    }
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, form: &[(&str, &str)]) -> Request {
    let body: String = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish();

    http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub fn send_json(method: Method, uri: &str, body: &str) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).expect("response was not JSON")
}
