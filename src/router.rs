use crate::domain::listing::{display_price, Listing, ListingInput, Projection};
use crate::domain::repository::{ListingRepository, PAGE_SIZE};
use crate::domain::validation::{
    validate_listing_id, validate_name_query, validate_new_listing, validate_patch,
    validate_price_range, FieldError, PatchScope,
};
use crate::errors::ServerError;
use crate::responses::{
    html_error_response, html_response, html_status_response, json_error_response,
    json_response, static_file_response, ResultResp,
};
use crate::templates::pages::{self, ListingFormVm, PriceSearchVm, SearchIdVm, SearchNameVm};
use astra::{Request, Response};
use percent_encoding::percent_decode_str;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

/// Everything a request handler needs. Built once at startup.
pub struct App<R> {
    pub listings: R,
    pub static_dir: PathBuf,
}

/// Entry point for the server loop: dispatch, turn page errors into HTML,
/// and log the outcome.
pub fn respond<R: ListingRepository>(req: Request, app: &App<R>) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let resp = handle(req, app).unwrap_or_else(html_error_response);

    tracing::info!(
        %method,
        %path,
        status = resp.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    resp
}

pub fn handle<R: ListingRepository>(req: Request, app: &App<R>) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = normalize_path(req.uri().path()).to_string();

    if let Some(rest) = path.strip_prefix("/api/airbnb") {
        if rest.is_empty() || rest.starts_with('/') {
            let rest = rest.to_string();
            return Ok(handle_api(req, app, &rest));
        }
    }

    let repo = &app.listings;

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(pages::home_page()),

        ("GET", "/viewData/price") => html_response(pages::price_search_page(&PriceSearchVm::default())),
        ("POST", "/viewData/price") => search_by_price(read_form(req)?, repo),

        ("GET", "/viewData") => {
            let first = repo.list_page(0, PAGE_SIZE)?;
            let total = repo.count()?;
            html_response(pages::view_data_page(&first, total))
        }
        ("GET", "/viewData/more") => {
            let start = parse_query(&req)
                .get("start")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let window: Vec<Listing> = repo
                .list_page(start, PAGE_SIZE)?
                .into_iter()
                .map(|mut l| {
                    l.price = Some(display_price(l.price.as_deref()));
                    l
                })
                .collect();
            json_response(200, &window)
        }

        ("GET", "/searchName") => html_response(pages::search_name_page(&SearchNameVm::default())),
        ("POST", "/searchName") => search_by_name(read_form(req)?, repo),

        ("GET", "/searchID") => html_response(pages::search_id_page(&SearchIdVm::default())),
        ("POST", "/searchID") => search_by_id(read_form(req)?, repo),
        ("GET", p) if p.starts_with("/searchID/") => {
            let id = decode_segment(&p["/searchID/".len()..])?;
            match repo.find_by_id(&id, Projection::Full)? {
                Some(listing) => html_response(pages::listing_detail_page(&listing)),
                None => html_status_response(
                    404,
                    pages::not_found_page(&format!("No property found with ID \"{id}\".")),
                ),
            }
        }

        ("GET", "/addAirbnb") => html_response(pages::add_listing_page(&ListingFormVm::default())),
        ("POST", "/addAirbnb") => add_listing(read_form(req)?, repo),

        ("GET", "/updateAirbnb") => {
            html_response(pages::update_listing_page(&ListingFormVm::default()))
        }
        ("POST", "/updateAirbnb") => update_listing(read_form(req)?, repo),

        ("GET", "/deleteAirbnb") => {
            html_response(pages::delete_listing_page(&ListingFormVm::default()))
        }
        ("POST", "/deleteAirbnb") => delete_listing(read_form(req)?, repo),

        ("GET", p) => static_file_response(&app.static_dir, p),

        _ => Err(ServerError::NotFound),
    }
}

// ---------- page flows ----------

fn search_by_price<R: ListingRepository>(form: Form, repo: &R) -> ResultResp {
    let min_price = form.value("minPrice");
    let max_price = form.value("maxPrice");

    let mut vm = PriceSearchVm {
        min_price,
        max_price,
        ..PriceSearchVm::default()
    };

    match validate_price_range(&vm.min_price, &vm.max_price) {
        Ok(range) => vm.results = Some(repo.find_by_price_range(range)?),
        Err(errors) => vm.errors = errors,
    }

    html_response(pages::price_search_page(&vm))
}

fn search_by_name<R: ListingRepository>(form: Form, repo: &R) -> ResultResp {
    let raw = form.value("name");

    let vm = match validate_name_query(&raw) {
        Ok(query) => SearchNameVm {
            results: Some(repo.search_by_name(&query)?),
            query: Some(query),
            ..SearchNameVm::default()
        },
        Err(errors) => SearchNameVm {
            query: raw,
            errors,
            ..SearchNameVm::default()
        },
    };

    html_response(pages::search_name_page(&vm))
}

fn search_by_id<R: ListingRepository>(form: Form, repo: &R) -> ResultResp {
    let raw = form.value("id");

    let vm = match validate_listing_id(&raw) {
        Ok(id) => match repo.find_by_id(&id, Projection::Summary)? {
            Some(listing) => SearchIdVm {
                id: Some(id),
                result: Some(listing),
                ..SearchIdVm::default()
            },
            None => SearchIdVm {
                message: Some(format!("No property found with ID \"{id}\".")),
                id: Some(id),
                ..SearchIdVm::default()
            },
        },
        Err(errors) => SearchIdVm {
            id: raw,
            errors,
            ..SearchIdVm::default()
        },
    };

    html_response(pages::search_id_page(&vm))
}

fn add_listing<R: ListingRepository>(form: Form, repo: &R) -> ResultResp {
    let input = form.listing_input();

    let vm = match validate_new_listing(&input) {
        Ok(listing) => {
            repo.insert(&listing)?;
            ListingFormVm::with_message("New Airbnb property added!")
        }
        Err(errors) => invalid_form(input, errors),
    };

    html_response(pages::add_listing_page(&vm))
}

fn update_listing<R: ListingRepository>(form: Form, repo: &R) -> ResultResp {
    let input = form.listing_input();

    let vm = match validate_patch(&input.id, &input, PatchScope::NameAndPrice) {
        Ok((id, patch)) => match repo.update(&id, &patch)? {
            Some(_) => ListingFormVm::with_message("Property updated successfully!"),
            None => ListingFormVm {
                values: input,
                message: Some("No property found to update.".to_string()),
                ..ListingFormVm::default()
            },
        },
        Err(errors) => invalid_form(input, errors),
    };

    html_response(pages::update_listing_page(&vm))
}

fn delete_listing<R: ListingRepository>(form: Form, repo: &R) -> ResultResp {
    let input = form.listing_input();

    let vm = match validate_listing_id(&input.id) {
        Ok(id) => match repo.delete(&id)? {
            Some(_) => ListingFormVm::with_message("Property deleted successfully!"),
            None => ListingFormVm {
                values: input,
                message: Some("No property found with that ID.".to_string()),
                ..ListingFormVm::default()
            },
        },
        Err(errors) => invalid_form(input, errors),
    };

    html_response(pages::delete_listing_page(&vm))
}

fn invalid_form(values: ListingInput, errors: Vec<FieldError>) -> ListingFormVm {
    ListingFormVm {
        values,
        errors,
        message: None,
    }
}

// ---------- JSON API ----------

fn handle_api<R: ListingRepository>(req: Request, app: &App<R>, rest: &str) -> Response {
    let method = req.method().as_str().to_string();
    let raw = rest.trim_start_matches('/');
    if raw.contains('/') {
        return json_error_response(ServerError::NotFound);
    }
    let id = match decode_segment(raw) {
        Ok(id) => id,
        Err(e) => return json_error_response(e),
    };
    let repo = &app.listings;

    let result = match (method.as_str(), id.as_str()) {
        ("GET", "") => repo
            .list_all(Projection::Full)
            .and_then(|all| json_response(200, &all)),
        ("POST", "") => api_create(req, repo),
        ("GET", id) => match repo.find_by_id(id, Projection::Full) {
            Ok(Some(listing)) => json_response(200, &listing),
            Ok(None) => Err(ServerError::NotFound),
            Err(e) => Err(e),
        },
        ("PUT", id) if !id.is_empty() => api_update(req, id, repo),
        ("DELETE", id) if !id.is_empty() => match repo.delete(id) {
            Ok(Some(_)) => json_response(200, &json!({ "message": "Deleted successfully" })),
            Ok(None) => Err(ServerError::NotFound),
            Err(e) => Err(e),
        },
        _ => Err(ServerError::NotFound),
    };

    result.unwrap_or_else(json_error_response)
}

fn api_create<R: ListingRepository>(req: Request, repo: &R) -> ResultResp {
    let input = match read_json(req)? {
        Ok(input) => input,
        Err(resp) => return Ok(resp),
    };

    match validate_new_listing(&input) {
        Ok(listing) => json_response(201, &repo.insert(&listing)?),
        Err(errors) => validation_failed(&errors),
    }
}

fn api_update<R: ListingRepository>(req: Request, id: &str, repo: &R) -> ResultResp {
    let input = match read_json(req)? {
        Ok(input) => input,
        Err(resp) => return Ok(resp),
    };

    let (id, patch) = match validate_patch(&Some(id.to_string()), &input, PatchScope::AllFields) {
        Ok(valid) => valid,
        Err(errors) => return validation_failed(&errors),
    };

    match repo.update(&id, &patch)? {
        Some(listing) => json_response(200, &listing),
        None => Err(ServerError::NotFound),
    }
}

fn validation_failed(errors: &[FieldError]) -> ResultResp {
    json_response(400, &json!({ "error": "Validation failed", "errors": errors }))
}

/// Decode a JSON listing body. A malformed body yields a ready 400 response.
fn read_json(req: Request) -> Result<Result<ListingInput, Response>, ServerError> {
    let bytes = read_body(req)?;
    match serde_json::from_slice::<ListingInput>(&bytes) {
        Ok(input) => Ok(Ok(input)),
        Err(e) => {
            tracing::debug!(error = %e, "rejecting JSON body");
            json_response(400, &json!({ "error": "Invalid JSON body" })).map(Err)
        }
    }
}

// ---------- request decoding ----------

/// Decoded `application/x-www-form-urlencoded` body.
struct Form(Vec<(String, String)>);

impl Form {
    fn value(&self, key: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn listing_input(&self) -> ListingInput {
        ListingInput::from_form(self.0.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

fn read_body(req: Request) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.into_body()
        .reader()
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Unreadable request body: {e}")))?;
    Ok(buf)
}

fn read_form(req: Request) -> Result<Form, ServerError> {
    let bytes = read_body(req)?;
    Ok(Form(
        url::form_urlencoded::parse(&bytes)
            .into_owned()
            .collect(),
    ))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Percent-decode one path segment. `+`, `&` and `=` are literal here.
fn decode_segment(segment: &str) -> Result<String, ServerError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|id| id.into_owned())
        .map_err(|e| ServerError::BadRequest(format!("Path segment is not UTF-8: {e}")))
}

/// `/viewData/` and `/viewData` are the same route.
fn normalize_path(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
