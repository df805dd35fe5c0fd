// 통합 테스트용 경매 API 목 서버 (임시 포트에 바인딩)
#![allow(dead_code)]

use auction_client::auction::model::{Listing, ListingDraft, Person, Profile, ProfileUpdate};
use auction_client::bidding::model::{Bid, PlaceBidRequest};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const MOCK_TOKEN: &str = "mock-token";
pub const MOCK_API_KEY: &str = "mock-api-key";

// region:    --- Mock State
/// 목 서버가 보관하는 데이터와 수신한 헤더 기록
#[derive(Default)]
pub struct MockState {
    pub listings: Vec<Listing>,
    pub profiles: HashMap<String, Profile>,
    pub seen_api_keys: Vec<Option<String>>,
    pub seen_tokens: Vec<Option<String>>,
}

pub type SharedState = Arc<Mutex<MockState>>;

pub struct MockServer {
    pub base_url: String,
    pub state: SharedState,
}

/// 기본 데이터와 함께 목 서버 시작
pub async fn spawn_mock() -> MockServer {
    let state: SharedState = Arc::new(Mutex::new(MockState::default()));
    {
        let mut s = state.lock().unwrap();
        for i in 1..=5 {
            s.listings.push(seed_listing(&format!("seed-{}", i), &format!("Vintage lamp {}", i)));
        }
        s.profiles.insert("kari".to_string(), seed_profile("kari"));
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    let app = router(Arc::clone(&state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server failed");
    });

    MockServer {
        base_url: format!("http://{}", addr),
        state,
    }
}

pub fn seed_listing(id: &str, title: &str) -> Listing {
    Listing {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(format!("{} in good condition", title)),
        tags: vec![],
        media: vec![],
        created: Some(Utc::now() - Duration::days(1)),
        updated: None,
        ends_at: Utc::now() + Duration::days(7),
        seller: Some(Person::named("ola")),
        bids: vec![],
        count: None,
    }
}

pub fn seed_profile(name: &str) -> Profile {
    Profile {
        name: name.to_string(),
        email: Some(format!("{}@stud.noroff.no", name)),
        bio: None,
        avatar: None,
        banner: None,
        credits: 1000,
        listings: vec![],
        wins: vec![],
    }
}
// endregion: --- Mock State

// region:    --- Router
fn router(state: SharedState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/create-api-key", post(create_api_key))
        .route("/auction/listings", get(list_listings).post(create_listing))
        .route("/auction/listings/search", get(search_listings))
        .route(
            "/auction/listings/:id",
            get(get_listing).put(update_listing).delete(delete_listing),
        )
        .route("/auction/listings/:id/bids", post(place_bid))
        .route("/auction/profiles/:name", get(get_profile).put(update_profile))
        .with_state(state)
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "errors": [{ "message": message }], "status": "Error", "statusCode": status.as_u16() })),
    )
        .into_response()
}

fn envelope(status: StatusCode, data: Value, meta: Value) -> Response {
    (status, Json(json!({ "data": data, "meta": meta }))).into_response()
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// 헤더 기록 후 Bearer 토큰 확인
fn record(state: &SharedState, headers: &HeaderMap) -> bool {
    let token = header(headers, "authorization");
    let mut s = state.lock().unwrap();
    s.seen_api_keys.push(header(headers, "x-noroff-api-key"));
    s.seen_tokens.push(token.clone());
    token.as_deref() == Some(&format!("Bearer {}", MOCK_TOKEN))
}
// endregion: --- Router

// region:    --- Auth Handlers
#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

async fn login(Json(body): Json<Credentials>) -> Response {
    if body.password != "secret123" {
        return error(StatusCode::UNAUTHORIZED, "Invalid email or password");
    }
    let name = body.email.split('@').next().unwrap_or_default();
    envelope(
        StatusCode::OK,
        json!({ "name": name, "email": body.email, "accessToken": MOCK_TOKEN }),
        json!({}),
    )
}

async fn register(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let mut s = state.lock().unwrap();
    if s.profiles.contains_key(&name) {
        return error(StatusCode::BAD_REQUEST, "Profile already exists");
    }
    let profile = seed_profile(&name);
    s.profiles.insert(name, profile.clone());
    envelope(StatusCode::CREATED, json!(profile), json!({}))
}

async fn create_api_key(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !record(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Missing authorization header");
    }
    let name = body["name"].as_str().unwrap_or("API Key").to_string();
    envelope(
        StatusCode::CREATED,
        json!({ "key": MOCK_API_KEY, "name": name }),
        json!({}),
    )
}
// endregion: --- Auth Handlers

// region:    --- Listing Handlers
#[derive(Deserialize)]
struct PageQuery {
    page: Option<usize>,
    limit: Option<usize>,
}

async fn list_listings(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    record(&state, &headers);
    let s = state.lock().unwrap();
    let limit = query.limit.unwrap_or(100).max(1);
    let page = query.page.unwrap_or(1).max(1);
    let total = s.listings.len();
    let page_count = total.div_ceil(limit).max(1);

    let items: Vec<&Listing> = s.listings.iter().skip((page - 1) * limit).take(limit).collect();
    envelope(
        StatusCode::OK,
        json!(items),
        json!({
            "isFirstPage": page == 1,
            "isLastPage": page >= page_count,
            "currentPage": page,
            "previousPage": if page > 1 { Some(page - 1) } else { None },
            "nextPage": if page < page_count { Some(page + 1) } else { None },
            "pageCount": page_count,
            "totalCount": total,
        }),
    )
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
}

async fn search_listings(State(state): State<SharedState>, Query(query): Query<SearchQuery>) -> Response {
    let needle = query.q.to_lowercase();
    let s = state.lock().unwrap();
    let found: Vec<&Listing> = s
        .listings
        .iter()
        .filter(|l| l.title.to_lowercase().contains(&needle))
        .collect();
    envelope(StatusCode::OK, json!(found), json!({}))
}

async fn get_listing(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let s = state.lock().unwrap();
    match s.listings.iter().find(|l| l.id == id) {
        Some(listing) => envelope(StatusCode::OK, json!(listing), json!({})),
        None => error(StatusCode::NOT_FOUND, "No listing with such ID"),
    }
}

async fn create_listing(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(draft): Json<ListingDraft>,
) -> Response {
    if !record(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Missing authorization header");
    }
    let listing = Listing {
        id: uuid::Uuid::new_v4().to_string(),
        title: draft.title,
        description: draft.description,
        tags: draft.tags,
        media: draft.media,
        created: Some(Utc::now()),
        updated: None,
        ends_at: draft.ends_at,
        seller: Some(Person::named("kari")),
        bids: vec![],
        count: None,
    };
    state.lock().unwrap().listings.push(listing.clone());
    envelope(StatusCode::CREATED, json!(listing), json!({}))
}

async fn update_listing(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(draft): Json<ListingDraft>,
) -> Response {
    if !record(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Missing authorization header");
    }
    let mut s = state.lock().unwrap();
    let Some(listing) = s.listings.iter_mut().find(|l| l.id == id) else {
        return error(StatusCode::NOT_FOUND, "No listing with such ID");
    };
    listing.title = draft.title;
    listing.description = draft.description;
    listing.media = draft.media;
    listing.ends_at = draft.ends_at;
    listing.updated = Some(Utc::now());
    envelope(StatusCode::OK, json!(listing), json!({}))
}

async fn delete_listing(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !record(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Missing authorization header");
    }
    let mut s = state.lock().unwrap();
    let before = s.listings.len();
    s.listings.retain(|l| l.id != id);
    if s.listings.len() == before {
        return error(StatusCode::NOT_FOUND, "No listing with such ID");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn place_bid(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<PlaceBidRequest>,
) -> Response {
    if !record(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Missing authorization header");
    }
    let mut s = state.lock().unwrap();
    let Some(listing) = s.listings.iter_mut().find(|l| l.id == id) else {
        return error(StatusCode::NOT_FOUND, "No listing with such ID");
    };
    if req.amount <= listing.current_bid() {
        return error(
            StatusCode::BAD_REQUEST,
            "Your bid must be higher than the current bid",
        );
    }
    listing.bids.push(Bid {
        id: Some(uuid::Uuid::new_v4().to_string()),
        amount: req.amount,
        created: Utc::now(),
        bidder: Person::named("kari"),
    });
    envelope(StatusCode::CREATED, json!(listing), json!({}))
}
// endregion: --- Listing Handlers

// region:    --- Profile Handlers
async fn get_profile(State(state): State<SharedState>, Path(name): Path<String>) -> Response {
    let s = state.lock().unwrap();
    let Some(profile) = s.profiles.get(&name) else {
        return error(StatusCode::NOT_FOUND, "No profile with this name");
    };
    let mut profile = profile.clone();
    profile.listings = s
        .listings
        .iter()
        .filter(|l| l.seller.as_ref().is_some_and(|p| p.name == name))
        .cloned()
        .collect();
    envelope(StatusCode::OK, json!(profile), json!({}))
}

async fn update_profile(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> Response {
    if !record(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Missing authorization header");
    }
    let mut s = state.lock().unwrap();
    let Some(profile) = s.profiles.get_mut(&name) else {
        return error(StatusCode::NOT_FOUND, "No profile with this name");
    };
    if let Some(bio) = update.bio {
        profile.bio = Some(bio);
    }
    if let Some(avatar) = update.avatar {
        profile.avatar = Some(avatar);
    }
    if let Some(banner) = update.banner {
        profile.banner = Some(banner);
    }
    envelope(StatusCode::OK, json!(profile), json!({}))
}
// endregion: --- Profile Handlers
