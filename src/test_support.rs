// 단위 테스트 공용 가짜 구현
use crate::api::AuctionApi;
use crate::auction::model::{
    Listing, ListingDraft, Page, PageMeta, Person, Profile, ProfileUpdate,
};
use crate::auth::model::{AuthData, LoginRequest, RegisterRequest};
use crate::bidding::model::Bid;
use crate::error::{ClientError, ClientResult};
use crate::view::{Location, Navigator};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::StatusCode;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub(crate) fn listing(id: &str) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Listing {}", id),
        description: Some("Test listing".to_string()),
        tags: vec![],
        media: vec![],
        created: None,
        updated: None,
        ends_at: Utc.with_ymd_and_hms(2031, 1, 1, 0, 0, 0).unwrap(),
        seller: None,
        bids: vec![],
        count: None,
    }
}

pub(crate) fn listing_by(id: &str, seller: &str) -> Listing {
    Listing {
        seller: Some(Person::named(seller)),
        ..listing(id)
    }
}

pub(crate) fn bid(amount: f64, created: DateTime<Utc>, bidder: &str) -> Bid {
    Bid {
        id: None,
        amount,
        created,
        bidder: Person::named(bidder),
    }
}

pub(crate) fn profile(name: &str) -> Profile {
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

fn not_found(what: &str) -> ClientError {
    ClientError::Request {
        status: StatusCode::NOT_FOUND,
        message: format!("No {} with such ID", what),
    }
}

// 요청을 기록하는 가짜 API
#[derive(Default)]
pub(crate) struct FakeApi {
    pages: Mutex<VecDeque<Page<Listing>>>,
    listings: Mutex<HashMap<String, Listing>>,
    profiles: Mutex<HashMap<String, Profile>>,
    search_results: Vec<Listing>,
    fail_listings: bool,
    bid_rejection: Option<String>,
    login_rejection: Option<String>,
    listings_delay: Option<Duration>,
    calls: AtomicUsize,
    requested_pages: Mutex<Vec<(u32, u32)>>,
    search_queries: Mutex<Vec<String>>,
    placed_bids: Mutex<Vec<(String, f64)>>,
}

impl FakeApi {
    pub(crate) fn with_page(mut self, items: Vec<Listing>, meta: PageMeta) -> Self {
        self.pages
            .get_mut()
            .unwrap()
            .push_back(Page { items, meta });
        self
    }

    pub(crate) fn with_listing(mut self, listing: Listing) -> Self {
        self.listings
            .get_mut()
            .unwrap()
            .insert(listing.id.clone(), listing);
        self
    }

    pub(crate) fn with_profile(mut self, profile: Profile) -> Self {
        self.profiles
            .get_mut()
            .unwrap()
            .insert(profile.name.clone(), profile);
        self
    }

    pub(crate) fn with_search_results(mut self, results: Vec<Listing>) -> Self {
        self.search_results = results;
        self
    }

    pub(crate) fn failing_listings(mut self) -> Self {
        self.fail_listings = true;
        self
    }

    pub(crate) fn rejecting_bids(mut self, message: &str) -> Self {
        self.bid_rejection = Some(message.to_string());
        self
    }

    pub(crate) fn rejecting_login(mut self, message: &str) -> Self {
        self.login_rejection = Some(message.to_string());
        self
    }

    pub(crate) fn with_listings_delay(mut self, delay: Duration) -> Self {
        self.listings_delay = Some(delay);
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requested_pages(&self) -> Vec<(u32, u32)> {
        self.requested_pages.lock().unwrap().clone()
    }

    pub(crate) fn search_queries(&self) -> Vec<String> {
        self.search_queries.lock().unwrap().clone()
    }

    pub(crate) fn placed_bids(&self) -> Vec<(String, f64)> {
        self.placed_bids.lock().unwrap().clone()
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuctionApi for FakeApi {
    async fn login(&self, req: &LoginRequest) -> ClientResult<AuthData> {
        self.hit();
        if let Some(message) = &self.login_rejection {
            return Err(ClientError::Request {
                status: StatusCode::UNAUTHORIZED,
                message: message.clone(),
            });
        }
        let name = req.email.split('@').next().unwrap_or_default().to_string();
        Ok(AuthData {
            access_token: format!("token-{}", name),
            email: Some(req.email.clone()),
            name,
        })
    }

    async fn register(&self, req: &RegisterRequest) -> ClientResult<Profile> {
        self.hit();
        let mut p = profile(&req.name);
        p.avatar = req.avatar.clone();
        p.banner = req.banner.clone();
        p.bio = req.bio.clone();
        Ok(p)
    }

    async fn create_api_key(&self, _name: Option<&str>) -> ClientResult<String> {
        self.hit();
        Ok("fake-key".to_string())
    }

    async fn listings(&self, page: u32, limit: u32) -> ClientResult<Page<Listing>> {
        self.hit();
        self.requested_pages.lock().unwrap().push((page, limit));
        if let Some(delay) = self.listings_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_listings {
            return Err(ClientError::Request {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Server error".to_string(),
            });
        }
        Ok(self.pages.lock().unwrap().pop_front().unwrap_or(Page {
            items: vec![],
            meta: PageMeta {
                is_last_page: true,
                ..PageMeta::default()
            },
        }))
    }

    async fn listing(&self, id: &str) -> ClientResult<Listing> {
        self.hit();
        self.listings
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("listing"))
    }

    async fn create_listing(&self, draft: &ListingDraft) -> ClientResult<Listing> {
        self.hit();
        let mut listings = self.listings.lock().unwrap();
        let id = format!("fake-{}", listings.len() + 1);
        let listing = Listing {
            id: id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            tags: draft.tags.clone(),
            media: draft.media.clone(),
            ends_at: draft.ends_at,
            ..listing(&id)
        };
        listings.insert(id, listing.clone());
        Ok(listing)
    }

    async fn update_listing(&self, id: &str, draft: &ListingDraft) -> ClientResult<Listing> {
        self.hit();
        let mut listings = self.listings.lock().unwrap();
        let listing = listings.get_mut(id).ok_or_else(|| not_found("listing"))?;
        listing.title = draft.title.clone();
        listing.description = draft.description.clone();
        listing.media = draft.media.clone();
        listing.ends_at = draft.ends_at;
        Ok(listing.clone())
    }

    async fn delete_listing(&self, id: &str) -> ClientResult<()> {
        self.hit();
        self.listings
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found("listing"))
    }

    async fn place_bid(&self, id: &str, amount: f64) -> ClientResult<Listing> {
        self.hit();
        if let Some(message) = &self.bid_rejection {
            return Err(ClientError::Request {
                status: StatusCode::BAD_REQUEST,
                message: message.clone(),
            });
        }
        let mut listings = self.listings.lock().unwrap();
        let listing = listings.get_mut(id).ok_or_else(|| not_found("listing"))?;
        listing.bids.push(bid(amount, Utc::now(), "bidder"));
        self.placed_bids.lock().unwrap().push((id.to_string(), amount));
        Ok(listing.clone())
    }

    async fn search(&self, query: &str) -> ClientResult<Vec<Listing>> {
        self.hit();
        self.search_queries.lock().unwrap().push(query.to_string());
        Ok(self.search_results.clone())
    }

    async fn profile(&self, name: &str) -> ClientResult<Profile> {
        self.hit();
        self.profiles
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| not_found("profile"))
    }

    async fn update_profile(&self, name: &str, update: &ProfileUpdate) -> ClientResult<Profile> {
        self.hit();
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles.get_mut(name).ok_or_else(|| not_found("profile"))?;
        if let Some(bio) = &update.bio {
            profile.bio = Some(bio.clone());
        }
        if let Some(avatar) = &update.avatar {
            profile.avatar = Some(avatar.clone());
        }
        if let Some(banner) = &update.banner {
            profile.banner = Some(banner.clone());
        }
        Ok(profile.clone())
    }
}

// 이동 기록용 네비게이터
#[derive(Default)]
pub(crate) struct RecordingNavigator {
    visited: Mutex<Vec<Location>>,
}

impl RecordingNavigator {
    pub(crate) fn visited(&self) -> Vec<Location> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, to: &Location) {
        self.visited.lock().unwrap().push(to.clone());
    }
}
