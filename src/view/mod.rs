/// 화면 모델
/// 각 화면은 조회한 데이터와 세션 컨텍스트만으로 결정되는 순수 함수로 만든다.
// region:    --- Imports
use crate::auction::model::{Listing, Media};
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use chrono::{DateTime, Utc};
use url::Url;

pub mod terminal;
// endregion: --- Imports

pub const PLACEHOLDER_IMAGE_URL: &str = "https://img.freepik.com/free-vector/flat-design-no-photo-sign_23-2149272417.jpg?w=826";
pub const PLACEHOLDER_IMAGE_ALT: &str = "No image available";
pub const CARD_DESCRIPTION_MAX: usize = 100;

// region:    --- Sinks
/// 공용 에러 표시 싱크
pub trait ErrorSink {
    fn display_error(&self, message: &str);
}

/// 페이지 이동 싱크
pub trait Navigator {
    fn navigate(&self, to: &Location);
}
// endregion: --- Sinks

// region:    --- Location
/// 페이지 위치. 상품 관련 페이지는 `id` 쿼리 파라미터로 대상을 지정한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Home,
    Login,
    Register,
    Search,
    Listing(String),
    CreateListing,
    EditListing(String),
    Profile,
    EditProfile,
}

impl Location {
    pub fn href(&self) -> String {
        match self {
            Location::Home => "/index.html".to_string(),
            Location::Login => "/auth/login/index.html".to_string(),
            Location::Register => "/auth/register/index.html".to_string(),
            Location::Search => "/search/index.html".to_string(),
            Location::Listing(id) => format!("/listing/index.html?id={}", encode_query(id)),
            Location::CreateListing => "/listing/create/index.html".to_string(),
            Location::EditListing(id) => format!("/listing/edit/index.html?id={}", encode_query(id)),
            Location::Profile => "/profile/index.html".to_string(),
            Location::EditProfile => "/profile/edit/index.html".to_string(),
        }
    }
}

fn encode_query(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// 페이지 위치에서 상품 id 추출. 절대 URL, 상대 경로, 순수 id 모두 허용.
pub fn listing_id_from_location(location: &str) -> ClientResult<String> {
    let location = location.trim();
    if location.is_empty() {
        return Err(ClientError::InvalidLocation("empty location".to_string()));
    }
    if !location.contains('?') && !location.contains('/') {
        return Ok(location.to_string());
    }

    let base = Url::parse("http://localhost/").map_err(|e| ClientError::InvalidLocation(e.to_string()))?;
    let url = base
        .join(location)
        .map_err(|e| ClientError::InvalidLocation(format!("{}: {}", location, e)))?;

    url.query_pairs()
        .find(|(k, _)| k == "id")
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ClientError::InvalidLocation(location.to_string()))
}
// endregion: --- Location

// region:    --- Listing Card
/// 목록 / 검색 / 프로필에서 쓰는 상품 카드
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: Media,
    pub current_bid: f64,
    pub href: String,
}

pub fn render_card(listing: &Listing) -> ListingCard {
    let image = match listing.media.first() {
        Some(m) => Media::new(
            m.url.clone(),
            if m.alt.trim().is_empty() {
                listing.title.clone()
            } else {
                m.alt.clone()
            },
        ),
        None => Media::new(PLACEHOLDER_IMAGE_URL, listing.title.clone()),
    };

    ListingCard {
        id: listing.id.clone(),
        title: listing.title.clone(),
        description: truncate_text(
            listing.description.as_deref().unwrap_or("No description available."),
            CARD_DESCRIPTION_MAX,
        ),
        image,
        current_bid: listing.current_bid(),
        href: Location::Listing(listing.id.clone()).href(),
    }
}
// endregion: --- Listing Card

// region:    --- Carousel
/// 이미지 캐러셀 상태. 이미지가 2개 이상일 때만 이동 버튼을 보여준다.
#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    pub slides: Vec<Media>,
    pub index: usize,
}

impl Carousel {
    pub fn new(media: &[Media]) -> Self {
        let slides = if media.is_empty() {
            vec![Media::new(PLACEHOLDER_IMAGE_URL, PLACEHOLDER_IMAGE_ALT)]
        } else {
            media
                .iter()
                .map(|m| {
                    let alt = if m.alt.trim().is_empty() { "Image" } else { m.alt.as_str() };
                    Media::new(m.url.clone(), alt)
                })
                .collect()
        };
        Self { slides, index: 0 }
    }

    pub fn has_controls(&self) -> bool {
        self.slides.len() > 1
    }

    pub fn current(&self) -> &Media {
        &self.slides[self.index]
    }

    /// 양 끝에서 반대편으로 순환
    pub fn move_slide(&mut self, direction: i32) -> &Media {
        let len = self.slides.len() as i64;
        let next = (self.index as i64 + direction as i64).rem_euclid(len);
        self.index = next as usize;
        self.current()
    }

    /// 현재 슬라이드 기준 이동 오프셋(%)
    pub fn offset_percent(&self) -> i64 {
        -(self.index as i64 * 100)
    }
}
// endregion: --- Carousel

// region:    --- Navigation Chrome
/// 로그인 여부에 따른 헤더 링크 표시
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLinks {
    pub login: bool,
    pub register: bool,
    pub create_auction: bool,
    pub my_profile: bool,
    pub logout: bool,
}

pub fn nav_links(session: &Session) -> NavLinks {
    let signed_in = session.is_authenticated();
    NavLinks {
        login: !signed_in,
        register: !signed_in,
        create_auction: signed_in,
        my_profile: signed_in,
        logout: signed_in,
    }
}

/// 홈 배너 문구
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeBanner {
    pub body: String,
    pub link_text: String,
    pub link: Location,
}

pub fn home_banner(session: &Session) -> HomeBanner {
    if session.is_authenticated() {
        HomeBanner {
            body: "Search Through Thousands of Items and Uncover Hidden Treasures.".to_string(),
            link_text: "Search Here!".to_string(),
            link: Location::Search,
        }
    } else {
        HomeBanner {
            body: "Register now and receive 1000 credits to start bidding.".to_string(),
            link_text: "Register".to_string(),
            link: Location::Register,
        }
    }
}
// endregion: --- Navigation Chrome

// region:    --- Formatting
/// 금액 표시: 정수면 소수점 없이
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{:.2}", amount)
    }
}

pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%d. %B %Y %H:%M").to_string()
}

/// 남은 시간 표시
pub fn format_countdown(ends_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if now > ends_at {
        return "This auction has ended.".to_string();
    }
    let remaining = ends_at - now;
    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;

    if days > 0 {
        format!("Ends in {}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("Ends in {}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("Ends in {}m", minutes)
    } else {
        "Ends in less than a minute".to_string()
    }
}

pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let cut: String = text.chars().take(max_len).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
// endregion: --- Formatting
