use crate::bidding::model::{highest_bid, Bid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 이미지 모델
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

impl Media {
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
        }
    }
}

// 판매자 / 입찰자
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Media>,
}

impl Person {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCount {
    #[serde(default)]
    pub bids: u32,
}

// 경매 상품 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    pub ends_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<Person>,
    #[serde(default)]
    pub bids: Vec<Bid>,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<ListingCount>,
}

impl Listing {
    pub fn has_ended_at(&self, now: DateTime<Utc>) -> bool {
        now > self.ends_at
    }

    /// 현재 입찰가: 최고 금액, 입찰이 없으면 0
    pub fn current_bid(&self) -> f64 {
        highest_bid(&self.bids).map(|b| b.amount).unwrap_or(0.0)
    }

    pub fn seller_name(&self) -> Option<&str> {
        self.seller.as_ref().map(|s| s.name.as_str())
    }
}

// 사용자 프로필 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<Media>,
    #[serde(default)]
    pub banner: Option<Media>,
    #[serde(default)]
    pub credits: i64,
    #[serde(default)]
    pub listings: Vec<Listing>,
    #[serde(default)]
    pub wins: Vec<Listing>,
}

// 페이지 정보 (서버 응답 meta)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub current_page: u32,
    pub previous_page: Option<u32>,
    pub next_page: Option<u32>,
    pub page_count: u32,
    pub total_count: u32,
}

// 공통 응답 봉투 `{ data, meta }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: PageMeta,
}

/// 페이지 단위 조회 결과
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

// 상품 등록 / 수정 요청
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<Media>,
    pub ends_at: DateTime<Utc>,
}

// 프로필 수정 요청
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Media>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.bio.is_none() && self.avatar.is_none() && self.banner.is_none()
    }
}
