use crate::auction::model::Person;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 입찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub amount: f64,
    pub created: DateTime<Utc>,
    pub bidder: Person,
}

// 입찰 요청 본문
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceBidRequest {
    pub amount: f64,
}

/// 입찰 목록 중 최고 금액 (배열 순서와 무관)
pub fn highest_bid(bids: &[Bid]) -> Option<&Bid> {
    bids.iter().max_by(|a, b| a.amount.total_cmp(&b.amount))
}

/// 표시용 정렬: 최신 입찰 먼저
pub fn newest_first(bids: &[Bid]) -> Vec<Bid> {
    let mut sorted = bids.to_vec();
    sorted.sort_by(|a, b| b.created.cmp(&a.created));
    sorted
}
