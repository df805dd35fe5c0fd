/// 경매 상세 화면
/// 상품 하나를 입찰/판매자 정보와 함께 조회해서 화면 모델로 조립한다.
// region:    --- Imports
use crate::api::AuctionApi;
use crate::auction::model::Listing;
use crate::bidding::model::newest_first;
use crate::error::ClientResult;
use crate::session::Session;
use crate::view::{
    format_amount, format_countdown, format_date, listing_id_from_location, Carousel, Location,
};
use chrono::{DateTime, Utc};
use tracing::info;
// endregion: --- Imports

pub const BID_HEADING_LOGGED_OUT: &str = "Ready to bid?";
pub const BID_BODY_LOGGED_OUT: &str =
    "Log in now to make your offer. Place your bid and join the auction to compete for this item!";
pub const BID_HEADING_LOGGED_IN: &str = "Place your bid";
pub const BID_HEADING_ENDED: &str = "Bidding is closed";
pub const NO_BIDS_MESSAGE: &str = "No placed bids yet.";

// region:    --- Detail View Model
/// 입찰 영역 표시 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidSection {
    pub heading: String,
    pub body: Option<String>,
    pub show_form: bool,
    pub show_login_link: bool,
}

/// 입찰 이력 한 줄
#[derive(Debug, Clone, PartialEq)]
pub struct BidEntry {
    pub bidder: String,
    pub amount: f64,
    pub created: String,
}

/// 판매자 본인에게만 보이는 수정/삭제 버튼
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerControls {
    pub edit: Location,
    pub delete_listing_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuctionDetailView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub carousel: Carousel,
    pub seller: Option<String>,
    pub current_bid: f64,
    pub current_bid_label: String,
    pub ends_at: String,
    pub countdown: String,
    pub has_ended: bool,
    /// 로그인한 경우에만 Some
    pub bids: Option<Vec<BidEntry>>,
    pub owner_controls: Option<OwnerControls>,
    pub bid_section: BidSection,
}

impl AuctionDetailView {
    /// 로그인 상태이고 입찰이 없을 때 보여줄 안내 문구
    pub fn empty_bids_message(&self) -> Option<&'static str> {
        match &self.bids {
            Some(bids) if bids.is_empty() => Some(NO_BIDS_MESSAGE),
            _ => None,
        }
    }
}
// endregion: --- Detail View Model

// region:    --- Render
pub fn render_bid_section(session: &Session, has_ended: bool) -> BidSection {
    if !session.is_authenticated() {
        return BidSection {
            heading: BID_HEADING_LOGGED_OUT.to_string(),
            body: Some(BID_BODY_LOGGED_OUT.to_string()),
            show_form: false,
            show_login_link: true,
        };
    }

    if has_ended {
        return BidSection {
            heading: BID_HEADING_ENDED.to_string(),
            body: Some("This auction has ended.".to_string()),
            show_form: false,
            show_login_link: false,
        };
    }

    BidSection {
        heading: BID_HEADING_LOGGED_IN.to_string(),
        body: None,
        show_form: true,
        show_login_link: false,
    }
}

/// 상품 + 세션 + 현재 시각으로 상세 화면 구성
pub fn render_detail(listing: &Listing, session: &Session, now: DateTime<Utc>) -> AuctionDetailView {
    let has_ended = listing.has_ended_at(now);
    let current_bid = listing.current_bid();

    let bids = session.is_authenticated().then(|| {
        newest_first(&listing.bids)
            .into_iter()
            .map(|b| BidEntry {
                bidder: b.bidder.name,
                amount: b.amount,
                created: format_date(b.created),
            })
            .collect()
    });

    let owner_controls = listing
        .seller_name()
        .filter(|seller| session.is_owner(seller))
        .map(|_| OwnerControls {
            edit: Location::EditListing(listing.id.clone()),
            delete_listing_id: listing.id.clone(),
        });

    AuctionDetailView {
        id: listing.id.clone(),
        title: listing.title.clone(),
        description: listing.description.clone().unwrap_or_default(),
        carousel: Carousel::new(&listing.media),
        seller: listing.seller_name().map(str::to_string),
        current_bid,
        current_bid_label: format_amount(current_bid),
        ends_at: format_date(listing.ends_at),
        countdown: format_countdown(listing.ends_at, now),
        has_ended,
        bids,
        owner_controls,
        bid_section: render_bid_section(session, has_ended),
    }
}
// endregion: --- Render

// region:    --- Load
/// 페이지 위치의 `id` 로 상품을 조회해서 상세 화면 구성
pub async fn load_detail(
    api: &dyn AuctionApi,
    session: &Session,
    location: &str,
) -> ClientResult<AuctionDetailView> {
    let id = listing_id_from_location(location)?;
    info!("{:<12} --> 상세 화면 로드 id: {}", "Detail", id);
    let listing = api.listing(&id).await?;
    Ok(render_detail(&listing, session, Utc::now()))
}
// endregion: --- Load
