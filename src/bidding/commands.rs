/// 입찰 관련 커맨드 처리
/// 입력값 검증은 로컬에서, 금액 비교 검증은 서버에서 한다.
// region:    --- Imports
use crate::api::AuctionApi;
use crate::detail::{render_detail, AuctionDetailView};
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::view::listing_id_from_location;
use chrono::Utc;
use tracing::{info, warn};
// endregion: --- Imports

pub const INVALID_BID_MESSAGE: &str = "Please enter a valid bid amount greater than 0.";

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceBidCommand {
    pub listing_id: String,
    pub amount: f64,
}

impl PlaceBidCommand {
    /// 페이지 위치와 입력 필드 값으로 명령 생성 (요청 전 검증)
    pub fn from_form(location: &str, raw_amount: &str) -> ClientResult<Self> {
        let listing_id = listing_id_from_location(location)?;
        let amount = parse_bid_amount(raw_amount)?;
        Ok(Self { listing_id, amount })
    }
}

/// 유한한 양수만 허용
pub fn parse_bid_amount(raw: &str) -> ClientResult<f64> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ClientError::Validation(INVALID_BID_MESSAGE.to_string()))?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(ClientError::Validation(INVALID_BID_MESSAGE.to_string()));
    }
    Ok(amount)
}

/// 입찰 후 상세 화면 다시 로드
pub async fn handle_place_bid(
    cmd: PlaceBidCommand,
    api: &dyn AuctionApi,
    session: &Session,
) -> ClientResult<AuctionDetailView> {
    session.require_token()?;
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd);

    if let Err(e) = api.place_bid(&cmd.listing_id, cmd.amount).await {
        warn!("{:<12} --> 입찰 실패: {}", "Command", e);
        return Err(e);
    }
    info!("{:<12} --> 입찰 성공, 상세 화면 갱신", "Command");

    let listing = api.listing(&cmd.listing_id).await?;
    Ok(render_detail(&listing, session, Utc::now()))
}
// endregion: --- Commands
