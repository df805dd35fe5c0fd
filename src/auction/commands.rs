/// 경매 상품 관련 커맨드 처리
/// 1. 등록
/// 2. 수정
/// 3. 삭제
// region:    --- Imports
use crate::api::AuctionApi;
use crate::auction::model::{Listing, ListingDraft, Media};
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::view::{Location, Navigator};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{error, info};
// endregion: --- Imports

pub const MAX_IMAGES: usize = 3;

// region:    --- Listing Form
/// 상품 등록/수정 폼 입력값
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub deadline: String,
    pub tags: Vec<String>,
}

impl ListingForm {
    /// 수정 화면에 기존 값 채우기
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            title: listing.title.clone(),
            description: listing.description.clone().unwrap_or_default(),
            images: listing
                .media
                .iter()
                .take(MAX_IMAGES)
                .map(|m| m.url.clone())
                .collect(),
            deadline: listing.ends_at.to_rfc3339(),
            tags: listing.tags.clone(),
        }
    }

    /// 입력값 검증 후 요청 본문 생성
    pub fn into_draft(self, now: DateTime<Utc>) -> ClientResult<ListingDraft> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ClientError::Validation("Title is required.".to_string()));
        }

        let images: Vec<String> = self
            .images
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
        if images.len() > MAX_IMAGES {
            return Err(ClientError::Validation(format!(
                "A listing can have at most {} images.",
                MAX_IMAGES
            )));
        }
        let media = images
            .into_iter()
            .enumerate()
            .map(|(i, url)| Media::new(url, format!("Auction Image {}", i + 1)))
            .collect();

        let ends_at = parse_deadline(&self.deadline)?;
        if ends_at <= now {
            return Err(ClientError::Validation(
                "The deadline must be in the future.".to_string(),
            ));
        }

        let description = self.description.trim();
        Ok(ListingDraft {
            title,
            description: (!description.is_empty()).then(|| description.to_string()),
            tags: self
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            media,
            ends_at,
        })
    }
}

/// `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM`, RFC 3339 허용 (시간대 없으면 UTC)
pub fn parse_deadline(raw: &str) -> ClientResult<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ClientError::Validation("A deadline is required.".to_string()));
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(at.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(at) = date.and_hms_opt(0, 0, 0) {
            return Ok(at.and_utc());
        }
    }
    Err(ClientError::Validation(format!("Invalid deadline: {}", raw)))
}
// endregion: --- Listing Form

// region:    --- Commands
/// 1. 등록
pub async fn handle_create_listing(
    form: ListingForm,
    api: &dyn AuctionApi,
    session: &Session,
    navigator: &dyn Navigator,
) -> ClientResult<Listing> {
    session.require_token()?;
    let draft = form.into_draft(Utc::now())?;
    info!("{:<12} --> 상품 등록 처리 시작: {}", "Command", draft.title);

    let listing = api.create_listing(&draft).await.map_err(|e| {
        error!("{:<12} --> 상품 등록 실패: {}", "Command", e);
        e
    })?;
    info!("{:<12} --> 상품 등록 성공 id: {}", "Command", listing.id);
    navigator.navigate(&Location::Home);
    Ok(listing)
}

/// 2. 수정
pub async fn handle_update_listing(
    id: &str,
    form: ListingForm,
    api: &dyn AuctionApi,
    session: &Session,
    navigator: &dyn Navigator,
) -> ClientResult<Listing> {
    session.require_token()?;
    let draft = form.into_draft(Utc::now())?;
    info!("{:<12} --> 상품 수정 처리 시작 id: {}", "Command", id);

    let listing = api.update_listing(id, &draft).await.map_err(|e| {
        error!("{:<12} --> 상품 수정 실패: {}", "Command", e);
        e
    })?;
    navigator.navigate(&Location::Listing(listing.id.clone()));
    Ok(listing)
}

/// 3. 삭제
pub async fn handle_delete_listing(
    id: &str,
    api: &dyn AuctionApi,
    session: &Session,
    navigator: &dyn Navigator,
) -> ClientResult<()> {
    session.require_token()?;
    info!("{:<12} --> 상품 삭제 처리 시작 id: {}", "Command", id);

    api.delete_listing(id).await.map_err(|e| {
        error!("{:<12} --> 상품 삭제 실패: {}", "Command", e);
        e
    })?;
    navigator.navigate(&Location::Home);
    Ok(())
}
// endregion: --- Commands
