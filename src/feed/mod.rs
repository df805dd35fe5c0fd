/// 상품 목록 피드
/// 페이지 단위로 조회해서 카드 컨테이너에 순서대로 덧붙인다.
/// 마지막 페이지에 도달하면 Exhausted 상태가 되어 더 이상 조회하지 않는다.
// region:    --- Imports
use crate::api::AuctionApi;
use crate::error::ClientResult;
use crate::view::{render_card, ListingCard};
use tracing::{debug, error, info};
// endregion: --- Imports

/// 화면 하단까지 남은 거리(px)가 이 값 이하면 다음 페이지 조회
pub const SCROLL_THRESHOLD_PX: f64 = 50.0;

// region:    --- Feed State
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    Fetching,
    Exhausted,
}

/// 페이지 커서 (피드만 변경, 단조 증가)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u32,
    pub per_page: u32,
    pub is_last_page: bool,
}

/// 스크롤 위치
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPosition {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollPosition {
    pub fn near_bottom(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - SCROLL_THRESHOLD_PX
    }
}
// endregion: --- Feed State

// region:    --- Listing Feed
/// 조회 future 가 중간에 버려져도 Fetching 에 머물지 않도록 Idle 로 되돌린다
struct FetchGuard<'a>(&'a mut FeedState);

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if *self.0 == FeedState::Fetching {
            *self.0 = FeedState::Idle;
        }
    }
}

pub struct ListingFeed {
    cursor: PageCursor,
    state: FeedState,
    cards: Vec<ListingCard>,
}

impl ListingFeed {
    pub fn new(per_page: u32) -> Self {
        Self {
            cursor: PageCursor {
                page: 1,
                per_page: per_page.max(1),
                is_last_page: false,
            },
            state: FeedState::Idle,
            cards: Vec::new(),
        }
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// 지금까지 렌더링된 카드 (서버 순서 그대로, 중복 제거 없음)
    pub fn cards(&self) -> &[ListingCard] {
        &self.cards
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == FeedState::Exhausted
    }

    /// 스크롤 이벤트 처리. 하단 근처이고 조회 중이 아니며 남은 페이지가 있으면 다음 페이지 조회.
    /// 조회를 시작했으면 Some(추가된 카드 수) 반환.
    pub async fn on_scroll(
        &mut self,
        api: &dyn AuctionApi,
        position: ScrollPosition,
    ) -> Option<ClientResult<usize>> {
        if !position.near_bottom() || self.state != FeedState::Idle {
            return None;
        }
        Some(self.load_next(api).await)
    }

    /// 다음 페이지 조회. Idle 이 아니면 아무것도 하지 않는다.
    pub async fn load_next(&mut self, api: &dyn AuctionApi) -> ClientResult<usize> {
        if self.state != FeedState::Idle {
            debug!("{:<12} --> 조회 생략: state={:?}", "Feed", self.state);
            return Ok(0);
        }

        let page = self.cursor.page;
        let per_page = self.cursor.per_page;
        self.state = FeedState::Fetching;
        let guard = FetchGuard(&mut self.state);
        let result = api.listings(page, per_page).await;
        drop(guard);

        let page_data = match result {
            Ok(page_data) => page_data,
            Err(e) => {
                error!("{:<12} --> 페이지 {} 조회 실패: {}", "Feed", page, e);
                self.state = FeedState::Idle;
                return Err(e);
            }
        };

        let appended = page_data.items.len();
        self.cards.extend(page_data.items.iter().map(render_card));

        if appended > 0 {
            self.cursor.page += 1;
        }

        if page_data.meta.is_last_page || appended == 0 {
            info!("{:<12} --> 마지막 페이지 도달 (page={})", "Feed", page);
            self.cursor.is_last_page = true;
            self.state = FeedState::Exhausted;
        } else {
            self.state = FeedState::Idle;
        }

        info!(
            "{:<12} --> 페이지 {} 조회 완료: {}건 추가 (누적 {}건)",
            "Feed",
            page,
            appended,
            self.cards.len()
        );
        Ok(appended)
    }
}
// endregion: --- Listing Feed
