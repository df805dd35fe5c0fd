/// 상품 검색
/// 입력이 멈춘 뒤 일정 시간(기본 300ms)이 지나야 요청한다. 새 입력은 대기 중인 요청을 취소한다.
// region:    --- Imports
use crate::api::AuctionApi;
use crate::auction::model::Listing;
use crate::error::ClientResult;
use crate::view::{render_card, ListingCard};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
// endregion: --- Imports

pub const NO_RESULTS_MESSAGE: &str = "No listings found.";

// region:    --- Search Results
/// 검색 결과 컨테이너 상태 (응답마다 전체 교체)
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    Cleared,
    Results {
        heading: String,
        cards: Vec<ListingCard>,
    },
    Failed(String),
}

impl SearchResults {
    pub fn no_results_message(&self) -> Option<&'static str> {
        match self {
            SearchResults::Results { cards, .. } if cards.is_empty() => Some(NO_RESULTS_MESSAGE),
            _ => None,
        }
    }
}

pub fn render_results(query: &str, listings: &[Listing]) -> SearchResults {
    SearchResults::Results {
        heading: format!("Search results for \"{}\":", query),
        cards: listings.iter().map(render_card).collect(),
    }
}

/// 단건 검색. 빈 검색어는 요청 없이 결과를 비운다.
pub async fn search(api: &dyn AuctionApi, input: &str) -> ClientResult<SearchResults> {
    let query = input.trim();
    if query.is_empty() {
        debug!("{:<12} --> 빈 검색어, 결과 초기화", "Search");
        return Ok(SearchResults::Cleared);
    }
    let listings = api.search(query).await?;
    info!("{:<12} --> 검색 완료 q={} {}건", "Search", query, listings.len());
    Ok(render_results(query, &listings))
}
// endregion: --- Search Results

// region:    --- Debounced Search
/// 입력 이벤트마다 호출되는 디바운스 검색 컨트롤러
pub struct SearchController {
    api: Arc<dyn AuctionApi>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    results: mpsc::UnboundedSender<SearchResults>,
}

impl SearchController {
    /// 결과는 반환된 채널로 전달된다
    pub fn new(
        api: Arc<dyn AuctionApi>,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SearchResults>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                api,
                delay,
                pending: None,
                results: tx,
            },
            rx,
        )
    }

    /// 입력 변경. 대기 중인 타이머를 취소하고 새로 예약한다.
    pub fn on_input(&mut self, input: &str) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let query = input.trim().to_string();
        if query.is_empty() {
            let _ = self.results.send(SearchResults::Cleared);
            return;
        }

        let api = Arc::clone(&self.api);
        let tx = self.results.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let update = match search(api.as_ref(), &query).await {
                Ok(results) => results,
                Err(e) => {
                    error!("{:<12} --> 검색 실패: {}", "Search", e);
                    SearchResults::Failed(format!("Error: {}", e))
                }
            };
            let _ = tx.send(update);
        }));
    }

    /// 대기 중인 검색이 있는지
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// 대기 중인 검색이 끝날 때까지 기다린다. 결과는 채널에 남는다.
    pub async fn finish(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Err(e) = handle.await {
                debug!("{:<12} --> 검색 작업 종료: {}", "Search", e);
            }
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
// endregion: --- Debounced Search
