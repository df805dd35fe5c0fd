/// 경매 REST API 클라이언트
/// 모든 요청에 JSON Content-Type, 설정된 경우 API 키, 세션이 있으면 Bearer 토큰을 붙인다.
// region:    --- Imports
use crate::auction::model::{Envelope, Listing, ListingDraft, Page, Profile, ProfileUpdate};
use crate::auth::model::{ApiKeyData, ApiKeyRequest, AuthData, LoginRequest, RegisterRequest};
use crate::bidding::model::PlaceBidRequest;
use crate::config::Config;
use crate::error::{message_from_body, ClientError, ClientResult};
use crate::session::Session;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

pub mod endpoints;
// endregion: --- Imports

// region:    --- Auction Api Trait
/// 경매 API 트레이트. 화면 로직은 구현체가 아닌 이 트레이트에 의존한다.
#[async_trait]
pub trait AuctionApi: Send + Sync {
    async fn login(&self, req: &LoginRequest) -> ClientResult<AuthData>;
    async fn register(&self, req: &RegisterRequest) -> ClientResult<Profile>;
    async fn create_api_key(&self, name: Option<&str>) -> ClientResult<String>;
    async fn listings(&self, page: u32, limit: u32) -> ClientResult<Page<Listing>>;
    async fn listing(&self, id: &str) -> ClientResult<Listing>;
    async fn create_listing(&self, draft: &ListingDraft) -> ClientResult<Listing>;
    async fn update_listing(&self, id: &str, draft: &ListingDraft) -> ClientResult<Listing>;
    async fn delete_listing(&self, id: &str) -> ClientResult<()>;
    async fn place_bid(&self, id: &str, amount: f64) -> ClientResult<Listing>;
    async fn search(&self, query: &str) -> ClientResult<Vec<Listing>>;
    async fn profile(&self, name: &str) -> ClientResult<Profile>;
    async fn update_profile(&self, name: &str, update: &ProfileUpdate) -> ClientResult<Profile>;
}
// endregion: --- Auction Api Trait

// region:    --- Api Client
/// reqwest 기반 API 클라이언트
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> ClientResult<Self> {
        let http = Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            token: None,
        })
    }

    /// 세션 컨텍스트 주입 (토큰이 있으면 이후 요청에 사용)
    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = session.token.clone().filter(|t| !t.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 요청 헤더 구성
    pub fn headers(&self) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| ClientError::Validation("API key contains invalid characters".into()))?;
            headers.insert(endpoints::API_KEY_HEADER, value);
        }

        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::Validation("Session token contains invalid characters".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ClientError::Validation(format!("Invalid API URL: {}", e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// 요청 전송 후 상태 코드 검사. 실패 시 서버 에러 메시지를 추출한다.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> ClientResult<reqwest::Response> {
        let url = self.url(path, query)?;
        debug!("{:<12} --> {} {}", "Api", method, url);

        let mut request = self.http.request(method.clone(), url).headers(self.headers()?);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let message = message_from_body(&bytes);
        warn!(
            "{:<12} --> 요청 실패: {} {} status={} message={}",
            "Api", method, path, status, message
        );
        Err(ClientError::Request { status, message })
    }

    /// `{ data, meta }` 봉투를 풀어서 반환
    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> ClientResult<Envelope<T>> {
        let response = self.execute(method, path, query, body).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice::<Envelope<T>>(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> ClientResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl AuctionApi for ApiClient {
    async fn login(&self, req: &LoginRequest) -> ClientResult<AuthData> {
        info!("{:<12} --> 로그인 요청: {}", "Api", req.email);
        let envelope = self
            .fetch::<AuthData>(Method::POST, endpoints::AUTH_LOGIN, &[], Some(to_body(req)?))
            .await?;
        Ok(envelope.data)
    }

    async fn register(&self, req: &RegisterRequest) -> ClientResult<Profile> {
        info!("{:<12} --> 회원가입 요청: {}", "Api", req.name);
        let envelope = self
            .fetch::<Profile>(Method::POST, endpoints::AUTH_REGISTER, &[], Some(to_body(req)?))
            .await?;
        Ok(envelope.data)
    }

    async fn create_api_key(&self, name: Option<&str>) -> ClientResult<String> {
        if self.token.is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        info!("{:<12} --> API 키 발급 요청", "Api");
        let req = ApiKeyRequest {
            name: name.map(str::to_string),
        };
        let envelope = self
            .fetch::<ApiKeyData>(
                Method::POST,
                endpoints::AUTH_CREATE_API_KEY,
                &[],
                Some(to_body(&req)?),
            )
            .await?;
        Ok(envelope.data.key)
    }

    async fn listings(&self, page: u32, limit: u32) -> ClientResult<Page<Listing>> {
        info!("{:<12} --> 상품 목록 조회 page={} limit={}", "Api", page, limit);
        let page = page.to_string();
        let limit = limit.to_string();
        let envelope = self
            .fetch::<Vec<Listing>>(
                Method::GET,
                endpoints::AUCTION_LISTINGS,
                &[
                    ("_bids", "true"),
                    ("_seller", "true"),
                    ("limit", &limit),
                    ("page", &page),
                ],
                None,
            )
            .await?;
        Ok(Page {
            items: envelope.data,
            meta: envelope.meta,
        })
    }

    async fn listing(&self, id: &str) -> ClientResult<Listing> {
        info!("{:<12} --> 상품 조회 id: {}", "Api", id);
        let envelope = self
            .fetch::<Listing>(
                Method::GET,
                &endpoints::listing(id),
                &[("_bids", "true"), ("_seller", "true")],
                None,
            )
            .await?;
        Ok(envelope.data)
    }

    async fn create_listing(&self, draft: &ListingDraft) -> ClientResult<Listing> {
        info!("{:<12} --> 상품 등록 요청: {}", "Api", draft.title);
        let envelope = self
            .fetch::<Listing>(
                Method::POST,
                endpoints::AUCTION_LISTINGS,
                &[],
                Some(to_body(draft)?),
            )
            .await?;
        Ok(envelope.data)
    }

    async fn update_listing(&self, id: &str, draft: &ListingDraft) -> ClientResult<Listing> {
        info!("{:<12} --> 상품 수정 요청 id: {}", "Api", id);
        let envelope = self
            .fetch::<Listing>(Method::PUT, &endpoints::listing(id), &[], Some(to_body(draft)?))
            .await?;
        Ok(envelope.data)
    }

    async fn delete_listing(&self, id: &str) -> ClientResult<()> {
        info!("{:<12} --> 상품 삭제 요청 id: {}", "Api", id);
        let response = self
            .execute(Method::DELETE, &endpoints::listing(id), &[], None)
            .await?;
        if response.status() != StatusCode::NO_CONTENT {
            return Err(ClientError::Request {
                status: response.status(),
                message: "Failed to delete listing.".to_string(),
            });
        }
        Ok(())
    }

    async fn place_bid(&self, id: &str, amount: f64) -> ClientResult<Listing> {
        info!("{:<12} --> 입찰 요청 id: {} amount: {}", "Api", id, amount);
        let envelope = self
            .fetch::<Listing>(
                Method::POST,
                &endpoints::listing_bids(id),
                &[],
                Some(to_body(&PlaceBidRequest { amount })?),
            )
            .await?;
        Ok(envelope.data)
    }

    async fn search(&self, query: &str) -> ClientResult<Vec<Listing>> {
        info!("{:<12} --> 상품 검색: {}", "Api", query);
        let envelope = self
            .fetch::<Vec<Listing>>(
                Method::GET,
                endpoints::AUCTION_LISTINGS_SEARCH,
                &[("q", query)],
                None,
            )
            .await?;
        Ok(envelope.data)
    }

    async fn profile(&self, name: &str) -> ClientResult<Profile> {
        info!("{:<12} --> 프로필 조회: {}", "Api", name);
        let envelope = self
            .fetch::<Profile>(
                Method::GET,
                &endpoints::profile(name),
                &[("_listings", "true")],
                None,
            )
            .await?;
        Ok(envelope.data)
    }

    async fn update_profile(&self, name: &str, update: &ProfileUpdate) -> ClientResult<Profile> {
        info!("{:<12} --> 프로필 수정 요청: {}", "Api", name);
        let envelope = self
            .fetch::<Profile>(Method::PUT, &endpoints::profile(name), &[], Some(to_body(update)?))
            .await?;
        Ok(envelope.data)
    }
}
// endregion: --- Api Client
