/// 로그인
pub const AUTH_LOGIN: &str = "/auth/login";

/// 회원가입
pub const AUTH_REGISTER: &str = "/auth/register";

/// API 키 발급
pub const AUTH_CREATE_API_KEY: &str = "/auth/create-api-key";

/// 경매 상품 목록 / 등록
pub const AUCTION_LISTINGS: &str = "/auction/listings";

/// 경매 상품 검색
pub const AUCTION_LISTINGS_SEARCH: &str = "/auction/listings/search";

/// 사용자 프로필
pub const AUCTION_PROFILES: &str = "/auction/profiles";

/// API 키 헤더
pub const API_KEY_HEADER: &str = "x-noroff-api-key";

/// 상품 단건 경로
pub fn listing(id: &str) -> String {
    format!("{}/{}", AUCTION_LISTINGS, encode_segment(id))
}

/// 상품 입찰 경로
pub fn listing_bids(id: &str) -> String {
    format!("{}/bids", listing(id))
}

/// 프로필 경로
pub fn profile(name: &str) -> String {
    format!("{}/{}", AUCTION_PROFILES, encode_segment(name))
}

fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
