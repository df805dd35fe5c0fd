// region:    --- Imports
use reqwest::StatusCode;
use serde::Deserialize;
// endregion: --- Imports

// region:    --- Client Error
/// 클라이언트 전체에서 사용하는 에러
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// 네트워크 전송 실패
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 서버가 2xx 가 아닌 응답을 반환 (서버 메시지 포함)
    #[error("{message}")]
    Request { status: StatusCode, message: String },

    /// 응답 본문 파싱 실패
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// 입력값 검증 실패 (요청 전 차단)
    #[error("{0}")]
    Validation(String),

    /// 로그인 필요
    #[error("You must be logged in to do that")]
    NotAuthenticated,

    /// 페이지 위치에 리스팅 id 가 없음
    #[error("Invalid listing ID: {0}")]
    InvalidLocation(String),

    /// 세션 저장소 읽기/쓰기 실패
    #[error("Session storage failed: {0}")]
    Storage(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// 서버 응답 상태 코드 (있는 경우)
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Request { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// 요청을 보내기 전에 로컬에서 거절된 에러인지
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_) | ClientError::NotAuthenticated | ClientError::InvalidLocation(_)
        )
    }
}
// endregion: --- Client Error

// region:    --- Error Envelope
/// 서버 에러 응답 형태: `{ errors: [{ message }], message }`
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

impl ErrorEnvelope {
    /// errors[0].message -> message -> 기본 메시지 순으로 선택
    pub fn into_message(self) -> String {
        self.errors
            .into_iter()
            .next()
            .and_then(|e| e.message)
            .filter(|m| !m.trim().is_empty())
            .or(self.message.filter(|m| !m.trim().is_empty()))
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
    }
}

/// 에러 응답 본문에서 사용자에게 보여줄 메시지 추출
pub fn message_from_body(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .unwrap_or_default()
        .into_message()
}
// endregion: --- Error Envelope
