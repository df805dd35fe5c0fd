use crate::auction::model::Media;
use serde::{Deserialize, Serialize};

// 로그인 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// 회원가입 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Media>,
}

// 로그인 응답 data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub access_token: String,
}

// API 키 발급 요청 / 응답
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyData {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
}
