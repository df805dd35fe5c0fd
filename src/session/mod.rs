/// 로그인 세션 관리
/// 토큰과 표시 이름 두 값만 저장한다. 만료는 추적하지 않고 서버가 거절할 때까지 신뢰한다.
// region:    --- Imports
use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
// endregion: --- Imports

// region:    --- Session
/// 세션 컨텍스트. 저장소 키 이름(`userToken`, `name`)을 그대로 사용한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "userToken", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            display_name: Some(display_name.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// 로그인 필요한 페이지 진입 전 확인
    pub fn require_token(&self) -> ClientResult<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ClientError::NotAuthenticated)
    }

    pub fn require_name(&self) -> ClientResult<&str> {
        self.require_token()?;
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or(ClientError::NotAuthenticated)
    }

    /// 현재 사용자가 해당 판매자인지 (화면 표시용 확인일 뿐, 권한은 서버가 검사)
    pub fn is_owner(&self, seller_name: &str) -> bool {
        self.is_authenticated() && self.display_name.as_deref() == Some(seller_name)
    }
}
// endregion: --- Session

// region:    --- Session Store
/// 세션 저장소 트레이트
pub trait SessionStore: Send + Sync {
    fn load(&self) -> ClientResult<Session>;
    fn save(&self, session: &Session) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// JSON 파일 기반 세션 저장소
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<Session> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ClientError::Storage(format!("{}: {}", self.path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{:<12} --> 세션 파일 없음, 비로그인 상태", "Session");
                Ok(Session::anonymous())
            }
            Err(e) => Err(ClientError::Storage(format!("{}: {}", self.path.display(), e))),
        }
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        let json = serde_json::to_vec_pretty(session)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        std::fs::write(&self.path, json)
            .map_err(|e| ClientError::Storage(format!("{}: {}", self.path.display(), e)))?;
        info!("{:<12} --> 세션 저장: {}", "Session", self.path.display());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("{:<12} --> 세션 삭제", "Session");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(format!("{}: {}", self.path.display(), e))),
        }
    }
}

/// 메모리 세션 저장소
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Session>,
}

impl MemorySessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Session> {
        self.inner
            .lock()
            .map(|s| s.clone())
            .map_err(|e| ClientError::Storage(e.to_string()))
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        *guard = session.clone();
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        self.save(&Session::anonymous())
    }
}
// endregion: --- Session Store
