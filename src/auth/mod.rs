/// 로그인 / 회원가입 / 로그아웃
// region:    --- Imports
use crate::api::AuctionApi;
use crate::auction::model::Media;
use crate::error::{ClientError, ClientResult};
use crate::session::{Session, SessionStore};
use crate::view::{Location, Navigator};
use model::{LoginRequest, RegisterRequest};
use tracing::{info, warn};

pub mod model;
// endregion: --- Imports

// region:    --- Login
pub async fn handle_login(
    req: LoginRequest,
    api: &dyn AuctionApi,
    store: &dyn SessionStore,
    navigator: &dyn Navigator,
) -> ClientResult<Session> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ClientError::Validation(
            "Email and password are required.".to_string(),
        ));
    }

    let data = api.login(&req).await?;
    if data.access_token.is_empty() {
        warn!("{:<12} --> 응답에 토큰 없음: {}", "Auth", data.name);
        return Err(ClientError::Decode("Login failed: Token not found.".to_string()));
    }

    let session = Session::new(data.access_token, data.name);
    store.save(&session)?;
    info!(
        "{:<12} --> 로그인 성공: {}",
        "Auth",
        session.display_name.as_deref().unwrap_or_default()
    );
    navigator.navigate(&Location::Home);
    Ok(session)
}
// endregion: --- Login

// region:    --- Register
/// 회원가입 폼 입력값
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
}

impl RegisterForm {
    pub fn into_request(self) -> ClientResult<RegisterRequest> {
        fn non_empty(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }

        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();
        if name.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err(ClientError::Validation(
                "Name, email and password are required.".to_string(),
            ));
        }

        Ok(RegisterRequest {
            name,
            email,
            password: self.password,
            bio: non_empty(self.bio),
            avatar: non_empty(self.avatar_url).map(|url| Media::new(url, "Profile Avatar")),
            banner: non_empty(self.banner_url).map(|url| Media::new(url, "Banner Image")),
        })
    }
}

/// 회원가입 후 같은 계정으로 로그인해서 세션 생성
pub async fn handle_register(
    form: RegisterForm,
    api: &dyn AuctionApi,
    store: &dyn SessionStore,
    navigator: &dyn Navigator,
) -> ClientResult<Session> {
    let req = form.into_request()?;
    let profile = api.register(&req).await?;
    info!("{:<12} --> 회원가입 성공: {}", "Auth", profile.name);

    let login = LoginRequest {
        email: req.email,
        password: req.password,
    };
    handle_login(login, api, store, navigator).await
}
// endregion: --- Register

// region:    --- Logout
pub fn handle_logout(store: &dyn SessionStore, navigator: &dyn Navigator) -> ClientResult<()> {
    store.clear()?;
    info!("{:<12} --> 로그아웃", "Auth");
    navigator.navigate(&Location::Login);
    Ok(())
}
// endregion: --- Logout
