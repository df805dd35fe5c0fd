/// 내 프로필 화면 / 프로필 수정
// region:    --- Imports
use crate::api::AuctionApi;
use crate::auction::model::{Media, Profile, ProfileUpdate};
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::view::{render_card, ListingCard, Location, Navigator};
use tracing::info;
// endregion: --- Imports

// region:    --- Profile View
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub name: String,
    pub bio: String,
    pub avatar: Option<Media>,
    pub banner: Option<Media>,
    pub credits: i64,
    pub listings: Vec<ListingCard>,
    pub edit: Location,
}

fn with_alt(media: &Option<Media>, fallback: &str) -> Option<Media> {
    media
        .as_ref()
        .filter(|m| !m.url.trim().is_empty())
        .map(|m| {
            let alt = if m.alt.trim().is_empty() { fallback } else { m.alt.as_str() };
            Media::new(m.url.clone(), alt)
        })
}

pub fn render_profile(profile: &Profile) -> ProfileView {
    ProfileView {
        name: profile.name.clone(),
        bio: profile.bio.clone().unwrap_or_default(),
        avatar: with_alt(&profile.avatar, "Profile Avatar"),
        banner: with_alt(&profile.banner, "Profile Banner"),
        credits: profile.credits,
        listings: profile.listings.iter().map(render_card).collect(),
        edit: Location::EditProfile,
    }
}

/// 로그인한 사용자의 프로필 조회 (로그인 필요)
pub async fn load_profile(api: &dyn AuctionApi, session: &Session) -> ClientResult<ProfileView> {
    let name = session.require_name()?;
    info!("{:<12} --> 프로필 화면 로드: {}", "Profile", name);
    let profile = api.profile(name).await?;
    Ok(render_profile(&profile))
}
// endregion: --- Profile View

// region:    --- Profile Edit
/// 프로필 수정 폼 입력값
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
}

impl ProfileForm {
    /// 수정 화면에 기존 값 채우기
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            bio: profile.bio.clone(),
            avatar_url: profile.avatar.as_ref().map(|m| m.url.clone()),
            banner_url: profile.banner.as_ref().map(|m| m.url.clone()),
        }
    }

    pub fn into_update(self) -> ClientResult<ProfileUpdate> {
        fn non_empty(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }

        let update = ProfileUpdate {
            bio: non_empty(self.bio),
            avatar: non_empty(self.avatar_url).map(|url| Media::new(url, "Profile Avatar")),
            banner: non_empty(self.banner_url).map(|url| Media::new(url, "Profile Banner")),
        };
        if update.is_empty() {
            return Err(ClientError::Validation(
                "Provide a bio, avatar or banner to update.".to_string(),
            ));
        }
        Ok(update)
    }
}

pub async fn handle_update_profile(
    form: ProfileForm,
    api: &dyn AuctionApi,
    session: &Session,
    navigator: &dyn Navigator,
) -> ClientResult<ProfileView> {
    let name = session.require_name()?;
    let update = form.into_update()?;
    info!("{:<12} --> 프로필 수정 처리 시작: {}", "Profile", name);
    let profile = api.update_profile(name, &update).await?;
    navigator.navigate(&Location::Profile);
    Ok(render_profile(&profile))
}
// endregion: --- Profile Edit
