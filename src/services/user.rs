//! `/user` endpoints: account, session and settings

use super::{get, post, post_unsigned};
use crate::error::Result;
use crate::http::{Params, Transport};
use crate::responses::{
    AccessTokenResponse, CaptchaResponse, ChangeUserDataResponse, GetFollowListResponse,
    GetUserInfoResponse, GetUserNameResponse, GetUserScoreResponse, LoadInviteResponse,
    LogInResponse, Pr0grammResponse, SuccessableResponse, SyncResponse, TokenInfoResponse,
    TokenResponse,
};
use crate::types::{BanDuration, ItemFlags, SyncId, UserMark};
use std::sync::Arc;
use tracing::debug;

/// Credentials for `/user/login`
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOptions {
    pub name: String,
    pub password: String,
    /// Token from `request_captcha`
    pub token: Option<String>,
    /// Solved captcha text
    pub captcha: Option<String>,
}

impl LoginOptions {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            token: None,
            captcha: None,
        }
    }

    /// Attach a captcha token and its solution
    #[must_use]
    pub fn with_captcha(mut self, token: impl Into<String>, solution: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.captcha = Some(solution.into());
        self
    }

    fn to_params(&self) -> Params {
        Params::new()
            .with("name", &self.name)
            .with("password", &self.password)
            .with_opt("token", self.token.as_deref())
            .with_opt("captcha", self.captcha.as_deref())
    }
}

/// Body of `/user/sitesettings`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteSettingsOptions {
    pub likes_are_public: bool,
    pub show_ads: bool,
    pub user_status: UserMark,
}

impl SiteSettingsOptions {
    fn to_params(self) -> Params {
        Params::new()
            .with("likesArePublic", self.likes_are_public)
            .with("showAds", self.show_ads)
            .with("userStatus", format!("um{}", u8::from(self.user_status)))
    }
}

#[derive(Clone)]
pub struct UserService {
    transport: Arc<dyn Transport>,
}

impl UserService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn ban(&self, user: &str, reason: &str, days: BanDuration) -> Result<Pr0grammResponse> {
        let body = Params::new()
            .with("user", user)
            .with("reason", reason)
            .with("days", days);
        post(&*self.transport, "/user/ban", body).await
    }

    /// Confirm an email change with the token from the confirmation mail
    pub async fn change_email(&self, token: &str) -> Result<ChangeUserDataResponse> {
        post(&*self.transport, "/user/changeemail", Params::new().with("token", token)).await
    }

    pub async fn change_password(&self, new_password: &str) -> Result<ChangeUserDataResponse> {
        let body = Params::new().with("password", new_password);
        post(&*self.transport, "/user/changepassword", body).await
    }

    pub async fn get_follow_list(&self, flags: ItemFlags) -> Result<GetFollowListResponse> {
        get(&*self.transport, "/user/followlist", Params::new().with("flags", flags)).await
    }

    pub async fn get_info(&self) -> Result<GetUserInfoResponse> {
        get(&*self.transport, "/user/info", Params::new()).await
    }

    pub async fn invite(&self, email: &str) -> Result<ChangeUserDataResponse> {
        post(&*self.transport, "/user/invite", Params::new().with("email", email)).await
    }

    pub async fn join_with_invite(
        &self,
        token: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<ChangeUserDataResponse> {
        let body = join_params(token, email, password, name);
        post(&*self.transport, "/user/joinwithinvite", body).await
    }

    pub async fn join_with_token(
        &self,
        token: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<TokenResponse> {
        let body = join_params(token, email, password, name);
        post(&*self.transport, "/user/joinwithtoken", body).await
    }

    pub async fn load_invite(&self, token: &str) -> Result<LoadInviteResponse> {
        get(&*self.transport, "/user/loadinvite", Params::new().with("token", token)).await
    }

    pub async fn load_payment_token(&self, token: &str) -> Result<TokenInfoResponse> {
        let body = Params::new().with("token", token);
        post(&*self.transport, "/user/loadpaymenttoken", body).await
    }

    /// Request a login captcha; works without a session
    pub async fn request_captcha(&self) -> Result<CaptchaResponse> {
        post_unsigned(&*self.transport, "/user/captcha", Params::new()).await
    }

    /// Log in; works without a session
    ///
    /// A successful login sets the session cookies on transports that keep
    /// a jar. Check `LogInResponse::outcome` for bans and wrong credentials.
    pub async fn login(&self, options: &LoginOptions) -> Result<LogInResponse> {
        debug!(name = %options.name, captcha = options.captcha.is_some(), "Logging in");
        post_unsigned(&*self.transport, "/user/login", options.to_params()).await
    }

    pub async fn logout(&self, session_id: &str) -> Result<Pr0grammResponse> {
        post(&*self.transport, "/user/logout", Params::new().with("id", session_id)).await
    }

    pub async fn redeem_token(&self, token: &str) -> Result<TokenResponse> {
        post(&*self.transport, "/user/redeemtoken", Params::new().with("token", token)).await
    }

    pub async fn request_email_change(&self, new_email: &str) -> Result<ChangeUserDataResponse> {
        let body = Params::new().with("email", new_email);
        post(&*self.transport, "/user/requestemailchange", body).await
    }

    pub async fn reset_password(
        &self,
        name: &str,
        password: &str,
        token: &str,
    ) -> Result<ChangeUserDataResponse> {
        let body = Params::new()
            .with("name", name)
            .with("password", password)
            .with("token", token);
        post(&*self.transport, "/user/resetpassword", body).await
    }

    /// Works without a session
    pub async fn send_password_reset_mail(&self, email: &str) -> Result<Pr0grammResponse> {
        let body = Params::new().with("email", email);
        post_unsigned(&*self.transport, "/user/sendpasswordresetmail", body).await
    }

    pub async fn set_site_settings(&self, settings: SiteSettingsOptions) -> Result<ChangeUserDataResponse> {
        post(&*self.transport, "/user/sitesettings", settings.to_params()).await
    }

    /// Poll account changes since `offset`
    pub async fn sync(&self, offset: SyncId) -> Result<SyncResponse> {
        get(&*self.transport, "/user/sync", Params::new().with("offset", offset)).await
    }

    pub async fn validate(&self, token: &str) -> Result<SuccessableResponse> {
        post(&*self.transport, "/user/validate", Params::new().with("token", token)).await
    }

    /// Exchange an OAuth authorization code for an access token; works without a session
    pub async fn get_auth_token(
        &self,
        auth_code: &str,
        user_id: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessTokenResponse> {
        let body = Params::new()
            .with("authCode", auth_code)
            .with("userId", user_id)
            .with("clientId", client_id)
            .with("clientSecret", client_secret);
        post_unsigned(&*self.transport, "/user/authtoken", body).await
    }

    pub async fn get_identifier(&self) -> Result<GetUserNameResponse> {
        get(&*self.transport, "/user/identifier", Params::new()).await
    }

    pub async fn get_user_name(&self) -> Result<GetUserNameResponse> {
        get(&*self.transport, "/user/name", Params::new()).await
    }

    pub async fn get_user_score(&self) -> Result<GetUserScoreResponse> {
        get(&*self.transport, "/user/score", Params::new()).await
    }
}

fn join_params(token: &str, email: &str, password: &str, name: &str) -> Params {
    Params::new()
        .with("token", token)
        .with("email", email)
        .with("password", password)
        .with("name", name)
}
