//! Response shapes
//!
//! Every response carries the common envelope (`ts`, `cache`, `rt`, `qc`),
//! flattened into the endpoint-specific struct.

use crate::types::{
    int_bool, AccountInfo, BanInfo, CommentUser, Conversation, FollowedUser, InboxComment,
    InvitingUser, Item, ItemComment, ItemTag, ItemTagDetails, LikedItem, LikedProfileComment,
    Message, ProfileBadge, ProfileComment, ProfileUpload, Score, UnixTimestamp, User,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope fields present on every response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pr0grammResponse {
    pub ts: UnixTimestamp,
    pub cache: Option<String>,
    /// Response time
    pub rt: u64,
    /// Query count
    pub qc: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetItemsInfoResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub tags: Vec<ItemTag>,
    pub comments: Vec<ItemComment>,
}

/// One page of the item stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetItemsResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub at_end: bool,
    pub at_start: bool,
    pub error: Option<Value>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetCommentsResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub comments: Vec<ProfileComment>,
    pub has_older: bool,
    pub has_newer: bool,
    pub user: CommentUser,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetProfileInfoResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub user: User,
    pub comments: Vec<ProfileComment>,
    pub comment_count: u64,
    pub comment_likes_count: u64,
    #[serde(rename = "comments_likes")]
    pub comments_likes: Vec<LikedProfileComment>,
    pub uploads: Vec<ProfileUpload>,
    pub upload_count: u64,
    #[serde(deserialize_with = "int_bool::deserialize")]
    pub likes_are_public: bool,
    pub likes: Vec<LikedItem>,
    pub like_count: u64,
    pub tag_count: u64,
    pub badges: Vec<ProfileBadge>,
    #[serde(rename = "followCount", alias = "followcount")]
    pub follow_count: u64,
    #[serde(deserialize_with = "int_bool::deserialize")]
    pub following: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetDetailsResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub tags: Vec<ItemTagDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeUserDataResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub account: Option<Value>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetFollowListResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub list: Vec<FollowedUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetUserInfoResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub account: AccountInfo,
    pub invited: Vec<InvitingUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub token_error: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadInviteResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub inviter: InvitingUser,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenInfoResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub token: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessableResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub success: bool,
    pub identifier: Option<String>,
}

/// Raw `/user/login` response; use [`LogInResponse::outcome`] to classify it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogInResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub success: bool,
    pub identifier: Option<String>,
    pub ban: Option<BanInfo>,
}

/// Classified login result
#[derive(Debug, Clone, PartialEq)]
pub enum LogInOutcome {
    Success { identifier: Option<String> },
    Banned(BanInfo),
    WrongCredentials,
}

impl LogInResponse {
    pub fn outcome(&self) -> LogInOutcome {
        match (&self.ban, self.success) {
            (_, true) => LogInOutcome::Success {
                identifier: self.identifier.clone(),
            },
            (Some(ban), false) if ban.banned => LogInOutcome::Banned(ban.clone()),
            _ => LogInOutcome::WrongCredentials,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptchaResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub token: String,
    /// Most likely a data URI
    pub captcha: String,
}

/// Sync log, either decoded entries or the raw encoded string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SyncLog {
    Entries(Vec<Value>),
    Encoded(String),
}

impl Default for SyncLog {
    fn default() -> Self {
        Self::Encoded(String::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub inbox_count: u64,
    pub log: SyncLog,
    pub log_length: u64,
    pub score: Score,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub conversations: Vec<Conversation>,
    pub at_end: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxCommentsResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub messages: Vec<InboxComment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessagesResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub messages: Vec<Message>,
    pub at_end: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessTokenResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub access_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetUserNameResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetUserScoreResponse {
    #[serde(flatten)]
    pub meta: Pr0grammResponse,
    pub score: Score,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_info_with_integer_flags() {
        let res: GetProfileInfoResponse = serde_json::from_value(json!({
            "user": {
                "id": 1,
                "name": "cha0s",
                "registered": 1_200_000_000,
                "score": 4000,
                "mark": 3,
                "admin": 1,
                "banned": 0,
                "bannedUntil": null
            },
            "comments": [],
            "likesArePublic": 0,
            "following": 1,
            "ts": 1, "rt": 1, "qc": 1
        }))
        .unwrap();

        assert!(res.user.admin);
        assert!(!res.user.banned);
        assert!(!res.likes_are_public);
        assert!(res.following);
    }

    #[test]
    fn test_items_response_flattens_envelope() {
        let res: GetItemsResponse = serde_json::from_value(json!({
            "atEnd": false,
            "atStart": true,
            "error": null,
            "items": [{"id": 3}, {"id": 2}],
            "ts": 1_600_000_000,
            "cache": "stream:top:9",
            "rt": 4,
            "qc": 2
        }))
        .unwrap();

        assert!(res.at_start);
        assert!(!res.at_end);
        assert_eq!(res.items.len(), 2);
        assert_eq!(res.meta.ts, 1_600_000_000);
        assert_eq!(res.meta.cache.as_deref(), Some("stream:top:9"));
        assert_eq!(res.meta.qc, 2);
    }

    #[test]
    fn test_login_outcome() {
        let ok: LogInResponse =
            serde_json::from_value(json!({"success": true, "identifier": "abc", "ban": null}))
                .unwrap();
        assert_eq!(
            ok.outcome(),
            LogInOutcome::Success {
                identifier: Some("abc".to_string())
            }
        );

        let banned: LogInResponse = serde_json::from_value(json!({
            "success": false,
            "ban": {"banned": true, "reason": "spam", "till": 1_700_000_000}
        }))
        .unwrap();
        assert!(matches!(banned.outcome(), LogInOutcome::Banned(b) if b.reason == "spam"));

        let wrong: LogInResponse =
            serde_json::from_value(json!({"success": false, "ban": null})).unwrap();
        assert_eq!(wrong.outcome(), LogInOutcome::WrongCredentials);
    }

    #[test]
    fn test_sync_log_variants() {
        let res: SyncResponse =
            serde_json::from_value(json!({"inboxCount": 2, "log": "AAAA", "logLength": 4, "score": 10}))
                .unwrap();
        assert_eq!(res.log, SyncLog::Encoded("AAAA".to_string()));
        assert_eq!(res.inbox_count, 2);

        let res: SyncResponse = serde_json::from_value(json!({"log": [{"a": 1}]})).unwrap();
        assert!(matches!(res.log, SyncLog::Entries(ref e) if e.len() == 1));
    }
}
