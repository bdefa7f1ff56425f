//! Common types used throughout the pr0gramm client
//!
//! This module contains identifier aliases, the small enums the API encodes
//! as integers, and the record shapes shared by several responses.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::BitOr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

pub type ItemId = u64;
pub type UserId = u64;
pub type CommentId = u64;
pub type TagId = u64;
pub type PromotedId = u64;
pub type ConversationId = u64;
pub type SyncId = u64;

pub type Score = i64;
pub type Confidence = f64;

/// Seconds since the unix epoch, as the API sends them
pub type UnixTimestamp = i64;

/// Ban duration in days
pub type BanDuration = u32;

// ============================================================================
// Timestamp
// ============================================================================

/// A point in time accepted by endpoints that filter by date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Raw unix seconds
    Unix(UnixTimestamp),
    /// A chrono date time
    DateTime(DateTime<Utc>),
}

impl Timestamp {
    /// Whole unix seconds, the form the API expects
    pub fn unix_seconds(&self) -> UnixTimestamp {
        match self {
            Timestamp::Unix(secs) => *secs,
            Timestamp::DateTime(dt) => dt.timestamp(),
        }
    }
}

impl From<UnixTimestamp> for Timestamp {
    fn from(secs: UnixTimestamp) -> Self {
        Self::Unix(secs)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

/// Convert unix seconds from a response into a chrono date time
pub fn to_datetime(secs: UnixTimestamp) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

// ============================================================================
// Item Flags
// ============================================================================

/// Content filter bitmask (`flags` parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemFlags(pub u8);

impl ItemFlags {
    pub const SFW: ItemFlags = ItemFlags(1);
    pub const NSFW: ItemFlags = ItemFlags(2);
    pub const NSFL: ItemFlags = ItemFlags(4);
    pub const ALL: ItemFlags = ItemFlags(1 | 2 | 4);

    /// Raw bitmask value
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Check whether every bit of `other` is set
    pub fn contains(self, other: ItemFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self::SFW
    }
}

impl BitOr for ItemFlags {
    type Output = ItemFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        ItemFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for ItemFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// User Mark
// ============================================================================

/// User rank badge, sent as an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum UserMark {
    #[default]
    Schwuchtel,
    Neuschwuchtel,
    Altschwuchtel,
    Administrator,
    Gebannt,
    Moderator,
    Fliesentisch,
    LebendeLegende,
    Wichtel,
    EdlerSpender,
    /// A mark this client does not know yet
    Unknown(u8),
}

impl From<u8> for UserMark {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Schwuchtel,
            1 => Self::Neuschwuchtel,
            2 => Self::Altschwuchtel,
            3 => Self::Administrator,
            4 => Self::Gebannt,
            5 => Self::Moderator,
            6 => Self::Fliesentisch,
            7 => Self::LebendeLegende,
            8 => Self::Wichtel,
            9 => Self::EdlerSpender,
            other => Self::Unknown(other),
        }
    }
}

impl From<UserMark> for u8 {
    fn from(mark: UserMark) -> Self {
        match mark {
            UserMark::Schwuchtel => 0,
            UserMark::Neuschwuchtel => 1,
            UserMark::Altschwuchtel => 2,
            UserMark::Administrator => 3,
            UserMark::Gebannt => 4,
            UserMark::Moderator => 5,
            UserMark::Fliesentisch => 6,
            UserMark::LebendeLegende => 7,
            UserMark::Wichtel => 8,
            UserMark::EdlerSpender => 9,
            UserMark::Unknown(other) => other,
        }
    }
}

// ============================================================================
// Vote
// ============================================================================

/// Absolute vote on an item, tag or comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Vote {
    Down,
    #[default]
    None,
    Up,
}

impl Vote {
    /// Wire value (-1, 0, 1)
    pub fn as_i8(self) -> i8 {
        self.into()
    }
}

impl From<Vote> for i8 {
    fn from(vote: Vote) -> Self {
        match vote {
            Vote::Down => -1,
            Vote::None => 0,
            Vote::Up => 1,
        }
    }
}

impl TryFrom<i8> for Vote {
    type Error = String;

    fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Down),
            0 => Ok(Self::None),
            1 => Ok(Self::Up),
            other => Err(format!("invalid vote value: {other}")),
        }
    }
}

// ============================================================================
// Delete Reason
// ============================================================================

/// Moderation reasons accepted by `/items/delete`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteItemReason {
    Rule1Tagging,
    Rule2Minors,
    Rule3Animals,
    Rule4Racism,
    Rule5Spam,
    Rule6PrivateInfo,
    Rule7Quality,
    Rule8Series,
    Rule12Warez,
    Rule14Screamer,
    Rule15MusicOnly,
    Repost,
    OnRequest,
}

impl DeleteItemReason {
    /// The exact text the site expects
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rule1Tagging => "Regel #1 - Bild unzureichend getagged (nsfw/nsfl)",
            Self::Rule2Minors => "Regel #2 - Gore/Porn/Suggestive Bilder mit Minderjährigen",
            Self::Rule3Animals => "Regel #3 - Tierporn",
            Self::Rule4Racism => "Regel #4 - Stumpfer Rassismus/Nazi-Nostalgie",
            Self::Rule5Spam => "Regel #5 - Werbung/Spam",
            Self::Rule6PrivateInfo => "Regel #6 - Infos zu Privatpersonen",
            Self::Rule7Quality => "Regel #7 - Bildqualität",
            Self::Rule8Series => "Regel #8 - Ähnliche Bilder in Reihe",
            Self::Rule12Warez => "Regel #12 - Warez/Logins zu Pay Sites",
            Self::Rule14Screamer => "Regel #14 - Screamer/Sound-getrolle",
            Self::Rule15MusicOnly => "Regel #15 - reiner Musikupload",
            Self::Repost => "Repost",
            Self::OnRequest => "Auf Anfrage",
        }
    }
}

impl fmt::Display for DeleteItemReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Records
// ============================================================================

/// A post in the item stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "promoted")]
    pub promoted_id: PromotedId,
    pub up: i64,
    pub down: i64,
    pub created: UnixTimestamp,
    pub image: String,
    pub thumb: String,
    pub fullsize: String,
    pub source: String,
    pub flags: ItemFlags,
    pub user: String,
    pub mark: UserMark,
    /// Fields not modelled above (`width`, `height`, `audio`, ...), kept as sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Net score (up minus down)
    pub fn score(&self) -> i64 {
        self.up - self.down
    }

    /// Creation time as a date time
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.created)
    }
}

/// Tag attached to an item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTag {
    pub id: TagId,
    pub tag: String,
    pub confidence: Confidence,
}

/// Comment under an item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemComment {
    pub id: CommentId,
    pub parent: Option<CommentId>,
    pub content: String,
    pub created: UnixTimestamp,
    pub up: i64,
    pub down: i64,
    pub confidence: Confidence,
    pub name: String,
    pub mark: UserMark,
}

/// Per-user tag votes returned by `/tags/details`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTagDetails {
    pub id: TagId,
    pub tag: String,
    pub user: String,
    pub up: i64,
    pub down: i64,
    pub votes: Vec<ItemTagVote>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTagVote {
    pub user: String,
    pub vote: Vote,
}

/// Comment as listed on a profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileComment {
    pub id: CommentId,
    pub item_id: ItemId,
    pub thumb: String,
    pub content: String,
    pub created: UnixTimestamp,
    pub up: i64,
    pub down: i64,
}

/// Comment the profile owner favorited
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LikedProfileComment {
    pub id: CommentId,
    pub item_id: ItemId,
    pub thumb: String,
    pub content: String,
    pub created: UnixTimestamp,
    pub up: i64,
    pub down: i64,
    pub name: String,
    pub mark: UserMark,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentUser {
    pub id: UserId,
    pub name: String,
    pub mark: UserMark,
}

/// Public profile data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub mark: UserMark,
    pub registered: UnixTimestamp,
    pub score: Score,
    #[serde(deserialize_with = "int_bool::deserialize")]
    pub admin: bool,
    #[serde(deserialize_with = "int_bool::deserialize")]
    pub banned: bool,
    pub banned_until: Option<UnixTimestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FollowedUser {
    pub item_id: ItemId,
    pub thumb: String,
    pub name: String,
    pub mark: UserMark,
    pub last_post: UnixTimestamp,
    pub follow_created: UnixTimestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitingUser {
    pub name: String,
    pub mark: UserMark,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpload {
    pub id: ItemId,
    pub thumb: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileBadge {
    pub image: String,
    pub description: String,
    pub link: String,
    pub created: UnixTimestamp,
    pub name: Option<String>,
    pub extra: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LikedItem {
    pub id: ItemId,
    pub thumb: String,
}

/// Account details of the logged-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountInfo {
    pub email: String,
    pub invites: u32,
    #[serde(deserialize_with = "int_bool::deserialize")]
    pub likes_are_public: bool,
    pub paid_until: Option<UnixTimestamp>,
}

/// Ban details attached to a failed login
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BanInfo {
    #[serde(deserialize_with = "int_bool::deserialize")]
    pub banned: bool,
    pub reason: String,
    pub till: Option<UnixTimestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conversation {
    pub name: String,
    pub mark: UserMark,
    pub last_message: UnixTimestamp,
    pub unread_count: u32,
}

/// Comment reply shown in the inbox
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InboxComment {
    pub id: CommentId,
    pub item_id: ItemId,
    pub thumb: String,
    pub flags: ItemFlags,
    pub name: String,
    pub mark: UserMark,
    pub sender_id: UserId,
    pub score: Score,
    pub created: UnixTimestamp,
    pub message: String,
    #[serde(deserialize_with = "int_bool::deserialize")]
    pub read: bool,
}

/// Private message in a conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub id: u64,
    pub created: UnixTimestamp,
    pub message: String,
    #[serde(deserialize_with = "int_bool::deserialize")]
    pub sent: bool,
    #[serde(deserialize_with = "int_bool::deserialize")]
    pub read: bool,
    pub name: String,
    pub mark: UserMark,
}

// ============================================================================
// Utilities
// ============================================================================

/// Flags the backend sends either as `true`/`false` or as `0`/`1`
///
/// ```rust,ignore
/// #[serde(deserialize_with = "int_bool::deserialize")]
/// read: bool,
/// ```
pub mod int_bool {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Bool(value) => Ok(value),
            Raw::Int(0) => Ok(false),
            Raw::Int(1) => Ok(true),
            Raw::Int(other) => Err(D::Error::custom(format!(
                "invalid flag value {other}, expected 0 or 1"
            ))),
        }
    }
}

/// Join tags into the comma separated list the API expects
pub fn create_tag_list<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}
