use serde::{Deserialize, Serialize};

/// Discord interaction types this service knows about. Anything newer than
/// what we handle lands in `Unknown` so dispatch stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionType {
    Ping,
    ButtonPress,
    Unknown(i32),
}

const INTERACTION_PING: i32 = 1;
const INTERACTION_MESSAGE_COMPONENT: i32 = 3;

impl From<i32> for InteractionType {
    fn from(value: i32) -> Self {
        match value {
            INTERACTION_PING => InteractionType::Ping,
            INTERACTION_MESSAGE_COMPONENT => InteractionType::ButtonPress,
            other => InteractionType::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InteractionRequest {
    pub r#type: i32,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub data: Option<InteractionData>,
    #[serde(default)]
    pub member: Option<Member>,
}

impl InteractionRequest {
    pub fn interaction_type(&self) -> InteractionType {
        InteractionType::from(self.r#type)
    }

    /// The guild nickname if set, otherwise the account username.
    pub fn display_name(&self) -> &str {
        let member = self.member.as_ref();

        member
            .and_then(|m| m.nick.as_deref())
            .or_else(|| {
                member
                    .and_then(|m| m.user.as_ref())
                    .map(|u| u.username.as_str())
            })
            .unwrap_or("Someone")
    }

    pub fn custom_id(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.custom_id.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InteractionData {
    #[serde(default)]
    pub custom_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Member {
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

pub const RESPONSE_PONG: i32 = 1;
pub const RESPONSE_CHANNEL_MESSAGE_WITH_SOURCE: i32 = 4;
pub const RESPONSE_DEFERRED_UPDATE_MESSAGE: i32 = 6;
pub const RESPONSE_UPDATE_MESSAGE: i32 = 7;

/// Message is only shown to the user who triggered the interaction.
pub const FLAG_EPHEMERAL: i32 = 64;

/// Outbound payload. Discord parses `type` strictly, and `data`/`flags` must
/// be absent rather than null when unused.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InteractionResponse {
    pub r#type: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResponseData {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<i32>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        InteractionResponse {
            r#type: RESPONSE_PONG,
            data: None,
        }
    }

    pub fn message(content: impl Into<String>) -> Self {
        InteractionResponse {
            r#type: RESPONSE_CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(ResponseData {
                content: content.into(),
                flags: None,
            }),
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        InteractionResponse {
            r#type: RESPONSE_CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(ResponseData {
                content: content.into(),
                flags: Some(FLAG_EPHEMERAL),
            }),
        }
    }
}
