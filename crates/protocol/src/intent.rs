use serde::{Deserialize, Serialize};
use std::fmt;

use crate::category::Category;

const GET_EXTRACTED_PREFIX: &str = "GET_EXTRACTED_";

/// What an envelope asks for, or which operation's result it carries.
///
/// Wire tags are plain strings (`EXTRACT_FROM_ARTICLE`, `GET_EXTRACTED_PERSON`, ...).
/// Tags this build does not know decode to [`Intent::Unknown`] instead of failing,
/// so newer peers can't take an actor down.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Intent {
    // Requests
    ExtractFromArticle,
    GetExtracted(Category),
    /// `GET_EXTRACTED_<X>` where `<X>` is not a supported category.
    GetUnsupported(String),
    ClusterArticle,

    // Responses
    ResponseExtractFromArticle,
    ResponseGet,
    ResponseClusterArticle,

    // Notifications: no response is ever produced for these
    UserMessage,
    EndSession,

    Unknown(String),
}

impl Intent {
    /// The response intent paired with a request intent.
    pub fn response(&self) -> Option<Intent> {
        match self {
            Intent::ExtractFromArticle => Some(Intent::ResponseExtractFromArticle),
            Intent::GetExtracted(_) | Intent::GetUnsupported(_) => Some(Intent::ResponseGet),
            Intent::ClusterArticle => Some(Intent::ResponseClusterArticle),
            _ => None,
        }
    }

    pub fn is_request(&self) -> bool {
        self.response().is_some()
    }

    pub fn is_response(&self) -> bool {
        matches!(
            self,
            Intent::ResponseExtractFromArticle | Intent::ResponseGet | Intent::ResponseClusterArticle
        )
    }

    pub fn to_wire(&self) -> String {
        match self {
            Intent::ExtractFromArticle => "EXTRACT_FROM_ARTICLE".to_string(),
            Intent::GetExtracted(category) => format!("{}{}", GET_EXTRACTED_PREFIX, category.as_str()),
            Intent::GetUnsupported(tag) => format!("{}{}", GET_EXTRACTED_PREFIX, tag),
            Intent::ClusterArticle => "CLUSTER_ARTICLE".to_string(),
            Intent::ResponseExtractFromArticle => "RESPONSE_EXTRACT_FROM_ARTICLE".to_string(),
            Intent::ResponseGet => "RESPONSE_GET".to_string(),
            Intent::ResponseClusterArticle => "RESPONSE_CLUSTER_ARTICLE".to_string(),
            Intent::UserMessage => "USER_MESSAGE".to_string(),
            Intent::EndSession => "END_SESSION".to_string(),
            Intent::Unknown(tag) => tag.clone(),
        }
    }

    pub fn from_wire(tag: &str) -> Intent {
        match tag {
            "EXTRACT_FROM_ARTICLE" => Intent::ExtractFromArticle,
            "CLUSTER_ARTICLE" => Intent::ClusterArticle,
            "RESPONSE_EXTRACT_FROM_ARTICLE" => Intent::ResponseExtractFromArticle,
            "RESPONSE_GET" => Intent::ResponseGet,
            "RESPONSE_CLUSTER_ARTICLE" => Intent::ResponseClusterArticle,
            "USER_MESSAGE" => Intent::UserMessage,
            "END_SESSION" => Intent::EndSession,
            other => match other.strip_prefix(GET_EXTRACTED_PREFIX) {
                Some(suffix) if !suffix.is_empty() => Category::ALL
                    .into_iter()
                    .find(|c| c.as_str() == suffix)
                    .map(Intent::GetExtracted)
                    .unwrap_or_else(|| Intent::GetUnsupported(suffix.to_string())),
                _ => Intent::Unknown(other.to_string()),
            },
        }
    }
}

impl From<String> for Intent {
    fn from(tag: String) -> Self {
        Intent::from_wire(&tag)
    }
}

impl From<Intent> for String {
    fn from(intent: Intent) -> Self {
        intent.to_wire()
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}
