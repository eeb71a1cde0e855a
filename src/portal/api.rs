use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

const USERS_PATH: [&str; 3] = ["user", "api", "users"];
const FEEDBACK_PATH: [&str; 4] = ["booking", "dev", "coaches-page", "feedbacks"];

/// Client record as returned by the users service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(rename = "type", default)]
    pub client_type: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
}

impl ClientProfile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub coach_id: String,
    pub client_id: String,
    pub workout_id: String,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReceipt {
    #[serde(default)]
    pub toast_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: ClientProfile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    toast_message: Option<String>,
}

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with {status}")]
    Rejected {
        status: StatusCode,
        toast_message: Option<String>,
    },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl PortalError {
    /// Server-provided message suitable for a toast, if any
    pub fn toast_message(&self) -> Option<&str> {
        match self {
            PortalError::Rejected { toast_message, .. } => {
                toast_message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }
}

/// REST calls made by the coach feedback dialog
#[async_trait]
pub trait CoachingApi: Send + Sync {
    async fn fetch_client(&self, client_id: &str) -> Result<ClientProfile, PortalError>;

    async fn submit_feedback(&self, feedback: &FeedbackRequest) -> Result<FeedbackReceipt, PortalError>;
}

/// `CoachingApi` over HTTP, presenting the coach's bearer token
#[derive(Clone, Debug)]
pub struct HttpCoachingApi {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpCoachingApi {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, PortalError> {
        let base_url =
            Url::parse(base_url).map_err(|e| PortalError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(PortalError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, PortalError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortalError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl CoachingApi for HttpCoachingApi {
    async fn fetch_client(&self, client_id: &str) -> Result<ClientProfile, PortalError> {
        let mut segments = USERS_PATH.to_vec();
        segments.push(client_id);
        let url = self.endpoint(&segments)?;

        let response = self.authorize(self.client.get(url.as_str())).send().await?;
        let body = success_body(response).await?;
        let envelope: UserEnvelope =
            serde_json::from_slice(&body).map_err(|e| PortalError::Decode(e.to_string()))?;
        Ok(envelope.user)
    }

    async fn submit_feedback(&self, feedback: &FeedbackRequest) -> Result<FeedbackReceipt, PortalError> {
        let url = self.endpoint(&FEEDBACK_PATH)?;

        tracing::debug!(
            "Submitting feedback: coach={} client={} workout={}",
            feedback.coach_id,
            feedback.client_id,
            feedback.workout_id
        );
        let response = self
            .authorize(self.client.post(url.as_str()))
            .json(feedback)
            .send()
            .await?;
        let body = success_body(response).await?;

        // The status decides success; an empty or non-JSON body just has no message
        Ok(serde_json::from_slice(&body).unwrap_or_else(|e| {
            tracing::debug!("Feedback accepted without a readable body: {}", e);
            FeedbackReceipt::default()
        }))
    }
}

/// Body of a 2xx response; anything else becomes `Rejected` with the server's toastMessage
async fn success_body(response: Response) -> Result<Vec<u8>, PortalError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let parsed: ErrorBody = serde_json::from_slice(&body).unwrap_or_default();
        return Err(PortalError::Rejected {
            status,
            toast_message: parsed.toast_message,
        });
    }

    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_endpoints_under_base_path() {
        let api = HttpCoachingApi::new("https://api.example.com/gateway/", None).unwrap();
        let url = api.endpoint(&FEEDBACK_PATH).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/gateway/booking/dev/coaches-page/feedbacks"
        );
    }

    #[test]
    fn escapes_client_id_segment() {
        let api = HttpCoachingApi::new("http://localhost:3000", None).unwrap();
        let url = api.endpoint(&["user", "api", "users", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/user/api/users/a%2Fb");
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(matches!(
            HttpCoachingApi::new("mailto:coach@example.com", None),
            Err(PortalError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            HttpCoachingApi::new("not a url", None),
            Err(PortalError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn toast_message_ignores_blank_values() {
        let err = PortalError::Rejected {
            status: StatusCode::BAD_REQUEST,
            toast_message: Some("  ".to_string()),
        };
        assert_eq!(err.toast_message(), None);

        let err = PortalError::Rejected {
            status: StatusCode::CONFLICT,
            toast_message: Some("Feedback already exists".to_string()),
        };
        assert_eq!(err.toast_message(), Some("Feedback already exists"));
    }

    #[test]
    fn profile_accepts_document_ids() {
        let profile: ClientProfile = serde_json::from_value(serde_json::json!({
            "_id": "665f1c",
            "firstName": "Lee",
            "lastName": "Park",
            "type": "client"
        }))
        .unwrap();
        assert_eq!(profile.id, "665f1c");
        assert_eq!(profile.display_name(), "Lee Park");
        assert_eq!(profile.profile_pic, None);
    }
}
