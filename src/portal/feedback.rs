use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::api::{ClientProfile, CoachingApi, FeedbackRequest};

pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(2000);
pub const SUCCESS_FALLBACK: &str = "Feedback submitted successfully";
pub const ERROR_FALLBACK: &str = "Something went wrong while submitting feedback.";

const SUBMIT_LABEL: &str = "Submit Feedback";
const SUBMITTING_LABEL: &str = "Submitting...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutStatus {
    #[serde(rename = "Finished")]
    Finished,
    #[serde(rename = "Waiting for feedback")]
    WaitingForFeedback,
}

impl WorkoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutStatus::Finished => "Finished",
            WorkoutStatus::WaitingForFeedback => "Waiting for feedback",
        }
    }
}

impl fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

/// The workout the coach is reviewing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub workout_id: String,
    pub client_id: String,
    pub kind: String,
    pub time: String,
    pub date: String,
}

/// Callbacks owned by whoever opened the dialog
pub trait DialogHost: Send + Sync + 'static {
    fn toast(&self, kind: ToastKind, message: &str);

    fn status_update(&self, workout_id: &str, status: WorkoutStatus);

    fn closed(&self);

    fn submitted(&self, _comment: &str) {}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialogError {
    #[error("dialog is closed")]
    Closed,

    #[error("client profile is still loading")]
    Loading,

    #[error("a submission is already in flight")]
    AlreadySubmitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted { message: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogView {
    Closed,
    /// Skeleton placeholder while the client profile loads
    Loading,
    Ready(ReadyView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyView {
    pub client: Option<ClientProfile>,
    pub workout: WorkoutSummary,
    pub comment: String,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
}

struct DialogState {
    open: bool,
    loading: bool,
    client: Option<ClientProfile>,
    comment: String,
    submitting: bool,
    // Scopes the fetch, submit and auto-close tasks of one open cycle
    lifetime: CancellationToken,
}

struct Inner<A, H> {
    api: Arc<A>,
    host: Arc<H>,
    coach_id: String,
    workout: WorkoutSummary,
    close_delay: Duration,
    state: Mutex<DialogState>,
}

/// Coach-side workout feedback dialog.
///
/// Background work (profile fetch, auto-close timer) runs on the Tokio runtime
/// and is cancelled when the dialog closes or is dropped. A submission already
/// sent is always awaited and reported to the host.
pub struct FeedbackDialog<A, H>
where
    A: CoachingApi + 'static,
    H: DialogHost,
{
    inner: Arc<Inner<A, H>>,
}

impl<A, H> FeedbackDialog<A, H>
where
    A: CoachingApi + 'static,
    H: DialogHost,
{
    pub fn new(api: Arc<A>, host: Arc<H>, coach_id: impl Into<String>, workout: WorkoutSummary) -> Self {
        Self::with_close_delay(api, host, coach_id, workout, DEFAULT_CLOSE_DELAY)
    }

    pub fn with_close_delay(
        api: Arc<A>,
        host: Arc<H>,
        coach_id: impl Into<String>,
        workout: WorkoutSummary,
        close_delay: Duration,
    ) -> Self {
        let lifetime = CancellationToken::new();
        lifetime.cancel();

        Self {
            inner: Arc::new(Inner {
                api,
                host,
                coach_id: coach_id.into(),
                workout,
                close_delay,
                state: Mutex::new(DialogState {
                    open: false,
                    loading: false,
                    client: None,
                    comment: String::new(),
                    submitting: false,
                    lifetime,
                }),
            }),
        }
    }

    /// Start a new open cycle and fetch the client profile in the background.
    /// Must be called from within a Tokio runtime.
    pub fn open(&self) {
        let token = CancellationToken::new();
        let fetch = {
            let mut state = self.inner.state.lock();
            state.lifetime.cancel();
            state.lifetime = token.clone();
            state.open = true;
            state.comment.clear();
            state.client = None;
            state.submitting = false;
            state.loading = !self.inner.workout.client_id.is_empty();
            state.loading
        };

        if fetch {
            let inner = self.inner.clone();
            tokio::spawn(inner.load_client(token));
        }
    }

    pub fn close(&self) {
        self.inner.close();
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.lock().open
    }

    pub fn set_comment(&self, comment: impl Into<String>) {
        self.inner.state.lock().comment = comment.into();
    }

    pub fn view(&self) -> DialogView {
        let state = self.inner.state.lock();
        if !state.open {
            return DialogView::Closed;
        }
        if state.loading {
            return DialogView::Loading;
        }

        DialogView::Ready(ReadyView {
            client: state.client.clone(),
            workout: self.inner.workout.clone(),
            comment: state.comment.clone(),
            submit_label: if state.submitting {
                SUBMITTING_LABEL
            } else {
                SUBMIT_LABEL
            },
            submit_enabled: !state.submitting,
        })
    }

    /// Post the current comment. Failures are reported to the host as an
    /// error toast and leave the dialog open for another attempt.
    pub async fn submit(&self) -> Result<SubmitOutcome, DialogError> {
        let (request, token) = {
            let mut state = self.inner.state.lock();
            if !state.open {
                return Err(DialogError::Closed);
            }
            if state.loading {
                return Err(DialogError::Loading);
            }
            if state.submitting {
                return Err(DialogError::AlreadySubmitting);
            }
            state.submitting = true;

            let request = FeedbackRequest {
                coach_id: self.inner.coach_id.clone(),
                client_id: self.inner.workout.client_id.clone(),
                workout_id: self.inner.workout.workout_id.clone(),
                comment: state.comment.clone(),
            };
            (request, state.lifetime.clone())
        };

        debug!(
            "Submitting feedback for workout {} (client {})",
            request.workout_id, request.client_id
        );

        // Not tied to the lifetime token: the server may already have stored the
        // feedback, so the host still hears about the outcome after a close
        let result = self.inner.api.submit_feedback(&request).await;

        let still_open = {
            let mut state = self.inner.state.lock();
            let still_open = !token.is_cancelled();
            if still_open {
                state.submitting = false;
            }
            still_open
        };

        let host = &self.inner.host;
        match result {
            Ok(receipt) => {
                let message = receipt
                    .toast_message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| SUCCESS_FALLBACK.to_string());

                host.toast(ToastKind::Success, &message);
                host.status_update(&request.workout_id, WorkoutStatus::Finished);
                if still_open {
                    self.inner.clone().schedule_close(token);
                }
                host.submitted(&request.comment);

                Ok(SubmitOutcome::Submitted { message })
            }
            Err(e) => {
                warn!("Feedback submission failed: {}", e);
                let message = e.toast_message().unwrap_or(ERROR_FALLBACK).to_string();
                host.toast(ToastKind::Error, &message);

                Ok(SubmitOutcome::Failed { message })
            }
        }
    }
}

impl<A, H> Drop for FeedbackDialog<A, H>
where
    A: CoachingApi + 'static,
    H: DialogHost,
{
    fn drop(&mut self) {
        self.inner.state.lock().lifetime.cancel();
    }
}

impl<A, H> Inner<A, H>
where
    A: CoachingApi + 'static,
    H: DialogHost,
{
    async fn load_client(self: Arc<Self>, token: CancellationToken) {
        let result = tokio::select! {
            _ = token.cancelled() => return,
            result = self.api.fetch_client(&self.workout.client_id) => result,
        };

        let mut state = self.state.lock();
        if token.is_cancelled() {
            return;
        }
        match result {
            Ok(client) => state.client = Some(client),
            Err(e) => warn!("Failed to fetch client data: {}", e),
        }
        state.loading = false;
    }

    fn schedule_close(self: Arc<Self>, token: CancellationToken) {
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(self.close_delay) => self.close(),
            }
        });
    }

    fn close(&self) {
        {
            let mut state = self.state.lock();
            if !state.open {
                return;
            }
            state.open = false;
            state.loading = false;
            state.submitting = false;
            state.lifetime.cancel();
        }
        self.host.closed();
    }
}
