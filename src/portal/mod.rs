//! Coach-facing client flows.
//!
//! Headless controllers for the workout feedback dialog and the login prompt,
//! plus the HTTP transport they talk through. Rendering is left to the caller;
//! each controller exposes a view model and reports outcomes through a host
//! trait supplied by the parent.

pub mod api;
pub mod feedback;
pub mod login;

pub use api::{ClientProfile, CoachingApi, FeedbackReceipt, FeedbackRequest, HttpCoachingApi, PortalError};
pub use feedback::{
    DialogError, DialogHost, DialogView, FeedbackDialog, ReadyView, SubmitOutcome, ToastKind,
    WorkoutStatus, WorkoutSummary,
};
pub use login::{LoginChoice, LoginHost, LoginPrompt, LoginView};
