use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use serde_json::json;
use tokio::sync::Notify;

use crate::cli::{config::PortalConfig, utils, OutputFormat};
use crate::portal::{
    DialogHost, DialogView, FeedbackDialog, HttpCoachingApi, SubmitOutcome, ToastKind, WorkoutStatus,
    WorkoutSummary,
};

const LOAD_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Args, Debug)]
pub struct FeedbackArgs {
    #[arg(long, help = "Coach id submitting the feedback")]
    pub coach_id: String,

    #[arg(long, help = "Client who did the workout")]
    pub client_id: String,

    #[arg(long, help = "Workout being reviewed")]
    pub workout_id: String,

    #[arg(long, help = "Feedback text")]
    pub comment: String,

    #[arg(long = "type", default_value = "", help = "Workout type, for display")]
    pub kind: String,

    #[arg(long, default_value = "", help = "Workout time, for display")]
    pub time: String,

    #[arg(long, default_value = "", help = "Workout date, for display")]
    pub date: String,
}

/// Prints toasts and status changes; wakes the command once the dialog closes
struct ConsoleHost {
    output_format: OutputFormat,
    closed: Notify,
}

impl DialogHost for ConsoleHost {
    fn toast(&self, kind: ToastKind, message: &str) {
        let printed = match kind {
            ToastKind::Success => utils::output_success(&self.output_format, message, None),
            ToastKind::Error => utils::output_error(&self.output_format, message),
        };
        if let Err(e) = printed {
            tracing::warn!("Failed to print toast: {}", e);
        }
    }

    fn status_update(&self, workout_id: &str, status: WorkoutStatus) {
        tracing::info!("Workout {} is now {}", workout_id, status);
    }

    fn closed(&self) {
        self.closed.notify_one();
    }
}

pub async fn handle(args: FeedbackArgs, config: &PortalConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let token = super::require_token(config, &output_format)?;
    let api = Arc::new(HttpCoachingApi::new(&config.base_url, Some(token))?);
    let host = Arc::new(ConsoleHost {
        output_format: output_format.clone(),
        closed: Notify::new(),
    });

    let workout = WorkoutSummary {
        workout_id: args.workout_id,
        client_id: args.client_id,
        kind: args.kind,
        time: args.time,
        date: args.date,
    };
    let dialog = FeedbackDialog::with_close_delay(api, host.clone(), args.coach_id, workout, config.close_delay());

    dialog.open();
    let view = tokio::time::timeout(LOAD_TIMEOUT, async {
        loop {
            match dialog.view() {
                DialogView::Loading => tokio::time::sleep(Duration::from_millis(50)).await,
                view => break view,
            }
        }
    })
    .await
    .map_err(|_| anyhow::anyhow!("Timed out loading client profile"))?;

    if let (DialogView::Ready(ready), OutputFormat::Text) = (&view, &output_format) {
        match &ready.client {
            Some(client) => println!("Workout feedback for {} ({})", client.display_name(), client.client_type),
            None => println!("Workout feedback (client profile unavailable)"),
        }
        println!("Type: {}  Time: {}  Date: {}", ready.workout.kind, ready.workout.time, ready.workout.date);
    }

    dialog.set_comment(args.comment);
    match dialog.submit().await? {
        SubmitOutcome::Submitted { .. } => {
            host.closed.notified().await;
            if let OutputFormat::Json = output_format {
                let status = json!({ "status": WorkoutStatus::Finished });
                println!("{}", serde_json::to_string_pretty(&status)?);
            }
            Ok(())
        }
        SubmitOutcome::Failed { .. } => anyhow::bail!("Feedback submission failed"),
    }
}
