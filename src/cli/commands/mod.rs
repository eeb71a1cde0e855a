pub mod client;
pub mod feedback;

use std::sync::Arc;

use crate::cli::{config::PortalConfig, utils, OutputFormat};
use crate::portal::{LoginHost, LoginPrompt};

struct ConsoleLoginHost;

impl LoginHost for ConsoleLoginHost {
    fn login(&self) {}

    fn closed(&self) {
        tracing::debug!("Login prompt dismissed");
    }
}

/// The configured bearer token, or the login prompt and an error when there is none
pub(crate) fn require_token(config: &PortalConfig, output_format: &OutputFormat) -> anyhow::Result<String> {
    if let Some(token) = &config.token {
        return Ok(token.clone());
    }

    let mut prompt = LoginPrompt::new(Arc::new(ConsoleLoginHost));
    prompt.open();
    if let Some(view) = prompt.view() {
        utils::output_error(output_format, view.title)?;
        eprintln!("{}", view.description);
        eprintln!("Pass --token or set FITCOACH_TOKEN.");
    }
    prompt.dismiss();

    anyhow::bail!("Authentication token is required")
}
