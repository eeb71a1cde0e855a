use serde_json::json;

use crate::cli::{config::PortalConfig, utils, OutputFormat};
use crate::portal::{CoachingApi, HttpCoachingApi};

pub async fn handle(client_id: &str, config: &PortalConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let token = super::require_token(config, &output_format)?;
    let api = HttpCoachingApi::new(&config.base_url, Some(token))?;

    let client = api.fetch_client(client_id).await?;

    match output_format {
        OutputFormat::Json => {
            utils::output_success(&output_format, "Client loaded", Some(json!({ "user": client })))?;
        }
        OutputFormat::Text => {
            println!("{} ({})", client.display_name(), client.client_type);
            if let Some(title) = &client.title {
                println!("Title: {}", title);
            }
            if let Some(rating) = client.rating {
                println!("Rating: {:.1}", rating);
            }
            if let Some(pic) = &client.profile_pic {
                println!("Photo: {}", pic);
            }
        }
    }
    Ok(())
}
