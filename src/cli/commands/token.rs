use anyhow::Context;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(
    config: &AppConfig,
    user: Option<Uuid>,
    hours: Option<u64>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let user_id = user.unwrap_or_else(Uuid::new_v4);
    let hours = hours.unwrap_or(config.security.jwt_expiry_hours);

    let claims = Claims::new(user_id, hours).context("invalid token lifetime")?;
    let expires = claims.exp;
    let token = generate_jwt(&config.security.jwt_secret, &claims)
        .context("failed to generate token")?;

    match output_format {
        OutputFormat::Json => {
            let out = json!({ "user": user_id, "token": token, "exp": expires });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("user:  {}", user_id);
            println!("token: {}", token);
        }
    }
    Ok(())
}
