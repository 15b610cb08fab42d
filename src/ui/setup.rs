use crate::api::ApiClient;
use crate::app::AppConfig;
use crate::error::AppError;
use crate::ui::Terminal;
use crate::utils::normalize_url;
use std::path::Path;

/// Asks for whatever the config is missing, checks the server and saves.
pub async fn run_setup(
    term: &mut Terminal,
    config: &mut AppConfig,
    path: Option<&Path>,
) -> Result<(), AppError> {
    println!("First run: connect to your chat server.");

    if config.base_url.trim().is_empty() {
        config.base_url = normalize_url(&ask_required(term, "Server URL: ").await?);
    }
    if config.phone_number.trim().is_empty() {
        config.phone_number = ask_required(term, "Your phone number: ").await?;
    }
    if config.api_token.trim().is_empty() {
        config.api_token = ask_required(term, "API token: ").await?;
    }
    if config.display_name.trim().is_empty() {
        config.display_name = term.ask("Your name: ").await?.unwrap_or_default();
    }
    if config.contacts_file.is_none() {
        let answer = term.ask("Contacts file (blank to skip): ").await?.unwrap_or_default();
        if !answer.is_empty() {
            config.contacts_file = Some(answer.into());
        }
    }

    println!("Connecting…");
    let status = finish_setup(config, path).await?;
    println!("{}", status);
    Ok(())
}

/// Validates, checks the server and saves. The config is written whatever
/// the check says; the returned status line is only meaningful once saved.
pub async fn finish_setup(config: &AppConfig, path: Option<&Path>) -> Result<&'static str, AppError> {
    config.validate()?;
    let status = probe(config).await;
    let saved = config.save(path)?;
    log::info!("saved config to {}", saved.display());
    Ok(status)
}

/// One-line status for the server check.
pub async fn probe(config: &AppConfig) -> &'static str {
    let client = match ApiClient::from_config(config) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("server check skipped: {}", e);
            return "Saved (server unchecked)";
        }
    };
    match client.users().await {
        Ok(_) => "Connected",
        Err(e) => {
            log::warn!("server check failed: {}", e);
            "Saved (server unreachable)"
        }
    }
}

async fn ask_required(term: &mut Terminal, prompt: &str) -> std::io::Result<String> {
    loop {
        match term.ask(prompt).await? {
            Some(answer) if !answer.is_empty() => return Ok(answer),
            Some(_) => continue,
            None => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "input closed during setup",
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> AppConfig {
        let mut cfg = AppConfig::new();
        cfg.base_url = base_url.to_string();
        cfg.phone_number = "999".into();
        cfg.api_token = "tok".into();
        cfg
    }

    #[tokio::test]
    async fn reachable_server_reports_connected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        assert_eq!(probe(&config(&server.uri())).await, "Connected");
    }

    #[tokio::test]
    async fn unreachable_server_reports_saved() {
        assert_eq!(probe(&config("http://127.0.0.1:9")).await, "Saved (server unreachable)");
    }

    #[tokio::test]
    async fn config_is_saved_after_a_failed_check() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("chat-simple.toml");
        let cfg = config("http://127.0.0.1:9");

        let status = finish_setup(&cfg, Some(&file)).await.unwrap();
        assert_eq!(status, "Saved (server unreachable)");
        assert_eq!(AppConfig::load(Some(&file)).unwrap(), cfg);
    }

    #[tokio::test]
    async fn incomplete_config_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("chat-simple.toml");
        let mut cfg = config("http://127.0.0.1:9");
        cfg.api_token.clear();

        assert!(finish_setup(&cfg, Some(&file)).await.is_err());
        assert!(!file.exists());
    }
}
