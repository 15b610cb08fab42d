//! Line-oriented terminal front end.

pub mod chat_view;
pub mod contact_list;
pub mod setup;

use crate::api::ApiClient;
use crate::app::AppConfig;
use crate::contacts::{AddressBook, ContactDirectory};
use crate::error::{AppError, ConfigError};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub struct Terminal {
    lines: Lines<BufReader<Stdin>>,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.lines.next_line().await
    }

    pub async fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        Ok(self.next_line().await?.map(|l| l.trim().to_string()))
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Setup if needed, then contact list and chat screens until the user quits.
pub async fn run(
    mut config: AppConfig,
    config_path: Option<PathBuf>,
    contacts_path: Option<PathBuf>,
) -> Result<(), AppError> {
    let mut term = Terminal::new();

    if !config.is_complete() {
        setup::run_setup(&mut term, &mut config, config_path.as_deref()).await?;
    }
    config.validate()?;

    let client = ApiClient::from_config(&config)?;
    let contacts_path = contacts_path
        .or_else(|| config.contacts_file.clone())
        .ok_or_else(|| ConfigError::invalid("no contacts file, pass --contacts or set contacts_file"))?;
    let book = AddressBook::load(&contacts_path)?;
    let directory = ContactDirectory::from_address_book(book, config.contact_order);
    log::info!(
        "loaded {} contact groups from {}",
        directory.group_count(),
        contacts_path.display()
    );

    while let Some(contact) = contact_list::pick(&mut term, &directory).await? {
        chat_view::run(&mut term, &config, client.clone(), contact).await?;
    }
    Ok(())
}
