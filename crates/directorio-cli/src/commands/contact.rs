//! Contact command handlers: copying a field and opening outbound links

use std::io::{self, Write};

use anyhow::{bail, Context, Result};

use directorio_core::links::{email_link, phone_link, whatsapp_link};
use directorio_core::{Directory, Field, Official};

use crate::output::{Output, OutputFormat};

/// How to reach an official
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Via {
    /// Dial the phone number
    Call,
    /// Open a WhatsApp chat
    Whatsapp,
    /// Compose an email
    Email,
}

/// Write one field's raw value to stdout, for piping into a clipboard tool
pub fn copy(directory: &Directory, key: String, field: Field, output: &Output) -> Result<()> {
    let official = super::resolve(directory, &key)?;
    let value = official.field(field);
    if value.is_empty() {
        bail!("{} has no {}", official.identity_key(), field);
    }

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({"key": official.identity_key(), "field": field.to_string(), "value": value})
            );
        }
        OutputFormat::Human | OutputFormat::Quiet => {
            let mut stdout = io::stdout();
            write!(stdout, "{}", value)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Build the outbound link for `via`, if the official has the needed field
pub fn link_for(official: &Official, via: Via) -> Option<String> {
    match via {
        Via::Call => phone_link(official.phone()),
        Via::Whatsapp => whatsapp_link(official.chat_number()),
        Via::Email => email_link(official.email()),
    }
}

/// Open an outbound link with the system handler
pub fn open(
    directory: &Directory,
    key: String,
    via: Via,
    dry_run: bool,
    output: &Output,
) -> Result<()> {
    let official = super::resolve(directory, &key)?;
    let Some(link) = link_for(official, via) else {
        let missing = match via {
            Via::Call => "phone number",
            Via::Whatsapp => "phone or WhatsApp number",
            Via::Email => "email address",
        };
        bail!("{} has no {}", official.identity_key(), missing);
    };

    if dry_run {
        println!("{}", link);
        return Ok(());
    }

    open::that(&link).with_context(|| format!("Failed to open {}", link))?;
    output.success(&format!("Opened {}", link));
    Ok(())
}
