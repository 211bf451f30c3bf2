//! Command handlers

pub mod config;
pub mod contact;
pub mod list;
pub mod transfer;

use anyhow::{bail, Result};

use directorio_core::{Directory, Lookup, Official};

/// Resolve a record key (full identity key or unique prefix)
pub fn resolve<'a>(directory: &'a Directory, key: &str) -> Result<&'a Official> {
    match directory.find(key) {
        Lookup::Found(official) => Ok(official),
        Lookup::NotFound => bail!("No official found matching: {}", key),
        Lookup::Ambiguous(matches) => {
            eprintln!("Multiple officials match '{}':", key);
            for official in &matches {
                eprintln!("  {} - {}", official.identity_key(), official.name());
            }
            bail!("Ambiguous key. Please provide more characters.");
        }
    }
}
