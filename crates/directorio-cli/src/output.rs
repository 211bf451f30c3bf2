//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

use directorio_core::links::{email_link, phone_link, whatsapp_link};
use directorio_core::query::category_label;
use directorio_core::Official;

/// Page title shown above listings
const TITLE: &str = "Directorio de Autoridades";

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const NO_RESULTS: &str = "No results found. Adjust the filters or check your search.";

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the listing of visible officials, one per line
    pub fn print_officials(&self, officials: &[&Official], updated: NaiveDate) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("{}", TITLE);
                println!("Updated: {}", updated_label(updated));
                println!();
                if officials.is_empty() {
                    println!("{}", NO_RESULTS);
                    return Ok(());
                }
                for official in officials {
                    println!("{}", summary_line(official));
                }
                println!("\n{} official(s)", officials.len());
            }
            OutputFormat::Json => print_json(&officials)?,
            OutputFormat::Quiet => {
                for official in officials {
                    println!("{}", official.identity_key());
                }
            }
        }
        Ok(())
    }

    /// Print a single official in full
    pub fn print_official(&self, official: &Official) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                for line in card_lines(official) {
                    println!("{}", line);
                }
            }
            OutputFormat::Json => print_json(official)?,
            OutputFormat::Quiet => println!("{}", official.identity_key()),
        }
        Ok(())
    }

    /// Print-friendly rendering: full cards, no header or summary
    pub fn print_cards(&self, officials: &[&Official]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if officials.is_empty() {
                    println!("{}", NO_RESULTS);
                    return Ok(());
                }
                for (i, official) in officials.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    for line in card_lines(official) {
                        println!("{}", line);
                    }
                }
            }
            OutputFormat::Json => print_json(&officials)?,
            OutputFormat::Quiet => {
                for official in officials {
                    println!("{}", official.identity_key());
                }
            }
        }
        Ok(())
    }

    /// Print categories with the number of records in each
    pub fn print_categories(&self, categories: &[(String, usize)]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                for (name, count) in categories {
                    println!("{} ({})", category_label(name), count);
                }
            }
            OutputFormat::Json => {
                let json: Vec<_> = categories
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&json)?;
            }
            OutputFormat::Quiet => {
                for (name, _) in categories {
                    println!("{}", name);
                }
            }
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a side note that must not mix with data on stdout
    pub fn notice(&self, msg: &str) {
        if self.format == OutputFormat::Human {
            eprintln!("{}", msg);
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// "Updated" date in long Spanish form, e.g. `05 de marzo de 2026`
pub fn updated_label(date: NaiveDate) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// One-line summary used in listings
fn summary_line(official: &Official) -> String {
    format!(
        "{:<12} | {:<35} | {:<35} | {}",
        truncate(&official.identity_key(), 12),
        truncate(official.name(), 35),
        truncate(official.position(), 35),
        official.category()
    )
}

/// Full card, skipping every field that is absent
fn card_lines(official: &Official) -> Vec<String> {
    let avatar = if official.has_photo() {
        "[foto]".to_string()
    } else {
        match official.initials() {
            initials if initials.is_empty() => "?".to_string(),
            initials => initials,
        }
    };

    let mut lines = vec![format!("{:<4} {}", avatar, official.name())];
    for text in [official.position(), official.department()] {
        if !text.is_empty() {
            lines.push(format!("     {}", text));
        }
    }

    let mut detail = |label: &str, value: String| {
        if !value.is_empty() {
            lines.push(format!("     {:<9} {}", label, value));
        }
    };

    detail("Term:", official.term().to_string());
    detail("Location:", official.location().to_string());
    detail("Email:", official.email().to_string());
    detail(
        "Phone:",
        match phone_link(official.phone()) {
            Some(link) => format!("{} ({})", official.phone(), link),
            None => String::new(),
        },
    );
    detail(
        "WhatsApp:",
        whatsapp_link(official.chat_number()).unwrap_or_default(),
    );
    detail("Mail:", email_link(official.email()).unwrap_or_default());
    detail("Photo:", official.photo().to_string());

    lines
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directorio_core::seed::seed_records;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        // Counts characters, not bytes
        assert_eq!(truncate("Dirección", 9), "Dirección");
        assert_eq!(truncate("Rodríguez Gonzales", 8), "Rodrí...");
    }

    #[test]
    fn test_updated_label() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(updated_label(date), "05 de marzo de 2026");
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(updated_label(date), "31 de diciembre de 2025");
    }

    #[test]
    fn test_card_lines_full() {
        let official = &seed_records()[0];
        let lines = card_lines(official);
        assert_eq!(lines[0], "GMS  Guillermo Morales Sanchez");
        assert!(lines.iter().any(|l| l.contains("tel:073000000")));
        assert!(lines.iter().any(|l| l.contains("https://wa.me/51900000000")));
        assert!(lines.iter().any(|l| l.contains("mailto:alcaldia@munismf.gob.pe")));
        // Empty photo is not shown
        assert!(!lines.iter().any(|l| l.contains("Photo:")));
    }

    #[test]
    fn test_card_lines_sparse_record() {
        let official = Official::default();
        let lines = card_lines(&official);
        assert_eq!(lines, vec!["?    ".to_string()]);
    }

    #[test]
    fn test_card_whatsapp_falls_back_to_phone() {
        let official = Official {
            phone: Some("073-000020".to_string()),
            ..Official::new("x", "Ana Ruiz")
        };
        let lines = card_lines(&official);
        assert!(lines.iter().any(|l| l.contains("https://wa.me/073000020")));
        assert!(!lines.iter().any(|l| l.contains("Mail:")));
    }

    #[test]
    fn test_card_with_photo() {
        let official = Official {
            photo: Some("https://munismf.gob.pe/fotos/alc.jpg".to_string()),
            ..Official::new("x", "Ana Ruiz")
        };
        let lines = card_lines(&official);
        assert!(lines[0].starts_with("[foto]"));
        assert!(lines.iter().any(|l| l.contains("alc.jpg")));
    }

    #[test]
    fn test_summary_line() {
        let line = summary_line(&seed_records()[1]);
        assert!(line.starts_with("gm-01"));
        assert!(line.ends_with("Alta Dirección"));
    }
}
