//! Outbound contact links
//!
//! Pure string transforms. Numbers are reduced to their digits with no
//! check on whether the result is a plausible phone number.

/// Base URL for chat links
pub const WHATSAPP_BASE: &str = "https://wa.me/";

/// Dialing link for a phone number, `None` when there is no number
pub fn phone_link(number: &str) -> Option<String> {
    if number.is_empty() {
        return None;
    }
    Some(format!("tel:{}", digits(number)))
}

/// Chat link for a messaging number, `None` when there is no number
pub fn whatsapp_link(number: &str) -> Option<String> {
    if number.is_empty() {
        return None;
    }
    Some(format!("{}{}", WHATSAPP_BASE, digits(number)))
}

/// Mail link for an address, `None` when there is no address
pub fn email_link(address: &str) -> Option<String> {
    if address.is_empty() {
        return None;
    }
    Some(format!("mailto:{}", address))
}

fn digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}
