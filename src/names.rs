use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

/// A name expires this many blocks after the block that registered or last
/// updated it.
pub const NAME_EXPIRATION_BLOCKS: i64 = 36_000;

/// Average block spacing, used to convert block counts to wall-clock estimates.
pub const BLOCK_SECONDS: i64 = 600;

/// Decodes an identifier or value as ASCII text. Returns None for data that
/// cannot be decoded, in which case only the hex form should be offered.
pub fn ascii_bytes(data: &[u8]) -> Option<String> {
    if !data.is_ascii() {
        return None;
    }

    String::from_utf8(data.to_vec()).ok()
}

fn is_domain_name(label: &str) -> bool {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").unwrap();
    };

    RE.is_match(label)
}

/// Human-facing form of a name identifier. Registered namespaces (`d/` for
/// domains, `id/` for identities) get a descriptive form; anything else is
/// shown raw, or as hex when it is not ASCII.
pub fn format_name_identifier(identifier: &[u8]) -> String {
    let ascii = match ascii_bytes(identifier) {
        Some(ascii) => ascii,
        None => return format!("Non-ASCII name {}", hex::encode(identifier)),
    };

    if let Some(label) = ascii.strip_prefix("d/") {
        if is_domain_name(label) {
            return format!("Domain {}.bit", label);
        }
    }

    if let Some(label) = ascii.strip_prefix("id/") {
        if is_domain_name(label) {
            return format!("Identity \"{}\"", label);
        }
    }

    format!("Non-standard name \"{}\"", ascii)
}

/// Human-facing form of a name value.
pub fn format_name_value(value: &[u8]) -> String {
    match ascii_bytes(value) {
        Some(ascii) => format!("ASCII {}", ascii),
        None => format!("Hex {}", hex::encode(value)),
    }
}

/// Estimates when a confirmed name output expires: the block count until
/// expiration and the corresponding wall-clock time, extrapolated from the tip
/// timestamp at [BLOCK_SECONDS] per block. None when the output's height is
/// unknown, since the expiration height cannot be computed yet.
pub fn name_expiration_datetime_estimate(
    height: Option<u32>,
    tip_height: u32,
    tip_timestamp: i64,
) -> Option<(i64, DateTime<Utc>)> {
    let height = height?;
    let expires_in = height as i64 + NAME_EXPIRATION_BLOCKS - tip_height as i64;
    let expires_at = Utc
        .timestamp_opt(tip_timestamp + expires_in * BLOCK_SECONDS, 0)
        .single()?;

    Some((expires_in, expires_at))
}
