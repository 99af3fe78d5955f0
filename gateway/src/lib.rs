//! Storage gateway model for the IPFS HTTP `add` API.
//!
//! This crate owns everything about the gateway that does not need a browser:
//! where uploads are posted, how the newline-delimited JSON reply is read, how
//! browse links are derived from a content identifier, and how file sizes are
//! labelled. The UI crate drives the actual transfer and feeds the reply body
//! back through [`parse_add_response`].

use serde::Deserialize;

/// Public add-file endpoint used when nothing else is configured.
pub const DEFAULT_API_ENDPOINT: &str = "https://ipfs.infura.io:5001/api/v0/add";

/// Public read-only gateway used to build shareable links.
pub const DEFAULT_BROWSE_BASE: &str = "https://ipfs.io/ipfs";

/// Fixed query options: wrap the file in a directory and only report roots.
pub const ADD_QUERY: &str = "wrap-with-directory=true&quieter=true";

/// Multipart form field that carries the file body.
pub const FILE_FIELD: &str = "file";

/// Error returned while interpreting a gateway reply.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The reply body had no non-blank line to parse.
    #[error("gateway returned an empty response")]
    EmptyResponse,
    /// The last reply line was not a JSON object with a `Hash` string.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The gateway answered with a non-success HTTP status.
    #[error("gateway responded with status {0}")]
    Status(u16),
}

/// Where uploads go and where uploaded content can be browsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Add-file endpoint, without query string.
    pub api_endpoint: String,
    /// Browse prefix; links are `<browse_base>/<hash>[/<file>]`.
    pub browse_base: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_owned(),
            browse_base: DEFAULT_BROWSE_BASE.to_owned(),
        }
    }
}

impl GatewayConfig {
    /// Full URL to POST an upload to, including the fixed add options.
    #[must_use]
    pub fn add_url(&self) -> String {
        let sep = if self.api_endpoint.contains('?') { '&' } else { '?' };
        format!("{}{sep}{ADD_QUERY}", self.api_endpoint)
    }

    /// Browse link for the wrapping directory.
    #[must_use]
    pub fn content_url(&self, hash: &str) -> String {
        format!("{}/{hash}", self.browse_base.trim_end_matches('/'))
    }

    /// Browse link for a single file inside the wrapping directory.
    #[must_use]
    pub fn file_url(&self, hash: &str, file_name: &str) -> String {
        format!("{}/{file_name}", self.content_url(hash))
    }
}

/// One record of the `add` reply stream.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AddRecord {
    /// Content identifier.
    #[serde(rename = "Hash")]
    pub hash: String,
    /// Entry name; empty for the wrapping directory.
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    /// Cumulative size as reported by the gateway (a decimal string).
    #[serde(rename = "Size", default)]
    pub size: Option<String>,
}

/// Parse an `add` reply and return the authoritative record.
///
/// The reply is newline-delimited JSON. With `wrap-with-directory` the gateway
/// may emit one record per level, and the last one is the directory root, so
/// only the last non-blank line is read. Earlier lines are not validated.
///
/// # Errors
///
/// Returns [`GatewayError::EmptyResponse`] for a blank body and
/// [`GatewayError::Json`] when the last line is malformed or has no `Hash`.
pub fn parse_add_response(body: &str) -> Result<AddRecord, GatewayError> {
    let last = body
        .trim()
        .lines()
        .next_back()
        .ok_or(GatewayError::EmptyResponse)?;
    if last.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(serde_json::from_str(last)?)
}

/// Reject non-success HTTP statuses before the body is parsed.
///
/// # Errors
///
/// Returns [`GatewayError::Status`] for anything outside `200..300`.
pub fn check_status(status: u16) -> Result<(), GatewayError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(GatewayError::Status(status))
    }
}

/// Unit family used by [`human_file_size`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeUnits {
    /// Powers of 1000: kB, MB, GB, ...
    Decimal,
    /// Powers of 1024: KiB, MiB, GiB, ...
    Binary,
}

const DECIMAL_UNITS: [&str; 8] = ["kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const BINARY_UNITS: [&str; 8] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Format a byte count for display.
///
/// Values below one unit step print as whole bytes (`"500 B"`). Larger values
/// are divided until they drop below the step (or the largest unit is reached)
/// and printed with one decimal (`"1.0 KiB"`, `"1.5 MB"`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_file_size(bytes: u64, units: SizeUnits) -> String {
    let (thresh, names) = match units {
        SizeUnits::Decimal => (1000.0, &DECIMAL_UNITS),
        SizeUnits::Binary => (1024.0, &BINARY_UNITS),
    };
    let mut value = bytes as f64;
    if value < thresh {
        return format!("{bytes} B");
    }
    let mut unit = 0;
    value /= thresh;
    while value >= thresh && unit < names.len() - 1 {
        value /= thresh;
        unit += 1;
    }
    // Halves round up, so 1.25 prints as 1.3.
    let value = (value * 10.0).round() / 10.0;
    format!("{value:.1} {}", names[unit])
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
