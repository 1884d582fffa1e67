//! Share links
//!
//! A token is `base64(json({ "code", "filename" }))` over the UTF-8 bytes,
//! carried as the URL fragment so it never reaches a server. Tokens are
//! produced with the URL-safe alphabet and no padding; decoding also accepts
//! the standard alphabet and padded input.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::DecodeError;

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Session content carried by a share token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareState {
    #[serde(rename = "code")]
    pub source: String,
    #[serde(rename = "filename", default)]
    pub name: String,
}

impl ShareState {
    pub fn new(source: impl Into<String>, name: impl Into<String>) -> Self {
        ShareState {
            source: source.into(),
            name: name.into(),
        }
    }
}

/// Token for `source` under `name`
pub fn encode(source: &str, name: &str) -> String {
    let payload = json!({ "code": source, "filename": name }).to_string();
    URL_SAFE_NO_PAD.encode(payload.as_bytes())
}

/// Decode a token, reporting why it is malformed
pub fn try_decode(token: &str) -> Result<ShareState, DecodeError> {
    let token = token.trim().trim_start_matches('#');
    if token.is_empty() {
        return Err(DecodeError::Empty);
    }

    let normalized: String = token
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = URL_SAFE_LENIENT.decode(normalized.as_bytes())?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

/// Decode a token; malformed input yields `None`
pub fn decode(token: &str) -> Option<ShareState> {
    match try_decode(token) {
        Ok(state) => Some(state),
        Err(e) => {
            debug!(error = %e, "ignoring malformed share token");
            None
        }
    }
}

/// `page` with the token for `state` as its fragment
pub fn share_url(page: &Url, state: &ShareState) -> Url {
    let mut url = page.clone();
    url.set_fragment(Some(&encode(&state.source, &state.name)));
    url
}

/// State carried in the fragment of `url`, if any
pub fn from_url(url: &str) -> Option<ShareState> {
    let url = Url::parse(url).ok()?;
    decode(url.fragment()?)
}

/// Accept either a full share link or a bare token
pub fn from_link_or_token(input: &str) -> Option<ShareState> {
    let input = input.trim();
    if input.contains("://") {
        from_url(input)
    } else {
        decode(input)
    }
}
