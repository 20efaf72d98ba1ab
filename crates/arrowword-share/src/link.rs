use arrowword_core::Grid;
use serde::{Deserialize, Serialize};

use crate::{Codec, CodecError, ShapeError, WireCell, grid_from_wire, grid_to_wire};

#[derive(Debug, Serialize, Deserialize)]
struct SharePayload {
    grid: Vec<Vec<WireCell>>,
}

/// A grid opened from a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLink {
    /// The shared grid, without expectations.
    pub grid: Grid,
    /// `true` for solve-only links.
    pub locked: bool,
}

/// Errors raised when a share payload cannot be opened.
///
/// Nothing is loaded when decoding fails.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ShareError {
    /// The payload is not valid compressed data.
    #[display("cannot decompress share link: {_0}")]
    Codec(CodecError),
    /// The decompressed text is not a share payload.
    #[display("malformed share payload: {_0}")]
    Json(serde_json::Error),
    /// The payload does not describe a valid grid.
    #[display("invalid shared grid: {_0}")]
    Shape(ShapeError),
}

/// Encodes a grid as a URL fragment (without the leading `#`).
///
/// Solve-only links carry no letters and end in `&lock=1`.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized.
pub fn encode_fragment(
    grid: &Grid,
    locked: bool,
    codec: &impl Codec,
) -> Result<String, serde_json::Error> {
    let grid = if locked {
        grid.without_letters()
    } else {
        grid.clone()
    };
    let payload = SharePayload {
        grid: grid_to_wire(&grid),
    };
    let encoded = codec.encode(&serde_json::to_string(&payload)?);
    let suffix = if locked { "&lock=1" } else { "" };
    Ok(format!("p={encoded}{suffix}"))
}

/// Builds a full share URL from a base address.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized.
pub fn share_url(
    base: &str,
    grid: &Grid,
    locked: bool,
    codec: &impl Codec,
) -> Result<String, serde_json::Error> {
    let base = base.split_once('#').map_or(base, |(base, _)| base);
    Ok(format!("{base}#{}", encode_fragment(grid, locked, codec)?))
}

/// Opens a share link.
///
/// `link` is a URL fragment with or without the leading `#`, or a full URL.
/// Returns `Ok(None)` if it carries no payload.
///
/// # Errors
///
/// Returns [`ShareError`] if a payload is present but cannot be decoded.
pub fn decode_fragment(link: &str, codec: &impl Codec) -> Result<Option<SharedLink>, ShareError> {
    let fragment = link.split_once('#').map_or(link, |(_, fragment)| fragment);

    let mut payload = None;
    let mut locked = false;
    for pair in fragment.split('&') {
        match pair.split_once('=') {
            Some(("p", value)) if !value.is_empty() => payload = Some(value),
            Some(("lock", value)) => locked = value == "1",
            _ => {}
        }
    }
    let Some(payload) = payload else {
        return Ok(None);
    };

    let json = codec.decode(payload)?;
    let payload: SharePayload = serde_json::from_str(&json)?;
    let grid = grid_from_wire(payload.grid)?;
    log::debug!("decoded share link (locked: {locked})");
    Ok(Some(SharedLink { grid, locked }))
}
