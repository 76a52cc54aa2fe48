//! Shareable links: `?colors=FF6F61-6B5B95-...`.

use crate::color::HexColor;
use crate::editor::Palette;
use crate::error::Result;

pub const QUERY_KEY: &str = "colors";

/// Hex digits of every color joined with `-`, no `#`.
pub fn encode_colors(palette: &Palette) -> String {
    palette
        .colors()
        .iter()
        .map(HexColor::to_hex_digits)
        .collect::<Vec<_>>()
        .join("-")
}

/// `{origin}{path}?colors=...`
pub fn share_url(origin: &str, path: &str, palette: &Palette) -> String {
    format!("{origin}{path}?{QUERY_KEY}={}", encode_colors(palette))
}

/// Read a palette out of a query string such as `?colors=FF0000-00FF00`.
///
/// Returns `Ok(None)` when the query carries no `colors` parameter or an
/// empty one; a malformed color is an error.
pub fn palette_from_query(query: &str) -> Result<Option<Palette>> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let Some(value) = query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find_map(|(key, value)| (key == QUERY_KEY).then_some(value))
    else {
        return Ok(None);
    };

    if value.is_empty() {
        return Ok(None);
    }
    let colors = value
        .split('-')
        .map(|digits| format!("#{digits}").parse())
        .collect::<Result<Vec<HexColor>>>()?;
    Palette::from_colors(colors).map(Some)
}
