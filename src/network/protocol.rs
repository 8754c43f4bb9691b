//! Unlock Wire Protocol
//!
//! A single ASCII datagram, one per TCP write, with no length prefix or
//! delimiter: the marker token followed by three decimal color components,
//! e.g. `UNLOCK 0.400 0.200 1.000`. Receivers scan for the marker anywhere
//! in the received buffer; a message whose color components fail to parse
//! still counts as an unlock, with the default tint substituted.

/// Marker token carried by every unlock message.
pub const UNLOCK_MARKER: &str = "UNLOCK";

/// Tint substituted when an unlock message carries unparsable components.
pub const DEFAULT_TINT: [f32; 3] = [1.0, 1.0, 1.0];

/// Encode an unlock message carrying the host's current tint.
///
/// Components are RGB in [0, 1], formatted to three decimal places.
pub fn encode_unlock(tint: [f32; 3]) -> String {
    format!(
        "{UNLOCK_MARKER} {:.3} {:.3} {:.3}",
        tint[0], tint[1], tint[2]
    )
}

/// Scan a received buffer for an unlock message.
///
/// Returns `None` when the marker is absent. Otherwise returns the tint
/// parsed from the three values following the marker, or [`DEFAULT_TINT`]
/// when they cannot be parsed.
pub fn parse_unlock(bytes: &[u8]) -> Option<[f32; 3]> {
    let text = String::from_utf8_lossy(bytes);
    let at = text.find(UNLOCK_MARKER)?;
    let rest = &text[at + UNLOCK_MARKER.len()..];

    let mut components = rest.split_whitespace().map(str::parse::<f32>);
    match (components.next(), components.next(), components.next()) {
        (Some(Ok(r)), Some(Ok(g)), Some(Ok(b))) => Some([r, g, b]),
        _ => Some(DEFAULT_TINT),
    }
}
