use crate::domain::DomainError;

/// Convert `#rrggbb` into a CSS `rgba(r, g, b, a)` string.
pub fn hex_to_rgba(hex: &str, alpha: f32) -> Result<String, DomainError> {
    let normalized = hex.trim().trim_start_matches('#');
    if normalized.len() != 6 {
        return Err(DomainError::InvalidColor(hex.to_string()));
    }
    let value = u32::from_str_radix(normalized, 16)
        .map_err(|_| DomainError::InvalidColor(hex.to_string()))?;

    let r = (value >> 16) & 0xff;
    let g = (value >> 8) & 0xff;
    let b = value & 0xff;
    Ok(format!("rgba({}, {}, {}, {})", r, g, b, alpha))
}

/// Convert a CSS `rgb(...)`/`rgba(...)` string into `#rrggbb`.
///
/// Unparsable input yields `#000000` so colour pickers always have a value.
pub fn rgba_to_hex(css: &str) -> String {
    parse_rgb_channels(css)
        .map(|[r, g, b]| format!("#{:02x}{:02x}{:02x}", r, g, b))
        .unwrap_or_else(|| "#000000".to_string())
}

fn parse_rgb_channels(css: &str) -> Option<[u8; 3]> {
    let css = css.trim();
    let inner = css
        .strip_prefix("rgba(")
        .or_else(|| css.strip_prefix("rgb("))?
        .strip_suffix(')')?;

    let mut channels = inner.split(',').map(|part| part.trim().parse::<u8>().ok());
    Some([channels.next()??, channels.next()??, channels.next()??])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgba() {
        assert_eq!(hex_to_rgba("#0f172a", 0.7).unwrap(), "rgba(15, 23, 42, 0.7)");
        assert_eq!(hex_to_rgba("fcd34d", 1.0).unwrap(), "rgba(252, 211, 77, 1)");
        assert!(hex_to_rgba("#xyz", 1.0).is_err());
    }

    #[test]
    fn test_rgba_to_hex() {
        assert_eq!(rgba_to_hex("rgba(15, 23, 42, 0.72)"), "#0f172a");
        assert_eq!(rgba_to_hex("rgb(2,6,23)"), "#020617");
        assert_eq!(rgba_to_hex("transparent"), "#000000");
    }
}
