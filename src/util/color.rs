//! Hex color parsing for the background/clear color.

/// Parse `#rrggbb` / `rrggbb` / `#rgb` into sRGB components in [0, 1].
pub fn parse_hex_rgb(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let (r, g, b) = match digits.len() {
        6 => (
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ),
        3 => {
            // #abc expands to #aabbcc
            let r = channel(&digits[0..1])?;
            let g = channel(&digits[1..2])?;
            let b = channel(&digits[2..3])?;
            (r * 17, g * 17, b * 17)
        }
        _ => return None,
    };
    Some([
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    ])
}

/// sRGB transfer function inverse, per channel.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_default_background() {
        let rgb = parse_hex_rgb("#160920").unwrap();
        assert!((rgb[0] - 22.0 / 255.0).abs() < 1e-6);
        assert!((rgb[1] - 9.0 / 255.0).abs() < 1e-6);
        assert!((rgb[2] - 32.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn short_form_expands() {
        assert_eq!(parse_hex_rgb("#fff"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex_rgb("000"), Some([0.0, 0.0, 0.0]));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_hex_rgb("#12345"), None);
        assert_eq!(parse_hex_rgb("#gg0000"), None);
        assert_eq!(parse_hex_rgb("#ééé"), None);
    }

    #[test]
    fn linear_conversion_keeps_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!(srgb_to_linear(0.5) < 0.5);
    }
}
