/// Makes a color translucent.
///
/// `#rrggbb` (and `#rgb`) become `rgba(r, g, b, opacity)`, `rgb(...)` is
/// rewritten to `rgba(..., opacity)`, and `rgba(...)` is returned as is.
/// Anything else, gradients included, passes through unchanged.
pub fn with_alpha(color: &str, opacity: f64) -> String {
    let color = color.trim();
    if color.starts_with("rgba") {
        return color.to_string();
    }
    if color.starts_with("rgb") {
        return color
            .replacen("rgb", "rgba", 1)
            .replacen(')', &format!(", {})", opacity), 1);
    }
    if let Some((r, g, b)) = parse_hex(color) {
        return format!("rgba({}, {}, {}, {})", r, g, b, opacity);
    }
    color.to_string()
}

pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 | 8 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 | 4 => {
            let double = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some((double(0)?, double(1)?, double(2)?))
        }
        _ => None,
    }
}

const FUNCTIONAL_PREFIXES: [&str; 7] = [
    "rgb(",
    "rgba(",
    "hsl(",
    "hsla(",
    "linear-gradient(",
    "radial-gradient(",
    "conic-gradient(",
];

/// Loose check that a palette value is usable as a CSS color or gradient.
pub fn is_color_expression(value: &str) -> bool {
    let value = value.trim();
    if value.starts_with('#') {
        return parse_hex(value).is_some();
    }
    FUNCTIONAL_PREFIXES
        .iter()
        .any(|prefix| value.starts_with(prefix))
        && value.ends_with(')')
}
