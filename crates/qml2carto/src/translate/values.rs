//! Mapping raw property strings to CartoCSS values

/// Written in place of a dash array when the pen style has no equivalent
pub const UNMAPPED_DASH_PATTERN: &str = "XXX";

/// Dash array meaning "no dashes"; never emitted
pub const SOLID_DASH_PATTERN: &str = "none";

/// QGIS marker size (millimetres) to CartoCSS marker width (pixels)
pub const MARKER_SIZE_FACTOR: f64 = 5.0;

/// Wrap comma separated channels as `rgba(...)`; the channels are not checked
pub fn format_color(raw: &str) -> String {
    format!("rgba({raw})")
}

/// Dash array for a QGIS pen style
pub fn format_dash_pattern(raw: Option<&str>) -> &'static str {
    match raw {
        Some("solid") => SOLID_DASH_PATTERN,
        Some("dash") => "5, 2",
        Some("dot") => "1, 1",
        _ => UNMAPPED_DASH_PATTERN,
    }
}

/// Scaled marker width, or `None` when `raw` is not a finite number
pub fn scale_marker_size(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|size| size.is_finite())
        .map(|size| size * MARKER_SIZE_FACTOR)
}

/// Shortest text that reads back as `value`
///
/// Integral values keep a fractional part (`10.0`, not `10`). Magnitudes below
/// `1e-4` or from `1e16` up use a signed, two-digit exponent (`5e+16`,
/// `1e-05`).
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-4..1e16).contains(&magnitude) {
        return format!("{value:?}");
    }

    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => match exponent.strip_prefix('-') {
            Some(digits) => format!("{mantissa}e-{digits:0>2}"),
            None => format!("{mantissa}e+{exponent:0>2}"),
        },
        None => scientific,
    }
}
