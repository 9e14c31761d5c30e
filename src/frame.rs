//! Frame labels and output file naming

use std::path::Path;

/// Number of decimal digits in `n` (at least 1).
pub fn digit_width(n: u32) -> usize {
    let mut width = 1;
    let mut rest = n / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}

/// Format a 1-based frame number left-padded with `'0'` to `width`.
///
/// A number longer than `width` is returned unpadded, never truncated.
pub fn frame_label(n: u32, width: usize) -> String {
    format!("{:0width$}", n, width = width)
}

/// Source file name without a trailing `.svg`.
///
/// Only the exact lowercase `.svg` suffix is stripped; any other extension
/// stays part of the stem (`pointer.v2` -> `pointer.v2`, `x.SVG` -> `x.SVG`).
pub fn source_stem(source: &str) -> &str {
    let name = Path::new(source)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(source);
    match name.strip_suffix(".svg") {
        Some(stem) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// Output bitmap name for a static source: `<stem>.png`
pub fn static_output_name(source: &str) -> String {
    format!("{}.png", source_stem(source))
}

/// Output bitmap names for an animated source, in frame order.
///
/// A single-frame source gets the plain `<stem>.png`; otherwise every frame is
/// suffixed with its label, padded to the digit width of `frames`.
pub fn animated_output_names(source: &str, frames: u32) -> Vec<String> {
    let stem = source_stem(source);
    if frames == 1 {
        return vec![format!("{}.png", stem)];
    }
    let width = digit_width(frames);
    (1..=frames)
        .map(|index| format!("{}-{}.png", stem, frame_label(index, width)))
        .collect()
}
