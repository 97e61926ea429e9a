#![forbid(unsafe_code)]

//! Proportional scroll indicator math.
//!
//! The drawing half lives on [`Pad`](crate::Pad); this module keeps the
//! slider geometry as a pure function so the rounding rules can be tested
//! without a backend.

/// Slider placement within a track of `track` rows.
///
/// `top` and `bottom` are the list indices of the first and last visible
/// element, `size` the total list length. Returns `(slider_top,
/// slider_len)` where the slider covers rows `slider_top ..=
/// slider_top + slider_len`.
///
/// The slider is kept off the track's extremes unless the viewport really
/// is at one: row 0 only when `top == 0`, and the last track row exactly
/// when `bottom == size` (the exact-bottom case overrides the integer
/// rounding that would otherwise leave a gap).
pub fn slider_span(top: usize, bottom: usize, size: usize, track: usize) -> (usize, usize) {
    let mut slider_top = track * top / size;
    let slider_len = track * bottom.saturating_sub(top) / size;

    if top > 0 {
        slider_top = slider_top.max(1);
    }
    if bottom != size {
        slider_top = slider_top.min(track.saturating_sub(slider_len + 2));
    }
    if bottom == size {
        slider_top = track.saturating_sub(slider_len + 1);
    }
    (slider_top, slider_len)
}
