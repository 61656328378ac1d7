//! Viewport scrolling for row-oriented views.

/// First visible row that keeps `cursor` inside a viewport of `visible` rows.
///
/// Scrolls by the minimum amount: the cursor sits on the last visible row
/// when moving down past the viewport. The offset never exceeds
/// `total - visible`, so the viewport is never partially blank while
/// enough rows exist.
pub fn offset_for_cursor(cursor: usize, visible: usize, total: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    let max_offset = total - visible;
    let cursor = cursor.min(total - 1);
    cursor.saturating_sub(visible - 1).min(max_offset)
}
