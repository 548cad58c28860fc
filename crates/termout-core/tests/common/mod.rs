//! Shared helpers for console integration tests.

#![allow(dead_code)]

pub mod gated_writer;

use termout_core::console::ERASE_LINE;

/// Checks the byte stream a terminal would see: every progress frame
/// (`\r` + text) is followed by another `\r` (a redraw or an erase), so no
/// plain text is ever written over a bar, and the stream never ends with a bar
/// still showing.
pub fn assert_clean_terminal(out: &str) {
    let mut rest = out;
    while let Some(pos) = rest.find('\r') {
        rest = &rest[pos..];
        if let Some(after) = rest.strip_prefix(ERASE_LINE) {
            rest = after;
            continue;
        }
        let frame_end = rest[1..]
            .find('\r')
            .unwrap_or_else(|| panic!("progress frame left on screen: {:?}", rest));
        let frame = &rest[1..1 + frame_end];
        assert!(!frame.contains('\n'), "text written over a bar: {:?}", frame);
        rest = &rest[1 + frame_end..];
    }
}
