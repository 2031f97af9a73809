//! Call-site resolution: which application file and line issued a log call.
//!
//! The primary strategy captures caller metadata through `#[track_caller]`
//! on the [`Logger`][crate::Logger] methods, which is stable across call-site
//! topologies. [`parse_frame`] remains available for integrating with
//! externally captured textual stack frames.

use std::panic::Location;

/// Sentinel origin used when the call site cannot be determined.
///
/// Resolution never fails; a logger must not crash its caller over a missing
/// file name.
pub const ORIGIN_UNAVAILABLE: &str = "FileNameError";

/// Formats a captured caller location as `"<fileBaseName>:<line>"`.
pub(crate) fn from_caller(location: &Location<'_>) -> String {
    base_name(location.file()).map_or_else(
        || ORIGIN_UNAVAILABLE.to_string(),
        |name| format!("{name}:{}", location.line()),
    )
}

/// Parses one textual stack frame of the shape `path/to/file.rs:line:column`
/// into `"file.rs:line"`.
///
/// Directory components are stripped to the file's base name, and the
/// trailing column is discarded to isolate the line number. Any frame that
/// does not match this shape yields [`ORIGIN_UNAVAILABLE`] instead of an
/// error.
pub fn parse_frame(frame: &str) -> String {
    try_parse_frame(frame).unwrap_or_else(|| ORIGIN_UNAVAILABLE.to_string())
}

fn try_parse_frame(frame: &str) -> Option<String> {
    let mut pieces = frame.trim().rsplitn(3, ':');
    let _column = pieces.next()?;
    let line: u32 = pieces.next()?.parse().ok()?;
    let file = base_name(pieces.next()?)?;
    let file = file.trim_start_matches('(');
    if file.is_empty() {
        return None;
    }
    Some(format!("{file}:{line}"))
}

fn base_name(path: &str) -> Option<&str> {
    path.trim()
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{ORIGIN_UNAVAILABLE, base_name, from_caller, parse_frame};

    #[test]
    fn caller_location_keeps_base_name_and_line() {
        let location = std::panic::Location::caller();
        let origin = from_caller(location);
        assert!(origin.starts_with("origin.rs:"));
    }

    #[test]
    fn frame_with_directories_resolves_to_base_name() {
        assert_eq!(parse_frame("src/network/dial.rs:42:17"), "dial.rs:42");
    }

    #[test]
    fn decorated_frame_resolves() {
        assert_eq!(
            parse_frame("    at connect (src/network/dial.rs:42:17)"),
            "dial.rs:42"
        );
    }

    #[test]
    fn windows_style_frame_resolves() {
        assert_eq!(parse_frame(r"C:\svc\src\main.rs:7:1"), "main.rs:7");
    }

    #[test]
    fn corrupted_frames_yield_sentinel() {
        for frame in ["", "garbage", "a:b:c", "no-line-here:", ":::", "/:1:2"] {
            assert_eq!(parse_frame(frame), ORIGIN_UNAVAILABLE, "frame: {frame:?}");
        }
    }

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name("a/b/c.rs"), Some("c.rs"));
        assert_eq!(base_name("c.rs"), Some("c.rs"));
        assert_eq!(base_name("a/b/"), None);
        assert_eq!(base_name(""), None);
    }
}
