//! Download folder sanitization.

use super::DEFAULT_FOLDER;

fn allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' ' | '/' | '\\')
}

/// Sanitizes a user-supplied download folder.
///
/// - Replaces anything but ASCII alphanumerics, `-`, `_`, space, `/` and `\`
///   with `_` (so `..` can never survive)
/// - Collapses consecutive underscores
/// - Trims leading/trailing whitespace and slashes
/// - Falls back to the default folder when nothing is left
pub fn sanitize_folder(raw: &str) -> String {
    if raw.trim().is_empty() {
        return DEFAULT_FOLDER.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut prev_underscore = false;

    for c in raw.chars() {
        let replacement = if allowed(c) { c } else { '_' };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c: char| c.is_whitespace() || c == '/' || c == '\\');
    if trimmed.is_empty() {
        DEFAULT_FOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_safe_nested_folder() {
        assert_eq!(sanitize_folder("videos/x clips"), "videos/x clips");
    }

    #[test]
    fn replaces_unsafe_chars_and_collapses() {
        assert_eq!(sanitize_folder("my:videos**now"), "my_videos_now");
        assert_eq!(sanitize_folder("a__b"), "a_b");
    }

    #[test]
    fn parent_dir_cannot_escape() {
        assert_eq!(sanitize_folder("../../etc"), "_/_/etc");
    }

    #[test]
    fn trims_slashes_and_spaces() {
        assert_eq!(sanitize_folder("  /clips/  "), "clips");
        assert_eq!(sanitize_folder("\\clips\\"), "clips");
    }

    #[test]
    fn empty_falls_back_to_default() {
        assert_eq!(sanitize_folder(""), DEFAULT_FOLDER);
        assert_eq!(sanitize_folder("   "), DEFAULT_FOLDER);
        assert_eq!(sanitize_folder("///"), DEFAULT_FOLDER);
    }
}
