//! File naming rules shared by URL downloads and direct uploads.

use chrono::Utc;
use reqwest::Url;

/// Extensions accepted as video files (lowercase, with the leading dot).
pub const VIDEO_EXTENSIONS: [&str; 7] = [".mp4", ".mov", ".avi", ".webm", ".mkv", ".flv", ".wmv"];

/// Name used when nothing better can be derived.
pub const FALLBACK_FILE_NAME: &str = "video.mp4";

/// Query parameters consulted, in order, when the URL path carries no usable name.
const NAME_QUERY_PARAMS: [&str; 3] = ["filename", "file", "name"];

/// Whether the name ends with a recognized video extension (case-insensitive).
pub fn has_video_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Prefixes the name with the current unix time in milliseconds.
///
/// This is the only collision avoidance between concurrent submissions into
/// the same category directory.
pub fn prefixed(name: &str) -> String {
    format!("{}_{}", Utc::now().timestamp_millis(), name)
}

/// Derives a sanitized, unprefixed file name from a download URL.
pub fn derive_file_name(url: &Url) -> String {
    let from_path = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty() && has_video_extension(segment))
        .map(str::to_string);

    let candidate = from_path
        .or_else(|| name_from_query(url))
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());

    sanitize_file_name(&candidate)
}

fn name_from_query(url: &Url) -> Option<String> {
    NAME_QUERY_PARAMS.iter().find_map(|param| {
        url.query_pairs()
            .find(|(key, _)| key == *param)
            .map(|(_, value)| value.into_owned())
            .filter(|value| has_video_extension(value))
    })
}

/// Derives a sanitized, unprefixed file name for a direct upload.
///
/// Client-supplied directory components are dropped.
pub fn upload_file_name(original: Option<&str>) -> String {
    let base = original
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..");

    match base {
        Some(name) => sanitize_file_name(name),
        None => FALLBACK_FILE_NAME.to_string(),
    }
}
