use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const AUDIO_EXTENSION: &str = "mp3";
const FALLBACK_STEM: &str = "name";

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// File name of the audio generated for `name`.
///
/// Whitespace runs become `_`. Characters that could escape the audio
/// directory or break a URL are percent-encoded, as is a leading `.`, so
/// names that differ only in punctuation still get their own file.
/// Same input, same file name.
pub fn audio_file_name(name: &str) -> String {
    let underscored = whitespace_pattern().replace_all(name.trim(), "_");

    let mut stem = String::with_capacity(underscored.len());
    let mut buf = [0u8; 4];
    let mut leading = true;
    for c in underscored.chars() {
        if leading && c == '.' {
            stem.push_str("%2E");
            continue;
        }
        leading = false;
        if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\'') {
            stem.push(c);
        } else {
            stem.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }

    if stem.is_empty() {
        format!("{}.{}", FALLBACK_STEM, AUDIO_EXTENSION)
    } else {
        format!("{}.{}", stem, AUDIO_EXTENSION)
    }
}

/// Final path component of a client-supplied file name.
pub fn upload_basename(filename: &str) -> Option<String> {
    let normalized = filename.replace('\\', "/");
    Path::new(&normalized)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::trim)
        .filter(|name| !name.is_empty() && !name.starts_with('.'))
        .map(str::to_string)
}

pub fn is_csv_file_name(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
