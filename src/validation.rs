//! Pure predicates shared by load-time sanitization, display and input
//! validation.

use regex::Regex;
use std::sync::LazyLock;

static IMAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("static image url pattern"));

static HANGUL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ㄱ-ㅎㅏ-ㅣ가-힣]").expect("static hangul pattern"));

/// Returns true when `s` looks like an absolute http(s) URL.
pub fn is_image_url(s: &str) -> bool {
    IMAGE_URL.is_match(s)
}

/// Returns true when `s` contains any Hangul jamo or syllable.
pub fn contains_hangul(s: &str) -> bool {
    HANGUL.is_match(s)
}

/// Upper-cases raw caption input the way the prompt echoes it back.
pub fn normalize_caption(raw: &str) -> String {
    raw.to_uppercase()
}
