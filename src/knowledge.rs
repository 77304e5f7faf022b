//! Knowledge-base text utilities
//!
//! Prepares website content for knowledge upserts: strip markup, pull the
//! page title, and split long text into sentence-aware chunks. Sentence
//! boundaries include the Arabic question mark.
//!
//! Unlike the page-scraping pipeline that feeds it, everything here is pure
//! computation; fetching is the host application's concern.

use once_cell::sync::Lazy;
use regex::Regex;

/// Default character cap per chunk
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 500;

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid regex"));

static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid regex"));

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>([^<]+)</title>").expect("valid regex"));

/// Strip script/style blocks and tags, collapse whitespace
pub fn strip_html(html: &str) -> String {
    let no_scripts = SCRIPT_BLOCK.replace_all(html, " ");
    let no_styles = STYLE_BLOCK.replace_all(&no_scripts, " ");
    let no_tags = TAG.replace_all(&no_styles, " ");
    WHITESPACE.replace_all(&no_tags, " ").trim().to_string()
}

/// Extract the page title, if present and non-empty
pub fn extract_title(html: &str) -> Option<String> {
    TITLE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Split text into chunks of at most `max_chunk_chars` characters.
///
/// Splits on sentence terminators (`.`, `!`, `?`, `؟`), packing whole
/// sentences into each chunk. A sentence longer than the cap is hard-split
/// on character boundaries, so no chunk ever exceeds the cap. Chunks are
/// trimmed and non-empty.
pub fn chunk_text(text: &str, max_chunk_chars: usize) -> Vec<String> {
    if max_chunk_chars == 0 {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for sentence in text.split(|c: char| matches!(c, '.' | '!' | '?' | '؟')) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let sentence_chars = sentence.chars().count();

        // Flush when the next sentence no longer fits.
        let needed = if current.is_empty() {
            sentence_chars
        } else {
            current_chars + 1 + sentence_chars
        };
        if needed > max_chunk_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }

        if sentence_chars > max_chunk_chars {
            let mut rest = sentence;
            loop {
                let rest_chars = rest.chars().count();
                if rest_chars <= max_chunk_chars {
                    current = rest.to_string();
                    current_chars = rest_chars;
                    break;
                }
                let byte_end = rest
                    .char_indices()
                    .nth(max_chunk_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(rest.len());
                chunks.push(rest[..byte_end].trim().to_string());
                rest = rest[byte_end..].trim_start();
            }
        } else {
            if !current.is_empty() {
                current.push(' ');
                current_chars += 1;
            }
            current.push_str(sentence);
            current_chars += sentence_chars;
        }
    }

    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_removes_markup() {
        let html = "<html><head><style>body { color: red; }</style></head>\
                    <body><script>alert(1)</script><p>خدماتنا  الرئيسية</p></body></html>";
        assert_eq!(strip_html(html), "خدماتنا الرئيسية");
    }

    #[test]
    fn test_strip_html_plain_text_passthrough() {
        assert_eq!(strip_html("نص بدون وسوم"), "نص بدون وسوم");
    }

    #[test]
    fn test_extract_title() {
        let html = "<html><title> خدماتنا </title><body></body></html>";
        assert_eq!(extract_title(html).as_deref(), Some("خدماتنا"));
        assert_eq!(extract_title("<html></html>"), None);
        assert_eq!(extract_title("<title>  </title>"), None);
    }

    #[test]
    fn test_chunks_pack_whole_sentences() {
        let text = "الجملة الأولى. الجملة الثانية؟ الجملة الثالثة!";
        let chunks = chunk_text(text, 60);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("الأولى"));
        assert!(chunks[0].contains("الثالثة"));
    }

    #[test]
    fn test_chunks_split_at_cap() {
        let text = "الجملة الأولى هنا. الجملة الثانية هنا. الجملة الثالثة هنا.";
        let chunks = chunk_text(text, 20);
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 20);
        }
    }

    #[test]
    fn test_long_sentence_is_hard_split() {
        let text = "ب".repeat(1200);
        let chunks = chunk_text(&text, DEFAULT_MAX_CHUNK_CHARS);
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= DEFAULT_MAX_CHUNK_CHARS);
        }
    }

    #[test]
    fn test_arabic_question_mark_is_a_boundary() {
        let chunks = chunk_text("بكام الخدمة؟ وبكام البوت؟", 15);
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(chunk_text("", 500).is_empty());
        assert!(chunk_text("...", 500).is_empty());
        assert!(chunk_text("نص", 0).is_empty());
    }
}
