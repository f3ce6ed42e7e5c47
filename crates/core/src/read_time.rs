//! Estimated reading time for a post.

use crate::document::model::ContentSection;

/// Reading speed used for the estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Whitespace-separated words in `text`.
///
/// Runs of whitespace count as one separator, so blank text has no words
/// and `"a  b"` has two.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Total words across every section heading and body block.
pub fn count_content_words(content: &[ContentSection]) -> usize {
    content
        .iter()
        .map(|section| {
            let body: usize = section.body.iter().map(|block| count_words(&block.text)).sum();
            count_words(&section.heading) + body
        })
        .sum()
}

/// Minutes needed to read `content`, rounded up.
pub fn estimate_read_time(content: &[ContentSection]) -> u32 {
    let words = count_content_words(content);
    words.div_ceil(WORDS_PER_MINUTE) as u32
}
