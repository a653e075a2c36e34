//! # Text Preprocessing
//!
//! Cleanup of raw review text before lexical scoring.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Text preprocessor for review text
#[derive(Debug, Clone)]
pub struct TextPreprocessor {
    /// Regex for HTML tag removal (`<br />` is common in scraped reviews)
    html_regex: Regex,
    /// Regex for URL removal
    url_regex: Regex,
    /// Regex for multiple whitespace
    whitespace_regex: Regex,
}

impl Default for TextPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPreprocessor {
    /// Create a new text preprocessor
    pub fn new() -> Self {
        Self {
            html_regex: Regex::new(r"<[^>]*>").expect("static html regex"),
            url_regex: Regex::new(r"https?://\S+|www\.\S+").expect("static url regex"),
            whitespace_regex: Regex::new(r"\s+").expect("static whitespace regex"),
        }
    }

    /// Clean text for scoring, keeping case and punctuation
    ///
    /// Steps:
    /// 1. Unicode normalization (NFC)
    /// 2. Replace HTML tags with spaces
    /// 3. Remove URLs
    /// 4. Normalize whitespace
    pub fn clean(&self, text: &str) -> String {
        let normalized: String = text.nfc().collect();
        let no_html = self.html_regex.replace_all(&normalized, " ");
        let no_urls = self.url_regex.replace_all(&no_html, "");
        let clean = self.whitespace_regex.replace_all(&no_urls, " ");

        clean.trim().to_string()
    }

    /// Clean and lowercase text
    pub fn preprocess(&self, text: &str) -> String {
        self.clean(text).to_lowercase()
    }

    /// Split text into word tokens with surrounding punctuation stripped
    ///
    /// Internal apostrophes and hyphens are kept ("doesn't", "well-made").
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|word| !word.is_empty())
            .map(|word| word.to_string())
            .collect()
    }

    /// Number of exclamation marks in the text
    pub fn exclamation_count(&self, text: &str) -> usize {
        text.chars().filter(|&c| c == '!').count()
    }
}
