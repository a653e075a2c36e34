//! # Review Lexicon
//!
//! Word valences for rule-based scoring of product review text.
//!
//! Valences use a -4..4 intensity scale. Boosters are additive increments
//! applied in the direction of the word they modify.

use std::collections::{HashMap, HashSet};

/// Sentiment lexicon tuned for consumer product reviews
#[derive(Debug, Clone)]
pub struct ReviewLexicon {
    /// Word to valence mapping
    words: HashMap<String, f64>,
    /// Negation words
    negations: HashSet<String>,
    /// Booster (intensifier/dampener) increments
    boosters: HashMap<String, f64>,
    /// Contrastive conjunctions ("but")
    contrasts: HashSet<String>,
}

impl Default for ReviewLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewLexicon {
    /// Create a new review lexicon with default words
    pub fn new() -> Self {
        let mut words = HashMap::new();

        let positive_words = vec![
            ("love", 3.2),
            ("loved", 2.9),
            ("loves", 2.7),
            ("amazing", 2.8),
            ("awesome", 3.1),
            ("excellent", 3.2),
            ("outstanding", 3.0),
            ("fantastic", 2.6),
            ("wonderful", 2.7),
            ("perfect", 2.7),
            ("perfectly", 2.7),
            ("great", 3.1),
            ("best", 3.2),
            ("good", 1.9),
            ("nice", 1.8),
            ("happy", 2.7),
            ("pleased", 1.9),
            ("satisfied", 1.8),
            ("recommend", 1.5),
            ("recommended", 1.5),
            ("beautiful", 2.9),
            ("gorgeous", 3.0),
            ("lovely", 2.8),
            ("soft", 1.1),
            ("smooth", 1.2),
            ("fresh", 1.3),
            ("gentle", 1.6),
            ("favorite", 2.0),
            ("worth", 0.9),
            ("works", 1.0),
            ("effective", 2.1),
            ("impressed", 2.2),
            ("exceeded", 1.6),
            ("decent", 1.6),
            ("okay", 0.9),
            ("ok", 0.9),
            ("fine", 0.8),
            ("like", 1.5),
            ("liked", 1.7),
            ("glad", 2.0),
            ("enjoy", 2.2),
            ("enjoyed", 2.3),
            ("comfortable", 1.5),
            ("quality", 0.6),
            ("special", 1.7),
            ("superb", 3.1),
            ("flawless", 2.8),
            ("incredible", 2.5),
            ("terrific", 2.1),
            ("healthy", 1.7),
            ("glowing", 1.8),
            ("bargain", 1.3),
            ("thanks", 1.9),
            ("win", 2.8),
        ];

        let negative_words = vec![
            ("terrible", -2.1),
            ("horrible", -2.5),
            ("awful", -2.0),
            ("worst", -3.1),
            ("bad", -2.5),
            ("poor", -2.1),
            ("hate", -2.7),
            ("hated", -3.2),
            ("useless", -1.8),
            ("waste", -1.8),
            ("wasted", -2.2),
            ("disappointed", -1.9),
            ("disappointing", -2.2),
            ("disappointment", -2.3),
            ("broken", -1.9),
            ("broke", -1.8),
            ("cheap", -0.9),
            ("fake", -2.1),
            ("refund", -0.8),
            ("return", -0.4),
            ("returned", -0.9),
            ("rash", -1.4),
            ("burn", -1.5),
            ("burned", -1.9),
            ("irritation", -1.8),
            ("itchy", -1.5),
            ("sticky", -0.9),
            ("greasy", -1.1),
            ("smelly", -1.6),
            ("stinks", -2.0),
            ("leaked", -1.4),
            ("leaking", -1.4),
            ("damaged", -2.0),
            ("defective", -2.1),
            ("flimsy", -1.4),
            ("junk", -2.3),
            ("garbage", -2.4),
            ("scam", -2.5),
            ("annoying", -1.7),
            ("unhappy", -1.8),
            ("sad", -2.1),
            ("angry", -2.3),
            ("problem", -1.7),
            ("problems", -1.7),
            ("issue", -0.9),
            ("fail", -2.3),
            ("failed", -2.3),
            ("worse", -2.1),
            ("ugly", -2.3),
            ("painful", -2.0),
            ("dry", -0.6),
            ("overpriced", -1.6),
            ("mediocre", -1.0),
        ];

        for (word, valence) in positive_words.into_iter().chain(negative_words) {
            words.insert(word.to_string(), valence);
        }

        let negations = vec![
            "not", "no", "never", "neither", "nor", "none", "nobody", "nowhere", "cannot",
            "cant", "can't", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "won't",
            "wont", "wouldn't", "wouldnt", "shouldn't", "shouldnt", "couldn't", "couldnt",
            "isn't", "isnt", "aren't", "arent", "wasn't", "wasnt", "weren't", "werent",
            "nothing", "without", "hardly", "barely", "rarely", "seldom",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let mut boosters = HashMap::new();
        for word in [
            "absolutely", "completely", "extremely", "highly", "incredibly", "really",
            "so", "super", "totally", "truly", "very", "utterly", "most", "especially",
            "exceptionally", "thoroughly",
        ] {
            boosters.insert(word.to_string(), 0.293);
        }
        for word in [
            "kinda", "kind", "slightly", "somewhat", "sort", "almost", "marginally",
            "mostly", "partly",
        ] {
            boosters.insert(word.to_string(), -0.293);
        }

        let contrasts = ["but", "however", "although", "though"]
            .into_iter()
            .map(String::from)
            .collect();

        Self {
            words,
            negations,
            boosters,
            contrasts,
        }
    }

    /// Get valence for a word
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    /// Check if a word is a negation
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(&word.to_lowercase())
    }

    /// Get booster increment
    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(&word.to_lowercase()).copied()
    }

    /// Check if a word is a contrastive conjunction
    pub fn is_contrast(&self, word: &str) -> bool {
        self.contrasts.contains(&word.to_lowercase())
    }

    /// Number of words with a valence
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the lexicon has no valence words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Add a custom word to the lexicon
    pub fn add_word(&mut self, word: &str, valence: f64) {
        self.words.insert(word.to_lowercase(), valence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_words() {
        let lexicon = ReviewLexicon::new();
        assert!(lexicon.valence("love").unwrap() > 0.0);
        assert!(lexicon.valence("Excellent").unwrap() > 0.0);
    }

    #[test]
    fn test_negative_words() {
        let lexicon = ReviewLexicon::new();
        assert!(lexicon.valence("terrible").unwrap() < 0.0);
        assert!(lexicon.valence("useless").unwrap() < 0.0);
        assert!(lexicon.valence("shampoo").is_none());
    }

    #[test]
    fn test_negation_and_boosters() {
        let lexicon = ReviewLexicon::new();
        assert!(lexicon.is_negation("not"));
        assert!(lexicon.is_negation("Doesn't"));
        assert!(!lexicon.is_negation("love"));
        assert!(lexicon.booster("very").unwrap() > 0.0);
        assert!(lexicon.booster("slightly").unwrap() < 0.0);
        assert!(lexicon.is_contrast("but"));
    }

    #[test]
    fn test_add_word() {
        let mut lexicon = ReviewLexicon::new();
        let before = lexicon.len();
        lexicon.add_word("Holy-Grail", 3.0);
        assert_eq!(lexicon.len(), before + 1);
        assert_eq!(lexicon.valence("holy-grail"), Some(3.0));
    }
}
