//! # Lexicon Scorer
//!
//! Default [`PolarityScorer`]: rule-based compound scoring over the review
//! lexicon with negation, booster, capitalization, contrast and exclamation
//! handling.

use super::lexicon::ReviewLexicon;
use super::scorer::{PolarityScorer, ScorerError};
use crate::data::TextPreprocessor;

/// Valence added to a word written in caps when the rest of the text is not
const CAPS_INCREMENT: f64 = 0.733;

/// Multiplier applied to a negated word
const NEGATION_SCALAR: f64 = -0.74;

/// Increment per exclamation mark, added in the direction of the sum
const EXCLAMATION_INCREMENT: f64 = 0.292;

/// Exclamation marks beyond this count add nothing
const MAX_EXCLAMATIONS: usize = 4;

/// Weight of words before / after a contrastive conjunction
const BEFORE_CONTRAST: f64 = 0.5;
const AFTER_CONTRAST: f64 = 1.5;

/// Booster decay by distance to the modified word
const BOOSTER_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

/// Detailed result of lexicon scoring
#[derive(Debug, Clone)]
pub struct LexiconAnalysis {
    /// Normalized compound score (-1 to 1)
    pub compound: f64,
    /// Sum of adjusted valences before normalization
    pub raw_sum: f64,
    /// Words that matched with their adjusted valences
    pub matched_words: Vec<(String, f64)>,
}

impl LexiconAnalysis {
    /// Number of sentiment-bearing words found
    pub fn word_count(&self) -> usize {
        self.matched_words.len()
    }
}

/// Rule-based polarity scorer for review text
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    /// Text preprocessor
    preprocessor: TextPreprocessor,
    /// Review lexicon
    lexicon: ReviewLexicon,
    /// Number of preceding tokens searched for a negation
    negation_window: usize,
    /// Normalization constant for the compound score
    alpha: f64,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Create a new scorer with the default review lexicon
    pub fn new() -> Self {
        Self {
            preprocessor: TextPreprocessor::new(),
            lexicon: ReviewLexicon::new(),
            negation_window: 3,
            alpha: 15.0,
        }
    }

    /// Use a custom lexicon
    pub fn with_lexicon(mut self, lexicon: ReviewLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Set negation window
    pub fn with_negation_window(mut self, window: usize) -> Self {
        self.negation_window = window;
        self
    }

    /// Analyze a single text
    pub fn analyze(&self, text: &str) -> LexiconAnalysis {
        let clean = self.preprocessor.clean(text);
        let tokens = self.preprocessor.tokenize(&clean);

        let caps_count = tokens.iter().filter(|t| is_all_caps(t)).count();
        let emphasis_by_caps = caps_count > 0 && caps_count < tokens.len();
        let contrast_at = tokens.iter().position(|t| self.lexicon.is_contrast(t));

        let mut matched_words = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some(mut valence) = self.lexicon.valence(token) else {
                continue;
            };
            let direction = valence.signum();

            if emphasis_by_caps && is_all_caps(token) {
                valence += CAPS_INCREMENT * direction;
            }

            for (distance, decay) in BOOSTER_DECAY.iter().enumerate().map(|(d, s)| (d + 1, s)) {
                if i < distance {
                    break;
                }
                if let Some(increment) = self.lexicon.booster(&tokens[i - distance]) {
                    valence += increment * direction * decay;
                }
            }

            let negated = (1..=self.negation_window)
                .take_while(|&d| d <= i)
                .any(|d| self.lexicon.is_negation(&tokens[i - d]));
            if negated {
                valence *= NEGATION_SCALAR;
            }

            if let Some(c) = contrast_at {
                if i < c {
                    valence *= BEFORE_CONTRAST;
                } else if i > c {
                    valence *= AFTER_CONTRAST;
                }
            }

            matched_words.push((token.to_lowercase(), valence));
        }

        let mut raw_sum: f64 = matched_words.iter().map(|(_, v)| v).sum();
        if raw_sum != 0.0 {
            let exclamations = self
                .preprocessor
                .exclamation_count(&clean)
                .min(MAX_EXCLAMATIONS);
            raw_sum += raw_sum.signum() * exclamations as f64 * EXCLAMATION_INCREMENT;
        }

        LexiconAnalysis {
            compound: self.normalize(raw_sum),
            raw_sum,
            matched_words,
        }
    }

    /// Map an unbounded valence sum into [-1, 1]
    fn normalize(&self, sum: f64) -> f64 {
        if sum == 0.0 {
            return 0.0;
        }
        (sum / (sum * sum + self.alpha).sqrt()).clamp(-1.0, 1.0)
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f64, ScorerError> {
        Ok(self.analyze(text).compound)
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

fn is_all_caps(token: &str) -> bool {
    let mut letters = token.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}
