use crate::core::dictionary::DomainMapping;
use crate::domain::model::Prediction;
use rust_stemmers::{Algorithm, Stemmer};

/// Lower-case the text and split it on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// A domain with its keywords already reduced to lower-cased stems.
#[derive(Debug, Clone)]
pub struct StemmedDomain {
    pub name: String,
    pub keyword_stems: Vec<String>,
}

/// Stemmed substring scorer.
///
/// A token matches a keyword when the keyword stem occurs inside the token
/// stem. Each keyword contributes the number of tokens it matches, and a
/// domain's score is the sum over its keywords.
pub struct KeywordScorer {
    stemmer: Stemmer,
    domains: Vec<StemmedDomain>,
}

impl KeywordScorer {
    pub fn new(mapping: &DomainMapping) -> Self {
        let stemmer = Stemmer::create(Algorithm::English);
        let domains = mapping
            .iter()
            .map(|(name, keywords)| StemmedDomain {
                name: name.to_string(),
                keyword_stems: keywords.iter().map(|k| stem_with(&stemmer, k)).collect(),
            })
            .collect();

        Self { stemmer, domains }
    }

    pub fn domains(&self) -> &[StemmedDomain] {
        &self.domains
    }

    pub fn stem(&self, word: &str) -> String {
        stem_with(&self.stemmer, word)
    }

    /// Score every domain against `text`, in mapping order.
    pub fn score_text(&self, text: &str) -> Vec<(&str, usize)> {
        let token_stems: Vec<String> = tokenize(text).iter().map(|t| self.stem(t)).collect();

        self.domains
            .iter()
            .map(|domain| (domain.name.as_str(), score_stems(&token_stems, &domain.keyword_stems)))
            .collect()
    }

    /// Highest-scoring domain; earlier domains win ties, all-zero is `Absent`.
    pub fn best_domain(&self, text: &str) -> Prediction {
        let mut best = Prediction::Absent;
        let mut max_score = 0;

        for (name, score) in self.score_text(text) {
            if score > max_score {
                max_score = score;
                best = Prediction::Domain(name.to_string());
            }
        }

        best
    }
}

fn stem_with(stemmer: &Stemmer, word: &str) -> String {
    stemmer.stem(&word.to_lowercase()).to_lowercase()
}

fn score_stems(token_stems: &[String], keyword_stems: &[String]) -> usize {
    keyword_stems
        .iter()
        .map(|keyword| {
            token_stems
                .iter()
                .filter(|token| token.contains(keyword.as_str()))
                .count()
        })
        .sum()
}
