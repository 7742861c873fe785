use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::workflows::history::TravelDataError;

const CHUNK_WORDS: usize = 300;
const MIN_TERM_LEN: usize = 3;
pub const DEFAULT_POLICY_TEXT: &str = "Corporate travel policy: economy class for domestic, \
hotel under 200 per night, trips must have business justification.";

/// A ranked excerpt returned by [`PolicyDocument::search`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyExcerpt {
    pub chunk: usize,
    pub score: usize,
    pub text: String,
}

/// Company policy text split into fixed-size word chunks for retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDocument {
    chunks: Vec<String>,
}

impl PolicyDocument {
    pub fn from_text(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let chunks = words
            .chunks(CHUNK_WORDS)
            .map(|chunk| chunk.join(" "))
            .collect();
        Self { chunks }
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, TravelDataError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::from_text(&text))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TravelDataError> {
        let file = fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Missing or unreadable files fall back to the built-in policy sentence.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(document) => {
                info!(path = %path.display(), chunks = document.len(), "loaded policy document");
                document
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "policy document unavailable, using default policy text");
                Self::default()
            }
        }
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunks ranked by how often the query's terms appear in them. Ties keep
    /// document order; chunks with no hits are never returned.
    pub fn search(&self, query: &str, limit: usize) -> Vec<PolicyExcerpt> {
        let terms = terms(query);
        if terms.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut excerpts: Vec<PolicyExcerpt> = self
            .chunks
            .iter()
            .enumerate()
            .filter_map(|(chunk, text)| {
                let score = terms_in(text)
                    .iter()
                    .filter(|word| terms.contains(*word))
                    .count();
                (score > 0).then(|| PolicyExcerpt {
                    chunk,
                    score,
                    text: text.clone(),
                })
            })
            .collect();

        excerpts.sort_by(|left, right| right.score.cmp(&left.score));
        excerpts.truncate(limit);
        excerpts
    }
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self::from_text(DEFAULT_POLICY_TEXT)
    }
}

fn terms(query: &str) -> Vec<String> {
    let mut terms = terms_in(query);
    terms.sort();
    terms.dedup();
    terms
}

fn terms_in(text: &str) -> Vec<String> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| word.len() >= MIN_TERM_LEN)
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_three_hundred_word_chunks() {
        let text = vec!["word"; 650].join(" ");
        let document = PolicyDocument::from_text(&text);

        assert_eq!(document.len(), 3);
        assert_eq!(document.chunks()[0].split_whitespace().count(), 300);
        assert_eq!(document.chunks()[2].split_whitespace().count(), 50);
        assert!(PolicyDocument::from_text("   ").is_empty());
    }

    #[test]
    fn search_ranks_by_term_hits() {
        let mut text = vec!["filler"; 300];
        text[0] = "Hotel";
        let mut second = vec!["filler"; 300];
        second[0] = "hotel";
        second[1] = "hotels";
        second[2] = "hotel.";
        let text = format!("{} {}", text.join(" "), second.join(" "));
        let document = PolicyDocument::from_text(&text);

        let results = document.search("Hotel limits?", 5);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk, 1);
        assert_eq!(results[0].score, 2);
        assert_eq!(results[1].chunk, 0);
        assert!(document.search("rail", 5).is_empty());
        assert!(document.search("hotel", 0).is_empty());
    }

    #[test]
    fn missing_file_uses_default_policy() {
        let document = PolicyDocument::load_or_default("does/not/exist.md");
        assert_eq!(document.chunks(), [DEFAULT_POLICY_TEXT.to_string()]);
        assert_eq!(document.search("economy", 3).len(), 1);
    }
}
