//! Vocabulary fitting for the text and genre blocks.
//!
//! Both vocabularies are fit from a single catalog snapshot and are only
//! meaningful for that snapshot: term indices shift whenever the catalog does.
//! Terms are indexed in lexicographic order so the same snapshot always yields
//! the same layout.

use std::collections::{BTreeMap, BTreeSet};

/// English stop words dropped from title/description text
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "became", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing",
    "down", "during", "each", "either", "else", "even", "ever", "every", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "however", "if", "in", "into", "is", "it", "its", "itself",
    "just", "least", "less", "many", "may", "me", "might", "more", "most", "much", "must",
    "my", "myself", "neither", "never", "no", "nor", "not", "now", "of", "off", "often", "on",
    "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "per", "perhaps", "rather", "same", "she", "should",
    "since", "so", "some", "still", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "though", "through",
    "thus", "to", "too", "toward", "towards", "under", "until", "up", "upon", "us", "very",
    "was", "we", "well", "were", "what", "whatever", "when", "where", "whether", "which",
    "while", "who", "whole", "whom", "whose", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

/// Splits text into lowercase word tokens of at least two characters,
/// dropping stop words
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() > 1)
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// TF-IDF vocabulary over free text
///
/// IDF is smoothed as `ln((1 + n) / (1 + df)) + 1`, so a term present in every
/// document keeps a weight of 1 rather than vanishing.
#[derive(Debug, Clone, Default)]
pub struct TextVocabulary {
    terms: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TextVocabulary {
    /// Fits the vocabulary and IDF weights over a corpus of documents
    pub fn fit<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        let mut doc_count = 0usize;

        for document in documents {
            doc_count += 1;
            let unique: BTreeSet<String> = tokenize(document).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n = doc_count as f64;
        let mut terms = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());

        for (index, (term, df)) in doc_freq.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            terms.insert(term, index);
        }

        Self { terms, idf }
    }

    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    /// Column index of a term, if it is part of the vocabulary
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.index_of(term).map(|index| self.idf[index])
    }

    /// Raw term count times IDF for each vocabulary term. Out-of-vocabulary
    /// tokens are ignored.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.len()];
        for token in tokenize(document) {
            if let Some(index) = self.index_of(&token) {
                vector[index] += self.idf[index];
            }
        }
        vector
    }
}

/// Canonical form of a genre name, `None` for blank names
pub fn canonical_genre(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Vocabulary of distinct genre names
///
/// Genres are categorical, so the block holds plain occurrence counts with no
/// rarity weighting.
#[derive(Debug, Clone, Default)]
pub struct GenreVocabulary {
    genres: BTreeMap<String, usize>,
}

impl GenreVocabulary {
    pub fn fit<'a, I>(genre_sets: I) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let distinct: BTreeSet<String> = genre_sets
            .into_iter()
            .flatten()
            .filter_map(|name| canonical_genre(name))
            .collect();

        let genres = distinct
            .into_iter()
            .enumerate()
            .map(|(index, name)| (name, index))
            .collect();

        Self { genres }
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn index_of(&self, genre: &str) -> Option<usize> {
        canonical_genre(genre).and_then(|name| self.genres.get(&name).copied())
    }

    /// Occurrence counts of an item's genres. Duplicate names within one
    /// item collapse to a single occurrence.
    pub fn transform(&self, genres: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.len()];
        let distinct: BTreeSet<String> = genres.iter().filter_map(|g| canonical_genre(g)).collect();
        for name in distinct {
            if let Some(&index) = self.genres.get(&name) {
                vector[index] += 1.0;
            }
        }
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_stop_words() {
        let tokens = tokenize("The Dark Knight rises over Gotham, and a city burns");
        assert_eq!(tokens, vec!["dark", "knight", "rises", "gotham", "city", "burns"]);
    }

    #[test]
    fn test_tokenize_drops_single_characters() {
        assert!(tokenize("A I x").is_empty());
        assert_eq!(tokenize("X-Men 2"), vec!["men"]);
    }

    #[test]
    fn test_text_vocabulary_is_sorted_and_weighted() {
        let vocab = TextVocabulary::fit(["space station crew", "space pirates", "pirates ship"]);

        assert_eq!(vocab.len(), 5);
        assert_eq!(vocab.index_of("crew"), Some(0));
        assert_eq!(vocab.index_of("station"), Some(4));

        // "space" appears in 2 of 3 documents, "crew" in 1 of 3
        let space = vocab.idf("space").unwrap();
        let crew = vocab.idf("crew").unwrap();
        assert!((space - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((crew - (2.0f64.ln() + 1.0)).abs() < 1e-12);
        assert!(crew > space);
    }

    #[test]
    fn test_text_transform_counts_repeated_terms() {
        let vocab = TextVocabulary::fit(["robot robot love", "love story"]);
        let vector = vocab.transform("robot robot love unknownword");

        let robot = vocab.index_of("robot").unwrap();
        let love = vocab.index_of("love").unwrap();
        assert!((vector[robot] - 2.0 * vocab.idf("robot").unwrap()).abs() < 1e-12);
        assert!((vector[love] - vocab.idf("love").unwrap()).abs() < 1e-12);
        assert_eq!(vector[vocab.index_of("story").unwrap()], 0.0);
    }

    #[test]
    fn test_empty_corpus_gives_empty_vocabulary() {
        let vocab = TextVocabulary::fit(["", "a I"]);
        assert!(vocab.is_empty());
        assert!(vocab.transform("anything at all").is_empty());
    }

    #[test]
    fn test_genre_vocabulary_canonicalizes_names() {
        let sets = [
            vec!["Action".to_string(), "Drama".to_string()],
            vec!["action ".to_string(), "".to_string()],
            vec!["Science Fiction".to_string()],
        ];
        let vocab = GenreVocabulary::fit(sets.iter().map(Vec::as_slice));

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.index_of("ACTION"), Some(0));
        assert_eq!(vocab.index_of("drama"), Some(1));
        assert_eq!(vocab.index_of("science fiction"), Some(2));
    }

    #[test]
    fn test_genre_transform_ignores_duplicates_and_unknowns() {
        let sets = [vec!["Action".to_string(), "Comedy".to_string()]];
        let vocab = GenreVocabulary::fit(sets.iter().map(Vec::as_slice));

        let vector = vocab.transform(&[
            "Comedy".to_string(),
            "comedy".to_string(),
            "Western".to_string(),
        ]);
        assert_eq!(vector, vec![0.0, 1.0]);
    }
}
