//! Topic modeling
//!
//! Latent Dirichlet Allocation fitted by collapsed Gibbs sampling over
//! a stopword-filtered bag of words. The sampler runs with a fixed RNG
//! seed so the same corpus always yields the same topics.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// English stopwords excluded from the vocabulary
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
    "during", "each", "few", "for", "from", "further", "had", "has", "have", "having",
    "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if",
    "in", "into", "is", "it", "its", "itself", "just", "me", "more", "most", "my",
    "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Words shorter than this never enter the vocabulary
const MIN_WORD_LEN: usize = 3;

/// Words listed per topic
const TOP_WORDS: usize = 10;

/// Upper bound on the fitted topic count; `num_topics` sizes the
/// count matrices, so a request-supplied value must not be trusted
pub const MAX_TOPICS: usize = 50;

/// LDA hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LdaConfig {
    /// Number of topics; clamped to `1..=MAX_TOPICS` when fitting
    pub num_topics: usize,

    /// Document-topic smoothing
    pub alpha: f64,

    /// Topic-word smoothing
    pub beta: f64,

    /// Gibbs sampling iterations
    pub iterations: usize,

    /// RNG seed
    pub seed: u64,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            num_topics: 5,
            alpha: 0.1,
            beta: 0.01,
            iterations: 100,
            seed: 42,
        }
    }
}

/// One fitted topic
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Topic {
    /// 1-based topic number
    pub index: usize,

    /// Highest-weight words, most probable first
    pub top_words: Vec<String>,
}

/// Fitted LDA model
pub struct LdaModel {
    vocab: Vec<String>,
    /// topic -> word -> assignment count
    topic_word: Vec<Vec<usize>>,
}

impl LdaModel {
    /// Fit a model over one document per table row
    pub fn fit(documents: &[String], config: &LdaConfig) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        // vocabulary in first-appearance order
        let mut vocab: Vec<String> = Vec::new();
        let mut vocab_index: std::collections::HashMap<&str, usize> =
            std::collections::HashMap::new();
        for doc in &tokenized {
            for word in doc {
                if !vocab_index.contains_key(word.as_str()) {
                    vocab_index.insert(word.as_str(), vocab.len());
                    vocab.push(word.clone());
                }
            }
        }

        let docs: Vec<Vec<usize>> = tokenized
            .iter()
            .map(|doc| doc.iter().map(|w| vocab_index[w.as_str()]).collect())
            .collect();

        let k = config.num_topics.clamp(1, MAX_TOPICS);
        let v = vocab.len();

        let mut topic_word = vec![vec![0usize; v]; k];
        let mut doc_topic = vec![vec![0usize; k]; docs.len()];
        let mut topic_totals = vec![0usize; k];
        let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(docs.len());

        let mut rng = StdRng::seed_from_u64(config.seed);

        // random initial assignment
        for (d, doc) in docs.iter().enumerate() {
            let mut doc_assignments = Vec::with_capacity(doc.len());
            for &word in doc {
                let topic = rng.gen_range(0..k);
                topic_word[topic][word] += 1;
                doc_topic[d][topic] += 1;
                topic_totals[topic] += 1;
                doc_assignments.push(topic);
            }
            assignments.push(doc_assignments);
        }

        // collapsed Gibbs sampling
        let mut weights = vec![0.0f64; k];
        for _ in 0..config.iterations {
            for (d, doc) in docs.iter().enumerate() {
                for (pos, &word) in doc.iter().enumerate() {
                    let old = assignments[d][pos];
                    topic_word[old][word] -= 1;
                    doc_topic[d][old] -= 1;
                    topic_totals[old] -= 1;

                    let mut total = 0.0;
                    for (topic, weight) in weights.iter_mut().enumerate() {
                        *weight = (doc_topic[d][topic] as f64 + config.alpha)
                            * (topic_word[topic][word] as f64 + config.beta)
                            / (topic_totals[topic] as f64 + v as f64 * config.beta);
                        total += *weight;
                    }

                    let mut draw = rng.gen::<f64>() * total;
                    let mut new = k - 1;
                    for (topic, &weight) in weights.iter().enumerate() {
                        draw -= weight;
                        if draw <= 0.0 {
                            new = topic;
                            break;
                        }
                    }

                    topic_word[new][word] += 1;
                    doc_topic[d][new] += 1;
                    topic_totals[new] += 1;
                    assignments[d][pos] = new;
                }
            }
        }

        Self { vocab, topic_word }
    }

    /// Vocabulary size
    pub fn vocab_len(&self) -> usize {
        self.vocab.len()
    }

    /// Top words per topic, most probable first
    pub fn topics(&self) -> Vec<Topic> {
        self.topic_word
            .iter()
            .enumerate()
            .map(|(topic_idx, word_counts)| {
                let mut ranked: Vec<(usize, usize)> = word_counts
                    .iter()
                    .copied()
                    .enumerate()
                    .filter(|(_, count)| *count > 0)
                    .collect();
                ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
                ranked.truncate(TOP_WORDS);

                Topic {
                    index: topic_idx + 1,
                    top_words: ranked
                        .into_iter()
                        .map(|(word, _)| self.vocab[word].clone())
                        .collect(),
                }
            })
            .collect()
    }
}

/// Lowercase, strip punctuation, drop stopwords and short tokens
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= MIN_WORD_LEN)
        .filter(|w| !STOPWORDS.contains(w))
        .filter(|w| w.chars().any(|c| c.is_alphabetic()))
        .map(|w| w.to_string())
        .collect()
}
