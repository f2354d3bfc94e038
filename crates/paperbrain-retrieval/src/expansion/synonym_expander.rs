//! Abbreviation and synonym substitution for scientific vocabulary.
//!
//! Produces a lexically different phrasing of the query without a model
//! call. E.g., "rl for llm alignment" → "reinforcement learning for large
//! language model alignment".

use std::collections::HashMap;

fn synonym_map() -> HashMap<&'static str, &'static str> {
    let mut m = HashMap::new();
    m.insert("llm", "large language model");
    m.insert("llms", "large language models");
    m.insert("lm", "language model");
    m.insert("rl", "reinforcement learning");
    m.insert("rlhf", "reinforcement learning from human feedback");
    m.insert("cnn", "convolutional neural network");
    m.insert("cnns", "convolutional neural networks");
    m.insert("rnn", "recurrent neural network");
    m.insert("rnns", "recurrent neural networks");
    m.insert("lstm", "long short-term memory");
    m.insert("gnn", "graph neural network");
    m.insert("gnns", "graph neural networks");
    m.insert("nlp", "natural language processing");
    m.insert("cv", "computer vision");
    m.insert("vae", "variational autoencoder");
    m.insert("gan", "generative adversarial network");
    m.insert("gans", "generative adversarial networks");
    m.insert("vit", "vision transformer");
    m.insert("mlp", "multilayer perceptron");
    m.insert("sgd", "stochastic gradient descent");
    m.insert("rag", "retrieval-augmented generation");
    m.insert("moe", "mixture of experts");
    m.insert("attention", "self-attention");
    m.insert("transformer", "transformer architecture");
    m.insert("finetuning", "fine-tuning");
    m.insert("pretraining", "pre-training");
    m.insert("embedding", "representation");
    m.insert("embeddings", "representations");
    m.insert("accuracy", "performance");
    m.insert("dataset", "benchmark");
    m.insert("datasets", "benchmarks");
    m.insert("method", "approach");
    m.insert("methods", "approaches");
    m
}

/// Rewrite `query` with every known term substituted.
///
/// Returns `None` when nothing in the query is in the vocabulary.
pub fn expand(query: &str) -> Option<String> {
    let map = synonym_map();
    let mut changed = false;

    let words: Vec<String> = query
        .split_whitespace()
        .map(|word| {
            let core = word.trim_matches(|c: char| !c.is_alphanumeric());
            match map.get(core.to_lowercase().as_str()) {
                Some(replacement) if !core.is_empty() => {
                    changed = true;
                    word.replacen(core, replacement, 1)
                }
                _ => word.to_string(),
            }
        })
        .collect();

    changed.then(|| words.join(" "))
}
