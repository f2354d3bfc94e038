use std::collections::{HashMap, HashSet};

use paperbrain_core::models::{CitationStats, Passage, ScoredPassage};
use paperbrain_retrieval::budget::{compress, estimate_body_tokens};
use paperbrain_retrieval::citations;
use paperbrain_retrieval::ranking::llm_reranker::{apply_order, parse_indices};
use paperbrain_retrieval::ranking::mmr;
use paperbrain_retrieval::LlmReranker;
use paperbrain_retrieval::search::rrf_fusion;
use proptest::prelude::*;
use test_fixtures::ScriptedModel;

fn passage(id: usize, paper: usize, text: String) -> Passage {
    Passage {
        id: format!("p{id}"),
        paper_id: format!("paper{paper}"),
        paper_title: format!("Paper {paper}"),
        page_label: (id + 1).to_string(),
        text,
        embedding: None,
    }
}

fn candidates(scores: &[(usize, f64)]) -> Vec<ScoredPassage> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &(paper, score))| ScoredPassage::new(passage(i, paper, String::new()), score))
        .collect()
}

proptest! {
    #[test]
    fn rrf_item_first_everywhere_scores_highest(
        n in 2usize..12,
        lists in 1usize..4,
        seed in any::<u64>(),
    ) {
        let ids: Vec<String> = (0..n).map(|i| format!("p{i}")).collect();
        let passages: HashMap<String, Passage> = (0..n)
            .map(|i| (format!("p{i}"), passage(i, 0, String::new())))
            .collect();
        // p0 first in every list, the rest rotated per list.
        let ranked: Vec<Vec<(String, usize)>> = (0..lists)
            .map(|l| {
                let mut rest: Vec<String> = ids[1..].to_vec();
                let len = rest.len();
                rest.rotate_left(((seed as usize).wrapping_add(l)) % len);
                let mut order = vec![ids[0].clone()];
                order.extend(rest);
                rrf_fusion::ranked(order)
            })
            .collect();

        let fused = rrf_fusion::fuse(&ranked, &passages, 60);
        prop_assert_eq!(fused.len(), n);
        prop_assert_eq!(fused[0].passage.id.as_str(), "p0");
        prop_assert!(fused.iter().skip(1).all(|c| c.rrf_score < fused[0].rrf_score));
    }

    #[test]
    fn mmr_output_is_distinct_and_sized(
        scores in prop::collection::vec((0usize..4, 0.0f64..1.0), 0..20),
        top_n in 0usize..25,
        lambda in 0.0f64..=1.0,
    ) {
        let input = candidates(&scores);
        let picked = mmr::select(&input, top_n, lambda);
        prop_assert_eq!(picked.len(), top_n.min(input.len()));
        let ids: HashSet<&str> = picked.iter().map(|p| p.id()).collect();
        prop_assert_eq!(ids.len(), picked.len());
    }

    #[test]
    fn mmr_single_pick_is_most_relevant(
        scores in prop::collection::vec((0usize..4, 0.0f64..1.0), 1..20),
        lambda in 0.0f64..=1.0,
    ) {
        let input = candidates(&scores);
        let picked = mmr::select(&input, 1, lambda);
        let max = scores.iter().map(|s| s.1).fold(f64::MIN, f64::max);
        let first_best = scores.iter().position(|s| s.1 == max).unwrap_or(0);
        prop_assert_eq!(picked[0].id(), input[first_best].id());
    }

    #[test]
    fn mmr_brings_in_the_second_paper(
        extra in prop::collection::vec(0.2f64..0.5, 1..6),
        other in 0.0f64..0.2,
    ) {
        // Paper 0 dominates relevance, paper 1 has a single weak passage.
        let mut scores = vec![(0usize, 1.0)];
        scores.extend(extra.iter().map(|&s| (0usize, s)));
        scores.push((1, other));
        let picked = mmr::select(&candidates(&scores), 3, 0.5);
        prop_assert!(picked.iter().any(|p| p.paper_id() == "paper1"));
    }

    #[test]
    fn compression_fits_budget_and_is_idempotent(
        texts in prop::collection::vec("[a-zé ]{0,400}", 1..6),
        budget in 0usize..200,
    ) {
        let input: Vec<ScoredPassage> = texts
            .into_iter()
            .enumerate()
            .map(|(i, t)| ScoredPassage::new(passage(i, 0, t), 1.0))
            .collect();
        let once = compress(input, budget);
        prop_assert!(estimate_body_tokens(&once) <= budget);
        let twice = compress(once.clone(), budget);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn rerank_order_is_always_a_permutation(
        answer in ".{0,80}",
        n in 0usize..25,
    ) {
        let input = candidates(&vec![(0usize, 0.5); n]);
        let expected: HashSet<String> = input.iter().map(|p| p.id().to_string()).collect();

        let order = parse_indices(&answer, n);
        prop_assert!(order.iter().all(|&i| i < n));
        prop_assert_eq!(order.iter().collect::<HashSet<_>>().len(), order.len());

        let out = apply_order(input, &order);
        prop_assert_eq!(out.len(), n);
        let got: HashSet<String> = out.iter().map(|p| p.id().to_string()).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn rerank_keeps_every_candidate_for_any_window(
        answer in "[0-9, x]{0,60}",
        n in 0usize..40,
        window in 1usize..25,
        desired in 0usize..10,
    ) {
        let input = candidates(&vec![(0usize, 0.5); n]);
        let expected: HashSet<String> = input.iter().map(|p| p.id().to_string()).collect();
        let model = ScriptedModel::new(answer);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        let outcome = runtime
            .block_on(LlmReranker::new(&model, window, 0.0).rerank("q", input, desired))
            .unwrap();

        prop_assert_eq!(outcome.passages.len(), n);
        let got: HashSet<String> = outcome.passages.iter().map(|p| p.id().to_string()).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn text_without_brackets_has_zero_citation_stats(answer in "[^\\[\\]]{0,200}") {
        let (found, stats) = citations::analyze(&answer, &[]);
        prop_assert!(found.is_empty());
        prop_assert_eq!(stats, CitationStats::default());
    }
}
