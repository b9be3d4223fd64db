//! Property-Based Testing for ClearThink
//!
//! Uses proptest to fuzz the parsing and bounding logic that sees
//! arbitrary service output and user input.
//! Coverage targets:
//! - Result markup parsing (src/markdown.rs)
//! - Decision summaries and the history bound (src/history.rs)
//! - Progress simulation limits (src/progress.rs)

use proptest::prelude::*;

// =============================================================================
// TEST 1: Markup Parsing Fuzzing
// =============================================================================
// Target: src/markdown.rs
// Risk: agent output is free-form text; the parser must stay lenient and
// total over anything the service emits

mod markdown_fuzzing {
    use super::*;
    use clearthink::markdown::{parse, Block};

    proptest! {
        /// Property: parsing never panics, whatever the service sends
        #[test]
        fn test_parse_never_panics(text in "(?s).*") {
            let _ = parse(&text);
        }

        /// Property: one block per source line, blanks included
        #[test]
        fn test_block_count_matches_line_count(text in "(?s).{0,400}") {
            let blocks = parse(&text);
            prop_assert_eq!(blocks.len(), text.lines().count());
        }

        /// Property: plain paragraph lines survive untouched
        #[test]
        fn test_plain_lines_round_trip(line in "[a-zA-Z0-9][a-zA-Z0-9 ,.?]{0,40}") {
            let blocks = parse(&line);
            prop_assert_eq!(blocks.len(), 1);
            prop_assert!(matches!(blocks[0], Block::Paragraph(_)));
            prop_assert_eq!(blocks[0].plain_text(), line);
        }

        /// Property: completed bold markers are stripped from visible text
        #[test]
        fn test_bold_markers_are_stripped(word in "[a-zA-Z]{1,20}") {
            let blocks = parse(&format!("**{word}**"));
            prop_assert_eq!(blocks[0].plain_text(), word);
        }

        /// Property: heading markers are stripped and the level recorded
        #[test]
        fn test_heading_markers_are_stripped(
            level in 1u8..=3,
            title in "[a-zA-Z][a-zA-Z ]{0,30}"
        ) {
            let line = format!("{} {}", "#".repeat(level as usize), title);
            let blocks = parse(&line);
            match &blocks[0] {
                Block::Heading { level: parsed, .. } => prop_assert_eq!(*parsed, level),
                other => prop_assert!(false, "not a heading: {:?}", other),
            }
            prop_assert_eq!(blocks[0].plain_text(), title);
        }

        /// Property: unterminated emphasis stays literal, never dropped
        #[test]
        fn test_unterminated_markers_stay_literal(text in r"\*{1,2}[a-zA-Z ]{0,10}") {
            let blocks = parse(&text);
            prop_assert_eq!(blocks[0].plain_text(), text);
        }

        /// Property: whitespace-only lines become blank blocks
        #[test]
        fn test_whitespace_lines_are_blank(spaces in " {0,8}") {
            let text = format!("before\n{spaces}\nafter");
            let blocks = parse(&text);
            prop_assert_eq!(blocks.len(), 3);
            prop_assert!(matches!(blocks[1], Block::Blank));
        }
    }
}

// =============================================================================
// TEST 2: History Bound Fuzzing
// =============================================================================
// Target: src/history.rs
// Risk: unbounded user input feeding a bounded, ordered, persisted list

mod history_fuzzing {
    use super::*;
    use clearthink::api::{AgentSection, AnalysisResult};
    use clearthink::history::{HistoryStore, MAX_ENTRIES, SUMMARY_MAX_CHARS};
    use clearthink::store::MemoryStore;

    fn tiny_result() -> AnalysisResult {
        AnalysisResult {
            agents: vec![AgentSection {
                name: "Decision Summary".into(),
                emoji: "✅".into(),
                result_text: "Go.".into(),
            }],
        }
    }

    proptest! {
        /// Property: the list never grows past the bound
        #[test]
        fn test_history_never_exceeds_bound(
            decisions in prop::collection::vec("[a-zA-Z ]{1,40}", 0..25)
        ) {
            let mut history = HistoryStore::load(Box::new(MemoryStore::new()));
            for decision in &decisions {
                let _ = history.record(decision, &tiny_result());
            }
            prop_assert_eq!(history.list().len(), decisions.len().min(MAX_ENTRIES));
        }

        /// Property: ids strictly decrease from newest to oldest
        #[test]
        fn test_ids_strictly_decrease(count in 1usize..15) {
            let mut history = HistoryStore::load(Box::new(MemoryStore::new()));
            for i in 0..count {
                let _ = history.record(&format!("Decision {i}"), &tiny_result());
            }
            prop_assert!(history.list().windows(2).all(|pair| pair[0].id > pair[1].id));
        }

        /// Property: summaries are bounded and short input is untouched
        #[test]
        fn test_summary_is_bounded(decision in ".{1,300}") {
            let mut history = HistoryStore::load(Box::new(MemoryStore::new()));
            let _ = history.record(&decision, &tiny_result());
            let summary = &history.list()[0].decision_summary;

            let input_chars = decision.chars().count();
            if input_chars <= SUMMARY_MAX_CHARS {
                prop_assert_eq!(summary, &decision);
            } else {
                prop_assert!(summary.ends_with("..."));
                prop_assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS + 3);
            }
        }

        /// Property: every recorded entry round-trips through its blob
        #[test]
        fn test_persisted_blob_reloads_identically(
            decisions in prop::collection::vec("[a-zA-Z ]{1,40}", 1..8)
        ) {
            let mut history = HistoryStore::load(Box::new(MemoryStore::new()));
            for decision in &decisions {
                let _ = history.record(decision, &tiny_result());
            }
            let raw = serde_json::to_string(history.list()).unwrap();

            let mut store = MemoryStore::new();
            store.seed(clearthink::history::HISTORY_KEY, &raw);
            let reloaded = HistoryStore::load(Box::new(store));
            prop_assert_eq!(reloaded.list(), history.list());
        }
    }
}

// =============================================================================
// TEST 3: Progress Simulation Fuzzing
// =============================================================================
// Target: src/progress.rs
// Risk: the simulation runs for as long as the real call takes; its
// display values must hold their limits at any tick count

mod progress_fuzzing {
    use super::*;
    use clearthink::progress::{ProgressSimulator, CEILING};
    use clearthink::stage::STAGE_COUNT;

    proptest! {
        /// Property: percent never passes the ceiling while running
        #[test]
        fn test_percent_holds_the_ceiling(ticks in 0usize..500) {
            let mut sim = ProgressSimulator::new();
            sim.start();
            for _ in 0..ticks {
                sim.tick();
            }
            prop_assert!(sim.percent() <= CEILING);
        }

        /// Property: percent never regresses under ticking
        #[test]
        fn test_percent_is_monotonic(ticks in 1usize..200) {
            let mut sim = ProgressSimulator::new();
            sim.start();
            let mut last = sim.percent();
            for _ in 0..ticks {
                sim.tick();
                prop_assert!(sim.percent() >= last);
                last = sim.percent();
            }
        }

        /// Property: the stage pointer stays in range and never regresses
        #[test]
        fn test_stage_index_bounded_and_monotonic(ticks in 0usize..500) {
            let mut sim = ProgressSimulator::new();
            sim.start();
            let mut last = sim.stage_index();
            for _ in 0..ticks {
                sim.tick();
                prop_assert!(sim.stage_index() < STAGE_COUNT);
                prop_assert!(sim.stage_index() >= last);
                last = sim.stage_index();
            }
        }

        /// Property: finish snaps to exactly 100 from any point
        #[test]
        fn test_finish_always_lands_on_full(ticks in 0usize..300) {
            let mut sim = ProgressSimulator::new();
            sim.start();
            for _ in 0..ticks {
                sim.tick();
            }
            sim.finish();
            prop_assert_eq!(sim.percent(), 100);
            prop_assert!(!sim.is_running());
        }

        /// Property: stop freezes the value where it was
        #[test]
        fn test_stop_freezes_percent(ticks in 0usize..100, extra in 1usize..50) {
            let mut sim = ProgressSimulator::new();
            sim.start();
            for _ in 0..ticks {
                sim.tick();
            }
            sim.stop();
            let frozen = sim.percent();
            for _ in 0..extra {
                sim.tick();
            }
            prop_assert_eq!(sim.percent(), frozen);
        }
    }
}
