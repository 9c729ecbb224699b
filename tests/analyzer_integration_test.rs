//! End-to-end checks over a decoded stats fixture: load boundary, chunk
//! queries, cycle-safe metrics, flag pipeline, duplicate accounting.

use chunkmap::{load_report_from_str, AnalysisFlags, DuplicateConfig, ReportAnalyzer};
use indoc::indoc;
use pretty_assertions::assert_eq;

// Two initial chunks plus a lazy one. In "main", entry pulls in foobar
// and shared; foobar and widget form an import cycle. shared.js is
// duplicated across all three chunks.
const STATS: &str = indoc! {r#"
    {
      "version": "5.88.0",
      "chunks": [
        {
          "id": "main",
          "size": 400,
          "initial": true,
          "modules": [
            {
              "id": "entry",
              "identifier": "/ws/workspace/web/src/entry.js",
              "nameForCondition": "/ws/src/entry.js",
              "size": 100,
              "reasons": []
            },
            {
              "id": "foobar",
              "identifier": "/ws/workspace/web/src/MyFooBar.js",
              "nameForCondition": "/ws/src/MyFooBar.js",
              "size": 50,
              "reasons": [
                {"moduleId": "entry", "resolvedModule": "./entry.js"},
                {"moduleId": "widget", "resolvedModule": "./widget.js"}
              ]
            },
            {
              "id": "widget",
              "identifier": "/ws/workspace/web/src/widget.js",
              "nameForCondition": "/ws/src/widget.js",
              "size": 30,
              "reasons": [
                {"moduleId": "foobar", "resolvedModule": "./MyFooBar.js"}
              ]
            },
            {
              "id": "shared",
              "identifier": "/ws/workspace/web/src/shared.js",
              "nameForCondition": "/ws/src/shared.js",
              "size": 100,
              "reasons": [
                {"moduleId": "entry", "resolvedModule": "./entry.js"},
                {"resolvedModule": "external ref"}
              ]
            }
          ]
        },
        {
          "id": "admin",
          "size": 900,
          "initial": true,
          "modules": [
            {
              "id": "shared",
              "identifier": "/ws/workspace/web/src/shared.js",
              "size": 100,
              "reasons": []
            }
          ]
        },
        {
          "id": "lazy-settings",
          "size": 9999,
          "initial": false,
          "modules": [
            {
              "id": "shared",
              "identifier": "/ws/workspace/web/src/shared.js",
              "size": 100,
              "reasons": []
            }
          ]
        }
      ]
    }
"#};

fn analyzer() -> ReportAnalyzer {
    ReportAnalyzer::new(load_report_from_str(STATS).unwrap())
}

#[test]
fn top_chunks_are_initial_only_sorted_by_size() {
    let analyzer = analyzer();
    let ids: Vec<_> = analyzer
        .top_chunks()
        .iter()
        .map(|chunk| chunk.id.clone().unwrap())
        .collect();
    assert_eq!(ids, vec!["admin", "main"]);
    assert_eq!(analyzer.default_chunk_id().as_deref(), Some("admin"));
}

#[test]
fn chunk_search_uses_substring_matching() {
    let analyzer = analyzer();
    assert_eq!(analyzer.search_chunks("MAIN"), vec!["main"]);
    assert_eq!(analyzer.search_chunks("a"), vec!["main", "admin", "lazy-settings"]);
}

#[test]
fn module_search_matches_display_labels_case_insensitively() {
    let analyzer = analyzer();
    let found = analyzer.search_modules("main", "foo", AnalysisFlags::default());
    assert_eq!(found, vec!["foobar"]);

    let everything = analyzer.search_modules("main", "", AnalysisFlags::default());
    assert_eq!(everything, vec!["entry", "foobar", "widget", "shared"]);
}

#[test]
fn cyclic_imports_keep_metrics_finite() {
    let analyzer = analyzer();

    // entry -> foobar -> widget -> foobar is a cycle; the widget branch
    // truncates before re-entering foobar.
    assert_eq!(analyzer.dependent_size("main", "foobar"), Some(80));
    assert_eq!(
        analyzer.dependent_size("main", "entry"),
        Some(100 + 50 + 30 + 100)
    );
    assert!(analyzer.max_reasons_up("main", "foobar").unwrap() >= 1);
    assert_eq!(analyzer.max_reasons_up("main", "foobar"), Some(2));
}

#[test]
fn dependent_size_is_at_least_own_size_for_every_module() {
    let analyzer = analyzer();
    for module_id in ["entry", "foobar", "widget", "shared"] {
        let module = analyzer.module("main", module_id).unwrap();
        let size = analyzer.dependent_size("main", module_id).unwrap();
        assert!(size >= module.size_bytes());
    }
}

#[test]
fn low_fan_in_filter_preserves_order_of_survivors() {
    let analyzer = analyzer();
    let all = analyzer.search_modules("main", "", AnalysisFlags::default());
    let filtered = analyzer.search_modules("main", "", AnalysisFlags::with_filter_low_fan_in());

    // Every survivor keeps its relative position.
    let mut last_pos = 0;
    for id in &filtered {
        let pos = all.iter().position(|other| other == id).unwrap();
        assert!(pos >= last_pos);
        last_pos = pos;
        assert!(analyzer.max_reasons_up("main", id).unwrap() <= 2);
    }
}

#[test]
fn missing_module_id_flag_strictly_adds_reason_groups() {
    let analyzer = analyzer();
    let without = analyzer.reason_details("main", "shared", AnalysisFlags::default());
    let with = analyzer.reason_details("main", "shared", AnalysisFlags::with_missing_module_id());

    assert_eq!(without.len(), 1);
    assert_eq!(with.len(), 2);
    for group in without.iter() {
        assert!(with.iter().any(|g| g == group));
    }
}

#[test]
fn duplicate_accounting_matches_occurrence_math() {
    let analyzer = analyzer();
    let result = analyzer.duplicate_modules(&DuplicateConfig::default(), AnalysisFlags::default());

    let shared = result
        .groups
        .iter()
        .find(|group| group.key == "src/shared.js")
        .unwrap();
    assert_eq!(shared.chunk_ids, vec!["main", "admin", "lazy-settings"]);
    assert_eq!(shared.size, 100);
    assert_eq!(shared.duplicate_bytes, 200);
    assert!(result.total_duplicated_bytes >= 200);
    assert!(result.total_bytes >= 300);
    assert!(result.diagnostics.is_empty());

    // Most-duplicated key sorts first by default.
    assert_eq!(result.groups[0].key, "src/shared.js");
}

#[test]
fn children_listing_follows_the_forward_graph() {
    let analyzer = analyzer();
    let children = analyzer.children_of("main", "entry", AnalysisFlags::default());
    assert_eq!(children, vec!["foobar", "shared"]);
    assert!(analyzer
        .children_of("main", "shared", AnalysisFlags::default())
        .is_empty());
}
