// src/formatters.rs
// Response formatters for MCP tool output.
//
// Converts typed CommonTrace API responses into agent-readable strings.
// MCP tools return plain text, so every response shape gets one pure
// formatting function. All functions are total: any field may be absent
// and is replaced by an explicit default, never an error.

use crate::responses::{
    AmendmentResult, ContributionResult, RelatedTrace, SearchResponse, TagListResponse,
    TraceDetail, TraceSummary, VoteResult,
};

/// Max characters of context/solution text shown per search hit
const SNIPPET_CHARS: usize = 200;

/// Max related traces rendered under a search hit
const MAX_RELATED: usize = 3;

/// First `SNIPPET_CHARS` characters of `text`, with a trailing `...` only
/// when the original text was longer. Character-based, so multi-byte text
/// never splits a code point.
fn snippet(text: Option<&str>) -> String {
    let text = text.unwrap_or("");
    let mut out: String = text.chars().take(SNIPPET_CHARS).collect();
    if text.chars().count() > SNIPPET_CHARS {
        out.push_str("...");
    }
    out
}

/// Comma-joined tag list, or `(none)` when empty
fn join_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "(none)".to_string()
    } else {
        tags.join(", ")
    }
}

/// Status labels for temperature and validity.
///
/// `[FROZEN]`/`[COLD]` reflect the server's temperature classification;
/// `[EXPIRED]` is added independently whenever `valid_until` is present
/// and non-empty (the server pre-filters, so presence alone marks expiry).
fn status_labels(memory_temperature: Option<&str>, valid_until: Option<&str>) -> Vec<&'static str> {
    let mut labels = Vec::new();
    match memory_temperature {
        Some("FROZEN") => labels.push("[FROZEN]"),
        Some("COLD") => labels.push("[COLD]"),
        _ => {}
    }
    if valid_until.is_some_and(|v| !v.is_empty()) {
        labels.push("[EXPIRED]");
    }
    labels
}

/// Format a `POST /traces/search` response: numbered results with metrics,
/// tags, snippets, and up to three related traces each, or a fixed
/// "no results" message.
pub fn format_search_results(data: &SearchResponse) -> String {
    if data.results.is_empty() {
        return "No traces found matching your query.".to_string();
    }

    let query_label = match data.query.as_deref() {
        Some(q) if !q.is_empty() => format!(" for \"{}\"", q),
        _ => String::new(),
    };
    let plural = if data.total != 1 { "s" } else { "" };

    let mut lines = vec![format!(
        "Found {} result{}{}:\n",
        data.total, plural, query_label
    )];

    for (i, result) in data.results.iter().enumerate() {
        lines.push(render_result(i + 1, result));
    }

    lines.join("\n")
}

/// Render one numbered search hit (ends with a trailing newline)
fn render_result(index: usize, r: &TraceSummary) -> String {
    let labels = status_labels(r.memory_temperature.as_deref(), r.valid_until.as_deref());
    let title = r.title.as_deref().unwrap_or("(untitled)");
    let title_display = if labels.is_empty() {
        title.to_string()
    } else {
        format!("{} {}", labels.join(" "), title)
    };

    let mut entry = format!(
        "{}. {} (score: {:.2}, trust: {:.1}, retrievals: {}, depth: {})\n",
        index,
        title_display,
        r.similarity_score.unwrap_or(0.0),
        r.trust_score.unwrap_or(0.0),
        r.retrieval_count.unwrap_or(0),
        r.depth_score.unwrap_or(0.0),
    );
    entry.push_str(&format!("   Tags: {}\n", join_tags(&r.tags)));
    entry.push_str(&format!("   Context: {}\n", snippet(r.context_text.as_deref())));
    entry.push_str(&format!("   Solution: {}\n", snippet(r.solution_text.as_deref())));
    entry.push_str(&format!("   ID: {}\n", r.id.as_deref().unwrap_or("unknown")));

    if !r.related_traces.is_empty() {
        let related: Vec<String> = r
            .related_traces
            .iter()
            .take(MAX_RELATED)
            .map(render_related)
            .collect();
        entry.push_str("   Related:\n");
        entry.push_str(&related.join("\n"));
        entry.push('\n');
    }

    entry
}

fn render_related(rel: &RelatedTrace) -> String {
    format!(
        "     - [{}] {} ({})",
        rel.relationship_type.as_deref().unwrap_or("RELATED"),
        rel.title.as_deref().unwrap_or("(untitled)"),
        rel.id.as_deref().unwrap_or("unknown"),
    )
}

/// Format a `GET /traces/{id}` response with full, untruncated text.
pub fn format_trace(data: &TraceDetail) -> String {
    let temp_suffix = match data.memory_temperature.as_deref() {
        Some(t) if !t.is_empty() => format!(" | Temperature: {}", t),
        _ => String::new(),
    };

    // Validity window only renders when valid_from is known; an open-ended
    // window shows "present" as the end.
    let validity_line = match data.valid_from.as_deref() {
        Some(from) if !from.is_empty() => {
            let until = match data.valid_until.as_deref() {
                Some(u) if !u.is_empty() => u,
                _ => "present",
            };
            format!("\nValid: {} → {}", from, until)
        }
        _ => String::new(),
    };

    format!(
        "{}\nStatus: {} | Trust: {:.1} | Tags: {}{}\n{}\nContext:\n{}\n\nSolution:\n{}",
        data.title.as_deref().unwrap_or("(untitled)"),
        data.status.as_deref().unwrap_or("unknown"),
        data.trust_score.unwrap_or(0.0),
        join_tags(&data.tags),
        temp_suffix,
        validity_line,
        data.context_text.as_deref().unwrap_or(""),
        data.solution_text.as_deref().unwrap_or(""),
    )
}

/// Format a `POST /traces` confirmation.
pub fn format_contribution_result(data: &ContributionResult) -> String {
    format!(
        "Trace submitted successfully (ID: {}). Status: {} — it will be validated after community review.",
        data.id.as_deref().unwrap_or("unknown"),
        data.status.as_deref().unwrap_or("pending"),
    )
}

/// Format a `POST /traces/{id}/votes` confirmation.
///
/// `up`/`down` become "upvote"/"downvote"; anything else is shown verbatim.
/// The trace identifier falls back from `trace_id` to `id` to "unknown".
pub fn format_vote_result(data: &VoteResult) -> String {
    let vote_type = data.vote_type.as_deref().unwrap_or("");
    let label = match vote_type {
        "up" | "down" => format!("{}vote", vote_type),
        other => other.to_string(),
    };
    let trace_id = data
        .trace_id
        .as_deref()
        .or(data.id.as_deref())
        .unwrap_or("unknown");
    format!("Vote recorded: {} on trace {}.", label, trace_id)
}

/// Format a `GET /tags` response: lexicographically sorted, with a count.
pub fn format_tags(data: &TagListResponse) -> String {
    if data.tags.is_empty() {
        return "No tags available yet.".to_string();
    }
    let mut tags = data.tags.clone();
    tags.sort();
    format!("Available tags ({} total):\n{}", tags.len(), tags.join(", "))
}

/// Format a `POST /traces/{id}/amendments` confirmation.
pub fn format_amendment_result(data: &AmendmentResult) -> String {
    format!(
        "Amendment submitted successfully (ID: {}). Linked to trace {} — it will be reviewed by the community.",
        data.id.as_deref().unwrap_or("unknown"),
        data.original_trace_id.as_deref().unwrap_or("unknown"),
    )
}

/// Format an HTTP failure as safe, displayable text. This is the single
/// path by which upstream errors reach the agent; it never panics and is
/// never itself an error.
pub fn format_error(status_code: u16, detail: &str) -> String {
    format!("[CommonTrace error] {} (HTTP {})", detail, status_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str) -> TraceSummary {
        TraceSummary {
            id: Some("t1".to_string()),
            title: Some(title.to_string()),
            ..TraceSummary::default()
        }
    }

    // ------------------------------------------------------------------
    // Search results
    // ------------------------------------------------------------------

    #[test]
    fn test_search_empty_results_fixed_message() {
        let data = SearchResponse {
            results: vec![],
            total: 17, // ignored when there are no results
            query: Some("anything".to_string()),
        };
        assert_eq!(
            format_search_results(&data),
            "No traces found matching your query."
        );
    }

    #[test]
    fn test_search_default_response_fixed_message() {
        assert_eq!(
            format_search_results(&SearchResponse::default()),
            "No traces found matching your query."
        );
    }

    #[test]
    fn test_search_header_singular() {
        let data = SearchResponse {
            results: vec![summary("A")],
            total: 1,
            query: None,
        };
        let out = format_search_results(&data);
        assert!(out.starts_with("Found 1 result:\n"));
        assert!(!out.contains("results:"));
    }

    #[test]
    fn test_search_header_plural_and_query() {
        let data = SearchResponse {
            results: vec![summary("A"), summary("B")],
            total: 2,
            query: Some("rust panic".to_string()),
        };
        let out = format_search_results(&data);
        assert!(out.starts_with("Found 2 results for \"rust panic\":\n"));
    }

    #[test]
    fn test_search_header_zero_total_pluralized() {
        // total can disagree with the page of results; it drives pluralization
        let data = SearchResponse {
            results: vec![summary("A")],
            total: 0,
            query: None,
        };
        assert!(format_search_results(&data).starts_with("Found 0 results:"));
    }

    #[test]
    fn test_search_empty_query_omits_clause() {
        let data = SearchResponse {
            results: vec![summary("A")],
            total: 1,
            query: Some(String::new()),
        };
        assert!(format_search_results(&data).starts_with("Found 1 result:\n"));
    }

    #[test]
    fn test_search_entry_metrics_and_defaults() {
        let data = SearchResponse {
            results: vec![TraceSummary::default()],
            total: 1,
            query: None,
        };
        let out = format_search_results(&data);
        assert!(out.contains("1. (untitled) (score: 0.00, trust: 0.0, retrievals: 0, depth: 0)"));
        assert!(out.contains("   Tags: (none)"));
        assert!(out.contains("   Context: \n"));
        assert!(out.contains("   Solution: \n"));
        assert!(out.contains("   ID: unknown"));
    }

    #[test]
    fn test_search_entry_formats_metrics() {
        let mut s = summary("Fix deadlock");
        s.similarity_score = Some(0.918);
        s.trust_score = Some(4.26);
        s.retrieval_count = Some(12);
        s.depth_score = Some(3.0);
        s.tags = vec!["tokio".to_string(), "sync".to_string()];
        let data = SearchResponse {
            results: vec![s],
            total: 1,
            query: None,
        };
        let out = format_search_results(&data);
        assert!(out.contains("1. Fix deadlock (score: 0.92, trust: 4.3, retrievals: 12, depth: 3)"));
        assert!(out.contains("   Tags: tokio, sync"));
    }

    #[test]
    fn test_fractional_depth_rendered_verbatim() {
        // depth_score is usually a whole number but the API may send a float
        let mut s = summary("Deep");
        s.depth_score = Some(2.5);
        let data = SearchResponse {
            results: vec![s],
            total: 1,
            query: None,
        };
        assert!(format_search_results(&data).contains("depth: 2.5)"));
    }

    #[test]
    fn test_snippet_no_ellipsis_at_exact_limit() {
        let text = "x".repeat(200);
        let mut s = summary("A");
        s.context_text = Some(text.clone());
        let data = SearchResponse {
            results: vec![s],
            total: 1,
            query: None,
        };
        let out = format_search_results(&data);
        assert!(out.contains(&format!("Context: {}\n", text)));
        assert!(!out.contains(&format!("{}...", text)));
    }

    #[test]
    fn test_snippet_truncates_over_limit() {
        let text = "y".repeat(201);
        let mut s = summary("A");
        s.solution_text = Some(text);
        let data = SearchResponse {
            results: vec![s],
            total: 1,
            query: None,
        };
        let out = format_search_results(&data);
        let expected = format!("Solution: {}...", "y".repeat(200));
        assert!(out.contains(&expected));
    }

    #[test]
    fn test_snippet_counts_characters_not_bytes() {
        // 201 three-byte chars; byte slicing would split a code point
        let text = "語".repeat(201);
        let mut s = summary("A");
        s.context_text = Some(text);
        let data = SearchResponse {
            results: vec![s],
            total: 1,
            query: None,
        };
        let out = format_search_results(&data);
        let expected = format!("Context: {}...", "語".repeat(200));
        assert!(out.contains(&expected));
    }

    #[test]
    fn test_temperature_and_expiry_labels_are_additive() {
        let mut s = summary("Old wisdom");
        s.memory_temperature = Some("FROZEN".to_string());
        s.valid_until = Some("2024-01-01".to_string());
        let data = SearchResponse {
            results: vec![s],
            total: 1,
            query: None,
        };
        let out = format_search_results(&data);
        assert!(out.contains("1. [FROZEN] [EXPIRED] Old wisdom"));
    }

    #[test]
    fn test_cold_label() {
        let mut s = summary("Cooling off");
        s.memory_temperature = Some("COLD".to_string());
        let out = format_search_results(&SearchResponse {
            results: vec![s],
            total: 1,
            query: None,
        });
        assert!(out.contains("1. [COLD] Cooling off"));
    }

    #[test]
    fn test_unrecognized_temperature_ignored() {
        let mut s = summary("Warm");
        s.memory_temperature = Some("HOT".to_string());
        let out = format_search_results(&SearchResponse {
            results: vec![s],
            total: 1,
            query: None,
        });
        assert!(out.contains("1. Warm ("));
        assert!(!out.contains("[HOT]"));
    }

    #[test]
    fn test_empty_valid_until_is_not_expired() {
        let mut s = summary("Current");
        s.valid_until = Some(String::new());
        let out = format_search_results(&SearchResponse {
            results: vec![s],
            total: 1,
            query: None,
        });
        assert!(!out.contains("[EXPIRED]"));
    }

    #[test]
    fn test_related_traces_capped_at_three() {
        let mut s = summary("Hub");
        s.related_traces = (0..5)
            .map(|i| RelatedTrace {
                relationship_type: Some("SUPERSEDES".to_string()),
                title: Some(format!("Rel {}", i)),
                id: Some(format!("r{}", i)),
            })
            .collect();
        let out = format_search_results(&SearchResponse {
            results: vec![s],
            total: 1,
            query: None,
        });
        assert!(out.contains("   Related:\n"));
        assert!(out.contains("     - [SUPERSEDES] Rel 2 (r2)"));
        assert!(!out.contains("Rel 3"));
        assert!(!out.contains("Rel 4"));
    }

    #[test]
    fn test_related_trace_defaults() {
        let mut s = summary("Hub");
        s.related_traces = vec![RelatedTrace::default()];
        let out = format_search_results(&SearchResponse {
            results: vec![s],
            total: 1,
            query: None,
        });
        assert!(out.contains("     - [RELATED] (untitled) (unknown)"));
    }

    #[test]
    fn test_no_related_block_when_absent() {
        let out = format_search_results(&SearchResponse {
            results: vec![summary("Solo")],
            total: 1,
            query: None,
        });
        assert!(!out.contains("Related:"));
    }

    #[test]
    fn test_entries_blank_line_separated() {
        let out = format_search_results(&SearchResponse {
            results: vec![summary("First"), summary("Second")],
            total: 2,
            query: None,
        });
        assert!(out.contains("ID: t1\n\n2. Second"));
    }

    // ------------------------------------------------------------------
    // Single trace
    // ------------------------------------------------------------------

    #[test]
    fn test_trace_full() {
        let data = TraceDetail {
            title: Some("Avoid blocking in async".to_string()),
            status: Some("validated".to_string()),
            trust_score: Some(4.5),
            tags: vec!["tokio".to_string()],
            memory_temperature: Some("FROZEN".to_string()),
            valid_from: Some("2024-01-01".to_string()),
            valid_until: Some("2024-06-01".to_string()),
            context_text: Some("Long context here".to_string()),
            solution_text: Some("Long solution here".to_string()),
            ..TraceDetail::default()
        };
        let out = format_trace(&data);
        assert!(out.starts_with("Avoid blocking in async\n"));
        assert!(out.contains("Status: validated | Trust: 4.5 | Tags: tokio | Temperature: FROZEN\n"));
        assert!(out.contains("\nValid: 2024-01-01 → 2024-06-01"));
        assert!(out.contains("\nContext:\nLong context here\n"));
        assert!(out.ends_with("\nSolution:\nLong solution here"));
    }

    #[test]
    fn test_trace_open_ended_validity() {
        let data = TraceDetail {
            valid_from: Some("2024-01-01".to_string()),
            ..TraceDetail::default()
        };
        assert!(format_trace(&data).contains("Valid: 2024-01-01 → present"));
    }

    #[test]
    fn test_trace_no_validity_line_without_valid_from() {
        // valid_until alone never produces a validity line
        let data = TraceDetail {
            valid_until: Some("2024-06-01".to_string()),
            ..TraceDetail::default()
        };
        assert!(!format_trace(&data).contains("Valid:"));
    }

    #[test]
    fn test_trace_no_temperature_suffix_when_absent() {
        let out = format_trace(&TraceDetail::default());
        assert!(!out.contains("Temperature:"));
    }

    #[test]
    fn test_trace_defaults() {
        let out = format_trace(&TraceDetail::default());
        assert!(out.starts_with("(untitled)\n"));
        assert!(out.contains("Status: unknown | Trust: 0.0 | Tags: (none)\n"));
        assert!(out.contains("\nContext:\n\n"));
        assert!(out.ends_with("Solution:\n"));
    }

    #[test]
    fn test_trace_text_not_truncated() {
        let long = "z".repeat(5000);
        let data = TraceDetail {
            context_text: Some(long.clone()),
            ..TraceDetail::default()
        };
        let out = format_trace(&data);
        assert!(out.contains(&long));
        assert!(!out.contains("..."));
    }

    // ------------------------------------------------------------------
    // Confirmations
    // ------------------------------------------------------------------

    #[test]
    fn test_contribution_result() {
        let data = ContributionResult {
            id: Some("abc-123".to_string()),
            status: Some("pending".to_string()),
        };
        assert_eq!(
            format_contribution_result(&data),
            "Trace submitted successfully (ID: abc-123). Status: pending — it will be validated after community review."
        );
    }

    #[test]
    fn test_contribution_result_defaults() {
        let out = format_contribution_result(&ContributionResult::default());
        assert!(out.contains("(ID: unknown)"));
        assert!(out.contains("Status: pending"));
    }

    #[test]
    fn test_vote_up() {
        let data = VoteResult {
            vote_type: Some("up".to_string()),
            trace_id: Some("t1".to_string()),
            id: None,
        };
        assert_eq!(format_vote_result(&data), "Vote recorded: upvote on trace t1.");
    }

    #[test]
    fn test_vote_down() {
        let data = VoteResult {
            vote_type: Some("down".to_string()),
            trace_id: Some("t9".to_string()),
            id: None,
        };
        assert_eq!(format_vote_result(&data), "Vote recorded: downvote on trace t9.");
    }

    #[test]
    fn test_vote_other_type_verbatim() {
        let data = VoteResult {
            vote_type: Some("retract".to_string()),
            trace_id: Some("t1".to_string()),
            id: None,
        };
        assert_eq!(
            format_vote_result(&data),
            "Vote recorded: retract on trace t1."
        );
    }

    #[test]
    fn test_vote_id_fallback_chain() {
        let data = VoteResult {
            vote_type: Some("up".to_string()),
            trace_id: None,
            id: Some("fallback-id".to_string()),
        };
        assert_eq!(
            format_vote_result(&data),
            "Vote recorded: upvote on trace fallback-id."
        );

        assert_eq!(
            format_vote_result(&VoteResult::default()),
            "Vote recorded:  on trace unknown."
        );
    }

    #[test]
    fn test_amendment_result() {
        let data = AmendmentResult {
            id: Some("am-1".to_string()),
            original_trace_id: Some("t1".to_string()),
        };
        assert_eq!(
            format_amendment_result(&data),
            "Amendment submitted successfully (ID: am-1). Linked to trace t1 — it will be reviewed by the community."
        );
    }

    #[test]
    fn test_amendment_result_defaults() {
        let out = format_amendment_result(&AmendmentResult::default());
        assert!(out.contains("(ID: unknown)"));
        assert!(out.contains("Linked to trace unknown"));
    }

    // ------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------

    #[test]
    fn test_tags_sorted_with_count() {
        let data = TagListResponse {
            tags: vec!["b".to_string(), "a".to_string()],
        };
        assert_eq!(format_tags(&data), "Available tags (2 total):\na, b");
    }

    #[test]
    fn test_tags_sort_is_case_sensitive() {
        let data = TagListResponse {
            tags: vec!["banana".to_string(), "Apple".to_string(), "apple".to_string()],
        };
        assert_eq!(
            format_tags(&data),
            "Available tags (3 total):\nApple, apple, banana"
        );
    }

    #[test]
    fn test_tags_empty() {
        assert_eq!(
            format_tags(&TagListResponse::default()),
            "No tags available yet."
        );
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    #[test]
    fn test_format_error() {
        assert_eq!(
            format_error(404, "trace not found"),
            "[CommonTrace error] trace not found (HTTP 404)"
        );
    }

    #[test]
    fn test_format_error_empty_detail() {
        assert_eq!(format_error(500, ""), "[CommonTrace error]  (HTTP 500)");
    }

    // ------------------------------------------------------------------
    // Idempotence
    // ------------------------------------------------------------------

    #[test]
    fn test_formatters_are_idempotent() {
        let mut s = summary("Stable");
        s.memory_temperature = Some("COLD".to_string());
        let search = SearchResponse {
            results: vec![s],
            total: 1,
            query: Some("q".to_string()),
        };
        assert_eq!(format_search_results(&search), format_search_results(&search));

        let detail = TraceDetail {
            valid_from: Some("2024-01-01".to_string()),
            ..TraceDetail::default()
        };
        assert_eq!(format_trace(&detail), format_trace(&detail));
        assert_eq!(format_error(503, "x"), format_error(503, "x"));
    }
}
