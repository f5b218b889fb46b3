//! End-to-end tests for the enrichment loop.
//!
//! These drive `Enricher` with mock search and completion backends:
//! 1. Load entities from a table
//! 2. Search each entity
//! 3. Extract from the first snippet
//! 4. Export the result table

use enrichment::{
    sources::read_csv_path, Enricher, ExtractionFailure, ExtractionOutcome, MockCompleter,
    MockWebSearcher, SkipReason, Template,
};

const OPENAI_SNIPPET: &str = "Contact email: info@openai.com.";

fn email_template() -> Template {
    Template::parse("Get me the email of {Company}").unwrap()
}

#[tokio::test]
async fn test_openai_email_scenario() {
    let searcher =
        MockWebSearcher::new().with_snippet("Get me the email of OpenAI", OPENAI_SNIPPET);
    let completer = MockCompleter::new().with_content_containing("OpenAI", "info@openai.com");
    let enricher = Enricher::new(searcher, completer);

    let report = enricher.run(["OpenAI"], &email_template()).await;

    let prompts = enricher.extractor().completer().prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Get me the email of OpenAI"));
    assert!(prompts[0].contains(OPENAI_SNIPPET));

    assert_eq!(
        report.results.get("OpenAI"),
        Some(&ExtractionOutcome::Extracted("info@openai.com".into()))
    );
    assert_eq!(report.results.get("OpenAI").unwrap().render(), "info@openai.com");
}

#[tokio::test]
async fn test_entity_without_results_has_no_row() {
    let searcher =
        MockWebSearcher::new().with_snippet("Get me the email of OpenAI", OPENAI_SNIPPET);
    let completer = MockCompleter::new().with_default_content("info@openai.com");
    let enricher = Enricher::new(searcher, completer);

    let report = enricher.run(["Acme", "OpenAI"], &email_template()).await;

    assert!(!report.results.contains("Acme"));
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].entity, "Acme");
    assert_eq!(report.skipped[0].reason, SkipReason::NoSnippet);

    // Only OpenAI reached the model
    assert_eq!(enricher.extractor().completer().requests().len(), 1);
}

#[tokio::test]
async fn test_timeout_does_not_abort_run() {
    let searcher = MockWebSearcher::new()
        .with_snippet("Get me the email of OpenAI", OPENAI_SNIPPET)
        .with_snippet("Get me the email of Anthropic", "Reach us at support@anthropic.com");
    let completer = MockCompleter::new()
        .with_error_containing("OpenAI", "operation timed out")
        .with_content_containing("Anthropic", "support@anthropic.com");
    let enricher = Enricher::new(searcher, completer);

    let report = enricher
        .run(["OpenAI", "Anthropic"], &email_template())
        .await;

    let openai = report.results.get("OpenAI").unwrap();
    assert_eq!(
        openai,
        &ExtractionOutcome::Failed(ExtractionFailure::Api(
            "Network error: operation timed out".into()
        ))
    );
    assert_eq!(
        openai.render(),
        "Error during Groq API call: Network error: operation timed out"
    );
    assert_eq!(
        report.results.get("Anthropic").unwrap().text(),
        Some("support@anthropic.com")
    );
}

#[tokio::test]
async fn test_duplicates_processed_once_in_first_seen_order() {
    let searcher = MockWebSearcher::new()
        .with_snippet("Get me the email of OpenAI", OPENAI_SNIPPET)
        .with_snippet("Get me the email of Mistral", "contact@mistral.ai");
    let completer = MockCompleter::new().with_default_content("found");
    let enricher = Enricher::new(searcher, completer);

    let report = enricher
        .run(["Mistral", "OpenAI", "Mistral", "OpenAI"], &email_template())
        .await;

    assert_eq!(
        enricher.searcher().queries(),
        vec!["Get me the email of Mistral", "Get me the email of OpenAI"]
    );
    assert_eq!(
        report.results.entities().collect::<Vec<_>>(),
        vec!["Mistral", "OpenAI"]
    );
}

#[tokio::test]
async fn test_search_failure_skips_entity() {
    let searcher = MockWebSearcher::new()
        .with_status("Get me the email of OpenAI", 503)
        .with_snippet("Get me the email of Anthropic", "support@anthropic.com");
    let completer = MockCompleter::new().with_default_content("support@anthropic.com");
    let enricher = Enricher::new(searcher, completer);

    let report = enricher
        .run(["OpenAI", "Anthropic"], &email_template())
        .await;

    assert!(!report.results.contains("OpenAI"));
    assert!(matches!(
        report.skipped[0].reason,
        SkipReason::SearchFailed(_)
    ));
    assert!(report.results.contains("Anthropic"));
    assert_eq!(report.processed(), 2);
}

#[tokio::test]
async fn test_run_is_deterministic_for_fixed_responses() {
    let make = || {
        Enricher::new(
            MockWebSearcher::new().with_snippet("Get me the email of OpenAI", OPENAI_SNIPPET),
            MockCompleter::new().with_default_content("info@openai.com"),
        )
    };

    let first = make();
    let second = make();
    let a = first.run(["OpenAI"], &email_template()).await;
    let b = second.run(["OpenAI"], &email_template()).await;

    assert_eq!(a, b);
    assert_eq!(
        first.extractor().completer().requests(),
        second.extractor().completer().requests()
    );
}

#[tokio::test]
async fn test_csv_to_csv() {
    let table = read_csv_path(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/companies.csv"
    ))
    .unwrap();

    let searcher = MockWebSearcher::new()
        .with_snippet("Get me the email of OpenAI", OPENAI_SNIPPET)
        .with_snippet("Get me the email of Anthropic", "support@anthropic.com")
        .with_snippet("Get me the email of Mistral", "   ");
    let completer = MockCompleter::new()
        .with_content_containing("OpenAI", "info@openai.com")
        .with_content_containing("Anthropic", "support@anthropic.com");
    let enricher = Enricher::new(searcher, completer);

    let mut progress = Vec::new();
    let entities = table.entities("Company").unwrap();
    let report = enricher
        .run_with_progress(entities, &email_template(), |i, total, entity, _| {
            progress.push(format!("{}/{} {}", i + 1, total, entity));
        })
        .await;

    assert_eq!(progress, vec!["1/3 OpenAI", "2/3 Anthropic", "3/3 Mistral"]);

    // The blank Mistral snippet reaches extraction and short-circuits there
    assert_eq!(
        report.results.to_csv_string().unwrap(),
        "Entity,Extracted Information\n\
         OpenAI,info@openai.com\n\
         Anthropic,support@anthropic.com\n\
         Mistral,Search snippets are empty. Cannot proceed with extraction.\n"
    );
}
