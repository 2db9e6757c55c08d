/// Import pipeline tests - parsing and validation of exported files
///
/// Tests cover:
/// - Format detection and routing
/// - JSON object/array parsing and normalisation
/// - CSV grouping, header checks and skipped rows
/// - Tier rules and date validation
mod utils;

use serde_json::json;
use std::sync::Arc;
use tipdesk_lib::modules::data_import::domain::services::import_components::{
    Candidate, PredictionValidator,
};
use tipdesk_lib::modules::data_import::{RowError, SourceFormat};
use tipdesk_lib::modules::prediction::{InMemoryPredictionRepository, Tier};
use tipdesk_lib::shared::errors::ImportError;
use utils::factories::{date, match_json, PredictionFactory};
use utils::helpers::{build_services, TestServices};

const HEADER: &str = "prediction_date,tier,match_date,match_name,prediction,odds";

fn services() -> TestServices {
    build_services(Arc::new(InMemoryPredictionRepository::new()))
}

#[test]
fn json_single_object_round_trips() {
    let services = services();
    let expected = PredictionFactory::silver("2025-01-27")
        .ticket_odds(1.8)
        .result("WIN")
        .build();
    let input = serde_json::to_string(&expected).unwrap();

    let batch = services.import_service.parse(&input).unwrap();

    assert_eq!(batch.format, SourceFormat::Json);
    assert_eq!(batch.predictions, vec![expected]);
}

#[test]
fn json_fills_missing_ticket_odds_from_matches() {
    let services = services();
    let input = PredictionFactory::gold("2025-01-27").build_json().to_string();

    let batch = services.import_service.parse(&input).unwrap();

    // 1.70 x 2.00 x 2.50
    assert_eq!(batch.predictions[0].ticket_odds, Some(8.5));
}

#[test]
fn json_accepts_quoted_odds() {
    let services = services();
    let input = json!({
        "prediction_date": "2025-01-27",
        "tier": "gold",
        "matches": [
            match_json("2025-01-27", "PSG vs Lyon", "Over 2.5", json!("2.10")),
            match_json("2025-01-27", "Inter vs Milan", "X", json!(3)),
        ]
    })
    .to_string();

    let batch = services.import_service.parse(&input).unwrap();
    let prediction = &batch.predictions[0];

    assert_eq!(prediction.matches[0].odds, 2.1);
    assert_eq!(prediction.ticket_odds, Some(6.3));
}

#[test]
fn normalisation_is_idempotent() {
    let services = services();
    let input = PredictionFactory::gold("2025-01-27").build_json().to_string();

    let first = services.import_service.parse(&input).unwrap();
    let again = serde_json::to_string(&first.predictions).unwrap();
    let second = services.import_service.parse(&again).unwrap();

    assert_eq!(first.predictions, second.predictions);
    assert!(second.warnings.is_empty());
}

#[test]
fn validation_leaves_candidate_untouched() {
    let validator = PredictionValidator::new();
    let candidate = Candidate::new(0, PredictionFactory::gold("2025-01-27").build_json());
    let before = candidate.clone();

    assert!(validator.validate(&candidate).is_valid());
    assert_eq!(candidate, before);
    assert!(candidate.value.get("ticket_odds").is_none());
}

#[test]
fn silver_with_wrong_match_count_names_the_count() {
    let services = services();
    let input = PredictionFactory::silver("2025-01-27")
        .with_match("PSG vs Lyon", "Over 2.5", 2.0)
        .with_match("Inter vs Milan", "X", 3.0)
        .build_json()
        .to_string();

    let err = services.import_service.parse(&input).unwrap_err();

    assert_eq!(
        err.messages(),
        vec!["Prediction 1: Silver tier must have exactly 1 match (found 3)"]
    );
}

#[test]
fn calendar_invalid_date_is_rejected() {
    let services = services();
    let mut value = PredictionFactory::silver("2025-01-27").build_json();
    value["prediction_date"] = json!("2025-13-40");
    value["matches"][0]["match_date"] = json!("2025-02-30");

    let err = services.import_service.parse(&value.to_string()).unwrap_err();

    assert_eq!(
        err.messages(),
        vec![
            "Prediction 1: Invalid prediction_date format (use YYYY-MM-DD)",
            "Prediction 1: Match 1: Invalid match_date format",
        ]
    );
}

#[test]
fn one_invalid_record_rejects_the_batch() {
    let services = services();
    let mut bad = PredictionFactory::gold("2025-01-28").build_json();
    bad["tier"] = json!("diamond");
    bad["matches"][1]["odds"] = json!(-1.5);
    let input = json!([PredictionFactory::silver("2025-01-27").build_json(), bad]).to_string();

    let err = services.import_service.parse(&input).unwrap_err();

    assert!(matches!(err, ImportError::Validation(_)));
    assert_eq!(
        err.messages(),
        vec![
            "Prediction 2: Invalid tier (must be: silver, gold, or platinum)",
            "Prediction 2: Match 2: Invalid odds (must be a positive number)",
        ]
    );
}

#[test]
fn malformed_json_is_reported_not_raised() {
    let services = services();

    let err = services
        .import_service
        .parse(r#"[{"tier": "gold", "matches": [],}]"#)
        .unwrap_err();

    match &err {
        ImportError::MalformedInput(detail) => assert!(!detail.is_empty()),
        other => panic!("expected malformed input, got {:?}", other),
    }
    assert!(err.to_string().starts_with("Invalid JSON format: "));
}

#[test]
fn unrecognized_text_is_rejected() {
    let services = services();
    let err = services.import_service.parse("silver tip: arsenal").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unable to detect file format. Please use JSON or CSV format."
    );
}

#[test]
fn csv_rows_with_same_key_group_in_row_order() {
    let services = services();
    let content = format!(
        "{}\n\
         2025-01-27,gold,2025-01-27,Arsenal vs Chelsea,1 (Home Win),1.70\n\
         2025-01-27,gold,2025-01-27,Barcelona vs Real Madrid,Over 2.5,2.00\n",
        HEADER
    );

    let batch = services.import_service.parse(&content).unwrap();

    assert_eq!(batch.format, SourceFormat::Csv);
    assert_eq!(batch.len(), 1);
    let prediction = &batch.predictions[0];
    assert_eq!(prediction.tier, Tier::Gold);
    assert_eq!(prediction.prediction_date, date("2025-01-27"));
    let names: Vec<&str> = prediction
        .matches
        .iter()
        .map(|m| m.match_name.as_str())
        .collect();
    assert_eq!(names, vec!["Arsenal vs Chelsea", "Barcelona vs Real Madrid"]);
    assert_eq!(prediction.ticket_odds, Some(3.4));
}

#[test]
fn csv_missing_columns_are_named() {
    let services = services();
    let content = "prediction_date,tier,match_name,prediction\n2025-01-27,silver,A vs B,1";

    let err = services.import_service.parse(content).unwrap_err();

    assert_eq!(
        err,
        ImportError::MissingColumns(vec!["match_date".to_string(), "odds".to_string()])
    );
}

#[test]
fn csv_bad_row_is_skipped_and_rest_parse() {
    let services = services();
    let content = format!(
        "{}\n\
         2025-01-27,silver,2025-01-27,Arsenal vs Chelsea,1,1.80\n\
         2025-01-28,gold,2025-01-28,PSG vs Lyon\n\
         2025-01-29,silver,2025-01-29,Inter vs Milan,X,3.10",
        HEADER
    );

    let batch = services.import_service.parse(&content).unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch.skipped_rows, vec![RowError::column_count_mismatch(3)]);
    assert_eq!(batch.predictions[1].matches[0].match_name, "Inter vs Milan");
}

#[test]
fn header_line_alone_is_not_recognised() {
    let services = services();
    // A lone header trims to a single line, which is not CSV
    let err = services.import_service.parse(&format!("{}\n", HEADER)).unwrap_err();
    assert_eq!(err, ImportError::UnrecognizedFormat);
}

#[test]
fn overflowing_combined_odds_are_rejected() {
    let services = services();
    let input = json!({
        "prediction_date": "2025-01-27",
        "tier": "gold",
        "matches": [
            match_json("2025-01-27", "PSG vs Lyon", "Over 2.5", json!(1e200)),
            match_json("2025-01-27", "Inter vs Milan", "X", json!(1e200)),
        ]
    })
    .to_string();

    let err = services.import_service.parse(&input).unwrap_err();

    assert_eq!(
        err.messages(),
        vec!["Prediction 1: Combined match odds out of range"]
    );
}

#[test]
fn example_payloads_parse_cleanly() {
    let services = services();
    for tier in Tier::ALL {
        let example = services.import_service.example(tier).unwrap();
        let batch = services.import_service.parse(&example).unwrap();
        assert_eq!(batch.predictions[0].tier, tier);
        assert!(batch.warnings.is_empty(), "{:?}", batch.warnings);
    }
}
