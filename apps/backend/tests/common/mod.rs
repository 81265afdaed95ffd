#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use once_cell::sync::OnceCell;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

// Logging is auto-installed for every test binary that pulls in `common`
#[ctor::ctor]
fn init_logging() {
    INIT.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .ok()
            .and_then(|s| EnvFilter::try_new(s).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("warn"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Validate that a response follows the ProblemDetails structure and return its body.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .expect("content-type header")
        .to_str()
        .expect("ascii content-type")
        .to_string();
    assert_eq!(content_type, "application/problem+json");

    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body).expect("problem details json");

    for key in ["type", "title", "status", "detail", "code"] {
        assert!(json.get(key).is_some(), "missing `{key}` in {json}");
    }
    assert_eq!(json["status"], expected_status);
    assert_eq!(json["code"], expected_code);
    json
}

/// Two players mid-round: player 0 led with 7C and player 1 must answer.
/// Hearts are trump and the deck is empty.
pub fn defense_snapshot() -> Value {
    json!({
        "attackingPlayer": 0,
        "defendingPlayer": 1,
        "deckSize": 0,
        "battlefield": {
            "attacks": [{ "attacking": "7C", "defending": null }],
            "maxAttacks": 3
        },
        "players": [
            { "hand": ["8D", "9S"], "status": "ATTACKING" },
            { "hand": ["6C", "10C", "6H"], "status": "DEFENDING" }
        ],
        "playersRemaining": 2,
        "trumpCard": "AH"
    })
}

/// Fresh round for three players with a partly hidden deck.
pub fn opening_snapshot() -> Value {
    json!({
        "attackingPlayer": 1,
        "defendingPlayer": 2,
        "deckSize": 8,
        "battlefield": { "attacks": [], "maxAttacks": 6 },
        "players": [
            { "hand": ["6C", "7C", "8C", "9C", "10C", "JC"], "status": null },
            { "hand": ["6D", "6S", "8D", "QD", "KS", "AC"], "status": "ATTACKING" },
            { "hand": ["7D", "9D", "10D", "JD", "QS", "KH"], "status": "DEFENDING" }
        ],
        "playersRemaining": 3,
        "trumpCard": "7H"
    })
}
