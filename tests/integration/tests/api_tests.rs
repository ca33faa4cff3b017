//! API Integration Tests
//!
//! Each test spawns the real router on a local port with the in-memory
//! storage backend and a seeded directory; no external services needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::json;

async fn record(server: &TestServer, body: &ContributionBody) -> Recorded {
    let response = server.post("/api/v1/contributions", body).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn history(server: &TestServer, member_id: &str) -> Vec<Contribution> {
    let response = server
        .get(&format!("/api/v1/contributions?member_id={member_id}"))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Sequencing Tests
// ============================================================================

#[tokio::test]
async fn test_weekly_contribution_flow() {
    let server = TestServer::start().await.unwrap();

    // Period 1 with food only
    let first = record(&server, &ContributionBody::new(ASTER, WOLVES, 1).food(100)).await;
    assert!(first.created);
    assert_eq!(first.period, 1);
    assert_eq!(first.total, 100);

    let response = server
        .get(&format!("/api/v1/members/{ASTER}/next-period"))
        .await
        .unwrap();
    let next: NextPeriod = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(next.next_period, 2);
    assert_eq!(next.recorded_periods, vec![1]);
    assert_eq!(next.period_ceiling, 100);

    // Skipping ahead is rejected with the period to use instead
    let response = server
        .post(
            "/api/v1/contributions",
            &ContributionBody::new(ASTER, WOLVES, 3).food(1),
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "SEQUENCE_GAP");
    assert_eq!(error.expected_period, Some(2));
    assert_eq!(error.error.details.unwrap()["expected_period"], 2);

    // Period 2 with stone only
    record(&server, &ContributionBody::new(ASTER, WOLVES, 2).stone(20)).await;

    let response = server
        .get(&format!("/api/v1/members/{ASTER}/totals"))
        .await
        .unwrap();
    let totals: MemberTotals = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        (totals.food, totals.wood, totals.stone, totals.gold),
        (100, 0, 20, 0)
    );
    assert_eq!(totals.total, 120);
    assert_eq!(totals.periods_contributed, 2);
}

#[tokio::test]
async fn test_recording_existing_period_upserts() {
    let server = TestServer::start().await.unwrap();

    let first = record(&server, &ContributionBody::new(BRAM, WOLVES, 1).wood(50)).await;
    let again = record(&server, &ContributionBody::new(BRAM, WOLVES, 1).gold(5)).await;

    assert!(!again.created);
    assert_eq!(again.id, first.id);
    assert_eq!((again.wood, again.gold), (0, 5));

    let response = server
        .get(&format!("/api/v1/contributions?member_id={BRAM}"))
        .await
        .unwrap();
    let history: Vec<Contribution> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_identical_recreate_matches_create_then_update() {
    let server = TestServer::start().await.unwrap();

    // Same body twice
    let body = ContributionBody::new(ASTER, WOLVES, 1).food(100).on("2024-06-03");
    let first = record(&server, &body).await;
    let second = record(&server, &body).await;
    assert!(first.created);
    assert!(!second.created);
    assert_eq!(second.id, first.id);

    // Create with different values, then correct them with an update
    record(&server, &ContributionBody::new(BRAM, WOLVES, 1).gold(7).on("2024-05-01")).await;
    let response = server
        .put(
            &format!("/api/v1/contributions/{BRAM}/{WOLVES}/1"),
            &json!({ "food": 100, "recorded_at": "2024-06-03" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let recreated = history(&server, ASTER).await;
    let updated = history(&server, BRAM).await;
    assert_eq!(recreated.len(), 1);
    assert_eq!(updated.len(), 1);

    let stored = |c: &Contribution| {
        (c.period, c.food, c.wood, c.stone, c.gold, c.total, c.recorded_at.clone())
    };
    assert_eq!(recreated[0].id, first.id);
    assert_eq!(stored(&recreated[0]), stored(&updated[0]));
    assert_eq!(stored(&recreated[0]), (1, 100, 0, 0, 0, 100, "2024-06-03".to_string()));
}

#[tokio::test]
async fn test_deleted_period_must_be_refilled_first() {
    let server = TestServer::start().await.unwrap();
    for period in 1..=3 {
        record(&server, &ContributionBody::new(CORA, WOLVES, period).food(10)).await;
    }

    let response = server
        .delete(&format!("/api/v1/contributions/{CORA}/{WOLVES}/2"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post(
            "/api/v1/contributions",
            &ContributionBody::new(CORA, WOLVES, 4).food(10),
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.expected_period, Some(2));

    let refill = record(&server, &ContributionBody::new(CORA, WOLVES, 2).food(10)).await;
    assert!(refill.created);
}

// ============================================================================
// Contribution Error Tests
// ============================================================================

#[tokio::test]
async fn test_invalid_contributions_are_rejected() {
    let server = TestServer::start().await.unwrap();

    let cases = [
        (ContributionBody::new(ASTER, WOLVES, 1), StatusCode::BAD_REQUEST, "INVALID_RESOURCES"),
        (
            ContributionBody::new(ASTER, WOLVES, 1).food(-5).wood(10),
            StatusCode::BAD_REQUEST,
            "INVALID_RESOURCES",
        ),
        (
            ContributionBody::new(ASTER, WOLVES, 0).food(1),
            StatusCode::BAD_REQUEST,
            "PERIOD_OUT_OF_RANGE",
        ),
        (
            ContributionBody::new(ASTER, WOLVES, 101).food(1),
            StatusCode::BAD_REQUEST,
            "PERIOD_OUT_OF_RANGE",
        ),
        (
            ContributionBody::new(ASTER, CROWS, 1).food(1),
            StatusCode::BAD_REQUEST,
            "ALLIANCE_MISMATCH",
        ),
        (
            ContributionBody::new("999", WOLVES, 1).food(1),
            StatusCode::NOT_FOUND,
            "UNKNOWN_MEMBER",
        ),
    ];

    for (body, status, code) in cases {
        let response = server.post("/api/v1/contributions", &body).await.unwrap();
        let error: ErrorBody = assert_json(response, status).await.unwrap();
        assert_eq!(error.error.code, code, "for {body:?}");
        assert!(error.expected_period.is_none());
    }

    // Nothing was written
    let response = server
        .get(&format!("/api/v1/contributions?member_id={ASTER}"))
        .await
        .unwrap();
    let history: Vec<Contribution> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_update_contribution() {
    let server = TestServer::start().await.unwrap();
    record(
        &server,
        &ContributionBody::new(DREW, CROWS, 1).food(100).on("2024-06-03"),
    )
    .await;

    let response = server
        .put(
            &format!("/api/v1/contributions/{DREW}/{CROWS}/1"),
            &json!({ "wood": 30 }),
        )
        .await
        .unwrap();
    let updated: Contribution = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((updated.food, updated.wood), (0, 30));
    assert_eq!(updated.recorded_at, "2024-06-03");

    let response = server
        .put(
            &format!("/api/v1/contributions/{DREW}/{CROWS}/2"),
            &json!({ "wood": 30 }),
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_CONTRIBUTION");

    let response = server
        .put(
            &format!("/api/v1/contributions/{DREW}/{CROWS}/1"),
            &json!({ "wood": 0 }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_delete_contribution() {
    let server = TestServer::start().await.unwrap();
    record(&server, &ContributionBody::new(DREW, CROWS, 1).gold(3)).await;

    let path = format!("/api/v1/contributions/{DREW}/{CROWS}/1");
    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_malformed_requests() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/contributions").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get("/api/v1/contributions?member_id=not-a-number")
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .delete(&format!("/api/v1/contributions/{DREW}/{CROWS}/first"))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_PATH_PARAMETER");

    let response = server
        .post("/api/v1/contributions", &json!({ "member_id": ASTER }))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_BODY");
}

// ============================================================================
// Report Tests
// ============================================================================

#[tokio::test]
async fn test_leaderboard() {
    let server = TestServer::start().await.unwrap();
    record(&server, &ContributionBody::new(ASTER, WOLVES, 1).food(100)).await;
    record(&server, &ContributionBody::new(ASTER, WOLVES, 2).stone(20)).await;
    record(&server, &ContributionBody::new(BRAM, WOLVES, 1).wood(200)).await;
    record(&server, &ContributionBody::new(CORA, WOLVES, 1).gold(120)).await;
    record(&server, &ContributionBody::new(DREW, CROWS, 1).gold(999)).await;

    let response = server
        .get(&format!("/api/v1/alliances/{WOLVES}/leaderboard"))
        .await
        .unwrap();
    let board: Leaderboard = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(board.limit, 10);

    // Aster and Cora tie at 120; the lower member id ranks first
    let ranked: Vec<(u32, &str, u128)> = board
        .entries
        .iter()
        .map(|e| (e.rank, e.member_id.as_str(), e.total))
        .collect();
    assert_eq!(ranked, vec![(1, BRAM, 200), (2, ASTER, 120), (3, CORA, 120)]);
    assert_eq!(board.entries[0].member_name.as_deref(), Some("Bram"));

    let response = server
        .get(&format!("/api/v1/alliances/{WOLVES}/leaderboard?limit=1"))
        .await
        .unwrap();
    let board: Leaderboard = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(board.entries.len(), 1);

    let response = server.get("/api/v1/alliances/77/leaderboard").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_ALLIANCE");
}

#[tokio::test]
async fn test_alliance_totals_and_listing() {
    let server = TestServer::start().await.unwrap();
    record(&server, &ContributionBody::new(ASTER, WOLVES, 1).food(100).on("2024-06-03")).await;
    record(&server, &ContributionBody::new(ASTER, WOLVES, 2).stone(20).on("2024-06-10")).await;
    record(&server, &ContributionBody::new(BRAM, WOLVES, 1).wood(200).on("2024-06-04")).await;

    let response = server
        .get(&format!("/api/v1/alliances/{WOLVES}/totals"))
        .await
        .unwrap();
    let totals: AllianceTotals = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(totals.tag, "WOLF");
    assert_eq!(totals.total, 320);
    assert_eq!(totals.member_count, 2);
    assert_eq!(totals.periods_contributed, 3);

    let response = server
        .get(&format!(
            "/api/v1/alliances/{WOLVES}/contributions?recorded_from=2024-06-04"
        ))
        .await
        .unwrap();
    let listed: Vec<Contribution> = assert_json(response, StatusCode::OK).await.unwrap();
    let slots: Vec<(&str, u32)> = listed
        .iter()
        .map(|c| (c.member_id.as_str(), c.period))
        .collect();
    assert_eq!(slots, vec![(ASTER, 2), (BRAM, 1)]);

    let response = server
        .get(&format!(
            "/api/v1/alliances/{WOLVES}/contributions?member_id={ASTER}&period_to=1"
        ))
        .await
        .unwrap();
    let listed: Vec<Contribution> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].alliance_id, WOLVES);
}

#[tokio::test]
async fn test_alliance_totals_past_u64_are_exact() {
    let server = TestServer::start().await.unwrap();
    for member in [ASTER, BRAM, CORA] {
        record(&server, &ContributionBody::new(member, WOLVES, 1).food(i64::MAX)).await;
    }

    let response = server
        .get(&format!("/api/v1/alliances/{WOLVES}/totals"))
        .await
        .unwrap();
    let totals: AllianceTotals = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(totals.food, 27_670_116_110_564_327_421);
    assert_eq!(totals.total, 27_670_116_110_564_327_421);
}

#[tokio::test]
async fn test_record_with_total_past_u64_is_readable() {
    let server = TestServer::start().await.unwrap();
    let max = i64::MAX;
    let body = ContributionBody::new(DREW, CROWS, 1)
        .food(max)
        .wood(max)
        .stone(max)
        .gold(max);

    let recorded = record(&server, &body).await;
    assert!(recorded.created);
    assert_eq!(recorded.total, 4 * (max as u128));
    assert!(recorded.total > u128::from(u64::MAX));

    let again = record(&server, &body).await;
    assert!(!again.created);
    assert_eq!(again.total, recorded.total);

    let stored = history(&server, DREW).await;
    assert_eq!(stored[0].total, recorded.total);
}

// ============================================================================
// Tax Tests
// ============================================================================

#[tokio::test]
async fn test_tax_calculation() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post(
            "/api/v1/tax/calculate",
            &json!({
                "rate": 12.5,
                "entries": [1000, 333, 4],
                "deposit": [{ "index": 2, "kind": "gold" }, { "index": 0, "kind": "food" }],
            }),
        )
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["entries"][0]["tax"], 125);
    assert_eq!(body["entries"][0]["net"], 875);
    assert_eq!(body["entries"][1]["tax"], 42);
    assert_eq!(body["entries"][2]["tax"], 1);
    assert_eq!(body["totals"]["total_gross"], 1337);
    assert_eq!(body["totals"]["total_tax"], 168);
    assert_eq!(body["totals"]["total_net"], 1169);
    assert_eq!(
        body["deposited"],
        json!([
            { "index": 0, "kind": "food", "net": 875 },
            { "index": 2, "kind": "gold", "net": 3 },
        ])
    );
    assert_eq!(
        body["deposited_resources"],
        json!({ "food": 875, "wood": 0, "stone": 0, "gold": 3 })
    );
}

#[tokio::test]
async fn test_tax_deposit_overflowing_a_counter_is_rejected() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post(
            "/api/v1/tax/calculate",
            &json!({
                "rate": 0,
                "entries": [i64::MAX, 1],
                "deposit": [{ "index": 0, "kind": "wood" }, { "index": 1, "kind": "wood" }],
            }),
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "RESOURCE_OVERFLOW");

    let response = server
        .post(
            "/api/v1/tax/calculate",
            &json!({ "rate": 10, "entries": [100], "deposit": [{ "index": 0, "kind": "iron" }] }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tax_rejects_invalid_rate_and_entries() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/v1/tax/calculate", &json!({ "rate": 150, "entries": [10] }))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_TAX_RATE");

    let response = server
        .post("/api/v1/tax/calculate", &json!({ "rate": 10, "entries": [] }))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");

    let response = server
        .post("/api/v1/tax/calculate", &json!({ "rate": 10, "entries": [100, -1] }))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_GROSS_AMOUNT");
}
