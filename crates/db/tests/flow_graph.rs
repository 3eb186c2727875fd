//! Integration tests for flow graph storage.
//!
//! Exercises node upserts, run path steps, and flow starts against a real
//! database:
//! - Rule set and action set nodes are keyed by (flow, uuid) and refresh in
//!   place when written again
//! - Path steps carry the destination node the run moved on to
//! - Flow starts keep the source's addressed-contact count

use sqlx::PgPool;
use uuid::Uuid;

use relay_db::models::contact::CreateContact;
use relay_db::models::flow::{CreateActionSet, CreateFlow, CreateRuleSet, Flow};
use relay_db::models::flow_run::{CreateFlowRun, FlowRun};
use relay_db::models::flow_start::CreateFlowStart;
use relay_db::repositories::{
    ActionSetRepo, ContactRepo, FlowRepo, FlowRunRepo, FlowStartRepo, FlowStepRepo, RuleSetRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_org(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO orgs (uuid, name) VALUES ($1, 'Test Org') RETURNING id")
        .bind(Uuid::new_v4())
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn seed_flow(pool: &PgPool, org_id: i64) -> Flow {
    FlowRepo::create(
        pool,
        &CreateFlow {
            org_id,
            uuid: Uuid::new_v4(),
            name: "Registration".to_string(),
            flow_type: "F".to_string(),
            base_language: Some("eng".to_string()),
            version_number: None,
            entry_uuid: None,
            expires_after_minutes: None,
            metadata: None,
            created_by: None,
            created_on: None,
        },
    )
    .await
    .unwrap()
}

async fn seed_run(pool: &PgPool, org_id: i64, flow_id: i64) -> FlowRun {
    let contact = ContactRepo::create(
        pool,
        &CreateContact {
            org_id,
            uuid: Uuid::new_v4(),
            name: Some("Eric".to_string()),
            language: None,
            is_blocked: false,
            is_stopped: false,
            created_by: None,
            created_on: None,
            modified_on: None,
        },
    )
    .await
    .unwrap();

    FlowRunRepo::create(
        pool,
        &CreateFlowRun {
            org_id,
            flow_id,
            contact_id: contact.id,
            start_id: None,
            responded: true,
            exit_type: Some("C".to_string()),
            created_on: None,
            modified_on: None,
            exited_on: None,
            expires_on: None,
        },
    )
    .await
    .unwrap()
}

fn new_rule_set(flow_id: i64, uuid: Uuid, rules: serde_json::Value) -> CreateRuleSet {
    CreateRuleSet {
        flow_id,
        uuid,
        label: Some("Response 1".to_string()),
        operand: Some("@step.value".to_string()),
        finished_key: None,
        ruleset_type: Some("wait_message".to_string()),
        response_type: None,
        x: 100,
        y: 200,
        rules,
        config: serde_json::json!({}),
    }
}

// ---------------------------------------------------------------------------
// Test: rule set upsert refreshes the node in place
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn rule_set_upsert_refreshes_in_place(pool: PgPool) {
    let org_id = seed_org(&pool).await;
    let flow = seed_flow(&pool, org_id).await;
    let node_uuid = Uuid::new_v4();

    let first = RuleSetRepo::upsert(
        &pool,
        &new_rule_set(flow.id, node_uuid, serde_json::json!([{"test": "red"}])),
    )
    .await
    .unwrap();

    let second = RuleSetRepo::upsert(
        &pool,
        &new_rule_set(flow.id, node_uuid, serde_json::json!([{"test": "blue"}])),
    )
    .await
    .unwrap();

    // Same row, refreshed payload, no duplicate.
    assert_eq!(second.id, first.id);
    assert_eq!(second.rules, serde_json::json!([{"test": "blue"}]));

    let nodes = RuleSetRepo::list_by_flow(&pool, flow.id).await.unwrap();
    assert_eq!(nodes.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: action set upsert refreshes the node in place
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn action_set_upsert_refreshes_in_place(pool: PgPool) {
    let org_id = seed_org(&pool).await;
    let flow = seed_flow(&pool, org_id).await;
    let node_uuid = Uuid::new_v4();
    let destination = Uuid::new_v4();

    let first = ActionSetRepo::upsert(
        &pool,
        &CreateActionSet {
            flow_id: flow.id,
            uuid: node_uuid,
            destination_uuid: None,
            x: 0,
            y: 0,
            actions: serde_json::json!([]),
        },
    )
    .await
    .unwrap();

    let second = ActionSetRepo::upsert(
        &pool,
        &CreateActionSet {
            flow_id: flow.id,
            uuid: node_uuid,
            destination_uuid: Some(destination),
            x: 50,
            y: 75,
            actions: serde_json::json!([{"type": "reply", "msg": "Hi"}]),
        },
    )
    .await
    .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.destination_uuid, Some(destination));
    assert_eq!(second.x, 50);

    let nodes = ActionSetRepo::list_by_flow(&pool, flow.id).await.unwrap();
    assert_eq!(nodes.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: path steps carry the destination node
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn step_records_destination_node(pool: PgPool) {
    let org_id = seed_org(&pool).await;
    let flow = seed_flow(&pool, org_id).await;
    let run = seed_run(&pool, org_id, flow.id).await;
    let destination = Uuid::new_v4();

    let step = FlowStepRepo::record(
        &pool,
        run.id,
        Uuid::new_v4(),
        "R",
        Some(destination),
        chrono::Utc::now(),
    )
    .await
    .unwrap();
    assert_eq!(step.next_uuid, Some(destination));

    // Terminal steps have no onward node.
    let last = FlowStepRepo::record(&pool, run.id, Uuid::new_v4(), "A", None, chrono::Utc::now())
        .await
        .unwrap();
    assert!(last.next_uuid.is_none());
}

// ---------------------------------------------------------------------------
// Test: flow starts keep the source's addressed-contact count
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn flow_start_keeps_contact_count(pool: PgPool) {
    let org_id = seed_org(&pool).await;
    let flow = seed_flow(&pool, org_id).await;

    let start = FlowStartRepo::create(
        &pool,
        &CreateFlowStart {
            org_id,
            uuid: Uuid::new_v4(),
            flow_id: flow.id,
            status: "C".to_string(),
            restart_participants: true,
            contact_count: 3,
            extra: None,
            created_by: None,
            created_on: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(start.contact_count, 3);
}
