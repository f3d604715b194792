//! End-to-end tests for the assignment flow over HTTP.
//!
//! Each test builds the full router against a seeded in-memory store and
//! drives it with `tower::ServiceExt::oneshot`, so routing, identity
//! extraction, eligibility checks, and conflict detection are all exercised
//! through the same path a browser client takes.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use leadpool_api::{
    create_api_router, ApiConfig, OPERATOR_ID_HEADER, OPERATOR_ROLE_HEADER,
    OPERATOR_SUB_ROLE_HEADER,
};
use leadpool_core::{Channel, Lead, LeadSource, SubRole};
use leadpool_storage::LeadStore;
use leadpool_test_utils::{pooled_lead, sales_agent, seeded_store};

// ============================================================================
// HELPERS
// ============================================================================

struct Identity {
    id: Uuid,
    role: &'static str,
    sub_role: Option<&'static str>,
}

impl Identity {
    fn head_offline() -> Self {
        Self {
            id: Uuid::now_v7(),
            role: "head",
            sub_role: Some("HEAD_OFFLINE"),
        }
    }

    fn head_online() -> Self {
        Self {
            id: Uuid::now_v7(),
            role: "head",
            sub_role: Some("HEAD_ONLINE"),
        }
    }

    fn manager() -> Self {
        Self {
            id: Uuid::now_v7(),
            role: "manager",
            sub_role: None,
        }
    }
}

async fn app_with(leads: &[Lead], agents: &[leadpool_core::Agent]) -> Router {
    let store: Arc<dyn LeadStore> = Arc::new(seeded_store(leads, agents).await);
    create_api_router(store, &ApiConfig::default())
}

fn request(method: Method, uri: &str, identity: Option<&Identity>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(identity) = identity {
        builder = builder
            .header(OPERATOR_ID_HEADER, identity.id.to_string())
            .header(OPERATOR_ROLE_HEADER, identity.role);
        if let Some(sub_role) = identity.sub_role {
            builder = builder.header(OPERATOR_SUB_ROLE_HEADER, sub_role);
        }
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

fn assign_body(lead_ids: &[Uuid], agent_id: Uuid, force: bool) -> serde_json::Value {
    serde_json::json!({
        "lead_ids": lead_ids,
        "agent_id": agent_id,
        "force": force,
    })
}

// ============================================================================
// CONTENTION
// ============================================================================

#[tokio::test]
async fn test_second_operator_gets_conflict_with_holder_identity() {
    let lead_a = pooled_lead("Shared Lead", LeadSource::FreshInbound, Channel::Offline);
    let lead_b = pooled_lead("Only Mine", LeadSource::FreshInbound, Channel::Offline);
    let agent_one = sales_agent("First Winner", SubRole::SalesOffline);
    let agent_two = sales_agent("Second Runner", SubRole::SalesOffline);
    let app = app_with(
        &[lead_a.clone(), lead_b.clone()],
        &[agent_one.clone(), agent_two.clone()],
    )
    .await;

    let op_one = Identity::manager();
    let op_two = Identity::manager();

    // Operator one wins the race.
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/assignments",
            Some(&op_one),
            Some(assign_body(&[lead_a.lead_id], agent_one.agent_id, false)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], 1);

    // Operator two acted on a stale pool view. The whole batch is rejected,
    // including the lead nobody else touched.
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/assignments",
            Some(&op_two),
            Some(assign_body(
                &[lead_a.lead_id, lead_b.lead_id],
                agent_two.agent_id,
                false,
            )),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "conflict");
    let conflicts = body["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["lead_id"], lead_a.lead_id.to_string());
    assert_eq!(conflicts[0]["lead_name"], "Shared Lead");
    assert_eq!(conflicts[0]["allocated_to_name"], "First Winner");
}

#[tokio::test]
async fn test_force_override_after_conflict() {
    let lead = pooled_lead("Contested", LeadSource::FreshInbound, Channel::Offline);
    let agent_one = sales_agent("Holder", SubRole::SalesOffline);
    let agent_two = sales_agent("Challenger", SubRole::SalesOffline);
    let app = app_with(&[lead.clone()], &[agent_one.clone(), agent_two.clone()]).await;

    let op = Identity::manager();

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/assignments",
            Some(&op),
            Some(assign_body(&[lead.lead_id], agent_one.agent_id, false)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Non-force retry surfaces the conflict.
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/assignments",
            Some(&op),
            Some(assign_body(&[lead.lead_id], agent_two.agent_id, false)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Force applies over the current holder.
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/assignments",
            Some(&op),
            Some(assign_body(&[lead.lead_id], agent_two.agent_id, true)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

// ============================================================================
// ELIGIBILITY
// ============================================================================

#[tokio::test]
async fn test_head_offline_sees_only_offline_sales_agents() {
    let offline_agent = sales_agent("Off Agent", SubRole::SalesOffline);
    let online_agent = sales_agent("On Agent", SubRole::SalesOnline);
    let app = app_with(&[], &[offline_agent.clone(), online_agent]).await;

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/api/v1/agents/eligible",
            Some(&Identity::head_offline()),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["agent_id"], offline_agent.agent_id.to_string());
}

#[tokio::test]
async fn test_assigning_outside_eligible_set_is_forbidden() {
    let lead = pooled_lead("Lead", LeadSource::FreshInbound, Channel::Online);
    let online_agent = sales_agent("On Agent", SubRole::SalesOnline);
    let app = app_with(&[lead.clone()], &[online_agent.clone()]).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/assignments",
            Some(&Identity::head_offline()),
            Some(assign_body(&[lead.lead_id], online_agent.agent_id, false)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_transferred_pool_is_channel_scoped() {
    let online = pooled_lead("Online Transfer", LeadSource::Transferred, Channel::Online);
    let offline = pooled_lead("Offline Transfer", LeadSource::Transferred, Channel::Offline);
    let app = app_with(&[online.clone(), offline.clone()], &[]).await;

    // HEAD_OFFLINE sees offline transfers only.
    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/api/v1/pool/transferred",
            Some(&Identity::head_offline()),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["lead_id"], offline.lead_id.to_string());

    // HEAD_ONLINE the mirror image.
    let (_, body) = send(
        &app,
        request(
            Method::GET,
            "/api/v1/pool/transferred",
            Some(&Identity::head_online()),
            None,
        ),
    )
    .await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["lead_id"], online.lead_id.to_string());

    // A manager sees both channels.
    let (_, body) = send(
        &app,
        request(
            Method::GET,
            "/api/v1/pool/transferred",
            Some(&Identity::manager()),
            None,
        ),
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

// ============================================================================
// POOL QUERIES
// ============================================================================

#[tokio::test]
async fn test_fresh_pool_search_and_assignment_visibility() {
    let acme = pooled_lead("Acme Corp", LeadSource::FreshInbound, Channel::Online);
    let globex = pooled_lead("Globex", LeadSource::FreshInbound, Channel::Online);
    let agent = sales_agent("Agent", SubRole::SalesOnline);
    let app = app_with(&[acme.clone(), globex.clone()], &[agent.clone()]).await;
    let op = Identity::manager();

    // Case-insensitive substring search.
    let (status, body) = send(
        &app,
        request(Method::GET, "/api/v1/pool/fresh?search=acme", Some(&op), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["lead_id"], acme.lead_id.to_string());

    // An assigned lead drops out of the pool view.
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/assignments",
            Some(&op),
            Some(assign_body(&[acme.lead_id], agent.agent_id, false)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        request(Method::GET, "/api/v1/pool/fresh", Some(&op), None),
    )
    .await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["lead_id"], globex.lead_id.to_string());
}

#[tokio::test]
async fn test_page_size_clamped_to_configured_maximum() {
    let leads: Vec<Lead> = (0..5)
        .map(|i| pooled_lead(&format!("Lead {i}"), LeadSource::FreshInbound, Channel::Online))
        .collect();
    let app = app_with(&leads, &[]).await;

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/api/v1/pool/fresh?page_size=99999",
            Some(&Identity::manager()),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // Default config caps pages at 100.
    assert_eq!(body["pagination"]["page_size"], 100);
    assert_eq!(body["pagination"]["total"], 5);
}

// ============================================================================
// IDENTITY
// ============================================================================

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let app = app_with(&[], &[]).await;

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/v1/pool/fresh", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_health_needs_no_identity() {
    let app = app_with(&[], &[]).await;

    let (status, body) = send(&app, request(Method::GET, "/health/ready", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"]["status"], "healthy");

    let (status, body) = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].is_u64());
}

// ============================================================================
// VALIDATION
// ============================================================================

#[tokio::test]
async fn test_empty_batch_rejected() {
    let agent = sales_agent("Agent", SubRole::SalesOnline);
    let app = app_with(&[], &[agent.clone()]).await;

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/assignments",
            Some(&Identity::manager()),
            Some(assign_body(&[], agent.agent_id, false)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_agent_is_not_found() {
    let lead = pooled_lead("Lead", LeadSource::FreshInbound, Channel::Online);
    let app = app_with(&[lead.clone()], &[]).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/assignments",
            Some(&Identity::manager()),
            Some(assign_body(&[lead.lead_id], Uuid::now_v7(), false)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "AGENT_NOT_FOUND");
}
