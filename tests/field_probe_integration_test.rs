use httpmock::prelude::*;
use odoo_field_probe::core::command::DEBUG_KEY;
use odoo_field_probe::{FieldTestCommand, OdooClient, Session};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const FIELD: &str = "x_studio_employee_arabic_name";

fn rpc_result(result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": 1, "result": result})
}

fn mock_login(server: &MockServer) {
    server.mock(|when, then| {
        when.method(POST)
            .path("/jsonrpc")
            .json_body_partial(r#"{"params":{"service":"common","method":"version"}}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(rpc_result(json!({"server_version": "17.0"})));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/jsonrpc")
            .json_body_partial(r#"{"params":{"service":"common","method":"authenticate"}}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(rpc_result(json!(2)));
    });
}

/// Matches `read` on `hr.employee` for id 42 with the given kwargs, serialized compactly.
fn mock_employee_read<'a>(server: &'a MockServer, kwargs: &str, reply: Value) -> httpmock::Mock<'a> {
    let needle = format!(r#""hr.employee","read",[[42]],{}]"#, kwargs);
    server.mock(move |when, then| {
        when.method(POST).path("/jsonrpc").body_contains(needle.as_str());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(reply);
    })
}

async fn connected_session(server: &MockServer) -> Session {
    let client = OdooClient::connect(
        &server.base_url(),
        "prod",
        "bot@example.com",
        "secret",
        Duration::from_secs(5),
    )
    .await
    .unwrap();
    Session::connected(Arc::new(client))
}

#[tokio::test]
async fn test_end_to_end_field_readable() {
    let server = MockServer::start();
    mock_login(&server);

    let basic_read = mock_employee_read(
        &server,
        r#"{"fields":["name","job_title","work_email","work_phone","department_id"]}"#,
        rpc_result(json!([{"id": 42, "name": "Layla Haddad", "job_title": "Engineer"}])),
    );
    let all_fields_read = mock_employee_read(
        &server,
        "{}",
        rpc_result(json!([{
            "id": 42,
            "name": "Layla Haddad",
            "display_name": "Layla Haddad",
            FIELD: "ليلى حداد",
            "work_email": "layla@example.com"
        }])),
    );
    let field_read = mock_employee_read(
        &server,
        &format!(r#"{{"fields":["{}"]}}"#, FIELD),
        rpc_result(json!([{"id": 42, FIELD: "ليلى حداد"}])),
    );

    let mut session = connected_session(&server).await;
    session.load_employee(42).await.unwrap();

    let reply = FieldTestCommand::default()
        .handle("Can you TEST ARABIC FIELD for me?", &mut session)
        .await
        .expect("trigger phrase should match");

    basic_read.assert();
    all_fields_read.assert();
    field_read.assert();

    assert!(reply.starts_with("## Arabic Field Test Results\n\n**Employee ID:** 42\n\n"));
    assert!(reply.contains("✅ **All Fields Test:** Found 5 readable fields"));
    assert!(reply.contains("- Arabic field present: ✅ YES"));
    assert!(reply.contains("🎉 **Good news!**"));
    assert!(reply.contains("- Value: `ليلى حداد`"));
    assert!(reply.contains("- Is Arabic script: ✅ YES"));

    let cached = session.debug_info().get(DEBUG_KEY).unwrap();
    assert_eq!(cached["tests"]["all_available_fields"]["count"], json!(5));
    assert_eq!(
        cached["tests"]["name_related_fields"],
        json!(["name", "display_name", FIELD])
    );
}

#[tokio::test]
async fn test_end_to_end_access_error_is_reported_inline() {
    let server = MockServer::start();
    mock_login(&server);

    mock_employee_read(
        &server,
        r#"{"fields":["name","job_title","work_email","work_phone","department_id"]}"#,
        rpc_result(json!([{"id": 42, "name": "Layla Haddad"}])),
    );
    mock_employee_read(
        &server,
        "{}",
        rpc_result(json!([{"id": 42, "name": "Layla Haddad", "work_email": false}])),
    );
    mock_employee_read(
        &server,
        &format!(r#"{{"fields":["{}"]}}"#, FIELD),
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {
                "code": 200,
                "message": "Odoo Server Error",
                "data": {
                    "name": "ValueError",
                    "message": "Invalid field 'x_studio_employee_arabic_name' on model 'hr.employee'"
                }
            }
        }),
    );

    let mut session = connected_session(&server).await;
    session.load_employee(42).await.unwrap();

    let reply = FieldTestCommand::default()
        .handle("debug arabic", &mut session)
        .await
        .unwrap();

    assert!(reply.contains("**Employee ID:** 42"));
    assert!(reply.contains("- Arabic field present: ❌ NO"));
    assert!(reply.contains("⚠️ **Issue found:**"));
    assert!(reply.contains("**Name-related fields found:**\n- name\n\n"));
    assert!(reply.contains(
        "❌ **Arabic Field Specific Test Failed:** Remote fault 200: ValueError: Invalid field 'x_studio_employee_arabic_name' on model 'hr.employee'"
    ));
}

#[tokio::test]
async fn test_unmatched_query_makes_no_calls() {
    let server = MockServer::start();
    mock_login(&server);
    let any_read = server.mock(|when, then| {
        when.method(POST).path("/jsonrpc").body_contains("execute_kw");
        then.status(200).json_body(rpc_result(json!([])));
    });

    let mut session = connected_session(&server).await;

    let reply = FieldTestCommand::default()
        .handle("what is my leave balance?", &mut session)
        .await;

    assert_eq!(reply, None);
    any_read.assert_hits(0);
}

#[tokio::test]
async fn test_unreachable_server_leaves_session_disconnected() {
    let result = OdooClient::connect(
        "http://127.0.0.1:1",
        "prod",
        "bot@example.com",
        "secret",
        Duration::from_secs(2),
    )
    .await;
    assert!(result.is_err());

    let mut session = Session::disconnected();
    let reply = FieldTestCommand::default()
        .handle("test arabic field", &mut session)
        .await;

    assert_eq!(reply.as_deref(), Some("❌ Not connected to Odoo"));
}
