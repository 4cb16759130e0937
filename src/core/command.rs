use crate::core::probe::FieldProbe;
use crate::core::report::render_report;
use crate::core::session::Session;
use crate::domain::model::{ProbeOutcome, ProbeTarget};

/// Debug-cache key the latest probe result is stored under.
pub const DEBUG_KEY: &str = "arabic_field_test";

pub const NOT_CONNECTED: &str = "❌ Not connected to Odoo";
pub const NO_EMPLOYEE_DATA: &str = "❌ No employee data available";
pub const NO_EMPLOYEE_ID: &str = "❌ No employee ID found";

/// Chat command that runs the field probe when the query mentions it.
#[derive(Debug, Clone, Default)]
pub struct FieldTestCommand {
    target: ProbeTarget,
}

impl FieldTestCommand {
    pub fn new(target: ProbeTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &ProbeTarget {
        &self.target
    }

    /// "test arabic field" / "debug arabic" for the default label, case-insensitive.
    pub fn triggers(&self) -> [String; 2] {
        let label = self.target.label.to_lowercase();
        [format!("test {} field", label), format!("debug {}", label)]
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.triggers().iter().any(|t| query.contains(t.as_str()))
    }

    /// Message for a query this command will not answer; `None` when it matches.
    pub fn usage_hint(&self, query: &str) -> Option<String> {
        if self.matches(query) {
            return None;
        }
        let [first, second] = self.triggers();
        Some(format!(
            "No diagnostic matches '{}'. Try '{}' or '{}'.",
            query, first, second
        ))
    }

    /// Checks the session can be probed, then runs both reads.
    pub async fn run_probe(&self, session: &Session) -> ProbeOutcome {
        let Some(rpc) = session.rpc() else {
            return ProbeOutcome::Unavailable(NOT_CONNECTED.to_string());
        };
        let Some(employee) = session.employee().filter(|e| !e.is_empty()) else {
            return ProbeOutcome::Unavailable(NO_EMPLOYEE_DATA.to_string());
        };
        let Some(employee_id) = employee.id() else {
            return ProbeOutcome::Unavailable(NO_EMPLOYEE_ID.to_string());
        };

        let result = FieldProbe::new(rpc.as_ref(), &self.target)
            .run(employee_id)
            .await;
        ProbeOutcome::Completed(Box::new(result))
    }

    /// `None` when the query is not for this command.
    pub async fn handle(&self, query: &str, session: &mut Session) -> Option<String> {
        if !self.matches(query) {
            return None;
        }

        match self.run_probe(session).await {
            ProbeOutcome::Unavailable(message) => {
                tracing::info!("Field test skipped: {}", message);
                Some(message)
            }
            ProbeOutcome::Completed(result) => {
                let report = render_report(&result, &self.target);
                if let Err(e) = session.debug_info_mut().insert(DEBUG_KEY, &result) {
                    tracing::warn!("Could not store field test in debug info: {}", e);
                }
                Some(report)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::probe::tests::MockRpc;
    use crate::domain::model::Record;
    use serde_json::{json, Map, Value};
    use std::sync::Arc;

    fn employee(data: Value) -> Option<Record> {
        let map: Map<String, Value> = serde_json::from_value(data).unwrap();
        Some(Record::from(map))
    }

    #[tokio::test]
    async fn test_unrelated_queries_are_ignored() {
        let command = FieldTestCommand::default();
        let mut session = Session::disconnected();

        for query in ["hello", "show my leave balance", "arabic", "test field", ""] {
            assert_eq!(command.handle(query, &mut session).await, None, "{}", query);
        }
    }

    #[test]
    fn test_triggers_are_case_insensitive() {
        let command = FieldTestCommand::default();
        assert!(command.matches("Please TEST ARABIC FIELD now"));
        assert!(command.matches("debug Arabic"));
        assert!(!command.matches("debug english"));
    }

    #[test]
    fn test_usage_hint_only_for_unmatched_queries() {
        let command = FieldTestCommand::default();
        assert_eq!(command.usage_hint("Debug Arabic please"), None);
        assert_eq!(
            command.usage_hint("leave balance").as_deref(),
            Some("No diagnostic matches 'leave balance'. Try 'test arabic field' or 'debug arabic'.")
        );

        let command = FieldTestCommand::new(ProbeTarget {
            label: "Passport".to_string(),
            ..ProbeTarget::default()
        });
        assert_eq!(command.target().label, "Passport");
        assert_eq!(command.usage_hint("test passport field"), None);
        assert!(command.usage_hint("debug arabic").is_some());
    }

    #[tokio::test]
    async fn test_preconditions_are_reported_in_order() {
        let command = FieldTestCommand::default();

        let mut session = Session::disconnected();
        assert_eq!(
            command.handle("test arabic field", &mut session).await.as_deref(),
            Some(NOT_CONNECTED)
        );

        let mut session = Session::connected(Arc::new(MockRpc::new(vec![])));
        assert_eq!(
            command.handle("test arabic field", &mut session).await.as_deref(),
            Some(NO_EMPLOYEE_DATA)
        );

        session.set_employee(Some(Record::default()));
        assert_eq!(
            command.handle("test arabic field", &mut session).await.as_deref(),
            Some(NO_EMPLOYEE_DATA)
        );

        session.set_employee(employee(json!({"id": false, "name": "Layla"})));
        assert_eq!(
            command.handle("debug arabic", &mut session).await.as_deref(),
            Some(NO_EMPLOYEE_ID)
        );
        assert!(session.debug_info().get(DEBUG_KEY).is_none());
    }

    #[tokio::test]
    async fn test_successful_probe_reports_and_caches() {
        let rpc = Arc::new(MockRpc::new(vec![
            Ok(json!([{"id": 42, "name": "Layla", "x_studio_employee_arabic_name": "ليلى"}])),
            Ok(json!([{"id": 42, "x_studio_employee_arabic_name": "ليلى"}])),
        ]));
        let mut session = Session::connected(rpc);
        session.set_employee(employee(json!({"id": 42, "name": "Layla"})));

        let reply = FieldTestCommand::default()
            .handle("debug arabic", &mut session)
            .await
            .unwrap();

        assert!(reply.contains("**Employee ID:** 42"));
        assert!(reply.contains("- Arabic field present: ✅ YES"));
        assert!(reply.contains("- Is Arabic script: ✅ YES"));

        let cached = session.debug_info().get(DEBUG_KEY).unwrap();
        assert_eq!(cached["employee_id"], json!(42));
        assert_eq!(
            cached["tests"]["all_available_fields"]["status"],
            json!("passed")
        );
        assert_eq!(
            cached["tests"]["all_available_fields"]["has_target_field"],
            json!(true)
        );
    }

    #[tokio::test]
    async fn test_failed_probe_surfaces_error_text() {
        let rpc = Arc::new(MockRpc::new(vec![
            MockRpc::fault("odoo.exceptions.AccessError: denied"),
            MockRpc::fault("odoo.exceptions.AccessError: field denied"),
        ]));
        let mut session = Session::connected(rpc);
        session.set_employee(employee(json!({"id": 9})));

        let reply = FieldTestCommand::default()
            .handle("test arabic field", &mut session)
            .await
            .unwrap();

        assert!(reply.contains("**Employee ID:** 9"));
        assert!(reply.contains(
            "❌ **All Fields Test Failed:** Remote fault 200: odoo.exceptions.AccessError: denied"
        ));
        assert!(reply.contains(
            "❌ **Arabic Field Specific Test Failed:** Remote fault 200: odoo.exceptions.AccessError: field denied"
        ));
        assert_eq!(
            session.debug_info().get(DEBUG_KEY).unwrap()["tests"]["field_specific"]["status"],
            json!("failed")
        );
    }

    #[tokio::test]
    async fn test_rerun_overwrites_cached_result() {
        let rpc = Arc::new(MockRpc::new(vec![
            Ok(json!([{"id": 1}])),
            Ok(json!([{"id": 1}])),
            Ok(json!([{"id": 2}])),
            Ok(json!([{"id": 2}])),
        ]));
        let mut session = Session::connected(rpc);
        let command = FieldTestCommand::default();

        session.set_employee(employee(json!({"id": 1})));
        command.handle("debug arabic", &mut session).await.unwrap();
        session.set_employee(employee(json!({"id": 2})));
        command.handle("debug arabic", &mut session).await.unwrap();

        assert_eq!(
            session.debug_info().get(DEBUG_KEY).unwrap()["employee_id"],
            json!(2)
        );
    }
}
