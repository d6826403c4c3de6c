use std::sync::Arc;
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use crate::client::tab_client::TabClient;
use crate::error::scroll_error::ScrollError;
use crate::model::command::Command;
use crate::model::tab::{InjectedScript, ScrollReadings, TabId};

/// One way of reaching a tab's scroll offset. The accessor tries strategies in order.
#[async_trait]
pub trait ScrollStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn read(&self, tab_id: TabId) -> Result<f64, ScrollError>;

    async fn write(&self, tab_id: TabId, position: f64) -> Result<(), ScrollError>;
}

/// Runs a function in the page on demand. Needs no resident script, but fails on pages the
/// extension may not script.
pub struct InjectionStrategy {
    tab_client: Arc<dyn TabClient>,
}

impl InjectionStrategy {
    pub fn new(tab_client: Arc<dyn TabClient>) -> Self {
        Self { tab_client }
    }
}

#[async_trait]
impl ScrollStrategy for InjectionStrategy {
    fn name(&self) -> &'static str {
        "injection"
    }

    async fn read(&self, tab_id: TabId) -> Result<f64, ScrollError> {
        let result = self.tab_client
            .execute_script(tab_id, &InjectedScript::ReadScrollOffset)
            .await
            .map_err(ScrollError::from_injection)?;
        let readings = match result {
            Value::Number(number) => ScrollReadings { page_y_offset: number.as_f64(), ..Default::default() },
            Value::Null => return Err(ScrollError::ScrollInjectionFailed("injected read returned no result".to_string())),
            other => serde_json::from_value::<ScrollReadings>(other)
                .map_err(|e| ScrollError::ScrollInjectionFailed(e.to_string()))?,
        };
        Ok(readings.offset())
    }

    async fn write(&self, tab_id: TabId, position: f64) -> Result<(), ScrollError> {
        let method = self.tab_client
            .execute_script(tab_id, &InjectedScript::ScrollTo { top: position })
            .await
            .map_err(ScrollError::from_injection)?;
        debug!("tab [{}] scrolled to [{}] using [{}]", tab_id, position, method);
        Ok(())
    }
}

/// Messages the resident page agent. Only works once the agent has attached its listener.
pub struct AgentMessageStrategy {
    tab_client: Arc<dyn TabClient>,
}

impl AgentMessageStrategy {
    pub fn new(tab_client: Arc<dyn TabClient>) -> Self {
        Self { tab_client }
    }
}

#[async_trait]
impl ScrollStrategy for AgentMessageStrategy {
    fn name(&self) -> &'static str {
        "page agent"
    }

    async fn read(&self, tab_id: TabId) -> Result<f64, ScrollError> {
        let reply = self.tab_client
            .send_message(tab_id, &Command::GetCurrentPosition)
            .await
            .map_err(ScrollError::from_agent)?;
        match reply.get("scrollPosition").and_then(Value::as_f64) {
            Some(position) if position.is_finite() => Ok(position.max(0.0)),
            _ => Err(ScrollError::AgentUnavailable(format!("unexpected reply [{}]", reply))),
        }
    }

    async fn write(&self, tab_id: TabId, position: f64) -> Result<(), ScrollError> {
        let reply = self.tab_client
            .send_message(tab_id, &Command::ScrollToPosition { scroll_position: position })
            .await
            .map_err(ScrollError::from_agent)?;
        match reply.get("success").and_then(Value::as_bool) {
            Some(true) => Ok(()),
            Some(false) => Err(ScrollError::AgentUnavailable(format!("agent refused scroll [{}]", reply))),
            None => Err(ScrollError::AgentUnavailable(format!("agent did not confirm scroll [{}]", reply))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tab_client::MockTabClient;
    use crate::error::TabError;
    use serde_json::json;

    #[tokio::test]
    async fn test_injection_read_uses_largest_reading() {
        let mut tab_client = MockTabClient::new();
        tab_client
            .expect_execute_script()
            .withf(|tab_id, script| *tab_id == 3 && *script == InjectedScript::ReadScrollOffset)
            .returning(|_, _| Ok(json!({ "pageYOffset": 0, "documentScrollTop": 1250.5, "bodyScrollTop": 0 })));

        let strategy = InjectionStrategy::new(Arc::new(tab_client));
        assert_eq!(strategy.read(3).await.unwrap(), 1250.5);
    }

    #[tokio::test]
    async fn test_injection_read_accepts_plain_number() {
        let mut tab_client = MockTabClient::new();
        tab_client.expect_execute_script().returning(|_, _| Ok(json!(310)));

        let strategy = InjectionStrategy::new(Arc::new(tab_client));
        assert_eq!(strategy.read(1).await.unwrap(), 310.0);
    }

    #[tokio::test]
    async fn test_injection_denied_is_reported() {
        let mut tab_client = MockTabClient::new();
        tab_client
            .expect_execute_script()
            .returning(|_, _| Err(TabError::Denied("restricted page".to_string())));

        let strategy = InjectionStrategy::new(Arc::new(tab_client));
        assert_eq!(strategy.read(1).await, Err(ScrollError::InjectionDenied("restricted page".to_string())));
    }

    #[tokio::test]
    async fn test_agent_write_reports_refusal() {
        let mut tab_client = MockTabClient::new();
        tab_client
            .expect_send_message()
            .withf(|_, command| *command == Command::ScrollToPosition { scroll_position: 90.0 })
            .returning(|_, _| Ok(json!({ "success": false })));

        let strategy = AgentMessageStrategy::new(Arc::new(tab_client));
        assert!(matches!(strategy.write(1, 90.0).await, Err(ScrollError::AgentUnavailable(_))));
    }

    #[tokio::test]
    async fn test_injection_read_without_result_fails() {
        let mut tab_client = MockTabClient::new();
        tab_client.expect_execute_script().returning(|_, _| Ok(Value::Null));

        let strategy = InjectionStrategy::new(Arc::new(tab_client));
        assert!(matches!(strategy.read(1).await, Err(ScrollError::ScrollInjectionFailed(_))));
    }

    #[tokio::test]
    async fn test_agent_write_requires_confirmation() {
        let mut tab_client = MockTabClient::new();
        tab_client
            .expect_send_message()
            .times(2)
            .returning(|_, command| match command {
                Command::ScrollToPosition { scroll_position } if *scroll_position == 1.0 => Ok(Value::Null),
                _ => Ok(json!({ "status": "ok" })),
            });

        let strategy = AgentMessageStrategy::new(Arc::new(tab_client));
        assert!(matches!(strategy.write(1, 1.0).await, Err(ScrollError::AgentUnavailable(_))));
        assert!(matches!(strategy.write(1, 2.0).await, Err(ScrollError::AgentUnavailable(_))));
    }

    #[tokio::test]
    async fn test_agent_write_accepts_success() {
        let mut tab_client = MockTabClient::new();
        tab_client.expect_send_message().returning(|_, _| Ok(json!({ "success": true })));

        let strategy = AgentMessageStrategy::new(Arc::new(tab_client));
        assert_eq!(strategy.write(1, 40.0).await, Ok(()));
    }

    #[tokio::test]
    async fn test_agent_read_parses_position() {
        let mut tab_client = MockTabClient::new();
        tab_client
            .expect_send_message()
            .returning(|_, _| Ok(json!({ "scrollPosition": 77.25 })));

        let strategy = AgentMessageStrategy::new(Arc::new(tab_client));
        assert_eq!(strategy.read(1).await.unwrap(), 77.25);
    }
}
