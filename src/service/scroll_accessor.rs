use std::sync::Arc;
use std::time::Duration;
use log::{debug, error, info, warn};
use tokio::time::timeout;
use crate::client::tab_client::TabClient;
use crate::error::scroll_error::ScrollError;
use crate::model::tab::TabId;
use crate::service::scroll_strategy::{AgentMessageStrategy, InjectionStrategy, ScrollStrategy};

/// Reads and sets a tab's vertical scroll offset through an ordered list of strategies,
/// stopping at the first that succeeds. Every attempt is bounded by `attempt_timeout`.
pub struct ScrollAccessor {
    strategies: Vec<Box<dyn ScrollStrategy>>,
    attempt_timeout: Duration,
}

impl ScrollAccessor {
    pub fn new(strategies: Vec<Box<dyn ScrollStrategy>>, attempt_timeout: Duration) -> Self {
        ScrollAccessor { strategies, attempt_timeout }
    }

    /// Injection first, resident page agent second.
    pub fn with_tab_client(tab_client: Arc<dyn TabClient>, attempt_timeout: Duration) -> Self {
        Self::new(
            vec![
                Box::new(InjectionStrategy::new(tab_client.clone())),
                Box::new(AgentMessageStrategy::new(tab_client)),
            ],
            attempt_timeout,
        )
    }

    /// Fails with the primary strategy's error when no strategy can read the offset.
    pub async fn read_position(&self, tab_id: TabId) -> Result<f64, ScrollError> {
        let mut first_error = None;
        for strategy in &self.strategies {
            match self.bounded(strategy.read(tab_id)).await {
                Ok(position) => {
                    debug!("read scroll position [{}] from tab [{}] via [{}]", position, tab_id, strategy.name());
                    return Ok(position);
                }
                Err(e) => {
                    debug!("reading tab [{}] via [{}] failed: [{}]", tab_id, strategy.name(), e);
                    first_error.get_or_insert(e);
                }
            }
        }
        Err(first_error.unwrap_or_else(|| ScrollError::ScrollUnreachable("no scroll strategies configured".to_string())))
    }

    /// Position unknown reads as the top of the page.
    pub async fn read_position_or_default(&self, tab_id: TabId) -> f64 {
        match self.read_position(tab_id).await {
            Ok(position) => position,
            Err(e) => {
                warn!("scroll position of tab [{}] unknown (defaulting to 0): [{}]", tab_id, e);
                0.0
            }
        }
    }

    pub async fn write_position(&self, tab_id: TabId, position: f64) -> Result<(), ScrollError> {
        let mut failures = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            match self.bounded(strategy.write(tab_id, position)).await {
                Ok(_) => {
                    info!("scrolled tab [{}] to [{}] via [{}]", tab_id, position, strategy.name());
                    return Ok(());
                }
                Err(e) => {
                    warn!("scrolling tab [{}] via [{}] failed (trying next): [{}]", tab_id, strategy.name(), e);
                    failures.push(format!("{}: {}", strategy.name(), e));
                }
            }
        }
        error!("all scroll strategies failed for tab [{}]", tab_id);
        Err(ScrollError::ScrollUnreachable(failures.join("; ")))
    }

    async fn bounded<T>(&self, attempt: impl Future<Output = Result<T, ScrollError>>) -> Result<T, ScrollError> {
        match timeout(self.attempt_timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(ScrollError::Timeout(self.attempt_timeout.as_millis() as u64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tab_client::MockTabClient;
    use crate::error::TabError;
    use crate::model::command::Command;
    use crate::model::tab::InjectedScript;
    use async_trait::async_trait;
    use serde_json::json;

    struct StalledStrategy;

    #[async_trait]
    impl ScrollStrategy for StalledStrategy {
        fn name(&self) -> &'static str {
            "stalled"
        }

        async fn read(&self, _tab_id: TabId) -> Result<f64, ScrollError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(1.0)
        }

        async fn write(&self, _tab_id: TabId, _position: f64) -> Result<(), ScrollError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }
    }

    fn denied_injection(tab_client: &mut MockTabClient) {
        tab_client
            .expect_execute_script()
            .returning(|_, _| Err(TabError::Denied("chrome://extensions".to_string())));
    }

    #[tokio::test]
    async fn test_read_denied_everywhere_defaults_to_zero() {
        let mut tab_client = MockTabClient::new();
        denied_injection(&mut tab_client);
        tab_client
            .expect_send_message()
            .returning(|_, _| Err(TabError::Unreachable("no listener".to_string())));

        let accessor = ScrollAccessor::with_tab_client(Arc::new(tab_client), Duration::from_secs(3));
        assert_eq!(
            accessor.read_position(5).await,
            Err(ScrollError::InjectionDenied("chrome://extensions".to_string()))
        );
        assert_eq!(accessor.read_position_or_default(5).await, 0.0);
    }

    #[tokio::test]
    async fn test_read_falls_back_to_page_agent() {
        let mut tab_client = MockTabClient::new();
        denied_injection(&mut tab_client);
        tab_client
            .expect_send_message()
            .withf(|_, command| *command == Command::GetCurrentPosition)
            .returning(|_, _| Ok(json!({ "scrollPosition": 480 })));

        let accessor = ScrollAccessor::with_tab_client(Arc::new(tab_client), Duration::from_secs(3));
        assert_eq!(accessor.read_position_or_default(5).await, 480.0);
    }

    #[tokio::test]
    async fn test_write_prefers_injection() {
        let mut tab_client = MockTabClient::new();
        tab_client
            .expect_execute_script()
            .times(1)
            .withf(|_, script| *script == InjectedScript::ScrollTo { top: 500.0 })
            .returning(|_, _| Ok(json!("scrollTo")));
        tab_client.expect_send_message().never();

        let accessor = ScrollAccessor::with_tab_client(Arc::new(tab_client), Duration::from_secs(3));
        assert!(accessor.write_position(2, 500.0).await.is_ok());
    }

    #[tokio::test]
    async fn test_write_falls_back_to_page_agent() {
        let mut tab_client = MockTabClient::new();
        tab_client
            .expect_execute_script()
            .returning(|_, _| Err(TabError::Unreachable("frame detached".to_string())));
        tab_client
            .expect_send_message()
            .times(1)
            .returning(|_, _| Ok(json!({ "success": true })));

        let accessor = ScrollAccessor::with_tab_client(Arc::new(tab_client), Duration::from_secs(3));
        assert!(accessor.write_position(2, 500.0).await.is_ok());
    }

    #[tokio::test]
    async fn test_write_unreachable_when_every_strategy_fails() {
        let mut tab_client = MockTabClient::new();
        denied_injection(&mut tab_client);
        tab_client
            .expect_send_message()
            .returning(|_, _| Err(TabError::Unreachable("no listener".to_string())));

        let accessor = ScrollAccessor::with_tab_client(Arc::new(tab_client), Duration::from_secs(3));
        assert!(matches!(accessor.write_position(2, 500.0).await, Err(ScrollError::ScrollUnreachable(_))));
    }

    #[tokio::test]
    async fn test_write_unreachable_when_agent_does_not_confirm() {
        let mut tab_client = MockTabClient::new();
        denied_injection(&mut tab_client);
        tab_client
            .expect_send_message()
            .returning(|_, _| Ok(serde_json::Value::Null));

        let accessor = ScrollAccessor::with_tab_client(Arc::new(tab_client), Duration::from_secs(3));
        assert!(matches!(accessor.write_position(2, 500.0).await, Err(ScrollError::ScrollUnreachable(_))));
    }

    #[tokio::test]
    async fn test_read_falls_back_when_injection_returns_nothing() {
        let mut tab_client = MockTabClient::new();
        tab_client
            .expect_execute_script()
            .returning(|_, _| Ok(serde_json::Value::Null));
        tab_client
            .expect_send_message()
            .times(1)
            .returning(|_, _| Ok(json!({ "scrollPosition": 220 })));

        let accessor = ScrollAccessor::with_tab_client(Arc::new(tab_client), Duration::from_secs(3));
        assert_eq!(accessor.read_position(4).await, Ok(220.0));
    }

    #[tokio::test]
    async fn test_stalled_strategy_times_out() {
        let accessor = ScrollAccessor::new(vec![Box::new(StalledStrategy)], Duration::from_millis(50));

        assert_eq!(accessor.read_position(1).await, Err(ScrollError::Timeout(50)));
        assert!(matches!(accessor.write_position(1, 10.0).await, Err(ScrollError::ScrollUnreachable(_))));
    }
}
