use async_trait::async_trait;
use serde_json::Value;
use crate::error::TabError;
use crate::model::command::Command;
use crate::model::tab::{InjectedScript, TabId, TabInfo};

/// Browser tab capabilities: active tab lookup, on-demand injection into a page, and
/// messaging the resident page agent. Messages with no reply resolve to `Value::Null`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TabClient: Send + Sync {
    async fn active_tab(&self) -> Result<TabInfo, TabError>;

    async fn execute_script(&self, tab_id: TabId, script: &InjectedScript) -> Result<Value, TabError>;

    async fn send_message(&self, tab_id: TabId, command: &Command) -> Result<Value, TabError>;
}
