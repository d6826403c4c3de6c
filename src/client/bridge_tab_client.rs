use std::time::Duration;
use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::client::tab_client::TabClient;
use crate::error::TabError;
use crate::model::command::Command;
use crate::model::tab::{InjectedScript, TabId, TabInfo};

#[derive(Serialize)]
struct ExecuteRequest<'a> {
    name: &'a str,
    func: &'a str,
    args: Vec<Value>,
}

#[derive(Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    result: Value,
}

/// Reaches the extension's tab APIs through an HTTP relay running inside the browser.
///
/// Relay routes:
/// - `GET {bridge}/tabs/active` returns a [`TabInfo`], `404` when no tab is focused
/// - `POST {bridge}/tabs/{id}/execute` runs an injected function, `403` when the page is not scriptable
/// - `POST {bridge}/tabs/{id}/message` forwards a [`Command`] to the page agent, `204` for no reply
#[derive(Clone)]
pub struct BridgeTabClient {
    http_client: Client,
    bridge_url: Option<String>,
}

impl BridgeTabClient {
    pub fn new(bridge_url: &str, request_timeout: Duration) -> Result<Self, TabError> {
        let bridge_url = if bridge_url.is_empty() {
            warn!("no tab bridge configured: scroll reads will default to 0 and jumps will fail");
            None
        } else {
            Some(bridge_url.trim_end_matches('/').to_string())
        };
        let http_client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| {
                error!("failed to build tab bridge http client: [{}]", e);
                TabError::Unreachable(format!("tab bridge client unavailable: {}", e))
            })?;
        Ok(Self { http_client, bridge_url })
    }

    fn url(&self, path: &str) -> Result<String, TabError> {
        match &self.bridge_url {
            Some(base) => Ok(format!("{}{}", base, path)),
            None => Err(TabError::Unreachable("no tab bridge configured".to_string())),
        }
    }

    async fn read_json(response: Response) -> Result<Value, TabError> {
        match response.status() {
            StatusCode::NO_CONTENT => Ok(Value::Null),
            StatusCode::FORBIDDEN => Err(TabError::Denied(response.text().await.unwrap_or_default())),
            status if status.is_success() => Ok(response.json::<Value>().await?),
            status => Err(TabError::Unreachable(format!("bridge replied [{}]: {}", status, response.text().await.unwrap_or_default()))),
        }
    }
}

#[async_trait]
impl TabClient for BridgeTabClient {
    async fn active_tab(&self) -> Result<TabInfo, TabError> {
        let response = self.http_client.get(self.url("/tabs/active")?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(TabError::NoActiveTab);
        }
        let tab: TabInfo = serde_json::from_value(Self::read_json(response).await?)?;
        debug!("active tab is [{}] at [{:?}]", tab.id, tab.url);
        Ok(tab)
    }

    async fn execute_script(&self, tab_id: TabId, script: &InjectedScript) -> Result<Value, TabError> {
        let request = ExecuteRequest { name: script.name(), func: script.source(), args: script.args() };
        debug!("injecting [{}] into tab [{}]", script.name(), tab_id);
        let response = self.http_client
            .post(self.url(&format!("/tabs/{}/execute", tab_id))?)
            .json(&request)
            .send()
            .await?;
        let execute_response: ExecuteResponse = serde_json::from_value(Self::read_json(response).await?)?;
        Ok(execute_response.result)
    }

    async fn send_message(&self, tab_id: TabId, command: &Command) -> Result<Value, TabError> {
        debug!("messaging page agent in tab [{}] with [{}]", tab_id, command.kind());
        let response = self.http_client
            .post(self.url(&format!("/tabs/{}/message", tab_id))?)
            .json(command)
            .send()
            .await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_bridge_is_unreachable() {
        let client = BridgeTabClient::new("", Duration::from_secs(1)).unwrap();

        assert!(matches!(client.active_tab().await, Err(TabError::Unreachable(_))));
        assert!(matches!(
            client.execute_script(1, &InjectedScript::ReadScrollOffset).await,
            Err(TabError::Unreachable(_))
        ));
        assert!(matches!(
            client.send_message(1, &Command::GetCurrentPosition).await,
            Err(TabError::Unreachable(_))
        ));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = BridgeTabClient::new("http://127.0.0.1:9000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("/tabs/active").unwrap(), "http://127.0.0.1:9000/tabs/active");
    }
}
