use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::account::{Account, AccountDraft, AccountId};
use crate::config::AppConfig;
use crate::error::Error;

/// Path of the account collection on the API
pub const ACCOUNTS_PATH: &str = "/comptes";

/// List responses are usually an array, but some deployments send a bare record.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Client for the accounts REST API
#[derive(Debug, Clone)]
pub struct BankClient {
    http_client: Client,
    base_url: String,
}

impl BankClient {
    /// Create a client for `base_url` with the given request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("API base URL must not be empty".to_string()));
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /comptes
    pub async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        let builder = self.request(Method::GET, ACCOUNTS_PATH);
        let accounts: OneOrMany<Account> = self.send_json(builder).await?;
        let accounts: Vec<Account> = accounts.into();
        tracing::debug!(count = accounts.len(), "accounts fetched");
        Ok(accounts)
    }

    /// POST /comptes
    pub async fn create_account(&self, draft: &AccountDraft) -> Result<Account, Error> {
        let builder = self.request(Method::POST, ACCOUNTS_PATH).json(draft);
        let account: Account = self.send_json(builder).await?;
        tracing::info!(id = account.id, "account created");
        Ok(account)
    }

    /// PUT /comptes/{id}
    pub async fn update_account(
        &self,
        id: AccountId,
        draft: &AccountDraft,
    ) -> Result<Account, Error> {
        let endpoint = format!("{}/{}", ACCOUNTS_PATH, id);
        let builder = self.request(Method::PUT, &endpoint).json(draft);
        let account: Account = self.send_json(builder).await?;
        tracing::info!(id, "account updated");
        Ok(account)
    }

    /// DELETE /comptes/{id}; any response body is ignored
    pub async fn delete_account(&self, id: AccountId) -> Result<(), Error> {
        let endpoint = format!("{}/{}", ACCOUNTS_PATH, id);
        let builder = self.request(Method::DELETE, &endpoint);
        self.send(builder).await?;
        tracing::info!(id, "account deleted");
        Ok(())
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        self.http_client.request(method, url)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, Error> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request failed");
            Error::Http(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        } else {
            body
        };
        tracing::warn!(status = status.as_u16(), %message, "API returned an error");
        Err(Error::api(status, message))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, Error> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = BankClient::new("http://localhost:8082/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8082");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let err = BankClient::new("", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_one_or_many() {
        let many: OneOrMany<Account> =
            serde_json::from_str(r#"[{"id": 1, "solde": 1}, {"id": 2, "solde": 2}]"#).unwrap();
        assert_eq!(Vec::from(many).len(), 2);

        let one: OneOrMany<Account> = serde_json::from_str(r#"{"id": 7, "solde": "3"}"#).unwrap();
        let accounts = Vec::from(one);
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, 7);
    }
}
