use serde_json::{json, Value};
use std::time::Duration;

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use bankhub::BankClient;
    use wiremock::MockServer;

    /// Start a mock accounts API and a client pointed at it
    pub async fn mock_backend() -> (MockServer, BankClient) {
        let server = MockServer::start().await;
        let client = BankClient::new(server.uri(), Duration::from_secs(5))
            .expect("mock server URI should be a valid base URL");
        (server, client)
    }

    /// Account record the way the backend serializes it
    pub fn account_json(id: u64, solde: f64, date: &str, kind: &str) -> Value {
        json!({
            "id": id,
            "solde": solde,
            "dateCreation": date,
            "type": kind,
        })
    }
}
