mod utils;

use bankhub::{AccountDraft, AccountType, Error};
use chrono::NaiveDate;
use serde_json::json;
use tokio_test::assert_ok;
use utils::test_utils::{account_json, mock_backend};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_list_accounts() {
    let (server, client) = mock_backend().await;
    Mock::given(method("GET"))
        .and(path("/comptes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            account_json(1, 1500.0, "2024-01-05", "COURANT"),
            {"id": 2, "solde": "250.75", "dateCreation": "2023-12-31T10:00:00", "type": null},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let accounts = assert_ok!(client.list_accounts().await);
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].account_type, Some(AccountType::Courant));
    assert_eq!(accounts[1].solde, 250.75);
    assert_eq!(accounts[1].date_creation, NaiveDate::from_ymd_opt(2023, 12, 31));
    assert_eq!(accounts[1].account_type, None);
}

#[tokio::test]
async fn test_list_accepts_single_object() {
    let (server, client) = mock_backend().await;
    Mock::given(method("GET"))
        .and(path("/comptes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(account_json(9, 10.0, "2024-02-29", "EPARGNE")),
        )
        .mount(&server)
        .await;

    let accounts = assert_ok!(client.list_accounts().await);
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, 9);
}

#[tokio::test]
async fn test_create_account_posts_draft() {
    let (server, client) = mock_backend().await;
    Mock::given(method("POST"))
        .and(path("/comptes"))
        .and(body_json(json!({
            "solde": 300.5,
            "dateCreation": "2024-03-01",
            "type": "EPARGNE",
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(account_json(42, 300.5, "2024-03-01", "EPARGNE")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = AccountDraft {
        solde: 300.5,
        date_creation: NaiveDate::from_ymd_opt(2024, 3, 1),
        account_type: Some(AccountType::Epargne),
    };
    let created = assert_ok!(client.create_account(&draft).await);
    assert_eq!(created.id, 42);
    assert_eq!(created.to_draft(), draft);
}

#[tokio::test]
async fn test_update_account_puts_to_id() {
    let (server, client) = mock_backend().await;
    Mock::given(method("PUT"))
        .and(path("/comptes/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(account_json(7, 80.0, "2024-01-01", "COURANT")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = AccountDraft {
        solde: 80.0,
        date_creation: NaiveDate::from_ymd_opt(2024, 1, 1),
        account_type: Some(AccountType::Courant),
    };
    let updated = assert_ok!(client.update_account(7, &draft).await);
    assert_eq!(updated.solde, 80.0);
}

#[tokio::test]
async fn test_delete_account_ignores_body() {
    let (server, client) = mock_backend().await;
    Mock::given(method("DELETE"))
        .and(path("/comptes/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(client.delete_account(7).await);
}

#[tokio::test]
async fn test_error_status_becomes_api_error() {
    let (server, client) = mock_backend().await;
    Mock::given(method("DELETE"))
        .and(path("/comptes/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Compte introuvable"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/comptes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    match client.delete_account(404).await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Compte introuvable");
        }
        other => panic!("Expected API error, got {:?}", other),
    }

    match client.list_accounts().await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let (server, client) = mock_backend().await;
    Mock::given(method("GET"))
        .and(path("/comptes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.list_accounts().await.unwrap_err();
    assert!(matches!(err, Error::Serialization(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let client = bankhub::BankClient::new("http://127.0.0.1:9", std::time::Duration::from_secs(2))
        .unwrap();
    let err = client.list_accounts().await.unwrap_err();
    assert!(err.is_network(), "got {:?}", err);
}
