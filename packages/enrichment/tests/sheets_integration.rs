//! Google Sheets loading against a mocked token endpoint and Sheets API.

use std::sync::Arc;

use enrichment::{ServiceAccountKey, SheetsClient, SourceError, SourceLoader, TableSource};
use mockito::{Matcher, Server, ServerGuard};

const TEST_KEY_PEM: &str = include_str!("fixtures/test_service_account_key.pem");
const SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/sheet123/edit#gid=0";

fn client(server: &ServerGuard) -> SheetsClient {
    let key_json = serde_json::json!({
        "type": "service_account",
        "client_email": "enricher@test-project.iam.gserviceaccount.com",
        "private_key": TEST_KEY_PEM,
    })
    .to_string();

    let key = ServiceAccountKey::from_json(&key_json)
        .unwrap()
        .with_token_uri(format!("{}/token", server.url()));

    SheetsClient::new(key).with_api_base(server.url())
}

async fn mock_token(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/token")
        .match_body(Matcher::UrlEncoded(
            "grant_type".into(),
            "urn:ietf:params:oauth:grant-type:jwt-bearer".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"ya29.test","expires_in":3600,"token_type":"Bearer"}"#)
        .create_async()
        .await
}

async fn mock_metadata(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/spreadsheets/sheet123")
        .match_header("authorization", "Bearer ya29.test")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"sheets":[{"properties":{"title":"Companies"}},{"properties":{"title":"Other"}}]}"#)
        .create_async()
        .await
}

async fn mock_values(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock(
            "GET",
            Matcher::Regex(r"^/spreadsheets/sheet123/values/.*Companies".to_string()),
        )
        .match_header("authorization", "Bearer ya29.test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "range": "Companies!A1:C4",
                "majorDimension": "ROWS",
                "values": [
                    ["Company", "City", "Employees"],
                    ["OpenAI", "San Francisco", 1500],
                    ["Anthropic"],
                    ["Mistral", "Paris", "100"]
                ]
            }"#,
        )
        .create_async()
        .await
}

#[tokio::test]
async fn test_fetch_first_worksheet() {
    let mut server = Server::new_async().await;
    let token = mock_token(&mut server).await;
    let metadata = mock_metadata(&mut server).await;
    let values = mock_values(&mut server).await;

    let table = client(&server).fetch_table(SHEET_URL).await.unwrap();

    token.assert_async().await;
    metadata.assert_async().await;
    values.assert_async().await;

    assert_eq!(table.columns(), ["Company", "City", "Employees"]);
    assert_eq!(table.len(), 3);
    assert_eq!(
        table.entities("Company").unwrap(),
        vec!["OpenAI", "Anthropic", "Mistral"]
    );
    // Short rows are padded, numbers become text
    assert_eq!(table.rows()[1], vec!["Anthropic", "", ""]);
    assert_eq!(table.rows()[0][2], "1500");
}

#[tokio::test]
async fn test_loader_caches_sheet() {
    let mut server = Server::new_async().await;
    let token = mock_token(&mut server).await.expect(1);
    let metadata = mock_metadata(&mut server).await.expect(1);
    let values = mock_values(&mut server).await.expect(1);

    let mut loader = SourceLoader::new().with_sheets(client(&server));
    let source = TableSource::Sheet(SHEET_URL.to_string());

    let first = loader.load(&source).await.unwrap();
    let second = loader.load(&source).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    token.assert_async().await;
    metadata.assert_async().await;
    values.assert_async().await;
}

#[tokio::test]
async fn test_missing_spreadsheet() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let _metadata = server
        .mock("GET", "/spreadsheets/sheet123")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"error":{"code":404,"message":"Requested entity was not found."}}"#)
        .create_async()
        .await;

    let err = client(&server).fetch_table(SHEET_URL).await.unwrap_err();

    assert!(matches!(
        err,
        SourceError::SpreadsheetNotFound { ref spreadsheet_id } if spreadsheet_id == "sheet123"
    ));
}

#[tokio::test]
async fn test_token_exchange_rejected() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .create_async()
        .await;

    let err = client(&server).fetch_table(SHEET_URL).await.unwrap_err();

    match err {
        SourceError::Credentials(message) => assert!(message.contains("invalid_grant")),
        other => panic!("expected credentials error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_worksheet() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let _metadata = mock_metadata(&mut server).await;
    let _values = server
        .mock(
            "GET",
            Matcher::Regex(r"^/spreadsheets/sheet123/values/".to_string()),
        )
        .with_status(200)
        .with_body(r#"{"range":"Companies!A1:Z1000","majorDimension":"ROWS"}"#)
        .create_async()
        .await;

    let err = client(&server).fetch_table(SHEET_URL).await.unwrap_err();

    assert!(matches!(err, SourceError::EmptyTable));
}
