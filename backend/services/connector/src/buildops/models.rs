use buildops_sdk::Record;
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/auth/token`.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    #[serde(rename = "clientId")]
    pub client_id: &'a str,
    #[serde(rename = "clientSecret")]
    pub client_secret: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Envelope of `GET /v1/customers`.
#[derive(Debug, Deserialize)]
pub struct CustomersPage {
    #[serde(default)]
    pub items: Option<Vec<Record>>,
}

impl CustomersPage {
    pub fn into_records(self) -> Vec<Record> {
        self.items.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_request_uses_camel_case_keys() {
        let body = serde_json::to_value(TokenRequest {
            client_id: "id",
            client_secret: "secret",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"clientId": "id", "clientSecret": "secret"})
        );
    }

    #[test]
    fn token_response_without_field() {
        let resp: TokenResponse = serde_json::from_str(r#"{"expires_in": 3600}"#).unwrap();
        assert!(resp.access_token.is_none());
    }

    #[test]
    fn customers_page_keeps_records_verbatim() {
        let json = r#"{
            "items": [
                {"id": "c1", "name": "Acme", "status": "active", "extra": {"region": "west"}},
                {"id": "c2", "name": null, "status": "inactive"}
            ],
            "total": 2
        }"#;
        let records = serde_json::from_str::<CustomersPage>(json)
            .expect("should deserialize")
            .into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], "c1");
        assert_eq!(records[0]["extra"]["region"], "west");
        assert!(records[1]["name"].is_null());
    }

    #[test]
    fn customers_page_without_items_is_empty() {
        let page: CustomersPage = serde_json::from_str("{}").unwrap();
        assert!(page.into_records().is_empty());

        let page: CustomersPage = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(page.into_records().is_empty());
    }

    #[test]
    fn non_object_items_are_rejected() {
        let result = serde_json::from_str::<CustomersPage>(r#"{"items": ["c1", "c2"]}"#);
        assert!(result.is_err());
    }
}
