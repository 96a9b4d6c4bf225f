//! [`Tabular`] over the Google Sheets v4 values API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::auth::TokenProvider;
use crate::error::StoreError;
use crate::tabular::Tabular;

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct GoogleSheets {
    spreadsheet_id: String,
    token: TokenProvider,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

impl GoogleSheets {
    pub fn new(spreadsheet_id: String, token: TokenProvider, http: reqwest::Client) -> Self {
        Self {
            spreadsheet_id,
            token,
            http,
        }
    }

    fn values_url(&self, table: &str, range: &str) -> String {
        format!("{API_BASE}/{}/values/{table}!{range}", self.spreadsheet_id)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Api { status, body })
    }
}

#[async_trait]
impl Tabular for GoogleSheets {
    async fn read(&self, table: &str, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let token = self.token.bearer_token().await?;
        let response = self
            .http
            .get(self.values_url(table, range))
            .bearer_auth(token)
            .send()
            .await?;
        let parsed: ValueRange = Self::check(response).await?.json().await?;
        Ok(parsed.values)
    }

    async fn append(
        &self,
        table: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), StoreError> {
        let token = self.token.bearer_token().await?;
        let url = format!("{}:append", self.values_url(table, range));
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&json!({ "values": rows }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update(
        &self,
        table: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), StoreError> {
        let token = self.token.bearer_token().await?;
        let response = self
            .http
            .put(self.values_url(table, range))
            .bearer_auth(token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&json!({ "values": rows }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn table_exists(&self, table: &str) -> Result<bool, StoreError> {
        let token = self.token.bearer_token().await?;
        let url = format!("{API_BASE}/{}", self.spreadsheet_id);
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&[("fields", "sheets.properties.title")])
            .send()
            .await?;
        let meta: SpreadsheetMeta = Self::check(response).await?.json().await?;
        Ok(meta.sheets.iter().any(|s| s.properties.title == table))
    }

    async fn create_table(&self, table: &str) -> Result<(), StoreError> {
        let token = self.token.bearer_token().await?;
        let url = format!("{API_BASE}/{}:batchUpdate", self.spreadsheet_id);
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": table } } }]
        });
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let token = self.token.bearer_token().await?;
        let url = format!("{API_BASE}/{}", self.spreadsheet_id);
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&[("fields", "spreadsheetId")])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
