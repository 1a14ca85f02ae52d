use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::FetchError;
use crate::config::CodaSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Simple,
    Rich,
}

impl ValueFormat {
    fn as_str(self) -> &'static str {
        match self {
            ValueFormat::Simple => "simple",
            ValueFormat::Rich => "rich",
        }
    }
}

/// A table row as returned by the Coda API, with cell values keyed by column id.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Row {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub values: HashMap<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowsPage {
    items: Vec<Row>,
    next_page_token: Option<String>,
}

pub struct Coda {
    client: Client,
    settings: CodaSettings,
}

impl Coda {
    pub fn new(settings: CodaSettings) -> Coda {
        Coda {
            client: Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &CodaSettings {
        &self.settings
    }

    /// Lists all rows of a table matching an optional `column:"value"` query, following pagination.
    pub async fn list_rows(
        &self,
        table_id: &str,
        query: Option<&str>,
        value_format: ValueFormat,
    ) -> Result<Vec<Row>, FetchError> {
        let url = format!(
            "{}/docs/{}/tables/{}/rows",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.doc_id,
            table_id
        );

        let mut rows = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self
                .client
                .get(&url)
                .bearer_auth(&self.settings.api_key)
                .query(&[("valueFormat", value_format.as_str())]);
            if let Some(query) = query {
                request = request.query(&[("query", query)]);
            }
            if let Some(page_token) = &page_token {
                request = request.query(&[("pageToken", page_token.as_str())]);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            let page: RowsPage = response.json().await?;
            rows.extend(page.items);

            match page.next_page_token {
                Some(next_page_token) => page_token = Some(next_page_token),
                None => break,
            }
        }
        Ok(rows)
    }
}
