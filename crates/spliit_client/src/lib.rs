//! HTTP client for the Spliit tRPC API.

use api_types::group::{Category, Participant};
use chrono::Utc;
use engine::{
    ClientConfig, ClientConfigVersion, Connector, EngineError, ExpenseClient, NewExpense,
    ResultEngine,
};
use serde::de::DeserializeOwned;
use serde_json::json;

pub use error::ClientError;

mod error;
mod trpc;

/// Builds one [`SpliitClient`] per configuration entry, sharing a connection pool.
#[derive(Clone, Debug, Default)]
pub struct SpliitConnector {
    http: reqwest::Client,
}

impl SpliitConnector {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Connector for SpliitConnector {
    type Client = SpliitClient;

    fn connect(&self, config: &ClientConfig) -> ResultEngine<SpliitClient> {
        match config.version {
            ClientConfigVersion::V1 => Ok(SpliitClient::new(self.http.clone(), config)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SpliitClient {
    http: reqwest::Client,
    base_url: String,
    group_id: String,
}

impl SpliitClient {
    pub fn new(http: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            group_id: config.group_id.clone(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    fn url(&self, procedure: &str) -> String {
        format!("{}/api/trpc/{procedure}", self.base_url)
    }

    async fn query<T: DeserializeOwned>(
        &self,
        procedure: &str,
        input: serde_json::Value,
    ) -> Result<T, ClientError> {
        let input = trpc::batch_input(input);
        let res = self
            .http
            .get(self.url(procedure))
            .query(&[("batch", "1"), ("input", input.as_str())])
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        trpc::decode_batch(status, &body)
    }

    async fn mutation<T: DeserializeOwned>(
        &self,
        procedure: &str,
        body: &serde_json::Value,
    ) -> Result<T, ClientError> {
        let res = self
            .http
            .post(self.url(procedure))
            .query(&[("batch", "1")])
            .json(body)
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        trpc::decode_batch(status, &body)
    }

    /// Participants of the bound group, in the order Spliit lists them.
    pub async fn get_participants(&self) -> Result<Vec<Participant>, ClientError> {
        let envelope: trpc::GroupEnvelope = self
            .query(trpc::GROUPS_GET, json!({ "groupId": self.group_id }))
            .await?;
        envelope.into_participants(&self.group_id)
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, ClientError> {
        let envelope: trpc::CategoriesEnvelope = self
            .query(trpc::CATEGORIES_LIST, serde_json::Value::Null)
            .await?;
        Ok(envelope.into_categories())
    }

    /// Creates `expense` in `expense.group_id` and returns the new expense id.
    pub async fn create_expense(&self, expense: &NewExpense) -> Result<String, ClientError> {
        let body = trpc::create_expense_body(expense, Utc::now());
        let created: trpc::ExpenseCreatedWire =
            self.mutation(trpc::EXPENSES_CREATE, &body).await?;
        tracing::debug!(
            "spliit accepted expense {} in group {}",
            created.expense_id,
            expense.group_id
        );
        Ok(created.expense_id)
    }
}

impl ExpenseClient for SpliitClient {
    async fn participants(&self) -> ResultEngine<Vec<Participant>> {
        self.get_participants().await.map_err(EngineError::remote)
    }

    async fn categories(&self) -> ResultEngine<Vec<Category>> {
        self.get_categories().await.map_err(EngineError::remote)
    }

    async fn add_expense(&self, expense: &NewExpense) -> ResultEngine<String> {
        self.create_expense(expense).await.map_err(EngineError::remote)
    }
}
