//! Wire format of Spliit's tRPC batch API.
//!
//! Every call is a batch of one: inputs are wrapped as `{"0": {"json": ...}}`
//! and responses arrive as a one-element array holding either a `result` or
//! an `error`.

use api_types::{
    expense::PayeeShare,
    group::{Category, Participant},
    split::SplitMode,
};
use chrono::{DateTime, SecondsFormat, Utc};
use engine::NewExpense;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::ClientError;

pub(crate) const GROUPS_GET: &str = "groups.get";
pub(crate) const CATEGORIES_LIST: &str = "categories.list";
pub(crate) const EXPENSES_CREATE: &str = "groups.expenses.create";

#[derive(Debug, Deserialize)]
struct BatchItem<T> {
    result: Option<ResultBody<T>>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ResultBody<T> {
    data: JsonBody<T>,
}

#[derive(Debug, Deserialize)]
struct JsonBody<T> {
    json: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    json: ErrorJson,
}

#[derive(Debug, Deserialize)]
struct ErrorJson {
    message: String,
    data: Option<ErrorData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorData {
    http_status: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupEnvelope {
    group: Option<GroupWire>,
}

#[derive(Debug, Deserialize)]
struct GroupWire {
    participants: Vec<ParticipantWire>,
}

#[derive(Debug, Deserialize)]
struct ParticipantWire {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesEnvelope {
    categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExpenseCreatedWire {
    pub expense_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseFormValues<'a> {
    expense_date: String,
    title: &'a str,
    category: i64,
    amount: i64,
    paid_by: &'a str,
    paid_for: Vec<PaidForWire<'a>>,
    split_mode: SplitMode,
    save_default_splitting_options: bool,
    is_reimbursement: bool,
    documents: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct PaidForWire<'a> {
    participant: &'a str,
    shares: i64,
}

impl<'a> From<&'a PayeeShare> for PaidForWire<'a> {
    fn from(share: &'a PayeeShare) -> Self {
        Self {
            participant: &share.participant,
            shares: share.shares,
        }
    }
}

/// Query-string `input` of a single-call batch.
pub(crate) fn batch_input(input: Value) -> String {
    json!({ "0": { "json": input } }).to_string()
}

/// Body of `groups.expenses.create` for `expense`, dated `now`.
pub(crate) fn create_expense_body(expense: &NewExpense, now: DateTime<Utc>) -> Value {
    let values = ExpenseFormValues {
        expense_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        title: &expense.title,
        category: expense.category,
        amount: expense.amount,
        paid_by: &expense.paid_by,
        paid_for: expense.paid_for.iter().map(PaidForWire::from).collect(),
        split_mode: expense.split_mode,
        save_default_splitting_options: false,
        is_reimbursement: false,
        documents: Vec::new(),
        notes: expense.notes.as_deref(),
    };

    json!({
        "0": {
            "json": {
                "groupId": expense.group_id,
                "expenseFormValues": values,
                "participantId": "None",
            },
            "meta": {
                "values": { "expenseFormValues.expenseDate": ["Date"] }
            }
        }
    })
}

/// Extracts the payload of a batch response, or the error it carries.
pub(crate) fn decode_batch<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ClientError> {
    let items: Vec<BatchItem<T>> = match serde_json::from_str(body) {
        Ok(items) => items,
        Err(err) if (200..300).contains(&status) => {
            return Err(ClientError::Decode(err.to_string()));
        }
        Err(_) => return Err(ClientError::from_status(status, "unknown error".to_string())),
    };

    match items.into_iter().next() {
        Some(BatchItem {
            error: Some(err), ..
        }) => {
            let status = err
                .json
                .data
                .and_then(|d| d.http_status)
                .unwrap_or(status);
            Err(ClientError::from_status(status, err.json.message))
        }
        Some(BatchItem {
            result: Some(result),
            ..
        }) => Ok(result.data.json),
        _ => Err(ClientError::Decode("empty batch response".to_string())),
    }
}

impl GroupEnvelope {
    pub(crate) fn into_participants(self, group_id: &str) -> Result<Vec<Participant>, ClientError> {
        let group = self
            .group
            .ok_or_else(|| ClientError::NotFound(format!("group {group_id}")))?;
        Ok(group
            .participants
            .into_iter()
            .map(|p| Participant {
                id: p.id,
                display_name: p.name,
            })
            .collect())
    }
}

impl CategoriesEnvelope {
    pub(crate) fn into_categories(self) -> Vec<Category> {
        self.categories
    }
}
