//! The contract between the engine and a Spliit client.
//!
//! A client is built from a single [`ClientConfig`] through a [`Connector`];
//! every configuration entry owns exactly one client for its lifetime.

use std::future::Future;

use api_types::{
    expense::PayeeShare,
    group::{Category, Participant},
    split::SplitMode,
};

use crate::ResultEngine;

pub const DEFAULT_BASE_URL: &str = "https://spliit.app";

/// Version of the client construction contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClientConfigVersion {
    #[default]
    V1,
}

/// Everything a connector needs to bind a client to one group on one server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub version: ClientConfigVersion,
    pub group_id: String,
    /// Scheme-prefixed, without trailing slashes.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(group_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            version: ClientConfigVersion::V1,
            group_id: group_id.into(),
            base_url: base_url.into(),
        }
    }
}

/// Fully resolved expense, ready to be submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExpense {
    pub group_id: String,
    pub title: String,
    pub paid_by: String,
    pub paid_for: Vec<PayeeShare>,
    pub amount: i64,
    pub split_mode: SplitMode,
    pub category: i64,
    pub notes: Option<String>,
}

/// Operations the engine needs from the remote bill-splitting service.
pub trait ExpenseClient: Send + Sync + 'static {
    /// Participants of the bound group, in the order the service returns them.
    fn participants(&self) -> impl Future<Output = ResultEngine<Vec<Participant>>> + Send;

    fn categories(&self) -> impl Future<Output = ResultEngine<Vec<Category>>> + Send;

    /// Creates the expense and returns the id assigned by the service.
    fn add_expense(&self, expense: &NewExpense)
    -> impl Future<Output = ResultEngine<String>> + Send;
}

/// Builds clients for configuration entries.
pub trait Connector: Send + Sync + 'static {
    type Client: ExpenseClient;

    fn connect(&self, config: &ClientConfig) -> ResultEngine<Self::Client>;
}
