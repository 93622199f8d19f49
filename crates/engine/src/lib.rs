//! Expense-creation action backed by the Spliit bill-splitting service.
//!
//! A [`Registry`] holds one client per configured group. The [`ActionHandler`]
//! turns a [`CreateExpense`](api_types::expense::CreateExpense) request into a
//! submitted expense: it picks the entry, resolves participant names, builds
//! the payee list and calls the remote service.

pub use action::ActionHandler;
pub use client::{
    ClientConfig, ClientConfigVersion, Connector, DEFAULT_BASE_URL, ExpenseClient, NewExpense,
};
pub use error::EngineError;
pub use registry::{ConfiguredEntry, Entry, Registry, normalize_base_url};

pub mod category;
pub mod payees;
pub mod resolve;

mod action;
mod client;
mod error;
mod registry;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Fully qualified name of the registered action.
pub const ACTION_NAME: &str = "spliit.create_expense";

pub type ResultEngine<T> = Result<T, EngineError>;
