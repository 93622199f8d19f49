//! The `create_expense` action.

use std::sync::Arc;

use api_types::{
    expense::{CreateExpense, ExpenseCreated},
    split::SplitMode,
};

use crate::{
    ACTION_NAME, EngineError, ResultEngine,
    category::resolve_category,
    client::{Connector, ExpenseClient, NewExpense},
    payees::{even_payees, parse_payees, resolve_payees},
    registry::Registry,
    resolve::resolve_participant,
};

/// Handles action invocations against the entries of a shared [`Registry`].
pub struct ActionHandler<K: Connector> {
    registry: Arc<Registry<K>>,
}

impl<K: Connector> Clone for ActionHandler<K> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<K: Connector> ActionHandler<K> {
    pub fn new(registry: Arc<Registry<K>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry<K>> {
        &self.registry
    }

    /// Resolves names, builds the payee list and submits the expense.
    ///
    /// Input is fully validated, payee tokens included, before the first
    /// remote call. Remote failures are returned as [`EngineError::Remote`]
    /// without retry.
    pub async fn create_expense(&self, request: CreateExpense) -> ResultEngine<ExpenseCreated> {
        if !self.registry.is_action_registered().await {
            return Err(EngineError::ActionUnavailable(ACTION_NAME.to_string()));
        }

        let group_id = required(&request.group_id, "group_id")?;
        let title = required(&request.title, "title")?;
        let paid_by = required(&request.paid_by, "paid_by")?;
        if request.amount < 1 {
            return Err(EngineError::InvalidInput(
                "amount must be a positive number of cents".to_string(),
            ));
        }
        let explicit = match request.paid_for.as_deref() {
            Some(tokens) if !tokens.is_empty() => Some(parse_payees(tokens)?),
            _ => None,
        };
        let notes = request
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(ToString::to_string);

        let selected = self
            .registry
            .select(request.config_entry_id.as_deref())
            .await?;
        let client = &selected.client;

        let paid_by = resolve_participant(client, &paid_by).await;
        let (paid_for, split_mode) = match explicit {
            Some(specs) => (resolve_payees(client, specs).await, request.split_mode),
            None => {
                if request.split_mode != SplitMode::Evenly {
                    tracing::debug!(
                        "no paid_for given, submitting {} as EVENLY instead of {}",
                        title,
                        request.split_mode
                    );
                }
                (
                    even_payees(client, &group_id, request.amount).await?,
                    SplitMode::Evenly,
                )
            }
        };
        let category = resolve_category(client, request.category_path.as_deref()).await?;

        let expense = NewExpense {
            group_id,
            title,
            paid_by,
            paid_for,
            amount: request.amount,
            split_mode,
            category,
            notes,
        };
        let expense_id = client.add_expense(&expense).await?;

        tracing::info!(
            "Spliit: created expense '{}' amount={} split={} group={}",
            expense.title,
            expense.amount,
            request.split_mode,
            expense.group_id
        );

        Ok(ExpenseCreated {
            expense_id,
            group_id: expense.group_id,
            title: expense.title,
            amount: expense.amount,
            paid_by: expense.paid_by,
            paid_for: expense.paid_for,
            split_mode: expense.split_mode,
            category: expense.category,
        })
    }
}

fn required(value: &str, field: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{field} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use api_types::expense::PayeeShare;

    use super::*;
    use crate::testing::MemoryBackend;

    fn request(paid_for: Option<&[&str]>) -> CreateExpense {
        CreateExpense {
            group_id: "grp-1".to_string(),
            title: "Groceries".to_string(),
            amount: 1000,
            paid_by: "Alice".to_string(),
            paid_for: paid_for.map(|t| t.iter().map(ToString::to_string).collect()),
            ..CreateExpense::default()
        }
    }

    fn share(participant: &str, shares: i64) -> PayeeShare {
        PayeeShare {
            participant: participant.to_string(),
            shares,
        }
    }

    async fn handler_with_group(backend: &MemoryBackend) -> ActionHandler<MemoryBackend> {
        let registry = Arc::new(Registry::new(backend.clone()));
        registry.setup("grp-1", None).await.unwrap();
        ActionHandler::new(registry)
    }

    fn trio() -> MemoryBackend {
        MemoryBackend::default().with_participants(
            "grp-1",
            &[("id-a", "Alice"), ("id-b", "Bob"), ("id-c", "Carol")],
        )
    }

    #[tokio::test]
    async fn even_split_across_all_participants() {
        let backend = trio();
        let handler = handler_with_group(&backend).await;

        let created = handler.create_expense(request(None)).await.unwrap();

        assert_eq!(created.paid_by, "id-a");
        assert_eq!(
            created.paid_for,
            vec![share("id-a", 334), share("id-b", 333), share("id-c", 333)]
        );
        assert_eq!(created.split_mode, SplitMode::Evenly);

        let submitted = backend.expenses();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].amount, 1000);
        assert_eq!(submitted[0].category, 0);
        assert_eq!(submitted[0].group_id, "grp-1");
    }

    #[tokio::test]
    async fn missing_paid_for_forces_even_mode() {
        let backend = trio();
        let handler = handler_with_group(&backend).await;

        let mut req = request(None);
        req.split_mode = SplitMode::ByAmount;
        let created = handler.create_expense(req).await.unwrap();

        assert_eq!(created.split_mode, SplitMode::Evenly);
        assert_eq!(backend.expenses()[0].split_mode, SplitMode::Evenly);
    }

    #[tokio::test]
    async fn explicit_payees_keep_order_and_values() {
        let backend = trio();
        let handler = handler_with_group(&backend).await;

        let mut req = request(Some(&["Bob:600", "alice:400"]));
        req.split_mode = SplitMode::ByAmount;
        let created = handler.create_expense(req).await.unwrap();

        assert_eq!(
            created.paid_for,
            vec![share("id-b", 600), share("id-a", 400)]
        );
        assert_eq!(created.split_mode, SplitMode::ByAmount);
    }

    #[tokio::test]
    async fn empty_paid_for_list_falls_back_to_even_split() {
        let backend = trio();
        let handler = handler_with_group(&backend).await;

        let created = handler.create_expense(request(Some(&[]))).await.unwrap();
        assert_eq!(created.paid_for.len(), 3);
    }

    #[tokio::test]
    async fn malformed_token_fails_before_any_remote_call() {
        let backend = trio();
        let handler = handler_with_group(&backend).await;

        let err = handler
            .create_expense(request(Some(&["Alice600"])))
            .await
            .unwrap_err();

        assert!(err.is_user_error());
        assert!(err.to_string().contains("Alice600"));
        assert_eq!(backend.participant_calls(), 0);
        assert!(backend.expenses().is_empty());
    }

    #[tokio::test]
    async fn no_participants_is_an_error() {
        let backend = MemoryBackend::default();
        let handler = handler_with_group(&backend).await;

        let err = handler.create_expense(request(None)).await.unwrap_err();
        assert_eq!(err, EngineError::NoParticipants("grp-1".to_string()));
        assert!(backend.expenses().is_empty());
    }

    #[tokio::test]
    async fn unknown_entry_is_rejected() {
        let backend = trio();
        let handler = handler_with_group(&backend).await;

        let mut req = request(None);
        req.config_entry_id = Some("missing".to_string());
        let err = handler.create_expense(req).await.unwrap_err();

        assert!(matches!(err, EngineError::KeyNotFound(_)));
        assert_eq!(backend.participant_calls(), 0);
    }

    #[tokio::test]
    async fn selects_named_entry() {
        let backend = trio().with_participants("grp-2", &[("id-z", "Zed")]);
        let registry = Arc::new(Registry::new(backend.clone()));
        registry.setup("grp-1", None).await.unwrap();
        let second = registry.setup("grp-2", None).await.unwrap();
        let handler = ActionHandler::new(registry);

        let mut req = request(None);
        req.config_entry_id = Some(second.entry_id);
        req.group_id = "grp-2".to_string();
        req.paid_by = "Zed".to_string();
        let created = handler.create_expense(req).await.unwrap();

        assert_eq!(created.paid_by, "id-z");
        assert_eq!(created.paid_for, vec![share("id-z", 1000)]);
    }

    #[tokio::test]
    async fn rejects_non_positive_amount_and_blank_fields() {
        let backend = trio();
        let handler = handler_with_group(&backend).await;

        let mut req = request(None);
        req.amount = 0;
        assert!(matches!(
            handler.create_expense(req).await,
            Err(EngineError::InvalidInput(_))
        ));

        let mut req = request(None);
        req.title = "  ".to_string();
        assert!(matches!(
            handler.create_expense(req).await,
            Err(EngineError::InvalidInput(_))
        ));
        assert!(backend.expenses().is_empty());
    }

    #[tokio::test]
    async fn remote_failure_is_propagated_unchanged() {
        let backend = trio();
        backend.fail_add_expense("spliit is down");
        let handler = handler_with_group(&backend).await;

        let err = handler.create_expense(request(None)).await.unwrap_err();
        assert!(matches!(err, EngineError::Remote(_)));
        assert_eq!(err.to_string(), "spliit is down");
    }

    #[tokio::test]
    async fn category_path_is_resolved() {
        let backend = trio().with_category(8, "Food and Drink", "Groceries");
        let handler = handler_with_group(&backend).await;

        let mut req = request(None);
        req.category_path = Some("food and drink/groceries".to_string());
        let created = handler.create_expense(req).await.unwrap();
        assert_eq!(created.category, 8);

        let mut req = request(None);
        req.category_path = Some("Travel/Hotel".to_string());
        let err = handler.create_expense(req).await.unwrap_err();
        assert_eq!(err, EngineError::UnknownCategory("Travel/Hotel".to_string()));
        assert_eq!(backend.expenses().len(), 1);
    }

    #[tokio::test]
    async fn blank_note_is_dropped() {
        let backend = trio();
        let handler = handler_with_group(&backend).await;

        let mut req = request(None);
        req.note = Some("   ".to_string());
        handler.create_expense(req).await.unwrap();
        let mut req = request(None);
        req.note = Some(" receipt #12 ".to_string());
        handler.create_expense(req).await.unwrap();

        let notes: Vec<_> = backend.expenses().into_iter().map(|e| e.notes).collect();
        assert_eq!(notes, vec![None, Some("receipt #12".to_string())]);
    }

    #[tokio::test]
    async fn unregistered_action_is_rejected() {
        let backend = trio();
        let handler = handler_with_group(&backend).await;
        let entry_id = handler.registry().entries().await[0].entry_id.clone();
        handler.registry().teardown(&entry_id).await.unwrap();

        let err = handler.create_expense(request(None)).await.unwrap_err();
        assert_eq!(err, EngineError::ActionUnavailable(ACTION_NAME.to_string()));
    }
}
