use api_types::{expense::PayeeShare, group::Participant};

use crate::{EngineError, ResultEngine, client::ExpenseClient, resolve::resolve_participant};

/// A `Name:Value` token before name resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayeeSpec {
    pub name_or_id: String,
    pub value: i64,
}

/// Parses one `Name:Value` token, splitting on the first colon.
pub fn parse_payee(token: &str) -> ResultEngine<PayeeSpec> {
    let invalid = |reason| EngineError::InvalidPayee {
        token: token.to_string(),
        reason,
    };

    let (name, value) = token
        .split_once(':')
        .ok_or_else(|| invalid("expected Name:Value"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid("missing participant name"));
    }
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid("value is not an integer"))?;

    Ok(PayeeSpec {
        name_or_id: name.to_string(),
        value,
    })
}

/// Parses every token, failing on the first malformed one. Input order is kept.
pub fn parse_payees<S: AsRef<str>>(tokens: &[S]) -> ResultEngine<Vec<PayeeSpec>> {
    tokens.iter().map(|t| parse_payee(t.as_ref())).collect()
}

/// Divides `amount` across `participants` in service order.
///
/// Each share is `amount / n`; the first `amount % n` participants get one
/// extra unit, so the shares always add up to `amount`. `amount` must be
/// non-negative.
pub fn split_evenly(amount: i64, participants: &[Participant]) -> Vec<PayeeShare> {
    let Ok(count) = i64::try_from(participants.len()) else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }
    let base = amount / count;
    let remainder = amount % count;

    participants
        .iter()
        .zip(0..)
        .map(|(p, index)| PayeeShare {
            participant: p.id.clone(),
            shares: if index < remainder { base + 1 } else { base },
        })
        .collect()
}

/// Resolves the names of already parsed payees, one lookup per payee.
pub async fn resolve_payees<C: ExpenseClient>(
    client: &C,
    specs: Vec<PayeeSpec>,
) -> Vec<PayeeShare> {
    let mut paid_for = Vec::with_capacity(specs.len());
    for spec in specs {
        let participant = resolve_participant(client, &spec.name_or_id).await;
        paid_for.push(PayeeShare {
            participant,
            shares: spec.value,
        });
    }
    paid_for
}

/// Splits `amount` across every current participant of the group.
pub async fn even_payees<C: ExpenseClient>(
    client: &C,
    group_id: &str,
    amount: i64,
) -> ResultEngine<Vec<PayeeShare>> {
    let participants = client.participants().await?;
    if participants.is_empty() {
        return Err(EngineError::NoParticipants(group_id.to_string()));
    }
    Ok(split_evenly(amount, &participants))
}
