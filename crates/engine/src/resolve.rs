//! Best-effort mapping from participant display names to ids.
//!
//! Resolution fails open: when the participant list cannot be fetched, or no
//! display name matches, the input is assumed to already be an id. Two
//! participants sharing a display name (ignoring case) resolve to whichever
//! the service lists first.

use api_types::group::Participant;
use unicode_normalization::UnicodeNormalization;

use crate::client::ExpenseClient;

/// Returns the id of the participant named `name_or_id`, or the trimmed input.
pub async fn resolve_participant<C: ExpenseClient>(client: &C, name_or_id: &str) -> String {
    let wanted = name_or_id.trim();
    match client.participants().await {
        Ok(participants) => {
            if let Some(id) = find_by_name(&participants, wanted) {
                return id.to_string();
            }
            tracing::debug!("no participant named '{wanted}', using it as an id");
        }
        Err(err) => {
            tracing::debug!("could not fetch participants to resolve name '{wanted}': {err}");
        }
    }
    wanted.to_string()
}

/// First participant whose display name equals `name`, ignoring case.
pub fn find_by_name<'a>(participants: &'a [Participant], name: &str) -> Option<&'a str> {
    let wanted = name_key(name);
    participants
        .iter()
        .find(|p| name_key(&p.display_name) == wanted)
        .map(|p| p.id.as_str())
}

pub(crate) fn name_key(value: &str) -> String {
    value.trim().nfc().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::{ClientConfig, Connector},
        testing::MemoryBackend,
    };

    fn participant(id: &str, name: &str) -> Participant {
        Participant {
            id: id.to_string(),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn find_ignores_case_and_padding() {
        let list = vec![participant("p1", "Alice"), participant("p2", " Bob ")];
        assert_eq!(find_by_name(&list, "alice"), Some("p1"));
        assert_eq!(find_by_name(&list, "BOB"), Some("p2"));
        assert_eq!(find_by_name(&list, "Carol"), None);
    }

    #[test]
    fn find_compares_composed_forms() {
        let list = vec![participant("p1", "Zoe\u{301}")];
        assert_eq!(find_by_name(&list, "ZOÉ"), Some("p1"));
    }

    #[test]
    fn find_takes_first_duplicate() {
        let list = vec![
            participant("sam-1", "Sam"),
            participant("sam-2", "sam"),
            participant("sam-3", "SAM"),
        ];
        for _ in 0..3 {
            assert_eq!(find_by_name(&list, "Sam"), Some("sam-1"));
        }
    }

    #[tokio::test]
    async fn resolves_name_to_id() {
        let backend = MemoryBackend::default().with_participants("g", &[("p1", "Alice")]);
        let client = backend.connect(&ClientConfig::new("g", "https://x")).unwrap();

        assert_eq!(resolve_participant(&client, " alice ").await, "p1");
    }

    #[tokio::test]
    async fn unknown_name_is_returned_unchanged() {
        let backend = MemoryBackend::default().with_participants("g", &[("p1", "Alice")]);
        let client = backend.connect(&ClientConfig::new("g", "https://x")).unwrap();

        assert_eq!(resolve_participant(&client, "p42").await, "p42");
    }

    #[tokio::test]
    async fn fetch_failure_falls_back_to_input() {
        let backend = MemoryBackend::default().with_participants("g", &[("p1", "Alice")]);
        backend.fail_participants(true);
        let client = backend.connect(&ClientConfig::new("g", "https://x")).unwrap();

        assert_eq!(resolve_participant(&client, "Alice").await, "Alice");
    }
}
