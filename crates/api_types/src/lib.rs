use serde::{Deserialize, Serialize};

pub mod split {
    use super::*;

    /// Rule the remote service applies to divide an expense among payees.
    ///
    /// The meaning of each mode belongs to Spliit; this crate only carries it.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum SplitMode {
        #[default]
        Evenly,
        ByPercentage,
        ByAmount,
        ByShares,
    }

    impl SplitMode {
        /// Returns the wire name used by Spliit.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Evenly => "EVENLY",
                Self::ByPercentage => "BY_PERCENTAGE",
                Self::ByAmount => "BY_AMOUNT",
                Self::ByShares => "BY_SHARES",
            }
        }
    }

    impl std::fmt::Display for SplitMode {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.as_str())
        }
    }
}

pub mod group {
    use super::*;

    /// A member of a Spliit group, as reported by the service.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Participant {
        pub id: String,
        pub display_name: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Category {
        pub id: i64,
        pub grouping: String,
        pub name: String,
    }
}

pub mod entry {
    use super::*;

    /// Request body for configuring a new group.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryNew {
        pub group_id: String,
        /// Defaults to `https://spliit.app` when omitted.
        pub base_url: Option<String>,
    }

    /// Request body for the options update of an existing entry.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryOptions {
        pub base_url: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EntryView {
        pub entry_id: String,
        pub group_id: String,
        pub base_url: String,
        pub title: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryListResponse {
        pub entries: Vec<EntryView>,
    }
}

pub mod expense {
    use super::*;
    use crate::split::SplitMode;

    /// Parameters of the `create_expense` action.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct CreateExpense {
        /// Selects the configured group; the first configured entry is used when absent.
        pub config_entry_id: Option<String>,
        pub group_id: String,
        pub title: String,
        /// Minor currency units (cents). Must be >= 1.
        pub amount: i64,
        /// Participant display name or id.
        pub paid_by: String,
        /// `"Name:Value"` tokens, e.g. `["Alice:600", "Bob:600"]`.
        pub paid_for: Option<Vec<String>>,
        #[serde(default)]
        pub split_mode: SplitMode,
        /// Slash-delimited `grouping/name` path, e.g. `Food and Drink/Groceries`.
        pub category_path: Option<String>,
        pub note: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PayeeShare {
        pub participant: String,
        pub shares: i64,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub expense_id: String,
        pub group_id: String,
        pub title: String,
        pub amount: i64,
        pub paid_by: String,
        pub paid_for: Vec<PayeeShare>,
        pub split_mode: SplitMode,
        pub category: i64,
    }
}
