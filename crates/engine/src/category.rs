//! Category lookup by `grouping/name` path.

use api_types::group::Category;

use crate::{EngineError, ResultEngine, client::ExpenseClient, resolve::name_key};

/// Spliit's "General" category, used when no path is given.
pub const DEFAULT_CATEGORY: i64 = 0;

pub async fn resolve_category<C: ExpenseClient>(
    client: &C,
    category_path: Option<&str>,
) -> ResultEngine<i64> {
    let Some(path) = category_path.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(DEFAULT_CATEGORY);
    };
    let categories = client.categories().await?;
    find_category(&categories, path).ok_or_else(|| EngineError::UnknownCategory(path.to_string()))
}

/// Matches `grouping/name`, or a bare `name` against any grouping. First match wins.
pub fn find_category(categories: &[Category], path: &str) -> Option<i64> {
    let (grouping, name) = match path.rsplit_once('/') {
        Some((grouping, name)) => (Some(name_key(grouping)), name_key(name)),
        None => (None, name_key(path)),
    };

    categories
        .iter()
        .find(|c| {
            name_key(&c.name) == name
                && grouping
                    .as_ref()
                    .is_none_or(|g| name_key(&c.grouping) == *g)
        })
        .map(|c| c.id)
}
