use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub last_page: i64,
}

impl PageMeta {
    /// `last_page` is `ceil(total / limit)`, so an empty table has no pages.
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let limit = limit.max(1);

        Self {
            total,
            page,
            last_page: total / limit + i64::from(total % limit != 0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}
