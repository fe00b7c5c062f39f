use serde::{Deserialize, Serialize};

use crate::Urlstruct;

/// Limit used when the request does not carry one.
pub const DEFAULT_LIMIT: i64 = 100;
/// Upper bound for `limit` when `max_limit` is unset.
pub const DEFAULT_MAX_LIMIT: i64 = 1000;
/// Upper bound for the offset when `max_offset` is unset.
pub const DEFAULT_MAX_OFFSET: i64 = 1_000_000;

/// Limit/offset pagination decoded from `limit`, `offset` and `page`.
///
/// Embed it in a filter with `#[urlstruct(flatten)]`; its columns then
/// resolve directly on the outer record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Urlstruct)]
pub struct Pager {
    pub limit: i64,
    pub offset: i64,
    pub page: i64,

    /// Zero means [`DEFAULT_MAX_LIMIT`].
    #[urlstruct(skip)]
    pub max_limit: i64,
    /// Zero means [`DEFAULT_MAX_OFFSET`].
    #[urlstruct(skip)]
    pub max_offset: i64,
}

impl Pager {
    /// Effective limit. Negative limits are returned as is and mean "no limit".
    pub fn get_limit(&self) -> i64 {
        let max_limit = if self.max_limit > 0 { self.max_limit } else { DEFAULT_MAX_LIMIT };
        match self.limit {
            limit if limit < 0 => limit,
            0 => DEFAULT_LIMIT.min(max_limit),
            limit => limit.min(max_limit),
        }
    }

    /// Effective offset: explicit `offset` wins, otherwise derived from `page`.
    pub fn get_offset(&self) -> i64 {
        let max_offset = if self.max_offset > 0 { self.max_offset } else { DEFAULT_MAX_OFFSET };
        let offset = if self.offset > 0 {
            self.offset
        } else {
            let limit = self.get_limit();
            if self.page > 1 && limit > 0 {
                (self.page - 1).saturating_mul(limit)
            } else {
                0
            }
        };
        offset.min(max_offset)
    }

    /// One-based page number implied by the effective offset and limit.
    pub fn get_page(&self) -> i64 {
        let limit = self.get_limit();
        if limit <= 0 {
            return 1;
        }
        self.get_offset() / limit + 1
    }

    /// Stores `page` as an explicit offset.
    pub fn set_page(&mut self, page: i64) {
        let page = page.max(1);
        self.page = page;
        self.offset = (page - 1).saturating_mul(self.get_limit().max(0));
    }
}
