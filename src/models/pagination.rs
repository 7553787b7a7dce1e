use serde::{Deserialize, Serialize};

pub const DEFAULT_OFFSET: u32 = 0;
pub const DEFAULT_LIMIT: u32 = 10;

/// Resolved pagination window, also serialized as the response `meta`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

/// Raw pagination query parameters as received on the wire
///
/// Values that fail to parse as non-negative integers are silently
/// replaced by the defaults; pagination input never rejects a request.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl PaginationParams {
    pub fn resolve(&self) -> Pagination {
        Pagination {
            limit: parse_or(self.limit.as_deref(), DEFAULT_LIMIT),
            offset: parse_or(self.offset.as_deref(), DEFAULT_OFFSET),
        }
    }
}

fn parse_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.parse::<u32>().ok()).unwrap_or(default)
}
