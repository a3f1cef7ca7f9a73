//! Page planning

use crate::error::{Error, Result};
use crate::types::PAGE_SIZE;

/// Which pages a search needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    /// Results the server reported
    pub total_results: u64,
    /// Results requested (the limit, or everything)
    pub effective_limit: u64,
    /// Pages needed, probe included
    pub pages: u64,
    /// Offsets still to fetch after the probe
    pub offsets: Vec<u64>,
}

impl PagePlan {
    /// Plan the pages for `total_results` and an optional limit
    ///
    /// A limit above `total_results` is rejected before any paging.
    pub fn new(total_results: u64, limit: Option<u64>) -> Result<Self> {
        if let Some(limit) = limit {
            if limit > total_results {
                return Err(Error::validation(format!(
                    "limit ({limit}) cannot be bigger than total results ({total_results})"
                )));
            }
        }

        let effective_limit = limit.unwrap_or(total_results);
        let pages = effective_limit.div_ceil(PAGE_SIZE);
        let offsets = (1..pages).map(|page| page * PAGE_SIZE).collect();

        Ok(Self {
            total_results,
            effective_limit,
            pages,
            offsets,
        })
    }

    /// Check if pages beyond the probe are needed
    pub fn needs_paging(&self) -> bool {
        !self.offsets.is_empty()
    }
}
