use std::str::FromStr;

use crate::domain::error::DomainError;

pub(crate) const POSTS_PER_PAGE: u32 = 5;

/// Requested page: a 1-based number or the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageSelector {
    Number(u32),
    Last,
}

impl Default for PageSelector {
    fn default() -> Self {
        Self::Number(1)
    }
}

impl FromStr for PageSelector {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw == "last" {
            return Ok(Self::Last);
        }
        raw.parse::<u32>()
            .map(Self::Number)
            .map_err(|_| DomainError::NotFound(format!("page '{raw}'")))
    }
}

impl PageSelector {
    /// Resolves to a page number within `1..=num_pages`.
    pub(crate) fn resolve(self, num_pages: u32) -> Result<u32, DomainError> {
        let number = match self {
            Self::Number(number) => number,
            Self::Last => num_pages,
        };
        if number == 0 || number > num_pages {
            return Err(DomainError::NotFound(format!("page {number}")));
        }
        Ok(number)
    }
}

/// An empty result set still has one (empty) page.
pub(crate) fn num_pages(total: i64, per_page: u32) -> u32 {
    if total <= 0 {
        return 1;
    }
    let per_page = i64::from(per_page.max(1));
    u32::try_from((total + per_page - 1) / per_page).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone)]
pub(crate) struct Page<T> {
    pub(crate) items: Vec<T>,
    pub(crate) number: u32,
    pub(crate) num_pages: u32,
    pub(crate) per_page: u32,
    pub(crate) total: i64,
}

impl<T> Page<T> {
    pub(crate) fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub(crate) fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub(crate) fn is_paginated(&self) -> bool {
        self.num_pages > 1
    }
}
