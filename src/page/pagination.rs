use std::{fmt, str::FromStr};

use crate::{error::PageError, macros::Escaped, node};

/// A zero-based page index taken from a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Page(u64);

impl Page {
    /// Only plain decimal digits are accepted: no sign, fraction or surrounding whitespace.
    pub fn parse(s: &str) -> Result<Page, PageError> {
        if s.is_empty() {
            return Err(PageError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PageError::NotANumber(s.to_string()));
        }
        s.parse::<u64>()
            .map(Page)
            .map_err(|_| PageError::Overflow(s.to_string()))
    }

    pub fn prev(self) -> Option<Page> {
        self.0.checked_sub(1).map(Page)
    }

    pub fn next(self) -> Page {
        Page(self.0.saturating_add(1))
    }
}

impl From<u64> for Page {
    fn from(n: u64) -> Self {
        Page(n)
    }
}

impl FromStr for Page {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::parse(s)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Render previous/current/next links for `url`. The previous link and the
/// current page marker are left out on the first page.
pub fn render_pagination(url: &str, page: Page) -> String {
    let page_href = |p: Page| format!("{url}&page={p}");
    let prev = match page.prev() {
        Some(prev) => crate::group_nodes!(
            node! { li, class = "page-item" =>
                node! { a, class = "page-link", href = page_href(prev) => "&laquo;" },
            },
            node! { li, class = "page-item disabled active" =>
                node! { a, class = "page-link" => Escaped(page) },
            }
        )
        .to_string(),
        None => String::new(),
    };

    node! { ul, class = "pagination", style = "margin-top: 3px;" =>
        prev,
        node! { li, class = "page-item" =>
            node! { a, class = "page-link", href = page_href(page.next()) => "&raquo;" },
        },
    }
    .to_string()
}
