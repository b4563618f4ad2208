//! Page range grammar accepted by the split tool
//!
//! Supports:
//! - `N` (single page, 1-indexed)
//! - `N-M` (inclusive range, `N <= M`)
//! - Comma-separated combinations, e.g. `1,3,5-7`
//!
//! Page counts are unknown at validation time; bounds are checked by the
//! remote service.

use crate::error::{Error, Result};

/// An inclusive, 1-indexed span of pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    pub start: u32,
    pub end: u32,
}

/// Parse a page range expression into spans.
pub fn parse_page_ranges(range: &str) -> Result<Vec<PageSpan>> {
    let mut spans = Vec::new();

    for part in range.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let span = match part.split_once('-') {
            Some((start, end)) => {
                let start = parse_page(start, range)?;
                let end = parse_page(end, range)?;
                if start > end {
                    return Err(Error::InvalidPageRange {
                        range: range.to_string(),
                    });
                }
                PageSpan { start, end }
            }
            None => {
                let page = parse_page(part, range)?;
                PageSpan {
                    start: page,
                    end: page,
                }
            }
        };

        spans.push(span);
    }

    if spans.is_empty() {
        return Err(Error::InvalidPageRange {
            range: range.to_string(),
        });
    }

    Ok(spans)
}

/// Parse one 1-indexed page number
fn parse_page(s: &str, range: &str) -> Result<u32> {
    let s = s.trim();
    let invalid = || Error::InvalidPageRange {
        range: range.to_string(),
    };

    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match s.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(page) => Ok(page),
    }
}
