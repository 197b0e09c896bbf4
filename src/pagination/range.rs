use std::sync::LazyLock;

use regex::Regex;

static RANGE_OF_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*[-–]\s*(\d+)\s+of\s+(\d+)").expect("valid range regex")
});

/// "21-40 of 57" style indicator shown under paginated lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeIndicator {
    pub first: u64,
    pub last: u64,
    pub total: u64,
}

impl RangeIndicator {
    /// First indicator found in the page text, if any
    pub fn find(text: &str) -> Option<Self> {
        let captures = RANGE_OF_TOTAL.captures(text)?;
        Some(Self {
            first: captures.get(1)?.as_str().parse().ok()?,
            last: captures.get(2)?.as_str().parse().ok()?,
            total: captures.get(3)?.as_str().parse().ok()?,
        })
    }

    pub fn has_more(&self) -> bool {
        self.last < self.total
    }
}
