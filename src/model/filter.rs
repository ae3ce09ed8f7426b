use crate::model::SaleRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Criteria for listing sales. Every criterion is optional; an empty filter matches everything.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SaleFilter {
    /// Case-insensitive substring of the product, client or payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    /// Exact category match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Inclusive lower bound on the sale date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the sale date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl SaleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn to_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Returns true if `sale` satisfies every criterion of this filter.
    pub fn matches(&self, sale: &SaleRecord) -> bool {
        self.matches_search(sale)
            && self.matches_category(sale)
            && self.start_date.map_or(true, |start| sale.date() >= start)
            && self.end_date.map_or(true, |end| sale.date() <= end)
    }

    fn matches_search(&self, sale: &SaleRecord) -> bool {
        let needle = match self.search_text.as_deref() {
            Some(text) if !text.is_empty() => text.to_lowercase(),
            _ => return true,
        };
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
        contains(sale.product())
            || sale.client().is_some_and(|c| contains(c))
            || contains(sale.payment())
    }

    fn matches_category(&self, sale: &SaleRecord) -> bool {
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => sale.category() == category,
            _ => true,
        }
    }
}
