//! The in-memory sales ledger and the views derived from it.
//!
//! A `Ledger` is a plain value owned by its caller. It never performs I/O: it is handed stored
//! text to `deserialize` and hands text back from `serialize`. All derived views are recomputed
//! from the current records on every call.

use crate::error::{LedgerError, LedgerResult};
use crate::model::{Amount, SaleFilter, SaleId, SaleInput, SaleRecord};
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// How many sales `dashboard_summary` reports as recent.
pub const RECENT_SALES: usize = 5;

/// How many distinct days `aggregate_by_day` reports by default.
pub const DEFAULT_DAY_WINDOW: usize = 30;

/// A mapping from bucket key to the summed sale totals in that bucket, ordered by key.
pub type Buckets = BTreeMap<String, Amount>;

/// The ordered collection of recorded sales.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    sales: Vec<SaleRecord>,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardSummary {
    pub count: usize,
    pub total_revenue: Amount,
    pub today_revenue: Amount,
    pub average_sale: Amount,
    /// The most recently added sales, newest first. Ordered by insertion, not by date.
    pub recent_sales: Vec<SaleRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already-stored records. Order is kept as given.
    pub fn from_records(sales: Vec<SaleRecord>) -> Self {
        Self { sales }
    }

    /// Parses stored ledger text. Absent or unparsable input yields an empty ledger; the parse
    /// failure is logged and otherwise dropped.
    pub fn deserialize(text: Option<&str>) -> Self {
        let Some(text) = text else {
            debug!("No stored sales data, starting with an empty ledger");
            return Self::new();
        };
        match Self::try_deserialize(text) {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!("{e}. Starting with an empty ledger.");
                Self::new()
            }
        }
    }

    /// Parses stored ledger text, reporting a `PersistenceFormat` error if it is malformed.
    ///
    /// Stored data is all or nothing: a record that breaks a sale invariant, or an id used twice,
    /// rejects the whole text.
    pub fn try_deserialize(text: &str) -> LedgerResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        let ledger: Ledger = serde_json::from_str(text)
            .map_err(|e| LedgerError::PersistenceFormat(e.to_string()))?;
        let mut ids = HashSet::with_capacity(ledger.sales.len());
        for sale in &ledger.sales {
            if !ids.insert(sale.id()) {
                return Err(LedgerError::PersistenceFormat(format!(
                    "sale id {} is used more than once",
                    sale.id()
                )));
            }
            sale.check().map_err(|e| {
                LedgerError::PersistenceFormat(format!("sale {}: {e}", sale.id()))
            })?;
        }
        Ok(ledger)
    }

    /// Serializes every record, in order, to the JSON storage format.
    pub fn serialize(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Unable to serialize the sales ledger")
    }

    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    pub fn get_sale(&self, id: SaleId) -> Option<&SaleRecord> {
        self.sales.iter().find(|s| s.id() == id)
    }

    /// Validates `input`, assigns a fresh id and creation time, and appends the sale.
    pub fn add_sale(&mut self, input: SaleInput) -> LedgerResult<SaleRecord> {
        self.add_sale_at(input, Utc::now())
    }

    /// Same as `add_sale` with an explicit creation instant.
    pub fn add_sale_at(
        &mut self,
        input: SaleInput,
        created_at: DateTime<Utc>,
    ) -> LedgerResult<SaleRecord> {
        let input = input.normalize()?;
        let id = self.next_id(created_at)?;
        let record = SaleRecord::from_input(id, created_at, input);
        debug!("Adding sale {} ({})", record.id(), record.product());
        self.sales.push(record.clone());
        Ok(record)
    }

    /// Replaces every mutable field of sale `id` with `input`, keeping `id` and `created_at`.
    pub fn update_sale(&mut self, id: SaleId, input: SaleInput) -> LedgerResult<SaleRecord> {
        let ix = self.position(id)?;
        let input = input.normalize()?;
        let created_at = self.sales[ix].created_at();
        let record = SaleRecord::from_input(id, created_at, input);
        debug!("Updating sale {id}");
        self.sales[ix] = record.clone();
        Ok(record)
    }

    /// Removes sale `id` and returns it. An unknown id is a `NotFound` error, so deleting the
    /// same sale twice fails the second time.
    pub fn delete_sale(&mut self, id: SaleId) -> LedgerResult<SaleRecord> {
        let ix = self.position(id)?;
        debug!("Deleting sale {id}");
        Ok(self.sales.remove(ix))
    }

    /// Returns the sales matching `filter`, newest date first.
    ///
    /// Sales sharing a date come back in no particular order.
    pub fn list_sales(&self, filter: &SaleFilter) -> Vec<&SaleRecord> {
        let mut sales: Vec<&SaleRecord> = self.sales.iter().filter(|s| filter.matches(s)).collect();
        sales.sort_unstable_by(|a, b| b.date().cmp(&a.date()));
        sales
    }

    /// Computes the dashboard figures, counting `today_revenue` against the caller's `today`.
    pub fn dashboard_summary(&self, today: NaiveDate) -> DashboardSummary {
        self.dashboard_summary_with(today, RECENT_SALES)
    }

    /// Same as `dashboard_summary` with a configurable number of recent sales.
    pub fn dashboard_summary_with(&self, today: NaiveDate, recent: usize) -> DashboardSummary {
        let count = self.sales.len();
        let total_revenue: Amount = self.sales.iter().map(SaleRecord::total).sum();
        let today_revenue: Amount = self
            .sales
            .iter()
            .filter(|s| s.date() == today)
            .map(SaleRecord::total)
            .sum();
        let recent_sales = self.sales.iter().rev().take(recent).cloned().collect();
        DashboardSummary {
            count,
            total_revenue,
            today_revenue,
            average_sale: total_revenue.average_over(count),
            recent_sales,
        }
    }

    /// Revenue per `YYYY-MM` month.
    pub fn aggregate_by_month(&self) -> Buckets {
        self.aggregate(SaleRecord::month_key)
    }

    /// Revenue per payment method.
    pub fn aggregate_by_payment(&self) -> Buckets {
        self.aggregate(|s| s.payment().to_string())
    }

    /// Revenue per category.
    pub fn aggregate_by_category(&self) -> Buckets {
        self.aggregate(|s| s.category().to_string())
    }

    /// Revenue per day for the most recent `limit` distinct dates that have sales, oldest first.
    pub fn aggregate_by_day(&self, limit: usize) -> Buckets {
        let mut days = self.aggregate(|s| s.date().to_string());
        while days.len() > limit {
            days.pop_first();
        }
        days
    }

    /// Number of sales per payment method.
    pub fn count_by_payment(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for sale in &self.sales {
            *counts.entry(sale.payment().to_string()).or_insert(0) += 1;
        }
        counts
    }

    fn aggregate<F>(&self, key: F) -> Buckets
    where
        F: Fn(&SaleRecord) -> String,
    {
        let mut buckets = Buckets::new();
        for sale in &self.sales {
            *buckets.entry(key(sale)).or_insert(Amount::ZERO) += sale.total();
        }
        buckets
    }

    fn position(&self, id: SaleId) -> LedgerResult<usize> {
        self.sales
            .iter()
            .position(|s| s.id() == id)
            .ok_or(LedgerError::NotFound(id))
    }

    /// Millisecond timestamp ids, bumped past the largest existing id so they stay unique.
    fn next_id(&self, now: DateTime<Utc>) -> LedgerResult<SaleId> {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let floor = match self.sales.iter().map(SaleRecord::id).max() {
            Some(max) => max
                .value()
                .checked_add(1)
                .ok_or_else(|| LedgerError::validation("no sale ids are left"))?,
            None => 0,
        };
        Ok(SaleId::new(candidate.max(floor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn sale(product: &str, unit: u32, quantity: u32, day: &str) -> SaleInput {
        SaleInput::new(product, unit, date(day), "cash", "general").with_quantity(quantity)
    }

    fn example_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add_sale(sale("printed", 170, 2, "2024-01-05")).unwrap();
        ledger.add_sale(sale("girly", 120, 1, "2024-01-05")).unwrap();
        ledger
    }

    #[test]
    fn test_add_sale_assigns_identity() {
        let mut ledger = Ledger::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap();
        let record = ledger
            .add_sale_at(sale("printed", 170, 2, "2024-01-05"), now)
            .unwrap();
        assert_eq!(record.id().value(), now.timestamp_millis() as u64);
        assert_eq!(record.created_at(), now);
        assert_eq!(record.total(), amount("340"));
        assert_eq!(ledger.list_sales(&SaleFilter::new()).len(), 1);
    }

    #[test]
    fn test_add_sale_ids_are_unique_within_the_same_instant() {
        let mut ledger = Ledger::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap();
        let a = ledger.add_sale_at(sale("a", 1, 1, "2024-01-05"), now).unwrap();
        let b = ledger.add_sale_at(sale("b", 1, 1, "2024-01-05"), now).unwrap();
        let c = ledger.add_sale_at(sale("c", 1, 1, "2024-01-05"), now).unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(b.id(), c.id());
        assert!(a.id() < b.id() && b.id() < c.id());
    }

    #[test]
    fn test_add_sale_ids_never_collide_with_later_stored_ids() {
        let mut ledger = example_ledger();
        let max = ledger.sales().iter().map(|s| s.id()).max().unwrap();
        let past = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
        let record = ledger.add_sale_at(sale("late", 5, 1, "2024-01-06"), past).unwrap();
        assert!(record.id() > max);
    }

    #[test]
    fn test_add_sale_invalid_leaves_ledger_unchanged() {
        let mut ledger = example_ledger();
        let before = ledger.clone();

        let err = ledger.add_sale(sale("", 10, 1, "2024-01-05")).unwrap_err();
        assert!(err.is_validation());
        let err = ledger.add_sale(sale("x", 0, 1, "2024-01-05")).unwrap_err();
        assert!(err.is_validation());
        let err = ledger.add_sale(sale("x", 10, 0, "2024-01-05")).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(before, ledger);
    }

    #[test]
    fn test_add_and_update_reject_unrepresentable_totals() {
        let mut ledger = example_ledger();
        let before = ledger.clone();
        let huge = amount("79228162514264337593543950335");
        let input = SaleInput::new("yacht", huge, date("2024-01-05"), "cash", "boats");

        let err = ledger.add_sale(input.clone().with_quantity(2)).unwrap_err();
        assert!(err.is_validation());
        let id = ledger.sales()[0].id();
        let err = ledger.update_sale(id, input.with_quantity(2)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(before, ledger);

        // A single huge sale is fine, and totals saturate rather than overflow.
        let huge_sale = SaleInput::new("yacht", huge, date("2024-01-05"), "cash", "boats");
        ledger.add_sale(huge_sale).unwrap();
        let summary = ledger.dashboard_summary(date("2024-01-05"));
        assert_eq!(summary.total_revenue, huge);
        assert_eq!(ledger.aggregate_by_month()["2024-01"], huge);
    }

    #[test]
    fn test_add_sale_when_ids_are_exhausted() {
        let text = r#"[{
            "id": 18446744073709551615,
            "product": "printed",
            "unit_amount": "170",
            "date": "2024-01-05",
            "payment": "cash",
            "category": "shirts",
            "created_at": "2024-01-05T10:00:00Z"
        }]"#;
        let mut ledger = Ledger::try_deserialize(text).unwrap();
        let err = ledger.add_sale(sale("cap", 45, 1, "2024-01-06")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_update_sale_replaces_fields_and_keeps_identity() {
        let mut ledger = example_ledger();
        let original = ledger.sales()[0].clone();
        let replacement = SaleInput::new("printed tee", 150, date("2024-02-01"), "card", "shirts")
            .with_quantity(3)
            .with_client("Asha");

        let updated = ledger.update_sale(original.id(), replacement).unwrap();

        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.created_at(), original.created_at());
        assert_eq!(updated.product(), "printed tee");
        assert_eq!(updated.unit_amount(), amount("150"));
        assert_eq!(updated.quantity(), 3);
        assert_eq!(updated.client(), Some("Asha"));
        assert_eq!(updated.date(), date("2024-02-01"));
        assert_eq!(updated.payment(), "card");
        assert_eq!(updated.category(), "shirts");
        assert_eq!(updated.notes(), None);
        assert_eq!(ledger.get_sale(original.id()), Some(&updated));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_update_sale_unknown_id() {
        let mut ledger = example_ledger();
        let before = ledger.clone();
        let err = ledger
            .update_sale(SaleId::new(1), sale("x", 1, 1, "2024-01-01"))
            .unwrap_err();
        assert_eq!(err, LedgerError::NotFound(SaleId::new(1)));
        assert_eq!(before, ledger);
    }

    #[test]
    fn test_update_sale_invalid_input_leaves_record() {
        let mut ledger = example_ledger();
        let before = ledger.clone();
        let id = ledger.sales()[1].id();
        let err = ledger.update_sale(id, sale("  ", 1, 1, "2024-01-01")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(before, ledger);
    }

    #[test]
    fn test_delete_sale() {
        let mut ledger = example_ledger();
        let keep = ledger.sales()[0].clone();
        let target = ledger.sales()[1].id();

        let deleted = ledger.delete_sale(target).unwrap();
        assert_eq!(deleted.id(), target);
        assert_eq!(ledger.sales(), &[keep]);

        let err = ledger.delete_sale(target).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_dashboard_summary_example() {
        let ledger = example_ledger();
        let summary = ledger.dashboard_summary(date("2024-01-05"));
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_revenue, amount("460.00"));
        assert_eq!(summary.today_revenue, amount("460.00"));
        assert_eq!(summary.average_sale, amount("230.00"));

        let other_day = ledger.dashboard_summary(date("2024-01-06"));
        assert_eq!(other_day.today_revenue, Amount::ZERO);
    }

    #[test]
    fn test_dashboard_summary_empty() {
        let summary = Ledger::new().dashboard_summary(date("2024-01-05"));
        assert_eq!(summary.count, 0);
        assert_eq!(summary.total_revenue, Amount::ZERO);
        assert_eq!(summary.average_sale, Amount::ZERO);
        assert!(summary.recent_sales.is_empty());
    }

    #[test]
    fn test_recent_sales_follow_insertion_not_date() {
        let mut ledger = Ledger::new();
        let days = [
            "2024-03-01",
            "2024-01-01",
            "2024-05-01",
            "2024-02-01",
            "2024-04-01",
            "2023-12-01",
        ];
        for (ix, day) in days.iter().enumerate() {
            ledger.add_sale(sale(&format!("p{ix}"), 10, 1, day)).unwrap();
        }
        let summary = ledger.dashboard_summary(date("2024-01-01"));
        let products: Vec<&str> = summary.recent_sales.iter().map(|s| s.product()).collect();
        assert_eq!(products, vec!["p5", "p4", "p3", "p2", "p1"]);
    }

    #[test]
    fn test_total_revenue_matches_unfiltered_listing() {
        let mut ledger = example_ledger();
        ledger.add_sale(sale("cap", 45, 4, "2023-11-30")).unwrap();
        let listed: Amount = ledger
            .list_sales(&SaleFilter::new())
            .iter()
            .map(|s| s.total())
            .sum();
        assert_eq!(ledger.dashboard_summary(date("2024-01-01")).total_revenue, listed);
    }

    #[test]
    fn test_list_sales_sorted_newest_first() {
        let mut ledger = Ledger::new();
        ledger.add_sale(sale("b", 1, 1, "2024-02-10")).unwrap();
        ledger.add_sale(sale("a", 1, 1, "2024-01-05")).unwrap();
        ledger.add_sale(sale("c", 1, 1, "2024-03-01")).unwrap();
        let dates: Vec<String> = ledger
            .list_sales(&SaleFilter::new())
            .iter()
            .map(|s| s.date().to_string())
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-10", "2024-01-05"]);
    }

    #[test]
    fn test_list_sales_search_is_case_insensitive() {
        let mut ledger = Ledger::new();
        ledger
            .add_sale(sale("Printed Tee", 1, 1, "2024-01-01").with_client("Ravi"))
            .unwrap();
        ledger
            .add_sale(SaleInput::new("mug", 1, date("2024-01-02"), "Card", "home"))
            .unwrap();
        ledger.add_sale(sale("cap", 1, 1, "2024-01-03")).unwrap();

        let by_product = ledger.list_sales(&SaleFilter::new().search("PRINTED"));
        assert_eq!(by_product.len(), 1);
        let by_client = ledger.list_sales(&SaleFilter::new().search("rav"));
        assert_eq!(by_client[0].product(), "Printed Tee");
        let by_payment = ledger.list_sales(&SaleFilter::new().search("card"));
        assert_eq!(by_payment[0].product(), "mug");
        let empty_search = ledger.list_sales(&SaleFilter::new().search(""));
        assert_eq!(empty_search.len(), 3);
    }

    #[test]
    fn test_list_sales_category_and_dates() {
        let mut ledger = Ledger::new();
        ledger
            .add_sale(SaleInput::new("a", 1, date("2024-01-01"), "cash", "shirts"))
            .unwrap();
        ledger
            .add_sale(SaleInput::new("b", 1, date("2024-01-15"), "cash", "shirts"))
            .unwrap();
        ledger
            .add_sale(SaleInput::new("c", 1, date("2024-02-01"), "cash", "dresses"))
            .unwrap();

        let shirts = ledger.list_sales(&SaleFilter::new().category("shirts"));
        assert_eq!(shirts.len(), 2);
        assert!(ledger
            .list_sales(&SaleFilter::new().category("snacks"))
            .is_empty());
        assert!(ledger
            .list_sales(&SaleFilter::new().category("Shirts"))
            .is_empty());

        let range = SaleFilter::new()
            .from_date(date("2024-01-15"))
            .to_date(date("2024-02-01"));
        let products: Vec<&str> = ledger
            .list_sales(&range)
            .iter()
            .map(|s| s.product())
            .collect();
        assert_eq!(products, vec!["c", "b"]);
    }

    #[test]
    fn test_aggregate_by_month_example() {
        let mut ledger = Ledger::new();
        ledger.add_sale(sale("a", 100, 1, "2024-01-05")).unwrap();
        ledger.add_sale(sale("b", 50, 1, "2024-02-10")).unwrap();
        let months = ledger.aggregate_by_month();
        let expected: Buckets = [
            ("2024-01".to_string(), amount("100")),
            ("2024-02".to_string(), amount("50")),
        ]
        .into_iter()
        .collect();
        assert_eq!(months, expected);
    }

    #[test]
    fn test_aggregate_by_payment_and_category() {
        let mut ledger = Ledger::new();
        ledger
            .add_sale(SaleInput::new("a", 10, date("2024-01-01"), "cash", "shirts").with_quantity(2))
            .unwrap();
        ledger
            .add_sale(SaleInput::new("b", 5, date("2024-01-02"), "card", "shirts"))
            .unwrap();
        ledger
            .add_sale(SaleInput::new("c", 7, date("2024-01-03"), "cash", "caps"))
            .unwrap();

        let payments = ledger.aggregate_by_payment();
        assert_eq!(payments["cash"], amount("27"));
        assert_eq!(payments["card"], amount("5"));

        let categories = ledger.aggregate_by_category();
        assert_eq!(categories["shirts"], amount("25"));
        assert_eq!(categories["caps"], amount("7"));

        let counts = ledger.count_by_payment();
        assert_eq!(counts["cash"], 2);
        assert_eq!(counts["card"], 1);
    }

    #[test]
    fn test_aggregate_by_day_keeps_latest_dates() {
        let mut ledger = Ledger::new();
        for day in 1..=5 {
            let d = format!("2024-01-{day:02}");
            ledger.add_sale(sale("x", day, 1, &d)).unwrap();
        }
        ledger.add_sale(sale("y", 10, 1, "2024-01-05")).unwrap();

        let days = ledger.aggregate_by_day(3);
        let keys: Vec<&str> = days.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["2024-01-03", "2024-01-04", "2024-01-05"]);
        assert_eq!(days["2024-01-05"], amount("15"));

        assert_eq!(ledger.aggregate_by_day(DEFAULT_DAY_WINDOW).len(), 5);
        assert!(ledger.aggregate_by_day(0).is_empty());
    }

    #[test]
    fn test_aggregates_on_empty_ledger() {
        let ledger = Ledger::new();
        assert!(ledger.aggregate_by_month().is_empty());
        assert!(ledger.aggregate_by_payment().is_empty());
        assert!(ledger.aggregate_by_category().is_empty());
        assert!(ledger.aggregate_by_day(DEFAULT_DAY_WINDOW).is_empty());
        assert!(ledger.count_by_payment().is_empty());
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut ledger = example_ledger();
        ledger
            .add_sale(
                sale("cap", 45, 1, "2023-12-31")
                    .with_client("Meera")
                    .with_notes("paid later"),
            )
            .unwrap();
        let text = ledger.serialize().unwrap();
        let back = Ledger::try_deserialize(&text).unwrap();
        assert_eq!(ledger, back);
        assert_eq!(Ledger::deserialize(Some(&text)), ledger);
    }

    #[test]
    fn test_deserialize_recovers_from_bad_input() {
        assert!(Ledger::deserialize(None).is_empty());
        assert!(Ledger::deserialize(Some("")).is_empty());
        assert!(Ledger::deserialize(Some("{not json")).is_empty());
        assert!(Ledger::deserialize(Some("{\"a\": 1}")).is_empty());

        let err = Ledger::try_deserialize("[{\"id\": 1}]").unwrap_err();
        assert!(matches!(err, LedgerError::PersistenceFormat(_)));
    }

    #[test]
    fn test_deserialize_accepts_numeric_amounts() {
        let text = r#"[
            {
                "id": 1704448800000,
                "product": "printed",
                "unit_amount": 170,
                "quantity": 2,
                "date": "2024-01-05",
                "payment": "cash",
                "category": "shirts",
                "created_at": "2024-01-05T10:00:00Z"
            }
        ]"#;
        let ledger = Ledger::deserialize(Some(text));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.sales()[0].total(), amount("340"));
    }

    #[test]
    fn test_deserialize_rejects_invalid_records() {
        let record = |id: u64, product: &str, unit: &str, quantity: u32| {
            format!(
                r#"{{"id": {id}, "product": "{product}", "unit_amount": "{unit}",
                "quantity": {quantity}, "date": "2024-01-05", "payment": "cash",
                "category": "shirts", "created_at": "2024-01-05T10:00:00Z"}}"#
            )
        };
        let good = record(1, "printed", "170", 1);
        let cases = [
            format!("[{good}, {}]", record(1, "girly", "120", 1)),
            format!("[{good}, {}]", record(2, "", "120", 1)),
            format!("[{good}, {}]", record(2, "girly", "-5", 1)),
            format!("[{good}, {}]", record(2, "girly", "120", 0)),
        ];
        for text in &cases {
            let err = Ledger::try_deserialize(text).unwrap_err();
            assert!(matches!(err, LedgerError::PersistenceFormat(_)), "{text}");
            assert!(Ledger::deserialize(Some(text)).is_empty());
        }

        let text = format!("[{good}, {}]", record(2, "girly", "120", 1));
        assert_eq!(Ledger::try_deserialize(&text).unwrap().len(), 2);
    }
}
