//! Aggregate client statistics and revenue reporting
//!
//! A [`ReportContext`] is built for a single report over a trainer's clients
//! and dropped afterwards. Nothing is cached between reports.

use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::billing::{latest_payment, OverduePolicy};
use crate::models::ClientSnapshot;

/// Number of overdue clients shown on the dashboard
pub const DEFAULT_OVERDUE_ROSTER_LIMIT: usize = 10;

/// Client counts by billing standing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientStatistics {
    pub total: usize,
    pub current: usize,
    pub overdue: usize,
}

/// Client list filter by billing standing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientFilter {
    #[default]
    All,
    Current,
    Overdue,
}

impl ClientFilter {
    /// Parse a filter from a query value; unknown or empty values mean `All`
    pub fn parse_lenient(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for ClientFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(ClientFilter::All),
            "current" => Ok(ClientFilter::Current),
            "overdue" => Ok(ClientFilter::Overdue),
            _ => Err(()),
        }
    }
}

/// One overdue client on the dashboard roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueEntry {
    pub client_id: Uuid,
    pub name: String,
    pub last_payment_date: Option<NaiveDate>,
    pub days_overdue: i64,
}

/// Granularity of a revenue series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenuePeriod {
    Daily,
    Monthly,
}

/// Revenue collected in one bucket of a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total: Decimal,
}

/// Revenue broken down into consecutive buckets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSeries {
    pub period: RevenuePeriod,
    pub points: Vec<RevenuePoint>,
    pub total: Decimal,
}

/// Everything shown on the trainer's home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub as_of: NaiveDate,
    pub statistics: ClientStatistics,
    pub month_revenue: Decimal,
    pub year_revenue: Decimal,
    pub chart: RevenueSeries,
    pub overdue_roster: Vec<OverdueEntry>,
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn last_of_month(first: NaiveDate) -> Option<NaiveDate> {
    first.checked_add_months(Months::new(1))?.pred_opt()
}

/// Short-lived context for one report over a set of clients
pub struct ReportContext<'a> {
    today: NaiveDate,
    policy: OverduePolicy,
    clients: &'a [ClientSnapshot],
}

impl<'a> ReportContext<'a> {
    pub fn new(today: NaiveDate, policy: OverduePolicy, clients: &'a [ClientSnapshot]) -> Self {
        Self {
            today,
            policy,
            clients,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn is_overdue(&self, client: &ClientSnapshot) -> bool {
        self.policy.is_overdue(&client.payments, self.today)
    }

    /// Count clients by standing
    ///
    /// `total` includes clients that never paid; they count as current. Counts
    /// restricted to paying clients can be derived from the snapshots.
    pub fn statistics(&self) -> ClientStatistics {
        let total = self.clients.len();
        let overdue = self.clients.iter().filter(|c| self.is_overdue(c)).count();
        ClientStatistics {
            total,
            current: total - overdue,
            overdue,
        }
    }

    /// Clients matching `filter`, in input order
    pub fn filter(&self, filter: ClientFilter) -> Vec<&'a ClientSnapshot> {
        self.clients
            .iter()
            .filter(|c| match filter {
                ClientFilter::All => true,
                ClientFilter::Current => !self.is_overdue(c),
                ClientFilter::Overdue => self.is_overdue(c),
            })
            .collect()
    }

    /// Overdue clients, longest overdue first, at most `limit` entries
    pub fn overdue_roster(&self, limit: usize) -> Vec<OverdueEntry> {
        let mut entries: Vec<OverdueEntry> = self
            .clients
            .iter()
            .filter(|c| self.is_overdue(c))
            .map(|c| OverdueEntry {
                client_id: c.id,
                name: c.name.clone(),
                last_payment_date: latest_payment(&c.payments).map(|p| p.payment_date),
                days_overdue: self.policy.days_overdue(&c.payments, self.today),
            })
            .collect();

        entries.sort_by(|a, b| {
            b.days_overdue
                .cmp(&a.days_overdue)
                .then_with(|| a.name.cmp(&b.name))
        });
        entries.truncate(limit);
        entries
    }

    /// Sum of payments dated within `start..=end`
    pub fn revenue_between(&self, start: NaiveDate, end: NaiveDate) -> Decimal {
        self.clients
            .iter()
            .flat_map(|c| c.payments.iter())
            .filter(|p| p.payment_date >= start && p.payment_date <= end)
            .map(|p| p.value)
            .sum()
    }

    fn series(&self, period: RevenuePeriod, buckets: Vec<(String, NaiveDate, NaiveDate)>) -> RevenueSeries {
        let points: Vec<RevenuePoint> = buckets
            .into_iter()
            .map(|(label, start, end)| RevenuePoint {
                total: self.revenue_between(start, end),
                label,
                start,
                end,
            })
            .collect();
        let total = points.iter().map(|p| p.total).sum();
        RevenueSeries {
            period,
            points,
            total,
        }
    }

    fn month_bucket(first: NaiveDate) -> Option<(String, NaiveDate, NaiveDate)> {
        let last = last_of_month(first)?;
        Some((first.format("%b/%y").to_string(), first, last))
    }

    /// Revenue per calendar month of `year`
    pub fn monthly_revenue(&self, year: i32) -> RevenueSeries {
        let buckets = (1..=12)
            .filter_map(|m| first_of_month(year, m))
            .filter_map(Self::month_bucket)
            .collect();
        self.series(RevenuePeriod::Monthly, buckets)
    }

    /// Revenue per day of the given month, `None` for an invalid month
    pub fn daily_revenue(&self, year: i32, month: u32) -> Option<RevenueSeries> {
        let first = first_of_month(year, month)?;
        let last = last_of_month(first)?;
        let buckets = first
            .iter_days()
            .take_while(|d| *d <= last)
            .map(|d| (d.format("%d/%m").to_string(), d, d))
            .collect();
        Some(self.series(RevenuePeriod::Daily, buckets))
    }

    /// Revenue per month for the twelve months ending with the current one
    pub fn trailing_twelve_months(&self) -> RevenueSeries {
        let this_month = first_of_month(self.today.year(), self.today.month());
        let buckets = (0..12u32)
            .rev()
            .filter_map(|ago| this_month?.checked_sub_months(Months::new(ago)))
            .filter_map(Self::month_bucket)
            .collect();
        self.series(RevenuePeriod::Monthly, buckets)
    }

    fn current_month_revenue(&self) -> Decimal {
        first_of_month(self.today.year(), self.today.month())
            .and_then(|first| Some((first, last_of_month(first)?)))
            .map(|(start, end)| self.revenue_between(start, end))
            .unwrap_or_default()
    }

    fn current_year_revenue(&self) -> Decimal {
        match (
            NaiveDate::from_ymd_opt(self.today.year(), 1, 1),
            NaiveDate::from_ymd_opt(self.today.year(), 12, 31),
        ) {
            (Some(start), Some(end)) => self.revenue_between(start, end),
            _ => Decimal::ZERO,
        }
    }

    /// Build the full dashboard
    pub fn dashboard(&self, roster_limit: usize) -> DashboardReport {
        DashboardReport {
            as_of: self.today,
            statistics: self.statistics(),
            month_revenue: self.current_month_revenue(),
            year_revenue: self.current_year_revenue(),
            chart: self.trailing_twelve_months(),
            overdue_roster: self.overdue_roster(roster_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Payment};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn client(name: &str, payments: &[(NaiveDate, Decimal)]) -> ClientSnapshot {
        let mut snapshot = ClientSnapshot::new(Uuid::new_v4(), name, Gender::Female);
        snapshot.payments = payments.iter().map(|(d, v)| Payment::new(*d, *v)).collect();
        snapshot
    }

    fn today() -> NaiveDate {
        date(2024, 6, 10)
    }

    fn sample_clients() -> Vec<ClientSnapshot> {
        vec![
            client("Current", &[(today(), dec!(100))]),
            client("Overdue Week", &[(date(2024, 6, 3), dec!(100))]),
            client("Future", &[(date(2024, 6, 17), dec!(90))]),
            client("No Payments", &[]),
            client(
                "Overdue Long",
                &[(date(2023, 12, 20), dec!(80)), (date(2024, 4, 10), dec!(80))],
            ),
        ]
    }

    #[test]
    fn test_statistics_empty() {
        let ctx = ReportContext::new(today(), OverduePolicy::Strict, &[]);
        assert_eq!(ctx.statistics(), ClientStatistics::default());
    }

    #[test]
    fn test_statistics_mixed_clients() {
        let clients = sample_clients();
        let ctx = ReportContext::new(today(), OverduePolicy::Strict, &clients);
        assert_eq!(
            ctx.statistics(),
            ClientStatistics {
                total: 5,
                current: 3,
                overdue: 2
            }
        );
    }

    #[test]
    fn test_statistics_total_includes_clients_never_paid() {
        let clients = vec![client("Paid", &[(today(), dec!(100))]), client("Never", &[])];
        let ctx = ReportContext::new(today(), OverduePolicy::Strict, &clients);
        let stats = ctx.statistics();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.current, 2);
        assert_eq!(stats.overdue, 0);
    }

    #[test]
    fn test_grace_due_date_is_current_on_dashboard() {
        let clients = vec![client("Due", &[(date(2024, 5, 10), dec!(100))])];
        let ctx = ReportContext::new(today(), OverduePolicy::MonthlyGrace, &clients);
        assert_eq!(ctx.statistics().overdue, 0);
        assert!(ctx.overdue_roster(10).is_empty());

        let next_day = ReportContext::new(date(2024, 6, 11), OverduePolicy::MonthlyGrace, &clients);
        assert_eq!(next_day.overdue_roster(10)[0].days_overdue, 1);
    }

    #[test]
    fn test_statistics_with_grace_policy() {
        let clients = sample_clients();
        let ctx = ReportContext::new(today(), OverduePolicy::MonthlyGrace, &clients);
        let stats = ctx.statistics();
        // only the April payment is more than a month old
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.current, 4);
    }

    #[test]
    fn test_filter_by_standing() {
        let clients = sample_clients();
        let ctx = ReportContext::new(today(), OverduePolicy::Strict, &clients);

        let names = |filter| -> Vec<String> {
            ctx.filter(filter).iter().map(|c| c.name.clone()).collect()
        };
        assert_eq!(names(ClientFilter::All).len(), 5);
        assert_eq!(names(ClientFilter::Overdue), vec!["Overdue Week", "Overdue Long"]);
        assert_eq!(names(ClientFilter::Current), vec!["Current", "Future", "No Payments"]);
    }

    #[test]
    fn test_filter_parsing_is_lenient() {
        assert_eq!(ClientFilter::parse_lenient(Some("overdue")), ClientFilter::Overdue);
        assert_eq!(ClientFilter::parse_lenient(Some("Current")), ClientFilter::Current);
        assert_eq!(ClientFilter::parse_lenient(Some("")), ClientFilter::All);
        assert_eq!(ClientFilter::parse_lenient(Some("bogus")), ClientFilter::All);
        assert_eq!(ClientFilter::parse_lenient(None), ClientFilter::All);
    }

    #[test]
    fn test_overdue_roster_ordering_and_limit() {
        let clients = sample_clients();
        let ctx = ReportContext::new(today(), OverduePolicy::Strict, &clients);

        let roster = ctx.overdue_roster(10);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "Overdue Long");
        assert_eq!(roster[0].days_overdue, 61);
        assert_eq!(roster[0].last_payment_date, Some(date(2024, 4, 10)));
        assert_eq!(roster[1].name, "Overdue Week");

        assert_eq!(ctx.overdue_roster(1).len(), 1);
    }

    #[test]
    fn test_revenue_between_is_inclusive() {
        let clients = sample_clients();
        let ctx = ReportContext::new(today(), OverduePolicy::Strict, &clients);
        assert_eq!(ctx.revenue_between(date(2024, 6, 3), date(2024, 6, 10)), dec!(200));
        assert_eq!(ctx.revenue_between(date(2024, 6, 1), date(2024, 6, 30)), dec!(290));
    }

    #[test]
    fn test_monthly_revenue_series() {
        let clients = sample_clients();
        let ctx = ReportContext::new(today(), OverduePolicy::Strict, &clients);
        let series = ctx.monthly_revenue(2024);

        assert_eq!(series.period, RevenuePeriod::Monthly);
        assert_eq!(series.points.len(), 12);
        assert_eq!(series.points[0].label, "Jan/24");
        assert_eq!(series.points[3].total, dec!(80));
        assert_eq!(series.points[5].total, dec!(290));
        assert_eq!(series.total, dec!(370));
    }

    #[test]
    fn test_daily_revenue_series() {
        let clients = sample_clients();
        let ctx = ReportContext::new(today(), OverduePolicy::Strict, &clients);

        let series = ctx.daily_revenue(2024, 2).unwrap();
        assert_eq!(series.period, RevenuePeriod::Daily);
        assert_eq!(series.points.len(), 29);
        assert_eq!(series.total, Decimal::ZERO);

        let june = ctx.daily_revenue(2024, 6).unwrap();
        assert_eq!(june.points.len(), 30);
        assert_eq!(june.points[9].label, "10/06");
        assert_eq!(june.points[9].total, dec!(100));

        assert!(ctx.daily_revenue(2024, 13).is_none());
    }

    #[test]
    fn test_trailing_twelve_months_spans_year_boundary() {
        let clients = sample_clients();
        let ctx = ReportContext::new(today(), OverduePolicy::Strict, &clients);
        let chart = ctx.trailing_twelve_months();

        assert_eq!(chart.points.len(), 12);
        assert_eq!(chart.points[0].label, "Jul/23");
        assert_eq!(chart.points[11].label, "Jun/24");
        assert_eq!(chart.points[5].label, "Dec/23");
        assert_eq!(chart.points[5].total, dec!(80));
        assert_eq!(chart.total, dec!(450));
    }

    #[test]
    fn test_dashboard() {
        let clients = sample_clients();
        let ctx = ReportContext::new(today(), OverduePolicy::Strict, &clients);
        let report = ctx.dashboard(DEFAULT_OVERDUE_ROSTER_LIMIT);

        assert_eq!(report.as_of, today());
        assert_eq!(report.statistics.total, 5);
        assert_eq!(report.month_revenue, dec!(290));
        assert_eq!(report.year_revenue, dec!(370));
        assert_eq!(report.overdue_roster.len(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Property: current and overdue always add up to the total
        #[test]
        fn prop_statistics_partition(offsets in prop::collection::vec(prop::option::of(-90i64..30), 0..20)) {
            let clients: Vec<ClientSnapshot> = offsets
                .iter()
                .map(|o| match o {
                    Some(days) => client("c", &[(today() + chrono::Duration::days(*days), dec!(50))]),
                    None => client("c", &[]),
                })
                .collect();
            let ctx = ReportContext::new(today(), OverduePolicy::Strict, &clients);
            let stats = ctx.statistics();
            prop_assert_eq!(stats.current + stats.overdue, stats.total);
            prop_assert_eq!(ctx.filter(ClientFilter::Overdue).len(), stats.overdue);
        }

        /// Property: a series total equals the sum of its points
        #[test]
        fn prop_series_total_matches_points(offsets in prop::collection::vec(0i64..365, 0..30)) {
            let clients: Vec<ClientSnapshot> = offsets
                .iter()
                .map(|o| client("c", &[(date(2024, 1, 1) + chrono::Duration::days(*o), dec!(75.50))]))
                .collect();
            let ctx = ReportContext::new(today(), OverduePolicy::Strict, &clients);
            let series = ctx.monthly_revenue(2024);
            let sum: Decimal = series.points.iter().map(|p| p.total).sum();
            prop_assert_eq!(series.total, sum);
            prop_assert_eq!(series.total, dec!(75.50) * Decimal::from(offsets.len()));
        }
    }
}
