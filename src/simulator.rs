//! Month-by-month debt repayment simulation.
//!
//! Each month interest is added to every open balance, minimum payments are
//! made in priority order, and whatever money is left goes to the debt at the
//! head of the order. The run ends once everything is repaid, when the total
//! balance starts growing, or at the month cap.

use crate::portfolio::{Debt, Portfolio};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MAX_MONTHS: u32 = 1000;

/// Balances at or below this are treated as repaid.
pub const PAID_OFF_THRESHOLD: f64 = 0.01;

const DAYS_PER_MONTH: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepaymentMethod {
    /// Highest listed APR first, smaller balance breaking ties.
    #[default]
    Avalanche,
    /// Lowest listed APR first, smaller balance breaking ties.
    Snowball,
}

impl RepaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentMethod::Avalanche => "avalanche",
            RepaymentMethod::Snowball => "snowball",
        }
    }

    /// Orders debts so the one receiving extra money comes first.
    ///
    /// Ranks on the listed `current_apr`, even after a promotional rate has
    /// expired and interest is charged at `new_apr_on_expiry`.
    fn prioritize(&self, debts: &mut [Debt]) {
        let by_balance = |a: &Debt, b: &Debt| a.total_owed.total_cmp(&b.total_owed);

        match self {
            RepaymentMethod::Avalanche => debts.sort_by(|a, b| {
                b.current_apr
                    .total_cmp(&a.current_apr)
                    .then_with(|| by_balance(a, b))
            }),
            RepaymentMethod::Snowball => debts.sort_by(|a, b| {
                a.current_apr
                    .total_cmp(&b.current_apr)
                    .then_with(|| by_balance(a, b))
            }),
        }
    }
}

impl fmt::Display for RepaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(RepaymentMethod::Avalanche),
            "snowball" => Ok(RepaymentMethod::Snowball),
            other => Err(format!(
                "unknown repayment method '{}', expected 'avalanche' or 'snowball'",
                other
            )),
        }
    }
}

/// Totals at the end of one simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub month: u32,
    pub remaining_debt: f64,
    /// Cumulative interest charged so far.
    pub total_interest: f64,
    /// Cumulative amount paid so far.
    pub total_principal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetail {
    pub month: u32,
    pub company: String,
    pub payment: f64,
    pub extra_payment: f64,
    pub remaining_debt: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Simulation {
    pub schedule: Vec<ScheduleEntry>,
    pub payments: Vec<PaymentDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    pub method: RepaymentMethod,
    pub total_months: usize,
    pub total_interest_paid: f64,
    pub total_amount_paid: f64,
}

pub struct DebtSimulator {
    portfolio: Portfolio,
    start_date: NaiveDate,
}

impl DebtSimulator {
    /// Creates a simulator whose first month starts today.
    pub fn new(portfolio: Portfolio) -> Self {
        Self::with_start_date(portfolio, chrono::Local::now().date_naive())
    }

    pub fn with_start_date(portfolio: Portfolio, start_date: NaiveDate) -> Self {
        Self {
            portfolio,
            start_date,
        }
    }

    /// Runs the repayment simulation. The portfolio itself is left untouched,
    /// so repeated runs start from the same balances.
    pub fn run_simulation(&self, method: RepaymentMethod, max_months: u32) -> Simulation {
        let mut debts = self.portfolio.debts.clone();
        let available_funds = self.portfolio.available_funds();

        let mut simulation = Simulation::default();
        let mut total_interest = 0.0;
        let mut total_principal = 0.0;
        let mut previous_debt: f64 = debts.iter().map(|d| d.total_owed).sum();

        for month in 1..=max_months {
            let current_date =
                self.start_date + Duration::days(DAYS_PER_MONTH * i64::from(month));

            total_interest += apply_interest(&mut debts, current_date);

            method.prioritize(&mut debts);
            let remaining_funds =
                distribute_payments(&mut debts, available_funds, month, &mut simulation.payments);
            debts.retain(|d| d.total_owed > PAID_OFF_THRESHOLD);

            total_principal += available_funds - remaining_funds;
            let current_debt: f64 = debts.iter().map(|d| d.total_owed).sum();

            simulation.schedule.push(ScheduleEntry {
                month,
                remaining_debt: current_debt,
                total_interest,
                total_principal,
            });

            if current_debt <= 0.0 {
                tracing::debug!("{} repayment finished after {} months", method, month);
                break;
            }
            if current_debt > previous_debt && month > 1 {
                tracing::warn!(
                    "{} repayment stopped at month {}: balance is growing ({:.2} > {:.2})",
                    method,
                    month,
                    current_debt,
                    previous_debt
                );
                break;
            }
            previous_debt = current_debt;
        }

        simulation
    }
}

/// Adds one month of interest to each balance and returns the total charged.
fn apply_interest(debts: &mut [Debt], on: NaiveDate) -> f64 {
    debts
        .iter_mut()
        .map(|debt| {
            let interest = debt.total_owed * debt.apr_on(on) / 1200.0;
            debt.total_owed += interest;
            interest
        })
        .sum()
}

/// Pays minimums in order, then puts the remainder on the first debt.
/// Only debts still open after paying are recorded. Returns the funds left
/// unspent.
fn distribute_payments(
    debts: &mut [Debt],
    available_funds: f64,
    month: u32,
    payments: &mut Vec<PaymentDetail>,
) -> f64 {
    let mut remaining = available_funds;
    let mut paid = vec![0.0; debts.len()];
    let mut extra = vec![0.0; debts.len()];

    for (i, debt) in debts.iter().enumerate() {
        let payment = debt
            .minimum_payment
            .min(debt.total_owed)
            .min(remaining)
            .max(0.0);
        paid[i] = payment;
        remaining -= payment;
    }

    if let Some(first) = debts.first() {
        if remaining > 0.0 {
            let top_up = remaining.min(first.total_owed - paid[0]).max(0.0);
            paid[0] += top_up;
            extra[0] = top_up;
            remaining -= top_up;
        }
    }

    for (i, debt) in debts.iter_mut().enumerate() {
        debt.total_owed -= paid[i];
        if debt.total_owed <= PAID_OFF_THRESHOLD {
            continue;
        }
        payments.push(PaymentDetail {
            month,
            company: debt.company.clone(),
            payment: paid[i],
            extra_payment: extra[i],
            remaining_debt: debt.total_owed,
        });
    }

    remaining
}

/// Summarizes a finished schedule; `None` when nothing was simulated.
pub fn generate_summary(
    schedule: &[ScheduleEntry],
    method: RepaymentMethod,
) -> Option<DebtSummary> {
    let final_month = schedule.last()?;
    Some(DebtSummary {
        method,
        total_months: schedule.len(),
        total_interest_paid: final_month.total_interest,
        total_amount_paid: final_month.total_interest + final_month.total_principal,
    })
}
