//! Debts, outgoings and income the repayment simulation runs over.

use crate::errors::{AppError, ResultExt};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::path::Path;

pub const EXPIRY_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub company: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub minimum_payment: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_owed: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_apr: f64,
    /// Promotional rate expiry; `None` when the rate never changes.
    #[serde(
        default,
        deserialize_with = "lenient_date",
        serialize_with = "format_date"
    )]
    pub expires: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub new_apr_on_expiry: f64,
}

impl Debt {
    pub fn new(
        company: &str,
        minimum_payment: f64,
        total_owed: f64,
        current_apr: f64,
        expires: Option<NaiveDate>,
        new_apr_on_expiry: f64,
    ) -> Self {
        Self {
            company: company.to_string(),
            minimum_payment,
            total_owed,
            current_apr,
            expires,
            new_apr_on_expiry,
        }
    }

    /// APR in effect on `date`.
    pub fn apr_on(&self, date: NaiveDate) -> f64 {
        match self.expires {
            Some(expiry) if date >= expiry => self.new_apr_on_expiry,
            _ => self.current_apr,
        }
    }
}

/// A non-debt monthly expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outgoing {
    pub expense: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub source: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub outgoings: Vec<Outgoing>,
    #[serde(default)]
    pub income: Vec<Income>,
}

impl Portfolio {
    /// The example household used when no portfolio file is configured.
    pub fn sample() -> Self {
        let promo_expiry = NaiveDate::from_ymd_opt(2024, 12, 31);

        Self {
            debts: vec![
                Debt::new("Credit Card A", 50.0, 5000.0, 18.99, None, 18.99),
                Debt::new("Credit Card B", 75.0, 7500.0, 15.99, promo_expiry, 21.99),
                Debt::new("Personal Loan", 200.0, 10000.0, 8.5, None, 8.5),
                Debt::new("Store Card", 25.0, 1500.0, 24.99, None, 24.99),
            ],
            outgoings: [
                ("Rent", 1200.0),
                ("Utilities", 200.0),
                ("Groceries", 400.0),
                ("Transportation", 150.0),
                ("Insurance", 100.0),
            ]
            .into_iter()
            .map(|(expense, amount)| Outgoing {
                expense: expense.to_string(),
                amount,
            })
            .collect(),
            income: [("Primary Job", 3500.0), ("Side Hustle", 500.0)]
                .into_iter()
                .map(|(source, amount)| Income {
                    source: source.to_string(),
                    amount,
                })
                .collect(),
        }
    }

    /// Loads a portfolio from a JSON file.
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Reading portfolio {}", path.display()))?;

        serde_json::from_str(&content).map_err(|e| {
            AppError::InternalError(format!(
                "Portfolio {} is not valid: {}",
                path.display(),
                e
            ))
        })
    }

    /// Loads from `path` when given, otherwise returns the sample portfolio.
    pub async fn load_or_sample(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::load(path).await,
            None => Ok(Self::sample()),
        }
    }

    pub fn total_income(&self) -> f64 {
        self.income.iter().map(|i| i.amount).sum()
    }

    pub fn total_outgoings(&self) -> f64 {
        self.outgoings.iter().map(|o| o.amount).sum()
    }

    /// Money left each month for debt repayment, never negative.
    pub fn available_funds(&self) -> f64 {
        (self.total_income() - self.total_outgoings()).max(0.0)
    }
}

/// Accepts a number or a numeric string; anything else counts as zero.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    })
}

/// `MM/DD/YYYY`; "NA", null or an unparsable date mean no expiry.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), EXPIRY_DATE_FORMAT).ok(),
        _ => None,
    })
}

fn format_date<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&date.format(EXPIRY_DATE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sample_available_funds() {
        let portfolio = Portfolio::sample();
        assert_eq!(portfolio.total_income(), 4000.0);
        assert_eq!(portfolio.total_outgoings(), 2050.0);
        assert_eq!(portfolio.available_funds(), 1950.0);
        assert_eq!(portfolio.debts.len(), 4);
    }

    #[test]
    fn test_available_funds_never_negative() {
        let mut portfolio = Portfolio::sample();
        portfolio.income.clear();
        assert_eq!(portfolio.available_funds(), 0.0);
    }

    #[test]
    fn test_lenient_fields() {
        let portfolio: Portfolio = serde_json::from_value(json!({
            "debts": [
                {
                    "company": "Card",
                    "minimum_payment": "40",
                    "total_owed": 1000,
                    "current_apr": "not a number",
                    "expires": "NA",
                    "new_apr_on_expiry": null
                },
                {
                    "company": "Promo",
                    "minimum_payment": 10,
                    "total_owed": 500,
                    "current_apr": 0,
                    "expires": "06/30/2025",
                    "new_apr_on_expiry": 19.9
                }
            ],
            "income": [{ "source": "Job", "amount": "2500.50" }]
        }))
        .unwrap();

        let card = &portfolio.debts[0];
        assert_eq!(card.minimum_payment, 40.0);
        assert_eq!(card.current_apr, 0.0);
        assert_eq!(card.new_apr_on_expiry, 0.0);
        assert_eq!(card.expires, None);

        let promo = &portfolio.debts[1];
        assert_eq!(promo.expires, NaiveDate::from_ymd_opt(2025, 6, 30));
        assert!(portfolio.outgoings.is_empty());
        assert_eq!(portfolio.total_income(), 2500.5);
    }

    #[test]
    fn test_apr_switches_on_expiry_day() {
        let debt = Debt::new("Promo", 10.0, 500.0, 0.0, NaiveDate::from_ymd_opt(2025, 6, 30), 19.9);
        assert_eq!(debt.apr_on(NaiveDate::from_ymd_opt(2025, 6, 29).unwrap()), 0.0);
        assert_eq!(debt.apr_on(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()), 19.9);
    }

    #[test]
    fn test_expiry_serializes_in_input_format() {
        let portfolio = Portfolio::sample();
        let value = serde_json::to_value(&portfolio.debts[1]).unwrap();
        assert_eq!(value["expires"], "12/31/2024");

        let back: Debt = serde_json::from_value(value).unwrap();
        assert_eq!(back, portfolio.debts[1]);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let result = Portfolio::load(Path::new("/nonexistent/portfolio.json")).await;
        assert!(result.is_err());
    }
}
