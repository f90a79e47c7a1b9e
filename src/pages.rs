//! Page rendering.
//!
//! Each render fetches its data fresh from the debt API and interpolates the
//! values as escaped text into a small markup fragment. Nothing is cached
//! between renders.

use crate::api_client::DebtApiClient;
use crate::errors::AppError;
use crate::models::{DebtSummaryResponse, HelloResponse};
use serde_json::Number;

/// Rounds to the nearest whole number, with halves going toward positive
/// infinity (`2.5 -> 3`, `-2.5 -> -2`).
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    // Never render "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Escapes text for use inside an HTML element or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Formats the amount paid the way the summary paragraph shows it.
pub fn format_amount(total_amount_paid: f64) -> String {
    format!("{:.0}", round_half_up(total_amount_paid))
}

/// Formats the month count the way a browser prints a JSON number: integral
/// floats lose their fraction (`18.0 -> 18`, `1e2 -> 100`), everything else
/// keeps its shortest form (`18.5`).
pub fn format_months(total_months: &Number) -> String {
    let integral = total_months
        .as_f64()
        .filter(|v| total_months.is_f64() && v.fract() == 0.0 && v.abs() < 1e21);

    match integral {
        // Never render "-0".
        Some(v) if v == 0.0 => "0".to_string(),
        Some(v) => format!("{:.0}", v),
        None => total_months.to_string(),
    }
}

pub fn debt_summary_fragment(data: &DebtSummaryResponse) -> String {
    let summary = &data.summary;
    format!(
        concat!(
            "<div>",
            "<h1 class=\"text-[4rem]\">With the {method} method</h1>",
            "<p>You will pay off ${amount} (approximately) over the course of {months} months</p>",
            "</div>"
        ),
        method = escape_html(&summary.method),
        amount = format_amount(summary.total_amount_paid),
        months = escape_html(&format_months(&summary.total_months)),
    )
}

pub fn hello_fragment(data: &HelloResponse) -> String {
    format!("<div><h1>{}</h1></div>", escape_html(&data.message))
}

/// Wraps a fragment in a complete HTML document.
pub fn document(title: &str, fragment: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
</head>
<body>
{}
</body>
</html>
"#,
        escape_html(title),
        fragment
    )
}

/// Fetches the debt summary and renders its fragment.
pub async fn render_debt_summary(client: &DebtApiClient) -> Result<String, AppError> {
    let data = client.fetch_debt_summary().await?;
    tracing::debug!(
        "Rendering debt summary for method '{}'",
        data.summary.method
    );
    Ok(debt_summary_fragment(&data))
}

/// Fetches the greeting and renders its fragment.
pub async fn render_hello(client: &DebtApiClient) -> Result<String, AppError> {
    let data = client.fetch_hello().await?;
    Ok(hello_fragment(&data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SummaryFields;

    fn summary(method: &str, amount: f64, months: u64) -> DebtSummaryResponse {
        DebtSummaryResponse {
            summary: SummaryFields {
                method: method.to_string(),
                total_amount_paid: amount,
                total_months: months.into(),
            },
        }
    }

    #[test]
    fn test_amount_rounds_up_from_point_six() {
        let html = debt_summary_fragment(&summary("avalanche", 1234.6, 12));
        assert!(html.contains("$1235 (approximately)"));
    }

    #[test]
    fn test_amount_rounds_down_from_point_four() {
        let html = debt_summary_fragment(&summary("avalanche", 1234.4, 12));
        assert!(html.contains("$1234 (approximately)"));
    }

    #[test]
    fn test_halves_round_toward_positive_infinity() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-0.4), 0.0);
        assert_eq!(format_amount(-0.4), "0");
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
    }

    #[test]
    fn test_heading_and_paragraph_contents() {
        let html = debt_summary_fragment(&summary("Snowball", 9000.0, 18));
        assert!(html.contains("<h1 class=\"text-[4rem]\">With the Snowball method</h1>"));
        assert!(html.contains("over the course of 18 months</p>"));
    }

    #[test]
    fn test_fractional_months_render_as_sent() {
        let data: DebtSummaryResponse = serde_json::from_str(
            r#"{"summary":{"method":"avalanche","total_amount_paid":1.0,"total_months":18.5}}"#,
        )
        .unwrap();
        assert!(debt_summary_fragment(&data).contains("over the course of 18.5 months"));
    }

    #[test]
    fn test_integral_float_months_drop_fraction() {
        let data: DebtSummaryResponse = serde_json::from_str(
            r#"{"summary":{"method":"avalanche","total_amount_paid":1.0,"total_months":18.0}}"#,
        )
        .unwrap();
        assert!(debt_summary_fragment(&data).contains("over the course of 18 months"));

        let months = |json: &str| format_months(&serde_json::from_str(json).unwrap());
        assert_eq!(months("1e2"), "100");
        assert_eq!(months("-0.0"), "0");
        assert_eq!(months("24"), "24");
        assert_eq!(months("0.5"), "0.5");
    }

    #[test]
    fn test_hello_message_is_verbatim() {
        let html = hello_fragment(&HelloResponse {
            message: "hi there".to_string(),
        });
        assert_eq!(html, "<div><h1>hi there</h1></div>");
    }

    #[test]
    fn test_markup_in_values_is_escaped() {
        let html = hello_fragment(&HelloResponse {
            message: "<script>alert('x')</script> & co".to_string(),
        });
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt; &amp; co"));
    }

    #[test]
    fn test_document_wraps_fragment() {
        let page = document("Debt <Summary>", "<p>body</p>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Debt &lt;Summary&gt;</title>"));
        assert!(page.contains("<p>body</p>"));
    }
}
