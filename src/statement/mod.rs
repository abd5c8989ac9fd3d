//! Payout settlement statements sent to clients after an admin payout

pub mod format;

use chrono::{Datelike, NaiveDate};
use log::info;
use serde::{Deserialize, Serialize};

use crate::access::{require_payout_role, AuthContext};
use crate::error::Result;
use crate::portfolio::{ClientDetails, PortfolioSnapshot};
use crate::projection::{ProjectionCalculator, ProjectionResult};
use format::{format_date, format_rupees};

/// Placeholder shown until the bank transfer reference is known
pub const TRANSACTION_ID_PLACEHOLDER: &str = "TXN_ID_PLACEHOLDER";

const CLOSING_LINE: &str = "Your future profits will be calculated based on the current active investment.";

/// Profit period a payout settles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ProfitPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First to last day of the calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let next_month = if date.month() == 12 {
            NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
        };
        let end = next_month.and_then(|d| d.pred_opt()).unwrap_or(date);
        Self { start, end }
    }
}

/// Payout being recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutDetails {
    pub amount: f64,
    pub period: ProfitPeriod,
    pub paid_on: NaiveDate,
    pub transaction_id: Option<String>,
}

/// Projection behind a payout plus the rendered message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutStatement {
    pub projection: ProjectionResult,
    pub message: String,
}

impl ProjectionCalculator {
    /// Build the settlement message for a payout.
    ///
    /// The payout is deducted profit-first, exactly like a withdrawal.
    pub fn project_payout_message(
        &self,
        client: &ClientDetails,
        snapshot: &PortfolioSnapshot,
        payout: &PayoutDetails,
    ) -> PayoutStatement {
        let projection = self.project_withdrawal(snapshot, payout.amount);
        let message = render(client, snapshot, payout, &projection);

        PayoutStatement { projection, message }
    }

    /// As `project_payout_message`, restricted to admins and mediators
    pub fn payout_statement_for(
        &self,
        auth: &dyn AuthContext,
        client: &ClientDetails,
        snapshot: &PortfolioSnapshot,
        payout: &PayoutDetails,
    ) -> Result<PayoutStatement> {
        require_payout_role(auth)?;
        let statement = self.project_payout_message(client, snapshot, payout);
        info!(
            "Payout statement for {} prepared by {:?} ({})",
            client.user_id,
            auth.current_user_role(),
            auth.current_user_id().unwrap_or("unknown")
        );
        Ok(statement)
    }
}

fn render(
    client: &ClientDetails,
    snapshot: &PortfolioSnapshot,
    payout: &PayoutDetails,
    projection: &ProjectionResult,
) -> String {
    let paid_on = format_date(payout.paid_on);
    let lines = [
        format!("USER ID : {}", client.user_id),
        format!("CLIENT NAME : {}", client.name),
        format!("MOBILE NUMBER : {}", client.mobile.as_deref().unwrap_or("N/A")),
        String::new(),
        format!("PREVIOUS INVESTMENT : {}", format_rupees(snapshot.total_invested)),
        String::new(),
        format!("MONTHLY RETURN RATE 📈 : {}%", snapshot.profit_percentage),
        String::new(),
        format!(
            "PAYOUT TRANSACTION ID : {}",
            payout.transaction_id.as_deref().unwrap_or(TRANSACTION_ID_PLACEHOLDER)
        ),
        "-----------------------------------".to_string(),
        String::new(),
        format!(
            "PROFIT PAID FOR : {} TO {}",
            format_date(payout.period.start),
            format_date(payout.period.end)
        ),
        String::new(),
        format!("Remaining Profit : {}", format_rupees(projection.new_available_profit)),
        format!("AMOUNT PAID : {}", format_rupees(projection.amount)),
        format!("DATE : {}", paid_on),
        String::new(),
        format!("CURRENT INVESTMENT : {}", format_rupees(projection.new_invested)),
        format!("FROM {} ONWARDS", paid_on),
        String::new(),
        CLOSING_LINE.to_string(),
    ];

    lines.join("\n")
}
