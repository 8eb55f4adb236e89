//! Household finance dashboard — static sample data and the summaries derived
//! from it (net worth, monthly cash flow, budget shares).

use serde::Serialize;

pub mod handlers;

#[derive(Debug, Clone, Copy)]
pub struct LineItem {
    pub name: &'static str,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub items: &'static [LineItem],
}

const fn item(name: &'static str, amount: i64) -> LineItem {
    LineItem { name, amount }
}

pub const ASSETS: &[Category] = &[
    Category {
        name: "Liquid assets",
        items: &[
            item("Cash and demand deposits", 15_000_000),
            item("Short-term savings / CMA / MMF", 35_000_000),
            item("Emergency fund", 20_000_000),
        ],
    },
    Category {
        name: "Investment assets",
        items: &[
            item("Domestic and foreign stocks / ETFs", 120_000_000),
            item("Bonds / bond funds", 50_000_000),
            item("Crypto assets", 8_000_000),
            item("Pension accounts (IRP / pension savings)", 45_000_000),
        ],
    },
    Category {
        name: "Physical assets",
        items: &[
            item("Real estate", 650_000_000),
            item("Car", 25_000_000),
            item("Gold / commodities", 12_000_000),
        ],
    },
];

pub const LIABILITIES: &[LineItem] = &[
    item("Mortgage", 300_000_000),
    item("Credit loan / card loan", 20_000_000),
    item("Student loan", 15_000_000),
];

pub const MONTHLY_INCOME: i64 = 6_000_000;

pub const FIXED_EXPENSES: Category = Category {
    name: "Fixed expenses",
    items: &[
        item("Housing", 1_200_000),
        item("Insurance", 150_000),
        item("Subscriptions", 50_000),
        item("Loan repayment", 1_600_000),
    ],
};

pub const VARIABLE_EXPENSES: Category = Category {
    name: "Variable expenses",
    items: &[
        item("Food", 600_000),
        item("Transportation", 150_000),
        item("Clothing", 200_000),
        item("Leisure", 300_000),
    ],
};

pub fn sum(items: &[LineItem]) -> i64 {
    items.iter().map(|i| i.amount).sum()
}

pub fn total_assets() -> i64 {
    ASSETS.iter().map(|c| sum(c.items)).sum()
}

pub fn total_liabilities() -> i64 {
    sum(LIABILITIES)
}

pub fn net_worth() -> i64 {
    total_assets() - total_liabilities()
}

pub fn monthly_expenses() -> i64 {
    sum(FIXED_EXPENSES.items) + sum(VARIABLE_EXPENSES.items)
}

/// Income left after all expenses; goes to saving and investing.
pub fn monthly_savings() -> i64 {
    MONTHLY_INCOME - monthly_expenses()
}

/// Korean won with a `₩` prefix and thousands separators, e.g. `-₩1,234,567`.
pub fn format_krw(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}₩{grouped}")
}

/// `part / whole` as a percentage rounded to one decimal; 0 when `whole` is 0.
fn share_percent(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Amount {
    pub value: i64,
    pub formatted: String,
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self {
            value,
            formatted: format_krw(value),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemView {
    pub name: &'static str,
    pub amount: Amount,
}

impl From<&LineItem> for ItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name,
            amount: item.amount.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub name: &'static str,
    pub total: Amount,
    pub items: Vec<ItemView>,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name,
            total: sum(category.items).into(),
            items: category.items.iter().map(ItemView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BudgetShare {
    pub category: &'static str,
    pub amount: Amount,
    pub share_percent: f64,
}

/// Essential, discretionary and savings shares of monthly income.
pub fn budget_breakdown() -> Vec<BudgetShare> {
    let parts = [
        ("Essential spending", sum(FIXED_EXPENSES.items)),
        ("Discretionary spending", sum(VARIABLE_EXPENSES.items)),
        ("Savings and investment", monthly_savings()),
    ];
    let total: i64 = parts.iter().map(|(_, amount)| amount).sum();
    parts
        .into_iter()
        .map(|(category, amount)| BudgetShare {
            category,
            amount: amount.into(),
            share_percent: share_percent(amount, total),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_assets: Amount,
    pub total_liabilities: Amount,
    pub net_worth: Amount,
    pub monthly_income: Amount,
    pub monthly_expenses: Amount,
    pub monthly_savings: Amount,
    pub assets: Vec<CategoryView>,
    pub liabilities: Vec<ItemView>,
    pub expenses: Vec<CategoryView>,
    pub budget: Vec<BudgetShare>,
}

pub fn dashboard_summary() -> DashboardSummary {
    DashboardSummary {
        total_assets: total_assets().into(),
        total_liabilities: total_liabilities().into(),
        net_worth: net_worth().into(),
        monthly_income: MONTHLY_INCOME.into(),
        monthly_expenses: monthly_expenses().into(),
        monthly_savings: monthly_savings().into(),
        assets: ASSETS.iter().map(CategoryView::from).collect(),
        liabilities: LIABILITIES.iter().map(ItemView::from).collect(),
        expenses: [FIXED_EXPENSES, VARIABLE_EXPENSES]
            .iter()
            .map(CategoryView::from)
            .collect(),
        budget: budget_breakdown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        assert_eq!(total_assets(), 980_000_000);
        assert_eq!(total_liabilities(), 335_000_000);
        assert_eq!(net_worth(), 645_000_000);
    }

    #[test]
    fn test_monthly_cash_flow() {
        assert_eq!(monthly_expenses(), 4_250_000);
        assert_eq!(monthly_savings(), 1_750_000);
    }

    #[test]
    fn test_budget_shares_round_to_one_decimal() {
        let budget = budget_breakdown();
        let shares: Vec<_> = budget.iter().map(|b| b.share_percent).collect();
        assert_eq!(shares, [50.0, 20.8, 29.2]);
        assert_eq!(budget[0].amount.value, 3_000_000);
        assert_eq!(budget[1].amount.value, 1_250_000);
    }

    #[test]
    fn test_share_of_zero_total_is_zero() {
        assert_eq!(share_percent(5, 0), 0.0);
    }

    #[test]
    fn test_format_krw() {
        assert_eq!(format_krw(0), "₩0");
        assert_eq!(format_krw(999), "₩999");
        assert_eq!(format_krw(1_000), "₩1,000");
        assert_eq!(format_krw(980_000_000), "₩980,000,000");
        assert_eq!(format_krw(-1_234_567), "-₩1,234,567");
        assert_eq!(format_krw(i64::MIN), "-₩9,223,372,036,854,775,808");
    }

    #[test]
    fn test_summary_category_totals_match() {
        let summary = dashboard_summary();
        let category_sum: i64 = summary.assets.iter().map(|c| c.total.value).sum();
        assert_eq!(category_sum, summary.total_assets.value);
        assert_eq!(summary.net_worth.formatted, "₩645,000,000");
        assert_eq!(summary.expenses.len(), 2);
    }
}
