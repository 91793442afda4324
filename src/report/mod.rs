//! Text rendering for projections and fitted budgets.

pub mod table;

use colored::Colorize;

use crate::forecast::{FittedBudget, YearProjection};

pub use table::{Alignment, TableColumn, TextTable};

/// Renders `Date | Balance | + | - | Planned` rows for each month.
/// Income and expense cells of predicted months are shown as `?`.
pub fn render_projection(projection: &YearProjection, plain: bool) -> String {
    let mut table = TextTable::new(
        vec![
            TableColumn::new("Date", Alignment::Left),
            TableColumn::new("Balance", Alignment::Right),
            TableColumn::new("+", Alignment::Right),
            TableColumn::new("-", Alignment::Right),
            TableColumn::new("Planned", Alignment::Left),
        ],
        plain,
    );

    for (month, row) in projection.months.iter() {
        let (income, expenses) = if row.is_realized() {
            (money(row.income), money(row.expenses))
        } else {
            ("?".to_string(), "?".to_string())
        };
        let planned = if row.planned.is_empty() {
            String::new()
        } else {
            format!("{:+.2} {}", row.planned.delta(), row.planned.description())
        };
        table.push_row(vec![
            format!("{}-{:02}", projection.year, month),
            balance(row.balance, plain),
            income,
            expenses,
            planned,
        ]);
    }

    format!("Year projection\n{}", table.render())
}

pub fn render_fit(year: i32, outcome: Option<FittedBudget>) -> String {
    match outcome {
        Some(fit) => format!(
            "Fitted budget for {year}: income {}, expenses {}",
            money(fit.income),
            money(fit.expenses)
        ),
        None => format!("No income/expense pair keeps the {year} balance above the minimum"),
    }
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn balance(value: f64, plain: bool) -> String {
    if plain || value >= 0.0 {
        money(value)
    } else {
        money(value).red().to_string()
    }
}
