mod common;

use budget_forecast::{
    config::{Config, ExceptionMode, ExceptionRule, PlannedEntry},
    errors::ForecastError,
    forecast::{Forecaster, Prediction},
};
use common::{day, expense, income, table_with};

fn two_month_history() -> Vec<budget_forecast::ledger::Transaction> {
    vec![
        income(day(2024, 1, 1), "salary", 3000.0),
        expense(day(2024, 1, 3), "rent", 1000.0),
        income(day(2024, 2, 1), "salary", 2000.0),
        expense(day(2024, 2, 3), "rent", 1500.0),
    ]
}

#[test]
fn fully_realized_year_has_no_predictions() {
    let mut config = Config::default();
    config.plans.expenses = vec![PlannedEntry::new(["rent"], -800.0, "2024-03-01")];
    config.plans.income = vec![PlannedEntry::new(["bonus"], 2000.0, "2024-06-01")];
    let transactions = (1..=12).flat_map(|month| {
        [
            income(day(2024, month, 1), "salary", 1000.0 + f64::from(month)),
            expense(day(2024, month, 9), "food", 900.0),
        ]
    });
    let table = table_with(&config, transactions);

    let projection = Forecaster::new(&config, &table)
        .project_year(2024, None, None, None)
        .expect("projection");

    assert!(projection.predicted().is_empty());
    assert_eq!(projection.realized().len(), 12);
    let mut expected = 0.0;
    for (month, row) in projection.months.iter() {
        expected += 100.0 + f64::from(month) + row.planned.delta();
        assert!((row.balance - expected).abs() < 1e-9, "month {month}");
    }
    assert!((projection.final_balance() - (1200.0 + 78.0 - 800.0 + 2000.0)).abs() < 1e-9);
}

#[test]
fn missing_months_use_historical_means() {
    let config = Config::default();
    let table = table_with(&config, two_month_history());

    let projection = Forecaster::new(&config, &table)
        .project_year(2024, None, None, None)
        .expect("projection");

    let predicted = projection.predicted();
    assert_eq!(predicted.len(), 10);
    assert_eq!(
        predicted[&3],
        Prediction {
            total: 1250.0,
            income: 2500.0,
            expenses: -1250.0
        }
    );
    assert_eq!(projection.months[2].balance, 2500.0);
    assert_eq!(projection.final_balance(), 2500.0 + 10.0 * 1250.0);
}

#[test]
fn single_override_keeps_the_other_mean() {
    let config = Config::default();
    let table = table_with(&config, two_month_history());
    let forecaster = Forecaster::new(&config, &table);

    let with_income = forecaster
        .project_year(2024, None, Some(3000.0), None)
        .unwrap();
    assert_eq!(
        with_income.predicted()[&4],
        Prediction {
            total: 1750.0,
            income: 3000.0,
            expenses: -1250.0
        }
    );

    let with_expenses = forecaster
        .project_year(2024, None, None, Some(-2000.0))
        .unwrap();
    assert_eq!(with_expenses.predicted()[&4].total, 500.0);
}

#[test]
fn ignored_and_savings_tags_only_leave_the_history() {
    let mut config = Config::default();
    config.exceptions.expenses = vec![ExceptionRule::new("vacation", None)];
    config.savings.expenses = vec!["savings".into()];
    let mut transactions = two_month_history();
    transactions.push(expense(day(2024, 1, 20), "vacation", 5000.0));
    transactions.push(expense(day(2024, 2, 20), "savings", 400.0));
    let table = table_with(&config, transactions);

    let projection = Forecaster::new(&config, &table)
        .project_year(2024, None, None, None)
        .unwrap();

    assert_eq!(projection.realized()[&1], vec![3000.0, -1000.0, -5000.0]);
    assert_eq!(projection.months[2].total, 100.0);
    assert_eq!(projection.predicted()[&3].total, 1250.0);
}

#[test]
fn hidden_tags_stay_hidden_under_any_default_mode() {
    for default in [ExceptionMode::Ignore, ExceptionMode::Hide, ExceptionMode::None] {
        let mut config = Config {
            exception_mode: default,
            ..Config::default()
        };
        config.exceptions.expenses = vec![ExceptionRule::new("car", Some(ExceptionMode::Hide))];
        let mut transactions = two_month_history();
        transactions.push(expense(day(2024, 1, 15), "car", 700.0));
        let table = table_with(&config, transactions);

        let projection = Forecaster::new(&config, &table)
            .project_year(2024, None, None, None)
            .unwrap();
        assert_eq!(projection.months[1].total, 2000.0, "default {default}");
        assert!(table.iter().all(|txn| !txn.tags.contains("car")));
    }
}

#[test]
fn months_ago_counts_back_from_the_reference_date() {
    let config = Config::default();
    let table = table_with(
        &config,
        [
            income(day(2023, 10, 1), "salary", 1000.0),
            expense(day(2023, 10, 5), "food", 200.0),
            income(day(2023, 11, 1), "salary", 600.0),
            income(day(2023, 3, 1), "salary", 9000.0),
        ],
    );
    let forecaster = Forecaster::new(&config, &table).with_reference_date(day(2024, 1, 15));

    let projection = forecaster.project_year(2024, Some(3), None, None).unwrap();
    assert_eq!(projection.predicted()[&1].total, 700.0);
    assert_eq!(projection.final_balance(), 8400.0);

    let err = forecaster
        .project_year(2024, None, None, None)
        .expect_err("no 2024 history");
    assert!(matches!(
        err,
        ForecastError::InsufficientHistory { month: 1, .. }
    ));
}

#[test]
fn planned_entries_land_in_their_month() {
    let mut config = Config {
        income: Some(0.0),
        expenses: Some(0.0),
        ..Config::default()
    };
    config.plans.expenses = vec![PlannedEntry::new(["rent"], -800.0, "2024-03-01")];
    config.plans.income = vec![PlannedEntry::new(["bonus"], 2000.0, "2024-06-01")];
    let table = table_with(&config, Vec::new());

    let projection = Forecaster::new(&config, &table)
        .project_year(2025, None, None, None)
        .unwrap();

    assert_eq!(projection.months[3].planned.delta(), -800.0);
    assert_eq!(projection.months[3].planned.description(), "-rent");
    assert_eq!(projection.months[6].planned.delta(), 2000.0);
    assert_eq!(projection.months[6].planned.description(), "+bonus");
    assert_eq!(projection.months[5].balance, -800.0);
    assert_eq!(projection.final_balance(), 1200.0);
}

#[test]
fn later_years_fold_into_their_calendar_month() {
    let config = Config {
        income: Some(100.0),
        expenses: Some(0.0),
        ..Config::default()
    };
    let table = table_with(
        &config,
        [
            income(day(2023, 12, 1), "salary", 9000.0),
            income(day(2024, 1, 10), "salary", 100.0),
            income(day(2025, 2, 10), "salary", 500.0),
        ],
    );

    let projection = Forecaster::new(&config, &table)
        .project_year(2024, None, None, None)
        .unwrap();

    let realized = projection.realized();
    assert_eq!(realized.len(), 2);
    assert_eq!(realized[&1], vec![100.0]);
    assert_eq!(realized[&2], vec![500.0]);
    assert_eq!(projection.final_balance(), 100.0 + 500.0 + 10.0 * 100.0);
}

#[test]
fn long_lookback_merges_the_same_month_across_years() {
    let config = Config::default();
    let table = table_with(
        &config,
        [
            income(day(2023, 1, 5), "salary", 1000.0),
            income(day(2023, 2, 5), "salary", 1000.0),
            income(day(2024, 1, 5), "salary", 1000.0),
        ],
    );
    let forecaster = Forecaster::new(&config, &table).with_reference_date(day(2024, 2, 15));

    let projection = forecaster.project_year(2024, Some(13), None, None).unwrap();

    assert_eq!(projection.realized()[&1], vec![1000.0]);
    assert_eq!(
        projection.predicted()[&2],
        Prediction {
            total: 1500.0,
            income: 1500.0,
            expenses: 0.0
        }
    );
    assert_eq!(projection.final_balance(), 1000.0 + 11.0 * 1500.0);
}
