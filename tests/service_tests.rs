mod common;

use common::{open_manager, setup_test_env};
use kopilka::{
    domain::{ExpenseKind, Frequency},
    report::render_forecast_table,
    services::{CoreError, ExpenseDraft, Filter, IncomeDraft, PaymentUrgency},
    KopilkaError, LoadSource,
};

#[test]
fn first_run_shows_sample_dashboard() {
    let (manager, _, _) = setup_test_env();
    assert_eq!(manager.last_load().source, LoadSource::Sample);

    let dashboard = manager.dashboard(&Filter::All);
    assert_eq!(dashboard.total_income, 70_000.0);
    assert_eq!(dashboard.total_expenses, 30_000.0);
    assert_eq!(dashboard.balance, 40_000.0);
    assert_eq!(dashboard.forecast.balance.decade, 4_800_000.0);
    assert_eq!(dashboard.balance_series.len(), 30);
    assert_eq!(*dashboard.balance_series.last().unwrap(), 40_000.0);
}

#[test]
fn income_lifecycle_cascades_linked_expenses() {
    let (mut manager, _, _) = setup_test_env();
    let bonus = manager
        .save_income(IncomeDraft::new("Bonus", 24_000.0, Frequency::Yearly, 11))
        .expect("add income");
    manager
        .save_expense(
            ExpenseDraft::new(ExpenseKind::Fixed, "Gym", 1_500.0, 11).linked_to(bonus.clone()),
        )
        .expect("add linked fixed");
    manager
        .save_expense(
            ExpenseDraft::new(ExpenseKind::Variable, "Books", 300.0, 20).linked_to(bonus.clone()),
        )
        .expect("add linked variable");

    let dashboard = manager.dashboard(&Filter::Income(bonus.clone()));
    let detail = dashboard.breakdown.expect("breakdown");
    assert_eq!(detail.income.monthly_amount, 2_000.0);
    assert_eq!(detail.linked_total, 1_800.0);
    assert_eq!(dashboard.balance, 200.0);
    assert_eq!(dashboard.incomes[0].urgency, PaymentUrgency::Soon);
    assert_eq!(dashboard.incomes[0].badge, "In 1 day");

    let removal = manager.remove_income(&bonus).expect("remove income");
    assert_eq!(removal.removed_expenses.len(), 2);
    assert_eq!(manager.store().expense_count(), 2);
    assert!(manager
        .store()
        .all_expenses()
        .all(|expense| !expense.is_linked_to(&bonus)));
}

#[test]
fn editing_unknown_records_is_rejected() {
    let (mut manager, _, _) = setup_test_env();
    let before = manager.store().clone();

    let err = manager
        .save_income(IncomeDraft::new("Ghost", 1.0, Frequency::Monthly, 1).editing("nope"))
        .expect_err("unknown income");
    assert!(matches!(err, KopilkaError::Core(CoreError::IncomeNotFound(_))));

    let err = manager.remove_expense("nope").expect_err("unknown expense");
    assert!(matches!(err, KopilkaError::Core(CoreError::ExpenseNotFound(_))));
    assert_eq!(manager.store(), &before);
}

#[test]
fn form_input_is_parsed_leniently() {
    let (mut manager, _, _) = setup_test_env();
    let id = manager
        .save_income(IncomeDraft::from_form("", "Tips", "1 200", "sometimes", ""))
        .expect("lenient form");
    let tips = manager.store().income(&id).expect("saved");
    assert_eq!(tips.amount, 1.0);
    assert_eq!(tips.frequency, Frequency::Monthly);
    assert_eq!(tips.payment_day, 1);

    let err = manager
        .save_expense(ExpenseDraft::from_form(
            "",
            ExpenseKind::Fixed,
            "Insurance",
            "100",
            "",
            "32",
        ))
        .expect_err("day out of range");
    assert!(matches!(err, KopilkaError::Core(CoreError::Validation(_))));
}

#[test]
fn state_survives_reopen() {
    let (mut manager, _, base) = setup_test_env();
    let salary = manager.store().incomes[0].id.clone();
    manager
        .save_income(
            IncomeDraft::new("Salary", 55_000.0, Frequency::Monthly, 5).editing(salary.clone()),
        )
        .expect("edit salary");
    let expected = manager.store().clone();
    drop(manager);

    let reopened = open_manager(&base, (2024, 7, 1));
    assert_eq!(reopened.last_load().source, LoadSource::Snapshot);
    assert_eq!(reopened.store(), &expected);
    assert_eq!(reopened.month().days_in_month, 31);

    let rendered = render_forecast_table(&reopened.dashboard(&Filter::All).forecast);
    assert!(rendered.contains("45 000"));
}
