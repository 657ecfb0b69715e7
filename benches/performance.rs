use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kopilka::{
    domain::{Expense, ExpenseKind, FinanceStore, Frequency, Income},
    report::Dashboard,
    services::{Filter, MonthContext, SnapshotStorage},
    storage::{decode_snapshot, serialize_snapshot, JsonSnapshotStorage},
};
use tempfile::tempdir;

const FREQUENCIES: [Frequency; 6] = Frequency::ALL;

fn build_sample_store(income_count: usize, expenses_per_income: usize) -> FinanceStore {
    let mut store = FinanceStore::new();
    for idx in 0..income_count {
        let frequency = FREQUENCIES[idx % FREQUENCIES.len()];
        let day = (idx % 31) as u32 + 1;
        let income_id = store.add_income(Income::new(
            format!("Income {idx}"),
            1_000.0 + idx as f64,
            frequency,
            day,
        ));
        for n in 0..expenses_per_income {
            let kind = if n % 2 == 0 {
                ExpenseKind::Fixed
            } else {
                ExpenseKind::Variable
            };
            let expense = Expense::new(format!("Expense {idx}-{n}"), 10.0 + n as f64, (n % 31) as u32 + 1);
            let expense = if n % 3 == 0 {
                expense.linked_to(income_id.clone())
            } else {
                expense
            };
            store.add_expense(kind, expense);
        }
    }
    store
}

fn bench_snapshot_io(c: &mut Criterion) {
    let store = build_sample_store(black_box(200), 25);
    let dir = tempdir().expect("tempdir");
    let storage =
        JsonSnapshotStorage::in_dir(dir.path().to_path_buf(), "financeData").expect("storage");

    c.bench_function("snapshot_save_5k", |b| {
        b.iter(|| {
            storage.save(&store).expect("save snapshot");
        })
    });

    storage.save(&store).expect("seed");

    c.bench_function("snapshot_load_5k", |b| {
        b.iter(|| {
            let loaded = storage.load().expect("load snapshot");
            black_box(loaded);
        })
    });

    let raw = serialize_snapshot(&store).expect("serialize");
    c.bench_function("snapshot_decode_5k", |b| {
        b.iter(|| black_box(decode_snapshot(&raw).expect("decode")))
    });
}

fn bench_dashboard(c: &mut Criterion) {
    let store = build_sample_store(black_box(200), 25);
    let month = MonthContext::for_date(NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date"));
    let first_income = Filter::Income(store.incomes[0].id.clone());

    c.bench_function("dashboard_all", |b| {
        b.iter(|| black_box(Dashboard::build(&store, &month, &Filter::All, "₽")))
    });

    c.bench_function("dashboard_single_income", |b| {
        b.iter(|| black_box(Dashboard::build(&store, &month, &first_income, "₽")))
    });
}

criterion_group!(benches, bench_snapshot_io, bench_dashboard);
criterion_main!(benches);
