use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use luca_core::{
    currency::Amount,
    ledger::{AccountFilter, AccountPair, AmortizedTransaction, Book, DateRange, Transaction},
};

fn build_sample_book(txn_count: usize) -> Book {
    let mut book = Book::new();
    for account in ["Assets:Checking", "Assets:Prepaid", "Expenses:Groceries", "Expenses:Insurance"] {
        book.add_account(account);
    }

    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    for idx in 0..txn_count {
        let date = start_date + Duration::days((idx % 365) as i64);
        book.add_single_transaction(Transaction::new(
            date,
            AccountPair::new("Expenses:Groceries", "Assets:Checking"),
            Amount::from_cents(5_000 + (idx % 100) as i64),
            "groceries",
        ))
        .expect("known accounts");

        if idx % 100 == 0 {
            book.add_amortized_transaction(AmortizedTransaction {
                single_date: date,
                date_range: DateRange::new(date, date + Duration::days(365)).expect("range"),
                single: AccountPair::new("Assets:Prepaid", "Assets:Checking"),
                repeat: AccountPair::new("Expenses:Insurance", "Assets:Prepaid"),
                amount: Amount::from_cents(120_000),
                description: "insurance".into(),
            })
            .expect("known accounts");
        }
    }
    book
}

fn bench_postings(c: &mut Criterion) {
    let book = build_sample_book(black_box(10_000));

    c.bench_function("all_postings_10k", |b| {
        b.iter(|| black_box(book.all_postings()))
    });

    c.bench_function("account_ledger_10k", |b| {
        b.iter(|| black_box(book.account_ledger("Assets:Checking")))
    });
}

fn bench_queries(c: &mut Criterion) {
    let book = build_sample_book(black_box(10_000));
    let assets = AccountFilter::new("Assets:.*").expect("pattern");

    c.bench_function("summarise_assets_10k", |b| {
        b.iter(|| black_box(book.summarise_accounts(&assets)))
    });

    c.bench_function("series_assets_10k", |b| {
        b.iter(|| black_box(book.series(&assets)))
    });
}

criterion_group!(benches, bench_postings, bench_queries);
criterion_main!(benches);
