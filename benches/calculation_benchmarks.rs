//! Performance benchmarks for the Payroll Calculation Engine.
//!
//! This benchmark suite covers:
//! - Single employee calculation
//! - Rate resolution from loaded reference data
//! - Batch of 1000 employees, sequential
//! - Batch of 1000 employees, split across threads sharing one rate set
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::calculation::calculate;
use payroll_engine::config::{ConfigLoader, RateResolver};
use payroll_engine::models::{
    EmployeeTaxProfile, MaritalStatus, PayComponents, PayrollCalculationInput, ResolvedRates,
};

/// Loads the reference data shipped with the crate.
fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/reference").expect("Failed to load config")
}

fn payroll_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
}

/// Resolves the rates for a standard citizen employee.
fn resolve_rates() -> ResolvedRates {
    load_config()
        .resolve(payroll_date(), "citizen", "standard")
        .expect("Failed to resolve rates")
}

/// Creates a workforce with varied salaries and households.
fn create_employees(count: u32) -> Vec<(PayComponents, EmployeeTaxProfile)> {
    (0..count)
        .map(|i| {
            let pay = PayComponents {
                base_salary: Decimal::from(15_000 + (i % 200) * 1_250),
                bonus: Decimal::from((i % 7) * 500),
                overtime_pay: Decimal::new(i64::from(i % 13) * 12_345, 2),
                commission_pay: Decimal::ZERO,
                advance_deduction: Decimal::from((i % 5) * 100),
            };
            let married = i % 3 != 0;
            let profile = EmployeeTaxProfile {
                marital_status: if married {
                    MaritalStatus::Married
                } else {
                    MaritalStatus::Single
                },
                is_spouse_working: married && i % 2 == 0,
                dependent_child_count: i % 4,
                transport_allowance_amount: Decimal::from((i % 3) * 800),
            };
            (pay, profile)
        })
        .collect()
}

/// Benchmark: Single employee calculation.
fn bench_single_employee(c: &mut Criterion) {
    let rates = resolve_rates();
    let input = PayrollCalculationInput::new(
        PayComponents::base(Decimal::from(40_000)),
        EmployeeTaxProfile {
            marital_status: MaritalStatus::Married,
            is_spouse_working: false,
            dependent_child_count: 2,
            transport_allowance_amount: Decimal::ZERO,
        },
        &rates,
    );

    c.bench_function("single_employee", |b| {
        b.iter(|| black_box(calculate(black_box(&input)).expect("calculation failed")))
    });
}

/// Benchmark: Resolving rates for one date and classification.
fn bench_resolve_rates(c: &mut Criterion) {
    let loader = load_config();
    let date = payroll_date();

    c.bench_function("resolve_rates", |b| {
        b.iter(|| {
            black_box(
                loader
                    .resolve(black_box(date), "citizen", "standard")
                    .expect("resolution failed"),
            )
        })
    });
}

/// Benchmark: Batch of 1000 employees on one thread.
fn bench_batch_1000_sequential(c: &mut Criterion) {
    let rates = resolve_rates();
    let employees = create_employees(1000);

    let mut group = c.benchmark_group("batch_1000");
    group.throughput(Throughput::Elements(employees.len() as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let results: Vec<_> = employees
                .iter()
                .map(|(pay, profile)| {
                    calculate(&PayrollCalculationInput::new(*pay, *profile, &rates))
                        .expect("calculation failed")
                })
                .collect();
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: Batch of 1000 employees split across threads.
fn bench_batch_1000_threaded(c: &mut Criterion) {
    let rates = resolve_rates();
    let employees = create_employees(1000);

    let mut group = c.benchmark_group("batch_1000_threaded");
    group.throughput(Throughput::Elements(employees.len() as u64));

    for threads in [2usize, 4, 8] {
        let chunk_size = employees.len().div_ceil(threads);

        group.bench_with_input(BenchmarkId::new("threads", threads), &threads, |b, _| {
            b.iter(|| {
                std::thread::scope(|scope| {
                    let handles: Vec<_> = employees
                        .chunks(chunk_size)
                        .map(|chunk| {
                            let rates = &rates;
                            scope.spawn(move || {
                                chunk
                                    .iter()
                                    .map(|(pay, profile)| {
                                        calculate(&PayrollCalculationInput::new(
                                            *pay, *profile, rates,
                                        ))
                                        .expect("calculation failed")
                                    })
                                    .count()
                            })
                        })
                        .collect();

                    let total: usize = handles
                        .into_iter()
                        .map(|h| h.join().expect("worker panicked"))
                        .sum();
                    black_box(total)
                })
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_employee,
    bench_resolve_rates,
    bench_batch_1000_sequential,
    bench_batch_1000_threaded,
);
criterion_main!(benches);
