use analytics_core::analytics::{
    aggregate, installments, recurring, ActualCategory, ActualSummary, CategorySnapshot,
    EntryKind, Frequency, InterestKind, Loan, Period, RecurringRule,
};
use chrono::NaiveDate;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn period(y: i32, m: u32) -> Period {
    Period::new(y, m).unwrap()
}

fn actual_category(id: Option<Uuid>, name: &str, amount: i64, count: u32) -> ActualCategory {
    ActualCategory {
        category_id: id,
        name: name.into(),
        icon: "tag".into(),
        color: "#64748b".into(),
        amount,
        count,
    }
}

#[test]
fn combined_totals_add_all_three_sources() {
    let march = period(2024, 3);
    let rules = vec![
        RecurringRule::new(EntryKind::Income, 3_000_000, Frequency::Monthly, date(2024, 1, 25))
            .with_day_of_month(25),
        RecurringRule::new(EntryKind::Expense, 45_000, Frequency::Monthly, date(2024, 1, 1)),
    ];
    let loans = vec![Loan::new(
        "Car",
        6_000_000,
        0.0,
        12,
        date(2024, 1, 10),
        InterestKind::Reducing,
    )];

    let recurring_result = recurring::project_month(&rules, march);
    let loan_result = installments::project_month(&loans, march);
    let actual = ActualSummary {
        income: 500_000,
        expense: 820_000,
    };

    let totals = aggregate::combine_totals(actual, &recurring_result, &loan_result);
    assert_eq!(totals.total_income, 500_000 + 3_000_000);
    assert_eq!(totals.total_expense, 820_000 + 45_000 + 500_000);
    assert_eq!(totals.net_balance, totals.total_income - totals.total_expense);
}

#[test]
fn combined_totals_with_empty_projections() {
    let recurring_result = recurring::project_month(&[], period(2024, 1));
    let loan_result = installments::project_month(&[], period(2024, 1));
    let totals = aggregate::combine_totals(
        ActualSummary::default(),
        &recurring_result,
        &loan_result,
    );
    assert_eq!(totals, Default::default());
}

#[test]
fn merged_categories_union_both_sources() {
    let food_id = Uuid::new_v4();
    let rent_id = Uuid::new_v4();

    let rules = vec![
        RecurringRule::new(EntryKind::Expense, 900_000, Frequency::Monthly, date(2024, 1, 1))
            .with_category(rent_id, CategorySnapshot::new("Rent", "home", "#3b82f6")),
        RecurringRule::new(EntryKind::Expense, 20_000, Frequency::Monthly, date(2024, 1, 15))
            .with_category(food_id, CategorySnapshot::new("Food", "utensils", "#ef4444")),
    ];
    let recurring_result = recurring::project_month(&rules, period(2024, 2));

    let actual = vec![
        actual_category(Some(food_id), "Food", 60_000, 14),
        actual_category(None, "Misc", 20_000, 3),
    ];

    let merged = aggregate::merge_categories(&actual, &recurring_result);
    assert_eq!(merged.len(), 3);

    // Sorted descending by combined total: Rent 900k, Food 80k, Misc 20k.
    assert_eq!(merged[0].name, "Rent");
    assert_eq!(merged[0].regular, 0);
    assert_eq!(merged[0].recurring, 900_000);
    assert_eq!(merged[1].name, "Food");
    assert_eq!(merged[1].regular, 60_000);
    assert_eq!(merged[1].recurring, 20_000);
    assert_eq!(merged[1].total, 80_000);
    assert_eq!(merged[2].category_id, Uuid::nil());
    assert_eq!(merged[2].total, 20_000);

    let grand: i64 = merged.iter().map(|c| c.total).sum();
    assert_eq!(grand, 1_000_000);
    assert_eq!(merged[0].percentage, 90.0);
    assert_eq!(merged[1].percentage, 8.0);
    assert_eq!(merged[2].percentage, 2.0);
}

#[test]
fn zero_grand_total_yields_zero_percentages() {
    let recurring_result = recurring::project_month(&[], period(2024, 5));
    let actual = vec![actual_category(Some(Uuid::new_v4()), "Food", 0, 0)];

    let merged = aggregate::merge_categories(&actual, &recurring_result);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].percentage, 0.0);
}

#[test]
fn uncategorized_recurring_merges_with_uncategorized_actuals() {
    let rules = vec![RecurringRule::new(
        EntryKind::Expense,
        10_000,
        Frequency::Monthly,
        date(2024, 1, 1),
    )];
    let recurring_result = recurring::project_month(&rules, period(2024, 2));
    let actual = vec![actual_category(None, "Misc", 5_000, 2)];

    let merged = aggregate::merge_categories(&actual, &recurring_result);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].category_id, Uuid::nil());
    assert_eq!(merged[0].regular, 5_000);
    assert_eq!(merged[0].recurring, 10_000);
    assert_eq!(merged[0].percentage, 100.0);
}

#[test]
fn ties_break_by_name_for_determinism() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let actual = vec![
        actual_category(Some(b), "Zoo", 10_000, 1),
        actual_category(Some(a), "Art", 10_000, 1),
    ];
    let recurring_result = recurring::project_month(&[], period(2024, 1));

    let merged = aggregate::merge_categories(&actual, &recurring_result);
    assert_eq!(merged[0].name, "Art");
    assert_eq!(merged[1].name, "Zoo");
}

#[test]
fn major_units_conversion_at_the_boundary() {
    let totals = aggregate::combine_totals(
        ActualSummary {
            income: 1_234_56,
            expense: 0,
        },
        &recurring::project_month(&[], period(2024, 1)),
        &installments::project_month(&[], period(2024, 1)),
    );
    assert_eq!(aggregate::major_units(totals.total_income), 1_234.56);
}
