use chrono::NaiveDate;
use esg_dashboard::{EsgError, PriceTable};

use crate::common::fixture;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn table() -> PriceTable {
    PriceTable::parse(&fixture("sp500_price_data.csv")).unwrap()
}

#[test]
fn rows_are_sorted_and_bad_dates_dropped() {
    let t = table();

    assert_eq!(t.symbols(), ["AAPL", "MSFT", "XOM", "BRK.B"]);
    assert_eq!(
        t.dates(),
        [d(2023, 1, 3), d(2023, 1, 4), d(2023, 1, 5), d(2023, 1, 6)]
    );
}

#[test]
fn series_is_ordered_and_skips_non_numeric_prices() {
    let t = table();

    let aapl: Vec<f64> = t.series("AAPL").unwrap().iter().map(|p| p.price).collect();
    assert_eq!(aapl, [125.07, 126.36, 125.02, 129.62]);

    let xom = t.series("XOM").unwrap();
    assert_eq!(xom.len(), 3);
    assert_eq!(xom.last().unwrap().date, d(2023, 1, 5));

    let msft_dates: Vec<_> = t.series("MSFT").unwrap().iter().map(|p| p.date).collect();
    assert_eq!(msft_dates, [d(2023, 1, 3), d(2023, 1, 4), d(2023, 1, 6)]);
}

#[test]
fn symbol_lookup_falls_back_to_case_insensitive() {
    let t = table();

    assert_eq!(t.series("brk.b").unwrap().len(), 3);
    assert!(t.contains(" msft "));
}

#[test]
fn unknown_symbol_is_an_error() {
    match table().series("TSLA") {
        Err(EsgError::UnknownSymbol(sym)) => assert_eq!(sym, "TSLA"),
        other => panic!("expected UnknownSymbol, got {other:?}"),
    }
}

#[test]
fn rows_hold_only_numeric_cells() {
    let rows = table().rows();

    assert_eq!(rows.len(), 4);
    let first = &rows[0];
    assert_eq!(first.date, d(2023, 1, 3));
    assert_eq!(first.prices.len(), 3);
    assert!(!first.prices.contains_key("BRK.B"));
    assert_eq!(rows[3].prices.get("XOM"), None);
}

#[test]
fn keyed_view_has_every_symbol() {
    let keyed = table().into_keyed();

    assert_eq!(keyed.len(), 4);
    assert_eq!(keyed["AAPL"].len(), 4);
    assert_eq!(keyed["BRK.B"][0].price, 308.52);
}

#[test]
fn latest_returns_the_newest_numeric_price() {
    let t = table();

    assert_eq!(t.latest("XOM").unwrap().price, 113.46);
    assert_eq!(t.latest("AAPL").unwrap().date, d(2023, 1, 6));
    assert!(t.latest("NOPE").is_none());
}

#[test]
fn date_column_is_found_by_name_and_alternate_formats_parse() {
    let text = "AAPL,date\n\"1,250.5\",01/31/2024\n130,2024-02-01 00:00:00\n";
    let t = PriceTable::parse(text).unwrap();

    assert_eq!(t.symbols(), ["AAPL"]);
    let s = t.series("AAPL").unwrap();
    assert_eq!(s[0].date, d(2024, 1, 31));
    assert_eq!(s[0].price, 1250.5);
    assert_eq!(s[1].date, d(2024, 2, 1));
}

#[test]
fn header_without_tickers_or_dated_rows_fails() {
    assert!(matches!(
        PriceTable::parse("Date\n2024-01-01\n"),
        Err(EsgError::MissingHeaders(_))
    ));
    assert!(matches!(
        PriceTable::parse("Date,AAPL\nyesterday,1\n"),
        Err(EsgError::NoRows)
    ));
}
