use chrono::NaiveDate;

use esg_dashboard::{
    DashboardStore, FilterState, PriceTable, SortDirection, SortField, try_parse_companies,
};

use crate::common::{client_for, fixture, mock_companies, mock_prices};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn symbols(companies: &[&esg_dashboard::Company]) -> Vec<String> {
    companies.iter().map(|c| c.symbol.clone()).collect()
}

#[test]
fn default_sorts_by_total_score_descending() {
    let companies = try_parse_companies(&fixture("processed_sp500_esg_data.csv")).unwrap();
    let filter = FilterState::ending_on(d(2024, 6, 30));

    assert_eq!(filter.time_range, (d(2023, 6, 30), d(2024, 6, 30)));
    assert_eq!(filter.esg_score_range, (0.0, 100.0));
    assert_eq!(symbols(&filter.apply(&companies)), ["XOM", "AAPL", "MSFT", "JNJ"]);
}

#[test]
fn selections_narrow_the_list() {
    let companies = try_parse_companies(&fixture("processed_sp500_esg_data.csv")).unwrap();
    let mut filter = FilterState::ending_on(d(2024, 1, 1));

    filter.selected_sectors = vec!["information technology".into()];
    assert_eq!(symbols(&filter.apply(&companies)), ["AAPL", "MSFT"]);

    filter.selected_industries = vec!["Systems Software".into()];
    assert_eq!(symbols(&filter.apply(&companies)), ["MSFT"]);

    filter.selected_industries.clear();
    filter.esg_score_range = (16.0, 50.0);
    assert_eq!(symbols(&filter.apply(&companies)), ["AAPL"]);
}

#[test]
fn location_and_availability_filters() {
    let companies = try_parse_companies(&fixture("processed_sp500_esg_data.csv")).unwrap();
    let mut filter = FilterState::ending_on(d(2024, 1, 1));

    filter.data_availability_filter = vec!["partial".into()];
    assert_eq!(symbols(&filter.apply(&companies)), ["XOM"]);

    filter.data_availability_filter.clear();
    filter.location_filter = vec!["Redmond, Washington".into()];
    assert_eq!(symbols(&filter.apply(&companies)), ["MSFT"]);
}

#[test]
fn sort_field_parses_dashboard_names_and_toggles() {
    assert_eq!("total_esg_score".parse::<SortField>().unwrap(), SortField::TotalEsgScore);
    assert_eq!("marketCap".parse::<SortField>().unwrap(), SortField::MarketCap);
    assert!("colour".parse::<SortField>().is_err());
    assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);

    let companies = try_parse_companies(&fixture("processed_sp500_esg_data.csv")).unwrap();
    let mut filter = FilterState::ending_on(d(2024, 1, 1));
    filter.sort_on(SortField::MarketCap);
    assert_eq!(symbols(&filter.apply(&companies)), ["AAPL", "MSFT", "XOM", "JNJ"]);
    filter.sort_on(SortField::MarketCap);
    assert_eq!(filter.sort_direction, SortDirection::Asc);
    assert_eq!(symbols(&filter.apply(&companies)), ["JNJ", "XOM", "MSFT", "AAPL"]);
}

#[test]
fn toggle_company_adds_then_removes() {
    let mut filter = FilterState::ending_on(d(2024, 1, 1));
    filter.toggle_company("AAPL");
    assert_eq!(filter.selected_companies, ["AAPL"]);
    filter.toggle_company("aapl");
    assert!(filter.selected_companies.is_empty());
}

#[test]
fn clip_keeps_points_inside_the_time_range() {
    let table = PriceTable::parse(&fixture("sp500_price_data.csv")).unwrap();
    let series = table.series("AAPL").unwrap();
    let mut filter = FilterState::ending_on(d(2023, 1, 5));
    filter.time_range.0 = d(2023, 1, 4);

    let clipped: Vec<_> = filter.clip(&series).iter().map(|p| p.date).collect();
    assert_eq!(clipped, [d(2023, 1, 4), d(2023, 1, 5)]);
}

#[tokio::test]
async fn store_applies_its_filter_state() {
    let server = httpmock::MockServer::start();
    let _c = mock_companies(&server);
    let _p = mock_prices(&server);
    let client = client_for(&server);
    let store = DashboardStore::new();
    store.load_companies(&client).await;
    store.load_series(&client, "AAPL").await;

    store.filter().set(FilterState::ending_on(d(2023, 1, 4)));
    store.filter().update(|f| f.selected_companies = vec!["JNJ".into(), "MSFT".into()]);

    let visible: Vec<_> = store.filtered_companies().into_iter().map(|c| c.symbol).collect();
    assert_eq!(visible, ["MSFT", "JNJ"]);
    assert_eq!(store.visible_series("AAPL").len(), 2);
}
