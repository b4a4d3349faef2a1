use esg_dashboard::{CompanyLoader, DirSource};

use crate::common::{client_for, fixture, mock_companies};

#[tokio::test]
async fn loads_company_fixture_over_http() {
    let server = httpmock::MockServer::start();
    let mock = mock_companies(&server);
    let client = client_for(&server);

    let companies = CompanyLoader::new(&client).fetch().await.unwrap();
    mock.assert();

    let symbols: Vec<_> = companies.iter().map(|c| c.symbol.as_str()).collect();
    assert_eq!(symbols, ["AAPL", "MSFT", "XOM", "JNJ"], "blank and duplicate symbols are dropped");

    let aapl = &companies[0];
    assert_eq!(aapl.full_name, "Apple Inc.");
    assert_eq!(aapl.location, "Cupertino, California");
    assert_eq!(aapl.market_cap, 2_950_000_000_000.0);
    assert_eq!(aapl.esg.total, 17.2);
    assert_eq!(aapl.esg.governance.max, 13.3);
    assert_eq!((aapl.esg.rating_year, aapl.esg.rating_month), (2023, 9));

    let jnj = &companies[3];
    assert_eq!(jnj.full_name, "JNJ Inc.");
    assert_eq!(jnj.esg.total, 0.0, "n/a total defaults to zero");
    assert_eq!(jnj.esg.rating_year, 2023);
}

#[tokio::test]
async fn custom_path_overrides_the_default() {
    let server = httpmock::MockServer::start();
    let mock = crate::common::mock_csv(&server, "/data/esg.csv", "symbol\nIBM\n");
    let client = client_for(&server);

    let companies = CompanyLoader::new(&client)
        .path("data/esg.csv")
        .fetch()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].full_name, "IBM Inc.");
}

#[tokio::test]
async fn loads_company_fixture_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("esg.csv"),
        fixture("processed_sp500_esg_data.csv"),
    )
    .unwrap();

    let source = DirSource::new(dir.path()).with_company_path("esg.csv");
    let companies = CompanyLoader::new(&source).fetch().await.unwrap();

    assert_eq!(companies.len(), 4);
}
