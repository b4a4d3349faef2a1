use esg_dashboard::{EsgError, parse_companies, try_parse_companies};

#[test]
fn quoted_thousands_separator_parses_as_one_number() {
    let companies = try_parse_companies("symbol,marketCap\nAAPL,\"2,500\"\n").unwrap();

    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].symbol, "AAPL");
    assert_eq!(companies[0].market_cap, 2500.0);
}

#[test]
fn every_valid_row_becomes_a_record() {
    let text = "symbol,fullName,total_esg_score\nA,Agilent,14.1\nB,Ball,20\nC,Citi,25.5\n";
    let companies = try_parse_companies(text).unwrap();

    let symbols: Vec<_> = companies.iter().map(|c| c.symbol.as_str()).collect();
    assert_eq!(symbols, ["A", "B", "C"]);
    assert_eq!(companies[2].esg.total, 25.5);
}

#[test]
fn unparsable_numbers_default_to_zero_without_aborting() {
    let text = "symbol,beta,total_esg_score,ratingYear\nAAA,abc,12.5,soon\nBBB,1.1,--,2022\n";
    let companies = try_parse_companies(text).unwrap();

    assert_eq!(companies.len(), 2);
    assert_eq!(companies[0].beta, 0.0);
    assert_eq!(companies[0].esg.total, 12.5);
    assert_eq!(companies[0].esg.rating_year, 0);
    assert_eq!(companies[1].esg.total, 0.0);
    assert_eq!(companies[1].esg.rating_year, 2022);
}

#[test]
fn quoted_comma_stays_in_one_column() {
    let text = "symbol,location,beta\nAAPL,\"Cupertino, California\",1.2\n";
    let companies = try_parse_companies(text).unwrap();

    assert_eq!(companies[0].location, "Cupertino, California");
    assert_eq!(companies[0].beta, 1.2);
}

#[test]
fn headers_match_by_normalized_name_in_any_order() {
    let text = "Total ESG Score, MARKET-CAP ,Ticker,Full Name\n18.0,\"1,000\",KO,\"Coca-Cola  Co\"\n";
    let companies = try_parse_companies(text).unwrap();

    let ko = &companies[0];
    assert_eq!(ko.symbol, "KO");
    assert_eq!(ko.full_name, "Coca-Cola Co");
    assert_eq!(ko.market_cap, 1000.0);
    assert_eq!(ko.esg.total, 18.0);
    assert_eq!(ko.industry_name, "");
}

#[test]
fn missing_name_falls_back_to_symbol_inc() {
    let companies = try_parse_companies("symbol,fullName\nZZZ,\n").unwrap();
    assert_eq!(companies[0].full_name, "ZZZ Inc.");
}

#[test]
fn short_rows_read_missing_cells_as_empty() {
    let companies = try_parse_companies("symbol,fullName,beta,location\nXYZ,Xyz Corp\n").unwrap();

    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].beta, 0.0);
    assert_eq!(companies[0].location, "");
}

#[test]
fn missing_symbol_header_is_reported_and_degrades_to_empty() {
    let text = "name,beta\nApple,1.2\n";

    match try_parse_companies(text) {
        Err(EsgError::MissingHeaders(cols)) => assert_eq!(cols, vec!["symbol".to_string()]),
        other => panic!("expected MissingHeaders, got {other:?}"),
    }
    assert!(parse_companies(text).is_empty());
}

#[test]
fn empty_and_header_only_text_yield_no_data() {
    assert!(matches!(try_parse_companies("   \n"), Err(EsgError::EmptyBody { .. })));
    assert!(matches!(try_parse_companies("symbol,beta\n"), Err(EsgError::NoRows)));
    assert!(parse_companies("").is_empty());
    assert!(parse_companies("symbol,beta\n\n").is_empty());
}

#[test]
fn rows_without_symbol_are_dropped_and_all_dropped_means_no_rows() {
    let text = "symbol,beta\n,1.0\n  ,2.0\n";
    assert!(matches!(try_parse_companies(text), Err(EsgError::NoRows)));
}

#[test]
fn serializes_with_camel_case_keys() {
    let companies = try_parse_companies("symbol,fullName,ratingMonth\nAAPL,Apple,9\n").unwrap();
    let json = serde_json::to_value(&companies[0]).unwrap();

    assert_eq!(json["fullName"], "Apple");
    assert_eq!(json["esgScores"]["ratingMonth"], 9);
    assert!(json["esgScores"]["environmental"]["score"].is_number());
}
