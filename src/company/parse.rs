use std::collections::HashSet;

use crate::company::model::{Company, EsgScores, PillarScore};
use crate::core::EsgError;
use crate::core::conversions::{clean_company_name, number_or_zero, whole_number_or_zero};
use crate::table::{CsvTable, HeaderMap, TableRow};

// Header aliases, compared after normalization.
const SYMBOL: &[&str] = &["symbol", "ticker"];
const FULL_NAME: &[&str] = &["fullName", "name", "companyName", "shortName", "longName"];
const GICS_SECTOR: &[&str] = &["gicsSector", "sector"];
const GICS_SUB_INDUSTRY: &[&str] = &["gicsSubIndustry", "subIndustry"];
const INDUSTRY_CODE: &[&str] = &["industry_code"];
const INDUSTRY_NAME: &[&str] = &["industry_name", "industry"];
const DATA_AVAILABILITY: &[&str] = &["data_availability"];
const LOCATION: &[&str] = &["location", "headquarters", "country"];
const TOTAL_ESG: &[&str] = &["total_esg_score", "totalEsg", "esg_score"];
const ENV_SCORE: &[&str] = &["environmental_score", "environment_score"];
const ENV_MEAN: &[&str] = &["environmental_mean", "environment_mean"];
const ENV_MAX: &[&str] = &["environmental_max", "environment_max"];
const SOCIAL_SCORE: &[&str] = &["social_score"];
const SOCIAL_MEAN: &[&str] = &["social_mean"];
const SOCIAL_MAX: &[&str] = &["social_max"];
const GOV_SCORE: &[&str] = &["governance_score"];
const GOV_MEAN: &[&str] = &["governance_mean"];
const GOV_MAX: &[&str] = &["governance_max"];
const PERCENTILE: &[&str] = &["percentile", "esg_percentile"];
const RATING_YEAR: &[&str] = &["ratingYear"];
const RATING_MONTH: &[&str] = &["ratingMonth"];
const MARKET_CAP: &[&str] = &["marketCap", "market_capitalization"];
const BETA: &[&str] = &["beta"];
const OVERALL_RISK: &[&str] = &["overallRisk"];

/// Resolved column positions for every company field.
struct Columns {
    symbol: Option<usize>,
    full_name: Option<usize>,
    gics_sector: Option<usize>,
    gics_sub_industry: Option<usize>,
    industry_code: Option<usize>,
    industry_name: Option<usize>,
    data_availability: Option<usize>,
    location: Option<usize>,
    total: Option<usize>,
    environmental: [Option<usize>; 3],
    social: [Option<usize>; 3],
    governance: [Option<usize>; 3],
    percentile: Option<usize>,
    rating_year: Option<usize>,
    rating_month: Option<usize>,
    market_cap: Option<usize>,
    beta: Option<usize>,
    overall_risk: Option<usize>,
}

impl Columns {
    fn resolve(h: &HeaderMap) -> Self {
        Self {
            symbol: h.find(SYMBOL),
            full_name: h.find(FULL_NAME),
            gics_sector: h.find(GICS_SECTOR),
            gics_sub_industry: h.find(GICS_SUB_INDUSTRY),
            industry_code: h.find(INDUSTRY_CODE),
            industry_name: h.find(INDUSTRY_NAME),
            data_availability: h.find(DATA_AVAILABILITY),
            location: h.find(LOCATION),
            total: h.find(TOTAL_ESG),
            environmental: [h.find(ENV_SCORE), h.find(ENV_MEAN), h.find(ENV_MAX)],
            social: [h.find(SOCIAL_SCORE), h.find(SOCIAL_MEAN), h.find(SOCIAL_MAX)],
            governance: [h.find(GOV_SCORE), h.find(GOV_MEAN), h.find(GOV_MAX)],
            percentile: h.find(PERCENTILE),
            rating_year: h.find(RATING_YEAR),
            rating_month: h.find(RATING_MONTH),
            market_cap: h.find(MARKET_CAP),
            beta: h.find(BETA),
            overall_risk: h.find(OVERALL_RISK),
        }
    }
}

fn pillar(row: &TableRow<'_>, cols: [Option<usize>; 3]) -> PillarScore {
    let [score, mean, max] = cols;
    PillarScore {
        score: number_or_zero(row.cell(score)),
        mean: number_or_zero(row.cell(mean)),
        max: number_or_zero(row.cell(max)),
    }
}

fn build_company(row: &TableRow<'_>, c: &Columns) -> Result<Company, EsgError> {
    let symbol = row.cell(c.symbol).trim().to_string();
    if symbol.is_empty() {
        return Err(EsgError::Data("row has no symbol".into()));
    }

    let raw_name = clean_company_name(row.cell(c.full_name));
    let full_name = if raw_name.is_empty() {
        format!("{symbol} Inc.")
    } else {
        raw_name
    };

    let text = |idx: Option<usize>| row.cell(idx).to_string();

    Ok(Company {
        full_name,
        gics_sector: text(c.gics_sector),
        gics_sub_industry: text(c.gics_sub_industry),
        industry_code: text(c.industry_code),
        industry_name: text(c.industry_name),
        data_availability: text(c.data_availability),
        location: text(c.location),
        market_cap: number_or_zero(row.cell(c.market_cap)),
        beta: number_or_zero(row.cell(c.beta)),
        overall_risk: number_or_zero(row.cell(c.overall_risk)),
        esg: EsgScores {
            total: number_or_zero(row.cell(c.total)),
            environmental: pillar(row, c.environmental),
            social: pillar(row, c.social),
            governance: pillar(row, c.governance),
            percentile: number_or_zero(row.cell(c.percentile)),
            rating_year: whole_number_or_zero(row.cell(c.rating_year)),
            rating_month: whole_number_or_zero(row.cell(c.rating_month)),
        },
        symbol,
    })
}

/// Parses company / ESG metadata CSV text, surfacing total failures.
///
/// Column order does not matter: headers are matched by normalized name. Only a
/// symbol column is required. Rows without a symbol, and repeats of a symbol
/// already seen, are logged and skipped.
///
/// # Errors
/// [`EsgError::EmptyBody`], [`EsgError::NoRows`] or [`EsgError::MissingHeaders`]
/// when there is nothing usable in `text`.
pub fn try_parse_companies(text: &str) -> Result<Vec<Company>, EsgError> {
    let table = CsvTable::parse(text)?;
    table.require(&[("symbol", SYMBOL)])?;

    let cols = Columns::resolve(table.headers());
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(table.len());

    for row in table.rows() {
        match build_company(&row, &cols) {
            Ok(company) => {
                if seen.insert(company.symbol.clone()) {
                    out.push(company);
                } else {
                    tracing::warn!(symbol = %company.symbol, line = ?row.line(), "dropping duplicate symbol");
                }
            }
            Err(e) => tracing::warn!(line = ?row.line(), error = %e, "dropping company row"),
        }
    }

    if out.is_empty() {
        return Err(EsgError::NoRows);
    }
    tracing::debug!(companies = out.len(), "parsed company data");
    Ok(out)
}

/// Parses company / ESG metadata CSV text, degrading every failure to an empty list.
///
/// The error is logged; callers see "no data" whether the text was empty, had no
/// valid rows, or lacked a symbol column.
pub fn parse_companies(text: &str) -> Vec<Company> {
    try_parse_companies(text).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to parse company data");
        Vec::new()
    })
}
