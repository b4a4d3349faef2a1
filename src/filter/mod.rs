//! Selection, filter and sort state for the company table and charts.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate, Utc};
use serde::Serialize;

use crate::company::Company;
use crate::core::EsgError;
use crate::prices::PricePoint;
use crate::table::normalize_header;

/// Column the company list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Symbol,
    FullName,
    Sector,
    Industry,
    Location,
    TotalEsgScore,
    EnvironmentalScore,
    SocialScore,
    GovernanceScore,
    Percentile,
    MarketCap,
    Beta,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Symbol => "symbol",
            SortField::FullName => "full_name",
            SortField::Sector => "gics_sector",
            SortField::Industry => "industry_name",
            SortField::Location => "location",
            SortField::TotalEsgScore => "total_esg_score",
            SortField::EnvironmentalScore => "environmental_score",
            SortField::SocialScore => "social_score",
            SortField::GovernanceScore => "governance_score",
            SortField::Percentile => "percentile",
            SortField::MarketCap => "market_cap",
            SortField::Beta => "beta",
        }
    }

    fn compare(self, a: &Company, b: &Company) -> Ordering {
        let num = |x: f64, y: f64| x.total_cmp(&y);
        match self {
            SortField::Symbol => a.symbol.cmp(&b.symbol),
            SortField::FullName => a.full_name.cmp(&b.full_name),
            SortField::Sector => a.gics_sector.cmp(&b.gics_sector),
            SortField::Industry => a.industry_name.cmp(&b.industry_name),
            SortField::Location => a.location.cmp(&b.location),
            SortField::TotalEsgScore => num(a.esg.total, b.esg.total),
            SortField::EnvironmentalScore => {
                num(a.esg.environmental.score, b.esg.environmental.score)
            }
            SortField::SocialScore => num(a.esg.social.score, b.esg.social.score),
            SortField::GovernanceScore => num(a.esg.governance.score, b.esg.governance.score),
            SortField::Percentile => num(a.esg.percentile, b.esg.percentile),
            SortField::MarketCap => num(a.market_cap, b.market_cap),
            SortField::Beta => num(a.beta, b.beta),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = EsgError;

    /// Accepts field names in any case or separator style (`marketCap`, `market_cap`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match normalize_header(s).as_str() {
            "symbol" | "ticker" => SortField::Symbol,
            "fullname" | "name" => SortField::FullName,
            "gicssector" | "sector" => SortField::Sector,
            "industryname" | "industry" => SortField::Industry,
            "location" => SortField::Location,
            "totalesgscore" | "totalesg" | "esgscore" | "total" => SortField::TotalEsgScore,
            "environmentalscore" | "environmental" => SortField::EnvironmentalScore,
            "socialscore" | "social" => SortField::SocialScore,
            "governancescore" | "governance" => SortField::GovernanceScore,
            "percentile" => SortField::Percentile,
            "marketcap" => SortField::MarketCap,
            "beta" => SortField::Beta,
            _ => return Err(EsgError::Data(format!("unknown sort field: {s}"))),
        };
        Ok(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = EsgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(EsgError::Data(format!("unknown sort direction: {other}"))),
        }
    }
}

/// What the user has narrowed the dashboard down to.
///
/// Empty selection lists mean "no restriction".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Inclusive `(start, end)` window applied to price series.
    pub time_range: (NaiveDate, NaiveDate),
    /// Matched against `Company::gics_sector`.
    pub selected_sectors: Vec<String>,
    /// Matched against `Company::industry_name` or `Company::gics_sub_industry`.
    pub selected_industries: Vec<String>,
    /// Matched against `Company::symbol`.
    pub selected_companies: Vec<String>,
    pub location_filter: Vec<String>,
    /// Inclusive bounds on the total ESG score.
    pub esg_score_range: (f64, f64),
    pub data_availability_filter: Vec<String>,
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
}

impl Default for FilterState {
    /// The year ending today, scores 0-100, sorted by total ESG score descending.
    fn default() -> Self {
        let today = Utc::now().date_naive();
        Self::ending_on(today)
    }
}

fn any_match(selected: &[String], value: &str) -> bool {
    selected.is_empty() || selected.iter().any(|s| s.eq_ignore_ascii_case(value))
}

impl FilterState {
    /// Default state with a one-year time range ending on `end`.
    pub fn ending_on(end: NaiveDate) -> Self {
        let start = end.checked_sub_months(Months::new(12)).unwrap_or(end);
        Self {
            time_range: (start, end),
            selected_sectors: Vec::new(),
            selected_industries: Vec::new(),
            selected_companies: Vec::new(),
            location_filter: Vec::new(),
            esg_score_range: (0.0, 100.0),
            data_availability_filter: Vec::new(),
            sort_by: SortField::TotalEsgScore,
            sort_direction: SortDirection::Desc,
        }
    }

    /// True when `company` passes every active filter.
    pub fn matches(&self, company: &Company) -> bool {
        let (lo, hi) = self.esg_score_range;
        any_match(&self.selected_sectors, &company.gics_sector)
            && (any_match(&self.selected_industries, &company.industry_name)
                || any_match(&self.selected_industries, &company.gics_sub_industry))
            && any_match(&self.selected_companies, &company.symbol)
            && any_match(&self.location_filter, &company.location)
            && any_match(&self.data_availability_filter, &company.data_availability)
            && company.esg.total >= lo
            && company.esg.total <= hi
    }

    /// Filters `companies` and orders the survivors by `sort_by` / `sort_direction`.
    ///
    /// Ties are broken by symbol, ascending, regardless of direction.
    pub fn apply<'a>(&self, companies: &'a [Company]) -> Vec<&'a Company> {
        let mut out: Vec<&Company> = companies.iter().filter(|c| self.matches(c)).collect();
        out.sort_by(|a, b| {
            let primary = self.sort_by.compare(a, b);
            let primary = match self.sort_direction {
                SortDirection::Asc => primary,
                SortDirection::Desc => primary.reverse(),
            };
            primary.then_with(|| a.symbol.cmp(&b.symbol))
        });
        out
    }

    /// Points of `series` that fall inside `time_range`.
    pub fn clip(&self, series: &[PricePoint]) -> Vec<PricePoint> {
        let (start, end) = self.time_range;
        series
            .iter()
            .filter(|p| p.date >= start && p.date <= end)
            .copied()
            .collect()
    }

    /// Toggles `symbol` in `selected_companies`.
    pub fn toggle_company(&mut self, symbol: &str) {
        if let Some(pos) = self
            .selected_companies
            .iter()
            .position(|s| s.eq_ignore_ascii_case(symbol))
        {
            self.selected_companies.remove(pos);
        } else {
            self.selected_companies.push(symbol.to_string());
        }
    }

    /// Sorts by `field`; choosing the current field again flips the direction.
    pub fn sort_on(&mut self, field: SortField) {
        if self.sort_by == field {
            self.sort_direction = self.sort_direction.reversed();
        } else {
            self.sort_by = field;
            self.sort_direction = SortDirection::Desc;
        }
    }
}
