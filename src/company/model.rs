use serde::Serialize;

/// Score, peer-group mean and peer-group maximum for one ESG pillar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PillarScore {
    /// The company's score for this pillar.
    pub score: f64,
    /// Mean score across the company's peer group.
    pub mean: f64,
    /// Highest score in the company's peer group.
    pub max: f64,
}

/// The ESG rating block of a company.
///
/// Unparsable source values are stored as `0`; no range validation is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EsgScores {
    /// The composite ESG score.
    pub total: f64,
    /// The environmental pillar.
    pub environmental: PillarScore,
    /// The social pillar.
    pub social: PillarScore,
    /// The governance pillar.
    pub governance: PillarScore,
    /// Percentile rank of the total score among peers.
    pub percentile: f64,
    /// Year the rating was issued (`0` when unknown).
    pub rating_year: u16,
    /// Month the rating was issued, 1-12 (`0` when unknown).
    pub rating_month: u8,
}

/// One S&P 500 constituent with its classification, market data and ESG rating.
///
/// `symbol` is the unique key within a loaded set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub symbol: String,
    pub full_name: String,
    pub gics_sector: String,
    pub gics_sub_industry: String,
    pub industry_code: String,
    pub industry_name: String,
    /// Free-text note on how complete the ESG coverage is.
    pub data_availability: String,
    pub location: String,
    pub market_cap: f64,
    pub beta: f64,
    pub overall_risk: f64,
    #[serde(rename = "esgScores")]
    pub esg: EsgScores,
}
