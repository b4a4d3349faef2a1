use std::time::Duration;

use esg_dashboard::{CompanyLoader, EsgClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = std::env::var("ESG_BASE_URL").unwrap_or_else(|_| "http://localhost:5173/".into());
    let client = EsgClient::builder()
        .base_url(url::Url::parse(&base)?)
        .timeout(Duration::from_secs(10))
        .build()?;

    let companies = CompanyLoader::new(&client).fetch().await?;
    println!("--- {} companies ---", companies.len());
    for c in companies.iter().take(10) {
        println!(
            "{:<6} {:<40} total {:>5.1}  E {:>4.1}  S {:>4.1}  G {:>4.1}",
            c.symbol,
            c.full_name,
            c.esg.total,
            c.esg.environmental.score,
            c.esg.social.score,
            c.esg.governance.score,
        );
    }
    Ok(())
}
