use esg_dashboard::{DirSource, PriceLoader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let dir = args.next().unwrap_or_else(|| "static".into());
    let symbol = args.next().unwrap_or_else(|| "AAPL".into());

    let source = DirSource::new(dir);
    let table = PriceLoader::new(&source).fetch_table().await?;
    println!("{} tickers over {} days", table.symbols().len(), table.len());

    let series = table.series(&symbol)?;
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        let change = (last.price / first.price - 1.0) * 100.0;
        println!(
            "{symbol}: {} -> {} ({:.2} -> {:.2}, {change:+.1}%)",
            first.date, last.date, first.price, last.price
        );
    }
    Ok(())
}
