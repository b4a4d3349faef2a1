use esg_dashboard::{DashboardStore, EsgClient, SortField};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    esg_dashboard::init_tracing();

    let client = EsgClient::default();
    let store = DashboardStore::global();

    let mut updates = store.companies().subscribe();
    let watcher = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            println!("company store now holds {} records", updates.borrow().len());
        }
    });

    store.load_companies(&client).await;
    store.filter().update(|f| {
        f.selected_sectors = vec!["Energy".into()];
        f.sort_on(SortField::MarketCap);
    });

    for c in store.filtered_companies() {
        println!("{:<6} {:>18.0} {:>5.1}", c.symbol, c.market_cap, c.esg.total);
    }

    if let Some(top) = store.filtered_companies().first() {
        store.select(Some(&top.symbol));
        let points = store.load_series(&client, &top.symbol).await;
        println!("{}: {points} price points, {} in range", top.symbol, store.visible_series(&top.symbol).len());
    }

    watcher.abort();
    Ok(())
}
