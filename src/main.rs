#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = registra_rust::run().await {
        eprintln!("registra-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
