use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = ledger_audit::args::parse();
    ledger_audit::cli::main(args).await
}
