use anyhow::{Context as _, Result};
use console::{style, Alignment, StyledObject};
use std::path::Path;

use crate::args::{Args, Command};
use crate::audit::{self, DateRange};
use crate::coda_api::{self, Coda};
use crate::config::Settings;
use crate::import;
use crate::model::{Account, SourceKind};
use crate::report::{self, style_amount, style_date, style_description, style_header};
use crate::terminal::{StdoutLineWriter, Table};

pub async fn main(args: Args) -> Result<()> {
    match args.command {
        Command::Audit {
            filepath,
            source,
            account,
            start_date,
            end_date,
        } => {
            let range = DateRange::new(start_date, end_date)?;
            let cli = Cli::new(&args.config)?;
            cli.main_audit(&filepath, source, &account, range).await
        }
        Command::ListAccounts => Cli::new(&args.config)?.main_list_accounts().await,
        Command::ShowTransactions { filepath, source } => {
            main_show_transactions(&filepath, source)
        }
    }
}

pub struct Cli {
    settings: Settings,
    coda: Coda,
}

impl Cli {
    pub fn new(config: &str) -> Result<Self> {
        let settings = Settings::load(config)?;
        let coda = Coda::new(settings.coda.clone());
        Ok(Self { settings, coda })
    }

    pub async fn main_audit(
        &self,
        filepath: &Path,
        source: SourceKind,
        account_name: &str,
        range: DateRange,
    ) -> Result<()> {
        let transactions = import::load(source, filepath)?;
        let account = coda_api::resolve_account(&self.coda, account_name)
            .await
            .context("Failed to look up account")?;
        log::info!(
            "Auditing {} ({}) against {source} export",
            account.name,
            account.directionality
        );

        let (fetch_range, _) = range.capped(self.settings.audit.max_days);
        let entries = coda_api::fetch_range(&self.coda, fetch_range)
            .await
            .context("Failed to fetch ledger entries")?;

        let verdict = audit::audit_range(
            &account,
            &transactions,
            &entries,
            range.start(),
            range.end(),
            self.settings.audit.max_days,
        )?;

        report::print_header(&StdoutLineWriter, &account, source);
        report::print_verdict(StdoutLineWriter, &verdict);
        Ok(())
    }

    pub async fn main_list_accounts(&self) -> Result<()> {
        let accounts = coda_api::list_accounts(&self.coda, None)
            .await
            .context("Failed to list accounts")?;

        println!("{}", style_header("Accounts:"));
        if accounts.is_empty() {
            println!("(none)");
            return Ok(());
        }
        let mut table = Table::new(&["Name", "Id", "Type"]);
        for account in &accounts {
            table.add_row(vec![
                style_account(account).to_string(),
                account.id.to_string(),
                account.directionality.to_string(),
            ]);
        }
        table.print(&StdoutLineWriter);
        Ok(())
    }
}

fn main_show_transactions(filepath: &Path, source: SourceKind) -> Result<()> {
    let transactions = import::load(source, filepath)?;

    println!("{}", style_header(&format!("{source} transactions:")));
    if transactions.is_empty() {
        println!("(none)");
        return Ok(());
    }
    let mut table = Table::new(&["Date", "Amount", "Description"]).align(1, Alignment::Right);
    for transaction in &transactions {
        table.add_row(vec![
            style_date(&transaction.date).to_string(),
            style_amount(&transaction.amount).to_string(),
            style_description(&transaction.description).to_string(),
        ]);
    }
    table.print(&StdoutLineWriter);
    Ok(())
}

fn style_account(account: &Account) -> StyledObject<&str> {
    style(account.name.as_str()).magenta()
}
