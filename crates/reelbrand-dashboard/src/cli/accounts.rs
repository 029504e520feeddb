/*
[INPUT]:  ReelbrandClient
[OUTPUT]: Account cards and raw account JSON on stdout
[POS]:    CLI accounts listing
[UPDATE]: When account card contents change
*/

use anyhow::{Context, Result, bail};
use chrono::Local;
use console::style;

use reelbrand_adapter::{AccountStatus, ReelbrandClient};
use reelbrand_dashboard::accounts::{EMPTY_ACCOUNTS_MESSAGE, fetch_accounts, summarize};

pub async fn list_accounts(client: &ReelbrandClient) -> Result<()> {
    let accounts = fetch_accounts(client).await;
    if accounts.is_empty() {
        println!("{}", style(EMPTY_ACCOUNTS_MESSAGE).yellow());
        return Ok(());
    }

    let today = Local::now().date_naive();
    for account in &accounts {
        let summary = summarize(account, today);
        let status = match summary.status {
            AccountStatus::Connected => style(summary.status.label()).green(),
            AccountStatus::Syncing => style(summary.status.label()).yellow(),
            AccountStatus::Error | AccountStatus::Unknown => style(summary.status.label()).red(),
        };
        let id = account.id().unwrap_or_else(|| "-".to_string());
        println!(
            "{} {} [{}] {}",
            style(&summary.title).bold(),
            style(format!("({})", summary.platform)).dim(),
            status,
            style(format!("id={id}")).dim()
        );
        let stats: Vec<String> = summary
            .stats
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();
        println!("    {}", stats.join(" | "));
        if let Some(expiry) = &summary.token_expiry {
            let label = expiry.label();
            if expiry.needs_attention() {
                println!("    {}", style(label).red());
            } else {
                println!("    {}", style(label).dim());
            }
        }
    }
    Ok(())
}

pub async fn show_account(client: &ReelbrandClient, id: &str) -> Result<()> {
    let account = match client.get_account(id).await {
        Ok(account) => account,
        Err(err) if err.is_not_found() => bail!("account {id} not found"),
        Err(err) => return Err(err).with_context(|| format!("fetch account {id}")),
    };
    let pretty = serde_json::to_string_pretty(&account).context("render account")?;
    println!("{pretty}");
    Ok(())
}
