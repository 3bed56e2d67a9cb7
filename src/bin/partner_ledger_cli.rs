use std::{env, path::PathBuf, process};

use colored::Colorize;
use partner_ledger::{
    config::{Config, ConfigManager},
    core::{
        services::{PartnerService, SummaryService, TransactionService},
        NetTone,
    },
    currency::{format_currency_value, FormatOptions},
    domain::{Ledger, StatusTone, Transaction, TransactionKind},
    import::legacy::{parse_status, resolve_payers, resolve_recipient},
    init,
    utils::{build_info, persistence},
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| usage_exit());

    let manager = ConfigManager::new()?;
    let config = manager.load()?;

    match command.as_str() {
        "new" => {
            let path = next_path(&mut args);
            let name = args.next().unwrap_or_else(|| usage_exit());
            let ledger = Ledger::new(name);
            persistence::save_ledger_to_file(&ledger, &path)?;
            remember(&manager, &config, &path)?;
            println!("Created ledger `{}` at {}", ledger.name, path.display());
        }
        "balances" => {
            let path = next_path(&mut args);
            let ledger = persistence::load_ledger_from_file(&path)?;
            print_balances(&ledger, &config);
        }
        "summary" => {
            let path = next_path(&mut args);
            let ledger = persistence::load_ledger_from_file(&path)?;
            print_summary(&ledger, &config);
        }
        "add-partner" => {
            let path = next_path(&mut args);
            let name = args.next().unwrap_or_else(|| usage_exit());
            let hint = args.next().map(|raw| raw.parse::<f64>()).transpose()?;
            let mut ledger = persistence::load_ledger_from_file(&path)?;
            PartnerService::add(&mut ledger, &name, hint, config.zero_hint_policy)?;
            persistence::save_ledger_to_file(&ledger, &path)?;
            println!("Partner `{}` added. Equity has been adjusted.", name.trim());
            print_partners(&ledger);
        }
        "remove-partner" => {
            let path = next_path(&mut args);
            let name = args.next().unwrap_or_else(|| usage_exit());
            let mut ledger = persistence::load_ledger_from_file(&path)?;
            let removed = PartnerService::remove_by_name(&mut ledger, &name)?;
            persistence::save_ledger_to_file(&ledger, &path)?;
            println!(
                "Partner `{}` removed. Equity redistributed among remaining partners.",
                removed.name()
            );
            print_partners(&ledger);
        }
        "transactions" => {
            let path = next_path(&mut args);
            let kind = args.next().map(|raw| parse_kind(&raw)).transpose()?;
            let ledger = persistence::load_ledger_from_file(&path)?;
            print_transactions(&ledger, kind, &config);
        }
        "add-transaction" => {
            let path = next_path(&mut args);
            let kind = parse_kind(&args.next().unwrap_or_else(|| usage_exit()))?;
            let amount = args.next().unwrap_or_else(|| usage_exit()).parse::<f64>()?;
            let description = args.next().unwrap_or_else(|| usage_exit());
            let mut ledger = persistence::load_ledger_from_file(&path)?;
            let txn = build_transaction(&ledger, kind, amount, &description, &mut args)?;
            TransactionService::add(&mut ledger, txn)?;
            persistence::save_ledger_to_file(&ledger, &path)?;
            println!("{} `{}` recorded.", kind.label(), description.trim());
        }
        "import" => {
            let source = next_path(&mut args);
            let target = next_path(&mut args);
            let name = args.next().unwrap_or_else(|| "Imported".to_string());
            let snapshot = persistence::load_legacy_snapshot(&source)?;
            let ledger = snapshot.into_ledger(&name);
            persistence::save_ledger_to_file(&ledger, &target)?;
            remember(&manager, &config, &target)?;
            println!(
                "Imported {} partners and {} transactions into {}",
                ledger.partners().len(),
                ledger.transactions.len(),
                target.display()
            );
        }
        "version" => {
            println!("{}", build_info::current().summary());
        }
        _ => usage_exit(),
    }

    Ok(())
}

fn next_path(args: &mut impl Iterator<Item = String>) -> PathBuf {
    args.next()
        .map(PathBuf::from)
        .unwrap_or_else(|| usage_exit())
}

fn parse_kind(raw: &str) -> Result<TransactionKind, String> {
    match raw.to_lowercase().as_str() {
        "expense" => Ok(TransactionKind::Expense),
        "receivable" => Ok(TransactionKind::Receivable),
        "payable" => Ok(TransactionKind::Payable),
        other => Err(format!("unknown transaction kind `{other}`")),
    }
}

/// Reads `--status`, `--settled`, `--paid-by`, `--received-by` and `--notes`
/// options. Partner names are resolved against the ledger here, and a figure
/// embedded in the status label is used unless `--settled` is given.
fn build_transaction(
    ledger: &Ledger,
    kind: TransactionKind,
    amount: f64,
    description: &str,
    args: &mut impl Iterator<Item = String>,
) -> Result<Transaction, Box<dyn std::error::Error>> {
    let mut txn = Transaction::new(description, amount, kind);
    let mut settled_override = None;
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| format!("missing value for {flag}"))?;
        match flag.as_str() {
            "--status" => {
                let (status, settled) = parse_status(&value, amount);
                txn.status = status;
                txn.amount_settled = settled;
            }
            "--settled" => settled_override = Some(value.parse::<f64>()?),
            "--paid-by" => txn.paid_by = resolve_payers(&value, ledger.partners()),
            "--received-by" => txn.received_by = resolve_recipient(&value, ledger.partners()),
            "--notes" => txn.notes = value,
            other => return Err(format!("unknown option {other}").into()),
        }
    }
    if settled_override.is_some() {
        txn.amount_settled = settled_override;
    }
    Ok(txn)
}

fn remember(
    manager: &ConfigManager,
    config: &Config,
    path: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut updated = config.clone();
    updated.last_opened_ledger = Some(path.display().to_string());
    manager.save(&updated)?;
    Ok(())
}

fn money(amount: f64, config: &Config) -> String {
    format_currency_value(
        amount,
        &config.currency_code(),
        &config.locale_config(),
        &FormatOptions::default(),
    )
}

fn print_partners(ledger: &Ledger) {
    for partner in ledger.partners() {
        println!("  {:<16} {:>6.1}%", partner.name(), partner.equity() * 100.0);
    }
}

fn print_balances(ledger: &Ledger, config: &Config) {
    let balances = SummaryService::balances(ledger);
    println!(
        "{:<16} {:>7} {:>16} {:>16} {:>16} {:>16}",
        "Partner", "Equity", "Paid", "Liability", "Receivables", "Net"
    );
    for partner in ledger.partners() {
        let Some(balance) = balances.get(&partner.id()) else {
            continue;
        };
        let net = format!("{:>16}", money(balance.total_net, config));
        let net = match balance.tone() {
            NetTone::Receive => net.as_str().green(),
            NetTone::Pay => net.as_str().red(),
            NetTone::Even => net.as_str().normal(),
        };
        println!(
            "{:<16} {:>6.1}% {:>16} {:>16} {:>16} {}",
            partner.name(),
            partner.equity() * 100.0,
            money(balance.paid, config),
            money(balance.liability, config),
            money(balance.receivables, config),
            net
        );
    }
}

fn print_transactions(ledger: &Ledger, kind: Option<TransactionKind>, config: &Config) {
    for txn in TransactionService::list_by_kind(ledger, kind) {
        let status = format!("{:<10}", txn.status.label());
        let status = match txn.status.tone() {
            StatusTone::Settled => status.as_str().green(),
            StatusTone::Partial => status.as_str().yellow(),
            StatusTone::Overdue => status.as_str().red(),
            StatusTone::Cancelled => status.as_str().dimmed(),
            StatusTone::Open => status.as_str().normal(),
        };
        println!(
            "{:<10} {} {:>16}  {}",
            txn.kind.label(),
            status,
            money(txn.amount, config),
            txn.description
        );
    }
}

fn print_summary(ledger: &Ledger, config: &Config) {
    let totals = SummaryService::totals_by_kind(&ledger.transactions);
    println!("Ledger: {}", ledger.name);
    println!("  Total Expenses:    {}", money(totals.expense, config));
    println!("  Total Receivables: {}", money(totals.receivable, config));
    println!("  Total Payables:    {}", money(totals.payable, config));

    let check = SummaryService::equity_check(ledger, config.equity_tolerance);
    let line = format!("  Total Equity: {:.1}%", check.total * 100.0);
    if check.balanced {
        println!("{line}");
    } else {
        println!(
            "{} {}",
            line.as_str().yellow(),
            format!("({:.1}% unassigned)", check.remaining * 100.0)
                .as_str()
                .yellow()
        );
    }

    println!(
        "{:<16} {:>16} {:>16} {:>16} {:>16}",
        "Partner", "Expenses", "Receivables", "Payables", "Net Balance"
    );
    for row in SummaryService::partner_breakdown(ledger) {
        println!(
            "{:<16} {:>16} {:>16} {:>16} {:>16}",
            row.name,
            money(row.expense_net, config),
            money(row.receivable_net, config),
            money(row.payable_liability, config),
            money(row.net_balance, config)
        );
    }
}

fn usage_exit() -> ! {
    eprintln!(
        "Usage: partner_ledger_cli <command>\n\
         Commands:\n  \
         new <ledger.json> <name>\n  \
         balances <ledger.json>\n  \
         summary <ledger.json>\n  \
         add-partner <ledger.json> <name> [equity]\n  \
         remove-partner <ledger.json> <name>\n  \
         transactions <ledger.json> [expense|receivable|payable]\n  \
         add-transaction <ledger.json> <kind> <amount> <description> [--status S] \
         [--settled N] [--paid-by \"A + B\"] [--received-by R] [--notes N]\n  \
         import <legacy.json> <ledger.json> [name]\n  \
         version"
    );
    process::exit(1);
}
