use anyhow::{bail, Context, Result};
use bank_account::{Account, AccountPolicy};
use chrono::{DateTime, Utc};
use std::env;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage:
  bank-account open <number> <balance> <holder> <type> [--date RFC3339] [--policy FILE]
  bank-account transfer <from-holder> <from-balance> <to-holder> <to-balance> <amount>
                        [--from-number N] [--to-number N] [--policy FILE]

transfer opens two Savings accounts, numbered 10001 and 10002 unless overridden.";

const DEFAULT_FROM_NUMBER: &str = "10001";
const DEFAULT_TO_NUMBER: &str = "10002";

/// Flags shared by all commands, split from positional arguments
#[derive(Debug)]
struct Options {
    positional: Vec<String>,
    date: Option<String>,
    policy: Option<String>,
    from_number: Option<String>,
    to_number: Option<String>,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr, stdout carries only statements
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!("missing command\n{}", USAGE);
    };

    let options = parse_options(rest)?;

    match command.as_str() {
        "open" => run_open(&options),
        "transfer" => run_transfer(&options),
        other => bail!("unknown command: {}\n{}", other, USAGE),
    }
}

fn parse_options(args: &[String]) -> Result<Options> {
    let mut options = Options {
        positional: Vec::new(),
        date: None,
        policy: None,
        from_number: None,
        to_number: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--date" => {
                options.date = Some(iter.next().context("--date requires a value")?.clone());
            }
            "--policy" => {
                options.policy = Some(iter.next().context("--policy requires a value")?.clone());
            }
            "--from-number" => {
                options.from_number = Some(iter.next().context("--from-number requires a value")?.clone());
            }
            "--to-number" => {
                options.to_number = Some(iter.next().context("--to-number requires a value")?.clone());
            }
            _ => options.positional.push(arg.clone()),
        }
    }

    Ok(options)
}

fn load_policy(options: &Options) -> Result<AccountPolicy> {
    match &options.policy {
        Some(path) => AccountPolicy::from_file(path),
        None => Ok(AccountPolicy::default()),
    }
}

fn parse_amount(value: &str, name: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .with_context(|| format!("Invalid {}: {}", name, value))
}

fn run_open(options: &Options) -> Result<()> {
    let [number, balance, holder, account_type] = options.positional.as_slice() else {
        bail!("open expects 4 arguments\n{}", USAGE);
    };

    let policy = load_policy(options)?;
    let now = Utc::now();
    let date_opened = match &options.date {
        Some(date) => DateTime::parse_from_rfc3339(date)
            .with_context(|| format!("Invalid --date: {}", date))?
            .with_timezone(&Utc),
        None => now,
    };

    let account = Account::with_policy(
        number.as_str(),
        parse_amount(balance, "balance")?,
        holder.as_str(),
        account_type.as_str(),
        date_opened,
        policy,
        now,
    )
    .context("Failed to open account")?;

    let mut out = io::stdout().lock();
    account.print_statement(&mut out)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&account)?)?;

    Ok(())
}

fn run_transfer(options: &Options) -> Result<()> {
    let [from_holder, from_balance, to_holder, to_balance, amount] = options.positional.as_slice() else {
        bail!("transfer expects 5 arguments\n{}", USAGE);
    };

    let policy = load_policy(options)?;
    let now = Utc::now();

    let mut from = Account::with_policy(
        options.from_number.as_deref().unwrap_or(DEFAULT_FROM_NUMBER),
        parse_amount(from_balance, "from-balance")?,
        from_holder.as_str(),
        "Savings",
        now,
        policy.clone(),
        now,
    )
    .context("Failed to open source account")?;

    let mut to = Account::with_policy(
        options.to_number.as_deref().unwrap_or(DEFAULT_TO_NUMBER),
        parse_amount(to_balance, "to-balance")?,
        to_holder.as_str(),
        "Savings",
        now,
        policy,
        now,
    )
    .context("Failed to open target account")?;

    let amount = parse_amount(amount, "amount")?;
    from.transfer(&mut to, amount)
        .with_context(|| format!("Transfer of {} failed", amount))?;

    let mut out = io::stdout().lock();
    from.print_statement(&mut out)?;
    to.print_statement(&mut out)?;

    Ok(())
}
