use std::fs::File;
use std::io::{self, BufReader};

use anyhow::Context;

use bankledger_banking::{Ledger, LedgerConfig};

fn main() -> anyhow::Result<()> {
    bankledger_observability::init();

    let mut ledger = Ledger::with_config(LedgerConfig::from_env());
    let stdout = io::stdout().lock();

    let stats = match std::env::args().nth(1) {
        Some(path) if path != "-" => {
            let file = File::open(&path).with_context(|| format!("failed to open {path}"))?;
            bankledger_replay::replay(&mut ledger, BufReader::new(file), stdout)?
        }
        _ => bankledger_replay::replay(&mut ledger, io::stdin().lock(), stdout)?,
    };

    tracing::info!(
        succeeded = stats.succeeded,
        failed = stats.failed,
        malformed = stats.malformed,
        accounts = ledger.len(),
        "replay finished"
    );
    Ok(())
}
