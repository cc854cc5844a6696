use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("market error: {0}")]
    Market(#[from] rumor_market::MarketError),

    #[error("ledger error: {0}")]
    Ledger(#[from] rumor_ledger::LedgerError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
