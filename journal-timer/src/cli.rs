use clap::{Parser, Subcommand, ValueEnum};

use crate::remote::OpKind;

#[derive(Debug, Parser)]
#[command(name = "journal-timer")]
#[command(about = "Track time worked on your journal and submit it to the journal's spreadsheet")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the journals' Google Sheets
    Run,
    /// Run in dev mode with local in-memory journals
    Dev {
        /// Delay every remote call by this many milliseconds
        #[arg(long, default_value_t = 0)]
        latency_ms: u64,
        /// Make one kind of remote call always fail
        #[arg(long, value_enum)]
        fail: Option<FailingCall>,
    },
    /// Print config path and create default file if missing
    ConfigPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailingCall {
    Names,
    Categories,
    Submit,
}

impl From<FailingCall> for OpKind {
    fn from(call: FailingCall) -> Self {
        match call {
            FailingCall::Names => OpKind::FetchNames,
            FailingCall::Categories => OpKind::FetchCategories,
            FailingCall::Submit => OpKind::AppendTime,
        }
    }
}
