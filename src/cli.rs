use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "photosheet")]
#[command(author, version, about = "Telegram bot that files photos into Google Drive and Google Sheets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot
    Run {
        /// Use webhook mode instead of long polling (overrides BOT_MODE)
        #[arg(long)]
        webhook: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
