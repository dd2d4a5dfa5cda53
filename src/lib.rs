//! goodreads-mcp
//!
//! getgather経由でGoodreadsの本棚を取得し、CLIとMCP Serverの2経路で公開する。

pub mod domain {
    pub mod error;
    pub mod model {
        pub mod book;
    }
    pub mod translate;
    pub mod transport;
}

pub mod application {
    pub mod config;
    pub mod error;
    pub mod service;
}

pub mod infra {
    pub mod http;
}

pub mod interface {
    pub mod cli;
    pub mod mcp;
}

use std::process::ExitCode;

use application::config::ServerConfig;
use interface::cli::{Cli, Command};

/// サブコマンドがあればCLI、なければMCP Serverを起動する。
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Some(Command::GetBooks(args)) => {
            let outcome = interface::cli::get_books(&args, &mut std::io::stdout()).await?;
            Ok(outcome.into())
        }
        None => {
            interface::mcp::run(ServerConfig::from_env()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
