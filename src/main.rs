use std::process::ExitCode;

use clap::Parser;
use goodreads_mcp::interface::cli::{write_interrupted, Cli};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // stdoutはCLI出力とMCP stdioが使うため、ログはstderrへ
    let default_filter = format!("{}=info", env!("CARGO_CRATE_NAME"));
    let env_filter = std::env::var("RUST_LOG").unwrap_or(default_filter);
    fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // .env があれば読む（既存の環境変数は上書きしない）
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let server_mode = cli.is_server_mode();

    tokio::select! {
        code = goodreads_mcp::run(cli) => code,
        _ = tokio::signal::ctrl_c() => {
            // MCPモードではstdoutがプロトコル用なのでstderrへ
            if server_mode {
                write_interrupted(&mut std::io::stderr())?;
            } else {
                write_interrupted(&mut std::io::stdout())?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
