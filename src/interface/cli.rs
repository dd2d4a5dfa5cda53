//! CLI for goodreads-mcp
//!
//! `get-books` で一度だけ取得して表示する。サブコマンド無しはMCP Server。

use std::io::Write;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::application::config::{Credentials, DEFAULT_HOST};
use crate::application::error::AppError;
use crate::application::service::GoodreadsService;
use crate::domain::model::book::AuthResponse;
use crate::domain::transport::Transport;
use crate::infra::http::ReqwestTransport;

#[derive(Debug, Parser)]
#[command(
    name = "goodreads-mcp",
    version,
    about = "Goodreads MCP CLI - Interface for Goodreads integration"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// サブコマンド無し = MCP Server。stdoutはプロトコルが使う。
    pub fn is_server_mode(&self) -> bool {
        self.command.is_none()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Get books from Goodreads
    GetBooks(GetBooksArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GetBooksArgs {
    /// Email address
    #[arg(long)]
    pub email: String,
    /// Password
    #[arg(long)]
    pub password: String,
    /// Host URL (default: 127.0.0.1:8000)
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,
}

impl GetBooksArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.email, &self.password)
    }
}

/// `get-books` の結果。exit codeへの対応はここで決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    AuthFailed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::AuthFailed => ExitCode::from(1),
        }
    }
}

/// 実HTTPで `get-books` を実行する。
pub async fn get_books(args: &GetBooksArgs, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let service = GoodreadsService::new(ReqwestTransport::new()?);
    get_books_with(&service, args, out).await
}

/// 任意のTransportで `get-books` を実行する。
/// 認証失敗は出力して `Outcome::AuthFailed`、それ以外の失敗はErrで返す。
pub async fn get_books_with<T: Transport>(
    service: &GoodreadsService<T>,
    args: &GetBooksArgs,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    match service.authenticate(&args.credentials(), &args.host).await {
        Ok(resp) => {
            out.write_all(render_books(&resp).as_bytes())?;
            Ok(Outcome::Success)
        }
        Err(AppError::Auth(e)) => {
            writeln!(out, "Failed to get books: {e}")?;
            Ok(Outcome::AuthFailed)
        }
        Err(e) => Err(e.into()),
    }
}

/// Ctrl-C で中断したときの通知。
pub fn write_interrupted(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "\nInterrupted by user")
}

pub fn render_books(resp: &AuthResponse) -> String {
    let mut output = format!(
        "Authenticated! Profile ID: {}\nFound {} books\n",
        resp.profile_id(),
        resp.book_count()
    );
    for book in resp.books() {
        output.push_str(&format!(
            "- {} by {} (★{})\n",
            book.title(),
            book.author(),
            format_rating(book.rating())
        ));
    }
    output
}

/// 整数値は `4.0`、それ以外は最短表現（`4.5`）で表示する。
fn format_rating(rating: f64) -> String {
    if rating.is_finite() && rating.fract() == 0.0 && rating.abs() < 1e16 {
        format!("{rating:.1}")
    } else {
        format!("{rating}")
    }
}
