//! Command-line and environment configuration.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;

/// Default listen address of the REST server.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Default maximum size of the `PostgreSQL` connection pool.
pub const DEFAULT_POOL_SIZE: u32 = 8;

/// Taskboard process configuration.
///
/// Every option can also be set through its `TASKBOARD_*` environment
/// variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "taskboard", version, about = "Project and sprint tracking backend")]
pub struct Cli {
    /// `PostgreSQL` connection URL. Without it an in-memory store is used.
    #[arg(long, env = "TASKBOARD_DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(
        long,
        env = "TASKBOARD_DB_POOL_SIZE",
        default_value_t = DEFAULT_POOL_SIZE,
        value_parser = clap::value_parser!(u32).range(1..),
        global = true
    )]
    pub pool_size: u32,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "TASKBOARD_LOG", default_value = "info", global = true)]
    pub log: String,

    /// Interface to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Interface served by the process.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the REST API.
    Serve {
        /// Socket address to listen on.
        #[arg(long, env = "TASKBOARD_BIND", default_value = DEFAULT_BIND)]
        bind: SocketAddr,
    },
    /// Serve line-delimited JSON tool calls on stdin and stdout.
    Tools {
        /// Print the tool catalogue as JSON and exit.
        #[arg(long)]
        list_tools: bool,
    },
}
