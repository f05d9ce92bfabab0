//! Nómina API Server binary
//!
//! HTTP REST API for roster parsing, template download and RUT validation.

use clap::Parser;
use royalbit_nomina::api::{run_api_server, server::ApiConfig};
use royalbit_nomina::upload::DEFAULT_MAX_UPLOAD_BYTES;

#[derive(Parser, Debug)]
#[command(name = "nomina-server")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "Nómina API Server - HTTP REST API for student roster import")]
#[command(long_about = r#"
Nómina API Server - HTTP REST API

Provides RESTful endpoints for the rotation-request portal:
  - POST /api/v1/roster/parse     - Parse a roster spreadsheet (raw request body)
  - GET  /api/v1/roster/template  - Download the blank roster template
  - POST /api/v1/rut/validate     - Normalize and validate a RUT

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Features:
  - CORS enabled for cross-origin requests
  - Upload size limit (default 5 MiB) and .xls/.xlsx check
  - Graceful shutdown on SIGINT/SIGTERM
  - JSON response format with request IDs
  - Tracing and structured logging

Example usage:
  nomina-server                           # Start on localhost:8080
  nomina-server --host 0.0.0.0 --port 3000

  curl -X POST "http://localhost:8080/api/v1/roster/parse?file_name=nomina.xlsx" \
    --data-binary @nomina.xlsx
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "NOMINA_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "NOMINA_PORT")]
    port: u16,

    /// Largest accepted roster upload, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "NOMINA_MAX_UPLOAD_BYTES")]
    max_upload_bytes: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        max_upload_bytes: args.max_upload_bytes,
    };

    run_api_server(config).await
}
