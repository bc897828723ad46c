//! Example: Convert one page with every Reader tool
//!
//! Run with: cargo run -p readerkit --example convert_page -- https://example.com
//!
//! Expects a Reader engine at `READER_URL` (default http://localhost:3000).

use readerkit::{list_tools, Adapter, ReaderClient, DEFAULT_BASE_URL};
use serde_json::json;

/// Characters of each result shown in the summary
const PREVIEW_CHARS: usize = 200;

#[tokio::main]
async fn main() {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com".to_string());
    let base_url = std::env::var("READER_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    let client = match ReaderClient::builder().base_url(base_url).build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Reader tools for {}", url);
    println!("via {}\n", client.base_url());

    let adapter = Adapter::with_reader(client);
    let mut failed = 0;

    for tool in list_tools() {
        let outcome = adapter.call_tool(&tool.name, &json!({ "url": url })).await;
        let status = if outcome.is_ok() {
            "ok"
        } else {
            failed += 1;
            "error"
        };

        let preview: String = outcome.text().chars().take(PREVIEW_CHARS).collect();
        println!("{} [{}]", tool.name, status);
        println!("   {}\n", preview.replace('\n', "\n   "));
    }

    if failed > 0 {
        println!("{} tool(s) failed", failed);
        std::process::exit(1);
    }
}
