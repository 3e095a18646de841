use serde::Deserialize;
use std::env;
use std::fs;
use std::process;

use tradeflow_pages::{catalog, compose_document, render_page, RenderContext, Section};

/// On-disk shape of a page file: the render context plus the ordered
/// section list.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageFile {
    #[serde(flatten)]
    context: RenderContext,
    #[serde(default)]
    sections: Vec<Section>,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: pages-render <page.json> [page2.json ...]");
        eprintln!("       pages-render --catalog");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  pages-render page.json > page.html");
        eprintln!("  pages-render --catalog");
        process::exit(1);
    }

    if args[1] == "--catalog" {
        for block in catalog().all() {
            println!("{:<20} {:?}  {}", block.id, block.category, block.name);
        }
        return;
    }

    let mut exit_code = 0;
    for file_path in &args[1..] {
        match render_file(file_path) {
            Ok(html) => {
                eprintln!("✓ {} rendered", file_path);
                println!("{}", html);
            }
            Err(e) => {
                eprintln!("✗ {} failed:", file_path);
                eprintln!("  {}", e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn render_file(path: &str) -> Result<String, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    let page: PageFile =
        serde_json::from_str(&content).map_err(|e| format!("Invalid page JSON: {}", e))?;

    let rendered = render_page(&page.sections, &page.context);
    Ok(compose_document(&rendered))
}
