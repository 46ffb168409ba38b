// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Noema CLI entrypoint.
//!
//! Reads a text file (or stdin), sends it to the analysis service, and prints a
//! summary of the resulting graph. `--quick-save` stashes the text in the local
//! quick-save slot before the request goes out.

use std::error::Error;
use std::io::Read as _;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<text-file>] --base-url <url> [--store-dir <dir>] [--quick-save] [--durable-writes]\n\nReads <text-file> (stdin when omitted), sends it for analysis, and prints a\nsummary of the resulting graph.\n\n--base-url <url>   Analysis service base URL (NOEMA_BASE_URL works too).\n--store-dir <dir>  Directory for locally stored entities (tags, quick-save).\n--quick-save       Stash the text in the local quick-save slot; needs --store-dir.\n--durable-writes   Slower, best-effort durable persistence (fsync/sync where supported); needs --store-dir.\n\nNOEMA_LOG selects log verbosity (tracing env-filter syntax, default `warn`)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    base_url: Option<String>,
    store_dir: Option<String>,
    quick_save: bool,
    durable_writes: bool,
    text_file: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base-url" => {
                if options.base_url.is_some() {
                    return Err(());
                }
                let url = args.next().ok_or(())?;
                options.base_url = Some(url);
            }
            "--store-dir" => {
                if options.store_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.store_dir = Some(dir);
            }
            "--quick-save" => {
                if options.quick_save {
                    return Err(());
                }
                options.quick_save = true;
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.text_file.is_some() {
                    return Err(());
                }
                options.text_file = Some(arg);
            }
        }
    }

    if options.quick_save && options.store_dir.is_none() {
        return Err(());
    }

    if options.durable_writes && options.store_dir.is_none() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "noema".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("NOEMA_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();

        let Some(base_url) = options
            .base_url
            .clone()
            .or_else(|| std::env::var("NOEMA_BASE_URL").ok())
        else {
            print_usage(&program);
            std::process::exit(2);
        };

        let text = match options.text_file.as_deref() {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        if let Some(dir) = options.store_dir.as_deref().filter(|_| options.quick_save) {
            let folder = if options.durable_writes {
                noema::store::StoreFolder::new(dir)
                    .with_durability(noema::store::WriteDurability::Durable)
            } else {
                noema::store::StoreFolder::new(dir)
            };
            let mut quick_save = noema::store::QuickSaveStore::new(folder);
            let title = options
                .text_file
                .clone()
                .unwrap_or_else(|| "stdin".to_owned());
            let entry = quick_save.save(title, text.as_str())?;
            println!("Quick-saved as {}", entry.id);
        }

        let client = noema::remote::GraphClient::new(noema::remote::HttpTransport::new(base_url));
        let session = noema::session::GraphSession::new(client);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async {
            let report = session.analyze_text(&text).await?;
            if let Some(status) = session.status_line().await {
                println!("{status}");
            }
            if let Some(graph_id) = &report.graph_id {
                println!("Graph id: {graph_id}");
            }
            if let Some(name) = &report.name {
                println!("Graph name: {name}");
            }
            if !report.diagnostics.is_empty() {
                println!(
                    "Normalization repaired or dropped {} entities",
                    report.diagnostics.len()
                );
            }
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("noema: {err}");
        std::process::exit(1);
    }
}
