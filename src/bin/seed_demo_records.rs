// ABOUTME: Demo record seeder for trying the viewer without a real LLM log
// ABOUTME: Creates the responses schema if missing and inserts sample prompt/response records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Demo record seeder.
//!
//! Usage:
//! ```bash
//! # Create demo.db with the sample records
//! cargo run --bin seed-demo-records -- --database demo.db
//!
//! # Add the samples several times over, spread across more days
//! cargo run --bin seed-demo-records -- --database demo.db --repeat 20 --days 90
//! ```

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use promptlog::config::DatabaseUrl;
use promptlog::database::RecordStore;
use promptlog::logging::LoggingConfig;
use promptlog::models::NewRecord;
use rand::Rng;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-demo-records",
    about = "Promptlog Demo Record Seeder",
    long_about = "Create a log database (if needed) and fill it with sample prompt/response records"
)]
struct SeedArgs {
    /// Database path or sqlite: URL to create or extend
    #[arg(long, env = "PROMPTLOG_DATABASE")]
    database: String,

    /// How many times to insert the sample set
    #[arg(long, default_value = "1")]
    repeat: u32,

    /// Spread record timestamps over this many past days
    #[arg(long, default_value = "30")]
    days: i64,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// One sample exchange
struct DemoRecord {
    model: &'static str,
    prompt: &'static str,
    response: &'static str,
}

const DEMO_RECORDS: &[DemoRecord] = &[
    DemoRecord {
        model: "gpt-4o-mini",
        prompt: "What does the Linux kernel scheduler do?",
        response: "The **kernel** scheduler decides which runnable task gets the CPU next.\n\n\
                   - CFS balances fairness across tasks\n\
                   - Real-time classes preempt normal tasks",
    },
    DemoRecord {
        model: "claude-3-5-haiku",
        prompt: "Write a SQL query that counts rows per day",
        response: "```sql\nSELECT date(datetime_utc) AS day, COUNT(*)\nFROM responses\nGROUP BY day\nORDER BY day DESC;\n```",
    },
    DemoRecord {
        model: "gpt-4o",
        prompt: "Compare tables in markdown",
        response: "| Format | Escapes HTML |\n|---|---|\n| Markdown | no |\n| Plain text | yes |\n\n\
                   - [x] tables\n- [ ] footnotes",
    },
    DemoRecord {
        model: "llama3.2",
        prompt: "How do I rebuild a custom kernel module after an upgrade?",
        response: "Run `make -C /lib/modules/$(uname -r)/build M=$PWD modules` and reload it with \
                   `modprobe`. DKMS can automate this on every kernel update.",
    },
    DemoRecord {
        model: "gpt-4o-mini",
        prompt: "Show me some <b>HTML</b> inside markdown",
        response: "Inline HTML such as <script>alert('hi')</script> is shown as text, \
                   not executed. ~~Strikethrough~~ still works.",
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging.level = "debug".to_owned();
    }
    logging.init()?;

    let url = DatabaseUrl::parse_url(&args.database)?;
    let store = RecordStore::create(&url)
        .await
        .with_context(|| format!("Failed to prepare {url}"))?;

    let now = Utc::now();
    let span_minutes = args.days.max(1) * 24 * 60;
    let mut rng = rand::thread_rng();
    let mut inserted = 0_u64;

    for _ in 0..args.repeat {
        for demo in DEMO_RECORDS {
            let created_at = now - Duration::minutes(rng.gen_range(0..span_minutes));
            let record = NewRecord::new(demo.prompt, demo.response, demo.model).at(created_at);
            store.insert(&record).await?;
            inserted += 1;
        }
    }

    info!(database = %url, inserted, "Demo records seeded");
    Ok(())
}
