use anyhow::Context;
use clap::error::ErrorKind;
use linktally_crawler::{Crawler, report};
use url::Url;

mod commands;

use commands::{USAGE, command_argument_builder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let matches = match command_argument_builder().try_get_matches() {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            println!("{USAGE}");
            std::process::exit(1);
        }
    };

    let url = matches.get_one::<Url>("URL").unwrap();
    let max_concurrency = *matches.get_one::<usize>("MAX_CONCURRENCY").unwrap();
    let max_pages = *matches.get_one::<usize>("MAX_PAGES").unwrap();

    let crawler = Crawler::new(url.as_str())
        .context("Couldn't parse base URL")?
        .with_max_concurrency(max_concurrency)
        .with_max_pages(max_pages);

    let pages = crawler.crawl().await;
    print!("{}", report::render(&pages, url.as_str()));

    Ok(())
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
