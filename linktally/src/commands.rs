use crate::CLAP_STYLING;
use clap::arg;
use url::Url;

pub(crate) const USAGE: &str = "usage: linktally <URL string> <maxConcurrency int> <maxPages int>";

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("linktally")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linktally")
        .styles(CLAP_STYLING)
        .about("Crawl a website and rank its pages by internal link count")
        .arg(
            arg!([URL])
                .required(true)
                .help("The seed URL to start crawling from")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!([MAX_CONCURRENCY])
                .required(true)
                .help("Maximum number of fetches in flight at once")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!([MAX_PAGES])
                .required(true)
                .help("Maximum number of distinct pages to visit")
                .value_parser(clap::value_parser!(usize)),
        )
}
