use std::env;
use std::net::SocketAddr;
use std::process;

use getopts::{Matches, Options};

const ADDR_VAR: &str = "EVENT_FEED_ADDR";

const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRvU60bZTBesKWLfuWl86PJRT9PhTwn7vjhoJbBEKhT1-k-Y9MynV1AOVme7xGr96HKxoGpIGqlQKMe/pub?gid=0&single=true&output=csv";
const DEFAULT_CONTACT_FORM_URL: &str = "https://docs.google.com/forms/u/0/d/e/1FAIpQLScW-Ewst-5NPvWpji92xYNmWk8Gcl90w8mssypBZ-fus4yRvg/formResponse";

pub struct Args {
    pub address: SocketAddr,
    pub events_url: String,
    pub registration_url: String,
    pub contact_form_url: String,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on [Default: $EVENT_FEED_ADDR or 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optopt(
        "e",
        "events-url",
        "Published CSV of the events listing [Default: the site's events sheet]",
        "URL",
    );
    opts.optopt(
        "r",
        "registration-url",
        "Published CSV used for registration lookups [Default: the site's events sheet]",
        "URL",
    );
    opts.optopt(
        "c",
        "contact-form-url",
        "Form endpoint receiving contact submissions [Default: the site's contact form]",
        "URL",
    );
    opts
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    match from_matches(&matches, env::var(ADDR_VAR).ok()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn from_matches(matches: &Matches, addr_var: Option<String>) -> Result<Args, String> {
    let address = match matches.opt_str("address").or(addr_var) {
        Some(raw) => raw
            .parse()
            .map_err(|err| format!("Provided value for option 'address' is invalid: {err}"))?,
        None => SocketAddr::from(([127, 0, 0, 1], 8080)),
    };

    let url = |name: &str, default: &str| {
        matches
            .opt_str(name)
            .unwrap_or_else(|| default.to_owned())
    };

    Ok(Args {
        address,
        events_url: url("events-url", DEFAULT_SHEET_URL),
        registration_url: url("registration-url", DEFAULT_SHEET_URL),
        contact_form_url: url("contact-form-url", DEFAULT_CONTACT_FORM_URL),
    })
}
