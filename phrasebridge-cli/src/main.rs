mod client;
mod debounce;
mod ui;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgMatches, Command};
use client::{DEFAULT_SERVER_URL, TranslateClient};
use debounce::{DEFAULT_DEBOUNCE_MS, run_debounced};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use ui::{ManualSelection, UiLocale};

fn command() -> Command {
    Command::new("phrasebridge-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate phrases and \"how do you say X in Y\" questions")
        .arg(
            Arg::new("text")
                .help("Text to translate; omit to read lines from stdin")
                .index(1),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Manual mode: language you speak")
                .value_parser(PossibleValuesParser::new(ui::manual_keys())),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .short('t')
                .help("Manual mode: language to translate to (default: spanish)")
                .value_parser(PossibleValuesParser::new(ui::manual_keys())),
        )
        .arg(
            Arg::new("ui")
                .long("ui")
                .help("Language of client messages (default: from LANG)")
                .value_parser(["en", "es"]),
        )
        .arg(
            Arg::new("url")
                .long("url")
                .env("PHRASEBRIDGE_URL")
                .help("Server base URL")
                .default_value(DEFAULT_SERVER_URL),
        )
        .arg(
            Arg::new("debounce-ms")
                .long("debounce-ms")
                .help("Pause before submitting typed input, in milliseconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("1500"),
        )
}

struct Session {
    client: TranslateClient,
    manual: Option<ManualSelection>,
    locale: UiLocale,
}

impl Session {
    fn from_matches(matches: &ArgMatches) -> Result<Self, client::ClientError> {
        let url = matches
            .get_one::<String>("url")
            .map(String::as_str)
            .unwrap_or(DEFAULT_SERVER_URL);
        let locale = match matches.get_one::<String>("ui") {
            Some(value) => UiLocale::from_lang(Some(value.as_str())),
            None => UiLocale::from_lang(std::env::var("LANG").ok().as_deref()),
        };
        let manual = ManualSelection::from_args(
            matches.get_one::<String>("source").cloned(),
            matches.get_one::<String>("target").cloned(),
        );

        Ok(Self {
            client: TranslateClient::new(url)?,
            manual,
            locale,
        })
    }

    async fn submit(&self, text: &str) {
        debug!(endpoint = self.client.endpoint(), "Submitting text");
        match self.client.translate(text, self.manual.as_ref()).await {
            Ok(outcome) => {
                for line in ui::render(&outcome, self.manual.as_ref(), self.locale) {
                    println!("{}", line);
                }
            }
            Err(e) => {
                warn!(error = %e, "Translation request failed");
                println!("{}", self.locale.strings().error_server);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .init();

    let matches = command().get_matches();
    let session = Session::from_matches(&matches)?;

    if let Some(selection) = &session.manual {
        println!("{}", ui::manual_banner(selection, session.locale));
    }

    if let Some(text) = matches.get_one::<String>("text") {
        let text = text.trim();
        if !text.is_empty() {
            session.submit(text).await;
        }
        return Ok(());
    }

    let delay = Duration::from_millis(
        matches
            .get_one::<u64>("debounce-ms")
            .copied()
            .unwrap_or(DEFAULT_DEBOUNCE_MS),
    );

    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    });

    let session = &session;
    run_debounced(rx, delay, |text| async move {
        session.submit(&text).await;
    })
    .await;

    Ok(())
}
