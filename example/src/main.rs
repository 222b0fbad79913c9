//! Terminal driver for the date field.
//!
//! Reads one command per line from stdin, forwards it to a controlled
//! [`DateField`] and prints the resulting state. Pass a locale tag as the
//! first argument; set `RUST_LOG=tessera_forms=trace` to follow transitions.
use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use parking_lot::Mutex;
use tessera_forms::{
    date_field::{DateField, DateFieldArgsBuilder, DateValue, FieldIdentity},
    locale::Locale,
};
use tracing::info;

mod render;
mod script;

use script::{Command, HELP};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let locale: Locale = match std::env::args().nth(1) {
        Some(tag) => tag.parse()?,
        None => Locale::default(),
    };
    info!(%locale, "starting date field driver");

    let committed = Arc::new(Mutex::new(None::<DateValue>));
    let sink = committed.clone();
    let mut field = DateField::new(
        DateFieldArgsBuilder::default()
            .id("date")
            .name("date")
            .locale(locale)
            .on_change(move |value: DateValue| *sink.lock() = Some(value))
            .on_focus(|who: FieldIdentity| info!(field = %who.name, "focused"))
            .on_blur(|who: FieldIdentity| info!(field = %who.name, "blurred")),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{HELP}\n")?;
    write!(out, "{}", render::render(field.state()))?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Show) => {}
            Ok(Command::Value(value)) => field.set_value(value),
            Ok(Command::Event(event)) => {
                let outcome = field.handle(event);
                if outcome.is_handled() {
                    writeln!(out, "(handled)")?;
                }
                if outcome.focus_input {
                    writeln!(out, "(focus moves to the input)")?;
                }
            }
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        }
        let commit = committed.lock().take();
        if let Some(value) = commit {
            if value.is_empty() {
                writeln!(out, "committed: <empty>")?;
            } else {
                writeln!(out, "committed: {value}")?;
            }
            field.set_value(value.date());
        }
        write!(out, "{}", render::render(field.state()))?;
        out.flush()?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,tessera_forms=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}
