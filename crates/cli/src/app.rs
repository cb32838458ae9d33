use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use argtree::{Argument, Command, Error, Opt, Parser};

pub const APP: &str = "argtree-demo";

/// Exit status for commandline mistakes.
const USAGE: u8 = 2;

/// Everything the command tree writes into while parsing.
struct State {
    shown: Cell<bool>,
    verbose: Cell<bool>,
    name: RefCell<String>,
    times: Cell<u32>,
    shout: Cell<bool>,
    a: Cell<f64>,
    b: Cell<f64>,
    schema: Cell<bool>,
}

impl State {
    fn new() -> Self {
        Self {
            shown: Cell::new(false),
            verbose: Cell::new(false),
            name: RefCell::new("world".to_string()),
            times: Cell::new(1),
            shout: Cell::new(false),
            a: Cell::new(0.0),
            b: Cell::new(0.0),
            schema: Cell::new(false),
        }
    }
}

type Sink<'a> = &'a dyn Fn(&str) -> io::Result<()>;

fn build_parser<'a>(state: &'a State, sink: Sink<'a>) -> argtree::Result<Parser<'a>> {
    let greet = Command::with_action("Print a greeting", move || {
        let times = state.times.get();
        if times == 0 {
            return Err(Error::custom("--times must be at least 1"));
        }
        let mut greeting = format!("Hello, {}!", state.name.borrow());
        if state.shout.get() {
            greeting = greeting.to_uppercase();
        }
        for _ in 0..times {
            println!("{greeting}");
        }
        Ok(())
    })
    .option(Opt::help_with(sink))
    .option(Opt::bind(["n", "name"], "Who to greet", &state.name))
    .option(Opt::bind(["t", "times"], "How many times", &state.times))
    .option(Opt::bind(["s", "shout"], "Greet loudly", &state.shout));

    let sum = Command::with_action("Add two numbers", move || {
        let (a, b) = (state.a.get(), state.b.get());
        if state.verbose.get() {
            println!("{a} + {b} = {}", a + b);
        } else {
            println!("{}", a + b);
        }
        Ok(())
    })
    .option(Opt::help_with(sink))
    .argument(Argument::bind("a", "First operand", &state.a))
    .argument(Argument::bind("b", "Second operand", &state.b));

    let schema = Command::with_action("Print the command tree as JSON", move || {
        state.schema.set(true);
        Ok(())
    });

    Parser::builder("Example tool built on argtree")
        .option(Opt::help_with(sink))
        .option(Opt::version_with(APP, env!("CARGO_PKG_VERSION"), sink))
        .option(Opt::bind(["verbose"], "Show more detail", &state.verbose))
        .command("greet", greet)
        .command("sum", sum)
        .command("schema", schema)
        .build()
}

pub fn run(argv: &[&str]) -> Result<ExitCode> {
    let state = State::new();
    let sink = |text: &str| {
        state.shown.set(true);
        io::stdout().lock().write_all(text.as_bytes())
    };
    let parser = build_parser(&state, &sink).context("invalid command tree")?;

    let matched = match parser.parse(argv) {
        // Help or version output already answered the request.
        _ if state.shown.get() => return Ok(ExitCode::SUCCESS),
        Ok(matched) => matched,
        Err(err) if err.is_usage() => {
            eprintln!("error: {err}");
            eprintln!("Try '{APP} --help' for more information.");
            return Ok(ExitCode::from(USAGE));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::debug!(path = ?matched.path(), "running command");
    matched.run().context("command failed")?;

    if state.schema.get() {
        let meta = parser.describe(APP);
        let json = meta.to_json_pretty().context("failed to encode schema")?;
        println!("{json}");
    }

    Ok(ExitCode::SUCCESS)
}
