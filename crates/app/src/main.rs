//! Terminal front-end for the place-value drill.

use std::io::{self, BufRead, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use drill_core::model::{DrillSettings, LearnerName, ValidationPolicy};
use services::{
    Clock, DrillLoopService, DrillSession, ProblemView, SessionError, StateTransitionError,
};

mod input;
mod render;

use input::{Command, parse_command, wants_restart};

#[derive(Parser, Debug)]
#[command(
    name = "drill",
    version,
    about = "Two- and three-digit addition and subtraction practice"
)]
struct Cli {
    /// Problems per session
    #[arg(
        long,
        env = "DRILL_PROBLEM_COUNT",
        default_value_t = DrillSettings::DEFAULT_PROBLEM_COUNT
    )]
    count: usize,

    /// Seed for a reproducible problem sequence
    #[arg(long, env = "DRILL_SEED")]
    seed: Option<u64>,

    /// Name printed on the report; asked for when omitted
    #[arg(long)]
    name: Option<String>,

    /// Which answer columns must be filled: first-operand or answer-width
    #[arg(long, env = "DRILL_VALIDATION", default_value_t = ValidationPolicy::FirstOperand)]
    validation: ValidationPolicy,
}

/// How a pass through the problems ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Finished,
    /// Went back from the first problem.
    Left,
    Quit,
}

struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Next line without its newline; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    fn say_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

fn ask_name<R: BufRead, W: Write>(term: &mut Terminal<R, W>) -> Result<Option<LearnerName>> {
    loop {
        term.say("Welcome! Please enter your name to begin\n> ")?;
        let Some(line) = term.read_line()? else {
            return Ok(None);
        };
        match LearnerName::new(&line) {
            Ok(name) => return Ok(Some(name)),
            Err(err) => term.say_line(&err.to_string())?,
        }
    }
}

fn play<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    service: &mut DrillLoopService,
    session: &mut DrillSession,
) -> Result<Flow> {
    while let Some(view) = ProblemView::current(session)? {
        term.say(&render::problem(&view))?;
        let Some(line) = term.read_line()? else {
            term.say_line("\nInput closed; leaving the drill.")?;
            return Ok(Flow::Quit);
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                term.say_line(&err.to_string())?;
                continue;
            }
        };

        let result = match command {
            Command::Answer(draft) => service.submit_draft(session, draft).map(|_| ()),
            Command::Back => match session.go_to_previous() {
                Err(SessionError::InvalidStateTransition(
                    StateTransitionError::NoPreviousProblem,
                )) => {
                    term.say_line("That was the first problem; leaving the drill.")?;
                    return Ok(Flow::Left);
                }
                other => other.map(|_| ()),
            },
            Command::Next => session.go_to_next().map(|_| ()),
            Command::Quit => return Ok(Flow::Quit),
        };

        if let Err(err) = result {
            debug!(error = %err, "input rejected");
            term.say_line(&render::rejection(&err))?;
        }
    }
    Ok(Flow::Finished)
}

fn run<R: BufRead, W: Write>(cli: Cli, term: &mut Terminal<R, W>) -> Result<()> {
    let settings =
        DrillSettings::new(cli.count, cli.validation).context("invalid drill settings")?;
    let clock = Clock::system();
    let mut service = match cli.seed {
        Some(seed) => DrillLoopService::seeded(clock, settings, seed),
        None => DrillLoopService::new(clock, settings),
    };

    // A name given with --name carries over to restarts; a typed one is asked
    // for again.
    let fixed_name = cli
        .name
        .map(LearnerName::new)
        .transpose()
        .context("invalid --name")?;

    let mut finished: Option<DrillSession> = None;
    loop {
        let name = match &fixed_name {
            Some(name) => name.clone(),
            None => match ask_name(term)? {
                Some(name) => name,
                None => return Ok(()),
            },
        };
        let mut session = match finished.take() {
            Some(previous) => service.restart(previous)?,
            None => service.start_session()?,
        };

        match play(term, &mut service, &mut session)? {
            Flow::Quit => return Ok(()),
            Flow::Left => {}
            Flow::Finished => {
                let report = session.report()?;
                term.say(&render::report(&name, &report))?;
            }
        }

        term.say("\nType r to practise again, anything else to exit\n> ")?;
        match term.read_line()? {
            Some(line) if wants_restart(&line) => finished = Some(session),
            _ => return Ok(()),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdin = io::stdin();
    let mut term = Terminal {
        input: stdin.lock(),
        output: io::stdout(),
    };

    if let Err(err) = run(cli, &mut term) {
        eprintln!("Error: {err:#}");
        process::exit(2);
    }
}
