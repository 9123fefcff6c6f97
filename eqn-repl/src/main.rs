mod error;

use clap::Parser;
use eqn_solver::{
    config::SolverConfig,
    format::{CopyPayloads, DisplayMode, Solution},
    normalize::normalize,
    response::{Request, Response},
    sanitize::sanitize,
    solve_equation,
    solve_request,
    variable::VariablePolicy,
    Outcome,
};
use error::Error;
use log::{debug, LevelFilter};
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::{io::{self, BufRead, IsTerminal}, path::PathBuf, process::ExitCode};

#[derive(Parser, Debug)]
#[command(name = "eqn-repl")]
#[command(about = "Solve informally written equations for a single variable")]
struct Args {
    /// Equation to solve once. Without it, requests are read from stdin, or a REPL is started
    equation: Option<String>,

    /// Variable to solve for
    #[arg(short, long, default_value = "x")]
    variable: String,

    /// TOML file with solver settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time budget of a single solve, in milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Accept variable names of up to 10 letters
    #[arg(long)]
    relaxed_variables: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<LevelFilter>,

    /// Whether copy payloads show exact or decimal values
    #[arg(long)]
    mode: Option<DisplayMode>,
}

/// Settings of an interactive session, changed with `:` commands.
struct Session {
    config: SolverConfig,
    variable: String,
    json: bool,
}

/// Loads the config file, then applies the overrides given on the command line.
fn load_config(args: &Args) -> Result<SolverConfig, Error> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };

    if let Some(deadline_ms) = args.deadline_ms {
        config.deadline_ms = deadline_ms;
    }
    if args.relaxed_variables {
        config.variable_policy = VariablePolicy::Relaxed;
    }
    if let Some(level) = args.log_level {
        config.log_level = level.to_string();
    }
    if let Some(mode) = args.mode {
        config.display_mode = mode;
    }
    Ok(config)
}

/// Installs the terminal logger. Logs go to stderr, so JSON on stdout stays clean.
fn init_logger(config: &SolverConfig) {
    let level = config.log_level.parse().unwrap_or(LevelFilter::Warn);
    if let Err(err) = TermLogger::init(level, simplelog::Config::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("could not install logger: {}", err);
    }
}

/// Reads one JSON request per line from stdin, and writes one JSON response per line.
fn serve_json_lines(config: &SolverConfig) -> Result<(), Error> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => solve_request(&request, config),
            Err(err) => Response::error(format!("Invalid request: {}", err)),
        };
        println!("{}", response.to_json());
    }
    Ok(())
}

/// Draws a pipeline error. Errors with spans point into the normalized equation, which is
/// recomputed here to draw them against.
fn report(input: &str, err: &eqn_error::Error, config: &SolverConfig) {
    let source = sanitize(input, config.max_input_len).map(|clean| normalize(&clean));
    match source {
        Ok(source) if !err.spans.is_empty() => err.report_to_stderr("equation", &source),
        _ => eprintln!("{}", err.message()),
    }
}

fn print_solution(variable: &str, solution: &Solution, mode: DisplayMode) {
    println!("{} = {}  ({})", variable, solution.plain, solution.decimal);

    let payloads = CopyPayloads::new(solution, mode);
    println!("    latex:    {}", payloads.latex);
    println!("    markdown: {}", payloads.markdown);
    println!("    plain:    {}", payloads.plain);
    println!("    html:     {}", payloads.html);
}

fn print_outcome(outcome: &Outcome, mode: DisplayMode) {
    println!("{}", outcome.equation.latex());
    match outcome.to_response() {
        Response::Success(solved) => {
            for solution in &solved.solutions {
                print_solution(&solved.variable, solution, mode);
            }
        },
        Response::NoSolution(none) => println!("{}", none.message),
        Response::Error(failed) => eprintln!("{}", failed.error),
    }
}

/// Handles a `:` command of the REPL.
fn command(line: &str, session: &mut Session) {
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (Some(":var"), Some(name)) => match session.config.variable_policy.check(name) {
            Ok(name) => session.variable = name,
            Err(err) => eprintln!("{}", err.message()),
        },
        (Some(":var"), None) => println!("{}", session.variable),
        (Some(":mode"), Some(mode)) => match mode.parse() {
            Ok(mode) => session.config.display_mode = mode,
            Err(err) => eprintln!("{}", err),
        },
        (Some(":mode"), None) => println!("{}", session.config.display_mode),
        (Some(":json"), _) => {
            session.json = !session.json;
            println!("json output {}", if session.json { "on" } else { "off" });
        },
        _ => eprintln!("unknown command `{}` (try :var <name>, :mode exact|decimal, :json)", line),
    }
}

/// Solves one line typed into the REPL.
fn repl_execute(input: &str, session: &Session) {
    if session.json {
        let request = Request::new(input, session.variable.as_str());
        println!("{}", solve_request(&request, &session.config).to_json());
        return;
    }

    match solve_equation(input, &session.variable, &session.config) {
        Ok(outcome) => print_outcome(&outcome, session.config.display_mode),
        Err(err) => report(input, &err, &session.config),
    }
}

fn run_repl(session: &mut Session) -> Result<(), Error> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }

        rl.add_history_entry(input)?;

        if input.starts_with(':') {
            command(input, session);
        } else {
            repl_execute(input, session);
        }
        Ok(())
    }

    loop {
        match process_line(&mut rl, session) {
            Ok(()) => (),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err.into()),
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let config = load_config(&args)?;
    init_logger(&config);
    debug!("configuration: {:?}", config);

    if let Some(equation) = &args.equation {
        // solve once
        let request = Request::new(equation.as_str(), args.variable.as_str());
        println!("{}", solve_request(&request, &config).to_json());
        Ok(())
    } else if !io::stdin().is_terminal() {
        serve_json_lines(&config)
    } else {
        let mut session = Session { config, variable: args.variable, json: false };
        run_repl(&mut session)
    }
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.report_to_stderr();
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use super::*;

    #[test]
    fn arguments_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "eqn-repl",
            "--deadline-ms", "250",
            "--relaxed-variables",
            "--log-level", "debug",
            "--mode", "decimal",
            "x^2=4",
        ]);
        let config = load_config(&args).unwrap();

        assert_eq!(args.equation.as_deref(), Some("x^2=4"));
        assert_eq!(config.deadline_ms, 250);
        assert_eq!(config.variable_policy, VariablePolicy::Relaxed);
        assert_eq!(config.log_level, "DEBUG");
        assert_eq!(config.display_mode, DisplayMode::Decimal);
    }

    #[test]
    fn commands_change_session() {
        let mut session = Session { config: SolverConfig::default(), variable: "x".to_string(), json: false };
        command(":var Y", &mut session);
        assert_eq!(session.variable, "y");
        command(":var 12", &mut session);
        assert_eq!(session.variable, "y");
        command(":mode decimal", &mut session);
        assert_eq!(session.config.display_mode, DisplayMode::Decimal);
        command(":json", &mut session);
        assert!(session.json);
    }
}
