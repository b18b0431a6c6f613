mod debug_report;

use deinflect::{Dictionary, DictionaryEntry, FormGuesser, Grammar, Options};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging(config.verbose);

    let guesser = match load(&config) {
        Ok(guesser) => guesser,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if config.inputs.is_empty() {
        if let Err(err) = prompt_loop(&guesser, &config) {
            eprintln!("error: failed to read stdin: {err}");
            std::process::exit(1);
        }
    } else {
        for input in &config.inputs {
            guess_one(&guesser, input, &config);
        }
    }
}

struct CliConfig {
    inputs: Vec<String>,
    rules: Option<PathBuf>,
    dict: Option<PathBuf>,
    entries: Vec<String>,
    options: Options,
    stats: bool,
    color: bool,
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn load(config: &CliConfig) -> Result<FormGuesser, Box<dyn std::error::Error>> {
    let grammar = match &config.rules {
        Some(path) => Grammar::from_path(path)?,
        None => Grammar::embedded()?,
    };

    let mut entries = match &config.dict {
        Some(path) => Dictionary::from_jmdict_path(path)?.into_entries(),
        None => Vec::new(),
    };
    entries.extend(config.entries.iter().map(DictionaryEntry::with_writing));
    if entries.is_empty() {
        tracing::warn!("dictionary is empty; pass --dict or --entry");
    }

    tracing::info!(rules = grammar.len(), entries = entries.len(), "loaded");
    Ok(FormGuesser::new(grammar, Dictionary::from_entries(entries)).with_options(config.options.clone()))
}

fn guess_one(guesser: &FormGuesser, input: &str, config: &CliConfig) {
    if config.stats {
        let verbose = guesser.guess_verbose_with(input, guesser.options());
        debug_report::print_run(input, &verbose, config.color);
        return;
    }
    let result = guesser.guess(input);
    if result.success {
        println!("{result}");
    } else {
        println!("No result :(");
    }
}

fn is_exit_command(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "e" | "q" | "exit" | "quit")
}

fn prompt_loop(guesser: &FormGuesser, config: &CliConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit_command(line) {
            break;
        }
        guess_one(guesser, line, config);
    }
    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from(args: impl IntoIterator<Item = String>) -> Result<CliConfig, String> {
    let mut config = CliConfig {
        inputs: Vec::new(),
        rules: None,
        dict: None,
        entries: Vec::new(),
        options: Options::default(),
        stats: false,
        color: io::stdout().is_terminal(),
        verbose: false,
    };
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("deinflect {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => config.color = true,
            "--no-color" => config.color = false,
            "--stats" => config.stats = true,
            "-v" | "--verbose" => config.verbose = true,
            "-r" | "--rules" => config.rules = Some(value_of(&arg, args.next())?.into()),
            "-d" | "--dict" => config.dict = Some(value_of(&arg, args.next())?.into()),
            "--entry" => config.entries.push(value_of(&arg, args.next())?),
            "--max-depth" => config.options.max_depth = parse_depth(&value_of(&arg, args.next())?)?,
            "--" => {
                config.inputs.extend(args.by_ref());
                break;
            }
            _ if arg.starts_with("--rules=") => config.rules = Some(arg.trim_start_matches("--rules=").into()),
            _ if arg.starts_with("--dict=") => config.dict = Some(arg.trim_start_matches("--dict=").into()),
            _ if arg.starts_with("--entry=") => config.entries.push(arg.trim_start_matches("--entry=").to_string()),
            _ if arg.starts_with("--max-depth=") => {
                config.options.max_depth = parse_depth(arg.trim_start_matches("--max-depth="))?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => config.inputs.push(arg),
        }
    }

    Ok(config)
}

fn value_of(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("error: {flag} expects a value"))
}

fn parse_depth(value: &str) -> Result<usize, String> {
    value.parse().map_err(|_| format!("error: invalid --max-depth '{value}' (expected a non-negative integer)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "deinflect {version}

Find the dictionary form of a conjugated word.

Usage:
  deinflect [OPTIONS] [--] <word...>
  deinflect [OPTIONS]                 Read words from stdin, one per line.

Options:
  -r, --rules <path>         Rule file. Default: the built-in rule set.
  -d, --dict <path>          JMdict XML file (uncompressed).
  --entry <word>             Add a dictionary entry. May be repeated.
  --max-depth <n>            Longest rule chain to try. Default: {max_depth}
  --stats                    Print search statistics for every word.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -v, --verbose              Log at debug level (RUST_LOG overrides).
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Interactive mode ends on EOF or one of: e, q, exit, quit.

Exit codes:
  0  Success.
  1  Failed to load rules or dictionary.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        max_depth = deinflect::DEFAULT_MAX_DEPTH,
    )
}
