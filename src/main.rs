use std::io::{self, Write};
use std::process;

use dual_regex::{BackendKind, Builder, Input, Options, Regex, RegexImpl};
use tracing_subscriber::{EnvFilter, fmt};

/// Reads `RUST_LOG`, defaulting to `warn`. Logs go to stderr so they do not
/// mix with the REPL output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

/// Splits `/pattern/flags` into its parts. Anything else is a bare pattern.
fn split_flags(line: &str) -> (&str, &str) {
    if let Some(rest) = line.strip_prefix('/') {
        if let Some(end) = rest.rfind('/') {
            return (&rest[..end], &rest[end + 1..]);
        }
    }
    (line, "")
}

fn compile(line: &str, backend: Option<BackendKind>) -> Result<Regex, dual_regex::CompileError> {
    let (pattern, flags) = split_flags(line);
    let builder = Builder::new(pattern).options(Options::from_flags(flags)?);
    match backend {
        Some(BackendKind::Linear) => builder.linear(),
        Some(BackendKind::Backtracking) => builder.backtracking(),
        None => builder.auto(),
    }
}

fn main() {
    init_tracing();

    let backend = match std::env::args().nth(1).as_deref() {
        None | Some("auto") => None,
        Some("linear") => Some(BackendKind::Linear),
        Some("backtracking") => Some(BackendKind::Backtracking),
        Some(other) => {
            eprintln!("unknown backend {other:?}, expected linear, backtracking or auto");
            process::exit(2);
        }
    };

    println!("dual-regex REPL");
    println!("Patterns may be written /pattern/flags (flags: i m s x n).");
    println!("Type an empty pattern to exit.");

    loop {
        print!("regex> ");
        io::stdout().flush().unwrap();
        let mut pattern = String::new();
        if io::stdin().read_line(&mut pattern).is_err() {
            println!("Error reading pattern.");
            continue;
        }
        let pattern = pattern.trim();
        if pattern.is_empty() {
            break;
        }

        let regex = match compile(pattern, backend) {
            Ok(regex) => regex,
            Err(e) => {
                println!("Compile error: {e}");
                continue;
            }
        };
        println!("Using the {} backend.", regex.kind());
        let names = regex.capture_names();

        loop {
            println!("Type return to go back to the regex prompt.");
            print!("input> ");
            io::stdout().flush().unwrap();
            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_err() {
                println!("Error reading input.");
                continue;
            }
            let input = input.trim_end_matches(['\r', '\n']);
            if input == "return" {
                break;
            }

            let mut found = false;
            for caps in regex.captures_iter(Input::new(input)) {
                let caps = match caps {
                    Ok(caps) => caps,
                    Err(e) => {
                        println!("Match error: {e}");
                        break;
                    }
                };
                found = true;
                let whole = caps.group0();
                println!("Matched {:?} at {}..{}", whole.as_str(), whole.start(), whole.end());
                for (i, group) in caps.iter().enumerate().skip(1) {
                    let label = match &names[i] {
                        Some(name) => format!("Group {i} <{name}>"),
                        None => format!("Group {i}"),
                    };
                    match group {
                        Some(m) => println!("  {label}: {:?}", m.as_str()),
                        None => println!("  {label}: None"),
                    }
                }
            }
            if !found {
                println!("No match.");
            }
        }
    }
}
