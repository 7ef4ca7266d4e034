use std::{
    fs::read_to_string,
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use exprp::{
    display_error,
    errors::errors::{Error, ErrorImpl},
    lexer::scanner::TokenStream,
    parser::parser::{parse_with_config, ParserConfig, DEFAULT_MAX_DEPTH},
};
use log::{debug, info};

/// Exit status when the input does not parse.
const EXIT_PARSE_ERROR: u8 = 1;

/// Parse an expression and print its syntax tree as an s-expression.
#[derive(Parser)]
#[command(name = "exprp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The expression to parse (read from stdin when omitted)
    expression: Option<String>,

    /// Read the expression from a file
    #[arg(short, long, conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Maximum nesting of parentheses, conditionals and exponents
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let stdout = io::stdout();
    let stderr = io::stderr();

    match run(cli, io::stdin(), &mut stdout.lock(), &mut stderr.lock()) {
        Ok(status) => ExitCode::from(status),
        Err(error) => {
            eprintln!("error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

/// Runs one invocation, reading from `input` only when no expression or
/// file was given. Returns the process exit status.
fn run<R: Read, O: Write, E: Write>(cli: Cli, input: R, out: &mut O, err: &mut E) -> Result<u8> {
    let (source, source_name) = read_source(&cli, input)?;

    let start = Instant::now();

    let mut scanner = match TokenStream::from_source(&source, Some(source_name)) {
        Ok(scanner) => scanner,
        Err(error) => return report(&error, &source, err),
    };

    info!("Tokenized in {:?}", start.elapsed());

    if cli.tokens {
        for token in scanner.tokens() {
            writeln!(out, "{}", token.debug())?;
        }
    }

    let parse_start = Instant::now();
    let config = ParserConfig {
        max_depth: cli.max_depth,
    };
    let parsed = parse_with_config(&mut scanner, config);

    info!("Parsed in {:?}", parse_start.elapsed());

    match parsed {
        Ok(node) => {
            writeln!(out, "{}", node)?;
            Ok(0)
        }
        Err(error) => report(&error, &source, err),
    }
}

fn read_source<R: Read>(cli: &Cli, mut input: R) -> Result<(String, String)> {
    if let Some(expression) = &cli.expression {
        return Ok((expression.clone(), String::from("<argument>")));
    }

    if let Some(path) = &cli.file {
        let source = read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return Ok((source, path.display().to_string()));
    }

    let mut source = String::new();
    input
        .read_to_string(&mut source)
        .context("failed to read stdin")?;
    Ok((source, String::from("<stdin>")))
}

fn report<E: Write>(error: &Error, source: &str, err: &mut E) -> Result<u8> {
    let position = error.get_position();
    debug!(
        "{} at offset {} in {}",
        error.get_error_name(),
        position.0,
        position.1
    );

    display_error(error, source, err).context("failed to write diagnostic")?;

    if let ErrorImpl::NestingTooDeep { limit, .. } = error.get_kind() {
        writeln!(err, "help: pass `--max-depth {}` or higher to allow it", limit + 1)?;
    }

    Ok(EXIT_PARSE_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("exprp").chain(args.iter().copied())).unwrap()
    }

    /// Runs the binary in-process and returns its status, stdout and stderr.
    fn run_with(args: &[&str], stdin: &str) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let status = run(cli(args), stdin.as_bytes(), &mut out, &mut err).unwrap();

        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_run_prints_tree() {
        let (status, out, err) = run_with(&["1 + 2 * 3"], "");

        assert_eq!(status, 0);
        assert_eq!(out, "(+ 1 (* 2 3))\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_parse_error_exits_non_zero() {
        let (status, out, err) = run_with(&["(1 + 2"], "");

        assert_eq!(status, EXIT_PARSE_ERROR);
        assert!(out.is_empty());
        assert!(err.starts_with("parsing error: expected ')' (while parsing 'EOF')\n-> <argument>\n"));
        assert!(!err.contains("help:"));
    }

    #[test]
    fn test_run_lexer_error_exits_non_zero() {
        let (status, _, err) = run_with(&["1 + $"], "");

        assert_eq!(status, EXIT_PARSE_ERROR);
        assert!(err.starts_with("parsing error: unrecognised token (while parsing '$')\n"));
    }

    #[test]
    fn test_run_max_depth_flag() {
        let (status, out, err) = run_with(&["--max-depth", "2", "((1))"], "");

        assert_eq!(status, EXIT_PARSE_ERROR);
        assert!(out.is_empty());
        assert!(err.starts_with("parsing error: expression nested too deeply (while parsing '1')\n"));
        assert!(err.ends_with("help: pass `--max-depth 3` or higher to allow it\n"));

        let (status, out, _) = run_with(&["--max-depth", "3", "((1))"], "");

        assert_eq!(status, 0);
        assert_eq!(out, "1\n");
    }

    #[test]
    fn test_run_dumps_tokens() {
        let (status, out, _) = run_with(&["--tokens", "1 + 2"], "");

        assert_eq!(status, 0);
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec!["Number (1)", "Plus ()", "Number (2)", "EOF ()", "(+ 1 2)"]
        );
    }

    #[test]
    fn test_run_reads_stdin() {
        let (status, out, _) = run_with(&[], "if 1 > 0\nthen 2\nelse 3\n");

        assert_eq!(status, 0);
        assert_eq!(out, "(if (> 1 0) 2 3)\n");

        let (status, _, err) = run_with(&[], "1 2");

        assert_eq!(status, EXIT_PARSE_ERROR);
        assert!(err.contains("-> <stdin>\n"));
    }

    #[test]
    fn test_run_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "2 ^ 3 ^ 2").unwrap();
        let path = file.path().to_str().unwrap();

        let (status, out, _) = run_with(&["--file", path], "ignored");

        assert_eq!(status, 0);
        assert_eq!(out, "(^ 2 (^ 3 2))\n");
    }

    #[test]
    fn test_run_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.expr");
        let path = path.to_str().unwrap();

        let error = run(cli(&["--file", path]), "".as_bytes(), &mut Vec::new(), &mut Vec::new())
            .unwrap_err();

        assert!(error.to_string().starts_with("failed to read"));
    }

    #[test]
    fn test_run_prints_long_chain() {
        let source = vec!["1"; 200_000].join("+");
        let (status, out, _) = run_with(&[source.as_str()], "");

        assert_eq!(status, 0);
        assert!(out.starts_with("(+ (+ (+ "));
        assert!(out.ends_with(" 1) 1)\n"));
    }

    #[test]
    fn test_expression_conflicts_with_file() {
        let result = Cli::try_parse_from(["exprp", "1 + 2", "--file", "input.expr"]);

        assert!(result.is_err());
    }
}
