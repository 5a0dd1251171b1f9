//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `libmodal_core` linkage.
//! - Run the boundary stub and the startup message-limit parity check.
//! - Print the published export table, or one export, for ABI review.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `libmodal_cli [x y]` or `libmodal_cli abi [symbol]`. Exits with
//! status 1 on bad arguments or an unknown symbol and 2 on a message-limit
//! mismatch with the active profile.

use libmodal_core::{
    add_two_numbers, catch_boundary, checked_add, default_log_level, find_export, init_logging,
    render_export_table, ConfigError, Profile, ABI_VERSION, EXPORTED_STATICS, EXPORT_TABLE,
    MAX_MESSAGE_SIZE,
};
use log::warn;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("LIBMODAL_LOG_DIR") {
        let level =
            std::env::var("LIBMODAL_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let (x, y) = match parse_command(std::env::args().skip(1)) {
        Ok(Command::Smoke(x, y)) => (x, y),
        Ok(Command::Abi(symbol)) => {
            return match describe_abi(symbol.as_deref()) {
                Ok(text) => {
                    print!("{text}");
                    ExitCode::SUCCESS
                }
                Err(message) => {
                    eprintln!("{message}");
                    ExitCode::from(1)
                }
            };
        }
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: libmodal_cli [x y] | libmodal_cli abi [symbol]");
            return ExitCode::from(1);
        }
    };

    println!("libmodal_core ping={}", libmodal_core::ping());
    println!("libmodal_core version={}", libmodal_core::core_version());
    println!("libmodal_core abi_version={ABI_VERSION}");
    println!("libmodal_core max_message_size={MAX_MESSAGE_SIZE}");

    let sum = catch_boundary("cli_add", 0, || add_two_numbers(x, y));
    match checked_add(x, y) {
        Ok(_) => println!("add_two_numbers({x}, {y})={sum}"),
        Err(err) => println!("add_two_numbers({x}, {y})={sum} wrapped ({err})"),
    }

    match Profile::from_env(None) {
        Ok(profile) => match profile.check_limit_parity() {
            Ok(true) => println!("limit_parity=ok"),
            Ok(false) => println!("limit_parity=skipped reason=server_limit_unknown"),
            Err(err) => {
                eprintln!("limit_parity=error {err}");
                return ExitCode::from(2);
            }
        },
        Err(ConfigError::MissingCredentials) => {
            println!("limit_parity=skipped reason=no_profile");
        }
        Err(err) => {
            warn!("event=profile_load module=cli status=error error={err}");
            println!("limit_parity=skipped reason=config_error");
        }
    }

    ExitCode::SUCCESS
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// Run the stub with this pair, then the parity check.
    Smoke(i32, i32),
    /// Print the whole export table, or the named export only.
    Abi(Option<String>),
}

fn parse_command(args: impl Iterator<Item = String>) -> Result<Command, String> {
    let args = args.collect::<Vec<_>>();
    match args.as_slice() {
        [first, rest @ ..] if first == "abi" => match rest {
            [] => Ok(Command::Abi(None)),
            [symbol] => Ok(Command::Abi(Some(symbol.clone()))),
            other => Err(format!("abi takes at most 1 symbol, got {}", other.len())),
        },
        _ => parse_two_numbers(&args).map(|(x, y)| Command::Smoke(x, y)),
    }
}

/// Renders the golden-file view of the exports, or one export's line.
fn describe_abi(symbol: Option<&str>) -> Result<String, String> {
    match symbol {
        None => Ok(render_export_table(ABI_VERSION, EXPORT_TABLE, EXPORTED_STATICS)),
        Some(name) => find_export(name)
            .map(|export| format!("{export}\n"))
            .ok_or_else(|| format!("unknown export `{name}`")),
    }
}

/// Parses the optional `x y` pair; no arguments means the `(2, 3)` smoke case.
fn parse_two_numbers(args: &[String]) -> Result<(i32, i32), String> {
    match args {
        [] => Ok((2, 3)),
        [x, y] => {
            let x = x
                .trim()
                .parse::<i32>()
                .map_err(|err| format!("invalid integer for x `{x}`: {err}"))?;
            let y = y
                .trim()
                .parse::<i32>()
                .map_err(|err| format!("invalid integer for y `{y}`: {err}"))?;
            Ok((x, y))
        }
        other => Err(format!("expected 0 or 2 arguments, got {}", other.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::{describe_abi, parse_command, parse_two_numbers, Command};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn defaults_to_smoke_pair() {
        assert_eq!(parse_two_numbers(&args(&[])), Ok((2, 3)));
        assert_eq!(
            parse_command(args(&[]).into_iter()),
            Ok(Command::Smoke(2, 3))
        );
    }

    #[test]
    fn parses_abi_subcommand() {
        assert_eq!(
            parse_command(args(&["abi"]).into_iter()),
            Ok(Command::Abi(None))
        );
        assert_eq!(
            parse_command(args(&["abi", "add_two_numbers"]).into_iter()),
            Ok(Command::Abi(Some("add_two_numbers".to_string())))
        );
        assert!(parse_command(args(&["abi", "a", "b"]).into_iter())
            .unwrap_err()
            .contains("at most 1"));
    }

    #[test]
    fn describe_abi_matches_published_exports() {
        let table = describe_abi(None).unwrap();
        assert!(table.starts_with("abi_version=1\n"));
        assert!(table.contains("v1 static LIBMODAL_MAX_MESSAGE_SIZE: usize\n"));

        assert_eq!(
            describe_abi(Some("add_two_numbers")).unwrap(),
            "v1 extern \"C\" add_two_numbers(i32, i32) -> void\n"
        );
        assert_eq!(
            describe_abi(Some("LIBMODAL_MAX_MESSAGE_SIZE")).unwrap(),
            "v1 static LIBMODAL_MAX_MESSAGE_SIZE: usize\n"
        );
        assert!(describe_abi(Some("add_three_numbers"))
            .unwrap_err()
            .contains("unknown export"));
    }

    #[test]
    fn parses_full_range_pair() {
        assert_eq!(
            parse_two_numbers(&args(&["2147483647", "-2147483648"])),
            Ok((i32::MAX, i32::MIN))
        );
    }

    #[test]
    fn rejects_non_integer_and_wrong_arity() {
        assert!(parse_two_numbers(&args(&["two", "3"]))
            .expect_err("non-integer must fail")
            .contains("x"));
        assert!(parse_two_numbers(&args(&["1"]))
            .expect_err("single arg must fail")
            .contains("got 1"));
    }
}
