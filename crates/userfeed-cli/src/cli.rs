//! CLI argument definitions for the user feed validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "userfeed",
    version,
    about = "User feed validator - split a users CSV into accepted and rejected records",
    long_about = "Validate a header-less users CSV file.\n\n\
                  Accepted records are written to stdout. Every rule violation is\n\
                  recorded in a rejection CSV whose email column carries the reason."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow record values (emails, names) to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a users file and write the rejection artifact.
    Validate(ValidateArgs),

    /// List the validation rules in evaluation order.
    Rules,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Users CSV file without a header row.
    #[arg(value_name = "INPUT", default_value = "users.csv")]
    pub input: PathBuf,

    /// Where to write rejected records.
    #[arg(long = "rejections", value_name = "PATH", default_value = "users_errors.csv")]
    pub rejections: PathBuf,

    /// How accepted records are printed on stdout.
    #[arg(long = "accepted-format", value_enum, default_value = "text")]
    pub accepted_format: AcceptedFormatArg,

    /// Only apply length rules to non-empty values.
    ///
    /// By default an empty required field is reported both as missing and as
    /// a length error. With this flag it is only reported as missing.
    #[arg(long = "strict-length")]
    pub strict_length: bool,

    /// Write a JSON run report to this path.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,

    /// Exit with status 1 when any record was rejected.
    #[arg(long = "fail-on-rejections")]
    pub fail_on_rejections: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AcceptedFormatArg {
    /// `email first_name last_name` per line.
    Text,
    /// One JSON object per line.
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn validate_defaults() {
        let cli = Cli::try_parse_from(["userfeed", "validate"]).unwrap();
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.input, PathBuf::from("users.csv"));
        assert_eq!(args.rejections, PathBuf::from("users_errors.csv"));
        assert!(matches!(args.accepted_format, AcceptedFormatArg::Text));
        assert!(!args.strict_length);
        assert!(args.report_json.is_none());
        assert!(!cli.log_data);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "userfeed",
            "validate",
            "in.csv",
            "--strict-length",
            "--accepted-format",
            "json",
            "--log-data",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert!(cli.log_data);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert!(args.strict_length);
        assert!(matches!(args.accepted_format, AcceptedFormatArg::Json));
    }
}
