//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fill `${variable}` placeholders in Word templates
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Increase log output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the variables used in the body of a template
    Names {
        /// Template package (.docx)
        template: PathBuf,

        /// Print the names as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Replace variables and write a new document
    Fill {
        /// Template package (.docx)
        template: PathBuf,

        /// Output package to create
        output: PathBuf,

        /// JSON object mapping variable names to values
        #[arg(long)]
        values: Option<PathBuf>,

        /// Set a variable, overriding the values file
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Set a variable from the raw content of a file
        #[arg(long = "set-file", value_name = "NAME=PATH", value_parser = parse_file_assignment)]
        set_file: Vec<(String, PathBuf)>,

        /// Fail if a variable of the document body has no value
        #[arg(long)]
        strict: bool,
    },
}

fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got `{}`", arg)),
    }
}

fn parse_file_assignment(arg: &str) -> Result<(String, PathBuf), String> {
    parse_assignment(arg).map(|(name, path)| (name, PathBuf::from(path)))
}

impl Cli {
    /// Log filter directive matching the verbosity flags
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("client=ACME = Co"),
            Ok(("client".to_string(), "ACME = Co".to_string()))
        );
        assert_eq!(
            parse_assignment("empty="),
            Ok(("empty".to_string(), String::new()))
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn test_parse_fill() {
        let cli = Cli::parse_from([
            "word-template",
            "-v",
            "fill",
            "in.docx",
            "out.docx",
            "--set",
            "a=1",
            "--set",
            "b=2",
            "--set-file",
            "c=notes.txt",
            "--strict",
        ]);

        assert_eq!(cli.log_level(), "debug");
        match cli.command {
            Commands::Fill {
                template,
                output,
                values,
                set,
                set_file,
                strict,
            } => {
                assert_eq!(template, PathBuf::from("in.docx"));
                assert_eq!(output, PathBuf::from("out.docx"));
                assert!(values.is_none());
                assert_eq!(set.len(), 2);
                assert_eq!(set_file, vec![("c".to_string(), PathBuf::from("notes.txt"))]);
                assert!(strict);
            }
            other => panic!("Expected fill command, got {:?}", other),
        }
    }
}
