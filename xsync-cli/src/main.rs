//! xsync - write JSON models into XML descriptors without reformatting them

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use xml_sync::{schema, Document, ModelWriter, OutputFormat, Record, Schema, TextMode};

/// Format-preserving XML model synchronization
#[derive(Parser)]
#[command(name = "xsync")]
#[command(version)]
#[command(about = "Write models into XML descriptors, keeping their formatting", long_about = None)]
struct Cli {
    /// Increase log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synchronize a JSON model into a document
    #[command(visible_alias = "s")]
    Sync {
        /// Document to update
        document: PathBuf,
        /// Model as JSON
        model: PathBuf,

        /// Built-in schema (default: named after the root element)
        #[arg(long)]
        schema: Option<String>,

        /// Output file, `-` for stdout (default: update the document in place)
        #[arg(short, long)]
        output: Option<String>,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Exit with status 1 if synchronizing would change the document, 2 on
    /// errors
    #[command(visible_alias = "c")]
    Check {
        /// Document to check
        document: PathBuf,
        /// Model as JSON
        model: PathBuf,

        /// Built-in schema (default: named after the root element)
        #[arg(long)]
        schema: Option<String>,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// List the built-in schemas
    Schemas,
}

#[derive(clap::Args)]
struct FormatArgs {
    /// Spaces per indentation level for new elements
    #[arg(long, default_value = "2")]
    indent: usize,

    /// Use CRLF line endings for new elements
    #[arg(long)]
    crlf: bool,

    /// Encoding label for the XML declaration
    #[arg(long)]
    encoding: Option<String>,

    /// Do not write the XML declaration
    #[arg(long)]
    omit_declaration: bool,

    /// Write new empty elements as `<a/>`
    #[arg(long)]
    collapse_empty: bool,

    /// How text content is written
    #[arg(long, value_enum, default_value = "preserve")]
    text_mode: TextModeArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum TextModeArg {
    Preserve,
    Trim,
    Normalize,
}

impl FormatArgs {
    fn output_format(&self) -> OutputFormat {
        let mut format = OutputFormat::default()
            .with_indent(" ".repeat(self.indent))
            .with_line_separator(if self.crlf { "\r\n" } else { "\n" })
            .with_omit_declaration(self.omit_declaration)
            .with_expand_empty_elements(!self.collapse_empty)
            .with_text_mode(match self.text_mode {
                TextModeArg::Preserve => TextMode::Preserve,
                TextModeArg::Trim => TextMode::Trim,
                TextModeArg::Normalize => TextMode::Normalize,
            });
        if let Some(encoding) = &self.encoding {
            format = format.with_encoding(encoding.clone());
        }
        format
    }
}

/// `check` found a document that synchronizing would change.
const EXIT_OUT_OF_DATE: u8 = 1;
/// The command could not run.
const EXIT_ERROR: u8 = 2;

/// Outcome of a command: `Ok(false)` when `check` found a stale document.
type Outcome = Result<bool, Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Commands::Sync {
            document,
            model,
            schema,
            output,
            format,
        } => run_sync(
            &document,
            &model,
            schema.as_deref(),
            output.as_deref(),
            &format.output_format(),
        )
        .map(|()| true),
        Commands::Check {
            document,
            model,
            schema,
            format,
        } => {
            let outcome = run_check(&document, &model, schema.as_deref(), &format.output_format());
            if let Ok(false) = outcome {
                eprintln!("{} is out of date", document.display());
            }
            outcome
        }
        Commands::Schemas => run_schemas().map(|()| true),
    };

    if let Err(e) = &outcome {
        eprintln!("Error: {}", e);
    }
    ExitCode::from(exit_status(&outcome))
}

fn exit_status(outcome: &Outcome) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => EXIT_OUT_OF_DATE,
        Err(_) => EXIT_ERROR,
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Picks the schema by name, or by the document's root element.
fn resolve_schema(
    name: Option<&str>,
    document: &Document,
) -> Result<&'static Schema, Box<dyn std::error::Error>> {
    let name = match name {
        Some(name) => name.to_string(),
        None => document
            .root_element()?
            .borrow()
            .element()
            .map(|e| e.local_name().to_string())
            .unwrap_or_default(),
    };
    debug!(schema = %name, "resolving schema");
    schema::builtin(&name).ok_or_else(|| format!("unknown schema `{}`", name).into())
}

/// Loads the model and synchronizes it into the document at `document_path`.
/// Returns the stored bytes and the synchronized output, both encoded as the
/// document declares.
fn synchronize(
    document_path: &Path,
    model_path: &Path,
    schema_name: Option<&str>,
    format: &OutputFormat,
) -> Result<(Vec<u8>, Vec<u8>), Box<dyn std::error::Error>> {
    let source = fs::read(document_path)?;
    let mut document = Document::parse_bytes(&source)?;
    let schema = resolve_schema(schema_name, &document)?;

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(model_path)?)?;
    let model = Record::from_json(&json, schema)?;

    let output = ModelWriter::new(schema)
        .with_format(format.clone())
        .to_bytes(&model, &mut document)?;
    Ok((source, output))
}

fn run_sync(
    document_path: &Path,
    model_path: &Path,
    schema_name: Option<&str>,
    output_path: Option<&str>,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (source, output) = synchronize(document_path, model_path, schema_name, format)?;

    match output_path {
        Some("-") => io::stdout().write_all(&output)?,
        Some(path) => {
            fs::write(path, &output)?;
            info!("Wrote {}", path);
        }
        None if output == source => {
            info!("{} is up to date", document_path.display());
        }
        None => {
            fs::write(document_path, &output)?;
            info!("Wrote {}", document_path.display());
        }
    }
    Ok(())
}

/// Returns true when the document already matches the model.
fn run_check(
    document_path: &Path,
    model_path: &Path,
    schema_name: Option<&str>,
    format: &OutputFormat,
) -> Outcome {
    let (source, output) = synchronize(document_path, model_path, schema_name, format)?;
    Ok(source == output)
}

fn run_schemas() -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout().lock();
    for schema in schema::BUILTIN {
        writeln!(stdout, "{:<12} <{}>", schema.name, schema.root)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_flags() {
        let cli = Cli::try_parse_from([
            "xsync", "sync", "pom.xml", "model.json", "--indent", "4", "--crlf",
            "--collapse-empty", "--text-mode", "trim",
        ])
        .unwrap();
        let Commands::Sync { format, .. } = cli.command else {
            panic!("expected sync");
        };
        let format = format.output_format();
        assert_eq!(format.indent(), "    ");
        assert_eq!(format.line_separator(), "\r\n");
        assert!(!format.expand_empty_elements());
        assert_eq!(format.text_mode(), TextMode::Trim);
    }

    #[test]
    fn test_sync_in_place_and_check() {
        let dir = tempfile::tempdir().unwrap();
        let pom = write(
            dir.path(),
            "pom.xml",
            "<project>\n  <!-- keep -->\n  <artifactId>demo</artifactId>\n</project>\n",
        );
        let model = write(dir.path(), "model.json", r#"{"artifactId": "demo", "version": "1.0"}"#);
        let format = OutputFormat::default();

        assert!(!run_check(&pom, &model, None, &format).unwrap());
        run_sync(&pom, &model, None, None, &format).unwrap();
        assert_eq!(
            fs::read_to_string(&pom).unwrap(),
            "<project>\n  <!-- keep -->\n  <artifactId>demo</artifactId>\n  <version>1.0</version>\n</project>\n"
        );
        assert!(run_check(&pom, &model, Some("project"), &format).unwrap());
    }

    #[test]
    fn test_check_keeps_document_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let source: &[u8] =
            b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<project>\n  <name>Caf\xE9</name>\n</project>\n";
        let pom = dir.path().join("pom.xml");
        fs::write(&pom, source).unwrap();
        let model = write(dir.path(), "model.json", r#"{"name": "Caf\u00e9"}"#);

        assert!(run_check(&pom, &model, None, &OutputFormat::default()).unwrap());
        run_sync(&pom, &model, None, None, &OutputFormat::default()).unwrap();
        assert_eq!(fs::read(&pom).unwrap(), source);
    }

    #[test]
    fn test_exit_status_separates_stale_from_broken() {
        let dir = tempfile::tempdir().unwrap();
        let pom = write(dir.path(), "pom.xml", "<project>\n  <version>1.0</version>\n</project>\n");
        let model = write(dir.path(), "model.json", r#"{"version": "1.1"}"#);
        let format = OutputFormat::default();

        let stale = run_check(&pom, &model, None, &format);
        assert_eq!(exit_status(&stale), EXIT_OUT_OF_DATE);

        let broken = write(dir.path(), "broken.json", "{");
        let failed = run_check(&pom, &broken, None, &format);
        assert_eq!(exit_status(&failed), EXIT_ERROR);

        run_sync(&pom, &model, None, None, &format).unwrap();
        assert_eq!(exit_status(&run_check(&pom, &model, None, &format)), 0);
    }

    #[test]
    fn test_unknown_schema() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write(dir.path(), "a.xml", "<unknown/>");
        let model = write(dir.path(), "m.json", "{}");
        let err = run_check(&doc, &model, None, &OutputFormat::default()).unwrap_err();
        assert_eq!(err.to_string(), "unknown schema `unknown`");
    }
}
