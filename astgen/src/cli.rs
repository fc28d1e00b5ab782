//! Command-line interface of the `astgen` binary.

use crate::emit::{EmitError, Emitter};
use crate::fs::DiskFs;
use crate::prompt::{AssumeYes, Confirm, TerminalPrompt};
use anyhow::Context;
use astgen_codegen::{
    CodegenError, GeneratedTree, RenderOptions, generate_schema, generate_schema_combined,
    select_tree,
};
use astgen_schema::{ParseError, Schema, SchemaError, parse_schema_file};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// Exit code: the output directory does not exist.
pub const EXIT_OUTPUT_MISSING: u8 = 1;
/// Exit code: the output path is not a directory.
pub const EXIT_NOT_A_DIRECTORY: u8 = 2;
/// Exit code: the user declined a confirmation.
pub const EXIT_ABORTED: u8 = 3;
/// Exit code: the schema could not be loaded or is invalid.
pub const EXIT_SCHEMA: u8 = 4;
/// Exit code: any other failure.
pub const EXIT_OTHER: u8 = 5;

/// generate visitor-pattern tree classes from a node-type schema
#[derive(Parser, Debug)]
#[command(name = "astgen", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// generate the tree classes into an output directory
    Generate(GenerateArgs),
    /// load and validate a schema without generating anything
    Check(SchemaArgs),
    /// print the combined rendering of each tree to stdout
    Print(PrintArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// schema file describing the trees
    #[arg(long, short)]
    pub schema: PathBuf,

    /// only process the tree with this base class
    #[arg(long, short)]
    pub tree: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub schema_args: SchemaArgs,

    /// existing directory the tree files are written to
    #[arg(long, short)]
    pub output_dir: PathBuf,

    /// write one combined file per tree instead of one file per type
    #[arg(long, default_value_t = false)]
    pub combined: bool,

    /// delete everything in each target directory before writing
    #[arg(long, default_value_t = false)]
    pub clean: bool,

    /// answer yes to every confirmation
    #[arg(long, short, default_value_t = false)]
    pub yes: bool,

    /// omit the generated-code banner
    #[arg(long, default_value_t = false)]
    pub no_banner: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PrintArgs {
    #[command(flatten)]
    pub schema_args: SchemaArgs,

    /// omit the generated-code banner
    #[arg(long, default_value_t = false)]
    pub no_banner: bool,
}

/// Runs a parsed command line.
///
/// # Errors
/// Returns the first failure; see [`exit_code`] for its process exit code.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate(args) => {
            let mut prompt: Box<dyn Confirm> = if args.yes {
                Box::new(AssumeYes)
            } else {
                Box::new(TerminalPrompt::stdio())
            };
            generate(&args, prompt.as_mut())
        }
        Command::Check(args) => check(&args, &mut std::io::stdout().lock()),
        Command::Print(args) => print(&args, &mut std::io::stdout().lock()),
    }
}

/// Generates and writes the selected trees.
///
/// # Errors
/// Returns schema, emission or IO errors.
pub fn generate(args: &GenerateArgs, prompt: &mut dyn Confirm) -> anyhow::Result<()> {
    let schema = load_schema(&args.schema_args)?;
    let options = render_options(args.no_banner);

    let trees: Vec<GeneratedTree> = if args.combined {
        generate_schema_combined(&schema, &options)?
    } else {
        generate_schema(&schema, &options)?
    };

    let mut emitter = Emitter::new(DiskFs, prompt).clean(args.clean);
    let report = emitter.emit(&trees, &args.output_dir)?;

    tracing::info!(
        "OK. Wrote {} files, removed {} entries",
        report.written.len(),
        report.removed.len()
    );
    Ok(())
}

/// Loads and validates the schema, then prints a summary to `out`.
///
/// Validation runs through generation so that the names the default render
/// options reserve are checked too.
///
/// # Errors
/// Returns schema or IO errors.
pub fn check(args: &SchemaArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let schema = load_schema(args)?;
    let options = RenderOptions::default();
    generate_schema(&schema, &options)?;

    for tree in &schema.trees {
        writeln!(
            out,
            "{}.{}: {} node types",
            tree.namespace,
            tree.base_class_name,
            tree.nodes.len()
        )?;
    }
    writeln!(
        out,
        "schema OK: {} trees, {} node types",
        schema.trees.len(),
        schema.node_count()
    )?;
    Ok(())
}

/// Prints the combined rendering of each selected tree to `out`.
///
/// # Errors
/// Returns schema or IO errors.
pub fn print(args: &PrintArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let schema = load_schema(&args.schema_args)?;
    let options = render_options(args.no_banner);

    let trees = generate_schema_combined(&schema, &options)?;
    for (i, tree) in trees.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        for file in &tree.files {
            write!(out, "{}", file.contents)?;
        }
    }
    Ok(())
}

/// Maps an error returned by [`run`] to a process exit code.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(emit) = cause.downcast_ref::<EmitError>() {
            return match emit {
                EmitError::OutputMissing { .. } => EXIT_OUTPUT_MISSING,
                EmitError::NotADirectory { .. } => EXIT_NOT_A_DIRECTORY,
                EmitError::Aborted => EXIT_ABORTED,
                EmitError::InvalidDirectory { .. } | EmitError::OverlappingTrees { .. } => {
                    EXIT_SCHEMA
                }
                EmitError::Prompt(_) | EmitError::Io { .. } => EXIT_OTHER,
            };
        }
        if cause.is::<CodegenError>() || cause.is::<ParseError>() || cause.is::<SchemaError>() {
            return EXIT_SCHEMA;
        }
    }
    EXIT_OTHER
}

fn load_schema(args: &SchemaArgs) -> anyhow::Result<Schema> {
    let schema = parse_schema_file(&args.schema)
        .with_context(|| format!("failed to load schema {}", args.schema.display()))?;

    let schema = match &args.tree {
        Some(base) => select_tree(&schema, base)?,
        None => schema,
    };

    tracing::info!(
        "Loaded {} trees with {} node types from {}",
        schema.trees.len(),
        schema.node_count(),
        args.schema.display()
    );
    Ok(schema)
}

fn render_options(no_banner: bool) -> RenderOptions {
    let options = RenderOptions::default();
    if no_banner {
        options.banner(None)
    } else {
        options
    }
}
