use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use signature_compiler::output::{OutputFormat, format_command, format_tree};
use signature_compiler::{DispatchTreeBuilder, compile_manifest, parse_signature};
use signature_core::{CommandManifest, validate_commands};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "sigc")]
#[command(about = "Compile command signatures into dispatch trees", version)]
struct Cli {
    /// Print compiler diagnostics on stderr (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a single signature and print the parsed command.
    Parse(ParseArgs),
    /// Compile a manifest into a dispatch tree.
    Build(BuildArgs),
    /// Check every command of a manifest for structural problems.
    Validate(ValidateArgs),
    /// Resolve a command name against a manifest's dispatch tree.
    Route(RouteArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Signature file to compile. Reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Description attached to the compiled command.
    #[arg(long, default_value = "")]
    description: String,
    /// Output format (default: json).
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Manifest file (YAML, or JSON by `.json` extension).
    #[arg(long)]
    manifest: PathBuf,
    /// Output format (default: json).
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Reject duplicate top-level commands even if the manifest allows them.
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Manifest file (YAML, or JSON by `.json` extension).
    #[arg(long)]
    manifest: PathBuf,
}

#[derive(Debug, Args)]
struct RouteArgs {
    /// Manifest file (YAML, or JSON by `.json` extension).
    #[arg(long)]
    manifest: PathBuf,
    /// Command name as typed, e.g. `make` or `make:controller`.
    name: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Build(args) => run_build(args),
        Command::Validate(args) => run_validate(args),
        Command::Route(args) => run_route(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let signature = match &args.input {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            text
        }
    };

    if signature.trim().is_empty() {
        return Err("Signature is empty".to_string());
    }

    let command = parse_signature(&signature, &args.description);
    println!("{}", format_command(&command, args.format)?);
    Ok(())
}

fn run_build(args: BuildArgs) -> Result<(), String> {
    let mut manifest = load_manifest(&args.manifest)?;
    manifest.strict |= args.strict;

    let builder = DispatchTreeBuilder::from_manifest(&manifest).map_err(|e| e.to_string())?;
    let tree = builder.build();
    tracing::debug!(
        commands = tree.len(),
        manifest = %args.manifest.display(),
        "Built dispatch tree"
    );
    println!("{}", format_tree(&tree, args.format)?);
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let manifest = load_manifest(&args.manifest)?;
    let commands: Vec<_> = compile_manifest(&manifest)
        .into_iter()
        .map(|(parsed, _)| parsed)
        .collect();

    let errors = validate_commands(&commands);
    if !errors.is_empty() {
        for err in &errors {
            eprintln!("  - {err}");
        }
        return Err(format!(
            "{} validation error(s) in '{}'",
            errors.len(),
            args.manifest.display()
        ));
    }

    println!(
        "Validated {} command(s) in '{}'.",
        commands.len(),
        args.manifest.display()
    );
    Ok(())
}

fn run_route(args: RouteArgs) -> Result<(), String> {
    let manifest = load_manifest(&args.manifest)?;
    let tree = signature_compiler::build_tree(&manifest).map_err(|e| e.to_string())?;

    let route = tree
        .route(&args.name)
        .ok_or_else(|| format!("Unknown command '{}'", args.name))?;

    match route.sub_command {
        Some(sub) => println!("{} -> {} ({sub})", route.entry.name, route.handler),
        None => println!("{} -> {}", route.entry.name, route.handler),
    }
    Ok(())
}

fn load_manifest(path: &Path) -> Result<CommandManifest, String> {
    CommandManifest::load(path)
        .map_err(|err| format!("Failed to load manifest '{}': {err}", path.display()))
}
