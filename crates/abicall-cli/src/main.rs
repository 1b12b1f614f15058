use std::path::{Path, PathBuf};
use std::process;

use abicall_core::{
    parse_call, parse_values, Contract, Error, MethodDescriptor, ParamType, ParsedCall, Value,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// abicall — turn human-typed contract calls into typed ABI arguments
///
/// Parse calls against a JSON ABI or a method signature, and check
/// comma-separated value lists against a list of types.
#[derive(Parser)]
#[command(name = "abicall", version, about, long_about = None)]
struct Cli {
    /// Log more detail to stderr (-v debug, -vv trace); RUST_LOG also works
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a call such as 'transfer(0x5FfC...4cc4, 100)'
    Parse {
        /// Path to a JSON ABI file (bare array or build artifact)
        #[arg(long, conflicts_with = "signature", required_unless_present = "signature")]
        abi: Option<PathBuf>,
        /// Method signature instead of an ABI, e.g. 'transfer(address,uint256)'
        #[arg(long)]
        signature: Option<String>,
        /// Call text
        call: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a comma-separated value list against a list of types
    Values {
        /// Comma-separated types, e.g. 'bool,uint256,address'
        #[arg(long)]
        types: String,
        /// Comma-separated values, e.g. 'false,2,0x5FfC...4cc4'
        #[arg(long)]
        data: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the methods of a JSON ABI
    Methods {
        /// Path to a JSON ABI file
        #[arg(long)]
        abi: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Parse {
            abi,
            signature,
            call,
            json,
        } => cmd_parse(abi.as_deref(), signature.as_deref(), &call, json),
        Commands::Values { types, data, json } => cmd_values(&types, &data, json),
        Commands::Methods { abi, json } => cmd_methods(&abi, json),
        Commands::Version => {
            println!(
                "abicall {} (abicall-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            0
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Commands ──────────────────────────────────────────────

fn cmd_parse(abi: Option<&Path>, signature: Option<&str>, call: &str, json: bool) -> i32 {
    let contract = match load_contract(abi, signature) {
        Ok(contract) => contract,
        Err(err) => return report_fatal(&err),
    };

    match parse_call(&contract, call) {
        Ok(parsed) => {
            if json {
                print_json(&parsed.to_json());
            } else {
                print_call(&parsed);
            }
            0
        }
        Err(err) => report_rejected(&err, json),
    }
}

fn cmd_values(types: &str, data: &str, json: bool) -> i32 {
    let types = match ParamType::parse_list(types).context("invalid --types") {
        Ok(types) => types,
        Err(err) => return report_fatal(&err),
    };

    match parse_values(&types, data) {
        Ok(values) => {
            if json {
                let entries: Vec<serde_json::Value> = types
                    .iter()
                    .zip(&values)
                    .map(|(ty, value)| {
                        serde_json::json!({ "type": ty.to_string(), "value": value.to_json() })
                    })
                    .collect();
                print_json(&serde_json::json!({ "values": entries }));
            } else {
                for (i, (ty, value)) in types.iter().zip(&values).enumerate() {
                    print_value(i, "", ty, value);
                }
            }
            0
        }
        Err(err) => report_rejected(&err, json),
    }
}

fn cmd_methods(abi: &Path, json: bool) -> i32 {
    let contract = match load_contract(Some(abi), None) {
        Ok(contract) => contract,
        Err(err) => return report_fatal(&err),
    };

    let constructor = contract.constructor();
    let mut methods: Vec<(&str, &MethodDescriptor)> = Vec::new();
    if !constructor.inputs.is_empty() {
        methods.push((abicall_core::CONSTRUCTOR, constructor));
    }
    methods.extend(contract.methods());

    if json {
        let entries: Vec<serde_json::Value> = methods
            .iter()
            .map(|(name, method)| {
                serde_json::json!({ "name": name, "signature": method.signature() })
            })
            .collect();
        print_json(&serde_json::json!({ "methods": entries }));
    } else {
        for (name, method) in methods {
            if name == method.name {
                println!("{}", method.signature().bold());
            } else {
                println!("{} {}", method.signature().bold(), format!("(as {})", name).dimmed());
            }
        }
    }
    0
}

// ── Helpers ───────────────────────────────────────────────

fn load_contract(abi: Option<&Path>, signature: Option<&str>) -> anyhow::Result<Contract> {
    if let Some(path) = abi {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ABI file {}", path.display()))?;
        let contract = Contract::from_json(&text)
            .with_context(|| format!("invalid ABI in {}", path.display()))?;
        tracing::debug!(path = %path.display(), methods = contract.methods().count(), "loaded ABI");
        return Ok(contract);
    }

    let signature = signature.context("either --abi or --signature is required")?;
    let method = MethodDescriptor::parse_signature(signature).context("invalid --signature")?;
    Ok(Contract::from_methods(vec![method]))
}

fn print_call(parsed: &ParsedCall) {
    println!("{}", parsed.method.signature().bold());
    for (i, (param, value)) in parsed.method.inputs.iter().zip(&parsed.args).enumerate() {
        print_value(i, &param.name, &param.ty, value);
    }
}

fn print_value(index: usize, name: &str, ty: &ParamType, value: &Value) {
    let label = if name.is_empty() {
        ty.to_string()
    } else {
        format!("{} {}", ty, name)
    };
    println!("  [{}] {} = {}", index, label.cyan(), value);
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(err) => eprintln!("{} {}", "error:".red().bold(), err),
    }
}

/// Call text or data rejected: exit 1, or 2 when the failure is a defect
fn report_rejected(err: &Error, json: bool) -> i32 {
    let code = if err.is_internal() { 2 } else { 1 };
    if json {
        print_json(&serde_json::json!({
            "valid": false,
            "error": err.to_string(),
            "internal": err.is_internal(),
        }));
    } else if err.is_internal() {
        eprintln!("{} {}", "internal error:".red().bold(), err);
    } else {
        eprintln!("{} {}", "error:".red().bold(), err);
    }
    code
}

fn report_fatal(err: &anyhow::Error) -> i32 {
    eprintln!("{} {:#}", "error:".red().bold(), err);
    2
}
