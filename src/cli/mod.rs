//! Command-line interface for the `stacks` binary.
//!
//! Commands load stacks through [`crate::formats`], run them through the
//! [`OperationRegistry`] or a filter, and write the result back. Progress is
//! logged; summaries go to the output writer passed to [`run`].

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::IoConfig;
use crate::error::{Result, StackError};
use crate::formats::{load_stack, write_stack};
use crate::operations::{OperationKind, OperationRegistry};
use crate::stack::{PropertyFilter, Stack};

#[derive(Parser, Debug)]
#[command(name = "stacks")]
#[command(about = "Multiset operations on card collections", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Treat prints with different collector numbers as different cards
    #[arg(long, global = true)]
    pub collector_number_identity: bool,

    /// Read sideboard sections of deck lists
    #[arg(long, global = true)]
    pub include_sideboard: bool,

    /// Write deck lists sorted by name
    #[arg(long, global = true)]
    pub sort: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Combine all cards from both stacks
    Union(OperationArgs),

    /// Find cards that exist in both stacks
    Intersection(OperationArgs),

    /// Find cards in the first stack that are not in the second stack
    Difference(OperationArgs),

    /// Run a registered operation by name
    Op {
        /// Operation name (see list-operations)
        name: String,

        #[command(flatten)]
        args: OperationArgs,
    },

    /// List available stack operations
    #[command(alias = "ops")]
    ListOperations,

    /// Keep only cards matching every filter
    Filter {
        /// Input stack file
        input: PathBuf,

        /// Output stack file
        output: PathBuf,

        /// Filter as property:operator:value (e.g. price:gte:10)
        #[arg(short = 'w', long = "where", value_name = "EXPR", required = true)]
        filters: Vec<String>,
    },

    /// Print a stack
    Show {
        /// Input stack file
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a stack between file formats
    Convert {
        /// Input stack file
        input: PathBuf,

        /// Output stack file
        output: PathBuf,
    },
}

/// Inputs and output of a binary stack operation.
#[derive(Args, Debug)]
pub struct OperationArgs {
    /// First input stack file
    pub input1: PathBuf,

    /// Second input stack file
    pub input2: PathBuf,

    /// Output stack file
    pub output: PathBuf,
}

impl Cli {
    /// Adapter settings from the global flags.
    #[must_use]
    pub fn io_config(&self) -> IoConfig {
        IoConfig::new()
            .with_collector_number_identity(self.collector_number_identity)
            .with_sideboard(self.include_sideboard)
            .with_sorted_deck_list(self.sort)
    }

    /// Default log filter for the verbosity flag. `RUST_LOG` overrides it.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Run a parsed command, writing summaries to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let config = cli.io_config();
    let registry = OperationRegistry::with_defaults();

    match &cli.command {
        Commands::Union(args) => {
            run_operation(&registry, OperationKind::Union.name(), args, &config, out)?;
        }
        Commands::Intersection(args) => {
            run_operation(&registry, OperationKind::Intersection.name(), args, &config, out)?;
        }
        Commands::Difference(args) => {
            run_operation(&registry, OperationKind::Difference.name(), args, &config, out)?;
        }
        Commands::Op { name, args } => {
            run_operation(&registry, name, args, &config, out)?;
        }
        Commands::ListOperations => {
            writeln!(out, "Available stack operations:\n")?;
            for operation in registry.iter() {
                writeln!(out, "  {:<12} - {}", operation.name, operation.description)?;
            }
        }
        Commands::Filter {
            input,
            output,
            filters,
        } => {
            let filters = filters
                .iter()
                .map(|f| f.parse())
                .collect::<Result<Vec<PropertyFilter>>>()?;

            let stack = load_stack(input, &config)?;
            let result = stack.filter(&filters);
            write_stack(&result, output, &config)?;

            writeln!(out, "Kept {} of {} cards", result.total(), stack.total())?;
        }
        Commands::Show { input, json } => {
            let stack = load_stack(input, &config)?;
            if *json {
                let text = serde_json::to_string_pretty(&stack)
                    .map_err(|e| StackError::format(e.to_string()))?;
                writeln!(out, "{}", text)?;
            } else {
                show(&stack, out)?;
            }
        }
        Commands::Convert { input, output } => {
            let stack = load_stack(input, &config)?;
            write_stack(&stack, output, &config)?;
            writeln!(out, "Converted {} cards to {}", stack.total(), output.display())?;
        }
    }

    Ok(())
}

fn run_operation(
    registry: &OperationRegistry,
    name: &str,
    args: &OperationArgs,
    config: &IoConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let operation = registry.lookup(name)?;

    let first = load_stack(&args.input1, config)?;
    let second = load_stack(&args.input2, config)?;
    warn_on_domain_mismatch(&first, &second);

    log::info!("Performing {} operation", operation.name);
    let result = operation.execute(&first, &second)?;
    write_stack(&result, &args.output, config)?;

    writeln!(out, "Operation completed successfully!")?;
    writeln!(out, "First stack: {} cards", first.total())?;
    writeln!(out, "Second stack: {} cards", second.total())?;
    writeln!(out, "Result stack: {} cards", result.total())?;
    Ok(())
}

/// Cards and prints never match each other, so mixing them is usually a
/// mistake in the inputs.
fn warn_on_domain_mismatch(first: &Stack, second: &Stack) {
    if first.is_mixed() || second.is_mixed() {
        log::warn!("Input mixes cards and prints; only keys of the same kind can match");
        return;
    }
    if let (Some(a), Some(b)) = (first.domain(), second.domain()) {
        if a != b {
            log::warn!(
                "Comparing a {} stack with a {} stack; no keys can match (convert one side first)",
                a,
                b
            );
        }
    }
}

fn show(stack: &Stack, out: &mut dyn Write) -> Result<()> {
    for (key, count) in stack.items() {
        writeln!(out, "{:>4}x {}", count, key)?;
    }
    writeln!(
        out,
        "Total: {} cards ({} unique names)",
        stack.total(),
        stack.names().len()
    )?;
    Ok(())
}
