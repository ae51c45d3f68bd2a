//! Argument surface for `latticec`, grounded in the teacher's small,
//! per-subcommand `*Args` structs — scaled down to the four subcommands
//! this front-end actually exposes rather than the teacher's full
//! query/exec/trace/lang command table.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "latticec", version, about = "Driver for the lattice compiler front-end")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a source file and report syntax diagnostics.
    Parse(ParseArgs),
    /// Parse, then run the semantic resolver, reporting every diagnostic.
    Check(CheckArgs),
    /// Print the columnar AST as an indented tree.
    DumpAst(DumpAstArgs),
    /// Print a compressed dispatch table built from the file's function families.
    DumpDispatch(DumpDispatchArgs),
}

#[derive(clap::Args)]
pub struct ParseArgs {
    pub path: PathBuf,
    #[arg(long)]
    pub color: bool,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    pub path: PathBuf,
    #[arg(long)]
    pub color: bool,
    /// Treat warnings as failures, like `check --strict` in the teacher's CLI.
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args)]
pub struct DumpAstArgs {
    pub path: PathBuf,
}

#[derive(clap::Args)]
pub struct DumpDispatchArgs {
    pub path: PathBuf,
}
