mod cli;
mod util;

use clap::Parser;
use lattice_dispatch::compress::{compress, DispatchEntry};
use lattice_dispatch::SemanticResolver;
use lattice_syntax::{AstDb, Unit};

use cli::{Cli, CheckArgs, Command, DumpAstArgs, DumpDispatchArgs, ParseArgs};

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Check(args) => run_check(args),
        Command::DumpAst(args) => run_dump_ast(args),
        Command::DumpDispatch(args) => run_dump_dispatch(args),
    }
}

fn run_parse(args: ParseArgs) {
    let source = util::read_source(&args.path);
    let mut db = AstDb::new();
    let path = args.path.display().to_string();
    let unit_id = db.add_unit(&path, &source);
    let unit = db.get_unit(unit_id);

    print!("{}", unit.diagnostics.printer(&unit.source).path(&path).colored(args.color).render());

    if unit.diagnostics.has_errors() {
        std::process::exit(1);
    }
}

fn run_check(args: CheckArgs) {
    let source = util::read_source(&args.path);
    let mut db = AstDb::new();
    let path = args.path.display().to_string();
    let unit_id = db.add_unit(&path, &source);

    let mut resolver = SemanticResolver::new();
    resolver.run(&db);

    let unit = db.get_unit(unit_id);
    print!("{}", unit.diagnostics.printer(&unit.source).path(&path).colored(args.color).render());
    print!(
        "{}",
        resolver
            .diagnostics
            .printer(&unit.source)
            .path(&path)
            .colored(args.color)
            .render()
    );

    let failed = unit.diagnostics.has_errors()
        || resolver.diagnostics.has_errors()
        || (args.strict && (unit.diagnostics.has_warnings() || resolver.diagnostics.has_warnings()));
    if failed {
        std::process::exit(1);
    }
}

fn run_dump_ast(args: DumpAstArgs) {
    let source = util::read_source(&args.path);
    let mut db = AstDb::new();
    let path = args.path.display().to_string();
    let unit_id = db.add_unit(&path, &source);
    let unit = db.get_unit(unit_id);

    let mut out = String::new();
    write_node(unit, unit.root, 0, &mut out);
    print!("{out}");
}

fn write_node(unit: &Unit, node: lattice_core::NodeId, depth: usize, out: &mut String) {
    use std::fmt::Write as _;
    let record = unit.node(node);
    let text = node_text(unit, node);
    let _ = writeln!(out, "{:indent$}{:?} {:?}", "", record.kind, text, indent = depth * 2);
    for &child in unit.children(node) {
        write_node(unit, child, depth + 1, out);
    }
}

/// Leaf nodes (no children) show the token text they span; interior nodes
/// show nothing extra since their children already speak for them.
fn node_text(unit: &Unit, node: lattice_core::NodeId) -> Option<String> {
    if !unit.children(node).is_empty() {
        return None;
    }
    let record = unit.node(node);
    let first = unit.token(record.first_token);
    let last = unit.token(record.last_token);
    let start = first.span.start.byte as usize;
    let end = last.span.end.byte as usize;
    unit.source.get(start..end).map(str::to_string)
}

fn run_dump_dispatch(args: DumpDispatchArgs) {
    let source = util::read_source(&args.path);
    let mut db = AstDb::new();
    let path = args.path.display().to_string();
    db.add_unit(&path, &source);

    let mut resolver = SemanticResolver::new();
    resolver.run(&db);

    let entries: Vec<DispatchEntry> = resolver
        .signatures
        .families()
        .flat_map(|((name, _arity), family)| {
            family.implementations.iter().map(move |&function_id| {
                let signature = resolver.signatures.signature(function_id);
                DispatchEntry {
                    type_pattern: signature.param_types.clone(),
                    function_name: name,
                    module_name: lattice_core::StrId::EMPTY,
                    signature_hash: function_id.as_u32() as u64,
                    specificity_score: 0,
                    call_frequency: 1,
                    hot_path: false,
                    fallback: None,
                }
            })
        })
        .collect();

    let table = compress(entries);
    print!("{}", lattice_dispatch::compress::dump_table(&table));
}
