//! Layout Algebra CLI
//!
//! Usage:
//!   layout-algebra [--debug] <COMMAND>
//!
//! Commands:
//!   parse <EXPR>              Parse an expression and print it normalized
//!   alternatives <EXPR>       List alternative expressions, most symmetric first
//!   compress <FILE>           Compress a TOML layout document to an expression
//!   solve <FILE>              Solve a TOML layout document and print area bounds

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use layout_algebra::search::{rank_by_symmetry, AlternativeSearch, Rewrite};
use layout_algebra::{
    parse, parse_fragment, AlgebraData, LayoutConfig, LayoutDocument, LayoutSession, ParseError, SoftStrategy,
};

#[derive(Parser)]
#[command(name = "layout-algebra")]
#[command(about = "Tab-based layouts as algebraic expressions")]
struct Cli {
    /// Print solver progress (filter with RUST_LOG)
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse an expression and print it normalized
    Parse {
        expr: String,
    },

    /// List alternative expressions of one fragment, most symmetric first
    Alternatives {
        expr: String,

        /// Inline opposite-direction child fragments of equal length
        #[arg(long)]
        flatten: bool,

        /// Split rows or columns of leaves into two halves
        #[arg(long)]
        split: bool,

        /// Group repeated runs and merge across children
        #[arg(long)]
        groups: bool,

        /// Print at most this many alternatives
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Compress a TOML layout document to an expression
    Compress {
        file: PathBuf,
    },

    /// Solve a TOML layout document and print area bounds
    Solve {
        file: PathBuf,

        /// Soft constraint strategy: adding or grouping
        #[arg(short, long, default_value = "grouping")]
        strategy: SoftStrategy,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("layout_algebra=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    match cli.command {
        Command::Parse { expr } => match parse(&expr) {
            Ok(spec) => {
                println!("{}", spec);
                eprintln!("{} fragment(s)", spec.len());
            }
            Err(errors) => exit_with_parse_errors(&errors, &expr),
        },
        Command::Alternatives {
            expr,
            flatten,
            split,
            groups,
            limit,
        } => {
            let root = match parse_fragment(&expr) {
                Ok(root) => root,
                Err(errors) => exit_with_parse_errors(&errors, &expr),
            };

            let mut search = AlternativeSearch::new().with_rule(Rewrite::Swap);
            if flatten {
                search.add_rule(Rewrite::Flatten);
            }
            if split {
                search.add_rule(Rewrite::Split);
            }
            if groups {
                search.add_rule(Rewrite::GroupRepeats);
                search.add_rule(Rewrite::MergeAcross);
            }

            let ranked = rank_by_symmetry(search.alternatives(&root));
            let shown = limit.unwrap_or(ranked.len());
            for (fragment, score) in ranked.iter().take(shown) {
                println!(
                    "{}\t(symmetry {}, elements {})",
                    fragment, score.symmetry, score.elements
                );
            }
        }
        Command::Compress { file } => {
            let data = load_document(&file).1;
            println!("{}", data.compress());
        }
        Command::Solve { file, strategy } => {
            let (doc, data) = load_document(&file);
            let config = doc.layout_config(LayoutConfig::new().with_strategy(strategy));
            let result = LayoutSession::new(&data, config).solve();

            println!(
                "# {} after {} solve(s), {} constraint(s) disabled",
                result.result,
                result.solves,
                result.disabled.len()
            );
            for (id, area) in &result.areas {
                let b = area.cell;
                println!(
                    "{}\tx={:.1} y={:.1} w={:.1} h={:.1}",
                    id, b.x, b.y, b.width, b.height
                );
            }
        }
    }
}

fn load_document(path: &Path) -> (LayoutDocument, AlgebraData) {
    let loaded = LayoutDocument::from_file(path).and_then(|doc| {
        let data = doc.to_algebra_data()?;
        Ok((doc, data))
    });
    match loaded {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Error loading layout '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn exit_with_parse_errors(errors: &[ParseError], source: &str) -> ! {
    for error in errors {
        eprint!("{}", error.format(source, "<expr>"));
    }
    process::exit(1);
}
