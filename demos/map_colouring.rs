//! Colour a map (or any graph) with `k` colours, from a JSON graph file or
//! the built-in Australia map.
//!
//! ```sh
//! cargo run --example map_colouring -- --colours 3 --propagator gac
//! cargo run --example map_colouring -- --graph graph.json --colours 4
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

use ligo::{
    problems::k_colouring::k_colouring,
    solver::{
        engine::{SearchOutcome, SolverEngine},
        heuristics::{
            value::{IdentityValueHeuristic, LeastConstrainingValue, ValueOrderingHeuristic},
            variable::{
                DegreeHeuristic, MinimumRemainingValuesHeuristic, MrvDegreeHeuristic,
                RandomVariableHeuristic, SelectFirstHeuristic, VariableSelectionHeuristic,
            },
        },
        propagator::Propagator,
        propagators::{BacktrackPropagator, ForwardChecking, GacPropagator},
        stats::render_stats_table,
        value::StandardValue,
    },
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PropagatorKind {
    Bt,
    Fc,
    Gac,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariableHeuristicKind {
    First,
    Random,
    Mrv,
    Degree,
    MrvDegree,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ValueHeuristicKind {
    Identity,
    Lcv,
}

#[derive(Debug, Parser)]
#[command(about = "Solve graph k-colouring with the ligo CSP engine")]
struct Args {
    /// JSON graph file with `vertices` and `edges`; defaults to the
    /// Australia map.
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Number of colours.
    #[arg(long, default_value_t = 3)]
    colours: i64,

    #[arg(long, value_enum, default_value_t = PropagatorKind::Gac)]
    propagator: PropagatorKind,

    #[arg(long, value_enum, default_value_t = VariableHeuristicKind::MrvDegree)]
    variable_heuristic: VariableHeuristicKind,

    #[arg(long, value_enum, default_value_t = ValueHeuristicKind::Lcv)]
    value_heuristic: ValueHeuristicKind,
}

#[derive(Debug, Deserialize)]
struct GraphFile {
    vertices: Vec<String>,
    edges: Vec<(String, String)>,
}

fn australia() -> GraphFile {
    let vertices = [
        "Western Australia",
        "Northern Territory",
        "South Australia",
        "Queensland",
        "New South Wales",
        "Victoria",
        "Tasmania",
    ];
    let edges = [
        ("Western Australia", "Northern Territory"),
        ("Western Australia", "South Australia"),
        ("Northern Territory", "South Australia"),
        ("Northern Territory", "Queensland"),
        ("South Australia", "Queensland"),
        ("South Australia", "New South Wales"),
        ("South Australia", "Victoria"),
        ("Victoria", "New South Wales"),
    ];
    GraphFile {
        vertices: vertices.iter().map(|s| s.to_string()).collect(),
        edges: edges
            .iter()
            .map(|(u, v)| (u.to_string(), v.to_string()))
            .collect(),
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let graph = match &args.graph {
        Some(path) => {
            let text = std::fs::read_to_string(path).expect("failed to read graph file");
            serde_json::from_str(&text).expect("failed to parse graph file")
        }
        None => australia(),
    };

    let mut csp = k_colouring("map colouring", &graph.vertices, &graph.edges, args.colours)
        .expect("invalid graph");

    let propagator: Box<dyn Propagator<StandardValue>> = match args.propagator {
        PropagatorKind::Bt => Box::new(BacktrackPropagator),
        PropagatorKind::Fc => Box::new(ForwardChecking),
        PropagatorKind::Gac => Box::new(GacPropagator),
    };
    let variable_heuristic: Box<dyn VariableSelectionHeuristic<StandardValue>> =
        match args.variable_heuristic {
            VariableHeuristicKind::First => Box::new(SelectFirstHeuristic),
            VariableHeuristicKind::Random => Box::new(RandomVariableHeuristic::new()),
            VariableHeuristicKind::Mrv => Box::new(MinimumRemainingValuesHeuristic),
            VariableHeuristicKind::Degree => Box::new(DegreeHeuristic),
            VariableHeuristicKind::MrvDegree => Box::new(MrvDegreeHeuristic),
        };
    let value_heuristic: Box<dyn ValueOrderingHeuristic<StandardValue>> =
        match args.value_heuristic {
            ValueHeuristicKind::Identity => Box::new(IdentityValueHeuristic),
            ValueHeuristicKind::Lcv => Box::new(LeastConstrainingValue),
        };

    let engine = SolverEngine::new(propagator, variable_heuristic, value_heuristic);
    let (outcome, stats) = engine.solve(&mut csp).expect("solver contract violation");

    match outcome {
        SearchOutcome::Solved(assignment) => {
            println!("Colouring with {} colours:", args.colours);
            let mut rows: Vec<_> = assignment
                .iter()
                .map(|(vid, colour)| (csp.variable(*vid).name().to_string(), colour.display()))
                .collect();
            rows.sort();
            for (vertex, colour) in rows {
                println!("  {vertex}: colour {colour}");
            }
        }
        SearchOutcome::Exhausted => {
            println!("No colouring exists with {} colours.", args.colours)
        }
        SearchOutcome::Aborted => println!("Search aborted."),
    }

    println!("{}", render_stats_table(&stats));
}
