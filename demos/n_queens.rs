//! N-queens with one variable per column, encoded purely as binary table
//! constraints: for every pair of columns, the satisfying tuples are the row
//! pairs that attack neither on a row nor on a diagonal.
//!
//! ```sh
//! cargo run --example n_queens -- --n 8
//! ```

use clap::Parser;

use ligo::{
    solver::{
        csp::Csp,
        engine::{SearchOutcome, SolverEngine},
        heuristics::{value::LeastConstrainingValue, variable::MrvDegreeHeuristic},
        propagators::GacPropagator,
        stats::render_stats_table,
        value::StandardValue,
    },
};

#[derive(Debug, Parser)]
#[command(about = "Solve n-queens with the ligo CSP engine")]
struct Args {
    /// Board size.
    #[arg(long, default_value_t = 8)]
    n: i64,
}

fn build_model(n: i64) -> Csp<StandardValue> {
    let mut csp = Csp::new("n-queens");
    let rows: Vec<_> = (0..n).map(StandardValue::Int).collect();
    for column in 0..n {
        csp.add_variable(format!("q{column}"), rows.clone()).unwrap();
    }
    for i in 0..n {
        for j in (i + 1)..n {
            let mut tuples = Vec::new();
            for a in 0..n {
                for b in 0..n {
                    if a != b && (a - b).abs() != j - i {
                        tuples.push(vec![StandardValue::Int(a), StandardValue::Int(b)]);
                    }
                }
            }
            csp.add_constraint(
                format!("q{i} vs q{j}"),
                vec![i as usize, j as usize],
                tuples,
            )
            .unwrap();
        }
    }
    csp
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut csp = build_model(args.n);
    let engine = SolverEngine::new(
        Box::new(GacPropagator),
        Box::new(MrvDegreeHeuristic),
        Box::new(LeastConstrainingValue),
    );
    let (outcome, stats) = engine.solve(&mut csp).expect("solver contract violation");

    match outcome {
        SearchOutcome::Solved(assignment) => {
            for row in 0..args.n {
                let line: String = (0..args.n)
                    .map(|column| {
                        if assignment[&(column as usize)] == StandardValue::Int(row) {
                            " Q"
                        } else {
                            " ."
                        }
                    })
                    .collect();
                println!("{line}");
            }
        }
        SearchOutcome::Exhausted => println!("No solution for n = {}.", args.n),
        SearchOutcome::Aborted => println!("Search aborted."),
    }

    println!("{}", render_stats_table(&stats));
}
