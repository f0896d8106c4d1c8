use prettytable::{Cell, Row, Table};

use crate::solver::engine::SearchStats;

/// Renders the counters from one solve as a printable table.
pub fn render_stats_table(stats: &SearchStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

    let rows: [(&str, String); 6] = [
        ("Nodes visited", stats.nodes_visited.to_string()),
        ("Backtracks", stats.backtracks.to_string()),
        ("Propagation calls", stats.propagations.to_string()),
        ("Prunings", stats.prunings.to_string()),
        ("Domain wipe-outs", stats.wipeouts.to_string()),
        (
            "Solve time (ms)",
            format!("{:.2}", stats.solve_time_micros as f64 / 1000.0),
        ),
    ];
    for (metric, value) in rows {
        table.add_row(Row::new(vec![Cell::new(metric), Cell::new(&value)]));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_counter() {
        let stats = SearchStats {
            nodes_visited: 10,
            backtracks: 3,
            propagations: 11,
            prunings: 7,
            wipeouts: 2,
            solve_time_micros: 1500,
        };
        let rendered = render_stats_table(&stats);
        assert!(rendered.contains("Nodes visited"));
        assert!(rendered.contains("10"));
        assert!(rendered.contains("1.50"));
    }
}
