use prettytable::{Cell, Row, Table};

use crate::solver::engine::SearchStats;

/// Renders search statistics as a printable table.
pub fn render_stats_table(stats: &SearchStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

    let rows: [(&str, u64); 5] = [
        ("Nodes Visited", stats.nodes_visited),
        ("Backtracks", stats.backtracks),
        ("Propagator Calls", stats.propagator_calls),
        ("Dead Ends", stats.dead_ends),
        ("Values Pruned", stats.values_pruned),
    ];
    for (metric, value) in rows {
        table.add_row(Row::new(vec![
            Cell::new(metric),
            Cell::new(&value.to_string()),
        ]));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::render_stats_table;
    use crate::solver::engine::SearchStats;

    #[test]
    fn every_counter_is_rendered() {
        let stats = SearchStats {
            nodes_visited: 12,
            backtracks: 3,
            propagator_calls: 16,
            dead_ends: 3,
            values_pruned: 7,
        };
        let rendered = render_stats_table(&stats);
        for expected in ["Nodes Visited", "12", "Backtracks", "16", "7"] {
            assert!(rendered.contains(expected), "missing {expected}: {rendered}");
        }
    }
}
