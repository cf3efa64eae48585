use clap::Parser;
use tabula::solver::{
    constraint::TableConstraint,
    csp::Csp,
    engine::{BacktrackingSearch, VariableId},
    heuristics::{
        value::LeastConstrainingValueHeuristic, variable::MinimumRemainingValuesHeuristic,
    },
    propagators::{ForwardChecking, GeneralisedArcConsistency, PlainBacktracking, Propagator},
    stats::render_stats_table,
    value::StandardValue,
};

/// Solve the N-Queens problem as a table CSP.
#[derive(Parser, Debug)]
struct Args {
    /// Board size.
    #[arg(default_value_t = 8)]
    n: i64,

    /// Propagator to use: plain, fc, or gac.
    #[arg(long, default_value = "gac")]
    propagator: String,

    /// Print search statistics as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

/// One variable per row, holding the queen's column; rows attack each other
/// when they share a column or a diagonal.
fn build_queens(n: i64) -> (Csp<StandardValue>, Vec<VariableId>) {
    let mut csp = Csp::new(format!("{n}-queens"));
    let columns: Vec<i64> = (0..n).collect();
    let rows: Vec<VariableId> = (0..n)
        .map(|r| {
            csp.add_variable(
                format!("row{r}"),
                columns.iter().map(|&c| StandardValue::Int(c)).collect(),
            )
            .expect("fresh variable")
        })
        .collect();

    for i in 0..rows.len() {
        for j in (i + 1)..rows.len() {
            let distance = (j - i) as i64;
            let mut no_attack =
                TableConstraint::new(format!("row{i}-vs-row{j}"), vec![rows[i], rows[j]]);
            let tuples = columns.iter().flat_map(|&a| {
                columns
                    .iter()
                    .filter(move |&&b| a != b && (a - b).abs() != distance)
                    .map(move |&b| vec![StandardValue::Int(a), StandardValue::Int(b)])
            });
            no_attack.add_satisfying_tuples(tuples).expect("arity 2");
            csp.add_constraint(no_attack).expect("known variables");
        }
    }
    (csp, rows)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let (mut csp, rows) = build_queens(args.n);

    let propagator: Box<dyn Propagator<StandardValue>> = match args.propagator.as_str() {
        "plain" => Box::new(PlainBacktracking),
        "fc" => Box::new(ForwardChecking),
        "gac" => Box::new(GeneralisedArcConsistency),
        other => {
            eprintln!("unknown propagator `{other}` (expected plain, fc, or gac)");
            std::process::exit(1);
        }
    };
    let solver = BacktrackingSearch::new(
        propagator,
        Box::new(MinimumRemainingValuesHeuristic),
        Box::new(LeastConstrainingValueHeuristic),
    );

    let (solution, stats) = solver.solve(&mut csp).expect("well-formed model");
    match solution {
        Some(solution) => {
            for &row in &rows {
                let StandardValue::Int(column) = solution.value(row).expect("complete") else {
                    unreachable!("queen columns are integers");
                };
                for c in 0..args.n {
                    print!("{}", if c == *column { " Q" } else { " ." });
                }
                println!();
            }
        }
        None => println!("no solution for n = {}", args.n),
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).expect("stats serialize")
        );
    } else {
        println!("{}", render_stats_table(&stats));
    }
}
