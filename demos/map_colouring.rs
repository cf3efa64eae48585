use tabula::solver::{
    constraint::TableConstraint,
    csp::Csp,
    engine::BacktrackingSearch,
    heuristics::{value::IdentityValueHeuristic, variable::DegreeHeuristic},
    propagators::ForwardChecking,
    stats::render_stats_table,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Colour {
    Red,
    Green,
    Blue,
}

static COLOURS: [Colour; 3] = [Colour::Red, Colour::Green, Colour::Blue];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Mainland Australia.
    let regions = ["WA", "NT", "SA", "Q", "NSW", "V"];
    let adjacent = [
        ("WA", "NT"),
        ("WA", "SA"),
        ("NT", "SA"),
        ("NT", "Q"),
        ("SA", "Q"),
        ("SA", "NSW"),
        ("SA", "V"),
        ("Q", "NSW"),
        ("NSW", "V"),
    ];

    let mut csp = Csp::new("australia");
    let mut ids = std::collections::HashMap::new();
    for region in regions {
        let id = csp
            .add_variable(region, COLOURS.to_vec())
            .expect("fresh variable");
        ids.insert(region, id);
    }
    for (a, b) in adjacent {
        let mut border = TableConstraint::new(format!("{a}|{b}"), vec![ids[a], ids[b]]);
        let tuples = COLOURS.iter().flat_map(|&x| {
            COLOURS
                .iter()
                .filter(move |&&y| y != x)
                .map(move |&y| vec![x, y])
        });
        border.add_satisfying_tuples(tuples).expect("arity 2");
        csp.add_constraint(border).expect("known variables");
    }

    let solver = BacktrackingSearch::new(
        Box::new(ForwardChecking),
        Box::new(DegreeHeuristic),
        Box::new(IdentityValueHeuristic),
    );
    let (solution, stats) = solver.solve(&mut csp).expect("well-formed model");

    match solution {
        Some(solution) => {
            for region in regions {
                println!("{region:4} {:?}", solution.value_of(region).expect("complete"));
            }
        }
        None => println!("no colouring exists"),
    }
    println!("{}", render_stats_table(&stats));
}
