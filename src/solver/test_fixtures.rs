//! Shared problem builders for the in-crate tests.

use crate::solver::{
    constraint::TableConstraint,
    csp::Csp,
    engine::VariableId,
    value::StandardValue::{self, Int},
};

/// All ordered pairs over `domain` with distinct entries.
pub(crate) fn distinct_pairs(domain: &[i64]) -> impl Iterator<Item = Vec<StandardValue>> + '_ {
    domain.iter().flat_map(move |&a| {
        domain
            .iter()
            .filter(move |&&b| b != a)
            .map(move |&b| vec![Int(a), Int(b)])
    })
}

/// A binary not-equal constraint, tabulated over `domain`.
pub(crate) fn not_equal_pair(
    name: impl Into<String>,
    a: VariableId,
    b: VariableId,
    domain: &[i64],
) -> TableConstraint<StandardValue> {
    let mut constraint = TableConstraint::new(name, vec![a, b]);
    constraint.add_satisfying_tuples(distinct_pairs(domain)).unwrap();
    constraint
}

/// A 2×2 grid over {1, 2} with row/column not-equal constraints; cell ids are
/// returned row-major. The top-left corner's domain can be restricted and a
/// main-diagonal not-equal constraint added to over-constrain the grid.
pub(crate) fn latin_grid_2x2(
    corner_domain: &[i64],
    diagonal_not_equal: bool,
) -> (Csp<StandardValue>, [[VariableId; 2]; 2]) {
    let full = [1i64, 2];
    let mut csp = Csp::new("grid2");
    let mut cells = [[0 as VariableId; 2]; 2];
    for (r, row) in cells.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            let domain = if (r, c) == (0, 0) { corner_domain } else { &full[..] };
            *cell = csp
                .add_variable(
                    format!("cell{r}{c}"),
                    domain.iter().copied().map(Int).collect(),
                )
                .unwrap();
        }
    }
    for (r, row) in cells.iter().enumerate() {
        csp.add_constraint(not_equal_pair(format!("row{r}"), row[0], row[1], &full))
            .unwrap();
    }
    for c in 0..2 {
        csp.add_constraint(not_equal_pair(
            format!("col{c}"),
            cells[0][c],
            cells[1][c],
            &full,
        ))
        .unwrap();
    }
    if diagonal_not_equal {
        csp.add_constraint(not_equal_pair("diag", cells[0][0], cells[1][1], &full))
            .unwrap();
    }
    (csp, cells)
}
