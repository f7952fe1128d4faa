use crate::matrix::check_square;
use crate::route::{RouteError, validate_names};

/// Significant digits kept by [`format_weight`]
const WEIGHT_DIGITS: usize = 6;

/// Weight text in `%g` style: six significant digits, trailing zeros
/// trimmed, scientific notation below `1e-4` or from `1e6` up.
///
/// `format_weight(0.1 + 0.2)` is `"0.3"`, `format_weight(1e20)` is `"1e+20"`.
pub fn format_weight(w: f64) -> String {
    if w == 0.0 || !w.is_finite() {
        return format!("{}", w);
    }
    // Round first, so 999999.7 is classified by its rounded exponent
    let sci = format!("{:.*e}", WEIGHT_DIGITS - 1, w);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= WEIGHT_DIGITS as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (WEIGHT_DIGITS as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, w)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Set-notation description of a graph: `V`, `A`, then the outgoing edges
/// of every vertex.
///
/// Directed graphs list every nonzero entry as an arc. Undirected graphs
/// list self-loops and the upper triangle only, so each edge appears once.
/// The matrix must be square with one unique, non-empty name per node.
pub fn describe(
    names: &[String],
    matrix: &[Vec<f64>],
    directed: bool,
) -> Result<String, RouteError> {
    let n = check_square(matrix)?;
    validate_names(names, n)?;

    let mut arcs = Vec::new();
    for (i, row) in matrix.iter().enumerate() {
        let start = if directed { 0 } else { i };
        for (j, &w) in row.iter().enumerate().skip(start) {
            if w != 0.0 {
                arcs.push(format!("({},{},{})", names[i], names[j], format_weight(w)));
            }
        }
    }

    let mut lines = vec![
        format!("V = ({})", names.join(", ")),
        format!("A = ({})", arcs.join(", ")),
        String::new(),
        "Outgoing by vertex:".to_string(),
    ];

    for (i, row) in matrix.iter().enumerate() {
        let outgoing: Vec<String> = row
            .iter()
            .enumerate()
            .filter(|(_, w)| **w != 0.0)
            .map(|(j, &w)| format!("{}({})", names[j], format_weight(w)))
            .collect();
        let targets = if outgoing.is_empty() {
            "∅".to_string()
        } else {
            outgoing.join(", ")
        };
        lines.push(format!("  {} -> {}", names[i], targets));
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::route::default_names;

    fn named(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_directed_description() {
        let matrix = vec![
            vec![0.0, 2.0, 0.0],
            vec![3.5, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ];
        let text = describe(&default_names(3), &matrix, true).unwrap();

        let expected = "V = (v1, v2, v3)\n\
                        A = ((v1,v2,2), (v2,v1,3.5))\n\
                        \n\
                        Outgoing by vertex:\n\
                        \x20 v1 -> v2(2)\n\
                        \x20 v2 -> v1(3.5)\n\
                        \x20 v3 -> ∅";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_undirected_lists_each_edge_once() {
        let matrix = vec![vec![1.0, 4.0], vec![4.0, 0.0]];
        let text = describe(&default_names(2), &matrix, false).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "A = ((v1,v1,1), (v1,v2,4))");
        assert_eq!(lines[4], "  v1 -> v1(1), v2(4)");
        assert_eq!(lines[5], "  v2 -> v1(4)");
    }

    #[test]
    fn test_fewer_names_than_nodes_rejected() {
        let matrix = vec![
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![7.0, 0.0, 0.0],
        ];

        assert_eq!(
            describe(&named(&["A", "B"]), &matrix, true),
            Err(RouteError::NameCountMismatch { names: 2, nodes: 3 })
        );
        assert_eq!(
            describe(&named(&["A", "B", "A"]), &matrix, true),
            Err(RouteError::DuplicateName("A".to_string()))
        );
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let matrix = vec![vec![0.0, 1.0], vec![0.0]];

        assert_eq!(
            describe(&named(&["A", "B"]), &matrix, true),
            Err(RouteError::Graph(GraphError::NotSquare { row: 1, len: 1, expected: 2 }))
        );
    }

    #[test]
    fn test_weights_print_like_percent_g() {
        assert_eq!(format_weight(0.1 + 0.2), "0.3");
        assert_eq!(format_weight(1e20), "1e+20");
        assert_eq!(format_weight(2.5), "2.5");
        assert_eq!(format_weight(-4.0), "-4");
        assert_eq!(format_weight(123456.0), "123456");
        assert_eq!(format_weight(1234567.0), "1.23457e+06");
        assert_eq!(format_weight(999999.7), "1e+06");
        assert_eq!(format_weight(0.0001), "0.0001");
        assert_eq!(format_weight(0.00001), "1e-05");

        let matrix = vec![vec![0.0, 0.1 + 0.2], vec![1e20, 0.0]];
        let text = describe(&default_names(2), &matrix, true).unwrap();
        assert_eq!(text.lines().nth(1), Some("A = ((v1,v2,0.3), (v2,v1,1e+20))"));
    }
}
