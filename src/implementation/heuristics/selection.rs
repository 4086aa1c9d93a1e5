// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides the implementation of the variable selection
//! strategies which decide what fractional variable gets branched upon.

use crate::{Node, Variable, VariableSelection};

/// _This is the default selection strategy._ It branches on the first
/// decision variable (in declaration order) whose relaxed value is fractional.
#[derive(Debug, Default, Copy, Clone)]
pub struct FirstFractional;
impl VariableSelection for FirstFractional {
    fn select_variable(&self, node: &Node, epsilon: f64) -> Variable {
        node.select_branch_variable(epsilon)
    }
}

/// This strategy branches on the decision variable whose relaxed value is the
/// farthest away from its nearest integer (the one closest to x.5). Ties are
/// broken in favor of the variable that was declared first.
///
/// # Example
/// ```
/// # use bbint::*;
/// let pb = Problem::new(
///     vec!["x".to_string(), "y".to_string(), "z".to_string()], 
///     vec![], 
///     Variable(2)).unwrap();
/// let mut node = Node::root(&pb);
/// node.solve_relaxation(&|_: usize, _: &[Constraint], _: Variable|
///     Relaxed::Optimal { value: 4.0, values: vec![1.1, 2.45, 4.0] });
///
/// assert_eq!(Variable(0), FirstFractional.select_variable(&node, 1e-4));
/// assert_eq!(Variable(1), MostFractional.select_variable(&node, 1e-4));
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct MostFractional;
impl VariableSelection for MostFractional {
    fn select_variable(&self, node: &Node, epsilon: f64) -> Variable {
        let mut best: Option<(Variable, f64)> = None;
        for (var, x) in node.fractional_variables(epsilon) {
            let distance = (x - x.round()).abs();
            match best {
                Some((_, d)) if d >= distance => {},
                _ => best = Some((var, distance)),
            }
        }
        best.map(|(v, _)| v)
            .unwrap_or_else(|| node.select_branch_variable(epsilon))
    }
}

#[cfg(test)]
mod test_selection {
    use crate::*;

    fn node(values: Vec<f64>) -> Node {
        let names = (0..values.len()).map(|i| format!("v{i}")).collect();
        let objective = Variable(values.len() - 1);
        let pb = Problem::new(names, vec![], objective).unwrap();
        let mut node = Node::root(&pb);
        let value = values[values.len() - 1];
        node.solve_relaxation(&move |_: usize, _: &[Constraint], _: Variable| 
            Relaxed::Optimal { value, values: values.clone() });
        node
    }

    #[test]
    fn first_fractional_picks_the_first_fractional_variable() {
        let n = node(vec![1.0, 2.9, 3.5, 10.25]);
        assert_eq!(Variable(1), FirstFractional.select_variable(&n, 1e-4));
    }
    #[test]
    fn first_fractional_ignores_the_objective_carrier() {
        let n = node(vec![1.0, 2.0, 3.5, 10.25]);
        assert_eq!(Variable(2), FirstFractional.select_variable(&n, 1e-4));
    }
    #[test]
    fn most_fractional_picks_the_value_closest_to_one_half() {
        let n = node(vec![1.0, 2.9, 3.45, 10.25]);
        assert_eq!(Variable(2), MostFractional.select_variable(&n, 1e-4));
    }
    #[test]
    fn most_fractional_breaks_ties_in_declaration_order() {
        let n = node(vec![1.25, 2.75, 3.0, 10.5]);
        assert_eq!(Variable(0), MostFractional.select_variable(&n, 1e-4));
    }
    #[test]
    fn most_fractional_handles_negative_values() {
        let n = node(vec![-1.1, -2.5, 3.0, 10.5]);
        assert_eq!(Variable(1), MostFractional.select_variable(&n, 1e-4));
    }
    #[test]
    fn when_nothing_is_fractional_both_fall_back_to_the_first_variable() {
        let n = node(vec![1.0, 2.0, 3.0, 10.5]);
        assert_eq!(Variable(0), FirstFractional.select_variable(&n, 1e-4));
        assert_eq!(Variable(0), MostFractional.select_variable(&n, 1e-4));
    }
}
