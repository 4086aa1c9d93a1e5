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

//! This module provides a dense two-phase simplex which solves the linear
//! relaxation of a node.
//!
//! All variables are free: each of them is split into a positive and a
//! negative part (x = x+ - x-), and the bounds posted while branching are
//! plain constraints. Every constraint is first normalised so that its right
//! hand side is non negative, then it receives a slack (<=), a surplus and an
//! artificial (>=) or an artificial alone (==). Phase one minimises the sum of
//! the artificials, phase two maximises the objective carrier. Entering and
//! leaving columns are chosen with Bland's rule which rules out cycling.

// Indexed loops are clearer for tableau operations
#![allow(clippy::needless_range_loop)]

use thiserror::Error;

use crate::{Constraint, Relation, RelaxationOracle, Relaxed, Variable};

/// The reasons why the simplex could not produce an optimum.
#[derive(Debug, Clone, PartialEq, Error)]
enum Failure {
    #[error("the relaxation is infeasible")]
    Infeasible,
    #[error("the relaxation is unbounded")]
    Unbounded,
    #[error("iteration limit ({0}) reached")]
    IterationLimit(usize),
    #[error("unknown variable {variable} (only {nb_variables} variables)")]
    UnknownVariable { variable: Variable, nb_variables: usize },
    #[error("non finite coefficient in constraint {0}")]
    NonFinite(usize),
}

/// A relaxation oracle which solves linear relaxations with a dense tableau
/// simplex.
///
/// # Example
/// ```
/// # use bbint::*;
/// let mut model = Model::default();
/// let x = model.add_variable("x");
/// let y = model.add_variable("y");
/// model.add_constraint(Constraint::greater_eq(vec![(x, 1.0)], 0.0))
///      .add_constraint(Constraint::greater_eq(vec![(y, 1.0)], 0.0))
///      .add_constraint(Constraint::less_eq(vec![(x, 1.0), (y, 2.0)], 4.0))
///      .add_constraint(Constraint::less_eq(vec![(x, 3.0), (y, 1.0)], 6.0));
/// let problem = model.maximize(vec![(x, 1.0), (y, 1.0)]).unwrap();
///
/// let oracle = SimplexOracle::default();
/// let relaxed = oracle.solve(problem.nb_variables(), problem.constraints(), problem.objective());
/// assert!((relaxed.objective_value().unwrap() - 2.8).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexOracle {
    /// Entries whose magnitude does not exceed this tolerance are treated as zero
    tolerance: f64,
    /// The maximum number of pivots (both phases together)
    max_iterations: usize,
}
impl SimplexOracle {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self { tolerance, max_iterations }
    }
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn optimum(&self, nb_variables: usize, constraints: &[Constraint], objective: Variable) -> Result<Vec<f64>, Failure> {
        if objective.id() >= nb_variables {
            return Err(Failure::UnknownVariable { variable: objective, nb_variables });
        }
        let mut tableau = Tableau::new(nb_variables, constraints, self.tolerance, self.max_iterations)?;
        tableau.phase_one()?;
        tableau.phase_two(objective)?;
        Ok(tableau.values())
    }
}
impl Default for SimplexOracle {
    fn default() -> Self {
        Self::new(1e-9, 10_000)
    }
}
impl RelaxationOracle for SimplexOracle {
    fn solve(&self, nb_variables: usize, constraints: &[Constraint], objective: Variable) -> Relaxed {
        match self.optimum(nb_variables, constraints, objective) {
            Ok(values) => {
                let value = values[objective.id()];
                Relaxed::Optimal { value, values }
            },
            Err(Failure::Infeasible) => Relaxed::Infeasible,
            Err(failure) => Relaxed::SolverError(failure.to_string()),
        }
    }
}

/// The simplex tableau `[A | b]` along with its current basis.
///
/// Columns are laid out as follows: the positive and negative parts of each
/// variable (2 * nb_variables columns), then one slack or surplus per
/// inequality, then one artificial per `>=` or `==` row and finally the right
/// hand side.
struct Tableau {
    rows: Vec<Vec<f64>>,
    basis: Vec<usize>,
    nb_variables: usize,
    /// Index of the first artificial column
    first_artificial: usize,
    /// Index of the rhs column (also the number of actual columns)
    rhs: usize,
    tolerance: f64,
    iterations: usize,
    max_iterations: usize,
}

impl Tableau {
    fn new(nb_variables: usize, constraints: &[Constraint], tolerance: f64, max_iterations: usize) -> Result<Self, Failure> {
        let mut normalised = Vec::with_capacity(constraints.len());
        for (i, c) in constraints.iter().enumerate() {
            let mut coefs = vec![0.0; nb_variables];
            for (variable, coef) in c.terms.iter() {
                if variable.id() >= nb_variables {
                    return Err(Failure::UnknownVariable { variable: *variable, nb_variables });
                }
                coefs[variable.id()] += coef;
            }
            if !c.rhs.is_finite() || coefs.iter().any(|a| !a.is_finite()) {
                return Err(Failure::NonFinite(i));
            }
            if c.rhs < 0.0 {
                coefs.iter_mut().for_each(|a| *a = -*a);
                normalised.push((coefs, reversed(c.relation), -c.rhs));
            } else {
                normalised.push((coefs, c.relation, c.rhs));
            }
        }

        let nb_slack      = normalised.iter().filter(|(_, rel, _)| *rel != Relation::Equal).count();
        let nb_artificial = normalised.iter().filter(|(_, rel, _)| *rel != Relation::LessEq).count();
        let first_slack      = 2 * nb_variables;
        let first_artificial = first_slack + nb_slack;
        let rhs              = first_artificial + nb_artificial;

        let mut rows  = vec![vec![0.0; rhs + 1]; normalised.len()];
        let mut basis = vec![0; normalised.len()];
        let mut slack = first_slack;
        let mut artif = first_artificial;
        for (i, (coefs, relation, b)) in normalised.into_iter().enumerate() {
            let row = &mut rows[i];
            for (j, a) in coefs.into_iter().enumerate() {
                row[2 * j]     =  a;
                row[2 * j + 1] = -a;
            }
            row[rhs] = b;
            match relation {
                Relation::LessEq => {
                    row[slack] = 1.0;
                    basis[i]   = slack;
                    slack += 1;
                },
                Relation::GreaterEq => {
                    row[slack] = -1.0;
                    row[artif] =  1.0;
                    basis[i]   = artif;
                    slack += 1;
                    artif += 1;
                },
                Relation::Equal => {
                    row[artif] = 1.0;
                    basis[i]   = artif;
                    artif += 1;
                }
            }
        }

        Ok(Self { rows, basis, nb_variables, first_artificial, rhs, tolerance, iterations: 0, max_iterations })
    }

    /// Finds a feasible basis (or proves there is none) and removes the
    /// artificials from the basis whenever possible.
    fn phase_one(&mut self) -> Result<(), Failure> {
        if self.first_artificial == self.rhs {
            return Ok(());
        }
        let cost = (0..self.rhs)
            .map(|j| if j >= self.first_artificial { -1.0 } else { 0.0 })
            .collect::<Vec<_>>();

        let value = match self.optimize(&cost, self.rhs) {
            Ok(value) => value,
            // the phase one objective is bounded by zero
            Err(Failure::Unbounded) => return Err(Failure::Infeasible),
            Err(e) => return Err(e),
        };
        let scale = 1.0 + self.rows.iter().map(|r| r[self.rhs]).fold(0.0, f64::max);
        if value < -self.tolerance * scale {
            return Err(Failure::Infeasible);
        }

        // drive the remaining (zero valued) artificials out of the basis. When
        // a row has no candidate it is redundant and the artificial stays.
        for i in 0..self.rows.len() {
            if self.basis[i] >= self.first_artificial {
                let col = (0..self.first_artificial).find(|&j| self.rows[i][j].abs() > self.tolerance);
                if let Some(col) = col {
                    self.pivot(i, col);
                }
            }
        }
        Ok(())
    }

    /// Maximises the objective carrier without ever letting an artificial
    /// re-enter the basis.
    fn phase_two(&mut self, objective: Variable) -> Result<f64, Failure> {
        let mut cost = vec![0.0; self.rhs];
        cost[2 * objective.id()]     =  1.0;
        cost[2 * objective.id() + 1] = -1.0;
        self.optimize(&cost, self.first_artificial)
    }

    /// Maximises `cost . x` over the current tableau. Only the columns whose
    /// index is smaller than `nb_allowed` may enter the basis.
    fn optimize(&mut self, cost: &[f64], nb_allowed: usize) -> Result<f64, Failure> {
        let rhs = self.rhs;
        // reduced costs (z_j - c_j); the last entry is the objective value
        let mut reduced = (0..=rhs)
            .map(|j| {
                let cj = if j < rhs { cost[j] } else { 0.0 };
                let zj = self.basis.iter().enumerate()
                    .map(|(i, &b)| cost[b] * self.rows[i][j])
                    .sum::<f64>();
                zj - cj
            })
            .collect::<Vec<_>>();

        loop {
            // Bland: smallest improving column
            let Some(col) = (0..nb_allowed).find(|&j| reduced[j] < -self.tolerance) else {
                return Ok(reduced[rhs]);
            };
            // Bland: minimum ratio, ties broken by the smallest basic column
            let mut leaving: Option<(usize, f64)> = None;
            for i in 0..self.rows.len() {
                let a = self.rows[i][col];
                if a <= self.tolerance {
                    continue;
                }
                let ratio = self.rows[i][rhs] / a;
                leaving = match leaving {
                    None => Some((i, ratio)),
                    Some((_, best)) if ratio < best - self.tolerance => Some((i, ratio)),
                    Some((k, best)) if ratio <= best + self.tolerance && self.basis[i] < self.basis[k] => Some((i, ratio)),
                    keep => keep,
                };
            }
            let Some((row, _)) = leaving else {
                return Err(Failure::Unbounded);
            };
            if self.iterations >= self.max_iterations {
                return Err(Failure::IterationLimit(self.max_iterations));
            }

            self.pivot(row, col);
            let factor = reduced[col];
            for (z, p) in reduced.iter_mut().zip(self.rows[row].iter()) {
                *z -= factor * p;
            }
        }
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let p = self.rows[row][col];
        self.rows[row].iter_mut().for_each(|x| *x /= p);
        let pivot_row = self.rows[row].clone();
        for (i, r) in self.rows.iter_mut().enumerate() {
            let factor = r[col];
            if i == row || factor == 0.0 {
                continue;
            }
            for (x, p) in r.iter_mut().zip(pivot_row.iter()) {
                *x -= factor * p;
            }
        }
        self.basis[row] = col;
        self.iterations += 1;
    }

    /// The value of each original variable in the current basic solution
    fn values(&self) -> Vec<f64> {
        let mut columns = vec![0.0; self.rhs];
        for (i, &b) in self.basis.iter().enumerate() {
            columns[b] = self.rows[i][self.rhs];
        }
        (0..self.nb_variables)
            .map(|j| columns[2 * j] - columns[2 * j + 1])
            .collect()
    }
}

fn reversed(relation: Relation) -> Relation {
    match relation {
        Relation::LessEq    => Relation::GreaterEq,
        Relation::GreaterEq => Relation::LessEq,
        Relation::Equal     => Relation::Equal,
    }
}

#[cfg(test)]
mod test_simplex {
    use crate::*;

    fn solve(problem: &Problem) -> Relaxed {
        SimplexOracle::default().solve(problem.nb_variables(), problem.constraints(), problem.objective())
    }
    fn assert_close(expected: f64, actual: f64) {
        assert!((expected - actual).abs() < 1e-7, "expected {expected}, got {actual}");
    }

    #[test]
    fn it_finds_the_optimum_of_a_textbook_lp() {
        let mut model = Model::default();
        let x = model.add_variable("x");
        let y = model.add_variable("y");
        model.add_constraint(Constraint::greater_eq(vec![(x, 1.0)], 0.0))
             .add_constraint(Constraint::greater_eq(vec![(y, 1.0)], 0.0))
             .add_constraint(Constraint::less_eq(vec![(x, 1.0), (y, 2.0)], 4.0))
             .add_constraint(Constraint::less_eq(vec![(x, 3.0), (y, 1.0)], 6.0));
        let pb = model.maximize(vec![(x, 1.0), (y, 1.0)]).unwrap();

        let relaxed = solve(&pb);
        let values  = relaxed.values().unwrap();
        assert_close(2.8, relaxed.objective_value().unwrap());
        assert_close(1.6, values[0]);
        assert_close(1.2, values[1]);
        assert_close(2.8, values[2]);
    }

    #[test]
    fn it_detects_infeasibility() {
        let mut model = Model::default();
        let x = model.add_variable("x");
        model.add_constraint(Constraint::greater_eq(vec![(x, 1.0)], 5.0))
             .add_constraint(Constraint::less_eq(vec![(x, 1.0)], 1.0));
        let pb = model.maximize(vec![(x, 1.0)]).unwrap();
        assert_eq!(Relaxed::Infeasible, solve(&pb));
    }

    #[test]
    fn an_unbounded_relaxation_is_a_solver_error() {
        let mut model = Model::default();
        let x = model.add_variable("x");
        model.add_constraint(Constraint::greater_eq(vec![(x, 1.0)], 0.0));
        let pb = model.maximize(vec![(x, 1.0)]).unwrap();
        assert!(matches!(solve(&pb), Relaxed::SolverError(_)));
    }

    #[test]
    fn it_handles_equalities() {
        let mut model = Model::default();
        let x = model.add_variable("x");
        let y = model.add_variable("y");
        model.add_constraint(Constraint::greater_eq(vec![(x, 1.0)], 0.0))
             .add_constraint(Constraint::greater_eq(vec![(y, 1.0)], 0.0))
             .add_constraint(Constraint::equal(vec![(x, 1.0), (y, 1.0)], 3.0));
        let pb = model.maximize(vec![(x, 2.0), (y, 1.0)]).unwrap();

        let relaxed = solve(&pb);
        let values  = relaxed.values().unwrap();
        assert_close(6.0, relaxed.objective_value().unwrap());
        assert_close(3.0, values[0]);
        assert_close(0.0, values[1]);
    }

    #[test]
    fn variables_may_take_negative_values() {
        let mut model = Model::default();
        let x = model.add_variable("x");
        model.add_constraint(Constraint::greater_eq(vec![(x, 1.0)], -4.5))
             .add_constraint(Constraint::less_eq(vec![(x, 1.0)], -1.5));
        let pb = model.maximize(vec![(x, -1.0)]).unwrap();

        let relaxed = solve(&pb);
        assert_close(4.5, relaxed.objective_value().unwrap());
        assert_close(-4.5, relaxed.values().unwrap()[0]);
    }

    #[test]
    fn repeated_terms_are_summed() {
        let mut model = Model::default();
        let x = model.add_variable("x");
        model.add_constraint(Constraint::greater_eq(vec![(x, 1.0)], 0.0))
             .add_constraint(Constraint::less_eq(vec![(x, 1.0), (x, 1.0)], 5.0));
        let pb = model.maximize(vec![(x, 1.0)]).unwrap();
        assert_close(2.5, solve(&pb).objective_value().unwrap());
    }

    #[test]
    fn redundant_equalities_are_tolerated() {
        let mut model = Model::default();
        let x = model.add_variable("x");
        model.add_constraint(Constraint::equal(vec![(x, 1.0)], 2.0))
             .add_constraint(Constraint::equal(vec![(x, 2.0)], 4.0));
        let pb = model.maximize(vec![(x, 1.0)]).unwrap();
        assert_close(2.0, solve(&pb).objective_value().unwrap());
    }

    #[test]
    fn an_unknown_variable_is_a_solver_error() {
        let cs = vec![Constraint::less_eq(vec![(Variable(5), 1.0)], 1.0)];
        let oracle = SimplexOracle::default();
        assert!(matches!(oracle.solve(2, &cs, Variable(1)), Relaxed::SolverError(_)));
        assert!(matches!(oracle.solve(2, &[], Variable(2)), Relaxed::SolverError(_)));
    }

    #[test]
    fn the_iteration_limit_is_a_solver_error() {
        let mut model = Model::default();
        let x = model.add_variable("x");
        model.add_constraint(Constraint::greater_eq(vec![(x, 1.0)], 0.0))
             .add_constraint(Constraint::less_eq(vec![(x, 1.0)], 3.0));
        let pb = model.maximize(vec![(x, 1.0)]).unwrap();

        let oracle = SimplexOracle::new(1e-9, 0);
        assert!(matches!(
            oracle.solve(pb.nb_variables(), pb.constraints(), pb.objective()), 
            Relaxed::SolverError(_)));
    }
}
