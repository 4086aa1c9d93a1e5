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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types your client library is likely to work with.

use std::fmt;

use fxhash::FxHashMap;

// ----------------------------------------------------------------------------
// --- VARIABLE ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type denotes a variable from the optimization problem at hand.
/// In this case, each variable is assumed to be identified with an integer
/// ranging from 0 until `problem.nb_variables()`. The names of the variables
/// are kept by the `Problem` which declared them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Variable(pub usize);
impl Variable {
    #[inline]
    /// This function retruns the id (numeric value) of the variable.
    ///
    /// # Examples:
    /// ```
    /// # use bbint::Variable;
    /// assert_eq!(0, Variable(0).id());
    /// assert_eq!(1, Variable(1).id());
    /// assert_eq!(2, Variable(2).id());
    /// ```
    pub fn id(self) -> usize {
        self.0
    }
}
impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

// ----------------------------------------------------------------------------
// --- RELATION ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The relation linking the left hand side of a constraint to its right hand
/// side.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Relation {
    /// `lhs <= rhs`
    LessEq,
    /// `lhs >= rhs`
    GreaterEq,
    /// `lhs == rhs`
    Equal,
}
impl Relation {
    /// Returns true iff `lhs <rel> rhs` holds up to the given tolerance.
    pub fn holds(self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            Relation::LessEq    => lhs <= rhs + tolerance,
            Relation::GreaterEq => lhs >= rhs - tolerance,
            Relation::Equal     => (lhs - rhs).abs() <= tolerance,
        }
    }
}
impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::LessEq    => write!(f, "<="),
            Relation::GreaterEq => write!(f, ">="),
            Relation::Equal     => write!(f, "=="),
        }
    }
}

// ----------------------------------------------------------------------------
// --- DIRECTION --------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The direction of the bound which is posted on a variable when branching.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// `variable <= bound` (this is how the floor child is built)
    Down,
    /// `variable >= bound` (this is how the ceiling child is built)
    Up,
}
impl Direction {
    /// The relation a bound posted in this direction stands for.
    pub fn relation(self) -> Relation {
        match self {
            Direction::Down => Relation::LessEq,
            Direction::Up   => Relation::GreaterEq,
        }
    }
}

// ----------------------------------------------------------------------------
// --- CONSTRAINT -------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A linear constraint `sum(coef * var) <relation> rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// The (variable, coefficient) pairs of the left hand side
    pub terms: Vec<(Variable, f64)>,
    /// The relation between both sides of the constraint
    pub relation: Relation,
    /// The constant right hand side
    pub rhs: f64,
}
impl Constraint {
    pub fn new(terms: Vec<(Variable, f64)>, relation: Relation, rhs: f64) -> Self {
        Self { terms, relation, rhs }
    }
    /// `sum(terms) <= rhs`
    pub fn less_eq(terms: Vec<(Variable, f64)>, rhs: f64) -> Self {
        Self::new(terms, Relation::LessEq, rhs)
    }
    /// `sum(terms) >= rhs`
    pub fn greater_eq(terms: Vec<(Variable, f64)>, rhs: f64) -> Self {
        Self::new(terms, Relation::GreaterEq, rhs)
    }
    /// `sum(terms) == rhs`
    pub fn equal(terms: Vec<(Variable, f64)>, rhs: f64) -> Self {
        Self::new(terms, Relation::Equal, rhs)
    }
    /// Creates the single variable bound `variable <= value` (when direction
    /// is `Down`) or `variable >= value` (when direction is `Up`).
    ///
    /// # Example
    /// ```
    /// # use bbint::*;
    /// let c = Constraint::bound(Variable(1), Direction::Up, 3.0);
    /// assert_eq!(Some((Variable(1), Direction::Up, 3.0)), c.as_bound());
    /// assert!(!c.is_satisfied(&[0.0, 2.0], 1e-9));
    /// assert!( c.is_satisfied(&[0.0, 3.0], 1e-9));
    /// ```
    pub fn bound(variable: Variable, direction: Direction, value: f64) -> Self {
        Self::new(vec![(variable, 1.0)], direction.relation(), value)
    }
    /// If this constraint is a single variable bound, returns that variable
    /// along with the direction and value of the bound.
    pub fn as_bound(&self) -> Option<(Variable, Direction, f64)> {
        match (self.terms.as_slice(), self.relation) {
            ([(var, coef)], Relation::LessEq)    if *coef == 1.0 => Some((*var, Direction::Down, self.rhs)),
            ([(var, coef)], Relation::GreaterEq) if *coef == 1.0 => Some((*var, Direction::Up,   self.rhs)),
            _ => None,
        }
    }
    /// Iterates over the variables mentioned in this constraint.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.terms.iter().map(|(v, _)| *v)
    }
    /// Evaluates the left hand side given an assignment of all variables.
    /// It returns None when the assignment lacks one of the mentioned
    /// variables.
    pub fn lhs(&self, values: &[f64]) -> Option<f64> {
        self.terms.iter()
            .map(|(v, coef)| values.get(v.id()).map(|x| coef * x))
            .sum()
    }
    /// Returns true iff the given assignment satisfies this constraint (up to
    /// the given tolerance). An incomplete assignment never satisfies it.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        self.lhs(values)
            .map(|lhs| self.relation.holds(lhs, self.rhs, tolerance))
            .unwrap_or(false)
    }
}
impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (var, coef)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}*{}", coef, var)?;
        }
        write!(f, " {} {}", self.relation, self.rhs)
    }
}

// ----------------------------------------------------------------------------
// --- RELAXATION -------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The outcome of an attempt to solve the continuous relaxation of a node.
/// This is exactly what a `RelaxationOracle` must answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Relaxed {
    /// The relaxation has been solved to optimality. `value` is the optimal
    /// value of the objective and `values` holds the value of each variable
    /// (indexed by variable id).
    Optimal { value: f64, values: Vec<f64> },
    /// No point satisfies the constraints of the relaxation
    Infeasible,
    /// The solver failed (numerical trouble, unboundedness, ...).
    SolverError(String),
}
impl Relaxed {
    /// Returns true iff the relaxation was solved to optimality
    pub fn is_optimal(&self) -> bool {
        matches!(self, Relaxed::Optimal { .. })
    }
    /// The optimal value of the relaxation (if any)
    pub fn objective_value(&self) -> Option<f64> {
        match self {
            Relaxed::Optimal { value, .. } => Some(*value),
            _ => None,
        }
    }
    /// The optimal assignment of the relaxation (if any)
    pub fn values(&self) -> Option<&[f64]> {
        match self {
            Relaxed::Optimal { values, .. } => Some(values.as_slice()),
            _ => None,
        }
    }
}

// ----------------------------------------------------------------------------
// --- Results ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A reason explaining why the search stopped before proving optimality
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Reason {
    /// It stopped because the configured cutoff criterion was met
    CutoffOccurred,
    /// It stopped because the configured maximum number of nodes was explored
    NodeLimitReached,
}

/// The outcome of a search
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// is the given solution exact (proved optimal for the given problem)?
    /// or has the search been aborted ?
    pub is_exact: bool,
    /// if present the value of the best solution that was found
    pub best_value: Option<f64>,
}

/// The counters maintained by a solver while it explores the search tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Number of nodes popped off the frontier
    pub explored: usize,
    /// Number of calls made to the relaxation oracle
    pub oracle_calls: usize,
    /// Number of nodes that have been split in two children
    pub branched: usize,
    /// Number of fractional nodes discarded because their bound could not
    /// beat the incumbent
    pub pruned_by_bound: usize,
    /// Number of relaxations reported infeasible
    pub infeasible: usize,
    /// Number of relaxations the oracle failed to solve
    pub solver_errors: usize,
    /// Number of fractional nodes discarded because their relaxation did not
    /// provide a value for some decision variable
    pub incomplete: usize,
    /// Number of times the incumbent was improved
    pub incumbent_updates: usize,
    /// Number of integral nodes that did not improve the incumbent
    pub rejected_integral: usize,
    /// Deepest node that has been explored
    pub max_depth: usize,
}

/// The result of a search as it is meant to be consumed by a client.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Was an integral solution found ?
    pub found: bool,
    /// Was the search carried out until the end ? When this is false, the
    /// search was aborted (cutoff or node limit) and `found == false` does
    /// not mean the problem has no integral solution.
    pub is_exact: bool,
    /// The value of the best integral solution (None when `found` is false)
    pub objective_value: Option<f64>,
    /// The value of each declared variable in the best solution (keyed by
    /// variable name). All values are None when `found` is false.
    pub variable_values: FxHashMap<String, Option<f64>>,
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################


#[cfg(test)]
mod test_constraint {
    use crate::*;

    #[test]
    fn relations_hold_up_to_tolerance() {
        assert!(Relation::LessEq.holds(1.0, 1.0, 0.0));
        assert!(Relation::LessEq.holds(1.05, 1.0, 0.1));
        assert!(!Relation::LessEq.holds(1.5, 1.0, 0.1));

        assert!(Relation::GreaterEq.holds(1.0, 1.0, 0.0));
        assert!(Relation::GreaterEq.holds(0.95, 1.0, 0.1));
        assert!(!Relation::GreaterEq.holds(0.5, 1.0, 0.1));

        assert!(Relation::Equal.holds(1.0, 1.0, 0.0));
        assert!(!Relation::Equal.holds(1.2, 1.0, 0.1));
    }
    #[test]
    fn directions_map_onto_inequalities() {
        assert_eq!(Relation::LessEq,    Direction::Down.relation());
        assert_eq!(Relation::GreaterEq, Direction::Up.relation());
    }
    #[test]
    fn a_bound_is_recognized_as_such() {
        let down = Constraint::bound(Variable(0), Direction::Down, 2.0);
        assert_eq!(Some((Variable(0), Direction::Down, 2.0)), down.as_bound());

        let twice = Constraint::less_eq(vec![(Variable(0), 2.0)], 2.0);
        assert_eq!(None, twice.as_bound());

        let sum = Constraint::less_eq(vec![(Variable(0), 1.0), (Variable(1), 1.0)], 2.0);
        assert_eq!(None, sum.as_bound());

        let eq = Constraint::equal(vec![(Variable(0), 1.0)], 2.0);
        assert_eq!(None, eq.as_bound());
    }
    #[test]
    fn lhs_is_none_when_a_value_is_missing() {
        let c = Constraint::less_eq(vec![(Variable(0), 1.0), (Variable(3), 1.0)], 2.0);
        assert_eq!(None, c.lhs(&[1.0, 2.0]));
        assert!(!c.is_satisfied(&[1.0, 2.0], 1e-9));
    }
    #[test]
    fn lhs_is_the_weighted_sum() {
        let c = Constraint::greater_eq(vec![(Variable(0), 2.0), (Variable(1), -1.0)], 2.0);
        assert_eq!(Some(3.0), c.lhs(&[2.0, 1.0]));
        assert!(c.is_satisfied(&[2.0, 1.0], 1e-9));
        assert!(!c.is_satisfied(&[1.0, 1.0], 1e-9));
    }
    #[test]
    fn display_is_readable() {
        let c = Constraint::less_eq(vec![(Variable(0), 1.0), (Variable(1), 2.5)], 4.0);
        assert_eq!("1*x0 + 2.5*x1 <= 4", format!("{}", c));
    }
}
