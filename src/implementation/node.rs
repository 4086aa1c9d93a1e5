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

//! This module provides the `Node` type: the snapshot of a subproblem of the
//! search tree along with the cached result of its continuous relaxation.

use crate::{Constraint, Direction, Error, Problem, RelaxationOracle, Relaxed, Variable};

/// Returns true iff `x` lies within `epsilon` of its nearest integer.
///
/// # Example
/// ```
/// # use bbint::is_near_integer;
/// assert!( is_near_integer(2.99995, 1e-4));
/// assert!(!is_near_integer(2.5,     1e-4));
/// assert!(!is_near_integer(f64::NAN, 1e-4));
/// ```
#[inline]
pub fn is_near_integer(x: f64, epsilon: f64) -> bool {
    (x - x.round()).abs() <= epsilon
}

/// A node of the branch-and-bound tree. It holds the accumulated constraints
/// of the subproblem, the variable carrying the objective value and (once it
/// has been solved) the cached relaxation result.
///
/// The fields of a node are not accessible from the outside of the crate:
/// the only way to derive a new node is to branch using `clone_with_bound`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// The number of variables of the problem
    nb_variables: usize,
    /// The constraints of this subproblem (the ones of the root problem plus
    /// one bound per branching decision on the path from the root)
    constraints: Vec<Constraint>,
    /// The variable carrying the objective value
    objective: Variable,
    /// The result of the relaxation (once it has been solved)
    relaxation: Option<Relaxed>,
    /// The depth of the node with respect to the root problem
    depth: usize,
}

impl Node {
    /// Creates the root node of the search for the given problem
    pub fn root(problem: &Problem) -> Self {
        Self {
            nb_variables: problem.nb_variables(),
            constraints : problem.constraints().to_vec(),
            objective   : problem.objective(),
            relaxation  : None,
            depth       : 0,
        }
    }

    pub fn nb_variables(&self) -> usize {
        self.nb_variables
    }
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
    pub fn objective(&self) -> Variable {
        self.objective
    }
    pub fn depth(&self) -> usize {
        self.depth
    }
    /// The cached result of the relaxation (None if it has not been solved)
    pub fn relaxation(&self) -> Option<&Relaxed> {
        self.relaxation.as_ref()
    }
    pub fn is_solved(&self) -> bool {
        self.relaxation.is_some()
    }

    /// The optimal value of the relaxation of this node (if it was solved to
    /// optimality).
    pub fn objective_value(&self) -> Option<f64> {
        self.relaxation.as_ref().and_then(Relaxed::objective_value)
    }
    /// An upper bound on the value of any integral solution in this subtree.
    /// That is the relaxation value when it is known, +inf when the node has
    /// not been solved yet and -inf when its relaxation has no optimum.
    pub fn bound(&self) -> f64 {
        match &self.relaxation {
            None                               => f64::INFINITY,
            Some(Relaxed::Optimal { value, .. }) => *value,
            Some(_)                            => f64::NEG_INFINITY,
        }
    }
    /// The relaxed assignment of all variables (if any)
    pub fn values(&self) -> Option<&[f64]> {
        self.relaxation.as_ref().and_then(Relaxed::values)
    }
    /// The relaxed value of the given variable. A value which is absent or
    /// not finite is considered undefined.
    pub fn value_of(&self, variable: Variable) -> Option<f64> {
        self.values()
            .and_then(|values| values.get(variable.id()).copied())
            .filter(|x| x.is_finite())
    }

    /// Iterates over the decision variables (in declaration order). These are
    /// all the variables except the objective carrier.
    pub fn decision_variables(&self) -> impl Iterator<Item = Variable> + '_ {
        (0..self.nb_variables)
            .map(Variable)
            .filter(move |v| *v != self.objective)
    }
    /// Iterates over the decision variables whose relaxed value is defined
    /// and farther than `epsilon` from an integer.
    pub fn fractional_variables(&self, epsilon: f64) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.decision_variables()
            .filter_map(move |v| self.value_of(v).map(|x| (v, x)))
            .filter(move |(_, x)| !is_near_integer(*x, epsilon))
    }

    /// Returns a new (unsolved) node whose constraints are an independent
    /// copy of those of this node plus `variable <= bound` (direction `Down`)
    /// or `variable >= bound` (direction `Up`).
    pub fn clone_with_bound(&self, variable: Variable, bound: f64, direction: Direction) -> Result<Node, Error> {
        if variable.id() >= self.nb_variables {
            return Err(Error::UnknownVariable { variable, nb_variables: self.nb_variables });
        }

        let mut constraints = self.constraints.clone();
        constraints.push(Constraint::bound(variable, direction, bound));

        // the child must hold the parent's constraints followed by exactly
        // the requested bound, and nothing else
        let expected = self.constraints.len() + 1;
        let (prefix, last) = constraints.split_at(expected.min(constraints.len()) - 1);
        let isolated = constraints.len() == expected
            && prefix == self.constraints.as_slice()
            && last.first().and_then(Constraint::as_bound) == Some((variable, direction, bound));
        if !isolated {
            return Err(Error::CloneIsolationViolation { expected, actual: constraints.len() });
        }

        Ok(Node {
            nb_variables: self.nb_variables,
            constraints,
            objective   : self.objective,
            relaxation  : None,
            depth       : self.depth + 1,
        })
    }

    /// Solves the relaxation of this node with the given oracle, caches the
    /// outcome and returns it. An optimum whose value is not finite is
    /// recorded as a solver error.
    pub fn solve_relaxation(&mut self, oracle: &dyn RelaxationOracle) -> &Relaxed {
        let outcome = match oracle.solve(self.nb_variables, &self.constraints, self.objective) {
            Relaxed::Optimal { value, .. } if !value.is_finite() => 
                Relaxed::SolverError(format!("non finite objective value {}", value)),
            outcome => outcome,
        };
        self.relaxation.insert(outcome)
    }

    /// Returns true iff the value of every decision variable is defined and
    /// within `epsilon` of an integer. An unsolved node is never integral.
    pub fn is_integral(&self, epsilon: f64) -> bool {
        if self.values().is_none() {
            return false;
        }
        self.decision_variables()
            .all(|v| self.value_of(v).map(|x| is_near_integer(x, epsilon)).unwrap_or(false))
    }

    /// Returns the first decision variable (in declaration order) whose value
    /// is fractional. When there is none, the first decision variable is
    /// returned.
    pub fn select_branch_variable(&self, epsilon: f64) -> Variable {
        self.fractional_variables(epsilon)
            .map(|(v, _)| v)
            .next()
            .or_else(|| self.decision_variables().next())
            .unwrap_or(Variable(0))
    }
}

#[cfg(test)]
mod test_node {
    use crate::*;

    /// x, y and the objective carrier z
    fn problem() -> Problem {
        let mut model = Model::default();
        let x = model.add_variable("x");
        let y = model.add_variable("y");
        model.add_constraint(Constraint::less_eq(vec![(x, 1.0), (y, 1.0)], 4.5));
        model.maximize(vec![(x, 1.0), (y, 1.0)]).unwrap()
    }
    fn solved(values: Vec<f64>) -> Node {
        let mut node = Node::root(&problem());
        let value = values[2];
        node.solve_relaxation(&move |_: usize, _: &[Constraint], _: Variable| Relaxed::Optimal { value, values: values.clone() });
        node
    }

    #[test]
    fn the_root_holds_the_problem_constraints() {
        let pb   = problem();
        let root = Node::root(&pb);
        assert_eq!(pb.constraints(), root.constraints());
        assert_eq!(3, root.nb_variables());
        assert_eq!(Variable(2), root.objective());
        assert_eq!(0, root.depth());
        assert!(!root.is_solved());
    }

    #[test]
    fn cloning_adds_exactly_one_bound() {
        let root  = Node::root(&problem());
        let child = root.clone_with_bound(Variable(0), 3.0, Direction::Down).unwrap();

        assert_eq!(root.constraints().len() + 1, child.constraints().len());
        assert_eq!(root.constraints(), &child.constraints()[..root.constraints().len()]);
        assert_eq!(Some((Variable(0), Direction::Down, 3.0)), child.constraints().last().unwrap().as_bound());
        assert_eq!(1, child.depth());
        assert!(!child.is_solved());
    }

    #[test]
    fn a_clone_does_not_inherit_the_cached_relaxation() {
        let parent = solved(vec![0.5, 1.0, 1.5]);
        let child  = parent.clone_with_bound(Variable(0), 0.0, Direction::Down).unwrap();
        assert!(parent.is_solved());
        assert!(!child.is_solved());
        assert_eq!(f64::INFINITY, child.bound());
    }

    #[test]
    fn mutating_a_child_never_affects_its_parent_or_sibling() {
        let parent    = Node::root(&problem());
        let before    = parent.constraints().to_vec();
        let mut floor = parent.clone_with_bound(Variable(0), 3.0, Direction::Down).unwrap();
        let ceil      = parent.clone_with_bound(Variable(0), 4.0, Direction::Up).unwrap();
        let sibling   = ceil.constraints().to_vec();

        floor.constraints.push(Constraint::bound(Variable(1), Direction::Down, 0.0));
        floor.constraints[0].rhs = 42.0;

        assert_eq!(before,  parent.constraints());
        assert_eq!(sibling, ceil.constraints());
    }

    #[test]
    fn cloning_with_a_bound_that_cannot_be_posted_breaks_isolation() {
        let root = Node::root(&problem());
        let n    = root.constraints().len();
        assert_eq!(
            Err(Error::CloneIsolationViolation { expected: n + 1, actual: n + 1 }),
            root.clone_with_bound(Variable(0), f64::NAN, Direction::Down));
    }

    #[test]
    fn cloning_with_an_unknown_variable_fails() {
        let root = Node::root(&problem());
        assert_eq!(
            Err(Error::UnknownVariable { variable: Variable(7), nb_variables: 3 }),
            root.clone_with_bound(Variable(7), 1.0, Direction::Up));
    }

    #[test]
    fn solving_caches_the_outcome() {
        let mut node = Node::root(&problem());
        let outcome  = node.solve_relaxation(&|_: usize, _: &[Constraint], _: Variable| Relaxed::Infeasible).clone();
        assert_eq!(Relaxed::Infeasible, outcome);
        assert_eq!(Some(&Relaxed::Infeasible), node.relaxation());
        assert_eq!(f64::NEG_INFINITY, node.bound());
        assert_eq!(None, node.objective_value());
    }

    #[test]
    fn a_non_finite_optimum_is_recorded_as_a_solver_error() {
        let mut node = Node::root(&problem());
        node.solve_relaxation(&|_: usize, _: &[Constraint], _: Variable| 
            Relaxed::Optimal { value: f64::INFINITY, values: vec![0.0, 0.0, 0.0] });
        assert!(matches!(node.relaxation(), Some(Relaxed::SolverError(_))));
    }

    #[test]
    fn the_bound_is_the_relaxation_value() {
        let node = solved(vec![2.5, 2.0, 4.5]);
        assert_eq!(4.5, node.bound());
        assert_eq!(Some(4.5), node.objective_value());
    }

    #[test]
    fn an_unsolved_node_is_not_integral() {
        assert!(!Node::root(&problem()).is_integral(1e-4));
    }
    #[test]
    fn integral_values_make_an_integral_node() {
        assert!(solved(vec![2.0, 1.0, 3.0]).is_integral(1e-4));
    }
    #[test]
    fn the_objective_carrier_is_not_required_to_be_integral() {
        assert!(solved(vec![2.0, 1.0, 3.25]).is_integral(1e-4));
    }
    #[test]
    fn values_within_epsilon_count_as_integral() {
        assert!(solved(vec![1.99995, 1.00002, 3.0]).is_integral(1e-4));
        assert!(!solved(vec![1.999, 1.0, 3.0]).is_integral(1e-4));
    }
    #[test]
    fn a_fractional_value_makes_the_node_fractional() {
        assert!(!solved(vec![2.0, 1.5, 3.5]).is_integral(1e-4));
    }
    #[test]
    fn a_missing_value_makes_the_node_fractional() {
        let mut node = Node::root(&problem());
        node.solve_relaxation(&|_: usize, _: &[Constraint], _: Variable| Relaxed::Optimal { value: 3.0, values: vec![2.0] });
        assert!(!node.is_integral(1e-4));

        assert!(!solved(vec![f64::NAN, 1.0, 3.0]).is_integral(1e-4));
    }

    #[test]
    fn the_first_fractional_variable_is_selected() {
        assert_eq!(Variable(0), solved(vec![2.5, 1.5, 4.0]).select_branch_variable(1e-4));
        assert_eq!(Variable(1), solved(vec![2.0, 1.5, 3.5]).select_branch_variable(1e-4));
    }
    #[test]
    fn the_objective_carrier_is_never_selected() {
        let mut model = Model::default();
        let z = model.add_variable("z");
        let x = model.add_variable("x");
        model.add_constraint(Constraint::equal(vec![(z, 1.0), (x, -1.0)], 0.0));
        let pb = Problem::new(model.names().to_vec(), model.constraints().to_vec(), z).unwrap();

        let mut node = Node::root(&pb);
        node.solve_relaxation(&|_: usize, _: &[Constraint], _: Variable| Relaxed::Optimal { value: 0.5, values: vec![0.5, 0.5] });
        assert_eq!(Variable(1), node.select_branch_variable(1e-4));
        assert_eq!(vec![(Variable(1), 0.5)], node.fractional_variables(1e-4).collect::<Vec<_>>());
    }
    #[test]
    fn when_nothing_is_fractional_the_first_variable_is_selected() {
        assert_eq!(Variable(0), solved(vec![2.0, 1.0, 3.0]).select_branch_variable(1e-4));
    }
}
