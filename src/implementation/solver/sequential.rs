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

//! This module provides the implementation of a sequential branch-and-bound
//! solver. That is a solver that explores the search tree using one single
//! thread of execution, always expanding the open node having the best
//! relaxation bound first.
//!
//! Each node popped off the frontier goes through the following states:
//! `Pending -> Solved -> { Integral (accepted or rejected), Fractional (branched), Pruned }`.
//! Nodes are solved *before* they are admitted onto the frontier, so that
//! their own relaxation bound can be used as their priority.
use log::{debug, info, trace, warn};

use crate::{
    BranchRule, Completion, Cutoff, Error, Frontier, IncumbentTracker, NoCutoff, 
    FirstFractional, Node, Problem, Reason, RelaxationOracle, Relaxed, SearchConfig, 
    SearchResult, Solution, Solver, Statistics, VariableSelection
};

/// The workload the solver can get from its frontier
enum WorkLoad {
    /// There is no work left to be done: the search is over
    Complete,
    /// The work must stop because of an external cutoff (or a node limit)
    Aborted,
    /// The item to process
    WorkItem { node: Node },
}

/// A best-first branch-and-bound solver which finds the best integral solution
/// of a linear problem by solving continuous relaxations with a
/// `RelaxationOracle`.
///
/// # Example
/// ```
/// # use bbint::*;
/// let mut model = Model::default();
/// let x = model.add_variable("x");
/// let y = model.add_variable("y");
/// model.add_constraint(Constraint::greater_eq(vec![(x, 1.0)], 0.0))
///      .add_constraint(Constraint::greater_eq(vec![(y, 1.0)], 0.0))
///      .add_constraint(Constraint::less_eq(vec![(x, 2.0), (y, 2.0)], 7.0));
/// let problem = model.maximize(vec![(x, 2.0), (y, 1.0)]).unwrap();
///
/// let oracle     = SimplexOracle::default();
/// let mut front  = DefaultFrontier::default();
/// let mut solver = SequentialSolver::new(&problem, &oracle, &mut front);
///
/// let outcome = solver.maximize().unwrap();
/// assert!(outcome.is_exact);
/// assert!((outcome.best_value.unwrap() - 6.0).abs() < 1e-6);
/// ```
pub struct SequentialSolver<'a> {
    /// A reference to the problem being solved with branch-and-bound
    problem: &'a Problem,
    /// The oracle used to solve the continuous relaxation of each node
    oracle: &'a dyn RelaxationOracle,
    /// The strategy deciding which fractional variable to branch upon
    selection: &'a dyn VariableSelection,
    /// A cutoff heuristic meant to decide when to stop the resolution of 
    /// a given problem.
    cutoff: &'a dyn Cutoff,
    /// This is the frontier: the set of nodes that must still be explored 
    /// before the problem can be considered 'solved'.
    ///
    /// # Note:
    /// This frontier orders the nodes by bound (so the highest bound is going
    /// to pop first). So, it is guaranteed that the bound of the node being
    /// popped is an upper bound on the value reachable by exploring any of the
    /// nodes remaining on the frontier.
    frontier: &'a mut dyn Frontier,
    /// The tolerance and limits of the search
    config: SearchConfig,
    /// The floor/ceiling branching rule
    branching: BranchRule,
    /// The best integral solution found so far
    incumbent: IncumbentTracker,
    /// The counters of the search
    stats: Statistics,
    /// This is the value of the best known upper bound.
    best_ub: f64,
    /// If we decide not to go through a complete proof of optimality, this is
    /// the reason why we took that decision.
    abort_proof: Option<Reason>,
}

impl <'a> SequentialSolver<'a> {
    /// Creates a solver with the default settings: first fractional variable
    /// selection, no cutoff and the default search configuration.
    pub fn new(
        problem: &'a Problem,
        oracle: &'a dyn RelaxationOracle,
        frontier: &'a mut dyn Frontier,
    ) -> Self {
        Self::custom(problem, oracle, &FirstFractional, &NoCutoff, frontier, SearchConfig::default())
    }

    pub fn custom(
        problem: &'a Problem,
        oracle: &'a dyn RelaxationOracle,
        selection: &'a dyn VariableSelection,
        cutoff: &'a dyn Cutoff,
        frontier: &'a mut dyn Frontier,
        config: SearchConfig,
    ) -> Self {
        SequentialSolver {
            problem,
            oracle,
            selection,
            cutoff,
            frontier,
            config,
            //
            branching: BranchRule,
            incumbent: IncumbentTracker::new(),
            stats: Statistics::default(),
            best_ub: f64::INFINITY,
            abort_proof: None,
        }
    }

    /// This method initializes the problem resolution: it solves the
    /// relaxation of the root node and posts it onto the frontier when it
    /// has an optimum. Otherwise, the frontier stays empty and the search
    /// terminates without a solution.
    fn initialize(&mut self) {
        let mut root = Node::root(self.problem);
        if self.solve(&mut root) {
            self.best_ub = root.bound();
            self.frontier.push(root);
        } else {
            info!("the root relaxation has no optimum: there is no solution");
        }
    }

    /// Solves the relaxation of the given node, maintains the statistics and
    /// tells whether the relaxation has an optimum.
    fn solve(&mut self, node: &mut Node) -> bool {
        let depth  = node.depth();
        let oracle = self.oracle;
        self.stats.oracle_calls += 1;
        match node.solve_relaxation(oracle) {
            Relaxed::Optimal { .. } => true,
            Relaxed::Infeasible => {
                self.stats.infeasible += 1;
                debug!("infeasible relaxation at depth {depth}");
                false
            },
            Relaxed::SolverError(detail) => {
                self.stats.solver_errors += 1;
                warn!("the relaxation solver failed at depth {depth}: {detail}");
                false
            },
        }
    }

    /// This method processes the given `node`. An integral node is offered
    /// as a candidate incumbent. A fractional node is either pruned or split
    /// in two children whose relaxations are solved before they are pushed
    /// onto the frontier.
    fn process_one_node(&mut self, node: Node) -> Result<(), Error> {
        let epsilon = self.config.epsilon();
        let bound   = node.bound();
        trace!("processing node at depth {} with bound {}", node.depth(), bound);

        // only the nodes having an optimum are ever pushed
        let Some(values) = node.values() else {
            return Ok(());
        };

        if node.is_integral(epsilon) {
            if self.incumbent.offer(bound, values) {
                self.stats.incumbent_updates += 1;
                info!("new incumbent {} found at depth {}", bound, node.depth());
            } else {
                self.stats.rejected_integral += 1;
                debug!("integral node ({bound}) does not improve the incumbent");
            }
            return Ok(());
        }

        if !self.incumbent.can_be_improved_by(bound) {
            self.stats.pruned_by_bound += 1;
            debug!("pruned by bound: {} <= {:?}", bound, self.incumbent.value());
            return Ok(());
        }

        if node.fractional_variables(epsilon).next().is_none() {
            self.stats.incomplete += 1;
            debug!("pruned: the relaxation at depth {} lacks some values", node.depth());
            return Ok(());
        }

        let variable = self.selection.select_variable(&node, epsilon);
        let children = self.branching.branch(&node, variable)?;
        self.stats.branched += 1;
        debug!("branching on {} = {:?} at depth {}", variable, node.value_of(variable), node.depth());

        for mut child in children {
            if self.solve(&mut child) {
                self.frontier.push(child);
            }
        }
        Ok(())
    }

    fn abort_search(&mut self, reason: Reason) {
        info!("search aborted: {:?}", reason);
        self.abort_proof = Some(reason);
        self.frontier.clear();
    }

    /// Consults the frontier to fetch a workload. Depending on the current
    /// state, the workload can either be:
    ///
    ///   + Complete, when the frontier has been exhausted
    ///   + Aborted, when the cutoff or the node limit has been reached
    ///   + WorkItem, when a node was popped to be processed.
    fn get_workload(&mut self) -> WorkLoad {
        // Do we need to stop
        if self.abort_proof.is_some() {
            return WorkLoad::Aborted;
        }
        if self.frontier.is_empty() {
            self.best_ub = self.best_lower_bound();
            return WorkLoad::Complete;
        }
        if self.cutoff.must_stop() {
            self.abort_search(Reason::CutoffOccurred);
            return WorkLoad::Aborted;
        }
        if self.config.node_limit().map_or(false, |limit| self.stats.explored >= limit) {
            self.abort_search(Reason::NodeLimitReached);
            return WorkLoad::Aborted;
        }

        let Some(node) = self.frontier.pop() else {
            return WorkLoad::Complete;
        };

        // Consume the current node and process it
        self.stats.explored += 1;
        self.stats.max_depth = self.stats.max_depth.max(node.depth());
        self.best_ub = node.bound().max(self.best_lower_bound());

        WorkLoad::WorkItem { node }
    }

    /// The reason why the last search did not prove optimality (if any)
    pub fn abort_reason(&self) -> Option<Reason> {
        self.abort_proof
    }
}

impl Solver for SequentialSolver<'_> {
    /// Explores the search tree in best-first order until the frontier is
    /// exhausted or the search gets aborted.
    fn maximize(&mut self) -> Result<Completion, Error> {
        info!("starting branch-and-bound over {} variables and {} constraints", 
            self.problem.nb_variables(), self.problem.constraints().len());
        self.initialize();

        loop {
            match self.get_workload() {
                WorkLoad::Complete => break,
                WorkLoad::Aborted  => break,
                WorkLoad::WorkItem { node } => self.process_one_node(node)?,
            }
        }

        let completion = Completion { 
            is_exact: self.abort_proof.is_none(), 
            best_value: self.incumbent.value() 
        };
        info!("search finished: exact = {}, best value = {:?}, {} nodes explored, {} oracle calls",
            completion.is_exact, completion.best_value, self.stats.explored, self.stats.oracle_calls);
        Ok(completion)
    }

    /// Returns the best solution that has been identified for this problem.
    fn best_solution(&self) -> Option<Solution> {
        self.incumbent.best().map(|inc| inc.solution.clone())
    }
    /// Returns the value of the best solution that has been identified for
    /// this problem.
    fn best_value(&self) -> Option<f64> {
        self.incumbent.value()
    }
    /// Returns the value of the best lower bound that has been identified for
    /// this problem.
    fn best_lower_bound(&self) -> f64 {
        self.incumbent.value().unwrap_or(f64::NEG_INFINITY)
    }
    /// Returns the value of the best upper bound that has been identified for
    /// this problem.
    fn best_upper_bound(&self) -> f64 {
        self.best_ub
    }
    /// Sets a primal (best known value and solution) of the problem.
    fn set_primal(&mut self, value: f64, solution: Solution) {
        if self.incumbent.offer(value, &solution) {
            info!("incumbent seeded with value {value}");
        }
    }

    fn statistics(&self) -> Statistics {
        self.stats
    }

    fn result(&self) -> SearchResult {
        let best = self.incumbent.best();
        let variable_values = self.problem.names().iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), best.and_then(|inc| inc.solution.get(i).copied())))
            .collect();

        SearchResult {
            found: best.is_some(),
            is_exact: self.abort_proof.is_none(),
            objective_value: best.map(|inc| inc.value),
            variable_values,
        }
    }
}

#[cfg(test)]
mod test_solver {
    use crate::*;

    /// A problem with one decision variable x and the objective carrier z.
    /// The relaxations are scripted, so the problem has no constraint.
    fn problem() -> Problem {
        Problem::new(vec!["x".to_string(), "z".to_string()], vec![], Variable(1)).unwrap()
    }

    /// root: x = 0.5 (10.5); x <= 0: x = 0 (10); x >= 1: x = 1.5 (9)
    fn scripted(_: usize, cs: &[Constraint], _: Variable) -> Relaxed {
        let last = cs.last().and_then(Constraint::as_bound);
        match last {
            None => Relaxed::Optimal { value: 10.5, values: vec![0.5, 10.5] },
            Some((_, Direction::Down, _)) => Relaxed::Optimal { value: 10.0, values: vec![0.0, 10.0] },
            Some((_, Direction::Up, _))   => Relaxed::Optimal { value: 9.0,  values: vec![1.5, 9.0] },
        }
    }

    #[test]
    fn by_default_best_lb_is_min_infinity() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let solver = SequentialSolver::new(&pb, &scripted, &mut front);
        assert_eq!(f64::NEG_INFINITY, solver.best_lower_bound());
    }
    #[test]
    fn by_default_best_ub_is_plus_infinity() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let solver = SequentialSolver::new(&pb, &scripted, &mut front);
        assert_eq!(f64::INFINITY, solver.best_upper_bound());
    }
    #[test]
    fn by_default_there_is_no_solution() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let solver = SequentialSolver::new(&pb, &scripted, &mut front);
        assert_eq!(None, solver.best_value());
        assert_eq!(None, solver.best_solution());
        assert!(!solver.result().found);
    }

    #[test]
    fn a_child_whose_bound_cannot_beat_the_incumbent_is_pruned_when_popped() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let mut solver = SequentialSolver::new(&pb, &scripted, &mut front);

        let outcome = solver.maximize().unwrap();
        assert_eq!(Completion { is_exact: true, best_value: Some(10.0) }, outcome);
        assert_eq!(Some(vec![0.0, 10.0]), solver.best_solution());

        let stats = solver.statistics();
        assert_eq!(3, stats.oracle_calls);
        assert_eq!(3, stats.explored);
        assert_eq!(1, stats.branched);
        assert_eq!(1, stats.pruned_by_bound);
        assert_eq!(1, stats.incumbent_updates);
        assert_eq!(1, stats.max_depth);
    }

    #[test]
    fn a_seeded_primal_prunes_the_root() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let mut solver = SequentialSolver::new(&pb, &scripted, &mut front);
        solver.set_primal(10.5, vec![0.0, 10.5]);

        let outcome = solver.maximize().unwrap();
        assert_eq!(Completion { is_exact: true, best_value: Some(10.5) }, outcome);

        let stats = solver.statistics();
        assert_eq!(1, stats.oracle_calls);
        assert_eq!(1, stats.pruned_by_bound);
        assert_eq!(0, stats.branched);
    }

    #[test]
    fn a_worse_primal_is_ignored() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let mut solver = SequentialSolver::new(&pb, &scripted, &mut front);
        solver.set_primal(8.0, vec![0.0, 8.0]);
        solver.set_primal(7.0, vec![0.0, 7.0]);
        assert_eq!(Some(8.0), solver.best_value());
    }

    #[test]
    fn an_infeasible_root_yields_no_solution() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let oracle = |_: usize, _: &[Constraint], _: Variable| Relaxed::Infeasible;
        let mut solver = SequentialSolver::new(&pb, &oracle, &mut front);

        let outcome = solver.maximize().unwrap();
        assert_eq!(Completion { is_exact: true, best_value: None }, outcome);
        assert!(solver.result().is_exact);
        assert!(!solver.result().found);
        assert_eq!(1, solver.statistics().oracle_calls);
        assert_eq!(1, solver.statistics().infeasible);
        assert_eq!(0, solver.statistics().explored);
    }

    #[test]
    fn a_solver_error_at_the_root_yields_no_solution() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let oracle = |_: usize, _: &[Constraint], _: Variable| Relaxed::SolverError("numerical trouble".to_string());
        let mut solver = SequentialSolver::new(&pb, &oracle, &mut front);

        let outcome = solver.maximize().unwrap();
        assert_eq!(None, outcome.best_value);
        assert_eq!(1, solver.statistics().solver_errors);
        assert_eq!(0, solver.statistics().infeasible);
    }

    #[test]
    fn an_integral_root_requires_no_branching() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let oracle = |_: usize, _: &[Constraint], _: Variable| Relaxed::Optimal { value: 4.0, values: vec![2.0, 4.0] };
        let mut solver = SequentialSolver::new(&pb, &oracle, &mut front);

        let outcome = solver.maximize().unwrap();
        assert_eq!(Some(4.0), outcome.best_value);
        assert_eq!(1, solver.statistics().oracle_calls);
        assert_eq!(0, solver.statistics().branched);
    }

    #[test]
    fn a_node_lacking_values_is_pruned_as_incomplete() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let oracle = |_: usize, _: &[Constraint], _: Variable| Relaxed::Optimal { value: 4.0, values: vec![f64::NAN, 4.0] };
        let mut solver = SequentialSolver::new(&pb, &oracle, &mut front);

        let outcome = solver.maximize().unwrap();
        assert_eq!(Completion { is_exact: true, best_value: None }, outcome);
        assert_eq!(1, solver.statistics().incomplete);
        assert_eq!(0, solver.statistics().branched);
    }

    #[test]
    fn a_node_limit_aborts_the_search() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let config = SearchConfigBuilder::default().node_limit(1).build().unwrap();
        let mut solver = SequentialSolver::custom(&pb, &scripted, &FirstFractional, &NoCutoff, &mut front, config);

        let outcome = solver.maximize().unwrap();
        assert_eq!(Completion { is_exact: false, best_value: None }, outcome);
        assert_eq!(Some(Reason::NodeLimitReached), solver.abort_reason());
        assert_eq!(1, solver.statistics().explored);
        assert_eq!(10.5, solver.best_upper_bound());

        let result = solver.result();
        assert!(!result.found);
        assert!(!result.is_exact);
    }

    #[test]
    fn a_cutoff_aborts_the_search() {
        struct Always;
        impl Cutoff for Always {
            fn must_stop(&self) -> bool { true }
        }
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let mut solver = SequentialSolver::custom(&pb, &scripted, &FirstFractional, &Always, &mut front, SearchConfig::default());

        let outcome = solver.maximize().unwrap();
        assert!(!outcome.is_exact);
        assert_eq!(Some(Reason::CutoffOccurred), solver.abort_reason());
        assert_eq!(0, solver.statistics().explored);
    }

    #[test]
    fn a_strategy_picking_an_integral_variable_is_reported() {
        struct PickCarrier;
        impl VariableSelection for PickCarrier {
            fn select_variable(&self, node: &Node, _: f64) -> Variable { node.objective() }
        }
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let oracle = |_: usize, _: &[Constraint], _: Variable| Relaxed::Optimal { value: 4.0, values: vec![0.5, 4.0] };
        let mut solver = SequentialSolver::custom(&pb, &oracle, &PickCarrier, &NoCutoff, &mut front, SearchConfig::default());

        assert_eq!(
            Err(Error::IntegralBranch { variable: Variable(1), value: 4.0 }), 
            solver.maximize());
    }

    #[test]
    fn the_result_covers_every_variable() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let mut solver = SequentialSolver::new(&pb, &scripted, &mut front);
        solver.maximize().unwrap();

        let result = solver.result();
        assert!(result.found);
        assert!(result.is_exact);
        assert_eq!(Some(10.0), result.objective_value);
        assert_eq!(2, result.variable_values.len());
        assert_eq!(Some(&Some(0.0)),  result.variable_values.get("x"));
        assert_eq!(Some(&Some(10.0)), result.variable_values.get("z"));
    }

    #[test]
    fn the_gap_is_zero_once_optimality_is_proved() {
        let pb = problem();
        let mut front = DefaultFrontier::default();
        let mut solver = SequentialSolver::new(&pb, &scripted, &mut front);
        solver.maximize().unwrap();
        assert_eq!(0.0, solver.gap());
    }
}
