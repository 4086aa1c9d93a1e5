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

//! # BBINT
//! BBINT is a small library to find the best *integral* solution of a linear
//! optimization problem using best-first branch-and-bound over continuous
//! relaxations. Its goal is to let you describe your problem as a set of
//! variables, linear constraints and a linear objective (see `Model`) and to
//! let a continuous solver (see `RelaxationOracle`) do the heavy lifting on
//! each node of the search tree.
//!
//! Whenever the relaxation of a node assigns a fractional value `x` to some
//! variable `v`, the node is split in two children: one where `v <= floor(x)`
//! and one where `v >= ceil(x)`. Nodes are explored in decreasing order of
//! their relaxation bound and a node is pruned as soon as its bound cannot
//! beat the best integral solution found so far (the incumbent).
//!
//! ## Quick Example
//! The following presents a minimalistic use of bbint. It maximizes `x + y`
//! subject to `0 <= x <= 3.5` and `0 <= y <= 2` with `x` and `y` integral.
//!
//! ```
//! use bbint::*;
//!
//! // 1. Describe the problem
//! let mut model = Model::default();
//! let x = model.add_variable("x");
//! let y = model.add_variable("y");
//! model.add_constraint(Constraint::greater_eq(vec![(x, 1.0)], 0.0))
//!      .add_constraint(Constraint::greater_eq(vec![(y, 1.0)], 0.0))
//!      .add_constraint(Constraint::less_eq(vec![(x, 1.0)], 3.5))
//!      .add_constraint(Constraint::less_eq(vec![(y, 1.0)], 2.0));
//! // the objective is carried by an extra variable named "objective"
//! let problem = model.maximize(vec![(x, 1.0), (y, 1.0)]).unwrap();
//!
//! // 2. Pick a relaxation oracle and a frontier
//! let oracle    = SimplexOracle::default();
//! let mut front = DefaultFrontier::default();
//!
//! // 3. Create a solver and maximize your objective function. The outcome
//! //    tells whether the search was carried out until optimality was proved
//! //    and gives the value of the best solution (None if there is none).
//! let mut solver = SequentialSolver::new(&problem, &oracle, &mut front);
//! let outcome    = solver.maximize().unwrap();
//! assert!(outcome.is_exact);
//!
//! // 4. Do whatever you like with the optimal solution.
//! let result = solver.result();
//! assert!(result.found);
//! assert!((result.objective_value.unwrap() - 5.0).abs() < 1e-6);
//! assert!((result.variable_values["x"].unwrap() - 3.0).abs() < 1e-6);
//! assert!((result.variable_values["y"].unwrap() - 2.0).abs() < 1e-6);
//! ```
//!
//! ## Going further
//! The continuous solver is only ever used through the `RelaxationOracle`
//! trait, which is also implemented by any closure having the right
//! signature. The choice of the branching variable is a `VariableSelection`
//! strategy (`FirstFractional` or `MostFractional`), the search can be
//! interrupted with a `Cutoff` (e.g. `TimeBudget`) or a node limit set in the
//! `SearchConfig`. The library emits its diagnostics through the `log` facade.

mod common;
mod error;
mod abstraction;
mod implementation;

pub use common::*;
pub use error::*;
pub use abstraction::*;
pub use implementation::*;
