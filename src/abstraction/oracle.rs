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

//! This module defines the `RelaxationOracle` trait: the contract of the
//! continuous solver which is consulted at every node of the search tree.

use crate::{Constraint, Relaxed, Variable};

/// A relaxation oracle solves the continuous relaxation of a node. That is,
/// it maximizes the objective carrier `objective` subject to `constraints`
/// while disregarding any integrality requirement.
///
/// The oracle must never panic on a hard instance: every failure is to be
/// reported as `Relaxed::SolverError` so that the solver can prune the node
/// and carry on.
pub trait RelaxationOracle {
    /// Solves the relaxation over the variables `0..nb_variables`.
    fn solve(&self, nb_variables: usize, constraints: &[Constraint], objective: Variable) -> Relaxed;
}

/// The simplest oracle implementation is to simply use a closure.
impl <F> RelaxationOracle for F
where F: Fn(usize, &[Constraint], Variable) -> Relaxed
{
    fn solve(&self, nb_variables: usize, constraints: &[Constraint], objective: Variable) -> Relaxed {
        self(nb_variables, constraints, objective)
    }
}
