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

//! This module defines the traits used to encapsulate solver heuristics.
//!
//! Namely, it defines :
//!
//!  - the `VariableSelection` which is used to pick the branching variable
//!  - the `NodeRanking` heuristic which orders the nodes on the frontier
//!  - the `Cutoff` heuristic which is used to impose a stopping criterion on the
//!    solver resolution.

use std::cmp::Ordering;

use crate::{FrontierEntry, Node, Variable};

/// This trait encapsulates the policy deciding which fractional variable of
/// a node is going to be branched upon. 
pub trait VariableSelection {
    /// Selects the variable to branch on in the given solved node. `epsilon`
    /// is the tolerance below which a value is considered integral. The
    /// objective carrier must never be returned.
    fn select_variable(&self, node: &Node, epsilon: f64) -> Variable;
}

/// A node ranking is an heuristic that imposes a total order on the entries
/// of the solver frontier. This order is used by the framework as a means to
/// impose a given ordering on the nodes that are popped from the frontier.
pub trait NodeRanking {
    /// This method compares two entries and determines which is the one 
    /// that needs to be popped off the frontier first. In this ordering,
    /// greater means more likely to be popped first.
    fn compare(&self, a: &FrontierEntry, b: &FrontierEntry) -> Ordering;
}

/// This trait encapsulates a criterion (external to the solver) which imposes
/// to stop searching for a better solution. Typically, this is done to grant
/// a given time budget to the search.
pub trait Cutoff {
    /// Returns true iff the criterion is met and the search must stop.
    fn must_stop(&self) -> bool;
}
