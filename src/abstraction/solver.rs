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

//! This module defines the `Solver` trait.

use crate::{Completion, Error, SearchResult, Statistics};

/// A solution is nothing but the value of each problem variable (indexed by
/// variable id), the objective carrier included.
pub type Solution = Vec<f64>;

/// This is the solver abstraction. It is implemented by a structure that 
/// implements the branch-and-bound paradigm to find the best possible integral
/// solution to a given problem.
pub trait Solver {
    /// This method orders the solver to search for the optimal solution among
    /// all possibilities. It returns a structure standing for the outcome of
    /// the attempted maximization. Such a `Completion` may either be marked 
    /// **exact** if the maximization has been carried out until optimality was 
    /// proved. Or it can be inexact, in which case it means that the 
    /// maximization process was stopped because of the satisfaction of some 
    /// cutoff criterion.
    ///
    /// Along with the `is_exact` exact flag, the completion provides an 
    /// optional `best_value` of the maximization problem. Four cases are thus
    /// to be distinguished:
    ///
    /// * When the `is_exact` flag is true, and a `best_value` is present: the
    ///   `best_value` is the maximum value of the objective function.
    /// * When the `is_exact` flag is false and a `best_value` is present, it
    ///   is the best value of the objective function that was known at the time
    ///   of cutoff.
    /// * When the `is_exact` flag is true, and no `best_value` is present: it
    ///   means that the problem admits no integral solution.
    /// * When the `is_exact` flag is false and no `best_value` is present: it
    ///   simply means that no integral solution has been found before the 
    ///   cutoff occurred.
    ///
    /// An `Err` is only ever returned when a structural invariant of the
    /// search tree was found broken.
    fn maximize(&mut self) -> Result<Completion, Error>;
    /// This method returns the value of the objective function for the best
    /// solution that has been found. It returns `None` when no solution exists
    /// to the problem.
    fn best_value(&self) -> Option<f64>;
    /// This method returns the best solution to the optimization problem.
    /// It returns `None` when no integral solution was found.
    fn best_solution(&self) -> Option<Solution>;

    /// Returns the best lower bound that has been identified so far.
    /// In case where no solution has been found, it returns -inf.
    fn best_lower_bound(&self) -> f64;
    /// Returns the tightest upper bound that can be guaranteed so far.
    /// In case where no upper bound has been computed, it returns +inf.
    fn best_upper_bound(&self) -> f64;

    /// Sets a primal (best known value and solution) of the problem.
    fn set_primal(&mut self, value: f64, solution: Solution);

    /// The counters gathered during the search
    fn statistics(&self) -> Statistics;

    /// The outcome of the search, keyed by variable name
    fn result(&self) -> SearchResult;

    /// Computes the optimality gap
    fn gap(&self) -> f64 {
        let ub = self.best_upper_bound();
        let lb = self.best_lower_bound();
        if !ub.is_finite() || !lb.is_finite() {
            1.0
        } else {
            let aub = ub.abs();
            let alb = lb.abs();
            let u = aub.max(alb);
            let l = aub.min(alb);

            if u == 0.0 { 0.0 } else { (u - l) / u }
        }
    }
}
