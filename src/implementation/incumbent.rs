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

//! This module provides the bookkeeping of the incumbent: the best integral
//! solution found so far during the search.

use crate::Solution;

/// The best integral solution known at some point of the search.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    /// The value of the objective
    pub value: f64,
    /// The value of each variable
    pub solution: Solution,
}

/// Keeps track of the incumbent. It starts empty ("no solution yet") which is
/// never confused with any numeric value, and it only ever changes for a
/// strictly better candidate. Hence the incumbent value is monotonically
/// increasing over the course of a search.
#[derive(Debug, Clone, Default)]
pub struct IncumbentTracker {
    best: Option<Incumbent>,
}

impl IncumbentTracker {
    pub fn new() -> Self {
        Self::default()
    }
    /// The current incumbent (if any)
    pub fn best(&self) -> Option<&Incumbent> {
        self.best.as_ref()
    }
    /// The value of the current incumbent (if any)
    pub fn value(&self) -> Option<f64> {
        self.best.as_ref().map(|inc| inc.value)
    }
    /// Returns true iff a node whose bound is `bound` could still contain
    /// a solution strictly better than the incumbent.
    pub fn can_be_improved_by(&self, bound: f64) -> bool {
        self.value().map_or(true, |best| bound > best)
    }
    /// Offers a candidate integral solution. It replaces the incumbent only
    /// if it is strictly better; the return value tells whether it did.
    pub fn offer(&mut self, value: f64, solution: &[f64]) -> bool {
        if value.is_nan() || !self.can_be_improved_by(value) {
            return false;
        }
        self.best = Some(Incumbent { value, solution: solution.to_vec() });
        true
    }
}
