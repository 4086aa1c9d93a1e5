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

//! Error types of the library.
//!
//! Note that failures of the relaxation oracle are *not* errors: infeasible
//! or unsolvable relaxations are plain `Relaxed` outcomes which the solver
//! absorbs by pruning. The variants below denote ill-formed problems or a
//! breach of a structural invariant of the search tree.

use thiserror::Error;

use crate::Variable;

/// Errors that can occur while modeling or solving a problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A branched node does not hold exactly its parent's constraints followed
    /// by the requested bound (e.g. the bound is NaN).
    #[error("clone isolation violated: expected {expected} constraints ending with the new bound, found {actual}")]
    CloneIsolationViolation { expected: usize, actual: usize },

    /// A variable is referenced which was never declared
    #[error("unknown variable {variable} (the problem only has {nb_variables} variables)")]
    UnknownVariable { variable: Variable, nb_variables: usize },

    /// One tried to branch on a variable whose relaxed value is undefined
    #[error("variable {0} has no value in the relaxation")]
    MissingValue(Variable),

    /// One tried to branch on a variable whose relaxed value is integral:
    /// both children would overlap.
    #[error("cannot branch on {variable}: its value {value} is integral")]
    IntegralBranch { variable: Variable, value: f64 },

    /// Problem validation failed
    #[error("invalid problem: {0}")]
    InvalidProblem(String),
}
