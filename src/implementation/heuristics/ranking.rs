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

//! This module provides the implementation of node rankings that are used to
//! set the ordering of the solver frontier.

use std::cmp::Ordering;

use crate::{FrontierEntry, NodeRanking};

/// The MaxBound (maximum bound) strategy is one that always selects the node
/// having the highest relaxation bound in the frontier. In case of equalities,
/// the ties are broken in favor of the node which has been pushed first (the
/// one with the smallest insertion sequence number). This makes the order in
/// which the tree is explored fully deterministic.
///
/// # Example
/// ```
/// # use bbint::*;
/// let pb = Problem::new(vec!["x".to_string(), "z".to_string()], vec![], Variable(1)).unwrap();
/// let solved = |value: f64, tag: f64| {
///     let mut node = Node::root(&pb);
///     node.solve_relaxation(&move |_: usize, _: &[Constraint], _: Variable|
///         Relaxed::Optimal { value, values: vec![tag, value] });
///     node
/// };
///
/// let mut priority_q = SimpleFrontier::new(MaxBound);
/// priority_q.push(solved(300.0, 1.0));
/// priority_q.push(solved(100.0, 2.0));
/// priority_q.push(solved(700.0, 3.0));
/// priority_q.push(solved(100.0, 4.0));
///
/// let tag = |n: Node| n.value_of(Variable(0)).unwrap();
/// assert_eq!(3.0, tag(priority_q.pop().unwrap())); // because 700 is the highest bound
/// assert_eq!(1.0, tag(priority_q.pop().unwrap())); // because 300 is the next highest
/// assert_eq!(2.0, tag(priority_q.pop().unwrap())); // bound = 100 but it was pushed first
/// assert_eq!(4.0, tag(priority_q.pop().unwrap()));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MaxBound;
impl NodeRanking for MaxBound {
    fn compare(&self, l: &FrontierEntry, r: &FrontierEntry) -> Ordering {
        l.key.cmp(&r.key).then_with(|| r.seq.cmp(&l.seq))
    }
}
