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

//! This module provides the branching rule which splits a fractional node in
//! two children.

use crate::{Direction, Error, Node, Variable};

/// The two children created when branching on a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Children {
    /// The child where `variable <= floor(value)`
    pub floor: Node,
    /// The child where `variable >= ceil(value)`
    pub ceil: Node,
}
impl IntoIterator for Children {
    type Item = Node;
    type IntoIter = std::array::IntoIter<Node, 2>;

    fn into_iter(self) -> Self::IntoIter {
        [self.floor, self.ceil].into_iter()
    }
}

/// The classic floor/ceiling dichotomy. Given a node whose relaxation assigns
/// the fractional value `x` to variable `v`, it creates the two subproblems
/// `v <= floor(x)` and `v >= ceil(x)`. These are disjoint and no integral
/// point of the parent is lost in the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct BranchRule;

impl BranchRule {
    /// Splits the given solved `node` on `variable`.
    pub fn branch(&self, node: &Node, variable: Variable) -> Result<Children, Error> {
        let value = node.value_of(variable).ok_or(Error::MissingValue(variable))?;
        let (lo, hi) = (value.floor(), value.ceil());
        if lo == hi {
            return Err(Error::IntegralBranch { variable, value });
        }

        Ok(Children {
            floor: node.clone_with_bound(variable, lo, Direction::Down)?,
            ceil : node.clone_with_bound(variable, hi, Direction::Up)?,
        })
    }
}
