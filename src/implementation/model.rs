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

//! This module provides a minimalistic modeling layer. It lets a client
//! declare named variables, linear constraints and a linear objective which
//! are eventually frozen into a `Problem` the solver can work with.

use fxhash::FxHashMap;

use crate::{Constraint, Error, Variable};

/// The name given to the objective carrier created by `Model::maximize`
pub const OBJECTIVE_NAME: &str = "objective";

/// An integer program: maximize the value of the `objective` variable subject
/// to the given linear `constraints`. Every variable except the objective
/// carrier is required to take an integral value.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// The names of the variables (in declaration order)
    names: Vec<String>,
    /// The constraints of the problem
    constraints: Vec<Constraint>,
    /// The variable carrying the value of the objective
    objective: Variable,
}

impl Problem {
    /// Creates a new problem after having checked that it is well formed.
    /// That is: the names are unique, the objective carrier and all variables
    /// mentioned in the constraints are declared, and all numbers are finite.
    pub fn new(names: Vec<String>, constraints: Vec<Constraint>, objective: Variable) -> Result<Self, Error> {
        let nb_variables = names.len();
        let known = |variable: Variable| {
            if variable.id() < nb_variables {
                Ok(())
            } else {
                Err(Error::UnknownVariable { variable, nb_variables })
            }
        };

        known(objective)?;
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(Error::InvalidProblem(format!("variable '{}' is declared twice", name)));
            }
        }
        for constraint in constraints.iter() {
            for (variable, coef) in constraint.terms.iter() {
                known(*variable)?;
                if !coef.is_finite() {
                    return Err(Error::InvalidProblem(format!("non finite coefficient in '{}'", constraint)));
                }
            }
            if !constraint.rhs.is_finite() {
                return Err(Error::InvalidProblem(format!("non finite right hand side in '{}'", constraint)));
            }
        }

        Ok(Self { names, constraints, objective })
    }

    pub fn nb_variables(&self) -> usize {
        self.names.len()
    }
    pub fn names(&self) -> &[String] {
        &self.names
    }
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
    pub fn objective(&self) -> Variable {
        self.objective
    }
    /// Returns the name of the given variable
    pub fn name_of(&self, variable: Variable) -> Option<&str> {
        self.names.get(variable.id()).map(String::as_str)
    }
    /// Returns the variable having the given name
    pub fn variable(&self, name: &str) -> Option<Variable> {
        self.names.iter().position(|n| n == name).map(Variable)
    }
}

/// A model is the mutable counterpart of a `Problem`: this is where the
/// variables and constraints get declared before the objective is set.
///
/// # Example
/// ```
/// # use bbint::*;
/// let mut model = Model::default();
/// let x = model.add_variable("x");
/// let y = model.add_variable("y");
/// model.add_constraint(Constraint::less_eq(vec![(x, 2.0), (y, 1.0)], 7.0));
///
/// let problem = model.maximize(vec![(x, 1.0), (y, 1.0)]).unwrap();
/// assert_eq!(3, problem.nb_variables());
/// assert_eq!(Some("objective"), problem.name_of(problem.objective()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Model {
    names: Vec<String>,
    index: FxHashMap<String, Variable>,
    constraints: Vec<Constraint>,
}

impl Model {
    /// Declares a new variable. Declaring the same name twice yields the
    /// same variable.
    pub fn add_variable(&mut self, name: impl Into<String>) -> Variable {
        let name = name.into();
        if let Some(variable) = self.index.get(&name) {
            return *variable;
        }
        let variable = Variable(self.names.len());
        self.index.insert(name.clone(), variable);
        self.names.push(name);
        variable
    }
    /// Returns the variable having the given name (if it was declared)
    pub fn variable(&self, name: &str) -> Option<Variable> {
        self.index.get(name).copied()
    }
    pub fn add_constraint(&mut self, constraint: Constraint) -> &mut Self {
        self.constraints.push(constraint);
        self
    }
    pub fn names(&self) -> &[String] {
        &self.names
    }
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Turns this model into a problem maximizing the given linear objective.
    /// A fresh objective carrier is appended to the variables, along with the
    /// constraint `carrier - sum(objective) == 0`.
    pub fn maximize(mut self, objective: Vec<(Variable, f64)>) -> Result<Problem, Error> {
        let mut name = OBJECTIVE_NAME.to_string();
        while self.index.contains_key(&name) {
            name.push('\'');
        }
        let carrier = self.add_variable(name);

        let mut terms = vec![(carrier, 1.0)];
        terms.extend(objective.into_iter().map(|(v, coef)| (v, -coef)));
        self.constraints.push(Constraint::equal(terms, 0.0));

        Problem::new(self.names, self.constraints, carrier)
    }
}
