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

//! This module provides the configuration of a branch-and-bound search.

use derive_builder::Builder;

/// This is how you configure a search: the tolerance used to decide whether a
/// relaxed value is integral, and an optional limit on the number of nodes
/// that may be explored before the search gives up on proving optimality.
///
/// # Example
/// ```
/// # use bbint::*;
/// let config = SearchConfigBuilder::default()
///     .epsilon(1e-6)
///     .node_limit(1_000)
///     .build()
///     .unwrap();
/// assert_eq!(1e-6, config.epsilon());
/// assert_eq!(Some(1_000), config.node_limit());
///
/// // a non positive tolerance is rejected
/// assert!(SearchConfigBuilder::default().epsilon(0.0).build().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct SearchConfig {
    /// A relaxed value is deemed integral when it lies within epsilon of the
    /// nearest integer (default 1e-4)
    #[builder(default="1e-4")]
    epsilon: f64,
    /// The maximum number of nodes popped off the frontier (default: none)
    #[builder(default, setter(strip_option))]
    node_limit: Option<usize>,
}

impl SearchConfig {
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
    pub fn node_limit(&self) -> Option<usize> {
        self.node_limit
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { epsilon: 1e-4, node_limit: None }
    }
}

impl SearchConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.epsilon {
            Some(eps) if !eps.is_finite() || eps <= 0.0 => 
                Err(format!("epsilon must be a positive finite number (got {eps})")),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod test_config {
    use crate::*;

    #[test]
    fn the_builder_defaults_are_those_of_the_default_config() {
        let built = SearchConfigBuilder::default().build().unwrap();
        assert_eq!(SearchConfig::default(), built);
        assert_eq!(1e-4, built.epsilon());
        assert_eq!(None, built.node_limit());
    }
    #[test]
    fn the_node_limit_can_be_set() {
        let built = SearchConfigBuilder::default().node_limit(3).build().unwrap();
        assert_eq!(Some(3), built.node_limit());
    }
    #[test]
    fn a_negative_epsilon_is_rejected() {
        assert!(SearchConfigBuilder::default().epsilon(-1e-3).build().is_err());
    }
    #[test]
    fn a_nan_epsilon_is_rejected() {
        assert!(SearchConfigBuilder::default().epsilon(f64::NAN).build().is_err());
    }
    #[test]
    fn an_infinite_epsilon_is_rejected() {
        assert!(SearchConfigBuilder::default().epsilon(f64::INFINITY).build().is_err());
    }
}
