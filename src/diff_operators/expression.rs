// src/diff_operators/expression.rs

use crate::diff_operators::operator::DifferentialOperator;

/// Ordered sum of operator terms forming the left-hand side of a PDE.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorExpression {
    operators: Vec<DifferentialOperator>,
}

impl OperatorExpression {
    pub fn new(operators: Vec<DifferentialOperator>) -> Self {
        OperatorExpression { operators }
    }

    pub fn operators(&self) -> &[DifferentialOperator] {
        &self.operators
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DifferentialOperator> {
        self.operators.iter()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// True if at least one term is time-dependent.
    pub fn any_time_dependent(&self) -> bool {
        self.operators.iter().any(DifferentialOperator::is_time_dependent)
    }

    /// True if every term is time-dependent. An empty expression has no
    /// time-dependent term and yields `false`.
    pub fn all_time_dependent(&self) -> bool {
        !self.operators.is_empty() && self.operators.iter().all(DifferentialOperator::is_time_dependent)
    }
}

impl From<Vec<DifferentialOperator>> for OperatorExpression {
    fn from(operators: Vec<DifferentialOperator>) -> Self {
        OperatorExpression::new(operators)
    }
}

impl FromIterator<DifferentialOperator> for OperatorExpression {
    fn from_iter<I: IntoIterator<Item = DifferentialOperator>>(iter: I) -> Self {
        OperatorExpression::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OperatorExpression {
    type Item = &'a DifferentialOperator;
    type IntoIter = std::slice::Iter<'a, DifferentialOperator>;

    fn into_iter(self) -> Self::IntoIter {
        self.operators.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff_operators::library::{d2dx, ddt, ddx, ddy, laplacian2d, td_d2dx, td_d2dy};
    use proptest::prelude::*;

    #[test]
    fn test_all_time_dependent() {
        let expression = OperatorExpression::new(vec![ddt(0.1), td_d2dx(0.1)]);
        assert!(expression.any_time_dependent());
        assert!(expression.all_time_dependent());
    }

    #[test]
    fn test_mixed_expression() {
        let expression = OperatorExpression::new(vec![ddt(0.1), ddx(0.1)]);
        assert!(expression.any_time_dependent());
        assert!(!expression.all_time_dependent());
    }

    #[test]
    fn test_steady_expression() {
        let expression: OperatorExpression = vec![laplacian2d(0.1, 0.1), ddy(0.1)].into();
        assert!(!expression.any_time_dependent());
        assert!(!expression.all_time_dependent());
    }

    #[test]
    fn test_empty_expression() {
        let expression = OperatorExpression::default();
        assert!(expression.is_empty());
        assert!(!expression.any_time_dependent());
        assert!(!expression.all_time_dependent());
    }

    #[test]
    fn test_order_is_preserved() {
        let expression: OperatorExpression = [d2dx(0.5), ddt(0.5), ddx(0.5)].into_iter().collect();
        assert_eq!(expression.len(), 3);
        assert_eq!(expression.operators()[0], d2dx(0.5));
        assert_eq!(expression.operators()[1], ddt(0.5));
        assert_eq!((&expression).into_iter().count(), 3);
    }

    proptest! {
        #[test]
        fn predicates_match_term_flags(flags in proptest::collection::vec(any::<bool>(), 1..12)) {
            let expression: OperatorExpression = flags
                .iter()
                .map(|&td| if td { td_d2dy(0.1) } else { d2dx(0.1) })
                .collect();

            let any = expression.any_time_dependent();
            let all = expression.all_time_dependent();
            prop_assert_eq!(any, flags.iter().any(|&f| f));
            prop_assert_eq!(all, flags.iter().all(|&f| f));
            // repeated queries see the same expression
            prop_assert_eq!(expression.any_time_dependent(), any);
            prop_assert_eq!(expression.all_time_dependent(), all);
        }
    }
}
