pub mod coerce;
pub mod operators;

use crate::resolver::{Focus, Step};
use filter_syntax::{CombineOperator, FilterOperator};
use operators::{Operand, OperatorFn};

/// Compiled form of a filter node
#[derive(Debug, Clone)]
pub enum Plan {
    Group {
        combinator: CombineOperator,
        negated: bool,
        children: Vec<Plan>,
    },
    Condition {
        probe: Probe,
        negated: bool,
    },
}

/// Access steps leading from the focus to the value a condition inspects,
/// and what to do with that value
#[derive(Debug, Clone)]
pub struct Probe {
    pub steps: Vec<Step>,
    pub target: Target,
}

#[derive(Debug, Clone)]
pub enum Target {
    /// Apply a comparison operator to the reached value.
    Test(Test),
    /// Evaluate `element` against every element of the reached collection.
    Each {
        quantifier: Quantifier,
        element: Box<Probe>,
    },
    /// Evaluate a quantifier's sub-filter with the reached value in focus.
    Filter(Box<Plan>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    All,
    Any,
}

#[derive(Debug, Clone)]
pub struct Test {
    pub operator: FilterOperator,
    pub func: OperatorFn,
    pub operand: Operand,
}

impl Plan {
    pub fn eval(&self, focus: Focus<'_>) -> bool {
        match self {
            Plan::Group {
                combinator,
                negated,
                children,
            } => {
                let combined = match combinator {
                    CombineOperator::And => children.iter().all(|child| child.eval(focus)),
                    CombineOperator::Or => children.iter().any(|child| child.eval(focus)),
                    CombineOperator::Xor => children
                        .iter()
                        .fold(combinator.identity(), |acc, child| {
                            combinator.apply(acc, child.eval(focus))
                        }),
                };
                combined != *negated
            }
            Plan::Condition { probe, negated } => probe.eval(focus) != *negated,
        }
    }

    /// Number of compiled nodes, sub-filters included.
    pub fn node_count(&self) -> usize {
        match self {
            Plan::Group { children, .. } => 1 + children.iter().map(Plan::node_count).sum::<usize>(),
            Plan::Condition { probe, .. } => 1 + probe.nested_nodes(),
        }
    }
}

impl Probe {
    pub fn eval(&self, focus: Focus<'_>) -> bool {
        let reached = focus.walk(&self.steps);
        match &self.target {
            Target::Test(test) => (test.func)(reached.value(), &test.operand),
            Target::Each {
                quantifier,
                element,
            } => {
                let mut elements = reached.elements().iter().map(Focus::Value);
                match quantifier {
                    Quantifier::All => elements.all(|item| element.eval(item)),
                    Quantifier::Any => elements.any(|item| element.eval(item)),
                }
            }
            Target::Filter(plan) => plan.eval(reached),
        }
    }

    fn nested_nodes(&self) -> usize {
        match &self.target {
            Target::Test(_) => 0,
            Target::Each { element, .. } => element.nested_nodes(),
            Target::Filter(plan) => plan.node_count(),
        }
    }
}
