use crate::ast::{
    literal::Literal,
    operator::{CombineOperator, FilterOperator},
};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{MapAccess, Visitor, value::MapAccessDeserializer},
};
use std::{fmt, ops::Not};

/// A node of the filter tree: a leaf condition or a combining group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterNode {
    Condition(Condition),
    Group(Group),
}

/// Leaf comparison of the value found at `path` against `value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub path: String,
    pub operator: FilterOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FilterValue>,
    #[serde(default)]
    pub negated: bool,
}

/// Ordered children combined with one operator; `negated` applies to the
/// combined result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub combinator: CombineOperator,
    #[serde(default)]
    pub negated: bool,
    #[serde(default)]
    pub children: Vec<FilterNode>,
}

/// Right-hand side of a condition
///
/// Comparison operators take a literal. All / Any take a sub-filter that is
/// evaluated against each collection element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Filter(Box<FilterNode>),
    Literal(Literal),
}

/// Sub-filters are read from objects only; arrays are always list literals.
#[derive(Deserialize)]
#[serde(untagged)]
enum FilterValueRepr {
    Filter(NodeObject),
    Literal(Literal),
}

struct NodeObject(FilterNode);

impl<'de> Deserialize<'de> for NodeObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ObjectVisitor;

        impl<'de> Visitor<'de> for ObjectVisitor {
            type Value = NodeObject;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a filter node object")
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<NodeObject, A::Error> {
                FilterNode::deserialize(MapAccessDeserializer::new(map)).map(NodeObject)
            }
        }

        deserializer.deserialize_map(ObjectVisitor)
    }
}

impl<'de> Deserialize<'de> for FilterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match FilterValueRepr::deserialize(deserializer)? {
            FilterValueRepr::Filter(NodeObject(node)) => FilterValue::Filter(Box::new(node)),
            FilterValueRepr::Literal(literal) => FilterValue::Literal(literal),
        })
    }
}

impl FilterValue {
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            FilterValue::Literal(literal) => Some(literal),
            FilterValue::Filter(_) => None,
        }
    }

    pub fn as_filter(&self) -> Option<&FilterNode> {
        match self {
            FilterValue::Filter(node) => Some(node),
            FilterValue::Literal(_) => None,
        }
    }
}

impl From<Literal> for FilterValue {
    fn from(literal: Literal) -> Self {
        FilterValue::Literal(literal)
    }
}

impl From<FilterNode> for FilterValue {
    fn from(node: FilterNode) -> Self {
        FilterValue::Filter(Box::new(node))
    }
}

impl Condition {
    pub fn new(path: &str, operator: FilterOperator, value: impl Into<Literal>) -> Self {
        Self {
            path: path.to_string(),
            operator,
            value: Some(FilterValue::Literal(value.into())),
            negated: false,
        }
    }

    /// Condition without a value (IsNull / NotNull).
    pub fn check(path: &str, operator: FilterOperator) -> Self {
        Self {
            path: path.to_string(),
            operator,
            value: None,
            negated: false,
        }
    }

    /// All / Any condition whose elements must satisfy `body`.
    pub fn quantified(path: &str, operator: FilterOperator, body: FilterNode) -> Self {
        Self {
            path: path.to_string(),
            operator,
            value: Some(FilterValue::Filter(Box::new(body))),
            negated: false,
        }
    }

    pub fn literal(&self) -> Option<&Literal> {
        self.value.as_ref().and_then(FilterValue::as_literal)
    }
}

impl Group {
    pub fn new(combinator: CombineOperator, children: Vec<FilterNode>) -> Self {
        Self {
            combinator,
            negated: false,
            children,
        }
    }
}

impl FilterNode {
    pub fn condition(path: &str, operator: FilterOperator, value: impl Into<Literal>) -> Self {
        FilterNode::Condition(Condition::new(path, operator, value))
    }

    pub fn check(path: &str, operator: FilterOperator) -> Self {
        FilterNode::Condition(Condition::check(path, operator))
    }

    pub fn quantified(path: &str, operator: FilterOperator, body: FilterNode) -> Self {
        FilterNode::Condition(Condition::quantified(path, operator, body))
    }

    pub fn and(children: Vec<FilterNode>) -> Self {
        FilterNode::Group(Group::new(CombineOperator::And, children))
    }

    pub fn or(children: Vec<FilterNode>) -> Self {
        FilterNode::Group(Group::new(CombineOperator::Or, children))
    }

    pub fn xor(children: Vec<FilterNode>) -> Self {
        FilterNode::Group(Group::new(CombineOperator::Xor, children))
    }

    pub fn is_negated(&self) -> bool {
        match self {
            FilterNode::Condition(c) => c.negated,
            FilterNode::Group(g) => g.negated,
        }
    }

    /// Toggles the negation flag of this node. Applying it twice restores the
    /// original node.
    pub fn negate(mut self) -> Self {
        match &mut self {
            FilterNode::Condition(c) => c.negated = !c.negated,
            FilterNode::Group(g) => g.negated = !g.negated,
        }
        self
    }

    /// Number of nodes in the tree, quantifier sub-filters included.
    pub fn node_count(&self) -> usize {
        match self {
            FilterNode::Condition(c) => {
                1 + c
                    .value
                    .as_ref()
                    .and_then(FilterValue::as_filter)
                    .map_or(0, FilterNode::node_count)
            }
            FilterNode::Group(g) => 1 + g.children.iter().map(FilterNode::node_count).sum::<usize>(),
        }
    }
}

impl Not for FilterNode {
    type Output = FilterNode;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl From<Condition> for FilterNode {
    fn from(condition: Condition) -> Self {
        FilterNode::Condition(condition)
    }
}

impl From<Group> for FilterNode {
    fn from(group: Group) -> Self {
        FilterNode::Group(group)
    }
}
