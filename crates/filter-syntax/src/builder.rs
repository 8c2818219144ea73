use crate::ast::{
    literal::Literal,
    node::{Condition, FilterNode, Group},
    operator::{CombineOperator, FilterOperator},
};

/// Fluent assembly of a filter tree
///
/// The builder only shapes the tree; it performs no validation. Paths,
/// operators and operand types are checked when the tree is compiled.
///
/// ```
/// use filter_syntax::{builder::QueryBuilder, ast::operator::{CombineOperator, FilterOperator}};
///
/// let tree = QueryBuilder::new(CombineOperator::And)
///     .add("name", FilterOperator::StartsWith, "Al")
///     .group(CombineOperator::Or, |g| {
///         g.add("age", FilterOperator::GreaterThan, 25)
///             .add_check("email", FilterOperator::IsNull)
///     })
///     .build();
/// assert_eq!(tree.node_count(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    current: Group,
}

impl QueryBuilder {
    pub fn new(combinator: CombineOperator) -> Self {
        Self {
            current: Group::new(combinator, Vec::new()),
        }
    }

    pub fn and(mut self) -> Self {
        self.current.combinator = CombineOperator::And;
        self
    }

    pub fn or(mut self) -> Self {
        self.current.combinator = CombineOperator::Or;
        self
    }

    pub fn xor(mut self) -> Self {
        self.current.combinator = CombineOperator::Xor;
        self
    }

    /// Negates the combined result of the group being built.
    pub fn not(mut self) -> Self {
        self.current.negated = !self.current.negated;
        self
    }

    /// Appends a condition comparing `path` against `value`.
    pub fn add(self, path: &str, operator: FilterOperator, value: impl Into<Literal>) -> Self {
        self.push(Condition::new(path, operator, value).into())
    }

    /// Appends a condition that takes no value, such as IsNull / NotNull.
    pub fn add_check(self, path: &str, operator: FilterOperator) -> Self {
        self.push(Condition::check(path, operator).into())
    }

    /// Appends an All / Any condition. The sub-filter is assembled by
    /// `configure` and is evaluated against each element of the collection
    /// found at `path`.
    pub fn add_quantified<F>(self, path: &str, operator: FilterOperator, configure: F) -> Self
    where
        F: FnOnce(QueryBuilder) -> QueryBuilder,
    {
        let body = configure(QueryBuilder::new(CombineOperator::And)).build();
        self.push(Condition::quantified(path, operator, body).into())
    }

    /// Appends an already assembled node.
    pub fn push(mut self, node: FilterNode) -> Self {
        self.current.children.push(node);
        self
    }

    /// Appends a nested group assembled by `configure`.
    pub fn group<F>(self, combinator: CombineOperator, configure: F) -> Self
    where
        F: FnOnce(QueryBuilder) -> QueryBuilder,
    {
        let group = configure(QueryBuilder::new(combinator)).build();
        self.push(group)
    }

    pub fn build(self) -> FilterNode {
        FilterNode::Group(self.current)
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(CombineOperator::And)
    }
}
