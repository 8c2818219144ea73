use crate::{
    error::{FilterError, NodeLocation, Result},
    eval::{
        Plan, Probe, Quantifier, Target, Test,
        coerce::coerce_literal,
        operators::{OPERATORS, Operand},
    },
    predicate::{Predicate, TypedPredicate},
    resolver::{ResolvedTarget, resolve},
    settings::{CompileSettings, EmptyGroupPolicy},
};
use filter_syntax::{
    Condition, FilterNode, FilterOperator, FilterValue, Group, Literal, PropertyPath, SyntaxError,
};
use model::{DataType, Filterable, Schema, Value};
use regex::{Regex, RegexBuilder};
use tracing::{debug, trace};

/// Trait for compilers turning a filter tree into an executable filter.
pub trait FilterCompiler {
    /// The type of filter that this compiler produces.
    type Filter;

    /// Compile the tree against the schema of the records it will test.
    fn compile(&self, node: &FilterNode, schema: &Schema) -> Result<Self::Filter>;
}

/// Compiles filter trees into in-memory predicates
#[derive(Debug, Clone, Default)]
pub struct PredicateCompiler {
    settings: CompileSettings,
}

impl FilterCompiler for PredicateCompiler {
    type Filter = Predicate;

    fn compile(&self, node: &FilterNode, schema: &Schema) -> Result<Predicate> {
        debug!(
            "Compiling filter with {} node(s) against schema '{}'",
            node.node_count(),
            schema.name
        );

        let root = schema.clone().into_type();
        let plan = self.compile_node(node, &root, &NodeLocation::root())?;

        debug!("Compiled filter into {} plan node(s)", plan.node_count());
        Ok(Predicate::new(plan, &schema.name))
    }
}

impl PredicateCompiler {
    pub fn new(settings: CompileSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CompileSettings {
        &self.settings
    }

    /// Compiles a tree for the typed entity `T`.
    pub fn compile_for<T: Filterable>(&self, node: &FilterNode) -> Result<TypedPredicate<T>> {
        self.compile(node, &T::schema()).map(TypedPredicate::new)
    }

    fn compile_node(
        &self,
        node: &FilterNode,
        focus: &DataType,
        location: &NodeLocation,
    ) -> Result<Plan> {
        match node {
            FilterNode::Group(group) => self.compile_group(group, focus, location),
            FilterNode::Condition(condition) => self.compile_condition(condition, focus, location),
        }
    }

    fn compile_group(&self, group: &Group, focus: &DataType, location: &NodeLocation) -> Result<Plan> {
        if group.children.is_empty() && self.settings.empty_groups == EmptyGroupPolicy::Reject {
            return Err(FilterError::EmptyGroup {
                location: location.clone(),
                combinator: group.combinator,
            });
        }

        let children = group
            .children
            .iter()
            .enumerate()
            .map(|(i, child)| self.compile_node(child, focus, &location.child(i)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Plan::Group {
            combinator: group.combinator,
            negated: group.negated,
            children,
        })
    }

    fn compile_condition(
        &self,
        condition: &Condition,
        focus: &DataType,
        location: &NodeLocation,
    ) -> Result<Plan> {
        let site = Site {
            location,
            condition,
        };

        let path = PropertyPath::parse(&condition.path).map_err(|err| match err {
            SyntaxError::MalformedPath { reason, .. } => site.malformed(reason),
            other => site.malformed(other.to_string()),
        })?;

        let probe = self.lower(&site, &path, focus, false)?;
        Ok(Plan::Condition {
            probe,
            negated: condition.negated,
        })
    }

    /// Lowers `path` against `focus`. `quantified` records whether a
    /// collection has already been crossed on the way here.
    fn lower(
        &self,
        site: &Site<'_>,
        path: &PropertyPath,
        focus: &DataType,
        quantified: bool,
    ) -> Result<Probe> {
        match resolve(focus, path).map_err(|reason| site.schema_mismatch(reason))? {
            ResolvedTarget::Scalar { steps, data_type } => Ok(Probe {
                steps,
                target: self.lower_target(site, data_type, quantified)?,
            }),
            ResolvedTarget::Quantified {
                steps,
                element_type,
                remaining,
            } => {
                if !site.operator().is_quantifier() {
                    trace!(
                        "Collection met before '{}' in '{}': {} applies to any element",
                        remaining,
                        site.condition.path,
                        site.operator()
                    );
                }
                let element = self.lower(site, &remaining, element_type, true)?;
                Ok(Probe {
                    steps,
                    target: Target::Each {
                        quantifier: site.quantifier(),
                        element: Box::new(element),
                    },
                })
            }
        }
    }

    /// Decides what happens to the value a fully consumed path reaches.
    fn lower_target(&self, site: &Site<'_>, reached: &DataType, quantified: bool) -> Result<Target> {
        let operator = site.operator();

        if operator.is_quantifier() {
            let Some(FilterValue::Filter(body)) = &site.condition.value else {
                return Err(site.unsupported(format!(
                    "{operator} requires a sub-filter to apply to each element"
                )));
            };
            let body_location = site.location.child(0);

            if let DataType::List(element_type) = reached {
                let plan = self.compile_node(body, element_type, &body_location)?;
                return Ok(Target::Each {
                    quantifier: site.quantifier(),
                    element: Box::new(Probe {
                        steps: Vec::new(),
                        target: Target::Filter(Box::new(plan)),
                    }),
                });
            }

            if !quantified {
                return Err(site.schema_mismatch(format!(
                    "{operator} requires a collection, found {reached}"
                )));
            }

            let plan = self.compile_node(body, reached, &body_location)?;
            return Ok(Target::Filter(Box::new(plan)));
        }

        if matches!(site.condition.value, Some(FilterValue::Filter(_))) {
            return Err(site.unsupported(format!(
                "{operator} does not take a sub-filter, only All and Any do"
            )));
        }

        if let DataType::List(element_type) = reached
            && !operator.is_null_check()
        {
            trace!(
                "'{}' reaches a {} collection: {} applies to any element",
                site.condition.path, reached, operator
            );
            let element = Probe {
                steps: Vec::new(),
                target: self.lower_target(site, element_type, true)?,
            };
            return Ok(Target::Each {
                quantifier: Quantifier::Any,
                element: Box::new(element),
            });
        }

        self.build_test(site, reached).map(Target::Test)
    }

    fn build_test(&self, site: &Site<'_>, reached: &DataType) -> Result<Test> {
        let operator = site.operator();
        let func = OPERATORS
            .get(operator)
            .ok_or_else(|| site.unsupported(format!("{operator} is not a comparison operator")))?;

        // A missing value compares like an explicit null.
        let literal = site.condition.literal().unwrap_or(&Literal::Null);

        let operand = if operator.is_null_check() {
            Operand::None
        } else if operator.is_membership() {
            let candidates = literal.as_list().ok_or_else(|| {
                site.unsupported(format!(
                    "{operator} requires a list of candidates, found a {} literal",
                    literal.kind()
                ))
            })?;
            let values = candidates
                .iter()
                .map(|candidate| self.scalar_operand(site, candidate, reached))
                .collect::<Result<Vec<_>>>()?;
            Operand::Set(values)
        } else {
            if matches!(literal, Literal::List(_)) {
                return Err(site.unsupported(format!(
                    "{operator} compares against a single value, found a list literal"
                )));
            }

            if operator.is_ordering() {
                if !reached.is_ordered() {
                    return Err(site.schema_mismatch(format!(
                        "{operator} requires a number, date or timestamp, found {reached}"
                    )));
                }
                if literal.is_null() {
                    return Err(site.schema_mismatch(format!("{operator} cannot compare against null")));
                }
            }

            if operator.is_string_match() || operator.is_pattern() {
                if !reached.is_text() {
                    return Err(site.schema_mismatch(format!(
                        "{operator} requires a string, found {reached}"
                    )));
                }
                let text = literal.as_str().ok_or_else(|| {
                    site.schema_mismatch(format!(
                        "{operator} requires a string literal, found a {} literal",
                        literal.kind()
                    ))
                })?;

                if operator.is_pattern() {
                    Operand::Pattern(self.compile_pattern(site, text)?)
                } else {
                    Operand::Value(Value::String(text.to_string()))
                }
            } else {
                Operand::Value(self.scalar_operand(site, literal, reached)?)
            }
        };

        Ok(Test {
            operator,
            func,
            operand,
        })
    }

    fn scalar_operand(&self, site: &Site<'_>, literal: &Literal, reached: &DataType) -> Result<Value> {
        if matches!(literal, Literal::List(_)) {
            return Err(site.unsupported("nested list literals are not supported"));
        }
        coerce_literal(literal, reached).map_err(|reason| site.schema_mismatch(reason))
    }

    fn compile_pattern(&self, site: &Site<'_>, pattern: &str) -> Result<Regex> {
        RegexBuilder::new(pattern)
            .size_limit(self.settings.regex_size_limit)
            .build()
            .map_err(|err| FilterError::InvalidPattern {
                location: site.location.clone(),
                path: site.condition.path.clone(),
                operator: site.operator(),
                pattern: pattern.to_string(),
                reason: err.to_string(),
            })
    }
}

/// Compiles `node` against `schema` with default settings.
pub fn compile(node: &FilterNode, schema: &Schema) -> Result<Predicate> {
    PredicateCompiler::default().compile(node, schema)
}

/// Compiles `node` for the typed entity `T` with default settings.
pub fn compile_for<T: Filterable>(node: &FilterNode) -> Result<TypedPredicate<T>> {
    PredicateCompiler::default().compile_for::<T>(node)
}

/// The condition being compiled and where it sits in the tree
struct Site<'n> {
    location: &'n NodeLocation,
    condition: &'n Condition,
}

impl Site<'_> {
    fn operator(&self) -> FilterOperator {
        self.condition.operator
    }

    fn quantifier(&self) -> Quantifier {
        match self.condition.operator {
            FilterOperator::All => Quantifier::All,
            _ => Quantifier::Any,
        }
    }

    fn schema_mismatch(&self, reason: impl Into<String>) -> FilterError {
        FilterError::SchemaMismatch {
            location: self.location.clone(),
            path: self.condition.path.clone(),
            operator: self.condition.operator,
            reason: reason.into(),
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> FilterError {
        FilterError::MalformedPath {
            location: self.location.clone(),
            path: self.condition.path.clone(),
            operator: self.condition.operator,
            reason: reason.into(),
        }
    }

    fn unsupported(&self, reason: impl Into<String>) -> FilterError {
        FilterError::UnsupportedCombination {
            location: self.location.clone(),
            path: self.condition.path.clone(),
            operator: self.condition.operator,
            reason: reason.into(),
        }
    }
}
