use filter_syntax::FilterOperator;
use lazy_static::lazy_static;
use model::Value;
use regex::Regex;
use std::{cmp::Ordering, collections::HashMap};

/// Right-hand operand of a test, checked and coerced when the predicate is
/// compiled
#[derive(Debug, Clone)]
pub enum Operand {
    None,
    Value(Value),
    Set(Vec<Value>),
    Pattern(Regex),
}

impl Operand {
    fn as_value(&self) -> Option<&Value> {
        match self {
            Operand::Value(value) => Some(value),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }
}

/// Signature shared by every operator implementation
pub type OperatorFn = fn(&Value, &Operand) -> bool;

lazy_static! {
    pub static ref OPERATORS: OperatorTable = OperatorTable::new();
}

/// Dispatch table from comparison operator to implementation. All and Any
/// have no entry: they are lowered into quantification by the compiler.
pub struct OperatorTable {
    operators: HashMap<FilterOperator, OperatorFn>,
}

impl OperatorTable {
    pub fn new() -> Self {
        let mut table = Self {
            operators: HashMap::new(),
        };

        table.register(FilterOperator::Equal, equal);
        table.register(FilterOperator::NotEqual, not_equal);
        table.register(FilterOperator::GreaterThan, greater_than);
        table.register(FilterOperator::GreaterOrEqual, greater_or_equal);
        table.register(FilterOperator::LessThan, less_than);
        table.register(FilterOperator::LessOrEqual, less_or_equal);
        table.register(FilterOperator::StartsWith, starts_with);
        table.register(FilterOperator::DoesNotStartWith, does_not_start_with);
        table.register(FilterOperator::EndsWith, ends_with);
        table.register(FilterOperator::DoesNotEndWith, does_not_end_with);
        table.register(FilterOperator::Contains, contains);
        table.register(FilterOperator::DoesNotContain, does_not_contain);
        table.register(FilterOperator::IsNull, is_null);
        table.register(FilterOperator::NotNull, not_null);
        table.register(FilterOperator::Matches, matches_pattern);
        table.register(FilterOperator::DoesNotMatch, does_not_match);
        table.register(FilterOperator::In, is_in);
        table.register(FilterOperator::NotIn, not_in);

        table
    }

    pub fn register(&mut self, operator: FilterOperator, func: OperatorFn) {
        self.operators.insert(operator, func);
    }

    pub fn get(&self, operator: FilterOperator) -> Option<OperatorFn> {
        self.operators.get(&operator).copied()
    }

    pub fn contains(&self, operator: FilterOperator) -> bool {
        self.operators.contains_key(&operator)
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::new()
    }
}

fn equal(actual: &Value, operand: &Operand) -> bool {
    operand.as_value().is_some_and(|expected| actual.equal(expected))
}

fn not_equal(actual: &Value, operand: &Operand) -> bool {
    !equal(actual, operand)
}

fn ordering(actual: &Value, operand: &Operand) -> Option<Ordering> {
    operand.as_value().and_then(|expected| actual.compare(expected))
}

fn greater_than(actual: &Value, operand: &Operand) -> bool {
    matches!(ordering(actual, operand), Some(Ordering::Greater))
}

fn greater_or_equal(actual: &Value, operand: &Operand) -> bool {
    matches!(
        ordering(actual, operand),
        Some(Ordering::Greater) | Some(Ordering::Equal)
    )
}

fn less_than(actual: &Value, operand: &Operand) -> bool {
    matches!(ordering(actual, operand), Some(Ordering::Less))
}

fn less_or_equal(actual: &Value, operand: &Operand) -> bool {
    matches!(
        ordering(actual, operand),
        Some(Ordering::Less) | Some(Ordering::Equal)
    )
}

fn text_test(actual: &Value, operand: &Operand, test: fn(&str, &str) -> bool) -> bool {
    match (actual.as_str(), operand.as_str()) {
        (Some(text), Some(needle)) => test(text, needle),
        _ => false,
    }
}

fn starts_with(actual: &Value, operand: &Operand) -> bool {
    text_test(actual, operand, |text, prefix| text.starts_with(prefix))
}

fn does_not_start_with(actual: &Value, operand: &Operand) -> bool {
    !starts_with(actual, operand)
}

fn ends_with(actual: &Value, operand: &Operand) -> bool {
    text_test(actual, operand, |text, suffix| text.ends_with(suffix))
}

fn does_not_end_with(actual: &Value, operand: &Operand) -> bool {
    !ends_with(actual, operand)
}

fn contains(actual: &Value, operand: &Operand) -> bool {
    text_test(actual, operand, |text, needle| text.contains(needle))
}

fn does_not_contain(actual: &Value, operand: &Operand) -> bool {
    !contains(actual, operand)
}

fn is_null(actual: &Value, _operand: &Operand) -> bool {
    actual.is_null()
}

fn not_null(actual: &Value, _operand: &Operand) -> bool {
    !actual.is_null()
}

fn matches_pattern(actual: &Value, operand: &Operand) -> bool {
    match (actual.as_str(), operand) {
        (Some(text), Operand::Pattern(pattern)) => pattern.is_match(text),
        _ => false,
    }
}

fn does_not_match(actual: &Value, operand: &Operand) -> bool {
    !matches_pattern(actual, operand)
}

fn is_in(actual: &Value, operand: &Operand) -> bool {
    match operand {
        Operand::Set(candidates) => candidates.iter().any(|candidate| actual.equal(candidate)),
        _ => false,
    }
}

fn not_in(actual: &Value, operand: &Operand) -> bool {
    !is_in(actual, operand)
}
