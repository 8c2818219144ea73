use bigdecimal::{BigDecimal, FromPrimitive};
use filter_syntax::Literal;
use model::{DataType, Value, core::parse::parse_scalar};

/// Converts a literal into a value comparable with values of `target`.
///
/// Null coerces to every type. Strings are parsed for decimal, date,
/// timestamp and uuid targets; integers widen to float and decimal.
pub fn coerce_literal(literal: &Literal, target: &DataType) -> Result<Value, String> {
    let value = match (target, literal) {
        (_, Literal::Null) => Value::Null,
        (DataType::Boolean, Literal::Boolean(b)) => Value::Boolean(*b),
        (DataType::Int, Literal::Int(i)) => Value::Int(*i),
        (DataType::Int | DataType::Float, Literal::Float(f)) => Value::Float(*f),
        (DataType::Float, Literal::Int(i)) => Value::Float(*i as f64),
        (DataType::Decimal, Literal::Int(i)) => Value::Decimal(BigDecimal::from(*i)),
        (DataType::Decimal, Literal::Float(f)) => BigDecimal::from_f64(*f)
            .map(Value::Decimal)
            .ok_or_else(|| format!("{f} is not representable as a decimal"))?,
        (DataType::String, Literal::String(s)) => Value::String(s.clone()),
        (
            DataType::Decimal | DataType::Date | DataType::Timestamp | DataType::Uuid,
            Literal::String(s),
        ) => parse_scalar(s, target)
            .map_err(|reason| format!("'{s}' is not a valid {target}: {reason}"))?,
        (DataType::Date, Literal::Date(d)) => Value::Date(*d),
        (DataType::Timestamp, Literal::Timestamp(ts)) => Value::Timestamp(*ts),
        (DataType::Timestamp, Literal::Date(d)) => d
            .and_hms_opt(0, 0, 0)
            .map(|naive| Value::Timestamp(naive.and_utc()))
            .ok_or_else(|| format!("{d} has no midnight"))?,
        _ => {
            return Err(format!(
                "cannot compare {target} with a {} literal",
                literal.kind()
            ));
        }
    };

    Ok(value)
}
