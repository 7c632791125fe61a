use crate::database::models::Product;

use super::error::FilterError;
use super::filter_where::FilterWhere;
use super::types::{FilterCondition, FilterOp, FilterValue, ProductField, SqlResult};

/// A conjunction of field conditions. An empty filter selects every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<FilterCondition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn condition(mut self, field: ProductField, op: FilterOp, value: FilterValue) -> Result<Self, FilterError> {
        Self::validate(field, op, &value)?;
        self.conditions.push(FilterCondition { field, op, value });
        Ok(self)
    }

    pub fn contains(self, field: ProductField, text: impl Into<String>) -> Result<Self, FilterError> {
        self.condition(field, FilterOp::Contains, FilterValue::Text(text.into()))
    }

    pub fn gt(self, field: ProductField, value: f64) -> Result<Self, FilterError> {
        self.condition(field, FilterOp::Gt, FilterValue::Number(value))
    }

    pub fn lt(self, field: ProductField, value: f64) -> Result<Self, FilterError> {
        self.condition(field, FilterOp::Lt, FilterValue::Number(value))
    }

    /// Inclusive on both ends.
    pub fn between(self, field: ProductField, min: f64, max: f64) -> Result<Self, FilterError> {
        self.condition(field, FilterOp::Gte, FilterValue::Number(min))?
            .condition(field, FilterOp::Lte, FilterValue::Number(max))
    }

    pub fn to_sql(&self, table_name: &str, columns: &[&str]) -> Result<SqlResult, FilterError> {
        Self::validate_identifier(table_name)?;
        for column in columns {
            Self::validate_identifier(column)?;
        }

        let select_clause = if columns.is_empty() {
            "*".to_string()
        } else {
            columns.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", ")
        };
        let (where_clause, params) = FilterWhere::generate(&self.conditions, 0);

        let mut clauses = vec![
            format!("SELECT {}", select_clause),
            format!("FROM \"{}\"", table_name),
        ];
        if !where_clause.is_empty() {
            clauses.push(format!("WHERE {}", where_clause));
        }
        clauses.push("ORDER BY \"created_at\", \"id\"".to_string());
        let query = clauses.join(" ");

        Ok(SqlResult { query, params })
    }

    /// Evaluates the filter against a record the same way the SQL form does.
    pub fn matches(&self, product: &Product) -> bool {
        self.conditions.iter().all(|c| Self::matches_condition(c, product))
    }

    fn matches_condition(condition: &FilterCondition, product: &Product) -> bool {
        match (Self::field_value(product, condition.field), &condition.value) {
            // Absent fields never match, like NULL in SQL
            (None, _) => false,
            (Some(FilterValue::Number(actual)), FilterValue::Number(expected)) => match condition.op {
                FilterOp::Gt => actual > *expected,
                FilterOp::Gte => actual >= *expected,
                FilterOp::Lt => actual < *expected,
                FilterOp::Lte => actual <= *expected,
                FilterOp::Contains => false,
            },
            (Some(FilterValue::Text(actual)), FilterValue::Text(expected)) => match condition.op {
                FilterOp::Contains => actual.to_lowercase().contains(&expected.to_lowercase()),
                _ => false,
            },
            _ => false,
        }
    }

    fn field_value(product: &Product, field: ProductField) -> Option<FilterValue> {
        match field {
            ProductField::Name => product.name.clone().map(FilterValue::Text),
            ProductField::Amount => product.amount.map(FilterValue::Number),
            ProductField::Category => product.category.clone().map(FilterValue::Text),
        }
    }

    fn validate(field: ProductField, op: FilterOp, value: &FilterValue) -> Result<(), FilterError> {
        match (field.is_numeric(), op, value) {
            (true, FilterOp::Contains, _) => Err(FilterError::InvalidOperatorData(format!(
                "$contains is not supported on numeric field {}",
                field.column()
            ))),
            (true, _, FilterValue::Number(n)) if !n.is_finite() => Err(FilterError::InvalidOperatorData(format!(
                "{} requires a finite number",
                field.column()
            ))),
            (true, _, FilterValue::Number(_)) => Ok(()),
            (true, _, FilterValue::Text(_)) => Err(FilterError::InvalidOperatorData(format!(
                "{} requires a numeric value",
                field.column()
            ))),
            (false, FilterOp::Contains, FilterValue::Text(_)) => Ok(()),
            (false, _, _) => Err(FilterError::InvalidOperatorData(format!(
                "{:?} is not supported on text field {}",
                op,
                field.column()
            ))),
        }
    }

    fn validate_identifier(name: &str) -> Result<(), FilterError> {
        let mut chars = name.chars();
        let valid_start = matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_');
        if !valid_start || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(FilterError::InvalidColumn(format!("Invalid identifier format: {}", name)));
        }
        Ok(())
    }
}
