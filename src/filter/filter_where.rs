use super::types::{FilterCondition, FilterOp, FilterValue};

pub struct FilterWhere {
    param_values: Vec<FilterValue>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Builds a parameterized WHERE body (without the keyword). Returns an empty
    /// string when there are no conditions.
    pub fn generate(conditions: &[FilterCondition], starting_param_index: usize) -> (String, Vec<FilterValue>) {
        let mut filter_where = Self::new(starting_param_index);
        let sql_conditions: Vec<String> = conditions
            .iter()
            .map(|condition| filter_where.build_sql_condition(condition))
            .collect();
        (sql_conditions.join(" AND "), filter_where.param_values)
    }

    fn build_sql_condition(&mut self, condition: &FilterCondition) -> String {
        let quoted_column = format!("\"{}\"", condition.field.column());
        match condition.op {
            FilterOp::Gt => format!("{} > {}", quoted_column, self.param(condition.value.clone())),
            FilterOp::Gte => format!("{} >= {}", quoted_column, self.param(condition.value.clone())),
            FilterOp::Lt => format!("{} < {}", quoted_column, self.param(condition.value.clone())),
            FilterOp::Lte => format!("{} <= {}", quoted_column, self.param(condition.value.clone())),
            FilterOp::Contains => {
                let pattern = match &condition.value {
                    FilterValue::Text(s) => format!("%{}%", escape_like(s)),
                    FilterValue::Number(n) => format!("%{}%", n),
                };
                format!("{} ILIKE {}", quoted_column, self.param(FilterValue::Text(pattern)))
            }
        }
    }

    fn param(&mut self, value: FilterValue) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// Escapes LIKE wildcards so user input is matched literally (backslash is the
/// default escape character in Postgres).
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
