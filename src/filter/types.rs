/// Filterable product fields. The record key is not filterable; lookups by key
/// go through the store's by-key operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Amount,
    Category,
}

impl ProductField {
    pub fn column(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Amount => "amount",
            ProductField::Category => "category",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ProductField::Amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Gt,
    Gte,
    Lt,
    Lte,
    /// Case-insensitive literal substring match.
    Contains,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    pub field: ProductField,
    pub op: FilterOp,
    pub value: FilterValue,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<FilterValue>,
}
