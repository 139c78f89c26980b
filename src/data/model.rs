use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single field of the loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, inferred from the literal field text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Identity of a cell value for distinct-value counting.
///
/// Numbers compare numerically, so `1`, `1.0` and `1e0` share one key and
/// `-0.0` collapses onto `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistinctKey<'a> {
    Integer(i64),
    Float(u64),
    Text(&'a str),
    Bool(bool),
    Null,
}

/// Field texts read as a missing value.
const NULL_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_TOKENS: [&str; 3] = ["true", "True", "TRUE"];
const FALSE_TOKENS: [&str; 3] = ["false", "False", "FALSE"];

impl CellValue {
    /// Infer the value type from raw field text.
    ///
    /// Missing-value markers (`NA`, `null`, `NaN`, ...) become `Null`.
    pub fn parse(s: &str) -> Self {
        if NULL_TOKENS.contains(&s) {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if TRUE_TOKENS.contains(&s) {
            return CellValue::Bool(true);
        }
        if FALSE_TOKENS.contains(&s) {
            return CellValue::Bool(false);
        }
        CellValue::String(s.to_string())
    }

    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether the value equals numeric zero.
    pub fn is_zero(&self) -> bool {
        match self {
            CellValue::Integer(i) => *i == 0,
            CellValue::Float(f) => *f == 0.0,
            _ => false,
        }
    }

    pub fn distinct_key(&self) -> DistinctKey<'_> {
        match self {
            CellValue::Integer(i) => DistinctKey::Integer(*i),
            CellValue::Float(f) => {
                // Whole floats inside the i64 range share the integer key.
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    DistinctKey::Integer(*f as i64)
                } else if f.is_nan() {
                    DistinctKey::Float(f64::NAN.to_bits())
                } else {
                    DistinctKey::Float(f.to_bits())
                }
            }
            CellValue::String(s) => DistinctKey::Text(s),
            CellValue::Bool(b) => DistinctKey::Bool(*b),
            CellValue::Null => DistinctKey::Null,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnRef – lookup of a column by name or position
// ---------------------------------------------------------------------------

/// Addresses a column either by header name (first match wins when the
/// file repeats a header) or by zero-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRef<'a> {
    Name(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for ColumnRef<'a> {
    fn from(name: &'a str) -> Self {
        ColumnRef::Name(name)
    }
}

impl<'a> From<&'a String> for ColumnRef<'a> {
    fn from(name: &'a String) -> Self {
        ColumnRef::Name(name)
    }
}

impl From<usize> for ColumnRef<'_> {
    fn from(index: usize) -> Self {
        ColumnRef::Index(index)
    }
}

impl fmt::Display for ColumnRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Name(name) => write!(f, "'{name}'"),
            ColumnRef::Index(index) => write!(f, "#{index}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded file
// ---------------------------------------------------------------------------

/// A parsed delimited file, stored column-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Header names in file order. Duplicates are kept positionally.
    columns: Vec<String>,
    /// One value sequence per column, in row order.
    values: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table from headers and column-major values.
    ///
    /// Both sequences must have the same length.
    pub fn from_columns(columns: Vec<String>, values: Vec<Vec<CellValue>>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Table { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values of one column, preserving row order.
    pub fn column_values<'a>(&self, column: impl Into<ColumnRef<'a>>) -> Option<&[CellValue]> {
        let index = match column.into() {
            ColumnRef::Name(name) => self.columns.iter().position(|c| c == name)?,
            ColumnRef::Index(index) => index,
        };
        self.values.get(index).map(Vec::as_slice)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    /// Whether the table has no columns at all.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate `(header, values)` pairs in column order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[CellValue])> {
        self.columns
            .iter()
            .zip(&self.values)
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}
