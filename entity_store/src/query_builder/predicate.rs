use type_mapping::SqlValue;

/// WHERE condition text plus the values bound to its placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    text: String,
    params: Vec<SqlValue>,
}

impl Predicate {
    /// Caller-supplied condition, passed through verbatim.
    ///
    /// The text is the caller's responsibility: it is not parsed, escaped or validated.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    /// `<column> = ?` with the value bound
    pub fn equals(column: &str, value: impl Into<SqlValue>) -> Self {
        Self {
            text: format!("{} = ?", column),
            params: vec![value.into()],
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<&str> for Predicate {
    fn from(text: &str) -> Self {
        Predicate::raw(text)
    }
}

impl From<String> for Predicate {
    fn from(text: String) -> Self {
        Predicate::raw(text)
    }
}
