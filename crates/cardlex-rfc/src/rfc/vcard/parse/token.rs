//! vCard token types.

/// The kind of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Name,
    Param,
    Value,
}

/// A property name: everything before the first `;` or `:` of a logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameToken {
    pub name: Vec<u8>,
}

/// A single parameter of the current property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamToken {
    pub name: Vec<u8>,
    /// `None` when the parameter has no `=`; `Some(b"")` for `NAME=`.
    pub value: Option<Vec<u8>>,
}

/// One physical line of a property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueToken {
    /// Raw line content including its line terminator, if any.
    pub value: Vec<u8>,
    /// Whether the value is folded onto the next physical line.
    pub continues: bool,
}

/// A structural token of a vCard stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Name(NameToken),
    Param(ParamToken),
    Value(ValueToken),
}

impl Token {
    /// Creates a name token.
    #[must_use]
    pub fn name(name: impl Into<Vec<u8>>) -> Self {
        Self::Name(NameToken { name: name.into() })
    }

    /// Creates a parameter token without a value.
    #[must_use]
    pub fn flag(name: impl Into<Vec<u8>>) -> Self {
        Self::Param(ParamToken {
            name: name.into(),
            value: None,
        })
    }

    /// Creates a parameter token with a value.
    #[must_use]
    pub fn param(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self::Param(ParamToken {
            name: name.into(),
            value: Some(value.into()),
        })
    }

    /// Creates a value token.
    #[must_use]
    pub fn value(value: impl Into<Vec<u8>>, continues: bool) -> Self {
        Self::Value(ValueToken {
            value: value.into(),
            continues,
        })
    }

    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Name(_) => TokenKind::Name,
            Self::Param(_) => TokenKind::Param,
            Self::Value(_) => TokenKind::Value,
        }
    }
}
