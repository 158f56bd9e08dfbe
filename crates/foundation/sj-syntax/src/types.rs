//! Primitive types and the compatibility table

use std::fmt;

/// A declared variable or parameter type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    /// `int`
    Int,
    /// `double`
    Double,
    /// `boolean`
    Boolean,
    /// `char`
    Char,
    /// `String`
    String,
}

impl VarType {
    /// Every type, in keyword order
    pub const ALL: [Self; 5] = [
        Self::Int,
        Self::Double,
        Self::Boolean,
        Self::Char,
        Self::String,
    ];

    /// Source keyword for this type
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Char => "char",
            Self::String => "String",
        }
    }

    /// Parse a type keyword; keywords are case sensitive
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.keyword() == keyword)
    }

    /// Whether a value of type `source` may be stored into a slot of type `self`.
    ///
    /// `double` widens from `int`, `boolean` widens from both numeric types;
    /// every other type only accepts itself.
    pub fn accepts(self, source: Self) -> bool {
        match self {
            Self::Double => matches!(source, Self::Int | Self::Double),
            Self::Boolean => matches!(source, Self::Int | Self::Double | Self::Boolean),
            Self::Int | Self::Char | Self::String => self == source,
        }
    }

    /// Types allowed as a condition operand
    pub fn is_condition_operand(self) -> bool {
        matches!(self, Self::Int | Self::Double | Self::Boolean)
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.keyword())
    }
}
