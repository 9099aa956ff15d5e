use serde::{Deserialize, Serialize};

/// Logical combinator between predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

impl LogicalOp {
    /// Joiner placed between compiled children.
    pub fn joiner(&self) -> &'static str {
        match self {
            LogicalOp::And => " AND ",
            LogicalOp::Or => " OR ",
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (=), IS NULL against null
    Eq,
    /// Not equal (!=), IS NOT NULL against null
    Ne,
    /// Negation: IS NOT for null/booleans, != otherwise
    Not,
    /// IS (null or boolean only)
    Is,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
    /// IN list
    In,
    /// NOT IN list
    NotIn,
    /// LIKE pattern match
    Like,
    /// NOT LIKE pattern match
    NotLike,
    /// ILIKE case-insensitive pattern match (Postgres)
    ILike,
    /// NOT ILIKE case-insensitive pattern match (Postgres)
    NotILike,
    /// Regular expression match
    Regexp,
    /// Negated regular expression match
    NotRegexp,
    /// Case-insensitive regular expression match (Postgres)
    IRegexp,
    /// Negated case-insensitive regular expression match (Postgres)
    NotIRegexp,
    /// BETWEEN x AND y (value is a two-element array)
    Between,
    /// NOT BETWEEN x AND y
    NotBetween,
}

impl Operator {
    /// Tag used in JSON descriptors and error messages.
    pub fn tag(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Not => "not",
            Operator::Is => "is",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
            Operator::NotIn => "notIn",
            Operator::Like => "like",
            Operator::NotLike => "notLike",
            Operator::ILike => "iLike",
            Operator::NotILike => "notILike",
            Operator::Regexp => "regexp",
            Operator::NotRegexp => "notRegexp",
            Operator::IRegexp => "iRegexp",
            Operator::NotIRegexp => "notIRegexp",
            Operator::Between => "between",
            Operator::NotBetween => "notBetween",
        }
    }

    /// Inverse of [`Operator::tag`]. A leading `$` is accepted.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.strip_prefix('$').unwrap_or(tag);
        let op = match tag {
            "eq" => Operator::Eq,
            "ne" => Operator::Ne,
            "not" => Operator::Not,
            "is" => Operator::Is,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "in" => Operator::In,
            "notIn" => Operator::NotIn,
            "like" => Operator::Like,
            "notLike" => Operator::NotLike,
            "iLike" => Operator::ILike,
            "notILike" => Operator::NotILike,
            "regexp" => Operator::Regexp,
            "notRegexp" => Operator::NotRegexp,
            "iRegexp" => Operator::IRegexp,
            "notIRegexp" => Operator::NotIRegexp,
            "between" => Operator::Between,
            "notBetween" => Operator::NotBetween,
            _ => return None,
        };
        Some(op)
    }

    /// Returns true if the right side is a list rather than a scalar.
    pub fn takes_list(&self) -> bool {
        matches!(
            self,
            Operator::In | Operator::NotIn | Operator::Between | Operator::NotBetween
        )
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Arithmetic used by increment/decrement updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithmeticOp {
    Add,
    Sub,
}

impl std::fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithmeticOp::Add => write!(f, "+"),
            ArithmeticOp::Sub => write!(f, "-"),
        }
    }
}

/// Index hint kinds (MySQL family).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexHintKind {
    Use,
    Force,
    Ignore,
}

impl IndexHintKind {
    /// Case-insensitive lookup; unknown kinds yield `None`.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.to_ascii_uppercase().as_str() {
            "USE" => Some(IndexHintKind::Use),
            "FORCE" => Some(IndexHintKind::Force),
            "IGNORE" => Some(IndexHintKind::Ignore),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            IndexHintKind::Use => "USE",
            IndexHintKind::Force => "FORCE",
            IndexHintKind::Ignore => "IGNORE",
        }
    }
}

/// Foreign key ON DELETE / ON UPDATE action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferentialAction {
    Cascade,
    SetNull,
    SetDefault,
    Restrict,
    NoAction,
}

impl std::fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferentialAction::Cascade => write!(f, "CASCADE"),
            ReferentialAction::SetNull => write!(f, "SET NULL"),
            ReferentialAction::SetDefault => write!(f, "SET DEFAULT"),
            ReferentialAction::Restrict => write!(f, "RESTRICT"),
            ReferentialAction::NoAction => write!(f, "NO ACTION"),
        }
    }
}
