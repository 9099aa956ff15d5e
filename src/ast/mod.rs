pub mod builders;
pub mod expr;
pub mod normalize;
pub mod operators;
pub mod options;
pub mod predicate;
pub mod query;
pub mod schema;
pub mod values;

pub use self::expr::{Attribute, Expr, OrderBy};
pub use self::operators::{
    ArithmeticOp, IndexHintKind, LogicalOp, Operator, ReferentialAction,
};
pub use self::options::{
    DeleteOptions, DuplicateHandling, InsertOptions, Row, UpdateOptions, row,
};
pub use self::predicate::{Predicate, Reach};
pub use self::query::{IndexHint, SelectQuery, TableMeta};
pub use self::schema::{
    ColumnDefinition, DatabaseOptions, DropTableOptions, References, TableOptions, UniqueKey,
};
pub use self::values::Value;
