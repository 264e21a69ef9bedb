//! The resource model.
//!
//! Pure values produced by the extractor. Every collection keeps source
//! order; the only keyed collection (`Options::permissions`) is a `BTreeMap`
//! so iteration order never depends on hashing.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// The 14 field kinds a resource can declare.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum FieldType {
    #[serde(rename = "UUID")]
    Uuid,
    String,
    Text,
    Int,
    BigInt,
    Decimal,
    Bool,
    DateTime,
    Date,
    Enum,
    #[serde(rename = "JSON")]
    Json,
    Slug,
    Email,
    #[serde(rename = "URL")]
    Url,
}

impl FieldType {
    /// Every field kind, in declaration order.
    pub const ALL: &'static [FieldType] = &[
        FieldType::Uuid,
        FieldType::String,
        FieldType::Text,
        FieldType::Int,
        FieldType::BigInt,
        FieldType::Decimal,
        FieldType::Bool,
        FieldType::DateTime,
        FieldType::Date,
        FieldType::Enum,
        FieldType::Json,
        FieldType::Slug,
        FieldType::Email,
        FieldType::Url,
    ];

    /// Constructor name in the DSL (`schema.String`, `schema.UUID`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Uuid => "UUID",
            FieldType::String => "String",
            FieldType::Text => "Text",
            FieldType::Int => "Int",
            FieldType::BigInt => "BigInt",
            FieldType::Decimal => "Decimal",
            FieldType::Bool => "Bool",
            FieldType::DateTime => "DateTime",
            FieldType::Date => "Date",
            FieldType::Enum => "Enum",
            FieldType::Json => "JSON",
            FieldType::Slug => "Slug",
            FieldType::Email => "Email",
            FieldType::Url => "URL",
        }
    }

    /// Look up a field kind by its DSL constructor name.
    pub fn from_constructor(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.as_str() == name)
    }

    /// Types stored as text whose length can be bounded with `MaxLen`/`MinLen`.
    pub fn is_string_like(self) -> bool {
        matches!(
            self,
            FieldType::String
                | FieldType::Text
                | FieldType::Slug
                | FieldType::Email
                | FieldType::Url
        )
    }

    /// Types that support greater/less-than predicates as numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldType::Int | FieldType::BigInt | FieldType::Decimal)
    }

    /// Date and time types.
    pub fn is_temporal(self) -> bool {
        matches!(self, FieldType::DateTime | FieldType::Date)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier kinds that may be chained onto a constructor.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum ModifierKind {
    Required,
    Optional,
    PrimaryKey,
    MaxLen,
    MinLen,
    Sortable,
    Filterable,
    Searchable,
    Unique,
    Index,
    Default,
    Immutable,
    Label,
    Placeholder,
    Help,
    OnDelete,
    Visibility,
    Mutability,
    Eager,
}

impl ModifierKind {
    pub const ALL: &'static [ModifierKind] = &[
        ModifierKind::Required,
        ModifierKind::Optional,
        ModifierKind::PrimaryKey,
        ModifierKind::MaxLen,
        ModifierKind::MinLen,
        ModifierKind::Sortable,
        ModifierKind::Filterable,
        ModifierKind::Searchable,
        ModifierKind::Unique,
        ModifierKind::Index,
        ModifierKind::Default,
        ModifierKind::Immutable,
        ModifierKind::Label,
        ModifierKind::Placeholder,
        ModifierKind::Help,
        ModifierKind::OnDelete,
        ModifierKind::Visibility,
        ModifierKind::Mutability,
        ModifierKind::Eager,
    ];

    /// Method name in the DSL.
    pub fn as_str(self) -> &'static str {
        match self {
            ModifierKind::Required => "Required",
            ModifierKind::Optional => "Optional",
            ModifierKind::PrimaryKey => "PrimaryKey",
            ModifierKind::MaxLen => "MaxLen",
            ModifierKind::MinLen => "MinLen",
            ModifierKind::Sortable => "Sortable",
            ModifierKind::Filterable => "Filterable",
            ModifierKind::Searchable => "Searchable",
            ModifierKind::Unique => "Unique",
            ModifierKind::Index => "Index",
            ModifierKind::Default => "Default",
            ModifierKind::Immutable => "Immutable",
            ModifierKind::Label => "Label",
            ModifierKind::Placeholder => "Placeholder",
            ModifierKind::Help => "Help",
            ModifierKind::OnDelete => "OnDelete",
            ModifierKind::Visibility => "Visibility",
            ModifierKind::Mutability => "Mutability",
            ModifierKind::Eager => "Eager",
        }
    }

    /// Look up a modifier by its DSL method name.
    pub fn from_method(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A literal argument value, keeping the kind it was written with.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Tail segment of a qualified DSL constant, e.g. `SetNull`.
    Constant(String),
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) | Literal::Constant(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Name of the literal kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::String(_) => "string",
            Literal::Int(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Bool(_) => "boolean",
            Literal::Constant(_) => "constant",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{s:?}"),
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v}"),
            Literal::Bool(v) => write!(f, "{v}"),
            Literal::Constant(s) => f.write_str(s),
        }
    }
}

/// A chained modifier with its optional argument.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub value: Option<Literal>,
}

impl Modifier {
    pub fn flag(kind: ModifierKind) -> Self {
        Modifier { kind, value: None }
    }

    pub fn with_value(kind: ModifierKind, value: Literal) -> Self {
        Modifier {
            kind,
            value: Some(value),
        }
    }
}

/// A field declared on a resource.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub modifiers: Vec<Modifier>,
    /// Allowed values; non-empty iff `ty` is `Enum`.
    pub enum_values: Vec<String>,
    pub line: u32,
}

impl Field {
    pub fn modifier(&self, kind: ModifierKind) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.kind == kind)
    }

    pub fn has_modifier(&self, kind: ModifierKind) -> bool {
        self.modifier(kind).is_some()
    }

    pub fn modifier_value(&self, kind: ModifierKind) -> Option<&Literal> {
        self.modifier(kind).and_then(|m| m.value.as_ref())
    }

    pub fn is_required(&self) -> bool {
        self.has_modifier(ModifierKind::Required)
    }
}

/// Relationship cardinality.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum RelationshipKind {
    BelongsTo,
    HasMany,
    HasOne,
    ManyToMany,
}

impl RelationshipKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipKind::BelongsTo => "BelongsTo",
            RelationshipKind::HasMany => "HasMany",
            RelationshipKind::HasOne => "HasOne",
            RelationshipKind::ManyToMany => "ManyToMany",
        }
    }

    pub fn from_constructor(name: &str) -> Option<Self> {
        match name {
            "BelongsTo" => Some(RelationshipKind::BelongsTo),
            "HasMany" => Some(RelationshipKind::HasMany),
            "HasOne" => Some(RelationshipKind::HasOne),
            "ManyToMany" => Some(RelationshipKind::ManyToMany),
            _ => None,
        }
    }
}

/// Referential action for a foreign key.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize)]
pub enum OnDeleteAction {
    Cascade,
    SetNull,
    Restrict,
    #[default]
    NoAction,
}

impl OnDeleteAction {
    pub fn from_constant(name: &str) -> Option<Self> {
        match name {
            "Cascade" => Some(OnDeleteAction::Cascade),
            "SetNull" => Some(OnDeleteAction::SetNull),
            "Restrict" => Some(OnDeleteAction::Restrict),
            "NoAction" => Some(OnDeleteAction::NoAction),
            _ => None,
        }
    }

    /// SQL spelling, as used in `ON DELETE` clauses.
    pub fn sql(self) -> &'static str {
        match self {
            OnDeleteAction::Cascade => "CASCADE",
            OnDeleteAction::SetNull => "SET_NULL",
            OnDeleteAction::Restrict => "RESTRICT",
            OnDeleteAction::NoAction => "NO_ACTION",
        }
    }
}

/// An association to another table.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Relationship {
    /// Logical association name (`Category`), not a column name.
    pub name: String,
    pub kind: RelationshipKind,
    pub table: String,
    pub on_delete: OnDeleteAction,
    pub optional: bool,
    pub eager: bool,
    pub line: u32,
}

/// CRUD operations that permissions can be attached to.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    List,
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: &'static [Operation] = &[
        Operation::List,
        Operation::Read,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.as_str() == name)
    }
}

/// A background job enqueued from a lifecycle hook.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct JobRef {
    pub kind: String,
    pub queue: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct Hooks {
    pub after_create: Vec<JobRef>,
    pub after_update: Vec<JobRef>,
}

impl Hooks {
    pub fn is_empty(&self) -> bool {
        self.after_create.is_empty() && self.after_update.is_empty()
    }
}

/// Resource-wide switches, permissions and hooks.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct Options {
    pub soft_delete: bool,
    pub auditable: bool,
    pub tenant_scoped: bool,
    pub searchable: bool,
    pub permissions: BTreeMap<Operation, BTreeSet<String>>,
    pub hooks: Hooks,
}

/// A resource: one `Define` call.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Resource {
    pub name: String,
    pub fields: Vec<Field>,
    pub relationships: Vec<Relationship>,
    pub options: Options,
    pub has_timestamps: bool,
    pub file: PathBuf,
    pub line: u32,
}

impl Resource {
    /// An empty resource, as produced by `Define("Name")`.
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>, line: u32) -> Self {
        Resource {
            name: name.into(),
            fields: Vec::new(),
            relationships: Vec::new(),
            options: Options::default(),
            has_timestamps: false,
            file: file.into(),
            line,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The field acting as primary key: `PrimaryKey()` wins, then a UUID `ID`.
    pub fn primary_key(&self) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.has_modifier(ModifierKind::PrimaryKey))
            .or_else(|| {
                self.fields
                    .iter()
                    .find(|f| f.name == "ID" && f.ty == FieldType::Uuid)
            })
    }
}
