//! Data model for the staff directory
//!
//! An `Official` is one entry in the directory: a person and the position
//! they hold. Every field is optional on the wire; accessors hand back `""`
//! for absent text so display and search code never has to special-case it.
//!
//! The JSON keys are the Spanish names used by the published directory file
//! (`nombre`, `cargo`, `dependencia`, ...). Keys this type doesn't know about
//! are kept in `extra` so an import followed by an export loses nothing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::UnknownValue;

/// Rank used for records without an explicit `orden`
pub const DEFAULT_RANK: i64 = 999;

/// Key under which a non-object array element is kept
pub const RAW_VALUE_KEY: &str = "valor";

/// Placeholder some entries carry in their name until the data is filled in
const NAME_PLACEHOLDER: &str = "(completar)";

/// One staff member or position in the directory
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Official {
    /// Stable identity key
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Full name
    #[serde(
        rename = "nombre",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// Position or title
    #[serde(
        rename = "cargo",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<String>,
    /// Department the position belongs to
    #[serde(
        rename = "dependencia",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub department: Option<String>,
    /// Grouping label used by the category filter
    #[serde(
        rename = "categoria",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        rename = "telefono",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    /// Photo reference; empty means no photo
    #[serde(
        rename = "foto",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo: Option<String>,
    /// Term of office, display only
    #[serde(
        rename = "periodo",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub term: Option<String>,
    /// Office location, display only
    #[serde(
        rename = "ubicacion",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    /// Priority rank; lower sorts first
    #[serde(
        rename = "orden",
        default,
        deserialize_with = "lenient::rank",
        skip_serializing_if = "Option::is_none"
    )]
    pub rank: Option<i64>,
    /// Fields not modelled above, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Official {
    /// Create a record with an explicit id and name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Read one element of a directory array
    ///
    /// Never fails: mistyped fields are coerced or dropped by the field
    /// decoders, and an element that isn't an object becomes an empty record
    /// holding the raw value under `valor`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => match serde_json::from_value(Value::Object(map.clone())) {
                Ok(official) => official,
                Err(_) => Self {
                    extra: map,
                    ..Self::default()
                },
            },
            other => {
                let mut extra = Map::new();
                extra.insert(RAW_VALUE_KEY.to_string(), other);
                Self {
                    extra,
                    ..Self::default()
                }
            }
        }
    }

    /// Key used to deduplicate records when merging
    ///
    /// The `id` when present and non-empty, otherwise `name-position`.
    /// The fallback is not guaranteed to be unique.
    pub fn identity_key(&self) -> String {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("{}-{}", self.name(), self.position()),
        }
    }

    /// Rank used for the default ordering
    pub fn priority(&self) -> i64 {
        self.rank.unwrap_or(DEFAULT_RANK)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn position(&self) -> &str {
        self.position.as_deref().unwrap_or("")
    }

    pub fn department(&self) -> &str {
        self.department.as_deref().unwrap_or("")
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    pub fn phone(&self) -> &str {
        self.phone.as_deref().unwrap_or("")
    }

    pub fn whatsapp(&self) -> &str {
        self.whatsapp.as_deref().unwrap_or("")
    }

    pub fn photo(&self) -> &str {
        self.photo.as_deref().unwrap_or("")
    }

    pub fn term(&self) -> &str {
        self.term.as_deref().unwrap_or("")
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    /// Whether the record has a photo to show
    pub fn has_photo(&self) -> bool {
        !self.photo().is_empty()
    }

    /// Number used for chat links: `whatsapp`, falling back to `telefono`
    pub fn chat_number(&self) -> &str {
        match self.whatsapp() {
            "" => self.phone(),
            number => number,
        }
    }

    /// Avatar initials for records without a photo
    ///
    /// Drops the `(Completar)` placeholder (any case), then takes the first
    /// letter of each of the first three words, upper-cased.
    pub fn initials(&self) -> String {
        let cleaned = strip_placeholder(self.name());
        cleaned
            .split_whitespace()
            .take(3)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Raw value of a single field, `""` when absent
    pub fn field(&self, field: Field) -> String {
        match field {
            Field::Id => self.id.clone().unwrap_or_default(),
            Field::Name => self.name().to_string(),
            Field::Position => self.position().to_string(),
            Field::Department => self.department().to_string(),
            Field::Category => self.category().to_string(),
            Field::Email => self.email().to_string(),
            Field::Phone => self.phone().to_string(),
            Field::Whatsapp => self.whatsapp().to_string(),
            Field::Photo => self.photo().to_string(),
            Field::Term => self.term().to_string(),
            Field::Location => self.location().to_string(),
            Field::Rank => self.rank.map(|r| r.to_string()).unwrap_or_default(),
        }
    }
}

/// Remove every case-insensitive occurrence of the name placeholder
fn strip_placeholder(name: &str) -> String {
    // ASCII folding keeps byte offsets identical to `name`
    let lower = name.to_ascii_lowercase();
    let mut out = String::with_capacity(name.len());
    let mut rest = 0;
    for (start, _) in lower.match_indices(NAME_PLACEHOLDER) {
        out.push_str(&name[rest..start]);
        rest = start + NAME_PLACEHOLDER.len();
    }
    out.push_str(&name[rest..]);
    out
}

/// Field decoders that accept whatever the published file happens to carry
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::{Number, Value};

    /// Strings as-is, numbers and booleans in their JSON spelling, anything
    /// else absent
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    /// Integers, floats (truncated) and numeric strings; anything else absent
    pub fn rank<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => number_rank(&n),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(float_rank))
            }
            _ => None,
        })
    }

    fn number_rank(n: &Number) -> Option<i64> {
        n.as_i64().or_else(|| n.as_f64().and_then(float_rank))
    }

    fn float_rank(f: f64) -> Option<i64> {
        f.is_finite().then(|| f.trunc() as i64)
    }
}

/// A single addressable field of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Position,
    Department,
    Category,
    Email,
    Phone,
    Whatsapp,
    Photo,
    Term,
    Location,
    Rank,
}

impl Field {
    const EXPECTED: &'static str =
        "id, name, position, department, category, email, phone, whatsapp, photo, term, location, rank";
}

impl FromStr for Field {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(Field::Id),
            "name" | "nombre" => Ok(Field::Name),
            "position" | "cargo" => Ok(Field::Position),
            "department" | "dependencia" => Ok(Field::Department),
            "category" | "categoria" => Ok(Field::Category),
            "email" => Ok(Field::Email),
            "phone" | "telefono" => Ok(Field::Phone),
            "whatsapp" => Ok(Field::Whatsapp),
            "photo" | "foto" => Ok(Field::Photo),
            "term" | "periodo" => Ok(Field::Term),
            "location" | "ubicacion" => Ok(Field::Location),
            "rank" | "orden" => Ok(Field::Rank),
            _ => Err(UnknownValue {
                kind: "field",
                value: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Position => "position",
            Field::Department => "department",
            Field::Category => "category",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Whatsapp => "whatsapp",
            Field::Photo => "photo",
            Field::Term => "term",
            Field::Location => "location",
            Field::Rank => "rank",
        };
        write!(f, "{}", name)
    }
}
