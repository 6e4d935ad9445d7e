use std::fmt;
use std::num::NonZeroU32;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::ArticleStub;

/// Server-issued page position. Always positive; a fresh query starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(NonZeroU32);

impl Cursor {
    pub const FIRST: Cursor = Cursor(NonZeroU32::MIN);

    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Cursor)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of search results as returned by `/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<ArticleStub>,
    #[serde(
        default,
        deserialize_with = "deserialize_next_cursor",
        serialize_with = "serialize_next_cursor"
    )]
    pub next_cursor: Option<Cursor>,
}

impl Page {
    pub fn new(items: Vec<ArticleStub>, next_cursor: Option<Cursor>) -> Self {
        Self { items, next_cursor }
    }
}

/// The backend sends `nextCursor` as a numeric string, but a bare integer is
/// accepted too. `null`, absence and `""` all mean there is no next page.
fn deserialize_next_cursor<'de, D>(deserializer: D) -> Result<Option<Cursor>, D::Error>
where
    D: Deserializer<'de>,
{
    struct NextCursorVisitor;

    impl<'de> Visitor<'de> for NextCursorVisitor {
        type Value = Option<Cursor>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a positive integer cursor, a numeric string, or null")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            u32::try_from(value)
                .ok()
                .and_then(Cursor::new)
                .map(Some)
                .ok_or_else(|| E::custom(format!("cursor {value} out of range")))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            match u64::try_from(value) {
                Ok(value) => self.visit_u64(value),
                Err(_) => Err(E::custom(format!("negative cursor {value}"))),
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            let parsed: u64 = trimmed
                .parse()
                .map_err(|_| E::custom(format!("non-numeric cursor {value:?}")))?;
            self.visit_u64(parsed)
        }
    }

    deserializer.deserialize_option(NextCursorVisitor)
}

fn serialize_next_cursor<S>(cursor: &Option<Cursor>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match cursor {
        Some(cursor) => serializer.serialize_str(&cursor.to_string()),
        None => serializer.serialize_none(),
    }
}
