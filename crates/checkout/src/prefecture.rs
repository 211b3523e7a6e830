//! Prefecture reference data.
//!
//! The address form offers prefectures through a selection widget whose first
//! entry is a "not selected" placeholder. The catalog is injected into the
//! validator; nothing in this crate keeps a global registry.

use core::str::FromStr;
use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use furima_core::{DomainError, DomainResult, ValueObject};

/// Identifier of a prefecture entry in the selection list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefectureId(pub u16);

impl ValueObject for PrefectureId {}

impl core::fmt::Display for PrefectureId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PrefectureId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("PrefectureId: {e}")))
    }
}

impl PrefectureId {
    /// Parse a raw form selection. A blank value means nothing was selected.
    pub fn parse_selection(raw: &str) -> DomainResult<Option<Self>> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some)
    }
}

/// Serde helper for form payloads.
///
/// Accepts a number, a numeric string, `""` or `null`. Anything that does not
/// name a prefecture id (letters, negative or oversized numbers, other JSON
/// types) reads as no selection, so the validator reports it together with
/// every other field instead of the whole payload being rejected.
pub fn deserialize_selection<'de, D>(deserializer: D) -> Result<Option<PrefectureId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSelection {
        Integer(i64),
        Text(String),
        Other(IgnoredAny),
    }

    let selection = match Option::<RawSelection>::deserialize(deserializer)? {
        None | Some(RawSelection::Other(_)) => None,
        Some(RawSelection::Integer(n)) => u16::try_from(n).ok().map(PrefectureId),
        Some(RawSelection::Text(s)) => PrefectureId::parse_selection(&s).ok().flatten(),
    };
    Ok(selection)
}

/// One selectable entry of a [`PrefectureTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefectureEntry {
    pub id: PrefectureId,
    pub name: String,
}

/// Serializable form of a [`PrefectureCatalog`], used by configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefectureTable {
    pub unselected: PrefectureId,
    pub entries: Vec<PrefectureEntry>,
}

/// Immutable prefecture lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefectureCatalog {
    unselected: PrefectureId,
    entries: BTreeMap<PrefectureId, String>,
}

/// JIS X 0401 order; ids 1..=47.
const JAPAN_PREFECTURES: [&str; 47] = [
    "北海道", "青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県", "茨城県",
    "栃木県", "群馬県", "埼玉県", "千葉県", "東京都", "神奈川県", "新潟県", "富山県",
    "石川県", "福井県", "山梨県", "長野県", "岐阜県", "静岡県", "愛知県", "三重県",
    "滋賀県", "京都府", "大阪府", "兵庫県", "奈良県", "和歌山県", "鳥取県", "島根県",
    "岡山県", "広島県", "山口県", "徳島県", "香川県", "愛媛県", "高知県", "福岡県",
    "佐賀県", "長崎県", "熊本県", "大分県", "宮崎県", "鹿児島県", "沖縄県",
];

impl PrefectureCatalog {
    /// Build a catalog from a sentinel and the selectable entries.
    ///
    /// The sentinel may not appear among the entries and ids must be unique.
    pub fn new<I, S>(unselected: PrefectureId, entries: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (PrefectureId, S)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (id, name) in entries {
            if id == unselected {
                return Err(DomainError::invariant(format!(
                    "prefecture {id} is reserved as the unselected value"
                )));
            }
            if map.insert(id, name.into()).is_some() {
                return Err(DomainError::validation(format!(
                    "duplicate prefecture id {id}"
                )));
            }
        }

        Ok(Self {
            unselected,
            entries: map,
        })
    }

    /// The standard Japanese table: `0` is the placeholder, `1..=47` are the
    /// prefectures.
    pub fn japan() -> Self {
        let entries = JAPAN_PREFECTURES
            .iter()
            .zip(1u16..)
            .map(|(name, id)| (PrefectureId(id), (*name).to_string()))
            .collect();

        Self {
            unselected: PrefectureId(0),
            entries,
        }
    }

    pub fn unselected(&self) -> PrefectureId {
        self.unselected
    }

    /// Whether `id` names a real, selectable prefecture.
    pub fn is_selectable(&self, id: PrefectureId) -> bool {
        id != self.unselected && self.entries.contains_key(&id)
    }

    pub fn name(&self, id: PrefectureId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Selectable entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PrefectureId, &str)> {
        self.entries.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_table(&self) -> PrefectureTable {
        PrefectureTable {
            unselected: self.unselected,
            entries: self
                .iter()
                .map(|(id, name)| PrefectureEntry {
                    id,
                    name: name.to_string(),
                })
                .collect(),
        }
    }
}

impl Default for PrefectureCatalog {
    fn default() -> Self {
        Self::japan()
    }
}

impl TryFrom<PrefectureTable> for PrefectureCatalog {
    type Error = DomainError;

    fn try_from(table: PrefectureTable) -> Result<Self, Self::Error> {
        Self::new(
            table.unselected,
            table.entries.into_iter().map(|entry| (entry.id, entry.name)),
        )
    }
}
