use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Unit identifier. The backend sends either strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OrgUnitId(pub String);

impl OrgUnitId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrgUnitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for OrgUnitId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => Self(text),
            RawId::Int(n) => Self(n.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for OrgUnitId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(Into::into)
    }
}

fn deserialize_parent<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<OrgUnitId>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(OrgUnitId::from)
        .filter(|id| !id.0.is_empty()))
}

fn deserialize_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_children<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<OrgUnit>, D::Error> {
    Ok(Option::<Vec<OrgUnit>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A node in the government organization hierarchy, as served by the
/// backend. `children` is the materialized inverse of `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgUnit {
    pub id: OrgUnitId,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub code: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name_th: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name_en: String,
    /// Raw level tag; see [`OrgUnit::org_level`].
    #[serde(default, deserialize_with = "deserialize_text")]
    pub level: String,
    #[serde(default, deserialize_with = "deserialize_parent")]
    pub parent_id: Option<OrgUnitId>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub user_count: u32,
    #[serde(default, deserialize_with = "deserialize_children")]
    pub children: Vec<OrgUnit>,
}

impl OrgUnit {
    pub fn new(id: &str, level: &str, name_th: &str) -> Self {
        Self {
            id: OrgUnitId::from(id),
            code: String::new(),
            name_th: name_th.to_string(),
            name_en: String::new(),
            level: level.to_string(),
            parent_id: None,
            user_count: 0,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<OrgUnit>) -> Self {
        self.children = children;
        self
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent_id = Some(OrgUnitId::from(parent));
        self
    }

    pub fn with_users(mut self, user_count: u32) -> Self {
        self.user_count = user_count;
        self
    }

    pub fn org_level(&self) -> Option<OrgLevel> {
        OrgLevel::parse(&self.level)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Badge color of a level. Anything unrecognized is gray.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BadgeColor {
    Purple,
    Blue,
    Green,
    Yellow,
    Orange,
    #[default]
    Gray,
}

/// Hierarchy level, top (`Ministry`) to bottom (`Unit`). Ordering follows
/// rank, so `Ministry < Unit`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrgLevel {
    Ministry,
    Department,
    Bureau,
    Division,
    Section,
    Unit,
}

struct LevelStyle {
    color: BadgeColor,
    label_th: &'static str,
    label_en: &'static str,
}

const LEVEL_STYLES: [LevelStyle; 6] = [
    LevelStyle {
        color: BadgeColor::Purple,
        label_th: "กระทรวง",
        label_en: "Ministry",
    },
    LevelStyle {
        color: BadgeColor::Blue,
        label_th: "กรม",
        label_en: "Department",
    },
    LevelStyle {
        color: BadgeColor::Green,
        label_th: "สำนัก",
        label_en: "Bureau",
    },
    LevelStyle {
        color: BadgeColor::Yellow,
        label_th: "กอง",
        label_en: "Division",
    },
    LevelStyle {
        color: BadgeColor::Orange,
        label_th: "ฝ่าย",
        label_en: "Section",
    },
    LevelStyle {
        color: BadgeColor::Gray,
        label_th: "หน่วย",
        label_en: "Unit",
    },
];

impl OrgLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    /// Zero for ministries, growing toward units.
    pub fn rank(self) -> usize {
        self as usize
    }

    fn style(self) -> &'static LevelStyle {
        &LEVEL_STYLES[self.rank()]
    }

    pub fn color(self) -> BadgeColor {
        self.style().color
    }

    pub fn label_th(self) -> &'static str {
        self.style().label_th
    }

    pub fn label_en(self) -> &'static str {
        self.style().label_en
    }
}

/// Badge color for a raw level tag.
pub fn level_color(raw: &str) -> BadgeColor {
    OrgLevel::parse(raw).map_or(BadgeColor::Gray, OrgLevel::color)
}
