//! Organization tree: building the nested forest and flattening it into
//! display rows.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::unit::{BadgeColor, OrgLevel, OrgUnit, OrgUnitId, level_color};
use crate::error::TreeError;
use crate::preferences::Language;

/// Horizontal indent per depth level, in display units.
pub const INDENT_STEP: usize = 20;

/// One visual row of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub id: OrgUnitId,
    pub code: String,
    pub name: String,
    pub depth: usize,
    pub indent: usize,
    /// Shows the expand chevron; leaves keep a blank placeholder instead.
    pub expandable: bool,
    pub color: BadgeColor,
    pub badge: String,
    pub user_count: u32,
    pub user_label: String,
}

fn badge_text(raw_level: &str, language: Language) -> String {
    match (OrgLevel::parse(raw_level), language) {
        (Some(level), Language::Th) => level.label_th().to_string(),
        (Some(level), Language::En) => level.label_en().to_string(),
        (None, _) => raw_level.trim().to_string(),
    }
}

fn display_name(unit: &OrgUnit, language: Language) -> String {
    match language {
        Language::En if !unit.name_en.trim().is_empty() => unit.name_en.clone(),
        _ => unit.name_th.clone(),
    }
}

fn user_label(count: u32, language: Language) -> String {
    match language {
        Language::Th => format!("{count} คน"),
        Language::En => crate::utils::text::pluralize(count as usize, "user", "users"),
    }
}

fn render_node(
    unit: &OrgUnit,
    depth: usize,
    language: Language,
    visited: &mut HashSet<OrgUnitId>,
    rows: &mut Vec<TreeRow>,
) -> Result<(), TreeError> {
    if !visited.insert(unit.id.clone()) {
        tracing::warn!(unit = %unit.id, depth, "org tree revisits a unit, aborting render");
        return Err(TreeError::Cycle {
            id: unit.id.to_string(),
        });
    }

    rows.push(TreeRow {
        id: unit.id.clone(),
        code: unit.code.clone(),
        name: display_name(unit, language),
        depth,
        indent: depth * INDENT_STEP,
        expandable: !unit.children.is_empty(),
        color: level_color(&unit.level),
        badge: badge_text(&unit.level, language),
        user_count: unit.user_count,
        user_label: user_label(unit.user_count, language),
    });

    for child in &unit.children {
        render_node(child, depth + 1, language, visited, rows)?;
    }
    Ok(())
}

/// Flatten a forest into pre-order rows: each sibling is followed by its
/// own subtree before the next sibling.
pub fn render_rows(forest: &[OrgUnit], language: Language) -> Result<Vec<TreeRow>, TreeError> {
    let mut rows = Vec::new();
    let mut visited = HashSet::new();
    for root in forest {
        render_node(root, 0, language, &mut visited, &mut rows)?;
    }
    Ok(rows)
}

pub fn count_nodes(forest: &[OrgUnit]) -> usize {
    forest
        .iter()
        .map(|unit| 1 + count_nodes(&unit.children))
        .sum()
}

/// True when the forest looks like a flat list that still needs nesting.
pub fn is_flat(units: &[OrgUnit]) -> bool {
    units.iter().all(|u| u.children.is_empty()) && units.iter().any(|u| u.parent_id.is_some())
}

fn flatten_into(mut unit: OrgUnit, parent: Option<&OrgUnitId>, out: &mut Vec<OrgUnit>) {
    if unit.parent_id.is_none() {
        unit.parent_id = parent.cloned();
    }
    let children = std::mem::take(&mut unit.children);
    let id = unit.id.clone();
    out.push(unit);
    for child in children {
        flatten_into(child, Some(&id), out);
    }
}

/// Nest units by `parent_id`. Sibling order follows input order; units
/// whose parent is unknown become roots.
pub fn build_forest(units: Vec<OrgUnit>) -> Result<Vec<OrgUnit>, TreeError> {
    let mut flat = Vec::with_capacity(units.len());
    for unit in units {
        flatten_into(unit, None, &mut flat);
    }

    let mut index: HashMap<OrgUnitId, usize> = HashMap::with_capacity(flat.len());
    for (pos, unit) in flat.iter().enumerate() {
        if index.insert(unit.id.clone(), pos).is_some() {
            return Err(TreeError::DuplicateId {
                id: unit.id.to_string(),
            });
        }
    }

    // Walk each parent chain once; a chain that returns to its start loops.
    for unit in &flat {
        let mut seen = HashSet::new();
        let mut cursor = Some(&unit.id);
        while let Some(id) = cursor {
            if !seen.insert(id) {
                return Err(TreeError::Cycle { id: id.to_string() });
            }
            cursor = index
                .get(id)
                .and_then(|&pos| flat[pos].parent_id.as_ref())
                .filter(|parent| index.contains_key(*parent));
        }
    }

    let mut children_of: HashMap<OrgUnitId, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (pos, unit) in flat.iter().enumerate() {
        match &unit.parent_id {
            Some(parent) if index.contains_key(parent) => {
                children_of.entry(parent.clone()).or_default().push(pos);
            }
            Some(parent) => {
                tracing::warn!(unit = %unit.id, parent = %parent, "parent not found, treating unit as root");
                roots.push(pos);
            }
            None => roots.push(pos),
        }
    }

    let mut slots: Vec<Option<OrgUnit>> = flat.into_iter().map(Some).collect();
    Ok(roots
        .into_iter()
        .filter_map(|pos| assemble(pos, &mut slots, &children_of))
        .collect())
}

fn assemble(
    pos: usize,
    slots: &mut [Option<OrgUnit>],
    children_of: &HashMap<OrgUnitId, Vec<usize>>,
) -> Option<OrgUnit> {
    let mut unit = slots[pos].take()?;
    if let Some(child_positions) = children_of.get(&unit.id) {
        unit.children = child_positions
            .iter()
            .filter_map(|&child| assemble(child, slots, children_of))
            .collect();
    }
    Some(unit)
}

/// Aggregate counts for the overview screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub total_units: usize,
    pub total_users: u64,
    /// Indexed by [`OrgLevel::rank`].
    pub per_level: [usize; 6],
    pub unclassified: usize,
}

impl TreeStats {
    pub fn collect(forest: &[OrgUnit]) -> Self {
        let mut stats = Self::default();
        stats.add_all(forest);
        stats
    }

    fn add_all(&mut self, units: &[OrgUnit]) {
        for unit in units {
            self.total_units += 1;
            self.total_users += u64::from(unit.user_count);
            match unit.org_level() {
                Some(level) => self.per_level[level.rank()] += 1,
                None => self.unclassified += 1,
            }
            self.add_all(&unit.children);
        }
    }

    pub fn count(&self, level: OrgLevel) -> usize {
        self.per_level[level.rank()]
    }
}
