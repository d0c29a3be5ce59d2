//! Selection of SAPs, beams and Stokes components to show.
//!
//! Selector strings are interpreted exactly once, when the CLI arguments are
//! parsed; the traversal only ever sees the tagged variants. SAP and beam
//! selectors are index-based, the Stokes selector matches datasets by their
//! component name ("I", "Q", ...).

use std::collections::BTreeSet;

use crate::error::BfError;

/// Index-based selector for SAPs and beams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Visit every available index.
    All,
    /// Visit a single index, even if it turns out not to exist.
    One(usize),
    /// Visit a set of indices in ascending order.
    Many(BTreeSet<usize>),
}

/// One entry of a selector's visiting plan.
///
/// Unselected indices are still part of the plan: they produce a
/// "not selected" placeholder so the overall tree shape stays visible,
/// but they are never descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub nr: usize,
    pub selected: bool,
}

impl Selector {
    /// Parse a selector string: `all`, a single index, or a comma-separated
    /// list with optional brackets (`1,3` or `[1,3]`).
    pub fn parse(s: &str) -> Result<Self, BfError> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Selector::All);
        }
        let body = strip_brackets(trimmed);
        if body.is_empty() {
            return Err(BfError::InvalidSelector(s.to_string()));
        }
        if body.contains(',') {
            let mut ids = BTreeSet::new();
            for part in body.split(',') {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                let id = part
                    .parse()
                    .map_err(|_| BfError::InvalidSelector(s.to_string()))?;
                ids.insert(id);
            }
            if ids.is_empty() {
                return Err(BfError::InvalidSelector(s.to_string()));
            }
            Ok(Selector::Many(ids))
        } else {
            let id = body
                .parse()
                .map_err(|_| BfError::InvalidSelector(s.to_string()))?;
            Ok(Selector::One(id))
        }
    }

    /// Whether the given index should be descended into.
    pub fn selects(&self, nr: usize) -> bool {
        match self {
            Selector::All => true,
            Selector::One(id) => *id == nr,
            Selector::Many(ids) => ids.contains(&nr),
        }
    }

    /// The visiting plan against `available` children: every index in
    /// `0..available`, plus any explicitly selected out-of-range index (those
    /// resolve to an "absent" placeholder downstream), ascending, no
    /// duplicates.
    pub fn visits(&self, available: usize) -> Vec<Visit> {
        let mut nrs: BTreeSet<usize> = (0..available).collect();
        match self {
            Selector::All => {}
            Selector::One(id) => {
                nrs.insert(*id);
            }
            Selector::Many(ids) => nrs.extend(ids.iter().copied()),
        }
        nrs.into_iter()
            .map(|nr| Visit {
                nr,
                selected: self.selects(nr),
            })
            .collect()
    }
}

/// Name-based selector for Stokes components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StokesSelector {
    All,
    One(String),
    Many(BTreeSet<String>),
}

impl StokesSelector {
    /// Parse a component selector: `all`, a single component name, or a
    /// comma-separated list with optional brackets (`I,Q` or `[I,Q]`).
    /// Matching is exact and case-sensitive.
    pub fn parse(s: &str) -> Result<Self, BfError> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(StokesSelector::All);
        }
        let body = strip_brackets(trimmed);
        if body.is_empty() {
            return Err(BfError::InvalidStokesSelector(s.to_string()));
        }
        if body.contains(',') {
            let mut names = BTreeSet::new();
            for part in body.split(',') {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                if !is_component_name(part) {
                    return Err(BfError::InvalidStokesSelector(s.to_string()));
                }
                names.insert(part.to_string());
            }
            if names.is_empty() {
                return Err(BfError::InvalidStokesSelector(s.to_string()));
            }
            Ok(StokesSelector::Many(names))
        } else {
            if !is_component_name(body) {
                return Err(BfError::InvalidStokesSelector(s.to_string()));
            }
            Ok(StokesSelector::One(body.to_string()))
        }
    }

    /// Whether a dataset carrying this component name should be expanded.
    pub fn selects(&self, component: &str) -> bool {
        match self {
            StokesSelector::All => true,
            StokesSelector::One(name) => name == component,
            StokesSelector::Many(names) => names.contains(component),
        }
    }

    /// Whether any requested component is present in a beam's component set.
    pub fn any_present(&self, components: &[String]) -> bool {
        match self {
            StokesSelector::All => true,
            StokesSelector::One(name) => components.iter().any(|c| c == name),
            StokesSelector::Many(names) => components.iter().any(|c| names.contains(c)),
        }
    }

    /// The requested components, for placeholder wording ("I,Q").
    pub fn requested(&self) -> String {
        match self {
            StokesSelector::All => "all".to_string(),
            StokesSelector::One(name) => name.clone(),
            StokesSelector::Many(names) => {
                names.iter().cloned().collect::<Vec<_>>().join(",")
            }
        }
    }
}

fn strip_brackets(s: &str) -> &str {
    s.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
        .unwrap_or(s)
}

fn is_component_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}
