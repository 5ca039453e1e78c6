//! Flags raised while rendering and the include lines they require.

use std::collections::BTreeSet;

use crate::expr::GlobalKind;

/// A feature used by the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    AllDifferent,
    AllDifferentExcept0,
    AllDifferentExcept,
    AllEqual,
    NValue,
    Circuit,
    Increasing,
    StrictlyIncreasing,
    Decreasing,
    StrictlyDecreasing,
    Cumulative,
    Disjunctive,
    DisjunctiveStrict,
    Table,
    /// Float values or domains appear in the model.
    FloatUsed,
}

impl Flag {
    /// Library file the flag requires, if any.
    pub fn include(&self) -> Option<&'static str> {
        match self {
            Flag::AllDifferent => Some("alldifferent.mzn"),
            Flag::AllDifferentExcept0 => Some("alldifferent_except_0.mzn"),
            Flag::AllDifferentExcept => Some("alldifferent_except.mzn"),
            Flag::AllEqual => Some("all_equal.mzn"),
            Flag::NValue => Some("nvalue_fn.mzn"),
            Flag::Circuit => Some("circuit.mzn"),
            Flag::Increasing => Some("increasing.mzn"),
            Flag::StrictlyIncreasing => Some("strictly_increasing.mzn"),
            Flag::Decreasing => Some("decreasing.mzn"),
            Flag::StrictlyDecreasing => Some("strictly_decreasing.mzn"),
            Flag::Cumulative => Some("cumulative.mzn"),
            Flag::Disjunctive => Some("disjunctive.mzn"),
            Flag::DisjunctiveStrict => Some("disjunctive_strict.mzn"),
            Flag::Table => Some("table.mzn"),
            Flag::FloatUsed => None,
        }
    }
}

impl From<GlobalKind> for Flag {
    fn from(kind: GlobalKind) -> Self {
        match kind {
            GlobalKind::AllDifferent => Flag::AllDifferent,
            GlobalKind::AllDifferentExcept0 => Flag::AllDifferentExcept0,
            GlobalKind::AllDifferentExcept => Flag::AllDifferentExcept,
            GlobalKind::AllEqual => Flag::AllEqual,
            GlobalKind::NValue => Flag::NValue,
            GlobalKind::Circuit => Flag::Circuit,
            GlobalKind::Increasing => Flag::Increasing,
            GlobalKind::StrictlyIncreasing => Flag::StrictlyIncreasing,
            GlobalKind::Decreasing => Flag::Decreasing,
            GlobalKind::StrictlyDecreasing => Flag::StrictlyDecreasing,
            GlobalKind::Cumulative => Flag::Cumulative,
            GlobalKind::Disjunctive => Flag::Disjunctive,
            GlobalKind::DisjunctiveStrict => Flag::DisjunctiveStrict,
            GlobalKind::Table => Flag::Table,
        }
    }
}

/// The set of flags raised during one compilation.
#[derive(Debug, Clone, Default)]
pub struct Flags(BTreeSet<Flag>);

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, flag: impl Into<Flag>) {
        self.0.insert(flag.into());
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.contains(&flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }

    /// One `include` line per required library file, in flag order.
    pub fn include_lines(&self) -> Vec<String> {
        self.iter()
            .filter_map(|f| f.include())
            .map(|file| format!("include \"{file}\";"))
            .collect()
    }
}
