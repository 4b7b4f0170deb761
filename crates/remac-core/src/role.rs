//! Positional roles linking automaton states back to source sub-expressions.

use std::fmt;

/// How a source sub-expression relates to an automaton state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Role {
    /// The next symbol consumed could be the first of this sub-expression.
    Start,
    /// The state lies mid-way through this sub-expression.
    Inner,
    /// The state completes this sub-expression.
    Final,
}

impl Role {
    fn bit(self) -> u8 {
        match self {
            Role::Start => 1,
            Role::Inner => 2,
            Role::Final => 4,
        }
    }
}

/// Packed set of roles. States merged during determinization union these.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);

    pub fn of(role: Role) -> Self {
        Self(role.bit())
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    #[must_use]
    pub fn union(self, other: RoleSet) -> RoleSet {
        RoleSet(self.0 | other.0)
    }

    pub fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn has_start(self) -> bool {
        self.contains(Role::Start)
    }

    pub fn has_inner(self) -> bool {
        self.contains(Role::Inner)
    }

    pub fn has_final(self) -> bool {
        self.contains(Role::Final)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RoleSet {
    /// Compact `SIF` rendering used by the assoc dumps.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_start() {
            write!(f, "S")?;
        }
        if self.has_inner() {
            write!(f, "I")?;
        }
        if self.has_final() {
            write!(f, "F")?;
        }
        Ok(())
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        let mut set = RoleSet::EMPTY;
        for role in iter {
            set.insert(role);
        }
        set
    }
}
