//! Registration aggregation
//!
//! Pure, total functions over in-memory registration lists:
//! - [`group_by_member`] - one consolidated row per member for the visitors report
//! - [`missing_members`] - roster members without any registration
//! - [`GroupFilter`] - the `all` / exact-group selector used by the admin API

use std::collections::{HashMap, HashSet};

use crate::models::{GroupedRegistration, Member, Registration};

/// Group selector of the admin dashboard
///
/// `all` (or nothing) selects every group; any other value is compared
/// exactly against the assistance group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupFilter {
    #[default]
    All,
    Group(String),
}

impl GroupFilter {
    pub const ALL: &'static str = "all";

    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(Self::ALL) => Self::All,
            Some(group) => Self::Group(group.to_string()),
        }
    }

    pub fn as_group(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Group(g) => Some(g.as_str()),
        }
    }

    /// The raw selector value (`all` or the group name)
    pub fn as_str(&self) -> &str {
        self.as_group().unwrap_or(Self::ALL)
    }

    pub fn matches(&self, group: &str) -> bool {
        match self {
            Self::All => true,
            Self::Group(g) => g == group,
        }
    }
}

struct Accumulator {
    grouped: GroupedRegistration,
    seen_visitors: HashSet<String>,
}

/// Consolidate registrations per member name
///
/// Members appear in order of first appearance. The first contributing
/// registration fixes the assistance group. Visitors are deduplicated by exact
/// name, first seen wins. Every registration contributes exactly one
/// timestamp; timestamps come out newest first.
pub fn group_by_member<'a, I>(registrations: I) -> Vec<GroupedRegistration>
where
    I: IntoIterator<Item = &'a Registration>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<Accumulator> = Vec::new();

    for registration in registrations {
        let slot = *index
            .entry(registration.member_name.as_str())
            .or_insert_with(|| {
                groups.push(Accumulator {
                    grouped: GroupedRegistration {
                        member_name: registration.member_name.clone(),
                        assistance_group: registration.assistance_group.clone(),
                        visitors: Vec::new(),
                        timestamps: Vec::new(),
                    },
                    seen_visitors: HashSet::new(),
                });
                groups.len() - 1
            });
        let acc = &mut groups[slot];

        for visitor in &registration.visitors {
            if acc.seen_visitors.insert(visitor.name.clone()) {
                acc.grouped.visitors.push(visitor.clone());
            } else if let Some(kept) = acc
                .grouped
                .visitors
                .iter()
                .find(|v| v.name == visitor.name && v.phone != visitor.phone)
            {
                tracing::debug!(
                    member = %registration.member_name,
                    visitor = %visitor.name,
                    kept_phone = %kept.phone,
                    dropped_phone = %visitor.phone,
                    "Duplicate visitor name with a different phone, keeping first"
                );
            }
        }

        acc.grouped.timestamps.push(registration.timestamp);
    }

    groups
        .into_iter()
        .map(|mut acc| {
            acc.grouped.timestamps.sort_by(|a, b| b.cmp(a));
            acc.grouped
        })
        .collect()
}

/// Roster members with no registration, optionally restricted to one group
///
/// Name comparison is exact; roster order is preserved.
pub fn missing_members<'a, I>(
    roster: &[Member],
    registrations: I,
    group_filter: Option<&str>,
) -> Vec<Member>
where
    I: IntoIterator<Item = &'a Registration>,
{
    let registered: HashSet<&str> = registrations
        .into_iter()
        .map(|r| r.member_name.as_str())
        .collect();

    roster
        .iter()
        .filter(|m| group_filter.is_none_or(|g| m.group == g))
        .filter(|m| !registered.contains(m.name.as_str()))
        .cloned()
        .collect()
}
