use crate::types::{DateFilter, Prop, Team};

/// The user's filter selection. Each change produces a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub team: Option<String>,
    pub prop_type: Option<String>,
    /// Applied at the fetch boundary, never to loaded props.
    pub date: DateFilter,
}

/// What a filter change costs: a local re-filter or a new listing fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterImpact {
    Unchanged,
    Refilter,
    Refetch,
}

impl FilterState {
    pub fn new(team: Option<String>, prop_type: Option<String>, date: DateFilter) -> Self {
        Self::default().with_team(team).with_prop_type(prop_type).with_date(date)
    }

    /// An empty string clears the constraint.
    pub fn with_team(self, team: Option<String>) -> Self {
        Self { team: team.filter(|t| !t.is_empty()), ..self }
    }

    pub fn with_prop_type(self, prop_type: Option<String>) -> Self {
        Self { prop_type: prop_type.filter(|t| !t.is_empty()), ..self }
    }

    pub fn with_date(self, date: DateFilter) -> Self {
        Self { date, ..self }
    }

    pub fn cleared(self) -> Self {
        Self { team: None, prop_type: None, ..self }
    }

    pub fn impact_of(&self, next: &FilterState) -> FilterImpact {
        if self.date != next.date {
            FilterImpact::Refetch
        } else if self != next {
            FilterImpact::Refilter
        } else {
            FilterImpact::Unchanged
        }
    }

    /// Team and prop-type predicates AND-ed together.
    pub fn matches(&self, prop: &Prop) -> bool {
        self.team.as_deref().map_or(true, |t| prop.player_team_abbr == t)
            && self.prop_type.as_deref().map_or(true, |t| prop.prop_type == t)
    }

    /// The displayed subsequence of `canonical`, in canonical order.
    pub fn apply<'a>(&self, canonical: &'a [Prop]) -> Vec<&'a Prop> {
        canonical.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Team filter choices: the directory's abbreviations when it loaded,
/// otherwise whatever teams appear in the canonical set.
pub fn team_options(teams: Option<&[Team]>, canonical: &[Prop]) -> Vec<String> {
    let mut options: Vec<String> = match teams {
        Some(teams) if !teams.is_empty() => teams.iter().map(|t| t.abbr.clone()).collect(),
        _ => canonical.iter().map(|p| p.player_team_abbr.clone()).collect(),
    };
    options.retain(|o| !o.is_empty());
    options.sort();
    options.dedup();
    options
}

/// Distinct prop types in first-seen order.
pub fn prop_type_options(canonical: &[Prop]) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for prop in canonical {
        if !prop.prop_type.is_empty() && !options.contains(&prop.prop_type) {
            options.push(prop.prop_type.clone());
        }
    }
    options
}

/// Step through `options`: none → first → … → last → none.
/// A current value missing from `options` restarts at the first option.
pub fn cycle_option(options: &[String], current: Option<&str>) -> Option<String> {
    match current {
        None => options.first().cloned(),
        Some(cur) => match options.iter().position(|o| o == cur) {
            Some(i) => options.get(i + 1).cloned(),
            None => options.first().cloned(),
        },
    }
}
