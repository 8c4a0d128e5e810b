//! Synthetic rosters for benchmarking.
//!
//! Generated rosters form a forest: every employee after the first reports to
//! someone earlier, so assembly sees realistic depth without cycles. A seeded
//! share of manager references is written as a case or spacing variant, as a
//! name with an extra suffix token (resolved by fuzzy matching) or as someone
//! absent from the roster (resolved by a placeholder).

use orgtree_core::EmployeeRecord;
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Department shared by every generated record.
pub const DEPARTMENT: &str = "Bench";

const LOCATIONS: [&str; 4] = ["London", "Leeds", "New York", "Austin"];
const JOBS: [&str; 4] = [
    "ENGR001-Engineer",
    "ENGR002-Senior Engineer",
    "MGMT001-Director",
    "OPS0001-Analyst",
];

/// Errors that may occur during synthetic roster generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested employee count was zero.
    #[error("employee count must be greater than zero")]
    ZeroEmployees,
    /// The requested span was zero.
    #[error("span must be greater than zero")]
    ZeroSpan,
    /// A share was outside `0.0..=1.0`.
    #[error("{name} must lie between 0 and 1")]
    InvalidShare {
        /// Which share was invalid.
        name: &'static str,
    },
}

/// Configuration for synthetic roster generation.
#[derive(Clone, Debug)]
pub struct SyntheticRosterConfig {
    /// Number of employees to generate.
    pub employees: usize,
    /// Average direct reports per manager.
    pub span: usize,
    /// Share of manager references written as case or spacing variants.
    pub variant_share: f64,
    /// Share of manager references needing fuzzy resolution.
    pub fuzzy_share: f64,
    /// Share of manager references naming nobody in the roster.
    pub ghost_share: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl SyntheticRosterConfig {
    /// A clean forest of `employees` records with `span` reports per manager.
    #[must_use]
    pub const fn new(employees: usize, span: usize, seed: u64) -> Self {
        Self {
            employees,
            span,
            variant_share: 0.0,
            fuzzy_share: 0.0,
            ghost_share: 0.0,
            seed,
        }
    }

    /// Sets the shares of variant, fuzzy and ghost manager references.
    #[must_use]
    pub const fn with_noise(mut self, variant: f64, fuzzy: f64, ghost: f64) -> Self {
        self.variant_share = variant;
        self.fuzzy_share = fuzzy;
        self.ghost_share = ghost;
        self
    }
}

/// Generates a roster from `config`.
///
/// # Errors
/// Returns [`SyntheticError`] for a zero employee count or span, or a share
/// outside the unit interval.
///
/// # Examples
/// ```
/// use orgtree_benches::source::{SyntheticRosterConfig, generate_roster};
///
/// let roster = generate_roster(&SyntheticRosterConfig::new(20, 4, 7)).expect("valid config");
/// assert_eq!(roster.len(), 20);
/// assert!(roster[0].reporting_manager.is_empty());
/// ```
pub fn generate_roster(config: &SyntheticRosterConfig) -> Result<Vec<EmployeeRecord>, SyntheticError> {
    if config.employees == 0 {
        return Err(SyntheticError::ZeroEmployees);
    }
    if config.span == 0 {
        return Err(SyntheticError::ZeroSpan);
    }
    for (name, share) in [
        ("variant_share", config.variant_share),
        ("fuzzy_share", config.fuzzy_share),
        ("ghost_share", config.ghost_share),
    ] {
        if !(0.0..=1.0).contains(&share) {
            return Err(SyntheticError::InvalidShare { name });
        }
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let names: Vec<String> = (0..config.employees).map(person_name).collect();
    let records = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let manager = match index {
                0 => String::new(),
                _ => {
                    let pool = index.div_ceil(config.span);
                    let boss = names.get(rng.gen_range(0..pool)).map_or("", String::as_str);
                    manager_reference(&mut rng, config, boss, index)
                }
            };
            EmployeeRecord::new(name.clone())
                .with_department(DEPARTMENT)
                .with_location(pick(&mut rng, &LOCATIONS))
                .with_job_profile(pick(&mut rng, &JOBS))
                .with_reporting_manager(manager)
        })
        .collect();
    Ok(records)
}

fn manager_reference(
    rng: &mut SmallRng,
    config: &SyntheticRosterConfig,
    boss: &str,
    index: usize,
) -> String {
    if rng.gen_bool(config.ghost_share) {
        format!("Ghost {}", letters(index))
    } else if rng.gen_bool(config.fuzzy_share) {
        format!("{boss} Junior")
    } else if rng.gen_bool(config.variant_share) {
        format!("  {} ", boss.to_uppercase())
    } else {
        boss.to_owned()
    }
}

fn pick(rng: &mut SmallRng, options: &[&'static str; 4]) -> &'static str {
    options
        .get(rng.gen_range(0..options.len()))
        .copied()
        .unwrap_or_default()
}

/// Three-token name unique to `index`. Two generated names share two of
/// three tokens, below the fuzzy threshold, while a name plus one suffix
/// token scores three of four, above it.
fn person_name(index: usize) -> String {
    format!("Person Q{} Smith", letters(index))
}

/// Spells `index` in base-26 letters, since normalization drops digits.
fn letters(index: usize) -> String {
    let mut out = String::new();
    let mut rest = index;
    loop {
        let digit = rest
            .checked_rem(26)
            .and_then(|value| u8::try_from(value).ok())
            .unwrap_or(0);
        out.push(char::from(b'a'.saturating_add(digit)));
        rest = rest.checked_div(26).unwrap_or(0);
        if rest == 0 {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use orgtree_core::{ManagerStructure, Resolution};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(SyntheticRosterConfig::new(0, 4, 1), SyntheticError::ZeroEmployees)]
    #[case(SyntheticRosterConfig::new(5, 0, 1), SyntheticError::ZeroSpan)]
    #[case(
        SyntheticRosterConfig::new(5, 2, 1).with_noise(1.5, 0.0, 0.0),
        SyntheticError::InvalidShare { name: "variant_share" }
    )]
    fn invalid_configs_are_rejected(
        #[case] config: SyntheticRosterConfig,
        #[case] expected: SyntheticError,
    ) {
        assert_eq!(generate_roster(&config), Err(expected));
    }

    #[rstest]
    fn generation_is_seeded() {
        let config = SyntheticRosterConfig::new(50, 3, 9).with_noise(0.2, 0.2, 0.1);
        assert_eq!(generate_roster(&config), generate_roster(&config));
    }

    #[rstest]
    fn clean_rosters_resolve_exactly() {
        let roster = generate_roster(&SyntheticRosterConfig::new(200, 5, 42)).expect("roster");
        let structure = ManagerStructure::build(&roster);
        assert!(structure.iter().all(|entry| entry.resolution() == Resolution::Exact));
        let reports: usize = structure.iter().map(|entry| entry.report_count()).sum();
        assert_eq!(reports, 199);
    }

    #[rstest]
    fn noisy_rosters_exercise_every_resolution() {
        let config = SyntheticRosterConfig::new(400, 4, 42).with_noise(0.0, 0.3, 0.1);
        let roster = generate_roster(&config).expect("roster");
        let structure = ManagerStructure::build(&roster);
        for kind in [Resolution::Exact, Resolution::Fuzzy, Resolution::Placeholder] {
            assert!(
                structure.iter().any(|entry| entry.resolution() == kind),
                "no {kind:?} entries"
            );
        }
    }
}
