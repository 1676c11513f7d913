//! Cross-option constraint extraction from option descriptions.
//!
//! Descriptions are matched against a closed grammar of [`Phrasing`]s. Each
//! phrasing recognizes one sentence shape and extracts a [`Clause`]:
//!
//! | Phrasing              | Accepted text                                  |
//! |-----------------------|------------------------------------------------|
//! | [`Phrasing::RequiredIf`]        | `Required if I(state) is C(present)` (`R` or `r`) |
//! | [`Phrasing::MutuallyExclusive`] | `...utually exclusive with I(a), I(b)` (`M` or `m`) |
//!
//! Anything else in a description is prose and is ignored. Only top-level
//! options are scanned; suboptions never contribute constraints.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use argspec_core::{Literal, MutuallyExclusive, OptionDoc, RequiredIf};
use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::error::{GenError, Result};

static REQUIRED_IF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Rr]equired if I\(([^)]+)\) is C\(([^)]+)\)").unwrap());

static OPTION_REF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"I\(([^)]+)\)").unwrap());

// Leading letter left out so both "Mutually" and "mutually" match.
const MUTUALLY_EXCLUSIVE_PHRASE: &str = "utually exclusive with";

/// A recognized description phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrasing {
    /// `Required if I(<option>) is C(<value>)`; first match per line.
    RequiredIf,
    /// `mutually exclusive with` followed by any number of `I(<option>)`
    /// references on the same line.
    MutuallyExclusive,
}

/// Structured result of matching one phrasing against one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    RequiredIf { trigger: String, value: String },
    MutuallyExclusive { peers: Vec<String> },
}

impl Phrasing {
    /// Every recognized phrasing.
    pub const ALL: [Phrasing; 2] = [Self::RequiredIf, Self::MutuallyExclusive];

    /// Matches this phrasing against a single description line.
    pub fn parse(&self, line: &str) -> Option<Clause> {
        match self {
            Self::RequiredIf => {
                let captures = REQUIRED_IF_RE.captures(line)?;
                Some(Clause::RequiredIf {
                    trigger: captures[1].to_string(),
                    value: captures[2].to_string(),
                })
            }
            Self::MutuallyExclusive => {
                let start = line.find(MUTUALLY_EXCLUSIVE_PHRASE)? + MUTUALLY_EXCLUSIVE_PHRASE.len();
                let peers = OPTION_REF_RE
                    .captures_iter(&line[start..])
                    .map(|captures| captures[1].to_string())
                    .collect();
                Some(Clause::MutuallyExclusive { peers })
            }
        }
    }
}

/// Matches every phrasing against a line.
pub fn scan_line(line: &str) -> Vec<Clause> {
    Phrasing::ALL
        .iter()
        .filter_map(|phrasing| phrasing.parse(line))
        .collect()
}

/// Derives `required_if` rules from option descriptions.
///
/// Trigger values are converted with the *trigger* option's declared type.
/// Dependents accumulate in option declaration order, then line order, and
/// the rules come out sorted by `(trigger, value)`.
///
/// # Examples
///
/// ```
/// use argspec_core::{Literal, ModuleDoc};
/// use argspec_gen::constraints::required_if;
///
/// let doc: ModuleDoc = serde_yaml::from_str(r#"
/// options:
///   state:
///     description: Desired state.
///   path:
///     description: Required if I(state) is C(present).
/// "#).unwrap();
///
/// let rules = required_if(&doc.options).unwrap();
/// assert_eq!(rules.len(), 1);
/// assert_eq!(rules[0].trigger, "state");
/// assert_eq!(rules[0].value, Literal::str("present"));
/// assert_eq!(rules[0].dependents, vec!["path".to_string()]);
/// ```
pub fn required_if(options: &IndexMap<String, OptionDoc>) -> Result<Vec<RequiredIf>> {
    let requirements = options
        .iter()
        .flat_map(|(name, doc)| {
            doc.description
                .iter()
                .filter_map(|line| Phrasing::RequiredIf.parse(line))
                .map(move |clause| (name, clause))
        })
        .try_fold(
            BTreeMap::<(String, Literal), Vec<String>>::new(),
            |mut acc, (name, clause)| {
                if let Clause::RequiredIf { trigger, value } = clause {
                    let typed = convert_trigger_value(options, name, &trigger, &value)?;
                    acc.entry((trigger, typed)).or_default().push(name.clone());
                }
                Ok::<_, GenError>(acc)
            },
        )?;

    let rules: Vec<RequiredIf> = requirements
        .into_iter()
        .map(|((trigger, value), dependents)| RequiredIf {
            trigger,
            value,
            dependents,
        })
        .collect();
    debug!(count = rules.len(), "derived required_if rules");
    Ok(rules)
}

fn convert_trigger_value(
    options: &IndexMap<String, OptionDoc>,
    option: &str,
    trigger: &str,
    raw: &str,
) -> Result<Literal> {
    let trigger_doc = options.get(trigger).ok_or_else(|| GenError::UnknownOption {
        option: option.to_string(),
        referenced: trigger.to_string(),
    })?;
    trigger_doc
        .declared_type()
        .convert(raw)
        .map_err(|source| GenError::TypeConversion {
            option: trigger.to_string(),
            source,
        })
}

/// Derives `mutually_exclusive` groups from option descriptions.
///
/// Each matching line yields the referenced names plus the describing option
/// itself, sorted. Groups are deduplicated across options and returned in
/// sorted order; a line that references no other option yields nothing.
pub fn mutually_exclusive(options: &IndexMap<String, OptionDoc>) -> Vec<MutuallyExclusive> {
    let groups: BTreeSet<MutuallyExclusive> = options
        .iter()
        .flat_map(|(name, doc)| {
            doc.description
                .iter()
                .filter_map(|line| Phrasing::MutuallyExclusive.parse(line))
                .filter_map(move |clause| match clause {
                    Clause::MutuallyExclusive { mut peers } => {
                        peers.push(name.clone());
                        Some(MutuallyExclusive::new(peers))
                    }
                    Clause::RequiredIf { .. } => None,
                })
        })
        .filter(|group| group.names().len() >= 2)
        .collect();

    debug!(count = groups.len(), "derived mutually_exclusive groups");
    groups.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use argspec_core::{ModuleDoc, OptionType};

    use super::*;

    fn options(yaml: &str) -> IndexMap<String, OptionDoc> {
        serde_yaml::from_str::<ModuleDoc>(yaml).unwrap().options
    }

    #[test]
    fn test_required_if_phrase_parses() {
        let clause = Phrasing::RequiredIf.parse("Path. required if I(state) is C(present).");
        assert_eq!(
            clause,
            Some(Clause::RequiredIf {
                trigger: "state".into(),
                value: "present".into()
            })
        );
        assert_eq!(Phrasing::RequiredIf.parse("REQUIRED if I(state) is C(present)"), None);
    }

    #[test]
    fn test_mutually_exclusive_phrase_matches_both_cases() {
        for line in [
            "Mutually exclusive with I(b) and I(c).",
            "This is mutually exclusive with I(b) and I(c).",
        ] {
            assert_eq!(
                Phrasing::MutuallyExclusive.parse(line),
                Some(Clause::MutuallyExclusive {
                    peers: vec!["b".into(), "c".into()]
                })
            );
        }
    }

    #[test]
    fn test_mutually_exclusive_ignores_references_before_phrase() {
        let clause = Phrasing::MutuallyExclusive.parse("Like I(x), mutually exclusive with I(y).");
        assert_eq!(
            clause,
            Some(Clause::MutuallyExclusive {
                peers: vec!["y".into()]
            })
        );
    }

    #[test]
    fn test_scan_line_reports_every_phrasing() {
        let clauses = scan_line("Required if I(mode) is C(x); mutually exclusive with I(other).");
        assert_eq!(clauses.len(), 2);
        assert!(scan_line("Plain prose with I(other).").is_empty());
    }

    #[test]
    fn test_required_if_uses_trigger_type() {
        let opts = options(
            r#"
options:
  replicas:
    description: Replica count.
    type: int
  name:
    description: Required if I(replicas) is C(3).
    type: str
"#,
        );
        let rules = required_if(&opts).unwrap();
        assert_eq!(rules[0].value, Literal::Int(3));
    }

    #[test]
    fn test_required_if_accumulates_in_scan_order() {
        let opts = options(
            r#"
options:
  zulu:
    description: Required if I(state) is C(present).
  state:
    description: State.
  alpha:
    description:
      - Required if I(state) is C(present).
      - Required if I(state) is C(absent).
"#,
        );
        let rules = required_if(&opts).unwrap();
        assert_eq!(
            rules,
            vec![
                RequiredIf {
                    trigger: "state".into(),
                    value: Literal::str("absent"),
                    dependents: vec!["alpha".into()],
                },
                RequiredIf {
                    trigger: "state".into(),
                    value: Literal::str("present"),
                    dependents: vec!["zulu".into(), "alpha".into()],
                },
            ]
        );
    }

    #[test]
    fn test_required_if_bad_value_is_type_error() {
        let opts = options(
            r#"
options:
  force:
    description: Force it.
    type: bool
  reason:
    description: Required if I(force) is C(maybe).
"#,
        );
        let err = required_if(&opts).unwrap_err();
        match err {
            GenError::TypeConversion { option, source } => {
                assert_eq!(option, "force");
                assert_eq!(source.target, OptionType::Bool);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_required_if_unknown_trigger() {
        let opts = options(
            r#"
options:
  reason:
    description: Required if I(ghost) is C(yes).
"#,
        );
        assert!(matches!(
            required_if(&opts),
            Err(GenError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_required_if_skips_suboptions() {
        let opts = options(
            r#"
options:
  state:
    description: State.
  auth:
    description: Auth block.
    type: dict
    suboptions:
      token:
        description: Required if I(state) is C(present).
"#,
        );
        assert!(required_if(&opts).unwrap().is_empty());
    }

    #[test]
    fn test_mutually_exclusive_deduplicates_groups() {
        let opts = options(
            r#"
options:
  b:
    description: Mutually exclusive with I(a).
  a:
    description: mutually exclusive with I(b).
  c:
    description:
      - Mutually exclusive with I(d), I(a).
  d:
    description: No constraints here.
"#,
        );
        let groups = mutually_exclusive(&opts);
        assert_eq!(
            groups,
            vec![
                MutuallyExclusive::new(["a", "b"]),
                MutuallyExclusive::new(["a", "c", "d"]),
            ]
        );
    }

    #[test]
    fn test_mutually_exclusive_without_peers_is_dropped() {
        let opts = options(
            r#"
options:
  a:
    description: Mutually exclusive with nothing in particular.
"#,
        );
        assert!(mutually_exclusive(&opts).is_empty());
    }
}
