use crate::config::LITTER_TOLERANCE_DAYS;
use crate::error::{BuildError, Result};
use crate::model::{Edge, EntityId, Namespace, PandaVertex, Vertex, LITTER_LABEL};
use rustc_hash::{FxHashMap, FxHashSet};

/// Every `_id` must appear exactly once within its namespace. On a
/// violation the error lists the display names sharing the duplicated id.
pub fn check_duplicate_ids(vertices: &[Vertex], ns: Namespace) -> Result<()> {
    let mut seen = FxHashSet::default();
    let mut dupes = FxHashSet::default();
    for vertex in vertices.iter().filter(|v| v.namespace() == ns) {
        if !seen.insert(vertex.id()) {
            dupes.insert(vertex.id());
        }
    }
    if dupes.is_empty() {
        return Ok(());
    }
    let names = vertices
        .iter()
        .filter(|v| dupes.contains(&v.id()))
        .map(|v| v.display_name())
        .collect();
    Err(BuildError::DuplicateIds { ns, names })
}

/// Pandas in the same litter must both exist and share a birthday within
/// tolerance. Litter edges are recorded in both directions, so each
/// unordered pair is checked once.
pub fn check_litters(vertices: &[Vertex], edges: &[Edge]) -> Result<()> {
    let pandas: FxHashMap<EntityId, &PandaVertex> = vertices
        .iter()
        .filter_map(|v| v.as_panda())
        .map(|p| (p.id, p))
        .collect();

    let mut seen_pairs = FxHashSet::default();
    for edge in edges.iter().filter(|e| e.label == LITTER_LABEL) {
        if !seen_pairs.insert(pair_key(edge.from, edge.to)) {
            continue;
        }
        let (a, b) = match (pandas.get(&edge.from), pandas.get(&edge.to)) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(BuildError::Link {
                    from: edge.from,
                    to: edge.to,
                })
            }
        };
        if !birthdays_agree(a, b) {
            return Err(BuildError::DateConsistency {
                a: panda_name(a),
                b: panda_name(b),
            });
        }
    }
    Ok(())
}

fn panda_name(p: &PandaVertex) -> String {
    p.fields
        .get("en.name")
        .cloned()
        .unwrap_or_else(|| p.id.to_string())
}

fn pair_key(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a.num <= b.num {
        (a, b)
    } else {
        (b, a)
    }
}

/// Litter siblings' birthdays must both be recorded and no more than the
/// tolerance apart
fn birthdays_agree(a: &PandaVertex, b: &PandaVertex) -> bool {
    match (a.birthday.date(), b.birthday.date()) {
        (Some(da), Some(db)) => (da - db).num_days().abs() <= LITTER_TOLERANCE_DAYS,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordedDate;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn panda(id: u32, name: &str, birthday: Option<(i32, u32, u32)>) -> Vertex {
        let mut fields = BTreeMap::new();
        fields.insert("en.name".to_string(), name.to_string());
        Vertex::Panda(PandaVertex {
            id: EntityId::panda(id),
            birthday: match birthday {
                Some((y, m, d)) => RecordedDate::On(NaiveDate::from_ymd_opt(y, m, d).unwrap()),
                None => RecordedDate::Unknown,
            },
            death: RecordedDate::Unknown,
            gender: None,
            fields,
        })
    }

    fn litter_pair(a: u32, b: u32) -> Vec<Edge> {
        vec![
            Edge::new(EntityId::panda(a), EntityId::panda(b), LITTER_LABEL),
            Edge::new(EntityId::panda(b), EntityId::panda(a), LITTER_LABEL),
        ]
    }

    #[test]
    fn unique_ids_pass() {
        let vertices = vec![
            panda(1, "Maple", None),
            panda(2, "Kaede", None),
        ];
        assert!(check_duplicate_ids(&vertices, Namespace::Panda).is_ok());
    }

    #[test]
    fn duplicate_ids_list_names() {
        let vertices = vec![
            panda(1, "Maple", None),
            panda(1, "Kaede", None),
            panda(2, "Momiji", None),
        ];
        match check_duplicate_ids(&vertices, Namespace::Panda) {
            Err(BuildError::DuplicateIds { ns, names }) => {
                assert_eq!(ns, Namespace::Panda);
                assert_eq!(names, vec!["Maple", "Kaede"]);
            }
            other => panic!("expected DuplicateIds, got {:?}", other),
        }
    }

    #[test]
    fn same_number_across_namespaces_passes() {
        let mut fields = BTreeMap::new();
        fields.insert("en.name".to_string(), "Sichuan".to_string());
        let vertices = vec![
            panda(5, "Maple", None),
            Vertex::Wild(crate::model::SiteVertex {
                id: EntityId::wild(5),
                fields,
            }),
        ];
        assert!(check_duplicate_ids(&vertices, Namespace::Panda).is_ok());
        assert!(check_duplicate_ids(&vertices, Namespace::Wild).is_ok());
    }

    #[test]
    fn litter_within_tolerance_passes() {
        let vertices = vec![
            panda(1, "Maple", Some((2014, 5, 1))),
            panda(2, "Kaede", Some((2014, 5, 3))),
        ];
        assert!(check_litters(&vertices, &litter_pair(1, 2)).is_ok());
    }

    #[test]
    fn litter_three_days_apart_fails() {
        let vertices = vec![
            panda(1, "Maple", Some((2014, 5, 1))),
            panda(2, "Kaede", Some((2014, 5, 4))),
        ];
        match check_litters(&vertices, &litter_pair(1, 2)) {
            Err(BuildError::DateConsistency { a, b }) => {
                assert_eq!(a, "Maple");
                assert_eq!(b, "Kaede");
            }
            other => panic!("expected DateConsistency, got {:?}", other),
        }
    }

    #[test]
    fn litter_unknown_birthday_fails() {
        let vertices = vec![
            panda(1, "Maple", Some((2014, 5, 1))),
            panda(2, "Kaede", None),
        ];
        assert!(matches!(
            check_litters(&vertices, &litter_pair(1, 2)),
            Err(BuildError::DateConsistency { .. })
        ));
    }

    #[test]
    fn litter_missing_counterpart_fails() {
        let vertices = vec![panda(1, "Maple", Some((2014, 5, 1)))];
        let edges = vec![Edge::new(
            EntityId::panda(1),
            EntityId::panda(9),
            LITTER_LABEL,
        )];
        assert!(matches!(
            check_litters(&vertices, &edges),
            Err(BuildError::Link { .. })
        ));
    }

    #[test]
    fn litter_pair_checked_once_despite_both_directions() {
        let vertices = vec![
            panda(1, "Maple", Some((2014, 5, 1))),
            panda(2, "Kaede", Some((2014, 5, 2))),
        ];
        // Both directions present; the reverse edge must not re-trigger
        assert!(check_litters(&vertices, &litter_pair(1, 2)).is_ok());
    }

    #[test]
    fn non_litter_edges_ignored() {
        let vertices = vec![panda(1, "Maple", None)];
        let edges = vec![Edge::new(
            EntityId::panda(1),
            EntityId::panda(9),
            crate::model::FAMILY_LABEL,
        )];
        assert!(check_litters(&vertices, &edges).is_ok());
    }
}
