use crate::config::{DATE_FORMAT, NAME_MAX_LEN, WILD_REF_PREFIX};
use crate::error::{BuildError, Result};
use crate::model::{EntityId, Gender, Namespace, RecordedDate};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Matches indexed photo fields like `photo.1`; `photo.1.author` and other
/// three-part keys deliberately do not match.
static PHOTO_INDEX_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^photo\.(\d+)$").unwrap());

/// Parse a date field value, where the literal "unknown" means "not
/// recorded". Anything else must be a valid YYYY/MM/DD calendar date.
pub fn check_date(value: &str, field: &str, path: &Path) -> Result<RecordedDate> {
    if value == "unknown" {
        return Ok(RecordedDate::Unknown);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(RecordedDate::On)
        .map_err(|_| BuildError::DateFormat {
            path: path.to_path_buf(),
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Reject name-like fields longer than the formatting limit
pub fn check_name(value: &str, field: &str, path: &Path) -> Result<()> {
    if value.chars().count() > NAME_MAX_LEN {
        return Err(BuildError::NameFormat {
            path: path.to_path_buf(),
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Normalize a gender token through the canonical table
pub fn check_gender(value: &str, path: &Path) -> Result<Gender> {
    Gender::normalize(value).ok_or_else(|| BuildError::GenderFormat {
        path: path.to_path_buf(),
        value: value.to_string(),
    })
}

/// Parse a bare numeric id declared in a record's own `_id` field
pub fn parse_declared_id(value: &str, ns: Namespace, field: &str, path: &Path) -> Result<EntityId> {
    let num = parse_num(value, field, path)?;
    Ok(EntityId::new(ns, num))
}

/// Parse a site reference value: `wild.N` names a wild range, a bare
/// number names a zoo.
pub fn parse_site_ref(value: &str, field: &str, path: &Path) -> Result<EntityId> {
    if let Some(rest) = value.strip_prefix(WILD_REF_PREFIX) {
        let num = parse_num(rest, field, path)?;
        Ok(EntityId::wild(num))
    } else {
        let num = parse_num(value, field, path)?;
        Ok(EntityId::zoo(num))
    }
}

/// Parse a wild-range residence reference, with or without the `wild.` prefix
pub fn parse_wild_ref(value: &str, field: &str, path: &Path) -> Result<EntityId> {
    let rest = value.strip_prefix(WILD_REF_PREFIX).unwrap_or(value);
    Ok(EntityId::wild(parse_num(rest, field, path)?))
}

/// Parse a zoo residence reference (always a bare declared number)
pub fn parse_zoo_ref(value: &str, field: &str, path: &Path) -> Result<EntityId> {
    Ok(EntityId::zoo(parse_num(value, field, path)?))
}

/// Split a comma-separated list of panda ids, ignoring embedded whitespace
pub fn split_panda_ids(value: &str, field: &str, path: &Path) -> Result<Vec<EntityId>> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split(',')
        .map(|tok| parse_num(tok, field, path).map(EntityId::panda))
        .collect()
}

/// Index of an indexed photo field (`photo.3` -> 3), None for any other key
pub fn photo_index(key: &str) -> Option<u32> {
    PHOTO_INDEX_REGEX
        .captures(key)
        .and_then(|c| c[1].parse().ok())
}

fn parse_num(value: &str, field: &str, path: &Path) -> Result<u32> {
    value.parse().map_err(|_| BuildError::IdFormat {
        path: path.to_path_buf(),
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> &'static Path {
        Path::new("pandas/1001/0001_maple.txt")
    }

    #[test]
    fn date_valid() {
        let d = check_date("2014/05/01", "birthday", p()).unwrap();
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2014, 5, 1));
    }

    #[test]
    fn date_unknown_sentinel() {
        assert_eq!(
            check_date("unknown", "death", p()).unwrap(),
            RecordedDate::Unknown
        );
    }

    #[test]
    fn date_rejects_bad_calendar_day() {
        assert!(matches!(
            check_date("2014/02/30", "birthday", p()),
            Err(BuildError::DateFormat { .. })
        ));
    }

    #[test]
    fn date_rejects_wrong_shape() {
        assert!(check_date("2014-05-01", "birthday", p()).is_err());
        assert!(check_date("05/01/2014", "birthday", p()).is_err());
        assert!(check_date("", "birthday", p()).is_err());
    }

    #[test]
    fn name_at_limit_accepted() {
        let name = "a".repeat(80);
        assert!(check_name(&name, "en.name", p()).is_ok());
    }

    #[test]
    fn name_over_limit_rejected() {
        let name = "a".repeat(81);
        assert!(matches!(
            check_name(&name, "en.name", p()),
            Err(BuildError::NameFormat { .. })
        ));
    }

    #[test]
    fn gender_errors_carry_token() {
        match check_gender("yes", p()) {
            Err(BuildError::GenderFormat { value, .. }) => assert_eq!(value, "yes"),
            other => panic!("expected GenderFormat, got {:?}", other),
        }
    }

    #[test]
    fn site_ref_wild_prefix() {
        assert_eq!(
            parse_site_ref("wild.3", "birthplace", p()).unwrap(),
            EntityId::wild(3)
        );
    }

    #[test]
    fn site_ref_bare_number_is_zoo() {
        assert_eq!(
            parse_site_ref("7", "zoo", p()).unwrap(),
            EntityId::zoo(7)
        );
    }

    #[test]
    fn site_ref_rejects_garbage() {
        assert!(parse_site_ref("wild.x", "birthplace", p()).is_err());
        assert!(parse_site_ref("zoo.7", "zoo", p()).is_err());
    }

    #[test]
    fn id_list_ignores_embedded_whitespace() {
        let ids = split_panda_ids("4, 7 ,12", "children", p()).unwrap();
        assert_eq!(
            ids,
            vec![EntityId::panda(4), EntityId::panda(7), EntityId::panda(12)]
        );
    }

    #[test]
    fn id_list_single_value() {
        assert_eq!(
            split_panda_ids("9", "litter", p()).unwrap(),
            vec![EntityId::panda(9)]
        );
    }

    #[test]
    fn id_list_rejects_non_numeric() {
        assert!(split_panda_ids("4,unknown", "children", p()).is_err());
    }

    #[test]
    fn photo_index_two_part_only() {
        assert_eq!(photo_index("photo.1"), Some(1));
        assert_eq!(photo_index("photo.12"), Some(12));
        assert_eq!(photo_index("photo.1.author"), None);
        assert_eq!(photo_index("photo"), None);
        assert_eq!(photo_index("video.1"), None);
    }
}
