//! Validation and normalisation of invitation records.
//!
//! Pure functions: no logging, no I/O. Failures are reported to the caller
//! and it is the link encoder, not this module, that owns the diagnostic sink.

use common::{CanonicalPayload, InvitationRecord, LinkError};

/// Check that `email`, `name` and `ref` are present and non-empty.
///
/// An empty string counts as missing. All missing fields are reported at
/// once, always in the order `email`, `name`, `ref`.
///
/// # Errors
///
/// Returns [`LinkError::Validation`] listing every missing field.
pub fn validate(record: &InvitationRecord) -> Result<(), LinkError> {
    let required = [
        ("email", &record.email),
        ("name", &record.name),
        ("ref", &record.reference),
    ];
    let missing: Vec<&'static str> = required
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(field, _)| field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LinkError::Validation { missing })
    }
}

/// Build the canonical payload from a raw record.
///
/// Required fields are copied verbatim. `sku` and `tags` are carried over
/// only when they hold at least one entry; anything else in the record is
/// dropped.
///
/// # Errors
///
/// Returns [`LinkError::Validation`] as described in [`validate`].
pub fn build(record: InvitationRecord) -> Result<CanonicalPayload, LinkError> {
    validate(&record)?;

    let InvitationRecord {
        email,
        name,
        reference,
        sku,
        tags,
    } = record;

    Ok(CanonicalPayload {
        email: email.unwrap_or_default(),
        name: name.unwrap_or_default(),
        reference: reference.unwrap_or_default(),
        sku: sku.filter(|s| !s.is_empty()),
        tags: tags.filter(|t| !t.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_record() -> InvitationRecord {
        InvitationRecord {
            email: Some("test@example.com".into()),
            name: Some("Test User".into()),
            reference: Some("ORDER123".into()),
            sku: Some(vec!["SKU1".into()]),
            tags: Some(vec!["tag1".into()]),
        }
    }

    fn missing_of(err: LinkError) -> Vec<&'static str> {
        match err {
            LinkError::Validation { missing } => missing,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_record_passes() {
        assert!(validate(&valid_record()).is_ok());
    }

    #[test]
    fn empty_email_is_missing() {
        let record = InvitationRecord {
            email: Some(String::new()),
            ..valid_record()
        };
        let err = validate(&record).unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: email");
    }

    #[test]
    fn absent_name_is_missing() {
        let record = InvitationRecord {
            name: None,
            ..valid_record()
        };
        assert_eq!(
            validate(&record).unwrap_err().to_string(),
            "Missing required fields: name"
        );
    }

    #[test]
    fn empty_ref_is_missing() {
        let record = InvitationRecord {
            reference: Some(String::new()),
            ..valid_record()
        };
        assert_eq!(
            validate(&record).unwrap_err().to_string(),
            "Missing required fields: ref"
        );
    }

    #[test]
    fn all_missing_fields_listed_in_order() {
        let record = InvitationRecord {
            email: Some("test@example.com".into()),
            ..InvitationRecord::default()
        };
        assert_eq!(
            build(record).unwrap_err().to_string(),
            "Missing required fields: name, ref"
        );
        assert_eq!(
            missing_of(build(InvitationRecord::default()).unwrap_err()),
            vec!["email", "name", "ref"]
        );
    }

    #[test]
    fn whitespace_counts_as_present() {
        let record = InvitationRecord {
            name: Some(" ".into()),
            ..valid_record()
        };
        assert_eq!(build(record).unwrap().name, " ");
    }

    #[test]
    fn builds_full_payload() {
        let p = build(valid_record()).unwrap();
        assert_eq!(p.email, "test@example.com");
        assert_eq!(p.name, "Test User");
        assert_eq!(p.reference, "ORDER123");
        assert_eq!(p.sku, Some(vec!["SKU1".to_string()]));
        assert_eq!(p.tags, Some(vec!["tag1".to_string()]));
    }

    #[test]
    fn builds_with_only_required_fields() {
        let record = InvitationRecord {
            sku: None,
            tags: None,
            ..valid_record()
        };
        let p = build(record).unwrap();
        assert!(p.sku.is_none());
        assert!(p.tags.is_none());
    }

    #[test]
    fn empty_optional_sequences_are_dropped() {
        let record = InvitationRecord {
            sku: Some(vec![]),
            tags: Some(vec![]),
            ..valid_record()
        };
        let p = build(record).unwrap();
        assert!(p.sku.is_none());
        assert!(p.tags.is_none());
        let json = String::from_utf8(p.to_canonical_json().unwrap()).unwrap();
        assert!(!json.contains("sku") && !json.contains("tags"));
    }

    fn field() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            "[a-zA-Z0-9@. ]{1,24}".prop_map(Some),
        ]
    }

    fn is_present(value: &Option<String>) -> bool {
        value.as_deref().is_some_and(|v| !v.is_empty())
    }

    proptest! {
        #[test]
        fn missing_fields_are_reported_exactly(
            email in field(),
            name in field(),
            reference in field(),
            sku in proptest::option::of(proptest::collection::vec("[A-Z0-9]{1,8}", 0..4)),
        ) {
            let record = InvitationRecord {
                email: email.clone(),
                name: name.clone(),
                reference: reference.clone(),
                sku: sku.clone(),
                tags: None,
            };

            let expected: Vec<&str> = [("email", &email), ("name", &name), ("ref", &reference)]
                .into_iter()
                .filter(|(_, v)| !is_present(v))
                .map(|(f, _)| f)
                .collect();

            match build(record) {
                Ok(p) => {
                    prop_assert!(expected.is_empty());
                    prop_assert_eq!(Some(p.email), email);
                    prop_assert_eq!(Some(p.name), name);
                    prop_assert_eq!(Some(p.reference), reference);
                    prop_assert_eq!(p.sku, sku.filter(|s| !s.is_empty()));
                    prop_assert!(p.tags.is_none());
                }
                Err(err) => {
                    prop_assert_eq!(
                        err.to_string(),
                        format!("Missing required fields: {}", expected.join(", "))
                    );
                }
            }
        }
    }
}
