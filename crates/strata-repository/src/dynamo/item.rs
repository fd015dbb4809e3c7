//! Conversion between profiles and DynamoDB items.

use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use strata_core::{Profile, StrataError, StrataResult};

/// Partition key attribute.
pub const ATTR_ID: &str = "id";
pub const ATTR_NAME: &str = "name";
pub const ATTR_EMAIL: &str = "email";
pub const ATTR_AGE: &str = "age";

/// Marshals a profile into an item. Strings are stored as `S`, age as `N`.
#[must_use]
pub fn profile_to_item(profile: &Profile) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (ATTR_ID.to_string(), AttributeValue::S(profile.id.clone())),
        (ATTR_NAME.to_string(), AttributeValue::S(profile.name.clone())),
        (ATTR_EMAIL.to_string(), AttributeValue::S(profile.email.clone())),
        (ATTR_AGE.to_string(), AttributeValue::N(profile.age.to_string())),
    ])
}

/// Unmarshals an item into a profile.
///
/// The id must be present. Missing optional attributes fall back to their
/// empty value, the same way request bodies do. Wrong attribute types fail
/// with `StoreReadFailed`.
pub fn item_to_profile(item: &HashMap<String, AttributeValue>) -> StrataResult<Profile> {
    let id = match item.get(ATTR_ID) {
        Some(value) => string_attr(ATTR_ID, value)?,
        None => {
            return Err(StrataError::StoreReadFailed(
                "item has no id attribute".to_string(),
            ))
        }
    };

    let name = item
        .get(ATTR_NAME)
        .map(|v| string_attr(ATTR_NAME, v))
        .transpose()?
        .unwrap_or_default();
    let email = item
        .get(ATTR_EMAIL)
        .map(|v| string_attr(ATTR_EMAIL, v))
        .transpose()?
        .unwrap_or_default();
    let age = item
        .get(ATTR_AGE)
        .map(number_attr)
        .transpose()?
        .unwrap_or_default();

    Ok(Profile {
        id,
        name,
        email,
        age,
    })
}

fn string_attr(name: &str, value: &AttributeValue) -> StrataResult<String> {
    value.as_s().cloned().map_err(|_| {
        StrataError::StoreReadFailed(format!("attribute '{}' is not a string", name))
    })
}

fn number_attr(value: &AttributeValue) -> StrataResult<i64> {
    let raw = value.as_n().map_err(|_| {
        StrataError::StoreReadFailed(format!("attribute '{}' is not a number", ATTR_AGE))
    })?;
    raw.parse::<i64>().map_err(|e| {
        StrataError::StoreReadFailed(format!("attribute '{}' = '{}': {}", ATTR_AGE, raw, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_attribute_types() {
        let item = profile_to_item(&Profile::new("u1", "Ann", "ann@x.com", 30));
        assert_eq!(item.len(), 4);
        assert_eq!(item.get("id"), Some(&AttributeValue::S("u1".to_string())));
        assert_eq!(item.get("age"), Some(&AttributeValue::N("30".to_string())));
    }

    #[test]
    fn test_item_back_to_profile() {
        let profile = Profile::new("u1", "Ann", "ann@x.com", -4);
        let decoded = item_to_profile(&profile_to_item(&profile)).unwrap();
        assert_eq!(decoded, profile);
    }

    #[test]
    fn test_missing_optional_attributes_default() {
        let item = HashMap::from([("id".to_string(), AttributeValue::S("u9".to_string()))]);
        assert_eq!(item_to_profile(&item).unwrap(), Profile::new("u9", "", "", 0));
    }

    #[test]
    fn test_missing_id_is_read_failure() {
        let item = HashMap::from([("name".to_string(), AttributeValue::S("Ann".to_string()))]);
        assert!(matches!(
            item_to_profile(&item),
            Err(StrataError::StoreReadFailed(_))
        ));
    }

    #[test]
    fn test_wrong_type_is_read_failure() {
        let mut item = profile_to_item(&Profile::new("u1", "Ann", "ann@x.com", 30));
        item.insert("age".to_string(), AttributeValue::S("thirty".to_string()));
        match item_to_profile(&item) {
            Err(StrataError::StoreReadFailed(msg)) => assert!(msg.contains("age")),
            other => panic!("Expected StoreReadFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_number_is_read_failure() {
        let mut item = profile_to_item(&Profile::new("u1", "Ann", "ann@x.com", 30));
        item.insert("age".to_string(), AttributeValue::N("1.5".to_string()));
        assert!(item_to_profile(&item).is_err());
    }
}
