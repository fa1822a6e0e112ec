//! Tri-state field wrapper for partial updates.
//!
//! `Option<T>` cannot tell a missing JSON key from an explicit `null`.
//! `Patch<T>` keeps the three cases apart; use it with `#[serde(default)]`
//! so that a missing key decodes to [`Patch::Absent`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not present in the payload.
    Absent,
    /// Key present with an explicit `null`.
    Null,
    /// Key present with a value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    /// The supplied value, if any. `Absent` and `Null` both yield `None`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Overwrite `target` when a value was supplied.
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Value(v) = self {
            *target = v;
        }
    }

    /// Overwrite an optional `target` when a value was supplied.
    pub fn apply_to_option(self, target: &mut Option<T>) {
        if let Patch::Value(v) = self {
            *target = Some(v);
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|opt| match opt {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        name: Patch<String>,
    }

    #[test]
    fn test_missing_key_is_absent() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.name, Patch::Absent);
    }

    #[test]
    fn test_explicit_null_is_null() {
        let body: Body = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(body.name, Patch::Null);
    }

    #[test]
    fn test_value_is_value() {
        let body: Body = serde_json::from_str(r#"{"name": "Lab 2"}"#).unwrap();
        assert_eq!(body.name.value().map(String::as_str), Some("Lab 2"));
    }

    #[test]
    fn test_apply_leaves_target_alone_unless_value() {
        let mut target = "old".to_string();
        Patch::<String>::Null.apply_to(&mut target);
        Patch::<String>::Absent.apply_to(&mut target);
        assert_eq!(target, "old");
        Patch::Value("new".to_string()).apply_to(&mut target);
        assert_eq!(target, "new");

        let mut opt: Option<i32> = Some(4);
        Patch::<i32>::Null.apply_to_option(&mut opt);
        assert_eq!(opt, Some(4));
        Patch::Value(9).apply_to_option(&mut opt);
        assert_eq!(opt, Some(9));
    }
}
