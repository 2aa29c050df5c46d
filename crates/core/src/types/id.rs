//! Opaque string identifiers for session state.
//!
//! Use the `define_opaque_id!` macro to create type-safe wrappers that prevent
//! accidentally mixing a subject ID with a session token.

/// Macro to define a type-safe opaque identifier.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `is_blank()`
/// - `generate()` for prefixed, clock-ordered fresh values
///
/// # Example
///
/// ```rust
/// # use intune_partner_core::define_opaque_id;
/// define_opaque_id!(TicketId);
/// define_opaque_id!(ReceiptId);
///
/// let ticket = TicketId::new("t-1");
/// let receipt = ReceiptId::new("t-1");
///
/// // These are different types, so this won't compile:
/// // let _: TicketId = receipt;
/// # let _ = (ticket, receipt);
/// ```
#[macro_export]
macro_rules! define_opaque_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Generate a fresh identifier with the given prefix.
            ///
            /// The value is `{prefix}_{unix_millis}_{random}`; the millisecond
            /// component keeps values ordered by creation time.
            #[must_use]
            pub fn generate(prefix: &str) -> Self {
                Self($crate::types::id::fresh_value(prefix))
            }

            /// Get the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is empty or whitespace only.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

#[doc(hidden)]
#[must_use]
pub fn fresh_value(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random = uuid::Uuid::new_v4().simple().to_string();
    let suffix = random.get(..12).unwrap_or(&random);
    format!("{prefix}_{millis}_{suffix}")
}

// Identity of whoever is using the site
define_opaque_id!(SubjectId);
// Bearer value compared for presence only; it is never verified
define_opaque_id!(SessionToken);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_uses_prefix() {
        let id = SubjectId::generate("admin");
        assert!(id.as_str().starts_with("admin_"));

        let token = SessionToken::generate("admin_token");
        assert!(token.as_str().starts_with("admin_token_"));
    }

    #[test]
    fn test_generate_is_unique() {
        let a = SessionToken::generate("t");
        let b = SessionToken::generate("t");
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_blank() {
        assert!(SubjectId::new("").is_blank());
        assert!(SubjectId::new("   ").is_blank());
        assert!(!SubjectId::new("user_1").is_blank());
    }

    #[test]
    fn test_serde_is_transparent() {
        let token = SessionToken::new("abc");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, "\"abc\"");

        let parsed: SessionToken = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn test_display() {
        let id = SubjectId::new("admin_1");
        assert_eq!(format!("{id}"), "admin_1");
    }
}
