//! Newtype handles for type-safe upstream references.
//!
//! Use the `define_handle!` macro to create handle wrappers that prevent
//! accidentally passing a product handle where a collection handle is expected.

/// Errors that can occur when parsing a handle.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The input string is empty or whitespace.
    #[error("handle cannot be empty")]
    Empty,
}

/// Macro to define a type-safe handle wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `parse()` rejecting empty input, `as_str()`, `into_inner()`
/// - `Display` and `AsRef<str>` implementations
///
/// Handles are opaque: beyond non-emptiness no slug rules are enforced, the
/// upstream decides whether a handle exists.
///
/// # Example
///
/// ```rust
/// # use shopify_collections_core::define_handle;
/// define_handle!(VendorHandle);
///
/// let handle = VendorHandle::parse("acme").unwrap();
/// assert_eq!(handle.as_str(), "acme");
/// assert!(VendorHandle::parse("  ").is_err());
/// ```
#[macro_export]
macro_rules! define_handle {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse a handle, rejecting empty or whitespace-only input.
            ///
            /// # Errors
            ///
            /// Returns [`HandleError::Empty`](crate::HandleError::Empty) if the
            /// input contains no non-whitespace characters.
            pub fn parse(s: impl Into<String>) -> ::core::result::Result<Self, $crate::HandleError> {
                let s = s.into();
                if s.trim().is_empty() {
                    return Err($crate::HandleError::Empty);
                }
                Ok(Self(s))
            }

            /// Get the handle as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the handle, returning the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_handle!(CollectionHandle);
define_handle!(ProductHandle);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_slug() {
        let handle = CollectionHandle::parse("frontpage").unwrap();
        assert_eq!(handle.as_str(), "frontpage");
        assert_eq!(handle.to_string(), "frontpage");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(CollectionHandle::parse(""), Err(HandleError::Empty));
        assert_eq!(ProductHandle::parse(" \n\t"), Err(HandleError::Empty));
    }

    #[test]
    fn test_parse_keeps_value_verbatim() {
        // Decoded path segments are passed through untouched.
        let handle = CollectionHandle::parse("summer sale").unwrap();
        assert_eq!(handle.into_inner(), "summer sale");
    }

    #[test]
    fn test_serializes_transparently() {
        let handle = ProductHandle::parse("mug").unwrap();
        assert_eq!(serde_json::to_string(&handle).unwrap(), "\"mug\"");
    }
}
