/// Declares a newtype around an opaque, externally assigned string identifier.
///
/// The identifier (de)serializes as a plain string.
#[macro_export]
macro_rules! string_identifier {
    ($(#[$meta:meta])* $id_name: ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $id_name(pub String);

        impl $id_name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $id_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $id_name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_owned()))
            }
        }

        impl From<&str> for $id_name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $id_name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $id_name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}
