/// Adds `new` and `From<&str>` to a single-field `String` newtype.
#[macro_export]
macro_rules! impl_string_newtype {
    ($name:ident) => {
        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}
