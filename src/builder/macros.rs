//! Macros for ergonomic label definitions.

/// Generate a `Label` implementation for a plain enum.
///
/// The enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug`
/// and serde's `Serialize`/`Deserialize`; each variant's name is its
/// identifier.
///
/// # Example
///
/// ```
/// use statem::label_enum;
/// use statem::core::Label;
///
/// label_enum! {
///     pub enum OrderState {
///         Created,
///         Paid,
///         Shipped,
///     }
/// }
///
/// assert_eq!(OrderState::Paid.name(), "Paid");
/// ```
#[macro_export]
macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Label for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
