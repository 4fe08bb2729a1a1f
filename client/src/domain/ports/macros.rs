//! Helper macro for generating port error enums.
//!
//! Each variant gets a snake-case constructor whose fields accept anything
//! convertible into the field type, so adapters can write
//! `EventStoreError::transport(err.to_string())`. A `kind()` accessor names
//! the variant for log fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            /// Build the variant of the same name.
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            /// Build the variant of the same name.
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( {
                    $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)?
                } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $( $(#[$field_meta])* $field : $ty ),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Variant name, for structured log fields.
            pub const fn kind(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant $( { $($field: _),* } )? => stringify!($variant),
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;
