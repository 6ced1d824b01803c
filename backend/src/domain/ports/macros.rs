//! `define_port_error!`: error enums for driven ports.
//!
//! Each variant carries a display message and may name the
//! [`Error`](crate::domain::Error) constructor it maps to:
//!
//! ```ignore
//! define_port_error! {
//!     pub enum MatchRepositoryError {
//!         Connection { message: String } =>
//!             "match repository connection failed: {message}" as service_unavailable,
//!         Query { message: String } =>
//!             "match repository query failed: {message}" as internal,
//!     }
//! }
//! ```
//!
//! Every variant gets a snake_case constructor taking `impl Into<T>` per
//! field. When every variant names a mapping the macro also emits
//! `From<PortError> for Error`, so services propagate with
//! `map_err(Error::from)`. Enums without mappings are translated by hand at
//! the adapter boundary.

macro_rules! define_port_error {
    (@enum
        $(#[$outer:meta])*
        $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* } )? => $message:literal
            ),*
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($( $( $field: impl Into<$ty> ),* )?) -> Self {
                        Self::$variant { $( $( $field: $field.into() ),* )? }
                    }
                )*
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )?
                    => $message:literal as $code:ident
            ),* $(,)?
        }
    ) => {
        define_port_error!(@enum
            $(#[$outer])*
            $name {
                $(
                    $(#[$variant_meta])*
                    $variant $( { $($field : $ty),* } )? => $message
                ),*
            }
        );

        impl From<$name> for $crate::domain::Error {
            fn from(error: $name) -> Self {
                let message = error.to_string();
                match error {
                    $( $name::$variant { .. } => Self::$code(message), )*
                }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        define_port_error!(@enum
            $(#[$outer])*
            $name {
                $(
                    $(#[$variant_meta])*
                    $variant $( { $($field : $ty),* } )? => $message
                ),*
            }
        );
    };
}

pub(crate) use define_port_error;
