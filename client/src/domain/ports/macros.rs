//! Declares the port error enums shared by the access layer's adapters.
//!
//! Each variant carries named fields and a display message, and gains a
//! snake_case constructor taking `impl Into<T>` per field. Adapters write
//! `SubmissionUploadError::rejected(name)` instead of spelling out the
//! struct variant.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            #[must_use]
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
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Checks the constructors and messages of the declared port errors.

    use rstest::rstest;

    use crate::domain::ports::{SessionProviderError, SubmissionUploadError, TransportError};

    #[rstest]
    #[case(TransportError::transport("connection refused"), "network request failed: connection refused")]
    #[case(TransportError::timeout("deadline elapsed"), "network request timed out: deadline elapsed")]
    fn transport_errors_render_their_cause(#[case] err: TransportError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    fn constructors_accept_owned_and_borrowed_messages() {
        let owned = SubmissionUploadError::rejected(String::from("essay.pdf"));
        let borrowed = SubmissionUploadError::rejected("essay.pdf");
        assert_eq!(owned, borrowed);
        assert_eq!(
            borrowed,
            SubmissionUploadError::Rejected {
                message: "essay.pdf".to_owned()
            }
        );
        assert_eq!(borrowed.to_string(), "submission upload rejected: essay.pdf");
    }

    #[rstest]
    fn variants_with_equal_messages_stay_distinct() {
        assert_ne!(
            SubmissionUploadError::rejected("bucket offline"),
            SubmissionUploadError::unavailable("bucket offline")
        );
        assert_eq!(
            SubmissionUploadError::unavailable("bucket offline").to_string(),
            "submission storage unavailable: bucket offline"
        );
    }

    #[rstest]
    #[case(SessionProviderError::unavailable("auth down"), "session provider unavailable: auth down")]
    #[case(SessionProviderError::invalid("no user id"), "session data invalid: no user id")]
    fn session_provider_errors_render_their_cause(
        #[case] err: SessionProviderError,
        #[case] expected: &str,
    ) {
        assert_eq!(err.to_string(), expected);
    }
}
