//! Error types for the orgtree core library.
//!
//! Defines the caller-facing failure signals of hierarchy generation and
//! dataset management, and a convenient result alias. Unresolvable manager references, cyclic chains
//! and malformed edit requests are tolerated rather than reported here.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced by [`crate::OrgSession`] and [`crate::DatasetRegistry`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OrgError {
    /// No employees matched the department and location filters.
    #[error("no employees found matching the selected criteria (department `{department}`{})",
        location.as_deref().map(|loc| format!(", location `{loc}`")).unwrap_or_default())]
    EmptySelection {
        /// Department filter that was applied.
        department: String,
        /// Location filter that was applied, if any.
        location: Option<String>,
    },
    /// The manager filter did not resolve to a manager of the filtered roster.
    #[error("selected manager `{manager}` not found in department `{department}`")]
    ManagerNotFound {
        /// Manager name supplied by the caller.
        manager: String,
        /// Department that was searched.
        department: String,
    },
    /// Generation was requested without a department.
    #[error("a department must be selected before generating a hierarchy")]
    MissingDepartment,
    /// A dataset was created with a blank name.
    #[error("a dataset name must not be blank")]
    BlankDatasetName,
    /// A dataset with this name already exists.
    #[error("dataset `{name}` already exists")]
    DuplicateDataset {
        /// The trimmed name that collided.
        name: String,
    },
    /// No dataset has this name.
    #[error("no dataset named `{name}`")]
    UnknownDataset {
        /// Name supplied by the caller.
        name: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`OrgError`] variants.
    enum OrgErrorCode for OrgError {
        /// No employees matched the department and location filters.
        EmptySelection => EmptySelection { .. } => "ORGTREE_EMPTY_SELECTION",
        /// The manager filter did not resolve to a manager of the filtered roster.
        ManagerNotFound => ManagerNotFound { .. } => "ORGTREE_MANAGER_NOT_FOUND",
        /// Generation was requested without a department.
        MissingDepartment => MissingDepartment => "ORGTREE_MISSING_DEPARTMENT",
        /// A dataset was created with a blank name.
        BlankDatasetName => BlankDatasetName => "ORGTREE_BLANK_DATASET_NAME",
        /// A dataset with this name already exists.
        DuplicateDataset => DuplicateDataset { .. } => "ORGTREE_DUPLICATE_DATASET",
        /// No dataset has this name.
        UnknownDataset => UnknownDataset { .. } => "ORGTREE_UNKNOWN_DATASET",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, OrgError>;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        OrgError::EmptySelection { department: "X".into(), location: None },
        "ORGTREE_EMPTY_SELECTION",
    )]
    #[case(
        OrgError::ManagerNotFound { manager: "Zed".into(), department: "X".into() },
        "ORGTREE_MANAGER_NOT_FOUND",
    )]
    #[case(OrgError::MissingDepartment, "ORGTREE_MISSING_DEPARTMENT")]
    #[case(OrgError::BlankDatasetName, "ORGTREE_BLANK_DATASET_NAME")]
    #[case(OrgError::DuplicateDataset { name: "Q3".into() }, "ORGTREE_DUPLICATE_DATASET")]
    #[case(OrgError::UnknownDataset { name: "Q4".into() }, "ORGTREE_UNKNOWN_DATASET")]
    fn codes_are_stable(#[case] error: OrgError, #[case] expected: &str) {
        assert_eq!(error.code().as_str(), expected);
        assert_eq!(error.code().to_string(), expected);
    }

    #[rstest]
    fn empty_selection_message_names_location_when_present() {
        let with_location = OrgError::EmptySelection {
            department: "Sales".into(),
            location: Some("Leeds".into()),
        };
        let without = OrgError::EmptySelection {
            department: "Sales".into(),
            location: None,
        };
        assert_eq!(
            with_location.to_string(),
            "no employees found matching the selected criteria (department `Sales`, location `Leeds`)",
        );
        assert_eq!(
            without.to_string(),
            "no employees found matching the selected criteria (department `Sales`)",
        );
    }
}
