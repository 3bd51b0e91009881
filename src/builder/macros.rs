//! Macros for ergonomic state machine construction.

/// Declare a closed state enum whose variants wrap same-named payload types.
///
/// For every listed type `T`, the macro declares a variant `T(T)`,
/// implements [`Alternative`](crate::core::Alternative) for `T` and
/// `From<T>` for the enum. It also implements [`State`](crate::core::State),
/// using variant names as state names.
///
/// Payload types must implement `Clone`, `PartialEq`, `Debug`, `Serialize`
/// and `Deserialize`, since the enum derives them. Serde is only needed for
/// [checkpoints](crate::checkpoint); dispatch and the typed queries never
/// serialize. State enums whose payloads cannot be serialized implement
/// [`State`](crate::core::State) and [`Alternative`](crate::core::Alternative)
/// by hand instead, as shown on `Alternative`.
///
/// # Example
///
/// ```
/// use fsmcell::core::{Alternative, State};
/// use fsmcell::state_enum;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// pub struct Start;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// pub struct Processing {
///     pub batch: u32,
/// }
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// pub struct Done;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// pub struct Failed {
///     pub reason: String,
/// }
///
/// state_enum! {
///     pub enum WorkflowState {
///         Start,
///         Processing,
///         Done,
///         Failed,
///     }
///     final: [Done, Failed]
///     error: [Failed]
/// }
///
/// let state: WorkflowState = Processing { batch: 4 }.into();
/// assert_eq!(state.name(), "Processing");
/// assert_eq!(Processing::project(&state), Some(&Processing { batch: 4 }));
/// assert!(!Done::is_active(&state));
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant($variant)
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant(_) => stringify!($variant)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final(_) => true,)*)?
                    _ => false,
                }
            }

            #[allow(unreachable_patterns)]
            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error(_) => true,)*)?
                    _ => false,
                }
            }
        }

        $(
            impl $crate::core::Alternative<$name> for $variant {
                #[allow(unreachable_patterns)]
                fn project(state: &$name) -> ::std::option::Option<&Self> {
                    match state {
                        $name::$variant(inner) => ::std::option::Option::Some(inner),
                        _ => ::std::option::Option::None,
                    }
                }

                fn inject(self) -> $name {
                    $name::$variant(self)
                }
            }

            impl ::std::convert::From<$variant> for $name {
                fn from(inner: $variant) -> Self {
                    $name::$variant(inner)
                }
            }
        )*
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Alternative, State};
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Initial;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Processing {
        items: Vec<u32>,
    }

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Complete;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Failed(String);

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
            Failed,
        }
        final: [Complete, Failed]
        error: [Failed]
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        let state = TestState::Initial(Initial);
        assert_eq!(state.name(), "Initial");
        assert!(!state.is_final());
        assert!(!state.is_error());

        let complete = TestState::Complete(Complete);
        assert!(complete.is_final());
        assert!(!complete.is_error());

        let failed = TestState::Failed(Failed("timeout".into()));
        assert!(failed.is_final());
        assert!(failed.is_error());
    }

    #[test]
    fn state_enum_generates_alternatives() {
        let state: TestState = Processing { items: vec![1, 2] }.into();

        assert!(Processing::is_active(&state));
        assert!(!Initial::is_active(&state));
        assert_eq!(
            Processing::project(&state),
            Some(&Processing { items: vec![1, 2] })
        );
        assert_eq!(TestState::Failed(Failed("x".into())), Failed("x".into()).inject());
    }

    #[test]
    fn state_enum_is_serializable() {
        let state: TestState = Failed("disk full".into()).into();

        let json = serde_json::to_string(&state).unwrap();
        let restored: TestState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, restored);
    }

    #[test]
    fn state_enum_works_without_final_error() {
        #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
        struct One;

        #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
        struct Two;

        state_enum! {
            enum MinimalState {
                One,
                Two,
            }
        }

        let state = MinimalState::One(One);
        assert!(!state.is_final());
        assert!(!state.is_error());
        assert_eq!(MinimalState::Two(Two).name(), "Two");
    }
}
