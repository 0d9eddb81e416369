use derive_more::{AsRef, Deref, Display, Error, Into};

/// Wrapper that checks compatibility of `lockfileVersion` against `VERSION`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, AsRef, Deref, Into)]
pub struct LockfileVersion<const VERSION: u32>(u32);

impl<const VERSION: u32> LockfileVersion<VERSION> {
    /// Check if `version` is compatible with `VERSION`.
    pub const fn is_compatible(version: u32) -> bool {
        version == VERSION
    }
}

/// Error when a `lockfileVersion` fails compatibility check.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum LockfileVersionError<const VERSION: u32> {
    #[display("The lockfileVersion of {_0} is incompatible with {VERSION}")]
    Incompatible(#[error(not(source))] u32),
}

impl<const VERSION: u32> TryFrom<u32> for LockfileVersion<VERSION> {
    type Error = LockfileVersionError<VERSION>;
    fn try_from(version: u32) -> Result<Self, Self::Error> {
        Self::is_compatible(version)
            .then_some(Self(version))
            .ok_or(Self::Error::Incompatible(version))
    }
}

/// The only `lockfileVersion` whose `requires`/`dependencies` layout this crate understands.
pub type LockfileVersionV1 = LockfileVersion<1>;

#[cfg(test)]
mod tests {
    use super::*;
    use pipe_trait::Pipe;
    use pretty_assertions::assert_eq;

    #[test]
    fn compatible() {
        let received = LockfileVersionV1::try_from(1).unwrap();
        assert_eq!(*received, 1);
        assert_eq!(u32::from(received), 1);
    }

    #[test]
    fn incompatible() {
        macro_rules! case {
            ($input:expr) => {{
                let input: u32 = $input;
                eprintln!("CASE: LockfileVersionV1::try_from({input:?})");
                let error = input.pipe(LockfileVersionV1::try_from).unwrap_err();
                dbg!(&error);
                assert_eq!(
                    error.to_string(),
                    format!("The lockfileVersion of {input} is incompatible with 1"),
                );
                assert_eq!(error, LockfileVersionError::Incompatible(input));
            }};
        }

        case!(0);
        case!(2);
        case!(3);
    }
}
