use error_stack::{report, Report};

/// Error messages
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("cannot find project root containing `{0}`")]
    FindProjectRoot(&'static str),
    #[error("expect: {0}")]
    Expect(&'static str),

    // === path operations ===
    #[error("failed to canonicalize `{0}`")]
    Canonicalize(String),

    // === file operations ===
    #[error("failed to read from `{0}`")]
    ReadFile(String),
    #[error("failed to write to `{0}`")]
    WriteFile(String),

    // === config ===
    #[error("unknown legacy architecture `{0}`")]
    UnknownArch(String),
}

/// Marker trait for errors that can be used
/// in the context wrapper system
pub trait Context: error_stack::Context {}

/// Trait for wrapping execution with some context
pub trait ChangeContext: Sized {
    type Target: error_stack::Context;
    fn change_context(report: Report<impl Context>) -> Report<Self::Target>;
}

/// Wrapper for Report so we can implement our own traits
#[repr(transparent)]
pub struct ReportWrapper<CC: ChangeContext>(Report<CC::Target>);

/// A Result type that wraps errors with context
/// automatically when using the `?` operator
pub type ResultIn<T, C> = Result<T, ReportWrapper<C>>;

impl<E: Context, CC: ChangeContext> From<E> for ReportWrapper<CC> {
    #[track_caller]
    fn from(value: E) -> Self {
        Self(CC::change_context(report!(value)))
    }
}

impl<E: Context, CC: ChangeContext> From<Report<E>> for ReportWrapper<CC> {
    #[track_caller]
    fn from(value: Report<E>) -> Self {
        Self(CC::change_context(value))
    }
}

impl<CC: ChangeContext> From<ReportWrapper<CC>> for Report<CC::Target> {
    fn from(value: ReportWrapper<CC>) -> Report<CC::Target> {
        value.0
    }
}

/// Create a type and implement the ChangeContext trait for it
#[macro_export]
macro_rules! error_context {
    ($vis:vis $ty:ident, | $report:ident | -> $target:ty $body:block) => {
        $vis struct $ty;
        impl $crate::system::ChangeContext for $ty {
            type Target = $target;
            #[inline]
            fn change_context($report: error_stack::Report<impl $crate::system::Context>) -> error_stack::Report<$target> {
                $body
            }
        }
    }
}

/// Conversions from [`ResultIn`] back to a plain `error_stack` result.
///
/// Only the operations the tool needs at command boundaries are provided.
pub trait ResultInExt {
    /// The context of the wrapped report
    type Context: error_stack::Context;

    /// Type of the [`Ok`] value
    type Ok;

    /// Unwrap into a plain report, keeping the converted context
    fn into_report(self) -> Result<Self::Ok, Report<Self::Context>>;

    /// Adds a printable attachment to the report
    fn attach_printable<A>(self, attachment: A) -> Result<Self::Ok, Report<Self::Context>>
    where
        A: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static;
}

impl<T, C> ResultInExt for ResultIn<T, C>
where
    C: ChangeContext,
{
    type Context = C::Target;
    type Ok = T;

    fn into_report(self) -> Result<T, Report<Self::Context>> {
        self.map_err(|ReportWrapper(report)| report)
    }

    #[track_caller]
    fn attach_printable<A>(self, attachment: A) -> Result<T, Report<Self::Context>>
    where
        A: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        // `#[track_caller]` does not propagate into closures
        match self {
            Ok(ok) => Ok(ok),
            Err(ReportWrapper(report)) => Err(report.attach_printable(attachment)),
        }
    }
}

// only this crate can implement the Context trait,
// so foreign errors used with `?` are listed here

impl Context for Error {}
impl Context for std::io::Error {}
impl Context for toml::de::Error {}
impl Context for serde_json::Error {}
