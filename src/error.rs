/// Why an evaluation was aborted rather than merely failing to match.
///
/// An ordinary non-match is `Ok(None)`, never an error.
#[derive(Debug)]
pub enum EvalError {
    /// A handler callback returned an error.
    Handler(anyhow::Error),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Handler(err) => write!(f, "Pattern handler failed: {err}"),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Handler(err) => Some(&**err),
        }
    }
}

/// Problems with a grammar's configuration, found by
/// [`Grammar::check`](crate::Grammar::check).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// Rules that were referenced but never defined, in slot order.
    Unresolved(Vec<String>),
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unresolved(names) => {
                write!(f, "Undefined grammar rule")?;
                if names.len() != 1 {
                    write!(f, "s")?;
                }
                write!(f, ": {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for GrammarError {}
