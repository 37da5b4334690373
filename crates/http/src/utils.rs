/// Returns early with `$error` unless `$predicate` holds.
///
/// ```ignore
/// ensure!(tokens.len() == 3, ParseError::InvalidRequestLine { found: tokens.len() });
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
