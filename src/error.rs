/// Extension for results whose failure should be logged and degraded
/// instead of aborting the caller.
pub trait ResultOkLogExt<T, E> {
    /// Logs the error at `error` level and returns `None`.
    fn ok_log(self) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T, E> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn ok_log(self) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::error!("{err}");
                None
            }
        }
    }
}
