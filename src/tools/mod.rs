use log::error;
use std::fmt::Debug;

pub mod env_args;
pub mod web;

/// Log the error, then discard it in favour of `value_to_return`.
/// Meant to be used with `map_err` and friends.
pub fn log_error_and_return<E: Debug, T>(value_to_return: T) -> impl FnOnce(E) -> T {
    |e| {
        error!("{e:#?}");
        value_to_return
    }
}

pub fn log_message_and_return<E: Debug, T>(
    message: &str,
    value_to_return: T,
) -> impl FnOnce(E) -> T {
    move |e| {
        error!("{message}\n{e:#?}");
        value_to_return
    }
}
