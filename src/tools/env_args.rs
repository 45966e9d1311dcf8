#[cfg(test)]
use std::cell::RefCell;
use std::env;

/// Retrieve the value of an arg passed to the app as `--name=value`.
///
/// /!\ As this works on global variables,
/// a function using `retrieve_arg_value` could be tricky to test.
/// To do so, wrap your test with `with_env_args(args, fn)`.
/// This function is only available in a test context.
pub fn retrieve_arg_value(arg_name: &str) -> Option<String> {
    let arg_prefix = format!("{arg_name}=");
    get_env_args()
        .into_iter()
        .find(|arg| arg.starts_with(&arg_prefix))
        .and_then(|arg| arg.split_once('=').map(|(_, value)| value.to_owned()))
}

/// Retrieve a setting, first from the args passed to the app, then from the environment.
/// Empty values are ignored.
pub fn retrieve_setting(arg_name: &str, env_var_name: &str) -> Option<String> {
    retrieve_arg_value(arg_name)
        .filter(|value| !value.is_empty())
        .or_else(|| env::var(env_var_name).ok())
        .filter(|value| !value.is_empty())
}

#[cfg(not(test))]
fn get_env_args() -> Vec<String> {
    env::args().collect()
}

#[cfg(test)]
thread_local! {
    /// Args for tests, set up by `with_env_args`.
    static ENV_ARGS: RefCell<Vec<String>> = const { RefCell::new(vec![]) };
}
#[cfg(test)]
fn get_env_args() -> Vec<String> {
    ENV_ARGS.with(|vec| vec.borrow().clone())
}

#[cfg(test)]
/// Run `function` as if `args` had been passed to the app.
/// Previous args are restored afterward.
pub fn with_env_args<F, T>(args: Vec<String>, function: F) -> T
where
    F: FnOnce() -> T,
{
    ENV_ARGS.with(|refcell| {
        let old_value = refcell.replace(args);
        let result = function();
        refcell.replace(old_value);
        result
    })
}
