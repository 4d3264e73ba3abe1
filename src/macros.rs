/// Builds a [`Value`](crate::Value) with JSON-like syntax.
///
/// Objects become standard tables with keys in the order written. Any other
/// expression goes through `Value::from`.
///
/// ```rust
/// use tomlet::{tomlet, Value};
///
/// let config = tomlet!({
///     "name": "tomlet",
///     "ports": [8080, 8081],
///     "tls": { "enabled": false }
/// });
/// assert_eq!(config.get("ports").and_then(|p| p.get_index(1)), Some(&Value::from(8081)));
/// ```
#[macro_export]
macro_rules! tomlet {
    (true) => {
        $crate::Value::Boolean(true)
    };

    (false) => {
        $crate::Value::Boolean(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::tomlet!($elem)),*])
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key, $crate::tomlet!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($e:expr) => {
        $crate::Value::from($e)
    };
}
