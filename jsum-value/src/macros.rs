/// Builds a [`Value`](crate::Value) from JSON literal syntax.
///
/// ```
/// use jsum_value::{Value, value};
///
/// let v = value!({"name": "Bob", "age": 25, "tags": [], "boss": null});
/// assert_eq!(v.get("age"), Some(&Value::Int(25)));
/// ```
#[macro_export]
macro_rules! value {
    ($($json:tt)+) => {
        $crate::Value::from($crate::__private::serde_json::json!($($json)+))
    };
}
