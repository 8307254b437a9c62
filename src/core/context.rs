//! Extended state carried alongside the finite state value.

use serde_json::{Map, Value};

/// Free-form key/value record holding a machine's extended state.
pub type Context = Map<String, Value>;

/// Shallow-merge `partial` into `context`.
///
/// Keys present in `partial` replace the existing values wholesale (nested
/// objects are not merged); keys absent from `partial` keep their values.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{merge, Context};
/// use serde_json::json;
///
/// let mut context: Context = json!({ "count": 1, "name": "a" })
///     .as_object()
///     .cloned()
///     .unwrap_or_default();
/// let partial: Context = json!({ "count": 2 }).as_object().cloned().unwrap_or_default();
///
/// merge(&mut context, partial);
/// assert_eq!(context["count"], json!(2));
/// assert_eq!(context["name"], json!("a"));
/// ```
pub fn merge(context: &mut Context, partial: Context) {
    for (key, value) in partial {
        context.insert(key, value);
    }
}
