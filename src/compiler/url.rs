//! URL synthesis from a resource path name and a method name.

use super::classify::custom_suffix;

/// Builds the URL template for `method_name` on the resource `path_name`.
///
/// The index resource is mounted at `/`, every other resource at
/// `/<path_name>/`. Single-resource methods append an `:id` marker; custom
/// `get`/`set` methods append a hyphenated slug of their suffix.
///
/// ```rust
/// use roost::compiler::make_url;
///
/// assert_eq!(make_url("index", "fetchAll", "index"), "/");
/// assert_eq!(make_url("user", "fetchSingle", "index"), "/user/:id");
/// assert_eq!(make_url("foo", "setYourMagicMethod", "index"), "/foo/your-magic-method/");
/// ```
pub fn make_url(path_name: &str, method_name: &str, index_path_name: &str) -> String {
    let mut url = if path_name == index_path_name {
        String::from("/")
    } else {
        format!("/{path_name}/")
    };

    if matches!(method_name, "fetchSingle" | "update" | "delete") {
        url.push_str(":id");
    }

    if let Some(suffix) = custom_suffix(method_name, "get").or_else(|| custom_suffix(method_name, "set")) {
        url.push_str(&slug(suffix));
        url.push('/');
    }

    url
}

/// `MyCustomMethod` → `my-custom-method`. Only ASCII capitals start a word.
fn slug(suffix: &str) -> String {
    let mut out = String::with_capacity(suffix.len() + 4);
    for (i, c) in suffix.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
